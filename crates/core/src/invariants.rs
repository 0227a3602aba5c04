//! Developer guardrails and invariants
//!
//! Debug assertions for detecting impossible registry states during
//! development. These checks are compiled out in release builds.

use std::collections::HashSet;

use crate::models::AppEntry;

/// Validate that a single entry is well-formed
pub fn assert_entry_invariants(entry: &AppEntry) {
    debug_assert!(
        !entry.name.trim().is_empty(),
        "Entry {} has empty name",
        entry.id
    );
}

/// Validate that an entry list holds unique ids and case-insensitively unique names
pub fn assert_registry_invariants(entries: &[AppEntry]) {
    let mut names = HashSet::new();
    let mut ids = HashSet::new();

    for entry in entries {
        assert_entry_invariants(entry);

        debug_assert!(
            names.insert(entry.name.to_lowercase()),
            "Duplicate entry name {:?} (case-insensitive)",
            entry.name
        );

        debug_assert!(ids.insert(entry.id), "Duplicate entry id {}", entry.id);
    }
}
