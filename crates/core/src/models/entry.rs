//! Application entry model
//!
//! One configured application: a display name, an optional resolved path,
//! and whether it takes part in the next launch sweep.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identity of an entry for the lifetime of the process.
///
/// Names are mutable, so registry operations address entries by id.
/// Ids are never persisted; each load assigns fresh ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntryId(pub Uuid);

impl EntryId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EntryId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A configured application
///
/// Serialized as `{ "name", "path", "default_checked" }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppEntry {
    #[serde(skip, default)]
    pub id: EntryId,
    pub name: String,
    #[serde(default)]
    pub path: Option<String>,
    /// Include in the next launch sweep
    #[serde(rename = "default_checked", default)]
    pub checked: bool,
}

impl AppEntry {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: EntryId::new(),
            name: name.into(),
            path: None,
            checked: false,
        }
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn checked(mut self, checked: bool) -> Self {
        self.checked = checked;
        self
    }

    /// Path if set and non-empty
    pub fn target(&self) -> Option<&str> {
        self.path.as_deref().filter(|p| !p.is_empty())
    }

    /// Case-insensitive name comparison used for uniqueness checks
    pub fn name_matches(&self, other: &str) -> bool {
        self.name.to_lowercase() == other.to_lowercase()
    }

    /// List label, e.g. `Navigraph Charts (Found: Navigraph Charts.app)`
    pub fn display_label(&self) -> String {
        let found = self.target().map(|p| {
            Path::new(p)
                .file_name()
                .map(|f| f.to_string_lossy().into_owned())
                .unwrap_or_else(|| p.to_string())
        });

        match found {
            Some(file) => format!("{} (Found: {})", self.name, file),
            None => self.name.clone(),
        }
    }
}

/// Built-in application list used when no usable configuration exists
pub fn seed_entries() -> Vec<AppEntry> {
    vec![
        AppEntry::new("Microsoft Flight Simulator").checked(true),
        AppEntry::new("ElevateX"),
        AppEntry::new("Navigraph Charts"),
    ]
}
