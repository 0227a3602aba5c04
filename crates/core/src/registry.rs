//! Application registry - the live, ordered list of entries
//!
//! The registry exclusively owns the entries for the lifetime of the
//! process. Every mutating operation ends with a full save through the
//! [`ConfigStore`], so a crash loses at most the change in flight.
//! Entries are addressed by [`EntryId`]; names may change under edit.

use std::collections::HashSet;

use tracing::instrument;

use crate::discovery::{Discoverer, DiscoveryReport, HostEnv};
use crate::error::{ConfigError, Error, Result, ValidationError};
use crate::invariants::assert_registry_invariants;
use crate::launcher::{LaunchReport, Launcher};
use crate::models::{AppEntry, EntryId};
use crate::storage::ConfigStore;

/// How [`AppRegistry::initialize`] arrived at its entries
#[derive(Debug)]
pub enum LoadOutcome {
    /// Entries read from the config file for this platform
    Loaded(usize),
    /// No file, or nothing stored for this platform; seeds persisted
    Seeded,
    /// The file could not be read or parsed; seeds persisted over it
    Recovered(ConfigError),
}

impl LoadOutcome {
    /// Message to show the user, if any
    pub fn warning(&self) -> Option<String> {
        match self {
            Self::Recovered(e) => Some(format!(
                "Error reading config file: {}\nUsing default applications.",
                e
            )),
            _ => None,
        }
    }
}

/// Ordered, name-unique collection of application entries
#[derive(Debug)]
pub struct AppRegistry {
    store: ConfigStore,
    entries: Vec<AppEntry>,
}

impl AppRegistry {
    /// Create an empty registry backed by `store`
    pub fn new(store: ConfigStore) -> Self {
        Self {
            store,
            entries: Vec::new(),
        }
    }

    /// Load this platform's entries, falling back to `seed`.
    ///
    /// Called once at startup. Returns `Err` only when the fallback seeds
    /// could not be persisted.
    #[instrument(skip(self, seed), fields(path = %self.store.path().display()))]
    pub fn initialize(&mut self, seed: Vec<AppEntry>) -> Result<LoadOutcome> {
        let outcome = match self.store.load_entries() {
            Ok(loaded) => {
                let loaded = sanitize_loaded(loaded);
                if !loaded.is_empty() {
                    let count = loaded.len();
                    tracing::info!(
                        count,
                        platform = %self.store.platform_key(),
                        "Loaded applications from config"
                    );
                    self.entries = loaded;
                    assert_registry_invariants(&self.entries);
                    return Ok(LoadOutcome::Loaded(count));
                }

                tracing::info!(
                    platform = %self.store.platform_key(),
                    "No applications stored for this platform; using defaults"
                );
                LoadOutcome::Seeded
            }
            Err(ConfigError::NotFound(_)) => {
                tracing::info!("Config file not found; using default applications");
                LoadOutcome::Seeded
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load config; resetting to default applications");
                LoadOutcome::Recovered(e)
            }
        };

        self.entries = seed;
        self.persist()?;
        Ok(outcome)
    }

    /// Entries in insertion order
    pub fn entries(&self) -> &[AppEntry] {
        &self.entries
    }

    pub fn get(&self, id: EntryId) -> Option<&AppEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Look up an entry by name, case-insensitively
    pub fn find_by_name(&self, name: &str) -> Option<&AppEntry> {
        self.entries.iter().find(|e| e.name_matches(name))
    }

    /// Entries that take part in the next launch sweep
    pub fn checked(&self) -> impl Iterator<Item = &AppEntry> {
        self.entries.iter().filter(|e| e.checked)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Append a new, unchecked entry.
    ///
    /// If the save fails the entry stays in memory and the config error is
    /// returned; look it up with [`find_by_name`](Self::find_by_name) rather
    /// than retrying, which would be rejected as a duplicate.
    pub fn add(&mut self, name: &str, path: &str) -> Result<EntryId> {
        let (name, path) = self.validate(name, path, None)?;

        let entry = AppEntry::new(name).with_path(path);
        let id = entry.id;
        tracing::info!(app = %entry.name, "Added application");
        self.entries.push(entry);
        self.persist()?;
        Ok(id)
    }

    /// Rename and re-point an entry in place
    pub fn edit(&mut self, id: EntryId, new_name: &str, new_path: &str) -> Result<()> {
        let index = self.index_of(id).ok_or(Error::EntryNotFound(id))?;
        let (name, path) = self.validate(new_name, new_path, Some(id))?;

        let entry = &mut self.entries[index];
        tracing::info!(from = %entry.name, to = %name, "Edited application");
        entry.name = name;
        entry.path = Some(path);
        self.persist()
    }

    /// Remove an entry. Returns false, without saving, if it is not present.
    pub fn remove(&mut self, id: EntryId) -> Result<bool> {
        let Some(index) = self.index_of(id) else {
            return Ok(false);
        };

        let removed = self.entries.remove(index);
        tracing::info!(app = %removed.name, "Deleted application");
        self.persist()?;
        Ok(true)
    }

    /// Set whether an entry is included in the next launch
    pub fn set_checked(&mut self, id: EntryId, checked: bool) -> Result<()> {
        let entry = self.entry_mut(id)?;
        entry.checked = checked;
        self.persist()
    }

    /// Record a discovered path.
    ///
    /// Ignored, and nothing saved, when `new_path` is empty or equal to
    /// the current path. Returns whether the path changed.
    pub fn update_discovered_path(&mut self, id: EntryId, new_path: &str) -> Result<bool> {
        let entry = self.entry_mut(id)?;
        if new_path.is_empty() || entry.path.as_deref() == Some(new_path) {
            return Ok(false);
        }

        tracing::info!(app = %entry.name, path = %new_path, "Updated discovered path");
        entry.path = Some(new_path.to_string());
        self.persist()?;
        Ok(true)
    }

    /// Probe every entry and record changed paths.
    ///
    /// Every entry is probed, even one that already has a path. Each
    /// changed entry is saved on its own; a failed save is reported and the
    /// sweep carries on.
    pub fn discover_all<H: HostEnv>(&mut self, discoverer: &Discoverer<H>) -> DiscoveryReport {
        let mut report = DiscoveryReport {
            supported: discoverer.is_supported(),
            ..Default::default()
        };

        let targets: Vec<(EntryId, String)> = self
            .entries
            .iter()
            .map(|e| (e.id, e.name.clone()))
            .collect();

        for (id, name) in targets {
            report.probed += 1;

            let Some(found) = discoverer.find(&name) else {
                continue;
            };

            match self.update_discovered_path(id, &found.to_string_lossy()) {
                Ok(true) => report.updated += 1,
                Ok(false) => {}
                Err(e) => {
                    tracing::warn!(app = %name, error = %e, "Failed to save discovered path");
                    // The in-memory path did change
                    report.updated += 1;
                    report.failures.push((name, e.to_string()));
                }
            }
        }

        tracing::info!(
            platform = %discoverer.platform(),
            probed = report.probed,
            updated = report.updated,
            failed = report.failures.len(),
            "Discovery sweep finished"
        );
        report
    }

    /// Launch every checked entry, then save once more
    pub fn launch_checked(&mut self, launcher: &Launcher) -> Result<LaunchReport> {
        let report = launcher.launch_all(&self.entries);
        self.persist()?;
        Ok(report)
    }

    /// Trim and check input for add/edit; `exclude` is the entry being edited
    fn validate(
        &self,
        name: &str,
        path: &str,
        exclude: Option<EntryId>,
    ) -> std::result::Result<(String, String), ValidationError> {
        let name = name.trim();
        let path = path.trim();

        if name.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        if path.is_empty() {
            return Err(ValidationError::EmptyPath);
        }

        let duplicate = self
            .entries
            .iter()
            .filter(|e| Some(e.id) != exclude)
            .any(|e| e.name_matches(name));
        if duplicate {
            return Err(ValidationError::DuplicateName(name.to_string()));
        }

        Ok((name.to_string(), path.to_string()))
    }

    fn index_of(&self, id: EntryId) -> Option<usize> {
        self.entries.iter().position(|e| e.id == id)
    }

    fn entry_mut(&mut self, id: EntryId) -> Result<&mut AppEntry> {
        self.entries
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or(Error::EntryNotFound(id))
    }

    fn persist(&self) -> Result<()> {
        assert_registry_invariants(&self.entries);
        self.store.save(&self.entries)?;
        Ok(())
    }
}

/// Drop hand-edited entries that would break name uniqueness
fn sanitize_loaded(entries: Vec<AppEntry>) -> Vec<AppEntry> {
    let mut seen = HashSet::new();
    entries
        .into_iter()
        .filter(|entry| {
            let name = entry.name.trim();
            if name.is_empty() {
                tracing::warn!("Skipping config entry with empty name");
                return false;
            }
            if !seen.insert(name.to_lowercase()) {
                tracing::warn!(app = %entry.name, "Skipping duplicate config entry");
                return false;
            }
            true
        })
        .collect()
}
