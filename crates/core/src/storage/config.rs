//! JSON configuration persistence
//!
//! The document is one JSON object keyed by platform. Only the array under
//! the current platform key is read or replaced; other keys are carried
//! through a save untouched (read-merge-write).

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Value};
use tracing::instrument;

use crate::error::ConfigError;
use crate::models::AppEntry;
use crate::platform::Platform;

/// The whole configuration file, all platforms included
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigDocument {
    platforms: Map<String, Value>,
}

impl ConfigDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(content: &str) -> Result<Self, serde_json::Error> {
        Self::from_slice(content.as_bytes())
    }

    /// Parse raw file bytes; invalid UTF-8 is a parse error like any other
    pub fn from_slice(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        let platforms: Map<String, Value> = serde_json::from_slice(bytes)?;
        Ok(Self { platforms })
    }

    /// Entries stored under `key`; an absent key yields an empty list
    pub fn entries_for(&self, key: &str) -> Result<Vec<AppEntry>, serde_json::Error> {
        match self.platforms.get(key) {
            Some(value) => serde_json::from_value(value.clone()),
            None => Ok(Vec::new()),
        }
    }

    /// Replace the array under `key`, leaving every other key as-is
    pub fn set_entries(&mut self, key: &str, entries: &[AppEntry]) -> Result<(), serde_json::Error> {
        let value = serde_json::to_value(entries)?;
        self.platforms.insert(key.to_string(), value);
        Ok(())
    }

    /// Raw JSON stored under `key`
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.platforms.get(key)
    }

    /// Pretty-printed with four-space indentation
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        let mut buf = Vec::new();
        let formatter = PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.platforms.serialize(&mut ser)?;
        // serde_json only ever emits valid UTF-8
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}

/// Load/save gateway for one config file and one platform key.
///
/// Holds no entry state of its own.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
    platform_key: String,
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>, platform_key: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            platform_key: platform_key.into(),
        }
    }

    /// Store keyed by the platform this process runs on
    pub fn for_current_platform(path: impl Into<PathBuf>) -> Self {
        Self::new(path, Platform::current().key())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn platform_key(&self) -> &str {
        &self.platform_key
    }

    /// Read and parse the whole document
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub fn load(&self) -> Result<ConfigDocument, ConfigError> {
        self.ensure_parent_dir()?;

        let content = match fs::read(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(ConfigError::NotFound(self.path.clone()));
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        ConfigDocument::from_slice(&content).map_err(|source| ConfigError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }

    /// Entries for this store's platform key
    pub fn load_entries(&self) -> Result<Vec<AppEntry>, ConfigError> {
        let document = self.load()?;
        document
            .entries_for(&self.platform_key)
            .map_err(|source| ConfigError::Corrupt {
                path: self.path.clone(),
                source,
            })
    }

    /// Replace this platform's entries and write the document back.
    ///
    /// An existing file that cannot be read or parsed is treated as an empty
    /// document, so a save always attempts the write.
    #[instrument(skip(self, entries), fields(path = %self.path.display(), count = entries.len()))]
    pub fn save(&self, entries: &[AppEntry]) -> Result<(), ConfigError> {
        let mut document = match self.load() {
            Ok(document) => document,
            Err(ConfigError::NotFound(_)) => ConfigDocument::new(),
            Err(ConfigError::Corrupt { source, .. }) => {
                tracing::warn!(error = %source, "Existing config file is invalid JSON; overwriting");
                ConfigDocument::new()
            }
            Err(e) => {
                tracing::warn!(error = %e, "Existing config file is unreadable; overwriting");
                ConfigDocument::new()
            }
        };

        let corrupt = |source| ConfigError::Corrupt {
            path: self.path.clone(),
            source,
        };
        document.set_entries(&self.platform_key, entries).map_err(corrupt)?;
        let json = document.to_json().map_err(corrupt)?;

        fs::write(&self.path, json).map_err(|source| ConfigError::Io {
            path: self.path.clone(),
            source,
        })?;

        tracing::debug!(platform = %self.platform_key, "Saved applications to config");
        Ok(())
    }

    fn ensure_parent_dir(&self) -> Result<(), ConfigError> {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() && !parent.exists() => {
                fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample_entries() -> Vec<AppEntry> {
        vec![
            AppEntry::new("Microsoft Flight Simulator").checked(true),
            AppEntry::new("Navigraph Charts").with_path("/Applications/Navigraph Charts.app"),
            AppEntry::new("ElevateX"),
        ]
    }

    #[test]
    fn test_load_missing_file_is_not_found() {
        let temp = TempDir::new().unwrap();
        let store = ConfigStore::new(temp.path().join("config.json"), "linux");

        let err = store.load().unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_creates_parent_directory() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("vainnor").join("AeroLaunch");
        let store = ConfigStore::new(dir.join("config.json"), "linux");

        assert!(store.load().unwrap_err().is_not_found());
        assert!(dir.is_dir());
    }

    #[test]
    fn test_round_trip_preserves_order_and_fields() {
        let temp = TempDir::new().unwrap();
        let store = ConfigStore::new(temp.path().join("config.json"), "darwin");
        let entries = sample_entries();

        store.save(&entries).unwrap();
        let loaded = store.load_entries().unwrap();

        let summary = |list: &[AppEntry]| {
            list.iter()
                .map(|e| (e.name.clone(), e.path.clone(), e.checked))
                .collect::<Vec<_>>()
        };
        assert_eq!(summary(&loaded), summary(&entries));
    }

    #[test]
    fn test_save_leaves_other_platforms_untouched() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.json");
        let other = r#"{"B": [{"name": "Keep", "path": "C:\\keep.exe", "default_checked": true, "extra": 1}]}"#;
        fs::write(&path, other).unwrap();

        let store = ConfigStore::new(&path, "A");
        store.save(&sample_entries()).unwrap();

        let document = ConfigDocument::from_json(&fs::read_to_string(&path).unwrap()).unwrap();
        let original = ConfigDocument::from_json(other).unwrap();
        assert_eq!(document.get("B"), original.get("B"));
        assert_eq!(document.entries_for("A").unwrap().len(), 3);
    }

    #[test]
    fn test_save_over_corrupt_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();

        let store = ConfigStore::new(&path, "win32");
        assert!(matches!(store.load(), Err(ConfigError::Corrupt { .. })));

        store.save(&sample_entries()).unwrap();
        assert_eq!(store.load_entries().unwrap().len(), 3);
    }

    #[test]
    fn test_invalid_utf8_is_corrupt() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.json");
        let mut torn = br#"{"linux": [{"name": ""#.to_vec();
        torn.extend_from_slice(&[0xD0, 0x9F, 0xD1]);
        fs::write(&path, torn).unwrap();

        let store = ConfigStore::new(&path, "linux");
        assert!(matches!(store.load(), Err(ConfigError::Corrupt { .. })));

        store.save(&sample_entries()).unwrap();
        assert_eq!(store.load_entries().unwrap().len(), 3);
    }

    #[test]
    fn test_absent_platform_key_is_empty() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.json");
        fs::write(&path, r#"{"darwin": []}"#).unwrap();

        let store = ConfigStore::new(&path, "win32");
        assert!(store.load_entries().unwrap().is_empty());
    }

    #[test]
    fn test_wrong_shape_is_corrupt() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.json");
        fs::write(&path, r#"{"linux": {"name": "not an array"}}"#).unwrap();

        let store = ConfigStore::new(&path, "linux");
        assert!(matches!(store.load_entries(), Err(ConfigError::Corrupt { .. })));
    }

    #[test]
    fn test_written_json_is_pretty() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.json");
        let store = ConfigStore::new(&path, "linux");
        store.save(&[AppEntry::new("X")]).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("\n    \"linux\": ["));
        assert!(content.contains("\"default_checked\": false"));
        assert!(content.contains("\"path\": null"));
    }
}
