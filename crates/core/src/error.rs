//! Error types for AeroLaunch Core

use std::path::PathBuf;

use thiserror::Error;

use crate::models::EntryId;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("Entry not found: {0}")]
    EntryNotFound(EntryId),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Failures reading or writing the configuration document
#[derive(Error, Debug)]
pub enum ConfigError {
    /// First run; not a failure to surface
    #[error("Config file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Config file {} is not valid JSON: {source}", path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to access config file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ConfigError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// Rejected add/edit input. Nothing is mutated when one of these is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Application name cannot be empty.")]
    EmptyName,

    #[error("Application path cannot be empty.")]
    EmptyPath,

    #[error("An application named '{0}' already exists (case-insensitive). Please choose a different name.")]
    DuplicateName(String),
}

/// Why one entry of a launch sweep did not start
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LaunchErrorKind {
    #[error("Path is not set or file not found")]
    MissingTarget,

    #[error("Failed to start process: {0}")]
    SpawnFailed(String),
}
