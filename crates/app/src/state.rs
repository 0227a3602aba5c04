//! Application state management

use std::path::{Path, PathBuf};

use aerolaunch_core::{
    seed_entries, AppRegistry, ConfigStore, Discoverer, DiscoveryReport, Error, LaunchReport,
    Launcher, LoadOutcome, Result,
};
use directories::ProjectDirs;

/// Main application state
pub struct AppState {
    pub registry: AppRegistry,
    pub discoverer: Discoverer,
    pub launcher: Launcher,
    config_path: PathBuf,
}

impl AppState {
    /// Open the per-user configuration and load the registry
    pub fn new() -> Result<(Self, LoadOutcome)> {
        Self::with_config_path(Self::config_path_for_user()?)
    }

    pub fn with_config_path(config_path: PathBuf) -> Result<(Self, LoadOutcome)> {
        tracing::info!(path = %config_path.display(), "Configuration will be saved/loaded here");

        let mut registry = AppRegistry::new(ConfigStore::for_current_platform(&config_path));
        let outcome = registry.initialize(seed_entries())?;

        let state = Self {
            registry,
            discoverer: Discoverer::new(),
            launcher: Launcher::new(),
            config_path,
        };
        Ok((state, outcome))
    }

    fn config_path_for_user() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("com", "vainnor", "AeroLaunch").ok_or_else(|| {
            Error::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "Could not determine config directory",
            ))
        })?;

        Ok(dirs.config_dir().join("config.json"))
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Re-probe every entry for its install path
    pub fn discover(&mut self) -> DiscoveryReport {
        self.registry.discover_all(&self.discoverer)
    }

    /// Launch the checked entries
    pub fn launch(&mut self) -> Result<LaunchReport> {
        self.registry.launch_checked(&self.launcher)
    }
}
