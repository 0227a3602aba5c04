//! Application discovery
//!
//! Resolves an application name to an installed executable or bundle path
//! by probing the host. Discovery is a pure function of the name and the
//! host environment; it never touches the registry of entries.

mod descriptors;
mod host;
mod macos;
mod windows;

use std::path::PathBuf;

pub use descriptors::{MacDescriptor, WindowsDescriptor, MAC_APPS, WINDOWS_APPS};
pub use host::{HostEnv, RegistryRoot, SystemHost};

use crate::platform::Platform;

/// Platform-dispatching probe
#[derive(Debug, Clone)]
pub struct Discoverer<H: HostEnv = SystemHost> {
    platform: Platform,
    host: H,
}

impl Discoverer<SystemHost> {
    /// Discoverer for the running platform and the real machine
    pub fn new() -> Self {
        Self::with_host(Platform::current(), SystemHost)
    }
}

impl Default for Discoverer<SystemHost> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: HostEnv> Discoverer<H> {
    pub fn with_host(platform: Platform, host: H) -> Self {
        Self { platform, host }
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    pub fn is_supported(&self) -> bool {
        self.platform.supports_discovery()
    }

    /// Candidate path for `app_name`, or `None`. Never fails.
    pub fn find(&self, app_name: &str) -> Option<PathBuf> {
        match self.platform {
            Platform::Windows => windows::find(app_name, &self.host),
            Platform::MacOs => macos::find(app_name, &self.host),
            other => {
                tracing::info!(
                    platform = %other,
                    app = %app_name,
                    "Platform not supported for auto-discovery"
                );
                None
            }
        }
    }
}

/// Outcome of one discovery sweep over the registry
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiscoveryReport {
    /// False when the platform has no discovery strategy
    pub supported: bool,
    /// Entries probed
    pub probed: usize,
    /// Entries whose path changed
    pub updated: usize,
    /// Entries whose new path could not be persisted: (name, reason)
    pub failures: Vec<(String, String)>,
}

impl DiscoveryReport {
    pub fn summary(&self) -> String {
        if !self.supported {
            "Auto-discovery is not supported on this platform.".to_string()
        } else if self.updated > 0 {
            format!("Auto-discovery found {} new application paths.", self.updated)
        } else {
            "No new application paths were found or updated.".to_string()
        }
    }
}
