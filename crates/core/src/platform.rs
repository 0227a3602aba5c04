//! Host platform detection
//!
//! The platform selects which array of the configuration document is
//! active, which discovery strategy runs, and how a target is launched.

use std::env;
use std::fmt;
use std::process::Command;

/// Operating system the launcher is running on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Windows,
    MacOs,
    Linux,
    /// Any other OS; carries its `std::env::consts::OS` name
    Other(&'static str),
}

impl Platform {
    /// Detect the platform this binary was built for
    pub fn current() -> Self {
        Self::from_os(env::consts::OS)
    }

    pub fn from_os(os: &'static str) -> Self {
        match os {
            "windows" => Platform::Windows,
            "macos" => Platform::MacOs,
            "linux" => Platform::Linux,
            other => Platform::Other(other),
        }
    }

    /// Key of this platform's entry array in the configuration document
    pub fn key(&self) -> &'static str {
        match self {
            Platform::Windows => "win32",
            Platform::MacOs => "darwin",
            Platform::Linux => "linux",
            Platform::Other(os) => os,
        }
    }

    /// Returns true if auto-discovery has a strategy for this platform
    pub fn supports_discovery(&self) -> bool {
        matches!(self, Platform::Windows | Platform::MacOs)
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Platform::Windows => write!(f, "Windows"),
            Platform::MacOs => write!(f, "macOS"),
            Platform::Linux => write!(f, "Linux"),
            Platform::Other(os) => write!(f, "{}", os),
        }
    }
}

/// Log platform information at startup
pub fn log_platform_info() {
    let platform = Platform::current();
    tracing::info!(platform = %platform, key = platform.key(), "Platform detected");

    if !platform.supports_discovery() {
        tracing::info!(
            platform = %platform,
            "Auto-discovery is not supported on this platform; paths must be entered manually"
        );
    }
}

/// Keep a helper process from opening a console window
#[cfg(windows)]
pub(crate) fn hide_console(command: &mut Command) {
    use std::os::windows::process::CommandExt;
    command.creation_flags(0x08000000); // CREATE_NO_WINDOW
}

#[cfg(not(windows))]
pub(crate) fn hide_console(_command: &mut Command) {}
