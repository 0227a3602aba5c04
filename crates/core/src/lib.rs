//! AeroLaunch Core Library
//!
//! Application entries, per-platform configuration persistence, install
//! path discovery, and launch orchestration for the AeroLaunch launcher.

pub mod discovery;
pub mod error;
pub mod invariants;
pub mod launcher;
pub mod models;
pub mod platform;
pub mod registry;
pub mod storage;

pub use discovery::{Discoverer, DiscoveryReport, HostEnv, SystemHost};
pub use error::{ConfigError, Error, LaunchErrorKind, Result, ValidationError};
pub use launcher::{LaunchFailure, LaunchReport, Launcher};
pub use models::*;
pub use platform::Platform;
pub use registry::{AppRegistry, LoadOutcome};
pub use storage::{ConfigDocument, ConfigStore};
