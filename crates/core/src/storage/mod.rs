//! Configuration storage for AeroLaunch

mod config;

pub use config::{ConfigDocument, ConfigStore};
