//! Data models for AeroLaunch

mod entry;

pub use entry::*;
