//! Launch sweep
//!
//! Spawns every checked entry as an independent OS process. Processes are
//! never waited on or tracked: success means the spawn call returned
//! without error, nothing more.

use std::path::Path;
use std::process::{Command, Stdio};

use crate::error::LaunchErrorKind;
use crate::models::AppEntry;
use crate::platform::{hide_console, Platform};

/// One entry that did not start
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchFailure {
    pub name: String,
    pub kind: LaunchErrorKind,
}

/// Outcome of one launch sweep
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LaunchReport {
    /// Checked entries considered
    pub attempted: usize,
    /// Spawn calls that returned without error
    pub succeeded: usize,
    pub failures: Vec<LaunchFailure>,
}

impl LaunchReport {
    pub fn summary(&self) -> String {
        if self.succeeded > 0 {
            format!("Attempted to launch {} application(s).", self.succeeded)
        } else {
            "No applications selected or ready to launch.".to_string()
        }
    }

    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }
}

/// Spawns entries with the platform's native invocation
#[derive(Debug, Clone, Copy)]
pub struct Launcher {
    platform: Platform,
}

impl Launcher {
    pub fn new() -> Self {
        Self::for_platform(Platform::current())
    }

    pub fn for_platform(platform: Platform) -> Self {
        Self { platform }
    }

    /// Launch every checked entry; one failure never stops the rest
    pub fn launch_all(&self, entries: &[AppEntry]) -> LaunchReport {
        let mut report = LaunchReport::default();

        for entry in entries.iter().filter(|e| e.checked) {
            report.attempted += 1;

            match self.launch(entry) {
                Ok(()) => report.succeeded += 1,
                Err(kind) => report.failures.push(LaunchFailure {
                    name: entry.name.clone(),
                    kind,
                }),
            }
        }

        tracing::info!(
            attempted = report.attempted,
            succeeded = report.succeeded,
            failed = report.failures.len(),
            "Launch sweep finished"
        );
        report
    }

    /// Spawn a single entry, regardless of its checked state
    pub fn launch(&self, entry: &AppEntry) -> Result<(), LaunchErrorKind> {
        let Some(target) = entry.target().filter(|p| Path::new(p).exists()) else {
            tracing::warn!(app = %entry.name, path = ?entry.path, "Cannot launch: path is not set or file not found");
            return Err(LaunchErrorKind::MissingTarget);
        };

        let result = self
            .command_for(target)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn();

        match result {
            Ok(child) => {
                tracing::info!(app = %entry.name, path = %target, pid = child.id(), "Launched application");
                // Dropping the handle leaves the child running on its own
                Ok(())
            }
            Err(e) => {
                tracing::warn!(app = %entry.name, path = %target, error = %e, "Failed to launch application");
                Err(LaunchErrorKind::SpawnFailed(e.to_string()))
            }
        }
    }

    /// Invocation used for `target` on this launcher's platform
    pub fn command_for(&self, target: &str) -> Command {
        match self.platform {
            Platform::MacOs => {
                let mut command = Command::new("open");
                command.args(["-a", target]);
                command
            }
            Platform::Windows => {
                let mut command = Command::new("cmd");
                command.args(["/C", "start", "", target]);
                hide_console(&mut command);
                command
            }
            Platform::Linux | Platform::Other(_) => Command::new(target),
        }
    }
}

impl Default for Launcher {
    fn default() -> Self {
        Self::new()
    }
}
