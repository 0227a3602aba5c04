//! Host environment access for discovery
//!
//! Everything discovery observes about the machine goes through
//! [`HostEnv`], so the platform strategies can be exercised anywhere.

use std::env;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use directories::BaseDirs;

use crate::platform::hide_console;

/// Registry hive probed for install locations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegistryRoot {
    LocalMachine,
    CurrentUser,
}

impl RegistryRoot {
    /// Machine scope first, then user scope
    pub const PROBE_ORDER: [RegistryRoot; 2] = [RegistryRoot::LocalMachine, RegistryRoot::CurrentUser];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LocalMachine => "HKLM",
            Self::CurrentUser => "HKCU",
        }
    }
}

/// Read-only view of the host used by discovery
pub trait HostEnv {
    /// Environment variable, `None` if unset or not unicode
    fn var(&self, name: &str) -> Option<String>;

    fn exists(&self, path: &Path) -> bool;

    fn home_dir(&self) -> Option<PathBuf>;

    /// String value under `root\key`.
    ///
    /// `Ok(None)` when the key or value is missing; `Err` only when the
    /// registry could not be queried at all.
    fn registry_value(&self, root: RegistryRoot, key: &str, value: &str) -> io::Result<Option<String>>;

    /// Standard output of a metadata content search for `query`.
    ///
    /// A missing tool or a non-zero exit is an `Err`.
    fn metadata_search(&self, query: &str) -> io::Result<String>;
}

/// The real machine
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemHost;

impl HostEnv for SystemHost {
    fn var(&self, name: &str) -> Option<String> {
        env::var(name).ok()
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn home_dir(&self) -> Option<PathBuf> {
        BaseDirs::new().map(|dirs| dirs.home_dir().to_path_buf())
    }

    fn registry_value(&self, root: RegistryRoot, key: &str, value: &str) -> io::Result<Option<String>> {
        let full_key = format!(r"{}\{}", root.as_str(), key);
        let mut command = Command::new("reg");
        command
            .args(["query", &full_key, "/v", value])
            .stdin(Stdio::null())
            .stderr(Stdio::null());
        hide_console(&mut command);

        let output = command.output()?;
        if !output.status.success() {
            return Ok(None);
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(stdout
            .lines()
            .filter_map(|line| parse_reg_value_line(line.trim_start()))
            .find(|(name, _)| name.eq_ignore_ascii_case(value))
            .map(|(_, data)| data))
    }

    fn metadata_search(&self, query: &str) -> io::Result<String> {
        let output = Command::new("mdfind")
            .arg(query)
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .output()?;

        if !output.status.success() {
            return Err(io::Error::other(format!("mdfind exited with {}", output.status)));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Parse one `reg query` value line: `<name>    REG_<type>    <data>`
pub(crate) fn parse_reg_value_line(line: &str) -> Option<(String, String)> {
    let mut parts = line.split_whitespace();
    let name = parts.next()?;
    let type_name = parts.next()?;
    if !type_name.starts_with("REG_") {
        return None;
    }
    let start = line.find(type_name)? + type_name.len();
    let data = line[start..].trim().to_string();
    Some((name.to_string(), data))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_reg_value_line() {
        let line = r"InstallLocation    REG_SZ    C:\Program Files (x86)\Steam\steamapps\common\MicrosoftFlightSimulator";
        let (name, data) = parse_reg_value_line(line).unwrap();
        assert_eq!(name, "InstallLocation");
        assert_eq!(data, r"C:\Program Files (x86)\Steam\steamapps\common\MicrosoftFlightSimulator");
    }

    #[test]
    fn test_parse_reg_skips_key_header() {
        assert!(parse_reg_value_line(r"HKEY_LOCAL_MACHINE\SOFTWARE\Navigraph\Charts").is_none());
        assert!(parse_reg_value_line("").is_none());
    }

    #[test]
    fn test_root_order() {
        assert_eq!(RegistryRoot::PROBE_ORDER[0].as_str(), "HKLM");
        assert_eq!(RegistryRoot::PROBE_ORDER[1].as_str(), "HKCU");
    }
}
