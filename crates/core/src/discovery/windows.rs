//! Windows discovery: install directories, then the registry

use std::path::{Path, PathBuf};

use super::descriptors::{self, WindowsDescriptor};
use super::host::{HostEnv, RegistryRoot};

/// Environment variables naming the base install directories, in probe order
pub const BASE_DIR_VARS: [&str; 3] = ["ProgramFiles", "ProgramFiles(x86)", "LocalAppData"];

/// Registry values that may hold the install directory, in probe order
pub const REGISTRY_VALUES: [&str; 2] = ["InstallLocation", "Path"];

pub fn find(app_name: &str, host: &impl HostEnv) -> Option<PathBuf> {
    let Some(descriptor) = descriptors::windows(app_name) else {
        tracing::info!(app = %app_name, "No auto-discovery info on Windows; skipping");
        return None;
    };

    if let Some(path) = find_in_base_dirs(app_name, descriptor, host) {
        return Some(path);
    }

    if let Some(key) = descriptor.registry_key {
        if let Some(path) = find_in_registry(app_name, key, descriptor.exe, host) {
            return Some(path);
        }
    }

    tracing::info!(app = %app_name, "Could not find path on Windows");
    None
}

fn find_in_base_dirs(
    app_name: &str,
    descriptor: &WindowsDescriptor,
    host: &impl HostEnv,
) -> Option<PathBuf> {
    let bases = BASE_DIR_VARS
        .iter()
        .filter_map(|var| host.var(var))
        .filter(|value| !value.is_empty())
        .map(PathBuf::from);

    for base in bases {
        for subdir in descriptor.subdirs {
            let candidate = join_relative(&base, subdir).join(descriptor.exe);
            if host.exists(&candidate) {
                tracing::info!(app = %app_name, path = %candidate.display(), "Found via file system");
                return Some(candidate);
            }
        }

        // Installers that name the folder after the application
        let direct = base.join(app_name).join(descriptor.exe);
        if host.exists(&direct) {
            tracing::info!(app = %app_name, path = %direct.display(), "Found directly under base directory");
            return Some(direct);
        }
    }

    None
}

fn find_in_registry(app_name: &str, key: &str, exe: &str, host: &impl HostEnv) -> Option<PathBuf> {
    for root in RegistryRoot::PROBE_ORDER {
        for value in REGISTRY_VALUES {
            let location = match host.registry_value(root, key, value) {
                Ok(Some(location)) => location,
                Ok(None) => continue,
                Err(e) => {
                    tracing::warn!(
                        app = %app_name,
                        root = root.as_str(),
                        key = %key,
                        error = %e,
                        "Error accessing registry"
                    );
                    continue;
                }
            };

            let location = location.trim().trim_matches('"');
            if location.is_empty() {
                continue;
            }

            let candidate = PathBuf::from(location).join(exe);
            if host.exists(&candidate) {
                tracing::info!(
                    app = %app_name,
                    value = value,
                    path = %candidate.display(),
                    "Found via registry"
                );
                return Some(candidate);
            }
        }
    }

    None
}

fn join_relative(base: &Path, relative: &str) -> PathBuf {
    relative
        .split('/')
        .filter(|part| !part.is_empty())
        .fold(base.to_path_buf(), |path, part| path.join(part))
}
