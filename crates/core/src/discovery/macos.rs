//! macOS discovery: application folders, then Spotlight metadata

use std::path::{Path, PathBuf};

use super::descriptors;
use super::host::HostEnv;

pub const SYSTEM_APPLICATIONS: &str = "/Applications";

pub fn find(app_name: &str, host: &impl HostEnv) -> Option<PathBuf> {
    let Some(descriptor) = descriptors::macos(app_name) else {
        tracing::info!(app = %app_name, "No auto-discovery info on macOS; skipping");
        return None;
    };

    let system_path = Path::new(SYSTEM_APPLICATIONS).join(descriptor.bundle_name);
    if host.exists(&system_path) {
        tracing::info!(app = %app_name, path = %system_path.display(), "Found in /Applications");
        return Some(system_path);
    }

    if let Some(home) = host.home_dir() {
        let user_path = home.join("Applications").join(descriptor.bundle_name);
        if host.exists(&user_path) {
            tracing::info!(app = %app_name, path = %user_path.display(), "Found in ~/Applications");
            return Some(user_path);
        }
    }

    if let Some(bundle_id) = descriptor.bundle_id {
        if let Some(path) = find_by_bundle_id(app_name, bundle_id, host) {
            return Some(path);
        }
    }

    tracing::info!(app = %app_name, "Could not find path on macOS");
    None
}

/// Spotlight query matching a bundle identifier
pub fn bundle_id_query(bundle_id: &str) -> String {
    format!("kMDItemCFBundleIdentifier == \"{}\"", bundle_id)
}

fn find_by_bundle_id(app_name: &str, bundle_id: &str, host: &impl HostEnv) -> Option<PathBuf> {
    let output = match host.metadata_search(&bundle_id_query(bundle_id)) {
        Ok(output) => output,
        Err(e) => {
            tracing::warn!(app = %app_name, bundle_id = %bundle_id, error = %e, "Metadata search failed");
            return None;
        }
    };

    let found = output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && line.ends_with(".app"))
        .map(PathBuf::from)
        .find(|candidate| host.exists(candidate));

    if let Some(path) = &found {
        tracing::info!(app = %app_name, path = %path.display(), "Found via bundle identifier");
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discovery::testing::FakeHost;

    #[test]
    fn test_unknown_app_is_none() {
        let host = FakeHost::default().with_file(Path::new("/Applications/ElevateX.app"));
        assert!(find("ElevateX", &host).is_none());
    }

    #[test]
    fn test_system_applications_first() {
        let system = PathBuf::from("/Applications/Navigraph Charts.app");
        let user = PathBuf::from("/Users/pilot/Applications/Navigraph Charts.app");
        let host = FakeHost::default()
            .with_home("/Users/pilot")
            .with_file(&user)
            .with_file(&system);

        assert_eq!(find("Navigraph Charts", &host), Some(system));
    }

    #[test]
    fn test_user_applications() {
        let user = PathBuf::from("/Users/pilot/Applications/Navigraph Charts.app");
        let host = FakeHost::default().with_home("/Users/pilot").with_file(&user);

        assert_eq!(find("Navigraph Charts", &host), Some(user));
    }

    #[test]
    fn test_metadata_search_picks_existing_bundle() {
        let found = PathBuf::from("/Volumes/Apps/Navigraph Charts.app");
        let host = FakeHost::default()
            .with_search_output(
                "/Volumes/Gone/Navigraph Charts.app\n/Volumes/Apps/Navigraph Charts/readme.txt\n/Volumes/Apps/Navigraph Charts.app\n",
            )
            .with_file(Path::new("/Volumes/Apps/Navigraph Charts/readme.txt"))
            .with_file(&found);

        assert_eq!(find("Navigraph Charts", &host), Some(found));
        assert_eq!(
            host.last_search().as_deref(),
            Some("kMDItemCFBundleIdentifier == \"com.navigraph.charts\"")
        );
    }

    #[test]
    fn test_metadata_search_failure_is_not_found() {
        let host = FakeHost::default().with_search_failure();
        assert!(find("Navigraph Charts", &host).is_none());
    }
}
