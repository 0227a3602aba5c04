//! Static per-application lookup data
//!
//! Adding a discoverable application is an edit to one of these tables.
//! Relative subdirectories use `/` and are joined component by component.

/// How to find an application on Windows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowsDescriptor {
    pub app_name: &'static str,
    pub exe: &'static str,
    pub subdirs: &'static [&'static str],
    pub registry_key: Option<&'static str>,
}

/// How to find an application on macOS
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MacDescriptor {
    pub app_name: &'static str,
    pub bundle_name: &'static str,
    pub bundle_id: Option<&'static str>,
}

pub const WINDOWS_APPS: &[WindowsDescriptor] = &[
    WindowsDescriptor {
        app_name: "Microsoft Flight Simulator",
        exe: "FlightSimulator.exe",
        subdirs: &[
            "Steam/steamapps/common/MicrosoftFlightSimulator",
            "WpSystem/Microsoft.FlightSimulator_8wekyb3d8bbwe/LocalCache/Packages/Microsoft.FlightSimulator_8wekyb3d8bbwe",
        ],
        registry_key: Some(r"SOFTWARE\Microsoft\Windows\CurrentVersion\Uninstall\Steam App 1250410"),
    },
    WindowsDescriptor {
        app_name: "ElevateX",
        exe: "Elevatex.exe",
        subdirs: &["Elevatex", "ElevateX Beta"],
        registry_key: None,
    },
    WindowsDescriptor {
        app_name: "Navigraph Charts",
        exe: "Navigraph Charts.exe",
        subdirs: &["Navigraph", "Navigraph Charts"],
        registry_key: Some(r"SOFTWARE\Navigraph\Charts"),
    },
];

pub const MAC_APPS: &[MacDescriptor] = &[MacDescriptor {
    app_name: "Navigraph Charts",
    bundle_name: "Navigraph Charts.app",
    bundle_id: Some("com.navigraph.charts"),
}];

/// Windows descriptor for `app_name`, matched case-insensitively
pub fn windows(app_name: &str) -> Option<&'static WindowsDescriptor> {
    WINDOWS_APPS
        .iter()
        .find(|d| d.app_name.eq_ignore_ascii_case(app_name.trim()))
}

/// macOS descriptor for `app_name`, matched case-insensitively
pub fn macos(app_name: &str) -> Option<&'static MacDescriptor> {
    MAC_APPS
        .iter()
        .find(|d| d.app_name.eq_ignore_ascii_case(app_name.trim()))
}
