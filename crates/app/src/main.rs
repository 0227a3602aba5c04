//! AeroLaunch - flight simulation suite launcher
//!
//! Loads the configured applications, refreshes their install paths, and
//! starts every checked one as an independent process.

use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod state;

/// `RUST_LOG`-style directives on top of an `info` default, so sweep
/// summaries are visible without any environment set
fn log_filter(directives: &str) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .parse_lossy(directives)
}

fn main() {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(log_filter(&std::env::var("RUST_LOG").unwrap_or_default()))
        .init();

    tracing::info!("Starting AeroLaunch");

    aerolaunch_core::platform::log_platform_info();

    let (mut app_state, outcome) = match state::AppState::new() {
        Ok(loaded) => loaded,
        Err(e) => {
            tracing::error!("Failed to initialize application: {}", e);
            std::process::exit(1);
        }
    };

    if let Some(warning) = outcome.warning() {
        tracing::warn!("{}", warning);
    }

    for entry in app_state.registry.entries() {
        tracing::info!(checked = entry.checked, "{}", entry.display_label());
    }

    let discovery = app_state.discover();
    tracing::info!("{}", discovery.summary());
    for (name, reason) in &discovery.failures {
        tracing::warn!(app = %name, "Could not save discovered path: {}", reason);
    }

    match app_state.launch() {
        Ok(report) => {
            for failure in &report.failures {
                tracing::warn!(app = %failure.name, "Could not launch: {}", failure.kind);
            }
            tracing::info!("{}", report.summary());
        }
        Err(e) => {
            tracing::error!("Launch sweep could not be saved: {}", e);
            std::process::exit(1);
        }
    }
}
