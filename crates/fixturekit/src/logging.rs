//! Diagnostic logging setup shared by the binaries.
//!
//! The user-facing report goes to stdout; diagnostics go to stderr and are
//! filtered by `FIXTUREKIT_LOG` (same syntax as `RUST_LOG`).

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{fmt, EnvFilter, Registry};

pub const LOG_ENV: &str = "FIXTUREKIT_LOG";

const DEFAULT_FILTER: &str = "warn";

/// Builds the filter from `FIXTUREKIT_LOG`, falling back to `warn`.
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Installs the global subscriber and the `log` bridge.
///
/// Safe to call more than once; later calls leave the first setup in place.
pub fn init() {
    // `log` records from this crate and its dependencies become tracing events.
    let _ = tracing_log::LogTracer::init();

    let subscriber = Registry::default().with(env_filter()).with(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .compact(),
    );

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        log::debug!("Tracing subscriber already installed");
    }
}
