//! Logging setup.
//!
//! Uses `tracing` with a `tracing-subscriber` fmt layer. The level filter
//! comes from `RUST_LOG` and defaults to `info`, e.g.
//! `RUST_LOG=nurse_roster=debug` to see per-trial and per-slot events.

use tracing_subscriber::{fmt, EnvFilter};

/// Installs the global subscriber.
///
/// # Example
/// ```no_run
/// nurse_roster::logging::init();
/// ```
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_line_number(true)
        .init();
}

/// Installs a debug-level subscriber writing to the test harness.
///
/// Safe to call from several tests; only the first call installs.
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}
