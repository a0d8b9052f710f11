//! Logging initialization.
//!
//! Level conventions: INFO for daemon lifecycle and triggered floods, DEBUG
//! for per-route dispositions (exported, dropped, withdrawn), TRACE for
//! table-level detail.

use tracing_subscriber::EnvFilter;

/// Initialize text logging. Defaults to `info`, overridable with `RUST_LOG`.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Initialize JSON logging. Defaults to `info`, overridable with `RUST_LOG`.
pub fn init_json() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .json()
        .init();
}

/// Initialize logging for tests. Captured per test, defaults to `debug`.
pub fn init_for_tests() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}
