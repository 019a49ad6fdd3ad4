//! Tracing/logging initialization for binaries and integration tests.

use tracing_subscriber::EnvFilter;

/// Initialize tracing for the process.
///
/// Compact single-line output suits a client app log; verbosity comes from
/// `RUST_LOG`. Safe to call multiple times (subsequent calls are no-ops).
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .compact()
        .with_target(false)
        .try_init();
}
