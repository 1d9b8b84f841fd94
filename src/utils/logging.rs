//! Logging setup
//!
//! Initializes the tracing subscriber for the CLI. Library consumers install
//! their own subscriber instead.

use tracing_subscriber::EnvFilter;

/// Initialize the global tracing subscriber.
///
/// Respects `RUST_LOG` when set; otherwise defaults to `info`, or `debug`
/// when `verbose` is requested.
pub fn init(verbose: bool) {
    let default_directive = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .init();
}
