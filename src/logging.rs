//! Tracing subscriber setup.

use tracing_subscriber::{EnvFilter, fmt};

/// Installs the global subscriber for the binary.
///
/// The filter comes from `RUST_LOG` and defaults to `info`, e.g.
/// `RUST_LOG=pick_plan=debug` shows the engine's stage events. Output goes
/// to stderr so plan output on stdout stays clean.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

/// Subscriber for tests; safe to call more than once.
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}
