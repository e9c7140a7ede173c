//! Tracing setup for the dashboard process.

use tracing_subscriber::EnvFilter;

/// Install the process-wide subscriber. Calling it again is a no-op.
///
/// Compact human-readable output on stderr, so log lines never interleave
/// with the rendered detail view on stdout. Filtered via `RUST_LOG`,
/// defaulting to `info`.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
