//! Developer diagnostics via `tracing`
//!
//! User-facing output goes through cliclack; this only covers `RUST_LOG`
//! driven debugging, written to stderr.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the tracing subscriber.
///
/// Reads `RUST_LOG`, defaults to `warn`.
///
/// ```bash
/// RUST_LOG=wppg_core=debug wppg new --cex
/// ```
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .init();
}
