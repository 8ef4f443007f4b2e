//! Tracing bootstrap for hosts embedding the store.

use tracing_error::ErrorLayer;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Install a fmt subscriber honoring `RUST_LOG` (default level: `info`).
///
/// Idempotent: a second call is a no-op if a global subscriber is already
/// set, so library consumers with their own telemetry are unaffected.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .with(ErrorLayer::default())
        .try_init();
}
