//! Timing knobs for the orchestration pipeline.

use std::time::Duration;

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(1000);
pub const DEFAULT_SAVE_TIMEOUT: Duration = Duration::from_millis(1000);

/// Pipeline timing configuration.
///
/// Tests shrink these to keep the suite fast; production uses the defaults.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Quiet period collapsing bursts of graph refetch triggers; only the
    /// last trigger inside the window results in a remote call.
    pub debounce: Duration,
    /// Upper bound on each individual per-parameter persistence call during
    /// a draft save.
    pub save_timeout: Duration,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            debounce: DEFAULT_DEBOUNCE,
            save_timeout: DEFAULT_SAVE_TIMEOUT,
        }
    }
}

impl PipelineConfig {
    /// Defaults overridden by `GRAPHFLUX_DEBOUNCE_MS` and
    /// `GRAPHFLUX_SAVE_TIMEOUT_MS` (milliseconds), read from the process
    /// environment after loading a `.env` file if one is present.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let mut config = Self::default();
        if let Some(debounce) = duration_from_env("GRAPHFLUX_DEBOUNCE_MS") {
            config.debounce = debounce;
        }
        if let Some(save_timeout) = duration_from_env("GRAPHFLUX_SAVE_TIMEOUT_MS") {
            config.save_timeout = save_timeout;
        }
        config
    }
}

fn duration_from_env(key: &str) -> Option<Duration> {
    std::env::var(key)
        .ok()?
        .parse::<u64>()
        .ok()
        .map(Duration::from_millis)
}
