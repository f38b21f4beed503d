//! Shared handler state.

use std::time::Duration;

use crate::config::SimConfig;
use crate::metrics::Metrics;

/// State shared by every handler on both routers.
///
/// Holds configuration values and the metrics registry only; responses are
/// built fresh per request and nothing here affects their content.
pub struct SimState {
    /// Latency added to scheduler job endpoints
    pub work_delay: Duration,
    /// Latency added to secret writes
    pub secret_write_delay: Duration,
    /// Request counters
    pub metrics: Metrics,
}

impl Default for SimState {
    fn default() -> Self {
        Self::new(&SimConfig::default())
    }
}

impl SimState {
    pub fn new(config: &SimConfig) -> Self {
        Self {
            work_delay: config.work_delay,
            secret_write_delay: config.secret_write_delay,
            metrics: Metrics::new(),
        }
    }

    /// State with no artificial latency, for router tests
    pub fn without_delays() -> Self {
        Self {
            work_delay: Duration::ZERO,
            secret_write_delay: Duration::ZERO,
            metrics: Metrics::new(),
        }
    }
}
