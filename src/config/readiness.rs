// ABOUTME: Daemon readiness polling parameters.
// ABOUTME: Defaults to 15 probes spaced one second apart.

use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReadinessConfig {
    #[serde(default = "default_attempts")]
    pub attempts: u32,

    #[serde(default = "default_interval", with = "humantime_serde")]
    pub interval: Duration,
}

fn default_attempts() -> u32 {
    15
}

fn default_interval() -> Duration {
    Duration::from_secs(1)
}

impl Default for ReadinessConfig {
    fn default() -> Self {
        Self {
            attempts: default_attempts(),
            interval: default_interval(),
        }
    }
}
