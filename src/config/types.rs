use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::polling::PollOptions;

pub const DEFAULT_API_TIMEOUT_MS: u64 = 10 * 1000;

/// Configuration for the fleet monitor
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub api_base_url: Option<String>,

    #[serde(default = "default_api_timeout_ms")]
    pub api_timeout_ms: u64,

    #[serde(default)]
    pub maps_api_key: Option<String>,

    #[serde(default = "default_error_retry_count")]
    pub error_retry_count: u32,

    #[serde(default = "default_error_retry_interval_ms")]
    pub error_retry_interval_ms: u64,

    #[serde(default = "default_turbines_refresh_ms")]
    pub turbines_refresh_ms: u64,

    #[serde(default = "default_logs_refresh_ms")]
    pub logs_refresh_ms: u64,

    #[serde(default = "default_environment_refresh_ms")]
    pub environment_refresh_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: None,
            api_timeout_ms: default_api_timeout_ms(),
            maps_api_key: None,
            error_retry_count: default_error_retry_count(),
            error_retry_interval_ms: default_error_retry_interval_ms(),
            turbines_refresh_ms: default_turbines_refresh_ms(),
            logs_refresh_ms: default_logs_refresh_ms(),
            environment_refresh_ms: default_environment_refresh_ms(),
        }
    }
}

fn default_api_timeout_ms() -> u64 {
    DEFAULT_API_TIMEOUT_MS
}

fn default_error_retry_count() -> u32 {
    5
}

fn default_error_retry_interval_ms() -> u64 {
    10 * 1000
}

fn default_turbines_refresh_ms() -> u64 {
    10 * 1000
}

fn default_logs_refresh_ms() -> u64 {
    10 * 1000
}

fn default_environment_refresh_ms() -> u64 {
    5 * 60 * 1000
}

impl Config {
    pub fn api_timeout(&self) -> Duration {
        Duration::from_millis(self.api_timeout_ms)
    }

    /// Map provider key, if one is set and non-blank.
    pub fn maps_api_key(&self) -> Option<&str> {
        self.maps_api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }

    /// Poll options carrying this config's retry policy.
    pub fn poll_options(&self, refresh_interval_ms: u64) -> PollOptions {
        PollOptions::default()
            .refresh_interval(Duration::from_millis(refresh_interval_ms))
            .error_retry_count(self.error_retry_count)
            .error_retry_interval(Duration::from_millis(self.error_retry_interval_ms))
    }
}
