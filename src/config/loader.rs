use std::env;
use std::path::Path;

use serde_json::Value;
use tokio::fs;
use tracing::{info, warn};

use crate::types::MonitorError;

use super::types::DEFAULT_API_TIMEOUT_MS;
use super::{paths, Config};

pub const BASE_URL_ENV: &str = "FLEET_API_BASE_URL";
pub const TIMEOUT_ENV: &str = "FLEET_API_TIMEOUT";
pub const MAPS_API_KEY_ENV: &str = "FLEET_MAPS_API_KEY";

impl Config {
    /// Load configuration from config.json, then apply environment overrides.
    /// Falls back to defaults if the file doesn't exist or can't be parsed
    pub async fn load() -> Self {
        let path = paths::get_config_path();
        let mut config = match Self::load_from_path(&path).await {
            Ok(config) => config,
            Err(err) => {
                warn!(error = ?err, path = %path.display(), "Failed to load config.json, using defaults");
                Self::default()
            }
        };
        config.apply_env_overrides_with(|name| env::var(name).ok());

        match config.api_base_url.as_deref() {
            Some(base_url) => info!(
                base_url = %base_url,
                timeout_ms = config.api_timeout_ms,
                maps_api_key = config.maps_api_key().is_some(),
                "Loaded configuration"
            ),
            None => warn!("No API base URL configured, requests will fail until {BASE_URL_ENV} is set"),
        }
        config
    }

    /// Read a config file; a missing file yields the defaults.
    pub async fn load_from_path(path: &Path) -> Result<Self, MonitorError> {
        if !path.exists() {
            warn!(path = %path.display(), "Config file not found, using defaults");
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path).await?;

        let value: Value = serde_json::from_str(&contents)
            .map_err(|err| MonitorError::Config(format!("Failed to parse config.json: {err}")))?;

        let mut config: Config = serde_json::from_value(value).map_err(|err| {
            MonitorError::Config(format!("Failed to deserialize config.json: {err}"))
        })?;
        config.api_base_url = normalize_base_url(config.api_base_url.as_deref());
        if config.api_timeout_ms == 0 {
            config.api_timeout_ms = DEFAULT_API_TIMEOUT_MS;
        }

        Ok(config)
    }

    /// Apply overrides from a variable lookup (the process environment in production).
    pub fn apply_env_overrides_with<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(base_url) = lookup(BASE_URL_ENV) {
            if let Some(normalized) = normalize_base_url(Some(&base_url)) {
                self.api_base_url = Some(normalized);
            }
        }
        if let Some(raw) = lookup(TIMEOUT_ENV) {
            self.api_timeout_ms = parse_timeout_ms(&raw);
        }
        if let Some(key) = lookup(MAPS_API_KEY_ENV) {
            let trimmed = key.trim();
            if !trimmed.is_empty() {
                self.maps_api_key = Some(trimmed.to_string());
            }
        }
    }
}

/// Trim whitespace and trailing slashes; blank means unset.
pub fn normalize_base_url(raw: Option<&str>) -> Option<String> {
    let trimmed = raw?.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Milliseconds; anything unparsable or zero falls back to the default.
pub fn parse_timeout_ms(raw: &str) -> u64 {
    match raw.trim().parse::<u64>() {
        Ok(value) if value > 0 => value,
        _ => DEFAULT_API_TIMEOUT_MS,
    }
}
