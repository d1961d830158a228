use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::Config;
use crate::polling::Fetcher;
use crate::types::{FetchError, FetchResult, MonitorError};

use super::api::{
    add_fault_path, disable_sensors_path, enable_sensors_path, turbine_path, ENV_SENSORS_PATH,
    LOGS_PATH, MAP_PATH, READINGS_PATH, WIND_TURBINES_PATH,
};
use super::helpers::join_url;
use super::models::{EnvReadings, LogEntry, MapConfig, Turbine};

/// Method and optional JSON body for a request.
#[derive(Debug, Clone)]
pub struct FetchOptions {
    pub method: Method,
    pub body: Option<Value>,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            method: Method::GET,
            body: None,
        }
    }
}

impl FetchOptions {
    pub fn post() -> Self {
        Self {
            method: Method::POST,
            body: None,
        }
    }

    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// HTTP client for the fleet API. Stateless apart from its connection pool,
/// so clones can be used concurrently.
#[derive(Clone)]
pub struct FleetClient {
    http: Client,
    base_url: Option<String>,
    timeout: Duration,
}

impl FleetClient {
    pub fn new(config: &Config) -> Result<Self, MonitorError> {
        Self::from_parts(config.api_base_url.clone(), config.api_timeout())
    }

    pub fn from_parts(base_url: Option<String>, timeout: Duration) -> Result<Self, MonitorError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(MonitorError::Http)?;

        Ok(Self {
            http,
            base_url: base_url.map(|url| url.trim_end_matches('/').to_string()),
            timeout,
        })
    }

    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    /// Issue a request against the API. Never fails: every error comes back
    /// as [`FetchResult::Error`].
    pub async fn fetch<T>(&self, path: &str, options: FetchOptions) -> FetchResult<T>
    where
        T: DeserializeOwned,
    {
        match self.request_json(path, &options).await {
            Ok(data) => FetchResult::Data(data),
            Err(err) => {
                warn!(path = %path, method = %options.method, error = %err, "Request failed");
                FetchResult::Error(err.into())
            }
        }
    }

    async fn request_json<T>(&self, path: &str, options: &FetchOptions) -> Result<T, MonitorError>
    where
        T: DeserializeOwned,
    {
        let base = self.base_url.as_deref().ok_or(MonitorError::MissingBaseUrl)?;
        let url = join_url(base, path);
        debug!(url = %url, method = %options.method, "Sending request");

        let mut request = self.http.request(options.method.clone(), url);
        if let Some(body) = &options.body {
            request = request.json(body);
        }
        let response = request.send().await.map_err(|err| self.transport_error(err))?;

        if !response.status().is_success() {
            return Err(MonitorError::Status {
                path: path.to_string(),
                status: response.status(),
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|err| self.transport_error(err))?;
        let value: Value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)?
        };
        Ok(serde_json::from_value(value)?)
    }

    fn transport_error(&self, err: reqwest::Error) -> MonitorError {
        if err.is_timeout() {
            MonitorError::Timeout {
                timeout_ms: self.timeout.as_millis() as u64,
            }
        } else {
            MonitorError::Http(err)
        }
    }

    pub async fn turbines(&self) -> FetchResult<Vec<Turbine>> {
        self.fetch(WIND_TURBINES_PATH, FetchOptions::default()).await
    }

    pub async fn turbine(&self, id: &str) -> FetchResult<Turbine> {
        self.fetch(&turbine_path(id), FetchOptions::default()).await
    }

    pub async fn environment(&self) -> FetchResult<EnvReadings> {
        self.fetch(ENV_SENSORS_PATH, FetchOptions::default()).await
    }

    pub async fn map(&self) -> FetchResult<MapConfig> {
        self.fetch(MAP_PATH, FetchOptions::default()).await
    }

    pub async fn logs(&self) -> FetchResult<Vec<LogEntry>> {
        self.fetch(LOGS_PATH, FetchOptions::default()).await
    }

    /// Raw simulation readings queue.
    pub async fn readings(&self) -> FetchResult<Value> {
        self.fetch(READINGS_PATH, FetchOptions::default()).await
    }

    pub async fn enable_sensors(&self, id: &str) -> FetchResult<Value> {
        self.fetch(&enable_sensors_path(id), FetchOptions::post()).await
    }

    pub async fn disable_sensors(&self, id: &str) -> FetchResult<Value> {
        self.fetch(&disable_sensors_path(id), FetchOptions::post()).await
    }

    pub async fn inject_fault(&self, id: &str) -> FetchResult<Value> {
        self.fetch(&add_fault_path(id), FetchOptions::post()).await
    }
}

#[async_trait]
impl Fetcher for FleetClient {
    async fn fetch_value(&self, key: &str) -> Result<Value, FetchError> {
        self.fetch::<Value>(key, FetchOptions::default())
            .await
            .into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_base_url_fails_with_description() {
        let client = FleetClient::from_parts(None, Duration::from_secs(1)).unwrap();
        let result = client.turbines().await;

        let err = result.error().cloned().expect("request should fail");
        assert!(result.data().is_none());
        assert_eq!(err.status, None);
        assert!(err.message.contains("FLEET_API_BASE_URL"));
    }

    #[test]
    fn base_url_is_normalized() {
        let client =
            FleetClient::from_parts(Some("http://api.local/".to_string()), Duration::from_secs(1))
                .unwrap();
        assert_eq!(client.base_url(), Some("http://api.local"));
    }
}
