use async_trait::async_trait;
use serde_json::Value;

use crate::types::FetchError;

/// Source of resource payloads for the polling cache.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetch the resource identified by `key`, failures returned as values.
    async fn fetch_value(&self, key: &str) -> Result<Value, FetchError>;
}
