use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::types::{FetchError, FetchResult, MonitorError};

/// What subscribers of a key currently see.
///
/// `data` keeps the last successful payload even while later fetches fail,
/// so both `data` and `error` may be set at once.
#[derive(Debug, Clone, Default)]
pub struct PollState {
    pub data: Option<Arc<Value>>,
    pub error: Option<FetchError>,
    pub retry_count: u32,
    pub is_validating: bool,
    pub updated_at: Option<DateTime<Utc>>,
}

impl PollState {
    pub fn has_data(&self) -> bool {
        self.data.is_some()
    }

    /// No data and no error yet.
    pub fn is_loading(&self) -> bool {
        self.data.is_none() && self.error.is_none()
    }

    /// Decode the cached payload into a typed model.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<Option<T>, MonitorError> {
        self.data
            .as_deref()
            .map(|value| T::deserialize(value))
            .transpose()
            .map_err(MonitorError::Decode)
    }

    /// Collapse into a single outcome: cached data wins over the latest error,
    /// and `None` means nothing has settled yet.
    pub fn fetch_result<T: DeserializeOwned>(&self) -> Option<FetchResult<T>> {
        match (self.decode::<T>(), &self.error) {
            (Ok(Some(data)), _) => Some(FetchResult::Data(data)),
            (Err(err), _) => Some(FetchResult::Error(err.into())),
            (Ok(None), Some(err)) => Some(FetchResult::Error(err.clone())),
            (Ok(None), None) => None,
        }
    }
}
