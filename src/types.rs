use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Message used when a failure carries no description of its own.
pub const UNEXPECTED_ERROR: &str = "An unexpected error occurred";

#[derive(Debug, Error)]
pub enum MonitorError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{path} returned {status}")]
    Status {
        path: String,
        status: reqwest::StatusCode,
    },

    #[error("timeout of {timeout_ms}ms exceeded")]
    Timeout { timeout_ms: u64 },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unexpected response shape: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("API base URL is not configured (set FLEET_API_BASE_URL or api_base_url)")]
    MissingBaseUrl,
}

impl MonitorError {
    /// HTTP status code attached to the failure, if the server answered.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            MonitorError::Status { status, .. } => Some(status.as_u16()),
            MonitorError::Http(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// A failed round trip expressed as data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FetchError {
    pub status: Option<u16>,
    pub message: String,
}

impl FetchError {
    pub fn new(status: Option<u16>, message: impl Into<String>) -> Self {
        let message = message.into();
        let message = if message.trim().is_empty() {
            UNEXPECTED_ERROR.to_string()
        } else {
            message
        };
        Self { status, message }
    }

    pub fn with_status(status: u16, message: impl Into<String>) -> Self {
        Self::new(Some(status), message)
    }

    /// Whether this failure must not be retried given the suppression list.
    pub fn is_terminal_for(&self, no_retry_statuses: &[u16]) -> bool {
        self.status
            .map(|status| no_retry_statuses.contains(&status))
            .unwrap_or(false)
    }
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for FetchError {}

impl From<MonitorError> for FetchError {
    fn from(err: MonitorError) -> Self {
        FetchError::new(err.status_code(), describe(&err))
    }
}

/// Render an error with its source chain, skipping causes whose text the
/// message already contains.
fn describe(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !text.is_empty() && !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}

/// Outcome of one HTTP round trip: either data or an error, never both.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchResult<T> {
    Data(T),
    Error(FetchError),
}

impl<T> FetchResult<T> {
    pub fn is_ok(&self) -> bool {
        matches!(self, FetchResult::Data(_))
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            FetchResult::Data(data) => Some(data),
            FetchResult::Error(_) => None,
        }
    }

    pub fn error(&self) -> Option<&FetchError> {
        match self {
            FetchResult::Data(_) => None,
            FetchResult::Error(err) => Some(err),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> FetchResult<U> {
        match self {
            FetchResult::Data(data) => FetchResult::Data(f(data)),
            FetchResult::Error(err) => FetchResult::Error(err),
        }
    }

    pub fn into_result(self) -> Result<T, FetchError> {
        match self {
            FetchResult::Data(data) => Ok(data),
            FetchResult::Error(err) => Err(err),
        }
    }
}

impl<T> From<Result<T, MonitorError>> for FetchResult<T> {
    fn from(result: Result<T, MonitorError>) -> Self {
        match result {
            Ok(data) => FetchResult::Data(data),
            Err(err) => FetchResult::Error(err.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_message_falls_back_to_generic_text() {
        let err = FetchError::new(None, "   ");
        assert_eq!(err.message, UNEXPECTED_ERROR);
    }

    #[test]
    fn status_error_keeps_code() {
        let err: FetchError = MonitorError::Status {
            path: "/wind-turbines/wt_9".to_string(),
            status: reqwest::StatusCode::NOT_FOUND,
        }
        .into();
        assert_eq!(err.status, Some(404));
        assert_eq!(err.message, "/wind-turbines/wt_9 returned 404 Not Found");
        assert!(err.is_terminal_for(&[401, 404]));
        assert!(!err.is_terminal_for(&[401]));
    }

    #[test]
    fn transport_errors_are_never_terminal() {
        let err = FetchError::new(None, "connection refused");
        assert!(!err.is_terminal_for(&[401, 404]));
    }

    #[test]
    fn timeout_names_the_limit() {
        let err: FetchError = MonitorError::Timeout { timeout_ms: 10_000 }.into();
        assert_eq!(err.status, None);
        assert_eq!(err.message, "timeout of 10000ms exceeded");
    }

    #[derive(Debug, Error)]
    #[error("error sending request for url (http://api.local/map)")]
    struct SendFailure(#[source] Cause);

    #[derive(Debug, Error)]
    #[error("operation timed out")]
    struct Cause;

    #[test]
    fn message_includes_underlying_causes() {
        assert_eq!(
            describe(&SendFailure(Cause)),
            "error sending request for url (http://api.local/map): operation timed out"
        );
    }

    #[test]
    fn causes_already_in_the_message_are_not_repeated() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "Connection refused");
        let err: FetchError = MonitorError::Io(io).into();
        assert_eq!(err.message, "I/O error: Connection refused");
    }

    #[test]
    fn fetch_result_exposes_exactly_one_side() {
        let ok: FetchResult<u32> = FetchResult::Data(3);
        assert_eq!(ok.data(), Some(&3));
        assert!(ok.error().is_none());

        let failed: FetchResult<u32> = Err(MonitorError::MissingBaseUrl).into();
        let failed = match failed {
            FetchResult::Error(err) => err,
            FetchResult::Data(_) => panic!("expected an error"),
        };
        assert!(failed.message.contains("FLEET_API_BASE_URL"));
    }
}
