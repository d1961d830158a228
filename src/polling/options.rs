use std::time::Duration;

pub const DEFAULT_ERROR_RETRY_COUNT: u32 = 5;
pub const DEFAULT_ERROR_RETRY_INTERVAL: Duration = Duration::from_secs(10);

/// Refresh and retry policy for one polled key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollOptions {
    /// Delay between successful fetches; zero fetches once.
    pub refresh_interval: Duration,
    /// Consecutive failures after which automatic retries stop.
    pub error_retry_count: u32,
    /// Backoff before retrying a failed fetch.
    pub error_retry_interval: Duration,
    /// Status codes that are never retried.
    pub no_retry_statuses: Vec<u16>,
}

impl Default for PollOptions {
    fn default() -> Self {
        Self {
            refresh_interval: Duration::ZERO,
            error_retry_count: DEFAULT_ERROR_RETRY_COUNT,
            error_retry_interval: DEFAULT_ERROR_RETRY_INTERVAL,
            no_retry_statuses: vec![401, 404],
        }
    }
}

impl PollOptions {
    pub fn every(refresh_interval: Duration) -> Self {
        Self::default().refresh_interval(refresh_interval)
    }

    pub fn refresh_interval(mut self, refresh_interval: Duration) -> Self {
        self.refresh_interval = refresh_interval;
        self
    }

    pub fn error_retry_count(mut self, error_retry_count: u32) -> Self {
        self.error_retry_count = error_retry_count;
        self
    }

    pub fn error_retry_interval(mut self, error_retry_interval: Duration) -> Self {
        self.error_retry_interval = error_retry_interval;
        self
    }

    pub fn no_retry_statuses(mut self, statuses: impl Into<Vec<u16>>) -> Self {
        self.no_retry_statuses = statuses.into();
        self
    }

    pub fn refreshes(&self) -> bool {
        !self.refresh_interval.is_zero()
    }
}
