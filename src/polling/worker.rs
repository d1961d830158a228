use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use serde_json::Value;
use tokio::sync::watch;
use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::types::FetchError;

use super::cache::WorkerControl;
use super::fetcher::Fetcher;
use super::options::PollOptions;
use super::state::PollState;

/// Fetch loop for one key. At most one request is in flight; the next one is
/// scheduled only after the previous one settled.
pub(super) struct Worker {
    key: String,
    options: PollOptions,
    fetcher: Arc<dyn Fetcher>,
    state: watch::Sender<PollState>,
    control: Arc<WorkerControl>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Next {
    After(Duration),
    Idle,
}

enum Wake {
    Scheduled,
    Revalidate,
    Shutdown,
}

impl Worker {
    pub(super) fn new(
        key: String,
        options: PollOptions,
        fetcher: Arc<dyn Fetcher>,
        state: watch::Sender<PollState>,
        control: Arc<WorkerControl>,
    ) -> Self {
        Self {
            key,
            options,
            fetcher,
            state,
            control,
        }
    }

    pub(super) async fn run(self) {
        loop {
            if self.control.is_stopped() {
                break;
            }

            // Visible in snapshots; subscribers are woken only once the fetch settles.
            self.state.send_if_modified(|state| {
                state.is_validating = true;
                false
            });
            debug!(key = %self.key, "Fetching");
            let outcome = self.fetcher.fetch_value(&self.key).await;

            if self.control.is_stopped() {
                debug!(key = %self.key, "Discarding result for unsubscribed key");
                break;
            }

            let next = self.apply(outcome);
            match self.wait(next).await {
                Wake::Scheduled => {}
                Wake::Revalidate => {
                    self.state.send_if_modified(|state| {
                        state.retry_count = 0;
                        false
                    });
                }
                Wake::Shutdown => break,
            }
        }
        debug!(key = %self.key, "Poll worker exited");
    }

    fn apply(&self, outcome: Result<Value, FetchError>) -> Next {
        match outcome {
            Ok(value) => {
                self.state.send_modify(|state| {
                    state.data = Some(Arc::new(value));
                    state.error = None;
                    state.retry_count = 0;
                    state.is_validating = false;
                    state.updated_at = Some(Utc::now());
                });
                if self.options.refreshes() {
                    Next::After(self.options.refresh_interval)
                } else {
                    Next::Idle
                }
            }
            Err(err) => self.apply_failure(err),
        }
    }

    fn apply_failure(&self, err: FetchError) -> Next {
        if err.is_terminal_for(&self.options.no_retry_statuses) {
            warn!(key = %self.key, status = ?err.status, error = %err, "Fetch failed, not retrying");
            self.state.send_modify(|state| {
                state.error = Some(err);
                state.is_validating = false;
            });
            return Next::Idle;
        }

        let ceiling = self.options.error_retry_count;
        let retry_count = self
            .state
            .borrow()
            .retry_count
            .saturating_add(1)
            .min(ceiling);
        self.state.send_modify(|state| {
            state.error = Some(err.clone());
            state.retry_count = retry_count;
            state.is_validating = false;
        });

        if retry_count >= ceiling {
            info!(
                key = %self.key,
                attempts = retry_count,
                error = %err,
                "Retries exhausted, keeping last known data"
            );
            return Next::Idle;
        }

        warn!(
            key = %self.key,
            retry = retry_count,
            error = %err,
            delay_ms = self.options.error_retry_interval.as_millis() as u64,
            "Fetch failed, retrying"
        );
        Next::After(self.options.error_retry_interval)
    }

    async fn wait(&self, next: Next) -> Wake {
        match next {
            Next::After(delay) => tokio::select! {
                _ = sleep(delay) => Wake::Scheduled,
                _ = self.control.revalidate_requested() => Wake::Revalidate,
                _ = self.control.shutdown_requested() => Wake::Shutdown,
            },
            Next::Idle => tokio::select! {
                _ = self.control.revalidate_requested() => Wake::Revalidate,
                _ = self.control.shutdown_requested() => Wake::Shutdown,
            },
        }
    }
}
