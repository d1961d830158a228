use std::sync::Arc;

use tokio::sync::watch;

use super::cache::{CacheInner, WorkerControl};
use super::state::PollState;

/// A consumer's interest in one polled key. Dropping it unsubscribes.
pub struct Subscription {
    key: Option<String>,
    receiver: watch::Receiver<PollState>,
    attachment: Option<Attachment>,
}

struct Attachment {
    cache: Arc<CacheInner>,
    control: Arc<WorkerControl>,
}

impl Subscription {
    pub(super) fn attached(
        key: String,
        receiver: watch::Receiver<PollState>,
        cache: Arc<CacheInner>,
        control: Arc<WorkerControl>,
    ) -> Self {
        Self {
            key: Some(key),
            receiver,
            attachment: Some(Attachment { cache, control }),
        }
    }

    pub(super) fn detached() -> Self {
        let (_, receiver) = watch::channel(PollState::default());
        Self {
            key: None,
            receiver,
            attachment: None,
        }
    }

    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> PollState {
        self.receiver.borrow().clone()
    }

    /// Wait until the state changes. Never resolves for a subscription
    /// without a key.
    pub async fn changed(&mut self) {
        if self.attachment.is_none() {
            return std::future::pending().await;
        }
        if self.receiver.changed().await.is_err() {
            std::future::pending::<()>().await;
        }
    }

    /// Ask the worker to fetch now, starting a fresh retry sequence.
    pub fn revalidate(&self) {
        if let Some(attachment) = &self.attachment {
            attachment.control.request_revalidate();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let (Some(key), Some(attachment)) = (&self.key, &self.attachment) {
            attachment.cache.release(key, &attachment.control);
        }
    }
}
