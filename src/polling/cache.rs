use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::{watch, Notify};
use tracing::{debug, info};

use super::fetcher::Fetcher;
use super::options::PollOptions;
use super::state::PollState;
use super::subscription::Subscription;
use super::worker::Worker;

/// Shared cache of polled resources, keyed by resource path.
///
/// Cloning is cheap and every clone sees the same entries. Each key has at
/// most one worker task no matter how many subscriptions exist; the worker
/// stops once the last subscription for its key is dropped.
#[derive(Clone)]
pub struct PollingCache {
    inner: Arc<CacheInner>,
}

pub(super) struct CacheInner {
    fetcher: Arc<dyn Fetcher>,
    entries: Mutex<HashMap<String, Entry>>,
}

struct Entry {
    subscribers: usize,
    receiver: watch::Receiver<PollState>,
    control: Arc<WorkerControl>,
}

/// Signals from subscribers to the worker of one key.
#[derive(Default)]
pub(super) struct WorkerControl {
    revalidate: Notify,
    shutdown: Notify,
    stopped: AtomicBool,
}

impl WorkerControl {
    pub(super) fn request_revalidate(&self) {
        self.revalidate.notify_one();
    }

    pub(super) async fn revalidate_requested(&self) {
        self.revalidate.notified().await;
    }

    pub(super) fn shutdown(&self) {
        self.stopped.store(true, Ordering::SeqCst);
        self.shutdown.notify_one();
    }

    pub(super) async fn shutdown_requested(&self) {
        self.shutdown.notified().await;
    }

    pub(super) fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::SeqCst)
    }
}

impl PollingCache {
    pub fn new(fetcher: Arc<dyn Fetcher>) -> Self {
        Self {
            inner: Arc::new(CacheInner {
                fetcher,
                entries: Mutex::new(HashMap::new()),
            }),
        }
    }

    /// Subscribe to `key`, starting its worker on first use.
    ///
    /// A `None` key yields a subscription that never fetches. When the key is
    /// already polled, the running worker and its options are shared.
    /// Must be called from within a tokio runtime.
    pub fn subscribe(&self, key: Option<&str>, options: PollOptions) -> Subscription {
        let Some(key) = key else {
            return Subscription::detached();
        };

        let mut entries = self.inner.lock_entries();
        if let Some(entry) = entries.get_mut(key) {
            entry.subscribers += 1;
            debug!(key = %key, subscribers = entry.subscribers, "Joined existing poll");
            return Subscription::attached(
                key.to_string(),
                entry.receiver.clone(),
                Arc::clone(&self.inner),
                Arc::clone(&entry.control),
            );
        }

        let (sender, receiver) = watch::channel(PollState::default());
        let control = Arc::new(WorkerControl::default());
        let worker = Worker::new(
            key.to_string(),
            options,
            Arc::clone(&self.inner.fetcher),
            sender,
            Arc::clone(&control),
        );
        tokio::spawn(worker.run());
        info!(key = %key, "Started polling");

        entries.insert(
            key.to_string(),
            Entry {
                subscribers: 1,
                receiver: receiver.clone(),
                control: Arc::clone(&control),
            },
        );
        Subscription::attached(key.to_string(), receiver, Arc::clone(&self.inner), control)
    }

    /// Fetch `key` now instead of waiting for its next tick. Returns false when
    /// nothing subscribes to it.
    pub fn revalidate(&self, key: &str) -> bool {
        match self.inner.lock_entries().get(key) {
            Some(entry) => {
                entry.control.request_revalidate();
                true
            }
            None => false,
        }
    }

    /// Latest state of a subscribed key.
    pub fn state(&self, key: &str) -> Option<PollState> {
        self.inner
            .lock_entries()
            .get(key)
            .map(|entry| entry.receiver.borrow().clone())
    }

    pub fn subscriber_count(&self, key: &str) -> usize {
        self.inner
            .lock_entries()
            .get(key)
            .map(|entry| entry.subscribers)
            .unwrap_or(0)
    }

    /// Keys with a running worker, sorted.
    pub fn active_keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.inner.lock_entries().keys().cloned().collect();
        keys.sort();
        keys
    }
}

impl CacheInner {
    fn lock_entries(&self) -> MutexGuard<'_, HashMap<String, Entry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Drop one subscriber of `key`; the last one stops the worker.
    pub(super) fn release(&self, key: &str, control: &Arc<WorkerControl>) {
        let mut entries = self.lock_entries();
        let Some(entry) = entries.get_mut(key) else {
            return;
        };
        if !Arc::ptr_eq(&entry.control, control) {
            return;
        }

        entry.subscribers = entry.subscribers.saturating_sub(1);
        if entry.subscribers > 0 {
            debug!(key = %key, subscribers = entry.subscribers, "Left poll");
            return;
        }

        if let Some(entry) = entries.remove(key) {
            entry.control.shutdown();
            info!(key = %key, "Stopped polling");
        }
    }
}
