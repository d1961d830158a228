mod cache;
mod fetcher;
mod options;
mod state;
mod subscription;
mod worker;

pub use cache::PollingCache;
pub use fetcher::Fetcher;
pub use options::{PollOptions, DEFAULT_ERROR_RETRY_COUNT, DEFAULT_ERROR_RETRY_INTERVAL};
pub use state::PollState;
pub use subscription::Subscription;
