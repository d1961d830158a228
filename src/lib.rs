//! Polling client for the wind-turbine and drone inspection fleet API.
//!
//! [`fleet_client::FleetClient`] performs the HTTP calls, [`polling::PollingCache`]
//! keeps one refresh loop per resource shared by all subscribers, and
//! [`status`] derives per-status tallies and filtered views from the results.

pub mod config;
pub mod fleet_client;
pub mod logging;
pub mod polling;
pub mod status;
pub mod types;

pub use config::Config;
pub use fleet_client::{FetchOptions, FleetAggregator, FleetClient, FleetSummary};
pub use polling::{Fetcher, PollOptions, PollState, PollingCache, Subscription};
pub use status::{aggregate, DeviceStatus, LogLevel, StatusCounts};
pub use types::{FetchError, FetchResult, MonitorError};
