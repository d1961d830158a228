mod api;
mod client;
mod core;
mod helpers;
mod models;

pub use api::{ENV_SENSORS_PATH, LOGS_PATH, MAP_PATH, READINGS_PATH, WIND_TURBINES_PATH};
pub use client::{FetchOptions, FleetClient};
pub use self::core::aggregator::{FleetAggregator, FleetSummary};
pub use helpers::{format_log_time, log_timestamp, BASE_TIMESTAMP_MS};
pub use models::{
    Boundaries, Coord, EnvReadings, GaugeLevel, GaugeThresholds, LogEntry, MapConfig, MapMarker,
    Turbine,
};
