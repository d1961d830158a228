mod environment;
mod log;
mod map;
mod turbine;

pub use environment::EnvReadings;
pub use log::LogEntry;
pub use map::{Boundaries, Coord, MapConfig, MapMarker};
pub use turbine::{GaugeLevel, GaugeThresholds, Turbine};
