use serde::{Deserialize, Serialize};

/// Ambient conditions around the farm.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvReadings {
    pub env_temp: f64,
    pub env_wind_angle: f64,
    pub env_wind_mag: f64,
    pub wave_mag: f64,
    pub visibility: f64,
}
