use serde::{Deserialize, Serialize};

use crate::status::{DeviceStatus, Named};

/// Latest readings for one wind turbine.
///
/// `status` is kept as the raw string the API sent so that filtering never
/// depends on how it was rendered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turbine {
    pub wt_id: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub generator_temp: f64,
    #[serde(default)]
    pub rotor_rps: Vec<f64>,
    #[serde(default)]
    pub power: Vec<f64>,
    #[serde(default)]
    pub tower_vib_freq: f64,
}

impl Turbine {
    pub fn device_status(&self) -> Option<DeviceStatus> {
        self.status.parse().ok()
    }

    /// Sensors report nothing while a turbine is idle.
    pub fn sensors_enabled(&self) -> bool {
        self.device_status() != Some(DeviceStatus::Idle)
    }

    /// Rotor history converted from revolutions per second to per minute.
    pub fn rotor_rpm(&self) -> Vec<f64> {
        self.rotor_rps.iter().map(|rps| rps * 60.0).collect()
    }

    /// Power history converted from W to kW.
    pub fn power_kw(&self) -> Vec<f64> {
        self.power.iter().map(|watts| watts / 1000.0).collect()
    }

    pub fn frequency_level(&self) -> GaugeLevel {
        GaugeThresholds::TOWER_FREQUENCY.classify(self.tower_vib_freq)
    }

    pub fn temperature_level(&self) -> GaugeLevel {
        GaugeThresholds::GENERATOR_TEMPERATURE.classify(self.generator_temp)
    }
}

impl Named for Turbine {
    fn name(&self) -> &str {
        &self.wt_id
    }

    fn raw_status(&self) -> &str {
        &self.status
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GaugeLevel {
    Normal,
    Warning,
    Danger,
}

/// Bands for a gauge reading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaugeThresholds {
    pub max: f64,
    pub warning: f64,
    pub danger: f64,
}

impl GaugeThresholds {
    pub const TOWER_FREQUENCY: GaugeThresholds = GaugeThresholds {
        max: 200.0,
        warning: 80.0,
        danger: 120.0,
    };

    pub const GENERATOR_TEMPERATURE: GaugeThresholds = GaugeThresholds {
        max: 120.0,
        warning: 50.0,
        danger: 80.0,
    };

    pub fn classify(&self, value: f64) -> GaugeLevel {
        if value >= self.danger {
            GaugeLevel::Danger
        } else if value >= self.warning {
            GaugeLevel::Warning
        } else {
            GaugeLevel::Normal
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn turbine(json: serde_json::Value) -> Turbine {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn decodes_api_payload() {
        let t = turbine(serde_json::json!({
            "wt_id": "wt_004",
            "status": "warning",
            "generator_temp": 61.5,
            "rotor_rps": [0.5, 0.25],
            "power": [1500.0, 2000.0],
            "tower_vib_freq": 95.0
        }));

        assert_eq!(t.device_status(), Some(DeviceStatus::Warning));
        assert_eq!(t.rotor_rpm(), vec![30.0, 15.0]);
        assert_eq!(t.power_kw(), vec![1.5, 2.0]);
        assert_eq!(t.frequency_level(), GaugeLevel::Warning);
        assert_eq!(t.temperature_level(), GaugeLevel::Warning);
    }

    #[test]
    fn missing_fields_default() {
        let t = turbine(serde_json::json!({"wt_id": "wt_001"}));
        assert_eq!(t.device_status(), None);
        assert!(t.rotor_rps.is_empty());
        assert!(t.sensors_enabled());
    }

    #[test]
    fn idle_turbines_have_sensors_disabled() {
        let t = turbine(serde_json::json!({"wt_id": "wt_002", "status": "idle"}));
        assert!(!t.sensors_enabled());
    }

    #[test]
    fn gauge_bands_are_inclusive_at_threshold() {
        let temp = GaugeThresholds::GENERATOR_TEMPERATURE;
        assert_eq!(temp.classify(49.9), GaugeLevel::Normal);
        assert_eq!(temp.classify(50.0), GaugeLevel::Warning);
        assert_eq!(temp.classify(80.0), GaugeLevel::Danger);
    }
}
