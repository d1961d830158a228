//! Resource paths exposed by the fleet API.

pub const WIND_TURBINES_PATH: &str = "/wind-turbines";
pub const ENV_SENSORS_PATH: &str = "/env-sensors";
pub const MAP_PATH: &str = "/map";
pub const LOGS_PATH: &str = "/logs";
pub const READINGS_PATH: &str = "/readings";

pub fn turbine_path(id: &str) -> String {
    format!("{WIND_TURBINES_PATH}/{id}")
}

pub fn enable_sensors_path(id: &str) -> String {
    format!("{WIND_TURBINES_PATH}/{id}/enable")
}

pub fn disable_sensors_path(id: &str) -> String {
    format!("{WIND_TURBINES_PATH}/{id}/disable")
}

pub fn add_fault_path(id: &str) -> String {
    format!("/add-fault/{id}")
}
