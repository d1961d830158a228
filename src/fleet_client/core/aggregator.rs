use serde::Serialize;
use tracing::warn;

use crate::config::Config;
use crate::polling::{PollState, PollingCache, Subscription};
use crate::status::{aggregate, filter_logs, DeviceStatus, StatusCounts, StatusFilter};

use super::super::api::{ENV_SENSORS_PATH, LOGS_PATH, WIND_TURBINES_PATH};
use super::super::models::{EnvReadings, LogEntry, Turbine};

pub const RECENT_LOGS_LIMIT: usize = 5;

/// Dashboard overview composed from the polled resources.
#[derive(Debug, Clone, Serialize)]
pub struct FleetSummary {
    pub turbine_count: usize,
    pub turbine_statuses: StatusCounts<DeviceStatus>,
    pub unrecognized_statuses: usize,
    pub recent_logs: Vec<LogEntry>,
    pub environment: Option<EnvReadings>,
    pub errors: Vec<String>,
}

impl FleetSummary {
    /// Build a summary from the latest turbine, log and environment states.
    /// Missing or undecodable payloads leave their part empty and add an
    /// entry to `errors`.
    pub fn from_states(turbines: &PollState, logs: &PollState, environment: &PollState) -> Self {
        let mut errors = Vec::new();

        let turbines: Vec<Turbine> = decode_or_record(WIND_TURBINES_PATH, turbines, &mut errors)
            .unwrap_or_default();
        let statuses = aggregate(&turbines, Turbine::device_status, &DeviceStatus::ALL);

        let logs: Vec<LogEntry> = decode_or_record(LOGS_PATH, logs, &mut errors).unwrap_or_default();
        let recent_logs = filter_logs(&logs, &StatusFilter::All)
            .into_iter()
            .take(RECENT_LOGS_LIMIT)
            .cloned()
            .collect();

        let environment = decode_or_record(ENV_SENSORS_PATH, environment, &mut errors);

        Self {
            turbine_count: turbines.len(),
            unrecognized_statuses: statuses.unrecognized(),
            turbine_statuses: statuses,
            recent_logs,
            environment,
            errors,
        }
    }
}

fn decode_or_record<T>(path: &str, state: &PollState, errors: &mut Vec<String>) -> Option<T>
where
    T: serde::de::DeserializeOwned,
{
    if let Some(err) = &state.error {
        errors.push(format!("{path}: {err}"));
    }
    match state.decode::<T>() {
        Ok(value) => value,
        Err(err) => {
            warn!(path = %path, error = %err, "Discarding malformed payload");
            errors.push(format!("{path}: {err}"));
            None
        }
    }
}

/// Holds the subscriptions behind the dashboard overview.
pub struct FleetAggregator {
    turbines: Subscription,
    logs: Subscription,
    environment: Subscription,
}

impl FleetAggregator {
    pub fn subscribe(cache: &PollingCache, config: &Config) -> Self {
        Self {
            turbines: cache.subscribe(
                Some(WIND_TURBINES_PATH),
                config.poll_options(config.turbines_refresh_ms),
            ),
            logs: cache.subscribe(Some(LOGS_PATH), config.poll_options(config.logs_refresh_ms)),
            environment: cache.subscribe(
                Some(ENV_SENSORS_PATH),
                config.poll_options(config.environment_refresh_ms),
            ),
        }
    }

    /// Wait until any of the underlying resources changes.
    pub async fn changed(&mut self) {
        tokio::select! {
            _ = self.turbines.changed() => {}
            _ = self.logs.changed() => {}
            _ = self.environment.changed() => {}
        }
    }

    pub fn compose_summary(&self) -> FleetSummary {
        FleetSummary::from_states(
            &self.turbines.state(),
            &self.logs.state(),
            &self.environment.state(),
        )
    }

    /// Refresh the turbine list now, e.g. after toggling a turbine's sensors.
    pub fn revalidate_turbines(&self) {
        self.turbines.revalidate();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FetchError;
    use serde_json::json;
    use std::sync::Arc;

    fn with_data(value: serde_json::Value) -> PollState {
        PollState {
            data: Some(Arc::new(value)),
            ..PollState::default()
        }
    }

    #[test]
    fn summarizes_statuses_and_latest_logs() {
        let turbines = with_data(json!([
            {"wt_id": "wt_001", "status": "running"},
            {"wt_id": "wt_002", "status": "failure"},
            {"wt_id": "wt_003", "status": "running"},
            {"wt_id": "wt_004", "status": "on-fire"}
        ]));
        let logs = with_data(json!([
            {"level": "info", "msg": "a", "time_seconds": 1.0},
            {"level": "warning", "msg": "b", "time_seconds": 7.0},
            {"level": "failure", "msg": "c", "time_seconds": 3.0},
            {"level": "info", "msg": "d", "time_seconds": 2.0},
            {"level": "info", "msg": "e", "time_seconds": 5.0},
            {"level": "info", "msg": "f", "time_seconds": 4.0}
        ]));
        let env = with_data(json!({
            "env_temp": 12.5, "env_wind_angle": 90.0, "env_wind_mag": 7.0,
            "wave_mag": 1.2, "visibility": 8.0
        }));

        let summary = FleetSummary::from_states(&turbines, &logs, &env);

        assert_eq!(summary.turbine_count, 4);
        assert_eq!(summary.turbine_statuses.get(&DeviceStatus::Running), 2);
        assert_eq!(summary.turbine_statuses.get(&DeviceStatus::Failure), 1);
        assert_eq!(summary.turbine_statuses.get(&DeviceStatus::Idle), 0);
        assert_eq!(summary.unrecognized_statuses, 1);

        let messages: Vec<&str> = summary.recent_logs.iter().map(|l| l.msg.as_str()).collect();
        assert_eq!(messages, vec!["b", "e", "f", "c", "d"]);
        assert_eq!(summary.environment.map(|e| e.env_temp), Some(12.5));
        assert!(summary.errors.is_empty());
    }

    #[test]
    fn failures_are_reported_without_dropping_stale_data() {
        let mut turbines = with_data(json!([{"wt_id": "wt_001", "status": "idle"}]));
        turbines.error = Some(FetchError::new(None, "timeout of 10000ms exceeded"));
        let logs = PollState {
            error: Some(FetchError::with_status(404, "/logs returned 404 Not Found")),
            ..PollState::default()
        };
        let env = with_data(json!("not an object"));

        let summary = FleetSummary::from_states(&turbines, &logs, &env);

        assert_eq!(summary.turbine_statuses.get(&DeviceStatus::Idle), 1);
        assert!(summary.recent_logs.is_empty());
        assert!(summary.environment.is_none());
        assert_eq!(summary.errors.len(), 3);
        assert!(summary.errors[0].starts_with("/wind-turbines: timeout"));
    }
}
