use std::sync::Arc;

use fleet_monitor::{
    logging, Config, DeviceStatus, FleetAggregator, FleetClient, MonitorError, PollingCache,
};
use tracing::{debug, error, info, warn};

#[tokio::main]
async fn main() {
    if let Err(err) = logging::init() {
        eprintln!("{err}");
    }

    if let Err(err) = run().await {
        error!(error = %err, "Fleet monitor stopped");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), MonitorError> {
    let config = Config::load().await;
    let client = FleetClient::new(&config)?;
    let cache = PollingCache::new(Arc::new(client));
    let mut dashboard = FleetAggregator::subscribe(&cache, &config);

    info!(keys = ?cache.active_keys(), "Monitoring fleet");

    loop {
        tokio::select! {
            _ = dashboard.changed() => {
                let summary = dashboard.compose_summary();
                info!(
                    turbines = summary.turbine_count,
                    running = summary.turbine_statuses.get(&DeviceStatus::Running),
                    warning = summary.turbine_statuses.get(&DeviceStatus::Warning),
                    failure = summary.turbine_statuses.get(&DeviceStatus::Failure),
                    idle = summary.turbine_statuses.get(&DeviceStatus::Idle),
                    "Fleet status"
                );
                for message in &summary.errors {
                    warn!(error = %message, "Resource unavailable");
                }
                if let Ok(json) = serde_json::to_string(&summary) {
                    debug!(summary = %json, "Composed summary");
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Shutting down");
                break;
            }
        }
    }

    Ok(())
}
