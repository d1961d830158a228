use std::env;
use std::path::PathBuf;
use tracing::debug;

pub const CONFIG_PATH_ENV: &str = "FLEET_MONITOR_CONFIG";
const CONFIG_FILE_NAME: &str = "config.json";

/// Get the path to the config.json file
/// An explicit FLEET_MONITOR_CONFIG wins, then the app root next to the
/// executable, then the working directory.
pub(super) fn get_config_path() -> PathBuf {
    if let Ok(custom) = env::var(CONFIG_PATH_ENV) {
        let trimmed = custom.trim();
        if !trimmed.is_empty() {
            return PathBuf::from(trimmed);
        }
    }

    // Executable is at: app_root/bin/fleet-monitor
    if let Ok(exe_path) = env::current_exe() {
        debug!(path = %exe_path.display(), "Executable path detected");

        if let Some(app_root) = exe_path.parent().and_then(|bin_dir| bin_dir.parent()) {
            let config_path = app_root.join(CONFIG_FILE_NAME);
            if config_path.exists() {
                debug!(path = %config_path.display(), "Found config next to executable");
                return config_path;
            }
        }
    }

    PathBuf::from(CONFIG_FILE_NAME)
}
