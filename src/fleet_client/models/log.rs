use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::fleet_client::helpers::log_timestamp;
use crate::status::LogLevel;

/// One line of the fleet event log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub level: String,
    pub msg: String,
    pub time_seconds: f64,
}

impl LogEntry {
    pub fn new(level: impl Into<String>, msg: impl Into<String>, time_seconds: f64) -> Self {
        Self {
            level: level.into(),
            msg: msg.into(),
            time_seconds,
        }
    }

    /// Parsed level; `None` for levels this client does not know.
    pub fn level(&self) -> Option<LogLevel> {
        self.level.parse().ok()
    }

    /// `None` for times too far from the log epoch to represent.
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        log_timestamp(self.time_seconds)
    }
}
