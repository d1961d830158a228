use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown status `{0}`")]
pub struct UnknownStatus(pub String);

/// Operating status reported for a turbine or drone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceStatus {
    Running,
    Warning,
    Failure,
    Idle,
}

impl DeviceStatus {
    pub const ALL: [DeviceStatus; 4] = [
        DeviceStatus::Running,
        DeviceStatus::Warning,
        DeviceStatus::Failure,
        DeviceStatus::Idle,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Running => "running",
            Self::Warning => "warning",
            Self::Failure => "failure",
            Self::Idle => "idle",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Running => "Running",
            Self::Warning => "Warning",
            Self::Failure => "Failure",
            Self::Idle => "Idle",
        }
    }

    pub fn theme(&self) -> StatusTheme {
        match self {
            Self::Running => StatusTheme::Blue,
            Self::Warning => StatusTheme::Yellow,
            Self::Failure => StatusTheme::Red,
            Self::Idle => StatusTheme::Gray,
        }
    }
}

impl fmt::Display for DeviceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeviceStatus {
    type Err = UnknownStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(normalized))
            .ok_or_else(|| UnknownStatus(value.to_string()))
    }
}

/// Severity of an entry in the event log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Failure,
    Warning,
    Info,
}

impl LogLevel {
    pub const ALL: [LogLevel; 3] = [LogLevel::Failure, LogLevel::Warning, LogLevel::Info];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Failure => "failure",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Failure => "Failure",
            Self::Warning => "Warning",
            Self::Info => "Info",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = UnknownStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim();
        Self::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(normalized))
            .ok_or_else(|| UnknownStatus(value.to_string()))
    }
}

/// Display theme for a status badge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusTheme {
    Blue,
    Yellow,
    Red,
    Gray,
    #[default]
    Neutral,
}

impl StatusTheme {
    /// Theme for a raw status string; unrecognised values get the neutral theme.
    pub fn for_raw(raw: &str) -> Self {
        raw.parse::<DeviceStatus>()
            .map(|status| status.theme())
            .unwrap_or_default()
    }

    pub fn background_class(&self) -> &'static str {
        match self {
            Self::Blue => "bg-blue-600",
            Self::Yellow => "bg-yellow-600",
            Self::Red => "bg-red-600",
            Self::Gray => "bg-gray-600",
            Self::Neutral => "bg-blue-gray-400",
        }
    }

    pub fn text_class(&self) -> &'static str {
        match self {
            Self::Blue => "text-blue-600",
            Self::Yellow => "text-yellow-600",
            Self::Red => "text-red-600",
            Self::Gray => "text-gray-600",
            Self::Neutral => "text-blue-gray-400",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_statuses_case_insensitively() {
        assert_eq!("Running".parse::<DeviceStatus>(), Ok(DeviceStatus::Running));
        assert_eq!(" idle ".parse::<DeviceStatus>(), Ok(DeviceStatus::Idle));
        assert_eq!(
            "exploded".parse::<DeviceStatus>(),
            Err(UnknownStatus("exploded".to_string()))
        );
        assert_eq!("INFO".parse::<LogLevel>(), Ok(LogLevel::Info));
    }

    #[test]
    fn unknown_raw_status_gets_neutral_theme() {
        assert_eq!(StatusTheme::for_raw("failure"), StatusTheme::Red);
        assert_eq!(StatusTheme::for_raw("maintenance"), StatusTheme::Neutral);
        assert_eq!(StatusTheme::for_raw(""), StatusTheme::Neutral);
        assert_eq!(StatusTheme::default(), StatusTheme::Neutral);
    }

    #[test]
    fn serde_uses_lowercase_names() {
        let json = serde_json::to_string(&DeviceStatus::Warning).unwrap();
        assert_eq!(json, "\"warning\"");
        let level: LogLevel = serde_json::from_str("\"failure\"").unwrap();
        assert_eq!(level, LogLevel::Failure);
    }
}
