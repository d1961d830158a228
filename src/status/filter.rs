use std::str::FromStr;

use crate::fleet_client::LogEntry;

use super::{DeviceStatus, LogLevel, UnknownStatus};

/// A listed device: something with a display name and a raw status.
pub trait Named {
    fn name(&self) -> &str;
    fn raw_status(&self) -> &str;

    fn status(&self) -> Option<DeviceStatus> {
        self.raw_status().parse().ok()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFilter<S> {
    All,
    Only(S),
}

impl<S> Default for StatusFilter<S> {
    fn default() -> Self {
        StatusFilter::All
    }
}

impl<S: PartialEq> StatusFilter<S> {
    pub fn matches(&self, value: Option<&S>) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(expected) => value == Some(expected),
        }
    }
}

impl<S> FromStr for StatusFilter<S>
where
    S: FromStr<Err = UnknownStatus>,
{
    type Err = UnknownStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if value.trim().eq_ignore_ascii_case("all") {
            return Ok(StatusFilter::All);
        }
        value.parse().map(StatusFilter::Only)
    }
}

/// Case-insensitive name search plus status filter, sorted by name.
pub fn filter_devices<'a, T: Named>(
    items: &'a [T],
    search: &str,
    filter: &StatusFilter<DeviceStatus>,
) -> Vec<&'a T> {
    let needle = search.trim().to_lowercase();
    let mut matches: Vec<&T> = items
        .iter()
        .filter(|item| needle.is_empty() || item.name().to_lowercase().contains(&needle))
        .filter(|item| filter.matches(item.status().as_ref()))
        .collect();
    matches.sort_by(|a, b| a.name().cmp(b.name()));
    matches
}

/// Log entries matching the level filter, newest first.
pub fn filter_logs<'a>(entries: &'a [LogEntry], filter: &StatusFilter<LogLevel>) -> Vec<&'a LogEntry> {
    let mut matches: Vec<&LogEntry> = entries
        .iter()
        .filter(|entry| filter.matches(entry.level().as_ref()))
        .collect();
    matches.sort_by(|a, b| b.time_seconds.total_cmp(&a.time_seconds));
    matches
}
