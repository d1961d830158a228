use chrono::{DateTime, NaiveDateTime, TimeDelta, Timelike, Utc};

/// Epoch offset (ms) that log `time_seconds` values are relative to.
pub const BASE_TIMESTAMP_MS: i64 = 1_653_553_800_000;

pub fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Absolute time of a log entry; `None` when `time_seconds` is not finite or
/// lands outside the representable range.
pub fn log_timestamp(time_seconds: f64) -> Option<DateTime<Utc>> {
    let offset_ms = (time_seconds * 1000.0).round();
    if !offset_ms.is_finite() || offset_ms.abs() >= i64::MAX as f64 {
        return None;
    }
    let base = DateTime::<Utc>::from_timestamp_millis(BASE_TIMESTAMP_MS)?;
    base.checked_add_signed(TimeDelta::try_milliseconds(offset_ms as i64)?)
}

/// Render a timestamp relative to `now`: "Today at 9:05am",
/// "Yesterday at 4:30pm" or "26/05 at 8:10am".
pub fn format_log_time(timestamp: NaiveDateTime, now: NaiveDateTime) -> String {
    let date = timestamp.date();
    let day = if date == now.date() {
        "Today".to_string()
    } else if Some(date) == now.date().pred_opt() {
        "Yesterday".to_string()
    } else {
        timestamp.format("%-d/%m").to_string()
    };

    let (is_pm, hour) = timestamp.hour12();
    let period = if is_pm { "pm" } else { "am" };
    format!("{day} at {hour}:{:02}{period}", timestamp.minute())
}
