//! Time measurement and formatting helpers.

use chrono::{DateTime, Utc};

/// Whole seconds between `start` and `end`, rounded to the nearest second.
///
/// An `end` before `start` yields zero.
pub fn time_spent(start: DateTime<Utc>, end: DateTime<Utc>) -> u64 {
    let millis = (end - start).num_milliseconds().max(0) as u64;
    (millis + 500) / 1000
}

/// Format seconds as `MM:SS`. Minutes are not wrapped into hours.
pub fn format_time(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// Format seconds as e.g. `"1 hour, 5 minutes, 1 second"`.
///
/// Zero-valued units are omitted; seconds are always shown when nothing else is.
pub fn format_time_verbose(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;

    let mut parts = Vec::new();
    if hours > 0 {
        parts.push(unit(hours, "hour"));
    }
    if minutes > 0 {
        parts.push(unit(minutes, "minute"));
    }
    if secs > 0 || parts.is_empty() {
        parts.push(unit(secs, "second"));
    }
    parts.join(", ")
}

fn unit(value: u64, name: &str) -> String {
    if value == 1 {
        format!("{value} {name}")
    } else {
        format!("{value} {name}s")
    }
}
