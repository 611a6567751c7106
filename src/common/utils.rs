//! Small shared helpers used by the engine and the command handlers.

use chrono::{Duration, NaiveTime};

use crate::common::constants::{CLOCK_TIME_FORMAT, PROVIDER_TIME_FORMAT};

/// Linear interpolation between `start` and `end`.
///
/// `progress` is not clamped: the engine relies on the phase ordering to keep
/// it inside `[0, 1]`.
pub fn interpolate(start: f64, end: f64, progress: f64) -> f64 {
    start + (end - start) * progress
}

/// Ratio of two durations, measured in milliseconds.
///
/// Returns `0.0` for an empty denominator so a zero-length twilight behaves
/// like an instantaneous switch instead of producing NaN.
pub fn duration_ratio(numerator: Duration, denominator: Duration) -> f64 {
    let denominator_ms = denominator.num_milliseconds();
    if denominator_ms == 0 {
        return 0.0;
    }
    numerator.num_milliseconds() as f64 / denominator_ms as f64
}

/// Parse a time of day as reported by the provider (`6:04:12 AM`), falling
/// back to 24-hour clock notation (`18:30:00`, `18:30`).
pub fn parse_time_of_day(value: &str) -> Option<NaiveTime> {
    let value = value.trim();
    NaiveTime::parse_from_str(value, PROVIDER_TIME_FORMAT)
        .or_else(|_| NaiveTime::parse_from_str(value, CLOCK_TIME_FORMAT))
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M"))
        .ok()
}

/// Human readable duration such as `1h 12m` or `45m 10s`.
pub fn format_duration(duration: Duration) -> String {
    let total = duration.num_seconds().abs();
    let sign = if duration < Duration::zero() { "-" } else { "" };
    let (hours, minutes, seconds) = (total / 3600, (total % 3600) / 60, total % 60);

    if hours > 0 {
        format!("{sign}{hours}h {minutes}m")
    } else if minutes > 0 {
        format!("{sign}{minutes}m {seconds}s")
    } else {
        format!("{sign}{seconds}s")
    }
}
