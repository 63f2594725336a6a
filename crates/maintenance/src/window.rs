//! Maintenance window time range calculation.

use chrono::{DateTime, Duration, SecondsFormat, SubsecRound, Utc};

/// Start and end of a maintenance window, both in UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    /// When the window opens.
    pub start: DateTime<Utc>,
    /// When the window closes.
    pub end: DateTime<Utc>,
}

impl TimeWindow {
    /// Start time rendered as `YYYY-MM-DDTHH:MM:SSZ`.
    #[must_use]
    pub fn start_time(&self) -> String {
        render(self.start)
    }

    /// End time rendered as `YYYY-MM-DDTHH:MM:SSZ`.
    #[must_use]
    pub fn end_time(&self) -> String {
        render(self.end)
    }

    /// Length of the window.
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }
}

/// Compute the window that opens at `now` and lasts `duration_minutes`.
///
/// `now` is truncated to whole seconds before the end is derived, so the
/// rendered timestamps differ by exactly `duration_minutes`. Callers are
/// expected to pass a positive duration (see [`crate::validation`]).
#[must_use]
pub fn compute_window(duration_minutes: u32, now: DateTime<Utc>) -> TimeWindow {
    let start = now.trunc_subsecs(0);
    let end = start + Duration::minutes(i64::from(duration_minutes));
    TimeWindow { start, end }
}

fn render(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Secs, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn new_year() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_fifteen_minutes_from_new_year() {
        let window = compute_window(15, new_year());
        assert_eq!(window.start_time(), "2024-01-01T00:00:00Z");
        assert_eq!(window.end_time(), "2024-01-01T00:15:00Z");
    }

    #[test]
    fn test_duration_is_exact_for_every_allowed_value() {
        let now = new_year() + Duration::milliseconds(123_456);
        for minutes in 1..=30 {
            let window = compute_window(minutes, now);
            assert_eq!(window.duration(), Duration::minutes(i64::from(minutes)));
            assert!(window.start_time().ends_with('Z'));
            assert!(window.end_time().ends_with('Z'));
        }
    }

    #[test]
    fn test_subsecond_precision_is_dropped() {
        let now = new_year() + Duration::milliseconds(59_999);
        let window = compute_window(1, now);
        assert_eq!(window.start_time(), "2024-01-01T00:00:59Z");
        assert_eq!(window.end_time(), "2024-01-01T00:01:59Z");
    }

    #[test]
    fn test_window_crosses_day_boundary() {
        let now = Utc.with_ymd_and_hms(2024, 2, 28, 23, 50, 0).unwrap();
        let window = compute_window(30, now);
        assert_eq!(window.end_time(), "2024-02-29T00:20:00Z");
    }
}
