//! Human-readable timestamps for the "Elapsed time" column.

use chrono::{DateTime, FixedOffset, Utc};

/// Relative time from `then` to `now`, e.g. "3 hours ago" or "in a minute".
///
/// Thresholds follow the usual web-console convention: each unit is used
/// until the rounded value passes its cutoff, then the next larger unit
/// takes over.
pub fn relative_time(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let delta_ms = now.signed_duration_since(then).num_milliseconds();
    let future = delta_ms < 0;
    let secs = delta_ms.unsigned_abs() as f64 / 1000.0;

    let seconds = secs.round() as i64;
    let minutes = (secs / 60.0).round() as i64;
    let hours = (secs / 3_600.0).round() as i64;
    let days = (secs / 86_400.0).round() as i64;
    let months = (secs / (86_400.0 * 30.4375)).round() as i64;
    let years = (secs / (86_400.0 * 365.25)).round() as i64;

    let phrase = if seconds <= 44 {
        "a few seconds".to_string()
    } else if seconds <= 89 {
        "a minute".to_string()
    } else if minutes <= 44 {
        format!("{} minutes", minutes)
    } else if minutes <= 89 {
        "an hour".to_string()
    } else if hours <= 21 {
        format!("{} hours", hours)
    } else if hours <= 35 {
        "a day".to_string()
    } else if days <= 25 {
        format!("{} days", days)
    } else if days <= 45 {
        "a month".to_string()
    } else if months <= 10 {
        format!("{} months", months)
    } else if months <= 17 {
        "a year".to_string()
    } else {
        format!("{} years", years)
    };

    if future {
        format!("in {}", phrase)
    } else {
        format!("{} ago", phrase)
    }
}

/// Long localized form, e.g. "January 1, 2024 12:00 AM".
pub fn format_absolute(then: DateTime<Utc>, offset: &FixedOffset) -> String {
    then.with_timezone(offset)
        .format("%B %-d, %Y %-I:%M %p")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn at(secs_before: i64) -> (DateTime<Utc>, DateTime<Utc>) {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        (now - Duration::seconds(secs_before), now)
    }

    fn rel(secs_before: i64) -> String {
        let (then, now) = at(secs_before);
        relative_time(then, now)
    }

    #[test]
    fn test_relative_thresholds() {
        assert_eq!(rel(0), "a few seconds ago");
        assert_eq!(rel(44), "a few seconds ago");
        assert_eq!(rel(45), "a minute ago");
        assert_eq!(rel(90), "2 minutes ago");
        assert_eq!(rel(44 * 60), "44 minutes ago");
        assert_eq!(rel(45 * 60), "an hour ago");
        assert_eq!(rel(3 * 3600), "3 hours ago");
        assert_eq!(rel(22 * 3600), "a day ago");
        assert_eq!(rel(36 * 3600), "2 days ago");
        assert_eq!(rel(25 * 86_400), "25 days ago");
        assert_eq!(rel(30 * 86_400), "a month ago");
        assert_eq!(rel(90 * 86_400), "3 months ago");
        assert_eq!(rel(400 * 86_400), "a year ago");
        assert_eq!(rel(3 * 365 * 86_400), "3 years ago");
    }

    #[test]
    fn test_future_times() {
        assert_eq!(rel(-10), "in a few seconds");
        assert_eq!(rel(-2 * 3600), "in 2 hours");
    }

    #[test]
    fn test_absolute_format() {
        let then = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let utc = FixedOffset::east_opt(0).unwrap();
        assert_eq!(format_absolute(then, &utc), "January 1, 2024 12:00 AM");

        let ist = FixedOffset::east_opt(5 * 3600 + 1800).unwrap();
        assert_eq!(format_absolute(then, &ist), "January 1, 2024 5:30 AM");
    }
}
