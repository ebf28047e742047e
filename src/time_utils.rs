// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date/time formatting.

use chrono::{DateTime, SecondsFormat, Utc};

/// Format a UTC timestamp as RFC3339 with millisecond precision and a `Z` suffix.
pub fn format_utc_rfc3339(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parse an RFC3339 timestamp (any offset) into UTC.
pub fn parse_utc_rfc3339(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Short list label such as "March 5".
pub fn month_day_label(date: DateTime<Utc>) -> String {
    date.format("%B %-d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_and_parse_round_trip() {
        let date = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap()
            + chrono::Duration::milliseconds(123);
        let formatted = format_utc_rfc3339(date);
        assert_eq!(formatted, "2024-01-15T10:30:00.123Z");
        assert_eq!(parse_utc_rfc3339(&formatted), Some(date));
    }

    #[test]
    fn test_parse_normalizes_offset() {
        let parsed = parse_utc_rfc3339("2024-01-15T12:30:00+02:00").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap());
        assert!(parse_utc_rfc3339("yesterday").is_none());
    }

    #[test]
    fn test_month_day_label() {
        let date = Utc.with_ymd_and_hms(2024, 10, 9, 0, 0, 0).unwrap();
        assert_eq!(month_day_label(date), "October 9");
    }
}
