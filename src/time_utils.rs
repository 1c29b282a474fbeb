// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date/time formatting.

use chrono::{DateTime, SecondsFormat, Utc};

/// Format a UTC timestamp as RFC3339 using a `Z` suffix.
pub fn format_utc_rfc3339(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Format a UTC timestamp as a calendar date (`YYYY-MM-DD`).
pub fn format_date(date: DateTime<Utc>) -> String {
    date.format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_formats() {
        let date = DateTime::parse_from_rfc3339("2024-03-05T07:08:09.250+00:00")
            .unwrap()
            .with_timezone(&Utc);

        assert_eq!(format_utc_rfc3339(date), "2024-03-05T07:08:09Z");
        assert_eq!(format_date(date), "2024-03-05");
    }
}
