use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, TimeDelta};

/// Format used whenever a timestamp is written back out.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Date-and-time patterns tried in order after RFC 3339.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
    "%m/%d/%Y %H:%M:%S",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d"];

// ── Timestamp parsing ─────────────────────────────────────────────────────────

/// Parse a raw timestamp cell into a time-zone-naive instant.
///
/// Handles:
/// * RFC 3339 with `Z` or a fixed offset → converted to UTC, offset dropped.
/// * ISO 8601 date-times with `T` or space separators, with or without
///   seconds and fractional seconds.
/// * Day-first and month-first slash forms.
/// * A bare `%Y-%m-%d` date → midnight.
///
/// Returns `None` for empty cells or unrecognised formats.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }

    for fmt in DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(naive);
        }
    }

    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return date.and_hms_opt(0, 0, 0);
        }
    }

    None
}

// ── Window boundaries ─────────────────────────────────────────────────────────

/// Calendar day containing `ts`.
pub fn day_start(ts: NaiveDateTime) -> NaiveDate {
    ts.date()
}

/// Monday opening the ISO week that contains `ts`.
pub fn week_start(ts: NaiveDateTime) -> NaiveDate {
    let date = ts.date();
    let offset = i64::from(date.weekday().num_days_from_monday());
    date - TimeDelta::days(offset)
}

// ── Serde helpers ─────────────────────────────────────────────────────────────

/// Serialise a [`NaiveDateTime`] as [`TIMESTAMP_FORMAT`].
pub mod naive_datetime_format {
    use chrono::NaiveDateTime;
    use serde::Serializer;

    use super::TIMESTAMP_FORMAT;

    pub fn serialize<S: Serializer>(ts: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&ts.format(TIMESTAMP_FORMAT).to_string())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn dt(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, s)
            .unwrap()
    }

    // ── parse_timestamp ───────────────────────────────────────────────────────

    #[test]
    fn test_parse_iso_without_seconds() {
        assert_eq!(
            parse_timestamp("2024-01-01T12:00"),
            Some(dt(2024, 1, 1, 12, 0, 0))
        );
    }

    #[test]
    fn test_parse_space_separated() {
        assert_eq!(
            parse_timestamp("2024-03-05 06:30:15"),
            Some(dt(2024, 3, 5, 6, 30, 15))
        );
    }

    #[test]
    fn test_parse_fractional_seconds() {
        let ts = parse_timestamp("2024-03-05T06:30:15.250").unwrap();
        assert_eq!(ts.and_utc().timestamp_subsec_millis(), 250);
    }

    #[test]
    fn test_parse_rfc3339_offset_converted_to_utc() {
        assert_eq!(
            parse_timestamp("2024-01-01T02:00:00+02:00"),
            Some(dt(2024, 1, 1, 0, 0, 0))
        );
        assert_eq!(
            parse_timestamp("2024-01-01T02:00:00Z"),
            Some(dt(2024, 1, 1, 2, 0, 0))
        );
    }

    #[test]
    fn test_parse_date_only_is_midnight() {
        assert_eq!(parse_timestamp("2024-02-29"), Some(dt(2024, 2, 29, 0, 0, 0)));
    }

    #[test]
    fn test_parse_slash_day_first() {
        assert_eq!(
            parse_timestamp("25/12/2024 08:00"),
            Some(dt(2024, 12, 25, 8, 0, 0))
        );
    }

    #[test]
    fn test_parse_trims_whitespace() {
        assert_eq!(
            parse_timestamp("  2024-01-01 00:00:00 "),
            Some(dt(2024, 1, 1, 0, 0, 0))
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(parse_timestamp(""), None);
        assert_eq!(parse_timestamp("   "), None);
        assert_eq!(parse_timestamp("not-a-date"), None);
        assert_eq!(parse_timestamp("2024-13-40 00:00"), None);
    }

    // ── window boundaries ─────────────────────────────────────────────────────

    #[test]
    fn test_day_start() {
        assert_eq!(
            day_start(dt(2024, 1, 1, 23, 59, 59)),
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
        );
    }

    #[test]
    fn test_week_start_is_monday() {
        let monday = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert_eq!(week_start(dt(2024, 1, 1, 0, 0, 0)), monday);
        assert_eq!(week_start(dt(2024, 1, 3, 12, 0, 0)), monday);
        assert_eq!(week_start(dt(2024, 1, 7, 23, 59, 59)), monday);
        assert_eq!(
            week_start(dt(2024, 1, 8, 0, 0, 0)),
            NaiveDate::from_ymd_opt(2024, 1, 8).unwrap()
        );
    }

    #[test]
    fn test_week_start_crosses_year_boundary() {
        assert_eq!(
            week_start(dt(2025, 1, 1, 9, 0, 0)),
            NaiveDate::from_ymd_opt(2024, 12, 30).unwrap()
        );
    }
}
