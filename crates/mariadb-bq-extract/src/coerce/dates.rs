//! Calendar timestamp parsing with year-first / day-first disambiguation.
//!
//! Ambiguous all-numeric dates ("01-12-2024" vs "2024-12-01") are resolved
//! by the declared category: year-first assumes the year leads, day-first
//! assumes the day leads. Unambiguous strings parse under either policy.

use chrono::{NaiveDate, NaiveDateTime};

/// Formats tried when the year is expected first.
const YEAR_FIRST_DATETIME: [&str; 6] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y/%m/%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M",
    "%Y%m%d %H:%M:%S",
];
const YEAR_FIRST_DATE: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%Y%m%d"];

/// Formats tried when the day is expected first.
const DAY_FIRST_DATETIME: [&str; 6] = [
    "%d-%m-%Y %H:%M:%S%.f",
    "%d/%m/%Y %H:%M:%S%.f",
    "%d.%m.%Y %H:%M:%S%.f",
    "%d-%m-%Y %H:%M",
    "%d/%m/%Y %H:%M",
    "%d.%m.%Y %H:%M",
];
const DAY_FIRST_DATE: [&str; 3] = ["%d-%m-%Y", "%d/%m/%Y", "%d.%m.%Y"];

/// Parse a timestamp assuming ambiguous numeric components are year-first.
#[must_use]
pub fn parse_year_first(s: &str) -> Option<NaiveDateTime> {
    parse_with(s, &YEAR_FIRST_DATETIME, &YEAR_FIRST_DATE)
        .or_else(|| parse_with(s, &DAY_FIRST_DATETIME, &DAY_FIRST_DATE))
}

/// Parse a timestamp assuming ambiguous numeric components are day-first.
#[must_use]
pub fn parse_day_first(s: &str) -> Option<NaiveDateTime> {
    parse_with(s, &DAY_FIRST_DATETIME, &DAY_FIRST_DATE)
        .or_else(|| parse_with(s, &YEAR_FIRST_DATETIME, &YEAR_FIRST_DATE))
}

fn parse_with(s: &str, datetime_fmts: &[&str], date_fmts: &[&str]) -> Option<NaiveDateTime> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    for fmt in datetime_fmts {
        if let Ok(ts) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(ts);
        }
    }
    for fmt in date_fmts {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return d.and_hms_opt(0, 0, 0);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_iso_datetime_parses_either_way() {
        for parse in [parse_year_first, parse_day_first] {
            let ts = parse("2024-12-01 13:45:30").unwrap();
            assert_eq!((ts.year(), ts.month(), ts.day()), (2024, 12, 1));
            assert_eq!(ts.hour(), 13);
        }
    }

    #[test]
    fn test_ambiguous_date_disambiguation() {
        // "01-02-2024" is Feb 1st day-first; year-first has no matching
        // leading-year format, so the day-first fallback applies.
        let df = parse_day_first("01-02-2024").unwrap();
        assert_eq!((df.year(), df.month(), df.day()), (2024, 2, 1));

        // "2024-02-01" is Feb 1st year-first.
        let yf = parse_year_first("2024-02-01").unwrap();
        assert_eq!((yf.year(), yf.month(), yf.day()), (2024, 2, 1));
    }

    #[test]
    fn test_date_only_is_midnight() {
        let ts = parse_year_first("2024-06-15").unwrap();
        assert_eq!((ts.hour(), ts.minute(), ts.second()), (0, 0, 0));
    }

    #[test]
    fn test_day_first_slash_format() {
        let ts = parse_day_first("31/12/2024 23:59:59").unwrap();
        assert_eq!((ts.year(), ts.month(), ts.day()), (2024, 12, 31));
    }

    #[test]
    fn test_garbage_returns_none() {
        assert!(parse_year_first("not a date").is_none());
        assert!(parse_day_first("").is_none());
        assert!(parse_year_first("2024-13-45").is_none());
    }

    #[test]
    fn test_fractional_seconds() {
        let ts = parse_year_first("2024-12-01 13:45:30.250").unwrap();
        assert_eq!(ts.and_utc().timestamp_subsec_millis(), 250);
    }
}
