//! Tolerant date parsing and normalization to a polars `Date` column.
//!
//! Accepted input, after trimming surrounding whitespace:
//!
//! - numeric dates with `-`, `/` or `.` separators: year first
//!   (`2024-01-15`), month first (`01/15/2024`, `1-15-24`), and day first
//!   when month first is impossible (`15/01/2024`)
//! - compact `20240115`
//! - month names: `January 15, 2024`, `Jan 15 2024`, `15 January 2024`,
//!   `15-Jan-2024`, `Monday, January 15, 2024`
//! - year and month only (`2024-01`, `January 2024`), pinned to the 1st
//! - RFC 3339 timestamps and any of the above followed by a time of day
//!   (`2024-01-15 10:30:00`, `2024-01-15T10:30:00Z`, `01/15/2024 10:30 PM`);
//!   the time is validated and dropped
//!
//! Two-digit years follow the POSIX pivot: `00..=68` is 20xx, `69..=99` is 19xx.
//! Years must have four digits once expanded.

use crate::error::Result;
use crate::utils::stringify_series;
use chrono::{DateTime, Datelike, NaiveDate};
use once_cell::sync::Lazy;
use polars::prelude::*;
use regex::Regex;

/// Days from 0001-01-01 (CE) to 1970-01-01; polars stores dates as days since the epoch.
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

static NUMERIC_DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{1,4})([-/.])(\d{1,2})([-/.])(\d{1,4})$").expect("Invalid regex: numeric date")
});

static COMPACT_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{4})(\d{2})(\d{2})$").expect("Invalid regex: compact date"));

static YEAR_MONTH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{4})[-/](\d{1,2})$").expect("Invalid regex: year-month"));

static TRAILING_TIME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?P<date>.+?)(?:T|\s+)(?P<hour>\d{1,2}):(?P<minute>\d{2})(?::(?P<second>\d{2})(?:\.\d+)?)?(?:\s*(?P<meridiem>[AaPp][Mm]))?(?:\s*(?:Z|UTC|[+-]\d{2}:?\d{2}))?$",
    )
    .expect("Invalid regex: trailing time")
});

const NAMED_MONTH_FORMATS: &[&str] = &[
    "%B %d, %Y",
    "%B %d %Y",
    "%d %B %Y",
    "%d %B, %Y",
    "%d-%B-%Y",
    "%A, %B %d, %Y",
    "%A %B %d %Y",
];

/// Parse a single value into a calendar date, or `None` if no format applies.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let value = raw.trim();
    if value.is_empty() {
        return None;
    }

    let date = parse_date_only(value)
        .or_else(|| {
            DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|dt| dt.date_naive())
        })
        .or_else(|| parse_with_time(value))?;

    has_four_digit_year(&date).then_some(date)
}

fn parse_date_only(value: &str) -> Option<NaiveDate> {
    if let Some(caps) = NUMERIC_DATE.captures(value) {
        return parse_numeric(&caps[1], &caps[2], &caps[3], &caps[4], &caps[5]);
    }

    if let Some(caps) = COMPACT_DATE.captures(value) {
        return ymd(&caps[1], &caps[2], &caps[3]);
    }

    if let Some(caps) = YEAR_MONTH.captures(value) {
        return ymd(&caps[1], &caps[2], "1");
    }

    parse_named_month(value)
}

fn parse_numeric(first: &str, sep1: &str, second: &str, sep2: &str, third: &str) -> Option<NaiveDate> {
    if sep1 != sep2 {
        return None;
    }

    if first.len() == 4 {
        if third.len() > 2 {
            return None;
        }
        return ymd(first, second, third);
    }

    if first.len() > 2 {
        return None;
    }

    let year = match third.len() {
        4 => third.parse::<i32>().ok()?,
        2 => expand_two_digit_year(third.parse::<i32>().ok()?),
        _ => return None,
    };
    let a = first.parse::<u32>().ok()?;
    let b = second.parse::<u32>().ok()?;

    NaiveDate::from_ymd_opt(year, a, b).or_else(|| NaiveDate::from_ymd_opt(year, b, a))
}

fn parse_named_month(value: &str) -> Option<NaiveDate> {
    if !value.chars().any(|c| c.is_ascii_alphabetic()) {
        return None;
    }

    // "March 2023" also parses under "%B %d %Y" as day 20 of year 23
    NAMED_MONTH_FORMATS
        .iter()
        .find_map(|format| {
            NaiveDate::parse_from_str(value, format)
                .ok()
                .filter(has_four_digit_year)
        })
        .or_else(|| NaiveDate::parse_from_str(&format!("1 {}", value), "%d %B %Y").ok())
}

fn has_four_digit_year(date: &NaiveDate) -> bool {
    (1000..=9999).contains(&date.year())
}

fn parse_with_time(value: &str) -> Option<NaiveDate> {
    let caps = TRAILING_TIME.captures(value)?;

    let hour: u32 = caps["hour"].parse().ok()?;
    let minute: u32 = caps["minute"].parse().ok()?;
    let second: u32 = caps
        .name("second")
        .map_or(Some(0), |s| s.as_str().parse().ok())?;
    let max_hour = if caps.name("meridiem").is_some() { 12 } else { 23 };
    if hour > max_hour || minute > 59 || second > 59 {
        return None;
    }

    parse_date_only(caps["date"].trim_end_matches(',').trim())
}

fn ymd(year: &str, month: &str, day: &str) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, day.parse().ok()?)
}

fn expand_two_digit_year(year: i32) -> i32 {
    if year < 69 { 2000 + year } else { 1900 + year }
}

/// Days since 1970-01-01, the physical representation of a polars `Date`.
#[inline]
pub fn days_since_epoch(date: NaiveDate) -> i32 {
    date.num_days_from_ce() - UNIX_EPOCH_DAYS_FROM_CE
}

/// Convert a column of arbitrary dtype into a `Date` column.
///
/// Values that cannot be parsed become null; callers filter on that.
pub fn normalize_date_series(series: &Series) -> Result<Series> {
    match series.dtype() {
        DataType::Date => Ok(series.clone()),
        DataType::Datetime(_, _) => Ok(series.cast(&DataType::Date)?),
        _ => {
            let text = stringify_series(series)?;
            let values = text.str()?;
            let days: Vec<Option<i32>> = values
                .into_iter()
                .map(|value| value.and_then(parse_date).map(days_since_epoch))
                .collect();
            Ok(Series::new(series.name().clone(), days).cast(&DataType::Date)?)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    #[test]
    fn test_iso_dates() {
        assert_eq!(parse_date("2024-01-15"), date(2024, 1, 15));
        assert_eq!(parse_date("2024/1/5"), date(2024, 1, 5));
        assert_eq!(parse_date("2024.01.15"), date(2024, 1, 15));
        assert_eq!(parse_date("  2024-01-15 "), date(2024, 1, 15));
        assert_eq!(parse_date("20240115"), date(2024, 1, 15));
    }

    #[test]
    fn test_month_first_then_day_first() {
        assert_eq!(parse_date("01/02/2024"), date(2024, 1, 2));
        assert_eq!(parse_date("15/01/2024"), date(2024, 1, 15));
        assert_eq!(parse_date("1-15-24"), date(2024, 1, 15));
        assert_eq!(parse_date("12.31.99"), date(1999, 12, 31));
    }

    #[test]
    fn test_named_months() {
        assert_eq!(parse_date("January 15, 2024"), date(2024, 1, 15));
        assert_eq!(parse_date("Jan 15 2024"), date(2024, 1, 15));
        assert_eq!(parse_date("15 Jan 2024"), date(2024, 1, 15));
        assert_eq!(parse_date("15-Jan-2024"), date(2024, 1, 15));
        assert_eq!(parse_date("March 2023"), date(2023, 3, 1));
        assert_eq!(parse_date("2023-03"), date(2023, 3, 1));
    }

    #[test]
    fn test_month_and_year_only() {
        assert_eq!(parse_date("March 2023"), date(2023, 3, 1));
        assert_eq!(parse_date("Jan 2024"), date(2024, 1, 1));
        assert_eq!(parse_date("December 1999"), date(1999, 12, 1));
        assert_eq!(parse_date("Jan 15 24"), None);
    }

    #[test]
    fn test_with_time_of_day() {
        assert_eq!(parse_date("2024-01-15 10:30:00"), date(2024, 1, 15));
        assert_eq!(parse_date("2024-01-15T10:30:00.250"), date(2024, 1, 15));
        assert_eq!(parse_date("2024-01-15T23:30:00Z"), date(2024, 1, 15));
        assert_eq!(parse_date("2024-01-15T10:30:00+02:00"), date(2024, 1, 15));
        assert_eq!(parse_date("01/15/2024 10:30 PM"), date(2024, 1, 15));
        assert_eq!(parse_date("2024-01-15 25:00"), None);
    }

    #[test]
    fn test_unparseable_values() {
        assert_eq!(parse_date("not-a-date"), None);
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("2024-02-30"), None);
        assert_eq!(parse_date("13/13/2024"), None);
        assert_eq!(parse_date("2024-01/15"), None);
        assert_eq!(parse_date("15/01/124"), None);
        assert_eq!(parse_date("12345"), None);
    }

    #[test]
    fn test_days_since_epoch() {
        assert_eq!(days_since_epoch(NaiveDate::from_ymd_opt(1970, 1, 1).unwrap()), 0);
        assert_eq!(days_since_epoch(NaiveDate::from_ymd_opt(1970, 1, 2).unwrap()), 1);
        assert_eq!(days_since_epoch(NaiveDate::from_ymd_opt(1969, 12, 31).unwrap()), -1);
    }

    #[test]
    fn test_normalize_date_series() {
        let series = Series::new(
            "signup_date".into(),
            &[Some("2024-01-15"), Some("not-a-date"), None, Some("Feb 3, 2023")],
        );
        let normalized = normalize_date_series(&series).unwrap();

        assert_eq!(normalized.dtype(), &DataType::Date);
        assert_eq!(normalized.name().as_str(), "signup_date");
        assert_eq!(normalized.null_count(), 2);

        let rendered = normalized.cast(&DataType::String).unwrap();
        let rendered = rendered.str().unwrap();
        assert_eq!(rendered.get(0), Some("2024-01-15"));
        assert_eq!(rendered.get(3), Some("2023-02-03"));
    }

    #[test]
    fn test_normalize_keeps_date_dtype() {
        let series = Series::new("d".into(), &[Some(19_737i32), None])
            .cast(&DataType::Date)
            .unwrap();
        let normalized = normalize_date_series(&series).unwrap();
        assert_eq!(normalized.dtype(), &DataType::Date);
        assert_eq!(normalized.null_count(), 1);
    }
}
