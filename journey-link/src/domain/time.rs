//! Clock time and calendar date parsing for the navigation form.
//!
//! Form inputs arrive as free strings. Times use a 24-hour `H:MM` or
//! `HH:MM` layout. Dates go through a lenient parser that accepts the
//! layouts a browser date field or a person typing produces, and rolls
//! overflowing days into the next month instead of rejecting them.

use chrono::{Days, Month, NaiveDate};
use std::fmt;

/// Error returned when parsing an invalid time string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time: {reason}")]
pub struct TimeError {
    reason: &'static str,
}

impl TimeError {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// A time of day with minute precision.
///
/// # Examples
///
/// ```
/// use journey_link::domain::ClockTime;
///
/// let t = ClockTime::parse("9:05").unwrap();
/// assert_eq!(t.to_string(), "09:05");
/// assert_eq!(t.compact(), "0905");
///
/// assert!(ClockTime::parse("24:00").is_err());
/// assert!(ClockTime::parse("9:60").is_err());
/// assert!(ClockTime::parse("0930").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClockTime {
    hour: u8,
    minute: u8,
}

impl ClockTime {
    /// Create a time from components, returning `None` when out of range.
    pub fn new(hour: u8, minute: u8) -> Option<Self> {
        if hour > 23 || minute > 59 {
            return None;
        }
        Some(Self { hour, minute })
    }

    /// Parse a time from `H:MM` or `HH:MM`.
    ///
    /// The hour is one or two digits in 0-23, the minute exactly two digits
    /// in 00-59. Surrounding whitespace is not accepted.
    pub fn parse(s: &str) -> Result<Self, TimeError> {
        let (hour_part, minute_part) = s
            .split_once(':')
            .ok_or_else(|| TimeError::new("expected H:MM or HH:MM format"))?;

        if hour_part.is_empty() || hour_part.len() > 2 {
            return Err(TimeError::new("hour must be one or two digits"));
        }
        if minute_part.len() != 2 {
            return Err(TimeError::new("minute must be two digits"));
        }

        let hour = parse_digits(hour_part).ok_or_else(|| TimeError::new("invalid hour digits"))?;
        if hour > 23 {
            return Err(TimeError::new("hour must be 0-23"));
        }

        let minute =
            parse_digits(minute_part).ok_or_else(|| TimeError::new("invalid minute digits"))?;
        if minute > 59 {
            return Err(TimeError::new("minute must be 0-59"));
        }

        Ok(Self {
            hour: hour as u8,
            minute: minute as u8,
        })
    }

    /// Returns the hour (0-23).
    pub fn hour(&self) -> u8 {
        self.hour
    }

    /// Returns the minute (0-59).
    pub fn minute(&self) -> u8 {
        self.minute
    }

    /// Zero-padded hour and minute with no separator, e.g. `1405`.
    pub fn compact(&self) -> String {
        format!("{:02}{:02}", self.hour, self.minute)
    }
}

impl fmt::Debug for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClockTime({:02}:{:02})", self.hour, self.minute)
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

/// Parse ASCII digits into a number. Returns `None` on any other character.
fn parse_digits(s: &str) -> Option<u32> {
    if !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

/// Parse a calendar date leniently.
///
/// Accepted layouts:
/// - numeric year first, `-` or `/` separated, month and day with or
///   without a leading zero: `2024-05-01`, `2024-5-1`, `2024/05/01`;
///   missing parts default to the first month or day (`2024`, `2024-07`)
/// - an English month name with day and year: `May 1, 2024`, `1 May 2024`
///
/// A trailing time after `T` (`2024-05-01T14:05`) is ignored. Months must
/// be 1-12 and days 1-31, but a day past the end of its month is not an
/// error: it rolls over into the following month, so `2024-04-31` yields
/// 1 May 2024.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use journey_link::domain::parse_lenient_date;
///
/// assert_eq!(
///     parse_lenient_date("2024-05-01"),
///     NaiveDate::from_ymd_opt(2024, 5, 1)
/// );
/// assert_eq!(
///     parse_lenient_date("May 1, 2024"),
///     NaiveDate::from_ymd_opt(2024, 5, 1)
/// );
/// assert_eq!(
///     parse_lenient_date("2023-02-30"),
///     NaiveDate::from_ymd_opt(2023, 3, 2)
/// );
/// assert_eq!(parse_lenient_date("2024-13-01"), None);
/// assert_eq!(parse_lenient_date("morgen"), None);
/// ```
pub fn parse_lenient_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();

    // Only numeric layouts carry a time; month names may contain a 'T'.
    let date_part = match s.split_once('T') {
        Some((date, _)) if date.starts_with(|c: char| c.is_ascii_digit()) => date,
        _ => s,
    };

    let (year, month, day) =
        numeric_date_parts(date_part).or_else(|| named_month_date_parts(date_part))?;

    if !(1..=12).contains(&month) || !(1..=31).contains(&day) {
        return None;
    }

    NaiveDate::from_ymd_opt(year, month, 1)?.checked_add_days(Days::new(u64::from(day - 1)))
}

/// `YYYY[-M[M][-D[D]]]`, with `/` allowed in place of `-`.
fn numeric_date_parts(s: &str) -> Option<(i32, u32, u32)> {
    let separator = if s.contains('/') { '/' } else { '-' };
    let mut parts = s.split(separator);

    let year = parse_year(parts.next()?)?;
    let month = match parts.next() {
        Some(m) => parse_day_or_month(m)?,
        None => 1,
    };
    let day = match parts.next() {
        Some(d) => parse_day_or_month(d)?,
        None => 1,
    };

    if parts.next().is_some() {
        return None;
    }
    Some((year, month, day))
}

/// `May 1, 2024` or `1 May 2024`.
fn named_month_date_parts(s: &str) -> Option<(i32, u32, u32)> {
    let tokens: Vec<&str> = s
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|t| !t.is_empty())
        .collect();
    let [first, second, year] = tokens.as_slice() else {
        return None;
    };

    let (month, day) = match first.parse::<Month>() {
        Ok(month) => (month, second),
        Err(_) => (second.parse::<Month>().ok()?, first),
    };

    Some((
        parse_year(year)?,
        month.number_from_month(),
        parse_day_or_month(day)?,
    ))
}

fn parse_year(s: &str) -> Option<i32> {
    if s.len() != 4 {
        return None;
    }
    parse_digits(s).map(|y| y as i32)
}

fn parse_day_or_month(s: &str) -> Option<u32> {
    if s.is_empty() || s.len() > 2 {
        return None;
    }
    parse_digits(s)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Every in-range hour/minute pair parses in both layouts
        #[test]
        fn valid_pairs_parse(h in 0u8..24, m in 0u8..60) {
            let padded = ClockTime::parse(&format!("{h:02}:{m:02}")).unwrap();
            prop_assert_eq!(padded.hour(), h);
            prop_assert_eq!(padded.minute(), m);
            if h < 10 {
                let short = ClockTime::parse(&format!("{h}:{m:02}")).unwrap();
                prop_assert_eq!(short, padded);
            }
        }

        /// Out-of-range hours are always rejected
        #[test]
        fn large_hours_rejected(h in 24u32..100, m in 0u32..60) {
            let s = format!("{h}:{m:02}");
            prop_assert!(ClockTime::parse(&s).is_err());
        }

        /// Out-of-range minutes are always rejected
        #[test]
        fn large_minutes_rejected(h in 0u32..24, m in 60u32..100) {
            let s = format!("{h}:{m}");
            prop_assert!(ClockTime::parse(&s).is_err());
        }

        /// Days 1-31 of any month always yield a date, never more than a few days off
        #[test]
        fn lenient_dates_total_over_day_range(y in 1970i32..2100, mo in 1u32..=12, d in 1u32..=31) {
            let parsed = parse_lenient_date(&format!("{y:04}-{mo:02}-{d:02}")).unwrap();
            let first = NaiveDate::from_ymd_opt(y, mo, 1).unwrap();
            prop_assert_eq!((parsed - first).num_days(), i64::from(d - 1));
        }
    }
}
