//! `MM-YYYY` month strings.
//!
//! Stored dates are month-strings, not real dates. Comparisons between them
//! are plain string comparisons, which only order correctly inside a single
//! year.

use chrono::{DateTime, NaiveDate, TimeZone};
use std::fmt::Display;

const FORMAT: &str = "%m-%Y";

/// Parse `M-YYYY` or `MM-YYYY` into the first day of that month.
///
/// The month may be one or two digits and must be 1..=12. The year must be
/// exactly four digits.
pub fn parse(input: &str) -> Option<NaiveDate> {
    let (month, year) = input.split_once('-')?;

    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if !(1..=2).contains(&month.len()) || year.len() != 4 || !all_digits(month) || !all_digits(year)
    {
        return None;
    }

    NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, 1)
}

/// Parse and re-render in canonical `MM-YYYY` form.
///
/// Idempotent: normalizing an already canonical value returns it unchanged.
pub fn normalize(input: &str) -> Option<String> {
    parse(input).map(|date| date.format(FORMAT).to_string())
}

/// Render the month a timestamp falls in, in the timestamp's own offset.
pub fn of_timestamp<Tz>(timestamp: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    timestamp.format(FORMAT).to_string()
}
