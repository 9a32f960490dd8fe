//! Date and date-time text handling
//!
//! Dates use the `yyyy-MM-dd` format and date-times `yyyy-MM-dd HH:mm`.
//! Parsing trims surrounding whitespace and treats blank input as absent.

use crate::domain::errors::ClinicError;
use crate::domain::result::Result;
use chrono::{Datelike, NaiveDate, NaiveDateTime};

/// `yyyy-MM-dd`
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// `yyyy-MM-dd HH:mm`
pub const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Parses a `yyyy-MM-dd` date
///
/// Returns `Ok(None)` for blank input.
///
/// # Examples
///
/// ```
/// use clinica::core::dates::parse_date;
/// use chrono::NaiveDate;
///
/// assert_eq!(
///     parse_date(" 2026-03-01 ").unwrap(),
///     Some(NaiveDate::from_ymd_opt(2026, 3, 1).unwrap())
/// );
/// assert_eq!(parse_date("").unwrap(), None);
/// assert!(parse_date("01/03/2026").is_err());
/// ```
pub fn parse_date(input: &str) -> Result<Option<NaiveDate>> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
        .map(Some)
        .map_err(|_| ClinicError::invalid("Invalid date format. Expected format: yyyy-MM-dd"))
}

/// Parses a `yyyy-MM-dd HH:mm` date-time
///
/// Returns `Ok(None)` for blank input.
pub fn parse_date_time(input: &str) -> Result<Option<NaiveDateTime>> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    NaiveDateTime::parse_from_str(trimmed, DATE_TIME_FORMAT)
        .map(Some)
        .map_err(|_| {
            ClinicError::invalid("Invalid datetime format. Expected format: yyyy-MM-dd HH:mm")
        })
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Formats to minute precision; seconds are dropped
pub fn format_date_time(date_time: NaiveDateTime) -> String {
    date_time.format(DATE_TIME_FORMAT).to_string()
}

pub fn is_valid_date(input: &str) -> bool {
    matches!(parse_date(input), Ok(Some(_)))
}

pub fn is_valid_date_time(input: &str) -> bool {
    matches!(parse_date_time(input), Ok(Some(_)))
}

/// Strictly after `now`; equal is not future
pub fn is_future_date_time(date_time: NaiveDateTime, now: NaiveDateTime) -> bool {
    date_time > now
}

/// Strictly before `now`
pub fn is_past_date_time(date_time: NaiveDateTime, now: NaiveDateTime) -> bool {
    date_time < now
}

pub fn is_future_date(date: NaiveDate, today: NaiveDate) -> bool {
    date > today
}

pub fn is_past_date(date: NaiveDate, today: NaiveDate) -> bool {
    date < today
}

/// Whole years between `birth_date` and `today`
///
/// Returns 0 when the birth date lies in the future.
pub fn calculate_age(birth_date: NaiveDate, today: NaiveDate) -> u32 {
    let mut age = today.year() - birth_date.year();
    if (today.month(), today.day()) < (birth_date.month(), birth_date.day()) {
        age -= 1;
    }
    u32::try_from(age).unwrap_or(0)
}
