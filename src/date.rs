//! Due-date validation and ordering.
//!
//! Due dates travel as plain `YYYY-MM-DD` strings; the empty string means
//! "no due date". Calendar checks go through [`chrono::NaiveDate`], which
//! applies the proleptic Gregorian leap-year rule.

use crate::format::{MAX_YEAR, MIN_YEAR, NO_DUE_KEY};
use chrono::NaiveDate;

/// Returns `true` if `s` is empty or a real calendar date in `YYYY-MM-DD` form
/// with a year between 1900 and 2100.
///
/// # Examples
///
/// ```rust
/// use todo_tactician::date::is_valid_due;
///
/// assert!(is_valid_due(""));
/// assert!(is_valid_due("2000-02-29"));
/// assert!(!is_valid_due("1900-02-29"));
/// assert!(!is_valid_due("2025-2-3"));
/// ```
#[must_use]
pub fn is_valid_due(s: &str) -> bool {
    s.is_empty() || parse_due(s).is_some()
}

/// Parses a non-empty due date, returning `None` if it is malformed or out of range.
#[must_use]
pub fn parse_due(s: &str) -> Option<NaiveDate> {
    let (year, month, day) = split_fields(s)?;
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return None;
    }
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Encodes a due date as the integer `YYYYMMDD` for ordering.
///
/// The empty date maps to `99991231`, after every valid date. The string is
/// assumed to have passed [`is_valid_due`]; malformed input also maps to the
/// "no date" key.
#[must_use]
pub fn due_key(s: &str) -> u32 {
    match split_fields(s) {
        Some((year, month, day)) => year as u32 * 10_000 + month * 100 + day,
        None => NO_DUE_KEY,
    }
}

// Strict `DDDD-DD-DD`: chrono's `%Y-%m-%d` would also take unpadded fields.
fn split_fields(s: &str) -> Option<(i32, u32, u32)> {
    let bytes = s.as_bytes();
    if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
        return None;
    }
    let digits_ok = bytes
        .iter()
        .enumerate()
        .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit());
    if !digits_ok {
        return None;
    }
    let year = s[0..4].parse().ok()?;
    let month = s[5..7].parse().ok()?;
    let day = s[8..10].parse().ok()?;
    Some((year, month, day))
}
