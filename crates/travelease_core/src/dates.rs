//! Calendar-date helpers.
//!
//! # Invariants
//! - All trip dates are timezone-free `NaiveDate` values in `YYYY-MM-DD` form.
//! - Day arithmetic never consults a clock or a timezone, so itineraries cannot
//!   shift by one day around midnight or DST transitions.

use crate::model::validation::ValidationError;
use chrono::{Days, NaiveDate};

/// Wire and input format for every date field.
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses a required ISO calendar date from raw form input.
///
/// # Errors
/// - `ValidationError::InvalidDate` naming `field` when the value is not a
///   valid `YYYY-MM-DD` date.
pub fn parse_iso_date(field: &'static str, raw: &str) -> Result<NaiveDate, ValidationError> {
    let trimmed = raw.trim();
    NaiveDate::parse_from_str(trimmed, ISO_DATE_FORMAT).map_err(|_| {
        ValidationError::InvalidDate {
            field,
            value: trimmed.to_string(),
        }
    })
}

/// Formats a date as `2024-06-01`.
pub fn format_iso_date(date: NaiveDate) -> String {
    date.format(ISO_DATE_FORMAT).to_string()
}

/// Formats a date for display as `June 1, 2024`.
pub fn format_long_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// Number of calendar days from `start` to `end`, both included.
///
/// Returns 0 when `end` precedes `start`.
pub fn inclusive_day_count(start: NaiveDate, end: NaiveDate) -> u32 {
    let span = (end - start).num_days();
    if span < 0 {
        0
    } else {
        u32::try_from(span + 1).unwrap_or(u32::MAX)
    }
}

/// The calendar day after `date`, saturating at the maximum representable date.
pub fn next_day(date: NaiveDate) -> NaiveDate {
    date.checked_add_days(Days::new(1)).unwrap_or(date)
}
