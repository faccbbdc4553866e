//! Time and calendar helpers
//!
//! Month/year validation and calendar math happen at the API and engine
//! layers; repositories only see already-validated integers.

use chrono::{Datelike, NaiveDate};

use super::{AppError, AppResult};

/// Current Unix timestamp in milliseconds
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Validate month is in [1, 12]
pub fn validate_month(month: u32) -> AppResult<()> {
    if !(1..=12).contains(&month) {
        return Err(AppError::validation(format!(
            "Month must be between 1 and 12, got {}",
            month
        )));
    }
    Ok(())
}

/// Validate year is plausible (>= 1900)
pub fn validate_year(year: i32) -> AppResult<()> {
    if year < 1900 {
        return Err(AppError::validation(format!(
            "Year must be 1900 or later, got {}",
            year
        )));
    }
    Ok(())
}

/// Number of days in a calendar month (Gregorian, leap-year aware)
///
/// Callers must validate `month` first; an invalid month falls back to 31
/// rather than panicking.
pub fn days_in_month(month: u32, year: i32) -> u32 {
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return 31;
    };
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    match next {
        Some(next) => (next - first).num_days() as u32,
        None => 31,
    }
}

/// English month name for export headers and filenames
pub fn month_name(month: u32) -> &'static str {
    match month {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        12 => "December",
        _ => "Unknown",
    }
}

/// Reject a (month, year) strictly after `today`'s month
pub fn ensure_not_future_at(month: u32, year: i32, today: NaiveDate) -> AppResult<()> {
    if year > today.year() || (year == today.year() && month > today.month()) {
        return Err(AppError::validation(format!(
            "Cannot export future month {}/{}",
            month, year
        )));
    }
    Ok(())
}

/// Reject a (month, year) strictly in the future relative to wall-clock now
pub fn ensure_not_future(month: u32, year: i32) -> AppResult<()> {
    ensure_not_future_at(month, year, chrono::Local::now().date_naive())
}
