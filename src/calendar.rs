//! Calendar arithmetic for the daily projection
//!
//! All dates are timezone-free `NaiveDate`s. Day counts are signed so callers
//! can detect a death date that lies before today.

use chrono::{Datelike, Duration, NaiveDate};

/// Gregorian leap year rule
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in a calendar year (365 or 366)
pub fn days_in_year(year: i32) -> u32 {
    if is_leap_year(year) { 366 } else { 365 }
}

/// Whole days from `from` to `to` (negative when `to` is earlier)
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}

pub fn add_days(date: NaiveDate, days: i64) -> NaiveDate {
    date + Duration::days(days)
}

/// Same month and day `years` later.
///
/// A 29 February that lands in a non-leap year rolls forward to 1 March.
pub fn add_years(date: NaiveDate, years: i32) -> NaiveDate {
    let target = date.year() + years;
    date.with_year(target).unwrap_or_else(|| {
        NaiveDate::from_ymd_opt(target, 3, 1).unwrap_or(date)
    })
}

/// Age in whole years on `as_of`
pub fn age_at(date_of_birth: NaiveDate, as_of: NaiveDate) -> i32 {
    let mut age = as_of.year() - date_of_birth.year();
    let before_birthday =
        (as_of.month(), as_of.day()) < (date_of_birth.month(), date_of_birth.day());
    if before_birthday {
        age -= 1;
    }
    age
}

/// Last simulated day: the day before the `death_age + 1` birthday
pub fn death_date(date_of_birth: NaiveDate, death_age: u32) -> NaiveDate {
    add_days(add_years(date_of_birth, death_age as i32 + 1), -1)
}

/// ISO weekday number, Monday = 1 through Sunday = 7
pub fn weekday_number(date: NaiveDate) -> u32 {
    date.weekday().number_from_monday()
}
