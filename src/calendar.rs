//! Calendar queries over plain `(year, month, day)` integers.
//!
//! None of these validate their input beyond what the result needs, so they
//! can be called with values that were never a `CalendarDate`.

use crate::consts::{
    CENTURY_CYCLE, DAYS_IN_COMMON_YEAR, DAYS_IN_LEAP_YEAR, DAYS_TO_MONTH_365, DAYS_TO_MONTH_366,
    DECEMBER, GREGORIAN_CYCLE, JANUARY, LEAP_YEAR_CYCLE, MAX_YEAR, MIN_YEAR,
};

/// Returns true for years divisible by 4, except centuries not divisible by 400
pub const fn is_leap_year(year: i32) -> bool {
    (year % LEAP_YEAR_CYCLE == 0 && year % CENTURY_CYCLE != 0) || (year % GREGORIAN_CYCLE == 0)
}

/// Cumulative days-before-month table for the given year
const fn days_to_month(year: i32) -> &'static [i32; 13] {
    if is_leap_year(year) {
        &DAYS_TO_MONTH_366
    } else {
        &DAYS_TO_MONTH_365
    }
}

/// Number of days in `month` of `year`, or 0 when `month` is not in `1..=12`
pub const fn days_in_month(year: i32, month: i32) -> i32 {
    if month < JANUARY || month > DECEMBER {
        return 0;
    }
    let days = days_to_month(year);
    days[month as usize] - days[month as usize - 1]
}

/// Number of days in `year` (365 or 366)
pub const fn days_in_year(year: i32) -> i32 {
    if is_leap_year(year) {
        DAYS_IN_LEAP_YEAR
    } else {
        DAYS_IN_COMMON_YEAR
    }
}

/// Returns true when the triple names a real date between 0001-01-01 and 9999-12-31
pub const fn is_valid_date(year: i32, month: i32, day: i32) -> bool {
    if year < MIN_YEAR || year > MAX_YEAR {
        return false;
    }
    let days = days_in_month(year, month);
    days > 0 && day > 0 && day <= days
}

/// Day of the week, 0 for Sunday through 6 for Saturday.
///
/// January and February count as months of the previous year, which puts the
/// leap day at the end of the shifted year.
pub const fn day_of_week(year: i32, month: i32, day: i32) -> i32 {
    let (year, month, day) = (year as i64, month as i64, day as i64);
    let (year, day) = if month < 3 {
        (year - 1, day + year)
    } else {
        (year, day + year - 2)
    };
    let weekday = (23 * month / 9) + day + 4 + year / 4 - year / 100 + year / 400;
    weekday.rem_euclid(7) as i32
}

/// One-based ordinal of the day within its year, or 0 when `month` is not in `1..=12`
pub const fn day_of_year(year: i32, month: i32, day: i32) -> i32 {
    if month < JANUARY || month > DECEMBER {
        return 0;
    }
    days_to_month(year)[month as usize - 1].saturating_add(day)
}
