//! Day, month and year arithmetic.
//!
//! Every shift works on a scratch `Ymd` copy and returns `None` when the
//! result would fall outside years `MIN_YEAR..=MAX_YEAR`. A `CalendarDate` is
//! written only after the whole computation has succeeded, so a failed call
//! leaves it exactly as it was.

use crate::CalendarDate;
use crate::calendar::{days_in_month, days_in_year};
use crate::consts::{
    CENTURY_CYCLE, DAYS_IN_COMMON_YEAR, DAYS_PER_100_YEARS, DAYS_PER_400_YEARS, DAYS_PER_4_YEARS,
    DECEMBER, FEBRUARY, GREGORIAN_CYCLE, JANUARY, LEAP_YEAR_CYCLE, MAX_YEAR, MIN_YEAR,
    MONTHS_PER_YEAR,
};

/// Cycles stripped from large day deltas, longest first: (days, years)
const CYCLES: [(i32, i32); 3] = [
    (DAYS_PER_400_YEARS, GREGORIAN_CYCLE),
    (DAYS_PER_100_YEARS, CENTURY_CYCLE),
    (DAYS_PER_4_YEARS, LEAP_YEAR_CYCLE),
];

/// Scratch (year, month, day) triple
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Ymd {
    pub(crate) year: i32,
    pub(crate) month: i32,
    pub(crate) day: i32,
}

const fn in_year_range(year: i32) -> bool {
    year >= MIN_YEAR && year <= MAX_YEAR
}

/// Years a single `i32` day delta can cover at most
const MAX_YEAR_SPAN: i32 = i32::MAX / DAYS_IN_COMMON_YEAR + 1;

/// Whether some `i32` day delta could still bring `year` back into range.
const fn within_reach(year: i32) -> bool {
    year >= MIN_YEAR - MAX_YEAR_SPAN && year <= MAX_YEAR + MAX_YEAR_SPAN
}

/// Leap years in `1..=year`; differences stay exact for any pair of years.
const fn leap_years_through(year: i32) -> i32 {
    year.div_euclid(LEAP_YEAR_CYCLE) - year.div_euclid(CENTURY_CYCLE)
        + year.div_euclid(GREGORIAN_CYCLE)
}

/// Signed number of days from a date in `year`/`month` to the same month and
/// day `years` later. A leap day is crossed for each leap year from the start
/// year on when the date is on or before February, from the following year
/// otherwise.
const fn days_across_years(year: i32, month: i32, years: i32) -> i32 {
    let (first, last) = if years >= 0 {
        (year, year + years - 1)
    } else {
        (year + years, year - 1)
    };
    let (first, last) = if month > FEBRUARY {
        (first + 1, last + 1)
    } else {
        (first, last)
    };
    let leap_days = leap_years_through(last) - leap_years_through(first - 1);
    let span = years.abs() * DAYS_IN_COMMON_YEAR + leap_days;
    if years >= 0 { span } else { -span }
}

impl Ymd {
    pub(crate) fn shift_days(self, days: i32) -> Option<Self> {
        if days == 0 {
            return Some(self);
        }
        let Self {
            mut year,
            mut month,
            mut day,
        } = self;
        let mut days = days;

        if !within_reach(year) {
            return None;
        }

        // A stripped cycle may consume a day more or less than its nominal
        // length, leaving the scratch year one past either bound until the
        // walks below settle it.
        for (period, years_per_period) in CYCLES {
            if days >= period || days <= -period {
                let years = years_per_period * ((days - days % period) / period);
                days -= days_across_years(year, month, years);
                year += years;
            }
        }

        while days >= DAYS_IN_COMMON_YEAR {
            if year >= MAX_YEAR {
                return None;
            }
            days -= days_in_year(if month <= FEBRUARY { year } else { year + 1 });
            year += 1;
        }
        // Year 0 is allowed as scratch state here; the month walk may carry
        // the date back into year 1 and the final check rejects it otherwise.
        while days < 0 {
            if year < MIN_YEAR {
                return None;
            }
            days += days_in_year(if month <= FEBRUARY { year - 1 } else { year });
            year -= 1;
        }

        let mut month_len = days_in_month(year, month);
        while day + days > month_len {
            days -= month_len - day + 1;
            month += 1;
            if month > DECEMBER {
                month = JANUARY;
                year = year.checked_add(1)?;
                if year > MAX_YEAR {
                    return None;
                }
            }
            day = 1;
            month_len = days_in_month(year, month);
        }
        day += days;

        in_year_range(year).then_some(Self { year, month, day })
    }

    pub(crate) fn shift_months(self, months: i32) -> Option<Self> {
        if months == 0 {
            return Some(self);
        }
        let total = i64::from(self.month) + i64::from(months) - 1;
        let months_per_year = i64::from(MONTHS_PER_YEAR);
        let years = i32::try_from(total.div_euclid(months_per_year)).ok()?;
        let month = i32::try_from(total.rem_euclid(months_per_year)).ok()? + 1;
        Self { month, ..self }
            .shift_years(years)
            .map(Self::spill_day_overflow)
    }

    /// Moves the year only; the day may exceed the new month's length.
    pub(crate) fn shift_years(self, years: i32) -> Option<Self> {
        if years == 0 {
            return Some(self);
        }
        let year = self.year.checked_add(years)?;
        in_year_range(year).then_some(Self { year, ..self })
    }

    /// Days past the end of the month roll into the following month.
    pub(crate) const fn spill_day_overflow(self) -> Self {
        let month_len = days_in_month(self.year, self.month);
        if self.day > month_len {
            Self {
                month: self.month + 1,
                day: self.day - month_len,
                ..self
            }
        } else {
            self
        }
    }
}

impl CalendarDate {
    /// Moves the date by `days` days in either direction.
    ///
    /// Returns `false` and leaves the date unchanged when the result would
    /// fall outside 0001-01-01..=9999-12-31.
    pub fn add_days(&mut self, days: i32) -> bool {
        let shifted = self.ymd().shift_days(days);
        self.commit(shifted, "add_days", days)
    }

    /// Moves the date by `months` calendar months.
    ///
    /// A day that does not exist in the target month spills into the next
    /// one: 2021-01-31 plus one month is 2021-03-03. Returns `false` and
    /// leaves the date unchanged when the year would leave `1..=9999`.
    pub fn add_months(&mut self, months: i32) -> bool {
        let shifted = self.ymd().shift_months(months);
        self.commit(shifted, "add_months", months)
    }

    /// Moves the date by `years` years.
    ///
    /// February 29 moved into a common year becomes March 1, the same result
    /// as adding twelve months per year. Returns `false` and leaves the date
    /// unchanged when the year would leave `1..=9999`.
    pub fn add_years(&mut self, years: i32) -> bool {
        let shifted = self
            .ymd()
            .shift_years(years)
            .map(|ymd| if years == 0 { ymd } else { ymd.spill_day_overflow() });
        self.commit(shifted, "add_years", years)
    }

    fn commit(&mut self, shifted: Option<Ymd>, operation: &'static str, delta: i32) -> bool {
        match shifted {
            Some(ymd) => {
                self.set_ymd(ymd);
                true
            }
            None => {
                tracing::debug!(date = %self, operation, delta, "date arithmetic out of range");
                false
            }
        }
    }
}
