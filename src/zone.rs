//! Epoch conversion and the current-time source.
//!
//! `Utc` and `FixedOffset` are pure arithmetic. `Local` asks the operating
//! system, so its answers depend on the host time zone configuration (`TZ`
//! on Unix) and are only reproducible on an identically configured host.

use std::time::{SystemTime, UNIX_EPOCH};

use crate::DateError;
use crate::consts::{MONTHS_PER_YEAR, SECONDS_PER_DAY, UNIX_EPOCH_SHIFT_DAYS};

/// Converts between epoch seconds and calendar days.
pub trait TimeZone {
    /// Whether dates produced through this zone carry the UTC marker
    fn is_utc(&self) -> bool;

    /// Breaks `seconds` since the Unix epoch down to `(year, month, day)`,
    /// discarding the time of day.
    ///
    /// # Errors
    /// Returns `DateError` when the instant cannot be represented.
    fn civil_from_epoch(&self, seconds: i64) -> Result<(i32, i32, i32), DateError>;

    /// Epoch seconds at midnight starting the given day.
    ///
    /// Months outside `1..=12` carry into the year and days count on from the
    /// first of the month.
    ///
    /// # Errors
    /// Returns `DateError` when the host cannot convert the date.
    fn midnight_to_epoch(&self, year: i32, month: i32, day: i32) -> Result<i64, DateError>;
}

/// Source of the current instant.
pub trait Clock {
    /// Seconds since the Unix epoch
    fn now(&self) -> i64;
}

/// The system wall clock
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> i64 {
        match SystemTime::now().duration_since(UNIX_EPOCH) {
            Ok(elapsed) => i64::try_from(elapsed.as_secs()).unwrap_or(i64::MAX),
            Err(before) => {
                let seconds = before.duration().as_secs();
                // Round toward negative infinity so a fractional second
                // before the epoch stays on the earlier day.
                let seconds = if before.duration().subsec_nanos() > 0 {
                    seconds.saturating_add(1)
                } else {
                    seconds
                };
                i64::try_from(seconds).map_or(i64::MIN, |s| -s)
            }
        }
    }
}

/// Coordinated Universal Time
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Utc;

impl TimeZone for Utc {
    fn is_utc(&self) -> bool {
        true
    }

    fn civil_from_epoch(&self, seconds: i64) -> Result<(i32, i32, i32), DateError> {
        civil_from_days(seconds.div_euclid(SECONDS_PER_DAY))
            .ok_or(DateError::TimestampOutOfRange { seconds })
    }

    fn midnight_to_epoch(&self, year: i32, month: i32, day: i32) -> Result<i64, DateError> {
        Ok(days_from_civil(year, month, day) * SECONDS_PER_DAY)
    }
}

/// A zone at a constant offset from UTC, without daylight saving
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct FixedOffset {
    east_seconds: i32,
}

impl FixedOffset {
    /// Offset of `seconds` east of Greenwich (UTC+01:00 is `east(3600)`)
    pub const fn east(seconds: i32) -> Self {
        Self {
            east_seconds: seconds,
        }
    }

    /// Offset of `seconds` west of Greenwich (UTC-05:00 is `west(18000)`)
    pub const fn west(seconds: i32) -> Self {
        Self {
            east_seconds: seconds.saturating_neg(),
        }
    }

    /// Seconds east of Greenwich
    pub const fn offset_seconds(self) -> i32 {
        self.east_seconds
    }
}

impl TimeZone for FixedOffset {
    /// Dates in a fixed offset are local dates, even at offset zero.
    fn is_utc(&self) -> bool {
        false
    }

    fn civil_from_epoch(&self, seconds: i64) -> Result<(i32, i32, i32), DateError> {
        let shifted = seconds
            .checked_add(i64::from(self.east_seconds))
            .ok_or(DateError::TimestampOutOfRange { seconds })?;
        civil_from_days(shifted.div_euclid(SECONDS_PER_DAY))
            .ok_or(DateError::TimestampOutOfRange { seconds })
    }

    fn midnight_to_epoch(&self, year: i32, month: i32, day: i32) -> Result<i64, DateError> {
        Ok(days_from_civil(year, month, day) * SECONDS_PER_DAY - i64::from(self.east_seconds))
    }
}

/// The host's local time zone.
///
/// Uses `localtime_r` and `mktime` on Unix. Other targets have no host
/// conversion wired up and fall back to UTC arithmetic.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Local;

impl TimeZone for Local {
    fn is_utc(&self) -> bool {
        false
    }

    fn civil_from_epoch(&self, seconds: i64) -> Result<(i32, i32, i32), DateError> {
        host::civil_from_epoch(seconds)
    }

    fn midnight_to_epoch(&self, year: i32, month: i32, day: i32) -> Result<i64, DateError> {
        host::midnight_to_epoch(year, month, day)
    }
}

/// Days since 1970-01-01 for the given civil date.
pub(crate) fn days_from_civil(year: i32, month: i32, day: i32) -> i64 {
    let months_per_year = i64::from(MONTHS_PER_YEAR);
    let months = i64::from(year) * months_per_year + i64::from(month) - 1;
    let (year, month) = (
        months.div_euclid(months_per_year),
        months.rem_euclid(months_per_year) + 1,
    );
    // Years start in March so the leap day is the last day of the year.
    let y = if month <= 2 { year - 1 } else { year };
    let era = y.div_euclid(400);
    let yoe = y - era * 400; // year of era
    let mp = (month + 9) % 12; // March = 0
    let doy = (153 * mp + 2) / 5; // first of the month
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy; // day of era
    era * 146_097 + doe - UNIX_EPOCH_SHIFT_DAYS + i64::from(day) - 1
}

/// Civil date for a count of days since 1970-01-01, `None` when the year
/// does not fit in an `i32`.
pub(crate) fn civil_from_days(days: i64) -> Option<(i32, i32, i32)> {
    let z = days.checked_add(UNIX_EPOCH_SHIFT_DAYS)?;
    let era = z.div_euclid(146_097);
    let doe = z - era * 146_097; // day of era
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365; // year of era
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100); // day of year, from March
    let mp = (5 * doy + 2) / 153;
    let day = doy - (153 * mp + 2) / 5 + 1;
    let month = if mp < 10 { mp + 3 } else { mp - 9 };
    let year = yoe + era * 400 + i64::from(month <= 2);
    Some((
        i32::try_from(year).ok()?,
        i32::try_from(month).ok()?,
        i32::try_from(day).ok()?,
    ))
}

#[cfg(unix)]
mod host {
    use crate::DateError;

    const TM_YEAR_BASE: i32 = 1900;

    fn blank_tm() -> libc::tm {
        // SAFETY: `libc::tm` is a plain C struct of integers and, on some
        // targets, a nullable pointer; all-zero is a valid value.
        unsafe { std::mem::zeroed() }
    }

    // `time_t` is 32 bits on some targets and 64 on others.
    #[allow(clippy::useless_conversion, clippy::unnecessary_fallible_conversions)]
    pub(super) fn civil_from_epoch(seconds: i64) -> Result<(i32, i32, i32), DateError> {
        let timer = libc::time_t::try_from(seconds)
            .map_err(|_| DateError::TimestampOutOfRange { seconds })?;
        let mut tm = blank_tm();
        // SAFETY: both pointers refer to live locals for the whole call.
        let result = unsafe { libc::localtime_r(&timer, &mut tm) };
        if result.is_null() {
            let error = std::io::Error::last_os_error();
            tracing::warn!(seconds, %error, "localtime_r failed");
            return Err(DateError::LocalTime(error.to_string()));
        }
        let year = tm
            .tm_year
            .checked_add(TM_YEAR_BASE)
            .ok_or(DateError::TimestampOutOfRange { seconds })?;
        Ok((year, tm.tm_mon + 1, tm.tm_mday))
    }

    #[allow(clippy::useless_conversion)]
    pub(super) fn midnight_to_epoch(year: i32, month: i32, day: i32) -> Result<i64, DateError> {
        let invalid = || DateError::InvalidDate { year, month, day };
        let mut tm = blank_tm();
        tm.tm_year = year.checked_sub(TM_YEAR_BASE).ok_or_else(invalid)?;
        tm.tm_mon = month.checked_sub(1).ok_or_else(invalid)?;
        tm.tm_mday = day;
        tm.tm_isdst = -1;
        // SAFETY: `tm` is a live, fully initialized local.
        let timer = unsafe { libc::mktime(&mut tm) };
        // Assumes local midnight is never exactly one second before the
        // epoch. That would take a UTC offset of +00:00:01, so -1 is read as
        // the error sentinel.
        if timer == -1 {
            let error = std::io::Error::last_os_error();
            tracing::warn!(year, month, day, %error, "mktime failed");
            return Err(DateError::LocalTime(error.to_string()));
        }
        Ok(i64::from(timer))
    }
}

#[cfg(not(unix))]
mod host {
    use super::{TimeZone, Utc};
    use crate::DateError;

    pub(super) fn civil_from_epoch(seconds: i64) -> Result<(i32, i32, i32), DateError> {
        tracing::warn!("no host time zone support on this target, using UTC");
        Utc.civil_from_epoch(seconds)
    }

    pub(super) fn midnight_to_epoch(year: i32, month: i32, day: i32) -> Result<i64, DateError> {
        tracing::warn!("no host time zone support on this target, using UTC");
        Utc.midnight_to_epoch(year, month, day)
    }
}
