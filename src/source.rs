use crate::{CalendarDate, Clock, DateError, Local, SystemClock, TimeZone, Utc};

/// Every shape a `CalendarDate` can be built from.
///
/// Adapter layers that receive loosely typed constructor arguments map them
/// onto one of these variants and convert with `CalendarDate::try_from`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateSource {
    /// Today in local time
    Now,
    /// The day containing an epoch timestamp
    Timestamp { seconds: i64, utc: bool },
    /// Explicit fields, validated
    Fields {
        year: i32,
        month: i32,
        day: i32,
        utc: bool,
    },
    /// `YYYY-MM-DD` or `YYYYMMDD`, optionally followed by `Z`
    Text(String),
    /// A copy of an existing date
    Date(CalendarDate),
}

impl DateSource {
    /// Builds the date, reading the current time from `clock` and treating
    /// local time as `local`.
    ///
    /// # Errors
    /// Returns `DateError` when the fields, text or timestamp do not name a
    /// date in years 1..=9999.
    pub fn resolve_with<C: Clock, Z: TimeZone>(
        self,
        clock: &C,
        local: &Z,
    ) -> Result<CalendarDate, DateError> {
        match self {
            Self::Now => CalendarDate::now_in(clock, local),
            Self::Timestamp { seconds, utc: true } => {
                CalendarDate::from_timestamp_in(seconds, &Utc)
            }
            Self::Timestamp { seconds, utc: false } => {
                CalendarDate::from_timestamp_in(seconds, local)
            }
            Self::Fields {
                year,
                month,
                day,
                utc,
            } => CalendarDate::from_parts(year, month, day, utc),
            Self::Text(text) => text.parse(),
            Self::Date(date) => Ok(date),
        }
    }
}

impl TryFrom<DateSource> for CalendarDate {
    type Error = DateError;

    fn try_from(source: DateSource) -> Result<Self, Self::Error> {
        source.resolve_with(&SystemClock, &Local)
    }
}

impl From<CalendarDate> for DateSource {
    fn from(date: CalendarDate) -> Self {
        Self::Date(date)
    }
}

impl From<String> for DateSource {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for DateSource {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

impl From<(i32, i32, i32)> for DateSource {
    fn from((year, month, day): (i32, i32, i32)) -> Self {
        Self::Fields {
            year,
            month,
            day,
            utc: false,
        }
    }
}
