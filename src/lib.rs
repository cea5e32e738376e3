mod arithmetic;
mod calendar;
mod consts;
mod prelude;
mod source;
mod types;
mod zone;

pub use calendar::{
    day_of_week, day_of_year, days_in_month, days_in_year, is_leap_year, is_valid_date,
};
pub use consts::*;
pub use source::DateSource;
pub use types::{DateFormat, Weekday};
pub use zone::{Clock, FixedOffset, Local, SystemClock, TimeZone, Utc};

use arithmetic::Ymd;
use std::fmt;
use std::str::FromStr;

/// A proleptic Gregorian calendar date between 0001-01-01 and 9999-12-31.
///
/// The `utc` flag only records how the date is rendered and converted to a
/// timestamp; it plays no part in validity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarDate {
    year: i32,
    month: i32,
    day: i32,
    utc: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DateError {
    /// The fields do not name a real date in years 1..=9999.
    #[error("invalid date: {year:04}-{month:02}-{day:02}")]
    InvalidDate { year: i32, month: i32, day: i32 },

    /// Text that is not `YYYY-MM-DD` or `YYYYMMDD`, optionally followed by `Z`.
    #[error("invalid date format: {0}")]
    InvalidFormat(String),

    /// The instant falls outside the representable years.
    #[error("timestamp {seconds} is outside years {}-{}", MIN_YEAR, MAX_YEAR)]
    TimestampOutOfRange { seconds: i64 },

    /// The host could not convert to or from local time.
    #[error("local time conversion failed: {0}")]
    LocalTime(String),
}

impl CalendarDate {
    /// Creates a local (non-UTC) date
    ///
    /// # Errors
    /// Returns `DateError::InvalidDate` unless `is_valid_date(year, month, day)`.
    pub const fn new(year: i32, month: i32, day: i32) -> Result<Self, DateError> {
        Self::from_parts(year, month, day, false)
    }

    /// Creates a date with an explicit UTC flag
    ///
    /// # Errors
    /// Returns `DateError::InvalidDate` unless `is_valid_date(year, month, day)`.
    pub const fn from_parts(year: i32, month: i32, day: i32, utc: bool) -> Result<Self, DateError> {
        if !is_valid_date(year, month, day) {
            return Err(DateError::InvalidDate { year, month, day });
        }
        Ok(Self {
            year,
            month,
            day,
            utc,
        })
    }

    /// The day containing `seconds` since the Unix epoch, in UTC or host local time
    ///
    /// # Errors
    /// Returns `DateError` when the day is outside years 1..=9999 or the host
    /// cannot break the instant down.
    pub fn from_timestamp(seconds: i64, utc: bool) -> Result<Self, DateError> {
        if utc {
            Self::from_timestamp_in(seconds, &Utc)
        } else {
            Self::from_timestamp_in(seconds, &Local)
        }
    }

    /// The day containing `seconds` since the Unix epoch in `zone`
    ///
    /// # Errors
    /// Returns `DateError` when the day is outside years 1..=9999 or the zone
    /// cannot break the instant down.
    pub fn from_timestamp_in<Z: TimeZone>(seconds: i64, zone: &Z) -> Result<Self, DateError> {
        let (year, month, day) = zone.civil_from_epoch(seconds)?;
        if !is_valid_date(year, month, day) {
            return Err(DateError::TimestampOutOfRange { seconds });
        }
        Ok(Self {
            year,
            month,
            day,
            utc: zone.is_utc(),
        })
    }

    /// Today in the host's local time zone
    ///
    /// # Errors
    /// Returns `DateError::LocalTime` when the host conversion fails.
    pub fn now() -> Result<Self, DateError> {
        Self::now_in(&SystemClock, &Local)
    }

    /// Today according to `clock`, in `zone`
    ///
    /// # Errors
    /// Returns `DateError` when the zone cannot break the instant down.
    pub fn now_in<C: Clock, Z: TimeZone>(clock: &C, zone: &Z) -> Result<Self, DateError> {
        Self::from_timestamp_in(clock.now(), zone)
    }

    /// Returns the year
    pub const fn year(&self) -> i32 {
        self.year
    }

    /// Returns the month (1..=12)
    pub const fn month(&self) -> i32 {
        self.month
    }

    /// Returns the day of the month
    pub const fn day(&self) -> i32 {
        self.day
    }

    /// Returns whether the date is interpreted as UTC
    pub const fn is_utc(&self) -> bool {
        self.utc
    }

    /// Returns (year, month, day)
    pub const fn to_ymd(&self) -> (i32, i32, i32) {
        (self.year, self.month, self.day)
    }

    /// Sets the year without checking it against the month and day
    pub const fn set_year(&mut self, year: i32) {
        self.year = year;
    }

    /// Sets the month without checking it against the year and day
    pub const fn set_month(&mut self, month: i32) {
        self.month = month;
    }

    /// Sets the day without checking it against the year and month
    pub const fn set_day(&mut self, day: i32) {
        self.day = day;
    }

    /// Sets whether the date is interpreted as UTC
    pub const fn set_utc(&mut self, utc: bool) {
        self.utc = utc;
    }

    /// Day of the week, 0 for Sunday through 6 for Saturday
    pub const fn day_of_week(&self) -> i32 {
        day_of_week(self.year, self.month, self.day)
    }

    /// One-based day of the year
    pub const fn day_of_year(&self) -> i32 {
        day_of_year(self.year, self.month, self.day)
    }

    /// Day of the week as a `Weekday`
    pub fn weekday(&self) -> Weekday {
        // day_of_week is always in 0..7
        Weekday::from_index(self.day_of_week()).unwrap_or(Weekday::Sunday)
    }

    /// Epoch seconds at the start of this day, in UTC or host local time per the UTC flag
    ///
    /// # Errors
    /// Returns `DateError::LocalTime` when the host conversion fails.
    pub fn timestamp(&self) -> Result<i64, DateError> {
        if self.utc {
            self.timestamp_in(&Utc)
        } else {
            self.timestamp_in(&Local)
        }
    }

    /// Epoch seconds at the start of this day in `zone`, ignoring the UTC flag
    ///
    /// # Errors
    /// Returns `DateError` when the zone cannot convert the date.
    pub fn timestamp_in<Z: TimeZone>(&self, zone: &Z) -> Result<i64, DateError> {
        let seconds = zone.midnight_to_epoch(self.year, self.month, self.day)?;
        tracing::trace!(date = %self, seconds, "converted date to timestamp");
        Ok(seconds)
    }

    /// Renders the date in `style`, with a trailing `Z` for UTC dates
    pub fn format(&self, style: DateFormat) -> String {
        self.display(style).to_string()
    }

    /// A `Display` adapter rendering the date in `style`
    pub const fn display(&self, style: DateFormat) -> FormattedDate<'_> {
        FormattedDate { date: self, style }
    }

    pub(crate) const fn ymd(&self) -> Ymd {
        Ymd {
            year: self.year,
            month: self.month,
            day: self.day,
        }
    }

    pub(crate) const fn set_ymd(&mut self, ymd: Ymd) {
        self.year = ymd.year;
        self.month = ymd.month;
        self.day = ymd.day;
    }
}

/// A `CalendarDate` paired with the layout to render it in
#[derive(Debug, Clone, Copy)]
pub struct FormattedDate<'a> {
    date: &'a CalendarDate,
    style: DateFormat,
}

impl fmt::Display for FormattedDate<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let CalendarDate {
            year,
            month,
            day,
            utc,
        } = *self.date;
        match self.style {
            DateFormat::Extended => write!(
                f,
                "{year:04}{DATE_SEPARATOR}{month:02}{DATE_SEPARATOR}{day:02}"
            )?,
            DateFormat::Basic => write!(f, "{year:04}{month:02}{day:02}")?,
        }
        if utc {
            write!(f, "{UTC_MARKER}")?;
        }
        Ok(())
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.display(DateFormat::Extended).fmt(f)
    }
}

impl FromStr for CalendarDate {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(DateError::InvalidFormat("empty date string".to_owned()));
        }

        let (body, utc) = match trimmed.strip_suffix(UTC_MARKER) {
            Some(body) => (body, true),
            None => (trimmed, false),
        };

        let (year, month, day) = if body.contains(DATE_SEPARATOR) {
            Self::parse_extended(body)?
        } else {
            Self::parse_basic(body)?
        };

        Self::from_parts(year, month, day, utc)
    }
}

impl CalendarDate {
    /// `YYYY-MM-DD`
    fn parse_extended(body: &str) -> Result<(i32, i32, i32), DateError> {
        let parts: Vec<&str> = body.split(DATE_SEPARATOR).collect();
        match parts.as_slice() {
            [year, month, day] if year.len() == 4 && month.len() == 2 && day.len() == 2 => Ok((
                Self::parse_field(year)?,
                Self::parse_field(month)?,
                Self::parse_field(day)?,
            )),
            _ => Err(DateError::InvalidFormat(body.to_owned())),
        }
    }

    /// `YYYYMMDD`
    fn parse_basic(body: &str) -> Result<(i32, i32, i32), DateError> {
        if body.len() != 8 || !body.is_ascii() {
            return Err(DateError::InvalidFormat(body.to_owned()));
        }
        Ok((
            Self::parse_field(&body[..4])?,
            Self::parse_field(&body[4..6])?,
            Self::parse_field(&body[6..])?,
        ))
    }

    /// Digits only; `str::parse` alone would also take a sign.
    fn parse_field(s: &str) -> Result<i32, DateError> {
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(DateError::InvalidFormat(s.to_owned()));
        }
        s.parse::<i32>()
            .map_err(|_| DateError::InvalidFormat(s.to_owned()))
    }
}

impl serde::Serialize for CalendarDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for CalendarDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_valid() {
        let date = CalendarDate::new(2024, 2, 29).unwrap();
        assert_eq!(date.year(), 2024);
        assert_eq!(date.month(), 2);
        assert_eq!(date.day(), 29);
        assert!(!date.is_utc());
    }

    #[test]
    fn test_new_invalid() {
        assert_eq!(
            CalendarDate::new(2023, 2, 29),
            Err(DateError::InvalidDate {
                year: 2023,
                month: 2,
                day: 29
            })
        );
        assert!(CalendarDate::new(0, 1, 1).is_err());
        assert!(CalendarDate::new(10000, 1, 1).is_err());
        assert!(CalendarDate::new(2024, 13, 1).is_err());
        assert!(CalendarDate::new(2024, 4, 31).is_err());
        assert!(CalendarDate::new(2024, 1, 0).is_err());
    }

    #[test]
    fn test_from_parts_sets_utc() {
        let date = CalendarDate::from_parts(1991, 8, 15, true).unwrap();
        assert!(date.is_utc());
        assert_eq!(date.to_ymd(), (1991, 8, 15));
    }

    #[test]
    fn test_copy_is_independent() {
        let original = CalendarDate::new(2024, 1, 31).unwrap();
        let mut copy = original;
        assert!(copy.add_days(1));
        assert_eq!(original.to_ymd(), (2024, 1, 31));
        assert_eq!(copy.to_ymd(), (2024, 2, 1));
    }

    #[test]
    fn test_from_timestamp_utc() {
        // 2021-01-31T23:59:59Z
        let date = CalendarDate::from_timestamp(1_612_137_599, true).unwrap();
        assert_eq!(date.to_ymd(), (2021, 1, 31));
        assert!(date.is_utc());

        let epoch = CalendarDate::from_timestamp(0, true).unwrap();
        assert_eq!(epoch.to_ymd(), (1970, 1, 1));
    }

    #[test]
    fn test_from_timestamp_out_of_range() {
        // 10000-01-01T00:00:00Z
        let result = CalendarDate::from_timestamp(253_402_300_800, true);
        assert_eq!(
            result,
            Err(DateError::TimestampOutOfRange {
                seconds: 253_402_300_800
            })
        );
        assert!(CalendarDate::from_timestamp(253_402_300_799, true).is_ok());
        assert!(CalendarDate::from_timestamp(i64::MIN, true).is_err());
    }

    #[test]
    fn test_from_timestamp_in_fixed_offset() {
        let zone = FixedOffset::east(9 * 3600);
        let date = CalendarDate::from_timestamp_in(1_612_123_200, &zone).unwrap();
        assert_eq!(date.to_ymd(), (2021, 2, 1));
        assert!(!date.is_utc());
    }

    #[test]
    fn test_from_timestamp_local_is_not_utc() {
        let date = CalendarDate::from_timestamp(1_700_000_000, false).unwrap();
        assert!(!date.is_utc());
        assert!(is_valid_date(date.year(), date.month(), date.day()));
    }

    #[test]
    fn test_now_in_uses_clock() {
        struct Fixed(i64);
        impl Clock for Fixed {
            fn now(&self) -> i64 {
                self.0
            }
        }

        let date = CalendarDate::now_in(&Fixed(951_782_400), &Utc).unwrap();
        assert_eq!(date.to_ymd(), (2000, 2, 29));
        assert!(date.is_utc());
    }

    #[test]
    fn test_now_is_local() {
        let date = CalendarDate::now().unwrap();
        assert!(!date.is_utc());
        assert!(date.year() >= 2020);
    }

    #[test]
    fn test_setters_bypass_validation() {
        let mut date = CalendarDate::new(2024, 1, 31).unwrap();
        date.set_month(2);
        assert_eq!(date.to_ymd(), (2024, 2, 31));
        date.set_year(2023);
        date.set_day(1);
        date.set_utc(true);
        assert_eq!(date.to_string(), "2023-02-01Z");
    }

    #[test]
    fn test_format_styles() {
        let local = CalendarDate::new(1991, 8, 5).unwrap();
        assert_eq!(local.format(DateFormat::Extended), "1991-08-05");
        assert_eq!(local.format(DateFormat::Basic), "19910805");
        assert_eq!(local.to_string(), "1991-08-05");

        let utc = CalendarDate::from_parts(7, 1, 2, true).unwrap();
        assert_eq!(utc.format(DateFormat::Extended), "0007-01-02Z");
        assert_eq!(utc.format(DateFormat::Basic), "00070102Z");
    }

    #[test]
    fn test_timestamp_utc_is_midnight() {
        let date = CalendarDate::from_parts(2021, 2, 1, true).unwrap();
        assert_eq!(date.timestamp(), Ok(1_612_137_600));

        let date = CalendarDate::from_timestamp(1_612_180_000, true).unwrap();
        assert_eq!(date.timestamp(), Ok(1_612_137_600));
    }

    #[test]
    fn test_timestamp_in_fixed_offset() {
        let date = CalendarDate::new(1970, 1, 2).unwrap();
        assert_eq!(date.timestamp_in(&FixedOffset::east(3600)), Ok(86_400 - 3600));
        assert_eq!(date.timestamp_in(&FixedOffset::west(3600)), Ok(86_400 + 3600));
    }

    #[test]
    fn test_timestamp_local_round_trip() {
        let date = CalendarDate::new(2024, 7, 4).unwrap();
        let seconds = date.timestamp().unwrap();
        assert_eq!(CalendarDate::from_timestamp(seconds, false), Ok(date));
    }

    #[test]
    fn test_day_queries() {
        let date = CalendarDate::new(2000, 1, 1).unwrap();
        assert_eq!(date.day_of_week(), 6);
        assert_eq!(date.weekday(), Weekday::Saturday);
        assert_eq!(date.day_of_year(), 1);

        let date = CalendarDate::new(2024, 12, 31).unwrap();
        assert_eq!(date.day_of_year(), 366);
        assert_eq!(date.weekday(), Weekday::Tuesday);
    }

    #[test]
    fn test_parse_extended_and_basic() {
        let date = "1991-08-15".parse::<CalendarDate>().unwrap();
        assert_eq!(date, CalendarDate::new(1991, 8, 15).unwrap());

        let date = "19910815".parse::<CalendarDate>().unwrap();
        assert_eq!(date, CalendarDate::new(1991, 8, 15).unwrap());

        let date = " 2024-02-29Z ".parse::<CalendarDate>().unwrap();
        assert_eq!(date, CalendarDate::from_parts(2024, 2, 29, true).unwrap());
    }

    #[test]
    fn test_parse_invalid_format() {
        for input in [
            "",
            "1991",
            "1991-08",
            "1991-8-15",
            "1991/08/15",
            "1991-08-15-01",
            "+991-08-15",
            "1991081",
            "199108155",
            "1991-08-XX",
            "ZZ",
        ] {
            let result = input.parse::<CalendarDate>();
            assert!(
                matches!(result, Err(DateError::InvalidFormat(_))),
                "{input:?} gave {result:?}"
            );
        }
    }

    #[test]
    fn test_parse_invalid_date() {
        assert_eq!(
            "2023-02-29".parse::<CalendarDate>(),
            Err(DateError::InvalidDate {
                year: 2023,
                month: 2,
                day: 29
            })
        );
        assert!(matches!(
            "00000101".parse::<CalendarDate>(),
            Err(DateError::InvalidDate { .. })
        ));
    }

    #[test]
    fn test_display_parse_round_trip() {
        for date in [
            CalendarDate::new(1, 1, 1).unwrap(),
            CalendarDate::from_parts(9999, 12, 31, true).unwrap(),
        ] {
            assert_eq!(date.to_string().parse::<CalendarDate>(), Ok(date));
            assert_eq!(
                date.format(DateFormat::Basic).parse::<CalendarDate>(),
                Ok(date)
            );
        }
    }

    #[test]
    fn test_serde_string_format() {
        let date = CalendarDate::from_parts(2024, 2, 29, true).unwrap();
        let json = serde_json::to_string(&date).unwrap();
        assert_eq!(json, r#""2024-02-29Z""#);
        let parsed: CalendarDate = serde_json::from_str(&json).unwrap();
        assert_eq!(date, parsed);
    }

    #[test]
    fn test_serde_validation() {
        let result: Result<CalendarDate, _> = serde_json::from_str(r#""2023-02-29""#);
        assert!(result.is_err());

        let result: Result<CalendarDate, _> = serde_json::from_str(r#""2024-13-01""#);
        assert!(result.is_err());

        let result: Result<CalendarDate, _> = serde_json::from_str("20240101");
        assert!(result.is_err());
    }

    #[test]
    fn test_ordering() {
        let a = CalendarDate::new(2023, 12, 31).unwrap();
        let b = CalendarDate::new(2024, 1, 1).unwrap();
        let c = CalendarDate::new(2024, 1, 2).unwrap();
        assert!(a < b);
        assert!(b < c);
    }

    #[test]
    fn test_error_messages() {
        let err = DateError::InvalidDate {
            year: 2023,
            month: 2,
            day: 29,
        };
        assert_eq!(err.to_string(), "invalid date: 2023-02-29");

        let err = DateError::TimestampOutOfRange { seconds: -1 };
        assert_eq!(err.to_string(), "timestamp -1 is outside years 1-9999");
    }

    #[test]
    fn test_constants() {
        assert_eq!(MIN_YEAR, 1);
        assert_eq!(MAX_YEAR, 9999);
    }
}
