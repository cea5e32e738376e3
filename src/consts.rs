/// Minimum valid year (inclusive)
pub const MIN_YEAR: i32 = 1;
/// Maximum valid year (inclusive)
pub const MAX_YEAR: i32 = 9999;

/// Month number for January
pub const JANUARY: i32 = 1;
/// Month number for February
pub const FEBRUARY: i32 = 2;
/// Month number for December
pub const DECEMBER: i32 = 12;
/// Months in a year
pub const MONTHS_PER_YEAR: i32 = 12;

/// Days in a common year
pub const DAYS_IN_COMMON_YEAR: i32 = 365;
/// Days in a leap year
pub const DAYS_IN_LEAP_YEAR: i32 = 366;

/// Days elapsed before the first of each month in a common year.
/// Index 0 is the start of January, index 12 the end of December.
#[rustfmt::skip]
pub const DAYS_TO_MONTH_365: [i32; 13] = [0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334, 365];
/// Days elapsed before the first of each month in a leap year.
#[rustfmt::skip]
pub const DAYS_TO_MONTH_366: [i32; 13] = [0, 31, 60, 91, 121, 152, 182, 213, 244, 274, 305, 335, 366];

/// Leap year occurs every 4 years
pub(crate) const LEAP_YEAR_CYCLE: i32 = 4;
/// Century years are not leap years unless...
pub(crate) const CENTURY_CYCLE: i32 = 100;
/// ...they are divisible by 400 (Gregorian calendar correction)
pub(crate) const GREGORIAN_CYCLE: i32 = 400;

/// Days in a full 400 year Gregorian cycle
pub(crate) const DAYS_PER_400_YEARS: i32 = 146_097;
/// Days in a 100 year span without a 400-divisible year
pub(crate) const DAYS_PER_100_YEARS: i32 = 36_524;
/// Days in a 4 year span with exactly one leap day
pub(crate) const DAYS_PER_4_YEARS: i32 = 1_461;

pub(crate) const SECONDS_PER_DAY: i64 = 86_400;
/// Days from 0000-03-01 to 1970-01-01 in the proleptic Gregorian calendar
pub(crate) const UNIX_EPOCH_SHIFT_DAYS: i64 = 719_468;

/// Date component separator in the extended format (`YYYY-MM-DD`)
pub const DATE_SEPARATOR: char = '-';
/// Suffix marking a date that is interpreted as UTC
pub const UTC_MARKER: char = 'Z';
