use super::*;
use crate::cast::{DateCastError, date_format_error};
use crate::date_parser::DateParser;
use std::str::FromStr;
use strata_common::error::Error;

const DAYS_TO_MONTH_365: [i32; 13] = [0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334, 365];
const DAYS_TO_MONTH_366: [i32; 13] = [0, 31, 60, 91, 121, 152, 182, 213, 244, 274, 305, 335, 366];

/// A calendar date stored as the number of days since 1970-01-01.
///
/// Two reserved values, [`Date::INFINITY`] and [`Date::NEG_INFINITY`], stand for
/// dates later and earlier than any finite date. They are ordinary values of the
/// `i32` domain and compare accordingly.
///
/// # Examples
/// ```rust
/// # use strata_datetime::Date;
/// let date = Date::from_ymd(2024, 1, 15).unwrap();
/// assert_eq!(date.to_ymd(), (2024, 1, 15));
/// assert_eq!(date.to_string(), "2024-01-15");
/// ```
#[derive(Copy, Clone, Default, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
#[repr(C)]
pub struct Date {
    days: i32,
}

impl Date {
    pub const INFINITY: Date = Date { days: i32::MAX };
    pub const NEG_INFINITY: Date = Date { days: -i32::MAX };
    pub const EPOCH: Date = Date { days: 0 };

    /// Smallest year of a finite date (5877642 BC).
    pub const MIN_YEAR: i32 = -5877641;
    /// Largest year of a finite date.
    pub const MAX_YEAR: i32 = 5881580;

    pub const fn from_days(days: i32) -> Date {
        Date { days }
    }

    pub const fn days(&self) -> i32 {
        self.days
    }

    pub const fn is_finite(&self) -> bool {
        self.days != i32::MAX && self.days != -i32::MAX
    }

    /// Builds a date from calendar fields, returning `None` if any field is out
    /// of range or the day count would collide with a sentinel.
    pub fn try_from_ymd(year: i32, month: i32, day: i32) -> Option<Date> {
        if !Self::is_valid(year, month, day) {
            return None;
        }
        let days = days_from_civil(year, month, day);
        let days = i32::try_from(days).ok()?;
        let date = Date { days };
        date.is_finite().then_some(date)
    }

    pub fn from_ymd(year: i32, month: i32, day: i32) -> strata_common::Result<Date> {
        Self::try_from_ymd(year, month, day)
            .ok_or_else(|| Error::conversion(format!("Date out of range: {year}-{month}-{day}")))
    }

    /// Returns `(year, month, day)`. Years before 1 AD are zero or negative
    /// (year 0 is 1 BC).
    ///
    /// Sentinels decompose like the extreme day counts they are stored as.
    pub fn to_ymd(&self) -> (i32, i32, i32) {
        civil_from_days(self.days as i64)
    }

    pub fn is_valid(year: i32, month: i32, day: i32) -> bool {
        if day < 1 || !(Self::MIN_YEAR..=Self::MAX_YEAR).contains(&year) {
            return false;
        }
        if Self::days_in_month(year, month).is_none_or(|days| day > days) {
            return false;
        }
        // The extreme years are only partially representable.
        if year == Self::MIN_YEAR {
            return (month, day) >= (6, 25);
        }
        if year == Self::MAX_YEAR {
            return (month, day) <= (7, 10);
        }
        true
    }

    pub fn is_leap_year(year: i32) -> bool {
        year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
    }

    /// Number of days in `month` of `year`, or `None` if `month` is not in
    /// `1..=12`.
    pub fn days_in_month(year: i32, month: i32) -> Option<i32> {
        if !(1..=12).contains(&month) {
            return None;
        }
        let days = if Self::is_leap_year(year) {
            &DAYS_TO_MONTH_366
        } else {
            &DAYS_TO_MONTH_365
        };
        let month = month as usize;
        Some(days[month] - days[month - 1])
    }

    /// Julian day number of this date.
    pub fn julian_day(&self) -> i64 {
        self.days as i64 + JULIAN_DAY_OF_EPOCH
    }

    /// Parses a complete date string, allowing only surrounding whitespace.
    pub fn try_parse(input: &str) -> Result<Date, DateCastError> {
        DateParser::parse(input.as_bytes(), true).map(|parsed| parsed.date)
    }
}

impl FromStr for Date {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Date::try_parse(s).map_err(|_| Error::conversion(date_format_error(s)))
    }
}

impl std::fmt::Display for Date {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        format::write_date(f, *self)
    }
}

/// Days since the epoch for a proleptic Gregorian date, counted via the number
/// of days before the year (floor division keeps it valid for years <= 0).
fn days_from_civil(year: i32, month: i32, day: i32) -> i64 {
    let y = year as i64 - 1;
    let days = if Date::is_leap_year(year) {
        &DAYS_TO_MONTH_366
    } else {
        &DAYS_TO_MONTH_365
    };
    let days_before_year =
        y * DAYS_PER_YEAR + y.div_euclid(4) - y.div_euclid(100) + y.div_euclid(400);
    days_before_year + days[month as usize - 1] as i64 + day as i64 - 1 - DAYS_TILL_UNIX_EPOCH
}

fn civil_from_days(days: i64) -> (i32, i32, i32) {
    // Days since 0001-01-01.
    let n = days + DAYS_TILL_UNIX_EPOCH;
    let y400 = n.div_euclid(DAYS_PER_400_YEARS);
    let mut n = n.rem_euclid(DAYS_PER_400_YEARS);

    // The last day of a 400-year cycle belongs to its 4th century.
    let y100 = (n / DAYS_PER_100_YEARS).min(3);
    n -= y100 * DAYS_PER_100_YEARS;

    let y4 = n / DAYS_PER_4_YEARS;
    n -= y4 * DAYS_PER_4_YEARS;

    let y1 = (n / DAYS_PER_YEAR).min(3);
    n -= y1 * DAYS_PER_YEAR;

    let year = (y400 * 400 + y100 * 100 + y4 * 4 + y1 + 1) as i32;
    let days = if Date::is_leap_year(year) {
        &DAYS_TO_MONTH_366
    } else {
        &DAYS_TO_MONTH_365
    };
    let day_of_year = n as i32;
    let mut month = 1;
    while days[month] <= day_of_year {
        month += 1;
    }
    (year, month as i32, day_of_year - days[month - 1] + 1)
}
