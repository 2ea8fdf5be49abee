use super::*;
use crate::checked::{temporal_round, try_add, try_multiply, try_subtract};
use std::ops::{Add, AddAssign, Sub, SubAssign};
use std::str::FromStr;
use strata_common::error::Error;
use strata_common::verify_arg;

/// A point in time stored as microseconds since 1970-01-01 00:00:00.
///
/// `Timestamp` carries no time zone; values parsed with a UTC offset are
/// normalized to UTC. Two reserved values, [`Timestamp::INFINITY`] and
/// [`Timestamp::NEG_INFINITY`], denote instants after and before every finite
/// one. Every other value decomposes into an `i32` day count and a time of day.
///
/// # Examples
/// ```rust
/// # use strata_datetime::Timestamp;
/// let ts: Timestamp = "2024-01-15 10:30:00+05:30".parse().unwrap();
/// assert_eq!(ts.to_string(), "2024-01-15 05:00:00");
/// assert_eq!(ts.epoch_seconds(), 1705294800);
/// ```
#[derive(Copy, Clone, Default, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
#[repr(C)]
pub struct Timestamp {
    value: i64,
}

/// Calendar fields of a finite timestamp.
#[derive(Copy, Clone, Default, Debug, Eq, PartialEq)]
pub struct TimestampComponents {
    pub year: i32,
    pub month: i32,
    pub day: i32,
    pub hour: i32,
    pub minute: i32,
    pub second: i32,
    pub microsecond: i32,
}

impl Timestamp {
    pub const INFINITY: Timestamp = Timestamp { value: i64::MAX };
    pub const NEG_INFINITY: Timestamp = Timestamp { value: -i64::MAX };
    pub const EPOCH: Timestamp = Timestamp { value: 0 };

    /// Smallest instant that can be rebuilt from its date and time of day:
    /// midnight of 290309-12-22 (BC).
    pub const MIN: Timestamp = Timestamp {
        value: -106_751_991 * MICROS_PER_DAY,
    };
    /// Largest finite instant, 294247-01-10 04:00:54.775806.
    pub const MAX: Timestamp = Timestamp { value: i64::MAX - 1 };

    pub const fn from_micros(value: i64) -> Timestamp {
        Timestamp { value }
    }

    /// Microseconds since the epoch.
    pub const fn value(&self) -> i64 {
        self.value
    }

    pub const fn is_finite(&self) -> bool {
        self.value != i64::MAX && self.value != -i64::MAX
    }

    /// Whether this value lies within [`Timestamp::MIN`]..=[`Timestamp::MAX`],
    /// the instants constructors and parsers produce.
    pub const fn is_in_range(&self) -> bool {
        self.value >= Self::MIN.value && self.value <= Self::MAX.value
    }

    pub(crate) const fn checked_from_micros(value: i64) -> Option<Timestamp> {
        let timestamp = Timestamp { value };
        if timestamp.is_in_range() {
            Some(timestamp)
        } else {
            None
        }
    }

    /// Current wall-clock time at millisecond resolution.
    pub fn current() -> strata_common::Result<Timestamp> {
        Timestamp::from_epoch_ms(chrono::Utc::now().timestamp_millis())
    }
}

// Construction from and decomposition into date and time
impl Timestamp {
    /// Combines a date and a time of day. Returns `None` when the result does
    /// not fit within [`Timestamp::MIN`]..=[`Timestamp::MAX`].
    pub fn try_from_datetime(date: Date, time: Time) -> Option<Timestamp> {
        let value = try_multiply(date.days() as i64, MICROS_PER_DAY)?;
        let value = try_add(value, time.micros())?;
        Self::checked_from_micros(value)
    }

    /// Combines a date with a time carrying a UTC offset, shifting the result
    /// to UTC.
    pub fn try_from_datetime_tz(date: Date, time: TimeTz) -> Option<Timestamp> {
        let local = Self::try_from_datetime(date, time.time())?;
        let offset = time.offset() as i64 * MICROS_PER_SEC;
        let value = try_subtract(local.value, offset)?;
        Self::checked_from_micros(value)
    }

    pub fn from_datetime(date: Date, time: Time) -> strata_common::Result<Timestamp> {
        Self::try_from_datetime(date, time)
            .ok_or_else(|| Error::conversion("Date and time not in timestamp range"))
    }

    /// The calendar date this instant falls on; sentinels map to the date
    /// sentinels.
    pub fn date(&self) -> Date {
        if *self == Timestamp::INFINITY {
            return Date::INFINITY;
        }
        if *self == Timestamp::NEG_INFINITY {
            return Date::NEG_INFINITY;
        }
        Date::from_days(temporal_round(self.value, MICROS_PER_DAY) as i32)
    }

    /// The time of day of a finite instant.
    pub fn time(&self) -> strata_common::Result<Time> {
        if !self.is_finite() {
            return Err(Error::conversion("Can't get TIME of infinite TIMESTAMP"));
        }
        // The floored remainder needs no day start, which may not fit below MIN.
        Ok(Time::from_micros(self.value.rem_euclid(MICROS_PER_DAY)))
    }

    /// Splits a finite instant into its date and time of day.
    pub fn convert(&self) -> strata_common::Result<(Date, Time)> {
        let time = self.time()?;
        let date = self.date();
        debug_assert!(
            !self.is_in_range() || Self::try_from_datetime(date, time) == Some(*self)
        );
        Ok((date, time))
    }

    pub fn components(&self) -> strata_common::Result<TimestampComponents> {
        let (date, time) = self.convert()?;
        let (year, month, day) = date.to_ymd();
        let (hour, minute, second, microsecond) = time.to_hms();
        Ok(TimestampComponents {
            year,
            month,
            day,
            hour,
            minute,
            second,
            microsecond,
        })
    }

    /// Julian day of this instant with the time of day as the fraction.
    pub fn julian_day(&self) -> strata_common::Result<f64> {
        let time = self.time()?;
        let fraction = time.micros() as f64 / MICROS_PER_DAY as f64;
        Ok(fraction + self.date().julian_day() as f64)
    }
}

// Epoch conversions
impl Timestamp {
    pub fn from_epoch_seconds(seconds: i64) -> strata_common::Result<Timestamp> {
        debug_assert!(Timestamp::from_micros(seconds).is_finite());
        Self::from_epoch_seconds_possibly_infinite(seconds)
    }

    pub fn from_epoch_seconds_possibly_infinite(seconds: i64) -> strata_common::Result<Timestamp> {
        try_multiply(seconds, MICROS_PER_SEC)
            .map(Timestamp::from_micros)
            .ok_or_else(|| Error::conversion("Could not convert Timestamp(S) to Timestamp(US)"))
    }

    pub fn from_epoch_ms(millis: i64) -> strata_common::Result<Timestamp> {
        debug_assert!(Timestamp::from_micros(millis).is_finite());
        Self::from_epoch_ms_possibly_infinite(millis)
    }

    pub fn from_epoch_ms_possibly_infinite(millis: i64) -> strata_common::Result<Timestamp> {
        try_multiply(millis, MICROS_PER_MSEC)
            .map(Timestamp::from_micros)
            .ok_or_else(|| Error::conversion("Could not convert Timestamp(MS) to Timestamp(US)"))
    }

    pub const fn from_epoch_micros(micros: i64) -> Timestamp {
        Timestamp::from_micros(micros)
    }

    pub fn from_epoch_nanos(nanos: i64) -> Timestamp {
        debug_assert!(Timestamp::from_micros(nanos).is_finite());
        Self::from_epoch_nanos_possibly_infinite(nanos)
    }

    /// Lowers nanoseconds to microseconds, rounding towards negative infinity.
    pub fn from_epoch_nanos_possibly_infinite(nanos: i64) -> Timestamp {
        Timestamp::from_micros(temporal_round(nanos, NANOS_PER_MICRO))
    }

    /// Whole seconds since the epoch, rounded towards negative infinity.
    pub fn epoch_seconds(&self) -> i64 {
        debug_assert!(self.is_finite());
        temporal_round(self.value, MICROS_PER_SEC)
    }

    /// Whole milliseconds since the epoch, rounded towards negative infinity.
    pub fn epoch_ms(&self) -> i64 {
        debug_assert!(self.is_finite());
        temporal_round(self.value, MICROS_PER_MSEC)
    }

    pub const fn epoch_micros(&self) -> i64 {
        self.value
    }

    /// Nanoseconds since the epoch, or `None` if they do not fit in an `i64`.
    pub fn try_epoch_nanos(&self) -> Option<i64> {
        debug_assert!(self.is_finite());
        try_multiply(self.value, NANOS_PER_MICRO)
    }

    pub fn epoch_nanos(&self) -> strata_common::Result<i64> {
        self.try_epoch_nanos()
            .ok_or_else(|| Error::conversion("Could not convert Timestamp(US) to Timestamp(NS)"))
    }

    /// Rounds the microsecond value to the nearest multiple of `power_of_ten`
    /// and returns it in units of `power_of_ten`. Ties round away from zero.
    ///
    /// ```
    /// # use strata_datetime::Timestamp;
    /// assert_eq!(Timestamp::from_micros(1_500_000).epoch_rounded(1_000_000), 2);
    /// assert_eq!(Timestamp::from_micros(-1_500_000).epoch_rounded(1_000_000), -2);
    /// assert_eq!(Timestamp::from_micros(1_499_999).epoch_rounded(1_000_000), 1);
    /// ```
    pub fn epoch_rounded(&self, power_of_ten: i64) -> i64 {
        debug_assert!(self.is_finite());
        // Scale first so the adjustment cannot overflow.
        let mut value = self.value / (power_of_ten / 2);
        if value < 0 {
            value -= 1;
        } else {
            value += 1;
        }
        value / 2
    }

    /// Checked form of [`Timestamp::epoch_rounded`].
    pub fn try_epoch_rounded(&self, power_of_ten: i64) -> strata_common::Result<i64> {
        verify_arg!(power_of_ten, power_of_ten >= 2);
        if !self.is_finite() {
            return Err(Error::conversion("Can't round an infinite TIMESTAMP"));
        }
        Ok(self.epoch_rounded(power_of_ten))
    }
}

// Arithmetic. Sentinels are not special-cased: they take part in the checked
// arithmetic like any other value.
impl Timestamp {
    /// Adds a number of microseconds, truncating the fractional part.
    pub fn checked_add_f64(self, delta: f64) -> strata_common::Result<Timestamp> {
        try_add(self.value, delta as i64)
            .map(Timestamp::from_micros)
            .ok_or_else(|| Error::out_of_range("Overflow in timestamp addition"))
    }

    /// Difference in microseconds.
    pub fn checked_sub_timestamp(self, other: Timestamp) -> strata_common::Result<i64> {
        try_subtract(self.value, other.value)
            .ok_or_else(|| Error::out_of_range("Overflow in timestamp subtraction"))
    }

    pub fn checked_add_micros(self, delta: i64) -> strata_common::Result<Timestamp> {
        try_add(self.value, delta)
            .map(Timestamp::from_micros)
            .ok_or_else(|| Error::out_of_range("Overflow in timestamp increment"))
    }

    pub fn checked_sub_micros(self, delta: i64) -> strata_common::Result<Timestamp> {
        try_subtract(self.value, delta)
            .map(Timestamp::from_micros)
            .ok_or_else(|| Error::out_of_range("Overflow in timestamp decrement"))
    }
}

#[track_caller]
fn unwrap_or_panic<T>(result: strata_common::Result<T>) -> T {
    match result {
        Ok(value) => value,
        Err(e) => panic!("{e}"),
    }
}

/// Panics on overflow; use [`Timestamp::checked_add_f64`] to recover.
impl Add<f64> for Timestamp {
    type Output = Timestamp;

    fn add(self, delta: f64) -> Timestamp {
        unwrap_or_panic(self.checked_add_f64(delta))
    }
}

/// Panics on overflow; use [`Timestamp::checked_sub_timestamp`] to recover.
impl Sub for Timestamp {
    type Output = i64;

    fn sub(self, other: Timestamp) -> i64 {
        unwrap_or_panic(self.checked_sub_timestamp(other))
    }
}

impl AddAssign<i64> for Timestamp {
    fn add_assign(&mut self, delta: i64) {
        *self = unwrap_or_panic(self.checked_add_micros(delta));
    }
}

impl SubAssign<i64> for Timestamp {
    fn sub_assign(&mut self, delta: i64) {
        *self = unwrap_or_panic(self.checked_sub_micros(delta));
    }
}

impl FromStr for Timestamp {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Timestamp::from_cstr(s)
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        format::write_timestamp(f, *self)
    }
}
