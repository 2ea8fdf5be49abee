use super::*;
use crate::checked::{temporal_round, try_add, try_multiply};
use std::str::FromStr;
use strata_common::error::Error;

/// A point in time stored as nanoseconds since 1970-01-01 00:00:00.
///
/// Uses the same sentinel values as [`Timestamp`], which leaves a finite range
/// of roughly 1677-09-21 to 2262-04-11.
#[derive(Copy, Clone, Default, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
#[repr(C)]
pub struct TimestampNs {
    value: i64,
}

impl TimestampNs {
    pub const INFINITY: TimestampNs = TimestampNs { value: i64::MAX };
    pub const NEG_INFINITY: TimestampNs = TimestampNs { value: -i64::MAX };
    pub const EPOCH: TimestampNs = TimestampNs { value: 0 };

    pub const fn from_nanos(value: i64) -> TimestampNs {
        TimestampNs { value }
    }

    /// Nanoseconds since the epoch.
    pub const fn value(&self) -> i64 {
        self.value
    }

    pub const fn is_finite(&self) -> bool {
        self.value != i64::MAX && self.value != -i64::MAX
    }

    /// Promotes a microsecond timestamp, adding the sub-microsecond `nanos`.
    ///
    /// Sentinels carry over unchanged. Returns `None` when the finite value
    /// does not fit the nanosecond range.
    pub fn from_timestamp_nanos(timestamp: Timestamp, nanos: i32) -> Option<TimestampNs> {
        if !timestamp.is_finite() {
            return Some(TimestampNs {
                value: timestamp.value(),
            });
        }
        let value = try_multiply(timestamp.value(), NANOS_PER_MICRO)?;
        let value = try_add(value, nanos as i64)?;
        let result = TimestampNs { value };
        result.is_finite().then_some(result)
    }

    pub fn from_timestamp(timestamp: Timestamp) -> strata_common::Result<TimestampNs> {
        Self::from_timestamp_nanos(timestamp, 0)
            .ok_or_else(|| Error::conversion("Could not convert Timestamp(US) to Timestamp(NS)"))
    }

    /// Lowers to microseconds, rounding towards negative infinity. Sentinels
    /// carry over unchanged.
    pub fn to_timestamp(&self) -> Timestamp {
        if !self.is_finite() {
            return Timestamp::from_micros(self.value);
        }
        Timestamp::from_epoch_nanos(self.value)
    }

    pub fn from_epoch_millis(millis: i64) -> strata_common::Result<TimestampNs> {
        debug_assert!(Timestamp::from_micros(millis).is_finite());
        try_multiply(millis, NANOS_PER_MSEC)
            .map(TimestampNs::from_nanos)
            .ok_or_else(|| Error::conversion("Could not convert Timestamp(MS) to Timestamp(NS)"))
    }

    pub fn from_epoch_micros(micros: i64) -> strata_common::Result<TimestampNs> {
        debug_assert!(Timestamp::from_micros(micros).is_finite());
        try_multiply(micros, NANOS_PER_MICRO)
            .map(TimestampNs::from_nanos)
            .ok_or_else(|| Error::conversion("Could not convert Timestamp(US) to Timestamp(NS)"))
    }

    pub const fn from_epoch_nanos(nanos: i64) -> TimestampNs {
        TimestampNs::from_nanos(nanos)
    }

    pub fn epoch_nanos(&self) -> i64 {
        debug_assert!(self.is_finite());
        self.value
    }

    /// Splits a finite instant into date, time of day and the nanoseconds below
    /// the time's microsecond.
    pub fn convert(&self) -> strata_common::Result<(Date, Time, i32)> {
        let nanos_of_day = self.nanos_of_day()?;
        let date = Date::from_days(temporal_round(self.value, NANOS_PER_DAY) as i32);
        let time = Time::from_micros(nanos_of_day / NANOS_PER_MICRO);
        let nanos = (nanos_of_day % NANOS_PER_MICRO) as i32;
        Ok((date, time, nanos))
    }

    /// Nanoseconds since midnight of a finite instant.
    pub fn nanos_of_day(&self) -> strata_common::Result<i64> {
        if !self.is_finite() {
            return Err(Error::conversion("Can't get TIME_NS of infinite TIMESTAMP"));
        }
        Ok(self.value.rem_euclid(NANOS_PER_DAY))
    }

    /// Parses a timestamp string keeping up to nine fraction digits.
    ///
    /// Inputs that parse but fall outside the nanosecond range fail with
    /// `Range`.
    pub fn try_convert(input: &str) -> Result<TimestampNs, TimestampCastError> {
        let (timestamp, nanos) = Timestamp::try_convert_with_nanos(input, false)?;
        Self::from_timestamp_nanos(timestamp, nanos).ok_or(TimestampCastError::Range)
    }
}

impl FromStr for TimestampNs {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TimestampNs::try_convert(s).map_err(|e| e.into_error(s))
    }
}

impl std::fmt::Display for TimestampNs {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        format::write_timestamp_ns(f, *self)
    }
}
