use super::*;
use crate::cast::time_format_error;
use crate::time_parser::TimeParser;
use std::str::FromStr;
use strata_common::error::Error;

/// A time of day stored as microseconds since midnight.
///
/// Values produced by timestamp decomposition lie in `[0, MICROS_PER_DAY)`.
/// The lenient parser may produce up to one full day (`24:00:00`).
#[derive(Copy, Clone, Default, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
#[repr(C)]
pub struct Time {
    micros: i64,
}

impl Time {
    pub const MIDNIGHT: Time = Time { micros: 0 };

    pub const fn from_micros(micros: i64) -> Time {
        Time { micros }
    }

    pub const fn micros(&self) -> i64 {
        self.micros
    }

    /// Builds a time from its fields without validating them.
    ///
    /// Platform calendars may report a leap second as `60`; it is simply folded
    /// into the next minute.
    pub const fn from_hms(hour: i32, minute: i32, second: i32, micros: i32) -> Time {
        Time {
            micros: hour as i64 * MICROS_PER_HOUR
                + minute as i64 * MICROS_PER_MINUTE
                + second as i64 * MICROS_PER_SEC
                + micros as i64,
        }
    }

    /// Builds a time of day, returning `None` unless every field is in its
    /// regular range.
    pub fn try_from_hms(hour: i32, minute: i32, second: i32, micros: i32) -> Option<Time> {
        let valid = (0..24).contains(&hour)
            && (0..60).contains(&minute)
            && (0..60).contains(&second)
            && (0..MICROS_PER_SEC as i32).contains(&micros);
        valid.then(|| Time::from_hms(hour, minute, second, micros))
    }

    /// Returns `(hour, minute, second, microsecond)`.
    pub fn to_hms(&self) -> (i32, i32, i32, i32) {
        let mut micros = self.micros;
        let hour = micros / MICROS_PER_HOUR;
        micros -= hour * MICROS_PER_HOUR;
        let minute = micros / MICROS_PER_MINUTE;
        micros -= minute * MICROS_PER_MINUTE;
        let second = micros / MICROS_PER_SEC;
        micros -= second * MICROS_PER_SEC;
        (hour as i32, minute as i32, second as i32, micros as i32)
    }

    /// Parses a complete time-of-day string such as `10:30:00.25`.
    pub fn try_parse(input: &str) -> Option<Time> {
        let parsed = TimeParser::parse(input.as_bytes(), true, false)?;
        (parsed.time.micros < MICROS_PER_DAY).then_some(parsed.time)
    }
}

impl FromStr for Time {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Time::try_parse(s).ok_or_else(|| Error::conversion(time_format_error(s)))
    }
}

impl std::fmt::Display for Time {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        format::write_time(f, *self, None)
    }
}

/// A time of day paired with its offset from UTC.
///
/// The offset is in seconds east of UTC: `+05:30` is `19800`. Folding into a
/// UTC instant subtracts it.
#[derive(Copy, Clone, Default, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeTz {
    time: Time,
    offset: i32,
}

impl TimeTz {
    /// Largest supported offset magnitude, `15:59:59`.
    pub const MAX_OFFSET: i32 = 16 * 60 * 60 - 1;

    pub const fn new(time: Time, offset: i32) -> TimeTz {
        TimeTz { time, offset }
    }

    /// Like [`TimeTz::new`], returning `None` when the offset magnitude exceeds
    /// [`TimeTz::MAX_OFFSET`].
    pub fn try_new(time: Time, offset: i32) -> Option<TimeTz> {
        (offset.unsigned_abs() <= Self::MAX_OFFSET as u32).then_some(TimeTz { time, offset })
    }

    pub const fn time(&self) -> Time {
        self.time
    }

    pub const fn offset(&self) -> i32 {
        self.offset
    }
}

impl std::fmt::Display for TimeTz {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        format::write_time(f, self.time, None)?;
        format::write_utc_offset(f, self.offset)
    }
}
