//! Temporal value core: dates, times and timestamps at microsecond and
//! nanosecond resolution.
//!
//! The crate owns the in-memory representations every other component relies on
//! for calendar semantics, together with their parsing, formatting, arithmetic
//! and epoch conversions.
//!
//! # Key Types
//!
//! - [`Date`] - days since 1970-01-01, with `+infinity` / `-infinity` sentinels
//! - [`Time`] - microseconds since midnight, and [`TimeTz`] with a UTC offset
//! - [`Timestamp`] - microseconds since the epoch, with sentinels
//! - [`TimestampNs`] - nanoseconds since the epoch, with sentinels
//!
//! All arithmetic on the raw integers goes through the [`checked`] helpers and
//! reports overflow instead of wrapping.

pub mod cast;
pub mod checked;
pub mod date;
pub mod date_parser;
pub mod format;
pub mod time;
pub mod time_parser;
pub mod timestamp;
pub mod timestamp_ns;
pub mod timestamp_parser;
pub mod wall_clock;


pub use cast::{DateCastError, TimestampCastError};
pub use date::Date;
pub use time::{Time, TimeTz};
pub use timestamp::{Timestamp, TimestampComponents};
pub use timestamp_ns::TimestampNs;
pub use timestamp_parser::{ParsedTimestamp, UtcOffset};

pub const NANOS_PER_MICRO: i64 = 1000;
pub const NANOS_PER_MSEC: i64 = NANOS_PER_MICRO * MICROS_PER_MSEC;
pub const NANOS_PER_DAY: i64 = NANOS_PER_MICRO * MICROS_PER_DAY;

pub const MICROS_PER_MSEC: i64 = 1000;
pub const MICROS_PER_SEC: i64 = MICROS_PER_MSEC * MSECS_PER_SEC;
pub const MICROS_PER_MINUTE: i64 = MICROS_PER_SEC * SECS_PER_MINUTE;
pub const MICROS_PER_HOUR: i64 = MICROS_PER_MINUTE * MINS_PER_HOUR;
pub const MICROS_PER_DAY: i64 = MICROS_PER_HOUR * HOURS_PER_DAY;

pub const MSECS_PER_SEC: i64 = 1000;
pub const SECS_PER_MINUTE: i64 = 60;
pub const MINS_PER_HOUR: i64 = 60;
pub const HOURS_PER_DAY: i64 = 24;

pub const DAYS_PER_YEAR: i64 = 365;
pub const DAYS_PER_4_YEARS: i64 = DAYS_PER_YEAR * 4 + 1; // 1461
pub const DAYS_PER_100_YEARS: i64 = DAYS_PER_4_YEARS * 25 - 1; // 36524
pub const DAYS_PER_400_YEARS: i64 = DAYS_PER_100_YEARS * 4 + 1; // 146097

/// Days from 0001-01-01 to 1970-01-01 in the proleptic Gregorian calendar.
pub const DAYS_TILL_UNIX_EPOCH: i64 = 719162;

/// Julian day number of 1970-01-01.
pub const JULIAN_DAY_OF_EPOCH: i64 = 2440588;
