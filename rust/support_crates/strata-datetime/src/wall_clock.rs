//! Bridging to the platform's broken-down local time (`struct tm`).
//!
//! Both directions work at one-second resolution and use the process's local
//! time zone, not UTC.

use strata_common::error::Error;

use crate::{date::Date, time::Time, timestamp::Timestamp};

impl Timestamp {
    /// Interprets the calendar fields of this timestamp as local time and
    /// returns the matching `time_t`. Sub-second precision is dropped.
    pub fn to_time_t(&self) -> strata_common::Result<i64> {
        let components = self.components()?;
        // SAFETY: `tm` is plain data; an all-zero value is valid.
        let mut tm: libc::tm = unsafe { std::mem::zeroed() };
        tm.tm_year = components.year - 1900;
        tm.tm_mon = components.month - 1;
        tm.tm_mday = components.day;
        tm.tm_hour = components.hour;
        tm.tm_min = components.minute;
        tm.tm_sec = components.second;
        tm.tm_isdst = 0;
        // SAFETY: `tm` is a valid, exclusively borrowed struct.
        let time = unsafe { libc::mktime(&mut tm) };
        Ok(time as i64)
    }

    /// Builds a timestamp from the local calendar reading of `time`.
    pub fn from_time_t(time: i64) -> strata_common::Result<Timestamp> {
        let tm = local_time(time)?;
        let year = tm
            .tm_year
            .checked_add(1900)
            .ok_or_else(|| Error::conversion(format!("time_t {time} out of date range")))?;
        let date = Date::from_ymd(year, tm.tm_mon + 1, tm.tm_mday)?;
        let time = Time::from_hms(tm.tm_hour, tm.tm_min, tm.tm_sec, 0);
        Timestamp::from_datetime(date, time)
    }
}

#[cfg(unix)]
fn local_time(time: i64) -> strata_common::Result<libc::tm> {
    let time = time as libc::time_t;
    // SAFETY: `tm` is plain data; an all-zero value is valid.
    let mut storage: libc::tm = unsafe { std::mem::zeroed() };
    // SAFETY: both pointers reference live locals; `localtime_r` is re-entrant.
    let result = unsafe { libc::localtime_r(&time, &mut storage) };
    if result.is_null() {
        log::error!("localtime_r returned null for time_t {time}");
        return Err(Error::internal("FromTimeT failed: null pointer returned"));
    }
    Ok(storage)
}

#[cfg(not(unix))]
fn local_time(time: i64) -> strata_common::Result<libc::tm> {
    log::error!("no re-entrant localtime on this platform, time_t {time}");
    Err(Error::internal("FromTimeT failed: null pointer returned"))
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::MICROS_PER_SEC;

    #[test]
    fn test_from_time_t_keeps_minutes_and_seconds() {
        // Local zones shift by whole hours or half/quarter hours, never by
        // seconds.
        let ts = Timestamp::from_time_t(1_705_314_645).unwrap();
        let components = ts.components().unwrap();
        assert_eq!(components.second, 45);
        assert_eq!(components.microsecond, 0);
        assert_eq!(components.minute % 15, 0);
    }

    #[test]
    fn test_round_trip() {
        // January instants, so no daylight saving time applies.
        for t in [0i64, 86_399, 1_104_537_600, 1_705_314_645, 4_102_444_800] {
            let ts = Timestamp::from_time_t(t).unwrap();
            assert_eq!(ts.to_time_t().unwrap(), t, "time_t {t}");
        }
    }

    #[test]
    fn test_to_time_t_drops_fraction() {
        let ts = Timestamp::from_time_t(1_104_537_600).unwrap();
        let with_fraction = Timestamp::from_micros(ts.value() + MICROS_PER_SEC / 2);
        assert_eq!(with_fraction.to_time_t().unwrap(), 1_104_537_600);
    }

    #[test]
    fn test_from_time_t_out_of_range() {
        // Years past i32::MAX - 1900 either fail in localtime_r or overflow the
        // year; neither may panic.
        assert!(Timestamp::from_time_t(i64::MAX).is_err());
        assert!(Timestamp::from_time_t(i64::MIN).is_err());
        assert!(Timestamp::from_time_t(67_767_976_233_316_800).is_err());
    }

    #[test]
    fn test_to_time_t_rejects_sentinels() {
        assert!(Timestamp::INFINITY.to_time_t().is_err());
        assert!(Timestamp::NEG_INFINITY.to_time_t().is_err());
    }
}
