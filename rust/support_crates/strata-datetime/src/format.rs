//! Text rendering of temporal values.
//!
//! The output is the canonical form accepted back by the parsers:
//! `YYYY-MM-DD[ (BC)] HH:MM:SS[.fraction]`, with trailing zeros of the
//! fraction dropped and `infinity` / `-infinity` for the sentinels.

use std::fmt::{Result, Write};

use crate::{
    NANOS_PER_MICRO, date::Date, time::Time, timestamp::Timestamp,
    timestamp_ns::TimestampNs,
};

pub const INFINITY_LITERAL: &str = "infinity";
pub const NEG_INFINITY_LITERAL: &str = "-infinity";

pub fn write_date<W: Write>(w: &mut W, date: Date) -> Result {
    if date == Date::INFINITY {
        return w.write_str(INFINITY_LITERAL);
    }
    if date == Date::NEG_INFINITY {
        return w.write_str(NEG_INFINITY_LITERAL);
    }
    let (year, month, day) = date.to_ymd();
    if year > 0 {
        write!(w, "{year:04}-{month:02}-{day:02}")
    } else {
        // Year 0 is 1 BC.
        write!(w, "{:04}-{month:02}-{day:02} (BC)", 1 - year as i64)
    }
}

/// Writes `HH:MM:SS` and the fraction, if any. When `nanos` is given the
/// fraction is rendered with nanosecond precision.
pub fn write_time<W: Write>(w: &mut W, time: Time, nanos: Option<i32>) -> Result {
    let (hour, minute, second, micros) = time.to_hms();
    write!(w, "{hour:02}:{minute:02}:{second:02}")?;
    match nanos {
        Some(nanos) => {
            let fraction = micros as i64 * NANOS_PER_MICRO + nanos as i64;
            write_fraction(w, fraction, 9)
        }
        None => write_fraction(w, micros as i64, 6),
    }
}

fn write_fraction<W: Write>(w: &mut W, mut fraction: i64, mut digits: usize) -> Result {
    if fraction == 0 {
        return Ok(());
    }
    while fraction % 10 == 0 {
        fraction /= 10;
        digits -= 1;
    }
    write!(w, ".{fraction:0digits$}")
}

/// Writes an offset in seconds east of UTC as `±HH[:MM[:SS]]`.
pub fn write_utc_offset<W: Write>(w: &mut W, offset: i32) -> Result {
    let sign = if offset < 0 { '-' } else { '+' };
    let offset = offset.unsigned_abs();
    let (hours, minutes, seconds) = (offset / 3600, offset / 60 % 60, offset % 60);
    write!(w, "{sign}{hours:02}")?;
    if minutes != 0 || seconds != 0 {
        write!(w, ":{minutes:02}")?;
    }
    if seconds != 0 {
        write!(w, ":{seconds:02}")?;
    }
    Ok(())
}

fn write_infinity<W: Write>(w: &mut W, positive: bool) -> Result {
    w.write_str(if positive {
        INFINITY_LITERAL
    } else {
        NEG_INFINITY_LITERAL
    })
}

/// Writes a timestamp. Every finite value decomposes, so this only fails when
/// the writer does.
pub fn write_timestamp<W: Write>(w: &mut W, timestamp: Timestamp) -> Result {
    let Ok((date, time)) = timestamp.convert() else {
        return write_infinity(w, timestamp == Timestamp::INFINITY);
    };
    write_date(w, date)?;
    w.write_char(' ')?;
    write_time(w, time, None)
}

pub fn write_timestamp_ns<W: Write>(w: &mut W, timestamp: TimestampNs) -> Result {
    let Ok((date, time, nanos)) = timestamp.convert() else {
        return write_infinity(w, timestamp == TimestampNs::INFINITY);
    };
    write_date(w, date)?;
    w.write_char(' ')?;
    write_time(w, time, Some(nanos))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(f: impl Fn(&mut String) -> Result) -> String {
        let mut s = String::new();
        f(&mut s).unwrap();
        s
    }

    #[test]
    fn test_write_date() {
        let d = Date::from_ymd(2024, 1, 5).unwrap();
        assert_eq!(render(|s| write_date(s, d)), "2024-01-05");
        let d = Date::from_ymd(12, 11, 10).unwrap();
        assert_eq!(render(|s| write_date(s, d)), "0012-11-10");
        let d = Date::from_ymd(-43, 3, 15).unwrap();
        assert_eq!(render(|s| write_date(s, d)), "0044-03-15 (BC)");
        let d = Date::from_ymd(0, 1, 1).unwrap();
        assert_eq!(render(|s| write_date(s, d)), "0001-01-01 (BC)");
        let d = Date::from_ymd(123456, 7, 8).unwrap();
        assert_eq!(render(|s| write_date(s, d)), "123456-07-08");
        assert_eq!(render(|s| write_date(s, Date::INFINITY)), "infinity");
        assert_eq!(render(|s| write_date(s, Date::NEG_INFINITY)), "-infinity");
    }

    #[test]
    fn test_write_time_fraction() {
        let t = Time::from_hms(23, 59, 59, 999_999);
        assert_eq!(render(|s| write_time(s, t, None)), "23:59:59.999999");
        let t = Time::from_hms(0, 0, 0, 100);
        assert_eq!(render(|s| write_time(s, t, None)), "00:00:00.0001");
        assert_eq!(render(|s| write_time(s, t, Some(5))), "00:00:00.000100005");
        assert_eq!(render(|s| write_time(s, Time::MIDNIGHT, Some(0))), "00:00:00");
    }

    #[test]
    fn test_write_timestamp_extremes() {
        let lowest = Timestamp::from_micros(i64::MIN);
        assert_eq!(
            render(|s| write_timestamp(s, lowest)),
            "290309-12-21 (BC) 19:59:05.224192"
        );
        let lowest = TimestampNs::from_nanos(i64::MIN);
        assert_eq!(
            render(|s| write_timestamp_ns(s, lowest)),
            "1677-09-21 00:12:43.145224192"
        );
        assert_eq!(render(|s| write_timestamp(s, Timestamp::NEG_INFINITY)), "-infinity");
        assert_eq!(render(|s| write_timestamp_ns(s, TimestampNs::INFINITY)), "infinity");
    }

    #[test]
    fn test_write_utc_offset() {
        assert_eq!(render(|s| write_utc_offset(s, 0)), "+00");
        assert_eq!(render(|s| write_utc_offset(s, 19800)), "+05:30");
        assert_eq!(render(|s| write_utc_offset(s, -(3600 + 61))), "-01:01:01");
    }
}
