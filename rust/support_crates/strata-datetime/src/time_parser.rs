use crate::date_parser::{parse_double_digit, skip_spaces};
use crate::time::Time;
use crate::{MICROS_PER_HOUR, MICROS_PER_MINUTE, MICROS_PER_SEC, NANOS_PER_MICRO};

/// Parser for the time-of-day part of time and timestamp strings.
///
/// The hour field takes up to nine digits so that the same routine also reads
/// interval-like values (`100:00:00`); callers that need a time of day check
/// the upper bound themselves.
pub(crate) struct TimeParser;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) struct ParsedTime {
    pub time: Time,
    /// Number of input bytes that belong to the time.
    pub consumed: usize,
    /// Sub-microsecond remainder, only filled when requested.
    pub nanos: i32,
}

const MAX_HOUR_DIGITS: usize = 9;

impl TimeParser {
    /// Parses `H..H:MM[:SS[.fraction]]` at the start of `buf`.
    ///
    /// With `want_nanos` up to nine fraction digits are kept and the part below
    /// one microsecond is returned in `nanos`; otherwise six digits are kept.
    /// Extra fraction digits are ignored. In strict mode only whitespace may
    /// follow the time.
    pub fn parse(buf: &[u8], strict: bool, want_nanos: bool) -> Option<ParsedTime> {
        let len = buf.len();
        let mut pos = skip_spaces(buf, 0);
        if pos >= len || !buf[pos].is_ascii_digit() {
            return None;
        }

        let mut hour: i64 = 0;
        let mut hour_digits = 0;
        while pos < len && buf[pos].is_ascii_digit() {
            if hour_digits == MAX_HOUR_DIGITS {
                return None;
            }
            hour = hour * 10 + (buf[pos] - b'0') as i64;
            hour_digits += 1;
            pos += 1;
        }

        if pos >= len || buf[pos] != b':' {
            return None;
        }
        pos += 1;

        let (minute, next) = parse_double_digit(buf, pos)?;
        if minute >= 60 {
            return None;
        }
        pos = next;

        let mut second = 0;
        if pos < len && buf[pos] == b':' {
            let (value, next) = parse_double_digit(buf, pos + 1)?;
            if value >= 60 {
                return None;
            }
            second = value;
            pos = next;
        }

        let mut fraction: i64 = 0;
        let mut nanos = 0;
        if pos < len && buf[pos] == b'.' {
            pos += 1;
            let mut mult: i64 = if want_nanos { 100_000_000 } else { 100_000 };
            while pos < len && buf[pos].is_ascii_digit() {
                fraction += (buf[pos] - b'0') as i64 * mult;
                mult /= 10;
                pos += 1;
            }
            if want_nanos {
                nanos = (fraction % NANOS_PER_MICRO) as i32;
                fraction /= NANOS_PER_MICRO;
            }
        }

        if strict {
            pos = skip_spaces(buf, pos);
            if pos < len {
                return None;
            }
        }

        let micros = hour * MICROS_PER_HOUR
            + minute as i64 * MICROS_PER_MINUTE
            + second as i64 * MICROS_PER_SEC
            + fraction;
        Some(ParsedTime {
            time: Time::from_micros(micros),
            consumed: pos,
            nanos,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lenient(s: &str) -> Option<ParsedTime> {
        TimeParser::parse(s.as_bytes(), false, false)
    }

    #[test]
    fn test_basic() {
        let parsed = lenient("10:30:15").unwrap();
        assert_eq!(parsed.time, Time::from_hms(10, 30, 15, 0));
        assert_eq!(parsed.consumed, 8);
        assert_eq!(parsed.nanos, 0);

        let parsed = lenient("7:05").unwrap();
        assert_eq!(parsed.time, Time::from_hms(7, 5, 0, 0));
        assert_eq!(parsed.consumed, 4);
    }

    #[test]
    fn test_fraction_digits() {
        assert_eq!(lenient("00:00:00.5").unwrap().time.micros(), 500_000);
        assert_eq!(lenient("00:00:00.000001").unwrap().time.micros(), 1);
        // Digits beyond microseconds are dropped.
        assert_eq!(lenient("00:00:00.1234569").unwrap().time.micros(), 123_456);

        let parsed = TimeParser::parse(b"00:00:00.123456789", false, true).unwrap();
        assert_eq!(parsed.time.micros(), 123_456);
        assert_eq!(parsed.nanos, 789);
        let parsed = TimeParser::parse(b"00:00:00.1234567891", false, true).unwrap();
        assert_eq!(parsed.nanos, 789);
    }

    #[test]
    fn test_suffix_left_for_caller() {
        let parsed = lenient("10:30:00+05:30").unwrap();
        assert_eq!(parsed.consumed, 8);
        let parsed = lenient("10:30:00.25Z").unwrap();
        assert_eq!(parsed.consumed, 11);
        assert!(TimeParser::parse(b"10:30:00Z", true, false).is_none());
        assert!(TimeParser::parse(b"10:30:00  ", true, false).is_some());
    }

    #[test]
    fn test_interval_hours() {
        let parsed = lenient("100:00:00").unwrap();
        assert_eq!(parsed.time.micros(), 100 * MICROS_PER_HOUR);
        assert!(lenient("1234567890:00:00").is_none());
    }

    #[test]
    fn test_rejects_malformed() {
        assert!(lenient("").is_none());
        assert!(lenient("10").is_none());
        assert!(lenient("10:").is_none());
        assert!(lenient("10:60").is_none());
        assert!(lenient("10:30:60").is_none());
        assert!(lenient("10:30:").is_none());
        assert!(lenient("x10:30").is_none());
    }
}
