use crate::cast::TimestampCastError;
use crate::checked::try_subtract;
use crate::date::Date;
use crate::date_parser::{DateParser, skip_spaces};
use crate::time::Time;
use crate::time_parser::TimeParser;
use crate::timestamp::Timestamp;
use crate::{MICROS_PER_DAY, MICROS_PER_HOUR, MICROS_PER_MINUTE, MICROS_PER_SEC};

/// Result of parsing a timestamp string that may carry a zone suffix.
///
/// `zone` borrows from the parsed input: callers that need the name after the
/// input buffer is gone must copy it out.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct ParsedTimestamp<'a> {
    /// The instant, already shifted to UTC when a numeric offset was given.
    pub timestamp: Timestamp,
    /// Set when the input carried `Z`, a numeric offset or a special keyword.
    pub has_offset: bool,
    /// Named time zone following the time, e.g. `UTC` or `Europe/Paris`.
    pub zone: Option<&'a str>,
    /// Sub-microsecond remainder; zero unless requested.
    pub nanos: i32,
}

/// A numeric UTC offset `±HH[[:]MM[:SS]]` as written after a time.
///
/// Every field carries the sign of the offset.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct UtcOffset {
    pub hours: i32,
    pub minutes: i32,
    pub seconds: i32,
    /// Position just past the consumed offset text.
    pub end: usize,
}

impl UtcOffset {
    pub fn to_micros(&self) -> i64 {
        self.hours as i64 * MICROS_PER_HOUR
            + self.minutes as i64 * MICROS_PER_MINUTE
            + self.seconds as i64 * MICROS_PER_SEC
    }
}

/// Parses a numeric UTC offset starting at `pos`.
///
/// Only the sign and the two hour digits are mandatory. Minutes may follow
/// with or without a colon; seconds only after colon-separated minutes.
/// Parsing stops, successfully, at the first optional field that is not
/// present, leaving whatever follows to the caller.
pub fn parse_utc_offset(buf: &[u8], pos: usize) -> Option<UtcOffset> {
    let len = buf.len();
    if pos + 3 > len {
        return None;
    }
    let sign = match buf[pos] {
        b'+' => 1,
        b'-' => -1,
        _ => return None,
    };
    let mut cur = pos + 1;
    let hours = two_digits(buf, cur)?;
    cur += 2;

    let mut offset = UtcOffset {
        hours: sign * hours,
        minutes: 0,
        seconds: 0,
        end: cur,
    };
    if cur >= len {
        return Some(offset);
    }

    let colons_used = buf[cur] == b':';
    if colons_used {
        cur += 1;
    }
    let Some(minutes) = two_digits(buf, cur) else {
        offset.end = cur;
        return Some(offset);
    };
    offset.minutes = sign * minutes;
    cur += 2;
    offset.end = cur;

    // `HHMM` may not be followed by `:SS`.
    if cur >= len || !colons_used || buf[cur] != b':' {
        return Some(offset);
    }
    cur += 1;
    let Some(seconds) = two_digits(buf, cur) else {
        offset.end = cur;
        return Some(offset);
    };
    offset.seconds = sign * seconds;
    offset.end = cur + 2;
    Some(offset)
}

fn two_digits(buf: &[u8], pos: usize) -> Option<i32> {
    match buf.get(pos..pos + 2)? {
        [a, b] if a.is_ascii_digit() && b.is_ascii_digit() => {
            Some(((a - b'0') * 10 + (b - b'0')) as i32)
        }
        _ => None,
    }
}

#[inline]
fn is_time_zone_char(c: u8) -> bool {
    c.is_ascii_alphanumeric() || c == b'/' || c == b'_'
}

impl Timestamp {
    /// Parses `date [sep time [zone]]`, reporting any zone suffix instead of
    /// interpreting named zones.
    ///
    /// A numeric offset is applied: the returned instant is in UTC. A named
    /// zone is returned as-is, and the instant is the local reading the caller
    /// must reinterpret in that zone.
    ///
    /// # Examples
    /// ```rust
    /// # use strata_datetime::Timestamp;
    /// let parsed = Timestamp::try_convert_tz("2024-01-15 10:30:00 Europe/Paris", false).unwrap();
    /// assert_eq!(parsed.zone, Some("Europe/Paris"));
    /// assert!(!parsed.has_offset);
    /// ```
    pub fn try_convert_tz(
        input: &str,
        want_nanos: bool,
    ) -> Result<ParsedTimestamp<'_>, TimestampCastError> {
        let buf = input.as_bytes();
        let len = buf.len();

        let date = DateParser::parse(buf, false)?;
        let mut parsed = ParsedTimestamp {
            timestamp: Timestamp::EPOCH,
            has_offset: date.special,
            zone: None,
            nanos: 0,
        };
        let mut pos = date.consumed;

        if pos == len {
            parsed.timestamp = match date.date {
                Date::INFINITY => Timestamp::INFINITY,
                Date::NEG_INFINITY => Timestamp::NEG_INFINITY,
                date => Timestamp::try_from_datetime(date, Time::MIDNIGHT)
                    .ok_or(TimestampCastError::Range)?,
            };
            return Ok(parsed);
        }

        if buf[pos] == b' ' || buf[pos] == b'T' {
            pos += 1;
        }
        let time = TimeParser::parse(&buf[pos..], false, want_nanos)
            .ok_or(TimestampCastError::IncorrectFormat)?;
        // The time parser also reads intervals; at most a full day is allowed.
        if time.time.micros() > MICROS_PER_DAY {
            return Err(TimestampCastError::Range);
        }
        pos += time.consumed;
        parsed.nanos = time.nanos;

        let mut timestamp = Timestamp::try_from_datetime(date.date, time.time)
            .ok_or(TimestampCastError::Range)?;

        if pos < len {
            if buf[pos] == b'Z' {
                pos += 1;
                parsed.has_offset = true;
            } else if let Some(offset) = parse_utc_offset(buf, pos) {
                timestamp = try_subtract(timestamp.value(), offset.to_micros())
                    .and_then(Timestamp::checked_from_micros)
                    .ok_or(TimestampCastError::Range)?;
                pos = offset.end;
                parsed.has_offset = true;
            } else {
                if buf[pos] != b' ' {
                    return Err(TimestampCastError::IncorrectFormat);
                }
                pos += 1;
                let start = pos;
                while pos < len && is_time_zone_char(buf[pos]) {
                    pos += 1;
                }
                if pos > start {
                    parsed.zone = Some(&input[start..pos]);
                }
            }

            pos = skip_spaces(buf, pos);
            if pos < len {
                return Err(TimestampCastError::IncorrectFormat);
            }
        }

        parsed.timestamp = timestamp;
        Ok(parsed)
    }

    /// Parses a timestamp that is either naive or explicitly in UTC.
    ///
    /// Named zones other than `UTC` fail with `NonUtcTimezone`. With `strict`
    /// set, any `Z` or numeric offset fails with `StrictUtc`.
    pub fn try_convert(input: &str, strict: bool) -> Result<Timestamp, TimestampCastError> {
        Self::try_convert_utc(input, false, strict).map(|(timestamp, _)| timestamp)
    }

    /// Like [`Timestamp::try_convert`], also returning the nanoseconds that did
    /// not fit the microsecond value.
    pub fn try_convert_with_nanos(
        input: &str,
        strict: bool,
    ) -> Result<(Timestamp, i32), TimestampCastError> {
        Self::try_convert_utc(input, true, strict)
    }

    fn try_convert_utc(
        input: &str,
        want_nanos: bool,
        strict: bool,
    ) -> Result<(Timestamp, i32), TimestampCastError> {
        let parsed = Self::try_convert_tz(input, want_nanos)?;
        if let Some(zone) = parsed.zone {
            // Without a zone database only UTC can be resolved.
            if !zone.eq_ignore_ascii_case("UTC") {
                log::debug!("rejecting timestamp with time zone {zone:?}");
                return Err(TimestampCastError::NonUtcTimezone);
            }
        }
        if strict && parsed.has_offset {
            return Err(TimestampCastError::StrictUtc);
        }
        Ok((parsed.timestamp, parsed.nanos))
    }

    /// Parses a timestamp, turning any failure into a conversion error that
    /// quotes the input.
    pub fn from_cstr(input: &str) -> strata_common::Result<Timestamp> {
        Self::try_convert(input, false).map_err(|e| e.into_error(input))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offset(s: &str) -> Option<UtcOffset> {
        parse_utc_offset(s.as_bytes(), 0)
    }

    #[test]
    fn test_offset_hours_only() {
        assert_eq!(
            offset("+05"),
            Some(UtcOffset { hours: 5, minutes: 0, seconds: 0, end: 3 })
        );
        assert_eq!(
            offset("-11"),
            Some(UtcOffset { hours: -11, minutes: 0, seconds: 0, end: 3 })
        );
    }

    #[test]
    fn test_offset_minutes() {
        assert_eq!(
            offset("+05:30"),
            Some(UtcOffset { hours: 5, minutes: 30, seconds: 0, end: 6 })
        );
        assert_eq!(
            offset("-0530"),
            Some(UtcOffset { hours: -5, minutes: -30, seconds: 0, end: 5 })
        );
        assert_eq!(
            offset("+05x"),
            Some(UtcOffset { hours: 5, minutes: 0, seconds: 0, end: 3 })
        );
        // A dangling colon is consumed.
        assert_eq!(
            offset("+05:"),
            Some(UtcOffset { hours: 5, minutes: 0, seconds: 0, end: 4 })
        );
    }

    #[test]
    fn test_offset_seconds() {
        assert_eq!(
            offset("-05:30:15"),
            Some(UtcOffset { hours: -5, minutes: -30, seconds: -15, end: 9 })
        );
        // Unseparated minutes never take seconds.
        assert_eq!(
            offset("+0530:15"),
            Some(UtcOffset { hours: 5, minutes: 30, seconds: 0, end: 5 })
        );
        assert_eq!(
            offset("+05:30:1"),
            Some(UtcOffset { hours: 5, minutes: 30, seconds: 0, end: 7 })
        );
    }

    #[test]
    fn test_offset_rejects() {
        assert_eq!(offset("+5"), None);
        assert_eq!(offset("05:00"), None);
        assert_eq!(offset("+a5"), None);
        assert_eq!(offset(""), None);
        assert_eq!(parse_utc_offset(b"10:00+01", 5).map(|o| o.end), Some(8));
    }

    #[test]
    fn test_offset_to_micros() {
        let o = offset("-05:30:15").unwrap();
        assert_eq!(o.to_micros(), -(5 * 3600 + 30 * 60 + 15) * MICROS_PER_SEC);
    }

    #[test]
    fn test_tz_variants() {
        let parsed = Timestamp::try_convert_tz("2024-01-15 10:30:00", false).unwrap();
        assert!(!parsed.has_offset);
        assert_eq!(parsed.zone, None);

        let parsed = Timestamp::try_convert_tz("2024-01-15T10:30:00Z", false).unwrap();
        assert!(parsed.has_offset);
        assert_eq!(parsed.zone, None);

        let parsed = Timestamp::try_convert_tz("2024-01-15 10:30:00 utc  ", false).unwrap();
        assert!(!parsed.has_offset);
        assert_eq!(parsed.zone, Some("utc"));

        let parsed = Timestamp::try_convert_tz("2024-01-15 10:30:00 ", false).unwrap();
        assert_eq!(parsed.zone, None);
        // An empty zone name is only accepted when nothing but spaces follows.
        assert_eq!(
            Timestamp::try_convert_tz("2024-01-15 10:30:00 !", false),
            Err(TimestampCastError::IncorrectFormat)
        );
        assert_eq!(
            Timestamp::try_convert_tz("2024-01-15 10:30:00  UTC", false),
            Err(TimestampCastError::IncorrectFormat)
        );
    }

    #[test]
    fn test_offset_keeps_lower_limit() {
        assert_eq!(
            Timestamp::try_convert("290309-12-22 (BC) 00:00:00", false),
            Ok(Timestamp::MIN)
        );
        assert_eq!(
            Timestamp::try_convert("290309-12-22 (BC) 00:00:00+01", false),
            Err(TimestampCastError::Range)
        );
        assert_eq!(
            Timestamp::try_convert("290309-12-22 (BC) 00:00:00-01", false),
            Ok(Timestamp::from_micros(Timestamp::MIN.value() + MICROS_PER_HOUR))
        );
        assert_eq!(
            Timestamp::try_convert("290309-12-21 (BC) 23:59:59.999999", false),
            Err(TimestampCastError::Range)
        );
    }

    #[test]
    fn test_tz_errors() {
        assert_eq!(
            Timestamp::try_convert_tz("2024-01-15 10:30:00+5", false),
            Err(TimestampCastError::IncorrectFormat)
        );
        assert_eq!(
            Timestamp::try_convert_tz("2024-01-15 10:30:00 +", false),
            Err(TimestampCastError::IncorrectFormat)
        );
        assert_eq!(
            Timestamp::try_convert_tz("2024-01-15 10:30:00ZZ", false),
            Err(TimestampCastError::IncorrectFormat)
        );
        assert_eq!(
            Timestamp::try_convert_tz("2024-01-15 10:30", false).map(|p| p.timestamp),
            Ok(Timestamp::from_micros(1705314600 * MICROS_PER_SEC))
        );
        assert_eq!(
            Timestamp::try_convert_tz("2024-01-15 24:00:00", false).map(|p| p.timestamp),
            Ok(Timestamp::from_micros(1705363200 * MICROS_PER_SEC))
        );
        assert_eq!(
            Timestamp::try_convert_tz("2024-01-15 25:00:00", false),
            Err(TimestampCastError::Range)
        );
        assert_eq!(
            Timestamp::try_convert_tz("2024-01-15 24:00:01", false),
            Err(TimestampCastError::Range)
        );
    }
}
