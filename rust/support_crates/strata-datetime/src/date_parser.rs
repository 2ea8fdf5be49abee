use crate::cast::DateCastError;
use crate::date::Date;

/// Parser for the date prefix of date and timestamp strings.
///
/// Accepts `[-]Y..Y<sep>M[M]<sep>D[D][ (BC)]` where `<sep>` is one of `-`, `/`,
/// `\` or a space and must be the same both times, as well as the keywords
/// `infinity`, `-infinity` and `epoch`.
pub(crate) struct DateParser;

/// A successfully parsed date prefix.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) struct ParsedDate {
    pub date: Date,
    /// Number of input bytes that belong to the date.
    pub consumed: usize,
    /// Set when the date was given as one of the special keywords.
    pub special: bool,
}

const INFINITY_KEYWORD: &[u8] = b"infinity";
const EPOCH_KEYWORD: &[u8] = b"epoch";
const BC_SUFFIX: &[u8] = b"(bc)";

/// More year digits than this cannot name a representable date.
const MAX_YEAR_DIGITS: usize = 9;

impl DateParser {
    /// Parses a date at the start of `buf`.
    ///
    /// In strict mode only trailing whitespace may follow the date. Otherwise the
    /// date may be followed by anything except another digit, and `consumed`
    /// tells the caller where to continue.
    pub fn parse(buf: &[u8], strict: bool) -> Result<ParsedDate, DateCastError> {
        let len = buf.len();
        let mut pos = skip_spaces(buf, 0);
        if pos >= len {
            return Err(DateCastError::IncorrectFormat);
        }

        let negative = buf[pos] == b'-';
        if negative {
            pos += 1;
            if pos >= len {
                return Err(DateCastError::IncorrectFormat);
            }
        }

        if !buf[pos].is_ascii_digit() {
            return Self::parse_special(buf, pos, negative);
        }

        let mut year: i64 = 0;
        let mut year_digits = 0;
        while pos < len && buf[pos].is_ascii_digit() {
            if year_digits == MAX_YEAR_DIGITS {
                return Err(DateCastError::Range);
            }
            year = year * 10 + (buf[pos] - b'0') as i64;
            year_digits += 1;
            pos += 1;
        }
        if year_digits < 2 && strict {
            return Err(DateCastError::IncorrectFormat);
        }
        if negative {
            year = -year;
        }

        if pos >= len {
            return Err(DateCastError::IncorrectFormat);
        }
        let sep = buf[pos];
        pos += 1;
        if !matches!(sep, b'-' | b'/' | b'\\' | b' ') {
            return Err(DateCastError::IncorrectFormat);
        }

        let (month, next) =
            parse_double_digit(buf, pos).ok_or(DateCastError::IncorrectFormat)?;
        pos = next;
        if pos >= len || buf[pos] != sep {
            return Err(DateCastError::IncorrectFormat);
        }
        pos += 1;

        let (day, next) = parse_double_digit(buf, pos).ok_or(DateCastError::IncorrectFormat)?;
        pos = next;

        if len - pos >= 1 + BC_SUFFIX.len()
            && is_space(buf[pos])
            && buf[pos + 1..pos + 1 + BC_SUFFIX.len()].eq_ignore_ascii_case(BC_SUFFIX)
        {
            if negative || year == 0 {
                return Err(DateCastError::IncorrectFormat);
            }
            year = 1 - year;
            pos += 1 + BC_SUFFIX.len();
        }

        if strict {
            pos = skip_spaces(buf, pos);
            if pos < len {
                return Err(DateCastError::IncorrectFormat);
            }
        } else if pos < len && buf[pos].is_ascii_digit() {
            return Err(DateCastError::IncorrectFormat);
        }

        let year = i32::try_from(year).map_err(|_| DateCastError::Range)?;
        let date = Date::try_from_ymd(year, month, day).ok_or(DateCastError::Range)?;
        Ok(ParsedDate {
            date,
            consumed: pos,
            special: false,
        })
    }

    fn parse_special(
        buf: &[u8],
        pos: usize,
        negative: bool,
    ) -> Result<ParsedDate, DateCastError> {
        let (date, keyword_len) = if starts_with_ignore_case(&buf[pos..], INFINITY_KEYWORD) {
            let date = if negative {
                Date::NEG_INFINITY
            } else {
                Date::INFINITY
            };
            (date, INFINITY_KEYWORD.len())
        } else if !negative && starts_with_ignore_case(&buf[pos..], EPOCH_KEYWORD) {
            (Date::EPOCH, EPOCH_KEYWORD.len())
        } else {
            return Err(DateCastError::IncorrectFormat);
        };

        // Keywords never take a time part, only whitespace may follow.
        let pos = skip_spaces(buf, pos + keyword_len);
        if pos != buf.len() {
            return Err(DateCastError::IncorrectFormat);
        }
        Ok(ParsedDate {
            date,
            consumed: pos,
            special: true,
        })
    }
}

/// Reads one or two digits at `pos`, returning the value and the next position.
pub(crate) fn parse_double_digit(buf: &[u8], pos: usize) -> Option<(i32, usize)> {
    let first = *buf.get(pos)?;
    if !first.is_ascii_digit() {
        return None;
    }
    let mut value = (first - b'0') as i32;
    let mut pos = pos + 1;
    if let Some(&second) = buf.get(pos) {
        if second.is_ascii_digit() {
            value = value * 10 + (second - b'0') as i32;
            pos += 1;
        }
    }
    Some((value, pos))
}

#[inline]
pub(crate) fn is_space(c: u8) -> bool {
    matches!(c, b' ' | b'\t' | b'\n' | b'\x0b' | b'\x0c' | b'\r')
}

#[inline]
pub(crate) fn skip_spaces(buf: &[u8], mut pos: usize) -> usize {
    while pos < buf.len() && is_space(buf[pos]) {
        pos += 1;
    }
    pos
}

fn starts_with_ignore_case(buf: &[u8], prefix: &[u8]) -> bool {
    buf.len() >= prefix.len() && buf[..prefix.len()].eq_ignore_ascii_case(prefix)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> Result<ParsedDate, DateCastError> {
        DateParser::parse(s.as_bytes(), false)
    }

    #[test]
    fn test_basic_formats() {
        let expected = Date::from_ymd(2024, 1, 15).unwrap();
        for s in ["2024-01-15", "2024/01/15", "2024\\1\\15", "2024 1 15", "  2024-1-15"] {
            let parsed = parse(s).unwrap();
            assert_eq!(parsed.date, expected, "{s}");
            assert_eq!(parsed.consumed, s.len(), "{s}");
            assert!(!parsed.special);
        }
    }

    #[test]
    fn test_prefix_stops_before_time() {
        let parsed = parse("2024-01-15 10:30:00").unwrap();
        assert_eq!(parsed.consumed, 10);
        let parsed = parse("2024-01-15T10:30:00").unwrap();
        assert_eq!(parsed.consumed, 10);
    }

    #[test]
    fn test_mixed_separators_rejected() {
        assert_eq!(parse("2024-01/15"), Err(DateCastError::IncorrectFormat));
        assert_eq!(parse("2024.01.15"), Err(DateCastError::IncorrectFormat));
        assert_eq!(parse("2024-01-155"), Err(DateCastError::IncorrectFormat));
        assert_eq!(parse("2024-01"), Err(DateCastError::IncorrectFormat));
        assert_eq!(parse(""), Err(DateCastError::IncorrectFormat));
        assert_eq!(parse("   "), Err(DateCastError::IncorrectFormat));
    }

    #[test]
    fn test_range_errors() {
        assert_eq!(parse("2023-02-29"), Err(DateCastError::Range));
        assert_eq!(parse("2023-13-01"), Err(DateCastError::Range));
        assert_eq!(parse("2023-00-01"), Err(DateCastError::Range));
        assert_eq!(parse("1234567890-01-01"), Err(DateCastError::Range));
        assert_eq!(parse("9999999-01-01"), Err(DateCastError::Range));
    }

    #[test]
    fn test_bc_suffix() {
        let parsed = parse("0044-03-15 (BC)").unwrap();
        assert_eq!(parsed.date.to_ymd(), (-43, 3, 15));
        assert_eq!(parsed.consumed, 15);
        let parsed = parse("0001-01-01 (bc) 10:00:00").unwrap();
        assert_eq!(parsed.date.to_ymd(), (0, 1, 1));
        assert_eq!(parsed.consumed, 15);
        assert_eq!(parse("0000-01-01 (BC)"), Err(DateCastError::IncorrectFormat));
        assert_eq!(parse("-0001-01-01 (BC)"), Err(DateCastError::IncorrectFormat));
    }

    #[test]
    fn test_negative_year() {
        let parsed = parse("-0001-12-31").unwrap();
        assert_eq!(parsed.date.to_ymd(), (-1, 12, 31));
    }

    #[test]
    fn test_special_keywords() {
        let parsed = parse("infinity").unwrap();
        assert_eq!(parsed.date, Date::INFINITY);
        assert!(parsed.special);
        assert_eq!(parse("-Infinity ").unwrap().date, Date::NEG_INFINITY);
        assert_eq!(parse("EPOCH").unwrap().date, Date::EPOCH);
        assert_eq!(parse("epoch 10:00:00"), Err(DateCastError::IncorrectFormat));
        assert_eq!(parse("-epoch"), Err(DateCastError::IncorrectFormat));
        assert_eq!(parse("infinit"), Err(DateCastError::IncorrectFormat));
    }

    #[test]
    fn test_strict_mode() {
        assert!(DateParser::parse(b"2024-01-15  ", true).is_ok());
        assert_eq!(
            DateParser::parse(b"2024-01-15 10:00", true),
            Err(DateCastError::IncorrectFormat)
        );
        assert_eq!(
            DateParser::parse(b"5-01-15", true),
            Err(DateCastError::IncorrectFormat)
        );
        assert!(DateParser::parse(b"5-01-15", false).is_ok());
    }

    #[test]
    fn test_parse_double_digit() {
        assert_eq!(parse_double_digit(b"7", 0), Some((7, 1)));
        assert_eq!(parse_double_digit(b"07:", 0), Some((7, 2)));
        assert_eq!(parse_double_digit(b"123", 0), Some((12, 2)));
        assert_eq!(parse_double_digit(b":1", 0), None);
        assert_eq!(parse_double_digit(b"1", 1), None);
    }
}
