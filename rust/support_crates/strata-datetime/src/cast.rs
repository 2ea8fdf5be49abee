//! Outcomes of string-to-temporal casts and the diagnostics reported for them.
//!
//! The "try" parsers return these enums and never fail otherwise. Convenience
//! wrappers turn them into a [`strata_common::error::Error`] carrying the
//! offending input through [`TimestampCastError::into_error`].

use strata_common::error::Error;

/// Reasons a date prefix could not be parsed.
#[derive(Copy, Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum DateCastError {
    #[error("incorrect date format")]
    IncorrectFormat,
    #[error("date out of range")]
    Range,
}

/// Non-success outcomes of a timestamp cast.
#[derive(Copy, Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum TimestampCastError {
    #[error("incorrect timestamp format")]
    IncorrectFormat,
    #[error("timestamp out of range")]
    Range,
    /// A named time zone other than `UTC` was supplied. Resolving it needs a
    /// zone database this crate does not carry.
    #[error("timestamp has a non-UTC time zone")]
    NonUtcTimezone,
    /// Strict parsing found an explicit offset or `Z` marker.
    #[error("timestamp has an explicit UTC offset")]
    StrictUtc,
}

impl From<DateCastError> for TimestampCastError {
    fn from(e: DateCastError) -> Self {
        match e {
            DateCastError::IncorrectFormat => TimestampCastError::IncorrectFormat,
            DateCastError::Range => TimestampCastError::Range,
        }
    }
}

impl TimestampCastError {
    /// Builds the user-facing conversion error for this outcome, quoting `input`.
    pub fn into_error(self, input: &str) -> Error {
        let message = match self {
            TimestampCastError::IncorrectFormat | TimestampCastError::StrictUtc => {
                format_error(input)
            }
            TimestampCastError::Range => range_error(input),
            TimestampCastError::NonUtcTimezone => unsupported_timezone_error(input),
        };
        Error::conversion(message)
    }
}

pub fn format_error(input: &str) -> String {
    format!(
        "invalid timestamp field format: \"{input}\", \
         expected format is (YYYY-MM-DD HH:MM:SS[.US][±HH[:MM[:SS]]| ZONE])"
    )
}

pub fn unsupported_timezone_error(input: &str) -> String {
    format!(
        "timestamp field value \"{input}\" has a timestamp that is not UTC.\n\
         Use a time zone aware type with a zone database loaded to handle non-UTC timestamps."
    )
}

pub fn range_error(input: &str) -> String {
    format!("timestamp field value out of range: \"{input}\"")
}

pub fn date_format_error(input: &str) -> String {
    format!("date field value out of range or invalid format: \"{input}\", expected format is (YYYY-MM-DD)")
}

pub fn time_format_error(input: &str) -> String {
    format!("time field value out of range or invalid format: \"{input}\", expected format is ([YYYY-MM-DD ]HH:MM:SS[.MS])")
}
