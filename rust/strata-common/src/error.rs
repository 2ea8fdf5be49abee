use thiserror::Error;

#[derive(Debug, Error)]
#[error(transparent)]
pub struct Error(Box<ErrorKind>);

impl Error {
    pub fn kind(&self) -> &ErrorKind {
        self.0.as_ref()
    }

    pub fn into_kind(self) -> ErrorKind {
        *self.0
    }

    pub fn invalid_arg(name: impl Into<String>, message: impl Into<String>) -> Error {
        Error(
            ErrorKind::InvalidArgument {
                name: name.into(),
                message: message.into(),
            }
            .into(),
        )
    }

    /// A value could not be converted between representations, e.g. a string
    /// that is not a well-formed timestamp, or a precision change that does
    /// not fit the target type.
    pub fn conversion(message: impl Into<String>) -> Error {
        Error(
            ErrorKind::Conversion {
                message: message.into(),
            }
            .into(),
        )
    }

    pub fn out_of_range(message: impl Into<String>) -> Error {
        Error(
            ErrorKind::OutOfRange {
                message: message.into(),
            }
            .into(),
        )
    }

    /// A fault that cannot be attributed to the caller's input, such as a
    /// platform library call returning no result.
    pub fn internal(message: impl Into<String>) -> Error {
        Error(
            ErrorKind::Internal {
                message: message.into(),
            }
            .into(),
        )
    }

    pub fn is_conversion(&self) -> bool {
        matches!(self.kind(), ErrorKind::Conversion { .. })
    }

    pub fn is_out_of_range(&self) -> bool {
        matches!(self.kind(), ErrorKind::OutOfRange { .. })
    }
}

#[derive(Debug, Error)]
pub enum ErrorKind {
    #[error("invalid argument {name}: {message}")]
    InvalidArgument { name: String, message: String },

    #[error("conversion error: {message}")]
    Conversion { message: String },

    #[error("out of range: {message}")]
    OutOfRange { message: String },

    #[error("internal error: {message}")]
    Internal { message: String },
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Error(kind.into())
    }
}
