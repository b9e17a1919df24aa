/*!
    Error types for the ffmpeg crate ecosystem.
*/

use std::fmt;

/**
    Error type for the ffmpeg crate ecosystem.

    Status codes returned by FFmpeg are carried as-is in [`Error::Ffmpeg`],
    with the two control-flow codes (`EAGAIN` and end of file) broken out
    into their own variants so callers can match on them directly.
*/
#[derive(Debug)]
pub enum Error {
    /// I/O error (file not found, permission denied, etc.)
    Io(std::io::Error),
    /// A status code returned by an FFmpeg call, forwarded unchanged.
    Ffmpeg { code: i32, message: String },
    /// The library needs more input (or output must be drained) first.
    Again,
    /// End of stream (not really an error, but part of control flow)
    Eof,
    /// Codec error (decode failure without a specific status)
    Codec { message: String },
    /// Invalid data (malformed input)
    InvalidData { message: String },
    /// Operation called in the wrong lifecycle state
    InvalidState { message: String },
    /// Unsupported format (valid but not handled)
    UnsupportedFormat { message: String },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Ffmpeg { code, message } => write!(f, "ffmpeg error {code}: {message}"),
            Self::Again => write!(f, "resource temporarily unavailable"),
            Self::Eof => write!(f, "end of stream"),
            Self::Codec { message } => write!(f, "codec error: {message}"),
            Self::InvalidData { message } => write!(f, "invalid data: {message}"),
            Self::InvalidState { message } => write!(f, "invalid state: {message}"),
            Self::UnsupportedFormat { message } => write!(f, "unsupported format: {message}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl Error {
    /**
        Create an error carrying a raw FFmpeg status code.
    */
    pub fn ffmpeg(code: i32, message: impl Into<String>) -> Self {
        Self::Ffmpeg {
            code,
            message: message.into(),
        }
    }

    /**
        Create a codec error with the given message.
    */
    pub fn codec(message: impl Into<String>) -> Self {
        Self::Codec {
            message: message.into(),
        }
    }

    /**
        Create an invalid data error with the given message.
    */
    pub fn invalid_data(message: impl Into<String>) -> Self {
        Self::InvalidData {
            message: message.into(),
        }
    }

    /**
        Create an invalid state error with the given message.
    */
    pub fn invalid_state(message: impl Into<String>) -> Self {
        Self::InvalidState {
            message: message.into(),
        }
    }

    /**
        Create an unsupported format error with the given message.
    */
    pub fn unsupported_format(message: impl Into<String>) -> Self {
        Self::UnsupportedFormat {
            message: message.into(),
        }
    }

    /**
        Returns the FFmpeg-style status code behind this error, if there is one.

        Forwarded library codes are returned exactly as the library produced
        them. I/O errors with an OS error number map to `-errno`, which is how
        FFmpeg encodes them.
    */
    pub fn code(&self) -> Option<i32> {
        match self {
            Self::Ffmpeg { code, .. } => Some(*code),
            Self::Io(e) => e.raw_os_error().map(|errno| -errno),
            _ => None,
        }
    }

    /**
        Returns true if this is an EOF error.
    */
    pub fn is_eof(&self) -> bool {
        matches!(self, Self::Eof)
    }

    /**
        Returns true if the library asked to try again.
    */
    pub fn is_again(&self) -> bool {
        matches!(self, Self::Again)
    }
}

/**
    Result type alias for the ffmpeg crate ecosystem.
*/
pub type Result<T> = std::result::Result<T, Error>;
