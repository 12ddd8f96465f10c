//! Error types for textfield.
//!
//! Editing commands never fail: out-of-range offsets are clamped and policy
//! rejections are silent no-ops. Errors only come from importing foreign
//! text encodings into a buffer.

use std::fmt;
use std::str::Utf8Error;

/// Result type alias for textfield operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for textfield operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Input bytes were not valid UTF-8.
    InvalidUtf8(Utf8Error),
    /// A UCS-4 value is not a Unicode scalar value (surrogate or > U+10FFFF).
    InvalidCodepoint { offset: usize, value: u32 },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidUtf8(e) => write!(f, "invalid UTF-8 input: {e}"),
            Self::InvalidCodepoint { offset, value } => {
                write!(f, "invalid code point U+{value:04X} at offset {offset}")
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidUtf8(e) => Some(e),
            Self::InvalidCodepoint { .. } => None,
        }
    }
}

impl From<Utf8Error> for Error {
    fn from(e: Utf8Error) -> Self {
        Self::InvalidUtf8(e)
    }
}
