//! The library error type.

use thiserror::Error;

use crate::bytes::EmptyPattern;

/// Errors produced while reading or patching a date-taken timestamp.
///
/// Every failure is an explicit value; nothing here aborts a batch, one
/// file's error stays with that file (see [`crate::pipeline`]).
#[derive(Debug, Error)]
pub enum ShiftError {
    /// The source could not be read or the destination could not be written.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The input bytes are not a container this crate can patch.
    #[error("unsupported container: {0}")]
    UnsupportedContainer(String),

    /// The container carries no date-taken field.
    #[error("date-taken field not found")]
    FieldNotFound,

    /// The located date text deviates from the fixed `YYYY:MM:DD HH:MM:SS`
    /// form.
    #[error("malformed date-taken value {value:?}")]
    Parse { value: String },

    /// Replacing changed the buffer size. Writing the result would corrupt
    /// the container, so nothing was written.
    #[error("patched buffer is {patched_len} bytes, source was {source_len}; refusing to write")]
    LengthMismatch {
        source_len: usize,
        patched_len: usize,
    },

    /// A caller-supplied argument was rejected before any file was touched.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl From<EmptyPattern> for ShiftError {
    fn from(err: EmptyPattern) -> Self {
        ShiftError::InvalidArgument(err.to_string())
    }
}
