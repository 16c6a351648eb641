//! # Error Types
//!
//! Format errors raised while encoding or parsing canonical bytes.

use thiserror::Error;

/// Malformed or short buffers, bad field text, out-of-range values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CodecError {
    /// Buffer ended before a fixed-width field could be read.
    #[error("Buffer too short: needed {needed} bytes, {available} available")]
    TooShort { needed: usize, available: usize },

    /// A fixed-width field had the wrong number of bytes.
    #[error("Invalid {field} length: expected {expected}, got {actual}")]
    InvalidLength {
        field: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Identifier does not fit the wire width.
    #[error("Identifier {value} overflows {width}-byte field")]
    IdOverflow { value: u64, width: usize },

    /// Big-endian number does not fit in 64 bits.
    #[error("Number overflows 64 bits")]
    NumberOverflow,

    /// Text field is not valid UTF-8.
    #[error("Invalid UTF-8 in {0}")]
    InvalidUtf8(&'static str),

    /// Date field is not strict `YYYY-MM-DD`.
    #[error("Invalid date: {0:?}")]
    InvalidDate(String),

    /// Answer byte is neither `'0'` nor `'1'`.
    #[error("Invalid answer byte: {0:#04x}")]
    InvalidAnswer(u8),
}
