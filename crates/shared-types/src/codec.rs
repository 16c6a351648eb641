//! # Canonical Wire Codec
//!
//! Signatures are computed and verified over the bytes produced here, so the
//! encoding must be identical everywhere and unambiguous to parse.
//!
//! ## Layout Rules
//!
//! - Numbers and identifiers: fixed width, big-endian.
//! - Dates: fixed width ASCII `YYYY-MM-DD`.
//! - Text: raw UTF-8, no length prefix; its extent is inferred from the fixed
//!   fields around it.
//! - Signed records: `content ‖ signature`, split positionally.

use chrono::NaiveDate;

use crate::entities::{PartyId, DATE_LENGTH, ID_LENGTH, SIG_LENGTH};
use crate::errors::CodecError;

const DATE_FORMAT: &str = "%Y-%m-%d";

// =============================================================================
// ENCODING
// =============================================================================

/// A value with exactly one canonical byte form.
pub trait CanonicalEncode {
    /// Append the canonical bytes of `self` to `out`.
    fn write_canonical(&self, out: &mut Vec<u8>) -> Result<(), CodecError>;

    /// Canonical bytes of `self` in a fresh buffer.
    fn canonical_bytes(&self) -> Result<Vec<u8>, CodecError> {
        let mut out = Vec::new();
        self.write_canonical(&mut out)?;
        Ok(out)
    }
}

/// Raw bytes that pass through unchanged.
#[derive(Debug, Clone, Copy)]
pub struct Raw<'a>(pub &'a [u8]);

/// An absent value; encodes to nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct Absent;

impl CanonicalEncode for str {
    fn write_canonical(&self, out: &mut Vec<u8>) -> Result<(), CodecError> {
        out.extend_from_slice(self.as_bytes());
        Ok(())
    }
}

impl CanonicalEncode for String {
    fn write_canonical(&self, out: &mut Vec<u8>) -> Result<(), CodecError> {
        self.as_str().write_canonical(out)
    }
}

impl CanonicalEncode for Raw<'_> {
    fn write_canonical(&self, out: &mut Vec<u8>) -> Result<(), CodecError> {
        out.extend_from_slice(self.0);
        Ok(())
    }
}

impl CanonicalEncode for u8 {
    fn write_canonical(&self, out: &mut Vec<u8>) -> Result<(), CodecError> {
        out.push(*self);
        Ok(())
    }
}

impl CanonicalEncode for Absent {
    fn write_canonical(&self, _out: &mut Vec<u8>) -> Result<(), CodecError> {
        Ok(())
    }
}

impl CanonicalEncode for PartyId {
    fn write_canonical(&self, out: &mut Vec<u8>) -> Result<(), CodecError> {
        out.extend_from_slice(&encode_id(self.0)?);
        Ok(())
    }
}

impl CanonicalEncode for NaiveDate {
    fn write_canonical(&self, out: &mut Vec<u8>) -> Result<(), CodecError> {
        let text = self.format(DATE_FORMAT).to_string();
        // Years outside 0000..=9999 do not fit the fixed width.
        if text.len() != DATE_LENGTH {
            return Err(CodecError::InvalidDate(text));
        }
        out.extend_from_slice(text.as_bytes());
        Ok(())
    }
}

impl<T: CanonicalEncode> CanonicalEncode for Option<T> {
    fn write_canonical(&self, out: &mut Vec<u8>) -> Result<(), CodecError> {
        match self {
            Some(value) => value.write_canonical(out),
            None => Absent.write_canonical(out),
        }
    }
}

impl<T: CanonicalEncode + ?Sized> CanonicalEncode for &T {
    fn write_canonical(&self, out: &mut Vec<u8>) -> Result<(), CodecError> {
        (**self).write_canonical(out)
    }
}

/// Encode an identifier as [`ID_LENGTH`] big-endian bytes.
///
/// # Errors
///
/// Returns `CodecError::IdOverflow` if `value` does not fit the width.
pub fn encode_id(value: u64) -> Result<[u8; ID_LENGTH], CodecError> {
    let bytes = value.to_be_bytes();
    let (high, low) = bytes.split_at(bytes.len() - ID_LENGTH);
    if high.iter().any(|b| *b != 0) {
        return Err(CodecError::IdOverflow {
            value,
            width: ID_LENGTH,
        });
    }
    let mut out = [0u8; ID_LENGTH];
    out.copy_from_slice(low);
    Ok(out)
}

// =============================================================================
// PARSING
// =============================================================================

/// Parse a big-endian unsigned number of up to 64 bits.
pub fn parse_number(bytes: &[u8]) -> Result<u64, CodecError> {
    bytes.iter().try_fold(0u64, |acc, b| {
        acc.checked_mul(256)
            .map(|v| v | u64::from(*b))
            .ok_or(CodecError::NumberOverflow)
    })
}

/// Parse an identifier of exactly [`ID_LENGTH`] bytes.
pub fn parse_id(bytes: &[u8]) -> Result<PartyId, CodecError> {
    if bytes.len() != ID_LENGTH {
        return Err(CodecError::InvalidLength {
            field: "id",
            expected: ID_LENGTH,
            actual: bytes.len(),
        });
    }
    parse_number(bytes).map(PartyId)
}

/// Parse a UTF-8 text field.
pub fn parse_string(bytes: &[u8]) -> Result<String, CodecError> {
    String::from_utf8(bytes.to_vec()).map_err(|_| CodecError::InvalidUtf8("text field"))
}

/// Parse a strict `YYYY-MM-DD` date of exactly [`DATE_LENGTH`] bytes.
pub fn parse_date(bytes: &[u8]) -> Result<NaiveDate, CodecError> {
    if bytes.len() != DATE_LENGTH {
        return Err(CodecError::InvalidLength {
            field: "date",
            expected: DATE_LENGTH,
            actual: bytes.len(),
        });
    }
    let text = std::str::from_utf8(bytes).map_err(|_| CodecError::InvalidUtf8("date"))?;
    let date = NaiveDate::parse_from_str(text, DATE_FORMAT)
        .map_err(|_| CodecError::InvalidDate(text.to_string()))?;

    // chrono tolerates unpadded fields and signs; only the canonical form is accepted.
    if date.format(DATE_FORMAT).to_string() != text {
        return Err(CodecError::InvalidDate(text.to_string()));
    }
    Ok(date)
}

/// Split a signed record into `(content, signature)`.
pub fn split_signature(raw: &[u8]) -> Result<(&[u8], [u8; SIG_LENGTH]), CodecError> {
    let mut reader = ByteReader::new(raw);
    let signature = reader.take_back_array::<SIG_LENGTH>()?;
    Ok((reader.rest(), signature))
}

// =============================================================================
// POSITIONAL READER
// =============================================================================

/// Cursor that consumes fixed-width fields from either end of a buffer.
#[derive(Debug, Clone)]
pub struct ByteReader<'a> {
    buf: &'a [u8],
}

impl<'a> ByteReader<'a> {
    /// Wrap a buffer.
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf }
    }

    /// Bytes not yet consumed.
    pub fn remaining(&self) -> usize {
        self.buf.len()
    }

    /// Consume `n` bytes from the front.
    pub fn take(&mut self, n: usize) -> Result<&'a [u8], CodecError> {
        self.ensure(n)?;
        let (head, tail) = self.buf.split_at(n);
        self.buf = tail;
        Ok(head)
    }

    /// Consume `n` bytes from the back.
    pub fn take_back(&mut self, n: usize) -> Result<&'a [u8], CodecError> {
        self.ensure(n)?;
        let (head, tail) = self.buf.split_at(self.buf.len() - n);
        self.buf = head;
        Ok(tail)
    }

    /// Consume a fixed-size array from the front.
    pub fn take_array<const N: usize>(&mut self) -> Result<[u8; N], CodecError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }

    /// Consume a fixed-size array from the back.
    pub fn take_back_array<const N: usize>(&mut self) -> Result<[u8; N], CodecError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take_back(N)?);
        Ok(out)
    }

    /// Everything left between the front and back cursors.
    pub fn rest(self) -> &'a [u8] {
        self.buf
    }

    fn ensure(&self, n: usize) -> Result<(), CodecError> {
        if self.buf.len() < n {
            return Err(CodecError::TooShort {
                needed: n,
                available: self.buf.len(),
            });
        }
        Ok(())
    }
}
