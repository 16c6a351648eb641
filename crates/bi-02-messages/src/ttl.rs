//! # Validity Window

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use shared_types::{parse_date, ByteReader, CanonicalEncode, CodecError, DATE_LENGTH, TTL_LENGTH};

use crate::errors::MessageError;
use crate::signed::StructuredForm;

/// Time-to-live window `[produced, expired]`, inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Ttl {
    produced: NaiveDate,
    expired: NaiveDate,
}

impl Ttl {
    pub fn new(produced: NaiveDate, expired: NaiveDate) -> Self {
        Self { produced, expired }
    }

    pub fn produced(&self) -> NaiveDate {
        self.produced
    }

    pub fn expired(&self) -> NaiveDate {
        self.expired
    }

    /// True once `date` is past the last valid day.
    pub fn is_expired_at(&self, date: NaiveDate) -> bool {
        date > self.expired
    }

    /// True when the window is not inverted.
    pub fn is_well_formed(&self) -> bool {
        self.produced <= self.expired
    }

    /// Length of the window in days (negative if inverted).
    pub fn validity_days(&self) -> i64 {
        (self.expired - self.produced).num_days()
    }

    /// Parse exactly [`TTL_LENGTH`] bytes.
    pub fn parse(raw: &[u8]) -> Result<Self, MessageError> {
        if raw.len() != TTL_LENGTH {
            return Err(CodecError::InvalidLength {
                field: "ttl",
                expected: TTL_LENGTH,
                actual: raw.len(),
            }
            .into());
        }
        let mut reader = ByteReader::new(raw);
        let produced = parse_date(reader.take(DATE_LENGTH)?)?;
        let expired = parse_date(reader.rest())?;
        Ok(Self { produced, expired })
    }
}

impl CanonicalEncode for Ttl {
    fn write_canonical(&self, out: &mut Vec<u8>) -> Result<(), CodecError> {
        self.produced.write_canonical(out)?;
        self.expired.write_canonical(out)
    }
}

impl StructuredForm for Ttl {}
