//! # Core Entities
//!
//! Party identifiers and the wire-width constants held consistent system-wide.

use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// WIRE WIDTHS
// =============================================================================

/// Width of an encoded party identifier (bytes, big-endian).
pub const ID_LENGTH: usize = 4;

/// Width of an encoded `YYYY-MM-DD` date.
pub const DATE_LENGTH: usize = 10;

/// Width of an encoded TTL (`produced ‖ expired`).
pub const TTL_LENGTH: usize = 2 * DATE_LENGTH;

/// Width of the trailing signature on every signed record.
pub const SIG_LENGTH: usize = 64;

/// Width of the byte count that precedes the Request embedded in a reply.
pub const REQUEST_LEN_LENGTH: usize = 4;

/// Width of the answer byte carried by a Response.
pub const ANSWER_LENGTH: usize = 1;

/// Width of the per-reply random salt.
pub const SALT_LENGTH: usize = 32;

// =============================================================================
// IDENTIFIERS
// =============================================================================

/// Identifier of a User, Service or Inspector.
///
/// Users, Services and Inspectors are independent namespaces: the same numeric
/// value may name one party of each kind. Held as `u64` so that values arriving
/// from structured channels can be range-checked against [`ID_LENGTH`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct PartyId(pub u64);

impl PartyId {
    /// Largest identifier that fits the wire width.
    pub const MAX: u64 = u64::MAX >> (64 - 8 * ID_LENGTH as u32);

    /// Create an identifier.
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Numeric value.
    pub const fn value(&self) -> u64 {
        self.0
    }

    /// Whether the identifier can be encoded in [`ID_LENGTH`] bytes.
    pub const fn fits_wire(&self) -> bool {
        self.0 <= Self::MAX
    }
}

impl From<u64> for PartyId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for PartyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
