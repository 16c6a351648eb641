//! # Message Errors

use shared_crypto::CryptoError;
use shared_types::CodecError;
use thiserror::Error;

/// Errors raised while building, parsing or converting messages.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MessageError {
    /// Canonical bytes are malformed or a field is out of range
    #[error("Format error: {0}")]
    Format(#[from] CodecError),

    /// Ciphertext failed to decrypt
    #[error("Integrity error: {0}")]
    Integrity(#[from] CryptoError),

    /// Structured form has missing or mistyped fields
    #[error("Structured form error: {0}")]
    Structured(String),
}

impl From<serde_json::Error> for MessageError {
    fn from(e: serde_json::Error) -> Self {
        MessageError::Structured(e.to_string())
    }
}
