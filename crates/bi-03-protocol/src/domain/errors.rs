//! # Protocol Errors
//!
//! Every structural or authenticity failure is a distinct variant. The only
//! negative outcome that is not an error is a mismatch answer.

use bi_01_key_authority::AuthorityError;
use bi_02_messages::{MessageError, Ttl};
use chrono::NaiveDate;
use shared_crypto::CryptoError;
use shared_types::{CodecError, PartyId};
use thiserror::Error;

/// Errors raised by protocol actors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProtocolError {
    /// Malformed bytes, bad field text, or an unencodable value
    #[error("Format error: {0}")]
    Format(MessageError),

    /// Party id or scope is not in the directory
    #[error("Unknown identity: {0}")]
    UnknownIdentity(AuthorityError),

    /// Signature did not verify under the sender's registered key
    #[error("Invalid {kind} signature from {signer}")]
    SignatureInvalid { kind: &'static str, signer: PartyId },

    /// Message is authentic but not bound to what the receiver expects
    #[error("Binding mismatch: {0}")]
    BindingMismatch(String),

    /// Ciphertext or agreement key rejected
    #[error("Integrity error: {0}")]
    Integrity(CryptoError),

    /// Validity window does not cover the current date
    #[error("Validity window {}..{} does not cover {today}", .ttl.produced(), .ttl.expired())]
    Expired { ttl: Ttl, today: NaiveDate },

    /// Validity window is inverted or longer than policy allows
    #[error("Invalid validity window: {0}")]
    InvalidWindow(String),

    /// User holds no secret for the requested scope
    #[error("No secret stored for scope {0:?}")]
    NoSecretForScope(String),

    /// Directory refused the registration
    #[error("Registration failed: {0}")]
    Registration(AuthorityError),

    /// Invalid protocol configuration
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl From<MessageError> for ProtocolError {
    fn from(e: MessageError) -> Self {
        match e {
            MessageError::Integrity(crypto) => ProtocolError::Integrity(crypto),
            other => ProtocolError::Format(other),
        }
    }
}

impl From<CodecError> for ProtocolError {
    fn from(e: CodecError) -> Self {
        ProtocolError::Format(MessageError::Format(e))
    }
}

impl From<CryptoError> for ProtocolError {
    fn from(e: CryptoError) -> Self {
        ProtocolError::Integrity(e)
    }
}

/// Lookups map to `UnknownIdentity`, conflicts to `Registration`.
impl From<AuthorityError> for ProtocolError {
    fn from(e: AuthorityError) -> Self {
        if e.is_not_found() {
            ProtocolError::UnknownIdentity(e)
        } else {
            ProtocolError::Registration(e)
        }
    }
}
