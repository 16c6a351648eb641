//! Crypto error types.

use thiserror::Error;

/// Cryptographic operation errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CryptoError {
    /// Ciphertext is not block-aligned, too short, or badly padded
    #[error("Integrity error: {0}")]
    Integrity(String),

    /// Signature verification failed
    #[error("Signature verification failed")]
    SignatureVerificationFailed,

    /// Invalid public key
    #[error("Invalid public key")]
    InvalidPublicKey,

    /// Key agreement produced a non-contributory secret
    #[error("Key agreement failed: peer key has low order")]
    NonContributory,
}
