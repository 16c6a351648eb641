//! # X25519 Key Agreement
//!
//! The Inspector publishes a static agreement key; the User generates a fresh
//! ephemeral pair for every reply. Both sides feed the raw Diffie-Hellman
//! output through BLAKE3 `derive_key` to obtain the AES-256 key.
//!
//! ## Security Properties
//!
//! - Ephemeral pairs are consumed on use (forward secrecy per reply)
//! - Low-order peer keys are rejected (`was_contributory`)
//! - Secret scalars zeroized on drop

use crate::hashing::blake3_derive_key;
use crate::symmetric::SecretKey;
use crate::CryptoError;
use serde::{Deserialize, Serialize};
use serde_with::{hex::Hex, serde_as};
use x25519_dalek::{PublicKey, StaticSecret};

/// Width of an encoded agreement public key in bytes.
pub const AGREEMENT_KEY_LENGTH: usize = 32;

/// KDF context binding derived keys to reply encryption.
const REPLY_KEY_CONTEXT: &str = "blind-inspect 2024-01-01 reply encryption key v1";

/// X25519 public key (32 bytes).
#[serde_as]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AgreementPublicKey(#[serde_as(as = "Hex")] [u8; AGREEMENT_KEY_LENGTH]);

impl AgreementPublicKey {
    /// Create from bytes. Every 32-byte string is a valid X25519 public key.
    pub fn from_bytes(bytes: [u8; AGREEMENT_KEY_LENGTH]) -> Self {
        Self(bytes)
    }

    /// Get raw bytes.
    pub fn as_bytes(&self) -> &[u8; AGREEMENT_KEY_LENGTH] {
        &self.0
    }
}

/// Static agreement keypair held by an Inspector.
pub struct X25519KeyPair {
    secret: StaticSecret,
}

impl X25519KeyPair {
    /// Generate random keypair.
    pub fn generate() -> Self {
        Self {
            secret: StaticSecret::random_from_rng(rand::thread_rng()),
        }
    }

    /// Create from secret bytes (32 bytes).
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self {
            secret: StaticSecret::from(bytes),
        }
    }

    /// Get public key.
    pub fn public_key(&self) -> AgreementPublicKey {
        AgreementPublicKey(PublicKey::from(&self.secret).to_bytes())
    }

    /// Derive the symmetric key shared with `peer`.
    pub fn derive(&self, peer: &AgreementPublicKey) -> Result<SecretKey, CryptoError> {
        derive_shared(&self.secret, peer)
    }
}

/// Single-use agreement keypair generated by a User for one reply.
pub struct EphemeralKeyPair {
    secret: StaticSecret,
}

impl EphemeralKeyPair {
    /// Generate random keypair.
    pub fn generate() -> Self {
        Self {
            secret: StaticSecret::random_from_rng(rand::thread_rng()),
        }
    }

    /// Create from secret bytes. Intended for deterministic tests.
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self {
            secret: StaticSecret::from(bytes),
        }
    }

    /// Get public key.
    pub fn public_key(&self) -> AgreementPublicKey {
        AgreementPublicKey(PublicKey::from(&self.secret).to_bytes())
    }

    /// Derive the symmetric key shared with `peer`, consuming the pair.
    pub fn derive(self, peer: &AgreementPublicKey) -> Result<SecretKey, CryptoError> {
        derive_shared(&self.secret, peer)
    }
}

impl std::fmt::Debug for X25519KeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("X25519KeyPair")
            .field("public_key", &self.public_key())
            .finish_non_exhaustive()
    }
}

fn derive_shared(secret: &StaticSecret, peer: &AgreementPublicKey) -> Result<SecretKey, CryptoError> {
    let shared = secret.diffie_hellman(&PublicKey::from(peer.0));
    if !shared.was_contributory() {
        return Err(CryptoError::NonContributory);
    }
    Ok(SecretKey::from_bytes(blake3_derive_key(
        REPLY_KEY_CONTEXT,
        shared.as_bytes(),
    )))
}
