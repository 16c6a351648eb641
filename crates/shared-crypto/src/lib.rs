//! # Shared Crypto - Protocol Primitives
//!
//! Uniform primitive interface so message types never touch algorithm internals.
//!
//! ## Components
//!
//! | Module | Algorithm | Use Case |
//! |--------|-----------|----------|
//! | `signatures` | Ed25519 | Binding every message to its sender |
//! | `agreement` | X25519 + BLAKE3 KDF | User/Inspector shared reply key |
//! | `symmetric` | AES-256-CBC, PKCS#7 | Reply encryption |
//! | `hashing` | BLAKE3 | Key derivation |
//!
//! ## Security Properties
//!
//! - **Ed25519**: Deterministic nonces, no RNG dependency when signing
//! - **X25519**: Fresh ephemeral pair per reply; low-order peer keys rejected
//! - **CBC**: Random IV per encryption, prepended in cleartext

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod agreement;
pub mod errors;
pub mod hashing;
pub mod signatures;
pub mod symmetric;

// Re-exports
pub use agreement::{AgreementPublicKey, EphemeralKeyPair, X25519KeyPair, AGREEMENT_KEY_LENGTH};
pub use errors::CryptoError;
pub use hashing::blake3_derive_key;
pub use signatures::{
    verify_signature, Ed25519KeyPair, Ed25519PublicKey, Ed25519Signature, SIGNATURE_LENGTH,
};
pub use symmetric::{decrypt, encrypt, encrypt_with_iv, Iv, SecretKey, BLOCK_LENGTH, IV_LENGTH};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
