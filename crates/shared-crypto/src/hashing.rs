//! # BLAKE3 Key Derivation
//!
//! Turns raw Diffie-Hellman output into uniformly distributed symmetric keys.

/// Derive key from context and input key material.
///
/// `context` must be a hardcoded, globally unique string.
pub fn blake3_derive_key(context: &str, key_material: &[u8]) -> [u8; 32] {
    blake3::derive_key(context, key_material)
}
