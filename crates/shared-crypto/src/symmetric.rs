//! # Symmetric Encryption
//!
//! AES-256 in CBC mode with PKCS#7 padding. A random IV is generated per
//! encryption and prepended in cleartext: the output is `IV ‖ ciphertext`.
//!
//! ## Security Properties
//!
//! - IV is public but never reused for a key in practice (random 128-bit)
//! - Each key encrypts a single reply; integrity of the whole reply is carried
//!   by the sender's signature over the ciphertext

use crate::CryptoError;
use cbc::cipher::{block_padding::Pkcs7, BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use zeroize::Zeroize;

type Aes256CbcEnc = cbc::Encryptor<aes::Aes256>;
type Aes256CbcDec = cbc::Decryptor<aes::Aes256>;

/// Cipher block width in bytes.
pub const BLOCK_LENGTH: usize = 16;

/// IV width in bytes.
pub const IV_LENGTH: usize = BLOCK_LENGTH;

/// Secret key (256-bit).
#[derive(Clone, Zeroize)]
#[zeroize(drop)]
pub struct SecretKey([u8; 32]);

impl SecretKey {
    /// Create from bytes.
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Get inner bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl std::fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SecretKey(..)")
    }
}

/// Initialization vector for CBC.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Iv([u8; IV_LENGTH]);

impl Iv {
    /// Create from bytes.
    pub fn from_bytes(bytes: [u8; IV_LENGTH]) -> Self {
        Self(bytes)
    }

    /// Generate random IV.
    pub fn generate() -> Self {
        let mut bytes = [0u8; IV_LENGTH];
        rand::RngCore::fill_bytes(&mut rand::thread_rng(), &mut bytes);
        Self(bytes)
    }

    /// Get inner bytes.
    pub fn as_bytes(&self) -> &[u8; IV_LENGTH] {
        &self.0
    }
}

/// Encrypt plaintext under a fresh random IV.
///
/// Returns `IV ‖ ciphertext`.
pub fn encrypt(key: &SecretKey, plaintext: &[u8]) -> Vec<u8> {
    encrypt_with_iv(key, &Iv::generate(), plaintext)
}

/// Encrypt plaintext under the given IV.
///
/// Returns `IV ‖ ciphertext`.
pub fn encrypt_with_iv(key: &SecretKey, iv: &Iv, plaintext: &[u8]) -> Vec<u8> {
    let cipher = Aes256CbcEnc::new(key.as_bytes().into(), iv.as_bytes().into());
    let ciphertext = cipher.encrypt_padded_vec_mut::<Pkcs7>(plaintext);

    let mut out = Vec::with_capacity(IV_LENGTH + ciphertext.len());
    out.extend_from_slice(iv.as_bytes());
    out.extend_from_slice(&ciphertext);
    out
}

/// Decrypt `IV ‖ ciphertext`.
///
/// # Errors
///
/// Returns `CryptoError::Integrity` if the input is shorter than an IV plus one
/// block, the ciphertext is not block-aligned, or the padding is malformed.
pub fn decrypt(key: &SecretKey, data: &[u8]) -> Result<Vec<u8>, CryptoError> {
    if data.len() < IV_LENGTH + BLOCK_LENGTH {
        return Err(CryptoError::Integrity(format!(
            "ciphertext of {} bytes is shorter than IV plus one block",
            data.len()
        )));
    }
    let (iv, ciphertext) = data.split_at(IV_LENGTH);
    if ciphertext.len() % BLOCK_LENGTH != 0 {
        return Err(CryptoError::Integrity(format!(
            "ciphertext length {} is not a multiple of {BLOCK_LENGTH}",
            ciphertext.len()
        )));
    }

    let mut iv_bytes = [0u8; IV_LENGTH];
    iv_bytes.copy_from_slice(iv);
    let cipher = Aes256CbcDec::new(key.as_bytes().into(), (&iv_bytes).into());

    cipher
        .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
        .map_err(|_| CryptoError::Integrity("invalid padding".to_string()))
}
