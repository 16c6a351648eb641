//! # Reply Content
//!
//! Plaintext the User seals for the Inspector. Never transmitted in the clear.
//!
//! Layout: `req_len(4) ‖ request(req_len) ‖ secdata(var) ‖ salt(32)`.
//! The length prefix delimits the embedded request, which itself carries a
//! variable-length scope.

use rand::RngCore;
use serde::{Deserialize, Serialize};
use serde_with::{hex::Hex, serde_as};
use shared_crypto::{decrypt, encrypt, SecretKey};
use shared_types::{
    parse_number, parse_string, ByteReader, CanonicalEncode, CodecError, REQUEST_LEN_LENGTH,
    SALT_LENGTH,
};

use crate::errors::MessageError;
use crate::request::Request;
use crate::signed::{SignedMessage, StructuredForm};

const _: () = assert!(REQUEST_LEN_LENGTH == std::mem::size_of::<u32>());

/// Request, disclosed secret and per-reply salt.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplyContent {
    request: Request,
    secdata: String,
    #[serde_as(as = "Hex")]
    salt: [u8; SALT_LENGTH],
}

impl ReplyContent {
    /// Bind `secdata` to `request` under a fresh random salt.
    pub fn new(request: Request, secdata: impl Into<String>) -> Self {
        let mut salt = [0u8; SALT_LENGTH];
        rand::thread_rng().fill_bytes(&mut salt);
        Self::with_salt(request, secdata, salt)
    }

    /// Build with a caller-chosen salt.
    pub fn with_salt(request: Request, secdata: impl Into<String>, salt: [u8; SALT_LENGTH]) -> Self {
        Self {
            request,
            secdata: secdata.into(),
            salt,
        }
    }

    pub fn request(&self) -> &Request {
        &self.request
    }

    pub fn secdata(&self) -> &str {
        &self.secdata
    }

    pub fn salt(&self) -> &[u8; SALT_LENGTH] {
        &self.salt
    }

    /// Parse the plaintext layout.
    pub fn parse(raw: &[u8]) -> Result<Self, MessageError> {
        let mut reader = ByteReader::new(raw);
        let request_len = parse_number(reader.take(REQUEST_LEN_LENGTH)?)?;
        let request_len = usize::try_from(request_len).map_err(|_| CodecError::NumberOverflow)?;
        let request = Request::parse(reader.take(request_len)?)?;
        let salt = reader.take_back_array::<SALT_LENGTH>()?;
        let secdata = parse_string(reader.rest())?;

        Ok(Self {
            request,
            secdata,
            salt,
        })
    }

    /// Encrypt under `key`, returning `IV ‖ ciphertext`.
    pub fn seal(&self, key: &SecretKey) -> Result<Vec<u8>, MessageError> {
        Ok(encrypt(key, &self.canonical_bytes()?))
    }

    /// Decrypt and parse. Decryption failures surface as
    /// `MessageError::Integrity`, layout failures as `MessageError::Format`.
    pub fn open(key: &SecretKey, sealed: &[u8]) -> Result<Self, MessageError> {
        let plaintext = decrypt(key, sealed)?;
        Self::parse(&plaintext)
    }
}

impl CanonicalEncode for ReplyContent {
    fn write_canonical(&self, out: &mut Vec<u8>) -> Result<(), CodecError> {
        let request = self.request.encode()?;
        let request_len = u32::try_from(request.len()).map_err(|_| CodecError::NumberOverflow)?;

        out.extend_from_slice(&request_len.to_be_bytes());
        out.extend_from_slice(&request);
        self.secdata.write_canonical(out)?;
        out.extend_from_slice(&self.salt);
        Ok(())
    }
}

impl StructuredForm for ReplyContent {}
