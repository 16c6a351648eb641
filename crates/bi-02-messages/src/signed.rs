//! # Shared Message Behaviour
//!
//! Every signed message is `content ‖ signature`, where `content` is the
//! canonical encoding of its fields in declaration order. Every message also
//! has a structured form: a serde field map with byte fields in hex.

use serde::de::DeserializeOwned;
use serde::Serialize;
use shared_crypto::{verify_signature, Ed25519PublicKey, Ed25519Signature};
use shared_types::{CanonicalEncode, CodecError};

use crate::errors::MessageError;

/// A message trailing a signature over its canonical content.
pub trait SignedMessage: Sized {
    /// Canonical bytes the signature covers.
    fn content(&self) -> Result<Vec<u8>, CodecError>;

    /// Trailing signature.
    fn signature(&self) -> &Ed25519Signature;

    /// Parse `content ‖ signature`.
    fn parse(raw: &[u8]) -> Result<Self, MessageError>;

    /// Full signed encoding, `content ‖ signature`.
    fn encode(&self) -> Result<Vec<u8>, CodecError> {
        let mut out = self.content()?;
        out.extend_from_slice(self.signature().as_bytes());
        Ok(out)
    }

    /// Whether the signature verifies under `key`.
    ///
    /// A message whose content cannot be encoded never verifies.
    fn verify(&self, key: &Ed25519PublicKey) -> bool {
        match self.content() {
            Ok(content) => verify_signature(key, &content, self.signature()),
            Err(_) => false,
        }
    }
}

/// Conversion to and from the structured (field map) representation.
pub trait StructuredForm: Serialize + DeserializeOwned + CanonicalEncode {
    /// Field map of this message.
    fn to_structured(&self) -> Result<serde_json::Value, MessageError> {
        Ok(serde_json::to_value(self)?)
    }

    /// Rebuild from a field map.
    ///
    /// The result is re-encoded once so that values which cannot be put on
    /// the wire (oversized ids, dates beyond four-digit years) are rejected
    /// here rather than at first use.
    fn from_structured(value: serde_json::Value) -> Result<Self, MessageError> {
        let message: Self = serde_json::from_value(value)?;
        message.canonical_bytes()?;
        Ok(message)
    }
}
