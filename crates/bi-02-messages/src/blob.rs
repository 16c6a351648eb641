//! # Blob
//!
//! User → Inspector (relayed by the Service): the sealed reply.
//!
//! Wire layout: `ephemeral_pub(32) ‖ uid(4) ‖ reply(IV ‖ ciphertext) ‖ sig(64)`.
//! A single trailing signature covers all three fields.

use serde::{Deserialize, Serialize};
use serde_with::{hex::Hex, serde_as};
use shared_crypto::{AgreementPublicKey, Ed25519KeyPair, Ed25519Signature, AGREEMENT_KEY_LENGTH};
use shared_types::{
    parse_id, split_signature, ByteReader, CanonicalEncode, CodecError, PartyId, Raw, ID_LENGTH,
    SIG_LENGTH,
};

use crate::errors::MessageError;
use crate::signed::{SignedMessage, StructuredForm};

/// Signed, encrypted reply from a User.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Blob {
    ephemeral_pub: AgreementPublicKey,
    uid: PartyId,
    #[serde_as(as = "Hex")]
    reply: Vec<u8>,
    signature: Ed25519Signature,
}

impl Blob {
    /// Build and sign a blob as User `uid`.
    pub fn new(
        ephemeral_pub: AgreementPublicKey,
        uid: PartyId,
        reply: Vec<u8>,
        signer: &Ed25519KeyPair,
    ) -> Result<Self, MessageError> {
        let mut blob = Self::from_parts(
            ephemeral_pub,
            uid,
            reply,
            Ed25519Signature::from_bytes([0u8; SIG_LENGTH]),
        );
        blob.signature = signer.sign(&blob.content()?);
        Ok(blob)
    }

    /// Assemble a blob from received fields without signing.
    pub fn from_parts(
        ephemeral_pub: AgreementPublicKey,
        uid: PartyId,
        reply: Vec<u8>,
        signature: Ed25519Signature,
    ) -> Self {
        Self {
            ephemeral_pub,
            uid,
            reply,
            signature,
        }
    }

    /// User's one-time agreement key for this reply.
    pub fn ephemeral_pub(&self) -> &AgreementPublicKey {
        &self.ephemeral_pub
    }

    pub fn uid(&self) -> PartyId {
        self.uid
    }

    /// Sealed `ReplyContent`, `IV ‖ ciphertext`.
    pub fn reply(&self) -> &[u8] {
        &self.reply
    }
}

impl SignedMessage for Blob {
    fn content(&self) -> Result<Vec<u8>, CodecError> {
        let mut out = Vec::with_capacity(AGREEMENT_KEY_LENGTH + ID_LENGTH + self.reply.len());
        Raw(self.ephemeral_pub.as_bytes()).write_canonical(&mut out)?;
        self.uid.write_canonical(&mut out)?;
        Raw(&self.reply).write_canonical(&mut out)?;
        Ok(out)
    }

    fn signature(&self) -> &Ed25519Signature {
        &self.signature
    }

    fn parse(raw: &[u8]) -> Result<Self, MessageError> {
        let (content, signature) = split_signature(raw)?;
        let mut reader = ByteReader::new(content);
        let ephemeral_pub = AgreementPublicKey::from_bytes(reader.take_array()?);
        let uid = parse_id(reader.take(ID_LENGTH)?)?;
        let reply = reader.rest().to_vec();

        Ok(Self {
            ephemeral_pub,
            uid,
            reply,
            signature: Ed25519Signature::from_bytes(signature),
        })
    }
}

/// Nested blobs travel in their full signed form.
impl CanonicalEncode for Blob {
    fn write_canonical(&self, out: &mut Vec<u8>) -> Result<(), CodecError> {
        out.extend_from_slice(&self.encode()?);
        Ok(())
    }
}

impl StructuredForm for Blob {}
