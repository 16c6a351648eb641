//! # Response
//!
//! Inspector → Service: the single-bit verdict on a Blob.
//!
//! Wire layout: `iid(4) ‖ blob(var, signed) ‖ ttl(20) ‖ answer(1) ‖ sig(64)`.
//! The embedded blob carries its own signature and is recovered positionally
//! between the id and the fixed-width tail.

use serde::{Deserialize, Serialize};
use shared_crypto::{Ed25519KeyPair, Ed25519Signature};
use shared_types::{
    parse_id, split_signature, ByteReader, CanonicalEncode, CodecError, PartyId, ANSWER_LENGTH,
    ID_LENGTH, SIG_LENGTH, TTL_LENGTH,
};

use crate::blob::Blob;
use crate::errors::MessageError;
use crate::signed::{SignedMessage, StructuredForm};
use crate::ttl::Ttl;

/// Inspector's verdict.
///
/// Encoded as the ASCII byte `'1'` (match) or `'0'` (mismatch). An unknown
/// user is indistinguishable from a mismatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Answer {
    #[serde(rename = "1")]
    Match,
    #[serde(rename = "0")]
    Mismatch,
}

impl Answer {
    /// Wire byte.
    pub fn as_byte(self) -> u8 {
        match self {
            Answer::Match => b'1',
            Answer::Mismatch => b'0',
        }
    }

    pub fn from_byte(byte: u8) -> Result<Self, CodecError> {
        match byte {
            b'1' => Ok(Answer::Match),
            b'0' => Ok(Answer::Mismatch),
            other => Err(CodecError::InvalidAnswer(other)),
        }
    }

    pub fn is_match(self) -> bool {
        self == Answer::Match
    }
}

impl From<bool> for Answer {
    fn from(matched: bool) -> Self {
        if matched {
            Answer::Match
        } else {
            Answer::Mismatch
        }
    }
}

impl CanonicalEncode for Answer {
    fn write_canonical(&self, out: &mut Vec<u8>) -> Result<(), CodecError> {
        self.as_byte().write_canonical(out)
    }
}

/// Signed verdict from an Inspector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    iid: PartyId,
    blob: Blob,
    ttl: Ttl,
    answer: Answer,
    signature: Ed25519Signature,
}

impl Response {
    /// Build and sign a response as Inspector `iid`.
    pub fn new(
        iid: PartyId,
        blob: Blob,
        ttl: Ttl,
        answer: Answer,
        signer: &Ed25519KeyPair,
    ) -> Result<Self, MessageError> {
        let mut response = Self::from_parts(
            iid,
            blob,
            ttl,
            answer,
            Ed25519Signature::from_bytes([0u8; SIG_LENGTH]),
        );
        response.signature = signer.sign(&response.content()?);
        Ok(response)
    }

    /// Assemble a response from received fields without signing.
    pub fn from_parts(
        iid: PartyId,
        blob: Blob,
        ttl: Ttl,
        answer: Answer,
        signature: Ed25519Signature,
    ) -> Self {
        Self {
            iid,
            blob,
            ttl,
            answer,
            signature,
        }
    }

    /// Answering Inspector.
    pub fn iid(&self) -> PartyId {
        self.iid
    }

    /// Blob the verdict is about.
    pub fn blob(&self) -> &Blob {
        &self.blob
    }

    pub fn ttl(&self) -> &Ttl {
        &self.ttl
    }

    pub fn answer(&self) -> Answer {
        self.answer
    }
}

impl SignedMessage for Response {
    fn content(&self) -> Result<Vec<u8>, CodecError> {
        let mut out = Vec::new();
        self.iid.write_canonical(&mut out)?;
        self.blob.write_canonical(&mut out)?;
        self.ttl.write_canonical(&mut out)?;
        self.answer.write_canonical(&mut out)?;
        Ok(out)
    }

    fn signature(&self) -> &Ed25519Signature {
        &self.signature
    }

    fn parse(raw: &[u8]) -> Result<Self, MessageError> {
        let (content, signature) = split_signature(raw)?;
        let mut reader = ByteReader::new(content);
        let iid = parse_id(reader.take(ID_LENGTH)?)?;
        let [answer] = reader.take_back_array::<ANSWER_LENGTH>()?;
        let answer = Answer::from_byte(answer)?;
        let ttl = Ttl::parse(reader.take_back(TTL_LENGTH)?)?;
        let blob = Blob::parse(reader.rest())?;

        Ok(Self {
            iid,
            blob,
            ttl,
            answer,
            signature: Ed25519Signature::from_bytes(signature),
        })
    }
}

impl CanonicalEncode for Response {
    fn write_canonical(&self, out: &mut Vec<u8>) -> Result<(), CodecError> {
        out.extend_from_slice(&self.encode()?);
        Ok(())
    }
}

impl StructuredForm for Response {}
