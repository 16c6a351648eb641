//! # Request
//!
//! Service → User: "disclose your data for `scope` to its Inspector".
//!
//! Wire layout: `srcid(4) ‖ uid(4) ‖ scope(var) ‖ ttl(20) ‖ sig(64)`.
//! The scope is the only variable field, so it is whatever lies between the
//! two ids and the trailing TTL.

use serde::{Deserialize, Serialize};
use shared_crypto::{Ed25519KeyPair, Ed25519Signature};
use shared_types::{
    parse_id, parse_string, split_signature, ByteReader, CanonicalEncode, CodecError, PartyId,
    ID_LENGTH, SIG_LENGTH, TTL_LENGTH,
};

use crate::errors::MessageError;
use crate::signed::{SignedMessage, StructuredForm};
use crate::ttl::Ttl;

/// Signed data request from a Service to a User.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    srcid: PartyId,
    uid: PartyId,
    scope: String,
    ttl: Ttl,
    signature: Ed25519Signature,
}

impl Request {
    /// Build and sign a request as Service `srcid`.
    pub fn new(
        srcid: PartyId,
        uid: PartyId,
        scope: impl Into<String>,
        ttl: Ttl,
        signer: &Ed25519KeyPair,
    ) -> Result<Self, MessageError> {
        let mut request = Self::from_parts(
            srcid,
            uid,
            scope,
            ttl,
            Ed25519Signature::from_bytes([0u8; SIG_LENGTH]),
        );
        request.signature = signer.sign(&request.content()?);
        Ok(request)
    }

    /// Assemble a request from received fields without signing.
    pub fn from_parts(
        srcid: PartyId,
        uid: PartyId,
        scope: impl Into<String>,
        ttl: Ttl,
        signature: Ed25519Signature,
    ) -> Self {
        Self {
            srcid,
            uid,
            scope: scope.into(),
            ttl,
            signature,
        }
    }

    /// Requesting Service.
    pub fn srcid(&self) -> PartyId {
        self.srcid
    }

    /// User the request is addressed to.
    pub fn uid(&self) -> PartyId {
        self.uid
    }

    pub fn scope(&self) -> &str {
        &self.scope
    }

    pub fn ttl(&self) -> &Ttl {
        &self.ttl
    }
}

impl SignedMessage for Request {
    fn content(&self) -> Result<Vec<u8>, CodecError> {
        let mut out = Vec::with_capacity(2 * ID_LENGTH + self.scope.len() + TTL_LENGTH);
        self.srcid.write_canonical(&mut out)?;
        self.uid.write_canonical(&mut out)?;
        self.scope.write_canonical(&mut out)?;
        self.ttl.write_canonical(&mut out)?;
        Ok(out)
    }

    fn signature(&self) -> &Ed25519Signature {
        &self.signature
    }

    fn parse(raw: &[u8]) -> Result<Self, MessageError> {
        let (content, signature) = split_signature(raw)?;
        let mut reader = ByteReader::new(content);
        let srcid = parse_id(reader.take(ID_LENGTH)?)?;
        let uid = parse_id(reader.take(ID_LENGTH)?)?;
        let ttl = Ttl::parse(reader.take_back(TTL_LENGTH)?)?;
        let scope = parse_string(reader.rest())?;

        Ok(Self {
            srcid,
            uid,
            scope,
            ttl,
            signature: Ed25519Signature::from_bytes(signature),
        })
    }
}

/// Nested requests travel in their full signed form.
impl CanonicalEncode for Request {
    fn write_canonical(&self, out: &mut Vec<u8>) -> Result<(), CodecError> {
        out.extend_from_slice(&self.encode()?);
        Ok(())
    }
}

impl StructuredForm for Request {}
