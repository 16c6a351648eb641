//! # Audit Checks
//!
//! Re-verify any held message against its sender's registered key, without
//! replaying the handshake. The `authenticate_*` forms report why a message
//! was rejected; the `check_*` forms collapse that to a boolean.

use bi_01_key_authority::KeyDirectory;
use bi_02_messages::{Blob, Request, Response, SignedMessage};
use shared_crypto::Ed25519PublicKey;
use shared_types::PartyId;
use tracing::debug;

use crate::domain::errors::ProtocolError;

/// Request signed by its registered Service.
pub fn authenticate_request(
    directory: &dyn KeyDirectory,
    request: &Request,
) -> Result<(), ProtocolError> {
    let key = directory.service_key(request.srcid())?;
    ensure_signed(request, &key, "request", request.srcid())
}

/// Blob signed by its registered User.
pub fn authenticate_blob(directory: &dyn KeyDirectory, blob: &Blob) -> Result<(), ProtocolError> {
    let key = directory.user_key(blob.uid())?;
    ensure_signed(blob, &key, "blob", blob.uid())
}

/// Response signed by its registered Inspector, and the blob it carries
/// signed by its User.
pub fn authenticate_response(
    directory: &dyn KeyDirectory,
    response: &Response,
) -> Result<(), ProtocolError> {
    let key = directory.inspector_signing_key(response.iid())?;
    ensure_signed(response, &key, "response", response.iid())?;
    authenticate_blob(directory, response.blob())
}

pub fn check_request(directory: &dyn KeyDirectory, request: &Request) -> bool {
    authenticate_request(directory, request).is_ok()
}

pub fn check_blob(directory: &dyn KeyDirectory, blob: &Blob) -> bool {
    authenticate_blob(directory, blob).is_ok()
}

pub fn check_response(directory: &dyn KeyDirectory, response: &Response) -> bool {
    authenticate_response(directory, response).is_ok()
}

fn ensure_signed<M: SignedMessage>(
    message: &M,
    key: &Ed25519PublicKey,
    kind: &'static str,
    signer: PartyId,
) -> Result<(), ProtocolError> {
    if message.verify(key) {
        debug!(kind, signer = %signer, "[Audit] Signature verified");
        Ok(())
    } else {
        Err(ProtocolError::SignatureInvalid { kind, signer })
    }
}
