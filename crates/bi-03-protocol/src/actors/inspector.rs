//! # Inspector
//!
//! Authority over one scope. Holds the reference secrets for that scope,
//! opens Blobs sealed to its agreement key, and signs a single-bit verdict.
//!
//! ## Verification Order
//!
//! 1. This Inspector is registered in the directory for its own scope
//! 2. Blob signature under the User's registered key
//! 3. Re-derive the reply key, decrypt, parse
//! 4. Embedded Request equals the expected Request (no cross-request replay)
//! 5. Request addressed to the Blob's User and this Inspector's scope, and
//!    signed by its Service
//! 6. Request window accepted by policy
//! 7. Constant-time comparison against the ledger
//!
//! An unknown User and a wrong secret produce the same `Mismatch` answer.

use std::collections::HashMap;

use bi_01_key_authority::InspectorRecord;
use bi_02_messages::{Answer, Blob, ReplyContent, Request, Response};
use bi_telemetry::{log_event, log_message_event};
use parking_lot::RwLock;
use shared_crypto::{Ed25519KeyPair, SecretKey, X25519KeyPair};
use shared_types::PartyId;
use subtle::ConstantTimeEq;
use tracing::debug;
use zeroize::Zeroizing;

use super::{random_party_id, receive, send, Environment, Party};
use crate::audit;
use crate::domain::errors::ProtocolError;

/// Scope authority answering match/mismatch.
pub struct Inspector {
    id: PartyId,
    scope: String,
    signing: Ed25519KeyPair,
    agreement: X25519KeyPair,
    env: Environment,
    ledger: RwLock<HashMap<PartyId, Zeroizing<String>>>,
}

impl Inspector {
    pub fn new(
        id: PartyId,
        scope: impl Into<String>,
        signing: Ed25519KeyPair,
        agreement: X25519KeyPair,
        env: Environment,
    ) -> Self {
        Self {
            id,
            scope: scope.into(),
            signing,
            agreement,
            env,
            ledger: RwLock::new(HashMap::new()),
        }
    }

    /// Random id and keys.
    pub fn generate(scope: impl Into<String>, env: Environment) -> Self {
        Self::new(
            random_party_id(),
            scope,
            Ed25519KeyPair::generate(),
            X25519KeyPair::generate(),
            env,
        )
    }

    pub fn scope(&self) -> &str {
        &self.scope
    }

    /// Record the reference secret for `uid`. Replaces any earlier entry.
    pub fn add_user(&self, uid: PartyId, secdata: impl Into<String>) {
        self.ledger
            .write()
            .insert(uid, Zeroizing::new(secdata.into()));
        log_event!(info, "inspector", "Ledger entry recorded", inspector = %self.id, uid = %uid);
    }

    // =========================================================================
    // Decryption
    // =========================================================================

    /// Reply key shared with the Blob's sender.
    pub fn session_key(&self, blob: &Blob) -> Result<SecretKey, ProtocolError> {
        Ok(self.agreement.derive(blob.ephemeral_pub())?)
    }

    /// Open the Blob's sealed reply.
    pub fn decrypt_blob(&self, blob: &Blob, key: &SecretKey) -> Result<ReplyContent, ProtocolError> {
        Ok(ReplyContent::open(key, blob.reply())?)
    }

    // =========================================================================
    // Verification
    // =========================================================================

    /// Check `blob` against the Request it should answer and sign a verdict.
    ///
    /// Authenticity and binding failures are errors; only the secret
    /// comparison produces the in-band `Mismatch`.
    pub fn verify_blob(
        &self,
        blob: &Blob,
        expected: &Request,
    ) -> Result<Response, ProtocolError> {
        let result = self.judge(blob, expected).and_then(|answer| {
            let ttl = self.env.config().response_ttl(self.env.today());
            Ok(Response::new(self.id, blob.clone(), ttl, answer, &self.signing)?)
        });

        match &result {
            Ok(_) => log_message_event!(
                info,
                "inspector",
                "Response signed",
                "response",
                self.id,
                expected.srcid()
            ),
            Err(e) => log_message_event!(
                warn,
                "inspector",
                "Blob rejected",
                "blob",
                blob.uid(),
                self.id,
                error = %e
            ),
        }
        result
    }

    fn judge(&self, blob: &Blob, expected: &Request) -> Result<Answer, ProtocolError> {
        let directory = self.env.directory();
        let registered = directory.inspector_scope(self.id)?;
        if registered != self.scope {
            return Err(ProtocolError::BindingMismatch(format!(
                "inspector {} is registered for scope {:?}, not {:?}",
                self.id, registered, self.scope
            )));
        }
        audit::authenticate_blob(directory, blob)?;

        let key = self.session_key(blob)?;
        let reply = self.decrypt_blob(blob, &key)?;

        if reply.request() != expected {
            return Err(ProtocolError::BindingMismatch(
                "sealed request differs from the expected request".to_string(),
            ));
        }
        if expected.uid() != blob.uid() {
            return Err(ProtocolError::BindingMismatch(format!(
                "request addressed to user {} but blob signed by {}",
                expected.uid(),
                blob.uid()
            )));
        }
        if expected.scope() != self.scope {
            return Err(ProtocolError::BindingMismatch(format!(
                "request scope {:?} is not this inspector's scope",
                expected.scope()
            )));
        }
        audit::authenticate_request(directory, expected)?;
        self.env
            .config()
            .check_request_window(expected.ttl(), self.env.today())?;

        let answer = Answer::from(self.matches(blob.uid(), reply.secdata()));
        debug!(inspector = %self.id, uid = %blob.uid(), answer = ?answer, "[Inspector] Secret compared");
        Ok(answer)
    }

    fn matches(&self, uid: PartyId, disclosed: &str) -> bool {
        let ledger = self.ledger.read();
        match ledger.get(&uid) {
            Some(stored) => stored.as_bytes().ct_eq(disclosed.as_bytes()).into(),
            None => false,
        }
    }

    // =========================================================================
    // Transport boundary
    // =========================================================================

    /// Accept a relayed Blob, checking its User signature.
    pub fn receive_blob(&self, raw: &[u8]) -> Result<Blob, ProtocolError> {
        receive(raw, |blob| audit::authenticate_blob(self.env.directory(), blob))
    }

    pub fn send_response(&self, response: &Response) -> Result<Vec<u8>, ProtocolError> {
        send(response)
    }
}

impl Party for Inspector {
    fn id(&self) -> PartyId {
        self.id
    }

    fn environment(&self) -> &Environment {
        &self.env
    }

    fn register(&self) -> Result<(), ProtocolError> {
        self.env.directory().register_inspector(InspectorRecord {
            id: self.id,
            scope: self.scope.clone(),
            signing_key: self.signing.public_key(),
            agreement_key: self.agreement.public_key(),
        })?;
        Ok(())
    }
}

impl std::fmt::Debug for Inspector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Inspector")
            .field("id", &self.id)
            .field("scope", &self.scope)
            .field("ledger_entries", &self.ledger.read().len())
            .finish_non_exhaustive()
    }
}
