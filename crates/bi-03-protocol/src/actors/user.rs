//! # User
//!
//! Data subject. Answers a Service's Request by sealing its secret for the
//! Inspector that owns the requested scope. The Service never sees the secret.

use std::collections::HashMap;

use bi_02_messages::{Blob, ReplyContent, Request};
use bi_telemetry::log_message_event;
use shared_crypto::{Ed25519KeyPair, EphemeralKeyPair};
use shared_types::PartyId;
use tracing::debug;
use zeroize::Zeroizing;

use super::{random_party_id, receive, send, Environment, Party};
use crate::audit;
use crate::domain::errors::ProtocolError;

/// A data subject holding secrets per scope.
pub struct User {
    id: PartyId,
    keys: Ed25519KeyPair,
    env: Environment,
    wallet: HashMap<String, Zeroizing<String>>,
}

impl User {
    pub fn new(id: PartyId, keys: Ed25519KeyPair, env: Environment) -> Self {
        Self {
            id,
            keys,
            env,
            wallet: HashMap::new(),
        }
    }

    /// Random id and keys.
    pub fn generate(env: Environment) -> Self {
        Self::new(random_party_id(), Ed25519KeyPair::generate(), env)
    }

    /// Keep this User's own copy of the secret for `scope`.
    pub fn store_secret(&mut self, scope: impl Into<String>, secdata: impl Into<String>) {
        self.wallet
            .insert(scope.into(), Zeroizing::new(secdata.into()));
    }

    /// Answer `request` with the stored secret for its scope.
    pub fn disclose(&self, request: &Request) -> Result<Blob, ProtocolError> {
        let secdata = self
            .wallet
            .get(request.scope())
            .ok_or_else(|| ProtocolError::NoSecretForScope(request.scope().to_string()))?;
        self.create_blob(request, secdata.as_str())
    }

    /// Answer `request` by sealing `secdata` under a fresh ephemeral key.
    pub fn create_blob(&self, request: &Request, secdata: &str) -> Result<Blob, ProtocolError> {
        self.create_blob_with_ephemeral(request, secdata, EphemeralKeyPair::generate())
    }

    /// Answer `request` using the supplied ephemeral key pair, which is
    /// consumed.
    ///
    /// # Errors
    ///
    /// * `UnknownIdentity` - Service, scope or Inspector not registered
    /// * `SignatureInvalid` - Request not signed by its Service
    /// * `BindingMismatch` - Request addressed to another User
    /// * `Expired` / `InvalidWindow` - Request window rejected by policy
    pub fn create_blob_with_ephemeral(
        &self,
        request: &Request,
        secdata: &str,
        ephemeral: EphemeralKeyPair,
    ) -> Result<Blob, ProtocolError> {
        self.validate_request(request)?;

        let directory = self.env.directory();
        let inspector = directory.scope_owner(request.scope())?;
        let agreement_key = directory.inspector_agreement_key(inspector)?;
        debug!(uid = %self.id, inspector = %inspector, "[User] Scope resolved");

        let ephemeral_pub = ephemeral.public_key();
        let key = ephemeral.derive(&agreement_key)?;
        let sealed = ReplyContent::new(request.clone(), secdata).seal(&key)?;
        let blob = Blob::new(ephemeral_pub, self.id, sealed, &self.keys)?;

        log_message_event!(info, "user", "Blob sealed", "blob", self.id, inspector);
        Ok(blob)
    }

    fn validate_request(&self, request: &Request) -> Result<(), ProtocolError> {
        audit::authenticate_request(self.env.directory(), request)?;
        if request.uid() != self.id {
            return Err(ProtocolError::BindingMismatch(format!(
                "request addressed to user {}, not {}",
                request.uid(),
                self.id
            )));
        }
        self.env
            .config()
            .check_request_window(request.ttl(), self.env.today())
    }

    // =========================================================================
    // Transport boundary
    // =========================================================================

    /// Accept a Request, checking its Service signature.
    pub fn receive_request(&self, raw: &[u8]) -> Result<Request, ProtocolError> {
        receive(raw, |request| {
            audit::authenticate_request(self.env.directory(), request)
        })
    }

    pub fn send_blob(&self, blob: &Blob) -> Result<Vec<u8>, ProtocolError> {
        send(blob)
    }
}

impl Party for User {
    fn id(&self) -> PartyId {
        self.id
    }

    fn environment(&self) -> &Environment {
        &self.env
    }

    fn register(&self) -> Result<(), ProtocolError> {
        self.env
            .directory()
            .register_user(self.id, self.keys.public_key())?;
        Ok(())
    }
}

impl std::fmt::Debug for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("scopes", &self.wallet.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}
