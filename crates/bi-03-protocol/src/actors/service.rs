//! # Service
//!
//! Relying party. Issues Requests, relays Blobs unopened, and trusts an
//! answer only after the Response checks out against the Request it issued.

use bi_02_messages::{Answer, Blob, Request, Response, Ttl};
use bi_telemetry::{log_event, log_message_event};
use chrono::NaiveDate;
use shared_crypto::Ed25519KeyPair;
use shared_types::PartyId;

use super::{random_party_id, receive, send, Environment, Party};
use crate::audit;
use crate::domain::errors::ProtocolError;

/// A relying party asking Users to prove attributes.
#[derive(Debug)]
pub struct Service {
    id: PartyId,
    keys: Ed25519KeyPair,
    env: Environment,
}

impl Service {
    pub fn new(id: PartyId, keys: Ed25519KeyPair, env: Environment) -> Self {
        Self { id, keys, env }
    }

    /// Random id and keys.
    pub fn generate(env: Environment) -> Self {
        Self::new(random_party_id(), Ed25519KeyPair::generate(), env)
    }

    // =========================================================================
    // Request issue
    // =========================================================================

    /// Sign a Request for `uid` to disclose `scope` within `ttl`.
    pub fn create_request(
        &self,
        uid: PartyId,
        scope: &str,
        ttl: Ttl,
    ) -> Result<Request, ProtocolError> {
        self.env
            .config()
            .check_request_window(&ttl, self.env.today())?;
        let request = Request::new(self.id, uid, scope, ttl, &self.keys)?;

        log_message_event!(info, "service", "Request issued", "request", self.id, uid);
        Ok(request)
    }

    /// Sign a Request valid from today until `expired`.
    pub fn create_request_for(
        &self,
        uid: PartyId,
        scope: &str,
        expired: NaiveDate,
    ) -> Result<Request, ProtocolError> {
        self.create_request(uid, scope, Ttl::new(self.env.today(), expired))
    }

    // =========================================================================
    // Relay
    // =========================================================================

    /// Check the User's signature and pass the Blob on as bytes, unopened.
    pub fn relay_blob(&self, blob: &Blob) -> Result<Vec<u8>, ProtocolError> {
        if let Err(e) = audit::authenticate_blob(self.env.directory(), blob) {
            log_event!(warn, "service", "Refusing to relay blob", uid = %blob.uid(), error = %e);
            return Err(e);
        }
        log_event!(info, "service", "Blob relayed", uid = %blob.uid());
        send(blob)
    }

    // =========================================================================
    // Response acceptance
    // =========================================================================

    /// Verify `response` against the `request` it answers and the Blob
    /// relayed for that request, and return the answer.
    ///
    /// The Response must come from the Inspector that owns the request's
    /// scope and be signed by it. It must carry exactly the `relayed` Blob
    /// from the requested User and be within its validity window.
    pub fn accept_response(
        &self,
        response: &Response,
        request: &Request,
        relayed: &Blob,
    ) -> Result<Answer, ProtocolError> {
        let result = self.verify_response(response, request, relayed);
        match &result {
            Ok(answer) => log_message_event!(
                info,
                "service",
                "Response accepted",
                "response",
                response.iid(),
                self.id,
                matched = answer.is_match()
            ),
            Err(e) => log_message_event!(
                warn,
                "service",
                "Response rejected",
                "response",
                response.iid(),
                self.id,
                error = %e
            ),
        }
        result
    }

    fn verify_response(
        &self,
        response: &Response,
        request: &Request,
        relayed: &Blob,
    ) -> Result<Answer, ProtocolError> {
        if request.srcid() != self.id {
            return Err(ProtocolError::BindingMismatch(format!(
                "request was issued by {}, not this service {}",
                request.srcid(),
                self.id
            )));
        }

        let owner = self.env.directory().scope_owner(request.scope())?;
        if response.iid() != owner {
            return Err(ProtocolError::BindingMismatch(format!(
                "response from inspector {} but scope is owned by {}",
                response.iid(),
                owner
            )));
        }

        audit::authenticate_response(self.env.directory(), response)?;

        if response.blob() != relayed {
            return Err(ProtocolError::BindingMismatch(
                "response carries a blob other than the one relayed for this request"
                    .to_string(),
            ));
        }

        if response.blob().uid() != request.uid() {
            return Err(ProtocolError::BindingMismatch(format!(
                "response concerns user {} but request was for {}",
                response.blob().uid(),
                request.uid()
            )));
        }

        self.env
            .config()
            .check_response_window(response.ttl(), self.env.today())?;
        Ok(response.answer())
    }

    // =========================================================================
    // Transport boundary
    // =========================================================================

    pub fn send_request(&self, request: &Request) -> Result<Vec<u8>, ProtocolError> {
        send(request)
    }

    /// Accept a Blob from a User, checking its signature.
    pub fn receive_blob(&self, raw: &[u8]) -> Result<Blob, ProtocolError> {
        receive(raw, |blob| audit::authenticate_blob(self.env.directory(), blob))
    }

    /// Forward a Blob to the Inspector.
    pub fn send_blob(&self, blob: &Blob) -> Result<Vec<u8>, ProtocolError> {
        self.relay_blob(blob)
    }

    /// Accept a Response, checking both its signatures.
    pub fn receive_response(&self, raw: &[u8]) -> Result<Response, ProtocolError> {
        receive(raw, |response| {
            audit::authenticate_response(self.env.directory(), response)
        })
    }
}

impl Party for Service {
    fn id(&self) -> PartyId {
        self.id
    }

    fn environment(&self) -> &Environment {
        &self.env
    }

    fn register(&self) -> Result<(), ProtocolError> {
        self.env
            .directory()
            .register_service(self.id, self.keys.public_key())?;
        Ok(())
    }
}
