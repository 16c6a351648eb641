//! # Protocol Actors
//!
//! Each actor owns its key material and shares the directory, policy and
//! clock through an [`Environment`]. Actors are created once, registered
//! once, and reused for any number of sessions.

pub mod inspector;
pub mod service;
pub mod user;

use std::sync::Arc;

use bi_01_key_authority::KeyDirectory;
use bi_02_messages::{Blob, Request, Response, SignedMessage};
use chrono::NaiveDate;
use rand::Rng;
use shared_types::PartyId;

use crate::audit;
use crate::domain::config::ProtocolConfig;
use crate::domain::errors::ProtocolError;
use crate::ports::outbound::{Clock, SystemClock};

/// Shared context every actor runs against.
#[derive(Clone)]
pub struct Environment {
    directory: Arc<dyn KeyDirectory>,
    config: ProtocolConfig,
    clock: Arc<dyn Clock>,
}

impl Environment {
    /// Default policy and the system clock.
    pub fn new(directory: Arc<dyn KeyDirectory>) -> Self {
        Self {
            directory,
            config: ProtocolConfig::default(),
            clock: Arc::new(SystemClock),
        }
    }

    /// Replace the policy after validating it.
    pub fn with_config(mut self, config: ProtocolConfig) -> Result<Self, ProtocolError> {
        config.validate()?;
        self.config = config;
        Ok(self)
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn directory(&self) -> &dyn KeyDirectory {
        self.directory.as_ref()
    }

    pub fn config(&self) -> &ProtocolConfig {
        &self.config
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }
}

impl std::fmt::Debug for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Environment")
            .field("config", &self.config)
            .field("today", &self.today())
            .finish_non_exhaustive()
    }
}

/// Behaviour common to every actor.
pub trait Party {
    fn id(&self) -> PartyId;

    fn environment(&self) -> &Environment;

    /// Publish this party's keys to the directory.
    fn register(&self) -> Result<(), ProtocolError>;

    fn check_request(&self, request: &Request) -> bool {
        audit::check_request(self.environment().directory(), request)
    }

    fn check_blob(&self, blob: &Blob) -> bool {
        audit::check_blob(self.environment().directory(), blob)
    }

    fn check_response(&self, response: &Response) -> bool {
        audit::check_response(self.environment().directory(), response)
    }
}

/// Random identifier that fits the wire width.
pub fn random_party_id() -> PartyId {
    PartyId(rand::thread_rng().gen_range(0..=PartyId::MAX))
}

/// Canonical bytes for the transport boundary.
pub(crate) fn send<M: SignedMessage>(message: &M) -> Result<Vec<u8>, ProtocolError> {
    Ok(message.encode()?)
}

/// Parse bytes from the transport boundary and accept only if `authenticate`
/// passes.
pub(crate) fn receive<M, F>(raw: &[u8], authenticate: F) -> Result<M, ProtocolError>
where
    M: SignedMessage,
    F: FnOnce(&M) -> Result<(), ProtocolError>,
{
    let message = M::parse(raw)?;
    authenticate(&message)?;
    Ok(message)
}
