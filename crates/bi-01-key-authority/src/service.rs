//! # Key Authority Service
//!
//! Application service implementing `KeyDirectory` over a lock-guarded
//! `Directory`.
//!
//! ## Concurrency
//!
//! All registrations take the single write lock once and check-then-insert
//! under it, so uniqueness and scope ownership cannot race. Lookups take the
//! read lock; published entries never change.

use parking_lot::RwLock;
use shared_crypto::{AgreementPublicKey, Ed25519PublicKey};
use shared_types::PartyId;
use tracing::{debug, info, warn};

use crate::domain::directory::Directory;
use crate::domain::entities::{DirectoryCounts, InspectorRecord};
use crate::domain::errors::AuthorityError;
use crate::ports::inbound::KeyDirectory;

/// Shared identity and scope directory.
///
/// Construct one per process (or per test) and share it as
/// `Arc<KeyAuthority>`.
#[derive(Debug, Default)]
pub struct KeyAuthority {
    directory: RwLock<Directory>,
}

impl KeyAuthority {
    /// Create an empty authority.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registered party counts.
    pub fn counts(&self) -> DirectoryCounts {
        self.directory.read().counts()
    }

    fn log_outcome(kind: &str, id: PartyId, result: &Result<(), AuthorityError>) {
        match result {
            Ok(()) => info!(kind, id = %id, "[Authority] Registered"),
            Err(e) => warn!(kind, id = %id, error = %e, "[Authority] Registration rejected"),
        }
    }
}

impl KeyDirectory for KeyAuthority {
    fn register_user(&self, id: PartyId, key: Ed25519PublicKey) -> Result<(), AuthorityError> {
        let result = self.directory.write().insert_user(id, key);
        Self::log_outcome("user", id, &result);
        result
    }

    fn register_service(&self, id: PartyId, key: Ed25519PublicKey) -> Result<(), AuthorityError> {
        let result = self.directory.write().insert_service(id, key);
        Self::log_outcome("service", id, &result);
        result
    }

    fn register_inspector(&self, record: InspectorRecord) -> Result<(), AuthorityError> {
        let id = record.id;
        let scope = record.scope.clone();
        let result = self.directory.write().insert_inspector(record);
        Self::log_outcome("inspector", id, &result);
        if result.is_ok() {
            debug!(id = %id, scope = %scope, "[Authority] Scope claimed");
        }
        result
    }

    fn user_key(&self, id: PartyId) -> Result<Ed25519PublicKey, AuthorityError> {
        self.directory.read().user_key(id)
    }

    fn service_key(&self, id: PartyId) -> Result<Ed25519PublicKey, AuthorityError> {
        self.directory.read().service_key(id)
    }

    fn inspector_signing_key(&self, id: PartyId) -> Result<Ed25519PublicKey, AuthorityError> {
        self.directory.read().inspector_signing_key(id)
    }

    fn inspector_agreement_key(&self, id: PartyId) -> Result<AgreementPublicKey, AuthorityError> {
        self.directory.read().inspector_agreement_key(id)
    }

    fn inspector_scope(&self, id: PartyId) -> Result<String, AuthorityError> {
        self.directory.read().inspector(id).map(|r| r.scope.clone())
    }

    fn scope_owner(&self, scope: &str) -> Result<PartyId, AuthorityError> {
        self.directory.read().scope_owner(scope)
    }
}
