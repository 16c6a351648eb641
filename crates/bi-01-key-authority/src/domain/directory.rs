//! # Directory
//!
//! The maps behind the key authority and the rules for adding to them.
//! Callers are responsible for serializing writes.

use std::collections::HashMap;

use shared_crypto::{AgreementPublicKey, Ed25519PublicKey};
use shared_types::PartyId;

use super::entities::{DirectoryCounts, InspectorRecord};
use super::errors::{AuthorityError, Namespace};

/// Identity and scope maps.
#[derive(Debug, Default)]
pub struct Directory {
    users: HashMap<PartyId, Ed25519PublicKey>,
    services: HashMap<PartyId, Ed25519PublicKey>,
    inspectors: HashMap<PartyId, InspectorRecord>,
    scopes: HashMap<String, PartyId>,
}

impl Directory {
    /// Create an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a User's signing key.
    pub fn insert_user(&mut self, id: PartyId, key: Ed25519PublicKey) -> Result<(), AuthorityError> {
        insert_unique(&mut self.users, Namespace::User, id, key)
    }

    /// Add a Service's signing key.
    pub fn insert_service(
        &mut self,
        id: PartyId,
        key: Ed25519PublicKey,
    ) -> Result<(), AuthorityError> {
        insert_unique(&mut self.services, Namespace::Service, id, key)
    }

    /// Add an Inspector and claim its scope.
    ///
    /// All conditions are checked before either map is touched, so a rejected
    /// registration leaves the directory unchanged.
    pub fn insert_inspector(&mut self, record: InspectorRecord) -> Result<(), AuthorityError> {
        ensure_wire_id(Namespace::Inspector, record.id)?;
        if self.inspectors.contains_key(&record.id) {
            return Err(AuthorityError::DuplicateId {
                namespace: Namespace::Inspector,
                id: record.id,
            });
        }
        if let Some(owner) = self.scopes.get(&record.scope) {
            return Err(AuthorityError::ScopeAlreadyOwned {
                scope: record.scope,
                owner: *owner,
            });
        }

        self.scopes.insert(record.scope.clone(), record.id);
        self.inspectors.insert(record.id, record);
        Ok(())
    }

    pub fn user_key(&self, id: PartyId) -> Result<Ed25519PublicKey, AuthorityError> {
        lookup(&self.users, Namespace::User, id).copied()
    }

    pub fn service_key(&self, id: PartyId) -> Result<Ed25519PublicKey, AuthorityError> {
        lookup(&self.services, Namespace::Service, id).copied()
    }

    pub fn inspector(&self, id: PartyId) -> Result<&InspectorRecord, AuthorityError> {
        lookup(&self.inspectors, Namespace::Inspector, id)
    }

    pub fn inspector_signing_key(&self, id: PartyId) -> Result<Ed25519PublicKey, AuthorityError> {
        self.inspector(id).map(|r| r.signing_key)
    }

    pub fn inspector_agreement_key(
        &self,
        id: PartyId,
    ) -> Result<AgreementPublicKey, AuthorityError> {
        self.inspector(id).map(|r| r.agreement_key)
    }

    pub fn scope_owner(&self, scope: &str) -> Result<PartyId, AuthorityError> {
        self.scopes
            .get(scope)
            .copied()
            .ok_or_else(|| AuthorityError::ScopeNotFound(scope.to_string()))
    }

    pub fn counts(&self) -> DirectoryCounts {
        DirectoryCounts {
            users: self.users.len(),
            services: self.services.len(),
            inspectors: self.inspectors.len(),
            scopes: self.scopes.len(),
        }
    }
}

fn insert_unique<V>(
    map: &mut HashMap<PartyId, V>,
    namespace: Namespace,
    id: PartyId,
    value: V,
) -> Result<(), AuthorityError> {
    ensure_wire_id(namespace, id)?;
    if map.contains_key(&id) {
        return Err(AuthorityError::DuplicateId { namespace, id });
    }
    map.insert(id, value);
    Ok(())
}

/// Only identifiers that can be encoded into a message are published.
fn ensure_wire_id(namespace: Namespace, id: PartyId) -> Result<(), AuthorityError> {
    if id.fits_wire() {
        Ok(())
    } else {
        Err(AuthorityError::IdOutOfRange { namespace, id })
    }
}

fn lookup<V>(
    map: &HashMap<PartyId, V>,
    namespace: Namespace,
    id: PartyId,
) -> Result<&V, AuthorityError> {
    map.get(&id)
        .ok_or(AuthorityError::NotFound { namespace, id })
}
