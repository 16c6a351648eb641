//! # Inbound Ports (Driving Ports / API)
//!
//! The directory as seen by Users, Services and Inspectors.

use shared_crypto::{AgreementPublicKey, Ed25519PublicKey};
use shared_types::PartyId;

use crate::domain::entities::InspectorRecord;
use crate::domain::errors::AuthorityError;

/// Identity and scope directory.
///
/// Implementations must be thread-safe (`Send + Sync`): one directory is shared
/// by every actor in the process.
pub trait KeyDirectory: Send + Sync {
    // =========================================================================
    // Registration
    // =========================================================================

    /// Publish a User's signing key.
    ///
    /// # Errors
    /// * `AuthorityError::DuplicateId` - id already registered as a User
    fn register_user(&self, id: PartyId, key: Ed25519PublicKey) -> Result<(), AuthorityError>;

    /// Publish a Service's signing key.
    ///
    /// # Errors
    /// * `AuthorityError::DuplicateId` - id already registered as a Service
    fn register_service(&self, id: PartyId, key: Ed25519PublicKey) -> Result<(), AuthorityError>;

    /// Publish an Inspector's keys and claim its scope.
    ///
    /// # Errors
    /// * `AuthorityError::DuplicateId` - id already registered as an Inspector
    /// * `AuthorityError::ScopeAlreadyOwned` - another Inspector owns the scope
    fn register_inspector(&self, record: InspectorRecord) -> Result<(), AuthorityError>;

    // =========================================================================
    // Lookup
    // =========================================================================

    /// Signing key of a registered User.
    fn user_key(&self, id: PartyId) -> Result<Ed25519PublicKey, AuthorityError>;

    /// Signing key of a registered Service.
    fn service_key(&self, id: PartyId) -> Result<Ed25519PublicKey, AuthorityError>;

    /// Signing key of a registered Inspector.
    fn inspector_signing_key(&self, id: PartyId) -> Result<Ed25519PublicKey, AuthorityError>;

    /// Agreement key of a registered Inspector.
    fn inspector_agreement_key(&self, id: PartyId) -> Result<AgreementPublicKey, AuthorityError>;

    /// Scope claimed by a registered Inspector.
    fn inspector_scope(&self, id: PartyId) -> Result<String, AuthorityError>;

    /// Inspector that owns `scope`.
    fn scope_owner(&self, scope: &str) -> Result<PartyId, AuthorityError>;
}
