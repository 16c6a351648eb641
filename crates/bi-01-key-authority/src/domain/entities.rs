//! # Domain Entities

use shared_crypto::{AgreementPublicKey, Ed25519PublicKey};
use shared_types::PartyId;

/// Everything the directory publishes about one Inspector.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InspectorRecord {
    /// Inspector identifier
    pub id: PartyId,
    /// The single scope this Inspector is authoritative over
    pub scope: String,
    /// Key verifying the Inspector's Responses
    pub signing_key: Ed25519PublicKey,
    /// Static key Users agree against when encrypting replies
    pub agreement_key: AgreementPublicKey,
}

/// Snapshot of how many parties are registered per namespace.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DirectoryCounts {
    pub users: usize,
    pub services: usize,
    pub inspectors: usize,
    pub scopes: usize,
}
