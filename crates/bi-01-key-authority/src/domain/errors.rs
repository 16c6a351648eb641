//! # Authority Errors

use shared_types::PartyId;
use thiserror::Error;

/// Party namespace an identifier belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Namespace {
    User,
    Service,
    Inspector,
}

impl std::fmt::Display for Namespace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Namespace::User => f.write_str("user"),
            Namespace::Service => f.write_str("service"),
            Namespace::Inspector => f.write_str("inspector"),
        }
    }
}

/// Errors raised by directory registration and lookup.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthorityError {
    /// Identifier already registered in its namespace
    #[error("Duplicate {namespace} id {id}")]
    DuplicateId { namespace: Namespace, id: PartyId },

    /// Identifier does not fit the wire width
    #[error("{namespace} id {id} exceeds the wire width")]
    IdOutOfRange { namespace: Namespace, id: PartyId },

    /// Scope already claimed by another Inspector
    #[error("Scope {scope:?} already owned by inspector {owner}")]
    ScopeAlreadyOwned { scope: String, owner: PartyId },

    /// Identifier not registered in its namespace
    #[error("Unknown {namespace} id {id}")]
    NotFound { namespace: Namespace, id: PartyId },

    /// No Inspector has claimed the scope
    #[error("Unclaimed scope {0:?}")]
    ScopeNotFound(String),
}

impl AuthorityError {
    /// Whether this is a failed lookup rather than a registration conflict.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            AuthorityError::NotFound { .. } | AuthorityError::ScopeNotFound(_)
        )
    }
}
