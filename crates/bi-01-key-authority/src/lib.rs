//! # Key Authority (BI-01)
//!
//! Process-wide directory resolving party identifiers to public keys and
//! scopes to their owning Inspector. Every signature check in the protocol
//! resolves its verifying key here.
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): the directory maps and registration rules, no locking
//! - **Ports Layer** (`ports/`): the `KeyDirectory` API used by protocol actors
//! - **Service Layer** (`service.rs`): `KeyAuthority`, the shared, lock-guarded directory
//!
//! ## Security Notes
//!
//! - **Fail closed**: duplicate IDs and second claims on a scope are rejected, never overwritten
//! - **Atomic registration**: check and insert happen under one write lock
//! - **Immutable entries**: nothing is updated or removed once published

pub mod domain;
pub mod ports;
pub mod service;

// Re-export public API
pub use domain::entities::{DirectoryCounts, InspectorRecord};
pub use domain::errors::{AuthorityError, Namespace};
pub use ports::inbound::KeyDirectory;
pub use service::KeyAuthority;
