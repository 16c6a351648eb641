//! # Blind-Inspect Protocol (BI-03)
//!
//! The three actors of the attribute-verification handshake.
//!
//! ## Session
//!
//! ```text
//! Service ──Request──▶ User
//! User ──Blob──▶ Service ──Blob (unopened)──▶ Inspector
//! Inspector ──Response──▶ Service
//! ```
//!
//! 1. The Service signs a [`Request`](bi_02_messages::Request) naming a User,
//!    a scope and a validity window.
//! 2. The User seals its secret together with the Request to the Inspector
//!    owning the scope and signs the resulting Blob.
//! 3. The Inspector opens the Blob, checks it is bound to the expected
//!    Request, and compares the secret against its ledger in constant time.
//! 4. The Service accepts the signed answer only from the scope owner, and
//!    only if it carries the Blob the Service relayed for that Request.
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): window policy and the error taxonomy
//! - **Ports Layer** (`ports/`): the `Clock` the actors read dates from
//! - **Actors** (`actors/`): `User`, `Service`, `Inspector`
//! - **Audit** (`audit.rs`): stand-alone signature checks for any party
//!
//! ## Security Notes
//!
//! - **Unopened relay**: the Service never holds an Inspector private key
//! - **Binding**: a Blob is accepted only for the Request sealed inside it
//! - **Single outcome**: unknown User and wrong secret both answer `'0'`
//! - **Secrets**: ledger and wallet entries are zeroized on drop and never logged

pub mod actors;
pub mod audit;
pub mod domain;
pub mod ports;

// Re-export public API
pub use actors::inspector::Inspector;
pub use actors::service::Service;
pub use actors::user::User;
pub use actors::{random_party_id, Environment, Party};
pub use audit::{
    authenticate_blob, authenticate_request, authenticate_response, check_blob, check_request,
    check_response,
};
pub use domain::config::ProtocolConfig;
pub use domain::errors::ProtocolError;
pub use ports::outbound::{Clock, FixedClock, SystemClock};
