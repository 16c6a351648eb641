//! # Protocol Messages (BI-02)
//!
//! The four messages of a Blind-Inspect session and the validity window they
//! share.
//!
//! | Message | Direction | Signed by |
//! |---------|-----------|-----------|
//! | [`Request`] | Service → User | Service |
//! | [`Blob`] | User → Inspector (via Service) | User |
//! | [`Response`] | Inspector → Service | Inspector |
//! | [`ReplyContent`] | sealed inside a Blob | (covered by the Blob) |
//!
//! ## Encodings
//!
//! - **Binary**: canonical `content ‖ signature` ([`SignedMessage`]).
//! - **Structured**: serde field map, byte fields in lowercase hex
//!   ([`StructuredForm`]).
//!
//! Messages are immutable once built; fields are read through accessors.

pub mod blob;
pub mod errors;
pub mod reply;
pub mod request;
pub mod response;
pub mod signed;
pub mod ttl;

pub use blob::Blob;
pub use errors::MessageError;
pub use reply::ReplyContent;
pub use request::Request;
pub use response::{Answer, Response};
pub use signed::{SignedMessage, StructuredForm};
pub use ttl::Ttl;

const _: () = assert!(shared_types::SIG_LENGTH == shared_crypto::SIGNATURE_LENGTH);
