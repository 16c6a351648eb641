//! # Shared Types Crate
//!
//! Wire-level building blocks shared by every Blind-Inspect crate.
//!
//! ## Design Principles
//!
//! - **Fixed anchors**: IDs, dates and signatures have fixed widths so that
//!   variable-length fields can be recovered positionally.
//! - **Closed encoding**: every encodable value implements [`CanonicalEncode`];
//!   there is no run-time type dispatch.
//! - **Positional signatures**: a signed record is `content ‖ signature`.

pub mod codec;
pub mod entities;
pub mod errors;

pub use codec::{
    encode_id, parse_date, parse_id, parse_number, parse_string, split_signature, Absent,
    ByteReader, CanonicalEncode, Raw,
};
pub use entities::*;
pub use errors::CodecError;
