//! # Domain Layer
//!
//! Directory state and registration rules with no locking or I/O.

pub mod directory;
pub mod entities;
pub mod errors;
