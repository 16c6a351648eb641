//! # Domain Layer
//!
//! Policy and error taxonomy. No I/O.

pub mod config;
pub mod errors;
