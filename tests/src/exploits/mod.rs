//! # Attack Simulations
//!
//! Each module drives a registered deployment the way an attacker would and
//! asserts the handshake fails closed.

pub mod scope_hijack;
pub mod tamper;
