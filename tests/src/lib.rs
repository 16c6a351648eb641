//! # Blind-Inspect Test Suite
//!
//! Unified test crate containing:
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── fixtures.rs       # A registered Service, User and Inspector
//! ├── integration/      # End-to-end handshakes across all crates
//! │   ├── flows.rs          # Fixed scenarios over bytes and field maps
//! │   └── properties.rs     # Arbitrary Unicode scopes and secrets
//! └── exploits/         # Attack simulations
//!     ├── tamper.rs         # Bit flips in signed content
//!     ├── replay.rs         # Blob and Response reuse across requests
//!     ├── forged_response.rs# Answers not signed by the scope owner
//!     └── scope_hijack.rs   # Second claim on an owned scope
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p bi-tests
//!
//! # By category
//! cargo test -p bi-tests integration::
//! cargo test -p bi-tests exploits::
//!
//! # Benchmarks
//! cargo bench -p bi-tests
//! ```

pub mod exploits;
pub mod fixtures;
pub mod integration;
