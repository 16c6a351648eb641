//! # Ports Layer
//!
//! - **Outbound (Driven)**: the clock actors check validity windows against

pub mod outbound;
