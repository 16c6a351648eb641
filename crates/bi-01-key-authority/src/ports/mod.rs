//! # Ports Layer
//!
//! - **Inbound (Driving)**: the directory API protocol actors call

pub mod inbound;
