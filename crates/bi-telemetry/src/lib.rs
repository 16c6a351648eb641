//! # Blind-Inspect Telemetry
//!
//! Structured logging for every Blind-Inspect party.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use bi_telemetry::{init_logging, TelemetryConfig};
//!
//! fn main() {
//!     let config = TelemetryConfig::for_party("inspector");
//!     init_logging(&config).expect("Failed to init logging");
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `BI_SERVICE_NAME` | `blind-inspect` | Service name in log lines |
//! | `BI_LOG_LEVEL` / `RUST_LOG` | `info` | Log level filter |
//! | `BI_JSON_LOGS` | `false` | JSON instead of pretty output |

mod config;
mod logging;

pub use config::TelemetryConfig;
pub use logging::init_logging;

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Failed to install log subscriber: {0}")]
    Init(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}
