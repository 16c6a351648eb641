//! # Protocol Configuration
//!
//! Validity-window policy shared by every actor.
//!
//! | Field | Default | Env var |
//! |-------|---------|---------|
//! | `enforce_expiry` | `true` | `BI_ENFORCE_EXPIRY` |
//! | `response_validity_days` | `1` | `BI_RESPONSE_VALIDITY_DAYS` |
//! | `max_request_validity_days` | `366` | `BI_MAX_REQUEST_VALIDITY_DAYS` |

use std::env;
use std::str::FromStr;

use bi_02_messages::Ttl;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::errors::ProtocolError;

/// Validity-window policy.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProtocolConfig {
    /// Reject Requests and Responses whose window does not cover today
    pub enforce_expiry: bool,
    /// Days an Inspector's Response stays valid after issue
    pub response_validity_days: u32,
    /// Longest Request window a Service may issue or a User accept
    pub max_request_validity_days: u32,
}

impl Default for ProtocolConfig {
    fn default() -> Self {
        Self {
            enforce_expiry: true,
            response_validity_days: 1,
            max_request_validity_days: 366,
        }
    }
}

impl ProtocolConfig {
    /// Read overrides from the environment, keeping defaults for unset or
    /// unparsable values.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            enforce_expiry: env::var("BI_ENFORCE_EXPIRY")
                .map(|v| !(v.eq_ignore_ascii_case("false") || v == "0"))
                .unwrap_or(defaults.enforce_expiry),
            response_validity_days: env_number(
                "BI_RESPONSE_VALIDITY_DAYS",
                defaults.response_validity_days,
            ),
            max_request_validity_days: env_number(
                "BI_MAX_REQUEST_VALIDITY_DAYS",
                defaults.max_request_validity_days,
            ),
        }
    }

    /// Validate configuration bounds.
    pub fn validate(&self) -> Result<(), ProtocolError> {
        if self.response_validity_days == 0 {
            return Err(ProtocolError::Config(
                "response_validity_days cannot be 0".to_string(),
            ));
        }
        if self.max_request_validity_days == 0 {
            return Err(ProtocolError::Config(
                "max_request_validity_days cannot be 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Builder-style method to toggle expiry enforcement
    pub fn with_enforce_expiry(mut self, enforce: bool) -> Self {
        self.enforce_expiry = enforce;
        self
    }

    /// Builder-style method to set the response window
    pub fn with_response_validity_days(mut self, days: u32) -> Self {
        self.response_validity_days = days;
        self
    }

    /// Builder-style method to cap request windows
    pub fn with_max_request_validity_days(mut self, days: u32) -> Self {
        self.max_request_validity_days = days;
        self
    }

    /// Window for a Response issued on `today`.
    pub fn response_ttl(&self, today: NaiveDate) -> Ttl {
        let expired = today
            .checked_add_days(chrono::Days::new(u64::from(self.response_validity_days)))
            .unwrap_or(NaiveDate::MAX);
        Ttl::new(today, expired)
    }

    /// Check a Request window: well formed, within the length cap, and (when
    /// enforced) covering `today`.
    pub fn check_request_window(&self, ttl: &Ttl, today: NaiveDate) -> Result<(), ProtocolError> {
        check_well_formed(ttl)?;
        let max = i64::from(self.max_request_validity_days);
        if ttl.validity_days() > max {
            return Err(ProtocolError::InvalidWindow(format!(
                "{} days exceeds the {} day limit",
                ttl.validity_days(),
                max
            )));
        }
        self.check_current(ttl, today)
    }

    /// Check a Response window: well formed and (when enforced) covering
    /// `today`.
    pub fn check_response_window(&self, ttl: &Ttl, today: NaiveDate) -> Result<(), ProtocolError> {
        check_well_formed(ttl)?;
        self.check_current(ttl, today)
    }

    fn check_current(&self, ttl: &Ttl, today: NaiveDate) -> Result<(), ProtocolError> {
        if !self.enforce_expiry {
            return Ok(());
        }
        if today < ttl.produced() || ttl.is_expired_at(today) {
            return Err(ProtocolError::Expired { ttl: *ttl, today });
        }
        Ok(())
    }
}

fn check_well_formed(ttl: &Ttl) -> Result<(), ProtocolError> {
    if !ttl.is_well_formed() {
        return Err(ProtocolError::InvalidWindow(format!(
            "produced {} is after expired {}",
            ttl.produced(),
            ttl.expired()
        )));
    }
    Ok(())
}

fn env_number<T: FromStr + Copy>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            warn!(key, value = %raw, "Unparsable numeric setting, using default");
            default
        }),
        Err(_) => default,
    }
}
