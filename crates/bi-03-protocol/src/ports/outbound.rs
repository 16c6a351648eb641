//! # Outbound Ports
//!
//! Dependencies actors have on the outside world.

use chrono::{NaiveDate, Utc};
use parking_lot::RwLock;

/// Date source for validity-window checks.
pub trait Clock: Send + Sync {
    /// Current calendar date.
    fn today(&self) -> NaiveDate;
}

/// UTC system date.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Utc::now().date_naive()
    }
}

/// Settable clock for tests.
#[derive(Debug)]
pub struct FixedClock {
    today: RwLock<NaiveDate>,
}

impl FixedClock {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today: RwLock::new(today),
        }
    }

    /// Jump to `date`.
    pub fn set(&self, date: NaiveDate) {
        *self.today.write() = date;
    }

    /// Move forward by `days`.
    pub fn advance(&self, days: u64) {
        let mut today = self.today.write();
        if let Some(next) = today.checked_add_days(chrono::Days::new(days)) {
            *today = next;
        }
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        *self.today.read()
    }
}
