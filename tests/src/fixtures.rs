//! # Test Fixtures
//!
//! A deployment with one Service, one User and one Inspector registered in a
//! fresh directory, all reading a shared settable clock.

use std::sync::Arc;

use bi_01_key_authority::KeyAuthority;
use bi_02_messages::Request;
use bi_03_protocol::{Environment, FixedClock, Inspector, Party, Service, User};
use chrono::NaiveDate;
use shared_crypto::{Ed25519KeyPair, X25519KeyPair};
use shared_types::PartyId;

pub const SCOPE: &str = "паспортные данные";
pub const SECRET: &str = "Иванов Иван Иванович";
pub const FAKE_SECRET: &str = "Иванов Иван Петрович";

pub const SERVICE_ID: PartyId = PartyId(1001);
pub const USER_ID: PartyId = PartyId(2002);
pub const INSPECTOR_ID: PartyId = PartyId(3003);

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or(NaiveDate::MIN)
}

/// First day of every fixture deployment.
pub fn start_date() -> NaiveDate {
    date(2024, 6, 1)
}

/// Three registered parties sharing one directory.
pub struct Deployment {
    pub authority: Arc<KeyAuthority>,
    pub clock: Arc<FixedClock>,
    pub env: Environment,
    pub service: Service,
    pub user: User,
    pub inspector: Inspector,
}

impl Deployment {
    /// Register all three parties; the Inspector knows the User's secret and
    /// the User holds the same secret in its wallet.
    pub fn new() -> Self {
        let authority = Arc::new(KeyAuthority::new());
        let clock = Arc::new(FixedClock::new(start_date()));
        let env = Environment::new(authority.clone()).with_clock(clock.clone());

        let service = Service::new(SERVICE_ID, Ed25519KeyPair::generate(), env.clone());
        let mut user = User::new(USER_ID, Ed25519KeyPair::generate(), env.clone());
        let inspector = Inspector::new(
            INSPECTOR_ID,
            SCOPE,
            Ed25519KeyPair::generate(),
            X25519KeyPair::generate(),
            env.clone(),
        );

        let parties: [&dyn Party; 3] = [&service, &user, &inspector];
        for party in parties {
            if let Err(e) = party.register() {
                panic!("fixture registration failed: {e}");
            }
        }
        inspector.add_user(USER_ID, SECRET);
        user.store_secret(SCOPE, SECRET);

        Self {
            authority,
            clock,
            env,
            service,
            user,
            inspector,
        }
    }

    /// Request for the fixture User valid for thirty days.
    pub fn request(&self) -> Request {
        match self
            .service
            .create_request_for(USER_ID, SCOPE, date(2024, 7, 1))
        {
            Ok(request) => request,
            Err(e) => panic!("fixture request failed: {e}"),
        }
    }
}

impl Default for Deployment {
    fn default() -> Self {
        Self::new()
    }
}
