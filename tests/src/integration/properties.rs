//! # Handshake Properties
//!
//! Arbitrary Unicode scopes and secrets through a full session: the right
//! secret always matches, any other secret never does.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use bi_01_key_authority::KeyAuthority;
    use bi_02_messages::{Answer, Request, SignedMessage, StructuredForm};
    use bi_03_protocol::{Environment, FixedClock, Inspector, Party, Service, User};
    use proptest::prelude::*;

    use crate::fixtures::{date, start_date};

    fn session(scope: &str, recorded: &str, disclosed: &str) -> Answer {
        let clock = Arc::new(FixedClock::new(start_date()));
        let env = Environment::new(Arc::new(KeyAuthority::new())).with_clock(clock);

        let service = Service::generate(env.clone());
        let user = User::generate(env.clone());
        let inspector = Inspector::generate(scope, env);
        let parties: [&dyn Party; 3] = [&service, &user, &inspector];
        for party in parties {
            party.register().unwrap();
        }
        inspector.add_user(user.id(), recorded);

        let request = service
            .create_request_for(user.id(), scope, date(2024, 6, 30))
            .unwrap();
        let raw = service.send_request(&request).unwrap();
        let received = user.receive_request(&raw).unwrap();
        assert_eq!(Request::parse(&request.encode().unwrap()).unwrap(), request);

        let blob = user.create_blob(&received, disclosed).unwrap();
        let raw = service.relay_blob(&blob).unwrap();
        let at_inspector = inspector.receive_blob(&raw).unwrap();

        let reply = inspector
            .decrypt_blob(&at_inspector, &inspector.session_key(&at_inspector).unwrap())
            .unwrap();
        assert_eq!(reply.secdata(), disclosed);
        assert_eq!(reply.request().scope(), scope);

        let response = inspector.verify_blob(&at_inspector, &request).unwrap();
        let structured = response.to_structured().unwrap();
        let response = bi_02_messages::Response::from_structured(structured).unwrap();
        service.accept_response(&response, &request, &blob).unwrap()
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn test_right_secret_always_matches(
            scope in "\\PC{1,24}",
            secret in "\\PC{0,48}",
        ) {
            prop_assert_eq!(session(&scope, &secret, &secret), Answer::Match);
        }

        #[test]
        fn test_other_secret_never_matches(
            scope in "\\PC{1,24}",
            secret in "\\PC{0,48}",
            other in "\\PC{0,48}",
        ) {
            prop_assume!(secret != other);
            prop_assert_eq!(session(&scope, &secret, &other), Answer::Mismatch);
        }
    }
}
