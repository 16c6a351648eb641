//! # Integration Test Flows
//!
//! Full Service → User → Inspector → Service handshakes across every crate,
//! over both the binary and the structured encodings.
//!
//! ## Flows Tested:
//!
//! 1. **Happy path**: matching secret yields `Match`, accepted by the Service
//! 2. **Negative data**: a different secret yields `Mismatch`
//! 3. **Transport**: every message survives bytes and field maps unchanged
//! 4. **Directory isolation**: two scopes never resolve to each other's Inspector
//! 5. **Expiry**: windows are enforced on every hop

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use bi_01_key_authority::{KeyAuthority, KeyDirectory};
    use bi_02_messages::{Answer, Blob, ReplyContent, Request, Response, StructuredForm};
    use bi_03_protocol::{
        check_blob, check_request, check_response, Environment, Inspector, Party, ProtocolConfig,
        ProtocolError, Service, User,
    };
    use shared_crypto::{Ed25519KeyPair, EphemeralKeyPair, X25519KeyPair};
    use shared_types::PartyId;

    use crate::fixtures::*;

    // =============================================================================
    // HANDSHAKE
    // =============================================================================

    #[test]
    fn test_happy_path() {
        let d = Deployment::new();

        // Service -> User
        let request = d.request();
        assert_eq!(request.srcid(), SERVICE_ID);
        assert_eq!(request.uid(), USER_ID);
        assert_eq!(request.scope(), SCOPE);
        assert_eq!(request.ttl().produced(), start_date());

        // User -> Service
        let blob = d.user.create_blob(&request, SECRET).unwrap();
        assert_eq!(blob.uid(), USER_ID);

        // Service -> Inspector
        let key = d.inspector.session_key(&blob).unwrap();
        let reply = d.inspector.decrypt_blob(&blob, &key).unwrap();
        assert_eq!(reply.request(), &request);
        assert_eq!(reply.secdata(), SECRET);
        assert_eq!(reply.request().scope(), d.inspector.scope());

        // Inspector -> Service
        let response = d.inspector.verify_blob(&blob, &request).unwrap();
        assert_eq!(response.answer(), Answer::Match);
        assert_eq!(response.iid(), INSPECTOR_ID);

        let answer = d.service.accept_response(&response, &request, &blob).unwrap();
        assert!(answer.is_match());
    }

    #[test]
    fn test_negative_data_yields_mismatch() {
        let d = Deployment::new();
        let request = d.request();

        let blob = d.user.create_blob(&request, FAKE_SECRET).unwrap();
        let response = d.inspector.verify_blob(&blob, &request).unwrap();

        assert_eq!(response.answer(), Answer::Mismatch);
        assert_eq!(
            d.service.accept_response(&response, &request, &blob).unwrap(),
            Answer::Mismatch
        );
    }

    #[test]
    fn test_disclose_from_wallet() {
        let d = Deployment::new();
        let request = d.request();

        let blob = d.user.disclose(&request).unwrap();
        let response = d.inspector.verify_blob(&blob, &request).unwrap();
        assert_eq!(response.answer(), Answer::Match);
    }

    #[test]
    fn test_every_party_audits_every_message() {
        let d = Deployment::new();
        let request = d.request();
        let blob = d.user.create_blob(&request, SECRET).unwrap();
        let response = d.inspector.verify_blob(&blob, &request).unwrap();

        assert!(d.user.check_request(&request));
        assert!(d.service.check_blob(&blob));
        assert!(d.inspector.check_blob(&blob));
        assert!(d.service.check_response(&response));

        // Stand-alone audit against the bare directory
        let directory: &dyn KeyDirectory = d.authority.as_ref();
        assert!(check_request(directory, &request));
        assert!(check_blob(directory, &blob));
        assert!(check_response(directory, &response));
    }

    #[test]
    fn test_actors_reused_across_sessions() {
        let d = Deployment::new();

        for (secret, expected) in [
            (SECRET, Answer::Match),
            (FAKE_SECRET, Answer::Mismatch),
            (SECRET, Answer::Match),
        ] {
            let request = d.request();
            let blob = d.user.create_blob(&request, secret).unwrap();
            let response = d.inspector.verify_blob(&blob, &request).unwrap();
            assert_eq!(
                d.service.accept_response(&response, &request, &blob).unwrap(),
                expected
            );
        }
    }

    // =============================================================================
    // TRANSPORT
    // =============================================================================

    #[test]
    fn test_binary_transport_roundtrip() {
        let d = Deployment::new();

        let request = d.request();
        let raw = d.service.send_request(&request).unwrap();
        let received_request = d.user.receive_request(&raw).unwrap();
        assert_eq!(received_request, request);

        let blob = d.user.create_blob(&received_request, SECRET).unwrap();
        let raw = d.user.send_blob(&blob).unwrap();
        let at_service = d.service.receive_blob(&raw).unwrap();
        let raw = d.service.send_blob(&at_service).unwrap();
        let at_inspector = d.inspector.receive_blob(&raw).unwrap();
        assert_eq!(at_inspector, blob);

        let response = d.inspector.verify_blob(&at_inspector, &request).unwrap();
        let raw = d.inspector.send_response(&response).unwrap();
        let received = d.service.receive_response(&raw).unwrap();
        assert_eq!(received, response);
        assert!(d.service.check_response(&received));
        assert_eq!(
            d.service.accept_response(&received, &request, &at_service).unwrap(),
            Answer::Match
        );
    }

    #[test]
    fn test_structured_transport_roundtrip() {
        let d = Deployment::new();
        let request = d.request();
        let blob = d.user.create_blob(&request, SECRET).unwrap();
        let response = d.inspector.verify_blob(&blob, &request).unwrap();
        let key = d.inspector.session_key(&blob).unwrap();
        let reply = d.inspector.decrypt_blob(&blob, &key).unwrap();

        let text = serde_json::to_string(&request.to_structured().unwrap()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(Request::from_structured(value).unwrap(), request);

        assert_eq!(
            Blob::from_structured(blob.to_structured().unwrap()).unwrap(),
            blob
        );
        assert_eq!(
            Response::from_structured(response.to_structured().unwrap()).unwrap(),
            response
        );
        assert_eq!(
            ReplyContent::from_structured(reply.to_structured().unwrap()).unwrap(),
            reply
        );
    }

    #[test]
    fn test_structured_response_still_verifies() {
        let d = Deployment::new();
        let request = d.request();
        let blob = d.user.create_blob(&request, SECRET).unwrap();
        let response = d.inspector.verify_blob(&blob, &request).unwrap();

        let rebuilt = Response::from_structured(response.to_structured().unwrap()).unwrap();
        assert_eq!(
            d.service.accept_response(&rebuilt, &request, &blob).unwrap(),
            Answer::Match
        );
    }

    #[test]
    fn test_receive_rejects_truncated_bytes() {
        let d = Deployment::new();
        let raw = d.service.send_request(&d.request()).unwrap();

        assert!(matches!(
            d.user.receive_request(&raw[..raw.len() - 1]),
            Err(ProtocolError::Format(_)) | Err(ProtocolError::SignatureInvalid { .. })
        ));
        assert!(matches!(
            d.user.receive_request(&raw[..10]),
            Err(ProtocolError::Format(_))
        ));
    }

    // =============================================================================
    // DIRECTORY
    // =============================================================================

    #[test]
    fn test_directory_isolation() {
        let authority = Arc::new(KeyAuthority::new());
        let env = Environment::new(authority.clone());

        let passport = Inspector::generate("паспортные данные", env.clone());
        let tax = Inspector::generate("инн", env);
        passport.register().unwrap();
        tax.register().unwrap();

        assert_eq!(authority.scope_owner("паспортные данные").unwrap(), passport.id());
        assert_eq!(authority.scope_owner("инн").unwrap(), tax.id());
        assert_ne!(
            authority.inspector_agreement_key(passport.id()).unwrap(),
            authority.inspector_agreement_key(tax.id()).unwrap()
        );
        assert_eq!(authority.counts().scopes, 2);
    }

    #[test]
    fn test_blob_for_other_scope_rejected_by_inspector() {
        let d = Deployment::new();
        let tax = Inspector::new(
            PartyId(4004),
            "инн",
            Ed25519KeyPair::generate(),
            X25519KeyPair::generate(),
            d.env.clone(),
        );
        tax.register().unwrap();

        let request = d.request();
        let blob = d.user.create_blob(&request, SECRET).unwrap();

        // Sealed to the passport Inspector, so the tax Inspector cannot open it.
        assert!(tax.verify_blob(&blob, &request).is_err());
    }

    #[test]
    fn test_key_agreement_symmetry() {
        let inspector = X25519KeyPair::generate();
        let ephemeral = EphemeralKeyPair::generate();
        let ephemeral_pub = ephemeral.public_key();

        let user_side = ephemeral.derive(&inspector.public_key()).unwrap();
        let inspector_side = inspector.derive(&ephemeral_pub).unwrap();

        assert_eq!(user_side.as_bytes(), inspector_side.as_bytes());
    }

    #[test]
    fn test_injected_ephemeral_key_is_used() {
        let d = Deployment::new();
        let request = d.request();
        let ephemeral = EphemeralKeyPair::from_bytes([42u8; 32]);
        let expected_pub = ephemeral.public_key();

        let blob = d
            .user
            .create_blob_with_ephemeral(&request, SECRET, ephemeral)
            .unwrap();

        assert_eq!(blob.ephemeral_pub(), &expected_pub);
        assert_eq!(
            d.inspector.verify_blob(&blob, &request).unwrap().answer(),
            Answer::Match
        );
    }

    // =============================================================================
    // EXPIRY
    // =============================================================================

    #[test]
    fn test_expired_request_rejected_by_user() {
        let d = Deployment::new();
        let request = d.request();

        d.clock.set(date(2024, 7, 2));
        assert!(matches!(
            d.user.create_blob(&request, SECRET),
            Err(ProtocolError::Expired { .. })
        ));
    }

    #[test]
    fn test_expired_response_rejected_by_service() {
        let d = Deployment::new();
        let request = d.request();
        let blob = d.user.create_blob(&request, SECRET).unwrap();
        let response = d.inspector.verify_blob(&blob, &request).unwrap();

        // Response is valid for one day after issue.
        d.clock.advance(2);
        assert!(matches!(
            d.service.accept_response(&response, &request, &blob),
            Err(ProtocolError::Expired { .. })
        ));
    }

    #[test]
    fn test_expiry_not_enforced_when_disabled() {
        let authority = Arc::new(KeyAuthority::new());
        let clock = Arc::new(bi_03_protocol::FixedClock::new(start_date()));
        let env = Environment::new(authority)
            .with_clock(clock.clone())
            .with_config(ProtocolConfig::default().with_enforce_expiry(false))
            .unwrap();

        let service = Service::generate(env.clone());
        let user = User::generate(env.clone());
        let inspector = Inspector::generate(SCOPE, env);
        service.register().unwrap();
        user.register().unwrap();
        inspector.register().unwrap();
        inspector.add_user(user.id(), SECRET);

        let request = service
            .create_request_for(user.id(), SCOPE, date(2024, 6, 10))
            .unwrap();
        clock.set(date(2030, 1, 1));

        let blob = user.create_blob(&request, SECRET).unwrap();
        let response = inspector.verify_blob(&blob, &request).unwrap();
        assert_eq!(
            service.accept_response(&response, &request, &blob).unwrap(),
            Answer::Match
        );
    }
}
