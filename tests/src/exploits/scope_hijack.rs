//! # Scope Hijack
//!
//! Attacker registers an Inspector for a scope that is already owned, hoping
//! Users will seal their secrets to it. The directory fails closed.

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;

    use bi_01_key_authority::{AuthorityError, KeyAuthority, KeyDirectory};
    use bi_03_protocol::{Environment, Inspector, Party, ProtocolError};
    use shared_crypto::{Ed25519KeyPair, X25519KeyPair};
    use shared_types::PartyId;

    use crate::fixtures::*;

    #[test]
    fn test_second_claim_rejected() {
        let d = Deployment::new();
        let hijacker = Inspector::new(
            PartyId(9009),
            SCOPE,
            Ed25519KeyPair::generate(),
            X25519KeyPair::generate(),
            d.env.clone(),
        );

        assert!(matches!(
            hijacker.register(),
            Err(ProtocolError::Registration(AuthorityError::ScopeAlreadyOwned { .. }))
        ));
        assert_eq!(d.authority.scope_owner(SCOPE).unwrap(), INSPECTOR_ID);
    }

    #[test]
    fn test_blobs_still_sealed_to_original_owner() {
        let d = Deployment::new();
        let hijacker = Inspector::new(
            PartyId(9009),
            SCOPE,
            Ed25519KeyPair::generate(),
            X25519KeyPair::generate(),
            d.env.clone(),
        );
        let _ = hijacker.register();

        let request = d.request();
        let blob = d.user.create_blob(&request, SECRET).unwrap();

        // The hijacker can neither open the Blob nor pass as the owner.
        let key = hijacker.session_key(&blob).unwrap();
        assert!(hijacker.decrypt_blob(&blob, &key).is_err());
        assert!(d.inspector.verify_blob(&blob, &request).is_ok());
    }

    #[test]
    fn test_id_reuse_cannot_replace_keys() {
        let d = Deployment::new();
        let impostor = Inspector::new(
            INSPECTOR_ID,
            "инн",
            Ed25519KeyPair::generate(),
            X25519KeyPair::generate(),
            d.env.clone(),
        );

        assert!(matches!(
            impostor.register(),
            Err(ProtocolError::Registration(AuthorityError::DuplicateId { .. }))
        ));
        assert!(d.authority.scope_owner("инн").is_err());
    }

    #[test]
    fn test_impostor_with_reused_id_cannot_answer() {
        let d = Deployment::new();
        let impostor = Inspector::new(
            INSPECTOR_ID,
            "инн",
            Ed25519KeyPair::generate(),
            X25519KeyPair::generate(),
            d.env.clone(),
        );
        let _ = impostor.register();

        let request = d.request();
        let blob = d.user.create_blob(&request, SECRET).unwrap();

        // The directory lists this id under the passport scope, not "инн".
        assert!(matches!(
            impostor.verify_blob(&blob, &request),
            Err(ProtocolError::BindingMismatch(_))
        ));
    }

    #[test]
    fn test_failed_claimant_cannot_answer() {
        let d = Deployment::new();
        let hijacker = Inspector::new(
            PartyId(9009),
            SCOPE,
            Ed25519KeyPair::generate(),
            X25519KeyPair::generate(),
            d.env.clone(),
        );
        assert!(hijacker.register().is_err());

        let request = d.request();
        let blob = d.user.create_blob(&request, SECRET).unwrap();
        assert!(matches!(
            hijacker.verify_blob(&blob, &request),
            Err(ProtocolError::UnknownIdentity(_))
        ));
    }

    #[test]
    fn test_concurrent_claims_single_owner() {
        let authority = Arc::new(KeyAuthority::new());
        let env = Environment::new(authority.clone());

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let env = env.clone();
                thread::spawn(move || Inspector::generate("contested", env).register().is_ok())
            })
            .collect();

        let owners = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|ok| *ok)
            .count();
        assert_eq!(owners, 1);
        assert_eq!(authority.counts().inspectors, 1);
    }
}
