//! # Tampering
//!
//! Attacker flips bits in a message in transit. Every signed byte is covered,
//! so any change is caught by the receiver's signature check.

#[cfg(test)]
mod tests {
    use bi_02_messages::{Blob, Request, SignedMessage};
    use bi_03_protocol::{Party, ProtocolError};
    use shared_types::SIG_LENGTH;

    use crate::fixtures::*;

    #[test]
    fn test_request_content_flip_fails_check() {
        let d = Deployment::new();
        let request = d.request();
        let raw = request.encode().unwrap();

        // Every byte of the scope and TTL is covered.
        for i in 8..raw.len() - SIG_LENGTH {
            let mut tampered = raw.clone();
            tampered[i] ^= 0x01;
            if let Ok(parsed) = Request::parse(&tampered) {
                assert!(!d.user.check_request(&parsed), "byte {i} not covered");
            }
        }
    }

    #[test]
    fn test_request_signature_flip_rejected_on_receive() {
        let d = Deployment::new();
        let mut raw = d.service.send_request(&d.request()).unwrap();
        let last = raw.len() - 1;
        raw[last] ^= 0x80;

        assert!(matches!(
            d.user.receive_request(&raw),
            Err(ProtocolError::SignatureInvalid { kind: "request", .. })
        ));
    }

    #[test]
    fn test_blob_ciphertext_flip_rejected_before_decrypt() {
        let d = Deployment::new();
        let request = d.request();
        let blob = d.user.create_blob(&request, SECRET).unwrap();
        let mut raw = blob.encode().unwrap();

        // Inside the reply, past ephemeral key and uid.
        raw[40] ^= 0xFF;
        let tampered = Blob::parse(&raw).unwrap();

        assert!(!d.service.check_blob(&tampered));
        assert!(matches!(
            d.inspector.verify_blob(&tampered, &request),
            Err(ProtocolError::SignatureInvalid { kind: "blob", .. })
        ));
    }

    #[test]
    fn test_blob_uid_swap_rejected() {
        let d = Deployment::new();
        let blob = d.user.create_blob(&d.request(), SECRET).unwrap();
        let mut raw = blob.encode().unwrap();

        // Rewrite the uid field to an unregistered user.
        raw[32..36].copy_from_slice(&[0xFF, 0xFF, 0xFF, 0xFF]);

        assert!(matches!(
            d.inspector.receive_blob(&raw),
            Err(ProtocolError::UnknownIdentity(_))
        ));
    }
}
