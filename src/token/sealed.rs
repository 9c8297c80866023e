use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chrono::Duration;

use super::{Payload, TokenError, TokenMaker};
use crate::crypto::aes::{self, SecureKey, KEY_SIZE, NONCE_SIZE, TAG_SIZE};

/// Version and purpose prefix of every sealed token. Also bound as
/// associated data so it cannot be swapped.
const HEADER: &str = "gcm.local.";

/// Token maker that encrypts the payload with AES-256-GCM.
///
/// Tokens look like `gcm.local.<base64url(nonce || ciphertext || tag)>`.
pub struct SealedTokenMaker {
    key: SecureKey,
}

impl SealedTokenMaker {
    /// Creates a maker from a symmetric key of exactly 32 bytes.
    pub fn new(symmetric_key: &[u8]) -> Result<Self, TokenError> {
        let key = SecureKey::from_slice(symmetric_key).ok_or_else(|| TokenError::KeySize {
            expected: format!("exactly {}", KEY_SIZE),
            actual: symmetric_key.len(),
        })?;
        Ok(Self { key })
    }
}

impl TokenMaker for SealedTokenMaker {
    fn create_token(
        &self,
        username: &str,
        duration: Duration,
    ) -> Result<(String, Payload), TokenError> {
        let payload = Payload::new(username, duration)?;

        let plaintext = sonic_rs::to_vec(&payload)
            .map_err(|e| TokenError::Creation(format!("payload serialization failed: {}", e)))?;

        let (ciphertext, nonce) = aes::encrypt(&self.key, &plaintext, HEADER.as_bytes())
            .map_err(|e| TokenError::Creation(format!("encryption failed: {}", e)))?;

        let mut body = Vec::with_capacity(NONCE_SIZE + ciphertext.len());
        body.extend_from_slice(&nonce);
        body.extend_from_slice(&ciphertext);

        let token = format!("{}{}", HEADER, URL_SAFE_NO_PAD.encode(body));
        Ok((token, payload))
    }

    fn verify_token(&self, token: &str) -> Result<Payload, TokenError> {
        let encoded = token.strip_prefix(HEADER).ok_or(TokenError::Invalid)?;
        let body = URL_SAFE_NO_PAD
            .decode(encoded)
            .map_err(|_| TokenError::Invalid)?;

        if body.len() < NONCE_SIZE + TAG_SIZE {
            return Err(TokenError::Invalid);
        }

        let (nonce, ciphertext) = body.split_at(NONCE_SIZE);
        let nonce: [u8; NONCE_SIZE] = nonce.try_into().map_err(|_| TokenError::Invalid)?;

        let plaintext = aes::decrypt(&self.key, ciphertext, &nonce, HEADER.as_bytes())
            .map_err(|_| TokenError::Invalid)?;

        let payload: Payload = sonic_rs::from_slice(&plaintext).map_err(|_| TokenError::Invalid)?;
        payload.valid()?;

        Ok(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &[u8] = b"0123456789abcdef0123456789abcdef";

    #[test]
    fn round_trip_preserves_the_payload() {
        let maker = SealedTokenMaker::new(KEY).unwrap();
        let (token, issued) = maker.create_token("alice", Duration::minutes(1)).unwrap();
        assert!(token.starts_with(HEADER));

        let payload = maker.verify_token(&token).unwrap();
        assert_eq!(payload, issued);
        assert_eq!(payload.expired_at - payload.issued_at, Duration::minutes(1));
    }

    #[test]
    fn expired_token_reports_expired() {
        let maker = SealedTokenMaker::new(KEY).unwrap();
        let (token, _) = maker.create_token("alice", -Duration::minutes(1)).unwrap();
        assert_eq!(maker.verify_token(&token), Err(TokenError::Expired));
    }

    #[test]
    fn flipped_bit_is_invalid() {
        let maker = SealedTokenMaker::new(KEY).unwrap();
        let (token, _) = maker.create_token("alice", Duration::minutes(1)).unwrap();

        let mut body = URL_SAFE_NO_PAD.decode(&token[HEADER.len()..]).unwrap();
        for index in [0, NONCE_SIZE, body.len() - 1] {
            body[index] ^= 0x01;
            let tampered = format!("{}{}", HEADER, URL_SAFE_NO_PAD.encode(&body));
            assert_eq!(maker.verify_token(&tampered), Err(TokenError::Invalid));
            body[index] ^= 0x01;
        }
    }

    #[test]
    fn other_key_cannot_read_the_token() {
        let maker = SealedTokenMaker::new(KEY).unwrap();
        let other = SealedTokenMaker::new(b"fedcba9876543210fedcba9876543210").unwrap();
        let (token, _) = maker.create_token("alice", Duration::minutes(1)).unwrap();
        assert_eq!(other.verify_token(&token), Err(TokenError::Invalid));
    }

    #[test]
    fn garbage_is_invalid() {
        let maker = SealedTokenMaker::new(KEY).unwrap();
        for token in ["", "gcm.local.", "gcm.local.!!!", "v1.local.AAAA", "gcm.local.AAAA"] {
            assert_eq!(maker.verify_token(token), Err(TokenError::Invalid));
        }
    }

    #[test]
    fn foreign_prefix_is_invalid() {
        let maker = SealedTokenMaker::new(KEY).unwrap();
        let (token, _) = maker.create_token("alice", Duration::minutes(1)).unwrap();
        let relabeled = format!("v1.local.{}", &token[HEADER.len()..]);
        assert_eq!(maker.verify_token(&relabeled), Err(TokenError::Invalid));
    }

    #[test]
    fn key_must_be_exactly_32_bytes() {
        assert!(matches!(
            SealedTokenMaker::new(b"short"),
            Err(TokenError::KeySize { actual: 5, .. })
        ));
        assert!(SealedTokenMaker::new(&[1u8; 33]).is_err());
    }
}
