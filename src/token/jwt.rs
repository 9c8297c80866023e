use chrono::Duration;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use super::{Payload, TokenError, TokenMaker};

/// Shortest accepted HMAC secret, in bytes.
pub const MIN_SECRET_KEY_SIZE: usize = 32;

/// Token maker that signs the payload as HS256 JWT claims.
///
/// The secret lives inside jsonwebtoken's `EncodingKey`/`DecodingKey`, which
/// are not zeroized on drop. Only the copy in `Config` is.
#[derive(Clone)]
pub struct JwtMaker {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtMaker {
    /// Creates a maker from a secret of at least 32 bytes.
    pub fn new(secret: &[u8]) -> Result<Self, TokenError> {
        if secret.len() < MIN_SECRET_KEY_SIZE {
            return Err(TokenError::KeySize {
                expected: format!("at least {}", MIN_SECRET_KEY_SIZE),
                actual: secret.len(),
            });
        }

        // Expiry lives in `Payload::expired_at`, checked after decoding.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        })
    }
}

impl TokenMaker for JwtMaker {
    fn create_token(
        &self,
        username: &str,
        duration: Duration,
    ) -> Result<(String, Payload), TokenError> {
        let payload = Payload::new(username, duration)?;
        let token = encode(&Header::new(Algorithm::HS256), &payload, &self.encoding_key)
            .map_err(|e| TokenError::Creation(e.to_string()))?;
        Ok((token, payload))
    }

    fn verify_token(&self, token: &str) -> Result<Payload, TokenError> {
        let data = decode::<Payload>(token, &self.decoding_key, &self.validation)
            .map_err(|_| TokenError::Invalid)?;
        data.claims.valid()?;
        Ok(data.claims)
    }
}
