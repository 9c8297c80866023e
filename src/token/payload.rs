use chrono::{DateTime, Duration, Utc};
use rand::{rngs::OsRng, RngCore};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::TokenError;

/// The claims carried by every token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payload {
    /// Unique per issuance. Doubles as the session id for session tokens.
    pub id: Uuid,
    /// The identity the token was issued to.
    pub username: String,
    /// When the token was issued.
    pub issued_at: DateTime<Utc>,
    /// When the token stops being accepted.
    pub expired_at: DateTime<Utc>,
}

impl Payload {
    /// Creates a payload for `username` that expires after `duration`.
    pub fn new(username: &str, duration: Duration) -> Result<Self, TokenError> {
        let mut bytes = [0u8; 16];
        OsRng
            .try_fill_bytes(&mut bytes)
            .map_err(|e| TokenError::Creation(format!("failed to generate token id: {}", e)))?;
        let id = uuid::Builder::from_random_bytes(bytes).into_uuid();

        let issued_at = Utc::now();
        Ok(Self {
            id,
            username: username.to_string(),
            issued_at,
            expired_at: issued_at + duration,
        })
    }

    /// Checks the payload against the current time.
    pub fn valid(&self) -> Result<(), TokenError> {
        if Utc::now() >= self.expired_at {
            return Err(TokenError::Expired);
        }
        Ok(())
    }
}
