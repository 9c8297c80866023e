//! Access and session tokens.
//!
//! Both token schemes encode a [`Payload`] and sit behind [`TokenMaker`]; a
//! deployment picks one at startup with [`maker_from_config`].

pub mod jwt;
pub mod payload;
pub mod sealed;

use std::sync::Arc;

use chrono::Duration;
use thiserror::Error;

use crate::config::{Config, TokenKind};

pub use jwt::JwtMaker;
pub use payload::Payload;
pub use sealed::SealedTokenMaker;

/// Errors produced while creating or verifying tokens.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// The token decoded correctly but its expiry has passed.
    #[error("token has expired")]
    Expired,

    /// The token is malformed, tampered with, or was not produced by this maker.
    #[error("token is invalid")]
    Invalid,

    /// The token could not be produced.
    #[error("failed to create token: {0}")]
    Creation(String),

    /// The configured secret has the wrong size for the scheme.
    #[error("invalid key size: must be {expected} bytes, got {actual}")]
    KeySize { expected: String, actual: usize },
}

/// Creates and verifies tokens.
pub trait TokenMaker: Send + Sync {
    /// Creates a token for `username` that is valid for `duration`.
    fn create_token(&self, username: &str, duration: Duration)
        -> Result<(String, Payload), TokenError>;

    /// Verifies a token and returns its payload.
    ///
    /// Fails with [`TokenError::Expired`] or [`TokenError::Invalid`] only.
    fn verify_token(&self, token: &str) -> Result<Payload, TokenError>;
}

/// Builds the token maker selected by the configuration.
pub fn maker_from_config(config: &Config) -> Result<Arc<dyn TokenMaker>, TokenError> {
    let maker: Arc<dyn TokenMaker> = match config.token_kind {
        TokenKind::Local => Arc::new(SealedTokenMaker::new(&config.token_symmetric_key)?),
        TokenKind::Jwt => Arc::new(JwtMaker::new(&config.token_symmetric_key)?),
    };
    Ok(maker)
}
