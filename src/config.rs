use std::env;
use std::str::FromStr;
use std::time::Duration as StdDuration;
use anyhow::{Context, Result};
use zeroize::{Zeroize, Zeroizing};

/// Which token scheme the deployment uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenKind {
    /// AES-256-GCM encrypted tokens (`v1.local.`).
    Local,
    /// HS256 signed JWTs.
    Jwt,
}

impl FromStr for TokenKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "local" => Ok(TokenKind::Local),
            "jwt" => Ok(TokenKind::Jwt),
            other => anyhow::bail!("TOKEN_KIND must be `local` or `jwt`, got `{}`", other),
        }
    }
}

/// The application's configuration.
#[derive(Clone)]
pub struct Config {
    /// The URL of the PostgreSQL database.
    pub database_url: String,
    /// The address the HTTP server binds to.
    pub server_address: String,
    /// The token scheme.
    pub token_kind: TokenKind,
    /// The symmetric key used to encrypt or sign tokens.
    pub token_symmetric_key: Zeroizing<Vec<u8>>,
    /// Lifetime of access tokens.
    pub access_token_duration: chrono::Duration,
    /// Lifetime of session tokens and the sessions they back.
    pub session_duration: chrono::Duration,
    /// How often expired sessions are purged.
    pub session_cleanup_interval: StdDuration,
}

fn parse_var<T>(name: &str, default: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    env::var(name)
        .unwrap_or_else(|_| default.to_string())
        .parse()
        .with_context(|| format!("Invalid {}", name))
}

impl Config {
    /// Creates a new `Config` from environment variables.
    pub fn from_env() -> Result<Self> {
        let mut symmetric_key = env::var("TOKEN_SYMMETRIC_KEY")
            .context("TOKEN_SYMMETRIC_KEY must be set (32 characters, e.g. openssl rand -hex 16)")?;
        let token_symmetric_key = Zeroizing::new(symmetric_key.as_bytes().to_vec());
        symmetric_key.zeroize();

        let access_minutes: i64 = parse_var("ACCESS_TOKEN_DURATION_MINUTES", "15")?;
        let session_hours: i64 = parse_var("SESSION_DURATION_HOURS", "24")?;
        let cleanup_secs: u64 = parse_var("SESSION_CLEANUP_INTERVAL_SECS", "3600")?;

        let access_token_duration = chrono::Duration::minutes(access_minutes);
        let session_duration = chrono::Duration::hours(session_hours);
        if access_token_duration <= chrono::Duration::zero() {
            anyhow::bail!("ACCESS_TOKEN_DURATION_MINUTES must be positive");
        }
        if session_duration <= access_token_duration {
            anyhow::bail!("SESSION_DURATION_HOURS must outlast the access token duration");
        }

        Ok(Self {
            database_url: env::var("DATABASE_URL")
                .context("DATABASE_URL must be set")?,
            server_address: env::var("SERVER_ADDRESS")
                .unwrap_or_else(|_| "0.0.0.0:8080".to_string()),
            token_kind: env::var("TOKEN_KIND")
                .unwrap_or_else(|_| "local".to_string())
                .parse()?,
            token_symmetric_key,
            access_token_duration,
            session_duration,
            session_cleanup_interval: StdDuration::from_secs(cleanup_secs.max(1)),
        })
    }
}
