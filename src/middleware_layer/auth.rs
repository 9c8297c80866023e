use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{header::AUTHORIZATION, HeaderMap, Request},
    middleware::Next,
    response::Response,
};
use thiserror::Error;

use crate::{
    error::AppError,
    token::{Payload, TokenMaker},
};

/// The only authorization scheme accepted, compared case-insensitively.
pub const AUTHORIZATION_TYPE_BEARER: &str = "bearer";

/// Reasons an `Authorization` header is rejected before token verification.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthHeaderError {
    #[error("authorization header is not provided")]
    Missing,

    #[error("invalid authorization header format")]
    Malformed,

    #[error("unsupported authorization type {0}")]
    UnsupportedType(String),
}

/// Splits `Authorization: <scheme> <token>` and returns the token.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthHeaderError> {
    let header = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.trim().is_empty())
        .ok_or(AuthHeaderError::Missing)?;

    let fields: Vec<&str> = header.split_whitespace().collect();
    let &[scheme, token] = fields.as_slice() else {
        return Err(AuthHeaderError::Malformed);
    };

    if !scheme.eq_ignore_ascii_case(AUTHORIZATION_TYPE_BEARER) {
        return Err(AuthHeaderError::UnsupportedType(scheme.to_lowercase()));
    }

    Ok(token)
}

/// A middleware that requires a valid bearer access token.
///
/// On success the decoded [`Payload`] is stored in the request extensions,
/// where handlers read it with `Extension<Payload>`.
pub async fn require_auth(
    State(tokens): State<Arc<dyn TokenMaker>>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    tracing::debug!("🔐 Checking authentication...");

    let token = bearer_token(request.headers())?;

    let payload: Payload = tokens.verify_token(token)?;

    tracing::debug!("✅ User authenticated: {}", payload.username);

    request.extensions_mut().insert(payload);

    Ok(next.run(request).await)
}
