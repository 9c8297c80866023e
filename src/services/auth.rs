use chrono::Utc;
use subtle::ConstantTimeEq;
use uuid::Uuid;

use crate::crypto::password::{hash_password, verify_password};
use crate::error::{AppError, Result};
use crate::guard::ensure_owner;
use crate::middleware_layer::client::ClientInfo;
use crate::models::{session::Session, user::User};
use crate::state::AppState;
use crate::store::{CreateSessionParams, CreateUserParams, Store};
use crate::token::Payload;

/// Everything a successful login hands back to the caller.
#[derive(Debug)]
pub struct Login {
    pub session: Session,
    pub access_token: String,
    pub access_payload: Payload,
    pub session_token: String,
    pub session_payload: Payload,
    pub user: User,
}

/// Creates a new user.
///
/// # Arguments
///
/// * `state` - The application state.
/// * `username` - The user's login name.
/// * `password` - The user's plaintext password.
/// * `fullname` - The user's full name.
/// * `email` - The user's email address.
///
/// # Returns
///
/// A `Result` containing the created `User`.
pub async fn create_user<S: Store>(
    state: &AppState<S>,
    username: String,
    password: &str,
    fullname: String,
    email: String,
) -> Result<User> {
    tracing::debug!("🔐 Creating user: {}", username);
    let hashed_password = hash_password(password)?;

    let user = state
        .store
        .create_user(CreateUserParams {
            username,
            hashed_password,
            fullname,
            email,
        })
        .await?;

    tracing::info!("✅ User created: {}", user.username);
    Ok(user)
}

/// Authenticates a user and opens a session.
///
/// Issues a short-lived access token and a longer-lived session token. The
/// session row is keyed by the session token's payload id.
pub async fn login<S: Store>(
    state: &AppState<S>,
    username: &str,
    password: &str,
    client: ClientInfo,
) -> Result<Login> {
    tracing::debug!("🔐 Authenticating user: {}", username);

    let user = state.store.get_user(username).await?;
    verify_password(password, &user.hashed_password)?;

    let (access_token, access_payload) = state
        .tokens
        .create_token(&user.username, state.config.access_token_duration)?;
    let (session_token, session_payload) = state
        .tokens
        .create_token(&user.username, state.config.session_duration)?;

    let session = state
        .store
        .create_session(CreateSessionParams {
            id: session_payload.id,
            username: user.username.clone(),
            session_token: session_token.clone(),
            user_agent: client.user_agent,
            client_ip: client.client_ip,
            is_blocked: false,
            expires_at: session_payload.expired_at,
        })
        .await
        .map_err(|e| AppError::Internal(format!("failed to persist session: {}", e)))?;

    tracing::info!("✅ User logged in: {} (session {})", user.username, session.id);

    Ok(Login {
        session,
        access_token,
        access_payload,
        session_token,
        session_payload,
        user,
    })
}

/// Verifies `session_token` and fetches the session it was issued for.
async fn session_for_token<S: Store>(
    state: &AppState<S>,
    session_token: &str,
) -> Result<(Session, Payload)> {
    let payload = state.tokens.verify_token(session_token)?;
    let session = state.store.get_session(payload.id).await?;
    Ok((session, payload))
}

/// Issues a fresh access token from a live session token.
pub async fn renew_access_token<S: Store>(
    state: &AppState<S>,
    session_token: &str,
) -> Result<(String, Payload)> {
    let (session, payload) = session_for_token(state, session_token).await?;

    if session.is_blocked {
        return Err(AppError::SessionRejected("blocked session".to_string()));
    }
    ensure_owner(&session, &payload)?;

    let matches: bool = session
        .session_token
        .as_bytes()
        .ct_eq(session_token.as_bytes())
        .into();
    if !matches {
        return Err(AppError::SessionRejected("mismatched session token".to_string()));
    }
    if Utc::now() >= session.expires_at {
        return Err(AppError::SessionRejected("expired session".to_string()));
    }

    let renewed = state
        .tokens
        .create_token(&payload.username, state.config.access_token_duration)?;

    tracing::info!("🔄 Access token renewed for: {}", payload.username);
    Ok(renewed)
}

/// Ends the session behind `session_token`. Only its owner may do so.
pub async fn logout<S: Store>(
    state: &AppState<S>,
    requester: &Payload,
    session_token: &str,
) -> Result<()> {
    let (session, _) = session_for_token(state, session_token).await?;
    ensure_owner(&session, requester)?;

    state.store.delete_session(session.id).await?;

    tracing::info!("👋 User logged out: {} (session {})", requester.username, session.id);
    Ok(())
}

/// Revokes a session so it can no longer renew access tokens.
pub async fn block_session<S: Store>(
    state: &AppState<S>,
    requester: &Payload,
    id: Uuid,
) -> Result<Session> {
    let session = state.store.get_session(id).await?;
    ensure_owner(&session, requester)?;

    let session = state.store.block_session(id).await?;

    tracing::info!("⛔ Session blocked: {}", session.id);
    Ok(session)
}

/// Deletes every session that has expired.
pub async fn cleanup_expired_sessions<S: Store>(store: &S) -> Result<u64> {
    let removed = store.delete_expired_sessions(Utc::now()).await?;
    tracing::debug!("🧹 Removed {} expired sessions", removed);
    Ok(removed)
}
