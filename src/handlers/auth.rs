use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use chrono::{DateTime, Utc};
use garde::Validate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    error::Result,
    middleware_layer::client::ClientInfo,
    models::{session::Session, user::UserResponse},
    services::auth as auth_service,
    state::AppState,
    store::Store,
    token::Payload,
    validation::{ValidJson, ValidPath},
};

/// The request payload for user registration.
#[derive(Deserialize, Debug, Validate)]
pub struct CreateUserRequest {
    #[garde(alphanumeric, length(min = 1, max = 64))]
    pub username: String,
    #[garde(length(min = 6))]
    pub password: String,
    #[garde(length(min = 1, max = 255))]
    pub full_name: String,
    #[garde(email)]
    pub email: String,
}

/// The request payload for user login.
#[derive(Deserialize, Debug, Validate)]
pub struct LoginUserRequest {
    #[garde(alphanumeric, length(min = 1, max = 64))]
    pub username: String,
    #[garde(length(min = 6))]
    pub password: String,
}

#[derive(Serialize, Debug)]
pub struct LoginUserResponse {
    pub session_id: Uuid,
    pub access_token: String,
    pub access_token_expires_at: DateTime<Utc>,
    pub session_token: String,
    pub session_token_expires_at: DateTime<Utc>,
    pub user: UserResponse,
}

/// Carries a session token for renewal and logout.
#[derive(Deserialize, Debug, Validate)]
pub struct SessionTokenRequest {
    #[garde(length(min = 1))]
    pub session_token: String,
}

/// `/sessions/{id}` path parameter.
#[derive(Deserialize, Debug, Validate)]
pub struct SessionIdParams {
    #[garde(skip)]
    pub id: Uuid,
}

#[derive(Serialize, Debug)]
pub struct RenewAccessTokenResponse {
    pub access_token: String,
    pub access_token_expires_at: DateTime<Utc>,
}

/// Handles user registration.
pub async fn create_user<S: Store>(
    State(state): State<AppState<S>>,
    ValidJson(payload): ValidJson<CreateUserRequest>,
) -> Result<impl IntoResponse> {
    tracing::info!("📝 Register attempt: {}", payload.username);

    let user = auth_service::create_user(
        &state,
        payload.username,
        &payload.password,
        payload.full_name,
        payload.email,
    )
    .await?;

    Ok((StatusCode::OK, Json(UserResponse::from(user))))
}

/// Handles user login.
pub async fn login<S: Store>(
    State(state): State<AppState<S>>,
    client: ClientInfo,
    ValidJson(payload): ValidJson<LoginUserRequest>,
) -> Result<Json<LoginUserResponse>> {
    tracing::info!("🔐 Login attempt: {}", payload.username);

    let login = auth_service::login(&state, &payload.username, &payload.password, client).await?;

    Ok(Json(LoginUserResponse {
        session_id: login.session.id,
        access_token: login.access_token,
        access_token_expires_at: login.access_payload.expired_at,
        session_token: login.session_token,
        session_token_expires_at: login.session_payload.expired_at,
        user: login.user.into(),
    }))
}

/// Exchanges a session token for a fresh access token.
pub async fn renew_access_token<S: Store>(
    State(state): State<AppState<S>>,
    ValidJson(payload): ValidJson<SessionTokenRequest>,
) -> Result<Json<RenewAccessTokenResponse>> {
    let (access_token, access_payload) =
        auth_service::renew_access_token(&state, &payload.session_token).await?;

    Ok(Json(RenewAccessTokenResponse {
        access_token,
        access_token_expires_at: access_payload.expired_at,
    }))
}

/// Handles user logout.
pub async fn logout<S: Store>(
    State(state): State<AppState<S>>,
    Extension(auth): Extension<Payload>,
    ValidJson(payload): ValidJson<SessionTokenRequest>,
) -> Result<Json<&'static str>> {
    tracing::info!("👋 Logout for user: {}", auth.username);

    auth_service::logout(&state, &auth, &payload.session_token).await?;

    Ok(Json("Successfully logged out."))
}

/// Revokes one of the caller's sessions.
pub async fn block_session<S: Store>(
    State(state): State<AppState<S>>,
    Extension(auth): Extension<Payload>,
    ValidPath(params): ValidPath<SessionIdParams>,
) -> Result<Json<Session>> {
    let session = auth_service::block_session(&state, &auth, params.id).await?;
    Ok(Json(session))
}
