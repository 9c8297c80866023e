use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tokio_postgres::error::SqlState;

use crate::{
    crypto::password::PasswordError,
    middleware_layer::auth::AuthHeaderError,
    token::TokenError,
};

/// The application's error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// A database error.
    #[error("Database error: {0}")]
    Database(tokio_postgres::Error),

    /// A connection pool error.
    #[error("Pool error: {0}")]
    Pool(#[from] deadpool_postgres::PoolError),

    /// A connection pool construction error.
    #[error("Pool creation error: {0}")]
    CreatePool(#[from] deadpool_postgres::CreatePoolError),

    /// A column could not be read from a row.
    #[error("Missing data: {0}")]
    MissingData(String),

    /// A malformed, missing, or unsupported `Authorization` header.
    #[error(transparent)]
    AuthHeader(#[from] AuthHeaderError),

    /// A token could not be created or verified.
    #[error(transparent)]
    Token(#[from] TokenError),

    /// A password could not be hashed or did not match.
    #[error(transparent)]
    Password(#[from] PasswordError),

    /// The authenticated user does not own the resource.
    #[error("{0} doesn't belong to the user")]
    NotOwner(&'static str),

    /// A session exists but cannot be used to refresh tokens.
    #[error("{0}")]
    SessionRejected(String),

    /// A resource not found error.
    #[error("{0} not found")]
    NotFound(&'static str),

    /// A uniqueness or foreign key violation.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// A validation error.
    #[error("Validation error: {0}")]
    Validation(String),

    /// An internal server error.
    #[error("Internal server error: {0}")]
    Internal(String),
}

/// A `Result` type that uses `AppError` as the error type.
pub type Result<T> = std::result::Result<T, AppError>;

impl From<tokio_postgres::Error> for AppError {
    fn from(err: tokio_postgres::Error) -> Self {
        match err.code() {
            Some(code)
                if *code == SqlState::UNIQUE_VIOLATION
                    || *code == SqlState::FOREIGN_KEY_VIOLATION =>
            {
                let detail = err
                    .as_db_error()
                    .map(|db| db.message().to_string())
                    .unwrap_or_else(|| err.to_string());
                AppError::Conflict(detail)
            }
            _ => AppError::Database(err),
        }
    }
}

impl AppError {
    /// Returns the status code this error is reported with.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::AuthHeader(_)
            | AppError::NotOwner(_)
            | AppError::SessionRejected(_) => StatusCode::UNAUTHORIZED,
            AppError::Token(TokenError::Expired | TokenError::Invalid) => {
                StatusCode::UNAUTHORIZED
            }
            AppError::Password(PasswordError::Mismatch) => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::FORBIDDEN,
            AppError::Token(_)
            | AppError::Password(_)
            | AppError::Database(_)
            | AppError::Pool(_)
            | AppError::CreatePool(_)
            | AppError::MissingData(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            AppError::Database(ref e) => {
                tracing::error!("Database error: {}", e);
                "Database error".to_string()
            }

            AppError::Pool(ref e) => {
                tracing::error!("Pool error: {}", e);
                "Database error".to_string()
            }

            AppError::CreatePool(ref e) => {
                tracing::error!("Pool creation error: {}", e);
                "Database error".to_string()
            }

            AppError::MissingData(ref column) => {
                tracing::error!("Missing column in row: {}", column);
                "Database error".to_string()
            }

            AppError::AuthHeader(ref e) => {
                tracing::warn!("Rejected authorization header: {}", e);
                e.to_string()
            }

            AppError::Token(ref e) if status == StatusCode::UNAUTHORIZED => {
                tracing::warn!("Token rejected: {}", e);
                e.to_string()
            }

            AppError::Token(ref e) => {
                tracing::error!("Token error: {}", e);
                "Internal server error".to_string()
            }

            AppError::Password(PasswordError::Mismatch) => {
                tracing::warn!("Password mismatch");
                PasswordError::Mismatch.to_string()
            }

            AppError::Password(ref e) => {
                tracing::error!("Password hashing error: {}", e);
                "Internal server error".to_string()
            }

            AppError::NotOwner(_) => {
                tracing::warn!("{}", self);
                self.to_string()
            }

            AppError::SessionRejected(ref msg) => {
                tracing::warn!("Session rejected: {}", msg);
                msg.clone()
            }

            AppError::NotFound(_) => {
                tracing::debug!("{}", self);
                self.to_string()
            }

            AppError::Conflict(ref msg) => {
                tracing::warn!("Conflict: {}", msg);
                msg.clone()
            }

            AppError::Validation(ref msg) => {
                tracing::debug!("Validation error: {}", msg);
                msg.clone()
            }

            AppError::Internal(ref msg) => {
                tracing::error!("Internal error: {}", msg);
                "Internal server error".to_string()
            }
        };

        let body = sonic_rs::to_string(&sonic_rs::json!({
            "error": message
        }))
        .unwrap_or_else(|_| r#"{"error":"Internal server error"}"#.to_string());

        (
            status,
            [(http::header::CONTENT_TYPE, "application/json")],
            body,
        )
            .into_response()
    }
}
