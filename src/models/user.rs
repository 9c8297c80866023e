use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio_postgres::Row;

use crate::{db::column, error::AppError};

/// Represents a user in the system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// The user's unique login name.
    pub username: String,
    /// The user's Argon2 password hash.
    pub hashed_password: String,
    /// The user's full name.
    pub fullname: String,
    /// The user's email address.
    pub email: String,
    /// The timestamp of the user's last password change.
    pub password_last_changed: DateTime<Utc>,
    /// The timestamp when the user was created.
    pub created_at: DateTime<Utc>,
}

impl TryFrom<&Row> for User {
    type Error = AppError;

    fn try_from(row: &Row) -> Result<Self, Self::Error> {
        Ok(Self {
            username: column(row, "username")?,
            hashed_password: column(row, "hashed_password")?,
            fullname: column(row, "fullname")?,
            email: column(row, "email")?,
            password_last_changed: column(row, "password_last_changed")?,
            created_at: column(row, "created_at")?,
        })
    }
}

/// The public projection of a user. Never carries the password hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub username: String,
    pub fullname: String,
    pub email: String,
    pub password_last_changed: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            username: user.username,
            fullname: user.fullname,
            email: user.email,
            password_last_changed: user.password_last_changed,
            created_at: user.created_at,
        }
    }
}
