use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio_postgres::Row;
use uuid::Uuid;

use crate::{db::column, error::AppError, guard::Owned};

/// A login session.
///
/// The `id` equals the payload id of `session_token`. A session outlives the
/// access tokens it is used to renew.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: Uuid,
    /// The user this session belongs to.
    pub username: String,
    #[serde(skip_serializing)]
    pub session_token: String,
    pub user_agent: String,
    pub client_ip: String,
    /// Set when the session has been revoked.
    pub is_blocked: bool,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<&Row> for Session {
    type Error = AppError;

    fn try_from(row: &Row) -> Result<Self, Self::Error> {
        Ok(Self {
            id: column(row, "id")?,
            username: column(row, "username")?,
            session_token: column(row, "session_token")?,
            user_agent: column(row, "user_agent")?,
            client_ip: column(row, "client_ip")?,
            is_blocked: column(row, "is_blocked")?,
            expires_at: column(row, "expires_at")?,
            created_at: column(row, "created_at")?,
        })
    }
}

impl Owned for Session {
    const KIND: &'static str = "session";

    fn owner(&self) -> &str {
        &self.username
    }
}
