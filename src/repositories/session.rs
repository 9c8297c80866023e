use chrono::{DateTime, Utc};
use deadpool_postgres::Pool;
use uuid::Uuid;
use crate::{
    error::{AppError, Result},
    models::session::Session,
    store::CreateSessionParams,
};

const SESSION_COLUMNS: &str =
    "id, username, session_token, user_agent, client_ip, is_blocked, expires_at, created_at";

/// Persists a new session.
pub async fn create_session(pool: &Pool, params: CreateSessionParams) -> Result<Session> {
    let client = pool.get().await?;
    let row = client
        .query_one(
            &*format!(
                r#"
                INSERT INTO sessions (id, username, session_token, user_agent, client_ip, is_blocked, expires_at)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                RETURNING {SESSION_COLUMNS}
                "#
            ),
            &[
                &params.id,
                &params.username,
                &params.session_token,
                &params.user_agent,
                &params.client_ip,
                &params.is_blocked,
                &params.expires_at,
            ],
        )
        .await?;
    Session::try_from(&row)
}

/// Finds a session by id.
pub async fn find_by_id(pool: &Pool, id: &Uuid) -> Result<Session> {
    let client = pool.get().await?;
    let row = client
        .query_opt(
            &*format!("SELECT {SESSION_COLUMNS} FROM sessions WHERE id = $1 LIMIT 1"),
            &[id],
        )
        .await?
        .ok_or(AppError::NotFound("session"))?;
    Session::try_from(&row)
}

/// Marks a session as blocked.
pub async fn block_session(pool: &Pool, id: &Uuid) -> Result<Session> {
    let client = pool.get().await?;
    let row = client
        .query_opt(
            &*format!("UPDATE sessions SET is_blocked = TRUE WHERE id = $1 RETURNING {SESSION_COLUMNS}"),
            &[id],
        )
        .await?
        .ok_or(AppError::NotFound("session"))?;
    Session::try_from(&row)
}

/// Deletes a session by id.
pub async fn delete_session(pool: &Pool, id: &Uuid) -> Result<()> {
    let client = pool.get().await?;
    client
        .execute("DELETE FROM sessions WHERE id = $1", &[id])
        .await?;
    Ok(())
}

/// Deletes every session that has expired by `now`.
pub async fn delete_expired(pool: &Pool, now: &DateTime<Utc>) -> Result<u64> {
    let client = pool.get().await?;
    let deleted = client
        .execute("DELETE FROM sessions WHERE expires_at <= $1", &[now])
        .await?;
    Ok(deleted)
}
