use deadpool_postgres::Pool;
use crate::{
    error::{AppError, Result},
    models::user::User,
    store::CreateUserParams,
};

/// Creates a new user in the database.
pub async fn create_user(pool: &Pool, params: CreateUserParams) -> Result<User> {
    let client = pool.get().await?;
    let row = client
        .query_one(
            r#"
            INSERT INTO users (username, hashed_password, fullname, email)
            VALUES ($1, $2, $3, $4)
            RETURNING username, hashed_password, fullname, email, password_last_changed, created_at
            "#,
            &[
                &params.username,
                &params.hashed_password,
                &params.fullname,
                &params.email,
            ],
        )
        .await?;
    User::try_from(&row)
}

/// Finds a user by username.
pub async fn find_by_username(pool: &Pool, username: &str) -> Result<User> {
    let client = pool.get().await?;
    let row = client
        .query_opt(
            r#"
            SELECT username, hashed_password, fullname, email, password_last_changed, created_at
            FROM users
            WHERE username = $1
            LIMIT 1
            "#,
            &[&username],
        )
        .await?
        .ok_or(AppError::NotFound("user"))?;
    User::try_from(&row)
}

/// Deletes a user by username.
pub async fn delete_user(pool: &Pool, username: &str) -> Result<()> {
    let client = pool.get().await?;
    client
        .execute("DELETE FROM users WHERE username = $1", &[&username])
        .await?;
    Ok(())
}
