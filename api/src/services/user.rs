use sqlx::SqlitePool;

use crate::auth::AuthUser;
use crate::error::{AppError, AppResult};
use crate::models::user::User;

const USER_COLUMNS: &str =
    "id, email, password_hash, full_name, user_name, avatar, age, created_at, updated_at";

pub async fn find_by_email(pool: &SqlitePool, email: &str) -> AppResult<Option<User>> {
    let user = sqlx::query_as::<_, User>(&format!(
        "SELECT {} FROM users WHERE email = ?",
        USER_COLUMNS
    ))
    .bind(email)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> AppResult<Option<User>> {
    let user = sqlx::query_as::<_, User>(&format!(
        "SELECT {} FROM users WHERE id = ?",
        USER_COLUMNS
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

pub async fn insert(
    pool: &SqlitePool,
    email: &str,
    password_hash: &str,
    full_name: &str,
    age: i64,
) -> AppResult<User> {
    let now = chrono::Utc::now().naive_utc();
    let user = sqlx::query_as::<_, User>(&format!(
        "INSERT INTO users (email, password_hash, full_name, age, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?, ?) RETURNING {}",
        USER_COLUMNS
    ))
    .bind(email)
    .bind(password_hash)
    .bind(full_name)
    .bind(age)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(user)
}

#[tracing::instrument(skip(pool))]
pub async fn profile(pool: &SqlitePool, auth_user: AuthUser) -> AppResult<User> {
    find_by_id(pool, auth_user.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".into()))
}
