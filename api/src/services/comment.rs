use sqlx::SqlitePool;
use tracing::instrument;

use crate::auth::AuthUser;
use crate::error::{AppError, AppResult};
use crate::models::comment::{Comment, CreateComment};
use crate::services::pin;

const COMMENT_SELECT: &str = "SELECT c.id, c.content, c.pin_id, c.author_id, \
     c.created_at, c.updated_at, u.full_name, u.avatar, u.user_name \
     FROM comments c JOIN users u ON u.id = c.author_id";

#[instrument(skip(pool, input), fields(pin_id = input.pin_id))]
pub async fn create(
    pool: &SqlitePool,
    input: &CreateComment,
    auth_user: AuthUser,
) -> AppResult<Comment> {
    // Surfaces a 404 rather than a foreign key failure.
    pin::get_by_id(pool, input.pin_id).await?;

    let now = chrono::Utc::now().naive_utc();
    let id: i64 = sqlx::query_scalar(
        "INSERT INTO comments (content, pin_id, author_id, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?) RETURNING id",
    )
    .bind(input.content.trim())
    .bind(input.pin_id)
    .bind(auth_user.user_id)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await?;

    sqlx::query_as::<_, Comment>(&format!("{} WHERE c.id = ?", COMMENT_SELECT))
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::Internal("Inserted comment vanished".into()))
}

pub async fn get_by_pin(pool: &SqlitePool, pin_id: i64) -> AppResult<Vec<Comment>> {
    let sql = format!(
        "{} WHERE c.pin_id = ? ORDER BY c.created_at DESC, c.id DESC",
        COMMENT_SELECT
    );

    Ok(sqlx::query_as::<_, Comment>(&sql)
        .bind(pin_id)
        .fetch_all(pool)
        .await?)
}
