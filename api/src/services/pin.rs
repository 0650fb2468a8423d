use sqlx::{SqliteConnection, SqlitePool};
use tracing::{debug, instrument};

use crate::auth::AuthUser;
use crate::error::{AppError, AppResult};
use crate::models::pin::{CreatePin, Pin, PinPaginationQuery, PinQuery, SavedPin, UpdatePin};

const PIN_SELECT: &str = "SELECT p.id, p.title, p.description, p.path, p.author_id, \
     p.created_at, p.updated_at, u.full_name, u.avatar, u.user_name \
     FROM pins p JOIN users u ON u.id = p.author_id";

/// What a save toggle did.
#[derive(Debug)]
pub enum SaveOutcome {
    Saved(SavedPin),
    Removed,
}

#[instrument(skip(pool, input))]
pub async fn create(pool: &SqlitePool, input: &CreatePin, auth_user: AuthUser) -> AppResult<Pin> {
    let now = chrono::Utc::now().naive_utc();
    let id: i64 = sqlx::query_scalar(
        "INSERT INTO pins (title, description, path, author_id, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?, ?) RETURNING id",
    )
    .bind(&input.title)
    .bind(&input.description)
    .bind(input.path.trim())
    .bind(auth_user.user_id)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await?;

    debug!(pin_id = id, "Pin created");
    get_by_id(pool, id).await
}

/// Flips the saved state of `(caller, pin)`.
///
/// Delete-if-present and insert-if-absent run in one transaction, and a
/// conflicting insert resolves to the row that won.
#[instrument(skip(pool))]
pub async fn save(pool: &SqlitePool, pin_id: i64, auth_user: AuthUser) -> AppResult<SaveOutcome> {
    let pin = get_by_id(pool, pin_id).await?;

    let mut tx = pool.begin().await?;

    let removed = sqlx::query("DELETE FROM saved WHERE user_id = ? AND pin_id = ?")
        .bind(auth_user.user_id)
        .bind(pin.id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

    if removed > 0 {
        tx.commit().await?;
        debug!("Pin unsaved");
        return Ok(SaveOutcome::Removed);
    }

    let saved = insert_saved(&mut *tx, auth_user.user_id, pin.id).await?;

    tx.commit().await?;
    debug!("Pin saved");
    Ok(SaveOutcome::Saved(saved))
}

/// Inserts the saved row, or returns the one a concurrent toggle already wrote.
async fn insert_saved(
    conn: &mut SqliteConnection,
    user_id: i64,
    pin_id: i64,
) -> AppResult<SavedPin> {
    let inserted = sqlx::query_as::<_, SavedPin>(
        "INSERT INTO saved (user_id, pin_id, created_at) VALUES (?, ?, ?) \
         ON CONFLICT (user_id, pin_id) DO NOTHING \
         RETURNING user_id, pin_id, created_at",
    )
    .bind(user_id)
    .bind(pin_id)
    .bind(chrono::Utc::now().naive_utc())
    .fetch_optional(&mut *conn)
    .await?;

    match inserted {
        Some(row) => Ok(row),
        None => Ok(sqlx::query_as::<_, SavedPin>(
            "SELECT user_id, pin_id, created_at FROM saved WHERE user_id = ? AND pin_id = ?",
        )
        .bind(user_id)
        .bind(pin_id)
        .fetch_one(&mut *conn)
        .await?),
    }
}

pub async fn get_all(pool: &SqlitePool, query: &PinQuery) -> AppResult<Vec<Pin>> {
    let order = query.sort_order.sql();
    let sql = format!(
        "{} ORDER BY {} {}, p.id {}",
        PIN_SELECT,
        query.sort_by.column(),
        order,
        order
    );

    Ok(sqlx::query_as::<_, Pin>(&sql).fetch_all(pool).await?)
}

pub async fn get_pagination(pool: &SqlitePool, query: &PinPaginationQuery) -> AppResult<Vec<Pin>> {
    let order = query.sort_order.sql();
    let sql = format!(
        "{} ORDER BY p.created_at {}, p.id {} LIMIT ? OFFSET ?",
        PIN_SELECT, order, order
    );

    Ok(sqlx::query_as::<_, Pin>(&sql)
        .bind(query.page_size)
        .bind(query.offset()?)
        .fetch_all(pool)
        .await?)
}

pub async fn get_by_id(pool: &SqlitePool, id: i64) -> AppResult<Pin> {
    sqlx::query_as::<_, Pin>(&format!("{} WHERE p.id = ?", PIN_SELECT))
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Pin not found".into()))
}

pub async fn get_created_pins(pool: &SqlitePool, auth_user: AuthUser) -> AppResult<Vec<Pin>> {
    let sql = format!(
        "{} WHERE p.author_id = ? ORDER BY p.created_at DESC, p.id DESC",
        PIN_SELECT
    );

    Ok(sqlx::query_as::<_, Pin>(&sql)
        .bind(auth_user.user_id)
        .fetch_all(pool)
        .await?)
}

/// Pins the caller saved, newest save first. The `author` summary is the
/// saver's own profile, not the pin creator's.
pub async fn get_saved_pins(pool: &SqlitePool, auth_user: AuthUser) -> AppResult<Vec<Pin>> {
    Ok(sqlx::query_as::<_, Pin>(
        "SELECT p.id, p.title, p.description, p.path, p.author_id, \
         p.created_at, p.updated_at, u.full_name, u.avatar, u.user_name \
         FROM saved s \
         JOIN pins p ON p.id = s.pin_id \
         JOIN users u ON u.id = s.user_id \
         WHERE s.user_id = ? \
         ORDER BY s.created_at DESC, p.id DESC",
    )
    .bind(auth_user.user_id)
    .fetch_all(pool)
    .await?)
}

/// Applies the fields present in `patch`. Authorship is checked by the caller.
#[instrument(skip(pool, patch))]
pub async fn update(pool: &SqlitePool, id: i64, patch: &UpdatePin) -> AppResult<Pin> {
    let result = sqlx::query(
        "UPDATE pins SET \
         title = COALESCE(?, title), \
         description = COALESCE(?, description), \
         path = COALESCE(?, path), \
         updated_at = ? \
         WHERE id = ?",
    )
    .bind(&patch.title)
    .bind(&patch.description)
    .bind(patch.path.as_deref().map(str::trim))
    .bind(chrono::Utc::now().naive_utc())
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Pin not found".into()));
    }

    get_by_id(pool, id).await
}

#[instrument(skip(pool))]
pub async fn delete(pool: &SqlitePool, id: i64) -> AppResult<()> {
    let result = sqlx::query("DELETE FROM pins WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Pin not found".into()));
    }
    Ok(())
}

/// Author guard: the pin must exist and belong to the caller.
pub async fn ensure_author(pool: &SqlitePool, pin_id: i64, auth_user: AuthUser) -> AppResult<()> {
    let author_id: i64 = sqlx::query_scalar("SELECT author_id FROM pins WHERE id = ?")
        .bind(pin_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Pin not found".into()))?;

    if author_id != auth_user.user_id {
        tracing::warn!(pin_id, user_id = auth_user.user_id, "Rejected non-author mutation");
        return Err(AppError::Forbidden(
            "Only the author can modify this pin".into(),
        ));
    }
    Ok(())
}
