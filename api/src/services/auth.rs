use sqlx::SqlitePool;
use tracing::{info, instrument};

use crate::auth::{password, token::JwtKeys};
use crate::error::{AppError, AppResult};
use crate::models::user::{SignInPayload, SignUpPayload, User};
use crate::services::user;

/// Verifies credentials and issues a bearer token for the user.
#[instrument(skip(pool, keys, payload), fields(email = %payload.email))]
pub async fn sign_in(pool: &SqlitePool, keys: &JwtKeys, payload: &SignInPayload) -> AppResult<String> {
    let user = user::find_by_email(pool, &payload.email)
        .await?
        .ok_or_else(|| AppError::NotFound("Email not found".into()))?;

    if !password::verify(&user.password_hash, &payload.password)? {
        return Err(AppError::Unauthorized("Password is incorrect".into()));
    }

    info!(user_id = user.id, "User signed in");
    keys.issue(user.id)
}

#[instrument(skip(pool, payload), fields(email = %payload.email))]
pub async fn sign_up(pool: &SqlitePool, payload: &SignUpPayload) -> AppResult<User> {
    if user::find_by_email(pool, &payload.email).await?.is_some() {
        return Err(AppError::Conflict("Email already exists".into()));
    }

    let password_hash = password::hash(&payload.password)?;
    let created = user::insert(
        pool,
        &payload.email,
        &password_hash,
        payload.full_name.trim(),
        payload.age,
    )
    .await;

    match created {
        Ok(user) => {
            info!(user_id = user.id, "User signed up");
            Ok(user)
        }
        // Lost a race against a concurrent sign-up for the same email.
        Err(AppError::Sqlx(e))
            if e.as_database_error()
                .map(|db_err| db_err.is_unique_violation())
                .unwrap_or(false) =>
        {
            Err(AppError::Conflict("Email already exists".into()))
        }
        Err(e) => Err(e),
    }
}
