use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::extract::Validate;

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub email: String,
    #[serde(skip)]
    pub password_hash: String,
    pub full_name: String,
    pub user_name: Option<String>,
    pub avatar: Option<String>,
    pub age: i64,
    pub created_at: chrono::NaiveDateTime,
    pub updated_at: chrono::NaiveDateTime,
}

/// Public profile summary attached to pins and comments.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub full_name: String,
    pub avatar: Option<String>,
    pub user_name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpPayload {
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub age: i64,
}

#[derive(Debug, Deserialize)]
pub struct SignInPayload {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
}

impl Validate for SignUpPayload {
    fn validate(&self) -> AppResult<()> {
        if !is_valid_email(&self.email) {
            return Err(AppError::Validation("email must be an email".into()));
        }
        if self.password.is_empty() {
            return Err(AppError::Validation("password should not be empty".into()));
        }
        if self.full_name.trim().is_empty() {
            return Err(AppError::Validation("fullName should not be empty".into()));
        }
        if !(18..=100).contains(&self.age) {
            return Err(AppError::Validation(
                "age must be between 18 and 100".into(),
            ));
        }
        Ok(())
    }
}

impl Validate for SignInPayload {
    fn validate(&self) -> AppResult<()> {
        if self.email.trim().is_empty() {
            return Err(AppError::Validation("email should not be empty".into()));
        }
        if self.password.is_empty() {
            return Err(AppError::Validation("password should not be empty".into()));
        }
        Ok(())
    }
}

fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !domain.contains("..")
}
