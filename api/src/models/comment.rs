use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::extract::Validate;
use crate::models::user::Author;

pub const MAX_COMMENT_CHARS: usize = 500;

#[derive(Debug, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: i64,
    pub content: String,
    pub pin_id: i64,
    pub author_id: i64,
    pub created_at: chrono::NaiveDateTime,
    pub updated_at: chrono::NaiveDateTime,
    #[sqlx(flatten)]
    pub author: Author,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateComment {
    pub content: String,
    pub pin_id: i64,
}

impl Validate for CreateComment {
    fn validate(&self) -> AppResult<()> {
        if self.content.trim().is_empty() {
            return Err(AppError::Validation("content should not be empty".into()));
        }
        if self.content.chars().count() > MAX_COMMENT_CHARS {
            return Err(AppError::Validation(format!(
                "content must be {} characters or less",
                MAX_COMMENT_CHARS
            )));
        }
        Ok(())
    }
}
