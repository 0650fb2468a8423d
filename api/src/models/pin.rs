use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::extract::Validate;
use crate::models::user::Author;

pub const MAX_PAGE_SIZE: i64 = 100;

#[derive(Debug, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Pin {
    pub id: i64,
    pub title: Option<String>,
    pub description: Option<String>,
    pub path: String,
    pub author_id: i64,
    pub created_at: chrono::NaiveDateTime,
    pub updated_at: chrono::NaiveDateTime,
    #[sqlx(flatten)]
    pub author: Author,
}

#[derive(Debug, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct SavedPin {
    pub user_id: i64,
    pub pin_id: i64,
    pub created_at: chrono::NaiveDateTime,
}

#[derive(Debug, Deserialize)]
pub struct CreatePin {
    pub title: Option<String>,
    pub description: Option<String>,
    pub path: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdatePin {
    pub title: Option<String>,
    pub description: Option<String>,
    pub path: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortBy {
    Id,
    Title,
    #[default]
    CreatedAt,
    UpdatedAt,
}

impl SortBy {
    pub fn column(self) -> &'static str {
        match self {
            SortBy::Id => "p.id",
            SortBy::Title => "p.title",
            SortBy::CreatedAt => "p.created_at",
            SortBy::UpdatedAt => "p.updated_at",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[serde(alias = "ASC")]
    Asc,
    #[default]
    #[serde(alias = "DESC")]
    Desc,
}

impl SortOrder {
    pub fn sql(self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PinQuery {
    #[serde(default)]
    pub sort_by: SortBy,
    #[serde(default)]
    pub sort_order: SortOrder,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PinPaginationQuery {
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_page_size")]
    pub page_size: i64,
    #[serde(default)]
    pub sort_order: SortOrder,
}

fn default_page() -> i64 {
    1
}

fn default_page_size() -> i64 {
    10
}

impl PinPaginationQuery {
    pub fn offset(&self) -> AppResult<i64> {
        self.page
            .checked_sub(1)
            .and_then(|skipped| skipped.checked_mul(self.page_size))
            .ok_or_else(|| AppError::Validation("page is out of range".into()))
    }
}

impl Validate for PinQuery {}

impl Validate for PinPaginationQuery {
    fn validate(&self) -> AppResult<()> {
        if self.page < 1 {
            return Err(AppError::Validation("page must not be less than 1".into()));
        }
        if !(1..=MAX_PAGE_SIZE).contains(&self.page_size) {
            return Err(AppError::Validation(format!(
                "pageSize must be between 1 and {}",
                MAX_PAGE_SIZE
            )));
        }
        self.offset()?;
        Ok(())
    }
}

impl Validate for CreatePin {
    fn validate(&self) -> AppResult<()> {
        if self.path.trim().is_empty() {
            return Err(AppError::Validation("path should not be empty".into()));
        }
        Ok(())
    }
}

impl Validate for UpdatePin {
    fn validate(&self) -> AppResult<()> {
        if matches!(&self.path, Some(path) if path.trim().is_empty()) {
            return Err(AppError::Validation("path should not be empty".into()));
        }
        Ok(())
    }
}
