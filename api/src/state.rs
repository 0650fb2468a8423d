use std::sync::Arc;

use sqlx::SqlitePool;

use crate::auth::token::JwtKeys;
use crate::config::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub config: Arc<AppConfig>,
    pub jwt: JwtKeys,
}

impl AppState {
    pub fn new(db: SqlitePool, config: AppConfig) -> Self {
        let jwt = JwtKeys::new(&config.jwt_secret, config.jwt_expires_hours);
        Self {
            db,
            config: Arc::new(config),
            jwt,
        }
    }
}
