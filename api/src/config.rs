use std::path::PathBuf;

use crate::auth::token::MAX_TOKEN_TTL_HOURS;
use crate::error::{AppError, AppResult};

pub const DEFAULT_UPLOAD_MAX_BYTES: usize = 2 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server_host: String,
    pub server_port: u16,
    /// Public base URL used when building links to uploaded files.
    pub server_url: String,
    pub database_url: String,
    pub jwt_secret: String,
    pub jwt_expires_hours: i64,
    pub upload_dir: PathBuf,
    pub upload_max_bytes: usize,
}

impl AppConfig {
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();
        let config = Self::from_lookup(|key: &str| std::env::var(key).ok())?;
        tracing::info!(
            host = %config.server_host,
            port = config.server_port,
            upload_dir = %config.upload_dir.display(),
            "Configuration loaded"
        );
        Ok(config)
    }

    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let server_host = lookup("SERVER_HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let server_port = parse_or(&lookup, "SERVER_PORT", 3000u16)?;
        let server_url = lookup("SERVER_URL")
            .unwrap_or_else(|| format!("http://{}:{}", server_host, server_port))
            .trim_end_matches('/')
            .to_string();
        let database_url =
            lookup("DATABASE_URL").unwrap_or_else(|| "sqlite://pinboard.db?mode=rwc".to_string());

        let jwt_secret = lookup("JWT_SECRET")
            .filter(|s| !s.is_empty())
            .ok_or_else(|| AppError::Config("Missing environment variable 'JWT_SECRET'".into()))?;
        let jwt_expires_hours = parse_or(&lookup, "JWT_EXPIRES_HOURS", 24i64)?;
        if !(1..=MAX_TOKEN_TTL_HOURS).contains(&jwt_expires_hours) {
            return Err(AppError::Config(format!(
                "JWT_EXPIRES_HOURS must be between 1 and {}",
                MAX_TOKEN_TTL_HOURS
            )));
        }

        let upload_dir = lookup("UPLOAD_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("assets/images"));
        let upload_max_bytes = parse_or(&lookup, "UPLOAD_MAX_BYTES", DEFAULT_UPLOAD_MAX_BYTES)?;

        Ok(Self {
            server_host,
            server_port,
            server_url,
            database_url,
            jwt_secret,
            jwt_expires_hours,
            upload_dir,
            upload_max_bytes,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> AppResult<T>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| AppError::Config(format!("Invalid {}: {}", key, e))),
        None => Ok(default),
    }
}
