#![allow(dead_code)]

use std::path::PathBuf;
use std::str::FromStr;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use pinboard::{config::AppConfig, db, rest, AppState};
use serde_json::{json, Value};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tempfile::TempDir;
use tower::ServiceExt;

pub const JWT_SECRET: &str = "integration-secret";
pub const PASSWORD: &str = "pa55word";

pub struct TestApp {
    pub router: Router,
    pub pool: SqlitePool,
    pub upload_dir: PathBuf,
    _upload_tmp: TempDir,
}

pub async fn spawn() -> TestApp {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .unwrap()
        .foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
        .expect("Failed to open in-memory database");
    db::migrate(&pool).await.expect("Failed to run migrations");

    let upload_tmp = TempDir::new().unwrap();
    let upload_dir = upload_tmp.path().to_path_buf();
    let upload_dir_str = upload_dir.to_string_lossy().to_string();

    let config = AppConfig::from_lookup(|key: &str| match key {
        "JWT_SECRET" => Some(JWT_SECRET.to_string()),
        "SERVER_URL" => Some("http://localhost:3000".to_string()),
        "UPLOAD_DIR" => Some(upload_dir_str.clone()),
        _ => None,
    })
    .unwrap();

    TestApp {
        router: rest::router(AppState::new(pool.clone(), config)),
        pool,
        upload_dir,
        _upload_tmp: upload_tmp,
    }
}

impl TestApp {
    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(&bytes).to_string())
            })
        };
        (status, body)
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        self.send(request).await
    }

    pub async fn sign_up(&self, email: &str, full_name: &str) -> (StatusCode, Value) {
        self.request(
            Method::POST,
            "/auth/sign-up",
            None,
            Some(json!({
                "email": email,
                "password": PASSWORD,
                "fullName": full_name,
                "age": 30,
            })),
        )
        .await
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> (StatusCode, Value) {
        self.request(
            Method::POST,
            "/auth/sign-in",
            None,
            Some(json!({ "email": email, "password": password })),
        )
        .await
    }

    /// Registers a user and returns `(user id, bearer token)`.
    pub async fn user(&self, email: &str, full_name: &str) -> (i64, String) {
        let (status, body) = self.sign_up(email, full_name).await;
        assert_eq!(status, StatusCode::CREATED, "sign up failed: {}", body);
        let id = body["data"]["id"].as_i64().unwrap();

        let (status, body) = self.sign_in(email, PASSWORD).await;
        assert_eq!(status, StatusCode::OK, "sign in failed: {}", body);
        let token = body["data"]["token"].as_str().unwrap().to_string();
        (id, token)
    }

    pub async fn create_pin(&self, token: &str, title: &str) -> i64 {
        let (status, body) = self
            .request(
                Method::POST,
                "/pin/create",
                Some(token),
                Some(json!({
                    "title": title,
                    "description": format!("{} description", title),
                    "path": format!("/{}.png", title),
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "create pin failed: {}", body);
        body["data"]["id"].as_i64().unwrap()
    }

    pub async fn upload(
        &self,
        token: &str,
        field: &str,
        file_name: &str,
        content_type: &str,
        bytes: &[u8],
    ) -> (StatusCode, Value) {
        const BOUNDARY: &str = "pinboard-test-boundary";

        let mut body = Vec::with_capacity(bytes.len() + 256);
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
                field, file_name
            )
            .as_bytes(),
        );
        body.extend_from_slice(format!("Content-Type: {}\r\n\r\n", content_type).as_bytes());
        body.extend_from_slice(bytes);
        body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());

        let request = Request::builder()
            .method(Method::POST)
            .uri("/file/upload")
            .header(header::AUTHORIZATION, format!("Bearer {}", token))
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", BOUNDARY),
            )
            .body(Body::from(body))
            .unwrap();
        self.send(request).await
    }

    pub fn stored_files(&self) -> usize {
        std::fs::read_dir(&self.upload_dir)
            .map(|entries| entries.count())
            .unwrap_or(0)
    }
}
