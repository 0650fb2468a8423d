mod common;

use axum::http::{Method, StatusCode};
use pinboard::auth::token::JwtKeys;
use serde_json::json;

#[tokio::test]
async fn sign_up_then_sign_in_yields_token_for_the_new_user() {
    let app = common::spawn().await;

    let (status, body) = app.sign_up("ada@example.com", "Ada Lovelace").await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["email"], "ada@example.com");
    assert_eq!(body["data"]["fullName"], "Ada Lovelace");
    assert!(body["data"].get("passwordHash").is_none());
    assert!(body["data"].get("password").is_none());
    let user_id = body["data"]["id"].as_i64().unwrap();

    let (status, body) = app.sign_in("ada@example.com", common::PASSWORD).await;
    assert_eq!(status, StatusCode::OK);
    let token = body["data"]["token"].as_str().unwrap();

    let keys = JwtKeys::new(common::JWT_SECRET, 24);
    assert_eq!(keys.verify(token).unwrap(), user_id);
}

#[tokio::test]
async fn sign_in_failures() {
    let app = common::spawn().await;
    app.sign_up("ada@example.com", "Ada").await;

    let (status, body) = app.sign_in("nobody@example.com", common::PASSWORD).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Email not found");

    let (status, _) = app.sign_in("ada@example.com", "wrong-password").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn duplicate_email_is_a_conflict() {
    let app = common::spawn().await;
    let (status, _) = app.sign_up("dup@example.com", "First").await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = app.sign_up("dup@example.com", "Second").await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "Email already exists");
}

#[tokio::test]
async fn sign_up_validation() {
    let app = common::spawn().await;

    let cases = [
        json!({"email": "not-an-email", "password": "pw", "fullName": "A", "age": 30}),
        json!({"email": "a@example.com", "password": "", "fullName": "A", "age": 30}),
        json!({"email": "a@example.com", "password": "pw", "fullName": "A", "age": 17}),
        json!({"email": "a@example.com", "password": "pw", "fullName": "A", "age": 101}),
        json!({"email": "a@example.com", "password": "pw", "fullName": "A"}),
    ];

    for payload in cases {
        let (status, body) = app
            .request(Method::POST, "/auth/sign-up", None, Some(payload.clone()))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "payload {} gave {}", payload, body);
    }
}

#[tokio::test]
async fn protected_routes_need_a_valid_token() {
    let app = common::spawn().await;

    let (status, body) = app.request(Method::GET, "/user/profile", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Missing bearer token");

    let (status, _) = app
        .request(Method::GET, "/user/profile", Some("garbage"), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let foreign = JwtKeys::new("some-other-secret", 24).issue(1).unwrap();
    let (status, _) = app
        .request(Method::POST, "/pin/create", Some(&foreign), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn profile_returns_the_caller_without_password() {
    let app = common::spawn().await;
    let (user_id, token) = app.user("grace@example.com", "Grace Hopper").await;

    let (status, body) = app
        .request(Method::GET, "/user/profile", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], user_id);
    assert_eq!(body["data"]["age"], 30);
    assert!(body["data"].get("passwordHash").is_none());
}
