//! Shared helpers for API integration tests: router construction matching
//! production, token minting, and JSON request plumbing.

// Each test binary compiles this module separately and uses a subset of it.
#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

use zemli_api::auth::jwt::{generate_access_token, JwtConfig};
use zemli_api::auth::password::hash_password;
use zemli_api::config::ServerConfig;
use zemli_api::router::build_app_router;
use zemli_api::state::AppState;
use zemli_api::storage::MediaStore;
use zemli_db::models::user::CreateUser;
use zemli_db::repositories::UserRepo;

/// Build a test `ServerConfig` with safe defaults and a fixed JWT secret.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        upload_dir: test_upload_dir(),
        upload_base_url: "/uploads".to_string(),
        jwt: JwtConfig {
            secret: "integration-test-secret".to_string(),
            access_token_expiry_mins: 60,
        },
    }
}

fn test_upload_dir() -> String {
    let dir = std::env::temp_dir().join(format!("zemli-test-uploads-{}", Uuid::new_v4()));
    std::fs::create_dir_all(&dir).expect("failed to create test upload dir");
    dir.to_string_lossy().into_owned()
}

/// Build the full application router with all middleware layers, using the
/// given database pool. Mirrors the router construction in `main.rs` so
/// integration tests exercise the same stack production uses.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let media_store = MediaStore::new(&config.upload_dir, config.upload_base_url.clone());

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        media_store: Arc::new(media_store),
    };

    build_app_router(state, &config)
}

/// Create a staff user with the given role and return a valid bearer token
/// for it.
pub async fn token_for(pool: &PgPool, email: &str, role: &str) -> String {
    let user = UserRepo::create(
        pool,
        &CreateUser {
            email: email.to_string(),
            password_hash: hash_password("test-password").unwrap(),
            role: role.to_string(),
        },
    )
    .await
    .expect("failed to create test user");

    generate_access_token(user.id, role, &test_config().jwt).expect("failed to mint token")
}

pub async fn admin_token(pool: &PgPool) -> String {
    token_for(pool, "admin@test.local", "admin").await
}

/// Send a request and return (status, parsed JSON body). Non-JSON bodies
/// come back as `Value::Null`.
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    bearer: Option<&str>,
    body: Option<serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = bearer {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }

    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, json)
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, serde_json::Value) {
    send(app, "GET", uri, None, None).await
}

pub async fn get_auth(app: &Router, uri: &str, token: &str) -> (StatusCode, serde_json::Value) {
    send(app, "GET", uri, Some(token), None).await
}

pub async fn post_json(
    app: &Router,
    uri: &str,
    body: serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    send(app, "POST", uri, None, Some(body)).await
}

pub async fn post_auth(
    app: &Router,
    uri: &str,
    token: &str,
    body: Option<serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    send(app, "POST", uri, Some(token), body).await
}

pub async fn put_auth(
    app: &Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    send(app, "PUT", uri, Some(token), Some(body)).await
}

pub async fn delete_auth(app: &Router, uri: &str, token: &str) -> (StatusCode, serde_json::Value) {
    send(app, "DELETE", uri, Some(token), None).await
}
