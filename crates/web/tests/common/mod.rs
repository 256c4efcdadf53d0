#![allow(dead_code)]

use std::time::Duration;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode, header},
};
use serde_json::Value;
use sqlx::PgPool;
use storage::{Database, models::UserRole};
use tower::ServiceExt;
use uuid::Uuid;
use web::auth::jwt::{JwtKeys, TokenType};
use web::state::AppState;

pub const SECRET: &[u8] = b"integration-test-secret-at-least-32-bytes";

pub fn jwt() -> JwtKeys {
    JwtKeys::new(SECRET, Duration::from_secs(300), Duration::from_secs(86_400))
}

/// App whose pool never connects; only usable for requests rejected before
/// any query runs.
pub fn offline_app() -> Router {
    let db = Database::connect_lazy("postgres://postgres@127.0.0.1:1/unused").unwrap();
    web::app(AppState::new(db, jwt()))
}

pub fn app_with_pool(pool: PgPool) -> Router {
    web::app(AppState::new(Database::from_pool(pool), jwt()))
}

pub fn token_for(role: UserRole, token_type: TokenType) -> String {
    jwt()
        .sign(Uuid::new_v4(), "tester", role, token_type)
        .unwrap()
}

pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> TestResponse {
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

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

    TestResponse { status, body }
}

pub async fn send_raw(app: &Router, method: Method, uri: &str, token: &str, raw: &str) -> TestResponse {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(raw.to_owned()))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

    TestResponse { status, body }
}
