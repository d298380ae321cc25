#![allow(dead_code)]

//! Test infrastructure for mh-server API tests

use mh_auth::{DevVerifier, TokenManager};
use mh_config::PaginationConfig;
use mh_core::{Permission, Role};
use mh_db::{RoleRepository, UserRepository};
use mh_server::AppState;

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response, header};
use http_body_util::BodyExt;
use sqlx::SqlitePool;

pub const TEST_SECRET: &[u8] = b"test-secret-test-secret-test-secret";

/// Create a test pool with in-memory SQLite
pub async fn create_test_pool() -> SqlitePool {
    let pool = SqlitePool::connect(":memory:")
        .await
        .expect("Failed to create test database");

    sqlx::query("PRAGMA foreign_keys = ON")
        .execute(&pool)
        .await
        .expect("Failed to enable foreign keys");

    sqlx::migrate!("../crates/mh-db/migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

/// Create AppState for testing, dev verifier and no domain restriction
pub async fn create_test_state() -> AppState {
    let pool = create_test_pool().await;

    AppState {
        pool,
        tokens: Arc::new(TokenManager::new(TEST_SECRET, 30)),
        verifier: Arc::new(DevVerifier),
        allowed_domain: None,
        pagination: PaginationConfig::default(),
    }
}

/// Create a user holding one role with the given permissions and return a
/// bearer token for it.
pub async fn authed_user(
    state: &AppState,
    user_id: &str,
    role_name: &str,
    permissions: &[Permission],
) -> String {
    let users = UserRepository::new(state.pool.clone());
    users
        .upsert_login(user_id, &format!("Test User {}", user_id), None)
        .await
        .expect("Failed to create test user");

    let role = Role::new(
        role_name.to_string(),
        "#336699".to_string(),
        permissions.to_vec(),
    );
    RoleRepository::new(state.pool.clone())
        .create(&role)
        .await
        .expect("Failed to create test role");
    users
        .set_roles(user_id, &[role.id])
        .await
        .expect("Failed to assign test role");

    state.tokens.issue(user_id).expect("Failed to issue token")
}

/// Create a user with no roles at all and return a bearer token for it.
pub async fn authed_user_without_roles(state: &AppState, user_id: &str) -> String {
    UserRepository::new(state.pool.clone())
        .upsert_login(user_id, &format!("Test User {}", user_id), None)
        .await
        .expect("Failed to create test user");

    state.tokens.issue(user_id).expect("Failed to issue token")
}

/// Build a request with optional bearer token and JSON body
pub fn json_request(
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);

    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }

    match body {
        Some(value) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(value.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// Collect a response body as JSON
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("Failed to collect body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("Response body was not JSON")
}
