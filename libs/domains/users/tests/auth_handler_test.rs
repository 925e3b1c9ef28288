//! Handler tests for the auth endpoints
//!
//! These drive the real router with an in-memory repository:
//! - Request deserialization and validation
//! - Response serialization and status codes
//! - Error responses

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum_helpers::{JwtAuth, JwtConfig};
use domain_users::{auth_handlers, AuthState, InMemoryUserRepository, UserService};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt; // For oneshot()

const TEST_SECRET: &str = "handler-test-secret-32-characters!!!";

fn test_app() -> axum::Router {
    let service = UserService::new(InMemoryUserRepository::new());
    let jwt = JwtAuth::new(&JwtConfig::new(TEST_SECRET));
    auth_handlers::router(AuthState { service, jwt })
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

async fn json_body(body: Body) -> Value {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_register_returns_201() {
    let app = test_app();

    let response = app
        .oneshot(post_json(
            "/register",
            json!({"username": "alice", "email": "a@x.com", "password": "pw"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);

    let body = json_body(response.into_body()).await;
    assert_eq!(body, json!("New user created"));
}

#[tokio::test]
async fn test_register_duplicate_username_returns_409() {
    let app = test_app();

    let payload = json!({"username": "alice", "email": "a@x.com", "password": "pw"});

    let first = app
        .clone()
        .oneshot(post_json("/register", payload.clone()))
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = app.oneshot(post_json("/register", payload)).await.unwrap();
    assert_eq!(second.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_register_missing_field_returns_400() {
    let app = test_app();

    let response = app
        .oneshot(post_json("/register", json!({"username": "alice"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_register_invalid_email_returns_400() {
    let app = test_app();

    let response = app
        .oneshot(post_json(
            "/register",
            json!({"username": "alice", "email": "nope", "password": "pw"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = json_body(response.into_body()).await;
    assert!(body["details"]["email"].is_array());
}

#[tokio::test]
async fn test_login_returns_token_pair() {
    let app = test_app();

    app.clone()
        .oneshot(post_json(
            "/register",
            json!({"username": "alice", "email": "a@x.com", "password": "pw"}),
        ))
        .await
        .unwrap();

    let response = app
        .oneshot(post_json(
            "/login/",
            json!({"username": "alice", "password": "pw"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response.into_body()).await;
    let access = body["access"].as_str().unwrap();
    let refresh = body["refresh"].as_str().unwrap();
    assert!(!access.is_empty());
    assert!(!refresh.is_empty());
    assert_ne!(access, refresh);

    // The access token decodes back to the registered user
    let jwt = JwtAuth::new(&JwtConfig::new(TEST_SECRET));
    let claims = jwt.verify_token(access).unwrap();
    assert_eq!(claims.username, "alice");
    assert_eq!(claims.email, "a@x.com");
    assert_eq!(claims.token_type, "access");
}

#[tokio::test]
async fn test_login_wrong_password_returns_401() {
    let app = test_app();

    app.clone()
        .oneshot(post_json(
            "/register",
            json!({"username": "alice", "email": "a@x.com", "password": "pw"}),
        ))
        .await
        .unwrap();

    let response = app
        .oneshot(post_json(
            "/login/",
            json!({"username": "alice", "password": "wrong"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_unknown_user_returns_401() {
    let app = test_app();

    let response = app
        .oneshot(post_json(
            "/login/",
            json!({"username": "ghost", "password": "pw"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
