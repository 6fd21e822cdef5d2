//! Authentication API Tests
//!
//! Validation failures and the bearer-token gate, none of which reach the
//! database.

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::common::{body_json, unique_username, TestApp};

#[tokio::test]
async fn test_register_with_invalid_email_fails() {
    let app = TestApp::new();
    let body = json!({
        "username": unique_username(),
        "email": "not-an-email",
        "password": "ValidPassword123!"
    });

    let response = app.post_json("/auth/register", &body.to_string()).await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_register_with_short_password_fails() {
    let app = TestApp::new();
    let body = json!({
        "username": unique_username(),
        "email": "someone@example.com",
        "password": "short"
    });

    let response = app.post_json("/auth/register", &body.to_string()).await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body = body_json(response).await;
    let message = body["message"].as_str().expect("message field");
    assert!(message.contains("at least 8"));
}

#[tokio::test]
async fn test_register_with_short_username_fails() {
    let app = TestApp::new();
    let body = json!({
        "username": "x",
        "email": "someone@example.com",
        "password": "ValidPassword123!"
    });

    let response = app.post_json("/auth/register", &body.to_string()).await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_login_with_invalid_email_format_fails() {
    let app = TestApp::new();
    let body = json!({
        "email": "not-an-email",
        "password": "ValidPassword123!"
    });

    let response = app.post_json("/auth/login", &body.to_string()).await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_mutating_route_requires_token() {
    let app = TestApp::new();
    let body = json!({ "topic": "General" });

    let response = app.post_json("/boardCategories", &body.to_string()).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = body_json(response).await;
    assert_eq!(body["message"], "Authentication failed.");
}

#[tokio::test]
async fn test_malformed_authorization_header_is_rejected() {
    let app = TestApp::new();
    let (_, token) = app.make_token();

    // Wrong scheme
    let response = app
        .get_with_authorization("/auth/checkIsAuthenticated", &format!("Token {}", token))
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // No scheme at all
    let response = app
        .get_with_authorization("/auth/checkIsAuthenticated", &token)
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_garbage_token_is_rejected() {
    let app = TestApp::new();

    let response = app
        .get_auth("/auth/checkIsAuthenticated", "not.a.token")
        .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_expired_token_is_rejected() {
    let app = TestApp::new();
    let token = app.make_expired_token();

    let response = app.get_auth("/auth/checkIsAuthenticated", &token).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_check_is_authenticated_with_valid_token() {
    let app = TestApp::new();
    let (user_id, token) = app.make_token();

    let response = app.get_auth("/auth/checkIsAuthenticated", &token).await;

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["authenticated"], true);
    assert_eq!(body["user_id"], user_id.to_string());
}

#[tokio::test]
async fn test_check_is_admin_reports_non_admin() {
    let app = TestApp::new();
    let (_, token) = app.make_token();

    let response = app.get_auth("/auth/checkIsAdmin", &token).await;

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["is_admin"], false);
}

#[tokio::test]
async fn test_logout_with_valid_token() {
    let app = TestApp::new();
    let (_, token) = app.make_token();

    let response = app.get_auth("/auth/logout", &token).await;

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["message"], "Logged out.");
}
