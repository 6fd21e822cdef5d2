//! Routing Tests
//!
//! Path matching, ID parsing, and CORS preflight behavior.

use axum::http::StatusCode;
use pretty_assertions::assert_eq;

use crate::common::{body_json, TestApp};

#[tokio::test]
async fn test_unknown_route_returns_404() {
    let app = TestApp::new();

    let response = app.get("/no/such/route").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unparseable_board_id_reports_missing_document() {
    let app = TestApp::new();

    let response = app.get("/boards/not-a-uuid").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = body_json(response).await;
    assert_eq!(body["message"], "Could not find board with ID not-a-uuid.");
}

#[tokio::test]
async fn test_unparseable_category_id_reports_missing_document() {
    let app = TestApp::new();

    let response = app.get("/boardCategories/42").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = body_json(response).await;
    assert_eq!(body["message"], "Could not find board category with ID 42.");
}

#[tokio::test]
async fn test_unparseable_thread_id_in_nested_listing() {
    let app = TestApp::new();

    let response = app.get("/posts/thread/garbage").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = body_json(response).await;
    assert_eq!(body["message"], "Could not find thread with ID garbage.");
}

#[tokio::test]
async fn test_unparseable_id_on_protected_route() {
    let app = TestApp::new();
    let (_, token) = app.make_token();

    let response = app
        .json_auth("PATCH", "/users/not-a-uuid", "{}", &token)
        .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = body_json(response).await;
    assert_eq!(body["message"], "Could not find user with ID not-a-uuid.");
}

#[tokio::test]
async fn test_preflight_bypasses_auth_gate() {
    let app = TestApp::new();

    // No Authorization header; preflight must still succeed
    let response = app.preflight("/boards", "POST").await;

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_board_thread_listing_rejects_zero_limit() {
    let app = TestApp::new();

    // Query validation fails before the board lookup touches the pool
    let response = app
        .get("/threads/board/00000000-0000-0000-0000-000000000000?limit=0")
        .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body = body_json(response).await;
    assert_eq!(body["message"], "limit: Limit must be at least 1");
}

#[tokio::test]
async fn test_validation_runs_before_database_access() {
    let app = TestApp::new();
    let (_, token) = app.make_token();

    // Empty topic fails validation without touching the pool
    let body = r#"{"topic":"","description":"d","category_id":"00000000-0000-0000-0000-000000000000"}"#;
    let response = app.json_auth("POST", "/boards", body, &token).await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}
