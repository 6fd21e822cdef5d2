//! Request DTOs
//!
//! Data structures for API request bodies. Each mutating endpoint has a
//! typed, validated request object; validation runs before any service or
//! store call.

use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

/// Login request
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
}

/// Registration request
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 2, max = 32, message = "Username must be 2-32 characters"))]
    pub username: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
}

/// Update user request; absent fields are left unchanged. The password is
/// re-hashed only when present here.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(length(min = 2, max = 32, message = "Username must be 2-32 characters"))]
    pub username: Option<String>,

    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: Option<String>,

    pub avatar: Option<String>,
}

/// Create board category request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCategoryRequest {
    #[validate(length(min = 1, max = 100, message = "Topic must be 1-100 characters"))]
    pub topic: String,

    #[validate(range(min = 0, message = "Sort order must be non-negative"))]
    #[serde(default)]
    pub sort_order: i32,
}

/// Update board category request
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateCategoryRequest {
    #[validate(length(min = 1, max = 100, message = "Topic must be 1-100 characters"))]
    pub topic: Option<String>,

    #[validate(range(min = 0, message = "Sort order must be non-negative"))]
    pub sort_order: Option<i32>,
}

/// Create board request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateBoardRequest {
    #[validate(length(min = 1, max = 100, message = "Topic must be 1-100 characters"))]
    pub topic: String,

    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,

    pub category_id: Uuid,
}

/// Update board request; a differing `category_id` reassigns the board.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateBoardRequest {
    #[validate(length(min = 1, max = 100, message = "Topic must be 1-100 characters"))]
    pub topic: Option<String>,

    #[validate(length(min = 1, message = "Description is required"))]
    pub description: Option<String>,

    pub category_id: Option<Uuid>,
}

/// Create thread request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateThreadRequest {
    pub author_id: Uuid,

    pub board_id: Uuid,

    #[validate(length(min = 1, max = 200, message = "Topic must be 1-200 characters"))]
    pub topic: String,
}

/// Update thread request
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateThreadRequest {
    #[validate(length(min = 1, max = 200, message = "Topic must be 1-200 characters"))]
    pub topic: String,
}

/// Create post request
#[derive(Debug, Deserialize, Validate)]
pub struct CreatePostRequest {
    pub author_id: Uuid,

    pub thread_id: Uuid,

    #[validate(length(min = 1, max = 10000, message = "Content must be 1-10000 characters"))]
    pub content: String,
}

/// Update post request
#[derive(Debug, Deserialize, Validate)]
pub struct UpdatePostRequest {
    #[validate(length(min = 1, max = 10000, message = "Content must be 1-10000 characters"))]
    pub content: String,
}

/// Query parameters for board-scoped thread listings
#[derive(Debug, Deserialize, Validate)]
pub struct ThreadListQuery {
    /// Maximum number of threads to return (default 20)
    #[validate(range(min = 1, message = "Limit must be at least 1"))]
    pub limit: Option<i64>,
}
