//! Response DTOs
//!
//! Data structures for API response bodies. Content entities serialize
//! directly (the password hash is excluded at the entity level); this module
//! holds the auth-flow shapes and the generic status message.

use serde::Serialize;
use uuid::Uuid;

use crate::application::services::auth_service::AuthToken;
use crate::domain::User;

/// Generic status message body
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Public view of a user account
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub join_date: String,
    pub avatar: Option<String>,
    pub posts: Vec<Uuid>,
    pub threads: Vec<Uuid>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            join_date: user.join_date.to_rfc3339(),
            avatar: user.avatar,
            posts: user.posts,
            threads: user.threads,
        }
    }
}

/// Registration response (includes user and bearer token)
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub user: UserResponse,
    pub token: String,
    pub expires_in: i64,
    pub token_type: String,
}

impl RegisterResponse {
    pub fn new(user: User, token: AuthToken) -> Self {
        Self {
            user: UserResponse::from(user),
            token: token.token,
            expires_in: token.expires_in,
            token_type: token.token_type,
        }
    }
}

/// Login response (includes user and bearer token)
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub message: String,
    pub user: UserResponse,
    pub token: String,
    pub expires_in: i64,
    pub token_type: String,
}

impl LoginResponse {
    pub fn new(user: User, token: AuthToken) -> Self {
        Self {
            message: "Login successful.".into(),
            user: UserResponse::from(user),
            token: token.token,
            expires_in: token.expires_in,
            token_type: token.token_type,
        }
    }
}

/// Body for `GET /auth/checkIsAuthenticated`
#[derive(Debug, Serialize)]
pub struct AuthCheckResponse {
    pub authenticated: bool,
    pub user_id: Uuid,
}

/// Body for `GET /auth/checkIsAdmin`
#[derive(Debug, Serialize)]
pub struct AdminCheckResponse {
    pub is_admin: bool,
}
