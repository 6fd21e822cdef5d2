//! User entity and repository trait.
//!
//! Maps to the `users` table in the database schema.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::error::AppError;

/// Represents a user account in the forum.
///
/// Maps to the `users` table:
/// - id: UUID PRIMARY KEY
/// - username: VARCHAR(32) NOT NULL, unique case-insensitively
/// - email: VARCHAR(255) NOT NULL, unique case-insensitively
/// - password_hash: VARCHAR(255) NOT NULL
/// - join_date: TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// - avatar: TEXT NULL
/// - posts: UUID[] -- back-reference set of authored post IDs
/// - threads: UUID[] -- back-reference set of authored thread IDs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Primary key
    pub id: Uuid,

    /// Username (unique, compared case-insensitively)
    pub username: String,

    /// Email address (unique, compared case-insensitively)
    pub email: String,

    /// Argon2 password hash, never exposed in responses
    #[serde(skip_serializing)]
    pub password_hash: String,

    /// Account creation timestamp
    pub join_date: DateTime<Utc>,

    /// Avatar image reference
    pub avatar: Option<String>,

    /// IDs of posts authored by this user
    pub posts: Vec<Uuid>,

    /// IDs of threads authored by this user
    pub threads: Vec<Uuid>,
}

impl User {
    /// Check whether the user has authored any content.
    pub fn has_content(&self) -> bool {
        !self.posts.is_empty() || !self.threads.is_empty()
    }
}

impl Default for User {
    fn default() -> Self {
        Self {
            id: Uuid::nil(),
            username: String::new(),
            email: String::new(),
            password_hash: String::new(),
            join_date: Utc::now(),
            avatar: None,
            posts: Vec::new(),
            threads: Vec::new(),
        }
    }
}

/// Repository trait for User data access operations.
///
/// Implementations of this trait handle the actual database interactions.
/// The trait is defined in the domain layer to maintain dependency inversion.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by ID.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError>;

    /// Find a user by email address (case-insensitive).
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    /// List all users.
    async fn find_all(&self) -> Result<Vec<User>, AppError>;

    /// Create a new user.
    async fn create(&self, user: &User) -> Result<User, AppError>;

    /// Update an existing user's profile fields.
    async fn update(&self, user: &User) -> Result<User, AppError>;

    /// Delete a user by ID.
    async fn delete(&self, id: Uuid) -> Result<(), AppError>;

    /// Check if an email address is already registered (case-insensitive).
    async fn email_exists(&self, email: &str) -> Result<bool, AppError>;

    /// Check if a username is already taken (case-insensitive).
    async fn username_exists(&self, username: &str) -> Result<bool, AppError>;
}
