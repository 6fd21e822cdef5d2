//! Post entity and repository trait.
//!
//! Maps to the `posts` table in the database schema.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::error::AppError;

/// A single reply within a thread.
///
/// Maps to the `posts` table:
/// - id: UUID PRIMARY KEY
/// - author_id: UUID NOT NULL -- authoring user
/// - thread_id: UUID NOT NULL -- owning thread
/// - created_at: TIMESTAMPTZ NOT NULL, immutable after creation
/// - content: TEXT NOT NULL
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    /// Primary key
    pub id: Uuid,

    /// ID of the user who wrote the post
    pub author_id: Uuid,

    /// ID of the owning thread
    pub thread_id: Uuid,

    /// Creation timestamp, never updated
    pub created_at: DateTime<Utc>,

    /// Post body text
    pub content: String,
}

impl Default for Post {
    fn default() -> Self {
        Self {
            id: Uuid::nil(),
            author_id: Uuid::nil(),
            thread_id: Uuid::nil(),
            created_at: Utc::now(),
            content: String::new(),
        }
    }
}

/// Repository trait for Post data access operations.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Find a post by ID.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, AppError>;

    /// List all posts.
    async fn find_all(&self) -> Result<Vec<Post>, AppError>;

    /// List posts in a thread, oldest first.
    async fn find_by_thread(&self, thread_id: Uuid) -> Result<Vec<Post>, AppError>;

    /// List posts authored by a user, newest first.
    async fn find_by_author(&self, author_id: Uuid) -> Result<Vec<Post>, AppError>;

    /// Create a post, append its ID to the owning thread's post set and the
    /// author's post set, and mark it as the thread's last post.
    async fn create(&self, post: &Post) -> Result<Post, AppError>;

    /// Update a post's content.
    async fn update_content(&self, id: Uuid, content: &str) -> Result<Post, AppError>;

    /// Delete a post, removing its ID from the owning thread's post set and
    /// the author's post set, and recomputing the thread's last post.
    async fn delete(&self, id: Uuid) -> Result<(), AppError>;
}
