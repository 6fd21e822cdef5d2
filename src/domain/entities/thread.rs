//! Thread entity and repository trait.
//!
//! Maps to the `threads` table in the database schema.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::error::AppError;

/// A discussion thread within a board.
///
/// Maps to the `threads` table:
/// - id: UUID PRIMARY KEY
/// - author_id: UUID NOT NULL -- authoring user
/// - board_id: UUID NOT NULL -- owning board
/// - topic: VARCHAR(200) NOT NULL
/// - created_at: TIMESTAMPTZ NOT NULL, immutable after creation
/// - posts: UUID[] -- back-reference set of member post IDs
/// - last_post: UUID NULL -- most recent post, for index previews
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Thread {
    /// Primary key
    pub id: Uuid,

    /// ID of the user who opened the thread
    pub author_id: Uuid,

    /// ID of the owning board
    pub board_id: Uuid,

    /// Thread title
    pub topic: String,

    /// Creation timestamp, never updated
    pub created_at: DateTime<Utc>,

    /// IDs of posts in this thread
    pub posts: Vec<Uuid>,

    /// ID of the most recent post, if any
    pub last_post: Option<Uuid>,
}

impl Thread {
    /// Number of posts in the thread.
    pub fn post_count(&self) -> usize {
        self.posts.len()
    }
}

impl Default for Thread {
    fn default() -> Self {
        Self {
            id: Uuid::nil(),
            author_id: Uuid::nil(),
            board_id: Uuid::nil(),
            topic: String::new(),
            created_at: Utc::now(),
            posts: Vec::new(),
            last_post: None,
        }
    }
}

/// Repository trait for Thread data access operations.
#[async_trait]
pub trait ThreadRepository: Send + Sync {
    /// Find a thread by ID.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Thread>, AppError>;

    /// List all threads.
    async fn find_all(&self) -> Result<Vec<Thread>, AppError>;

    /// List threads in a board, newest first, capped at `limit`.
    async fn find_by_board(&self, board_id: Uuid, limit: i64) -> Result<Vec<Thread>, AppError>;

    /// List threads authored by a user, newest first.
    async fn find_by_author(&self, author_id: Uuid) -> Result<Vec<Thread>, AppError>;

    /// Create a thread and append its ID to the owning board's thread set
    /// and the author's thread set.
    async fn create(&self, thread: &Thread) -> Result<Thread, AppError>;

    /// Update a thread's topic.
    async fn update_topic(&self, id: Uuid, topic: &str) -> Result<Thread, AppError>;

    /// Delete a thread, removing its ID from the owning board's thread set
    /// and the author's thread set.
    async fn delete(&self, id: Uuid) -> Result<(), AppError>;
}
