//! Board category entity and repository trait.
//!
//! Maps to the `board_categories` table in the database schema.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::error::AppError;

/// A top-level grouping of boards on the forum index.
///
/// Maps to the `board_categories` table:
/// - id: UUID PRIMARY KEY
/// - topic: VARCHAR(100) NOT NULL, unique case-insensitively
/// - boards: UUID[] -- back-reference set of member board IDs
/// - sort_order: INTEGER NOT NULL, >= 0
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardCategory {
    /// Primary key
    pub id: Uuid,

    /// Display name for the category
    pub topic: String,

    /// IDs of boards belonging to this category
    pub boards: Vec<Uuid>,

    /// Position of the category on the forum index (0 is topmost)
    pub sort_order: i32,
}

impl BoardCategory {
    /// Check whether the category contains no boards.
    pub fn is_empty(&self) -> bool {
        self.boards.is_empty()
    }
}

impl Default for BoardCategory {
    fn default() -> Self {
        Self {
            id: Uuid::nil(),
            topic: String::new(),
            boards: Vec::new(),
            sort_order: 0,
        }
    }
}

/// Repository trait for BoardCategory data access operations.
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Find a category by ID.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<BoardCategory>, AppError>;

    /// List all categories, ordered by sort order.
    async fn find_all(&self) -> Result<Vec<BoardCategory>, AppError>;

    /// Check if a category topic is already taken (case-insensitive).
    async fn topic_exists(&self, topic: &str) -> Result<bool, AppError>;

    /// Create a new category.
    async fn create(&self, category: &BoardCategory) -> Result<BoardCategory, AppError>;

    /// Update a category's topic and sort order.
    async fn update(&self, category: &BoardCategory) -> Result<BoardCategory, AppError>;

    /// Delete a category by ID.
    ///
    /// Does not touch the category's boards; orphan handling is the
    /// caller's concern.
    async fn delete(&self, id: Uuid) -> Result<(), AppError>;
}
