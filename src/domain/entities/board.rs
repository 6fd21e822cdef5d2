//! Board entity and repository trait.
//!
//! Maps to the `boards` table in the database schema.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::error::AppError;

/// A discussion board holding threads, owned by exactly one category.
///
/// Maps to the `boards` table:
/// - id: UUID PRIMARY KEY
/// - topic: VARCHAR(100) NOT NULL, unique case-insensitively
/// - description: TEXT NOT NULL
/// - category_id: UUID NOT NULL -- owning category
/// - threads: UUID[] -- back-reference set of member thread IDs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Board {
    /// Primary key
    pub id: Uuid,

    /// Board name shown on the forum index
    pub topic: String,

    /// Short description of what belongs on the board
    pub description: String,

    /// ID of the owning category
    pub category_id: Uuid,

    /// IDs of threads belonging to this board
    pub threads: Vec<Uuid>,
}

impl Default for Board {
    fn default() -> Self {
        Self {
            id: Uuid::nil(),
            topic: String::new(),
            description: String::new(),
            category_id: Uuid::nil(),
            threads: Vec::new(),
        }
    }
}

/// Repository trait for Board data access operations.
///
/// Mutations that touch back-reference sets (create, reassign, delete) must
/// be atomic: either the board row and every affected parent set change
/// together, or nothing changes.
#[async_trait]
pub trait BoardRepository: Send + Sync {
    /// Find a board by ID.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Board>, AppError>;

    /// List all boards.
    async fn find_all(&self) -> Result<Vec<Board>, AppError>;

    /// List the boards belonging to a category.
    async fn find_by_category(&self, category_id: Uuid) -> Result<Vec<Board>, AppError>;

    /// Check if a board topic is already taken (case-insensitive).
    async fn topic_exists(&self, topic: &str) -> Result<bool, AppError>;

    /// Create a board and append its ID to the owning category's board set.
    async fn create(&self, board: &Board) -> Result<Board, AppError>;

    /// Update a board. When `category_id` differs from the stored one, the
    /// board's ID moves from the old category's board set to the new one's
    /// in the same transaction.
    async fn update(&self, board: &Board) -> Result<Board, AppError>;

    /// Delete a board, removing its ID from the owning category's board set.
    async fn delete(&self, id: Uuid) -> Result<(), AppError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_default() {
        let board = Board::default();

        assert!(board.id.is_nil());
        assert!(board.topic.is_empty());
        assert!(board.description.is_empty());
        assert!(board.category_id.is_nil());
        assert!(board.threads.is_empty());
    }

    #[test]
    fn test_board_serializes_category_reference() {
        let category_id = Uuid::now_v7();
        let board = Board {
            id: Uuid::now_v7(),
            topic: "Rust".to_string(),
            description: "All things Rust".to_string(),
            category_id,
            threads: Vec::new(),
        };

        let json = serde_json::to_string(&board).expect("serialize");
        assert!(json.contains(&format!("\"category_id\":\"{}\"", category_id)));
        assert!(json.contains("\"threads\":[]"));
    }
}
