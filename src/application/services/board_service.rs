//! Board Service
//!
//! Board management, including reassignment between categories.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Board, BoardRepository, CategoryRepository};

/// Board service trait
#[async_trait]
pub trait BoardService: Send + Sync {
    /// List all boards
    async fn list_boards(&self) -> Result<Vec<Board>, BoardError>;

    /// Get board by ID
    async fn get_board(&self, board_id: Uuid) -> Result<Board, BoardError>;

    /// List the boards belonging to a category
    async fn list_boards_by_category(&self, category_id: Uuid) -> Result<Vec<Board>, BoardError>;

    /// Create a new board under a category
    async fn create_board(&self, request: CreateBoardDto) -> Result<Board, BoardError>;

    /// Update a board, possibly moving it to another category
    async fn update_board(&self, board_id: Uuid, update: UpdateBoardDto) -> Result<Board, BoardError>;

    /// Delete a board
    async fn delete_board(&self, board_id: Uuid) -> Result<(), BoardError>;
}

/// Create board request
#[derive(Debug, Clone)]
pub struct CreateBoardDto {
    pub topic: String,
    pub description: String,
    pub category_id: Uuid,
}

/// Update board request
#[derive(Debug, Clone, Default)]
pub struct UpdateBoardDto {
    pub topic: Option<String>,
    pub description: Option<String>,
    pub category_id: Option<Uuid>,
}

/// Board service errors
#[derive(Debug, thiserror::Error)]
pub enum BoardError {
    #[error("Board not found")]
    NotFound,

    #[error("Category not found")]
    CategoryNotFound,

    /// Creation referenced a category that does not exist. Kept distinct
    /// from `CategoryNotFound` so handlers can report it as a bad request
    /// rather than a missing resource.
    #[error("Category does not exist")]
    MissingCategory,

    #[error("Board exists")]
    TopicExists,

    #[error("Internal error: {0}")]
    Internal(String),
}

/// BoardService implementation
pub struct BoardServiceImpl<B, C>
where
    B: BoardRepository,
    C: CategoryRepository,
{
    board_repo: Arc<B>,
    category_repo: Arc<C>,
}

impl<B, C> BoardServiceImpl<B, C>
where
    B: BoardRepository,
    C: CategoryRepository,
{
    pub fn new(board_repo: Arc<B>, category_repo: Arc<C>) -> Self {
        Self {
            board_repo,
            category_repo,
        }
    }

    async fn category_exists(&self, category_id: Uuid) -> Result<bool, BoardError> {
        Ok(self
            .category_repo
            .find_by_id(category_id)
            .await
            .map_err(|e| BoardError::Internal(e.to_string()))?
            .is_some())
    }
}

#[async_trait]
impl<B, C> BoardService for BoardServiceImpl<B, C>
where
    B: BoardRepository + 'static,
    C: CategoryRepository + 'static,
{
    async fn list_boards(&self) -> Result<Vec<Board>, BoardError> {
        self.board_repo
            .find_all()
            .await
            .map_err(|e| BoardError::Internal(e.to_string()))
    }

    async fn get_board(&self, board_id: Uuid) -> Result<Board, BoardError> {
        self.board_repo
            .find_by_id(board_id)
            .await
            .map_err(|e| BoardError::Internal(e.to_string()))?
            .ok_or(BoardError::NotFound)
    }

    async fn list_boards_by_category(&self, category_id: Uuid) -> Result<Vec<Board>, BoardError> {
        if !self.category_exists(category_id).await? {
            return Err(BoardError::CategoryNotFound);
        }

        self.board_repo
            .find_by_category(category_id)
            .await
            .map_err(|e| BoardError::Internal(e.to_string()))
    }

    async fn create_board(&self, request: CreateBoardDto) -> Result<Board, BoardError> {
        if !self.category_exists(request.category_id).await? {
            return Err(BoardError::MissingCategory);
        }

        if self
            .board_repo
            .topic_exists(&request.topic)
            .await
            .map_err(|e| BoardError::Internal(e.to_string()))?
        {
            return Err(BoardError::TopicExists);
        }

        let board = Board {
            id: Uuid::now_v7(),
            topic: request.topic,
            description: request.description,
            category_id: request.category_id,
            threads: Vec::new(),
        };

        let created = self
            .board_repo
            .create(&board)
            .await
            .map_err(|e| BoardError::Internal(e.to_string()))?;

        tracing::info!(topic = %created.topic, category_id = %created.category_id, "Created new board");

        Ok(created)
    }

    async fn update_board(&self, board_id: Uuid, update: UpdateBoardDto) -> Result<Board, BoardError> {
        let mut board = self
            .board_repo
            .find_by_id(board_id)
            .await
            .map_err(|e| BoardError::Internal(e.to_string()))?
            .ok_or(BoardError::NotFound)?;

        if let Some(topic) = update.topic {
            if !topic.eq_ignore_ascii_case(&board.topic)
                && self
                    .board_repo
                    .topic_exists(&topic)
                    .await
                    .map_err(|e| BoardError::Internal(e.to_string()))?
            {
                return Err(BoardError::TopicExists);
            }
            board.topic = topic;
        }

        if let Some(description) = update.description {
            board.description = description;
        }

        // Reassignment target must exist before the repository moves the
        // board's ID between category board sets.
        if let Some(category_id) = update.category_id {
            if category_id != board.category_id && !self.category_exists(category_id).await? {
                return Err(BoardError::MissingCategory);
            }
            board.category_id = category_id;
        }

        self.board_repo
            .update(&board)
            .await
            .map_err(|e| BoardError::Internal(e.to_string()))
    }

    async fn delete_board(&self, board_id: Uuid) -> Result<(), BoardError> {
        let board = self
            .board_repo
            .find_by_id(board_id)
            .await
            .map_err(|e| BoardError::Internal(e.to_string()))?
            .ok_or(BoardError::NotFound)?;

        // TODO: cascade-delete the board's threads and their posts. Until
        // then, threads under a deleted board are orphaned and reachable
        // only by direct ID.
        self.board_repo
            .delete(board.id)
            .await
            .map_err(|e| BoardError::Internal(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Mutex;

    use crate::domain::BoardCategory;
    use crate::shared::error::AppError;

    /// In-memory stand-in for the Postgres board repository.
    #[derive(Default)]
    struct InMemoryBoardRepo {
        boards: Mutex<Vec<Board>>,
    }

    #[async_trait]
    impl BoardRepository for InMemoryBoardRepo {
        async fn find_by_id(&self, id: Uuid) -> Result<Option<Board>, AppError> {
            Ok(self.boards.lock().unwrap().iter().find(|b| b.id == id).cloned())
        }

        async fn find_all(&self) -> Result<Vec<Board>, AppError> {
            Ok(self.boards.lock().unwrap().clone())
        }

        async fn find_by_category(&self, category_id: Uuid) -> Result<Vec<Board>, AppError> {
            Ok(self
                .boards
                .lock()
                .unwrap()
                .iter()
                .filter(|b| b.category_id == category_id)
                .cloned()
                .collect())
        }

        async fn topic_exists(&self, topic: &str) -> Result<bool, AppError> {
            Ok(self
                .boards
                .lock()
                .unwrap()
                .iter()
                .any(|b| b.topic.eq_ignore_ascii_case(topic)))
        }

        async fn create(&self, board: &Board) -> Result<Board, AppError> {
            self.boards.lock().unwrap().push(board.clone());
            Ok(board.clone())
        }

        async fn update(&self, board: &Board) -> Result<Board, AppError> {
            let mut boards = self.boards.lock().unwrap();
            let stored = boards
                .iter_mut()
                .find(|b| b.id == board.id)
                .expect("updating a board that was never stored");
            *stored = board.clone();
            Ok(board.clone())
        }

        async fn delete(&self, id: Uuid) -> Result<(), AppError> {
            self.boards.lock().unwrap().retain(|b| b.id != id);
            Ok(())
        }
    }

    /// Category lookup backed by a fixed set of known IDs.
    struct KnownCategories {
        ids: Vec<Uuid>,
    }

    #[async_trait]
    impl CategoryRepository for KnownCategories {
        async fn find_by_id(&self, id: Uuid) -> Result<Option<BoardCategory>, AppError> {
            Ok(self.ids.contains(&id).then(|| BoardCategory {
                id,
                ..Default::default()
            }))
        }

        async fn find_all(&self) -> Result<Vec<BoardCategory>, AppError> {
            Ok(Vec::new())
        }

        async fn topic_exists(&self, _topic: &str) -> Result<bool, AppError> {
            Ok(false)
        }

        async fn create(&self, category: &BoardCategory) -> Result<BoardCategory, AppError> {
            Ok(category.clone())
        }

        async fn update(&self, category: &BoardCategory) -> Result<BoardCategory, AppError> {
            Ok(category.clone())
        }

        async fn delete(&self, _id: Uuid) -> Result<(), AppError> {
            Ok(())
        }
    }

    fn service_with(
        category_ids: Vec<Uuid>,
    ) -> BoardServiceImpl<InMemoryBoardRepo, KnownCategories> {
        BoardServiceImpl::new(
            Arc::new(InMemoryBoardRepo::default()),
            Arc::new(KnownCategories { ids: category_ids }),
        )
    }

    fn create_dto(topic: &str, category_id: Uuid) -> CreateBoardDto {
        CreateBoardDto {
            topic: topic.into(),
            description: "desc".into(),
            category_id,
        }
    }

    #[tokio::test]
    async fn test_create_board_requires_existing_category() {
        let service = service_with(Vec::new());

        let err = service
            .create_board(create_dto("Rust", Uuid::now_v7()))
            .await
            .unwrap_err();

        assert!(matches!(err, BoardError::MissingCategory));
    }

    #[tokio::test]
    async fn test_create_board_rejects_duplicate_topic() {
        let category_id = Uuid::now_v7();
        let service = service_with(vec![category_id]);

        service
            .create_board(create_dto("Rust", category_id))
            .await
            .expect("first create");

        // Pre-check compares case-insensitively
        let err = service
            .create_board(create_dto("RUST", category_id))
            .await
            .unwrap_err();

        assert!(matches!(err, BoardError::TopicExists));
    }

    #[tokio::test]
    async fn test_update_board_reassignment_requires_target_category() {
        let category_id = Uuid::now_v7();
        let service = service_with(vec![category_id]);

        let board = service
            .create_board(create_dto("Rust", category_id))
            .await
            .expect("create");

        let err = service
            .update_board(
                board.id,
                UpdateBoardDto {
                    category_id: Some(Uuid::now_v7()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, BoardError::MissingCategory));
    }

    #[tokio::test]
    async fn test_update_board_moves_board_to_existing_category() {
        let old_category = Uuid::now_v7();
        let new_category = Uuid::now_v7();
        let service = service_with(vec![old_category, new_category]);

        let board = service
            .create_board(create_dto("Rust", old_category))
            .await
            .expect("create");

        let moved = service
            .update_board(
                board.id,
                UpdateBoardDto {
                    category_id: Some(new_category),
                    ..Default::default()
                },
            )
            .await
            .expect("update");

        assert_eq!(moved.category_id, new_category);
    }

    #[tokio::test]
    async fn test_category_listing_requires_existing_category() {
        let service = service_with(Vec::new());

        let err = service
            .list_boards_by_category(Uuid::now_v7())
            .await
            .unwrap_err();

        assert!(matches!(err, BoardError::CategoryNotFound));
    }
}
