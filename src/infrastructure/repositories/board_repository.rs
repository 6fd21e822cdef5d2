//! Board Repository Implementation
//!
//! PostgreSQL implementation of the BoardRepository trait. Creation,
//! category reassignment and deletion each run as a single transaction that
//! writes the board row together with the affected category board sets.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::{Board, BoardRepository};
use crate::infrastructure::database::CATEGORY_BOARDS;
use crate::shared::error::AppError;

/// Database row representation matching the boards table schema.
#[derive(Debug, sqlx::FromRow)]
struct BoardRow {
    id: Uuid,
    topic: String,
    description: String,
    category_id: Uuid,
    threads: Vec<Uuid>,
}

impl BoardRow {
    fn into_board(self) -> Board {
        Board {
            id: self.id,
            topic: self.topic,
            description: self.description,
            category_id: self.category_id,
            threads: self.threads,
        }
    }
}

const BOARD_COLUMNS: &str = "id, topic, description, category_id, threads";

/// PostgreSQL board repository implementation.
#[derive(Clone)]
pub struct PgBoardRepository {
    pool: PgPool,
}

impl PgBoardRepository {
    /// Create a new PgBoardRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BoardRepository for PgBoardRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Board>, AppError> {
        let row = sqlx::query_as::<_, BoardRow>(&format!(
            "SELECT {BOARD_COLUMNS} FROM boards WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.into_board()))
    }

    async fn find_all(&self) -> Result<Vec<Board>, AppError> {
        let rows = sqlx::query_as::<_, BoardRow>(&format!(
            "SELECT {BOARD_COLUMNS} FROM boards ORDER BY topic ASC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|r| r.into_board()).collect())
    }

    async fn find_by_category(&self, category_id: Uuid) -> Result<Vec<Board>, AppError> {
        let rows = sqlx::query_as::<_, BoardRow>(&format!(
            "SELECT {BOARD_COLUMNS} FROM boards WHERE category_id = $1 ORDER BY topic ASC"
        ))
        .bind(category_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|r| r.into_board()).collect())
    }

    async fn topic_exists(&self, topic: &str) -> Result<bool, AppError> {
        let exists: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM boards WHERE LOWER(topic) = LOWER($1))")
                .bind(topic)
                .fetch_one(&self.pool)
                .await?;

        Ok(exists.0)
    }

    async fn create(&self, board: &Board) -> Result<Board, AppError> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, BoardRow>(&format!(
            r#"
            INSERT INTO boards (id, topic, description, category_id, threads)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {BOARD_COLUMNS}
            "#
        ))
        .bind(board.id)
        .bind(&board.topic)
        .bind(&board.description)
        .bind(board.category_id)
        .bind(&board.threads)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                AppError::Conflict("Board exists.".to_string())
            }
            _ => AppError::Database(e),
        })?;

        // Mirror the new board in the owning category's board set. A missing
        // category aborts the whole transaction.
        CATEGORY_BOARDS
            .attach(&mut tx, board.category_id, board.id)
            .await?;

        tx.commit().await?;
        Ok(row.into_board())
    }

    async fn update(&self, board: &Board) -> Result<Board, AppError> {
        let mut tx = self.pool.begin().await?;

        let current = sqlx::query_as::<_, BoardRow>(&format!(
            "SELECT {BOARD_COLUMNS} FROM boards WHERE id = $1 FOR UPDATE"
        ))
        .bind(board.id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Could not find board with ID {}.", board.id)))?;

        // Reassignment moves the board's ID between category board sets in
        // the same transaction as the row update.
        if current.category_id != board.category_id {
            CATEGORY_BOARDS
                .detach(&mut tx, current.category_id, board.id)
                .await?;
            CATEGORY_BOARDS
                .attach(&mut tx, board.category_id, board.id)
                .await?;
        }

        let row = sqlx::query_as::<_, BoardRow>(&format!(
            r#"
            UPDATE boards
            SET topic = $2,
                description = $3,
                category_id = $4
            WHERE id = $1
            RETURNING {BOARD_COLUMNS}
            "#
        ))
        .bind(board.id)
        .bind(&board.topic)
        .bind(&board.description)
        .bind(board.category_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                AppError::Conflict("Board exists.".to_string())
            }
            _ => AppError::Database(e),
        })?;

        tx.commit().await?;
        Ok(row.into_board())
    }

    async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        let current = sqlx::query_as::<_, BoardRow>(&format!(
            "SELECT {BOARD_COLUMNS} FROM boards WHERE id = $1 FOR UPDATE"
        ))
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Could not find board with ID {}.", id)))?;

        CATEGORY_BOARDS
            .detach(&mut tx, current.category_id, id)
            .await?;

        // TODO: cascade-delete the board's threads and their posts; they are
        // currently orphaned and only reachable by direct ID.
        sqlx::query("DELETE FROM boards WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }
}
