//! Thread Repository Implementation
//!
//! PostgreSQL implementation of the ThreadRepository trait. Creation and
//! deletion run as single transactions that write the thread row together
//! with the board's thread set and the author's thread set.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::{Thread, ThreadRepository};
use crate::infrastructure::database::{BOARD_THREADS, USER_THREADS};
use crate::shared::error::AppError;

/// Database row representation matching the threads table schema.
#[derive(Debug, sqlx::FromRow)]
struct ThreadRow {
    id: Uuid,
    author_id: Uuid,
    board_id: Uuid,
    topic: String,
    created_at: DateTime<Utc>,
    posts: Vec<Uuid>,
    last_post: Option<Uuid>,
}

impl ThreadRow {
    fn into_thread(self) -> Thread {
        Thread {
            id: self.id,
            author_id: self.author_id,
            board_id: self.board_id,
            topic: self.topic,
            created_at: self.created_at,
            posts: self.posts,
            last_post: self.last_post,
        }
    }
}

const THREAD_COLUMNS: &str = "id, author_id, board_id, topic, created_at, posts, last_post";

/// PostgreSQL thread repository implementation.
#[derive(Clone)]
pub struct PgThreadRepository {
    pool: PgPool,
}

impl PgThreadRepository {
    /// Create a new PgThreadRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ThreadRepository for PgThreadRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Thread>, AppError> {
        let row = sqlx::query_as::<_, ThreadRow>(&format!(
            "SELECT {THREAD_COLUMNS} FROM threads WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.into_thread()))
    }

    async fn find_all(&self) -> Result<Vec<Thread>, AppError> {
        let rows = sqlx::query_as::<_, ThreadRow>(&format!(
            "SELECT {THREAD_COLUMNS} FROM threads ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|r| r.into_thread()).collect())
    }

    async fn find_by_board(&self, board_id: Uuid, limit: i64) -> Result<Vec<Thread>, AppError> {
        // TODO: order by most-recent-post activity instead of thread
        // creation time once last_post is maintained everywhere.
        let rows = sqlx::query_as::<_, ThreadRow>(&format!(
            r#"
            SELECT {THREAD_COLUMNS}
            FROM threads
            WHERE board_id = $1
            ORDER BY created_at DESC
            LIMIT $2
            "#
        ))
        .bind(board_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|r| r.into_thread()).collect())
    }

    async fn find_by_author(&self, author_id: Uuid) -> Result<Vec<Thread>, AppError> {
        let rows = sqlx::query_as::<_, ThreadRow>(&format!(
            "SELECT {THREAD_COLUMNS} FROM threads WHERE author_id = $1 ORDER BY created_at DESC"
        ))
        .bind(author_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|r| r.into_thread()).collect())
    }

    async fn create(&self, thread: &Thread) -> Result<Thread, AppError> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, ThreadRow>(&format!(
            r#"
            INSERT INTO threads (id, author_id, board_id, topic, created_at, posts, last_post)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {THREAD_COLUMNS}
            "#
        ))
        .bind(thread.id)
        .bind(thread.author_id)
        .bind(thread.board_id)
        .bind(&thread.topic)
        .bind(thread.created_at)
        .bind(&thread.posts)
        .bind(thread.last_post)
        .fetch_one(&mut *tx)
        .await?;

        // Mirror the new thread on both parents; a missing board or author
        // aborts the whole transaction.
        BOARD_THREADS
            .attach(&mut tx, thread.board_id, thread.id)
            .await?;
        USER_THREADS
            .attach(&mut tx, thread.author_id, thread.id)
            .await?;

        tx.commit().await?;
        Ok(row.into_thread())
    }

    async fn update_topic(&self, id: Uuid, topic: &str) -> Result<Thread, AppError> {
        let row = sqlx::query_as::<_, ThreadRow>(&format!(
            r#"
            UPDATE threads
            SET topic = $2
            WHERE id = $1
            RETURNING {THREAD_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(topic)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Could not find thread with ID {}.", id)))?;

        Ok(row.into_thread())
    }

    async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        let current = sqlx::query_as::<_, ThreadRow>(&format!(
            "SELECT {THREAD_COLUMNS} FROM threads WHERE id = $1 FOR UPDATE"
        ))
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Could not find thread with ID {}.", id)))?;

        BOARD_THREADS.detach(&mut tx, current.board_id, id).await?;
        USER_THREADS.detach(&mut tx, current.author_id, id).await?;

        // TODO: cascade-delete the thread's posts; they are currently
        // orphaned and only reachable by direct ID.
        sqlx::query("DELETE FROM threads WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }
}
