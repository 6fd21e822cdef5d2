//! Post Repository Implementation
//!
//! PostgreSQL implementation of the PostRepository trait. Creation and
//! deletion run as single transactions that write the post row together with
//! the thread's post set, the author's post set, and the thread's last-post
//! marker.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::{Post, PostRepository};
use crate::infrastructure::database::{THREAD_POSTS, USER_POSTS};
use crate::shared::error::AppError;

/// Database row representation matching the posts table schema.
#[derive(Debug, sqlx::FromRow)]
struct PostRow {
    id: Uuid,
    author_id: Uuid,
    thread_id: Uuid,
    created_at: DateTime<Utc>,
    content: String,
}

impl PostRow {
    fn into_post(self) -> Post {
        Post {
            id: self.id,
            author_id: self.author_id,
            thread_id: self.thread_id,
            created_at: self.created_at,
            content: self.content,
        }
    }
}

const POST_COLUMNS: &str = "id, author_id, thread_id, created_at, content";

/// PostgreSQL post repository implementation.
#[derive(Clone)]
pub struct PgPostRepository {
    pool: PgPool,
}

impl PgPostRepository {
    /// Create a new PgPostRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PostRepository for PgPostRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, AppError> {
        let row = sqlx::query_as::<_, PostRow>(&format!(
            "SELECT {POST_COLUMNS} FROM posts WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.into_post()))
    }

    async fn find_all(&self) -> Result<Vec<Post>, AppError> {
        let rows = sqlx::query_as::<_, PostRow>(&format!(
            "SELECT {POST_COLUMNS} FROM posts ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|r| r.into_post()).collect())
    }

    async fn find_by_thread(&self, thread_id: Uuid) -> Result<Vec<Post>, AppError> {
        let rows = sqlx::query_as::<_, PostRow>(&format!(
            "SELECT {POST_COLUMNS} FROM posts WHERE thread_id = $1 ORDER BY created_at ASC"
        ))
        .bind(thread_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|r| r.into_post()).collect())
    }

    async fn find_by_author(&self, author_id: Uuid) -> Result<Vec<Post>, AppError> {
        let rows = sqlx::query_as::<_, PostRow>(&format!(
            "SELECT {POST_COLUMNS} FROM posts WHERE author_id = $1 ORDER BY created_at DESC"
        ))
        .bind(author_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|r| r.into_post()).collect())
    }

    async fn create(&self, post: &Post) -> Result<Post, AppError> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, PostRow>(&format!(
            r#"
            INSERT INTO posts (id, author_id, thread_id, created_at, content)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {POST_COLUMNS}
            "#
        ))
        .bind(post.id)
        .bind(post.author_id)
        .bind(post.thread_id)
        .bind(post.created_at)
        .bind(&post.content)
        .fetch_one(&mut *tx)
        .await?;

        // Mirror the new post on both parents; a missing thread or author
        // aborts the whole transaction.
        THREAD_POSTS
            .attach(&mut tx, post.thread_id, post.id)
            .await?;
        USER_POSTS.attach(&mut tx, post.author_id, post.id).await?;

        // The newest post is always the thread's last post.
        sqlx::query("UPDATE threads SET last_post = $2 WHERE id = $1")
            .bind(post.thread_id)
            .bind(post.id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(row.into_post())
    }

    async fn update_content(&self, id: Uuid, content: &str) -> Result<Post, AppError> {
        let row = sqlx::query_as::<_, PostRow>(&format!(
            r#"
            UPDATE posts
            SET content = $2
            WHERE id = $1
            RETURNING {POST_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(content)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Could not find post with ID {}.", id)))?;

        Ok(row.into_post())
    }

    async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        let current = sqlx::query_as::<_, PostRow>(&format!(
            "SELECT {POST_COLUMNS} FROM posts WHERE id = $1 FOR UPDATE"
        ))
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Could not find post with ID {}.", id)))?;

        THREAD_POSTS
            .detach(&mut tx, current.thread_id, id)
            .await?;
        USER_POSTS
            .detach(&mut tx, current.author_id, id)
            .await?;

        sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        // Recompute the thread's last post from whatever remains.
        sqlx::query(
            r#"
            UPDATE threads
            SET last_post = (
                SELECT id FROM posts
                WHERE thread_id = $1
                ORDER BY created_at DESC, id DESC
                LIMIT 1
            )
            WHERE id = $1
            "#,
        )
        .bind(current.thread_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(())
    }
}
