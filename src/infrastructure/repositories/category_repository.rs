//! Board Category Repository Implementation
//!
//! PostgreSQL implementation of the CategoryRepository trait.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::{BoardCategory, CategoryRepository};
use crate::shared::error::AppError;

/// Database row representation matching the board_categories table schema.
#[derive(Debug, sqlx::FromRow)]
struct CategoryRow {
    id: Uuid,
    topic: String,
    boards: Vec<Uuid>,
    sort_order: i32,
}

impl CategoryRow {
    fn into_category(self) -> BoardCategory {
        BoardCategory {
            id: self.id,
            topic: self.topic,
            boards: self.boards,
            sort_order: self.sort_order,
        }
    }
}

/// PostgreSQL board category repository implementation.
#[derive(Clone)]
pub struct PgCategoryRepository {
    pool: PgPool,
}

impl PgCategoryRepository {
    /// Create a new PgCategoryRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CategoryRepository for PgCategoryRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<BoardCategory>, AppError> {
        let row = sqlx::query_as::<_, CategoryRow>(
            "SELECT id, topic, boards, sort_order FROM board_categories WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.into_category()))
    }

    async fn find_all(&self) -> Result<Vec<BoardCategory>, AppError> {
        let rows = sqlx::query_as::<_, CategoryRow>(
            "SELECT id, topic, boards, sort_order FROM board_categories ORDER BY sort_order ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|r| r.into_category()).collect())
    }

    async fn topic_exists(&self, topic: &str) -> Result<bool, AppError> {
        let exists: (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM board_categories WHERE LOWER(topic) = LOWER($1))",
        )
        .bind(topic)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists.0)
    }

    async fn create(&self, category: &BoardCategory) -> Result<BoardCategory, AppError> {
        let row = sqlx::query_as::<_, CategoryRow>(
            r#"
            INSERT INTO board_categories (id, topic, boards, sort_order)
            VALUES ($1, $2, $3, $4)
            RETURNING id, topic, boards, sort_order
            "#,
        )
        .bind(category.id)
        .bind(&category.topic)
        .bind(&category.boards)
        .bind(category.sort_order)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                AppError::Conflict("Category exists.".to_string())
            }
            _ => AppError::Database(e),
        })?;

        Ok(row.into_category())
    }

    async fn update(&self, category: &BoardCategory) -> Result<BoardCategory, AppError> {
        // The boards set is link-managed and not written here.
        let row = sqlx::query_as::<_, CategoryRow>(
            r#"
            UPDATE board_categories
            SET topic = $2,
                sort_order = $3
            WHERE id = $1
            RETURNING id, topic, boards, sort_order
            "#,
        )
        .bind(category.id)
        .bind(&category.topic)
        .bind(category.sort_order)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                AppError::Conflict("Category exists.".to_string())
            }
            _ => AppError::Database(e),
        })?
        .ok_or_else(|| {
            AppError::NotFound(format!(
                "Could not find board category with ID {}.",
                category.id
            ))
        })?;

        Ok(row.into_category())
    }

    async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM board_categories WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Could not find board category with ID {}.",
                id
            )));
        }

        Ok(())
    }
}
