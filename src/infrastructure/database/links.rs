//! Back-reference link coordinator.
//!
//! The forum schema stores parent-to-child links as denormalized ID arrays
//! on the parent row (a category's `boards`, a board's `threads`, a thread's
//! `posts`, a user's `threads` and `posts`). The store does not enforce
//! these links; this module is the single place that maintains them.
//!
//! Each relationship is declared once as a [`BackRef`] descriptor. The
//! `attach`/`detach` operations run against a caller-provided transaction so
//! a repository can compose "insert child row + update every parent set"
//! into one atomic unit. If any step fails the transaction is dropped
//! uncommitted and nothing is persisted.

use sqlx::{Postgres, Transaction};
use uuid::Uuid;

use crate::shared::error::AppError;

/// A declared parent-to-child back-reference: an ID array column on a
/// parent table that mirrors the existence of child rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackRef {
    /// Table holding the back-reference array
    parent_table: &'static str,

    /// Name of the array column
    column: &'static str,

    /// Human-readable parent name, used in error messages
    parent_kind: &'static str,
}

/// Board IDs stored on the owning category.
pub const CATEGORY_BOARDS: BackRef = BackRef::new("board_categories", "boards", "category");

/// Thread IDs stored on the owning board.
pub const BOARD_THREADS: BackRef = BackRef::new("boards", "threads", "board");

/// Post IDs stored on the owning thread.
pub const THREAD_POSTS: BackRef = BackRef::new("threads", "posts", "thread");

/// Thread IDs stored on the authoring user.
pub const USER_THREADS: BackRef = BackRef::new("users", "threads", "user");

/// Post IDs stored on the authoring user.
pub const USER_POSTS: BackRef = BackRef::new("users", "posts", "user");

impl BackRef {
    const fn new(parent_table: &'static str, column: &'static str, parent_kind: &'static str) -> Self {
        Self {
            parent_table,
            column,
            parent_kind,
        }
    }

    /// The parent kind this link points at (for error messages).
    pub fn parent_kind(&self) -> &'static str {
        self.parent_kind
    }

    fn append_sql(&self) -> String {
        format!(
            "UPDATE {table} SET {col} = array_append({col}, $2) WHERE id = $1",
            table = self.parent_table,
            col = self.column,
        )
    }

    fn remove_sql(&self) -> String {
        format!(
            "UPDATE {table} SET {col} = array_remove({col}, $2) WHERE id = $1",
            table = self.parent_table,
            col = self.column,
        )
    }

    /// Append `child_id` to the parent's back-reference set.
    ///
    /// Fails with `NotFound` when the parent row does not exist, which
    /// aborts the enclosing transaction: a create or reassignment must
    /// never leave a child pointing at a missing parent.
    pub async fn attach(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        parent_id: Uuid,
        child_id: Uuid,
    ) -> Result<(), AppError> {
        let result = sqlx::query(&self.append_sql())
            .bind(parent_id)
            .bind(child_id)
            .execute(&mut **tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Could not find {} {} to link.",
                self.parent_kind, parent_id
            )));
        }

        Ok(())
    }

    /// Remove `child_id` from the parent's back-reference set.
    ///
    /// A missing parent row is not an error here: when the parent is
    /// already gone there is no set left to repair, and deleting the child
    /// must still go through.
    pub async fn detach(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        parent_id: Uuid,
        child_id: Uuid,
    ) -> Result<(), AppError> {
        sqlx::query(&self.remove_sql())
            .bind(parent_id)
            .bind(child_id)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_declared_relationships_cover_all_parent_sets() {
        assert_eq!(CATEGORY_BOARDS.parent_kind(), "category");
        assert_eq!(BOARD_THREADS.parent_kind(), "board");
        assert_eq!(THREAD_POSTS.parent_kind(), "thread");
        assert_eq!(USER_THREADS.parent_kind(), "user");
        assert_eq!(USER_POSTS.parent_kind(), "user");
    }

    #[test]
    fn test_append_sql_targets_declared_column() {
        assert_eq!(
            CATEGORY_BOARDS.append_sql(),
            "UPDATE board_categories SET boards = array_append(boards, $2) WHERE id = $1"
        );
        assert_eq!(
            THREAD_POSTS.append_sql(),
            "UPDATE threads SET posts = array_append(posts, $2) WHERE id = $1"
        );
    }

    #[test]
    fn test_remove_sql_targets_declared_column() {
        assert_eq!(
            BOARD_THREADS.remove_sql(),
            "UPDATE boards SET threads = array_remove(threads, $2) WHERE id = $1"
        );
        assert_eq!(
            USER_POSTS.remove_sql(),
            "UPDATE users SET posts = array_remove(posts, $2) WHERE id = $1"
        );
    }

    #[test]
    fn test_user_links_share_a_table() {
        // Threads and posts are separate sets on the same users table
        assert_ne!(USER_THREADS, USER_POSTS);
        assert_eq!(
            USER_THREADS.append_sql(),
            "UPDATE users SET threads = array_append(threads, $2) WHERE id = $1"
        );
    }
}
