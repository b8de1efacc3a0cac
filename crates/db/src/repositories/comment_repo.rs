//! Repository for the `comments` table.
//!
//! Comments are append-only and always inserted unreviewed. Read paths only
//! ever return reviewed rows; flipping `is_reviewed` belongs to moderation
//! tooling outside this crate.

use dendro_core::error::CoreError;
use dendro_core::types::DbId;
use sqlx::SqliteConnection;

use crate::error::RepoError;
use crate::models::comment::{Comment, CreateComment, NewComment};
use crate::repositories::TreeRepo;
use crate::{begin_write, DbPool};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, tree_id, user_name, text, contact_email, created_at, is_reviewed";

/// Provides append and visibility-filtered reads for comments.
pub struct CommentRepo;

impl CommentRepo {
    /// Validate and store a new comment, returning its id.
    ///
    /// The tree reference is checked inside the same transaction as the
    /// insert and reported as [`CoreError::Reference`] when missing.
    pub async fn create(pool: &DbPool, input: &CreateComment) -> Result<DbId, RepoError> {
        let comment = input.validate()?;

        let mut tx = begin_write(pool).await?;
        if !TreeRepo::exists_in(&mut tx, comment.tree_id).await? {
            return Err(CoreError::Reference {
                entity: "Tree",
                id: comment.tree_id,
            }
            .into());
        }
        let id = Self::insert(&mut tx, &comment).await?;
        tx.commit().await?;

        tracing::info!(
            tree_id = comment.tree_id,
            comment_id = id,
            "Comment submitted for review"
        );
        Ok(id)
    }

    /// Reviewed comments for a tree, newest first. Unknown trees yield an
    /// empty list.
    pub async fn list_reviewed_for_tree(
        pool: &DbPool,
        tree_id: DbId,
    ) -> Result<Vec<Comment>, sqlx::Error> {
        let mut conn = pool.acquire().await?;
        Self::reviewed_in(&mut conn, tree_id).await
    }

    async fn insert(conn: &mut SqliteConnection, input: &NewComment) -> Result<DbId, sqlx::Error> {
        let (id,): (DbId,) = sqlx::query_as(
            "INSERT INTO comments (tree_id, user_name, text, contact_email, is_reviewed)
             VALUES (?, ?, ?, ?, 0)
             RETURNING id",
        )
        .bind(input.tree_id)
        .bind(&input.user_name)
        .bind(&input.text)
        .bind(&input.contact_email)
        .fetch_one(&mut *conn)
        .await?;
        Ok(id)
    }

    /// Reviewed comments for a tree on an open connection, newest first.
    pub(crate) async fn reviewed_in(
        conn: &mut SqliteConnection,
        tree_id: DbId,
    ) -> Result<Vec<Comment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM comments
             WHERE tree_id = ? AND is_reviewed = 1
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Comment>(&query)
            .bind(tree_id)
            .fetch_all(&mut *conn)
            .await
    }
}
