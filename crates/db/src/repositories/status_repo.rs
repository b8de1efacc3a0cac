//! Repository for the `tree_status` table.

use dendro_core::error::CoreError;
use dendro_core::status::resolve_current;
use dendro_core::types::DbId;
use sqlx::SqliteConnection;

use crate::error::RepoError;
use crate::models::status::{CreateStatusRecord, NewStatusRecord, StatusRecord};
use crate::repositories::TreeRepo;
use crate::{begin_write, DbPool};

/// Column list shared across queries to avoid repetition.
pub(crate) const COLUMNS: &str = "id, tree_id, status, notes, date_recorded, is_future_plan";

/// Provides append and history queries for status records.
pub struct StatusRepo;

impl StatusRepo {
    /// Append a status record to an existing tree.
    ///
    /// Fails with [`CoreError::Reference`] if the tree does not exist.
    pub async fn append(
        pool: &DbPool,
        tree_id: DbId,
        input: &CreateStatusRecord,
    ) -> Result<StatusRecord, RepoError> {
        let record = input.validate()?;

        let mut tx = begin_write(pool).await?;
        if !TreeRepo::exists_in(&mut tx, tree_id).await? {
            return Err(CoreError::Reference {
                entity: "Tree",
                id: tree_id,
            }
            .into());
        }
        let inserted = Self::insert(&mut tx, tree_id, &record).await?;
        tx.commit().await?;

        tracing::info!(
            tree_id,
            status_id = inserted.id,
            status = %inserted.status,
            is_future_plan = inserted.is_future_plan,
            "Status record appended"
        );
        Ok(inserted)
    }

    /// Full history for one tree, newest first (date, then id).
    pub async fn list_for_tree(
        pool: &DbPool,
        tree_id: DbId,
    ) -> Result<Vec<StatusRecord>, sqlx::Error> {
        let mut conn = pool.acquire().await?;
        Self::history_in(&mut conn, tree_id).await
    }

    /// Current status of one tree, or `None` if it has only future plans
    /// (or does not exist).
    pub async fn current_for_tree(
        pool: &DbPool,
        tree_id: DbId,
    ) -> Result<Option<StatusRecord>, sqlx::Error> {
        let history = Self::list_for_tree(pool, tree_id).await?;
        Ok(resolve_current(&history).cloned())
    }

    /// Insert a status row on an open connection.
    pub(crate) async fn insert(
        conn: &mut SqliteConnection,
        tree_id: DbId,
        input: &NewStatusRecord,
    ) -> Result<StatusRecord, sqlx::Error> {
        let query = format!(
            "INSERT INTO tree_status (tree_id, status, notes, date_recorded, is_future_plan)
             VALUES (?, ?, ?, COALESCE(?, CURRENT_DATE), ?)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, StatusRecord>(&query)
            .bind(tree_id)
            .bind(&input.status)
            .bind(&input.notes)
            .bind(input.date_recorded)
            .bind(input.is_future_plan)
            .fetch_one(&mut *conn)
            .await
    }

    /// History of one tree on an open connection, newest first.
    pub(crate) async fn history_in(
        conn: &mut SqliteConnection,
        tree_id: DbId,
    ) -> Result<Vec<StatusRecord>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM tree_status
             WHERE tree_id = ?
             ORDER BY date_recorded DESC, id DESC"
        );
        sqlx::query_as::<_, StatusRecord>(&query)
            .bind(tree_id)
            .fetch_all(&mut *conn)
            .await
    }

    /// Every observed (non-future-plan) record, the input to bulk
    /// current-status resolution.
    pub(crate) async fn observed_in(
        conn: &mut SqliteConnection,
    ) -> Result<Vec<StatusRecord>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM tree_status
             WHERE is_future_plan = 0 AND tree_id IS NOT NULL
             ORDER BY tree_id, date_recorded DESC, id DESC"
        );
        sqlx::query_as::<_, StatusRecord>(&query)
            .fetch_all(&mut *conn)
            .await
    }
}
