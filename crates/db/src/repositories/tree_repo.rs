//! Repository for the `trees` table.
//!
//! A tree is always written together with its first status record, so no
//! reader can observe a tree without status history.

use dendro_core::error::CoreError;
use dendro_core::types::DbId;
use sqlx::SqliteConnection;

use crate::error::RepoError;
use crate::models::status::NewStatusRecord;
use crate::models::tree::{CreateTree, NewTree, Tree};
use crate::repositories::{CommentRepo, StatusRepo};
use crate::views::{self, CreatedTree, TreeDetail, TreeWithCurrentStatus};
use crate::{begin_write, DbPool};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, latitude, longitude, species, address, diameter, height, created_at";

/// Provides create and read operations for trees.
pub struct TreeRepo;

impl TreeRepo {
    /// Validate the input, then insert the tree and its initial status in one
    /// transaction.
    ///
    /// The initial status is dated by the database (`CURRENT_DATE`). On any
    /// storage failure both inserts are rolled back.
    pub async fn create(pool: &DbPool, input: &CreateTree) -> Result<CreatedTree, RepoError> {
        let new_tree = input.validate()?;

        let mut tx = begin_write(pool).await?;
        let tree = Self::insert(&mut tx, &new_tree).await?;
        let initial = NewStatusRecord::observed_today(new_tree.status, new_tree.notes);
        let status = StatusRepo::insert(&mut tx, tree.id, &initial).await?;
        tx.commit().await?;

        tracing::info!(
            tree_id = tree.id,
            status_id = status.id,
            species = %tree.species,
            status = %status.status,
            "Tree created"
        );
        Ok(views::created_tree(tree, &status))
    }

    /// Find a tree by its ID.
    pub async fn find_by_id(pool: &DbPool, id: DbId) -> Result<Option<Tree>, sqlx::Error> {
        let mut conn = pool.acquire().await?;
        Self::find_in(&mut conn, id).await
    }

    /// List all trees in insertion order.
    pub async fn list(pool: &DbPool) -> Result<Vec<Tree>, sqlx::Error> {
        let mut conn = pool.acquire().await?;
        Self::list_in(&mut conn).await
    }

    /// List every tree merged with its current status.
    ///
    /// Trees and status rows are read inside one transaction so the listing
    /// is a consistent snapshot. Trees without an observed status are still
    /// listed, with the status fields empty.
    pub async fn list_with_current_status(
        pool: &DbPool,
    ) -> Result<Vec<TreeWithCurrentStatus>, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let trees = Self::list_in(&mut tx).await?;
        let observed = StatusRepo::observed_in(&mut tx).await?;
        tx.commit().await?;

        Ok(views::listing(trees, &observed))
    }

    /// Load a tree with its full status history and reviewed comments.
    ///
    /// Fails with [`CoreError::NotFound`] if the tree does not exist.
    pub async fn detail(pool: &DbPool, id: DbId) -> Result<TreeDetail, RepoError> {
        let mut tx = pool.begin().await?;
        let tree = Self::find_in(&mut tx, id)
            .await?
            .ok_or(CoreError::NotFound { entity: "Tree", id })?;
        let history = StatusRepo::history_in(&mut tx, id).await?;
        let comments = CommentRepo::reviewed_in(&mut tx, id).await?;
        tx.commit().await?;

        Ok(views::tree_detail(tree, history, comments))
    }

    /// Insert a tree row on an open connection. Callers must add the initial
    /// status on the same transaction.
    pub(crate) async fn insert(
        conn: &mut SqliteConnection,
        input: &NewTree,
    ) -> Result<Tree, sqlx::Error> {
        let query = format!(
            "INSERT INTO trees (latitude, longitude, species, address, diameter, height)
             VALUES (?, ?, ?, ?, ?, ?)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Tree>(&query)
            .bind(input.latitude)
            .bind(input.longitude)
            .bind(&input.species)
            .bind(&input.address)
            .bind(input.diameter)
            .bind(input.height)
            .fetch_one(&mut *conn)
            .await
    }

    /// Whether a tree with the given id exists, on an open connection.
    pub(crate) async fn exists_in(
        conn: &mut SqliteConnection,
        id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let (found,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM trees WHERE id = ?")
            .bind(id)
            .fetch_one(&mut *conn)
            .await?;
        Ok(found > 0)
    }

    async fn find_in(conn: &mut SqliteConnection, id: DbId) -> Result<Option<Tree>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM trees WHERE id = ?");
        sqlx::query_as::<_, Tree>(&query)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
    }

    async fn list_in(conn: &mut SqliteConnection) -> Result<Vec<Tree>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM trees ORDER BY id");
        sqlx::query_as::<_, Tree>(&query)
            .fetch_all(&mut *conn)
            .await
    }
}
