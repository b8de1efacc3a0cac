//! SQLite persistence for the tree inventory: pool setup, schema bootstrap,
//! row models, repositories and the composed read views.

pub mod config;
pub mod error;
pub mod models;
pub mod repositories;
pub mod seed;
pub mod views;

use std::str::FromStr;
use std::time::Duration;

use serde::Serialize;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Sqlite, Transaction};

pub use config::DbConfig;
use error::BootstrapError;

pub type DbPool = sqlx::SqlitePool;

/// Create a connection pool from the storage configuration.
///
/// The database file (and its parent directory) is created when missing.
/// Foreign keys are enforced on every connection.
pub async fn create_pool(config: &DbConfig) -> Result<DbPool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(&config.database_url)?
        .create_if_missing(true)
        .foreign_keys(true)
        .busy_timeout(Duration::from_secs(config.busy_timeout_secs));

    if let Some(parent) = options.get_filename().parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .connect_with(options)
        .await
}

/// Open a transaction that takes the write lock up front.
///
/// A deferred transaction that reads before its first write has to upgrade
/// its lock mid-transaction, and SQLite refuses that upgrade with
/// `SQLITE_BUSY` without consulting the busy timeout. Every repository
/// transaction that writes starts here.
pub(crate) async fn begin_write(
    pool: &DbPool,
) -> Result<Transaction<'static, Sqlite>, sqlx::Error> {
    pool.begin_with("BEGIN IMMEDIATE").await
}

/// Verify the database answers a trivial query.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply the embedded schema migrations. Safe to call on every start.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../db/migrations").run(pool).await
}

/// Outcome of [`bootstrap`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BootstrapReport {
    /// Whether the example inventory was inserted on this run.
    pub seeded: bool,
}

/// Ensure the schema exists and, if configured, seed an empty inventory.
///
/// Idempotent: a second call applies no migrations and inserts no rows.
pub async fn bootstrap(pool: &DbPool, config: &DbConfig) -> Result<BootstrapReport, BootstrapError> {
    run_migrations(pool).await?;

    let seeded = if config.seed_on_empty {
        seed::seed_if_empty(pool)
            .await
            .map_err(BootstrapError::Seed)?
    } else {
        false
    };

    Ok(BootstrapReport { seeded })
}

/// Row counts for each relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RowCounts {
    pub trees: i64,
    pub status_records: i64,
    pub comments: i64,
}

/// Count rows in every relation in one statement.
pub async fn row_counts(pool: &DbPool) -> Result<RowCounts, sqlx::Error> {
    let (trees, status_records, comments): (i64, i64, i64) = sqlx::query_as(
        "SELECT
            (SELECT COUNT(*) FROM trees),
            (SELECT COUNT(*) FROM tree_status),
            (SELECT COUNT(*) FROM comments)",
    )
    .fetch_one(pool)
    .await?;

    Ok(RowCounts {
        trees,
        status_records,
        comments,
    })
}
