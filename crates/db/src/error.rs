use dendro_core::error::CoreError;

/// Failure of a repository operation that validates its input or checks a
/// reference before writing.
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    /// Validation, reference or not-found failure. Nothing was written.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The storage engine failed. Any open transaction was rolled back.
    #[error("Storage error: {0}")]
    Storage(#[from] sqlx::Error),
}

/// Startup failure while preparing the schema or seed data.
#[derive(Debug, thiserror::Error)]
pub enum BootstrapError {
    #[error("Failed to run database migrations: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error("Failed to seed database: {0}")]
    Seed(#[source] sqlx::Error),
}
