/// Storage configuration, passed explicitly to [`crate::create_pool`] and
/// [`crate::bootstrap`].
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// SQLite connection URL, e.g. `sqlite://data/database.db`.
    pub database_url: String,
    /// Upper bound on pooled connections.
    pub max_connections: u32,
    /// How long a connection waits on a locked database before failing.
    pub busy_timeout_secs: u64,
    /// Insert the example inventory when the `trees` table is empty.
    pub seed_on_empty: bool,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            database_url: "sqlite://data/database.db".to_string(),
            max_connections: 5,
            busy_timeout_secs: 5,
            seed_on_empty: true,
        }
    }
}

impl DbConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var              | Default                     |
    /// |----------------------|-----------------------------|
    /// | `DATABASE_URL`       | `sqlite://data/database.db` |
    /// | `DB_MAX_CONNECTIONS` | `5`                         |
    /// | `DB_BUSY_TIMEOUT_SECS` | `5`                       |
    /// | `DB_SEED`            | `true`                      |
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let database_url = std::env::var("DATABASE_URL").unwrap_or(defaults.database_url);

        let max_connections: u32 = std::env::var("DB_MAX_CONNECTIONS")
            .map(|v| v.parse().expect("DB_MAX_CONNECTIONS must be a valid u32"))
            .unwrap_or(defaults.max_connections);

        let busy_timeout_secs: u64 = std::env::var("DB_BUSY_TIMEOUT_SECS")
            .map(|v| v.parse().expect("DB_BUSY_TIMEOUT_SECS must be a valid u64"))
            .unwrap_or(defaults.busy_timeout_secs);

        let seed_on_empty: bool = std::env::var("DB_SEED")
            .map(|v| v.parse().expect("DB_SEED must be `true` or `false`"))
            .unwrap_or(defaults.seed_on_empty);

        Self {
            database_url,
            max_connections,
            busy_timeout_secs,
            seed_on_empty,
        }
    }
}
