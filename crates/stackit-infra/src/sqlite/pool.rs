//! Database pool with split reader/writer connections in WAL mode.
//!
//! SQLite allows only one writer at a time. This module provides a `DatabasePool`
//! with a multi-connection reader pool for concurrent reads and a single-connection
//! writer pool for serialized writes. Both use WAL journal mode and enforce foreign keys.

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;

/// Split read/write pool for SQLite with WAL mode.
///
/// - `reader`: Multi-connection pool (up to 8) for concurrent SELECT queries.
/// - `writer`: Single-connection pool for serialized INSERT/UPDATE.
#[derive(Clone)]
pub struct DatabasePool {
    pub reader: SqlitePool,
    pub writer: SqlitePool,
}

impl DatabasePool {
    /// Create a new DatabasePool with split reader/writer connections.
    ///
    /// Runs migrations automatically on the writer pool.
    /// Both pools use WAL journal mode, foreign key enforcement, and 5-second busy timeout.
    ///
    /// In-memory URLs are rejected: every pooled connection would open its own
    /// empty database, and only the writer's would be migrated.
    pub async fn new(database_url: &str) -> Result<Self, sqlx::Error> {
        if is_in_memory(database_url) {
            return Err(sqlx::Error::Configuration(
                format!("in-memory SQLite is not supported ({database_url}); use a file URL").into(),
            ));
        }

        let base_opts = SqliteConnectOptions::from_str(database_url)?
            .journal_mode(SqliteJournalMode::Wal)
            .foreign_keys(true)
            .busy_timeout(Duration::from_secs(5))
            .create_if_missing(true);

        let read_opts = base_opts.clone().read_only(true);
        let write_opts = base_opts;

        let writer = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(write_opts)
            .await?;

        // Run migrations on writer before opening reader pool
        sqlx::migrate!("../../migrations").run(&writer).await?;

        let reader = SqlitePoolOptions::new()
            .max_connections(8)
            .connect_with(read_opts)
            .await?;

        tracing::info!("database pool ready");

        Ok(Self { reader, writer })
    }

    /// Round-trip a trivial query to confirm the store is reachable.
    pub async fn ping(&self, limit: Duration) -> Result<(), sqlx::Error> {
        let ping = sqlx::query_scalar::<_, i64>("SELECT 1").fetch_one(&self.reader);
        match tokio::time::timeout(limit, ping).await {
            Ok(result) => result.map(|_| ()),
            Err(_) => Err(sqlx::Error::PoolTimedOut),
        }
    }

    /// Close both pools, waiting for in-flight connections to be returned.
    pub async fn close(&self) {
        self.reader.close().await;
        self.writer.close().await;
        tracing::info!("database pool closed");
    }
}

fn is_in_memory(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}

/// Returns the default data directory, `~/.stackit`.
pub fn default_data_dir() -> std::path::PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| std::path::PathBuf::from("."))
        .join(".stackit")
}
