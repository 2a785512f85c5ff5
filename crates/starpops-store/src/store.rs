//! # Append-Only Row Store
//!
//! Connection pool management and the raw row-level storage API.
//!
//! ## Storage Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Append-Only Row Store                             │
//! │                                                                         │
//! │  One SQLite table holds every collection:                              │
//! │                                                                         │
//! │  rows                                                                   │
//! │  ┌──────┬─────────────┬──────────────────────────────────────────┐     │
//! │  │ seq  │ collection  │ data (JSON array of strings)             │     │
//! │  ├──────┼─────────────┼──────────────────────────────────────────┤     │
//! │  │  1   │ Sales       │ ["a1f...","2026-03-14","Diana",...]      │     │
//! │  │  2   │ Expenses    │ ["b72...","2026-03-01","Maize",...]      │     │
//! │  │  3   │ Sales       │ ["c90...","2026-03-15","Caleb",...]      │     │
//! │  └──────┴─────────────┴──────────────────────────────────────────┘     │
//! │                                                                         │
//! │  • append_rows: INSERT only, one transaction per batch                 │
//! │  • read_rows:   ORDER BY seq, so insertion order is read order        │
//! │  • no UPDATE, no DELETE: the books are an immutable journal           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## WAL Mode
//! SQLite WAL (Write-Ahead Logging) mode is enabled for:
//! - Better concurrent read performance
//! - Readers don't block writers
//! - Better crash recovery

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::{Row, SqlitePool};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info};

use crate::error::{StoreError, StoreResult};

/// A single stored row: ordered string fields, meaning assigned by the codec.
pub type RowFields = Vec<String>;

// =============================================================================
// Configuration
// =============================================================================

/// Row store configuration.
///
/// ## Example
/// ```rust,ignore
/// let config = StoreConfig::new("/path/to/starpops.db")
///     .max_connections(5);
/// ```
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Path to the SQLite database file.
    pub database_path: PathBuf,

    /// Maximum number of connections in the pool.
    /// Default: 5 (plenty for a single-shop bookkeeping app)
    pub max_connections: u32,

    /// Minimum number of connections to keep alive.
    /// Default: 1
    pub min_connections: u32,

    /// Connection timeout duration.
    /// Default: 30 seconds
    pub connect_timeout: Duration,

    /// Idle timeout before closing a connection.
    /// Default: 10 minutes
    pub idle_timeout: Duration,
}

impl StoreConfig {
    /// Creates a new store configuration with the given path.
    ///
    /// The file is created on open if it doesn't exist.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        StoreConfig {
            database_path: path.into(),
            max_connections: 5,
            min_connections: 1,
            connect_timeout: Duration::from_secs(30),
            idle_timeout: Duration::from_secs(600),
        }
    }

    /// Sets the maximum number of connections.
    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    /// Sets the minimum number of connections.
    pub fn min_connections(mut self, min: u32) -> Self {
        self.min_connections = min;
        self
    }

    /// Sets the connection timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Creates an in-memory store configuration (for testing).
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let store = RowStore::open(StoreConfig::in_memory()).await?;
    /// // Store is isolated, perfect for tests
    /// ```
    pub fn in_memory() -> Self {
        StoreConfig {
            database_path: PathBuf::from(":memory:"),
            max_connections: 1, // In-memory requires single connection
            min_connections: 1,
            connect_timeout: Duration::from_secs(5),
            idle_timeout: Duration::from_secs(60),
        }
    }
}

// =============================================================================
// Row Store
// =============================================================================

/// Handle to the append-only row store.
///
/// Cheap to clone; all clones share one connection pool.
#[derive(Debug, Clone)]
pub struct RowStore {
    pool: SqlitePool,
}

impl RowStore {
    /// Opens the store, creating the database file and schema if needed.
    ///
    /// ## What This Does
    /// 1. Creates the database file if it doesn't exist
    /// 2. Configures SQLite: WAL journal, NORMAL synchronous
    /// 3. Creates the connection pool
    /// 4. Ensures the `rows` table exists
    pub async fn open(config: StoreConfig) -> StoreResult<Self> {
        info!(
            path = %config.database_path.display(),
            "Opening row store"
        );

        // sqlite://path?mode=rwc creates the file if not exists
        let connect_url = format!("sqlite://{}?mode=rwc", config.database_path.display());

        let connect_options = SqliteConnectOptions::from_str(&connect_url)
            .map_err(|e| StoreError::ConnectionFailed(e.to_string()))?
            // WAL mode: readers don't block the writer
            .journal_mode(SqliteJournalMode::Wal)
            // NORMAL synchronous: safe from corruption, may lose the last
            // transaction on power failure
            .synchronous(SqliteSynchronous::Normal)
            .create_if_missing(true);

        debug!("Connection options configured");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(config.connect_timeout)
            .idle_timeout(Some(config.idle_timeout))
            .connect_with(connect_options)
            .await
            .map_err(|e| StoreError::ConnectionFailed(e.to_string()))?;

        info!(
            max_connections = config.max_connections,
            "Store pool created"
        );

        let store = RowStore { pool };
        store.ensure_schema().await?;
        Ok(store)
    }

    /// Creates the `rows` table if it doesn't exist. Idempotent.
    async fn ensure_schema(&self) -> StoreResult<()> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS rows (
                seq        INTEGER PRIMARY KEY AUTOINCREMENT,
                collection TEXT NOT NULL,
                data       TEXT NOT NULL
            )",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_rows_collection ON rows (collection, seq)")
            .execute(&self.pool)
            .await?;

        debug!("Schema ensured");
        Ok(())
    }

    /// Appends rows to a collection, preserving their order.
    ///
    /// The whole batch is one transaction: either every row lands or
    /// none do. Appending an empty batch is a no-op.
    pub async fn append_rows(&self, collection: &str, rows: &[RowFields]) -> StoreResult<()> {
        if rows.is_empty() {
            return Ok(());
        }

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| StoreError::TransactionFailed(e.to_string()))?;

        for row in rows {
            let data = serde_json::to_string(row)
                .map_err(|e| StoreError::Internal(e.to_string()))?;
            sqlx::query("INSERT INTO rows (collection, data) VALUES (?, ?)")
                .bind(collection)
                .bind(data)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit()
            .await
            .map_err(|e| StoreError::TransactionFailed(e.to_string()))?;

        debug!(collection, count = rows.len(), "Appended rows");
        Ok(())
    }

    /// Reads every row of a collection, in insertion order.
    ///
    /// An empty collection yields `Ok(vec![])`; a failed read yields
    /// an error. The two are never conflated.
    pub async fn read_rows(&self, collection: &str) -> StoreResult<Vec<RowFields>> {
        let records = sqlx::query("SELECT data FROM rows WHERE collection = ? ORDER BY seq")
            .bind(collection)
            .fetch_all(&self.pool)
            .await?;

        let mut rows = Vec::with_capacity(records.len());
        for record in records {
            let data: String = record.get("data");
            let fields: RowFields = serde_json::from_str(&data)
                .map_err(|e| StoreError::malformed(collection, e.to_string()))?;
            rows.push(fields);
        }

        debug!(collection, count = rows.len(), "Read rows");
        Ok(rows)
    }

    /// Counts the rows in a collection.
    pub async fn count_rows(&self, collection: &str) -> StoreResult<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM rows WHERE collection = ?")
                .bind(collection)
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }

    /// Checks that the store is reachable.
    pub async fn health_check(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// Returns a reference to the connection pool.
    ///
    /// For advanced queries not covered by the ledger. Prefer ledger
    /// methods when available.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Closes the connection pool.
    ///
    /// After calling close, all store operations will fail.
    pub async fn close(&self) {
        info!("Closing row store");
        self.pool.close().await;
    }
}

// =============================================================================
// Integration Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn row(fields: &[&str]) -> RowFields {
        fields.iter().map(|f| f.to_string()).collect()
    }

    #[tokio::test]
    async fn test_append_and_read_preserve_order() {
        let store = RowStore::open(StoreConfig::in_memory()).await.unwrap();

        let rows = vec![row(&["first", "1"]), row(&["second", "2"]), row(&["third", "3"])];
        store.append_rows("Sales", &rows).await.unwrap();

        let read = store.read_rows("Sales").await.unwrap();
        assert_eq!(read, rows);
    }

    #[tokio::test]
    async fn test_collections_are_isolated() {
        let store = RowStore::open(StoreConfig::in_memory()).await.unwrap();

        store.append_rows("Sales", &[row(&["a sale"])]).await.unwrap();
        store.append_rows("Expenses", &[row(&["an expense"])]).await.unwrap();

        assert_eq!(store.read_rows("Sales").await.unwrap().len(), 1);
        assert_eq!(store.read_rows("Expenses").await.unwrap().len(), 1);
        assert_eq!(store.read_rows("Withdrawals").await.unwrap().len(), 0);
    }

    #[tokio::test]
    async fn test_empty_collection_reads_empty() {
        let store = RowStore::open(StoreConfig::in_memory()).await.unwrap();
        let rows = store.read_rows("Losses").await.unwrap();
        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn test_append_empty_batch_is_noop() {
        let store = RowStore::open(StoreConfig::in_memory()).await.unwrap();
        store.append_rows("Sales", &[]).await.unwrap();
        assert_eq!(store.count_rows("Sales").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_fields_round_trip_special_characters() {
        let store = RowStore::open(StoreConfig::in_memory()).await.unwrap();

        let tricky = row(&["has,comma", "has \"quotes\"", "two\nlines", ""]);
        store.append_rows("Sales", &[tricky.clone()]).await.unwrap();

        let read = store.read_rows("Sales").await.unwrap();
        assert_eq!(read[0], tricky);
    }

    #[tokio::test]
    async fn test_appends_accumulate() {
        let store = RowStore::open(StoreConfig::in_memory()).await.unwrap();

        store.append_rows("Sales", &[row(&["one"])]).await.unwrap();
        store.append_rows("Sales", &[row(&["two"]), row(&["three"])]).await.unwrap();

        let read = store.read_rows("Sales").await.unwrap();
        assert_eq!(read.len(), 3);
        assert_eq!(read[0], row(&["one"]));
        assert_eq!(read[2], row(&["three"]));
    }

    #[tokio::test]
    async fn test_health_check() {
        let store = RowStore::open(StoreConfig::in_memory()).await.unwrap();
        store.health_check().await.unwrap();
    }
}
