//! # Database Pool Management
//!
//! Connection pool creation, schema initialization, and starter catalog
//! seeding for the local SQLite store.
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Database::open(config, mirror)                     │
//! │                                                                         │
//! │  1. SqlitePool::connect  (file created if missing, WAL journal)        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  2. initialize()                                                       │
//! │       ├── run embedded migrations     products, sales                  │
//! │       ├── products empty?  ──yes──►   seed STARTER_CATALOG (1 tx)      │
//! │       └── mirror.ensure_schema()      outcome logged, never an error   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Database ready: db.products() / db.sales()                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `initialize` is idempotent: a second call changes nothing locally.

use saletrack_core::STARTER_CATALOG;
use saletrack_mirror::{MirrorOutcome, RemoteMirror};
use sqlx::sqlite::{
    SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
};
use sqlx::SqlitePool;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::error::{DbError, DbResult};
use crate::migrations;
use crate::repository::product::ProductRepository;
use crate::repository::sale::SaleRepository;

const IN_MEMORY_PATH: &str = ":memory:";

// =============================================================================
// Configuration
// =============================================================================

/// Database configuration.
///
/// ## Example
/// ```rust,ignore
/// let config = DbConfig::new("/var/lib/saletrack/saletrack.db")
///     .max_connections(2)
///     .initialize(true);
/// ```
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// Path to the SQLite database file, or `:memory:`.
    pub database_path: PathBuf,

    /// Maximum number of connections in the pool.
    /// Default: 4 (one operator, sequential calls)
    pub max_connections: u32,

    /// Minimum number of connections to keep alive.
    /// Default: 1
    pub min_connections: u32,

    /// How long to wait for a pooled connection.
    /// Default: 30 seconds
    pub connect_timeout: Duration,

    /// Idle timeout before closing a connection. `None` keeps them forever.
    /// Default: 10 minutes
    pub idle_timeout: Option<Duration>,

    /// Whether `Database::open` runs `initialize`.
    /// Default: true
    pub initialize: bool,
}

impl DbConfig {
    /// Creates a configuration for the database file at `path`.
    /// The file is created on first connect.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DbConfig {
            database_path: path.into(),
            max_connections: 4,
            min_connections: 1,
            connect_timeout: Duration::from_secs(30),
            idle_timeout: Some(Duration::from_secs(600)),
            initialize: true,
        }
    }

    /// Creates an in-memory database configuration (for testing).
    ///
    /// A single connection that is never recycled: each SQLite in-memory
    /// connection is its own database.
    pub fn in_memory() -> Self {
        DbConfig {
            database_path: PathBuf::from(IN_MEMORY_PATH),
            max_connections: 1,
            min_connections: 1,
            connect_timeout: Duration::from_secs(5),
            idle_timeout: None,
            initialize: true,
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

    /// Sets whether to run `initialize` on open.
    pub fn initialize(mut self, initialize: bool) -> Self {
        self.initialize = initialize;
        self
    }

    pub fn is_in_memory(&self) -> bool {
        self.database_path == Path::new(IN_MEMORY_PATH)
    }

    fn connect_options(&self) -> DbResult<SqliteConnectOptions> {
        if self.is_in_memory() {
            return SqliteConnectOptions::from_str("sqlite::memory:")
                .map_err(|e| DbError::ConnectionFailed(e.to_string()));
        }

        Ok(SqliteConnectOptions::new()
            .filename(&self.database_path)
            .create_if_missing(true)
            // Readers don't block the single writer
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal))
    }
}

// =============================================================================
// Database
// =============================================================================

/// Main database handle providing repository access.
///
/// Owns the pool and the (possibly disabled) remote mirror. Cloning is cheap;
/// clones share both.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
    mirror: RemoteMirror,
}

impl Database {
    /// Opens the local store without a remote mirror.
    pub async fn new(config: DbConfig) -> DbResult<Self> {
        Self::open(config, RemoteMirror::disabled()).await
    }

    /// Opens the local store and attaches `mirror` to the ledger.
    ///
    /// ## Returns
    /// * `Ok(Database)` - Ready-to-use database handle
    /// * `Err(DbError)` - Connection, migration or seeding failed
    pub async fn open(config: DbConfig, mirror: RemoteMirror) -> DbResult<Self> {
        info!(
            path = %config.database_path.display(),
            mirror_enabled = mirror.is_enabled(),
            "Opening local store"
        );

        let connect_options = config.connect_options()?;

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(config.connect_timeout)
            .idle_timeout(config.idle_timeout)
            // Recycling an in-memory connection would drop its database
            .max_lifetime((!config.is_in_memory()).then(|| Duration::from_secs(30 * 60)))
            .connect_with(connect_options)
            .await
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))?;

        debug!(max_connections = config.max_connections, "Database pool created");

        let db = Database { pool, mirror };

        if config.initialize {
            db.initialize().await?;
        }

        Ok(db)
    }

    /// Prepares both stores for use.
    ///
    /// Local failures are returned. The mirror's outcome is logged and
    /// dropped, so an unreachable mirror never blocks startup.
    pub async fn initialize(&self) -> DbResult<()> {
        self.run_migrations().await?;

        let seeded = self.seed_if_empty().await?;
        if seeded > 0 {
            info!(products = seeded, "Seeded starter catalog");
        }

        match self.mirror.ensure_schema().await {
            MirrorOutcome::Disabled => debug!("Remote mirror disabled"),
            MirrorOutcome::Mirrored => info!("Remote mirror schema ready"),
            MirrorOutcome::Failed(e) => warn!(error = %e, "Remote mirror schema setup failed"),
        }

        Ok(())
    }

    /// Runs database migrations. Idempotent.
    pub async fn run_migrations(&self) -> DbResult<()> {
        migrations::run_migrations(&self.pool).await
    }

    /// Inserts the starter catalog when `products` has no rows.
    ///
    /// The emptiness check and the inserts share one transaction, so the
    /// catalog lands completely or not at all.
    async fn seed_if_empty(&self) -> DbResult<usize> {
        let mut tx = self.pool.begin().await?;

        let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&mut *tx)
            .await?;

        if existing > 0 {
            return Ok(0);
        }

        for entry in STARTER_CATALOG.iter() {
            let barcode = entry.barcode();
            sqlx::query("INSERT OR IGNORE INTO products (barcode, name, unit_price) VALUES (?, ?, ?)")
                .bind(barcode.as_str())
                .bind(entry.name)
                .bind(entry.unit_price().amount().to_string())
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(STARTER_CATALOG.len())
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub fn mirror(&self) -> &RemoteMirror {
        &self.mirror
    }

    /// Returns the catalog repository.
    pub fn products(&self) -> ProductRepository {
        ProductRepository::new(self.pool.clone())
    }

    /// Returns the ledger repository. Its inserts are forwarded to the mirror.
    pub fn sales(&self) -> SaleRepository {
        SaleRepository::new(self.pool.clone(), self.mirror.clone())
    }

    /// Closes the connection pool. Repository calls fail afterwards.
    pub async fn close(&self) {
        info!("Closing database connection pool");
        self.pool.close().await;
    }

    /// Checks if the database can execute queries.
    pub async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use saletrack_core::Money;
    use saletrack_mirror::MirrorConfig;

    #[tokio::test]
    async fn test_in_memory_database() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        assert!(db.health_check().await);
        assert!(!db.mirror().is_enabled());
    }

    #[test]
    fn test_config_builder() {
        let config = DbConfig::new("/tmp/test.db")
            .max_connections(10)
            .min_connections(2)
            .initialize(false);

        assert_eq!(config.max_connections, 10);
        assert_eq!(config.min_connections, 2);
        assert!(!config.initialize);
        assert!(!config.is_in_memory());
        assert!(DbConfig::in_memory().is_in_memory());
    }

    #[tokio::test]
    async fn test_fresh_database_seeds_starter_catalog() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let products = db.products();

        assert_eq!(products.count().await.unwrap(), 3);

        let apple = products.find_by_barcode("012345678905").await.unwrap().unwrap();
        assert_eq!(apple.name, "Apple");
        assert_eq!(apple.unit_price, Money::new(dec!(0.50)));

        let banana = products.find_by_barcode("036000291452").await.unwrap().unwrap();
        assert_eq!(banana.unit_price, Money::new(dec!(0.30)));

        let milk = products.find_by_barcode("049000042044").await.unwrap().unwrap();
        assert_eq!(milk.unit_price, Money::new(dec!(1.20)));
    }

    #[tokio::test]
    async fn test_initialize_is_idempotent() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        db.initialize().await.unwrap();
        db.initialize().await.unwrap();

        assert_eq!(db.products().count().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_no_seed_when_catalog_not_empty() {
        let db = Database::new(DbConfig::in_memory().initialize(false))
            .await
            .unwrap();
        db.run_migrations().await.unwrap();

        db.products()
            .insert_if_absent(None, "Candle", Money::from_cents(300))
            .await
            .unwrap();

        db.initialize().await.unwrap();
        assert_eq!(db.products().count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_unreachable_mirror_does_not_block_startup() {
        let mirror = RemoteMirror::new(&MirrorConfig {
            connection: Some("Server=127.0.0.1;Port=1;Database=pos;User Id=clerk".into()),
            timeout_secs: 1,
        });

        let db = Database::open(DbConfig::in_memory(), mirror).await.unwrap();
        assert!(db.mirror().is_enabled());
        assert_eq!(db.products().count().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_file_database_persists_between_opens() {
        let dir = std::env::temp_dir().join(format!("saletrack-db-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("persist.db");
        let _ = std::fs::remove_file(&path);

        {
            let db = Database::new(DbConfig::new(&path)).await.unwrap();
            db.products()
                .insert_if_absent(None, "Candle", Money::from_cents(300))
                .await
                .unwrap();
            db.close().await;
        }

        let db = Database::new(DbConfig::new(&path)).await.unwrap();
        assert_eq!(db.products().count().await.unwrap(), 4);
        db.close().await;

        let _ = std::fs::remove_dir_all(&dir);
    }
}
