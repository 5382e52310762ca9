//! # Database Pool Management
//!
//! Opens the SQLite store and hands out repositories over one shared pool.
//!
//! ## Startup
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  DbConfig::new(path)          DbConfig::in_memory()                     │
//! │        │                              │                                 │
//! │        └──────────────┬───────────────┘                                 │
//! │                       ▼                                                 │
//! │  Database::new(config)                                                  │
//! │    1. sqlite://<path>?mode=rwc  (or sqlite::memory:)                    │
//! │    2. journal_mode=WAL, synchronous=NORMAL, foreign_keys=ON             │
//! │    3. SqlitePool (max_connections)                                      │
//! │    4. embedded migrations                                               │
//! │                       │                                                 │
//! │                       ▼                                                 │
//! │  db.companies() … db.ledger() … db.billing()                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! WAL lets the list views read while a purchase batch or a bill commits.
//! An in-memory store is pinned to a single connection that never idles
//! out, since closing it drops the data.

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info};

use crate::billing::BillingService;
use crate::error::{DbError, DbResult};
use crate::ledger::InventoryLedger;
use crate::migrations;
use crate::repository::bill::BillRepository;
use crate::repository::catalog::{CompanyRepository, CustomerRepository, GstSlabRepository};
use crate::repository::product::ProductRepository;
use crate::repository::purchase::PurchaseRepository;
use crate::repository::settings::InvoiceSequencer;

const MEMORY_PATH: &str = ":memory:";

// =============================================================================
// Configuration
// =============================================================================

/// Where the store lives and how the pool is sized.
///
/// ```rust,ignore
/// let config = DbConfig::new(data_dir.join("stockbook.db")).max_connections(3);
/// ```
#[derive(Debug, Clone)]
pub struct DbConfig {
    pub database_path: PathBuf,
    /// Default 5; always 1 for the in-memory store.
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout: Duration,
    /// File stores only.
    pub idle_timeout: Duration,
    pub run_migrations: bool,
}

impl DbConfig {
    /// A file-backed store. The file is created on first connect.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DbConfig {
            database_path: path.into(),
            max_connections: 5,
            min_connections: 1,
            acquire_timeout: Duration::from_secs(30),
            idle_timeout: Duration::from_secs(600),
            run_migrations: true,
        }
    }

    /// A private store that disappears with the pool.
    pub fn in_memory() -> Self {
        DbConfig {
            max_connections: 1,
            acquire_timeout: Duration::from_secs(5),
            ..DbConfig::new(MEMORY_PATH)
        }
    }

    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    pub fn min_connections(mut self, min: u32) -> Self {
        self.min_connections = min;
        self
    }

    pub fn run_migrations(mut self, run: bool) -> Self {
        self.run_migrations = run;
        self
    }

    pub fn is_in_memory(&self) -> bool {
        self.database_path.as_os_str() == MEMORY_PATH
    }

    fn connect_url(&self) -> String {
        if self.is_in_memory() {
            "sqlite::memory:".to_string()
        } else {
            format!("sqlite://{}?mode=rwc", self.database_path.display())
        }
    }
}

// =============================================================================
// Database
// =============================================================================

/// Handle to the store. Clones share the pool.
///
/// ## Accessors
/// ```text
/// db.companies() / customers() / gst_slabs()   catalog reads and inserts
/// db.products() / purchases() / bills()        list views
/// db.invoices()                                per-year invoice counter
/// db.ledger()                                  purchase batches, sales
/// db.billing()                                 atomic bill finalization
/// ```
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Connects and, unless disabled, applies pending migrations.
    pub async fn new(config: DbConfig) -> DbResult<Self> {
        info!(path = %config.database_path.display(), "Opening stock book");

        let connect_options = SqliteConnectOptions::from_str(&config.connect_url())
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))?
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            // Off by default in SQLite
            .foreign_keys(true)
            .create_if_missing(true);

        let pool_options = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(config.acquire_timeout);

        let pool_options = if config.is_in_memory() {
            pool_options.idle_timeout(None).max_lifetime(None)
        } else {
            pool_options.idle_timeout(Some(config.idle_timeout))
        };

        let pool = pool_options
            .connect_with(connect_options)
            .await
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))?;

        debug!(max_connections = config.max_connections, "Pool ready");

        let db = Database { pool };
        if config.run_migrations {
            db.run_migrations().await?;
        }
        Ok(db)
    }

    pub async fn run_migrations(&self) -> DbResult<()> {
        migrations::run_migrations(&self.pool).await
    }

    /// The raw pool, for diagnostics. Repositories cover every query the
    /// app makes.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub fn companies(&self) -> CompanyRepository {
        CompanyRepository::new(self.pool.clone())
    }

    pub fn customers(&self) -> CustomerRepository {
        CustomerRepository::new(self.pool.clone())
    }

    pub fn gst_slabs(&self) -> GstSlabRepository {
        GstSlabRepository::new(self.pool.clone())
    }

    pub fn products(&self) -> ProductRepository {
        ProductRepository::new(self.pool.clone())
    }

    pub fn purchases(&self) -> PurchaseRepository {
        PurchaseRepository::new(self.pool.clone())
    }

    pub fn bills(&self) -> BillRepository {
        BillRepository::new(self.pool.clone())
    }

    pub fn invoices(&self) -> InvoiceSequencer {
        InvoiceSequencer::new(self.pool.clone())
    }

    /// Purchase batches and sales, each in one transaction.
    pub fn ledger(&self) -> InventoryLedger {
        InventoryLedger::new(self.pool.clone())
    }

    pub fn billing(&self) -> BillingService {
        BillingService::new(self.pool.clone())
    }

    /// Closes every connection. Later queries fail with `ConnectionFailed`.
    pub async fn close(&self) {
        info!("Closing stock book");
        self.pool.close().await;
    }

    pub async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
