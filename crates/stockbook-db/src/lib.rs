//! # stockbook-db: Database Layer for Stockbook
//!
//! SQLite storage for the stock book, via sqlx.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Stockbook Data Flow                              │
//! │                                                                         │
//! │  Handler (record_purchase, finalize_bill, ...)                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  stockbook-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐   ┌────────────────┐   ┌──────────────┐   │   │
//! │  │   │   Database    │   │  Repositories  │   │  Migrations  │   │   │
//! │  │   │   (pool.rs)   │◄──│  catalog, ...  │   │  (embedded)  │   │   │
//! │  │   └───────────────┘   └────────────────┘   └──────────────┘   │   │
//! │  │           ▲                                                     │   │
//! │  │           │           ┌────────────────┐   ┌──────────────┐   │   │
//! │  │           └───────────│ InventoryLedger│   │BillingService│   │   │
//! │  │                       │  (ledger.rs)   │   │ (billing.rs) │   │   │
//! │  │                       └────────────────┘   └──────────────┘   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │  SQLite file (platform data dir, or $STOCKBOOK_DB_PATH)        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Read/insert repositories
//! - [`ledger`] - Purchase batches and sales (transactional)
//! - [`billing`] - Atomic bill finalization
//!
//! ## Usage
//!
//! ```rust,ignore
//! use stockbook_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("path/to/stockbook.db")).await?;
//!
//! let stock = db.products().list().await?;
//! let receipt = db.ledger().record_purchase(&batch).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod billing;
pub mod error;
pub mod ledger;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use billing::{BillingService, FinalizedBill};
pub use error::{DbError, DbResult};
pub use ledger::{InventoryLedger, PurchaseReceipt, StockDraw};
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::bill::BillRepository;
pub use repository::catalog::{CompanyRepository, CustomerRepository, GstSlabRepository};
pub use repository::product::{ProductRepository, StockSummary};
pub use repository::purchase::PurchaseRepository;
pub use repository::settings::InvoiceSequencer;
