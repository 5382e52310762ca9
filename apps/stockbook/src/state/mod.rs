//! # State Module
//!
//! Application state handed to commands as explicit parameters.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────┐  ┌──────────────┐  ┌──────────────────┐              │
//! │  │   DbState    │  │  BillState   │  │   ConfigState    │              │
//! │  │              │  │              │  │                  │              │
//! │  │  Database    │  │  Arc<Mutex<  │  │  db_path         │              │
//! │  │  (SQLite     │  │  BillComposer│  │  export_dir      │              │
//! │  │   pool)      │  │  >>          │  │  shop_name       │              │
//! │  └──────────────┘  └──────────────┘  └──────────────────┘              │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • DbState: Database has internal connection pool (thread-safe)        │
//! │  • BillState: Protected by Arc<Mutex<T>>, never held across .await     │
//! │  • ConfigState: Read-only after initialization                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod bill;
mod config;
mod db;

pub use bill::BillState;
pub use config::ConfigState;
pub use db::DbState;
