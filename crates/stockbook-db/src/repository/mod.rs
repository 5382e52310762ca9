//! # Repository Module
//!
//! Database repository implementations for Stockbook.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  Handler                                                                │
//! │       │                                                                 │
//! │       │  db.bills().search_by_customer("ravi")                         │
//! │       ▼                                                                 │
//! │  BillRepository                                                         │
//! │  ├── list(&self)                                                        │
//! │  ├── search_by_customer(&self, query)                                   │
//! │  └── get(&self, bill_number)                                            │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Multi-table writes (purchase batches, bills) are not repositories; they
//! live in [`crate::ledger`] and [`crate::billing`].
//!
//! ## Available Repositories
//!
//! - [`catalog`] - Companies, customers, GST slabs
//! - [`product`] - Stock list, stock on hand
//! - [`purchase`] - Purchase log
//! - [`bill`] - Finalized bills and customer search
//! - [`settings`] - Per-year invoice counter

pub mod bill;
pub mod catalog;
pub mod product;
pub mod purchase;
pub mod settings;
