//! # Commands Module
//!
//! Every action the presentation layer can invoke.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs       ◄─── You are here (exports)
//! ├── catalog.rs   ◄─── Companies, customers, GST slabs
//! ├── purchase.rs  ◄─── Purchase batches, landed-cost preview
//! ├── bill.rs      ◄─── Bill composition and finalization
//! └── stock.rs     ◄─── Stock, purchase log and bill listings
//! ```
//!
//! ## State Injection
//! Commands are plain async functions. Each takes only the state it needs:
//! ```rust,ignore
//! // Only needs database
//! async fn list_products(db: &DbState)
//!
//! // Only needs the bill
//! fn get_bill(bill: &BillState)
//!
//! // Needs all three
//! async fn finalize_bill(db: &DbState, bill: &BillState, config: &ConfigState, ...)
//! ```
//!
//! Request payloads are camelCase DTOs; every command returns
//! `Result<T, ApiError>`.

pub mod bill;
pub mod catalog;
pub mod purchase;
pub mod stock;
