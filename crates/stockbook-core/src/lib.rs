//! # stockbook-core: Pure Business Logic for Stockbook
//!
//! This crate contains every business rule of the stock book as pure
//! functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Stockbook Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              Presentation layer (external)                      │   │
//! │  │    Purchase form ──► Bill form ──► Bills list ──► Stock list   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 apps/stockbook (handlers)                       │   │
//! │  │    record_purchase, add_line_item, finalize_bill, ...          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ stockbook-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────┐ ┌─────────┐ ┌──────────┐ ┌────────┐ ┌─────────┐  │   │
//! │  │   │  types  │ │  money  │ │ purchase │ │  bill  │ │ invoice │  │   │
//! │  │   └─────────┘ └─────────┘ └──────────┘ └────────┘ └─────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO CLOCK • PURE FUNCTIONS             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 stockbook-db (Database Layer)                   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Company, Customer, Product, Purchase, Bill, TaxRate)
//! - [`money`] - Money type with integer paise arithmetic
//! - [`error`] - Domain error types
//! - [`validation`] - Form input parsing and field rules
//! - [`purchase`] - Purchase line validation and landed cost
//! - [`bill`] - Bill composer: GST amounts, running totals, text rendering
//! - [`invoice`] - Invoice numbering rule (April 1st reset)
//!
//! ## Example Usage
//!
//! ```rust
//! use stockbook_core::money::Money;
//! use stockbook_core::types::TaxRate;
//!
//! let price = Money::from_paise(10_000); // ₹100.00
//! let cgst = price.calculate_tax(TaxRate::from_bps(900)); // 9%
//! assert_eq!(cgst.paise(), 900);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod bill;
pub mod error;
pub mod invoice;
pub mod money;
pub mod purchase;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use bill::{BillComposer, BillLine, BillSummary, StockSnapshot};
pub use error::{CoreError, CoreResult, ValidationError};
pub use invoice::{next_invoice_number, InvoiceNumber};
pub use money::Money;
pub use purchase::{PurchaseLine, PurchaseLineInput};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum lines allowed on a single bill.
pub const MAX_BILL_LINES: usize = 100;

/// Maximum lines allowed in a single purchase batch.
pub const MAX_PURCHASE_LINES: usize = 100;

/// Maximum quantity accepted on a single purchase or bill line.
pub const MAX_LINE_QUANTITY: i64 = 1_000_000;

/// Largest unit or selling price accepted, in paise (₹10 crore).
///
/// With every rate at 100% a landed unit cost is at most 4× this, so
/// `4 × MAX_UNIT_PRICE_PAISE × MAX_LINE_QUANTITY × 100 lines` stays below
/// `i64::MAX` and no bill or batch total can overflow.
pub const MAX_UNIT_PRICE_PAISE: i64 = 10_000_000_000;
