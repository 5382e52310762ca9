//! # Domain Types
//!
//! Core domain types used throughout Stockbook.
//!
//! ## Type Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌───────────────┐      ┌──────────────────────┐     ┌──────────────┐  │
//! │  │   Company     │◄─────│      Product         │     │   GstSlab    │  │
//! │  │  id, name     │  FK  │  (name, brand,       │     │  rate_bps    │  │
//! │  │  gst_number   │      │   company) + price   │     └──────────────┘  │
//! │  └───────────────┘      │  quantity (mutable)  │                        │
//! │                         │  cgst/sgst/cess bps  │                        │
//! │  ┌───────────────┐      └──────────────────────┘                        │
//! │  │   Customer    │                                                      │
//! │  └───────────────┘      Append-only audit records:                      │
//! │                         ┌──────────────┐   ┌──────────────────────┐     │
//! │                         │   Purchase   │   │        Bill          │     │
//! │                         │  qty × price │   │  invoice no, total   │     │
//! │                         └──────────────┘   └──────────────────────┘     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Row types derive `sqlx::FromRow` when the `sqlx` feature is enabled so
//! stockbook-db can map query results straight onto them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// 1 basis point = 0.01%, so a 9% CGST component is 900 bps and an 18%
/// GST slab is 1800 bps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxRate(u32);

impl TaxRate {
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Splits a combined GST slab into its CGST and SGST halves.
    ///
    /// The two components are co-equal; when the slab has an odd number of
    /// basis points the extra one goes to SGST so the halves always add
    /// back up to the slab.
    ///
    /// ```rust
    /// use stockbook_core::types::TaxRate;
    ///
    /// let (cgst, sgst) = TaxRate::from_bps(1800).split_gst();
    /// assert_eq!((cgst.bps(), sgst.bps()), (900, 900));
    /// ```
    pub const fn split_gst(&self) -> (TaxRate, TaxRate) {
        let cgst = self.0 / 2;
        (TaxRate(cgst), TaxRate(self.0 - cgst))
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate::zero()
    }
}

/// Renders as a two-decimal percentage without the sign ("9.00").
impl fmt::Display for TaxRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

// =============================================================================
// Company
// =============================================================================

/// A supplier company that products are purchased from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Company {
    pub id: i64,
    pub name: String,
    /// GSTIN, when the supplier is registered.
    pub gst_number: Option<String>,
    pub contact: Option<String>,
}

/// A validated company ready to insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCompany {
    pub name: String,
    pub gst_number: Option<String>,
    pub contact: Option<String>,
}

// =============================================================================
// Customer
// =============================================================================

/// A customer that bills are raised against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Customer {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub gst_number: Option<String>,
    pub contact: String,
}

/// A validated customer ready to insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCustomer {
    pub name: String,
    pub address: String,
    pub gst_number: Option<String>,
    pub contact: String,
}

// =============================================================================
// GST Slab
// =============================================================================

/// A selectable GST rate. Duplicates are allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct GstSlab {
    pub id: i64,
    pub rate_bps: u32,
}

impl GstSlab {
    #[inline]
    pub fn rate(&self) -> TaxRate {
        TaxRate::from_bps(self.rate_bps)
    }
}

// =============================================================================
// Product
// =============================================================================

/// One price point of a product in stock.
///
/// ## Price-Point Versioning
/// Identity is (product_name, brand, company_id). When the same product is
/// bought again at a different unit price a new row is created, so each
/// row's price is the price its stock was actually bought at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Product {
    pub id: i64,
    pub company_id: i64,
    pub brand: String,
    pub product_name: String,
    /// Units on hand at this price point. Never negative.
    pub quantity: i64,
    pub unit_price_paise: i64,
    pub cgst_bps: u32,
    pub sgst_bps: u32,
    pub cess_bps: u32,
    /// When this price point was first bought.
    #[ts(as = "String")]
    pub purchase_date: DateTime<Utc>,
}

impl Product {
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_paise(self.unit_price_paise)
    }

    #[inline]
    pub fn cgst(&self) -> TaxRate {
        TaxRate::from_bps(self.cgst_bps)
    }

    #[inline]
    pub fn sgst(&self) -> TaxRate {
        TaxRate::from_bps(self.sgst_bps)
    }

    #[inline]
    pub fn cess(&self) -> TaxRate {
        TaxRate::from_bps(self.cess_bps)
    }
}

/// A product row joined with its company name, as shown in the stock list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct ProductListing {
    pub id: i64,
    pub company_name: String,
    pub brand: String,
    pub product_name: String,
    pub quantity: i64,
    pub unit_price_paise: i64,
    pub cgst_bps: u32,
    pub sgst_bps: u32,
    pub cess_bps: u32,
    #[ts(as = "String")]
    pub purchase_date: DateTime<Utc>,
}

// =============================================================================
// Purchase
// =============================================================================

/// An append-only purchase log entry.
///
/// Stock purchases use the supplier's transaction id; sale lines written
/// at bill finalization use the invoice label (`INV-2026-0042`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Purchase {
    pub id: i64,
    pub transaction_id: String,
    pub product_name: String,
    pub quantity: i64,
    pub unit_price_paise: i64,
    /// quantity × unit price (purchases) or the line total (bill lines).
    pub total_price_paise: i64,
    #[ts(as = "String")]
    pub purchase_date: DateTime<Utc>,
}

impl Purchase {
    #[inline]
    pub fn total_price(&self) -> Money {
        Money::from_paise(self.total_price_paise)
    }
}

// =============================================================================
// Bill
// =============================================================================

/// A finalized invoice. Immutable once written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Bill {
    pub bill_number: i64,
    pub invoice_number: i64,
    pub invoice_year: i32,
    pub customer_name: String,
    pub total_amount_paise: i64,
    #[ts(as = "String")]
    pub bill_date: DateTime<Utc>,
}

impl Bill {
    #[inline]
    pub fn total_amount(&self) -> Money {
        Money::from_paise(self.total_amount_paise)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tax_rate_from_bps() {
        let rate = TaxRate::from_bps(900);
        assert_eq!(rate.bps(), 900);
        assert!((rate.percentage() - 9.0).abs() < 0.001);
    }

    #[test]
    fn test_tax_rate_display() {
        assert_eq!(TaxRate::from_bps(900).to_string(), "9.00");
        assert_eq!(TaxRate::from_bps(250).to_string(), "2.50");
        assert_eq!(TaxRate::from_bps(5).to_string(), "0.05");
    }

    #[test]
    fn test_split_gst_even_and_odd() {
        let (c, s) = TaxRate::from_bps(500).split_gst();
        assert_eq!((c.bps(), s.bps()), (250, 250));

        let (c, s) = TaxRate::from_bps(25).split_gst();
        assert_eq!((c.bps(), s.bps()), (12, 13));
        assert_eq!(c.bps() + s.bps(), 25);
    }

    #[test]
    fn test_product_accessors() {
        let product = Product {
            id: 1,
            company_id: 7,
            brand: "Aashirvaad".to_string(),
            product_name: "Atta 10kg".to_string(),
            quantity: 12,
            unit_price_paise: 45_000,
            cgst_bps: 250,
            sgst_bps: 250,
            cess_bps: 0,
            purchase_date: Utc::now(),
        };
        assert_eq!(product.unit_price().to_string(), "450.00");
        assert_eq!(product.cgst(), TaxRate::from_bps(250));
        assert!(product.cess().is_zero());
    }
}
