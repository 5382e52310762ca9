//! # Bill Composer
//!
//! The in-progress sales bill: line items, GST amounts and running totals.
//!
//! ## Line Arithmetic
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  selling price 100.00, qty 2, CGST 9%, SGST 9%                          │
//! │                                                                         │
//! │    cgst_amount = 100.00 × 9%  = 9.00   (per unit, rounded to paisa)    │
//! │    sgst_amount = 100.00 × 9%  = 9.00                                   │
//! │    line_total  = (100.00 + 9.00 + 9.00) × 2 = 236.00                    │
//! │                                                                         │
//! │    running CGST += 9.00 × 2                                             │
//! │    running SGST += 9.00 × 2                                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The composer never touches the store. The caller reads a
//! [`StockSnapshot`] for the product at call time and hands it in;
//! stockbook-db persists the finished bill.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::invoice::InvoiceNumber;
use crate::money::Money;
use crate::types::TaxRate;
use crate::validation::{validate_price, validate_quantity};
use crate::MAX_BILL_LINES;

// =============================================================================
// Stock Snapshot
// =============================================================================

/// What the store knows about a product name at the moment a line is added.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockSnapshot {
    pub product_name: String,
    /// Sum of quantity over every price point of this name.
    pub on_hand: i64,
    /// Rates of the newest price point.
    pub cgst: TaxRate,
    pub sgst: TaxRate,
}

// =============================================================================
// Bill Line
// =============================================================================

/// One line on the bill. GST amounts are per unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct BillLine {
    pub product_name: String,
    pub quantity: i64,
    pub selling_price: Money,
    pub cgst_rate: TaxRate,
    pub sgst_rate: TaxRate,
    pub cgst_amount: Money,
    pub sgst_amount: Money,
    pub line_total: Money,
}

impl BillLine {
    /// Prices a line from the selling price and the product's rates.
    pub fn new(product_name: &str, quantity: i64, selling_price: Money, cgst: TaxRate, sgst: TaxRate) -> Self {
        let cgst_amount = selling_price.calculate_tax(cgst);
        let sgst_amount = selling_price.calculate_tax(sgst);
        let line_total = (selling_price + cgst_amount + sgst_amount).multiply_quantity(quantity);

        BillLine {
            product_name: product_name.to_string(),
            quantity,
            selling_price,
            cgst_rate: cgst,
            sgst_rate: sgst,
            cgst_amount,
            sgst_amount,
            line_total,
        }
    }

    #[inline]
    pub fn cgst_total(&self) -> Money {
        self.cgst_amount.multiply_quantity(self.quantity)
    }

    #[inline]
    pub fn sgst_total(&self) -> Money {
        self.sgst_amount.multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Bill Composer
// =============================================================================

/// The bill being composed.
///
/// ## Invariants
/// - `total_cgst` / `total_sgst` always equal the sum over `lines`
/// - For each product name, the quantity on the bill never exceeded the
///   stock on hand at the time each line was added
/// - At most [`MAX_BILL_LINES`] lines
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillComposer {
    lines: Vec<BillLine>,
    total_cgst: Money,
    total_sgst: Money,
}

impl BillComposer {
    pub fn new() -> Self {
        BillComposer::default()
    }

    /// Adds a line for `stock.product_name`.
    ///
    /// ## Errors
    /// - `Validation` if quantity is not positive, or the selling price is
    ///   outside `0..=MAX_UNIT_PRICE_PAISE`
    /// - `BillTooLarge` past [`MAX_BILL_LINES`]
    /// - `InsufficientStock` if this quantity plus what is already on the
    ///   bill for the same name exceeds `stock.on_hand`
    pub fn add_line(
        &mut self,
        stock: &StockSnapshot,
        quantity: i64,
        selling_price: Money,
    ) -> CoreResult<&BillLine> {
        validate_quantity("quantity", quantity)?;
        validate_price("selling price", selling_price)?;

        if self.lines.len() >= MAX_BILL_LINES {
            return Err(CoreError::BillTooLarge {
                max: MAX_BILL_LINES,
            });
        }

        let already = self.quantity_on_bill(&stock.product_name);
        let available = (stock.on_hand - already).max(0);
        if quantity > available {
            return Err(CoreError::InsufficientStock {
                product: stock.product_name.clone(),
                available,
                requested: quantity,
            });
        }

        let line = BillLine::new(
            &stock.product_name,
            quantity,
            selling_price,
            stock.cgst,
            stock.sgst,
        );
        self.total_cgst += line.cgst_total();
        self.total_sgst += line.sgst_total();
        self.lines.push(line);

        Ok(&self.lines[self.lines.len() - 1])
    }

    /// Removes the line at `index` (0-based) and recomputes the totals.
    pub fn remove_line(&mut self, index: usize) -> CoreResult<BillLine> {
        if index >= self.lines.len() {
            return Err(CoreError::not_found("Bill line", (index + 1).to_string()));
        }

        let removed = self.lines.remove(index);
        self.recompute();
        Ok(removed)
    }

    /// Discards every line.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.recompute();
    }

    fn recompute(&mut self) {
        self.total_cgst = self.lines.iter().map(BillLine::cgst_total).sum();
        self.total_sgst = self.lines.iter().map(BillLine::sgst_total).sum();
    }

    pub fn lines(&self) -> &[BillLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Quantity of `product_name` already on the bill.
    pub fn quantity_on_bill(&self, product_name: &str) -> i64 {
        self.lines
            .iter()
            .filter(|l| l.product_name == product_name)
            .map(|l| l.quantity)
            .sum()
    }

    pub fn total_cgst(&self) -> Money {
        self.total_cgst
    }

    pub fn total_sgst(&self) -> Money {
        self.total_sgst
    }

    /// Bill total: sum of line totals.
    pub fn total(&self) -> Money {
        self.lines.iter().map(|l| l.line_total).sum()
    }

    pub fn summary(&self) -> BillSummary {
        BillSummary {
            lines: self.lines.clone(),
            line_count: self.lines.len(),
            total_quantity: self.lines.iter().map(|l| l.quantity).sum(),
            total_cgst: self.total_cgst,
            total_sgst: self.total_sgst,
            total: self.total(),
        }
    }
}

/// Bill contents and totals for responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct BillSummary {
    pub lines: Vec<BillLine>,
    pub line_count: usize,
    pub total_quantity: i64,
    pub total_cgst: Money,
    pub total_sgst: Money,
    pub total: Money,
}

// =============================================================================
// Text Rendering
// =============================================================================

const RULE: &str = "--------------------------------------------------------------------------------";

/// A finalized bill, ready to render as the plain-text export.
#[derive(Debug, Clone)]
pub struct BillDocument<'a> {
    pub shop_name: Option<&'a str>,
    /// Store key of the bill row.
    pub bill_number: i64,
    pub invoice: InvoiceNumber,
    pub customer_name: &'a str,
    pub bill_date: NaiveDate,
    pub lines: &'a [BillLine],
}

impl BillDocument<'_> {
    /// Renders the itemized bill.
    ///
    /// ```text
    /// Bill Number: 57
    /// Invoice: INV-2026-0042
    /// Date: 2026-10-18
    /// Customer: Ravi Stores
    ///
    /// Items:
    /// ------------------------------------------------------------------
    /// Product                   Qty        Price           CGST       SGST       Total
    /// Basmati Rice 5kg          2          100.00          9.00       9.00       236.00
    /// ------------------------------------------------------------------
    /// Total CGST: 18.00
    /// Total SGST: 18.00
    /// Total Amount: 236.00
    /// ```
    pub fn render(&self) -> String {
        let mut out = String::new();

        // Writing to a String cannot fail
        if let Some(shop) = self.shop_name.filter(|s| !s.trim().is_empty()) {
            let _ = writeln!(out, "{}", shop);
        }
        let _ = writeln!(out, "Bill Number: {}", self.bill_number);
        let _ = writeln!(out, "Invoice: {}", self.invoice);
        let _ = writeln!(out, "Date: {}", self.bill_date.format("%Y-%m-%d"));
        let _ = writeln!(out, "Customer: {}", self.customer_name);
        let _ = writeln!(out);
        let _ = writeln!(out, "Items:");
        let _ = writeln!(out, "{}", RULE);
        let _ = writeln!(
            out,
            "{:<25} {:<10} {:<15} {:<10} {:<10} {}",
            "Product", "Qty", "Price", "CGST", "SGST", "Total"
        );
        for line in self.lines {
            let _ = writeln!(
                out,
                "{:<25} {:<10} {:<15} {:<10} {:<10} {}",
                line.product_name,
                line.quantity,
                line.selling_price.to_string(),
                line.cgst_amount.to_string(),
                line.sgst_amount.to_string(),
                line.line_total,
            );
        }
        let _ = writeln!(out, "{}", RULE);

        let cgst: Money = self.lines.iter().map(BillLine::cgst_total).sum();
        let sgst: Money = self.lines.iter().map(BillLine::sgst_total).sum();
        let total: Money = self.lines.iter().map(|l| l.line_total).sum();
        let _ = writeln!(out, "Total CGST: {}", cgst);
        let _ = writeln!(out, "Total SGST: {}", sgst);
        let _ = writeln!(out, "Total Amount: {}", total);

        out
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use crate::{MAX_LINE_QUANTITY, MAX_UNIT_PRICE_PAISE};

    fn stock(name: &str, on_hand: i64) -> StockSnapshot {
        StockSnapshot {
            product_name: name.to_string(),
            on_hand,
            cgst: TaxRate::from_bps(900),
            sgst: TaxRate::from_bps(900),
        }
    }

    #[test]
    fn test_line_arithmetic() {
        let mut bill = BillComposer::new();
        let line = bill
            .add_line(&stock("Rice 5kg", 10), 2, Money::from_paise(10_000))
            .unwrap();

        assert_eq!(line.cgst_amount.to_string(), "9.00");
        assert_eq!(line.sgst_amount.to_string(), "9.00");
        assert_eq!(line.line_total.to_string(), "236.00");
        assert_eq!(bill.total_cgst().to_string(), "18.00");
        assert_eq!(bill.total_sgst().to_string(), "18.00");
    }

    #[test]
    fn test_bill_total_across_lines() {
        let mut bill = BillComposer::new();
        bill.add_line(&stock("Rice 5kg", 10), 2, Money::from_paise(10_000))
            .unwrap();
        bill.add_line(&stock("Toor Dal 1kg", 10), 1, Money::from_paise(10_000))
            .unwrap();

        assert_eq!(bill.total().to_string(), "354.00");
        let summary = bill.summary();
        assert_eq!(summary.line_count, 2);
        assert_eq!(summary.total_quantity, 3);
        assert_eq!(summary.total_cgst.to_string(), "27.00");
    }

    #[test]
    fn test_rejects_more_than_stock() {
        let mut bill = BillComposer::new();
        let err = bill
            .add_line(&stock("Ghee 1L", 5), 6, Money::from_paise(50_000))
            .unwrap_err();

        assert!(matches!(
            err,
            CoreError::InsufficientStock {
                available: 5,
                requested: 6,
                ..
            }
        ));
        assert!(bill.is_empty());
    }

    #[test]
    fn test_counts_quantity_already_on_bill() {
        let mut bill = BillComposer::new();
        let ghee = stock("Ghee 1L", 5);
        bill.add_line(&ghee, 3, Money::from_paise(50_000)).unwrap();

        let err = bill.add_line(&ghee, 3, Money::from_paise(50_000)).unwrap_err();
        assert!(matches!(
            err,
            CoreError::InsufficientStock {
                available: 2,
                requested: 3,
                ..
            }
        ));
        assert!(bill.add_line(&ghee, 2, Money::from_paise(50_000)).is_ok());
        assert_eq!(bill.quantity_on_bill("Ghee 1L"), 5);
    }

    #[test]
    fn test_rejects_zero_quantity() {
        let mut bill = BillComposer::new();
        assert!(matches!(
            bill.add_line(&stock("Rice", 5), 0, Money::from_paise(100)),
            Err(CoreError::Validation(_))
        ));
    }

    #[test]
    fn test_bill_line_limit() {
        let mut bill = BillComposer::new();
        let rice = stock("Rice", i64::MAX);
        for _ in 0..MAX_BILL_LINES {
            bill.add_line(&rice, 1, Money::from_paise(100)).unwrap();
        }
        assert!(matches!(
            bill.add_line(&rice, 1, Money::from_paise(100)),
            Err(CoreError::BillTooLarge { .. })
        ));
    }

    #[test]
    fn test_largest_accepted_bill() {
        let mut bill = BillComposer::new();
        let gold = StockSnapshot {
            product_name: "Gold Bar 1kg".to_string(),
            on_hand: MAX_LINE_QUANTITY * MAX_BILL_LINES as i64,
            cgst: TaxRate::from_bps(10_000),
            sgst: TaxRate::from_bps(10_000),
        };
        let price = Money::from_paise(MAX_UNIT_PRICE_PAISE);

        for _ in 0..MAX_BILL_LINES {
            bill.add_line(&gold, MAX_LINE_QUANTITY, price).unwrap();
        }

        // (1e10 + 1e10 + 1e10) paise × 1e6 units × 100 lines
        assert_eq!(bill.total().paise(), 3_000_000_000_000_000_000);
        assert_eq!(bill.total_cgst().paise(), 1_000_000_000_000_000_000);
        assert_eq!(bill.summary().total_sgst, bill.total_cgst());
    }

    #[test]
    fn test_rejects_price_past_limit() {
        let mut bill = BillComposer::new();
        let gold = stock("Gold Bar 1kg", 1_000_000);

        let err = bill
            .add_line(&gold, 1000, Money::from_paise(10_000_000_000_000_000))
            .unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::OutOfRange { .. })
        ));
        assert!(matches!(
            bill.add_line(&gold, 1, Money::from_paise(MAX_UNIT_PRICE_PAISE + 1)),
            Err(CoreError::Validation(_))
        ));
        assert!(bill.is_empty());
    }

    #[test]
    fn test_remove_line_recomputes_totals() {
        let mut bill = BillComposer::new();
        bill.add_line(&stock("Rice", 10), 2, Money::from_paise(10_000))
            .unwrap();
        bill.add_line(&stock("Dal", 10), 1, Money::from_paise(10_000))
            .unwrap();

        let removed = bill.remove_line(0).unwrap();
        assert_eq!(removed.product_name, "Rice");
        assert_eq!(bill.total().to_string(), "118.00");
        assert_eq!(bill.total_cgst().to_string(), "9.00");

        assert!(bill.remove_line(5).is_err());
    }

    #[test]
    fn test_clear() {
        let mut bill = BillComposer::new();
        bill.add_line(&stock("Rice", 10), 2, Money::from_paise(10_000))
            .unwrap();
        bill.clear();

        assert!(bill.is_empty());
        assert!(bill.total().is_zero());
        assert!(bill.total_cgst().is_zero());
    }

    #[test]
    fn test_render() {
        let mut bill = BillComposer::new();
        bill.add_line(&stock("Rice 5kg", 10), 2, Money::from_paise(10_000))
            .unwrap();
        bill.add_line(&stock("Toor Dal 1kg", 10), 1, Money::from_paise(10_000))
            .unwrap();

        let doc = BillDocument {
            shop_name: Some("Lakshmi Traders"),
            bill_number: 57,
            invoice: InvoiceNumber {
                year: 2026,
                number: 42,
            },
            customer_name: "Ravi Stores",
            bill_date: NaiveDate::from_ymd_opt(2026, 10, 18).unwrap(),
            lines: bill.lines(),
        };
        let text = doc.render();

        assert!(text.starts_with("Lakshmi Traders\nBill Number: 57\n"));
        assert!(text.contains("Invoice: INV-2026-0042\n"));
        assert!(text.contains("Customer: Ravi Stores\n"));
        assert!(text.contains("Rice 5kg"));
        assert!(text.contains("236.00"));
        assert!(text.ends_with("Total Amount: 354.00\n"));
    }
}
