//! # Purchase Lines
//!
//! Validation and costing for stock purchase batches.
//!
//! ## Batch Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Purchase form rows (raw text)                                         │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  validate_batch() ← THIS MODULE                                        │
//! │        │   every line is checked before anything is written            │
//! │        │   a bad line N → ValidationError "line N: ..."                │
//! │        ▼                                                                │
//! │  PurchaseBatch { transaction_id, lines: Vec<PurchaseLine> }            │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  InventoryLedger::record_purchase() (stockbook-db, one transaction)    │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::TaxRate;
use crate::validation::{
    parse_money, parse_optional_rate, parse_quantity, parse_rate, require, ValidationResult,
};
use crate::MAX_PURCHASE_LINES;

// =============================================================================
// Input
// =============================================================================

/// One purchase form row, exactly as typed.
///
/// The company is chosen from a list, so it arrives already as an id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PurchaseLineInput {
    pub company_id: i64,
    pub brand: String,
    pub product_name: String,
    pub quantity: String,
    pub unit_price: String,
    pub cgst: String,
    pub sgst: String,
    /// Blank means no cess.
    #[serde(default)]
    pub cess: String,
}

impl PurchaseLineInput {
    /// Parses and validates this row.
    pub fn validate(&self) -> ValidationResult<PurchaseLine> {
        Ok(PurchaseLine {
            company_id: self.company_id,
            brand: require("brand", &self.brand)?,
            product_name: require("product name", &self.product_name)?,
            quantity: parse_quantity("quantity", &self.quantity)?,
            unit_price: parse_money("unit price", &self.unit_price)?,
            cgst: parse_rate("cgst", &self.cgst)?,
            sgst: parse_rate("sgst", &self.sgst)?,
            cess: parse_optional_rate("cess", &self.cess)?,
        })
    }
}

// =============================================================================
// Validated Line
// =============================================================================

/// A validated purchase line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseLine {
    pub company_id: i64,
    pub brand: String,
    pub product_name: String,
    pub quantity: i64,
    pub unit_price: Money,
    pub cgst: TaxRate,
    pub sgst: TaxRate,
    pub cess: TaxRate,
}

impl PurchaseLine {
    /// Total tax per unit (CGST + SGST + CESS), each rounded to the paisa.
    pub fn unit_tax(&self) -> Money {
        self.unit_price.calculate_tax(self.cgst)
            + self.unit_price.calculate_tax(self.sgst)
            + self.unit_price.calculate_tax(self.cess)
    }

    /// Cost of one unit including every tax component.
    pub fn landed_unit_cost(&self) -> Money {
        self.unit_price + self.unit_tax()
    }

    /// `(unit + cgst + sgst + cess) × quantity`, as previewed on the form.
    pub fn landed_total(&self) -> Money {
        self.landed_unit_cost().multiply_quantity(self.quantity)
    }

    /// `quantity × unit price`, the amount written to the purchase log.
    pub fn stock_value(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Batch
// =============================================================================

/// A validated batch, ready to commit as one transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseBatch {
    pub transaction_id: String,
    pub lines: Vec<PurchaseLine>,
}

impl PurchaseBatch {
    /// Landed cost of the whole batch.
    pub fn landed_total(&self) -> Money {
        self.lines.iter().map(PurchaseLine::landed_total).sum()
    }
}

/// Validates a whole purchase batch.
///
/// Fails on the first bad line, tagged with its 1-based line number, and on
/// batches longer than [`MAX_PURCHASE_LINES`].
///
/// ```rust
/// use stockbook_core::purchase::{validate_batch, PurchaseLineInput};
///
/// let line = PurchaseLineInput {
///     company_id: 1,
///     brand: "Tata".into(),
///     product_name: "Salt 1kg".into(),
///     quantity: "10".into(),
///     unit_price: "25".into(),
///     cgst: "2.5".into(),
///     sgst: "2.5".into(),
///     cess: "".into(),
/// };
/// let batch = validate_batch("TX-001", &[line]).unwrap();
/// assert_eq!(batch.lines[0].stock_value().to_string(), "250.00");
/// ```
pub fn validate_batch(
    transaction_id: &str,
    inputs: &[PurchaseLineInput],
) -> ValidationResult<PurchaseBatch> {
    let transaction_id = require("transaction id", transaction_id)?;

    if inputs.is_empty() {
        return Err(ValidationError::Empty {
            field: "purchase".to_string(),
        });
    }

    if inputs.len() > MAX_PURCHASE_LINES {
        return Err(ValidationError::TooManyLines {
            field: "purchase".to_string(),
            max: MAX_PURCHASE_LINES,
        });
    }

    let lines = inputs
        .iter()
        .enumerate()
        .map(|(i, input)| input.validate().map_err(|e| e.at_line(i + 1)))
        .collect::<ValidationResult<Vec<_>>>()?;

    Ok(PurchaseBatch {
        transaction_id,
        lines,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn input(name: &str, qty: &str, price: &str) -> PurchaseLineInput {
        PurchaseLineInput {
            company_id: 1,
            brand: "India Gate".to_string(),
            product_name: name.to_string(),
            quantity: qty.to_string(),
            unit_price: price.to_string(),
            cgst: "9".to_string(),
            sgst: "9".to_string(),
            cess: String::new(),
        }
    }

    #[test]
    fn test_validate_line() {
        let line = input("Basmati Rice 5kg", "2", "100").validate().unwrap();
        assert_eq!(line.quantity, 2);
        assert_eq!(line.unit_price.paise(), 10_000);
        assert_eq!(line.cgst.bps(), 900);
        assert!(line.cess.is_zero());
    }

    #[test]
    fn test_landed_total() {
        let line = input("Basmati Rice 5kg", "2", "100").validate().unwrap();
        assert_eq!(line.unit_tax().paise(), 1_800);
        assert_eq!(line.landed_total().to_string(), "236.00");
        assert_eq!(line.stock_value().to_string(), "200.00");
    }

    #[test]
    fn test_landed_total_with_cess() {
        let mut row = input("Cola 2L", "3", "80");
        row.cess = "12".to_string();
        // 80 + 7.20 + 7.20 + 9.60 = 104.00 per unit
        assert_eq!(row.validate().unwrap().landed_total().to_string(), "312.00");
    }

    #[test]
    fn test_batch_reports_failing_line() {
        let mut bad = input("Toor Dal 1kg", "4", "140");
        bad.sgst = String::new();

        let err = validate_batch("TX-9", &[input("Rice", "1", "50"), bad]).unwrap_err();
        assert_eq!(err.to_string(), "line 2: sgst is required");
    }

    #[test]
    fn test_batch_requires_transaction_id_and_lines() {
        assert!(matches!(
            validate_batch("  ", &[input("Rice", "1", "50")]),
            Err(ValidationError::Required { .. })
        ));
        assert!(matches!(
            validate_batch("TX-1", &[]),
            Err(ValidationError::Empty { .. })
        ));
    }

    #[test]
    fn test_batch_landed_total() {
        let batch = validate_batch(
            "TX-2",
            &[input("Rice", "2", "100"), input("Dal", "1", "100")],
        )
        .unwrap();
        assert_eq!(batch.transaction_id, "TX-2");
        assert_eq!(batch.landed_total().to_string(), "354.00");
    }

    #[test]
    fn test_largest_accepted_line() {
        let mut row = input("Gold Bar 1kg", "1000000", "100000000");
        row.cgst = "100".to_string();
        row.sgst = "100".to_string();
        row.cess = "100".to_string();

        let line = row.validate().unwrap();
        assert_eq!(line.landed_unit_cost().paise(), 4 * crate::MAX_UNIT_PRICE_PAISE);
        assert_eq!(line.landed_total().to_string(), "400000000000000.00");
        assert_eq!(line.stock_value().to_string(), "100000000000000.00");

        let rows = vec![row; MAX_PURCHASE_LINES];
        let batch = validate_batch("TX-MAX", &rows).unwrap();
        assert_eq!(batch.landed_total().to_string(), "40000000000000000.00");
    }

    #[test]
    fn test_price_past_limit_rejected() {
        let err = input("Gold Bar 1kg", "1000", "100000000000000")
            .validate()
            .unwrap_err();
        assert_eq!(err.to_string(), "unit price must be between 0 and 100000000");

        let err = input("Gold Bar 1kg", "1", "100000000.01").validate().unwrap_err();
        assert!(matches!(err, ValidationError::OutOfRange { .. }));
    }

    #[test]
    fn test_batch_line_limit() {
        let rows = vec![input("Rice", "1", "50"); MAX_PURCHASE_LINES + 1];
        let err = validate_batch("TX-3", &rows).unwrap_err();
        assert_eq!(err.to_string(), "purchase cannot have more than 100 lines");
    }

    #[test]
    fn test_non_numeric_quantity_rejected() {
        assert!(matches!(
            input("Rice", "ten", "100").validate(),
            Err(ValidationError::InvalidFormat { .. })
        ));
    }
}
