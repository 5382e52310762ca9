//! # Bill Commands
//!
//! ## Bill Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Bill Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐     ┌──────────┐       │
//! │  │  Empty   │────►│ Lines    │────►│ Customer │────►│ Finalized│       │
//! │  │  Bill    │     │ Added    │     │ Entered  │     │ + Export │       │
//! │  └──────────┘     └──────────┘     └──────────┘     └──────────┘       │
//! │       ▲                │                                 │              │
//! │       │           add_line_item                          │              │
//! │       │           remove_line_item                       │              │
//! │       │                │                                 │              │
//! │       └──── clear_bill ┘◄─────────── reset on success ───┘              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A failed finalize leaves the bill as it was, so the user can fix the
//! customer name or the quantities and try again.

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::ApiError;
use crate::export::write_bill_export;
use crate::state::{BillState, ConfigState, DbState};
use stockbook_core::bill::BillDocument;
use stockbook_core::validation::{parse_money, parse_quantity, require};
use stockbook_core::{Bill, BillLine, BillSummary, CoreError, Money};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddLineItemRequest {
    pub product_name: String,
    pub quantity: String,
    pub selling_price: String,
}

/// What the user sees after a bill is committed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinalizeResponse {
    pub bill: Bill,
    /// `INV-<year>-<number>`
    pub invoice: String,
    pub lines: Vec<BillLine>,
    pub total_cgst: Money,
    pub total_sgst: Money,
    /// Rendered bill text, as written to the export file
    pub text: String,
    pub export_path: String,
}

/// Current bill contents and running totals.
pub fn get_bill(bill: &BillState) -> BillSummary {
    bill.with_bill(|b| b.summary())
}

/// Adds a line priced at `selling_price` with the product's current rates.
///
/// Stock on hand is read now. The quantity plus whatever is already on the
/// bill for the same product must not exceed it.
pub async fn add_line_item(
    db: &DbState,
    bill: &BillState,
    request: AddLineItemRequest,
) -> Result<BillSummary, ApiError> {
    debug!(product = %request.product_name, quantity = %request.quantity, "add_line_item command");

    let product_name = require("product name", &request.product_name)?;
    let quantity = parse_quantity("quantity", &request.quantity)?;
    let selling_price = parse_money("selling price", &request.selling_price)?;

    let stock = db
        .inner()
        .products()
        .stock_snapshot(&product_name)
        .await?
        .ok_or_else(|| ApiError::not_found("Product", &product_name))?;

    let summary = bill.with_bill_mut(|b| {
        b.add_line(&stock, quantity, selling_price)?;
        Ok::<BillSummary, CoreError>(b.summary())
    })?;

    debug!(lines = summary.line_count, total = %summary.total, "Line added");
    Ok(summary)
}

/// Removes the line at `index` (0-based).
pub fn remove_line_item(bill: &BillState, index: usize) -> Result<BillSummary, ApiError> {
    debug!(index, "remove_line_item command");

    let summary = bill.with_bill_mut(|b| {
        b.remove_line(index)?;
        Ok::<BillSummary, CoreError>(b.summary())
    })?;
    Ok(summary)
}

/// Discards the whole bill.
pub fn clear_bill(bill: &BillState) -> BillSummary {
    debug!("clear_bill command");
    bill.with_bill_mut(|b| {
        b.clear();
        b.summary()
    })
}

/// Commits the bill for `customer_name` with today's local date.
pub async fn finalize_bill(
    db: &DbState,
    bill: &BillState,
    config: &ConfigState,
    customer_name: &str,
) -> Result<FinalizeResponse, ApiError> {
    let today = Local::now().date_naive();
    finalize_bill_on(db, bill, config, customer_name, today).await
}

/// Commits the bill as of `today`.
///
/// ## Flow
/// ```text
/// snapshot lines (lock released)
///      │
///      ▼
/// BillingService::finalize ── error ──► bill untouched, error returned
///      │
///      ▼
/// reset composer ──► render text ──► write bill_<n>.txt
/// ```
///
/// The composer is reset as soon as the store commits. An export failure
/// after that is reported as `EXPORT_ERROR`; the bill stays committed.
pub async fn finalize_bill_on(
    db: &DbState,
    bill: &BillState,
    config: &ConfigState,
    customer_name: &str,
    today: NaiveDate,
) -> Result<FinalizeResponse, ApiError> {
    debug!(customer = %customer_name, %today, "finalize_bill command");

    let lines = bill.with_bill(|b| b.lines().to_vec());
    let done = db.inner().billing().finalize(customer_name, &lines, today).await?;

    // Lines added while the commit was running stay on the composer
    bill.with_bill_mut(|b| {
        if b.lines() == lines.as_slice() {
            b.clear();
        }
    });

    let text = BillDocument {
        shop_name: config.shop_name.as_deref(),
        bill_number: done.bill.bill_number,
        invoice: done.invoice,
        customer_name: &done.bill.customer_name,
        bill_date: today,
        lines: &done.lines,
    }
    .render();

    let path = write_bill_export(&config.export_dir, done.invoice.number, &text).map_err(|e| {
        warn!(invoice = %done.invoice, "Bill committed but not exported");
        ApiError::from(e)
    })?;

    info!(
        invoice = %done.invoice,
        total = %config.format_currency(done.bill.total_amount()),
        "Bill complete"
    );

    Ok(FinalizeResponse {
        invoice: done.invoice.label(),
        total_cgst: done.lines.iter().map(BillLine::cgst_total).sum(),
        total_sgst: done.lines.iter().map(BillLine::sgst_total).sum(),
        bill: done.bill,
        lines: done.lines,
        text,
        export_path: path.display().to_string(),
    })
}
