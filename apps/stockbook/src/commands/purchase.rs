//! # Purchase Commands
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Purchase form                                                          │
//! │                                                                         │
//! │  Transaction ID: PO-0042                                                │
//! │  ┌───────────┬────────┬──────────────┬─────┬────────┬──────┬──────┐    │
//! │  │ Company   │ Brand  │ Product      │ Qty │ Price  │ CGST │ SGST │    │
//! │  ├───────────┼────────┼──────────────┼─────┼────────┼──────┼──────┤    │
//! │  │ KRBL      │ IG     │ Basmati 5kg  │ 30  │ 610    │ 2.5  │ 2.5  │ ◄─ preview_purchase_line
//! │  │ ...       │        │              │     │        │      │      │    │
//! │  └───────────┴────────┴──────────────┴─────┴────────┴──────┴──────┘    │
//! │                                                                         │
//! │  [Record] ──► record_purchase: validate all lines, then one transaction │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::ApiError;
use crate::state::DbState;
use stockbook_core::purchase::validate_batch;
use stockbook_core::{Money, PurchaseLineInput};
use stockbook_db::PurchaseReceipt;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordPurchaseRequest {
    pub transaction_id: String,
    pub items: Vec<PurchaseLineInput>,
}

/// Landed cost of one form line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchasePreview {
    pub unit_tax: Money,
    pub landed_unit_cost: Money,
    pub landed_total: Money,
}

/// Records a purchase batch.
///
/// Every line is validated before anything is written; a bad line fails
/// the whole batch with its 1-based line number in the message.
pub async fn record_purchase(
    db: &DbState,
    request: RecordPurchaseRequest,
) -> Result<PurchaseReceipt, ApiError> {
    debug!(
        transaction_id = %request.transaction_id,
        lines = request.items.len(),
        "record_purchase command"
    );

    let batch = validate_batch(&request.transaction_id, &request.items)?;
    let receipt = db.inner().ledger().record_purchase(&batch).await?;

    info!(
        transaction_id = %receipt.transaction_id,
        landed_total = %batch.landed_total(),
        "Purchase recorded"
    );
    Ok(receipt)
}

/// `(unit + cgst + sgst + cess) × quantity` for one line, without writing.
pub fn preview_purchase_line(input: &PurchaseLineInput) -> Result<PurchasePreview, ApiError> {
    let line = input.validate()?;
    Ok(PurchasePreview {
        unit_tax: line.unit_tax(),
        landed_unit_cost: line.landed_unit_cost(),
        landed_total: line.landed_total(),
    })
}
