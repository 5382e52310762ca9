//! # Bill Finalization
//!
//! Persists a composed bill atomically.
//!
//! ## Finalize Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  finalize(customer, lines, today)                                       │
//! │       │                                                                 │
//! │       ├── blank customer / no lines → error, nothing written            │
//! │       ▼                                                                 │
//! │  BEGIN                                                                  │
//! │   1. allocate invoice number (settings)                                 │
//! │   2. consume stock for every line (oldest price point first)            │
//! │   3. INSERT billing (customer, Σ line totals, now)                      │
//! │   4. INSERT purchases per line, transaction id INV-<year>-<number>      │
//! │  COMMIT                                                                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  FinalizedBill → caller renders text, writes export, resets composer    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Stock is re-checked here: it may have changed since the lines were
//! added. Any shortfall rolls back the whole bill, including the invoice
//! number.

use chrono::{NaiveDate, Utc};
use serde::Serialize;
use sqlx::SqlitePool;
use tracing::info;

use crate::error::DbResult;
use crate::ledger::{consume_stock, insert_purchase_log};
use crate::repository::settings::allocate;
use stockbook_core::validation::require;
use stockbook_core::{Bill, BillLine, CoreError, InvoiceNumber, Money};

/// A committed bill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinalizedBill {
    pub bill: Bill,
    pub invoice: InvoiceNumber,
    pub lines: Vec<BillLine>,
}

/// Writes finalized bills.
#[derive(Debug, Clone)]
pub struct BillingService {
    pool: SqlitePool,
}

impl BillingService {
    pub fn new(pool: SqlitePool) -> Self {
        BillingService { pool }
    }

    /// Commits a bill for `customer_name`.
    ///
    /// `today` selects the invoice counter and drives the April 1st reset.
    ///
    /// ## Errors
    /// - `Core(Validation)` for a blank customer name
    /// - `Core(EmptyBill)` when `lines` is empty
    /// - `Core(NotFound)` / `Core(InsufficientStock)` if stock moved since
    ///   the lines were added
    pub async fn finalize(
        &self,
        customer_name: &str,
        lines: &[BillLine],
        today: NaiveDate,
    ) -> DbResult<FinalizedBill> {
        let customer_name = require("customer name", customer_name).map_err(CoreError::from)?;
        if lines.is_empty() {
            return Err(CoreError::EmptyBill.into());
        }

        let now = Utc::now();
        let total: Money = lines.iter().map(|l| l.line_total).sum();

        let mut tx = self.pool.begin().await?;

        let invoice = allocate(&mut *tx, today).await?;

        for line in lines {
            consume_stock(&mut *tx, &line.product_name, line.quantity).await?;
        }

        let result = sqlx::query(
            r#"
            INSERT INTO billing (
                invoice_number, invoice_year, customer_name, total_amount_paise, bill_date
            ) VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(invoice.number)
        .bind(invoice.year)
        .bind(&customer_name)
        .bind(total.paise())
        .bind(now)
        .execute(&mut *tx)
        .await?;
        let bill_number = result.last_insert_rowid();

        let label = invoice.label();
        for line in lines {
            insert_purchase_log(
                &mut *tx,
                &label,
                &line.product_name,
                line.quantity,
                line.selling_price,
                line.line_total,
            )
            .await?;
        }

        tx.commit().await?;

        info!(
            bill_number,
            invoice = %invoice,
            customer = %customer_name,
            total = %total,
            lines = lines.len(),
            "Bill finalized"
        );

        Ok(FinalizedBill {
            bill: Bill {
                bill_number,
                invoice_number: invoice.number,
                invoice_year: invoice.year,
                customer_name,
                total_amount_paise: total.paise(),
                bill_date: now,
            },
            invoice,
            lines: lines.to_vec(),
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Database, DbConfig, DbError};
    use stockbook_core::purchase::validate_batch;
    use stockbook_core::{BillComposer, NewCompany, PurchaseLineInput};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    async fn stocked_db() -> Database {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let company = db
            .companies()
            .insert(&NewCompany {
                name: "Tata Consumer".to_string(),
                gst_number: None,
                contact: None,
            })
            .await
            .unwrap();

        let line = |name: &str, qty: &str| PurchaseLineInput {
            company_id: company.id,
            brand: "Tata".to_string(),
            product_name: name.to_string(),
            quantity: qty.to_string(),
            unit_price: "80".to_string(),
            cgst: "9".to_string(),
            sgst: "9".to_string(),
            cess: String::new(),
        };
        let batch = validate_batch("TX-1", &[line("Tea 250g", "10"), line("Salt 1kg", "5")])
            .unwrap();
        db.ledger().record_purchase(&batch).await.unwrap();
        db
    }

    async fn compose(db: &Database, items: &[(&str, i64)]) -> BillComposer {
        let mut bill = BillComposer::new();
        for (name, qty) in items {
            let stock = db.products().stock_snapshot(name).await.unwrap().unwrap();
            bill.add_line(&stock, *qty, Money::from_paise(10_000)).unwrap();
        }
        bill
    }

    #[tokio::test]
    async fn test_finalize_writes_one_bill() {
        let db = stocked_db().await;
        let bill = compose(&db, &[("Tea 250g", 2), ("Salt 1kg", 1)]).await;

        let done = db
            .billing()
            .finalize("Ravi Stores", bill.lines(), date(2026, 10, 18))
            .await
            .unwrap();

        assert_eq!(done.bill.total_amount().to_string(), "354.00");
        assert_eq!(done.invoice.number, 1);
        assert_eq!(db.bills().count().await.unwrap(), 1);

        let tea = db.products().stock_snapshot("Tea 250g").await.unwrap().unwrap();
        assert_eq!(tea.on_hand, 8);

        let audit = db.purchases().by_transaction("INV-2026-0001").await.unwrap();
        assert_eq!(audit.len(), 2);
        assert_eq!(audit[0].total_price().to_string(), "236.00");
    }

    #[tokio::test]
    async fn test_invoice_numbers_advance() {
        let db = stocked_db().await;
        let billing = db.billing();

        for expected in 1..=3 {
            let bill = compose(&db, &[("Tea 250g", 1)]).await;
            let done = billing
                .finalize("Ravi Stores", bill.lines(), date(2026, 10, 18))
                .await
                .unwrap();
            assert_eq!(done.invoice.number, expected);
        }
    }

    #[tokio::test]
    async fn test_empty_bill_and_blank_customer_rejected() {
        let db = stocked_db().await;
        let billing = db.billing();

        assert!(matches!(
            billing.finalize("Ravi Stores", &[], date(2026, 10, 18)).await,
            Err(DbError::Core(CoreError::EmptyBill))
        ));

        let bill = compose(&db, &[("Tea 250g", 1)]).await;
        assert!(matches!(
            billing.finalize("  ", bill.lines(), date(2026, 10, 18)).await,
            Err(DbError::Core(CoreError::Validation(_)))
        ));
        assert_eq!(db.bills().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_stock_shortfall_rolls_back_everything() {
        let db = stocked_db().await;
        let bill = compose(&db, &[("Tea 250g", 2), ("Salt 1kg", 5)]).await;

        // Salt sells out elsewhere between composing and finalizing
        db.ledger().record_sale("Salt 1kg", 3).await.unwrap();

        let err = db
            .billing()
            .finalize("Ravi Stores", bill.lines(), date(2026, 10, 18))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DbError::Core(CoreError::InsufficientStock { .. })
        ));

        assert_eq!(db.bills().count().await.unwrap(), 0);
        assert_eq!(db.invoices().last_number(2026).await.unwrap(), None);
        let tea = db.products().stock_snapshot("Tea 250g").await.unwrap().unwrap();
        assert_eq!(tea.on_hand, 10);
    }

    #[tokio::test]
    async fn test_search_by_customer() {
        let db = stocked_db().await;
        let billing = db.billing();

        for customer in ["Ravi Stores", "Lakshmi Traders", "Ravindra & Sons"] {
            let bill = compose(&db, &[("Tea 250g", 1)]).await;
            billing
                .finalize(customer, bill.lines(), date(2026, 10, 18))
                .await
                .unwrap();
        }

        let hits = db.bills().search_by_customer("ravi").await.unwrap();
        let names: Vec<&str> = hits.iter().map(|b| b.customer_name.as_str()).collect();
        assert_eq!(names, vec!["Ravi Stores", "Ravindra & Sons"]);
        assert_eq!(db.bills().search_by_customer("").await.unwrap().len(), 3);
        assert_eq!(db.bills().list().await.unwrap().len(), 3);
    }
}
