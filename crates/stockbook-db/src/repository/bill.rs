//! # Bill Repository
//!
//! Read access to finalized bills. Rows are inserted only by
//! [`BillingService::finalize`](crate::billing::BillingService::finalize).

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use stockbook_core::Bill;

/// Repository for finalized bills.
#[derive(Debug, Clone)]
pub struct BillRepository {
    pool: SqlitePool,
}

impl BillRepository {
    pub fn new(pool: SqlitePool) -> Self {
        BillRepository { pool }
    }

    /// Every bill, oldest first.
    pub async fn list(&self) -> DbResult<Vec<Bill>> {
        let bills = sqlx::query_as::<_, Bill>(
            r#"
            SELECT bill_number, invoice_number, invoice_year, customer_name,
                   total_amount_paise, bill_date
            FROM billing
            ORDER BY bill_number
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(bills)
    }

    /// Bills whose customer name contains `query` (SQL `LIKE '%query%'`,
    /// case-insensitive for ASCII). An empty query matches every bill.
    pub async fn search_by_customer(&self, query: &str) -> DbResult<Vec<Bill>> {
        debug!(query = %query, "Searching bills");

        let pattern = format!("%{}%", query);
        let bills = sqlx::query_as::<_, Bill>(
            r#"
            SELECT bill_number, invoice_number, invoice_year, customer_name,
                   total_amount_paise, bill_date
            FROM billing
            WHERE customer_name LIKE ?1
            ORDER BY bill_number
            "#,
        )
        .bind(pattern)
        .fetch_all(&self.pool)
        .await?;

        debug!(count = bills.len(), "Bill search returned");
        Ok(bills)
    }

    pub async fn get(&self, bill_number: i64) -> DbResult<Option<Bill>> {
        let bill = sqlx::query_as::<_, Bill>(
            r#"
            SELECT bill_number, invoice_number, invoice_year, customer_name,
                   total_amount_paise, bill_date
            FROM billing
            WHERE bill_number = ?1
            "#,
        )
        .bind(bill_number)
        .fetch_optional(&self.pool)
        .await?;

        Ok(bill)
    }

    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM billing")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
