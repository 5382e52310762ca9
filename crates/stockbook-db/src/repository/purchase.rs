//! # Purchase Log Repository
//!
//! Read access to the append-only `purchases` log. Rows are written by the
//! ledger (stock purchases) and by bill finalization (one row per sold
//! line, transaction id `INV-<year>-<number>`).

use sqlx::SqlitePool;

use crate::error::DbResult;
use stockbook_core::Purchase;

/// Repository for the purchase log.
#[derive(Debug, Clone)]
pub struct PurchaseRepository {
    pool: SqlitePool,
}

impl PurchaseRepository {
    pub fn new(pool: SqlitePool) -> Self {
        PurchaseRepository { pool }
    }

    /// Whole log, oldest first.
    pub async fn list(&self) -> DbResult<Vec<Purchase>> {
        let purchases = sqlx::query_as::<_, Purchase>(
            r#"
            SELECT id, transaction_id, product_name, quantity,
                   unit_price_paise, total_price_paise, purchase_date
            FROM purchases
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(purchases)
    }

    /// Rows written under one transaction id.
    pub async fn by_transaction(&self, transaction_id: &str) -> DbResult<Vec<Purchase>> {
        let purchases = sqlx::query_as::<_, Purchase>(
            r#"
            SELECT id, transaction_id, product_name, quantity,
                   unit_price_paise, total_price_paise, purchase_date
            FROM purchases
            WHERE transaction_id = ?1
            ORDER BY id
            "#,
        )
        .bind(transaction_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(purchases)
    }

    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM purchases")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
