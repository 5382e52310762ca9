//! # Inventory Ledger
//!
//! Every write to the stock table: purchase batches in, sales out.
//!
//! ## Purchase Batch
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  record_purchase(batch)                  (one transaction)              │
//! │                                                                         │
//! │  for each line:                                                         │
//! │    company exists?  ── no ──► NotFound, ROLLBACK                        │
//! │        │                                                                │
//! │        ▼                                                                │
//! │    same (name, brand, company, unit price) row?                         │
//! │        ├── yes ──► quantity += line.quantity                            │
//! │        └── no  ──► INSERT new price point                               │
//! │        │                                                                │
//! │        ▼                                                                │
//! │    INSERT purchases (qty × unit price)                                  │
//! │                                                                         │
//! │  COMMIT ── all lines or none                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Sale
//! Stock on hand for a name is the sum over its price points. A sale
//! consumes the oldest price points first and never drives a row below 0.

use chrono::Utc;
use serde::Serialize;
use sqlx::{SqliteConnection, SqlitePool};
use tracing::{debug, info, warn};

use crate::error::DbResult;
use stockbook_core::purchase::PurchaseBatch;
use stockbook_core::validation::validate_quantity;
use stockbook_core::{CoreError, Money};

/// What a committed purchase batch did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseReceipt {
    pub transaction_id: String,
    /// Existing price points whose quantity was incremented.
    pub incremented: usize,
    /// New price point rows.
    pub inserted: usize,
    /// Purchase log row ids, in line order.
    pub purchase_ids: Vec<i64>,
    /// Σ quantity × unit price.
    pub stock_value: Money,
}

/// Units taken from one price point by a sale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StockDraw {
    pub product_id: i64,
    pub quantity: i64,
}

/// Stock ledger over the `products` and `purchases` tables.
#[derive(Debug, Clone)]
pub struct InventoryLedger {
    pool: SqlitePool,
}

impl InventoryLedger {
    pub fn new(pool: SqlitePool) -> Self {
        InventoryLedger { pool }
    }

    /// Commits a validated purchase batch.
    ///
    /// ## Errors
    /// - `Core(NotFound)` if a line references a missing company
    ///
    /// On any error nothing is written.
    pub async fn record_purchase(&self, batch: &PurchaseBatch) -> DbResult<PurchaseReceipt> {
        let now = Utc::now();
        let mut receipt = PurchaseReceipt {
            transaction_id: batch.transaction_id.clone(),
            incremented: 0,
            inserted: 0,
            purchase_ids: Vec::with_capacity(batch.lines.len()),
            stock_value: Money::zero(),
        };

        let mut tx = self.pool.begin().await?;

        for line in &batch.lines {
            let company: Option<i64> = sqlx::query_scalar("SELECT id FROM companies WHERE id = ?1")
                .bind(line.company_id)
                .fetch_optional(&mut *tx)
                .await?;
            if company.is_none() {
                warn!(company_id = line.company_id, "Purchase references unknown company");
                return Err(CoreError::not_found("Company", line.company_id.to_string()).into());
            }

            let existing: Option<i64> = sqlx::query_scalar(
                r#"
                SELECT id FROM products
                WHERE product_name = ?1 AND brand = ?2 AND company_id = ?3
                  AND unit_price_paise = ?4
                ORDER BY id
                LIMIT 1
                "#,
            )
            .bind(&line.product_name)
            .bind(&line.brand)
            .bind(line.company_id)
            .bind(line.unit_price.paise())
            .fetch_optional(&mut *tx)
            .await?;

            match existing {
                Some(id) => {
                    debug!(id, quantity = line.quantity, "Incrementing price point");
                    sqlx::query("UPDATE products SET quantity = quantity + ?2 WHERE id = ?1")
                        .bind(id)
                        .bind(line.quantity)
                        .execute(&mut *tx)
                        .await?;
                    receipt.incremented += 1;
                }
                None => {
                    debug!(product = %line.product_name, price = %line.unit_price, "Inserting price point");
                    sqlx::query(
                        r#"
                        INSERT INTO products (
                            company_id, brand, product_name, quantity, unit_price_paise,
                            cgst_bps, sgst_bps, cess_bps, purchase_date
                        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
                        "#,
                    )
                    .bind(line.company_id)
                    .bind(&line.brand)
                    .bind(&line.product_name)
                    .bind(line.quantity)
                    .bind(line.unit_price.paise())
                    .bind(line.cgst.bps())
                    .bind(line.sgst.bps())
                    .bind(line.cess.bps())
                    .bind(now)
                    .execute(&mut *tx)
                    .await?;
                    receipt.inserted += 1;
                }
            }

            let value = line.stock_value();
            let id = insert_purchase_log(
                &mut *tx,
                &batch.transaction_id,
                &line.product_name,
                line.quantity,
                line.unit_price,
                value,
            )
            .await?;
            receipt.purchase_ids.push(id);
            receipt.stock_value += value;
        }

        tx.commit().await?;

        info!(
            transaction_id = %receipt.transaction_id,
            incremented = receipt.incremented,
            inserted = receipt.inserted,
            stock_value = %receipt.stock_value,
            "Purchase recorded"
        );
        Ok(receipt)
    }

    /// Removes `quantity` units of `product_name` from stock.
    ///
    /// ## Errors
    /// - `Core(Validation)` if quantity is not positive
    /// - `Core(NotFound)` if no row carries this name
    /// - `Core(InsufficientStock)` if quantity exceeds stock on hand
    pub async fn record_sale(&self, product_name: &str, quantity: i64) -> DbResult<Vec<StockDraw>> {
        validate_quantity("quantity", quantity).map_err(CoreError::from)?;

        let mut tx = self.pool.begin().await?;
        let draws = consume_stock(&mut *tx, product_name, quantity).await?;
        tx.commit().await?;

        info!(product = %product_name, quantity, "Sale recorded");
        Ok(draws)
    }
}

/// Consumes stock oldest price point first. Shared with bill finalization.
pub(crate) async fn consume_stock(
    conn: &mut SqliteConnection,
    product_name: &str,
    quantity: i64,
) -> DbResult<Vec<StockDraw>> {
    let rows: Vec<(i64, i64)> = sqlx::query_as(
        "SELECT id, quantity FROM products WHERE product_name = ?1 ORDER BY id",
    )
    .bind(product_name)
    .fetch_all(&mut *conn)
    .await?;

    if rows.is_empty() {
        return Err(CoreError::not_found("Product", product_name).into());
    }

    let on_hand: i64 = rows.iter().map(|(_, q)| q).sum();
    if quantity > on_hand {
        return Err(CoreError::InsufficientStock {
            product: product_name.to_string(),
            available: on_hand,
            requested: quantity,
        }
        .into());
    }

    let mut remaining = quantity;
    let mut draws = Vec::new();
    for (id, available) in rows {
        if remaining == 0 {
            break;
        }
        let take = remaining.min(available);
        if take == 0 {
            continue;
        }

        sqlx::query("UPDATE products SET quantity = quantity - ?2 WHERE id = ?1")
            .bind(id)
            .bind(take)
            .execute(&mut *conn)
            .await?;

        draws.push(StockDraw {
            product_id: id,
            quantity: take,
        });
        remaining -= take;
    }

    debug!(product = %product_name, quantity, rows = draws.len(), "Stock consumed");
    Ok(draws)
}

/// Appends one row to the purchase log.
pub(crate) async fn insert_purchase_log(
    conn: &mut SqliteConnection,
    transaction_id: &str,
    product_name: &str,
    quantity: i64,
    unit_price: Money,
    total_price: Money,
) -> DbResult<i64> {
    let result = sqlx::query(
        r#"
        INSERT INTO purchases (
            transaction_id, product_name, quantity,
            unit_price_paise, total_price_paise, purchase_date
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
        "#,
    )
    .bind(transaction_id)
    .bind(product_name)
    .bind(quantity)
    .bind(unit_price.paise())
    .bind(total_price.paise())
    .bind(Utc::now())
    .execute(&mut *conn)
    .await?;

    Ok(result.last_insert_rowid())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Database, DbConfig, DbError};
    use stockbook_core::purchase::validate_batch;
    use stockbook_core::{NewCompany, PurchaseLineInput};

    async fn setup() -> (Database, i64) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let company = db
            .companies()
            .insert(&NewCompany {
                name: "Amul".to_string(),
                gst_number: None,
                contact: None,
            })
            .await
            .unwrap();
        (db, company.id)
    }

    fn line(company_id: i64, name: &str, qty: &str, price: &str) -> PurchaseLineInput {
        PurchaseLineInput {
            company_id,
            brand: "Amul".to_string(),
            product_name: name.to_string(),
            quantity: qty.to_string(),
            unit_price: price.to_string(),
            cgst: "6".to_string(),
            sgst: "6".to_string(),
            cess: String::new(),
        }
    }

    #[tokio::test]
    async fn test_same_price_increments_quantity() {
        let (db, company) = setup().await;
        let ledger = db.ledger();

        let first = validate_batch("TX-1", &[line(company, "Ghee 1L", "5", "550")]).unwrap();
        let second = validate_batch("TX-2", &[line(company, "Ghee 1L", "7", "550")]).unwrap();
        ledger.record_purchase(&first).await.unwrap();
        let receipt = ledger.record_purchase(&second).await.unwrap();

        assert_eq!(receipt.incremented, 1);
        assert_eq!(receipt.inserted, 0);

        let rows = db.products().price_points("Ghee 1L", "Amul", company).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].quantity, 12);
    }

    #[tokio::test]
    async fn test_price_change_adds_price_point() {
        let (db, company) = setup().await;
        let ledger = db.ledger();

        let first = validate_batch("TX-1", &[line(company, "Ghee 1L", "5", "550")]).unwrap();
        let second = validate_batch("TX-2", &[line(company, "Ghee 1L", "3", "575")]).unwrap();
        ledger.record_purchase(&first).await.unwrap();
        let receipt = ledger.record_purchase(&second).await.unwrap();
        assert_eq!(receipt.inserted, 1);

        let rows = db.products().price_points("Ghee 1L", "Amul", company).await.unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!((rows[0].unit_price_paise, rows[0].quantity), (55_000, 5));
        assert_eq!((rows[1].unit_price_paise, rows[1].quantity), (57_500, 3));
    }

    #[tokio::test]
    async fn test_purchase_log_totals() {
        let (db, company) = setup().await;
        let batch = validate_batch(
            "TX-7",
            &[
                line(company, "Butter 500g", "10", "275.50"),
                line(company, "Cheese 200g", "4", "120"),
            ],
        )
        .unwrap();
        let receipt = db.ledger().record_purchase(&batch).await.unwrap();

        assert_eq!(receipt.purchase_ids.len(), 2);
        assert_eq!(receipt.stock_value.to_string(), "3235.00");

        let log = db.purchases().by_transaction("TX-7").await.unwrap();
        assert_eq!(log.len(), 2);
        assert_eq!(log[0].total_price().to_string(), "2755.00");
        assert_eq!(log[1].total_price_paise, 48_000);
    }

    #[tokio::test]
    async fn test_unknown_company_writes_nothing() {
        let (db, company) = setup().await;
        let batch = validate_batch(
            "TX-3",
            &[
                line(company, "Ghee 1L", "5", "550"),
                line(company + 100, "Paneer 200g", "5", "90"),
            ],
        )
        .unwrap();

        let err = db.ledger().record_purchase(&batch).await.unwrap_err();
        assert!(matches!(err, DbError::Core(CoreError::NotFound { .. })));

        assert_eq!(db.products().count().await.unwrap(), 0);
        assert_eq!(db.purchases().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_sale_consumes_oldest_price_point_first() {
        let (db, company) = setup().await;
        let ledger = db.ledger();
        let batch = validate_batch(
            "TX-1",
            &[
                line(company, "Ghee 1L", "3", "550"),
                line(company, "Ghee 1L", "4", "575"),
            ],
        )
        .unwrap();
        ledger.record_purchase(&batch).await.unwrap();

        let draws = ledger.record_sale("Ghee 1L", 5).await.unwrap();
        assert_eq!(draws.len(), 2);
        assert_eq!(draws[0].quantity, 3);
        assert_eq!(draws[1].quantity, 2);

        let rows = db.products().price_points("Ghee 1L", "Amul", company).await.unwrap();
        assert_eq!(rows[0].quantity, 0);
        assert_eq!(rows[1].quantity, 2);
    }

    #[tokio::test]
    async fn test_sale_beyond_stock_is_rejected() {
        let (db, company) = setup().await;
        let ledger = db.ledger();
        let batch = validate_batch("TX-1", &[line(company, "Ghee 1L", "5", "550")]).unwrap();
        ledger.record_purchase(&batch).await.unwrap();

        let err = ledger.record_sale("Ghee 1L", 6).await.unwrap_err();
        assert!(matches!(
            err,
            DbError::Core(CoreError::InsufficientStock {
                available: 5,
                requested: 6,
                ..
            })
        ));

        let snapshot = db.products().stock_snapshot("Ghee 1L").await.unwrap().unwrap();
        assert_eq!(snapshot.on_hand, 5);
    }

    #[tokio::test]
    async fn test_sale_of_unknown_product() {
        let (db, _) = setup().await;
        assert!(matches!(
            db.ledger().record_sale("Nothing", 1).await,
            Err(DbError::Core(CoreError::NotFound { .. }))
        ));
        assert!(matches!(
            db.ledger().record_sale("Nothing", 0).await,
            Err(DbError::Core(CoreError::Validation(_)))
        ));
    }
}
