//! # Product Repository
//!
//! Read side of the stock table. Writes to `products` happen only through
//! the [`InventoryLedger`](crate::ledger::InventoryLedger) and the
//! [`BillingService`](crate::billing::BillingService), inside transactions.
//!
//! ## Stock On Hand
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  products rows for "Basmati Rice 5kg"                                   │
//! │                                                                         │
//! │   id  brand       company  price    qty  cgst  sgst                     │
//! │   3   India Gate  1        450.00   4    2.50  2.50                     │
//! │   9   India Gate  1        480.00   10   2.50  2.50  ← newest           │
//! │                                                                         │
//! │  StockSnapshot { on_hand: 14, cgst: 2.50, sgst: 2.50 }                  │
//! │    on_hand = SUM(quantity) over every price point of the name          │
//! │    rates   = newest price point                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use stockbook_core::{Money, Product, ProductListing, StockSnapshot, TaxRate};

/// Repository for product database operations.
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

/// Totals over the whole stock table, printed at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StockSummary {
    pub product_names: i64,
    pub price_points: i64,
    pub units_on_hand: i64,
    /// Σ quantity × unit price.
    pub stock_value: Money,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Every price point joined with its company name, as shown in the
    /// stock list.
    pub async fn list(&self) -> DbResult<Vec<ProductListing>> {
        let products = sqlx::query_as::<_, ProductListing>(
            r#"
            SELECT
                p.id,
                c.name AS company_name,
                p.brand,
                p.product_name,
                p.quantity,
                p.unit_price_paise,
                p.cgst_bps,
                p.sgst_bps,
                p.cess_bps,
                p.purchase_date
            FROM products p
            INNER JOIN companies c ON c.id = p.company_id
            ORDER BY p.id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(count = products.len(), "Listed products");
        Ok(products)
    }

    /// Distinct product names, for the bill form's picker.
    pub async fn names(&self) -> DbResult<Vec<String>> {
        let names: Vec<String> = sqlx::query_scalar(
            r#"
            SELECT product_name
            FROM products
            GROUP BY product_name
            ORDER BY MIN(id)
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(names)
    }

    /// Gets a price point by ID.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, company_id, brand, product_name, quantity, unit_price_paise,
                   cgst_bps, sgst_bps, cess_bps, purchase_date
            FROM products
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// Every price point of one (name, brand, company), oldest first.
    pub async fn price_points(
        &self,
        product_name: &str,
        brand: &str,
        company_id: i64,
    ) -> DbResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, company_id, brand, product_name, quantity, unit_price_paise,
                   cgst_bps, sgst_bps, cess_bps, purchase_date
            FROM products
            WHERE product_name = ?1 AND brand = ?2 AND company_id = ?3
            ORDER BY id
            "#,
        )
        .bind(product_name)
        .bind(brand)
        .bind(company_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    /// Stock on hand and current rates for a product name.
    ///
    /// Returns `None` when no row carries this name.
    pub async fn stock_snapshot(&self, product_name: &str) -> DbResult<Option<StockSnapshot>> {
        let row: Option<(String, i64, u32, u32)> = sqlx::query_as(
            r#"
            SELECT
                p.product_name,
                (SELECT COALESCE(SUM(quantity), 0) FROM products WHERE product_name = ?1),
                p.cgst_bps,
                p.sgst_bps
            FROM products p
            WHERE p.product_name = ?1
            ORDER BY p.id DESC
            LIMIT 1
            "#,
        )
        .bind(product_name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|(product_name, on_hand, cgst, sgst)| StockSnapshot {
            product_name,
            on_hand,
            cgst: TaxRate::from_bps(cgst),
            sgst: TaxRate::from_bps(sgst),
        }))
    }

    /// Totals over the whole stock table.
    pub async fn summary(&self) -> DbResult<StockSummary> {
        let (product_names, price_points, units_on_hand, stock_value): (i64, i64, i64, i64) =
            sqlx::query_as(
                r#"
                SELECT
                    COUNT(DISTINCT product_name),
                    COUNT(*),
                    COALESCE(SUM(quantity), 0),
                    COALESCE(SUM(quantity * unit_price_paise), 0)
                FROM products
                "#,
            )
            .fetch_one(&self.pool)
            .await?;

        Ok(StockSummary {
            product_names,
            price_points,
            units_on_hand,
            stock_value: Money::from_paise(stock_value),
        })
    }

    /// Counts price points (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
