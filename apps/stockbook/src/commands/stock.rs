//! # Stock and History Commands
//!
//! Read views over products, the purchase log and bills, plus a direct
//! stock draw for sales made outside a bill.

use tracing::{debug, info};

use crate::error::ApiError;
use crate::state::DbState;
use stockbook_core::validation::{parse_quantity, require, validate_search_query};
use stockbook_core::{Bill, Product, ProductListing, Purchase};
use stockbook_db::{StockDraw, StockSummary};

/// Every price point, with its company name.
pub async fn list_products(db: &DbState) -> Result<Vec<ProductListing>, ApiError> {
    Ok(db.inner().products().list().await?)
}

/// Distinct product names, for the bill form's picker.
pub async fn list_product_names(db: &DbState) -> Result<Vec<String>, ApiError> {
    Ok(db.inner().products().names().await?)
}

/// One price point by id.
pub async fn get_product(db: &DbState, id: i64) -> Result<Product, ApiError> {
    db.inner()
        .products()
        .get_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Product", &id.to_string()))
}

pub async fn stock_summary(db: &DbState) -> Result<StockSummary, ApiError> {
    Ok(db.inner().products().summary().await?)
}

pub async fn list_purchases(db: &DbState) -> Result<Vec<Purchase>, ApiError> {
    Ok(db.inner().purchases().list().await?)
}

pub async fn list_bills(db: &DbState) -> Result<Vec<Bill>, ApiError> {
    Ok(db.inner().bills().list().await?)
}

/// A past bill by its bill number.
pub async fn get_bill_record(db: &DbState, bill_number: i64) -> Result<Bill, ApiError> {
    db.inner()
        .bills()
        .get(bill_number)
        .await?
        .ok_or_else(|| ApiError::not_found("Bill", &bill_number.to_string()))
}

/// Bills whose customer name contains `query`. Blank matches all.
pub async fn search_bills(db: &DbState, query: &str) -> Result<Vec<Bill>, ApiError> {
    let query = validate_search_query(query)?;
    debug!(query = %query, "search_bills command");
    Ok(db.inner().bills().search_by_customer(&query).await?)
}

/// Takes `quantity` units of a product out of stock, oldest price first.
pub async fn record_sale(
    db: &DbState,
    product_name: &str,
    quantity: &str,
) -> Result<Vec<StockDraw>, ApiError> {
    let product_name = require("product name", product_name)?;
    let quantity = parse_quantity("quantity", quantity)?;

    let draws = db.inner().ledger().record_sale(&product_name, quantity).await?;
    info!(product = %product_name, quantity, rows = draws.len(), "Stock drawn");
    Ok(draws)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::catalog::{add_company, CompanyInput};
    use crate::commands::purchase::{record_purchase, RecordPurchaseRequest};
    use crate::error::ErrorCode;
    use stockbook_core::PurchaseLineInput;
    use stockbook_db::{Database, DbConfig};

    async fn stocked() -> DbState {
        let db = DbState::new(Database::new(DbConfig::in_memory()).await.unwrap());
        let company = add_company(
            &db,
            CompanyInput {
                name: "ITC Limited".to_string(),
                gst_number: None,
                contact: None,
            },
        )
        .await
        .unwrap();

        let line = |qty: &str, price: &str| PurchaseLineInput {
            company_id: company.id,
            brand: "Aashirvaad".to_string(),
            product_name: "Atta 10kg".to_string(),
            quantity: qty.to_string(),
            unit_price: price.to_string(),
            cgst: "2.5".to_string(),
            sgst: "2.5".to_string(),
            cess: String::new(),
        };

        // Same price increments, new price adds a price point
        for (tx, qty, price) in [("PO-1", "4", "450"), ("PO-2", "6", "450"), ("PO-3", "5", "470")] {
            record_purchase(
                &db,
                RecordPurchaseRequest {
                    transaction_id: tx.to_string(),
                    items: vec![line(qty, price)],
                },
            )
            .await
            .unwrap();
        }
        db
    }

    #[tokio::test]
    async fn test_listings() {
        let db = stocked().await;

        let products = list_products(&db).await.unwrap();
        assert_eq!(products.len(), 2);
        assert_eq!(products[0].quantity, 10);
        assert_eq!(products[0].company_name, "ITC Limited");
        assert_eq!(products[1].quantity, 5);

        assert_eq!(list_product_names(&db).await.unwrap(), vec!["Atta 10kg"]);
        assert_eq!(list_purchases(&db).await.unwrap().len(), 3);

        let first = get_product(&db, products[0].id).await.unwrap();
        assert_eq!(first.unit_price().to_string(), "450.00");
        assert_eq!(get_product(&db, 999).await.unwrap_err().code, ErrorCode::NotFound);

        let summary = stock_summary(&db).await.unwrap();
        assert_eq!(summary.units_on_hand, 15);
        assert_eq!(summary.stock_value.to_string(), "6850.00");
    }

    #[tokio::test]
    async fn test_record_sale_oldest_first() {
        let db = stocked().await;

        let draws = record_sale(&db, "Atta 10kg", "12").await.unwrap();
        assert_eq!(draws.len(), 2);
        assert_eq!(draws[0].quantity, 10);
        assert_eq!(draws[1].quantity, 2);

        let err = record_sale(&db, "Atta 10kg", "4").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::InsufficientStock);

        let err = record_sale(&db, "Sugar", "1").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn test_search_bills_validates_query() {
        let db = stocked().await;
        assert!(search_bills(&db, "").await.unwrap().is_empty());
        assert_eq!(get_bill_record(&db, 1).await.unwrap_err().code, ErrorCode::NotFound);

        let long = "x".repeat(101);
        let err = search_bills(&db, &long).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }
}
