//! # Catalog Repositories
//!
//! Companies, customers and GST slabs. Create and read only: catalog rows
//! are never edited or deleted once written.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use stockbook_core::{Company, Customer, GstSlab, NewCompany, NewCustomer, TaxRate};

// =============================================================================
// Companies
// =============================================================================

/// Repository for supplier companies.
#[derive(Debug, Clone)]
pub struct CompanyRepository {
    pool: SqlitePool,
}

impl CompanyRepository {
    pub fn new(pool: SqlitePool) -> Self {
        CompanyRepository { pool }
    }

    /// Inserts a validated company and returns the stored row.
    pub async fn insert(&self, company: &NewCompany) -> DbResult<Company> {
        debug!(name = %company.name, "Inserting company");

        let result = sqlx::query(
            r#"
            INSERT INTO companies (name, gst_number, contact)
            VALUES (?1, ?2, ?3)
            "#,
        )
        .bind(&company.name)
        .bind(&company.gst_number)
        .bind(&company.contact)
        .execute(&self.pool)
        .await?;

        Ok(Company {
            id: result.last_insert_rowid(),
            name: company.name.clone(),
            gst_number: company.gst_number.clone(),
            contact: company.contact.clone(),
        })
    }

    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Company>> {
        let company = sqlx::query_as::<_, Company>(
            "SELECT id, name, gst_number, contact FROM companies WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(company)
    }

    /// All companies in insertion order.
    pub async fn list(&self) -> DbResult<Vec<Company>> {
        let companies = sqlx::query_as::<_, Company>(
            "SELECT id, name, gst_number, contact FROM companies ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(count = companies.len(), "Listed companies");
        Ok(companies)
    }

    /// Company names, for the purchase form's picker.
    pub async fn names(&self) -> DbResult<Vec<String>> {
        let names: Vec<String> = sqlx::query_scalar("SELECT name FROM companies ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        Ok(names)
    }
}

// =============================================================================
// Customers
// =============================================================================

/// Repository for customers.
#[derive(Debug, Clone)]
pub struct CustomerRepository {
    pool: SqlitePool,
}

impl CustomerRepository {
    pub fn new(pool: SqlitePool) -> Self {
        CustomerRepository { pool }
    }

    /// Inserts a validated customer and returns the stored row.
    pub async fn insert(&self, customer: &NewCustomer) -> DbResult<Customer> {
        debug!(name = %customer.name, "Inserting customer");

        let result = sqlx::query(
            r#"
            INSERT INTO customers (name, address, gst_number, contact)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(&customer.name)
        .bind(&customer.address)
        .bind(&customer.gst_number)
        .bind(&customer.contact)
        .execute(&self.pool)
        .await?;

        Ok(Customer {
            id: result.last_insert_rowid(),
            name: customer.name.clone(),
            address: customer.address.clone(),
            gst_number: customer.gst_number.clone(),
            contact: customer.contact.clone(),
        })
    }

    pub async fn list(&self) -> DbResult<Vec<Customer>> {
        let customers = sqlx::query_as::<_, Customer>(
            "SELECT id, name, address, gst_number, contact FROM customers ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(customers)
    }

    pub async fn names(&self) -> DbResult<Vec<String>> {
        let names: Vec<String> = sqlx::query_scalar("SELECT name FROM customers ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        Ok(names)
    }

    /// Address of the first customer with this exact name.
    pub async fn address_of(&self, name: &str) -> DbResult<Option<String>> {
        let address: Option<String> = sqlx::query_scalar(
            "SELECT address FROM customers WHERE name = ?1 ORDER BY id LIMIT 1",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(address)
    }
}

// =============================================================================
// GST Slabs
// =============================================================================

/// Repository for selectable GST rates.
#[derive(Debug, Clone)]
pub struct GstSlabRepository {
    pool: SqlitePool,
}

impl GstSlabRepository {
    pub fn new(pool: SqlitePool) -> Self {
        GstSlabRepository { pool }
    }

    /// Adds a slab. The same rate may be added more than once.
    pub async fn insert(&self, rate: TaxRate) -> DbResult<GstSlab> {
        debug!(rate_bps = rate.bps(), "Inserting GST slab");

        let result = sqlx::query("INSERT INTO gst_slabs (rate_bps) VALUES (?1)")
            .bind(rate.bps())
            .execute(&self.pool)
            .await?;

        Ok(GstSlab {
            id: result.last_insert_rowid(),
            rate_bps: rate.bps(),
        })
    }

    pub async fn list(&self) -> DbResult<Vec<GstSlab>> {
        let slabs = sqlx::query_as::<_, GstSlab>("SELECT id, rate_bps FROM gst_slabs ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        Ok(slabs)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use crate::{Database, DbConfig};
    use stockbook_core::{NewCompany, NewCustomer, TaxRate};

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn test_company_insert_and_list() {
        let db = test_db().await;
        let repo = db.companies();

        let hul = repo
            .insert(&NewCompany {
                name: "Hindustan Unilever".to_string(),
                gst_number: Some("27AAACH1004N1Z6".to_string()),
                contact: None,
            })
            .await
            .unwrap();
        repo.insert(&NewCompany {
            name: "ITC".to_string(),
            gst_number: None,
            contact: Some("022 1234".to_string()),
        })
        .await
        .unwrap();

        let all = repo.list().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0], hul);
        assert_eq!(repo.names().await.unwrap(), vec!["Hindustan Unilever", "ITC"]);
        assert_eq!(repo.get_by_id(hul.id).await.unwrap(), Some(hul));
        assert_eq!(repo.get_by_id(999).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_customer_address_lookup() {
        let db = test_db().await;
        let repo = db.customers();

        for (name, address) in [("Ravi Stores", "12 MG Road"), ("Ravi Stores", "9 Elm St")] {
            repo.insert(&NewCustomer {
                name: name.to_string(),
                address: address.to_string(),
                gst_number: None,
                contact: "98450 12345".to_string(),
            })
            .await
            .unwrap();
        }

        // First match wins
        assert_eq!(
            repo.address_of("Ravi Stores").await.unwrap().as_deref(),
            Some("12 MG Road")
        );
        assert_eq!(repo.address_of("Nobody").await.unwrap(), None);
        assert_eq!(repo.names().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_gst_slabs_allow_duplicates() {
        let db = test_db().await;
        let repo = db.gst_slabs();

        repo.insert(TaxRate::from_bps(1800)).await.unwrap();
        repo.insert(TaxRate::from_bps(1800)).await.unwrap();
        repo.insert(TaxRate::from_bps(500)).await.unwrap();

        let slabs = repo.list().await.unwrap();
        let rates: Vec<u32> = slabs.iter().map(|s| s.rate_bps).collect();
        assert_eq!(rates, vec![1800, 1800, 500]);
    }
}
