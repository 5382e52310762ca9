//! # Catalog Commands
//!
//! Companies, customers and GST slabs. Create and read only.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::ApiError;
use crate::state::DbState;
use stockbook_core::validation::{parse_rate, validate_company, validate_customer};
use stockbook_core::{Company, Customer, GstSlab, TaxRate};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyInput {
    pub name: String,
    #[serde(default)]
    pub gst_number: Option<String>,
    #[serde(default)]
    pub contact: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerInput {
    pub name: String,
    pub contact: String,
    pub address: String,
    #[serde(default)]
    pub gst_number: Option<String>,
}

/// CGST/SGST halves of a GST slab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GstSplit {
    pub cgst: TaxRate,
    pub sgst: TaxRate,
}

/// Adds a company. A GST number, if given, must be a 15-character GSTIN.
pub async fn add_company(db: &DbState, input: CompanyInput) -> Result<Company, ApiError> {
    debug!(name = %input.name, "add_company command");

    let company = validate_company(
        &input.name,
        input.gst_number.as_deref(),
        input.contact.as_deref(),
    )?;
    let created = db.inner().companies().insert(&company).await?;

    info!(id = created.id, name = %created.name, "Company added");
    Ok(created)
}

/// Adds a customer. Name, contact and address are required.
pub async fn add_customer(db: &DbState, input: CustomerInput) -> Result<Customer, ApiError> {
    debug!(name = %input.name, "add_customer command");

    let customer = validate_customer(
        &input.name,
        &input.contact,
        &input.address,
        input.gst_number.as_deref(),
    )?;
    let created = db.inner().customers().insert(&customer).await?;

    info!(id = created.id, name = %created.name, "Customer added");
    Ok(created)
}

/// Adds a GST slab from a percentage such as `"18"` or `"0.25"`.
pub async fn add_gst_slab(db: &DbState, rate: &str) -> Result<GstSlab, ApiError> {
    debug!(rate, "add_gst_slab command");

    let rate = parse_rate("GST rate", rate)?;
    let slab = db.inner().gst_slabs().insert(rate).await?;

    info!(id = slab.id, rate = %rate, "GST slab added");
    Ok(slab)
}

pub async fn list_companies(db: &DbState) -> Result<Vec<Company>, ApiError> {
    Ok(db.inner().companies().list().await?)
}

pub async fn list_company_names(db: &DbState) -> Result<Vec<String>, ApiError> {
    Ok(db.inner().companies().names().await?)
}

pub async fn list_customers(db: &DbState) -> Result<Vec<Customer>, ApiError> {
    Ok(db.inner().customers().list().await?)
}

pub async fn list_customer_names(db: &DbState) -> Result<Vec<String>, ApiError> {
    Ok(db.inner().customers().names().await?)
}

/// Address of the first customer with this exact name, if any.
pub async fn customer_address(db: &DbState, name: &str) -> Result<Option<String>, ApiError> {
    Ok(db.inner().customers().address_of(name.trim()).await?)
}

pub async fn list_gst_slabs(db: &DbState) -> Result<Vec<GstSlab>, ApiError> {
    Ok(db.inner().gst_slabs().list().await?)
}

/// Splits a slab percentage into CGST and SGST, e.g. `"18"` → 9 / 9.
pub fn split_gst_slab(rate: &str) -> Result<GstSplit, ApiError> {
    let (cgst, sgst) = parse_rate("GST rate", rate)?.split_gst();
    Ok(GstSplit { cgst, sgst })
}
