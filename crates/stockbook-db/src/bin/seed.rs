//! # Seed Data Generator
//!
//! Populates a database with demo companies, GST slabs, customers and an
//! opening stock purchase.
//!
//! ## Usage
//! ```bash
//! cargo run -p stockbook-db --bin seed
//!
//! # Specify database path
//! cargo run -p stockbook-db --bin seed -- --db ./data/stockbook.db
//! ```

use chrono::{Datelike, Local};
use std::env;
use stockbook_core::purchase::validate_batch;
use stockbook_core::validation::{parse_rate, validate_company, validate_customer};
use stockbook_core::PurchaseLineInput;
use stockbook_db::{Database, DbConfig};

/// (name, GSTIN, contact)
const COMPANIES: &[(&str, Option<&str>, Option<&str>)] = &[
    ("Hindustan Unilever", Some("27AAACH1004N1Z6"), Some("022 3983 0000")),
    ("ITC Limited", Some("19AAACI5950L1Z8"), None),
    ("KRBL Limited", None, Some("0120 406 0300")),
    ("Amul Dairy", None, None),
];

/// Percent, as typed into the slab form.
const GST_SLABS: &[&str] = &["0", "5", "12", "18", "28"];

/// (name, contact, address)
const CUSTOMERS: &[(&str, &str, &str)] = &[
    ("Ravi Stores", "98450 12345", "12 MG Road, Bengaluru"),
    ("Lakshmi Traders", "99000 54321", "4 Market Street, Mysuru"),
    ("Walk-in Customer", "-", "-"),
];

/// (company index, brand, product, qty, unit price, GST slab %)
const OPENING_STOCK: &[(usize, &str, &str, &str, &str, &str)] = &[
    (0, "Surf Excel", "Surf Excel 1kg", "40", "130", "18"),
    (0, "Lifebuoy", "Lifebuoy Soap 125g", "120", "32.50", "18"),
    (1, "Aashirvaad", "Aashirvaad Atta 10kg", "25", "450", "5"),
    (1, "Sunfeast", "Sunfeast Marie 250g", "60", "30", "18"),
    (2, "India Gate", "Basmati Rice 5kg", "30", "610", "5"),
    (3, "Amul", "Amul Ghee 1L", "24", "550", "12"),
    (3, "Amul", "Amul Butter 500g", "36", "275", "12"),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./stockbook_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Stockbook Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./stockbook_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Stockbook Seed Data Generator");
    println!("================================");
    println!("Database: {}", db_path);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let existing = db.products().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} price points", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    db.invoices().ensure_year_seeded(Local::now().year()).await?;

    let mut company_ids = Vec::with_capacity(COMPANIES.len());
    for (name, gstin, contact) in COMPANIES {
        let company = validate_company(name, *gstin, *contact)?;
        company_ids.push(db.companies().insert(&company).await?.id);
    }
    println!("✓ {} companies", company_ids.len());

    for rate in GST_SLABS {
        db.gst_slabs().insert(parse_rate("GST rate", rate)?).await?;
    }
    println!("✓ {} GST slabs", GST_SLABS.len());

    for (name, contact, address) in CUSTOMERS {
        let customer = validate_customer(name, contact, address, None)?;
        db.customers().insert(&customer).await?;
    }
    println!("✓ {} customers", CUSTOMERS.len());

    let lines: Vec<PurchaseLineInput> = OPENING_STOCK
        .iter()
        .map(|(company, brand, product, qty, price, slab)| {
            let (cgst, sgst) = parse_rate("GST rate", slab)
                .map(|r| r.split_gst())
                .unwrap_or_default();
            PurchaseLineInput {
                company_id: company_ids[*company],
                brand: brand.to_string(),
                product_name: product.to_string(),
                quantity: qty.to_string(),
                unit_price: price.to_string(),
                cgst: cgst.to_string(),
                sgst: sgst.to_string(),
                cess: String::new(),
            }
        })
        .collect();

    let batch = validate_batch("OPENING-STOCK", &lines)?;
    let receipt = db.ledger().record_purchase(&batch).await?;
    println!(
        "✓ Opening stock: {} products, value {}",
        receipt.inserted, receipt.stock_value
    );

    let summary = db.products().summary().await?;
    println!();
    println!("  Units on hand: {}", summary.units_on_hand);
    println!();
    println!("✓ Seed complete!");

    Ok(())
}
