//! # Stockbook Entry Point
//!
//! Opens the store, applies migrations, seeds the current year's invoice
//! counter and prints a stock summary. The setup lives in `lib.rs`.
//!
//! ## Environment
//! - `STOCKBOOK_DB_PATH`, `STOCKBOOK_EXPORT_DIR`, `STOCKBOOK_SHOP_NAME`,
//!   `STOCKBOOK_CURRENCY_SYMBOL`
//! - `RUST_LOG` for log filtering

use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    match stockbook_app::run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(code = ?e.code, "{}", e.message);
            eprintln!("stockbook: {}", e);
            ExitCode::FAILURE
        }
    }
}
