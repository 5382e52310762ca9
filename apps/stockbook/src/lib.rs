//! # Stockbook App Library
//!
//! Handler layer for the shop: state, commands, error mapping, bill export
//! and process startup. The presentation layer links against this crate and
//! calls [`commands`] with the state objects from [`App`].
//!
//! ## Module Organization
//! ```text
//! stockbook_app/
//! ├── lib.rs          ◄─── You are here (startup)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── db.rs       ◄─── Database state wrapper
//! │   ├── bill.rs     ◄─── In-progress bill
//! │   └── config.rs   ◄─── Paths, shop name, currency
//! ├── commands/
//! │   ├── catalog.rs  ◄─── Companies, customers, GST slabs
//! │   ├── purchase.rs ◄─── Purchase batches
//! │   ├── bill.rs     ◄─── Bill composition and finalization
//! │   └── stock.rs    ◄─── Listings and searches
//! ├── export.rs       ◄─── bill_<n>.txt writer
//! └── error.rs        ◄─── API error type for commands
//! ```

pub mod commands;
pub mod error;
pub mod export;
pub mod state;

use chrono::{Datelike, Local};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use error::ApiError;
use state::{BillState, ConfigState, DbState};
use stockbook_db::{Database, DbConfig};

/// Everything the commands need, created once at startup.
#[derive(Debug, Clone)]
pub struct App {
    pub db: DbState,
    pub bill: BillState,
    pub config: ConfigState,
}

impl App {
    /// Opens (or creates) the store and seeds this year's invoice counter.
    ///
    /// ## Startup Sequence
    /// ```text
    /// 1. Create the data directory if needed
    /// 2. Connect (WAL, foreign keys) and run pending migrations
    /// 3. INSERT OR IGNORE settings(year, 0) for the current year
    /// 4. Empty bill
    /// ```
    pub async fn open(config: ConfigState) -> Result<Self, ApiError> {
        if let Some(dir) = config.db_path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir).map_err(|e| {
                ApiError::internal(format!("Could not create {}: {}", dir.display(), e))
            })?;
        }

        let db = Database::new(DbConfig::new(&config.db_path)).await?;
        info!(db_path = %config.db_path.display(), "Database connected and migrations applied");

        App::with_database(db, config).await
    }

    /// Wraps an already open database.
    pub async fn with_database(db: Database, config: ConfigState) -> Result<Self, ApiError> {
        db.invoices().ensure_year_seeded(Local::now().year()).await?;

        Ok(App {
            db: DbState::new(db),
            bill: BillState::new(),
            config,
        })
    }
}

/// Process entry: open the store and print a stock summary.
pub async fn run() -> Result<(), ApiError> {
    init_tracing();
    info!("Starting Stockbook");

    let config = ConfigState::from_env();
    debug!(?config, "Configuration loaded");

    let app = App::open(config).await?;
    let summary = commands::stock::stock_summary(&app.db).await?;

    debug!(
        summary = %serde_json::to_string(&summary).unwrap_or_default(),
        "Stock summary"
    );

    println!("Stockbook");
    println!("  Store:          {}", app.config.db_path.display());
    println!("  Bill exports:   {}", app.config.export_dir.display());
    println!("  Products:       {}", summary.product_names);
    println!("  Price points:   {}", summary.price_points);
    println!("  Units on hand:  {}", summary.units_on_hand);
    println!("  Stock value:    {}", app.config.format_currency(summary.stock_value));

    app.db.inner().close().await;
    Ok(())
}

/// Initializes the tracing subscriber.
///
/// Default filter `info,stockbook=debug,sqlx=warn`; `RUST_LOG` overrides.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,stockbook=debug,sqlx=warn"));

    // A second init (tests, embedding) keeps the first subscriber
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
