//! # Invoice Sequencer
//!
//! Persists the per-year invoice counter in `settings` and applies the
//! numbering rule from [`stockbook_core::invoice`].
//!
//! ## Allocation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  BEGIN                                                                  │
//! │    INSERT OR IGNORE settings (year, 0)     ← seed a missing year       │
//! │    SELECT last_invoice_number              ← 41                        │
//! │    next_invoice_number(41, today)          ← 42 (or 1 on April 1st)    │
//! │    UPDATE settings SET last = 42                                       │
//! │  COMMIT                                                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Bill finalization calls [`allocate`] on its own transaction so that a
//! failed bill does not consume a number.

use chrono::NaiveDate;
use sqlx::{SqliteConnection, SqlitePool};
use tracing::{debug, info};

use crate::error::DbResult;
use stockbook_core::invoice::{counter_year, next_invoice_number};
use stockbook_core::InvoiceNumber;

/// Per-year invoice counter.
#[derive(Debug, Clone)]
pub struct InvoiceSequencer {
    pool: SqlitePool,
}

impl InvoiceSequencer {
    pub fn new(pool: SqlitePool) -> Self {
        InvoiceSequencer { pool }
    }

    /// Inserts `(year, 0)` if the year has no counter yet.
    pub async fn ensure_year_seeded(&self, year: i32) -> DbResult<()> {
        let result = sqlx::query(
            "INSERT OR IGNORE INTO settings (year, last_invoice_number) VALUES (?1, 0)",
        )
        .bind(year)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() > 0 {
            info!(year, "Seeded invoice counter");
        }
        Ok(())
    }

    /// Last number issued for `year`, if the year has a counter.
    pub async fn last_number(&self, year: i32) -> DbResult<Option<i64>> {
        let last: Option<i64> =
            sqlx::query_scalar("SELECT last_invoice_number FROM settings WHERE year = ?1")
                .bind(year)
                .fetch_optional(&self.pool)
                .await?;

        Ok(last)
    }

    /// Allocates and persists the next invoice number for `today`.
    pub async fn next_invoice_number(&self, today: NaiveDate) -> DbResult<InvoiceNumber> {
        let mut tx = self.pool.begin().await?;
        let invoice = allocate(&mut *tx, today).await?;
        tx.commit().await?;

        Ok(invoice)
    }
}

/// Allocates the next number on an open connection or transaction.
pub(crate) async fn allocate(conn: &mut SqliteConnection, today: NaiveDate) -> DbResult<InvoiceNumber> {
    let year = counter_year(today);

    sqlx::query("INSERT OR IGNORE INTO settings (year, last_invoice_number) VALUES (?1, 0)")
        .bind(year)
        .execute(&mut *conn)
        .await?;

    let last: i64 = sqlx::query_scalar("SELECT last_invoice_number FROM settings WHERE year = ?1")
        .bind(year)
        .fetch_one(&mut *conn)
        .await?;

    let number = next_invoice_number(last, today);

    sqlx::query("UPDATE settings SET last_invoice_number = ?2 WHERE year = ?1")
        .bind(year)
        .bind(number)
        .execute(&mut *conn)
        .await?;

    debug!(year, last, number, "Allocated invoice number");
    Ok(InvoiceNumber { year, number })
}

// =============================================================================
// Unit Tests
// =============================================================================
