//! # Database State
//!
//! Wraps the `Database` handle for use in commands. The inner `SqlitePool`
//! is thread-safe, so no extra locking.

use stockbook_db::Database;

/// Wrapper around `Database` for command state.
#[derive(Debug, Clone)]
pub struct DbState {
    db: Database,
}

impl DbState {
    pub fn new(db: Database) -> Self {
        DbState { db }
    }

    /// Returns a reference to the inner Database.
    ///
    /// ```rust,ignore
    /// let names = db_state.inner().products().names().await?;
    /// ```
    pub fn inner(&self) -> &Database {
        &self.db
    }
}
