//! # Bill State
//!
//! Holds the bill currently being composed.
//!
//! ## Bill Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Command                   Composer Change                              │
//! │  ───────                   ───────────────                              │
//! │  add_line_item() ────────► lines.push(line), totals += line            │
//! │  remove_line_item() ─────► lines.remove(i), totals recomputed          │
//! │  clear_bill() ───────────► lines.clear()                               │
//! │  get_bill() ─────────────► (read only)                                 │
//! │  finalize_bill() ────────► snapshot, commit, then clear on success     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The lock is only held inside the closures below; commands read what
//! they need, release it, and only then await the store.

use std::sync::{Arc, Mutex};

use stockbook_core::BillComposer;

/// Shared in-progress bill.
#[derive(Debug, Clone, Default)]
pub struct BillState {
    bill: Arc<Mutex<BillComposer>>,
}

impl BillState {
    /// Creates a new empty bill state.
    pub fn new() -> Self {
        BillState::default()
    }

    /// Executes a function with read access to the bill.
    pub fn with_bill<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&BillComposer) -> R,
    {
        let bill = self.bill.lock().expect("Bill mutex poisoned");
        f(&bill)
    }

    /// Executes a function with write access to the bill.
    ///
    /// ```rust,ignore
    /// bill_state.with_bill_mut(|bill| bill.add_line(&stock, 2, price))?;
    /// ```
    pub fn with_bill_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut BillComposer) -> R,
    {
        let mut bill = self.bill.lock().expect("Bill mutex poisoned");
        f(&mut bill)
    }
}
