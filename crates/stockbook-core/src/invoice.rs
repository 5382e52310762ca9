//! # Invoice Numbering
//!
//! The pure numbering rule. Persistence of the per-year counter lives in
//! stockbook-db (`InvoiceSequencer`), which calls into this module.
//!
//! ## Rule
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  counter key  = calendar year of `today`                                │
//! │  candidate    = last + 1                                                │
//! │  if today is exactly April 1st → 1 (fiscal year restart)               │
//! │                                                                         │
//! │  Mar 31: 41 → 42     Apr 1: 42 → 1     Apr 1 again: 1 → 1               │
//! │  Apr 2:  1 → 2                                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Only the exact day resets. A business that issues its first bill of
//! the fiscal year on April 2nd keeps counting from March.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

/// An allocated invoice number and the year counter it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct InvoiceNumber {
    pub year: i32,
    pub number: i64,
}

impl InvoiceNumber {
    /// Transaction id used for the audit rows of this invoice.
    pub fn label(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for InvoiceNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "INV-{}-{:04}", self.year, self.number)
    }
}

/// Year whose counter an invoice issued on `today` draws from.
#[inline]
pub fn counter_year(today: NaiveDate) -> i32 {
    today.year()
}

/// Returns `true` on the fiscal year restart day.
#[inline]
pub fn is_reset_day(today: NaiveDate) -> bool {
    today.month() == 4 && today.day() == 1
}

/// Computes the next invoice number from the stored `last` value.
///
/// ```rust
/// use chrono::NaiveDate;
/// use stockbook_core::invoice::next_invoice_number;
///
/// let mar_31 = NaiveDate::from_ymd_opt(2026, 3, 31).unwrap();
/// let apr_1 = NaiveDate::from_ymd_opt(2026, 4, 1).unwrap();
///
/// assert_eq!(next_invoice_number(41, mar_31), 42);
/// assert_eq!(next_invoice_number(42, apr_1), 1);
/// ```
pub fn next_invoice_number(last: i64, today: NaiveDate) -> i64 {
    if is_reset_day(today) {
        1
    } else {
        last.max(0) + 1
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_sequence_counts_up() {
        let today = date(2026, 10, 18);
        let mut last = 0;
        for expected in 1..=25 {
            last = next_invoice_number(last, today);
            assert_eq!(last, expected);
        }
    }

    #[test]
    fn test_april_first_resets() {
        assert_eq!(next_invoice_number(317, date(2026, 4, 1)), 1);
        assert_eq!(next_invoice_number(0, date(2026, 4, 1)), 1);
        // Repeated calls on the day keep returning 1
        assert_eq!(next_invoice_number(1, date(2026, 4, 1)), 1);
    }

    #[test]
    fn test_april_second_does_not_reset() {
        assert_eq!(next_invoice_number(317, date(2026, 4, 2)), 318);
        assert_eq!(next_invoice_number(317, date(2026, 3, 31)), 318);
    }

    #[test]
    fn test_counter_year_is_calendar_year() {
        assert_eq!(counter_year(date(2027, 1, 15)), 2027);
        assert_eq!(counter_year(date(2026, 12, 31)), 2026);
    }

    #[test]
    fn test_label() {
        let invoice = InvoiceNumber {
            year: 2026,
            number: 7,
        };
        assert_eq!(invoice.label(), "INV-2026-0007");
    }
}
