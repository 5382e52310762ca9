//! # Money Module
//!
//! Provides the `Money` type for handling rupee amounts safely.
//!
//! ## Why Integer Paise?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  With floats, 9% CGST on ₹0.10:                                        │
//! │    0.1 * 9 / 100 = 0.009000000000000001                                │
//! │                                                                         │
//! │  Summing many such lines drifts away from the printed total.           │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Paise                                            │
//! │    Every amount is a whole number of paise (1/100 rupee).              │
//! │    Tax is rounded to the paisa once, per unit, at a known point.       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use stockbook_core::money::Money;
//!
//! let price = Money::from_paise(11_800); // ₹118.00
//! let doubled = price * 2;                // ₹236.00
//! assert_eq!(doubled.to_string(), "236.00");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

use crate::types::TaxRate;

// =============================================================================
// Money Type
// =============================================================================

/// A rupee amount in paise (the smallest currency unit).
///
/// ## Where Money is Used
/// ```text
/// Purchase form "12.50" ──► parse_money ──► Money(1250) ──► products.unit_price_paise
///
/// Bill line selling price ──► calculate_tax(CGST) ──┐
///                          └─► calculate_tax(SGST) ──┼──► line total ──► bill total
///                                                    │
///                              running CGST/SGST ◄───┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from paise.
    ///
    /// ```rust
    /// use stockbook_core::money::Money;
    ///
    /// let price = Money::from_paise(1099); // ₹10.99
    /// assert_eq!(price.paise(), 1099);
    /// ```
    #[inline]
    pub const fn from_paise(paise: i64) -> Self {
        Money(paise)
    }

    /// Returns the value in paise.
    #[inline]
    pub const fn paise(&self) -> i64 {
        self.0
    }

    /// Returns the whole-rupee portion.
    #[inline]
    pub const fn rupees(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the paise portion (always 0-99).
    #[inline]
    pub const fn paise_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Calculates tax at `rate` on this amount, rounded half-up to the paisa.
    ///
    /// ## Implementation
    /// Integer math: `(amount * bps + 5000) / 10000`. The +5000 is half of
    /// the 10000 divisor, which rounds .5 paise up.
    ///
    /// ```rust
    /// use stockbook_core::money::Money;
    /// use stockbook_core::types::TaxRate;
    ///
    /// let price = Money::from_paise(10_000);   // ₹100.00
    /// let cgst = TaxRate::from_bps(900);       // 9%
    /// assert_eq!(price.calculate_tax(cgst).paise(), 900); // ₹9.00
    ///
    /// // ₹0.25 at 2.5% = 0.625 paise → 1 paisa
    /// let cheap = Money::from_paise(25);
    /// assert_eq!(cheap.calculate_tax(TaxRate::from_bps(250)).paise(), 1);
    /// ```
    pub fn calculate_tax(&self, rate: TaxRate) -> Money {
        // i128 keeps large purchase totals from overflowing
        let tax_paise = (self.0 as i128 * rate.bps() as i128 + 5000) / 10000;
        Money::from_paise(tax_paise as i64)
    }

    /// Multiplies money by a quantity.
    ///
    /// Prices are capped at [`MAX_UNIT_PRICE_PAISE`](crate::MAX_UNIT_PRICE_PAISE)
    /// and quantities at [`MAX_LINE_QUANTITY`](crate::MAX_LINE_QUANTITY), so
    /// validated lines stay well inside `i64`.
    ///
    /// ```rust
    /// use stockbook_core::money::Money;
    ///
    /// let unit = Money::from_paise(11_800);
    /// assert_eq!(unit.multiply_quantity(2).paise(), 23_600);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Plain decimal rendering ("236.00"). The currency symbol is a
/// configuration concern and is added by the handler layer.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.rupees().abs(), self.paise_part())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + *m)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_paise() {
        let money = Money::from_paise(1099);
        assert_eq!(money.paise(), 1099);
        assert_eq!(money.rupees(), 10);
        assert_eq!(money.paise_part(), 99);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_paise(23_600).to_string(), "236.00");
        assert_eq!(Money::from_paise(5).to_string(), "0.05");
        assert_eq!(Money::from_paise(-550).to_string(), "-5.50");
        assert_eq!(Money::zero().to_string(), "0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_paise(1000);
        let b = Money::from_paise(500);

        assert_eq!((a + b).paise(), 1500);
        assert_eq!((a - b).paise(), 500);
        assert_eq!((a * 3).paise(), 3000);
    }

    #[test]
    fn test_sum() {
        let lines = [Money::from_paise(23_600), Money::from_paise(11_800)];
        let total: Money = lines.iter().sum();
        assert_eq!(total.paise(), 35_400);
    }

    #[test]
    fn test_gst_at_nine_percent() {
        let price = Money::from_paise(10_000);
        assert_eq!(price.calculate_tax(TaxRate::from_bps(900)).paise(), 900);
    }

    #[test]
    fn test_tax_rounds_half_up() {
        // ₹10.05 at 5% = 50.25 paise → 50
        assert_eq!(
            Money::from_paise(1005).calculate_tax(TaxRate::from_bps(500)).paise(),
            50
        );
        // ₹10.10 at 2.5% = 25.25 paise → 25; ₹10.20 at 2.5% = 25.5 → 26
        assert_eq!(
            Money::from_paise(1010).calculate_tax(TaxRate::from_bps(250)).paise(),
            25
        );
        assert_eq!(
            Money::from_paise(1020).calculate_tax(TaxRate::from_bps(250)).paise(),
            26
        );
    }

    #[test]
    fn test_zero_rate_is_free() {
        let price = Money::from_paise(99_999);
        assert!(price.calculate_tax(TaxRate::zero()).is_zero());
    }
}
