//! # Money Module
//!
//! Provides the `Money` type used for product cost and net price.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │    0.1 + 0.2 = 0.30000000000000004                                      │
//! │                                                                         │
//! │  A cost of 10.10 compared against a net price of 10.10 must be         │
//! │  EQUAL, or the "net price must exceed cost" rule misfires.             │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    cost 1010 cents vs net price 1010 cents → equal, rejected           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use prodman_core::money::Money;
//!
//! let cost = Money::from_cents(1000);           // 10.00
//! let net = cost.apply_tax_percentage(23);      // 12.30
//! assert_eq!(net.cents(), 1230);
//! assert!(net > cost);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents).
///
/// ## Where Money is Used
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  SalesProduct.price ──► Price { cost, net_price, tax_percentage }      │
/// │                                   │                                     │
/// │                                   └──► gross_price() for browsing      │
/// │                                                                         │
/// │  DTOs carry costCents / netPriceCents, SQLite stores *_cents columns   │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ## Example
    /// ```rust
    /// use prodman_core::money::Money;
    ///
    /// let price = Money::from_cents(1099);
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Adds `percentage` percent on top of this amount.
    ///
    /// ## Rounding
    /// Integer math with half-up rounding: `(amount * (100 + p) + 50) / 100`.
    ///
    /// ## Example
    /// ```rust
    /// use prodman_core::money::Money;
    ///
    /// // 9.99 * 1.08 = 10.7892 → 10.79
    /// assert_eq!(Money::from_cents(999).apply_tax_percentage(8).cents(), 1079);
    /// ```
    pub fn apply_tax_percentage(&self, percentage: i32) -> Money {
        let scaled = self.0 * (100 + i64::from(percentage));
        Money((scaled + 50).div_euclid(100))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

/// Displays money as a decimal amount: "10.99", "-5.50".
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.abs();
        write!(f, "{}{}.{:02}", sign, abs / 100, abs % 100)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let m = Money::from_cents(1099);
        assert_eq!(m.cents(), 1099);
        assert!(m.is_positive());
        assert!(!Money::zero().is_positive());
    }

    #[test]
    fn test_apply_tax_percentage() {
        // 10.00 + 23% = 12.30
        assert_eq!(Money::from_cents(1000).apply_tax_percentage(23).cents(), 1230);
        // 0% leaves the amount alone
        assert_eq!(Money::from_cents(1000).apply_tax_percentage(0).cents(), 1000);
        // 0.05 * 1.10 = 0.055 → 0.06 (half up)
        assert_eq!(Money::from_cents(5).apply_tax_percentage(10).cents(), 6);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(1099).to_string(), "10.99");
        assert_eq!(Money::from_cents(5).to_string(), "0.05");
        assert_eq!(Money::from_cents(-550).to_string(), "-5.50");
    }

    #[test]
    fn test_ordering() {
        assert!(Money::from_cents(1000) > Money::from_cents(250));
        assert_eq!(Money::default(), Money::zero());
    }

    #[test]
    fn test_serialization() {
        let m = Money::from_cents(1099);
        let json = serde_json::to_string(&m).unwrap();
        assert_eq!(json, "1099");
        let back: Money = serde_json::from_str(&json).unwrap();
        assert_eq!(back, m);
    }
}
