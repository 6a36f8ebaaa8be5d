//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  A rental summary multiplies and sums rates several times:             │
//! │    $39.99/mo × 2 chairs × 2 months + $199.00 delivery                  │
//! │  Every float step can drift a fraction of a cent.                      │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    3999 × 2 × 2 + 19900 = 35896 cents, exactly                         │
//! │    Nothing is rounded until the UI formats the number                  │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use rental_core::money::Money;
//!
//! // Create from cents (preferred)
//! let rate = Money::from_cents(4500); // $45.00
//!
//! // Arithmetic operations
//! let two_chairs = rate.times(2);                       // $90.00
//! let with_fee = two_chairs + Money::from_dollars(199); // $289.00
//! assert_eq!(with_fee.cents(), 28_900);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents for USD).
///
/// ## Design Decisions
/// - **i64 (signed)**: matches the storage column type; the domain itself
///   never produces negative amounts
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Serialized as a bare integer**: `{"monthlyRate": 4500}`
///
/// ## Where Money is Used
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                                                                         │
/// │  CatalogItem.monthly_rate ──► × quantity ──► line_monthly_total         │
/// │                                                   │                     │
/// │                                  Σ lines ◄────────┘                     │
/// │                                     │                                   │
/// │                               monthly_total                             │
/// │                                     │                                   │
/// │                  × rental_period_months + delivery_fee                  │
/// │                                     │                                   │
/// │                                  subtotal                               │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize, TS,
)]
#[serde(transparent)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use rental_core::money::Money;
    ///
    /// let price = Money::from_cents(98_000); // Represents $980.00
    /// assert_eq!(price.cents(), 98_000);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from whole dollars.
    ///
    /// ## Example
    /// ```rust
    /// use rental_core::money::Money;
    ///
    /// assert_eq!(Money::from_dollars(199).cents(), 19_900);
    /// ```
    #[inline]
    pub const fn from_dollars(dollars: i64) -> Self {
        Money(dollars * 100)
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (dollars) portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit (cents) portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies money by a count (quantity or number of months).
    ///
    /// Saturates instead of overflowing, so a runaway quantity yields
    /// `i64::MAX` cents rather than a panic or a wrapped negative total.
    ///
    /// ## Example
    /// ```rust
    /// use rental_core::money::Money;
    ///
    /// let monthly_rate = Money::from_dollars(39);
    /// let line_total = monthly_rate.times(2);
    /// assert_eq!(line_total, Money::from_dollars(78));
    /// ```
    #[inline]
    pub const fn times(&self, count: u32) -> Self {
        Money(self.0.saturating_mul(count as i64))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money in a human-readable format.
///
/// ## Note
/// This is for logs and diagnostics. The presentation layer formats the
/// raw cents itself to handle localization properly.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}${}.{:02}",
            sign,
            self.dollars().abs(),
            self.cents_part()
        )
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

/// Lets line totals be folded with `.sum()`.
impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
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
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(money.dollars(), 10);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_from_dollars() {
        assert_eq!(Money::from_dollars(45).cents(), 4500);
        assert_eq!(Money::from_dollars(0), Money::zero());
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1099)), "$10.99");
        assert_eq!(format!("{}", Money::from_dollars(557)), "$557.00");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-$5.50");
        assert_eq!(format!("{}", Money::zero()), "$0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!(a.times(3).cents(), 3000);
        assert_eq!(a.times(0), Money::zero());

        let mut total = Money::zero();
        total += a;
        total += b;
        assert_eq!(total.cents(), 1500);
    }

    #[test]
    fn test_sum() {
        let lines = [
            Money::from_dollars(45),
            Money::from_dollars(78),
            Money::from_dollars(56),
        ];
        let total: Money = lines.iter().sum();
        assert_eq!(total, Money::from_dollars(179));

        let empty: Money = Vec::<Money>::new().into_iter().sum();
        assert!(empty.is_zero());
    }

    #[test]
    fn test_times_saturates() {
        let huge = Money::from_cents(i64::MAX / 2);
        assert_eq!(huge.times(4).cents(), i64::MAX);
        assert!(!huge.times(4).is_negative());
    }

    #[test]
    fn test_serializes_as_bare_cents() {
        let json = serde_json::to_string(&Money::from_cents(19_900)).unwrap();
        assert_eq!(json, "19900");

        let back: Money = serde_json::from_str("4500").unwrap();
        assert_eq!(back, Money::from_dollars(45));
    }
}
