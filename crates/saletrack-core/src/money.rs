//! # Money Module
//!
//! `Money` and `Quantity`: thin wrappers over `rust_decimal::Decimal`.
//!
//! ## Why Decimal, Not Cents?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  THE CENTS PROBLEM (for this register)                                 │
//! │    Quantities can be fractional (0.75 kg of apples at 0.50):           │
//! │    37.5 cents is not an integer number of cents.                       │
//! │                                                                         │
//! │  OUR SOLUTION: Exact decimals                                          │
//! │    0.75 × 0.50 = 0.3750   (stored as-is, never re-derived)             │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use rust_decimal::Decimal;
//! use saletrack_core::money::{Money, Quantity};
//!
//! let price = Money::from_cents(50);                   // 0.50
//! let qty = Quantity::new(Decimal::new(75, 2));        // 0.75
//! let total = price.checked_mul(qty).unwrap();
//!
//! assert_eq!(total.amount(), Decimal::new(375, 3));    // 0.375
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};
use std::str::FromStr;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary amount in the store's currency.
///
/// ## Where Money is Used
/// ```text
/// Product.unit_price ──► NewSale.unit_price (captured copy)
///                              │
///                              ▼
///              unit_price × quantity ──► NewSale.total
///                              │
///                              ▼
///         SQLite TEXT "1.50"  and  MySQL DECIMAL(18,4)
/// ```
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    /// Wraps a decimal amount.
    #[inline]
    pub const fn new(amount: Decimal) -> Self {
        Money(amount)
    }

    /// Creates a Money value from a whole number of cents.
    ///
    /// ## Example
    /// ```rust
    /// use saletrack_core::money::Money;
    ///
    /// let price = Money::from_cents(120);
    /// assert_eq!(price.to_string(), "$1.20");
    /// ```
    pub fn from_cents(cents: i64) -> Self {
        Money(Decimal::new(cents, 2))
    }

    /// Returns the underlying decimal.
    #[inline]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(Decimal::ZERO)
    }

    /// Checks if the value is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Checks if the value is below zero.
    #[inline]
    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// Multiplies a unit price by a quantity.
    ///
    /// Returns `None` when the product does not fit in a `Decimal`
    /// instead of panicking like `Decimal`'s `Mul` does.
    ///
    /// ## Example
    /// ```rust
    /// use saletrack_core::money::{Money, Quantity};
    ///
    /// let line_total = Money::from_cents(50).checked_mul(Quantity::whole(3));
    /// assert_eq!(line_total, Some(Money::from_cents(150)));
    /// ```
    pub fn checked_mul(&self, quantity: Quantity) -> Option<Money> {
        self.0.checked_mul(quantity.value()).map(Money)
    }
}

/// Display shows at least two decimal places and keeps any extra precision.
///
/// `$1.50`, `$0.375`, `-$5.00`
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut amount = self.0.abs().normalize();
        if amount.scale() < 2 {
            amount.rescale(2);
        }
        let sign = if self.is_negative() { "-" } else { "" };
        write!(f, "{}${}", sign, amount)
    }
}

/// Parses the canonical decimal string (no currency symbol).
impl FromStr for Money {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decimal::from_str(s.trim()).map(Money)
    }
}

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self {
        Money(amount)
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

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Quantity Type
// =============================================================================

/// How many units (or kilograms, litres...) were sold.
///
/// Whole numbers unless the operator explicitly allowed decimals
/// (see [`crate::QuantityMode`]).
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Quantity(Decimal);

impl Quantity {
    /// Wraps a decimal quantity.
    #[inline]
    pub const fn new(value: Decimal) -> Self {
        Quantity(value)
    }

    /// Creates a whole-unit quantity.
    pub fn whole(units: i64) -> Self {
        Quantity(Decimal::from(units))
    }

    /// Returns the underlying decimal.
    #[inline]
    pub const fn value(&self) -> Decimal {
        self.0
    }

    /// Zero quantity (only produced when a stored row is missing its value).
    #[inline]
    pub const fn zero() -> Self {
        Quantity(Decimal::ZERO)
    }

    /// True when the quantity is strictly positive.
    #[inline]
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// True when the quantity has no fractional part.
    #[inline]
    pub fn is_whole(&self) -> bool {
        self.0.fract().is_zero()
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.normalize())
    }
}

impl FromStr for Quantity {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decimal::from_str(s.trim()).map(Quantity)
    }
}

impl From<Decimal> for Quantity {
    fn from(value: Decimal) -> Self {
        Quantity(value)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.amount(), dec!(10.99));
        assert_eq!(Money::from_cents(50), Money::new(dec!(0.5)));
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(1099).to_string(), "$10.99");
        assert_eq!(Money::from_cents(500).to_string(), "$5.00");
        assert_eq!(Money::from_cents(-550).to_string(), "-$5.50");
        assert_eq!(Money::zero().to_string(), "$0.00");
        assert_eq!(Money::new(dec!(0.375)).to_string(), "$0.375");
        assert_eq!(Money::new(dec!(2)).to_string(), "$2.00");
    }

    #[test]
    fn test_whole_quantity_total_is_exact() {
        let total = Money::from_cents(50).checked_mul(Quantity::whole(3)).unwrap();
        assert_eq!(total.amount(), dec!(1.50));
        assert_eq!(total.to_string(), "$1.50");
    }

    #[test]
    fn test_decimal_quantity_has_no_float_drift() {
        // 0.1 × 3 in f64 is 0.30000000000000004
        let total = Money::new(dec!(0.1)).checked_mul(Quantity::new(dec!(3))).unwrap();
        assert_eq!(total.amount(), dec!(0.3));

        let total = Money::from_cents(120).checked_mul(Quantity::new(dec!(0.333))).unwrap();
        assert_eq!(total.amount(), dec!(0.3996));
    }

    #[test]
    fn test_checked_mul_overflow_is_none() {
        let huge = Money::new(Decimal::MAX);
        assert!(huge.checked_mul(Quantity::whole(2)).is_none());
    }

    #[test]
    fn test_parse_round_trips_storage_format() {
        let money: Money = "1.20".parse().unwrap();
        assert_eq!(money, Money::from_cents(120));
        assert_eq!(money.amount().to_string(), "1.20");
        assert!("abc".parse::<Money>().is_err());
    }

    #[test]
    fn test_sum() {
        let total: Money = [Money::from_cents(50), Money::from_cents(30), Money::from_cents(120)]
            .into_iter()
            .sum();
        assert_eq!(total, Money::from_cents(200));
    }

    #[test]
    fn test_quantity_checks() {
        assert!(Quantity::whole(3).is_whole());
        assert!(!Quantity::new(dec!(0.5)).is_whole());
        assert!(Quantity::new(dec!(0.5)).is_positive());
        assert!(!Quantity::zero().is_positive());
        assert_eq!(Quantity::new(dec!(2.500)).to_string(), "2.5");
    }

    #[test]
    fn test_serializes_as_decimal_string() {
        let json = serde_json::to_string(&Money::from_cents(150)).unwrap();
        assert_eq!(json, "\"1.50\"");
    }
}
