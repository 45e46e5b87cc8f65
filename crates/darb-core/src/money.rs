//! # Money Module
//!
//! Provides the `Money` type for handling prices and totals safely.
//!
//! ## Integer Minor Units
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Every amount is held in piastres (1 EGP = 100 piastres) as an i64.     │
//! │                                                                         │
//! │  Wire format (REST API):   "price": 349.5                               │
//! │  In memory:                Money(34950)                                 │
//! │  Display (messages):       "349.50 EGP"                                 │
//! │                                                                         │
//! │  Floats only appear at the serde boundary (see [`as_major`]).           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use darb_core::money::{Money, Percentage};
//!
//! let price = Money::from_major(350);
//! let line = price.multiply_quantity(2);              // 700.00 EGP
//! let off = line.percentage(Percentage::from_percent(10));
//! assert_eq!(off, Money::from_major(70));
//! assert_eq!(line.to_string(), "700.00 EGP");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

/// Currency label appended when formatting money.
pub const CURRENCY_LABEL: &str = "EGP";

/// Minor units per major unit.
const MINOR_PER_MAJOR: i64 = 100;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in minor units (piastres).
///
/// ## Where Money is Used
/// ```text
/// Product.price ──► CartEntry.subtotal ──► Cart.total_price
///                                              │
///                                              ▼
///                             calculate_discounts(total, orders, code)
///                                              │
///                                              ▼
///                           DiscountResult.final_price ──► Bill.total_price
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from minor units.
    ///
    /// ```rust
    /// use darb_core::money::Money;
    ///
    /// let price = Money::from_minor(34950); // 349.50 EGP
    /// assert_eq!(price.minor(), 34950);
    /// ```
    #[inline]
    pub const fn from_minor(minor: i64) -> Self {
        Money(minor)
    }

    /// Creates a Money value from whole pounds.
    #[inline]
    pub const fn from_major(major: i64) -> Self {
        Money(major * MINOR_PER_MAJOR)
    }

    /// Converts a decimal major-unit amount (as found on the wire) to Money,
    /// rounding half away from zero to the nearest minor unit.
    ///
    /// Returns `None` for NaN and infinities.
    pub fn from_major_f64(major: f64) -> Option<Self> {
        if !major.is_finite() {
            return None;
        }
        Some(Money((major * MINOR_PER_MAJOR as f64).round() as i64))
    }

    /// Returns the amount in major units as a float, for the wire only.
    pub fn to_major_f64(&self) -> f64 {
        self.0 as f64 / MINOR_PER_MAJOR as f64
    }

    /// Returns the value in minor units.
    #[inline]
    pub const fn minor(&self) -> i64 {
        self.0
    }

    /// Returns the whole-pound portion (truncated toward zero).
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / MINOR_PER_MAJOR
    }

    /// Returns the piastre portion (always 0-99).
    #[inline]
    pub const fn minor_part(&self) -> i64 {
        (self.0 % MINOR_PER_MAJOR).abs()
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

    /// Checks if the value is greater than zero.
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is less than zero.
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies a unit price by a quantity.
    ///
    /// ```rust
    /// use darb_core::money::Money;
    ///
    /// let unit = Money::from_minor(29950);
    /// assert_eq!(unit.multiply_quantity(3).minor(), 89850);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: u32) -> Self {
        Money(self.0 * qty as i64)
    }

    /// Returns `rate` of this amount, rounded half-up to a minor unit.
    ///
    /// Integer math: `(amount * bps + 5000) / 10000`.
    ///
    /// ```rust
    /// use darb_core::money::{Money, Percentage};
    ///
    /// let total = Money::from_minor(12345);
    /// // 20% of 123.45 = 24.69
    /// assert_eq!(total.percentage(Percentage::from_percent(20)).minor(), 2469);
    /// ```
    pub fn percentage(&self, rate: Percentage) -> Money {
        let part = (self.0 as i128 * rate.bps() as i128 + 5000) / 10000;
        Money(part as i64)
    }

    /// Subtraction that stops at zero.
    pub fn saturating_sub(self, other: Money) -> Money {
        Money((self.0 - other.0).max(0))
    }
}

// =============================================================================
// Percentage
// =============================================================================

/// A rate in basis points (1 bps = 0.01%).
///
/// 1000 bps = 10% (first order), 2000 bps = 20% (discount code).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Percentage(u32);

impl Percentage {
    /// Creates a rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        Percentage(bps)
    }

    /// Creates a rate from whole percent.
    #[inline]
    pub const fn from_percent(percent: u32) -> Self {
        Percentage(percent * 100)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the whole-percent part, for labels.
    #[inline]
    pub const fn whole_percent(&self) -> u32 {
        self.0 / 100
    }
}

// =============================================================================
// Wire Format
// =============================================================================

/// Serde adapter for amounts the API sends as decimal numbers in pounds.
///
/// ```rust
/// use darb_core::money::Money;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Serialize, Deserialize)]
/// struct Line {
///     #[serde(with = "darb_core::money::as_major")]
///     price: Money,
/// }
///
/// let line: Line = serde_json::from_str(r#"{"price": 349.5}"#).unwrap();
/// assert_eq!(line.price.minor(), 34950);
/// assert_eq!(serde_json::to_string(&line).unwrap(), r#"{"price":349.5}"#);
/// ```
pub mod as_major {
    use super::{Money, MINOR_PER_MAJOR};
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(money: &Money, serializer: S) -> Result<S::Ok, S::Error> {
        // Whole amounts go out as integers so the API keeps `350`, not `350.0`.
        if money.minor() % MINOR_PER_MAJOR == 0 {
            serializer.serialize_i64(money.major())
        } else {
            serializer.serialize_f64(money.to_major_f64())
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Money, D::Error> {
        let raw = f64::deserialize(deserializer)?;
        Money::from_major_f64(raw).ok_or_else(|| D::Error::custom("amount must be a finite number"))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Formats as `349.50 EGP`, the form used in order messages.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}{}.{:02} {}",
            sign,
            self.major().abs(),
            self.minor_part(),
            CURRENCY_LABEL
        )
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

impl Mul<u32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: u32) -> Self {
        self.multiply_quantity(qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_major_and_minor() {
        let money = Money::from_minor(34950);
        assert_eq!(money.major(), 349);
        assert_eq!(money.minor_part(), 50);
        assert_eq!(Money::from_major(350).minor(), 35000);
    }

    #[test]
    fn test_from_major_f64_rounds_to_minor_unit() {
        assert_eq!(Money::from_major_f64(349.5), Some(Money::from_minor(34950)));
        assert_eq!(Money::from_major_f64(0.125), Some(Money::from_minor(13)));
        assert_eq!(Money::from_major_f64(f64::NAN), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_minor(34950).to_string(), "349.50 EGP");
        assert_eq!(Money::from_major(5).to_string(), "5.00 EGP");
        assert_eq!(Money::from_minor(-550).to_string(), "-5.50 EGP");
        assert_eq!(Money::zero().to_string(), "0.00 EGP");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_major(10);
        let b = Money::from_major(5);

        assert_eq!((a + b).minor(), 1500);
        assert_eq!((a - b).minor(), 500);
        assert_eq!((a * 3).minor(), 3000);
        assert_eq!(b.saturating_sub(a), Money::zero());

        let total: Money = vec![a, b, b].into_iter().sum();
        assert_eq!(total, Money::from_major(20));
    }

    #[test]
    fn test_percentage_rounds_half_up() {
        // 10% of 0.05 = 0.005 → 0.01
        assert_eq!(Money::from_minor(5).percentage(Percentage::from_percent(10)).minor(), 1);
        // 30% of 1000.00 = 300.00
        assert_eq!(
            Money::from_major(1000).percentage(Percentage::from_bps(3000)),
            Money::from_major(300)
        );
    }

    #[test]
    fn test_wire_round_trip_of_whole_amount() {
        #[derive(Serialize, Deserialize)]
        struct Wire {
            #[serde(with = "as_major")]
            price: Money,
        }

        let wire: Wire = serde_json::from_str(r#"{"price":350}"#).unwrap();
        assert_eq!(wire.price, Money::from_major(350));
        assert_eq!(serde_json::to_string(&wire).unwrap(), r#"{"price":350}"#);
    }
}
