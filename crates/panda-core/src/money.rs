//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  The catalog backend sends prices as JSON numbers:                      │
//! │    { "price": 0.1 } + { "price": 0.2 } = 0.30000000000000004  ❌        │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    Convert ONCE at the wire boundary (dollars → cents),                 │
//! │    do every cart calculation in i64 cents,                              │
//! │    convert back ONCE when the order request is serialized.              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use panda_core::money::Money;
//!
//! let price = Money::from_cents(1000); // $10.00
//! let line_total = price.multiply_quantity(2);
//! let total = line_total + Money::from_cents(300);
//! assert_eq!(total.to_string(), "$23.00");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents).
///
/// ## Where Money is Used
/// ```text
/// MenuItem.price ──► CartLine.unit_price ──► CartLine::line_total()
///                                                   │
///                                                   ▼
/// Restaurant.delivery_fee ─────────────────► CartSnapshot.total
///                                                   │
///                                                   ▼
///                                     OrderRequest / OrderConfirmation
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ```rust
    /// use panda_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // $10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from major and minor units (dollars and cents).
    ///
    /// ```rust
    /// use panda_core::money::Money;
    ///
    /// assert_eq!(Money::from_major_minor(10, 99).cents(), 1099);
    /// assert_eq!(Money::from_major_minor(-5, 50).cents(), -550);
    /// ```
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Converts a wire amount in major units (e.g. `10.5`) to cents.
    ///
    /// Rounds half away from zero to the nearest cent. Returns `None` for
    /// NaN, infinities and values outside the `i64` cent range.
    ///
    /// ```rust
    /// use panda_core::money::Money;
    ///
    /// assert_eq!(Money::from_major_f64(10.5), Some(Money::from_cents(1050)));
    /// assert_eq!(Money::from_major_f64(0.1 + 0.2), Some(Money::from_cents(30)));
    /// assert_eq!(Money::from_major_f64(f64::NAN), None);
    /// ```
    pub fn from_major_f64(amount: f64) -> Option<Self> {
        if !amount.is_finite() {
            return None;
        }
        let cents = (amount * 100.0).round();
        if cents < i64::MIN as f64 || cents > i64::MAX as f64 {
            return None;
        }
        Some(Money(cents as i64))
    }

    /// Returns the value in major units for the wire format only.
    #[inline]
    pub fn to_major_f64(&self) -> f64 {
        self.0 as f64 / 100.0
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

    /// Multiplies money by a cart quantity, saturating at the `i64` bounds.
    ///
    /// ## User Workflow
    /// ```text
    /// Dish: Chicken Biryani $10.00
    /// Quantity: 2
    ///      │
    ///      ▼
    /// multiply_quantity(2) ← THIS FUNCTION
    ///      │
    ///      ▼
    /// Line Total: $20.00
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: u32) -> Self {
        Money(self.0.saturating_mul(qty as i64))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

// Arithmetic saturates. Quantities are user-driven and can reach u32::MAX,
// so a line total may exceed the cent range; it pins at the bound instead
// of panicking or wrapping.

/// Shows money as `$10.99`, the way the cart panel prints amounts.
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

impl Default for Money {
    fn default() -> Self {
        Money::zero()
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

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

/// Multiplication by a cart quantity.
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
// Wire Format Adapter
// =============================================================================

/// Serde adapter for amounts the backend exchanges as JSON numbers in major
/// units (`"price": 10.5`).
///
/// Deserialization rejects negative and non-finite amounts: every amount on
/// this wire (price, delivery fee, order total) is non-negative.
///
/// ```rust
/// use panda_core::money::{self, Money};
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct Priced {
///     #[serde(with = "money::dollars")]
///     price: Money,
/// }
///
/// let priced: Priced = serde_json::from_str(r#"{"price": 12.99}"#).unwrap();
/// assert_eq!(priced.price.cents(), 1299);
/// ```
pub mod dollars {
    use super::Money;
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(amount: &Money, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_f64(amount.to_major_f64())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Money, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = f64::deserialize(deserializer)?;
        let amount = Money::from_major_f64(raw)
            .ok_or_else(|| D::Error::custom(format!("amount {raw} is not a finite number")))?;
        if amount.is_negative() {
            return Err(D::Error::custom(format!("amount {raw} must not be negative")));
        }
        Ok(amount)
    }
}

/// Like [`dollars`], but a JSON `null` reads as zero.
///
/// For fees the backend may leave unset. Combine with `#[serde(default)]` to
/// also accept a missing field.
pub mod dollars_or_zero {
    use super::Money;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(amount: &Money, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        super::dollars::serialize(amount, serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Money, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Amount(#[serde(with = "super::dollars")] Money);

        Ok(Option::<Amount>::deserialize(deserializer)?
            .map(|Amount(m)| m)
            .unwrap_or_default())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, Serialize)]
    struct Wire {
        #[serde(with = "dollars")]
        amount: Money,
    }

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(money.dollars(), 10);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_from_major_minor() {
        assert_eq!(Money::from_major_minor(10, 99).cents(), 1099);
        assert_eq!(Money::from_major_minor(-5, 50).cents(), -550);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1099)), "$10.99");
        assert_eq!(format!("{}", Money::from_cents(500)), "$5.00");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-$5.50");
        assert_eq!(format!("{}", Money::zero()), "$0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(300);

        assert_eq!((a + b).cents(), 1300);
        assert_eq!((a - b).cents(), 700);
        assert_eq!((a * 2).cents(), 2000);

        let sum: Money = [a, b, b].into_iter().sum();
        assert_eq!(sum.cents(), 1600);
    }

    #[test]
    fn test_arithmetic_saturates() {
        let huge = Money::from_cents(10_000_000_000);
        assert_eq!(huge.multiply_quantity(1_000_000_000), Money::from_cents(i64::MAX));
        assert_eq!(huge * u32::MAX, Money::from_cents(i64::MAX));

        let max = Money::from_cents(i64::MAX);
        assert_eq!(max + Money::from_cents(1), max);
        assert_eq!(
            Money::from_cents(i64::MIN) - Money::from_cents(1),
            Money::from_cents(i64::MIN)
        );

        let mut total = max;
        total += Money::from_cents(300);
        assert_eq!(total, max);

        let sum: Money = [max, max, Money::from_cents(5)].into_iter().sum();
        assert_eq!(sum, max);
    }

    #[test]
    fn test_float_boundary_rounds_to_cent() {
        assert_eq!(Money::from_major_f64(12.99), Some(Money::from_cents(1299)));
        assert_eq!(Money::from_major_f64(3.0), Some(Money::from_cents(300)));
        // 0.1 + 0.2 is 0.30000000000000004 as f64
        assert_eq!(Money::from_major_f64(0.1 + 0.2), Some(Money::from_cents(30)));
        assert_eq!(Money::from_major_f64(f64::INFINITY), None);
        assert_eq!(Money::from_major_f64(1e300), None);
    }

    #[test]
    fn test_dollars_adapter() {
        let wire: Wire = serde_json::from_str(r#"{"amount": 23}"#).unwrap();
        assert_eq!(wire.amount, Money::from_cents(2300));

        let json = serde_json::to_value(&Wire { amount: Money::from_cents(1050) }).unwrap();
        assert_eq!(json["amount"], serde_json::json!(10.5));
    }

    #[test]
    fn test_dollars_adapter_rejects_bad_amounts() {
        assert!(serde_json::from_str::<Wire>(r#"{"amount": -1.0}"#).is_err());
        assert!(serde_json::from_str::<Wire>(r#"{"amount": "12.00"}"#).is_err());
        assert!(serde_json::from_str::<Wire>(r#"{}"#).is_err());
    }

    #[test]
    fn test_dollars_or_zero_accepts_null() {
        #[derive(Debug, Deserialize)]
        struct Fee {
            #[serde(default, with = "dollars_or_zero")]
            fee: Money,
        }

        let fee: Fee = serde_json::from_str(r#"{"fee": null}"#).unwrap();
        assert_eq!(fee.fee, Money::zero());

        let fee: Fee = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(fee.fee, Money::zero());

        let fee: Fee = serde_json::from_str(r#"{"fee": 2.5}"#).unwrap();
        assert_eq!(fee.fee, Money::from_cents(250));

        assert!(serde_json::from_str::<Fee>(r#"{"fee": -2.5}"#).is_err());
    }
}
