//! Type-safe price representation using decimal arithmetic.
//!
//! Subtotals are sums of `price * quantity` terms and must be exact, so
//! prices are decimals rather than binary floats. Source prices are
//! whole-unit amounts (e.g. 149), but the type does not assume that.

use core::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Errors that can occur when constructing a [`Price`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The amount is negative.
    #[error("price cannot be negative: {0}")]
    Negative(Decimal),
}

/// A non-negative price in the store's base currency unit.
///
/// Arithmetic is exact decimal arithmetic; overflow surfaces as `None` from
/// the checked operations rather than wrapping.
///
/// ## Examples
///
/// ```
/// use leafcart_core::Price;
///
/// let unit = Price::from_whole_units(149);
/// let line = unit.checked_mul_quantity(3).expect("no overflow");
/// assert_eq!(line, Price::from_whole_units(447));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "Decimal")]
pub struct Price(Decimal);

impl Price {
    /// The zero price.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a price from a decimal amount.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Negative`] if the amount is below zero.
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceError::Negative(amount));
        }
        Ok(Self(amount))
    }

    /// Create a price from a whole number of currency units.
    #[must_use]
    pub fn from_whole_units(units: u32) -> Self {
        Self(Decimal::from(units))
    }

    /// The underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Returns `true` if the amount is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Multiply by a quantity, returning `None` on overflow.
    #[must_use]
    pub fn checked_mul_quantity(&self, quantity: u32) -> Option<Self> {
        self.0.checked_mul(Decimal::from(quantity)).map(Self)
    }

    /// Add another price, returning `None` on overflow.
    #[must_use]
    pub fn checked_add(&self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    /// Multiply by a quantity, saturating at the decimal maximum.
    #[must_use]
    pub fn saturating_mul_quantity(&self, quantity: u32) -> Self {
        Self(self.0.saturating_mul(Decimal::from(quantity)))
    }

    /// Add another price, saturating at the decimal maximum.
    #[must_use]
    pub fn saturating_add(&self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<Decimal> for Price {
    type Error = PriceError;

    fn try_from(amount: Decimal) -> Result<Self, Self::Error> {
        Self::new(amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_negative() {
        let err = Price::new(Decimal::from(-1)).expect_err("negative should fail");
        assert_eq!(err, PriceError::Negative(Decimal::from(-1)));
    }

    #[test]
    fn test_new_accepts_zero_and_positive() {
        assert_eq!(Price::new(Decimal::ZERO).expect("zero"), Price::ZERO);
        assert!(Price::new(Decimal::from(149)).is_ok());
    }

    #[test]
    fn test_exact_multiplication() {
        let price = Price::from_whole_units(149);
        assert_eq!(
            price.checked_mul_quantity(3),
            Some(Price::from_whole_units(447))
        );
    }

    #[test]
    fn test_checked_add() {
        let a = Price::from_whole_units(149);
        let b = Price::from_whole_units(249);
        assert_eq!(a.checked_add(b), Some(Price::from_whole_units(398)));
    }

    #[test]
    fn test_saturating_ops_match_checked_in_range() {
        let price = Price::from_whole_units(249);
        assert_eq!(
            price.saturating_mul_quantity(4),
            price.checked_mul_quantity(4).expect("no overflow")
        );
        assert_eq!(
            price.saturating_add(Price::from_whole_units(1)),
            Price::from_whole_units(250)
        );
    }

    #[test]
    fn test_deserialize_rejects_negative() {
        let result: Result<Price, _> = serde_json::from_str("-149");
        assert!(result.is_err());
    }

    #[test]
    fn test_deserialize_whole_number() {
        let price: Price = serde_json::from_str("149").expect("deserialize");
        assert_eq!(price, Price::from_whole_units(149));
    }

    #[test]
    fn test_display() {
        assert_eq!(Price::from_whole_units(249).to_string(), "249");
    }
}
