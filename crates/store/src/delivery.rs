//! Simulated delivery serviceability check.
//!
//! The storefront answers "can we deliver to this pincode?" from a static
//! table; there is no real courier lookup. The check is pure and
//! synchronous - the artificial delay the page shows before displaying the
//! answer is the presentation layer's concern, and re-triggering the check
//! simply recomputes the same answer.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Pincode`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PincodeError {
    /// The input is not exactly six ASCII digits.
    #[error("pincode must be exactly 6 digits")]
    InvalidFormat,
}

/// A six-digit Indian postal code.
///
/// ## Examples
///
/// ```
/// use leafcart_store::delivery::Pincode;
///
/// assert!(Pincode::parse("110001").is_ok());
/// assert!(Pincode::parse("1100").is_err());     // too short
/// assert!(Pincode::parse("11000a").is_err());   // non-digit
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String")]
pub struct Pincode(String);

impl Pincode {
    /// Parse a `Pincode` from a string.
    ///
    /// # Errors
    ///
    /// Returns [`PincodeError::InvalidFormat`] unless the input is exactly
    /// six ASCII digits.
    pub fn parse(s: &str) -> Result<Self, PincodeError> {
        if s.len() != 6 || !s.chars().all(|c| c.is_ascii_digit()) {
            return Err(PincodeError::InvalidFormat);
        }
        Ok(Self(s.to_owned()))
    }

    /// Returns the pincode as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Pincode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Pincode {
    type Error = PincodeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

/// Outcome of a serviceability check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Serviceability {
    /// Delivery is available within the given day range.
    Deliverable {
        /// Earliest delivery, in days.
        min_days: u8,
        /// Latest delivery, in days.
        max_days: u8,
    },
    /// Delivery is not available to this pincode right now.
    NotServiceable,
}

/// Static serviceability table.
#[derive(Debug, Clone)]
pub struct DeliveryChecker {
    serviceable: Vec<Pincode>,
}

impl DeliveryChecker {
    /// Build a checker over an explicit set of serviceable pincodes.
    #[must_use]
    pub fn new(serviceable: Vec<Pincode>) -> Self {
        Self { serviceable }
    }

    /// Check whether delivery is available to a pincode.
    #[must_use]
    pub fn check(&self, pincode: &Pincode) -> Serviceability {
        if self.serviceable.contains(pincode) {
            Serviceability::Deliverable {
                min_days: 2,
                max_days: 3,
            }
        } else {
            Serviceability::NotServiceable
        }
    }
}

impl Default for DeliveryChecker {
    /// The three metro pincodes the storefront simulates coverage for.
    fn default() -> Self {
        let serviceable = ["110001", "400001", "560001"]
            .into_iter()
            .map(|pin| Pincode::parse(pin).expect("built-in pincode is valid"))
            .collect();
        Self { serviceable }
    }
}
