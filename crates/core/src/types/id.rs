//! Variant identifier type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`VariantId`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum VariantIdError {
    /// The input string is empty.
    #[error("variant id cannot be empty")]
    Empty,
    /// The input string is too long.
    #[error("variant id must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
    /// The input contains a character outside the allowed set.
    #[error("variant id contains invalid character {ch:?}")]
    InvalidChar {
        /// The offending character.
        ch: char,
    },
}

/// A variant identifier.
///
/// Identifies one purchasable configuration of the product (e.g. a package
/// size). A cart line item carries the same identifier as the catalog
/// variant it was added from, so there is never more than one line item per
/// variant.
///
/// ## Constraints
///
/// - Length: 1-64 characters
/// - Lowercase ASCII letters, digits, and hyphens only
///
/// ## Examples
///
/// ```
/// use leafcart_core::VariantId;
///
/// // Valid identifiers
/// assert!(VariantId::parse("moringa-100g").is_ok());
/// assert!(VariantId::parse("moringa-200g").is_ok());
///
/// // Invalid identifiers
/// assert!(VariantId::parse("").is_err());             // empty
/// assert!(VariantId::parse("Moringa 100g").is_err()); // uppercase, space
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String")]
pub struct VariantId(String);

impl VariantId {
    /// Maximum length of a variant identifier.
    pub const MAX_LENGTH: usize = 64;

    /// Parse a `VariantId` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input:
    /// - Is empty
    /// - Is longer than 64 characters
    /// - Contains anything but lowercase ASCII letters, digits, or hyphens
    pub fn parse(s: &str) -> Result<Self, VariantIdError> {
        if s.is_empty() {
            return Err(VariantIdError::Empty);
        }

        if s.len() > Self::MAX_LENGTH {
            return Err(VariantIdError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }

        if let Some(ch) = s
            .chars()
            .find(|c| !(c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '-'))
        {
            return Err(VariantIdError::InvalidChar { ch });
        }

        Ok(Self(s.to_owned()))
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `VariantId` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for VariantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for VariantId {
    type Error = VariantIdError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl AsRef<str> for VariantId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
