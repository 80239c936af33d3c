//! Core types for LeafCart.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod price;

pub use id::{VariantId, VariantIdError};
pub use price::{Price, PriceError};
