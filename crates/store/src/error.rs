//! Unified error handling for the cart store.
//!
//! All failures here are local and non-fatal: an unresolvable variant aborts
//! a single add, a failed persist leaves the in-memory cart authoritative
//! for the session. Corrupt persisted entries and operations on absent items
//! are recovered inside the store and never surface as errors.

use thiserror::Error;

use leafcart_core::VariantId;

use crate::storage::StorageError;

/// Cart-level error type.
#[derive(Debug, Error)]
pub enum CartError {
    /// `add_item` was called with an identifier the catalog cannot resolve.
    ///
    /// This indicates a presentation-layer bug (an invalid selection reached
    /// the cart), not a user error.
    #[error("unknown variant: {0}")]
    InvalidVariant(VariantId),

    /// `add_item` was called with a zero quantity.
    #[error("quantity must be at least 1")]
    ZeroQuantity,

    /// Serializing the cart for persistence failed.
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The durable storage slot could not be written.
    ///
    /// The in-memory cart keeps the mutation; the caller should warn the
    /// user that changes may not survive a reload.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Result type alias for `CartError`.
pub type Result<T> = std::result::Result<T, CartError>;
