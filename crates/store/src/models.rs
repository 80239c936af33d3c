//! Persisted cart models.
//!
//! The storage slot holds a JSON array of [`LineItem`] objects with the
//! layout `{id, name, price, image, quantity}`. There is no version tag;
//! the loader tolerates absent, null, and malformed entries.

use serde::{Deserialize, Serialize};

use leafcart_core::{Price, VariantId};

use crate::catalog::Variant;

/// One cart entry: a variant plus the quantity requested.
///
/// Name, price, and image are denormalized copies snapshotted when the item
/// was added. They are intentionally not re-synced if the catalog changes
/// later in the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Identifier of the catalog variant this line was added from.
    pub id: VariantId,
    /// Display name at add time.
    pub name: String,
    /// Unit price at add time.
    pub price: Price,
    /// Representative image reference at add time.
    pub image: String,
    /// Requested quantity, always at least 1.
    pub quantity: u32,
}

impl LineItem {
    /// Snapshot a catalog variant into a new line item.
    #[must_use]
    pub fn from_variant(variant: &Variant, quantity: u32) -> Self {
        Self {
            id: variant.id.clone(),
            name: variant.name.clone(),
            price: variant.price,
            image: variant.image.clone(),
            quantity,
        }
    }

    /// Price times quantity for this line, saturating on overflow.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.price.saturating_mul_quantity(self.quantity)
    }

    /// Whether a decoded entry satisfies the cart invariants.
    ///
    /// Identifier and price validity are already enforced by their types
    /// during deserialization; the remaining check is the quantity floor.
    #[must_use]
    pub const fn is_well_formed(&self) -> bool {
        self.quantity >= 1
    }
}
