//! Static variant catalog.
//!
//! The catalog is configuration input: a read-only table mapping a variant
//! identifier to its descriptive and pricing attributes, built once at
//! session start. It is never mutated and never persisted.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use leafcart_core::{Price, VariantId};

/// Errors that can occur when building a [`Catalog`].
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// The variant table is empty.
    #[error("catalog cannot be empty")]
    Empty,

    /// Two variants share the same identifier.
    #[error("duplicate variant id: {0}")]
    DuplicateVariant(VariantId),

    /// The catalog file could not be read.
    #[error("failed to read catalog file {}: {source}", .path.display())]
    Io {
        /// Path of the catalog file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The catalog JSON could not be parsed.
    #[error("failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),
}

/// One purchasable configuration of the product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variant {
    /// Unique identifier, e.g. `moringa-100g`.
    pub id: VariantId,
    /// Display name.
    pub name: String,
    /// Unit price.
    pub price: Price,
    /// Representative image reference.
    pub image: String,
}

/// Read-only table of all known variants.
#[derive(Debug, Clone)]
pub struct Catalog {
    variants: Vec<Variant>,
    index: HashMap<VariantId, usize>,
}

impl Catalog {
    /// Build a catalog from a variant table.
    ///
    /// Declaration order is preserved for display purposes.
    ///
    /// # Errors
    ///
    /// Returns an error if the table is empty or contains a duplicate
    /// identifier.
    pub fn new(variants: Vec<Variant>) -> Result<Self, CatalogError> {
        if variants.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut index = HashMap::with_capacity(variants.len());
        for (pos, variant) in variants.iter().enumerate() {
            if index.insert(variant.id.clone(), pos).is_some() {
                return Err(CatalogError::DuplicateVariant(variant.id.clone()));
            }
        }

        Ok(Self { variants, index })
    }

    /// Parse a catalog from a JSON array of variants.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or the table violates
    /// catalog invariants.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let variants: Vec<Variant> = serde_json::from_str(json)?;
        Self::new(variants)
    }

    /// Load a catalog from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_json_file(path: &Path) -> Result<Self, CatalogError> {
        let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// The built-in two-variant moringa table the storefront ships with.
    #[must_use]
    pub fn moringa() -> Self {
        let variants = vec![
            Variant {
                id: VariantId::parse("moringa-100g").expect("built-in id is valid"),
                name: "Organic Moringa Leaf Powder (100g)".to_owned(),
                price: Price::from_whole_units(149),
                image: "images/moringa-pouch.jpg".to_owned(),
            },
            Variant {
                id: VariantId::parse("moringa-200g").expect("built-in id is valid"),
                name: "Organic Moringa Leaf Powder (200g)".to_owned(),
                price: Price::from_whole_units(249),
                image: "images/moringa-pouch.jpg".to_owned(),
            },
        ];

        Self::new(variants).expect("built-in catalog is valid")
    }

    /// Resolve a variant identifier to its catalog entry.
    ///
    /// Pure lookup with no side effects. `None` means an invalid selection
    /// reached the cart layer; the caller aborts the operation.
    #[must_use]
    pub fn resolve(&self, id: &VariantId) -> Option<&Variant> {
        self.index.get(id).and_then(|pos| self.variants.get(*pos))
    }

    /// All variants in declaration order.
    #[must_use]
    pub fn variants(&self) -> &[Variant] {
        &self.variants
    }

    /// Number of variants in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.variants.len()
    }

    /// Whether the table is empty (never true for a constructed catalog).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }
}
