//! The cart store.
//!
//! `CartStore` owns the ordered list of line items for the session. Every
//! public mutation is a synchronous read-modify-persist transaction: the
//! in-memory list changes, the full list is written back to the storage
//! slot, and subscribed listeners receive a change notification carrying the
//! post-mutation totals so the presentation layer can re-render.
//!
//! The store is the durable source of truth across page navigations. It is
//! single-session by design: no locking, `&mut self` for mutations.

use leafcart_core::{Price, VariantId};

use crate::catalog::Catalog;
use crate::error::{CartError, Result};
use crate::models::LineItem;
use crate::storage::StorageBackend;

/// What a mutation did to the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartChange {
    /// A new line item was appended.
    ItemAdded {
        /// Variant added.
        id: VariantId,
        /// Quantity of the new line.
        quantity: u32,
    },
    /// An existing line item's quantity changed (merge-on-add, increment,
    /// or decrement that stayed above zero).
    QuantityChanged {
        /// Variant affected.
        id: VariantId,
        /// Quantity after the change.
        quantity: u32,
    },
    /// A line item left the cart (explicit removal or decrement from 1).
    ItemRemoved {
        /// Variant removed.
        id: VariantId,
    },
}

/// Change notification delivered to subscribers after every mutation.
///
/// Carries the post-mutation derived totals so an adapter can update count
/// badges and subtotals without reading the store again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartEvent {
    /// The mutation that occurred.
    pub change: CartChange,
    /// Sum of quantities after the mutation.
    pub item_count: u32,
    /// Sum of price times quantity after the mutation.
    pub subtotal: Price,
}

type Listener = Box<dyn FnMut(&CartEvent)>;

/// Persisted collection of line items with derived totals.
pub struct CartStore<S: StorageBackend> {
    catalog: Catalog,
    storage: S,
    key: String,
    items: Vec<LineItem>,
    listeners: Vec<Listener>,
}

impl<S: StorageBackend> CartStore<S> {
    /// Open the cart for this session, loading persisted state.
    ///
    /// Loading fails soft: an absent or unparseable payload yields an empty
    /// cart, and individual corrupt entries (missing or invalid identifier
    /// or price, zero quantity, duplicated identifier) are dropped. When
    /// anything was dropped the cleaned list is re-saved immediately so the
    /// corruption does not recur on the next load. If that re-save itself
    /// fails the stale payload stays in the slot and the same cleanup runs
    /// again on the next load.
    pub fn open(catalog: Catalog, storage: S, key: impl Into<String>) -> Self {
        let key = key.into();
        let (items, dropped) = load_items(&storage, &key);

        let store = Self {
            catalog,
            storage,
            key,
            items,
            listeners: Vec::new(),
        };

        if dropped > 0 {
            tracing::warn!(dropped, "dropped corrupt cart entries on load");
            if let Err(err) = store.persist() {
                tracing::warn!(error = %err, "failed to re-save cleaned cart");
            }
        }

        store
    }

    /// Add `quantity` of a catalog variant to the cart.
    ///
    /// If a line item for the variant already exists its quantity is
    /// incremented by `quantity` (merge semantics); otherwise a new line is
    /// appended, snapshotting the variant's current name, price, and image.
    ///
    /// Returns the change notification so the caller can react to the
    /// post-add state (e.g. reset its quantity selector).
    ///
    /// # Errors
    ///
    /// - [`CartError::InvalidVariant`] if the catalog cannot resolve the
    ///   identifier; the cart is unchanged.
    /// - [`CartError::ZeroQuantity`] for a zero requested quantity; the
    ///   cart is unchanged.
    /// - [`CartError::Storage`] if persisting failed; the mutation is
    ///   retained in memory and listeners were notified.
    pub fn add_item(&mut self, variant_id: &VariantId, quantity: u32) -> Result<CartEvent> {
        if quantity == 0 {
            return Err(CartError::ZeroQuantity);
        }

        let Some(variant) = self.catalog.resolve(variant_id) else {
            tracing::error!(
                variant = %variant_id,
                "add_item: selection does not resolve in catalog"
            );
            return Err(CartError::InvalidVariant(variant_id.clone()));
        };

        let change = if let Some(item) = self.items.iter_mut().find(|i| &i.id == variant_id) {
            item.quantity = item.quantity.saturating_add(quantity);
            CartChange::QuantityChanged {
                id: variant_id.clone(),
                quantity: item.quantity,
            }
        } else {
            self.items.push(LineItem::from_variant(variant, quantity));
            CartChange::ItemAdded {
                id: variant_id.clone(),
                quantity,
            }
        };

        self.commit(change)
    }

    /// Increase the quantity of an existing line item by one.
    ///
    /// A no-op for an absent identifier.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Storage`] if persisting failed; the mutation is
    /// retained in memory.
    pub fn increment_item(&mut self, id: &VariantId) -> Result<()> {
        let Some(item) = self.items.iter_mut().find(|i| &i.id == id) else {
            tracing::debug!(item = %id, "increment_item: no such line item");
            return Ok(());
        };

        item.quantity = item.quantity.saturating_add(1);
        let change = CartChange::QuantityChanged {
            id: id.clone(),
            quantity: item.quantity,
        };
        self.commit(change).map(|_| ())
    }

    /// Decrease the quantity of an existing line item by one.
    ///
    /// A line item never stays at quantity zero: decrementing from 1
    /// removes it entirely. A no-op for an absent identifier.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Storage`] if persisting failed; the mutation is
    /// retained in memory.
    pub fn decrement_item(&mut self, id: &VariantId) -> Result<()> {
        let Some(pos) = self.items.iter().position(|item| &item.id == id) else {
            tracing::debug!(item = %id, "decrement_item: no such line item");
            return Ok(());
        };

        let remaining = self
            .items
            .get(pos)
            .map_or(0, |item| item.quantity.saturating_sub(1));

        let change = if remaining == 0 {
            self.items.remove(pos);
            CartChange::ItemRemoved { id: id.clone() }
        } else {
            if let Some(item) = self.items.get_mut(pos) {
                item.quantity = remaining;
            }
            CartChange::QuantityChanged {
                id: id.clone(),
                quantity: remaining,
            }
        };
        self.commit(change).map(|_| ())
    }

    /// Delete a line item unconditionally.
    ///
    /// A no-op for an absent identifier.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Storage`] if persisting failed; the mutation is
    /// retained in memory.
    pub fn remove_item(&mut self, id: &VariantId) -> Result<()> {
        let Some(pos) = self.items.iter().position(|item| &item.id == id) else {
            tracing::debug!(item = %id, "remove_item: no such line item");
            return Ok(());
        };

        self.items.remove(pos);
        let change = CartChange::ItemRemoved { id: id.clone() };
        self.commit(change).map(|_| ())
    }

    /// Sum of price times quantity across all line items.
    ///
    /// Recomputed fresh on every call, never cached. Exact decimal
    /// arithmetic; zero for an empty cart.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.items
            .iter()
            .fold(Price::ZERO, |acc, item| acc.saturating_add(item.line_total()))
    }

    /// Sum of quantities across all line items.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items
            .iter()
            .fold(0u32, |acc, item| acc.saturating_add(item.quantity))
    }

    /// Current line items in first-added order.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Whether the cart holds no line items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Write the current cart state to the storage slot.
    ///
    /// Called automatically after every mutation; exposed for adapters that
    /// want to retry after a [`CartError::Storage`] failure.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the storage write failed. The
    /// backend guarantees the previously persisted payload stays intact on
    /// failure.
    pub fn persist(&self) -> Result<()> {
        let payload = serde_json::to_string(&self.items)?;
        self.storage.write(&self.key, &payload)?;
        Ok(())
    }

    /// Register a listener invoked after every mutation.
    pub fn subscribe(&mut self, listener: impl FnMut(&CartEvent) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Persist, notify listeners, and surface any persistence failure.
    ///
    /// Listeners are notified even when persisting failed: the in-memory
    /// state is authoritative for the session either way.
    fn commit(&mut self, change: CartChange) -> Result<CartEvent> {
        let persisted = self.persist();
        if let Err(err) = &persisted {
            tracing::warn!(error = %err, "cart mutation could not be persisted");
        }

        let event = CartEvent {
            change,
            item_count: self.item_count(),
            subtotal: self.subtotal(),
        };
        for listener in &mut self.listeners {
            listener(&event);
        }

        persisted?;
        Ok(event)
    }
}

/// Read and leniently decode the persisted item list.
///
/// Returns the well-formed items and the number of entries dropped.
fn load_items<S: StorageBackend>(storage: &S, key: &str) -> (Vec<LineItem>, usize) {
    let payload = match storage.read(key) {
        Ok(Some(payload)) => payload,
        Ok(None) => return (Vec::new(), 0),
        Err(err) => {
            tracing::warn!(error = %err, "failed to read persisted cart, starting empty");
            return (Vec::new(), 0);
        }
    };

    let entries: Vec<serde_json::Value> = match serde_json::from_str(&payload) {
        Ok(entries) => entries,
        Err(err) => {
            tracing::warn!(error = %err, "persisted cart is unparseable, starting empty");
            return (Vec::new(), 0);
        }
    };

    let total = entries.len();
    let mut seen = std::collections::HashSet::new();
    let items: Vec<LineItem> = entries
        .into_iter()
        .filter_map(|entry| serde_json::from_value::<LineItem>(entry).ok())
        .filter(LineItem::is_well_formed)
        // One line item per identifier; a duplicate means a foreign writer
        // bypassed merge-on-add. Keep the first occurrence.
        .filter(|item| seen.insert(item.id.clone()))
        .collect();
    let dropped = total - items.len();

    (items, dropped)
}
