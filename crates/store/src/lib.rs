//! LeafCart Store - cart state management for a single-product storefront.
//!
//! This crate owns the persisted shopping cart: a static variant [`catalog`],
//! the [`store::CartStore`] with its add/increment/decrement/remove
//! operations and derived totals, and the durable [`storage`] slot the cart
//! survives page reloads in.
//!
//! The presentation layer is an external collaborator: it forwards validated
//! variant identifiers into the store and re-renders from the store's state
//! whenever a change notification fires. Nothing in this crate touches a
//! renderer.
//!
//! # Modules
//!
//! - [`catalog`] - Static variant table, resolved at add time
//! - [`store`] - The cart store itself
//! - [`models`] - Persisted line item layout
//! - [`storage`] - Durable storage backends
//! - [`config`] - Environment-driven configuration
//! - [`delivery`] - Simulated pincode serviceability check
//! - [`error`] - Error taxonomy

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod config;
pub mod delivery;
pub mod error;
pub mod models;
pub mod storage;
pub mod store;

pub use catalog::{Catalog, CatalogError, Variant};
pub use config::{CartConfig, ConfigError};
pub use delivery::{DeliveryChecker, Pincode, PincodeError, Serviceability};
pub use error::{CartError, Result};
pub use models::LineItem;
pub use storage::{FileStorage, MemoryStorage, StorageBackend, StorageError};
pub use store::{CartChange, CartEvent, CartStore};
