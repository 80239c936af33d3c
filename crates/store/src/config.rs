//! Cart configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional; the defaults run the built-in single-product
//! storefront.
//!
//! - `LEAFCART_STORAGE_DIR` - Directory for the durable storage slot
//!   (default: `./data`)
//! - `LEAFCART_STORAGE_KEY` - Name of the cart's storage slot
//!   (default: `leafcart`; lowercase letters, digits, hyphens, underscores)
//! - `LEAFCART_CATALOG_PATH` - JSON file holding the variant table; the
//!   built-in moringa catalog is used when unset

use std::path::PathBuf;

use thiserror::Error;

use crate::catalog::{Catalog, CatalogError};
use crate::storage::FileStorage;

const DEFAULT_STORAGE_DIR: &str = "./data";
const DEFAULT_STORAGE_KEY: &str = "leafcart";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An environment variable holds an unusable value.
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Cart store configuration.
#[derive(Debug, Clone)]
pub struct CartConfig {
    /// Directory the file storage backend writes into.
    pub storage_dir: PathBuf,
    /// Storage slot name the cart persists under.
    pub storage_key: String,
    /// Optional catalog file; `None` selects the built-in catalog.
    pub catalog_path: Option<PathBuf>,
}

impl CartConfig {
    /// Load configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if `LEAFCART_STORAGE_KEY` is set to an empty string
    /// or contains characters unsafe for a file stem.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_getter(|name| std::env::var(name).ok())
    }

    /// Load configuration through a variable lookup function.
    ///
    /// Seam for tests; [`Self::from_env`] passes `std::env::var`.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Self::from_env`].
    pub fn from_getter(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let storage_dir = get("LEAFCART_STORAGE_DIR")
            .map_or_else(|| PathBuf::from(DEFAULT_STORAGE_DIR), PathBuf::from);

        let storage_key =
            get("LEAFCART_STORAGE_KEY").unwrap_or_else(|| DEFAULT_STORAGE_KEY.to_owned());
        validate_storage_key(&storage_key)?;

        let catalog_path = get("LEAFCART_CATALOG_PATH").map(PathBuf::from);

        Ok(Self {
            storage_dir,
            storage_key,
            catalog_path,
        })
    }

    /// Build the configured catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if a configured catalog file cannot be read or
    /// parsed. The built-in catalog never fails.
    pub fn catalog(&self) -> Result<Catalog, CatalogError> {
        self.catalog_path
            .as_deref()
            .map_or_else(|| Ok(Catalog::moringa()), Catalog::from_json_file)
    }

    /// Build the configured file storage backend.
    #[must_use]
    pub fn storage(&self) -> FileStorage {
        FileStorage::new(&self.storage_dir)
    }
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            storage_dir: PathBuf::from(DEFAULT_STORAGE_DIR),
            storage_key: DEFAULT_STORAGE_KEY.to_owned(),
            catalog_path: None,
        }
    }
}

/// The storage key doubles as a file stem, so keep it to a safe set.
fn validate_storage_key(key: &str) -> Result<(), ConfigError> {
    if key.is_empty() {
        return Err(ConfigError::InvalidEnvVar(
            "LEAFCART_STORAGE_KEY".to_owned(),
            "must not be empty".to_owned(),
        ));
    }

    if let Some(ch) = key
        .chars()
        .find(|c| !(c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '-' | '_')))
    {
        return Err(ConfigError::InvalidEnvVar(
            "LEAFCART_STORAGE_KEY".to_owned(),
            format!("invalid character {ch:?}"),
        ));
    }

    Ok(())
}
