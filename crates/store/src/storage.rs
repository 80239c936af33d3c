//! Durable storage slots for persisted cart state.
//!
//! A backend maps a storage key to one serialized payload, mirroring the
//! single named entry the storefront reserves for its cart. Writes must be
//! all-or-nothing: a failed write leaves the previously persisted payload
//! intact, so a subsequent load never observes a partial write.
//!
//! The slot is shared last-write-wins across page instances; there is no
//! cross-instance locking because the storefront targets a single active
//! shopping session.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::PoisonError;

use thiserror::Error;

/// Errors that can occur reading or writing a storage slot.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backend refused the operation (quota exceeded, storage disabled).
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// An underlying I/O operation failed.
    #[error("storage io error: {0}")]
    Io(#[from] std::io::Error),
}

/// A named slot of durable storage.
pub trait StorageBackend {
    /// Read the payload stored under `key`, or `None` if the slot is empty.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read at all. An empty slot
    /// is not an error.
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the payload stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the payload could not be durably written. On
    /// error the previously stored payload must remain readable.
    fn write(&self, key: &str, payload: &str) -> Result<(), StorageError>;
}

/// File-backed storage: one JSON file per key inside a directory.
///
/// Writes go to a temporary sibling first and are renamed into place, so a
/// crash mid-write never corrupts the slot.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Create a backend rooted at `dir`. The directory is created lazily on
    /// first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory holding the storage files.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl StorageBackend for FileStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(payload) => Ok(Some(payload)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn write(&self, key: &str, payload: &str) -> Result<(), StorageError> {
        std::fs::create_dir_all(&self.dir)?;

        let tmp = self.dir.join(format!("{key}.json.tmp"));
        std::fs::write(&tmp, payload)?;
        std::fs::rename(&tmp, self.path_for(key))?;
        Ok(())
    }
}

/// In-memory storage for tests and headless adapters.
///
/// Can be switched into a failing mode to exercise the
/// storage-unavailable recovery path.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    slots: Mutex<HashMap<String, String>>,
    failing: Mutex<bool>,
}

impl MemoryStorage {
    /// Create an empty in-memory backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a backend pre-seeded with one slot.
    #[must_use]
    pub fn with_slot(key: &str, payload: &str) -> Self {
        let storage = Self::new();
        storage
            .slots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_owned(), payload.to_owned());
        storage
    }

    /// Make every subsequent write fail with [`StorageError::Unavailable`].
    pub fn set_failing(&self, failing: bool) {
        *self.failing.lock().unwrap_or_else(PoisonError::into_inner) = failing;
    }
}

impl StorageBackend for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self
            .slots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned())
    }

    fn write(&self, key: &str, payload: &str) -> Result<(), StorageError> {
        if *self.failing.lock().unwrap_or_else(PoisonError::into_inner) {
            return Err(StorageError::Unavailable("simulated failure".to_owned()));
        }

        self.slots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_owned(), payload.to_owned());
        Ok(())
    }
}
