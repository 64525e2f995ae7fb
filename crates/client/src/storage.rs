//! Durable key-value storage.
//!
//! A single JSON file holds every persisted slot (cart entries, theme
//! preference). Reads load the whole file; writes replace it. The file is
//! created lazily on first write, and a missing or unreadable slot reads as
//! absent rather than failing the caller.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Storage slot holding the local cart's entries.
pub const CART_KEY: &str = "floret.cart";

/// Storage slot holding the theme preference.
pub const THEME_KEY: &str = "floret.theme";

/// Errors from the key-value store.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// File-backed key-value store.
#[derive(Debug, Clone)]
pub struct KeyValueStore {
    path: PathBuf,
}

impl KeyValueStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Read and deserialize a slot.
    ///
    /// A missing file, a missing key, or a value that no longer matches `T`
    /// all read as `None`; persisted state is a cache, not a source of truth.
    ///
    /// # Errors
    ///
    /// Returns an error only if the file exists but cannot be read.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        let map = self.load()?;
        let Some(value) = map.get(key) else {
            return Ok(None);
        };
        match serde_json::from_value(value.clone()) {
            Ok(parsed) => Ok(Some(parsed)),
            Err(error) => {
                tracing::warn!(key, %error, "discarding unreadable storage slot");
                Ok(None)
            }
        }
    }

    /// Serialize and write a slot, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the file write fails.
    pub fn put<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let mut map = self.load()?;
        map.insert(key.to_string(), serde_json::to_value(value)?);
        self.save(&map)
    }

    /// Remove a slot. Removing an absent slot is a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or rewritten.
    pub fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut map = self.load()?;
        if map.remove(key).is_some() {
            self.save(&map)?;
        }
        Ok(())
    }

    fn load(&self) -> Result<BTreeMap<String, serde_json::Value>, StorageError> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let raw = fs::read_to_string(&self.path)?;
        match serde_json::from_str(&raw) {
            Ok(map) => Ok(map),
            Err(error) => {
                tracing::warn!(path = %self.path.display(), %error, "resetting corrupt storage file");
                Ok(BTreeMap::new())
            }
        }
    }

    fn save(&self, map: &BTreeMap<String, serde_json::Value>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            ensure_dir(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(map)?)?;
        Ok(())
    }
}

fn ensure_dir(path: &Path) -> std::io::Result<()> {
    if path.exists() {
        Ok(())
    } else {
        fs::create_dir_all(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store() -> (tempfile::TempDir, KeyValueStore) {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = KeyValueStore::new(dir.path().join("storage.json"));
        (dir, store)
    }

    #[test]
    fn test_missing_file_reads_as_absent() {
        let (_dir, store) = temp_store();
        let value: Option<String> = store.get(CART_KEY).expect("get");
        assert!(value.is_none());
    }

    #[test]
    fn test_put_then_get_round_trips() {
        let (_dir, store) = temp_store();
        store.put(THEME_KEY, &"dark").expect("put");
        let value: Option<String> = store.get(THEME_KEY).expect("get");
        assert_eq!(value.as_deref(), Some("dark"));
    }

    #[test]
    fn test_slots_are_independent() {
        let (_dir, store) = temp_store();
        store.put(CART_KEY, &vec![1, 2, 3]).expect("put");
        store.put(THEME_KEY, &"light").expect("put");
        store.remove(CART_KEY).expect("remove");

        let cart: Option<Vec<i32>> = store.get(CART_KEY).expect("get");
        let theme: Option<String> = store.get(THEME_KEY).expect("get");
        assert!(cart.is_none());
        assert_eq!(theme.as_deref(), Some("light"));
    }

    #[test]
    fn test_remove_absent_slot_is_a_noop() {
        let (_dir, store) = temp_store();
        store.remove("floret.unknown").expect("remove");
    }

    #[test]
    fn test_corrupt_file_reads_as_empty() {
        let (_dir, store) = temp_store();
        store.put(THEME_KEY, &"dark").expect("put");
        fs::write(store.path.clone(), "not json{{").expect("write");
        let value: Option<String> = store.get(THEME_KEY).expect("get");
        assert!(value.is_none());
    }

    #[test]
    fn test_mismatched_slot_type_reads_as_absent() {
        let (_dir, store) = temp_store();
        store.put(CART_KEY, &"definitely not a list").expect("put");
        let value: Option<Vec<i32>> = store.get(CART_KEY).expect("get");
        assert!(value.is_none());
    }
}
