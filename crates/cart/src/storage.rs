//! Durable key-value storage for the serialized cart.
//!
//! The whole cart persists as one string blob under [`CART_STORAGE_KEY`].
//! Reads and writes are synchronous; they run in the tail of each accepted
//! cart mutation.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use thiserror::Error;

/// The single key under which the serialized cart is stored.
pub const CART_STORAGE_KEY: &str = "@stride:cart";

/// Errors from a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored content could not be encoded or decoded.
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Synchronous string key-value store.
///
/// The browser `localStorage` shape: string keys and string values, one
/// namespace per store.
pub trait PersistentStore: Send {
    /// Read the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing medium cannot be read.
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing medium cannot be written.
    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// In-memory store. Contents do not survive the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl PersistentStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// File-backed store: one JSON object of key/value pairs per file.
///
/// The file is read once on open and rewritten in full on every write, via a
/// sibling temp file and rename so a crash mid-write leaves the previous
/// contents intact.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: HashMap<String, String>,
}

impl FileStore {
    /// Open the store at `path`, creating an empty one if the file is absent.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing file cannot be read or is not a JSON
    /// object of strings.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str(&contents)?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(err) => return Err(err.into()),
        };
        Ok(Self { path, entries })
    }

    /// The file this store persists to.
    #[must_use]
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    fn flush(&self) -> Result<(), StorageError> {
        let contents = serde_json::to_string_pretty(&self.entries)?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, contents)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl PersistentStore for FileStore {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        self.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_round_trip() {
        let mut store = MemoryStore::new();
        assert_eq!(store.read(CART_STORAGE_KEY).expect("read"), None);

        store.write(CART_STORAGE_KEY, "[]").expect("write");
        assert_eq!(
            store.read(CART_STORAGE_KEY).expect("read").as_deref(),
            Some("[]")
        );
    }

    #[test]
    fn test_file_store_missing_file_is_empty() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = FileStore::open(dir.path().join("cart.json")).expect("open");
        assert_eq!(store.read(CART_STORAGE_KEY).expect("read"), None);
    }

    #[test]
    fn test_file_store_survives_reopen() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("cart.json");

        let mut store = FileStore::open(&path).expect("open");
        store.write(CART_STORAGE_KEY, r#"[{"id":1}]"#).expect("write");
        drop(store);

        let reopened = FileStore::open(&path).expect("reopen");
        assert_eq!(
            reopened.read(CART_STORAGE_KEY).expect("read").as_deref(),
            Some(r#"[{"id":1}]"#)
        );
    }

    #[test]
    fn test_file_store_overwrites_value() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("cart.json");

        let mut store = FileStore::open(&path).expect("open");
        store.write(CART_STORAGE_KEY, "old").expect("write");
        store.write(CART_STORAGE_KEY, "new").expect("write");

        let reopened = FileStore::open(&path).expect("reopen");
        assert_eq!(
            reopened.read(CART_STORAGE_KEY).expect("read").as_deref(),
            Some("new")
        );
    }

    #[test]
    fn test_file_store_rejects_garbage_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("cart.json");
        fs::write(&path, "not json").expect("seed");

        let result = FileStore::open(&path);
        assert!(matches!(result, Err(StorageError::Serialize(_))));
    }
}
