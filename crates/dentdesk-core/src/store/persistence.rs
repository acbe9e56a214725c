//! Persistence port for store state.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use thiserror::Error;

/// Persistence errors.
#[derive(Error, Debug)]
pub enum PersistError {
    #[error("Storage backend error: {0}")]
    Backend(String),

    #[error("Lock poisoned: {0}")]
    Poisoned(String),
}

pub type PersistResult<T> = Result<T, PersistError>;

/// Reads and writes opaque JSON blobs by key.
///
/// The store decides the blob format; backends only move strings.
pub trait StatePersistence {
    fn read(&self, key: &str) -> PersistResult<Option<String>>;
    fn write(&self, key: &str, blob: &str) -> PersistResult<()>;
    /// Returns whether a blob was removed.
    fn remove(&self, key: &str) -> PersistResult<bool>;
}

/// Process-local storage, cleared when dropped.
#[derive(Debug, Default)]
pub struct MemoryPersistence {
    blobs: Mutex<HashMap<String, String>>,
}

impl MemoryPersistence {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StatePersistence for MemoryPersistence {
    fn read(&self, key: &str) -> PersistResult<Option<String>> {
        let blobs = self
            .blobs
            .lock()
            .map_err(|e| PersistError::Poisoned(e.to_string()))?;
        Ok(blobs.get(key).cloned())
    }

    fn write(&self, key: &str, blob: &str) -> PersistResult<()> {
        let mut blobs = self
            .blobs
            .lock()
            .map_err(|e| PersistError::Poisoned(e.to_string()))?;
        blobs.insert(key.to_string(), blob.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> PersistResult<bool> {
        let mut blobs = self
            .blobs
            .lock()
            .map_err(|e| PersistError::Poisoned(e.to_string()))?;
        Ok(blobs.remove(key).is_some())
    }
}

/// Shared backends, e.g. a database handle also used for patient records.
impl<P: StatePersistence> StatePersistence for Arc<Mutex<P>> {
    fn read(&self, key: &str) -> PersistResult<Option<String>> {
        self.lock()
            .map_err(|e| PersistError::Poisoned(e.to_string()))?
            .read(key)
    }

    fn write(&self, key: &str, blob: &str) -> PersistResult<()> {
        self.lock()
            .map_err(|e| PersistError::Poisoned(e.to_string()))?
            .write(key, blob)
    }

    fn remove(&self, key: &str) -> PersistResult<bool> {
        self.lock()
            .map_err(|e| PersistError::Poisoned(e.to_string()))?
            .remove(key)
    }
}

impl<P: StatePersistence + ?Sized> StatePersistence for &P {
    fn read(&self, key: &str) -> PersistResult<Option<String>> {
        (**self).read(key)
    }

    fn write(&self, key: &str, blob: &str) -> PersistResult<()> {
        (**self).write(key, blob)
    }

    fn remove(&self, key: &str) -> PersistResult<bool> {
        (**self).remove(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_round_trip() {
        let storage = MemoryPersistence::new();
        assert_eq!(storage.read("k").unwrap(), None);

        storage.write("k", "{\"a\":1}").unwrap();
        assert_eq!(storage.read("k").unwrap().as_deref(), Some("{\"a\":1}"));

        assert!(storage.remove("k").unwrap());
        assert!(!storage.remove("k").unwrap());
        assert_eq!(storage.read("k").unwrap(), None);
    }

    #[test]
    fn test_shared_handle() {
        let shared = Arc::new(Mutex::new(MemoryPersistence::new()));
        let other = Arc::clone(&shared);

        shared.write("k", "v").unwrap();
        assert_eq!(other.read("k").unwrap().as_deref(), Some("v"));
    }
}
