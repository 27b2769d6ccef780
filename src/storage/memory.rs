//! An in-memory storage backend

use std::collections::HashMap;

use super::{Storage, StorageError};

/// A [`Storage`] backend that keeps everything in a `HashMap`.
///
/// Nothing survives the process: this is the backend of choice for tests, and for embedders that
/// only want the in-session fallback behaviour without touching the disk.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// The number of keys currently stored
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Storage for MemoryStorage {
    fn get(&mut self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_set_remove() {
        let mut storage = MemoryStorage::new();
        assert!(storage.is_empty());
        assert_eq!(storage.get("missing").unwrap(), None);

        storage.set("app_events", "[]").unwrap();
        assert_eq!(storage.get("app_events").unwrap().as_deref(), Some("[]"));

        // Overwriting does not add a key
        storage.set("app_events", "[1]").unwrap();
        assert_eq!(storage.get("app_events").unwrap().as_deref(), Some("[1]"));
        assert_eq!(storage.len(), 1);

        storage.remove("app_events").unwrap();
        assert_eq!(storage.get("app_events").unwrap(), None);
        assert!(storage.is_empty());
        // Removing twice is a no-op
        storage.remove("app_events").unwrap();
    }
}
