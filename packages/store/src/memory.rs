use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::kv::{KeyValueStore, StorageError};

/// In-memory KeyValueStore for testing and as a fallback when no durable
/// backend is available. Clones share the same map.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently stored.
    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, String>>, StorageError> {
        self.entries
            .lock()
            .map_err(|_| StorageError::Unavailable("memory store lock poisoned".to_string()))
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.lock()?.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_remove() {
        let store = MemoryStore::new();
        assert!(store.get("missing").unwrap().is_none());

        store.set("sidebar-collapsed", "true").unwrap();
        assert_eq!(store.get("sidebar-collapsed").unwrap().as_deref(), Some("true"));

        store.set("sidebar-collapsed", "false").unwrap();
        assert_eq!(store.get("sidebar-collapsed").unwrap().as_deref(), Some("false"));
        assert_eq!(store.len(), 1);

        store.remove("sidebar-collapsed").unwrap();
        assert!(store.is_empty());

        // Removing an absent key is not an error
        store.remove("sidebar-collapsed").unwrap();
    }

    #[test]
    fn test_clones_share_entries() {
        let store = MemoryStore::new();
        let other = store.clone();

        store.set("auth_token", "abc").unwrap();
        assert_eq!(other.get("auth_token").unwrap().as_deref(), Some("abc"));
    }
}
