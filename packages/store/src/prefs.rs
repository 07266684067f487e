use crate::kv::{KeyValueStore, StorageError};

/// Storage key for the desktop sidebar collapse preference.
pub const SIDEBAR_COLLAPSED_KEY: &str = "sidebar-collapsed";

/// Persisted sidebar preference, stored as a JSON boolean.
#[derive(Clone, Debug)]
pub struct SidebarPrefs<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> SidebarPrefs<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Stored collapse flag; `false` when absent, unreadable or unparsable.
    pub fn collapsed(&self) -> bool {
        match self.store.get(SIDEBAR_COLLAPSED_KEY) {
            Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                tracing::debug!("Ignoring unparsable sidebar preference {raw:?}: {e}");
                false
            }),
            Ok(None) => false,
            Err(e) => {
                tracing::warn!("Failed to read sidebar preference: {e}");
                false
            }
        }
    }

    pub fn set_collapsed(&self, collapsed: bool) -> Result<(), StorageError> {
        let raw = serde_json::to_string(&collapsed)?;
        self.store.set(SIDEBAR_COLLAPSED_KEY, &raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStore;

    #[test]
    fn test_defaults_to_expanded() {
        let prefs = SidebarPrefs::new(MemoryStore::new());
        assert!(!prefs.collapsed());
    }

    #[test]
    fn test_roundtrip_as_json_boolean() {
        let store = MemoryStore::new();
        let prefs = SidebarPrefs::new(store.clone());

        prefs.set_collapsed(true).unwrap();
        assert_eq!(store.get(SIDEBAR_COLLAPSED_KEY).unwrap().as_deref(), Some("true"));
        assert!(SidebarPrefs::new(store).collapsed());
    }

    #[test]
    fn test_garbage_reads_as_expanded() {
        let store = MemoryStore::new();
        store.set(SIDEBAR_COLLAPSED_KEY, "yes please").unwrap();
        assert!(!SidebarPrefs::new(store).collapsed());
    }
}
