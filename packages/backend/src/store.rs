//! Key-value storage seam over browser local storage.
//!
//! Credentials, the theme flag, and the cached session all go through
//! [`KeyValueStore`] so that everything above it can run against
//! [`MemoryStore`] in tests and on native targets.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Plain string key-value storage.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// Shared handle to a storage backend.
pub type SharedStore = Arc<dyn KeyValueStore + Send + Sync>;

/// In-memory KeyValueStore for testing and native fallback.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().unwrap().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.entries.lock().unwrap().remove(key);
    }
}

/// Browser `localStorage`, looked up per call so the struct stays `Send`.
#[cfg(target_arch = "wasm32")]
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserStore;

#[cfg(target_arch = "wasm32")]
impl BrowserStore {
    pub fn new() -> Self {
        Self
    }

    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok().flatten()
    }
}

#[cfg(target_arch = "wasm32")]
impl KeyValueStore for BrowserStore {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) {
        if let Some(storage) = Self::storage() {
            let _ = storage.set_item(key, value);
        }
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = Self::storage() {
            let _ = storage.remove_item(key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_set_get_remove() {
        let store = MemoryStore::new();
        assert_eq!(store.get("k"), None);

        store.set("k", "v");
        assert_eq!(store.get("k"), Some("v".to_string()));

        store.set("k", "v2");
        assert_eq!(store.get("k"), Some("v2".to_string()));

        store.remove("k");
        assert_eq!(store.get("k"), None);
    }

    #[test]
    fn test_memory_store_clones_share_entries() {
        let store = MemoryStore::new();
        let clone = store.clone();
        clone.set("k", "v");
        assert_eq!(store.get("k"), Some("v".to_string()));
    }
}
