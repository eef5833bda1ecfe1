//! Stored connection credentials for the backend service.
//!
//! The connection URL and anon key live in local storage under fixed keys.
//! Absence of either means "not configured" and no client can be built.

use serde::{Deserialize, Serialize};

use crate::store::KeyValueStore;

/// Local-storage key for the backend URL.
pub const URL_KEY: &str = "pr_url";
/// Local-storage key for the anon API key.
pub const ANON_KEY: &str = "pr_anon";
/// Local-storage key for the theme preference.
pub const THEME_KEY: &str = "pr_theme";
/// Local-storage key for the cached session.
pub const SESSION_KEY: &str = "pr_session";

/// Connection endpoint and anon key. Both are always non-empty and trimmed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub url: String,
    pub key: String,
}

impl Credentials {
    /// Trims both fields; returns `None` unless both are non-empty.
    pub fn new(url: &str, key: &str) -> Option<Self> {
        let url = url.trim();
        let key = key.trim();
        if url.is_empty() || key.is_empty() {
            return None;
        }
        Some(Self {
            url: url.to_string(),
            key: key.to_string(),
        })
    }
}

/// Read credentials from storage, or `None` if either half is missing.
pub fn load_credentials(store: &dyn KeyValueStore) -> Option<Credentials> {
    let url = store.get(URL_KEY)?;
    let key = store.get(ANON_KEY)?;
    Credentials::new(&url, &key)
}

/// Persist credentials under the fixed keys.
pub fn store_credentials(store: &dyn KeyValueStore, credentials: &Credentials) {
    store.set(URL_KEY, &credentials.url);
    store.set(ANON_KEY, &credentials.key);
}

/// Remove credentials and any cached session.
pub fn clear_credentials(store: &dyn KeyValueStore) {
    store.remove(URL_KEY);
    store.remove(ANON_KEY);
    store.remove(SESSION_KEY);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn test_credentials_require_both_fields() {
        assert!(Credentials::new("", "").is_none());
        assert!(Credentials::new("https://x.example.com", "").is_none());
        assert!(Credentials::new("", "anon").is_none());
        assert!(Credentials::new("   ", "anon").is_none());
        assert!(Credentials::new("https://x.example.com", "anon").is_some());
    }

    #[test]
    fn test_credentials_are_trimmed() {
        let creds = Credentials::new(" https://x.example.com ", " anon\n").unwrap();
        assert_eq!(creds.url, "https://x.example.com");
        assert_eq!(creds.key, "anon");
    }

    #[test]
    fn test_store_roundtrip_and_clear() {
        let store = MemoryStore::new();
        assert!(load_credentials(&store).is_none());

        let creds = Credentials::new("https://x.example.com", "anon").unwrap();
        store_credentials(&store, &creds);
        assert_eq!(load_credentials(&store), Some(creds));

        clear_credentials(&store);
        assert!(load_credentials(&store).is_none());
        assert_eq!(store.get(SESSION_KEY), None);
    }

    #[test]
    fn test_stored_blank_values_mean_unconfigured() {
        let store = MemoryStore::new();
        store.set(URL_KEY, "  ");
        store.set(ANON_KEY, "anon");
        assert!(load_credentials(&store).is_none());
    }
}
