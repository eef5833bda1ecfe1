//! Shared backend constructor for all pages.
//!
//! Returns an [`HttpBackend`] built from stored credentials:
//! - **Web** (WASM): credentials and session live in browser localStorage
//! - **Native** (tests, dev tools): a process-wide in-memory store

use backend::{credentials, Credentials, HttpBackend, SharedStore};

#[cfg(not(target_arch = "wasm32"))]
fn native_store() -> backend::MemoryStore {
    use std::sync::OnceLock;
    static STORE: OnceLock<backend::MemoryStore> = OnceLock::new();
    STORE.get_or_init(backend::MemoryStore::new).clone()
}

/// Platform-appropriate key-value store handle.
pub fn shared_store() -> SharedStore {
    #[cfg(target_arch = "wasm32")]
    {
        std::sync::Arc::new(backend::BrowserStore::new())
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        std::sync::Arc::new(native_store())
    }
}

/// Build a client from stored credentials, or `None` when unconfigured.
/// Never errors; the caller redirects to the login page on `None`.
pub fn make_backend() -> Option<HttpBackend> {
    HttpBackend::from_store(shared_store())
}

/// Persist new credentials and return a client for them, or `None` when
/// either field is blank. Any in-flight call keeps its old client; this
/// simply becomes the one future `make_backend` calls hand out.
pub fn init_backend(url: &str, key: &str) -> Option<HttpBackend> {
    let creds = Credentials::new(url, key)?;
    let store = shared_store();
    credentials::store_credentials(store.as_ref(), &creds);
    Some(HttpBackend::new(creds, store))
}

/// Forget stored credentials and the cached session.
pub fn clear_backend() {
    credentials::clear_credentials(shared_store().as_ref());
}

#[cfg(test)]
mod tests {
    use super::*;

    // The native store is process-wide, so these run as one test to avoid
    // ordering surprises.
    #[test]
    fn test_init_and_clear_backend() {
        clear_backend();
        assert!(make_backend().is_none());

        assert!(init_backend("https://x.example.com", "  ").is_none());
        assert!(make_backend().is_none());

        assert!(init_backend(" https://x.example.com ", "anon").is_some());
        assert!(make_backend().is_some());

        clear_backend();
        assert!(make_backend().is_none());
    }
}
