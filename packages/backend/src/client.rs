//! # The [`Backend`] trait and its HTTP implementation
//!
//! [`Backend`] is the seam between the pages and the hosted service. Pages
//! receive a constructed client (no global handle); tests substitute
//! [`crate::MemoryBackend`].
//!
//! [`HttpBackend`] speaks the service's REST dialect:
//!
//! - auth under `/auth/v1` (password grant, signup, logout, recover)
//! - the `users` table under `/rest/v1/users` with equality filters
//! - object storage under `/storage/v1/object/{bucket}/{path}`
//!
//! The anon key is sent as both `apikey` and the default bearer token; once a
//! session exists its access token takes over as the bearer. The session is
//! cached in the [`KeyValueStore`] so a reload stays signed in.

use serde_json::json;

use crate::credentials::{self, Credentials, SESSION_KEY};
use crate::error::BackendError;
use crate::models::{Session, UserProfile};
use crate::store::{KeyValueStore, SharedStore};

/// Operations the client glue needs from the hosted service.
///
/// All calls are awaited sequentially by callers; none are retried.
#[allow(async_fn_in_trait)]
pub trait Backend {
    /// Current session, if any. `None` means not authenticated.
    async fn session(&self) -> Result<Option<Session>, BackendError>;

    async fn sign_up_phone(&self, phone: &str, password: &str) -> Result<Session, BackendError>;
    async fn sign_in_phone(&self, phone: &str, password: &str) -> Result<Session, BackendError>;
    async fn sign_out(&self) -> Result<(), BackendError>;

    /// Start a password reset for the given identifier. Provider errors are
    /// propagated unchanged.
    async fn reset_password(&self, phone: &str) -> Result<(), BackendError>;

    /// Read one row from the `users` table by id.
    async fn fetch_user(&self, id: &str) -> Result<Option<UserProfile>, BackendError>;

    /// Patch `avatar_url` on the user's row. The only field the client writes.
    async fn update_avatar_url(&self, id: &str, url: &str) -> Result<(), BackendError>;

    /// Upload an object, overwriting any existing one at `path`.
    async fn upload_object(
        &self,
        bucket: &str,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<(), BackendError>;

    /// Remove objects. Callers treat failures as best-effort.
    async fn remove_objects(&self, bucket: &str, paths: &[String]) -> Result<(), BackendError>;

    /// World-readable URL for an object in a public bucket.
    fn public_url(&self, bucket: &str, path: &str) -> String;
}

/// reqwest-based [`Backend`] against the hosted REST endpoints.
#[derive(Clone)]
pub struct HttpBackend {
    base: String,
    anon_key: String,
    http: reqwest::Client,
    store: SharedStore,
}

impl HttpBackend {
    pub fn new(credentials: Credentials, store: SharedStore) -> Self {
        Self {
            base: credentials.url.trim_end_matches('/').to_string(),
            anon_key: credentials.key,
            http: reqwest::Client::new(),
            store,
        }
    }

    /// Build a client from stored credentials, or `None` if unconfigured.
    /// Never errors; a page without credentials simply gets no client.
    pub fn from_store(store: SharedStore) -> Option<Self> {
        let credentials = credentials::load_credentials(store.as_ref())?;
        Some(Self::new(credentials, store))
    }

    fn cached_session(&self) -> Option<Session> {
        let raw = self.store.get(SESSION_KEY)?;
        serde_json::from_str(&raw).ok()
    }

    fn cache_session(&self, session: &Session) {
        if let Ok(raw) = serde_json::to_string(session) {
            self.store.set(SESSION_KEY, &raw);
        }
    }

    fn drop_session(&self) {
        self.store.remove(SESSION_KEY);
    }

    /// Bearer token: the session access token once signed in, the anon key
    /// otherwise.
    fn bearer(&self) -> String {
        self.cached_session()
            .map(|s| s.access_token)
            .unwrap_or_else(|| self.anon_key.clone())
    }

    fn request(&self, method: reqwest::Method, url: String) -> reqwest::RequestBuilder {
        self.http
            .request(method, url)
            .header("apikey", &self.anon_key)
            .bearer_auth(self.bearer())
    }

    async fn auth_token_call(
        &self,
        url: String,
        phone: &str,
        password: &str,
    ) -> Result<Session, BackendError> {
        let response = self
            .request(reqwest::Method::POST, url)
            .json(&json!({ "phone": phone, "password": password }))
            .send()
            .await
            .map_err(BackendError::network)?;

        let status = response.status();
        let body = response.text().await.map_err(BackendError::network)?;
        if !status.is_success() {
            return Err(BackendError::Auth(provider_message(&body)));
        }

        let session = parse_session(&body)
            .ok_or_else(|| BackendError::Auth("no session in auth response".to_string()))?;
        self.cache_session(&session);
        Ok(session)
    }
}

impl Backend for HttpBackend {
    async fn session(&self) -> Result<Option<Session>, BackendError> {
        Ok(self.cached_session())
    }

    async fn sign_up_phone(&self, phone: &str, password: &str) -> Result<Session, BackendError> {
        let url = format!("{}/auth/v1/signup", self.base);
        self.auth_token_call(url, phone, password).await
    }

    async fn sign_in_phone(&self, phone: &str, password: &str) -> Result<Session, BackendError> {
        let url = format!("{}/auth/v1/token?grant_type=password", self.base);
        self.auth_token_call(url, phone, password).await
    }

    async fn sign_out(&self) -> Result<(), BackendError> {
        let url = format!("{}/auth/v1/logout", self.base);
        let result = self
            .request(reqwest::Method::POST, url)
            .send()
            .await
            .map_err(BackendError::network);
        // The local session goes away even if the server call failed.
        self.drop_session();
        let response = result?;
        if !response.status().is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BackendError::Auth(provider_message(&body)));
        }
        Ok(())
    }

    async fn reset_password(&self, phone: &str) -> Result<(), BackendError> {
        let url = format!("{}/auth/v1/recover", self.base);
        let response = self
            .request(reqwest::Method::POST, url)
            .json(&json!({ "phone": phone }))
            .send()
            .await
            .map_err(BackendError::network)?;
        if !response.status().is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BackendError::Auth(provider_message(&body)));
        }
        Ok(())
    }

    async fn fetch_user(&self, id: &str) -> Result<Option<UserProfile>, BackendError> {
        let url = format!("{}/rest/v1/users?id=eq.{}&select=*", self.base, id);
        let response = self
            .request(reqwest::Method::GET, url)
            .send()
            .await
            .map_err(BackendError::network)?;

        let status = response.status();
        let body = response.text().await.map_err(BackendError::network)?;
        if !status.is_success() {
            return Err(BackendError::Table(provider_message(&body)));
        }

        let mut rows: Vec<UserProfile> = serde_json::from_str(&body)
            .map_err(|e| BackendError::Table(e.to_string()))?;
        Ok(if rows.is_empty() {
            None
        } else {
            Some(rows.remove(0))
        })
    }

    async fn update_avatar_url(&self, id: &str, avatar_url: &str) -> Result<(), BackendError> {
        let url = format!("{}/rest/v1/users?id=eq.{}", self.base, id);
        let response = self
            .request(reqwest::Method::PATCH, url)
            .json(&json!({ "avatar_url": avatar_url }))
            .send()
            .await
            .map_err(BackendError::network)?;
        if !response.status().is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BackendError::Table(provider_message(&body)));
        }
        Ok(())
    }

    async fn upload_object(
        &self,
        bucket: &str,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<(), BackendError> {
        let url = format!("{}/storage/v1/object/{}/{}", self.base, bucket, path);
        let response = self
            .request(reqwest::Method::POST, url)
            .header("x-upsert", "true")
            .header("cache-control", "3600")
            .header("content-type", content_type.to_string())
            .body(bytes)
            .send()
            .await
            .map_err(BackendError::network)?;
        if !response.status().is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BackendError::Storage(provider_message(&body)));
        }
        Ok(())
    }

    async fn remove_objects(&self, bucket: &str, paths: &[String]) -> Result<(), BackendError> {
        let url = format!("{}/storage/v1/object/{}", self.base, bucket);
        let response = self
            .request(reqwest::Method::DELETE, url)
            .json(&json!({ "prefixes": paths }))
            .send()
            .await
            .map_err(BackendError::network)?;
        if !response.status().is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BackendError::Storage(provider_message(&body)));
        }
        Ok(())
    }

    fn public_url(&self, bucket: &str, path: &str) -> String {
        format!("{}/storage/v1/object/public/{}/{}", self.base, bucket, path)
    }
}

/// Pull the human-readable message out of a provider error body, falling back
/// to the raw body.
fn provider_message(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["msg", "message", "error_description", "error"] {
            if let Some(message) = value.get(key).and_then(|m| m.as_str()) {
                return message.to_string();
            }
        }
    }
    body.to_string()
}

/// Auth responses carry `access_token` at the top level and the user id under
/// `user.id`.
fn parse_session(body: &str) -> Option<Session> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    let access_token = value.get("access_token")?.as_str()?.to_string();
    let user_id = value.get("user")?.get("id")?.as_str()?.to_string();
    Some(Session {
        user_id,
        access_token,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use std::sync::Arc;

    fn backend_with(store: MemoryStore) -> HttpBackend {
        let credentials = Credentials::new("https://x.example.com/", "anon").unwrap();
        HttpBackend::new(credentials, Arc::new(store))
    }

    #[test]
    fn test_from_store_requires_credentials() {
        let store = MemoryStore::new();
        assert!(HttpBackend::from_store(Arc::new(store.clone())).is_none());

        crate::credentials::store_credentials(
            &store,
            &Credentials::new("https://x.example.com", "anon").unwrap(),
        );
        assert!(HttpBackend::from_store(Arc::new(store)).is_some());
    }

    #[test]
    fn test_public_url_shape() {
        let backend = backend_with(MemoryStore::new());
        assert_eq!(
            backend.public_url("avatars", "u1/avatar.png"),
            "https://x.example.com/storage/v1/object/public/avatars/u1/avatar.png"
        );
    }

    #[test]
    fn test_bearer_prefers_cached_session() {
        let store = MemoryStore::new();
        let backend = backend_with(store.clone());
        assert_eq!(backend.bearer(), "anon");

        backend.cache_session(&Session {
            user_id: "u1".into(),
            access_token: "tok".into(),
        });
        assert_eq!(backend.bearer(), "tok");
        assert!(store.get(SESSION_KEY).is_some());

        backend.drop_session();
        assert_eq!(backend.bearer(), "anon");
    }

    #[test]
    fn test_provider_message_extraction() {
        assert_eq!(
            provider_message(r#"{"msg":"Invalid login credentials"}"#),
            "Invalid login credentials"
        );
        assert_eq!(
            provider_message(r#"{"error_description":"User already registered"}"#),
            "User already registered"
        );
        assert_eq!(provider_message("plain text"), "plain text");
    }

    #[test]
    fn test_parse_session() {
        let body = r#"{"access_token":"tok","token_type":"bearer","user":{"id":"u1"}}"#;
        let session = parse_session(body).unwrap();
        assert_eq!(session.user_id, "u1");
        assert_eq!(session.access_token, "tok");

        assert!(parse_session(r#"{"user":{"id":"u1"}}"#).is_none());
    }
}
