//! In-memory [`Backend`] for testing.
//!
//! Holds user rows, stored objects, and an optional session behind
//! `Arc<Mutex<..>>` so clones share state. Every network-shaped call bumps a
//! counter in [`Calls`], which lets tests assert that a flow made no calls at
//! all (validation failures, missing credentials).

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::client::Backend;
use crate::error::BackendError;
use crate::models::{Session, UserProfile};

/// Counters for every backend operation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Calls {
    pub sessions: u32,
    pub sign_ins: u32,
    pub sign_ups: u32,
    pub sign_outs: u32,
    pub resets: u32,
    pub user_fetches: u32,
    pub profile_updates: u32,
    pub uploads: u32,
    pub removes: u32,
}

impl Calls {
    pub fn total(&self) -> u32 {
        self.sessions
            + self.sign_ins
            + self.sign_ups
            + self.sign_outs
            + self.resets
            + self.user_fetches
            + self.profile_updates
            + self.uploads
            + self.removes
    }
}

#[derive(Clone, Debug, Default)]
pub struct MemoryBackend {
    session: Arc<Mutex<Option<Session>>>,
    users: Arc<Mutex<HashMap<String, UserProfile>>>,
    objects: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    calls: Arc<Mutex<Calls>>,
    fail_uploads: Arc<Mutex<bool>>,
    fail_updates: Arc<Mutex<bool>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a user row.
    pub fn with_user(self, profile: UserProfile) -> Self {
        self.users
            .lock()
            .unwrap()
            .insert(profile.id.clone(), profile);
        self
    }

    /// Seed an active session for the given user id.
    pub fn with_session_for(self, user_id: &str) -> Self {
        *self.session.lock().unwrap() = Some(Session {
            user_id: user_id.to_string(),
            access_token: format!("token-{user_id}"),
        });
        self
    }

    /// Make subsequent uploads fail with a storage error.
    pub fn failing_uploads(self) -> Self {
        *self.fail_uploads.lock().unwrap() = true;
        self
    }

    /// Make subsequent profile updates fail with a table error.
    pub fn failing_updates(self) -> Self {
        *self.fail_updates.lock().unwrap() = true;
        self
    }

    /// Snapshot of the call counters.
    pub fn calls(&self) -> Calls {
        *self.calls.lock().unwrap()
    }

    /// Paths of every object currently stored in `bucket`.
    pub fn object_paths(&self, bucket: &str) -> Vec<String> {
        let prefix = format!("{bucket}/");
        let mut paths: Vec<String> = self
            .objects
            .lock()
            .unwrap()
            .keys()
            .filter_map(|k| k.strip_prefix(&prefix).map(str::to_string))
            .collect();
        paths.sort();
        paths
    }

    /// Current state of a seeded user row.
    pub fn profile(&self, id: &str) -> Option<UserProfile> {
        self.users.lock().unwrap().get(id).cloned()
    }

    fn bump(&self, f: impl FnOnce(&mut Calls)) {
        f(&mut self.calls.lock().unwrap());
    }
}

impl Backend for MemoryBackend {
    async fn session(&self) -> Result<Option<Session>, BackendError> {
        self.bump(|c| c.sessions += 1);
        Ok(self.session.lock().unwrap().clone())
    }

    async fn sign_up_phone(&self, phone: &str, _password: &str) -> Result<Session, BackendError> {
        self.bump(|c| c.sign_ups += 1);
        let session = Session {
            user_id: phone.to_string(),
            access_token: format!("token-{phone}"),
        };
        *self.session.lock().unwrap() = Some(session.clone());
        Ok(session)
    }

    async fn sign_in_phone(&self, phone: &str, _password: &str) -> Result<Session, BackendError> {
        self.bump(|c| c.sign_ins += 1);
        if !self.users.lock().unwrap().contains_key(phone) {
            return Err(BackendError::Auth("Invalid login credentials".to_string()));
        }
        let session = Session {
            user_id: phone.to_string(),
            access_token: format!("token-{phone}"),
        };
        *self.session.lock().unwrap() = Some(session.clone());
        Ok(session)
    }

    async fn sign_out(&self) -> Result<(), BackendError> {
        self.bump(|c| c.sign_outs += 1);
        *self.session.lock().unwrap() = None;
        Ok(())
    }

    async fn reset_password(&self, _phone: &str) -> Result<(), BackendError> {
        self.bump(|c| c.resets += 1);
        Ok(())
    }

    async fn fetch_user(&self, id: &str) -> Result<Option<UserProfile>, BackendError> {
        self.bump(|c| c.user_fetches += 1);
        Ok(self.users.lock().unwrap().get(id).cloned())
    }

    async fn update_avatar_url(&self, id: &str, url: &str) -> Result<(), BackendError> {
        self.bump(|c| c.profile_updates += 1);
        if *self.fail_updates.lock().unwrap() {
            return Err(BackendError::Table("row update rejected".to_string()));
        }
        match self.users.lock().unwrap().get_mut(id) {
            Some(profile) => {
                profile.avatar_url = Some(url.to_string());
                Ok(())
            }
            None => Err(BackendError::Table("row not found".to_string())),
        }
    }

    async fn upload_object(
        &self,
        bucket: &str,
        path: &str,
        bytes: Vec<u8>,
        _content_type: &str,
    ) -> Result<(), BackendError> {
        self.bump(|c| c.uploads += 1);
        if *self.fail_uploads.lock().unwrap() {
            return Err(BackendError::Storage("bucket unavailable".to_string()));
        }
        self.objects
            .lock()
            .unwrap()
            .insert(format!("{bucket}/{path}"), bytes);
        Ok(())
    }

    async fn remove_objects(&self, bucket: &str, paths: &[String]) -> Result<(), BackendError> {
        self.bump(|c| c.removes += 1);
        let mut objects = self.objects.lock().unwrap();
        for path in paths {
            objects.remove(&format!("{bucket}/{path}"));
        }
        Ok(())
    }

    fn public_url(&self, bucket: &str, path: &str) -> String {
        format!("memory://{bucket}/{path}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buyer() -> UserProfile {
        UserProfile {
            id: "u1".into(),
            name: Some("Asha".into()),
            role: "buyer".into(),
            is_banned: false,
            avatar_url: None,
        }
    }

    #[tokio::test]
    async fn test_session_and_sign_out() {
        let backend = MemoryBackend::new().with_user(buyer()).with_session_for("u1");
        assert!(backend.session().await.unwrap().is_some());

        backend.sign_out().await.unwrap();
        assert!(backend.session().await.unwrap().is_none());
        assert_eq!(backend.calls().sign_outs, 1);
    }

    #[tokio::test]
    async fn test_sign_in_unknown_user_propagates_provider_error() {
        let backend = MemoryBackend::new();
        let err = backend.sign_in_phone("u9", "pw").await.unwrap_err();
        assert_eq!(err.to_string(), "Invalid login credentials");
    }

    #[tokio::test]
    async fn test_upload_and_remove_track_objects() {
        let backend = MemoryBackend::new();
        backend
            .upload_object("avatars", "u1/avatar.png", vec![1, 2], "image/png")
            .await
            .unwrap();
        assert_eq!(backend.object_paths("avatars"), vec!["u1/avatar.png"]);

        backend
            .remove_objects("avatars", &["u1/avatar.png".to_string()])
            .await
            .unwrap();
        assert!(backend.object_paths("avatars").is_empty());
    }
}
