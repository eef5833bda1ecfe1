//! # Avatar upload flow
//!
//! One logical avatar per user, stored at `{userId}/avatar.{ext}` in the
//! `avatars` bucket. Re-uploads first remove every extension variant of the
//! old path (best effort) so no orphans accumulate, then upsert the new
//! object, cache-bust its public URL, and patch `avatar_url` on the user row.
//!
//! Validation is pure and runs before any I/O: a bad extension or an
//! oversized file never reaches the network.

use std::sync::atomic::{AtomicU64, Ordering};

use thiserror::Error;

use crate::client::Backend;
use crate::error::BackendError;

/// Storage bucket for avatar objects.
pub const AVATAR_BUCKET: &str = "avatars";

/// Maximum accepted file size.
pub const MAX_AVATAR_BYTES: usize = 2 * 1024 * 1024;

/// Accepted file extensions.
pub const ALLOWED_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "webp"];

#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum AvatarError {
    #[error("Please use JPG, PNG or WEBP image")]
    UnsupportedType,
    #[error("Image must be under 2MB")]
    TooLarge,
}

#[derive(Debug, Error)]
pub enum UploadError {
    #[error(transparent)]
    Invalid(#[from] AvatarError),
    #[error("Upload failed: {0}")]
    Upload(BackendError),
    /// The object is stored but the profile row was not patched. The user
    /// retries; nothing reconciles this automatically.
    #[error("Failed to save: {0}")]
    Save(BackendError),
}

/// A file selected by the user, as handed over by the file input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AvatarFile {
    pub name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Check extension and size. Returns the normalized extension.
pub fn validate_avatar(file_name: &str, size: usize) -> Result<&'static str, AvatarError> {
    let ext = file_name
        .rsplit('.')
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase();
    let ext = ALLOWED_EXTENSIONS
        .iter()
        .copied()
        .find(|allowed| *allowed == ext)
        .ok_or(AvatarError::UnsupportedType)?;
    if size > MAX_AVATAR_BYTES {
        return Err(AvatarError::TooLarge);
    }
    Ok(ext)
}

/// Deterministic object path for a user's avatar.
pub fn avatar_path(user_id: &str, ext: &str) -> String {
    format!("{user_id}/avatar.{ext}")
}

/// Every path a previous upload could have used, for pre-upload removal.
pub fn previous_paths(user_id: &str) -> Vec<String> {
    ALLOWED_EXTENSIONS
        .iter()
        .map(|ext| avatar_path(user_id, ext))
        .collect()
}

/// Content type inferred from a validated extension.
pub fn content_type_for(ext: &str) -> &'static str {
    match ext {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "webp" => "image/webp",
        _ => "application/octet-stream",
    }
}

/// Append the cache-busting parameter so browser and CDN caches refetch.
pub fn cache_busted(url: &str, stamp: u64) -> String {
    format!("{url}?v={stamp}")
}

#[cfg(target_arch = "wasm32")]
fn now_ms() -> u64 {
    js_sys::Date::now() as u64
}

#[cfg(not(target_arch = "wasm32"))]
fn now_ms() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}

/// Wall-clock milliseconds, nudged forward so two uploads in the same
/// millisecond still get distinct cache-bust values.
fn bust_stamp() -> u64 {
    static LAST: AtomicU64 = AtomicU64::new(0);
    let now = now_ms();
    let mut last = LAST.load(Ordering::SeqCst);
    loop {
        let next = now.max(last + 1);
        match LAST.compare_exchange(last, next, Ordering::SeqCst, Ordering::SeqCst) {
            Ok(_) => return next,
            Err(current) => last = current,
        }
    }
}

/// Run the full upload sequence and return the cache-busted public URL that
/// was written to the profile.
///
/// Old-variant removal is best effort; a failure there is logged and the
/// upload proceeds. Upload and profile-patch failures abort with the
/// provider's message.
pub async fn upload_avatar<B: Backend>(
    backend: &B,
    user_id: &str,
    file: &AvatarFile,
) -> Result<String, UploadError> {
    let ext = validate_avatar(&file.name, file.bytes.len())?;
    let path = avatar_path(user_id, ext);

    if let Err(err) = backend
        .remove_objects(AVATAR_BUCKET, &previous_paths(user_id))
        .await
    {
        tracing::warn!("old avatar removal failed: {err}");
    }

    backend
        .upload_object(AVATAR_BUCKET, &path, file.bytes.clone(), &file.content_type)
        .await
        .map_err(UploadError::Upload)?;

    let url = cache_busted(&backend.public_url(AVATAR_BUCKET, &path), bust_stamp());

    backend
        .update_avatar_url(user_id, &url)
        .await
        .map_err(UploadError::Save)?;

    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryBackend;
    use crate::models::UserProfile;

    fn buyer() -> UserProfile {
        UserProfile {
            id: "u1".into(),
            name: Some("Asha".into()),
            role: "buyer".into(),
            is_banned: false,
            avatar_url: None,
        }
    }

    fn png(bytes: usize) -> AvatarFile {
        AvatarFile {
            name: "selfie.PNG".into(),
            content_type: "image/png".into(),
            bytes: vec![0u8; bytes],
        }
    }

    #[test]
    fn test_validate_accepts_allow_list_case_insensitively() {
        assert_eq!(validate_avatar("me.jpg", 10), Ok("jpg"));
        assert_eq!(validate_avatar("me.JPEG", 10), Ok("jpeg"));
        assert_eq!(validate_avatar("dir.name/me.webp", 10), Ok("webp"));
    }

    #[test]
    fn test_validate_rejects_unknown_extension() {
        assert_eq!(validate_avatar("me.svg", 10), Err(AvatarError::UnsupportedType));
        assert_eq!(validate_avatar("me.gif", 10), Err(AvatarError::UnsupportedType));
        assert_eq!(validate_avatar("noext", 10), Err(AvatarError::UnsupportedType));
    }

    #[test]
    fn test_validate_rejects_oversize() {
        assert_eq!(validate_avatar("me.png", MAX_AVATAR_BYTES), Ok("png"));
        assert_eq!(
            validate_avatar("me.png", MAX_AVATAR_BYTES + 1),
            Err(AvatarError::TooLarge)
        );
        // 3 MB
        assert_eq!(
            validate_avatar("me.png", 3 * 1024 * 1024),
            Err(AvatarError::TooLarge)
        );
    }

    #[test]
    fn test_paths_are_deterministic() {
        assert_eq!(avatar_path("u1", "png"), "u1/avatar.png");
        assert_eq!(
            previous_paths("u1"),
            vec![
                "u1/avatar.jpg",
                "u1/avatar.jpeg",
                "u1/avatar.png",
                "u1/avatar.webp"
            ]
        );
    }

    #[test]
    fn test_bust_stamps_strictly_increase() {
        let a = bust_stamp();
        let b = bust_stamp();
        assert!(b > a);
    }

    #[tokio::test]
    async fn test_oversize_file_makes_no_backend_call() {
        let backend = MemoryBackend::new().with_user(buyer());
        let err = upload_avatar(&backend, "u1", &png(3 * 1024 * 1024))
            .await
            .unwrap_err();
        assert!(matches!(err, UploadError::Invalid(AvatarError::TooLarge)));
        assert_eq!(backend.calls().total(), 0);
    }

    #[tokio::test]
    async fn test_bad_extension_makes_no_backend_call() {
        let backend = MemoryBackend::new().with_user(buyer());
        let file = AvatarFile {
            name: "malware.exe".into(),
            content_type: "application/octet-stream".into(),
            bytes: vec![0u8; 16],
        };
        let err = upload_avatar(&backend, "u1", &file).await.unwrap_err();
        assert!(matches!(err, UploadError::Invalid(AvatarError::UnsupportedType)));
        assert_eq!(backend.calls().total(), 0);
    }

    #[tokio::test]
    async fn test_upload_patches_profile_with_busted_url() {
        let backend = MemoryBackend::new().with_user(buyer());
        let url = upload_avatar(&backend, "u1", &png(64)).await.unwrap();

        assert!(url.starts_with("memory://avatars/u1/avatar.png?v="));
        assert_eq!(backend.profile("u1").unwrap().avatar_url, Some(url));
        assert_eq!(backend.object_paths("avatars"), vec!["u1/avatar.png"]);
    }

    #[tokio::test]
    async fn test_reupload_leaves_exactly_one_object() {
        let backend = MemoryBackend::new().with_user(buyer());
        upload_avatar(&backend, "u1", &png(64)).await.unwrap();

        let jpg = AvatarFile {
            name: "new.jpg".into(),
            content_type: "image/jpeg".into(),
            bytes: vec![0u8; 64],
        };
        upload_avatar(&backend, "u1", &jpg).await.unwrap();

        assert_eq!(backend.object_paths("avatars"), vec!["u1/avatar.jpg"]);
    }

    #[tokio::test]
    async fn test_successive_uploads_change_cache_bust_param() {
        let backend = MemoryBackend::new().with_user(buyer());
        let first = upload_avatar(&backend, "u1", &png(64)).await.unwrap();
        let second = upload_avatar(&backend, "u1", &png(64)).await.unwrap();
        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn test_upload_failure_aborts_before_profile_patch() {
        let backend = MemoryBackend::new().with_user(buyer()).failing_uploads();
        let err = upload_avatar(&backend, "u1", &png(64)).await.unwrap_err();
        assert!(matches!(err, UploadError::Upload(_)));
        assert_eq!(backend.calls().profile_updates, 0);
        assert_eq!(backend.profile("u1").unwrap().avatar_url, None);
    }

    #[tokio::test]
    async fn test_save_failure_leaves_object_but_not_profile() {
        let backend = MemoryBackend::new().with_user(buyer()).failing_updates();
        let err = upload_avatar(&backend, "u1", &png(64)).await.unwrap_err();
        assert!(matches!(err, UploadError::Save(_)));
        // Partial state: object stored, row untouched.
        assert_eq!(backend.object_paths("avatars"), vec!["u1/avatar.png"]);
        assert_eq!(backend.profile("u1").unwrap().avatar_url, None);
    }
}
