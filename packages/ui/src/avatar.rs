//! Avatar display and upload widgets.
//!
//! [`UploadableAvatar`] validates locally, shows an instant data-URL preview,
//! then runs the upload sequence in `backend::avatar`. Success lands in the
//! shared auth state, so every [`Avatar`] on the page re-renders with the new
//! cache-busted URL.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use backend::avatar::{self, AvatarFile};
use backend::UserProfile;
use dioxus::prelude::*;

use crate::format::initials;
use crate::toast::{push_toast, use_toast, ToastLevel};
use crate::{use_auth, AuthState};

/// Data URL for an instant local preview.
pub fn data_url(content_type: &str, bytes: &[u8]) -> String {
    format!("data:{content_type};base64,{}", BASE64.encode(bytes))
}

/// Avatar image with an initials fallback.
#[component]
pub fn Avatar(
    profile: UserProfile,
    #[props(default = "av-md".to_string())] size_class: String,
) -> Element {
    rsx! {
        div {
            class: "avatar {size_class}",
            if let Some(ref url) = profile.avatar_url {
                img {
                    class: "u-av-img",
                    src: "{url}",
                    alt: "{profile.display_name()}",
                }
            } else {
                span { class: "initials", {initials(profile.name.as_deref())} }
            }
        }
    }
}

/// Click-to-change avatar for the signed-in user.
#[component]
pub fn UploadableAvatar(
    #[props(default = "av-xl".to_string())] size_class: String,
    on_uploaded: Option<EventHandler<String>>,
) -> Element {
    let mut auth_state = use_auth();
    let mut toasts = use_toast();
    let mut preview = use_signal(|| Option::<String>::None);

    let onchange = move |evt: Event<FormData>| async move {
        let Some(file_engine) = evt.files() else {
            return;
        };
        let Some(name) = file_engine.files().first().cloned() else {
            return;
        };
        let Some(bytes) = file_engine.read_file(&name).await else {
            push_toast(&mut toasts, ToastLevel::Error, "Could not read the file");
            return;
        };
        let Some(user) = auth_state().user else {
            return;
        };

        // Validate before anything else; a rejected file never previews and
        // never reaches the network.
        let ext = match avatar::validate_avatar(&name, bytes.len()) {
            Ok(ext) => ext,
            Err(err) => {
                push_toast(&mut toasts, ToastLevel::Error, &err.to_string());
                return;
            }
        };
        let content_type = avatar::content_type_for(ext);

        // Instant local preview, not gated on the upload.
        preview.set(Some(data_url(content_type, &bytes)));

        let Some(client) = crate::client::make_backend() else {
            push_toast(&mut toasts, ToastLevel::Error, "Not connected to database");
            return;
        };

        push_toast(&mut toasts, ToastLevel::Info, "Uploading…");
        let file = AvatarFile {
            name,
            content_type: content_type.to_string(),
            bytes,
        };
        match avatar::upload_avatar(&client, &user.id, &file).await {
            Ok(url) => {
                let mut updated = user;
                updated.avatar_url = Some(url.clone());
                auth_state.set(AuthState {
                    user: Some(updated),
                    loading: false,
                });
                push_toast(&mut toasts, ToastLevel::Success, "Avatar saved ✅");
                if let Some(handler) = on_uploaded {
                    handler.call(url);
                }
            }
            Err(err) => {
                push_toast(&mut toasts, ToastLevel::Error, &err.to_string());
            }
        }
    };

    let user = auth_state().user;
    let shown = preview().or_else(|| user.as_ref().and_then(|u| u.avatar_url.clone()));
    let fallback_initials = initials(user.as_ref().and_then(|u| u.name.as_deref()));

    rsx! {
        label {
            class: "avatar {size_class} avatar-upload",
            r#for: "av-file",
            title: "Click to change photo",
            if let Some(ref src) = shown {
                img { class: "u-av-img", src: "{src}" }
            } else {
                span { class: "initials", "{fallback_initials}" }
            }
            div { class: "avatar-upload-overlay", "📷" }
            input {
                r#type: "file",
                id: "av-file",
                accept: "image/jpeg,image/png,image/webp",
                onchange: onchange,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_url_shape() {
        assert_eq!(data_url("image/png", &[0, 1, 2]), "data:image/png;base64,AAEC");
        assert!(data_url("image/jpeg", b"x").starts_with("data:image/jpeg;base64,"));
    }
}
