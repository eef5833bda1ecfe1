//! Settings: connection credentials, theme, avatar, delivery address.

use backend::credentials;
use dioxus::prelude::*;

use ui::{
    push_toast, redirect_to_login, use_auth, use_toast, DetectLocationButton, ModalOverlay,
    ThemeToggle, ToastLevel, UploadableAvatar,
};

#[component]
pub fn Settings() -> Element {
    let auth = use_auth();
    let mut toasts = use_toast();

    let mut url = use_signal(String::new);
    let mut key = use_signal(String::new);
    let mut address = use_signal(String::new);
    let mut show_disconnect = use_signal(|| false);

    use_effect(move || {
        let store = ui::shared_store();
        if let Some(creds) = credentials::load_credentials(store.as_ref()) {
            url.set(creds.url);
            key.set(creds.key);
        }
    });

    let handle_save = move |_| {
        // Replaces the stored credentials; in-flight calls finish against the
        // old client.
        match ui::init_backend(&url(), &key()) {
            Some(_) => push_toast(&mut toasts, ToastLevel::Success, "Connection saved"),
            None => push_toast(
                &mut toasts,
                ToastLevel::Error,
                "Both the URL and the key are required",
            ),
        }
    };

    rsx! {
        div {
            class: "settings-page",

            h1 { "Settings" }

            section {
                class: "settings-section",
                h2 { "Appearance" }
                ThemeToggle {}
            }

            if auth().user.is_some() {
                section {
                    class: "settings-section",
                    h2 { "Profile photo" }
                    UploadableAvatar {}
                    p { class: "settings-hint", "JPG, PNG or WEBP, up to 2 MB." }
                }

                section {
                    class: "settings-section",
                    h2 { "Delivery address" }
                    textarea {
                        class: "address-input",
                        value: "{address}",
                        placeholder: "Street, area, city",
                        oninput: move |evt| address.set(evt.value()),
                    }
                    DetectLocationButton {
                        on_detected: move |detected: String| address.set(detected),
                    }
                }
            }

            section {
                class: "settings-section",
                h2 { "Connection" }
                label { r#for: "set-url", "Database URL" }
                input {
                    id: "set-url",
                    value: "{url}",
                    oninput: move |evt| url.set(evt.value()),
                }
                label { r#for: "set-key", "Anon key" }
                input {
                    id: "set-key",
                    value: "{key}",
                    oninput: move |evt| key.set(evt.value()),
                }
                button {
                    class: "btn btn-primary",
                    onclick: handle_save,
                    "Save connection"
                }
                button {
                    class: "btn btn-danger",
                    onclick: move |_| show_disconnect.set(true),
                    "Disconnect"
                }
            }

            if show_disconnect() {
                ModalOverlay {
                    on_close: move |_| show_disconnect.set(false),
                    div {
                        class: "confirm-dialog",
                        p { "Forget the stored connection and sign out?" }
                        button {
                            class: "btn btn-danger",
                            onclick: move |_| {
                                ui::clear_backend();
                                redirect_to_login();
                            },
                            "Disconnect"
                        }
                        button {
                            class: "btn",
                            onclick: move |_| show_disconnect.set(false),
                            "Cancel"
                        }
                    }
                }
            }
        }
    }
}
