//! Entry page: backend connection credentials plus phone sign-in/sign-up.

use backend::{credentials, Backend};
use dioxus::prelude::*;

use ui::{push_toast, use_auth, use_toast, ToastLevel};

use crate::Route;

#[derive(Clone, Copy, PartialEq)]
enum Mode {
    SignIn,
    SignUp,
}

#[component]
pub fn Login() -> Element {
    let auth = use_auth();
    let mut toasts = use_toast();
    let nav = use_navigator();

    let mut url = use_signal(String::new);
    let mut key = use_signal(String::new);
    let mut phone = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut mode = use_signal(|| Mode::SignIn);
    let mut busy = use_signal(|| false);

    // Prefill stored connection credentials.
    use_effect(move || {
        let store = ui::shared_store();
        if let Some(creds) = credentials::load_credentials(store.as_ref()) {
            url.set(creds.url);
            key.set(creds.key);
        }
    });

    // Already signed in with a known role: straight to that dashboard.
    use_effect(move || {
        if let Some(role) = auth().user.as_ref().and_then(|u| u.role()) {
            nav.replace(Route::for_role(role));
        }
    });

    let handle_submit = move |_| async move {
        if busy() {
            return;
        }
        let Some(client) = ui::init_backend(&url(), &key()) else {
            push_toast(
                &mut toasts,
                ToastLevel::Error,
                "Enter the database URL and key first",
            );
            return;
        };

        busy.set(true);
        let result = match mode() {
            Mode::SignIn => client.sign_in_phone(&phone(), &password()).await,
            Mode::SignUp => client.sign_up_phone(&phone(), &password()).await,
        };
        match result {
            Ok(session) => match client.fetch_user(&session.user_id).await {
                Ok(Some(profile)) => match profile.role() {
                    Some(role) => {
                        nav.replace(Route::for_role(role));
                    }
                    None => {
                        push_toast(&mut toasts, ToastLevel::Error, "Unknown account role");
                    }
                },
                Ok(None) => {
                    push_toast(&mut toasts, ToastLevel::Error, "No profile found for this account");
                }
                Err(err) => {
                    push_toast(&mut toasts, ToastLevel::Error, &err.to_string());
                }
            },
            Err(err) => {
                // Provider message, verbatim.
                push_toast(&mut toasts, ToastLevel::Error, &err.to_string());
            }
        }
        busy.set(false);
    };

    let handle_reset = move |_| async move {
        let Some(client) = ui::make_backend() else {
            push_toast(&mut toasts, ToastLevel::Error, "Enter the database URL and key first");
            return;
        };
        match client.reset_password(&phone()).await {
            Ok(()) => push_toast(&mut toasts, ToastLevel::Info, "Password reset requested"),
            Err(err) => push_toast(&mut toasts, ToastLevel::Error, &err.to_string()),
        }
    };

    rsx! {
        div {
            class: "login-page",

            h1 { class: "login-title", "🌸 Petal Rush" }

            div {
                class: "login-card",

                h2 { "Connection" }
                label { r#for: "db-url", "Database URL" }
                input {
                    id: "db-url",
                    value: "{url}",
                    placeholder: "https://project.example.co",
                    oninput: move |evt| url.set(evt.value()),
                }
                label { r#for: "db-key", "Anon key" }
                input {
                    id: "db-key",
                    value: "{key}",
                    placeholder: "public anon key",
                    oninput: move |evt| key.set(evt.value()),
                }

                h2 {
                    if mode() == Mode::SignIn { "Sign in" } else { "Create account" }
                }
                label { r#for: "phone", "Phone" }
                input {
                    id: "phone",
                    value: "{phone}",
                    placeholder: "+91…",
                    oninput: move |evt| phone.set(evt.value()),
                }
                label { r#for: "password", "Password" }
                input {
                    id: "password",
                    r#type: "password",
                    value: "{password}",
                    oninput: move |evt| password.set(evt.value()),
                }

                button {
                    class: "btn btn-primary",
                    disabled: busy(),
                    onclick: handle_submit,
                    if busy() {
                        "Please wait…"
                    } else if mode() == Mode::SignIn {
                        "Sign in"
                    } else {
                        "Sign up"
                    }
                }

                div {
                    class: "login-links",
                    button {
                        class: "btn-link",
                        onclick: move |_| {
                            mode.set(if mode() == Mode::SignIn { Mode::SignUp } else { Mode::SignIn });
                        },
                        if mode() == Mode::SignIn { "New here? Create an account" } else { "Have an account? Sign in" }
                    }
                    button {
                        class: "btn-link",
                        onclick: handle_reset,
                        "Forgot password?"
                    }
                }
            }
        }
    }
}
