//! Authentication context and the role guard.
//!
//! Every protected page wraps its content in [`RequireRole`]. The guard
//! resolves to exactly one of the [`GuardOutcome`] terminal states: the page
//! either gets the profile or the browser is redirected away. There are no
//! retries; a failure at any step is a hard stop.

use backend::{Backend, Role, UserProfile};
use dioxus::prelude::*;

/// Authentication state for the application.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthState {
    pub user: Option<UserProfile>,
    pub loading: bool,
}

impl Default for AuthState {
    fn default() -> Self {
        Self {
            user: None,
            loading: true,
        }
    }
}

/// Get the current authentication state.
/// Returns a signal that updates when the user logs in or out.
pub fn use_auth() -> Signal<AuthState> {
    use_context::<Signal<AuthState>>()
}

/// Provider component that manages authentication state.
/// Wrap your app with this component to enable authentication.
#[component]
pub fn AuthProvider(children: Element) -> Element {
    let mut auth_state = use_signal(AuthState::default);

    // Fetch the current user on mount
    let _ = use_resource(move || async move {
        let user = match crate::client::make_backend() {
            Some(backend) => current_user(&backend).await,
            None => None,
        };
        auth_state.set(AuthState {
            user,
            loading: false,
        });
    });

    use_context_provider(|| auth_state);

    rsx! {
        {children}
    }
}

/// Fetch the profile row for the active session, if any.
pub async fn current_user<B: Backend>(backend: &B) -> Option<UserProfile> {
    let session = backend.session().await.ok().flatten()?;
    backend.fetch_user(&session.user_id).await.ok().flatten()
}

/// Terminal state of the page-access state machine.
#[derive(Debug, Clone, PartialEq)]
pub enum GuardOutcome {
    /// Unconfigured or unauthenticated: back to the login page.
    RedirectLogin,
    /// Banned account: session is cleared, the message is shown, then login.
    SignOutRedirectLogin { message: String },
    /// Authenticated under a different role: that role's own landing page,
    /// or the generic index for roles this client doesn't know.
    RedirectTo(String),
    Authorized(UserProfile),
}

/// Pure access decision for a protected page.
pub fn evaluate_guard(
    configured: bool,
    profile: Option<UserProfile>,
    required: Role,
) -> GuardOutcome {
    if !configured {
        return GuardOutcome::RedirectLogin;
    }
    let Some(profile) = profile else {
        return GuardOutcome::RedirectLogin;
    };
    if profile.is_banned {
        return GuardOutcome::SignOutRedirectLogin {
            message: "Your account has been suspended. Contact support.".to_string(),
        };
    }
    match profile.role() {
        Some(role) if role == required => GuardOutcome::Authorized(profile),
        Some(other) => GuardOutcome::RedirectTo(other.landing_path().to_string()),
        None => GuardOutcome::RedirectTo("../index.html".to_string()),
    }
}

/// Drive [`evaluate_guard`] from live backend calls.
///
/// `None` means no client could be built from storage; no call is made.
/// A banned profile is signed out here, before the caller redirects.
pub async fn require_role<B: Backend>(backend: Option<&B>, required: Role) -> GuardOutcome {
    let Some(backend) = backend else {
        return GuardOutcome::RedirectLogin;
    };
    let profile = current_user(backend).await;
    let outcome = evaluate_guard(true, profile, required);
    if let GuardOutcome::SignOutRedirectLogin { .. } = &outcome {
        if let Err(err) = backend.sign_out().await {
            tracing::warn!("sign-out for banned account failed: {err}");
        }
    }
    outcome
}

/// Root entry page relative to the current path depth, so `/buyer/orders`
/// resolves to `../index.html` while `/` stays at `index.html`.
pub fn login_path(pathname: &str) -> String {
    let depth = pathname.split('/').count().saturating_sub(2);
    if depth > 1 {
        format!("{}index.html", "../".repeat(depth - 1))
    } else {
        "index.html".to_string()
    }
}

/// Navigate the browser. On native targets this only logs, which keeps the
/// guard testable off-browser.
pub fn redirect(href: &str) {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(window) = web_sys::window() {
            let _ = window.location().set_href(href);
        }
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        tracing::debug!("redirect: {href}");
    }
}

/// Redirect to the root entry page, computed from the current location.
pub fn redirect_to_login() {
    #[cfg(target_arch = "wasm32")]
    {
        let pathname = web_sys::window()
            .and_then(|w| w.location().pathname().ok())
            .unwrap_or_default();
        redirect(&login_path(&pathname));
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        redirect("index.html");
    }
}

fn alert(message: &str) {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(window) = web_sys::window() {
            let _ = window.alert_with_message(message);
        }
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        tracing::warn!("{message}");
    }
}

/// Sign out (if a client exists) and return to the login page.
pub async fn logout() {
    if let Some(backend) = crate::client::make_backend() {
        if let Err(err) = backend.sign_out().await {
            tracing::warn!("sign-out failed: {err}");
        }
    }
    redirect_to_login();
}

/// Page wrapper that renders its children only once the guard authorizes the
/// current user for `required`. Everyone else is redirected away.
#[component]
pub fn RequireRole(required: Role, children: Element) -> Element {
    let mut auth_state = use_auth();
    let mut outcome = use_signal(|| Option::<GuardOutcome>::None);

    let _guard = use_resource(move || async move {
        let result = match crate::client::make_backend() {
            Some(backend) => require_role(Some(&backend), required).await,
            None => GuardOutcome::RedirectLogin,
        };
        match &result {
            GuardOutcome::Authorized(profile) => {
                auth_state.set(AuthState {
                    user: Some(profile.clone()),
                    loading: false,
                });
            }
            GuardOutcome::SignOutRedirectLogin { message } => {
                alert(message);
                redirect_to_login();
            }
            GuardOutcome::RedirectLogin => redirect_to_login(),
            GuardOutcome::RedirectTo(path) => redirect(path),
        }
        outcome.set(Some(result));
    });

    match outcome() {
        Some(GuardOutcome::Authorized(_)) => rsx! {
            {children}
        },
        _ => rsx! {
            div { class: "guard-pending" }
        },
    }
}

/// Button to log out the current user.
#[component]
pub fn LogoutButton(
    #[props(default = "Log out".to_string())] label: String,
    #[props(default = "".to_string())] class: String,
) -> Element {
    let mut auth_state = use_auth();

    let onclick = move |_| async move {
        auth_state.set(AuthState {
            user: None,
            loading: false,
        });
        logout().await;
    };

    rsx! {
        button {
            class: "{class}",
            onclick: onclick,
            "{label}"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use backend::MemoryBackend;

    fn profile(role: &str, banned: bool) -> UserProfile {
        UserProfile {
            id: "u1".into(),
            name: Some("Asha".into()),
            role: role.into(),
            is_banned: banned,
            avatar_url: None,
        }
    }

    #[test]
    fn test_unconfigured_redirects_to_login() {
        let outcome = evaluate_guard(false, Some(profile("buyer", false)), Role::Buyer);
        assert_eq!(outcome, GuardOutcome::RedirectLogin);
    }

    #[test]
    fn test_missing_profile_redirects_to_login() {
        assert_eq!(
            evaluate_guard(true, None, Role::Buyer),
            GuardOutcome::RedirectLogin
        );
    }

    #[test]
    fn test_banned_user_never_gets_profile_back() {
        for role in ["buyer", "seller", "delivery", "admin"] {
            let outcome = evaluate_guard(true, Some(profile(role, true)), Role::Buyer);
            assert!(matches!(outcome, GuardOutcome::SignOutRedirectLogin { .. }));
        }
    }

    #[test]
    fn test_wrong_role_redirects_to_own_landing_page() {
        for (role, landing) in [
            (Role::Seller, "../seller/"),
            (Role::Delivery, "../delivery/"),
            (Role::Admin, "../admin/"),
        ] {
            let outcome = evaluate_guard(true, Some(profile(role.as_str(), false)), Role::Buyer);
            assert_eq!(outcome, GuardOutcome::RedirectTo(landing.to_string()));
        }
    }

    #[test]
    fn test_unknown_role_falls_back_to_generic_index() {
        let outcome = evaluate_guard(true, Some(profile("auditor", false)), Role::Buyer);
        assert_eq!(outcome, GuardOutcome::RedirectTo("../index.html".to_string()));
    }

    #[test]
    fn test_matching_role_is_authorized() {
        let p = profile("buyer", false);
        let outcome = evaluate_guard(true, Some(p.clone()), Role::Buyer);
        assert_eq!(outcome, GuardOutcome::Authorized(p));
    }

    #[test]
    fn test_login_path_depth() {
        // One level below the served root stays relative to it.
        assert_eq!(login_path("/index.html"), "index.html");
        assert_eq!(login_path("/buyer/index.html"), "index.html");
        assert_eq!(login_path("/app/buyer/index.html"), "../index.html");
        assert_eq!(login_path("/app/buyer/orders/index.html"), "../../index.html");
    }

    #[tokio::test]
    async fn test_no_client_means_no_backend_call() {
        let outcome = require_role::<MemoryBackend>(None, Role::Buyer).await;
        assert_eq!(outcome, GuardOutcome::RedirectLogin);
    }

    #[tokio::test]
    async fn test_guard_happy_path_returns_profile() {
        let backend = MemoryBackend::new()
            .with_user(profile("buyer", false))
            .with_session_for("u1");
        let outcome = require_role(Some(&backend), Role::Buyer).await;
        assert_eq!(outcome, GuardOutcome::Authorized(profile("buyer", false)));
    }

    #[tokio::test]
    async fn test_guard_without_session_redirects() {
        let backend = MemoryBackend::new().with_user(profile("buyer", false));
        let outcome = require_role(Some(&backend), Role::Buyer).await;
        assert_eq!(outcome, GuardOutcome::RedirectLogin);
        // Session check happened, but no row was fetched.
        assert_eq!(backend.calls().user_fetches, 0);
    }

    #[tokio::test]
    async fn test_guard_signs_out_banned_user() {
        let backend = MemoryBackend::new()
            .with_user(profile("buyer", true))
            .with_session_for("u1");
        let outcome = require_role(Some(&backend), Role::Buyer).await;
        assert!(matches!(outcome, GuardOutcome::SignOutRedirectLogin { .. }));
        assert_eq!(backend.calls().sign_outs, 1);
        assert!(backend.session().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_guard_seller_on_buyer_page() {
        let backend = MemoryBackend::new()
            .with_user(profile("seller", false))
            .with_session_for("u1");
        let outcome = require_role(Some(&backend), Role::Buyer).await;
        assert_eq!(outcome, GuardOutcome::RedirectTo("../seller/".to_string()));
    }
}
