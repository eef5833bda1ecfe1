use dioxus::prelude::*;

use ui::{AuthProvider, ToastProvider};
use views::{AdminDashboard, BuyerDashboard, DeliveryDashboard, Login, SellerDashboard, Settings};

mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[route("/")]
    Login {},
    #[route("/buyer")]
    BuyerDashboard {},
    #[route("/seller")]
    SellerDashboard {},
    #[route("/delivery")]
    DeliveryDashboard {},
    #[route("/admin")]
    AdminDashboard {},
    #[route("/settings")]
    Settings {},
    #[route("/:..segments")]
    PathRedirect { segments: Vec<String> },
}

impl Route {
    /// Dashboard route for a role, used after sign-in.
    fn for_role(role: backend::Role) -> Route {
        match role {
            backend::Role::Buyer => Route::BuyerDashboard {},
            backend::Role::Seller => Route::SellerDashboard {},
            backend::Role::Delivery => Route::DeliveryDashboard {},
            backend::Role::Admin => Route::AdminDashboard {},
        }
    }
}

/// In-app route for a path the table doesn't know. The guard redirects with
/// multi-page relative targets ("../seller/", "index.html"); after the
/// browser resolves those against the current URL they land here and get
/// normalized back onto a dashboard or the login page.
fn redirect_route(segments: &[String]) -> Route {
    segments
        .iter()
        .find(|s| !s.is_empty())
        .and_then(|s| backend::Role::parse(s))
        .map(Route::for_role)
        .unwrap_or(Route::Login {})
}

#[component]
fn PathRedirect(segments: Vec<String>) -> Element {
    let nav = use_navigator();
    let target = redirect_route(&segments);

    use_effect(move || {
        nav.replace(target.clone());
    });

    rsx! {
        div { class: "guard-pending" }
    }
}

const MAIN_CSS: Asset = asset!("/assets/main.css");

fn main() {
    // Stored theme goes on the document before anything renders.
    ui::init_theme();
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: MAIN_CSS }

        ToastProvider {
            AuthProvider {
                Router::<Route> {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_trailing_slash_paths_reach_the_redirect_route() {
        // "../seller/" resolved from "/buyer" is "/seller/", which the static
        // routes don't match.
        assert!(matches!(
            Route::from_str("/seller/"),
            Ok(Route::PathRedirect { .. })
        ));
        assert!(matches!(
            Route::from_str("/index.html"),
            Ok(Route::PathRedirect { .. })
        ));
        assert!(matches!(
            Route::from_str("/buyer"),
            Ok(Route::BuyerDashboard {})
        ));
    }

    #[test]
    fn test_redirect_route_normalizes_guard_targets() {
        let seller = vec!["seller".to_string(), String::new()];
        assert_eq!(redirect_route(&seller), Route::SellerDashboard {});

        let delivery = vec!["delivery".to_string()];
        assert_eq!(redirect_route(&delivery), Route::DeliveryDashboard {});

        let index = vec!["index.html".to_string()];
        assert_eq!(redirect_route(&index), Route::Login {});

        assert_eq!(redirect_route(&[]), Route::Login {});
    }
}
