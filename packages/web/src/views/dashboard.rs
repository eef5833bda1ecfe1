//! Role dashboards. Each page is the role guard around a shared shell; the
//! shell wires the sidebar, panels, badges, and formatters together.

use backend::Role;
use dioxus::prelude::*;

use ui::{
    format, status_badge, use_auth, use_document_escape, use_sidebar, Avatar, Badge, LogoutButton,
    NavItem, Panel, PanelHost, PaymentMethod, RequireRole, RoleBadge, Sidebar, SidebarProvider,
    ThemeToggle,
};

use crate::Route;

#[component]
pub fn BuyerDashboard() -> Element {
    rsx! {
        RequireRole { required: Role::Buyer, DashboardShell { role: Role::Buyer } }
    }
}

#[component]
pub fn SellerDashboard() -> Element {
    rsx! {
        RequireRole { required: Role::Seller, DashboardShell { role: Role::Seller } }
    }
}

#[component]
pub fn DeliveryDashboard() -> Element {
    rsx! {
        RequireRole { required: Role::Delivery, DashboardShell { role: Role::Delivery } }
    }
}

#[component]
pub fn AdminDashboard() -> Element {
    rsx! {
        RequireRole { required: Role::Admin, DashboardShell { role: Role::Admin } }
    }
}

#[component]
fn DashboardShell(role: Role) -> Element {
    rsx! {
        SidebarProvider {
            PanelHost {
                initial: "overview",
                ShellLayout { role: role }
            }
        }
    }
}

#[component]
fn ShellLayout(role: Role) -> Element {
    let auth = use_auth();
    let mut sidebar = use_sidebar();
    let nav = use_navigator();

    // Escape dismisses the sidebar, as it does for open modals.
    use_document_escape(EventHandler::new(move |_| sidebar.set(false)));

    rsx! {
        div {
            class: "shell",

            header {
                class: "topbar",
                button {
                    class: "sidebar-trigger",
                    onclick: move |_| {
                        let open = sidebar();
                        sidebar.set(!open);
                    },
                    "☰"
                }
                span { class: "topbar-title", "Petal Rush" }
                RoleBadge { role: Some(role) }
                div { class: "topbar-spacer" }
                ThemeToggle {}
                button {
                    class: "btn-link",
                    onclick: move |_| { nav.push(Route::Settings {}); },
                    "Settings"
                }
                LogoutButton { class: "btn-link" }
            }

            Sidebar {
                div {
                    class: "sidebar-user",
                    if let Some(user) = auth().user {
                        Avatar { profile: user.clone(), size_class: "av-md" }
                        span { class: "sidebar-user-name", "{user.display_name()}" }
                    }
                }
                nav {
                    class: "sidebar-nav",
                    NavItem { id: "overview", label: "Overview", icon: "🏠" }
                    NavItem { id: "orders", label: "Orders", icon: "📦" }
                    NavItem { id: "profile", label: "Profile", icon: "👤" }
                }
            }

            main {
                class: "content",
                OverviewPanel { role: role }
                OrdersPanel {}
                ProfilePanel {}
            }
        }
    }
}

#[component]
fn OverviewPanel(role: Role) -> Element {
    let auth = use_auth();
    let name = auth()
        .user
        .as_ref()
        .map(|u| u.display_name().to_string())
        .unwrap_or_default();

    rsx! {
        Panel {
            id: "overview",
            h1 { "Welcome back, {name}" }
            div {
                class: "stat-row",
                div {
                    class: "stat-card",
                    span { class: "stat-label", "Wallet" }
                    span { class: "stat-value", {format::fmt_currency(124_500)} }
                }
                div {
                    class: "stat-card",
                    span { class: "stat-label", "Member since" }
                    span { class: "stat-value", {format::fmt_date("2025-11-02")} }
                }
                div {
                    class: "stat-card",
                    span { class: "stat-label", "Dashboard" }
                    RoleBadge { role: Some(role) }
                }
            }
        }
    }
}

#[component]
fn OrdersPanel() -> Element {
    // Order data itself comes from page-specific queries; the rows here show
    // the badge and formatter wiring.
    let rows = [
        ("ord-7f3c2a918d41", "placed", PaymentMethod::Cod, 1_499, "2026-02-11"),
        ("ord-22ba90cf6e55", "delivered", PaymentMethod::Online, 24_350, "2026-01-30"),
        ("ord-91d00e4ab7c3", "cancelled", PaymentMethod::Cod, 820, "2026-01-12"),
    ];

    rsx! {
        Panel {
            id: "orders",
            h1 { "Orders" }
            table {
                class: "orders-table",
                thead {
                    tr {
                        th { "Order" }
                        th { "Status" }
                        th { "Payment" }
                        th { "Total" }
                        th { "Placed" }
                    }
                }
                tbody {
                    for (id, status, payment, total, date) in rows {
                        tr {
                            key: "{id}",
                            td { {format::short_id(id)} }
                            td { Badge { view: status_badge(status) } }
                            td { Badge { view: payment.badge() } }
                            td { {format::fmt_currency(total)} }
                            td { {format::fmt_date(date)} }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn ProfilePanel() -> Element {
    let auth = use_auth();

    rsx! {
        Panel {
            id: "profile",
            h1 { "Profile" }
            if let Some(user) = auth().user {
                div {
                    class: "profile-row",
                    Avatar { profile: user.clone(), size_class: "av-xl" }
                    div {
                        span { class: "profile-name", "{user.display_name()}" }
                        span { class: "profile-id", {format::short_id(&user.id)} }
                        Badge { view: status_badge("verified") }
                    }
                }
            }
            p {
                class: "profile-hint",
                "Change your photo and address from the settings page."
            }
        }
    }
}
