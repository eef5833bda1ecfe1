//! Sidebar navigation with an overlay for small screens.
//!
//! One boolean context signal drives the open state. Escape closes the
//! sidebar (wired up by the app shell's key handler), selecting a nav item
//! closes it too.

use dioxus::prelude::*;

/// Open state of the sidebar.
pub fn use_sidebar() -> Signal<bool> {
    use_context::<Signal<bool>>()
}

/// Provides the open-state signal to the subtree.
#[component]
pub fn SidebarProvider(children: Element) -> Element {
    use_context_provider(|| Signal::new(false));

    rsx! {
        {children}
    }
}

/// The sidebar itself. Pages put [`NavItem`]s and anything else inside.
#[component]
pub fn Sidebar(children: Element) -> Element {
    let open = use_sidebar();

    rsx! {
        aside {
            id: "sidebar",
            class: if open() { "sidebar open" } else { "sidebar" },
            {children}
        }
        SidebarOverlay {}
    }
}

/// Click-away overlay shown while the sidebar is open.
#[component]
pub fn SidebarOverlay() -> Element {
    let mut open = use_sidebar();

    rsx! {
        div {
            id: "sb-overlay",
            class: if open() { "sb-overlay visible" } else { "sb-overlay" },
            onclick: move |_| open.set(false),
        }
    }
}

/// Nav entry that activates a panel and closes the sidebar.
#[component]
pub fn NavItem(id: String, label: String, #[props(default = "".to_string())] icon: String) -> Element {
    let mut active_panel = crate::panels::use_panels();
    let mut open = use_sidebar();
    let is_active = active_panel() == id;

    rsx! {
        button {
            class: if is_active { "nav-item active" } else { "nav-item" },
            onclick: move |_| {
                active_panel.set(id.clone());
                open.set(false);
            },
            if !icon.is_empty() {
                span { class: "nav-icon", "{icon}" }
            }
            span { "{label}" }
        }
    }
}
