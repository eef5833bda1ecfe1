//! Single-panel-visible switching within a dashboard page.

use dioxus::prelude::*;

/// Id of the currently visible panel.
pub fn use_panels() -> Signal<String> {
    use_context::<Signal<String>>()
}

/// Provides the active-panel signal, starting on `initial`.
#[component]
pub fn PanelHost(initial: String, children: Element) -> Element {
    use_context_provider(|| Signal::new(initial.clone()));

    rsx! {
        {children}
    }
}

/// A panel that renders only while it is the active one.
#[component]
pub fn Panel(id: String, children: Element) -> Element {
    let active = use_panels();

    rsx! {
        section {
            id: "panel-{id}",
            class: if active() == id { "panel active" } else { "panel" },
            style: if active() == id { "" } else { "display:none" },
            {children}
        }
    }
}
