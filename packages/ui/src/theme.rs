//! Light/dark theme preference.
//!
//! The flag lives in local storage under `pr_theme` and is applied by setting
//! `data-theme` on the document element. [`init_theme`] runs before the first
//! render so the page never flashes the wrong theme. No backend involved.

use backend::credentials::THEME_KEY;
use backend::KeyValueStore;
use dioxus::prelude::*;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Unknown stored values fall back to dark.
    pub fn parse(raw: &str) -> Theme {
        match raw {
            "light" => Theme::Light,
            _ => Theme::Dark,
        }
    }

    pub fn toggled(self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Icon shown on the toggle button: the theme you would switch to.
    pub fn toggle_icon(self) -> &'static str {
        match self {
            Theme::Light => "🌙",
            Theme::Dark => "☀️",
        }
    }

    pub fn toggle_title(self) -> &'static str {
        match self {
            Theme::Light => "Switch to Dark Mode",
            Theme::Dark => "Switch to Light Mode",
        }
    }
}

/// Stored preference, defaulting to dark.
pub fn load_theme(store: &dyn KeyValueStore) -> Theme {
    store
        .get(THEME_KEY)
        .map(|raw| Theme::parse(&raw))
        .unwrap_or_default()
}

/// Persist and apply a theme.
pub fn apply_theme(store: &dyn KeyValueStore, theme: Theme) {
    store.set(THEME_KEY, theme.as_str());
    set_document_theme(theme);
}

/// Flip the stored theme, apply it, and return the new value.
pub fn toggle_theme(store: &dyn KeyValueStore) -> Theme {
    let next = load_theme(store).toggled();
    apply_theme(store, next);
    next
}

/// Apply the stored theme synchronously. Call before launching the app.
pub fn init_theme() {
    let store = crate::client::shared_store();
    set_document_theme(load_theme(store.as_ref()));
}

fn set_document_theme(theme: Theme) {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(root) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.document_element())
        {
            let _ = root.set_attribute("data-theme", theme.as_str());
        }
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        tracing::debug!("theme: {}", theme.as_str());
    }
}

/// Button that flips between light and dark.
#[component]
pub fn ThemeToggle() -> Element {
    let store = crate::client::shared_store();
    let mut theme = use_signal(move || load_theme(store.as_ref()));

    rsx! {
        button {
            class: "theme-toggle",
            title: "{theme().toggle_title()}",
            onclick: move |_| {
                let store = crate::client::shared_store();
                theme.set(toggle_theme(store.as_ref()));
            },
            "{theme().toggle_icon()}"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use backend::MemoryStore;

    #[test]
    fn test_default_is_dark() {
        let store = MemoryStore::new();
        assert_eq!(load_theme(&store), Theme::Dark);
        assert_eq!(Theme::parse("solarized"), Theme::Dark);
    }

    #[test]
    fn test_toggle_persists() {
        let store = MemoryStore::new();
        assert_eq!(toggle_theme(&store), Theme::Light);
        assert_eq!(load_theme(&store), Theme::Light);
        assert_eq!(toggle_theme(&store), Theme::Dark);
        assert_eq!(load_theme(&store), Theme::Dark);
    }

    #[test]
    fn test_toggle_icon_points_at_other_theme() {
        assert_eq!(Theme::Light.toggle_icon(), "🌙");
        assert_eq!(Theme::Dark.toggle_icon(), "☀️");
    }
}
