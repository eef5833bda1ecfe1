use dioxus::prelude::*;

#[cfg(any(target_arch = "wasm32", test))]
fn is_escape(key: &str) -> bool {
    key == "Escape"
}

/// Run `on_escape` for Escape keydowns anywhere in the document while the
/// caller is mounted. Keydown events dispatch to the focused element, which
/// usually sits outside the overlay (the button that opened it keeps focus),
/// so a handler on the overlay itself would never fire. The listener is
/// removed when the caller unmounts.
pub fn use_document_escape(on_escape: EventHandler<()>) {
    #[cfg(target_arch = "wasm32")]
    {
        use std::rc::Rc;
        use wasm_bindgen::prelude::*;
        use wasm_bindgen::JsCast;

        let listener = use_hook(|| {
            let closure = Closure::<dyn FnMut(web_sys::KeyboardEvent)>::new(
                move |evt: web_sys::KeyboardEvent| {
                    if is_escape(&evt.key()) {
                        on_escape.call(());
                    }
                },
            );
            if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                let _ = document
                    .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            }
            Rc::new(closure)
        });

        use_drop(move || {
            if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                let _ = document.remove_event_listener_with_callback(
                    "keydown",
                    (*listener).as_ref().unchecked_ref(),
                );
            }
        });
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = on_escape;
    }
}

/// A full-screen overlay that centers its children in a modal card.
/// Clicking outside the card or pressing Escape triggers `on_close`.
#[component]
pub fn ModalOverlay(on_close: EventHandler<()>, children: Element) -> Element {
    use_document_escape(on_close);

    rsx! {
        div {
            class: "modal-overlay",
            onclick: move |_| on_close.call(()),
            div {
                class: "modal-card",
                onclick: move |evt: Event<MouseData>| evt.stop_propagation(),
                {children}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_escape_dismisses() {
        assert!(is_escape("Escape"));
        assert!(!is_escape("Esc"));
        assert!(!is_escape("Enter"));
        assert!(!is_escape(""));
    }
}
