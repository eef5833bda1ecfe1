//! Toast notifications.
//!
//! A context signal holds the queue; [`push_toast`] appends and schedules the
//! auto-dismiss. There is no stacking limit.

use dioxus::prelude::*;

/// How long a toast stays on screen.
const TOAST_MILLIS: u64 = 3_500;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Success,
    Error,
}

impl ToastLevel {
    pub fn class(self) -> &'static str {
        match self {
            ToastLevel::Info => "info",
            ToastLevel::Success => "success",
            ToastLevel::Error => "error",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub level: ToastLevel,
    pub message: String,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Toasts {
    entries: Vec<Toast>,
    next_id: u64,
}

impl Toasts {
    pub fn entries(&self) -> &[Toast] {
        &self.entries
    }

    /// Append a toast and return its id for later dismissal.
    pub fn push(&mut self, level: ToastLevel, message: &str) -> u64 {
        self.next_id += 1;
        let id = self.next_id;
        self.entries.push(Toast {
            id,
            level,
            message: message.to_string(),
        });
        id
    }

    pub fn dismiss(&mut self, id: u64) {
        self.entries.retain(|t| t.id != id);
    }
}

/// Get the toast queue signal.
pub fn use_toast() -> Signal<Toasts> {
    use_context::<Signal<Toasts>>()
}

/// Show a toast and dismiss it after the fixed delay.
pub fn push_toast(toasts: &mut Signal<Toasts>, level: ToastLevel, message: &str) {
    let id = toasts.write().push(level, message);
    let mut toasts = *toasts;
    spawn(async move {
        #[cfg(target_arch = "wasm32")]
        gloo_timers::future::sleep(std::time::Duration::from_millis(TOAST_MILLIS)).await;
        #[cfg(not(target_arch = "wasm32"))]
        tokio::time::sleep(std::time::Duration::from_millis(TOAST_MILLIS)).await;

        toasts.write().dismiss(id);
    });
}

/// Provider component that owns the queue and renders it.
/// Wrap the app with this so any page can call [`use_toast`].
#[component]
pub fn ToastProvider(children: Element) -> Element {
    use_context_provider(|| Signal::new(Toasts::default()));

    rsx! {
        {children}
        ToastHost {}
    }
}

#[component]
fn ToastHost() -> Element {
    let toasts = use_toast();
    let entries = toasts().entries().to_vec();

    rsx! {
        div {
            id: "toast-root",
            class: "toast-root",
            for toast in entries {
                div {
                    key: "{toast.id}",
                    class: "toast {toast.level.class()}",
                    "{toast.message}"
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_assigns_increasing_ids() {
        let mut toasts = Toasts::default();
        let a = toasts.push(ToastLevel::Info, "one");
        let b = toasts.push(ToastLevel::Error, "two");
        assert!(b > a);
        assert_eq!(toasts.entries().len(), 2);
    }

    #[test]
    fn test_dismiss_removes_only_matching_toast() {
        let mut toasts = Toasts::default();
        let a = toasts.push(ToastLevel::Info, "one");
        let b = toasts.push(ToastLevel::Success, "two");

        toasts.dismiss(a);
        assert_eq!(toasts.entries().len(), 1);
        assert_eq!(toasts.entries()[0].id, b);

        // Dismissing an unknown id is a no-op.
        toasts.dismiss(999);
        assert_eq!(toasts.entries().len(), 1);
    }

    #[test]
    fn test_no_stacking_limit() {
        let mut toasts = Toasts::default();
        for i in 0..50 {
            toasts.push(ToastLevel::Info, &format!("toast {i}"));
        }
        assert_eq!(toasts.entries().len(), 50);
    }
}
