//! Geolocation detection with reverse geocoding.
//!
//! Asks the browser for the current position (high accuracy, 8 s timeout),
//! then resolves it to a display name via the Nominatim reverse endpoint.
//! If the lookup fails the raw coordinates are used instead; only a missing
//! or denied position is an error.

use dioxus::prelude::*;
use serde::Deserialize;
use thiserror::Error;

use crate::toast::{push_toast, use_toast, ToastLevel};

const REVERSE_ENDPOINT: &str = "https://nominatim.openstreetmap.org/reverse";

/// Browser position timeout.
const POSITION_TIMEOUT_MS: u32 = 8_000;

#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum GeoError {
    #[error("Geolocation not supported by your browser")]
    Unsupported,
    #[error("Location access denied. Please allow location.")]
    Denied,
}

#[derive(Debug, Deserialize)]
struct ReverseGeocode {
    display_name: Option<String>,
}

/// Numeric fallback when the lookup fails.
pub fn fmt_coords(lat: f64, lon: f64) -> String {
    format!("{lat:.5}, {lon:.5}")
}

/// Resolve coordinates to a human-readable place name.
pub async fn reverse_geocode(lat: f64, lon: f64) -> Option<String> {
    let url = format!("{REVERSE_ENDPOINT}?lat={lat}&lon={lon}&format=json");
    let response = reqwest::get(&url).await.ok()?;
    let body: ReverseGeocode = response.json().await.ok()?;
    body.display_name
}

/// Detect the device location and return an address string.
pub async fn detect_location() -> Result<String, GeoError> {
    let (lat, lon) = current_position().await?;
    Ok(match reverse_geocode(lat, lon).await {
        Some(name) => name,
        None => fmt_coords(lat, lon),
    })
}

#[cfg(target_arch = "wasm32")]
async fn current_position() -> Result<(f64, f64), GeoError> {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen::JsCast;

    let geolocation = web_sys::window()
        .map(|w| w.navigator())
        .and_then(|n| n.geolocation().ok())
        .ok_or(GeoError::Unsupported)?;

    let (tx, rx) = futures::channel::oneshot::channel::<Result<(f64, f64), GeoError>>();
    // One sender shared by both callbacks; whichever fires first takes it.
    let shared = Rc::new(RefCell::new(Some(tx)));

    let ok_tx = shared.clone();
    let on_success = Closure::<dyn FnMut(web_sys::Position)>::new(move |pos: web_sys::Position| {
        let coords = pos.coords();
        if let Some(tx) = ok_tx.borrow_mut().take() {
            let _ = tx.send(Ok((coords.latitude(), coords.longitude())));
        }
    });

    let err_tx = shared.clone();
    let on_error = Closure::<dyn FnMut(web_sys::PositionError)>::new(
        move |_err: web_sys::PositionError| {
            if let Some(tx) = err_tx.borrow_mut().take() {
                let _ = tx.send(Err(GeoError::Denied));
            }
        },
    );

    let options = web_sys::PositionOptions::new();
    options.set_enable_high_accuracy(true);
    options.set_timeout(POSITION_TIMEOUT_MS);

    geolocation
        .get_current_position_with_error_callback_and_options(
            on_success.as_ref().unchecked_ref(),
            Some(on_error.as_ref().unchecked_ref()),
            &options,
        )
        .map_err(|_| GeoError::Unsupported)?;

    let result = rx.await.map_err(|_| GeoError::Denied)?;
    // Closures must outlive the browser callback.
    drop(on_success);
    drop(on_error);
    result
}

#[cfg(not(target_arch = "wasm32"))]
async fn current_position() -> Result<(f64, f64), GeoError> {
    Err(GeoError::Unsupported)
}

/// Button that fills an address field with the detected location.
#[component]
pub fn DetectLocationButton(on_detected: EventHandler<String>) -> Element {
    let mut toasts = use_toast();
    let mut locating = use_signal(|| false);

    let onclick = move |_| async move {
        if locating() {
            return;
        }
        locating.set(true);
        match detect_location().await {
            Ok(address) => {
                on_detected.call(address);
                push_toast(&mut toasts, ToastLevel::Success, "Location detected ✅");
            }
            Err(err) => {
                push_toast(&mut toasts, ToastLevel::Error, &err.to_string());
            }
        }
        locating.set(false);
    };

    rsx! {
        button {
            class: "gps-btn",
            disabled: locating(),
            onclick: onclick,
            if locating() {
                "📍 Locating…"
            } else {
                "📍 Detect location"
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fmt_coords_five_decimals() {
        assert_eq!(fmt_coords(18.52043, 73.856743), "18.52043, 73.85674");
        assert_eq!(fmt_coords(-33.9, 151.2), "-33.90000, 151.20000");
    }

    #[test]
    fn test_reverse_geocode_body_parses() {
        let body: ReverseGeocode =
            serde_json::from_str(r#"{"display_name":"Pune, Maharashtra, India"}"#).unwrap();
        assert_eq!(body.display_name.as_deref(), Some("Pune, Maharashtra, India"));

        let empty: ReverseGeocode = serde_json::from_str("{}").unwrap();
        assert!(empty.display_name.is_none());
    }

    #[tokio::test]
    async fn test_native_position_is_unsupported() {
        assert_eq!(detect_location().await, Err(GeoError::Unsupported));
    }
}
