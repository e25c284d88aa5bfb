//! DOM and Web API utility functions.

use js_sys::Uint8Array;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use web_sys::{File, Window};

/// Get the browser window object.
#[inline]
pub fn window() -> Option<Window> {
    web_sys::window()
}

/// Ask the user to confirm a destructive action.
///
/// Returns `false` when no dialog can be shown.
pub fn confirm(message: &str) -> bool {
    window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(false)
}

/// Scroll the page back to the top, e.g. after a route change.
pub fn scroll_to_top() {
    if let Some(window) = window() {
        window.scroll_to_with_x_and_y(0.0, 0.0);
    }
}

/// Log a diagnostic line to the browser console.
pub fn log(message: &str) {
    web_sys::console::log_1(&JsValue::from_str(message));
}

/// Read the full contents of a picked file.
pub async fn read_file(file: &File) -> Result<Vec<u8>, String> {
    let buffer = JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| format!("Failed to read {}: {:?}", file.name(), e))?;
    Ok(Uint8Array::new(&buffer).to_vec())
}
