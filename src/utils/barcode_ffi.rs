// ============================================================================
// BARCODE SCANNER FFI - Foreign Function Interface para JavaScript
// ============================================================================
// Wrappers para static/scanner_bridge.js (BarcodeDetector + getUserMedia)
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use crate::models::{DetectedCode, ScannerConfig};

#[wasm_bindgen]
extern "C" {
    /// Arranca la cámara dentro de `container_id`.
    /// `on_scan` recibe un array `[{ rawValue }]`, `on_error` un Error/objeto con `message`.
    #[wasm_bindgen(js_name = startCodeScanner)]
    pub fn start_code_scanner(
        container_id: &str,
        formats: &js_sys::Array,
        on_scan: &js_sys::Function,
        on_error: &js_sys::Function,
    );

    #[wasm_bindgen(js_name = stopCodeScanner)]
    pub fn stop_code_scanner();
}

/// Lista de formatos como array JS de strings
pub fn formats_to_js(config: &ScannerConfig) -> js_sys::Array {
    config
        .format_names()
        .into_iter()
        .map(JsValue::from_str)
        .collect()
}

/// Extraer `rawValue` de cada código detectado; ignora entradas sin string
pub fn detected_codes_from_js(value: &JsValue) -> Vec<DetectedCode> {
    let Some(array) = value.dyn_ref::<js_sys::Array>() else {
        return Vec::new();
    };
    array
        .iter()
        .filter_map(|item| {
            js_sys::Reflect::get(&item, &JsValue::from_str("rawValue"))
                .ok()
                .and_then(|raw| raw.as_string())
        })
        .map(DetectedCode::new)
        .collect()
}

/// Mensaje legible de un error JS (string o `error.message`)
pub fn error_message_from_js(value: &JsValue) -> Option<String> {
    if let Some(text) = value.as_string() {
        return Some(text);
    }
    if value.is_undefined() || value.is_null() {
        return None;
    }
    js_sys::Reflect::get(value, &JsValue::from_str("message"))
        .ok()
        .and_then(|message| message.as_string())
}
