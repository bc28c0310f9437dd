// ============================================================================
// SCANNER SERVICE - Puente con el colaborador de cámara/decodificación
// ============================================================================
// SOLO comunicación con JS: el reconocimiento lo hace scanner_bridge.js
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use crate::models::{DetectedCode, ScannerConfig};
use crate::utils::barcode_ffi;

/// Notificaciones entrantes desde el scanner
pub trait ScanEvents {
    /// Códigos detectados; solo se usa el primero
    fn on_codes_detected(&self, codes: &[DetectedCode]);
    fn on_scan_error(&self, message: Option<&str>);
}

type ScanClosure = Closure<dyn FnMut(JsValue)>;

/// Arranca/para la cámara y reenvía eventos a un `ScanEvents`.
/// Mantiene vivos los closures mientras la cámara está activa.
pub struct ScannerService {
    config: ScannerConfig,
    closures: RefCell<Option<(ScanClosure, ScanClosure)>>,
}

impl ScannerService {
    pub fn new(config: ScannerConfig) -> Self {
        Self {
            config,
            closures: RefCell::new(None),
        }
    }

    pub fn is_running(&self) -> bool {
        self.closures.borrow().is_some()
    }

    pub fn start(&self, container_id: &str, events: Rc<dyn ScanEvents>) {
        if self.is_running() {
            self.stop();
        }

        let on_scan_events = events.clone();
        let on_scan = Closure::wrap(Box::new(move |value: JsValue| {
            let codes = barcode_ffi::detected_codes_from_js(&value);
            on_scan_events.on_codes_detected(&codes);
        }) as Box<dyn FnMut(JsValue)>);

        let on_error = Closure::wrap(Box::new(move |value: JsValue| {
            let message = barcode_ffi::error_message_from_js(&value);
            events.on_scan_error(message.as_deref());
        }) as Box<dyn FnMut(JsValue)>);

        log::info!("📷 [SCANNER] Iniciando cámara ({} formatos)", self.config.formats.len());
        barcode_ffi::start_code_scanner(
            container_id,
            &barcode_ffi::formats_to_js(&self.config),
            on_scan.as_ref().unchecked_ref(),
            on_error.as_ref().unchecked_ref(),
        );

        *self.closures.borrow_mut() = Some((on_scan, on_error));
    }

    pub fn stop(&self) {
        // Los closures se liberan después de parar el bridge
        let closures = self.closures.borrow_mut().take();
        if closures.is_some() {
            log::info!("🛑 [SCANNER] Deteniendo cámara");
            barcode_ffi::stop_code_scanner();
        }
    }
}
