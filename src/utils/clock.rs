// ============================================================================
// CLOCK - Hora actual para ids y timestamps de escaneo
// ============================================================================

use std::cell::Cell;
use chrono::{DateTime, Utc};
use wasm_bindgen::JsValue;

/// Formato equivalente a `toLocaleString()` en en-US
pub const TIMESTAMP_FORMAT: &str = "%-m/%-d/%Y, %-I:%M:%S %p";

pub trait Clock {
    /// Milisegundos desde epoch (como `Date.now()`)
    fn now_millis(&self) -> i64;
    fn format_timestamp(&self, millis: i64) -> String;
}

/// Reloj del navegador (`js_sys::Date`), con la locale del dispositivo
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserClock;

impl Clock for BrowserClock {
    fn now_millis(&self) -> i64 {
        js_sys::Date::now() as i64
    }

    fn format_timestamp(&self, millis: i64) -> String {
        let date = js_sys::Date::new(&JsValue::from_f64(millis as f64));
        date.to_locale_string("default", &JsValue::UNDEFINED).into()
    }
}

/// Reloj determinista: cada lectura avanza `step_ms`. Formatea en UTC.
#[derive(Debug)]
pub struct FixedClock {
    next: Cell<i64>,
    step_ms: i64,
}

impl FixedClock {
    pub fn new(start_ms: i64, step_ms: i64) -> Self {
        Self {
            next: Cell::new(start_ms),
            step_ms,
        }
    }

    /// Siempre devuelve el mismo instante
    pub fn frozen(at_ms: i64) -> Self {
        Self::new(at_ms, 0)
    }
}

impl Clock for FixedClock {
    fn now_millis(&self) -> i64 {
        let now = self.next.get();
        self.next.set(now + self.step_ms);
        now
    }

    fn format_timestamp(&self, millis: i64) -> String {
        DateTime::<Utc>::from_timestamp_millis(millis)
            .map(|dt| dt.format(TIMESTAMP_FORMAT).to_string())
            .unwrap_or_default()
    }
}
