use serde::{Deserialize, Serialize};
use crate::models::{BarcodeFormat, ScannerConfig};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Clave de localStorage del historial
    pub storage_key: String,
    pub feedback_hide_ms: u32,
    /// Auto-ocultar "de seguridad" mientras la cámara está activa
    pub scanning_hide_ms: u32,
    pub scanner_start_delay_ms: u32,
    pub scanner_container_id: String,
    pub enable_logging: bool,
    pub barcode_formats: Vec<BarcodeFormat>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage_key: "scanHistory".to_string(),
            feedback_hide_ms: 1200,
            scanning_hide_ms: 300_000,
            scanner_start_delay_ms: 100,
            scanner_container_id: "scanner-viewport".to_string(),
            enable_logging: true,
            barcode_formats: BarcodeFormat::ALL.to_vec(),
        }
    }
}

impl AppConfig {
    /// Carga la configuración desde variables de entorno en tiempo de compilación
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            storage_key: option_env!("SCAN_STORAGE_KEY")
                .map(|s| s.to_string())
                .unwrap_or(defaults.storage_key),
            feedback_hide_ms: option_env!("FEEDBACK_HIDE_MS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.feedback_hide_ms),
            scanning_hide_ms: option_env!("SCANNING_HIDE_MS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.scanning_hide_ms),
            scanner_start_delay_ms: option_env!("SCANNER_START_DELAY_MS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.scanner_start_delay_ms),
            scanner_container_id: defaults.scanner_container_id,
            enable_logging: option_env!("ENABLE_LOGGING")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.enable_logging),
            barcode_formats: defaults.barcode_formats,
        }
    }

    /// Nivel máximo de log para wasm_logger
    pub fn log_level(&self) -> log::Level {
        if self.enable_logging {
            log::Level::Debug
        } else {
            log::Level::Warn
        }
    }

    pub fn scanner_config(&self) -> ScannerConfig {
        ScannerConfig::new(self.barcode_formats.clone())
    }
}

// Configuración global estática
lazy_static::lazy_static! {
    pub static ref CONFIG: AppConfig = AppConfig::from_env();
}
