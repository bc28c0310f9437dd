/// Textos de feedback
pub const MSG_SCAN_SUCCESS_PREFIX: &str = "Scan Successful: ";
pub const MSG_DUPLICATE: &str = "Duplicate entry detected";
pub const MSG_SCAN_ERROR_PREFIX: &str = "Scan Error: ";
pub const MSG_SCAN_ERROR_FALLBACK: &str = "Failed to scan QR code";

/// Instrucciones mostradas al arrancar la cámara
pub const MSG_INSTRUCTION_SINGLE: &str = "Point your camera at a QR code to scan it (will close after scan)";
pub const MSG_INSTRUCTION_MULTI: &str = "Point your camera at QR codes to scan them continuously";

/// Textos de la pantalla
pub const TITLE_APP: &str = "QR Code Scanner";
pub const TITLE_SINGLE_MODE: &str = "Single Scan Mode";
pub const TITLE_MULTI_MODE: &str = "Multi Scan Mode";
pub const TITLE_HISTORY: &str = "Scan History";
pub const PROMPT_CHOOSE_MODE: &str = "Choose a scanning mode below";
pub const PROMPT_LAST_RESULT_PREFIX: &str = "Last scanned code: ";
pub const LABEL_TOTAL_SCANS: &str = "Total scans: ";
pub const TITLE_DESKTOP_ADVISORY: &str = "Mobile Experience Recommended";
pub const MSG_DESKTOP_ADVISORY: &str = "For the best scanning experience, please use this app on a mobile device.";
pub const FOOTER_POWERED_BY: &str = "Powered by @Ag Solutions";
pub const FOOTER_APP_NAME: &str = "Siga Scanner App";

/// IDs de regiones del DOM
pub const ROOT_ELEMENT_ID: &str = "app";
pub const PANEL_ELEMENT_ID: &str = "scan-panel";
pub const FEEDBACK_ELEMENT_ID: &str = "scan-feedback";
pub const HISTORY_ELEMENT_ID: &str = "scan-history";
