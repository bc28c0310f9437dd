// ============================================================================
// INCREMENTAL DOM UPDATES - Actualizar regiones sin re-render completo
// ============================================================================
// El panel del scanner contiene el <video> de la cámara: re-crearlo la corta.
// Por eso cada región (#scan-panel, #scan-feedback, #scan-history) se
// actualiza por separado.
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;
use crate::dom::{append_child, get_element_by_id, set_class_name, set_inner_html, set_text_content};
use crate::models::SessionState;
use crate::views::feedback::feedback_classes;

/// Reemplazar el contenido de una región por `content` (o vaciarla)
pub fn replace_region(region_id: &str, content: Option<Element>) -> Result<(), JsValue> {
    let region = get_element_by_id(region_id)
        .ok_or_else(|| JsValue::from_str(&format!("Region #{} not found, needs full render", region_id)))?;
    set_inner_html(&region, "");
    if let Some(content) = content {
        append_child(&region, &content)?;
    }
    Ok(())
}

/// Actualizar el toast en sitio (clases + texto)
pub fn update_feedback_incremental(region_id: &str, state: &SessionState) -> Result<(), JsValue> {
    let toast = get_element_by_id(region_id)
        .ok_or_else(|| JsValue::from_str(&format!("Feedback #{} not found, needs full render", region_id)))?;
    set_class_name(&toast, &feedback_classes(state));
    set_text_content(&toast, state.feedback_message.as_deref().unwrap_or(""));
    Ok(())
}
