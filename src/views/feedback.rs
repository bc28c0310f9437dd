// ============================================================================
// FEEDBACK VIEW - Toast transitorio (éxito / duplicado / error)
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;
use crate::dom::ElementBuilder;
use crate::models::SessionState;

/// Clases del toast según tipo y visibilidad
pub fn feedback_classes(state: &SessionState) -> String {
    let mut classes = format!("scan-feedback {}", state.feedback_kind.css_class());
    if state.feedback_visible && state.feedback_message.is_some() {
        classes.push_str(" scan-feedback--visible");
    }
    classes
}

/// Renderizar toast; siempre existe en el DOM para poder animar la salida
pub fn render_feedback(element_id: &str, state: &SessionState) -> Result<Element, JsValue> {
    let toast = ElementBuilder::new("div")?
        .id(element_id)?
        .class(&feedback_classes(state))
        .attr("role", "status")?
        .attr("aria-live", "polite")?
        .text(state.feedback_message.as_deref().unwrap_or(""))
        .build();
    Ok(toast)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FeedbackKind;

    #[test]
    fn test_visible_only_with_message() {
        let mut state = SessionState::new();
        state.feedback_visible = true;
        assert_eq!(feedback_classes(&state), "scan-feedback feedback--info");

        state.show_feedback(FeedbackKind::Duplicate, "Duplicate entry detected");
        assert_eq!(feedback_classes(&state), "scan-feedback feedback--duplicate scan-feedback--visible");

        state.hide_feedback();
        assert_eq!(feedback_classes(&state), "scan-feedback feedback--duplicate");
    }
}
