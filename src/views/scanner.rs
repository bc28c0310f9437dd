// ============================================================================
// SCANNER VIEW - Panel de escaneo (selección de modo / cámara activa)
// ============================================================================

use std::rc::Rc;
use wasm_bindgen::prelude::*;
use web_sys::Element;
use crate::dom::{ElementBuilder, append_child, on_click_action};
use crate::models::{ScanMode, SessionState};
use crate::utils::constants::*;

/// Acciones del usuario sobre el panel
#[derive(Clone)]
pub struct PanelActions {
    pub on_start_single: Rc<dyn Fn()>,
    pub on_start_multi: Rc<dyn Fn()>,
    pub on_stop: Rc<dyn Fn()>,
    pub on_clear_result: Rc<dyn Fn()>,
    pub on_clear_all: Rc<dyn Fn()>,
}

/// Texto en idle: último código o invitación a elegir modo
pub fn idle_prompt(last_result: Option<&str>) -> String {
    match last_result {
        Some(result) => format!("{}{}", PROMPT_LAST_RESULT_PREFIX, result),
        None => PROMPT_CHOOSE_MODE.to_string(),
    }
}

pub fn mode_title(mode: ScanMode) -> &'static str {
    match mode {
        ScanMode::Single => TITLE_SINGLE_MODE,
        ScanMode::Multi => TITLE_MULTI_MODE,
    }
}

pub fn instruction_text(mode: ScanMode) -> &'static str {
    match mode {
        ScanMode::Single => MSG_INSTRUCTION_SINGLE,
        ScanMode::Multi => MSG_INSTRUCTION_MULTI,
    }
}

/// "Clear Result" / "Clear All History" solo si hay algo que borrar
pub fn shows_clear_actions(state: &SessionState, history_len: usize) -> bool {
    state.last_result.is_some() || history_len > 0
}

fn button(class: &str, label: &str, action: Rc<dyn Fn()>) -> Result<Element, JsValue> {
    let btn = ElementBuilder::new("button")?
        .class(class)
        .attr("type", "button")?
        .text(label)
        .build();
    on_click_action(&btn, action)?;
    Ok(btn)
}

/// Renderizar panel según el modo actual
pub fn render_scan_panel(
    state: &SessionState,
    history_len: usize,
    viewport_id: &str,
    actions: &PanelActions,
) -> Result<Element, JsValue> {
    let content = ElementBuilder::new("div")?
        .class("card-content")
        .build();

    match state.mode.scan_mode() {
        None => {
            let prompt = ElementBuilder::new("p")?
                .class("scan-prompt")
                .text(&idle_prompt(state.last_result.as_deref()))
                .build();

            let modes = ElementBuilder::new("div")?
                .class("button-row")
                .child(button("btn btn-primary", "Single Scan", actions.on_start_single.clone())?)?
                .child(button("btn btn-success", "Multi Scan", actions.on_start_multi.clone())?)?
                .build();

            append_child(&content, &prompt)?;
            append_child(&content, &modes)?;

            if shows_clear_actions(state, history_len) {
                let clear_row = ElementBuilder::new("div")?
                    .class("button-row")
                    .child(button("btn btn-outline", "Clear Result", actions.on_clear_result.clone())?)?
                    .child(button("btn btn-outline btn-danger", "Clear All History", actions.on_clear_all.clone())?)?
                    .build();
                append_child(&content, &clear_row)?;
            }
        }
        Some(mode) => {
            let header = ElementBuilder::new("div")?
                .class("scanner-header")
                .child(ElementBuilder::new("h2")?.text(mode_title(mode)).build())?
                .child(button("btn btn-ghost", "Stop Scanner", actions.on_stop.clone())?)?
                .build();

            // Contenedor de la cámara (ID debe coincidir con el que recibe scanner_bridge.js)
            let viewport = ElementBuilder::new("div")?
                .id(viewport_id)?
                .class("scanner-viewport")
                .build();

            let caption = ElementBuilder::new("p")?
                .class("scanner-caption")
                .text(instruction_text(mode))
                .build();

            append_child(&content, &header)?;
            append_child(&content, &viewport)?;
            append_child(&content, &caption)?;
        }
    }

    let card = ElementBuilder::new("div")?
        .class("card scan-card")
        .child(content)?
        .build();

    Ok(card)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_prompt() {
        assert_eq!(idle_prompt(None), "Choose a scanning mode below");
        assert_eq!(idle_prompt(Some("ABC123")), "Last scanned code: ABC123");
    }

    #[test]
    fn test_mode_texts() {
        assert_eq!(mode_title(ScanMode::Single), "Single Scan Mode");
        assert_eq!(mode_title(ScanMode::Multi), "Multi Scan Mode");
        assert!(instruction_text(ScanMode::Single).ends_with("(will close after scan)"));
    }

    #[test]
    fn test_clear_actions_visibility() {
        let mut state = SessionState::new();
        assert!(!shows_clear_actions(&state, 0));
        assert!(shows_clear_actions(&state, 3));

        state.last_result = Some("x".to_string());
        assert!(shows_clear_actions(&state, 0));
    }
}
