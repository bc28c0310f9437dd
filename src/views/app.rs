// ============================================================================
// APP VIEW - Layout principal
// ============================================================================
// Móvil: título, panel, toast, historial y footer.
// Pantallas anchas: aviso estático (las clases .mobile-only / .desktop-only
// se resuelven con media queries en index.html).
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;
use crate::dom::ElementBuilder;
use crate::models::{ScanRecord, SessionState};
use crate::utils::constants::*;
use crate::views::{render_feedback, render_history, render_scan_panel, PanelActions};

pub fn footer_copyright(year: u32) -> String {
    format!("Copyright © {} | {}", year, FOOTER_APP_NAME)
}

fn render_footer(year: u32) -> Result<Element, JsValue> {
    let footer = ElementBuilder::new("footer")?
        .class("app-footer")
        .child(ElementBuilder::new("p")?.text(FOOTER_POWERED_BY).build())?
        .child(ElementBuilder::new("div")?.class("app-footer-copy").text(&footer_copyright(year)).build())?
        .build();
    Ok(footer)
}

fn render_desktop_advisory() -> Result<Element, JsValue> {
    let advisory = ElementBuilder::new("div")?
        .class("desktop-only advisory")
        .child(
            ElementBuilder::new("div")?
                .class("advisory-card")
                .child(ElementBuilder::new("h2")?.text(TITLE_DESKTOP_ADVISORY).build())?
                .child(ElementBuilder::new("p")?.text(MSG_DESKTOP_ADVISORY).build())?
                .build(),
        )?
        .build();
    Ok(advisory)
}

/// Renderizar aplicación completa
pub fn render_app(
    state: &SessionState,
    history: &[ScanRecord],
    viewport_id: &str,
    year: u32,
    actions: &PanelActions,
) -> Result<Element, JsValue> {
    let panel = ElementBuilder::new("div")?
        .id(PANEL_ELEMENT_ID)?
        .child(render_scan_panel(state, history.len(), viewport_id, actions)?)?
        .build();

    let history_region = ElementBuilder::new("div")?
        .id(HISTORY_ELEMENT_ID)?
        .child_opt(render_history(history)?)?
        .build();

    let mobile = ElementBuilder::new("div")?
        .class("mobile-only")
        .child(ElementBuilder::new("h1")?.class("app-title").text(TITLE_APP).build())?
        .child(panel)?
        .child(render_feedback(FEEDBACK_ELEMENT_ID, state)?)?
        .child(history_region)?
        .child(render_footer(year)?)?
        .build();

    let app = ElementBuilder::new("div")?
        .class("app")
        .child(mobile)?
        .child(render_desktop_advisory()?)?
        .build();

    Ok(app)
}
