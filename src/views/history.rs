// ============================================================================
// HISTORY VIEW - Tabla "Scan History"
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;
use crate::dom::{ElementBuilder, append_child};
use crate::models::ScanRecord;
use crate::utils::constants::{LABEL_TOTAL_SCANS, TITLE_HISTORY};

/// Fila de la tabla: número 1-based y resultado en bruto
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct HistoryRow<'a> {
    pub sequence: usize,
    pub result: &'a str,
    pub striped: bool,
}

pub fn history_rows(records: &[ScanRecord]) -> Vec<HistoryRow<'_>> {
    records
        .iter()
        .enumerate()
        .map(|(index, record)| HistoryRow {
            sequence: index + 1,
            result: &record.result,
            striped: index % 2 == 1,
        })
        .collect()
}

pub fn total_scans_label(count: usize) -> String {
    format!("{}{}", LABEL_TOTAL_SCANS, count)
}

/// Renderizar historial. Retorna None cuando está vacío (no mostrar nada)
pub fn render_history(records: &[ScanRecord]) -> Result<Option<Element>, JsValue> {
    if records.is_empty() {
        return Ok(None);
    }

    let header = ElementBuilder::new("div")?
        .class("history-header")
        .child(ElementBuilder::new("h2")?.class("history-title").text(TITLE_HISTORY).build())?
        .child(ElementBuilder::new("span")?.class("history-count").text(&total_scans_label(records.len())).build())?
        .build();

    let head = ElementBuilder::new("thead")?
        .child(
            ElementBuilder::new("tr")?
                .child(ElementBuilder::new("th")?.text("SL No").build())?
                .child(ElementBuilder::new("th")?.text("Scan Result").build())?
                .build(),
        )?
        .build();

    let body = ElementBuilder::new("tbody")?.build();
    for row in history_rows(records) {
        let tr = ElementBuilder::new("tr")?
            .class(if row.striped { "history-row history-row--striped" } else { "history-row" })
            .child(ElementBuilder::new("td")?.text(&row.sequence.to_string()).build())?
            .child(ElementBuilder::new("td")?.class("history-result").text(row.result).build())?
            .build();
        append_child(&body, &tr)?;
    }

    let table = ElementBuilder::new("table")?
        .class("history-table")
        .child(head)?
        .child(body)?
        .build();

    let card = ElementBuilder::new("div")?
        .class("card history-card")
        .child(header)?
        .child(ElementBuilder::new("div")?.class("history-scroll").child(table)?.build())?
        .build();

    Ok(Some(card))
}
