// ============================================================================
// APP - Aplicación principal
// ============================================================================
// Conecta ViewModel, scanner JS y vistas. Los cambios de estado llegan por
// subscribe() y se agrupan en un Timeout(0) antes de tocar el DOM.
// ============================================================================

use std::cell::Cell;
use std::rc::{Rc, Weak};
use gloo_timers::callback::Timeout;
use wasm_bindgen::prelude::*;
use web_sys::Element;
use crate::config::AppConfig;
use crate::dom::incremental::{replace_region, update_feedback_incremental};
use crate::dom::{append_child, get_element_by_id, set_inner_html};
use crate::models::{DetectedCode, ScanMode, SessionMode};
use crate::services::{HistoryStore, ScanEvents, ScannerService};
use crate::utils::constants::*;
use crate::utils::{BrowserClock, BrowserStorage, Clock, KeyValueStorage, TimeoutScheduler, TimerScheduler};
use crate::viewmodels::{BrowserScanViewModel, ScanSessionViewModel, ScanTimings};
use crate::views::history::render_history;
use crate::views::{render_app, render_scan_panel, PanelActions};

/// Aplicación principal
pub struct App {
    view_model: Rc<BrowserScanViewModel>,
    scanner: ScannerService,
    config: AppConfig,
    root: Element,
    rendered_mode: Cell<Option<SessionMode>>,
    refresh_scheduled: Cell<bool>,
    this: Weak<App>,
}

impl App {
    /// Crear nueva aplicación
    pub fn new(config: AppConfig) -> Result<Rc<Self>, JsValue> {
        let root = get_element_by_id(ROOT_ELEMENT_ID)
            .ok_or_else(|| JsValue::from_str("No #app element found"))?;

        let history = HistoryStore::load(BrowserStorage, config.storage_key.clone());
        let view_model = Rc::new(ScanSessionViewModel::new(
            history,
            TimeoutScheduler,
            BrowserClock,
            ScanTimings::from(&config),
        ));
        let scanner = ScannerService::new(config.scanner_config());

        let app = Rc::new_cyclic(|this| Self {
            view_model,
            scanner,
            config,
            root,
            rendered_mode: Cell::new(None),
            refresh_scheduled: Cell::new(false),
            this: this.clone(),
        });

        // Suscribirse a cambios de estado para refrescar el DOM
        let weak = Rc::downgrade(&app);
        app.view_model.subscribe(move || {
            if let Some(app) = weak.upgrade() {
                app.schedule_refresh();
            }
        });

        log::info!("✅ [APP] {} escaneos en historial", app.view_model.history_len());
        Ok(app)
    }

    /// Renderizar aplicación completa
    pub fn render(&self) -> Result<(), JsValue> {
        let state = self.view_model.state();
        let history = self.view_model.history();

        // El viewport se destruye: parar la cámara antes
        self.scanner.stop();
        set_inner_html(&self.root, "");
        let view = render_app(
            &state,
            &history,
            &self.config.scanner_container_id,
            current_year(),
            &self.panel_actions(),
        )?;
        append_child(&self.root, &view)?;

        self.rendered_mode.set(Some(state.mode));
        if state.mode.is_scanning() {
            self.start_camera_deferred();
        }
        Ok(())
    }

    /// Actualizar solo lo que cambió. El panel con la cámara activa no se
    /// re-crea mientras el modo de escaneo sea el mismo.
    pub fn refresh(&self) -> Result<(), JsValue> {
        let state = self.view_model.state();
        let history = self.view_model.history();
        let previous = self.rendered_mode.get();

        let plan = PanelRefresh::plan(previous, state.mode);
        if plan.stop_camera {
            self.scanner.stop();
        }
        if plan.rebuild {
            let panel = render_scan_panel(
                &state,
                history.len(),
                &self.config.scanner_container_id,
                &self.panel_actions(),
            )?;
            replace_region(PANEL_ELEMENT_ID, Some(panel))?;
            self.rendered_mode.set(Some(state.mode));
        }
        if plan.start_camera {
            self.start_camera_deferred();
        }

        update_feedback_incremental(FEEDBACK_ELEMENT_ID, &state)?;
        replace_region(HISTORY_ELEMENT_ID, render_history(&history)?)?;
        Ok(())
    }

    /// Agrupar varias notificaciones del mismo tick en un solo refresh
    fn schedule_refresh(&self) {
        if self.refresh_scheduled.replace(true) {
            return;
        }
        let weak = self.this.clone();
        Timeout::new(0, move || {
            let Some(app) = weak.upgrade() else {
                return;
            };
            app.refresh_scheduled.set(false);
            if let Err(e) = app.refresh() {
                log::warn!("⚠️ [APP] Refresh incremental falló, re-render completo: {:?}", e);
                if let Err(e) = app.render() {
                    log::error!("❌ [APP] Error re-renderizando: {:?}", e);
                }
            }
        })
        .forget();
    }

    /// Arrancar la cámara cuando el viewport ya está en el DOM
    fn start_camera_deferred(&self) {
        let weak = self.this.clone();
        Timeout::new(self.config.scanner_start_delay_ms, move || {
            let Some(app) = weak.upgrade() else {
                return;
            };
            // El usuario pudo parar antes de que venciera el retardo
            if !app.view_model.mode().is_scanning() {
                return;
            }
            let events: Rc<dyn ScanEvents> = Rc::new(ActiveSessionEvents(app.view_model.clone()));
            app.scanner.start(&app.config.scanner_container_id, events);
        })
        .forget();
    }

    fn panel_actions(&self) -> PanelActions {
        let vm = &self.view_model;
        PanelActions {
            on_start_single: action(vm, |vm| vm.start_scan(ScanMode::Single)),
            on_start_multi: action(vm, |vm| vm.start_scan(ScanMode::Multi)),
            on_stop: action(vm, |vm| vm.stop_scan()),
            on_clear_result: action(vm, |vm| vm.clear_last_result()),
            on_clear_all: action(vm, |vm| vm.clear_all()),
        }
    }

}

/// Qué hacer con el panel del scanner en un refresh incremental
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct PanelRefresh {
    pub rebuild: bool,
    pub stop_camera: bool,
    pub start_camera: bool,
}

impl PanelRefresh {
    /// Con la cámara activa el panel se conserva mientras el modo no cambie.
    /// En idle siempre se re-crea (prompt y botones dependen del estado).
    pub fn plan(previous: Option<SessionMode>, current: SessionMode) -> Self {
        let keep_camera = current.is_scanning() && previous == Some(current);
        let rebuild = !keep_camera;
        Self {
            rebuild,
            stop_camera: rebuild && previous.is_some_and(|m| m.is_scanning()),
            start_camera: rebuild && current.is_scanning(),
        }
    }
}

/// Reenvía al ViewModel solo mientras hay sesión activa: tras un single-scan
/// la cámara puede entregar otro frame antes de que el refresh la pare.
struct ActiveSessionEvents<S, T, C>(Rc<ScanSessionViewModel<S, T, C>>)
where
    S: KeyValueStorage,
    T: TimerScheduler,
    C: Clock;

impl<S, T, C> ScanEvents for ActiveSessionEvents<S, T, C>
where
    S: KeyValueStorage,
    T: TimerScheduler,
    C: Clock,
{
    fn on_codes_detected(&self, codes: &[DetectedCode]) {
        if self.0.mode().is_scanning() {
            self.0.handle_detected(codes);
        }
    }

    fn on_scan_error(&self, message: Option<&str>) {
        if self.0.mode().is_scanning() {
            self.0.on_scan_error(message);
        }
    }
}

fn action<F>(vm: &Rc<BrowserScanViewModel>, f: F) -> Rc<dyn Fn()>
where
    F: Fn(&BrowserScanViewModel) + 'static,
{
    let weak = Rc::downgrade(vm);
    Rc::new(move || {
        if let Some(vm) = weak.upgrade() {
            f(&*vm);
        }
    })
}

fn current_year() -> u32 {
    js_sys::Date::new_0().get_full_year()
}
