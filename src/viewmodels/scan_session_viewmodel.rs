// ============================================================================
// SCAN SESSION VIEWMODEL - LÓGICA DE LA SESIÓN DE ESCANEO
// ============================================================================
// Modo idle / single / multi, deduplicación contra el historial y feedback
// transitorio con auto-ocultar. Sin DOM: la App se suscribe y re-renderiza.
// ============================================================================

use std::cell::{Cell, RefCell};
use crate::config::AppConfig;
use crate::models::{DetectedCode, FeedbackKind, ScanMode, ScanRecord, SessionMode, SessionState};
use crate::services::{HistoryStore, ScanEvents};
use crate::state::ReactiveState;
use crate::utils::constants::*;
use crate::utils::{AutoHideTimer, BrowserClock, BrowserStorage, Clock, KeyValueStorage, TimeoutScheduler, TimerScheduler};

/// Retardos de auto-ocultar del feedback
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct ScanTimings {
    /// Tras un escaneo o un error
    pub feedback_hide_ms: u32,
    /// Red de seguridad mientras la cámara está activa
    pub scanning_hide_ms: u32,
}

impl Default for ScanTimings {
    fn default() -> Self {
        Self {
            feedback_hide_ms: 1200,
            scanning_hide_ms: 300_000,
        }
    }
}

impl From<&AppConfig> for ScanTimings {
    fn from(config: &AppConfig) -> Self {
        Self {
            feedback_hide_ms: config.feedback_hide_ms,
            scanning_hide_ms: config.scanning_hide_ms,
        }
    }
}

/// ViewModel del navegador
pub type BrowserScanViewModel = ScanSessionViewModel<BrowserStorage, TimeoutScheduler, BrowserClock>;

/// Controlador de la sesión de escaneo
pub struct ScanSessionViewModel<S, T, C>
where
    S: KeyValueStorage,
    T: TimerScheduler,
    C: Clock,
{
    state: ReactiveState<SessionState>,
    history: RefCell<HistoryStore<S>>,
    hide_timer: AutoHideTimer<T>,
    clock: C,
    timings: ScanTimings,
    last_id: Cell<Option<i64>>,
}

impl<S, T, C> ScanSessionViewModel<S, T, C>
where
    S: KeyValueStorage,
    T: TimerScheduler,
    C: Clock,
{
    pub fn new(history: HistoryStore<S>, scheduler: T, clock: C, timings: ScanTimings) -> Self {
        let last_id = history.latest_id();
        Self {
            state: ReactiveState::new(SessionState::new()),
            history: RefCell::new(history),
            hide_timer: AutoHideTimer::new(scheduler),
            clock,
            timings,
            last_id: Cell::new(last_id),
        }
    }

    /// Arrancar (o re-arrancar) la cámara en el modo dado
    pub fn start_scan(&self, mode: ScanMode) {
        log::info!("📷 [SCAN] Modo {:?} iniciado", mode);
        self.schedule_hide(self.timings.scanning_hide_ms);

        let instruction = match mode {
            ScanMode::Single => MSG_INSTRUCTION_SINGLE,
            ScanMode::Multi => MSG_INSTRUCTION_MULTI,
        };
        self.state.update(|s| {
            s.mode = SessionMode::scanning(mode);
            s.last_result = None;
            s.is_duplicate = false;
            s.show_feedback(FeedbackKind::Info, instruction);
        });
    }

    pub fn stop_scan(&self) {
        log::info!("🛑 [SCAN] Escaneo detenido");
        self.hide_timer.cancel();
        self.state.update(|s| {
            s.mode = SessionMode::Idle;
            s.is_duplicate = false;
            s.hide_feedback();
        });
    }

    /// Resultado decodificado por el scanner
    pub fn on_decoded(&self, payload: &str) {
        let is_duplicate = self.history.borrow().contains(payload);

        let message = if is_duplicate {
            log::info!("🔁 [SCAN] Duplicado: {}", payload);
            MSG_DUPLICATE.to_string()
        } else {
            let record = self.new_record(payload);
            log::info!("✅ [SCAN] Nuevo código: {} (id {})", payload, record.id);
            self.history.borrow_mut().append(record);
            format!("{}{}", MSG_SCAN_SUCCESS_PREFIX, payload)
        };

        self.schedule_hide(self.timings.feedback_hide_ms);

        self.state.update(|s| {
            s.last_result = Some(payload.to_string());
            s.is_duplicate = is_duplicate;
            let kind = if is_duplicate { FeedbackKind::Duplicate } else { FeedbackKind::Success };
            s.show_feedback(kind, message);

            // Single-shot: vuelve a idle, el feedback sigue visible
            if s.mode == SessionMode::ScanningSingle {
                s.mode = SessionMode::Idle;
            }
        });
    }

    /// Lista de códigos detectados; solo cuenta el primero
    pub fn handle_detected(&self, codes: &[DetectedCode]) {
        if let Some(first) = codes.first() {
            self.on_decoded(&first.raw_value);
        }
    }

    /// Error de cámara/decodificación. No fatal: el scanner sigue.
    pub fn on_scan_error(&self, message: Option<&str>) {
        let detail = message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or(MSG_SCAN_ERROR_FALLBACK);
        log::error!("❌ [SCAN] Error de escaneo: {}", detail);

        self.schedule_hide(self.timings.feedback_hide_ms);
        self.state.update(|s| {
            s.show_feedback(FeedbackKind::Error, format!("{}{}", MSG_SCAN_ERROR_PREFIX, detail));
        });
    }

    /// Vaciar historial (persistido) y resetear el feedback
    pub fn clear_all(&self) {
        log::info!("🗑️ [SCAN] Historial borrado");
        self.hide_timer.cancel();
        self.history.borrow_mut().clear();
        self.state.update(|s| {
            s.last_result = None;
            s.is_duplicate = false;
            s.feedback_message = None;
            s.feedback_kind = FeedbackKind::Info;
            s.feedback_visible = false;
        });
    }

    pub fn clear_last_result(&self) {
        self.state.update(|s| s.last_result = None);
    }

    pub fn state(&self) -> SessionState {
        self.state.snapshot()
    }

    pub fn mode(&self) -> SessionMode {
        self.state.with(|s| s.mode)
    }

    pub fn history(&self) -> Vec<ScanRecord> {
        self.history.borrow().list().to_vec()
    }

    pub fn history_len(&self) -> usize {
        self.history.borrow().len()
    }

    /// Callback tras cada cambio de estado (incluido el auto-ocultar)
    pub fn subscribe<F>(&self, callback: F)
    where
        F: Fn() + 'static,
    {
        self.state.subscribe(callback);
    }

    fn schedule_hide(&self, delay_ms: u32) {
        let state = self.state.clone();
        self.hide_timer.restart(delay_ms, move || {
            state.update(|s| s.hide_feedback());
        });
    }

    /// Id = ahora en ms, forzado a crecer si el reloj repite
    fn new_record(&self, payload: &str) -> ScanRecord {
        let now = self.clock.now_millis();
        let id = match self.last_id.get() {
            Some(last) if now <= last => last + 1,
            _ => now,
        };
        self.last_id.set(Some(id));
        ScanRecord::new(id, payload, self.clock.format_timestamp(now))
    }
}

impl<S, T, C> ScanEvents for ScanSessionViewModel<S, T, C>
where
    S: KeyValueStorage,
    T: TimerScheduler,
    C: Clock,
{
    fn on_codes_detected(&self, codes: &[DetectedCode]) {
        self.handle_detected(codes);
    }

    fn on_scan_error(&self, message: Option<&str>) {
        ScanSessionViewModel::on_scan_error(self, message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;
    use crate::utils::{FixedClock, ManualScheduler, MemoryStorage};

    const KEY: &str = "scanHistory";

    type TestViewModel = ScanSessionViewModel<MemoryStorage, ManualScheduler, FixedClock>;

    fn view_model_on(storage: MemoryStorage) -> (TestViewModel, ManualScheduler) {
        let scheduler = ManualScheduler::new();
        let vm = ScanSessionViewModel::new(
            HistoryStore::load(storage, KEY),
            scheduler.clone(),
            FixedClock::new(1_700_000_000_000, 1_000),
            ScanTimings::default(),
        );
        (vm, scheduler)
    }

    fn view_model() -> (TestViewModel, ManualScheduler, MemoryStorage) {
        let storage = MemoryStorage::new();
        let (vm, scheduler) = view_model_on(storage.clone());
        (vm, scheduler, storage)
    }

    fn results(vm: &TestViewModel) -> Vec<String> {
        vm.history().into_iter().map(|r| r.result).collect()
    }

    #[test]
    fn test_first_decode_then_duplicate() {
        let (vm, _, _) = view_model();
        vm.start_scan(ScanMode::Multi);

        vm.on_decoded("ABC123");
        let state = vm.state();
        assert_eq!(results(&vm), vec!["ABC123"]);
        assert_eq!(state.feedback_message.as_deref(), Some("Scan Successful: ABC123"));
        assert_eq!(state.feedback_kind, FeedbackKind::Success);
        assert!(!state.is_duplicate);
        assert!(state.feedback_visible);

        vm.on_decoded("ABC123");
        let state = vm.state();
        assert_eq!(vm.history_len(), 1);
        assert_eq!(state.feedback_message.as_deref(), Some("Duplicate entry detected"));
        assert_eq!(state.feedback_kind, FeedbackKind::Duplicate);
        assert!(state.is_duplicate);
        assert_eq!(state.last_result.as_deref(), Some("ABC123"));
    }

    #[test]
    fn test_history_keeps_distinct_values_newest_first() {
        let (vm, _, _) = view_model();
        vm.start_scan(ScanMode::Multi);
        for payload in ["a", "b", "a", "c", "b", "b", "d"] {
            vm.on_decoded(payload);
        }
        assert_eq!(results(&vm), vec!["d", "c", "b", "a"]);
    }

    #[test]
    fn test_duplicate_check_is_case_sensitive() {
        let (vm, _, _) = view_model();
        vm.on_decoded("qr");
        vm.on_decoded("QR");
        assert_eq!(results(&vm), vec!["QR", "qr"]);
        assert!(!vm.state().is_duplicate);
    }

    #[test]
    fn test_single_scan_returns_to_idle() {
        let (vm, scheduler, _) = view_model();
        vm.start_scan(ScanMode::Single);
        assert_eq!(vm.mode(), SessionMode::ScanningSingle);

        vm.on_decoded("one-shot");
        let state = vm.state();
        assert_eq!(state.mode, SessionMode::Idle);
        // El feedback del escaneo sigue visible
        assert!(state.feedback_visible);
        assert_eq!(state.feedback_message.as_deref(), Some("Scan Successful: one-shot"));

        // Volver a idle no toca el timer de 1200 ms
        assert_eq!(scheduler.pending_count(), 1);
        scheduler.advance(1199);
        assert!(vm.state().feedback_visible);
        scheduler.advance(1);
        assert!(!vm.state().feedback_visible);
        assert_eq!(scheduler.fired().len(), 1);
        assert_eq!(scheduler.fired()[0].at_ms, 1200);
        assert_eq!(vm.mode(), SessionMode::Idle);
    }

    #[test]
    fn test_multi_scan_stays_scanning() {
        let (vm, _, _) = view_model();
        vm.start_scan(ScanMode::Multi);
        vm.on_decoded("first");
        vm.on_decoded("second");
        assert_eq!(vm.mode(), SessionMode::ScanningMulti);
        assert_eq!(vm.history_len(), 2);
    }

    #[test]
    fn test_start_scan_resets_and_shows_instruction() {
        let (vm, _, _) = view_model();
        vm.on_decoded("dup");
        vm.on_decoded("dup");
        assert!(vm.state().is_duplicate);

        vm.start_scan(ScanMode::Single);
        let state = vm.state();
        assert_eq!(state.last_result, None);
        assert!(!state.is_duplicate);
        assert!(state.feedback_visible);
        assert_eq!(state.feedback_kind, FeedbackKind::Info);
        assert_eq!(state.feedback_message.as_deref(), Some(MSG_INSTRUCTION_SINGLE));

        // Re-entrante: cambia de modo sin pasar por idle
        vm.start_scan(ScanMode::Multi);
        assert_eq!(vm.mode(), SessionMode::ScanningMulti);
        assert_eq!(vm.state().feedback_message.as_deref(), Some(MSG_INSTRUCTION_MULTI));
        assert_eq!(vm.history_len(), 1);
    }

    #[test]
    fn test_scanning_safety_net_hides_after_300s() {
        let (vm, scheduler, _) = view_model();
        vm.start_scan(ScanMode::Multi);

        scheduler.advance(299_999);
        assert!(vm.state().feedback_visible);
        scheduler.advance(1);
        assert!(!vm.state().feedback_visible);
        assert_eq!(vm.mode(), SessionMode::ScanningMulti);
    }

    #[test]
    fn test_decode_feedback_hides_after_1200ms_keeping_message() {
        let (vm, scheduler, _) = view_model();
        vm.start_scan(ScanMode::Multi);
        vm.on_decoded("X");
        // El timer de 300s queda reemplazado
        assert_eq!(scheduler.pending_count(), 1);

        scheduler.advance(1199);
        assert!(vm.state().feedback_visible);
        scheduler.advance(1);
        let state = vm.state();
        assert!(!state.feedback_visible);
        assert_eq!(state.feedback_message.as_deref(), Some("Scan Successful: X"));

        scheduler.advance(300_000);
        assert_eq!(scheduler.fired().len(), 1);
    }

    #[test]
    fn test_overlapping_hides_fire_once_at_later_deadline() {
        let (vm, scheduler, _) = view_model();
        vm.on_decoded("A");
        scheduler.advance(500);
        vm.on_decoded("B");

        scheduler.advance(1199);
        assert!(vm.state().feedback_visible);
        scheduler.advance(1);
        assert!(!vm.state().feedback_visible);

        let fired = scheduler.fired();
        assert_eq!(fired.len(), 1);
        assert_eq!(fired[0].at_ms, 1700);
    }

    #[test]
    fn test_stop_scan_keeps_last_result_and_cancels_timer() {
        let (vm, scheduler, _) = view_model();
        vm.start_scan(ScanMode::Multi);
        vm.on_decoded("kept");
        vm.on_decoded("kept");

        vm.stop_scan();
        let state = vm.state();
        assert_eq!(state.mode, SessionMode::Idle);
        assert!(!state.is_duplicate);
        assert!(!state.feedback_visible);
        assert_eq!(state.last_result.as_deref(), Some("kept"));
        assert_eq!(vm.history_len(), 1);
        assert_eq!(scheduler.pending_count(), 0);
    }

    #[test]
    fn test_scan_error_is_transient_and_non_fatal() {
        let (vm, scheduler, _) = view_model();
        vm.start_scan(ScanMode::Multi);
        vm.on_decoded("before");

        vm.on_scan_error(Some("NotAllowedError: Permission denied"));
        let state = vm.state();
        assert_eq!(state.feedback_message.as_deref(), Some("Scan Error: NotAllowedError: Permission denied"));
        assert_eq!(state.feedback_kind, FeedbackKind::Error);
        assert!(state.feedback_visible);
        assert_eq!(state.mode, SessionMode::ScanningMulti);
        assert_eq!(state.last_result.as_deref(), Some("before"));
        assert_eq!(vm.history_len(), 1);
        assert_eq!(scheduler.pending_count(), 1);

        scheduler.advance(1200);
        assert!(!vm.state().feedback_visible);
    }

    #[test]
    fn test_scan_error_without_message_uses_fallback() {
        let (vm, _, _) = view_model();
        vm.on_scan_error(None);
        assert_eq!(vm.state().feedback_message.as_deref(), Some("Scan Error: Failed to scan QR code"));
        vm.on_scan_error(Some("   "));
        assert_eq!(vm.state().feedback_message.as_deref(), Some("Scan Error: Failed to scan QR code"));
    }

    #[test]
    fn test_clear_all_persists_empty_history() {
        let (vm, scheduler, storage) = view_model();
        vm.start_scan(ScanMode::Multi);
        vm.on_decoded("one");
        vm.on_decoded("two");

        vm.clear_all();
        let state = vm.state();
        assert_eq!(vm.history_len(), 0);
        assert_eq!(state.last_result, None);
        assert!(!state.is_duplicate);
        assert_eq!(state.feedback_message, None);
        assert!(!state.feedback_visible);
        assert_eq!(scheduler.pending_count(), 0);

        // Recarga sobre el mismo storage
        let (reloaded, _) = view_model_on(storage.clone());
        assert_eq!(reloaded.history_len(), 0);
        assert_eq!(storage.raw(KEY).as_deref(), Some("[]"));
    }

    #[test]
    fn test_history_survives_reload() {
        let (vm, _, storage) = view_model();
        vm.on_decoded("persisted-1");
        vm.on_decoded("persisted-2");

        let (reloaded, _) = view_model_on(storage);
        assert_eq!(results(&reloaded), vec!["persisted-2", "persisted-1"]);
        // Duplicado también contra lo cargado
        reloaded.on_decoded("persisted-1");
        assert!(reloaded.state().is_duplicate);
        assert_eq!(reloaded.history_len(), 2);
    }

    #[test]
    fn test_malformed_storage_starts_empty() {
        let (vm, _) = view_model_on(MemoryStorage::with_item(KEY, "{{not json"));
        assert_eq!(vm.history_len(), 0);
        vm.on_decoded("fresh");
        assert_eq!(results(&vm), vec!["fresh"]);
    }

    #[test]
    fn test_clear_last_result_only() {
        let (vm, _, _) = view_model();
        vm.start_scan(ScanMode::Multi);
        vm.on_decoded("value");

        vm.clear_last_result();
        let state = vm.state();
        assert_eq!(state.last_result, None);
        assert_eq!(state.mode, SessionMode::ScanningMulti);
        assert_eq!(vm.history_len(), 1);
    }

    #[test]
    fn test_decode_while_idle_is_accepted() {
        let (vm, _, _) = view_model();
        vm.on_decoded("stray");
        let state = vm.state();
        assert_eq!(state.mode, SessionMode::Idle);
        assert_eq!(state.last_result.as_deref(), Some("stray"));
        assert_eq!(vm.history_len(), 1);
    }

    #[test]
    fn test_handle_detected_uses_first_code() {
        let (vm, _, _) = view_model();
        vm.handle_detected(&[]);
        assert_eq!(vm.history_len(), 0);
        assert_eq!(vm.state().last_result, None);

        vm.handle_detected(&[DetectedCode::new("first"), DetectedCode::new("second")]);
        assert_eq!(results(&vm), vec!["first"]);
    }

    #[test]
    fn test_record_ids_strictly_increase_with_repeated_clock() {
        let storage = MemoryStorage::new();
        let vm = ScanSessionViewModel::new(
            HistoryStore::load(storage, KEY),
            ManualScheduler::new(),
            FixedClock::frozen(1_700_000_000_000),
            ScanTimings::default(),
        );
        vm.on_decoded("a");
        vm.on_decoded("b");
        vm.on_decoded("c");

        let ids: Vec<i64> = vm.history().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1_700_000_000_002, 1_700_000_000_001, 1_700_000_000_000]);
        assert_eq!(vm.history()[2].timestamp, "11/14/2023, 10:13:20 PM");
    }

    #[test]
    fn test_subscribers_can_read_state_during_notify() {
        let (vm, scheduler, _) = view_model();
        let vm = Rc::new(vm);
        let seen = Rc::new(RefCell::new(Vec::new()));

        let reader = Rc::downgrade(&vm);
        let seen_clone = seen.clone();
        vm.subscribe(move || {
            if let Some(vm) = reader.upgrade() {
                seen_clone.borrow_mut().push((vm.state().feedback_visible, vm.history_len()));
            }
        });

        vm.on_decoded("notify");
        scheduler.advance(1200);
        assert_eq!(*seen.borrow(), vec![(true, 1), (false, 1)]);
    }

    #[test]
    fn test_scan_events_trait_forwards() {
        let (vm, _, _) = view_model();
        let events: &dyn ScanEvents = &vm;
        events.on_codes_detected(&[DetectedCode::new("via-trait")]);
        events.on_scan_error(Some("camera busy"));

        let state = vm.state();
        assert_eq!(results(&vm), vec!["via-trait"]);
        assert_eq!(state.feedback_message.as_deref(), Some("Scan Error: camera busy"));
    }
}
