// ============================================================================
// TIMER - Temporizador diferido cancelable (un solo pendiente a la vez)
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;
use gloo_timers::callback::Timeout;

/// Programador de callbacks diferidos
pub trait TimerScheduler {
    type Handle;

    fn schedule_once(&self, delay_ms: u32, action: Box<dyn FnOnce()>) -> Self::Handle;
    fn cancel(&self, handle: Self::Handle);
}

/// `setTimeout` del navegador vía gloo_timers
#[derive(Clone, Copy, Debug, Default)]
pub struct TimeoutScheduler;

impl TimerScheduler for TimeoutScheduler {
    type Handle = Timeout;

    fn schedule_once(&self, delay_ms: u32, action: Box<dyn FnOnce()>) -> Timeout {
        Timeout::new(delay_ms, action)
    }

    fn cancel(&self, handle: Timeout) {
        // El closure devuelto se descarta sin ejecutarse
        let _ = handle.cancel();
    }
}

/// Guarda como máximo un handle vivo: programar de nuevo cancela el anterior.
pub struct AutoHideTimer<T: TimerScheduler> {
    scheduler: T,
    pending: RefCell<Option<T::Handle>>,
}

impl<T: TimerScheduler> AutoHideTimer<T> {
    pub fn new(scheduler: T) -> Self {
        Self {
            scheduler,
            pending: RefCell::new(None),
        }
    }

    /// Cancelar el pendiente (si hay) y programar `action` tras `delay_ms`
    pub fn restart<F>(&self, delay_ms: u32, action: F)
    where
        F: FnOnce() + 'static,
    {
        self.cancel();
        let handle = self.scheduler.schedule_once(delay_ms, Box::new(action));
        *self.pending.borrow_mut() = Some(handle);
    }

    pub fn cancel(&self) {
        let previous = self.pending.borrow_mut().take();
        if let Some(handle) = previous {
            self.scheduler.cancel(handle);
        }
    }

    /// Hay un handle retenido (puede haber disparado ya)
    pub fn has_handle(&self) -> bool {
        self.pending.borrow().is_some()
    }

    pub fn scheduler(&self) -> &T {
        &self.scheduler
    }
}

// ----------------------------------------------------------------------------
// Reloj virtual para tests
// ----------------------------------------------------------------------------

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct ManualHandle(u64);

/// Disparo registrado por `ManualScheduler`
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct FiredTimer {
    pub handle: ManualHandle,
    pub at_ms: u64,
}

struct PendingTimer {
    handle: ManualHandle,
    deadline_ms: u64,
    action: Box<dyn FnOnce()>,
}

#[derive(Default)]
struct ManualInner {
    now_ms: u64,
    next_id: u64,
    pending: Vec<PendingTimer>,
    fired: Vec<FiredTimer>,
}

/// Scheduler con tiempo virtual: nada dispara hasta `advance`.
/// Los clones comparten reloj y cola.
#[derive(Clone, Default)]
pub struct ManualScheduler {
    inner: Rc<RefCell<ManualInner>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now_ms(&self) -> u64 {
        self.inner.borrow().now_ms
    }

    pub fn pending_count(&self) -> usize {
        self.inner.borrow().pending.len()
    }

    pub fn fired(&self) -> Vec<FiredTimer> {
        self.inner.borrow().fired.clone()
    }

    /// Avanzar el reloj disparando en orden de deadline todo lo que venza
    pub fn advance(&self, delta_ms: u64) {
        let target = self.inner.borrow().now_ms + delta_ms;
        loop {
            // Sacar el siguiente vencido sin mantener el borrow durante el callback
            let next = {
                let mut inner = self.inner.borrow_mut();
                let due = inner
                    .pending
                    .iter()
                    .enumerate()
                    .filter(|(_, t)| t.deadline_ms <= target)
                    .min_by_key(|(_, t)| t.deadline_ms)
                    .map(|(idx, _)| idx);
                match due {
                    Some(idx) => {
                        let timer = inner.pending.remove(idx);
                        inner.now_ms = timer.deadline_ms;
                        inner.fired.push(FiredTimer {
                            handle: timer.handle,
                            at_ms: timer.deadline_ms,
                        });
                        Some(timer.action)
                    }
                    None => None,
                }
            };
            match next {
                Some(action) => action(),
                None => break,
            }
        }
        self.inner.borrow_mut().now_ms = target;
    }
}

impl TimerScheduler for ManualScheduler {
    type Handle = ManualHandle;

    fn schedule_once(&self, delay_ms: u32, action: Box<dyn FnOnce()>) -> ManualHandle {
        let mut inner = self.inner.borrow_mut();
        inner.next_id += 1;
        let handle = ManualHandle(inner.next_id);
        let deadline_ms = inner.now_ms + u64::from(delay_ms);
        inner.pending.push(PendingTimer { handle, deadline_ms, action });
        handle
    }

    fn cancel(&self, handle: ManualHandle) {
        // Cancelar uno ya disparado no hace nada
        self.inner.borrow_mut().pending.retain(|t| t.handle != handle);
    }
}
