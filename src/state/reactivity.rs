// ============================================================================
// REACTIVITY - Sistema de notificaciones/subscribers para reactividad
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

type Callback = Rc<dyn Fn()>;

/// Estado reactivo con sistema de notificaciones.
/// Los clones comparten valor y subscribers (el timer guarda un clone).
pub struct ReactiveState<T> {
    value: Rc<RefCell<T>>,
    subscribers: Rc<RefCell<Vec<Callback>>>,
}

impl<T: Clone> ReactiveState<T> {
    /// Copia del valor actual
    pub fn snapshot(&self) -> T {
        self.value.borrow().clone()
    }
}

impl<T> ReactiveState<T> {
    /// Crear nuevo estado reactivo
    pub fn new(value: T) -> Self {
        Self {
            value: Rc::new(RefCell::new(value)),
            subscribers: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Leer sin clonar
    pub fn with<R>(&self, reader: impl FnOnce(&T) -> R) -> R {
        reader(&*self.value.borrow())
    }

    /// Establecer nuevo valor y notificar subscribers
    pub fn set(&self, new_value: T) {
        *self.value.borrow_mut() = new_value;
        self.notify();
    }

    /// Actualizar valor usando closure y notificar.
    /// El borrow se suelta antes de llamar a los subscribers.
    pub fn update<F>(&self, updater: F)
    where
        F: FnOnce(&mut T),
    {
        updater(&mut *self.value.borrow_mut());
        self.notify();
    }

    /// Suscribirse a cambios
    pub fn subscribe<F>(&self, callback: F)
    where
        F: Fn() + 'static,
    {
        self.subscribers.borrow_mut().push(Rc::new(callback));
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.borrow().len()
    }

    /// Notificar a todos los subscribers
    fn notify(&self) {
        // Copia de la lista: un subscriber puede suscribir a otro
        let callbacks: Vec<Callback> = self.subscribers.borrow().clone();
        for callback in callbacks {
            callback();
        }
    }
}

impl<T> Clone for ReactiveState<T> {
    fn clone(&self) -> Self {
        Self {
            value: self.value.clone(),
            subscribers: self.subscribers.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_update_notifies_after_release() {
        let state = ReactiveState::new(1);
        let seen = Rc::new(Cell::new(0));
        let reader = state.clone();
        let seen_clone = seen.clone();
        // Leer dentro del subscriber no debe chocar con el borrow del update
        state.subscribe(move || seen_clone.set(reader.snapshot()));

        state.update(|v| *v += 41);
        assert_eq!(seen.get(), 42);
    }

    #[test]
    fn test_clones_share_subscribers() {
        let state = ReactiveState::new(String::new());
        let hits = Rc::new(Cell::new(0));
        let hits_clone = hits.clone();
        state.subscribe(move || hits_clone.set(hits_clone.get() + 1));

        let clone = state.clone();
        clone.set("changed".to_string());
        assert_eq!(hits.get(), 1);
        assert_eq!(state.snapshot(), "changed");
        assert_eq!(clone.subscriber_count(), 1);
    }
}
