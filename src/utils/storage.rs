// ============================================================================
// STORAGE - Acceso clave/valor a localStorage (y fake en memoria)
// ============================================================================

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;
use serde::{Serialize, de::DeserializeOwned};
use web_sys::{window, Storage};

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("No se pudo acceder a localStorage")]
    Unavailable,

    #[error("Error leyendo '{0}' de localStorage")]
    Read(String),

    #[error("Error guardando '{0}' en localStorage")]
    Write(String),

    #[error("Error serializando datos: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Almacenamiento clave/valor síncrono (forma de `window.localStorage`)
pub trait KeyValueStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

pub fn get_local_storage() -> Option<Storage> {
    window()?.local_storage().ok()?
}

/// `window.localStorage` del navegador
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserStorage;

impl KeyValueStorage for BrowserStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let storage = get_local_storage().ok_or(StorageError::Unavailable)?;
        storage.get_item(key)
            .map_err(|_| StorageError::Read(key.to_string()))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let storage = get_local_storage().ok_or(StorageError::Unavailable)?;
        // Puede fallar por cuota o modo privado
        storage.set_item(key, value)
            .map_err(|_| StorageError::Write(key.to_string()))
    }
}

/// Storage en memoria. Los clones comparten contenido, así que sirve para
/// simular una recarga de página sobre los mismos datos.
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    items: Rc<RefCell<HashMap<String, String>>>,
    fail_writes: Rc<Cell<bool>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Crear con un valor ya presente (p.ej. datos corruptos)
    pub fn with_item(key: &str, value: &str) -> Self {
        let storage = Self::new();
        storage.items.borrow_mut().insert(key.to_string(), value.to_string());
        storage
    }

    /// Forzar fallos de escritura (cuota llena)
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.raw(key))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.fail_writes.get() {
            return Err(StorageError::Write(key.to_string()));
        }
        self.items.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

pub fn save_to_storage<S, T>(storage: &S, key: &str, value: &T) -> Result<(), StorageError>
where
    S: KeyValueStorage + ?Sized,
    T: Serialize + ?Sized,
{
    let json = serde_json::to_string(value)?;
    storage.set_item(key, &json)
}

/// `Ok(None)` si la clave no existe; `Err` si existe pero no se puede leer o parsear
pub fn load_from_storage<S, T>(storage: &S, key: &str) -> Result<Option<T>, StorageError>
where
    S: KeyValueStorage + ?Sized,
    T: DeserializeOwned,
{
    match storage.get_item(key)? {
        Some(json) => Ok(Some(serde_json::from_str(&json)?)),
        None => Ok(None),
    }
}
