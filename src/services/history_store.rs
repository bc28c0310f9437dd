// ============================================================================
// HISTORY STORE - Historial de escaneos con write-through a storage
// ============================================================================

use crate::models::ScanRecord;
use crate::utils::storage::{KeyValueStorage, StorageError, load_from_storage, save_to_storage};

/// Historial ordenado (más reciente primero), persistido tras cada mutación.
/// No rechaza duplicados: eso lo decide el ViewModel con `contains`.
pub struct HistoryStore<S: KeyValueStorage> {
    storage: S,
    key: String,
    records: Vec<ScanRecord>,
}

impl<S: KeyValueStorage> HistoryStore<S> {
    /// Cargar desde storage. Ausente, corrupto o ilegible => historial vacío.
    pub fn load(storage: S, key: impl Into<String>) -> Self {
        let key = key.into();
        let records = match load_from_storage::<S, Vec<ScanRecord>>(&storage, &key) {
            Ok(Some(records)) => {
                log::info!("💾 [HISTORY] {} escaneos restaurados desde storage", records.len());
                records
            }
            Ok(None) => Vec::new(),
            Err(e) => {
                log::warn!("⚠️ [HISTORY] Historial ilegible en '{}', se empieza vacío: {}", key, e);
                Vec::new()
            }
        };

        Self { storage, key, records }
    }

    /// Igualdad exacta (distingue mayúsculas)
    pub fn contains(&self, result: &str) -> bool {
        self.records.iter().any(|r| r.result == result)
    }

    /// Insertar al principio y persistir
    pub fn append(&mut self, record: ScanRecord) {
        self.records.insert(0, record);
        self.persist_best_effort();
    }

    pub fn clear(&mut self) {
        self.records.clear();
        self.persist_best_effort();
    }

    pub fn list(&self) -> &[ScanRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Id del registro más reciente
    pub fn latest_id(&self) -> Option<i64> {
        self.records.first().map(|r| r.id)
    }

    fn persist(&self) -> Result<(), StorageError> {
        save_to_storage(&self.storage, &self.key, &self.records)
    }

    fn persist_best_effort(&self) {
        if let Err(e) = self.persist() {
            log::error!("❌ [HISTORY] Error guardando historial: {}", e);
        }
    }
}
