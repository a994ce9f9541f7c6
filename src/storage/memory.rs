use std::sync::{Arc, Mutex, MutexGuard};

use crate::{domain::transaction::Transaction, errors::LedgerError};

use super::{decode_document, encode_document, LedgerStorage, StoredLedger};

#[derive(Debug, Default)]
struct MemoryState {
    blob: Option<String>,
    quarantined: Option<String>,
    backup: Option<String>,
    writes: usize,
}

/// In-process key-value slot holding the serialized ledger as an opaque blob.
///
/// Clones share the same slot, so a caller can keep a handle after handing a
/// boxed copy to the ledger.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts with previously persisted contents.
    pub fn with_contents(blob: impl Into<String>) -> Self {
        let storage = Self::default();
        if let Ok(mut state) = storage.state.lock() {
            state.blob = Some(blob.into());
        }
        storage
    }

    /// Current serialized document, if anything was stored.
    pub fn contents(&self) -> Option<String> {
        self.lock().ok().and_then(|state| state.blob.clone())
    }

    /// Contents set aside by the last `quarantine` call.
    pub fn quarantined(&self) -> Option<String> {
        self.lock().ok().and_then(|state| state.quarantined.clone())
    }

    /// Contents copied by the last `backup` call.
    pub fn backup_contents(&self) -> Option<String> {
        self.lock().ok().and_then(|state| state.backup.clone())
    }

    /// Number of successful `save` calls.
    pub fn writes(&self) -> usize {
        self.lock().map(|state| state.writes).unwrap_or(0)
    }

    fn lock(&self) -> Result<MutexGuard<'_, MemoryState>, LedgerError> {
        self.state
            .lock()
            .map_err(|_| LedgerError::Persistence("memory storage lock poisoned".into()))
    }
}

impl LedgerStorage for MemoryStorage {
    fn load(&self) -> Result<StoredLedger, LedgerError> {
        match self.lock()?.blob.as_deref() {
            Some(blob) => decode_document(blob),
            None => Ok(StoredLedger::default()),
        }
    }

    fn save(&self, transactions: &[Transaction]) -> Result<(), LedgerError> {
        let json = encode_document(transactions)?;
        let mut state = self.lock()?;
        state.blob = Some(json);
        state.writes += 1;
        Ok(())
    }

    fn quarantine(&self) -> Result<Option<std::path::PathBuf>, LedgerError> {
        let mut state = self.lock()?;
        state.quarantined = state.blob.take();
        Ok(None)
    }

    fn backup(&self) -> Result<Option<std::path::PathBuf>, LedgerError> {
        let mut state = self.lock()?;
        state.backup = state.blob.clone();
        Ok(None)
    }
}
