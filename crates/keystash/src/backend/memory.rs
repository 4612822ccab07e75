use std::{
    collections::HashMap,
    sync::{PoisonError, RwLock},
};

use crate::{backend::Backend, error::BackendError};

/// Session-scoped storage backend.
///
/// Values live in process memory and are lost when the backend is dropped,
/// mirroring storage that is limited to a single user session. Also the
/// backend of choice for tests, since it needs no environment at all.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryBackend {
    /// Creates an empty session-scoped backend.
    pub fn new() -> Self {
        Self::default()
    }
}

// A poisoned lock means a writer panicked mid-operation; surface that as the
// backend being unavailable rather than propagating the panic.
fn poisoned<T>(_: PoisonError<T>) -> BackendError {
    BackendError::Unavailable("in-memory store lock poisoned".to_string())
}

impl Backend for MemoryBackend {
    fn get_raw(&self, key: &str) -> Result<Option<String>, BackendError> {
        Ok(self.entries.read().map_err(poisoned)?.get(key).cloned())
    }

    fn set_raw(&self, key: &str, text: &str) -> Result<(), BackendError> {
        self.entries
            .write()
            .map_err(poisoned)?
            .insert(key.to_string(), text.to_string());
        Ok(())
    }

    fn remove_raw(&self, key: &str) -> Result<(), BackendError> {
        self.entries.write().map_err(poisoned)?.remove(key);
        Ok(())
    }
}
