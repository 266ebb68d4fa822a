use parking_lot::Mutex;

use super::{CacheMap, CacheStore};
use crate::error::CacheError;

/// Keeps the "persisted" mapping in process memory.
///
/// Used with `--no-cache` and in tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    saved: Mutex<CacheMap>,
    saves: Mutex<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts out holding `entries`, as if they had been saved earlier.
    pub fn with_entries(entries: CacheMap) -> Self {
        Self {
            saved: Mutex::new(entries),
            saves: Mutex::new(0),
        }
    }

    /// Number of completed `save` calls.
    pub fn save_count(&self) -> usize {
        *self.saves.lock()
    }

    pub fn saved(&self) -> CacheMap {
        self.saved.lock().clone()
    }
}

impl CacheStore for MemoryStore {
    fn load(&self) -> CacheMap {
        self.saved.lock().clone()
    }

    fn save(&self, entries: &CacheMap) -> Result<(), CacheError> {
        *self.saved.lock() = entries.clone();
        *self.saves.lock() += 1;
        Ok(())
    }
}
