//! Translation cache: keys, entries, persistence backends and the
//! in-memory table served to the translation service.
//!
//! The table is loaded wholesale from a [`CacheStore`] when the service
//! starts and written back wholesale after every insert.

mod entry;
mod json;
mod memory;
mod sqlite;
mod table;

pub use entry::{CACHE_TTL, CacheEntry, CacheMap, PREVIEW_CHARS, cache_key};
pub use json::JsonFileStore;
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;
pub use table::TranslationCache;

use crate::error::CacheError;

/// Durable home of the cache mapping.
///
/// Implementations are synchronous; callers run them on a blocking thread.
pub trait CacheStore: Send + Sync {
    /// Reads the persisted mapping. Missing or corrupt storage yields an empty map.
    fn load(&self) -> CacheMap;

    /// Replaces the persisted mapping with `entries`.
    fn save(&self, entries: &CacheMap) -> Result<(), CacheError>;
}
