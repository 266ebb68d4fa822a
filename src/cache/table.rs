use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use parking_lot::Mutex;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use super::{CacheEntry, CacheMap, CacheStore};
use crate::error::CacheError;

/// In-memory cache table backed by a [`CacheStore`].
///
/// Every mutation schedules a background write of the full mapping. Writes
/// are coalesced: a burst of inserts results in as few saves as the store
/// allows, each one persisting the latest snapshot.
pub struct TranslationCache {
    shared: Arc<Shared>,
    ttl: Duration,
    dirty: mpsc::UnboundedSender<()>,
}

struct Shared {
    entries: Mutex<CacheMap>,
    store: Arc<dyn CacheStore>,
    // Serializes snapshot+save so an older snapshot never lands after a newer one.
    save_lock: tokio::sync::Mutex<()>,
}

impl Shared {
    async fn persist(&self) -> Result<(), CacheError> {
        let _guard = self.save_lock.lock().await;
        let snapshot = self.entries.lock().clone();
        let store = Arc::clone(&self.store);

        tokio::task::spawn_blocking(move || store.save(&snapshot))
            .await
            .map_err(|e| CacheError::Task(e.to_string()))?
    }
}

impl TranslationCache {
    /// Loads the mapping from `store` and starts the background writer.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn load(store: Arc<dyn CacheStore>, ttl: Duration) -> Self {
        let entries = store.load();
        debug!(entries = entries.len(), "loaded translation cache");

        let shared = Arc::new(Shared {
            entries: Mutex::new(entries),
            store,
            save_lock: tokio::sync::Mutex::new(()),
        });

        let (dirty, rx) = mpsc::unbounded_channel();
        tokio::spawn(run_writer(rx, Arc::clone(&shared)));

        Self { shared, ttl, dirty }
    }

    /// Returns the cached translation for `key` unless it is missing or expired at `now`.
    pub fn get(&self, key: &str, now: DateTime<Utc>) -> Option<String> {
        let entries = self.shared.entries.lock();
        entries
            .get(key)
            .filter(|entry| !entry.is_expired(now, self.ttl))
            .map(|entry| entry.translation.clone())
    }

    /// Inserts or overwrites `key` and schedules a background save.
    pub fn insert(&self, key: String, entry: CacheEntry) {
        self.shared.entries.lock().insert(key, entry);
        self.mark_dirty();
    }

    /// Drops entries older than the TTL at `now`. Returns how many were removed.
    pub fn cleanup(&self, now: DateTime<Utc>) -> usize {
        let removed = {
            let mut entries = self.shared.entries.lock();
            let before = entries.len();
            entries.retain(|_, entry| !entry.is_expired(now, self.ttl));
            before - entries.len()
        };

        if removed > 0 {
            self.mark_dirty();
        }
        removed
    }

    /// Replaces the whole mapping, e.g. with an empty one to clear the cache.
    pub fn replace_all(&self, entries: CacheMap) {
        *self.shared.entries.lock() = entries;
        self.mark_dirty();
    }

    pub fn snapshot(&self) -> CacheMap {
        self.shared.entries.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.shared.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Persists the current mapping and waits for the store to finish.
    pub async fn flush(&self) -> Result<(), CacheError> {
        self.shared.persist().await
    }

    fn mark_dirty(&self) {
        if self.dirty.send(()).is_err() {
            warn!("translation cache writer has stopped; change not persisted");
        }
    }
}

async fn run_writer(mut rx: mpsc::UnboundedReceiver<()>, shared: Arc<Shared>) {
    while rx.recv().await.is_some() {
        // Collapse queued signals; one save of the latest snapshot covers them.
        while rx.try_recv().is_ok() {}

        if let Err(e) = shared.persist().await {
            warn!(error = %e, "failed to persist translation cache");
        }
    }
    debug!("translation cache writer stopped");
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::cache::{CACHE_TTL, MemoryStore, cache_key};
    use std::time::Duration as StdDuration;

    struct FailingStore;

    impl CacheStore for FailingStore {
        fn load(&self) -> CacheMap {
            CacheMap::new()
        }

        fn save(&self, _entries: &CacheMap) -> Result<(), CacheError> {
            Err(CacheError::Io(std::io::Error::other("disk full")))
        }
    }

    async fn wait_for_saves(store: &MemoryStore, count: usize) {
        for _ in 0..100 {
            if store.save_count() >= count {
                return;
            }
            tokio::time::sleep(StdDuration::from_millis(10)).await;
        }
        panic!("background save did not happen");
    }

    #[tokio::test]
    async fn test_insert_then_get() {
        let cache = TranslationCache::load(Arc::new(MemoryStore::new()), CACHE_TTL);
        let key = cache_key("auto", "ja", "Hello");
        let now = Utc::now();

        cache.insert(
            key.clone(),
            CacheEntry::new("Hello", "こんにちは".to_string(), now),
        );

        assert_eq!(cache.get(&key, now), Some("こんにちは".to_string()));
        assert_eq!(cache.get("missing", now), None);
    }

    #[tokio::test]
    async fn test_expired_entry_not_served_before_cleanup() {
        let now = Utc::now();
        let key = cache_key("auto", "en", "old");
        let mut entries = CacheMap::new();
        entries.insert(
            key.clone(),
            CacheEntry::new("old", "stale".to_string(), now - Duration::days(8)),
        );

        let cache = TranslationCache::load(
            Arc::new(MemoryStore::with_entries(entries)),
            CACHE_TTL,
        );

        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get(&key, now), None);
    }

    #[tokio::test]
    async fn test_cleanup_removes_only_expired() {
        let now = Utc::now();
        let mut entries = CacheMap::new();
        entries.insert(
            "fresh".to_string(),
            CacheEntry::new("a", "1".to_string(), now - Duration::days(1)),
        );
        entries.insert(
            "stale".to_string(),
            CacheEntry::new("b", "2".to_string(), now - Duration::days(30)),
        );
        let store = Arc::new(MemoryStore::with_entries(entries));
        let cache = TranslationCache::load(store.clone(), CACHE_TTL);

        assert_eq!(cache.cleanup(now), 1);
        assert_eq!(cache.len(), 1);
        assert!(cache.snapshot().contains_key("fresh"));

        wait_for_saves(&store, 1).await;
        assert!(!store.saved().contains_key("stale"));
    }

    #[tokio::test]
    async fn test_cleanup_without_expired_does_not_save() {
        let store = Arc::new(MemoryStore::new());
        let cache = TranslationCache::load(store.clone(), CACHE_TTL);

        assert_eq!(cache.cleanup(Utc::now()), 0);
        tokio::time::sleep(StdDuration::from_millis(30)).await;
        assert_eq!(store.save_count(), 0);
    }

    #[tokio::test]
    async fn test_insert_is_persisted_in_background() {
        let store = Arc::new(MemoryStore::new());
        let cache = TranslationCache::load(store.clone(), CACHE_TTL);

        cache.insert(
            "k".to_string(),
            CacheEntry::new("src", "dst".to_string(), Utc::now()),
        );

        wait_for_saves(&store, 1).await;
        assert_eq!(store.saved()["k"].translation, "dst");
    }

    #[tokio::test]
    async fn test_replace_all_clears() {
        let store = Arc::new(MemoryStore::new());
        let cache = TranslationCache::load(store.clone(), CACHE_TTL);
        cache.insert(
            "k".to_string(),
            CacheEntry::new("src", "dst".to_string(), Utc::now()),
        );

        cache.replace_all(CacheMap::new());
        cache.flush().await.unwrap();

        assert!(cache.is_empty());
        assert!(store.saved().is_empty());
    }

    #[tokio::test]
    async fn test_failed_save_is_isolated() {
        let cache = TranslationCache::load(Arc::new(FailingStore), CACHE_TTL);
        let now = Utc::now();

        cache.insert("k".to_string(), CacheEntry::new("a", "b".to_string(), now));
        tokio::time::sleep(StdDuration::from_millis(30)).await;

        assert_eq!(cache.get("k", now), Some("b".to_string()));
        assert!(cache.flush().await.is_err());
    }
}
