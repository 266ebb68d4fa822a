use chrono::DateTime;
use rusqlite::{Connection, params};
use std::path::PathBuf;
use tracing::warn;

use super::{CacheEntry, CacheMap, CacheStore};
use crate::error::CacheError;

/// Stores the cache in an `SQLite` database, one row per entry.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    db_path: PathBuf,
}

impl SqliteStore {
    /// Opens (creating if needed) the database at `db_path`.
    ///
    /// A file that is not a usable database is renamed to `<name>.corrupt`
    /// and replaced by an empty one. Only directory creation can fail.
    pub fn open(db_path: impl Into<PathBuf>) -> Result<Self, CacheError> {
        let db_path = db_path.into();
        if let Some(parent) = db_path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let store = Self { db_path };
        if let Err(e) = store.init_db() {
            warn!(path = %store.db_path.display(), error = %e, "cache database is unreadable; starting empty");
            store.set_aside();
            if let Err(e) = store.init_db() {
                warn!(path = %store.db_path.display(), error = %e, "failed to recreate cache database");
            }
        }
        Ok(store)
    }

    fn corrupt_path(&self) -> PathBuf {
        let mut name = self.db_path.clone().into_os_string();
        name.push(".corrupt");
        PathBuf::from(name)
    }

    fn set_aside(&self) {
        if let Err(e) = std::fs::rename(&self.db_path, self.corrupt_path()) {
            warn!(path = %self.db_path.display(), error = %e, "failed to move unreadable cache database aside");
        }
    }

    fn init_db(&self) -> Result<(), CacheError> {
        let conn = self.connect()?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS translations (
                cache_key TEXT PRIMARY KEY NOT NULL,
                translation TEXT NOT NULL,
                timestamp_ms INTEGER NOT NULL,
                original_text TEXT NOT NULL DEFAULT ''
            )",
            [],
        )?;

        Ok(())
    }

    fn connect(&self) -> Result<Connection, CacheError> {
        Ok(Connection::open(&self.db_path)?)
    }

    fn read_all(&self) -> Result<CacheMap, CacheError> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(
            "SELECT cache_key, translation, timestamp_ms, original_text FROM translations",
        )?;

        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, i64>(2)?,
                row.get::<_, String>(3)?,
            ))
        })?;

        let mut entries = CacheMap::new();
        for row in rows {
            let (key, translation, timestamp_ms, original_text) = row?;
            let Some(timestamp) = DateTime::from_timestamp_millis(timestamp_ms) else {
                warn!(%key, timestamp_ms, "skipping cache row with out-of-range timestamp");
                continue;
            };
            entries.insert(
                key,
                CacheEntry {
                    translation,
                    timestamp,
                    original_text,
                },
            );
        }

        Ok(entries)
    }
}

impl CacheStore for SqliteStore {
    fn load(&self) -> CacheMap {
        self.read_all().unwrap_or_else(|e| {
            warn!(path = %self.db_path.display(), error = %e, "failed to read translation cache database");
            CacheMap::new()
        })
    }

    fn save(&self, entries: &CacheMap) -> Result<(), CacheError> {
        let mut conn = self.connect()?;
        let tx = conn.transaction()?;

        tx.execute("DELETE FROM translations", [])?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO translations (cache_key, translation, timestamp_ms, original_text)
                 VALUES (?1, ?2, ?3, ?4)",
            )?;
            for (key, entry) in entries {
                stmt.execute(params![
                    key,
                    entry.translation,
                    entry.timestamp.timestamp_millis(),
                    entry.original_text,
                ])?;
            }
        }

        tx.commit()?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::cache::cache_key;
    use chrono::Utc;
    use tempfile::TempDir;

    fn create_test_store(temp_dir: &TempDir) -> SqliteStore {
        SqliteStore::open(temp_dir.path().join("translations.db")).unwrap()
    }

    fn entry(text: &str, translation: &str) -> CacheEntry {
        CacheEntry::new(text, translation.to_string(), Utc::now())
    }

    #[test]
    fn test_empty_database_loads_empty() {
        let temp_dir = TempDir::new().unwrap();
        let store = create_test_store(&temp_dir);

        assert!(store.load().is_empty());
    }

    #[test]
    fn test_save_then_load() {
        let temp_dir = TempDir::new().unwrap();
        let store = create_test_store(&temp_dir);

        let key = cache_key("auto", "ja", "Hello, World!");
        let mut entries = CacheMap::new();
        entries.insert(key.clone(), entry("Hello, World!", "こんにちは、世界！"));

        store.save(&entries).unwrap();
        let loaded = store.load();

        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[&key].translation, "こんにちは、世界！");
        assert_eq!(loaded[&key].original_text, "Hello, World!");
        assert_eq!(
            loaded[&key].timestamp.timestamp_millis(),
            entries[&key].timestamp.timestamp_millis()
        );
    }

    #[test]
    fn test_save_replaces_previous_contents() {
        let temp_dir = TempDir::new().unwrap();
        let store = create_test_store(&temp_dir);

        let mut first = CacheMap::new();
        first.insert("a".to_string(), entry("a", "1"));
        first.insert("b".to_string(), entry("b", "2"));
        store.save(&first).unwrap();

        let mut second = CacheMap::new();
        second.insert("c".to_string(), entry("c", "3"));
        store.save(&second).unwrap();

        let loaded = store.load();
        assert_eq!(loaded.len(), 1);
        assert!(loaded.contains_key("c"));
    }

    #[test]
    fn test_corrupt_database_is_replaced_on_open() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("translations.db");
        std::fs::write(&path, "definitely not sqlite").unwrap();

        let store = SqliteStore::open(&path).unwrap();
        assert!(store.load().is_empty());
        assert_eq!(
            std::fs::read_to_string(temp_dir.path().join("translations.db.corrupt")).unwrap(),
            "definitely not sqlite"
        );

        let mut entries = CacheMap::new();
        entries.insert("k".to_string(), entry("Hello", "Hallo"));
        store.save(&entries).unwrap();
        assert_eq!(store.load()["k"].translation, "Hallo");
    }

    #[test]
    fn test_unreadable_table_loads_empty() {
        let temp_dir = TempDir::new().unwrap();
        let store = create_test_store(&temp_dir);
        Connection::open(temp_dir.path().join("translations.db"))
            .unwrap()
            .execute("DROP TABLE translations", [])
            .unwrap();

        assert!(store.load().is_empty());
    }
}
