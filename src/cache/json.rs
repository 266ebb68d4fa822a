use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::warn;

use super::{CacheMap, CacheStore};
use crate::error::CacheError;
use crate::fs::atomic_write;

/// Stores the cache as a single pretty-printed JSON object.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CacheStore for JsonFileStore {
    fn load(&self) -> CacheMap {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return CacheMap::new(),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "failed to read translation cache");
                return CacheMap::new();
            }
        };

        serde_json::from_str(&contents).unwrap_or_else(|e| {
            warn!(path = %self.path.display(), error = %e, "translation cache is corrupt, starting empty");
            CacheMap::new()
        })
    }

    fn save(&self, entries: &CacheMap) -> Result<(), CacheError> {
        let contents = serde_json::to_vec_pretty(entries)?;
        atomic_write(&self.path, &contents)?;
        Ok(())
    }
}
