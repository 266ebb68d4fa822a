use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashMap;

/// Entries older than this are never served and are dropped by cleanup.
pub const CACHE_TTL: Duration = Duration::days(7);

/// Maximum number of characters kept in [`CacheEntry::original_text`].
pub const PREVIEW_CHARS: usize = 100;

/// Full cache contents, keyed by [`cache_key`].
pub type CacheMap = HashMap<String, CacheEntry>;

/// Computes the cache key for a `(source, target, text)` triple.
///
/// The text part is the SHA-256 of the whole text, so two long texts
/// sharing a prefix get different keys.
pub fn cache_key(source_lang: &str, target_lang: &str, text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    format!(
        "{source_lang}-{target_lang}-{}",
        hex::encode(hasher.finalize())
    )
}

/// A cached translation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheEntry {
    pub translation: String,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
    /// Leading characters of the source text, for debugging only.
    #[serde(default)]
    pub original_text: String,
}

impl CacheEntry {
    pub fn new(original: &str, translation: String, timestamp: DateTime<Utc>) -> Self {
        Self {
            translation,
            timestamp,
            original_text: original.chars().take(PREVIEW_CHARS).collect(),
        }
    }

    /// Returns `true` once the entry is older than `ttl` at `now`.
    pub fn is_expired(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        now.signed_duration_since(self.timestamp) > ttl
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_key_is_stable() {
        let a = cache_key("auto", "zh-CN", "Hello world");
        let b = cache_key("auto", "zh-CN", "Hello world");
        assert_eq!(a, b);
        assert!(a.starts_with("auto-zh-CN-"));
        assert_eq!(a.len(), "auto-zh-CN-".len() + 64);
    }

    #[test]
    fn test_cache_key_separates_language_pairs() {
        let ja = cache_key("auto", "ja", "Hello");
        let en = cache_key("auto", "en", "Hello");
        let from_fr = cache_key("fr", "ja", "Hello");
        assert_ne!(ja, en);
        assert_ne!(ja, from_fr);
    }

    #[test]
    fn test_cache_key_distinguishes_shared_prefix() {
        let prefix = "a".repeat(200);
        let first = format!("{prefix} first ending");
        let second = format!("{prefix} second ending");
        assert_ne!(
            cache_key("auto", "en", &first),
            cache_key("auto", "en", &second)
        );
    }

    #[test]
    fn test_entry_preview_is_bounded() {
        let text = "字".repeat(500);
        let entry = CacheEntry::new(&text, "x".to_string(), Utc::now());
        assert_eq!(entry.original_text.chars().count(), PREVIEW_CHARS);
    }

    #[test]
    fn test_entry_expiry() {
        let now = Utc::now();
        let fresh = CacheEntry::new("a", "b".to_string(), now - Duration::days(6));
        let stale = CacheEntry::new("a", "b".to_string(), now - Duration::days(8));
        assert!(!fresh.is_expired(now, CACHE_TTL));
        assert!(stale.is_expired(now, CACHE_TTL));
    }

    #[test]
    fn test_entry_json_shape() {
        let timestamp = DateTime::from_timestamp_millis(1_700_000_000_000).unwrap();
        let entry = CacheEntry::new("Hello world", "你好世界".to_string(), timestamp);

        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["translation"], "你好世界");
        assert_eq!(json["timestamp"], 1_700_000_000_000_i64);
        assert_eq!(json["originalText"], "Hello world");
    }
}
