//! The translation entry point: cache lookup, chunking and provider fallback.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use super::chunker::{CHUNKED_CONFIDENCE, MAX_CHUNK_CHARS, needs_chunking, split_into_chunks};
use super::language::{AUTO, validate_target};
use super::provider::TranslationProvider;
use crate::cache::{CACHE_TTL, CacheEntry, CacheMap, CacheStore, TranslationCache, cache_key};
use crate::error::{CacheError, TranslateError};

/// Confidence reported for cache hits.
pub const CACHED_CONFIDENCE: f64 = 1.0;

/// Target language used when a provider is only asked to detect the source.
const DETECTION_TARGET: &str = "en";

/// Outcome of [`TranslationService::translate`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationResult {
    pub translation: String,
    pub from_cache: bool,
    pub detected_language: String,
    pub confidence: f64,
    pub chunked: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chunk_count: Option<usize>,
    /// Provider that produced a fresh single-request translation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
}

impl TranslationResult {
    fn cached(translation: String, source_lang: &str) -> Self {
        Self {
            translation,
            from_cache: true,
            // The cache does not remember what was detected.
            detected_language: source_lang.to_string(),
            confidence: CACHED_CONFIDENCE,
            chunked: false,
            chunk_count: None,
            provider: None,
        }
    }
}

/// Translates text through a persistent cache and an ordered provider chain.
pub struct TranslationService {
    cache: TranslationCache,
    providers: Vec<Arc<dyn TranslationProvider>>,
}

impl TranslationService {
    /// Loads the cache from `store`, drops expired entries and starts the
    /// background cache writer. `providers` is the fallback chain, primary first.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn new(store: Arc<dyn CacheStore>, providers: Vec<Arc<dyn TranslationProvider>>) -> Self {
        let cache = TranslationCache::load(store, CACHE_TTL);

        let evicted = cache.cleanup(Utc::now());
        if evicted > 0 {
            info!(evicted, "removed expired translations from cache");
        }

        Self { cache, providers }
    }

    /// Translates `text` into `target_lang`. `source_lang` defaults to `auto`.
    #[instrument(skip(self, text), fields(chars = text.chars().count()))]
    pub async fn translate(
        &self,
        text: &str,
        target_lang: &str,
        source_lang: Option<&str>,
    ) -> Result<TranslationResult, TranslateError> {
        if text.trim().is_empty() {
            return Err(TranslateError::InvalidInput);
        }
        validate_target(target_lang)?;
        let source_lang = source_lang.unwrap_or(AUTO);

        let key = cache_key(source_lang, target_lang, text);
        if let Some(hit) = self.lookup(&key, source_lang) {
            return Ok(hit);
        }

        if needs_chunking(text) {
            return self
                .translate_chunked(text, target_lang, source_lang, key)
                .await;
        }

        self.translate_with_fallback(text, target_lang, source_lang, key)
            .await
    }

    /// Detects the language of `text` with the primary provider.
    ///
    /// Returns `auto` when there is no provider or the call fails.
    pub async fn detect_language(&self, text: &str) -> String {
        let Some(primary) = self.providers.first() else {
            return AUTO.to_string();
        };
        if text.trim().is_empty() {
            return AUTO.to_string();
        }

        match primary.translate(text, DETECTION_TARGET, AUTO).await {
            Ok(result) => result.detected_language,
            Err(e) => {
                warn!(provider = primary.name(), error = %e, "language detection failed");
                AUTO.to_string()
            }
        }
    }

    /// Names of the providers in fallback order.
    pub fn provider_names(&self) -> Vec<&str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    /// Drops entries that are expired at `now`. Returns how many were removed.
    pub fn cleanup(&self, now: DateTime<Utc>) -> usize {
        self.cache.cleanup(now)
    }

    /// Replaces the whole cache; pass an empty map to clear it.
    pub fn replace_all(&self, entries: CacheMap) {
        self.cache.replace_all(entries);
    }

    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }

    /// Waits until the current cache contents are persisted.
    pub async fn flush(&self) -> Result<(), CacheError> {
        self.cache.flush().await
    }

    fn lookup(&self, key: &str, source_lang: &str) -> Option<TranslationResult> {
        let hit = self.cache.get(key, Utc::now());
        debug!(%key, hit = hit.is_some(), "cache lookup");
        hit.map(|translation| TranslationResult::cached(translation, source_lang))
    }

    async fn translate_chunked(
        &self,
        text: &str,
        target_lang: &str,
        source_lang: &str,
        key: String,
    ) -> Result<TranslationResult, TranslateError> {
        let chunks = split_into_chunks(text, MAX_CHUNK_CHARS);
        debug!(chunks = chunks.len(), "translating long text in chunks");

        let mut translations = Vec::with_capacity(chunks.len());
        for chunk in &chunks {
            let chunk_key = cache_key(source_lang, target_lang, chunk);
            let result = match self.lookup(&chunk_key, source_lang) {
                Some(hit) => hit,
                None => {
                    self.translate_with_fallback(chunk, target_lang, source_lang, chunk_key)
                        .await?
                }
            };
            translations.push(result.translation);
        }

        let translation = translations.join(" ");
        self.cache
            .insert(key, CacheEntry::new(text, translation.clone(), Utc::now()));

        Ok(TranslationResult {
            translation,
            from_cache: false,
            detected_language: source_lang.to_string(),
            confidence: CHUNKED_CONFIDENCE,
            chunked: true,
            chunk_count: Some(chunks.len()),
            provider: None,
        })
    }

    /// Tries each provider in order until one succeeds.
    async fn translate_with_fallback(
        &self,
        text: &str,
        target_lang: &str,
        source_lang: &str,
        key: String,
    ) -> Result<TranslationResult, TranslateError> {
        let mut failures = Vec::with_capacity(self.providers.len());

        for provider in &self.providers {
            match provider.translate(text, target_lang, source_lang).await {
                Ok(result) => {
                    debug!(provider = provider.name(), "translation succeeded");
                    self.cache.insert(
                        key,
                        CacheEntry::new(text, result.translation.clone(), Utc::now()),
                    );
                    return Ok(TranslationResult {
                        translation: result.translation,
                        from_cache: false,
                        detected_language: result.detected_language,
                        confidence: result.confidence,
                        chunked: false,
                        chunk_count: None,
                        provider: Some(provider.name().to_string()),
                    });
                }
                Err(e) => {
                    warn!(provider = provider.name(), error = %e, "translation provider failed");
                    failures.push(e);
                }
            }
        }

        Err(TranslateError::AllProvidersFailed(failures))
    }
}
