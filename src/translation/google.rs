//! Google Translate (public `gtx` endpoint).

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use super::provider::{
    ProviderResult, TranslationProvider, fetch_json, http_client, map_language,
};
use crate::error::ProviderError;

const NAME: &str = "google";
const DEFAULT_BASE_URL: &str = "https://translate.googleapis.com";

/// Confidence reported for every Google translation.
pub const GOOGLE_CONFIDENCE: f64 = 1.0;

/// Google accepts the crate's tags as-is.
const LANGUAGE_CODES: &[(&str, &str)] = &[
    ("zh-CN", "zh-CN"),
    ("zh-TW", "zh-TW"),
    ("en", "en"),
    ("ja", "ja"),
    ("ko", "ko"),
    ("fr", "fr"),
    ("de", "de"),
    ("es", "es"),
    ("ru", "ru"),
    ("pt", "pt"),
    ("it", "it"),
    ("ar", "ar"),
];

pub struct GoogleProvider {
    client: Client,
    base_url: String,
}

impl GoogleProvider {
    pub fn new(timeout: Duration) -> reqwest::Result<Self> {
        Self::with_base_url(DEFAULT_BASE_URL, timeout)
    }

    pub fn with_base_url(base_url: impl Into<String>, timeout: Duration) -> reqwest::Result<Self> {
        Ok(Self {
            client: http_client(timeout)?,
            base_url: base_url.into(),
        })
    }
}

#[async_trait]
impl TranslationProvider for GoogleProvider {
    fn name(&self) -> &str {
        NAME
    }

    async fn translate(
        &self,
        text: &str,
        target_lang: &str,
        source_lang: &str,
    ) -> Result<ProviderResult, ProviderError> {
        let url = format!(
            "{}/translate_a/single",
            self.base_url.trim_end_matches('/')
        );
        let sl = map_language(LANGUAGE_CODES, source_lang, "auto");
        let tl = map_language(LANGUAGE_CODES, target_lang, "zh-CN");

        let request = self.client.get(&url).query(&[
            ("client", "gtx"),
            ("sl", sl),
            ("tl", tl),
            ("dt", "t"),
            ("q", text),
        ]);

        let body = fetch_json(NAME, request).await?;
        parse_response(&body, source_lang)
    }
}

/// Parses `[[["segment", "source", ...], ...], null, "detected", ...]`.
fn parse_response(body: &Value, source_lang: &str) -> Result<ProviderResult, ProviderError> {
    let segments = body
        .get(0)
        .and_then(Value::as_array)
        .filter(|segments| !segments.is_empty())
        .ok_or_else(|| ProviderError::parse(NAME, "missing translation segments"))?;

    let mut translation = String::new();
    for segment in segments {
        match segment.get(0) {
            Some(Value::String(part)) => translation.push_str(part),
            Some(Value::Null) => {}
            _ => return Err(ProviderError::parse(NAME, "malformed translation segment")),
        }
    }

    if translation.is_empty() {
        return Err(ProviderError::parse(NAME, "empty translation"));
    }

    let detected_language = body
        .get(2)
        .and_then(Value::as_str)
        .unwrap_or(source_lang)
        .to_string();

    Ok(ProviderResult {
        translation,
        detected_language,
        confidence: GOOGLE_CONFIDENCE,
    })
}
