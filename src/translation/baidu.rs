//! Baidu web translation endpoint, used as the backup provider.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;

use super::provider::{
    ProviderResult, TranslationProvider, fetch_json, http_client, map_language,
};
use crate::error::ProviderError;

const NAME: &str = "baidu";
const DEFAULT_BASE_URL: &str = "https://fanyi.baidu.com";

/// Confidence reported for every Baidu translation.
pub const BAIDU_CONFIDENCE: f64 = 0.9;

/// Crate language tag to Baidu language code.
const LANGUAGE_CODES: &[(&str, &str)] = &[
    ("zh-CN", "zh"),
    ("zh-TW", "cht"),
    ("en", "en"),
    ("ja", "jp"),
    ("ko", "kor"),
    ("fr", "fra"),
    ("de", "de"),
    ("es", "spa"),
    ("ru", "ru"),
    ("pt", "pt"),
    ("it", "it"),
    ("ar", "ara"),
];

#[derive(Debug, Deserialize)]
struct BaiduResponse {
    trans_result: TransResult,
}

#[derive(Debug, Deserialize)]
struct TransResult {
    data: Vec<TransItem>,
    #[serde(default)]
    from: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TransItem {
    dst: String,
}

pub struct BaiduProvider {
    client: Client,
    base_url: String,
}

impl BaiduProvider {
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
impl TranslationProvider for BaiduProvider {
    fn name(&self) -> &str {
        NAME
    }

    async fn translate(
        &self,
        text: &str,
        target_lang: &str,
        source_lang: &str,
    ) -> Result<ProviderResult, ProviderError> {
        let base_url = self.base_url.trim_end_matches('/');
        let from = map_language(LANGUAGE_CODES, source_lang, "auto");
        let to = map_language(LANGUAGE_CODES, target_lang, "zh");

        let request = self
            .client
            .post(format!("{base_url}/v2transapi"))
            .header("Referer", format!("{base_url}/"))
            .form(&[
                ("query", text),
                ("from", from),
                ("to", to),
                ("transtype", "realtime"),
                ("simple_means_flag", "3"),
            ]);

        let body = fetch_json(NAME, request).await?;
        parse_response(body, source_lang)
    }
}

fn parse_response(body: Value, source_lang: &str) -> Result<ProviderResult, ProviderError> {
    let response: BaiduResponse = serde_json::from_value(body)
        .map_err(|e| ProviderError::parse(NAME, format!("unexpected response shape: {e}")))?;

    if response.trans_result.data.is_empty() {
        return Err(ProviderError::parse(NAME, "empty trans_result.data"));
    }

    let translation: String = response
        .trans_result
        .data
        .into_iter()
        .map(|item| item.dst)
        .collect();

    let detected_language = response
        .trans_result
        .from
        .map_or_else(|| source_lang.to_string(), |code| to_language_tag(&code));

    Ok(ProviderResult {
        translation,
        detected_language,
        confidence: BAIDU_CONFIDENCE,
    })
}

/// Maps a Baidu code back to the crate's tag; unknown codes pass through.
fn to_language_tag(code: &str) -> String {
    LANGUAGE_CODES
        .iter()
        .find(|(_, theirs)| *theirs == code)
        .map_or(code, |(ours, _)| *ours)
        .to_string()
}
