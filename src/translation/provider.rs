//! Provider abstraction shared by every remote translation backend.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::baidu::BaiduProvider;
use super::google::GoogleProvider;
use crate::error::ProviderError;

/// Per-request timeout applied by every provider.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Normalized output of a single provider call.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderResult {
    pub translation: String,
    pub detected_language: String,
    /// Fixed per-provider trust ranking in `[0, 1]`, not a measured score.
    pub confidence: f64,
}

/// A remote translation backend.
#[async_trait]
pub trait TranslationProvider: Send + Sync {
    /// Provider name used in logs and error messages.
    fn name(&self) -> &str;

    /// Translates `text` with a single request.
    ///
    /// Language tags are the crate's own; each provider maps them to its own codes.
    async fn translate(
        &self,
        text: &str,
        target_lang: &str,
        source_lang: &str,
    ) -> Result<ProviderResult, ProviderError>;
}

/// Backends that can be named in the fallback order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    Google,
    Baidu,
}

impl ProviderKind {
    /// Default fallback order: Google first, Baidu as backup.
    pub const DEFAULT_ORDER: [Self; 2] = [Self::Google, Self::Baidu];

    /// Builds the provider, optionally pointing it at a non-default endpoint.
    pub fn build(
        self,
        endpoint: Option<&str>,
        timeout: Duration,
    ) -> reqwest::Result<Arc<dyn TranslationProvider>> {
        let provider: Arc<dyn TranslationProvider> = match self {
            Self::Google => {
                let google = match endpoint {
                    Some(url) => GoogleProvider::with_base_url(url, timeout)?,
                    None => GoogleProvider::new(timeout)?,
                };
                Arc::new(google)
            }
            Self::Baidu => {
                let baidu = match endpoint {
                    Some(url) => BaiduProvider::with_base_url(url, timeout)?,
                    None => BaiduProvider::new(timeout)?,
                };
                Arc::new(baidu)
            }
        };
        Ok(provider)
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Google => f.write_str("google"),
            Self::Baidu => f.write_str("baidu"),
        }
    }
}

pub(super) fn http_client(timeout: Duration) -> reqwest::Result<Client> {
    Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()
}

/// Sends `request` and decodes the body as JSON, classifying every failure.
pub(super) async fn fetch_json(
    provider: &str,
    request: RequestBuilder,
) -> Result<Value, ProviderError> {
    let response = request
        .send()
        .await
        .map_err(|e| ProviderError::from_reqwest(provider, &e))?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ProviderError::network(
            provider,
            format!(
                "unexpected status {status}: {}",
                body.chars().take(200).collect::<String>()
            ),
        ));
    }

    let body = response
        .text()
        .await
        .map_err(|e| ProviderError::from_reqwest(provider, &e))?;

    serde_json::from_str(&body)
        .map_err(|e| ProviderError::parse(provider, format!("response is not JSON: {e}")))
}

/// Looks `tag` up in a provider language table, falling back to `default`.
pub(super) fn map_language(
    table: &[(&str, &'static str)],
    tag: &str,
    default: &'static str,
) -> &'static str {
    table
        .iter()
        .find(|(ours, _)| *ours == tag)
        .map_or(default, |(_, theirs)| *theirs)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const TABLE: &[(&str, &str)] = &[("ja", "jp"), ("ko", "kor")];

    #[test]
    fn test_map_language_hit_and_fallback() {
        assert_eq!(map_language(TABLE, "ja", "auto"), "jp");
        assert_eq!(map_language(TABLE, "xx", "auto"), "auto");
        assert_eq!(map_language(TABLE, "auto", "zh"), "zh");
    }

    #[test]
    fn test_provider_kind_serde_names() {
        let kinds: Vec<ProviderKind> = serde_json::from_str(r#"["google", "baidu"]"#).unwrap();
        assert_eq!(kinds, ProviderKind::DEFAULT_ORDER);
        assert_eq!(ProviderKind::Baidu.to_string(), "baidu");
    }
}
