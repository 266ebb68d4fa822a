//! Error types for the translation pipeline.

use std::fmt;

/// What went wrong while talking to a single provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderErrorKind {
    /// Connection failure or a non-success HTTP status.
    Network,
    /// The request did not complete within the provider timeout.
    Timeout,
    /// The response body did not have the expected shape.
    Parse,
}

impl fmt::Display for ProviderErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Network => "network",
            Self::Timeout => "timeout",
            Self::Parse => "parse",
        };
        f.write_str(name)
    }
}

/// Failure of one provider in the fallback chain.
///
/// Always recoverable: the service moves on to the next provider.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{provider} ({kind}): {message}")]
pub struct ProviderError {
    pub provider: String,
    pub kind: ProviderErrorKind,
    pub message: String,
}

impl ProviderError {
    pub fn new(provider: &str, kind: ProviderErrorKind, message: impl Into<String>) -> Self {
        Self {
            provider: provider.to_string(),
            kind,
            message: message.into(),
        }
    }

    pub fn network(provider: &str, message: impl Into<String>) -> Self {
        Self::new(provider, ProviderErrorKind::Network, message)
    }

    pub fn timeout(provider: &str) -> Self {
        Self::new(provider, ProviderErrorKind::Timeout, "request timed out")
    }

    pub fn parse(provider: &str, message: impl Into<String>) -> Self {
        Self::new(provider, ProviderErrorKind::Parse, message)
    }

    /// Classifies a transport error from `reqwest`.
    pub fn from_reqwest(provider: &str, err: &reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::timeout(provider)
        } else if err.is_decode() {
            Self::parse(provider, err.to_string())
        } else {
            Self::network(provider, err.to_string())
        }
    }
}

/// Errors surfaced to callers of [`TranslationService`](crate::translation::TranslationService).
#[derive(Debug, thiserror::Error)]
pub enum TranslateError {
    #[error("invalid input: text is empty")]
    InvalidInput,

    #[error("unsupported target language: '{0}'")]
    UnsupportedLanguage(String),

    #[error("all translation providers failed: {}", join_provider_errors(.0))]
    AllProvidersFailed(Vec<ProviderError>),
}

fn join_provider_errors(errors: &[ProviderError]) -> String {
    if errors.is_empty() {
        return "no providers configured".to_string();
    }
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Persistence failure of the cache store. Logged, never propagated to `translate`.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("cache I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("cache serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("cache database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("cache writer task failed: {0}")]
    Task(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_providers_failed_lists_every_message() {
        let err = TranslateError::AllProvidersFailed(vec![
            ProviderError::timeout("google"),
            ProviderError::parse("baidu", "missing trans_result"),
        ]);

        let message = err.to_string();
        assert!(message.contains("google (timeout): request timed out"));
        assert!(message.contains("baidu (parse): missing trans_result"));
        assert!(message.find("google") < message.find("baidu"));
    }

    #[test]
    fn test_all_providers_failed_with_empty_chain() {
        let err = TranslateError::AllProvidersFailed(Vec::new());
        assert!(err.to_string().contains("no providers configured"));
    }

    #[test]
    fn test_unsupported_language_names_tag() {
        let err = TranslateError::UnsupportedLanguage("xx-not-real".to_string());
        assert_eq!(err.to_string(), "unsupported target language: 'xx-not-real'");
    }
}
