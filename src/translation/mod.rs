//! Remote providers, chunking and the [`TranslationService`] orchestrator.

mod baidu;
mod chunker;
mod google;
mod language;
mod provider;
mod service;

pub use baidu::{BAIDU_CONFIDENCE, BaiduProvider};
pub use chunker::{
    CHUNK_THRESHOLD, CHUNKED_CONFIDENCE, MAX_CHUNK_CHARS, needs_chunking, split_into_chunks,
};
pub use google::{GOOGLE_CONFIDENCE, GoogleProvider};
pub use language::{
    AUTO, SUPPORTED_LANGUAGES, display_name, is_supported, print_languages, supported_languages,
    validate_target,
};
pub use provider::{ProviderKind, ProviderResult, REQUEST_TIMEOUT, TranslationProvider};
pub use service::{CACHED_CONFIDENCE, TranslationResult, TranslationService};
