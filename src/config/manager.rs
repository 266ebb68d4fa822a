use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::cache::{CacheStore, JsonFileStore, MemoryStore, SqliteStore};
use crate::paths;
use crate::translation::{
    AUTO, ProviderKind, REQUEST_TIMEOUT, TranslationProvider, TranslationService, is_supported,
};

/// Target language used when neither the CLI nor the config file names one.
pub const DEFAULT_TARGET_LANGUAGE: &str = "zh-CN";

/// Defaults in the `[transcache]` section of config.toml.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Default target language tag.
    pub to: Option<String>,
    /// Default source language tag (`auto` when unset).
    pub from: Option<String>,
}

/// Where the translation cache lives.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheBackend {
    /// `translation-cache.json` in the cache directory.
    #[default]
    Json,
    /// `translations.db` in the cache directory.
    Sqlite,
    /// Nothing is persisted.
    Memory,
}

/// The `[cache]` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CacheConfig {
    #[serde(default)]
    pub backend: CacheBackend,
    /// Overrides the default file location for the chosen backend.
    pub path: Option<PathBuf>,
}

/// The `[providers]` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProvidersConfig {
    /// Fallback order, primary first.
    pub order: Option<Vec<ProviderKind>>,
    /// Per-request timeout in seconds.
    pub timeout_secs: Option<u64>,
    pub google_endpoint: Option<String>,
    pub baidu_endpoint: Option<String>,
}

/// The complete configuration file structure.
///
/// Corresponds to `~/.config/transcache/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub transcache: GeneralConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub providers: ProvidersConfig,
}

/// CLI overrides that take precedence over config file values.
#[derive(Debug, Clone, Default)]
pub struct ResolveOptions {
    pub to: Option<String>,
    pub from: Option<String>,
    /// Use an in-memory cache for this run only.
    pub no_cache: bool,
}

/// Configuration after merging CLI arguments, config file and defaults.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub target_language: String,
    /// `None` means `auto`.
    pub source_language: Option<String>,
    pub cache_backend: CacheBackend,
    pub cache_path: Option<PathBuf>,
    pub providers: Vec<ProviderKind>,
    pub timeout: Duration,
    pub google_endpoint: Option<String>,
    pub baidu_endpoint: Option<String>,
}

/// Resolves configuration: CLI options, then config file, then built-in defaults.
///
/// # Errors
///
/// Returns an error if a language tag is unsupported, the provider order is
/// empty or the timeout is zero.
pub fn resolve_config(options: &ResolveOptions, config_file: &ConfigFile) -> Result<ResolvedConfig> {
    let target_language = options
        .to
        .as_ref()
        .or(config_file.transcache.to.as_ref())
        .cloned()
        .unwrap_or_else(|| DEFAULT_TARGET_LANGUAGE.to_string());

    if !is_supported(&target_language) {
        bail!(
            "Invalid language code: '{target_language}'\n\n\
             Run 'transcache languages' to see all supported codes."
        );
    }

    let source_language = options
        .from
        .as_ref()
        .or(config_file.transcache.from.as_ref())
        .filter(|lang| lang.as_str() != AUTO)
        .cloned();

    if let Some(lang) = &source_language
        && !is_supported(lang)
    {
        bail!(
            "Invalid source language code: '{lang}'\n\n\
             Use 'auto' or one of the codes listed by 'transcache languages'."
        );
    }

    let providers = config_file
        .providers
        .order
        .clone()
        .unwrap_or_else(|| ProviderKind::DEFAULT_ORDER.to_vec());
    if providers.is_empty() {
        bail!("Provider order is empty\n\nList at least one provider in [providers] order");
    }

    let timeout = match config_file.providers.timeout_secs {
        Some(0) => bail!("Provider timeout must be at least 1 second"),
        Some(secs) => Duration::from_secs(secs),
        None => REQUEST_TIMEOUT,
    };

    let cache_backend = if options.no_cache {
        CacheBackend::Memory
    } else {
        config_file.cache.backend
    };

    Ok(ResolvedConfig {
        target_language,
        source_language,
        cache_backend,
        cache_path: config_file.cache.path.clone(),
        providers,
        timeout,
        google_endpoint: config_file.providers.google_endpoint.clone(),
        baidu_endpoint: config_file.providers.baidu_endpoint.clone(),
    })
}

impl ResolvedConfig {
    /// File backing the cache, or `None` for the memory backend.
    pub fn store_path(&self) -> Result<Option<PathBuf>> {
        let default_name = match self.cache_backend {
            CacheBackend::Json => "translation-cache.json",
            CacheBackend::Sqlite => "translations.db",
            CacheBackend::Memory => return Ok(None),
        };
        match &self.cache_path {
            Some(path) => Ok(Some(path.clone())),
            None => Ok(Some(paths::cache_dir()?.join(default_name))),
        }
    }

    /// Opens the cache store for the configured backend.
    pub fn open_store(&self) -> Result<Arc<dyn CacheStore>> {
        let Some(path) = self.store_path()? else {
            return Ok(Arc::new(MemoryStore::new()));
        };

        let store: Arc<dyn CacheStore> = if self.cache_backend == CacheBackend::Sqlite {
            let store = SqliteStore::open(&path)
                .with_context(|| format!("Failed to open cache database: {}", path.display()))?;
            Arc::new(store)
        } else {
            Arc::new(JsonFileStore::new(path))
        };
        Ok(store)
    }

    /// Builds the provider fallback chain in configured order.
    pub fn build_providers(&self) -> Result<Vec<Arc<dyn TranslationProvider>>> {
        self.providers
            .iter()
            .map(|kind| {
                let endpoint = match kind {
                    ProviderKind::Google => self.google_endpoint.as_deref(),
                    ProviderKind::Baidu => self.baidu_endpoint.as_deref(),
                };
                kind.build(endpoint, self.timeout)
                    .with_context(|| format!("Failed to create {kind} client"))
            })
            .collect()
    }

    /// Assembles a [`TranslationService`]. Must run inside a Tokio runtime.
    pub fn build_service(&self) -> Result<TranslationService> {
        Ok(TranslationService::new(
            self.open_store()?,
            self.build_providers()?,
        ))
    }
}

/// Loads the configuration file.
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Creates a manager for `$XDG_CONFIG_HOME/transcache/config.toml`
    /// (or `~/.config/transcache/config.toml`).
    pub fn new() -> Result<Self> {
        Ok(Self {
            config_path: paths::config_dir()?.join("config.toml"),
        })
    }

    pub fn with_path(config_path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: config_path.into(),
        }
    }

    pub fn load(&self) -> Result<ConfigFile> {
        let contents = fs::read_to_string(&self.config_path).with_context(|| {
            format!("Failed to read config file: {}", self.config_path.display())
        })?;

        toml::from_str(&contents).with_context(|| {
            format!(
                "Failed to parse config file: {}",
                self.config_path.display()
            )
        })
    }

    /// Loads the file, or returns defaults when it does not exist.
    ///
    /// A file that exists but cannot be parsed is still an error.
    pub fn load_or_default(&self) -> Result<ConfigFile> {
        if self.config_path.exists() {
            self.load()
        } else {
            Ok(ConfigFile::default())
        }
    }
}
