//! Configuration file handling and CLI override resolution.

mod manager;

pub use manager::{
    CacheBackend, CacheConfig, ConfigFile, ConfigManager, GeneralConfig, ProvidersConfig,
    ResolveOptions, ResolvedConfig, resolve_config,
};
