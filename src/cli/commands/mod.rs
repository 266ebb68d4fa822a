//! Subcommand implementations.

use anyhow::Result;

use crate::config::{ConfigManager, ResolveOptions, ResolvedConfig, resolve_config};

/// Cache maintenance command handler.
pub mod cache;

/// Language detection command handler.
pub mod detect;

/// Provider chain listing.
pub mod providers;

/// Translation command handler.
pub mod translate;

/// Loads the config file (defaults when absent) and merges CLI overrides.
fn load_config(options: &ResolveOptions) -> Result<ResolvedConfig> {
    let file_config = ConfigManager::new()?.load_or_default()?;
    resolve_config(options, &file_config)
}
