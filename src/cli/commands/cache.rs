//! Cache maintenance command handler.

use anyhow::{Context, Result};

use super::load_config;
use crate::cache::CacheMap;
use crate::cli::CacheCommand;
use crate::config::{CacheBackend, ResolveOptions, ResolvedConfig};
use crate::translation::TranslationService;
use crate::ui::Style;

pub async fn run_cache(command: CacheCommand) -> Result<()> {
    let config = load_config(&ResolveOptions::default())?;

    match command {
        CacheCommand::Info => print_info(&config),
        CacheCommand::Prune => prune(&config).await,
        CacheCommand::Clear => clear(&config).await,
    }
}

fn print_info(config: &ResolvedConfig) -> Result<()> {
    let store = config.open_store()?;
    let backend = match config.cache_backend {
        CacheBackend::Json => "json",
        CacheBackend::Sqlite => "sqlite",
        CacheBackend::Memory => "memory",
    };

    println!("{} {}", Style::label("backend:"), Style::value(backend));
    if let Some(path) = config.store_path()? {
        println!("{} {}", Style::label("path:   "), path.display());
    }
    println!("{} {}", Style::label("entries:"), store.load().len());
    Ok(())
}

async fn prune(config: &ResolvedConfig) -> Result<()> {
    let store = config.open_store()?;
    let before = store.load().len();

    // Construction sweeps expired entries.
    let service = TranslationService::new(store, Vec::new());
    let removed = before.saturating_sub(service.cache_len());
    service
        .flush()
        .await
        .context("Failed to save translation cache")?;

    println!(
        "{} removed {removed} expired translation(s), {} remaining",
        Style::success("Pruned:"),
        service.cache_len()
    );
    Ok(())
}

async fn clear(config: &ResolvedConfig) -> Result<()> {
    let service = TranslationService::new(config.open_store()?, Vec::new());
    service.replace_all(CacheMap::new());
    service
        .flush()
        .await
        .context("Failed to save translation cache")?;

    println!("{} translation cache is empty", Style::success("Cleared:"));
    Ok(())
}
