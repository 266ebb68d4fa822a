//! XDG-style locations for the config file and the translation cache.
//!
//! `XDG_*` variables win over the platform defaults on every OS so the
//! layout is the same on Linux and macOS.

use anyhow::{Context, Result};
use std::path::PathBuf;

const APP_DIR: &str = "transcache";

/// Returns `$XDG_CONFIG_HOME/transcache`, or `~/.config/transcache`.
pub fn config_dir() -> Result<PathBuf> {
    xdg_dir("XDG_CONFIG_HOME", ".config")
}

/// Returns `$XDG_CACHE_HOME/transcache`, or `~/.cache/transcache`.
pub fn cache_dir() -> Result<PathBuf> {
    xdg_dir("XDG_CACHE_HOME", ".cache")
}

fn xdg_dir(env_var: &str, home_fallback: &str) -> Result<PathBuf> {
    if let Ok(base) = std::env::var(env_var)
        && !base.is_empty()
    {
        return Ok(PathBuf::from(base).join(APP_DIR));
    }

    let home = dirs::home_dir().context("Failed to determine home directory")?;
    Ok(home.join(home_fallback).join(APP_DIR))
}
