//! # transcache - Cached Translation with Provider Fallback
//!
//! `transcache` translates text through a chain of online providers,
//! falling back to the next one when a provider fails, and keeps every
//! result in a persistent cache with a 7-day lifetime.
//!
//! ## Features
//!
//! - **Provider fallback**: Google first, Baidu as backup (configurable order)
//! - **Caching**: JSON file or `SQLite` store, written in the background
//! - **Long text**: inputs over 1000 characters are split at sentence
//!   boundaries, translated chunk by chunk and reassembled
//!
//! ## Quick Start
//!
//! ```bash
//! # Translate stdin into Simplified Chinese (the default target)
//! echo "Hello world" | transcache
//!
//! # Translate a file into Japanese
//! transcache --to ja ./notes.txt
//!
//! # Detect the language of some text
//! echo "Bonjour" | transcache detect
//! ```
//!
//! ## Configuration
//!
//! Settings are stored in `~/.config/transcache/config.toml`:
//!
//! ```toml
//! [transcache]
//! to = "ja"
//!
//! [cache]
//! backend = "sqlite"
//!
//! [providers]
//! order = ["baidu", "google"]
//! timeout_secs = 5
//! ```

/// Translation cache: entries, storage backends and the shared table.
pub mod cache;

/// Command-line interface definitions and handlers.
pub mod cli;

/// Configuration file management and resolution.
pub mod config;

/// Error types for providers, translation and persistence.
pub mod error;

/// File system utilities.
pub mod fs;

/// Input reading from files and stdin.
pub mod input;

/// XDG-style path utilities for configuration and cache.
pub mod paths;

/// Providers, chunking and the translation service.
pub mod translation;

/// Terminal UI components (spinner, colors).
pub mod ui;
