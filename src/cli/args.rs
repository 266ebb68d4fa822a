use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "transcache")]
#[command(about = "Cached translation CLI with automatic provider fallback")]
#[command(version)]
pub struct Args {
    /// File to translate (reads from stdin if not provided)
    pub file: Option<PathBuf>,

    /// Target language tag (e.g., zh-CN, en, ja)
    #[arg(short = 't', long = "to")]
    pub to: Option<String>,

    /// Source language tag (defaults to auto-detection)
    #[arg(short = 'f', long = "from")]
    pub from: Option<String>,

    /// Neither read nor write the persistent cache
    #[arg(short = 'n', long)]
    pub no_cache: bool,

    /// Print the full translation result as JSON
    #[arg(long)]
    pub json: bool,

    /// Show debug logs on stderr
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List supported language tags
    Languages,
    /// Detect the language of a file or stdin
    Detect {
        /// File to inspect (reads from stdin if not provided)
        file: Option<PathBuf>,
    },
    /// Show the provider fallback chain
    Providers,
    /// Manage the translation cache
    Cache {
        #[command(subcommand)]
        command: CacheCommand,
    },
}

#[derive(Subcommand, Debug, Clone, Copy)]
pub enum CacheCommand {
    /// Show where the cache lives and how many entries it holds
    Info,
    /// Remove expired translations
    Prune,
    /// Remove every cached translation
    Clear,
}
