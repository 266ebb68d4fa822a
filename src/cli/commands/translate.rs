use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::warn;

use super::load_config;
use crate::config::ResolveOptions;
use crate::error::TranslateError;
use crate::input::read_input;
use crate::translation::TranslationResult;
use crate::ui::{Spinner, Style};

pub struct TranslateOptions {
    pub file: Option<PathBuf>,
    pub to: Option<String>,
    pub from: Option<String>,
    pub no_cache: bool,
    pub json: bool,
}

pub async fn run_translate(options: TranslateOptions) -> Result<()> {
    let config = load_config(&ResolveOptions {
        to: options.to,
        from: options.from,
        no_cache: options.no_cache,
    })?;

    let source_text = read_input(options.file.as_deref())?;
    if source_text.trim().is_empty() {
        return Err(TranslateError::InvalidInput.into());
    }

    let service = config.build_service()?;

    let spinner = Spinner::start("Translating...");
    let outcome = service
        .translate(
            &source_text,
            &config.target_language,
            config.source_language.as_deref(),
        )
        .await;
    spinner.stop();

    // Background writes would be lost when the process exits.
    if let Err(e) = service.flush().await {
        warn!(error = %e, "failed to save translation cache");
    }

    let result = outcome?;
    if options.json {
        let json = serde_json::to_string_pretty(&result).context("Failed to serialize result")?;
        println!("{json}");
    } else {
        println!("{}", result.translation);
        eprintln!("{}", summary(&result));
    }

    Ok(())
}

/// One-line description of where a translation came from.
fn summary(result: &TranslationResult) -> String {
    let origin = if result.from_cache {
        "cache".to_string()
    } else {
        result
            .provider
            .clone()
            .unwrap_or_else(|| "online".to_string())
    };

    let mut parts = vec![
        format!("{} {}", Style::label("source:"), Style::value(origin)),
        format!(
            "{} {:.0}%",
            Style::label("confidence:"),
            result.confidence * 100.0
        ),
        format!(
            "{} {}",
            Style::label("detected:"),
            Style::code(&result.detected_language)
        ),
    ];
    if let Some(count) = result.chunk_count {
        parts.push(format!("{} {count}", Style::label("chunks:")));
    }

    parts.join(Style::secondary(" | ").as_str())
}
