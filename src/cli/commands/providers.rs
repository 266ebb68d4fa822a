//! Provider chain listing command handler.

use anyhow::Result;

use super::load_config;
use crate::config::ResolveOptions;
use crate::translation::ProviderKind;
use crate::ui::Style;

/// Prints the configured fallback chain, primary first.
pub fn print_providers() -> Result<()> {
    let config = load_config(&ResolveOptions::default())?;

    println!("{}\n", Style::header("Provider fallback chain"));
    for (position, kind) in config.providers.iter().enumerate() {
        let endpoint = match kind {
            ProviderKind::Google => config.google_endpoint.as_deref(),
            ProviderKind::Baidu => config.baidu_endpoint.as_deref(),
        };
        println!(
            "  {}. {}{}",
            position + 1,
            Style::value(kind),
            endpoint.map_or_else(String::new, |url| format!(
                "  {}",
                Style::secondary(url)
            ))
        );
    }
    println!(
        "\n  {} {}s per provider",
        Style::label("timeout:"),
        config.timeout.as_secs()
    );

    Ok(())
}
