use anyhow::Result;
use std::path::Path;

use super::load_config;
use crate::config::ResolveOptions;
use crate::input::read_input;
use crate::translation::display_name;
use crate::ui::Style;

/// Prints the detected language tag, or `auto` when detection fails.
pub async fn run_detect(file: Option<&Path>) -> Result<()> {
    // Detection never touches the cache.
    let config = load_config(&ResolveOptions {
        no_cache: true,
        ..ResolveOptions::default()
    })?;

    let text = read_input(file)?;
    let service = config.build_service()?;

    let detected = service.detect_language(&text).await;
    println!("{detected}");
    if let Some(name) = display_name(&detected) {
        eprintln!("{}", Style::secondary(name));
    }
    Ok(())
}
