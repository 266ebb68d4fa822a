//! Supported target languages.

use crate::error::TranslateError;
use crate::ui::Style;

/// Source language tag meaning "let the provider detect it".
pub const AUTO: &str = "auto";

/// Supported language tags and their native display names.
pub const SUPPORTED_LANGUAGES: &[(&str, &str)] = &[
    ("zh-CN", "简体中文"),
    ("zh-TW", "繁體中文"),
    ("en", "English"),
    ("ja", "日本語"),
    ("ko", "한국어"),
    ("fr", "Français"),
    ("de", "Deutsch"),
    ("es", "Español"),
    ("ru", "Русский"),
    ("pt", "Português"),
    ("it", "Italiano"),
    ("ar", "العربية"),
];

/// Returns the supported language table as `(tag, display name)` pairs.
pub fn supported_languages() -> impl Iterator<Item = (&'static str, &'static str)> {
    SUPPORTED_LANGUAGES.iter().copied()
}

pub fn is_supported(tag: &str) -> bool {
    SUPPORTED_LANGUAGES.iter().any(|(code, _)| *code == tag)
}

pub fn display_name(tag: &str) -> Option<&'static str> {
    SUPPORTED_LANGUAGES
        .iter()
        .find(|(code, _)| *code == tag)
        .map(|(_, name)| *name)
}

/// Checks that `tag` can be used as a target language.
pub fn validate_target(tag: &str) -> Result<(), TranslateError> {
    if is_supported(tag) {
        Ok(())
    } else {
        Err(TranslateError::UnsupportedLanguage(tag.to_string()))
    }
}

/// Prints all supported language tags to stdout.
pub fn print_languages() {
    println!("{}", Style::header("Supported languages"));
    for (code, name) in supported_languages() {
        println!("  {:6} {}", Style::code(code), Style::secondary(name));
    }
}
