//! Consistent styling for CLI output, built on owo-colors.

use owo_colors::OwoColorize;
use std::fmt::Display;

/// Styles for the semantic pieces of CLI output.
pub struct Style;

impl Style {
    /// Section headers (e.g. "Supported languages").
    pub fn header<T: Display>(text: T) -> String {
        format!("{}", text.bold())
    }

    /// Labels in key/value listings.
    pub fn label<T: Display>(text: T) -> String {
        format!("{}", text.dimmed())
    }

    /// Primary values such as provider names.
    pub fn value<T: Display>(text: T) -> String {
        format!("{}", text.cyan())
    }

    pub fn secondary<T: Display>(text: T) -> String {
        format!("{}", text.dimmed())
    }

    pub fn success<T: Display>(text: T) -> String {
        format!("{}", text.green())
    }

    pub fn error<T: Display>(text: T) -> String {
        format!("{}", text.red().bold())
    }

    /// Language tags.
    pub fn code<T: Display>(text: T) -> String {
        format!("{}", text.yellow())
    }
}
