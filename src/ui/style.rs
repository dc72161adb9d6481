//! Consistent styling utilities for console output.

use owo_colors::OwoColorize;
use std::fmt::Display;

/// Styles for different semantic elements.
pub struct Style;

impl Style {
    /// Section headers ("Configuration", "Available commands").
    pub fn header<T: Display>(text: T) -> String {
        format!("{}", text.bold())
    }

    /// Labels and keys ("local", "pivot").
    pub fn label<T: Display>(text: T) -> String {
        format!("{}", text.dimmed())
    }

    pub fn value<T: Display>(text: T) -> String {
        format!("{}", text.cyan())
    }

    /// Supplementary info such as endpoints and descriptions.
    pub fn secondary<T: Display>(text: T) -> String {
        format!("{}", text.dimmed())
    }

    pub fn success<T: Display>(text: T) -> String {
        format!("{}", text.green())
    }

    pub fn error<T: Display>(text: T) -> String {
        format!("{}", text.red().bold())
    }

    /// Slash commands ("/history", "/quit").
    pub fn command<T: Display>(text: T) -> String {
        format!("{}", text.green())
    }

    pub fn code<T: Display>(text: T) -> String {
        format!("{}", text.yellow())
    }

    /// The assistant's side of the conversation.
    pub fn reply<T: Display>(text: T) -> String {
        format!("{}", text.bright_white())
    }

    pub fn version<T: Display>(text: T) -> String {
        format!("{}", text.dimmed())
    }
}
