//! Interactive console front end.
//!
//! Runs the same relay pipeline as the Telegram bot, with the terminal as the
//! chat transport and slash commands for inspecting the session.

/// Slash command parsing and autocomplete.
pub mod command;
mod session;
mod ui;

pub use session::{ChatSession, ConsoleTransport, SessionConfig};
