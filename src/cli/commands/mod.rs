//! Subcommand implementations.

/// Console chat command handler.
pub mod chat;

/// Config file bootstrap command handler.
pub mod init;

/// Telegram bot command handler.
pub mod serve;
