//! # pivot-relay - Translating Chat Relay
//!
//! `pivot-relay` lets people talk to a text-generation service in a language
//! the service does not speak. Each message is translated from the local
//! language (Afaan Oromo by default) into a pivot language (English), answered
//! by the generation service with the user's recent turns as context, and
//! translated back before it is delivered.
//!
//! ## Features
//!
//! - **Graceful degradation**: translation failures fall back to the original
//!   text or a fixed apology, generation failures are retried and then
//!   answered with a fixed message
//! - **Conversation context**: a bounded per-user history feeds every prompt
//! - **Content filter**: denylisted input is refused before any network call
//! - **Front ends**: a Telegram bot (`pivot-relay serve`) and a console REPL
//!   (`pivot-relay chat`) over the same pipeline
//! - **Caching**: successful translations are kept in `SQLite`
//!
//! ## Quick Start
//!
//! ```bash
//! export TELEGRAM_BOT_TOKEN=123:abc
//! export HF_AI_MODEL_API_URL=https://api-inference.huggingface.co/models/...
//! export HF_AI_MODEL_API_TOKEN=hf_...
//!
//! # Run the Telegram bot
//! pivot-relay
//!
//! # Talk to the relay from the terminal
//! pivot-relay chat
//!
//! # Relay Amharic instead of Afaan Oromo
//! pivot-relay --local am chat
//! ```
//!
//! ## Configuration
//!
//! Optional settings live in `~/.config/pivot-relay/config.toml`
//! (`pivot-relay init` writes the defaults):
//!
//! ```toml
//! [relay]
//! local_language = "om"
//! pivot_language = "en"
//!
//! [generation]
//! max_attempts = 3
//! retry_delay_secs = 2
//!
//! [filter]
//! extra_terms = ["casino"]
//! ```

/// Translation cache management using `SQLite`.
pub mod cache;

/// Interactive console front end.
pub mod chat;

/// Length-bounded splitting of text for the translation service.
pub mod chunker;

/// Command-line interface definitions and handlers.
pub mod cli;

/// Injectable sleeping for delays between chunks and retries.
pub mod clock;

/// Configuration file management and resolution.
pub mod config;

/// Denylist content filter.
pub mod filter;

/// File system utilities.
pub mod fs;

/// Per-user bounded conversation history.
pub mod history;

/// Text generation with context, timeouts and retries.
pub mod inference;

/// Logging initialisation.
pub mod logger;

/// Fixed localized reply texts.
pub mod messages;

/// XDG-style path utilities for configuration and cache.
pub mod paths;

/// The message relay pipeline.
pub mod relay;

/// Telegram front end.
#[cfg(feature = "telegram")]
pub mod telegram;

/// Translation between the local and pivot languages.
pub mod translation;

/// Terminal UI components (spinner, colors).
pub mod ui;

#[cfg(test)]
pub(crate) mod testing;
