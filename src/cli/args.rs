use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::{ConfigManager, ResolveOptions};
use crate::logger::parse_level;
use crate::translation::parse_language;

#[derive(Parser, Debug)]
#[command(name = "pivot-relay")]
#[command(about = "Chat relay that talks to a text-generation service through a pivot language")]
#[command(version)]
pub struct Args {
    /// Config file path (default: ~/.config/pivot-relay/config.toml)
    #[arg(short = 'c', long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Language users write in (e.g., om)
    #[arg(short = 'l', long = "local", global = true, value_parser = parse_language)]
    pub local: Option<String>,

    /// Language the generation service works in (e.g., en)
    #[arg(short = 'p', long = "pivot", global = true, value_parser = parse_language)]
    pub pivot: Option<String>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, value_parser = parse_log_level)]
    pub log_level: Option<String>,

    /// Disable the translation cache
    #[arg(short = 'n', long, global = true)]
    pub no_cache: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Run the Telegram bot (default)
    Serve,
    /// Talk to the relay from the terminal
    Chat {
        /// Conversation history is kept per user id
        #[arg(short = 'u', long, default_value_t = 1)]
        user_id: u64,
    },
    /// List supported language codes
    Languages,
    /// Write a default config file
    Init {
        /// Overwrite an existing config file without asking
        #[arg(short = 'f', long)]
        force: bool,
    },
}

impl Args {
    pub fn resolve_options(&self) -> ResolveOptions {
        ResolveOptions {
            local_language: self.local.clone(),
            pivot_language: self.pivot.clone(),
            log_level: self.log_level.clone(),
            no_cache: self.no_cache,
        }
    }

    pub fn config_manager(&self) -> ConfigManager {
        self.config
            .as_ref()
            .map_or_else(ConfigManager::new, ConfigManager::with_path)
    }
}

fn parse_log_level(level: &str) -> Result<String, String> {
    parse_level(level)
        .map(|_| level.to_string())
        .map_err(|e| e.to_string())
}
