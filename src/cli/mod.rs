//! Command-line interface definitions and handlers.

use anyhow::Result;

use crate::config::{ResolvedConfig, resolve_config};
use crate::logger;

/// CLI argument parsing with clap.
pub mod args;

/// Subcommand implementations.
pub mod commands;

pub use args::{Args, Command};

/// Level used by the console REPL unless `--log-level` is given, so log lines
/// do not interleave with the conversation.
const CONSOLE_LOG_LEVEL: &str = "warn";

/// Loads the config file, merges CLI options and the process environment,
/// then installs the logger.
///
/// An explicit `--config` path must exist; the default path is optional.
pub fn load_config(args: &Args, console: bool) -> Result<ResolvedConfig> {
    let manager = args.config_manager();
    let file = if args.config.is_some() {
        manager.load()?
    } else {
        manager.load_or_default()?
    };

    let config = resolve_config(&args.resolve_options(), &file, |name| {
        std::env::var(name).ok()
    })?;

    let level = match (&args.log_level, console) {
        (None, true) => CONSOLE_LOG_LEVEL,
        _ => config.log_level.as_str(),
    };
    logger::init(level, args.log_level.is_some())?;

    Ok(config)
}
