//! Configuration loading and resolution.
//!
//! Settings come from four places, highest priority first: CLI options,
//! environment variables, the TOML config file, built-in defaults. Credentials
//! are only ever read from the environment (optionally seeded from `.env`).

mod manager;

pub use manager::{
    ConfigError, ConfigFile, ConfigManager, FilterSection, GENERATION_TOKEN_ENV,
    GENERATION_URL_ENV, GenerationSection, GenerationSettings, HistorySection, RelaySection,
    ResolveOptions, ResolvedConfig, Secret, TELEGRAM_TOKEN_ENV, TranslationSection,
    TranslationSettings, resolve_config,
};
