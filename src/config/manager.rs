use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::fs::atomic_write;
use crate::history::{DEFAULT_CONTEXT_TURNS, DEFAULT_MAX_TURNS};
use crate::inference::DEFAULT_MAX_RESPONSE_CHARS;
use crate::inference::retry::DEFAULT_MAX_ATTEMPTS;
use crate::messages::Messages;
use crate::paths;
use crate::translation::{DEFAULT_TRANSLATE_ENDPOINT, language_name};

pub const TELEGRAM_TOKEN_ENV: &str = "TELEGRAM_BOT_TOKEN";
pub const GENERATION_URL_ENV: &str = "HF_AI_MODEL_API_URL";
pub const GENERATION_TOKEN_ENV: &str = "HF_AI_MODEL_API_TOKEN";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required setting: set the {name} environment variable")]
    MissingSecret { name: &'static str },

    #[error("unsupported {field} '{code}'; run 'pivot-relay languages' to see supported codes")]
    UnsupportedLanguage { field: &'static str, code: String },

    #[error("failed to read config file {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// `[relay]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelaySection {
    /// Language users write in.
    pub local_language: String,
    /// Language the generation service works in.
    pub pivot_language: String,
    pub log_level: String,
}

impl Default for RelaySection {
    fn default() -> Self {
        Self {
            local_language: "om".to_string(),
            pivot_language: "en".to_string(),
            log_level: "info".to_string(),
        }
    }
}

/// `[translation]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslationSection {
    pub endpoint: String,
    /// Maximum characters per translation request.
    pub chunk_size: usize,
    pub chunk_delay_ms: u64,
    pub timeout_secs: u64,
    /// Cache successful translations on disk.
    pub cache: bool,
}

impl Default for TranslationSection {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_TRANSLATE_ENDPOINT.to_string(),
            chunk_size: 400,
            chunk_delay_ms: 500,
            timeout_secs: 15,
            cache: true,
        }
    }
}

/// `[generation]` section. The credential is never read from the file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationSection {
    /// Used when `HF_AI_MODEL_API_URL` is unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,
    pub timeout_secs: u64,
    pub max_attempts: u32,
    pub retry_delay_secs: u64,
    pub max_response_chars: usize,
}

impl Default for GenerationSection {
    fn default() -> Self {
        Self {
            api_url: None,
            timeout_secs: 30,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            retry_delay_secs: 2,
            max_response_chars: DEFAULT_MAX_RESPONSE_CHARS,
        }
    }
}

/// `[history]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistorySection {
    pub max_turns: usize,
    pub context_turns: usize,
}

impl Default for HistorySection {
    fn default() -> Self {
        Self {
            max_turns: DEFAULT_MAX_TURNS,
            context_turns: DEFAULT_CONTEXT_TURNS,
        }
    }
}

/// `[filter]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterSection {
    /// Appended to the built-in denylist.
    pub extra_terms: Vec<String>,
}

/// The complete configuration file structure.
///
/// Corresponds to `~/.config/pivot-relay/config.toml`. Every section and key
/// is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    pub relay: RelaySection,
    pub translation: TranslationSection,
    pub generation: GenerationSection,
    pub history: HistorySection,
    pub filter: FilterSection,
    pub messages: Messages,
}

/// CLI overrides; they take precedence over environment and file values.
#[derive(Debug, Clone, Default)]
pub struct ResolveOptions {
    pub local_language: Option<String>,
    pub pivot_language: Option<String>,
    pub log_level: Option<String>,
    pub no_cache: bool,
}

#[derive(Debug, Clone)]
pub struct TranslationSettings {
    pub endpoint: String,
    pub chunk_size: usize,
    pub chunk_delay: Duration,
    pub timeout: Duration,
    pub cache: bool,
}

#[derive(Debug, Clone)]
pub struct GenerationSettings {
    pub api_url: String,
    pub api_token: Secret,
    pub timeout: Duration,
    pub max_attempts: u32,
    pub retry_delay: Duration,
    pub max_response_chars: usize,
}

/// Credential that never shows up in `Debug` output or logs.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for Secret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Secret(<redacted>)")
    }
}

/// Configuration after merging CLI options, environment and config file.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub local_language: String,
    pub pivot_language: String,
    pub log_level: String,
    pub translation: TranslationSettings,
    pub generation: GenerationSettings,
    pub max_turns: usize,
    pub context_turns: usize,
    pub filter_terms: Vec<String>,
    pub messages: Messages,
    telegram_token: Option<Secret>,
}

impl ResolvedConfig {
    /// Only the Telegram front end needs the bot token.
    pub fn telegram_token(&self) -> Result<&str, ConfigError> {
        self.telegram_token
            .as_ref()
            .map(Secret::expose)
            .ok_or(ConfigError::MissingSecret {
                name: TELEGRAM_TOKEN_ENV,
            })
    }
}

/// Resolves configuration by merging CLI options, environment and config file.
///
/// Priority: CLI option > environment > config file > built-in default.
/// `env` looks up an environment variable; empty values count as unset.
pub fn resolve_config<E>(
    options: &ResolveOptions,
    config_file: &ConfigFile,
    env: E,
) -> Result<ResolvedConfig, ConfigError>
where
    E: Fn(&str) -> Option<String>,
{
    let lookup = |name: &str| env(name).filter(|value| !value.trim().is_empty());

    let local_language = options
        .local_language
        .clone()
        .unwrap_or_else(|| config_file.relay.local_language.clone());
    let pivot_language = options
        .pivot_language
        .clone()
        .unwrap_or_else(|| config_file.relay.pivot_language.clone());
    check_language("local language", &local_language)?;
    check_language("pivot language", &pivot_language)?;

    let log_level = options
        .log_level
        .clone()
        .unwrap_or_else(|| config_file.relay.log_level.clone());

    let api_url = lookup(GENERATION_URL_ENV)
        .or_else(|| config_file.generation.api_url.clone())
        .ok_or(ConfigError::MissingSecret {
            name: GENERATION_URL_ENV,
        })?;
    let api_token = lookup(GENERATION_TOKEN_ENV)
        .map(Secret::new)
        .ok_or(ConfigError::MissingSecret {
            name: GENERATION_TOKEN_ENV,
        })?;

    let t = &config_file.translation;
    let g = &config_file.generation;

    Ok(ResolvedConfig {
        local_language,
        pivot_language,
        log_level,
        translation: TranslationSettings {
            endpoint: t.endpoint.clone(),
            chunk_size: t.chunk_size.max(1),
            chunk_delay: Duration::from_millis(t.chunk_delay_ms),
            timeout: Duration::from_secs(t.timeout_secs),
            cache: t.cache && !options.no_cache,
        },
        generation: GenerationSettings {
            api_url,
            api_token,
            timeout: Duration::from_secs(g.timeout_secs),
            max_attempts: g.max_attempts.max(1),
            retry_delay: Duration::from_secs(g.retry_delay_secs),
            max_response_chars: g.max_response_chars,
        },
        max_turns: config_file.history.max_turns.max(1),
        context_turns: config_file.history.context_turns,
        filter_terms: config_file.filter.extra_terms.clone(),
        messages: config_file.messages.clone(),
        telegram_token: lookup(TELEGRAM_TOKEN_ENV).map(Secret::new),
    })
}

fn check_language(field: &'static str, code: &str) -> Result<(), ConfigError> {
    if language_name(code).is_some() {
        Ok(())
    } else {
        Err(ConfigError::UnsupportedLanguage {
            field,
            code: code.to_string(),
        })
    }
}

/// Manages loading and saving configuration files.
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Uses `$XDG_CONFIG_HOME/pivot-relay/config.toml`, or
    /// `~/.config/pivot-relay/config.toml` if `XDG_CONFIG_HOME` is not set.
    pub fn new() -> Self {
        Self::with_path(paths::config_file())
    }

    pub fn with_path(config_path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: config_path.into(),
        }
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn exists(&self) -> bool {
        self.config_path.exists()
    }

    pub fn load(&self) -> Result<ConfigFile, ConfigError> {
        let contents = fs::read_to_string(&self.config_path).map_err(|source| ConfigError::Read {
            path: self.config_path.clone(),
            source,
        })?;

        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: self.config_path.clone(),
            source,
        })
    }

    /// Loads the file, or the defaults when it does not exist.
    ///
    /// Unreadable or invalid files are still errors.
    pub fn load_or_default(&self) -> Result<ConfigFile, ConfigError> {
        match self.load() {
            Err(ConfigError::Read { source, .. })
                if source.kind() == std::io::ErrorKind::NotFound =>
            {
                Ok(ConfigFile::default())
            }
            other => other,
        }
    }

    pub fn save(&self, config: &ConfigFile) -> anyhow::Result<()> {
        let contents = toml::to_string_pretty(config).context("Failed to serialize config")?;
        atomic_write(&self.config_path, &contents)
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}
