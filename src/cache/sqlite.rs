use anyhow::{Context, Result};
use rusqlite::Connection;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};

use crate::paths;

/// Identifies one whole-text translation in the cache.
#[derive(Debug, Clone, Copy)]
pub struct TranslationKey<'a> {
    pub source_text: &'a str,
    pub source_language: &'a str,
    pub target_language: &'a str,
    /// The translation backend endpoint, so switching services never serves stale text.
    pub endpoint: &'a str,
}

impl TranslationKey<'_> {
    /// Compute cache key for this translation
    pub fn cache_key(&self) -> String {
        let cache_input = serde_json::json!({
            "source_text": self.source_text,
            "source_language": self.source_language,
            "target_language": self.target_language,
            "endpoint": self.endpoint,
        });

        let mut hasher = Sha256::new();
        hasher.update(cache_input.to_string().as_bytes());
        hex::encode(hasher.finalize())
    }
}

/// `SQLite`-backed store of successful translations.
///
/// Only translations that fully succeeded are written; degraded results
/// (original text or apology) must never be stored here.
#[derive(Debug, Clone)]
pub struct TranslationCache {
    db_path: PathBuf,
}

impl TranslationCache {
    /// Opens the cache at `$XDG_CACHE_HOME/pivot-relay/translations.db`.
    pub fn open_default() -> Result<Self> {
        Self::open(paths::cache_dir().join("translations.db"))
    }

    /// Opens (creating if needed) the cache database at `db_path`.
    pub fn open(db_path: impl AsRef<Path>) -> Result<Self> {
        let db_path = db_path.as_ref().to_path_buf();

        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create cache directory: {}", parent.display())
            })?;
        }

        let cache = Self { db_path };
        cache.init_db()?;

        Ok(cache)
    }

    pub fn path(&self) -> &Path {
        &self.db_path
    }

    fn init_db(&self) -> Result<()> {
        let conn = self.connect()?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS translations (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                cache_key TEXT UNIQUE NOT NULL,
                source_text TEXT NOT NULL,
                translated_text TEXT NOT NULL,
                source_language TEXT NOT NULL,
                target_language TEXT NOT NULL,
                endpoint TEXT NOT NULL,
                created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
                accessed_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
            )",
            [],
        )
        .context("Failed to create translations table")?;

        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_cache_key ON translations(cache_key)",
            [],
        )
        .context("Failed to create index")?;

        Ok(())
    }

    fn connect(&self) -> Result<Connection> {
        Connection::open(&self.db_path)
            .with_context(|| format!("Failed to open cache database: {}", self.db_path.display()))
    }

    pub fn get(&self, key: &TranslationKey<'_>) -> Result<Option<String>> {
        let cache_key = key.cache_key();
        let conn = self.connect()?;

        let mut stmt =
            conn.prepare("SELECT translated_text FROM translations WHERE cache_key = ?1")?;

        let result: Option<String> = stmt.query_row([&cache_key], |row| row.get(0)).ok();

        if result.is_some() {
            conn.execute(
                "UPDATE translations SET accessed_at = CURRENT_TIMESTAMP WHERE cache_key = ?1",
                [&cache_key],
            )?;
        }

        Ok(result)
    }

    pub fn put(&self, key: &TranslationKey<'_>, translated_text: &str) -> Result<()> {
        let cache_key = key.cache_key();
        let conn = self.connect()?;

        conn.execute(
            "INSERT OR REPLACE INTO translations
             (cache_key, source_text, translated_text, source_language, target_language, endpoint)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            [
                cache_key.as_str(),
                key.source_text,
                translated_text,
                key.source_language,
                key.target_language,
                key.endpoint,
            ],
        )
        .context("Failed to insert translation into cache")?;

        Ok(())
    }
}
