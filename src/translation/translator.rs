use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use super::backend::{TranslationBackend, TranslationError};
use super::entities::repair_entities;
use crate::cache::{TranslationCache, TranslationKey};
use crate::chunker::chunk;
use crate::clock::Sleeper;
use crate::messages::DEFAULT_TRANSLATION_APOLOGY;

/// Largest piece of text sent to the backend in one call.
pub const DEFAULT_CHUNK_SIZE: usize = 400;

/// Pause between consecutive backend calls for one multi-chunk text.
pub const DEFAULT_CHUNK_DELAY: Duration = Duration::from_millis(500);

/// What a failed translation degraded to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fallback {
    /// The untranslated input (local → pivot).
    Original,
    /// The fixed apology in the local language (pivot → local).
    Apology,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranslationResult {
    Translated(String),
    Degraded { text: String, fallback: Fallback },
}

impl TranslationResult {
    pub fn text(&self) -> &str {
        match self {
            Self::Translated(text) | Self::Degraded { text, .. } => text,
        }
    }

    pub fn into_text(self) -> String {
        match self {
            Self::Translated(text) | Self::Degraded { text, .. } => text,
        }
    }

    pub const fn is_translated(&self) -> bool {
        matches!(self, Self::Translated(_))
    }

    pub const fn fallback(&self) -> Option<Fallback> {
        match self {
            Self::Translated(_) => None,
            Self::Degraded { fallback, .. } => Some(*fallback),
        }
    }
}

#[derive(Debug, Clone)]
pub struct TranslatorSettings {
    /// Language the users write in.
    pub local_language: String,
    /// Language the generation service works in.
    pub pivot_language: String,
    pub chunk_size: usize,
    pub chunk_delay: Duration,
    /// Sent instead of an untranslatable reply.
    pub apology: String,
}

impl Default for TranslatorSettings {
    fn default() -> Self {
        Self {
            local_language: "om".to_string(),
            pivot_language: "en".to_string(),
            chunk_size: DEFAULT_CHUNK_SIZE,
            chunk_delay: DEFAULT_CHUNK_DELAY,
            apology: DEFAULT_TRANSLATION_APOLOGY.to_string(),
        }
    }
}

/// Chunking, entity-repairing, never-failing wrapper around a [`TranslationBackend`].
///
/// Failures never escape: translating into the local language degrades to the
/// apology, any other direction degrades to the original text. Nothing is
/// retried at this layer.
pub struct Translator {
    backend: Arc<dyn TranslationBackend>,
    sleeper: Arc<dyn Sleeper>,
    cache: Option<TranslationCache>,
    settings: TranslatorSettings,
}

impl Translator {
    pub fn new(
        backend: Arc<dyn TranslationBackend>,
        sleeper: Arc<dyn Sleeper>,
        settings: TranslatorSettings,
    ) -> Self {
        Self {
            backend,
            sleeper,
            cache: None,
            settings,
        }
    }

    /// Serves repeated texts from `cache` and stores every full success in it.
    #[must_use]
    pub fn with_cache(mut self, cache: TranslationCache) -> Self {
        self.cache = Some(cache);
        self
    }

    pub const fn settings(&self) -> &TranslatorSettings {
        &self.settings
    }

    /// Local language → pivot language; degrades to the original text.
    pub async fn to_pivot(&self, text: &str) -> TranslationResult {
        self.translate(text, &self.settings.local_language, &self.settings.pivot_language)
            .await
    }

    /// Pivot language → local language; degrades to the apology.
    pub async fn to_local(&self, text: &str) -> TranslationResult {
        self.translate(text, &self.settings.pivot_language, &self.settings.local_language)
            .await
    }

    pub async fn translate(&self, text: &str, source: &str, target: &str) -> TranslationResult {
        if source == target || text.trim().is_empty() {
            return TranslationResult::Translated(text.to_string());
        }

        let key = TranslationKey {
            source_text: text,
            source_language: source,
            target_language: target,
            endpoint: self.backend.endpoint(),
        };

        if let Some(cached) = self.cached(&key) {
            debug!(src = source, dst = target, "translation served from cache");
            return TranslationResult::Translated(cached);
        }

        match self.translate_chunks(text, source, target).await {
            Ok(translated) => {
                info!(src = source, dst = target, "translation succeeded");
                self.store(&key, &translated);
                TranslationResult::Translated(translated)
            }
            Err(e) => {
                warn!(src = source, dst = target, error = %e, "translation failed, using fallback");
                self.fallback(text, target)
            }
        }
    }

    async fn translate_chunks(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> Result<String, TranslationError> {
        let chunks = chunk(text, self.settings.chunk_size);
        let mut translated = Vec::with_capacity(chunks.len());

        for (index, piece) in chunks.iter().enumerate() {
            if index > 0 {
                self.sleeper.sleep(self.settings.chunk_delay).await;
            }
            let raw = self.backend.translate(piece, source, target).await?;
            translated.push(repair_entities(&raw));
        }

        if chunks.len() > 1 {
            debug!(chunks = chunks.len(), "translated multi-chunk text");
        }

        Ok(translated.join(" "))
    }

    fn fallback(&self, text: &str, target: &str) -> TranslationResult {
        if target == self.settings.local_language {
            TranslationResult::Degraded {
                text: self.settings.apology.clone(),
                fallback: Fallback::Apology,
            }
        } else {
            TranslationResult::Degraded {
                text: text.to_string(),
                fallback: Fallback::Original,
            }
        }
    }

    fn cached(&self, key: &TranslationKey<'_>) -> Option<String> {
        let cache = self.cache.as_ref()?;
        cache
            .get(key)
            .inspect_err(|e| warn!(error = %e, "translation cache lookup failed"))
            .ok()
            .flatten()
    }

    fn store(&self, key: &TranslationKey<'_>, translated: &str) {
        if let Some(cache) = &self.cache
            && let Err(e) = cache.put(key, translated)
        {
            warn!(error = %e, "failed to store translation in cache");
        }
    }
}
