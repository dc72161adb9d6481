use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{info, warn};

use super::orchestrator::Relay;
use crate::cache::TranslationCache;
use crate::clock::{Sleeper, TokioSleeper};
use crate::config::ResolvedConfig;
use crate::filter::ContentFilter;
use crate::history::ConversationStore;
use crate::inference::{
    HuggingFaceClient, InferenceClient, InferenceSettings, Retrier, RetryPolicy,
};
use crate::translation::{GoogleTranslateClient, Translator, TranslatorSettings};

/// Wires the HTTP backends, cache and history store into a [`Relay`].
///
/// The returned relay owns the only history store of the process.
pub fn build_relay(config: &ResolvedConfig) -> Result<Relay> {
    let sleeper: Arc<dyn Sleeper> = Arc::new(TokioSleeper);
    let history = Arc::new(ConversationStore::new(config.max_turns));

    let translation_backend = GoogleTranslateClient::new(
        config.translation.endpoint.clone(),
        config.translation.timeout,
    )
    .context("Failed to create translation client")?;

    let mut translator = Translator::new(
        Arc::new(translation_backend),
        Arc::clone(&sleeper),
        TranslatorSettings {
            local_language: config.local_language.clone(),
            pivot_language: config.pivot_language.clone(),
            chunk_size: config.translation.chunk_size,
            chunk_delay: config.translation.chunk_delay,
            apology: config.messages.translation_apology.clone(),
        },
    );

    if config.translation.cache {
        match TranslationCache::open_default() {
            Ok(cache) => {
                info!(path = %cache.path().display(), "translation cache enabled");
                translator = translator.with_cache(cache);
            }
            Err(e) => warn!(error = %e, "translation cache unavailable, continuing without it"),
        }
    }

    let generation_backend = HuggingFaceClient::new(
        config.generation.api_url.clone(),
        config.generation.api_token.expose().to_string(),
    );
    let inference = InferenceClient::new(
        Arc::new(generation_backend),
        Arc::clone(&history),
        Retrier::new(
            RetryPolicy::fixed(config.generation.max_attempts, config.generation.retry_delay),
            sleeper,
        ),
        InferenceSettings {
            timeout: config.generation.timeout,
            context_turns: config.context_turns,
            max_response_chars: config.generation.max_response_chars,
            fallback: config.messages.inference_fallback.clone(),
        },
    );

    Ok(Relay::new(
        ContentFilter::with_extra_terms(&config.filter_terms),
        translator,
        inference,
        history,
        config.messages.clone(),
    ))
}
