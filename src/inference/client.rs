use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info};

use super::backend::{GenerationBackend, GenerationError};
use super::prompt::{build_prompt, extract_reply, truncate_reply};
use super::retry::{Retrier, RetryExhausted};
use crate::history::{ConversationStore, DEFAULT_CONTEXT_TURNS, Turn, UserId};
use crate::messages::DEFAULT_INFERENCE_FALLBACK;

pub const DEFAULT_GENERATION_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_MAX_RESPONSE_CHARS: usize = 1000;

#[derive(Debug, Clone)]
pub struct InferenceSettings {
    /// Deadline for a single generation call.
    pub timeout: Duration,
    /// Context turns rendered into each prompt.
    pub context_turns: usize,
    pub max_response_chars: usize,
    /// Local-language message returned once every attempt has failed.
    pub fallback: String,
}

impl Default for InferenceSettings {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_GENERATION_TIMEOUT,
            context_turns: DEFAULT_CONTEXT_TURNS,
            max_response_chars: DEFAULT_MAX_RESPONSE_CHARS,
            fallback: DEFAULT_INFERENCE_FALLBACK.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InferenceOutcome {
    /// Extracted reply, in the pivot language.
    Success(String),
    /// Fallback message, already in the local language.
    ExhaustedRetries(String),
}

/// Context-aware, retrying front end to a [`GenerationBackend`].
pub struct InferenceClient {
    backend: Arc<dyn GenerationBackend>,
    history: Arc<ConversationStore>,
    retrier: Retrier,
    settings: InferenceSettings,
}

impl InferenceClient {
    pub fn new(
        backend: Arc<dyn GenerationBackend>,
        history: Arc<ConversationStore>,
        retrier: Retrier,
        settings: InferenceSettings,
    ) -> Self {
        Self {
            backend,
            history,
            retrier,
            settings,
        }
    }

    pub const fn settings(&self) -> &InferenceSettings {
        &self.settings
    }

    /// Generates a reply to `text` in the context of the user's recent turns.
    ///
    /// A successful turn is appended to the user's history; a failed one
    /// leaves history untouched. Callers must hold the user's pipeline lock.
    pub async fn generate(&self, user_id: UserId, text: &str) -> InferenceOutcome {
        let context = self
            .history
            .recent_context(user_id, self.settings.context_turns);
        let prompt = build_prompt(&context, text);
        debug!(user = %user_id, context_turns = context.len(), "built prompt");

        let result = self
            .retrier
            .execute(|_| self.attempt(&prompt), GenerationError::is_retryable)
            .await;

        match result {
            Ok(reply) => {
                info!(user = %user_id, chars = reply.chars().count(), "generation succeeded");
                self.history.append_turn(user_id, Turn::new(text, reply.as_str()));
                InferenceOutcome::Success(reply)
            }
            Err(RetryExhausted {
                attempts,
                last_error,
            }) => {
                error!(user = %user_id, attempts, error = %last_error, "generation failed on every attempt");
                InferenceOutcome::ExhaustedRetries(self.settings.fallback.clone())
            }
        }
    }

    async fn attempt(&self, prompt: &str) -> Result<String, GenerationError> {
        let raw = tokio::time::timeout(self.settings.timeout, self.backend.generate(prompt))
            .await
            .map_err(|_| GenerationError::Timeout(self.settings.timeout))??;

        let reply = extract_reply(&raw);
        if reply.is_empty() {
            return Err(GenerationError::Malformed(
                "no assistant reply in generated text".into(),
            ));
        }

        Ok(truncate_reply(&reply, self.settings.max_response_chars))
    }
}
