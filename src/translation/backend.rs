use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TranslationError {
    #[error("translation request failed: {0}")]
    Transport(String),
    #[error("translation service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("unexpected translation response: {0}")]
    Malformed(String),
}

/// A single-shot translation primitive.
///
/// Implementations translate one bounded piece of text and report any failure
/// as an error; they never retry and never fall back.
#[async_trait]
pub trait TranslationBackend: Send + Sync {
    async fn translate(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<String, TranslationError>;

    /// Identifies the backend in logs and cache keys.
    fn endpoint(&self) -> &str;
}
