use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("generation request failed: {0}")]
    Transport(String),

    #[error("generation request timed out after {0:?}")]
    Timeout(Duration),

    #[error("generation service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("unexpected generation response: {0}")]
    Malformed(String),
}

impl GenerationError {
    /// Every failure kind counts against the same retry budget.
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::Transport(_) | Self::Timeout(_) | Self::Status { .. } | Self::Malformed(_) => {
                true
            }
        }
    }
}

/// Raw text-generation primitive: one prompt in, raw model output out.
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError>;
}
