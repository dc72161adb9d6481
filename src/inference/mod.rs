//! Text generation with conversation context, per-call timeouts and bounded retries.

mod backend;
mod client;
mod http;
pub mod prompt;
pub mod retry;

pub use backend::{GenerationBackend, GenerationError};
pub use client::{
    DEFAULT_GENERATION_TIMEOUT, DEFAULT_MAX_RESPONSE_CHARS, InferenceClient, InferenceOutcome,
    InferenceSettings,
};
pub use http::HuggingFaceClient;
pub use retry::{Retrier, RetryExhausted, RetryPolicy};
