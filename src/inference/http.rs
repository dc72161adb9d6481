use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use super::backend::{GenerationBackend, GenerationError};

#[derive(Serialize)]
struct GenerateRequest<'a> {
    inputs: &'a str,
}

/// Hosted inference endpoints answer with a list of completions; some return
/// a bare object instead.
#[derive(Deserialize)]
#[serde(untagged)]
enum GenerateResponse {
    Batch(Vec<Completion>),
    Single(Completion),
}

#[derive(Deserialize)]
struct Completion {
    generated_text: String,
}

/// Text-generation primitive backed by a Hugging Face style inference endpoint.
///
/// The per-call deadline is enforced by the caller, not by this client.
#[derive(Clone)]
pub struct HuggingFaceClient {
    client: Client,
    api_url: String,
    api_token: String,
}

impl fmt::Debug for HuggingFaceClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HuggingFaceClient")
            .field("api_url", &self.api_url)
            .field("api_token", &"<redacted>")
            .finish_non_exhaustive()
    }
}

impl HuggingFaceClient {
    pub fn new(api_url: String, api_token: String) -> Self {
        Self {
            client: Client::new(),
            api_url,
            api_token,
        }
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }
}

#[async_trait]
impl GenerationBackend for HuggingFaceClient {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        debug!(url = %self.api_url, chars = prompt.chars().count(), "sending generation request");

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_token)
            .json(&GenerateRequest { inputs: prompt })
            .send()
            .await
            .map_err(|e| GenerationError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GenerationError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| GenerationError::Transport(e.to_string()))?;

        parse_generate_response(&body)
    }
}

fn parse_generate_response(body: &str) -> Result<String, GenerationError> {
    let parsed: GenerateResponse = serde_json::from_str(body)
        .map_err(|e| GenerationError::Malformed(format!("invalid response body: {e}")))?;

    match parsed {
        GenerateResponse::Single(completion) => Ok(completion.generated_text),
        GenerateResponse::Batch(completions) => completions
            .into_iter()
            .next()
            .map(|c| c.generated_text)
            .ok_or_else(|| GenerationError::Malformed("empty completion list".into())),
    }
}
