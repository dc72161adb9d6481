use async_trait::async_trait;
use reqwest::{Client, Url};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use super::backend::{TranslationBackend, TranslationError};

/// Public web endpoint of the Google translate service.
pub const DEFAULT_TRANSLATE_ENDPOINT: &str = "https://translate.googleapis.com";

/// Translation primitive backed by the keyless Google translate web API.
///
/// Responses are nested JSON arrays; the first element holds one entry per
/// translated segment with the translated text at index 0.
#[derive(Debug, Clone)]
pub struct GoogleTranslateClient {
    client: Client,
    endpoint: String,
}

impl GoogleTranslateClient {
    pub fn new(endpoint: String, timeout: Duration) -> Result<Self, TranslationError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TranslationError::Transport(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client, endpoint })
    }

    fn request_url(&self, text: &str, source: &str, target: &str) -> Result<Url, TranslationError> {
        let base = format!("{}/translate_a/single", self.endpoint.trim_end_matches('/'));
        Url::parse_with_params(
            &base,
            &[
                ("client", "gtx"),
                ("sl", source),
                ("tl", target),
                ("dt", "t"),
                ("q", text),
            ],
        )
        .map_err(|e| TranslationError::Transport(format!("invalid endpoint {base}: {e}")))
    }
}

#[async_trait]
impl TranslationBackend for GoogleTranslateClient {
    async fn translate(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<String, TranslationError> {
        let url = self.request_url(text, source_language, target_language)?;

        debug!(
            src = source_language,
            dst = target_language,
            chars = text.chars().count(),
            "sending translation request"
        );

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| TranslationError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TranslationError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let value: Value = response
            .json()
            .await
            .map_err(|e| TranslationError::Malformed(format!("invalid JSON body: {e}")))?;

        parse_translate_response(&value)
    }

    fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

fn parse_translate_response(value: &Value) -> Result<String, TranslationError> {
    let segments = value
        .get(0)
        .and_then(Value::as_array)
        .ok_or_else(|| TranslationError::Malformed("missing segment list".into()))?;

    let text: String = segments
        .iter()
        .filter_map(|segment| segment.get(0).and_then(Value::as_str))
        .collect();

    if text.is_empty() {
        Err(TranslationError::Malformed("no translated text in response".into()))
    } else {
        Ok(text)
    }
}
