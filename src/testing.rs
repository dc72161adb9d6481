//! In-process stand-ins for the external primitives, used by unit tests.

use async_trait::async_trait;
use std::sync::Mutex;

use crate::inference::{GenerationBackend, GenerationError};
use crate::relay::{ChatId, ChatTransport};
use crate::translation::{TranslationBackend, TranslationError};

type TranslateFn =
    Box<dyn Fn(usize, &str, &str, &str) -> Result<String, TranslationError> + Send + Sync>;

/// Translation primitive driven by a closure receiving the 0-based call index.
pub struct FakeTranslation {
    respond: TranslateFn,
    calls: Mutex<Vec<(String, String, String)>>,
}

impl FakeTranslation {
    pub fn from_fn<F>(respond: F) -> Self
    where
        F: Fn(usize, &str, &str, &str) -> Result<String, TranslationError> + Send + Sync + 'static,
    {
        Self {
            respond: Box::new(respond),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Tags every text with its target language: `"hi"` → `"[en] hi"`.
    pub fn tagging() -> Self {
        Self::from_fn(|_, text, _, dst| Ok(format!("[{dst}] {text}")))
    }

    pub fn failing() -> Self {
        Self::from_fn(|_, _, _, _| Err(TranslationError::Transport("connection reset".into())))
    }

    /// Looks texts up in a fixed table; unknown texts fail.
    pub fn table(entries: &[(&str, &str)]) -> Self {
        let entries: Vec<(String, String)> = entries
            .iter()
            .map(|(from, to)| ((*from).to_string(), (*to).to_string()))
            .collect();
        Self::from_fn(move |_, text, _, _| {
            entries
                .iter()
                .find(|(from, _)| from == text)
                .map(|(_, to)| to.clone())
                .ok_or_else(|| TranslationError::Status {
                    status: 500,
                    body: format!("no entry for {text:?}"),
                })
        })
    }

    /// `(text, src, dst)` of every call so far.
    pub fn calls(&self) -> Vec<(String, String, String)> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl TranslationBackend for FakeTranslation {
    async fn translate(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<String, TranslationError> {
        let index = {
            let mut calls = self.calls.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
            calls.push((
                text.to_string(),
                source_language.to_string(),
                target_language.to_string(),
            ));
            calls.len() - 1
        };
        (self.respond)(index, text, source_language, target_language)
    }

    fn endpoint(&self) -> &str {
        "fake://translate"
    }
}

type GenerateFn = Box<dyn Fn(usize, &str) -> Result<String, GenerationError> + Send + Sync>;

/// Generation primitive driven by a closure receiving the 0-based call index.
pub struct FakeGeneration {
    respond: GenerateFn,
    prompts: Mutex<Vec<String>>,
}

impl FakeGeneration {
    pub fn from_fn<F>(respond: F) -> Self
    where
        F: Fn(usize, &str) -> Result<String, GenerationError> + Send + Sync + 'static,
    {
        Self {
            respond: Box::new(respond),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Echoes the prompt followed by `reply`, like a completion endpoint.
    pub fn echoing(reply: &str) -> Self {
        let reply = reply.to_string();
        Self::from_fn(move |_, prompt| Ok(format!("{prompt} {reply}")))
    }

    pub fn failing() -> Self {
        Self::from_fn(|_, _| Err(GenerationError::Transport("connection refused".into())))
    }

    /// Fails with a transport error `failures` times, then echoes `reply`.
    pub fn flaky(failures: usize, reply: &str) -> Self {
        let reply = reply.to_string();
        Self::from_fn(move |index, prompt| {
            if index < failures {
                Err(GenerationError::Transport("connection reset".into()))
            } else {
                Ok(format!("{prompt} {reply}"))
            }
        })
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().map(|p| p.clone()).unwrap_or_default()
    }

    pub fn call_count(&self) -> usize {
        self.prompts().len()
    }
}

#[async_trait]
impl GenerationBackend for FakeGeneration {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        let index = {
            let mut prompts = self.prompts.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
            prompts.push(prompt.to_string());
            prompts.len() - 1
        };
        (self.respond)(index, prompt)
    }
}

/// Event seen by [`RecordingTransport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sent {
    Typing(ChatId),
    Text(ChatId, String),
}

#[derive(Default)]
pub struct RecordingTransport {
    sent: Mutex<Vec<Sent>>,
}

impl RecordingTransport {
    pub fn sent(&self) -> Vec<Sent> {
        self.sent.lock().map(|s| s.clone()).unwrap_or_default()
    }

    fn record(&self, event: Sent) {
        if let Ok(mut sent) = self.sent.lock() {
            sent.push(event);
        }
    }
}

#[async_trait]
impl ChatTransport for RecordingTransport {
    async fn send_typing(&self, chat_id: ChatId) -> anyhow::Result<()> {
        self.record(Sent::Typing(chat_id));
        Ok(())
    }

    async fn send_text(&self, chat_id: ChatId, text: &str) -> anyhow::Result<()> {
        self.record(Sent::Text(chat_id, text.to_string()));
        Ok(())
    }
}
