#![allow(clippy::unwrap_used)]
//! End-to-end relay behaviour through the public API, with in-process
//! translation and generation primitives.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use pivot_relay::clock::{RecordingSleeper, Sleeper};
use pivot_relay::filter::ContentFilter;
use pivot_relay::history::{ConversationStore, Turn, UserId};
use pivot_relay::inference::{
    GenerationBackend, GenerationError, InferenceClient, InferenceSettings, Retrier, RetryPolicy,
};
use pivot_relay::messages::Messages;
use pivot_relay::relay::{ChatId, ChatTransport, InboundMessage, Relay, RelayOutcome};
use pivot_relay::translation::{
    TranslationBackend, TranslationError, Translator, TranslatorSettings,
};

/// Prefixes the target language; fails for texts containing "untranslatable".
struct TagTranslation;

#[async_trait]
impl TranslationBackend for TagTranslation {
    async fn translate(&self, text: &str, _src: &str, dst: &str) -> Result<String, TranslationError> {
        if text.contains("untranslatable") {
            return Err(TranslationError::Status {
                status: 503,
                body: "unavailable".into(),
            });
        }
        Ok(format!("<{dst}>{text}"))
    }

    fn endpoint(&self) -> &str {
        "test://tag"
    }
}

/// Echoes the prompt and continues with a hallucinated user line after `delay`.
struct Dialogue {
    delay: Duration,
}

#[async_trait]
impl GenerationBackend for Dialogue {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        tokio::time::sleep(self.delay).await;
        let question = prompt
            .lines()
            .rev()
            .find_map(|line| line.strip_prefix("User: "))
            .unwrap_or_default();
        if question.contains("fail") {
            return Err(GenerationError::Transport("connection reset".into()));
        }
        Ok(format!(
            "{prompt} answer to {question}\nUser: something else"
        ))
    }
}

#[derive(Default)]
struct Outbox(Mutex<Vec<(ChatId, String)>>);

#[async_trait]
impl ChatTransport for Outbox {
    async fn send_typing(&self, _chat_id: ChatId) -> anyhow::Result<()> {
        Ok(())
    }

    async fn send_text(&self, chat_id: ChatId, text: &str) -> anyhow::Result<()> {
        self.0.lock().unwrap().push((chat_id, text.to_string()));
        Ok(())
    }
}

fn relay(delay: Duration) -> (Relay, Arc<ConversationStore>, Arc<RecordingSleeper>) {
    let history = Arc::new(ConversationStore::default());
    let sleeper = Arc::new(RecordingSleeper::new());
    let translator = Translator::new(
        Arc::new(TagTranslation),
        Arc::clone(&sleeper) as Arc<dyn Sleeper>,
        TranslatorSettings::default(),
    );
    let inference = InferenceClient::new(
        Arc::new(Dialogue { delay }),
        Arc::clone(&history),
        Retrier::new(
            RetryPolicy::default(),
            Arc::clone(&sleeper) as Arc<dyn Sleeper>,
        ),
        InferenceSettings::default(),
    );
    let relay = Relay::new(
        ContentFilter::default(),
        translator,
        inference,
        Arc::clone(&history),
        Messages::default(),
    );
    (relay, history, sleeper)
}

#[tokio::test]
async fn test_conversation_accumulates_bounded_context() {
    let (relay, history, _) = relay(Duration::ZERO);
    let alice = UserId(1);

    for i in 0..7 {
        let reply = relay.handle(alice, &format!("q{i}")).await;
        assert_eq!(reply.outcome, RelayOutcome::Replied);
        assert_eq!(reply.text, format!("<om>answer to <en>q{i}"));
    }

    let turns = history.turns(alice);
    assert_eq!(turns.len(), 5);
    assert_eq!(turns[0], Turn::new("<en>q2", "answer to <en>q2"));
    assert_eq!(turns[4], Turn::new("<en>q6", "answer to <en>q6"));
}

#[tokio::test]
async fn test_failures_map_to_fixed_messages() {
    let (relay, history, sleeper) = relay(Duration::ZERO);
    let messages = Messages::default();
    let bob = UserId(2);

    let refused = relay.handle(bob, "Adult content").await;
    assert_eq!(refused.outcome, RelayOutcome::Refused);
    assert_eq!(refused.text, messages.refusal);

    let fallback = relay.handle(bob, "please fail").await;
    assert_eq!(fallback.outcome, RelayOutcome::InferenceFallback);
    assert_eq!(fallback.text, messages.inference_fallback);
    assert_eq!(sleeper.calls(), vec![Duration::from_secs(2); 2]);

    // Inbound translation falls back to the original text, the reply still
    // mentions it, so the way back fails too.
    let apology = relay.handle(bob, "untranslatable").await;
    assert_eq!(apology.outcome, RelayOutcome::TranslationApology);
    assert_eq!(apology.text, messages.translation_apology);

    assert_eq!(history.len(bob), 1);
}

#[tokio::test(start_paused = true)]
async fn test_different_users_run_concurrently() {
    let (relay, _, _) = relay(Duration::from_secs(10));
    let relay = Arc::new(relay);
    let outbox = Arc::new(Outbox::default());
    let start = tokio::time::Instant::now();

    let tasks: Vec<_> = (0..3)
        .map(|i| {
            let relay = Arc::clone(&relay);
            let outbox = Arc::clone(&outbox);
            tokio::spawn(async move {
                let message = InboundMessage::new(UserId(i), ChatId(i as i64), "Akkam jirta?");
                relay.dispatch(outbox.as_ref(), &message).await.unwrap();
            })
        })
        .collect();
    for task in tasks {
        task.await.unwrap();
    }

    assert!(start.elapsed() < Duration::from_secs(20));
    assert_eq!(outbox.0.lock().unwrap().len(), 3);
}
