use futures_util::FutureExt;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use super::command::{BotCommand, parse_command};
use super::transport::{ChatTransport, InboundMessage};
use crate::filter::ContentFilter;
use crate::history::{ConversationStore, UserId};
use crate::inference::{InferenceClient, InferenceOutcome};
use crate::messages::Messages;
use crate::translation::{Fallback, Translator};

/// Terminal state reached by one inbound message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayOutcome {
    /// The content filter rejected the message.
    Refused,
    /// A generated reply was delivered in the local language.
    Replied,
    /// Every generation attempt failed.
    InferenceFallback,
    /// The generated reply could not be translated back.
    TranslationApology,
    /// A collaborator failed unexpectedly.
    TechnicalError,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub outcome: RelayOutcome,
}

impl Reply {
    fn new(text: impl Into<String>, outcome: RelayOutcome) -> Self {
        Self {
            text: text.into(),
            outcome,
        }
    }
}

/// The per-message pipeline:
/// filter → translate in → generate → translate out → reply.
///
/// Safe to run concurrently for different users. Messages from the same user
/// are processed one at a time.
pub struct Relay {
    filter: ContentFilter,
    translator: Translator,
    inference: InferenceClient,
    history: Arc<ConversationStore>,
    messages: Messages,
}

impl Relay {
    pub fn new(
        filter: ContentFilter,
        translator: Translator,
        inference: InferenceClient,
        history: Arc<ConversationStore>,
        messages: Messages,
    ) -> Self {
        Self {
            filter,
            translator,
            inference,
            history,
            messages,
        }
    }

    pub const fn messages(&self) -> &Messages {
        &self.messages
    }

    pub fn history(&self) -> &ConversationStore {
        &self.history
    }

    pub const fn translator(&self) -> &Translator {
        &self.translator
    }

    /// Static reply for a bot command; `None` for commands the relay ignores.
    pub fn command_reply(&self, command: &BotCommand) -> Option<&str> {
        match command {
            BotCommand::Start => Some(&self.messages.welcome),
            BotCommand::Help => Some(&self.messages.help),
            BotCommand::Unknown(_) => None,
        }
    }

    /// Runs one message through the whole pipeline and returns the reply.
    ///
    /// Never fails: every failure ends in one of the fixed messages.
    pub async fn handle(&self, user_id: UserId, text: &str) -> Reply {
        if let Some(refusal) = self.screen(user_id, text) {
            return refusal;
        }

        let _guard = self.history.lock_user(user_id).await;

        match AssertUnwindSafe(self.pipeline(user_id, text))
            .catch_unwind()
            .await
        {
            Ok(reply) => reply,
            Err(panic) => {
                error!(user_id = %user_id, panic = panic_message(&*panic), "relay pipeline failed unexpectedly");
                Reply::new(self.messages.technical_error.as_str(), RelayOutcome::TechnicalError)
            }
        }
    }

    /// Handles one inbound chat event end to end, delivering the reply
    /// through `transport`.
    ///
    /// Static commands are answered directly, blank text is ignored, and a
    /// typing signal precedes every message that passes the filter.
    pub async fn dispatch(
        &self,
        transport: &dyn ChatTransport,
        message: &InboundMessage,
    ) -> anyhow::Result<()> {
        let InboundMessage {
            user_id,
            chat_id,
            ref text,
        } = *message;

        if let Some(command) = parse_command(text) {
            return match self.command_reply(&command) {
                Some(reply) => {
                    info!(user_id = %user_id, ?command, "answering command");
                    transport.send_text(chat_id, reply).await
                }
                None => {
                    debug!(user_id = %user_id, ?command, "ignoring unsupported command");
                    Ok(())
                }
            };
        }

        if text.trim().is_empty() {
            debug!(user_id = %user_id, "ignoring empty message");
            return Ok(());
        }

        let reply = match self.screen(user_id, text) {
            Some(refusal) => refusal,
            None => {
                if let Err(e) = transport.send_typing(chat_id).await {
                    warn!(chat_id = %chat_id, error = %e, "failed to send typing signal");
                }
                self.handle(user_id, text).await
            }
        };

        info!(user_id = %user_id, outcome = ?reply.outcome, "sending reply");
        transport.send_text(chat_id, &reply.text).await
    }

    fn screen(&self, user_id: UserId, text: &str) -> Option<Reply> {
        let term = self.filter.matched_term(text)?;
        info!(user_id = %user_id, term, "message rejected by content filter");
        Some(Reply::new(self.messages.refusal.as_str(), RelayOutcome::Refused))
    }

    async fn pipeline(&self, user_id: UserId, text: &str) -> Reply {
        debug!(user_id = %user_id, text, "received message");

        let inbound = self.translator.to_pivot(text).await;
        if let Some(fallback) = inbound.fallback() {
            warn!(user_id = %user_id, ?fallback, "continuing with untranslated input");
        }

        let generated = match self.inference.generate(user_id, inbound.text()).await {
            InferenceOutcome::Success(generated) => generated,
            InferenceOutcome::ExhaustedRetries(fallback) => {
                return Reply::new(fallback, RelayOutcome::InferenceFallback);
            }
        };

        let outbound = self.translator.to_local(&generated).await;
        let outcome = match outbound.fallback() {
            Some(Fallback::Apology) => RelayOutcome::TranslationApology,
            Some(Fallback::Original) | None => RelayOutcome::Replied,
        };
        debug!(user_id = %user_id, reply = outbound.text(), "pipeline finished");

        Reply::new(outbound.into_text(), outcome)
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> &str {
    panic
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| panic.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("non-string panic payload")
}
