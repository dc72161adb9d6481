use async_trait::async_trait;
use std::fmt;

use crate::history::UserId;

/// Identifies the conversation a reply is delivered to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChatId(pub i64);

impl fmt::Display for ChatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundMessage {
    pub user_id: UserId,
    pub chat_id: ChatId,
    pub text: String,
}

impl InboundMessage {
    pub fn new(user_id: UserId, chat_id: ChatId, text: impl Into<String>) -> Self {
        Self {
            user_id,
            chat_id,
            text: text.into(),
        }
    }
}

/// Outbound side of a chat client.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    /// Shows that a reply is being prepared.
    async fn send_typing(&self, chat_id: ChatId) -> anyhow::Result<()>;

    async fn send_text(&self, chat_id: ChatId, text: &str) -> anyhow::Result<()>;
}
