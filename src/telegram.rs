//! Telegram front end for the relay.

use async_trait::async_trait;
use std::sync::Arc;
use teloxide::Bot;
use teloxide::dispatching::{Dispatcher, UpdateFilterExt};
use teloxide::requests::Requester;
use teloxide::respond;
use teloxide::types::{ChatAction, ChatId as TelegramChatId, Message, Update};
use tracing::{debug, info, warn};

use crate::history::UserId;
use crate::relay::{ChatId, ChatTransport, InboundMessage, Relay};

/// Telegram rejects messages over 4096 characters.
pub const MAX_MESSAGE_CHARS: usize = 4000;

/// Splits `text` into pieces of at most `max_chars` characters.
pub fn split_message(text: &str, max_chars: usize) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    chars
        .chunks(max_chars.max(1))
        .map(|piece| piece.iter().collect())
        .collect()
}

pub struct TelegramTransport {
    bot: Bot,
}

impl TelegramTransport {
    pub const fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl ChatTransport for TelegramTransport {
    async fn send_typing(&self, chat_id: ChatId) -> anyhow::Result<()> {
        self.bot
            .send_chat_action(TelegramChatId(chat_id.0), ChatAction::Typing)
            .await?;
        Ok(())
    }

    async fn send_text(&self, chat_id: ChatId, text: &str) -> anyhow::Result<()> {
        let pieces = split_message(text, MAX_MESSAGE_CHARS);
        if pieces.is_empty() {
            warn!(chat_id = %chat_id, "refusing to send an empty message");
        }
        for piece in pieces {
            self.bot
                .send_message(TelegramChatId(chat_id.0), piece)
                .await?;
        }
        Ok(())
    }
}

fn inbound_message(msg: &Message) -> Option<InboundMessage> {
    let text = msg.text()?;
    let user = msg.from.as_ref()?;
    Some(InboundMessage::new(
        UserId(user.id.0),
        ChatId(msg.chat.id.0),
        text,
    ))
}

/// Polls Telegram for messages and relays them until Ctrl-C.
pub async fn run(relay: Arc<Relay>, token: &str) -> anyhow::Result<()> {
    let bot = Bot::new(token);

    let handler = Update::filter_message().endpoint(move |bot: Bot, msg: Message| {
        let relay = Arc::clone(&relay);
        async move {
            match inbound_message(&msg) {
                Some(inbound) => {
                    let transport = TelegramTransport::new(bot);
                    if let Err(e) = relay.dispatch(&transport, &inbound).await {
                        warn!(chat_id = %inbound.chat_id, error = %e, "failed to deliver reply");
                    }
                }
                None => debug!(chat_id = msg.chat.id.0, "ignoring non-text update"),
            }
            respond(())
        }
    });

    let mut dispatcher = Dispatcher::builder(bot, handler).build();
    info!("telegram relay started");

    tokio::select! {
        biased;

        _ = tokio::signal::ctrl_c() => {
            info!("shutdown signal received, stopping telegram relay");
        }
        () = dispatcher.dispatch() => {
            warn!("telegram dispatcher exited unexpectedly");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_message_is_one_piece() {
        assert_eq!(split_message("Nagaa dha", MAX_MESSAGE_CHARS), vec!["Nagaa dha"]);
        assert!(split_message("", MAX_MESSAGE_CHARS).is_empty());
    }

    #[test]
    fn test_long_message_splits_on_char_boundaries() {
        let text = "é".repeat(MAX_MESSAGE_CHARS * 2 + 10);
        let pieces = split_message(&text, MAX_MESSAGE_CHARS);

        assert_eq!(pieces.len(), 3);
        assert_eq!(pieces[0].chars().count(), MAX_MESSAGE_CHARS);
        assert_eq!(pieces[2].chars().count(), 10);
        assert_eq!(pieces.concat(), text);
    }
}
