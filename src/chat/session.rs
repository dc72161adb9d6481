use anyhow::Result;
use async_trait::async_trait;
use inquire::Text;
use inquire::ui::{Attributes, Color, RenderConfig, StyleSheet, Styled};
use std::io::Write;
use std::sync::{Mutex, PoisonError};

use super::command::{Input, SlashCommand, SlashCommandCompleter, parse_input};
use super::ui;
use crate::config::ResolvedConfig;
use crate::history::UserId;
use crate::relay::{BotCommand, ChatId, ChatTransport, InboundMessage, Relay};
use crate::ui::{Spinner, Style};

/// The console has a single conversation.
const CONSOLE_CHAT: ChatId = ChatId(0);

/// What `/config` shows about the running relay.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub user_id: UserId,
    pub local_language: String,
    pub pivot_language: String,
    pub generation_url: String,
    pub translation_endpoint: String,
    pub cache: bool,
}

impl SessionConfig {
    pub fn from_resolved(config: &ResolvedConfig, user_id: UserId) -> Self {
        Self {
            user_id,
            local_language: config.local_language.clone(),
            pivot_language: config.pivot_language.clone(),
            generation_url: config.generation.api_url.clone(),
            translation_endpoint: config.translation.endpoint.clone(),
            cache: config.translation.cache,
        }
    }
}

/// Console side of the relay: a spinner for the typing signal, replies
/// written to `out`.
pub struct ConsoleTransport<W> {
    out: Mutex<W>,
    spinner: Mutex<Option<Spinner>>,
    show_spinner: bool,
}

impl<W: Write + Send> ConsoleTransport<W> {
    pub const fn new(out: W, show_spinner: bool) -> Self {
        Self {
            out: Mutex::new(out),
            spinner: Mutex::new(None),
            show_spinner,
        }
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner().unwrap_or_else(PoisonError::into_inner)
    }

    fn stop_spinner(&self) {
        let mut spinner = self.spinner.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(spinner) = spinner.take() {
            spinner.stop();
        }
    }
}

#[async_trait]
impl<W: Write + Send> ChatTransport for ConsoleTransport<W> {
    async fn send_typing(&self, _chat_id: ChatId) -> Result<()> {
        if self.show_spinner {
            let mut spinner = self.spinner.lock().unwrap_or_else(PoisonError::into_inner);
            *spinner = Some(Spinner::new("Typing..."));
        }
        Ok(())
    }

    async fn send_text(&self, _chat_id: ChatId, text: &str) -> Result<()> {
        self.stop_spinner();
        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        writeln!(out, "{}", Style::reply(text))?;
        writeln!(out)?;
        out.flush()?;
        Ok(())
    }
}

/// An interactive console conversation with the relay.
pub struct ChatSession {
    config: SessionConfig,
    relay: Relay,
    transport: ConsoleTransport<std::io::Stdout>,
}

impl ChatSession {
    pub fn new(config: SessionConfig, relay: Relay) -> Self {
        Self {
            config,
            relay,
            transport: ConsoleTransport::new(std::io::stdout(), true),
        }
    }

    pub async fn run(&self) -> Result<()> {
        ui::print_header(&self.config);

        let prompt_style = Styled::new("❯")
            .with_fg(Color::LightBlue)
            .with_attr(Attributes::BOLD);
        let mut render_config = RenderConfig::default()
            .with_prompt_prefix(prompt_style)
            .with_answered_prompt_prefix(prompt_style);

        // Non-highlighted suggestions: gray
        render_config.option = StyleSheet::new().with_fg(Color::Grey);
        // Highlighted suggestion: purple
        render_config.selected_option = Some(StyleSheet::new().with_fg(Color::DarkMagenta));

        loop {
            let input = Text::new("")
                .with_render_config(render_config)
                .with_autocomplete(SlashCommandCompleter)
                .with_help_message("Type a message, /help for commands, Ctrl+C to quit")
                .prompt();

            match input {
                Ok(line) => match parse_input(&line) {
                    Input::Empty => {}
                    Input::Command(cmd) => {
                        if !self.handle_command(cmd) {
                            break;
                        }
                    }
                    Input::Text(text) => {
                        let message = InboundMessage::new(self.config.user_id, CONSOLE_CHAT, text);
                        self.relay.dispatch(&self.transport, &message).await?;
                    }
                },
                Err(
                    inquire::InquireError::OperationCanceled
                    | inquire::InquireError::OperationInterrupted,
                ) => {
                    println!(); // Clear line before goodbye message
                    break;
                }
                Err(e) => return Err(e.into()),
            }
        }

        ui::print_goodbye();
        Ok(())
    }

    fn handle_command(&self, cmd: SlashCommand) -> bool {
        match cmd {
            SlashCommand::Start => {
                if let Some(welcome) = self.relay.command_reply(&BotCommand::Start) {
                    println!("{}\n", Style::reply(welcome));
                }
                true
            }
            SlashCommand::Help => {
                ui::print_help(&self.relay.messages().help);
                true
            }
            SlashCommand::History => {
                ui::print_history(&self.relay.history().turns(self.config.user_id));
                true
            }
            SlashCommand::Config => {
                ui::print_config(&self.config);
                true
            }
            SlashCommand::Quit => false,
            SlashCommand::Unknown(cmd) => {
                ui::print_error(&format!("Unknown command: /{cmd}"));
                true
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_console_transport_writes_replies() {
        let transport = ConsoleTransport::new(Vec::new(), false);

        transport.send_typing(CONSOLE_CHAT).await.unwrap();
        transport.send_text(CONSOLE_CHAT, "Nagaa dha").await.unwrap();

        let written = String::from_utf8(transport.into_inner()).unwrap();
        assert!(written.contains("Nagaa dha"));
        assert!(written.ends_with("\n\n"));
    }

    #[tokio::test]
    async fn test_console_transport_clears_spinner_on_reply() {
        let transport = ConsoleTransport::new(Vec::new(), true);

        transport.send_typing(CONSOLE_CHAT).await.unwrap();
        assert!(transport.spinner.lock().unwrap().is_some());

        transport.send_text(CONSOLE_CHAT, "ok").await.unwrap();
        assert!(transport.spinner.lock().unwrap().is_none());
    }
}
