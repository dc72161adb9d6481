//! The message relay: content filter, translation in, generation, translation
//! out, reply.
//!
//! [`Relay`] is transport-agnostic. Front ends turn their events into
//! [`InboundMessage`]s and implement [`ChatTransport`] for the outbound side.

mod builder;
mod command;
mod orchestrator;
mod transport;

pub use builder::build_relay;
pub use command::{BotCommand, parse_command};
pub use orchestrator::{Relay, RelayOutcome, Reply};
pub use transport::{ChatId, ChatTransport, InboundMessage};
