use anyhow::Result;

use crate::chat::{ChatSession, SessionConfig};
use crate::config::ResolvedConfig;
use crate::history::UserId;
use crate::relay::build_relay;

pub async fn run_chat(config: &ResolvedConfig, user_id: UserId) -> Result<()> {
    let relay = build_relay(config)?;
    let session = ChatSession::new(SessionConfig::from_resolved(config, user_id), relay);
    session.run().await
}
