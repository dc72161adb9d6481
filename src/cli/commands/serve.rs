use anyhow::Result;
use tracing::info;

use crate::config::ResolvedConfig;

#[cfg(feature = "telegram")]
pub async fn run_serve(config: &ResolvedConfig) -> Result<()> {
    use std::sync::Arc;

    let token = config.telegram_token()?;
    let relay = Arc::new(crate::relay::build_relay(config)?);

    info!(
        local = %config.local_language,
        pivot = %config.pivot_language,
        generation = %config.generation.api_url,
        "starting relay"
    );
    crate::telegram::run(relay, token).await
}

#[cfg(not(feature = "telegram"))]
pub async fn run_serve(config: &ResolvedConfig) -> Result<()> {
    info!(local = %config.local_language, "telegram support not compiled in");
    anyhow::bail!(
        "This build has no Telegram support.\n\n\
         Rebuild with the 'telegram' feature, or use 'pivot-relay chat'."
    )
}
