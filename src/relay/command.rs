/// Static bot commands answered without entering the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BotCommand {
    Start,
    Help,
    Unknown(String),
}

/// Parses a leading `/command`, ignoring any `@botname` suffix and arguments.
///
/// Returns `None` for ordinary text.
pub fn parse_command(text: &str) -> Option<BotCommand> {
    let rest = text.trim_start().strip_prefix('/')?;
    let word = rest.split_whitespace().next().unwrap_or_default();
    let name = word.split('@').next().unwrap_or_default();

    Some(match name.to_lowercase().as_str() {
        "start" => BotCommand::Start,
        "help" => BotCommand::Help,
        _ => BotCommand::Unknown(name.to_string()),
    })
}
