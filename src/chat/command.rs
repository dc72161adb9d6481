use inquire::autocompletion::{Autocomplete, Replacement};

// Available slash commands: (command, description)
pub const SLASH_COMMANDS: &[(&str, &str)] = &[
    ("/start", "Show the welcome message"),
    ("/help", "Show available commands"),
    ("/history", "Show the stored conversation turns"),
    ("/config", "Show current configuration"),
    ("/quit", "Exit chat mode"),
];

/// Slash command autocompleter
#[derive(Clone, Default)]
pub struct SlashCommandCompleter;

impl Autocomplete for SlashCommandCompleter {
    fn get_suggestions(&mut self, input: &str) -> Result<Vec<String>, inquire::CustomUserError> {
        if !input.starts_with('/') {
            return Ok(vec![]);
        }

        let suggestions: Vec<String> = SLASH_COMMANDS
            .iter()
            .filter(|(cmd, _)| cmd.starts_with(input))
            .map(|(cmd, desc)| format!("{cmd}  {desc}"))
            .collect();

        Ok(suggestions)
    }

    fn get_completion(
        &mut self,
        _input: &str,
        highlighted_suggestion: Option<String>,
    ) -> Result<Replacement, inquire::CustomUserError> {
        let replacement =
            highlighted_suggestion.map(|s| s.split_whitespace().next().unwrap_or("").to_string());
        Ok(replacement)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlashCommand {
    Start,
    Help,
    History,
    Config,
    Quit,
    Unknown(String),
}

#[derive(Debug, PartialEq, Eq)]
pub enum Input {
    Text(String),
    Command(SlashCommand),
    Empty,
}

pub fn parse_input(input: &str) -> Input {
    let input = input.trim();

    if input.is_empty() {
        return Input::Empty;
    }

    input
        .strip_prefix('/')
        .map_or_else(|| Input::Text(input.to_string()), parse_slash_command)
}

fn parse_slash_command(cmd: &str) -> Input {
    let parts: Vec<&str> = cmd.split_whitespace().collect();

    let command = match parts.first().copied() {
        Some("start") => SlashCommand::Start,
        Some("help") => SlashCommand::Help,
        Some("history") => SlashCommand::History,
        Some("config") => SlashCommand::Config,
        Some("quit" | "exit" | "q") => SlashCommand::Quit,
        _ => SlashCommand::Unknown(parts.join(" ")),
    };
    Input::Command(command)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty_input() {
        assert_eq!(parse_input(""), Input::Empty);
        assert_eq!(parse_input("   "), Input::Empty);
    }

    #[test]
    fn test_parse_text_input_is_trimmed() {
        assert_eq!(
            parse_input("  Akkam jirta?  "),
            Input::Text("Akkam jirta?".to_string())
        );
    }

    #[test]
    fn test_parse_commands() {
        let cases = [
            ("/start", SlashCommand::Start),
            ("/help", SlashCommand::Help),
            ("/history", SlashCommand::History),
            ("/config", SlashCommand::Config),
            ("/quit", SlashCommand::Quit),
            ("/exit", SlashCommand::Quit),
            ("/q", SlashCommand::Quit),
        ];
        for (input, expected) in cases {
            assert_eq!(parse_input(input), Input::Command(expected), "{input}");
        }
    }

    #[test]
    fn test_parse_unknown_command() {
        assert_eq!(
            parse_input("/set to en"),
            Input::Command(SlashCommand::Unknown("set to en".to_string()))
        );
    }

    #[test]
    fn test_completer_suggests_matching_commands() {
        let mut completer = SlashCommandCompleter;

        let suggestions = completer.get_suggestions("/h").unwrap();
        assert_eq!(suggestions.len(), 2);
        assert!(suggestions[0].starts_with("/help"));
        assert!(suggestions[1].starts_with("/history"));

        assert!(completer.get_suggestions("hello").unwrap().is_empty());
    }

    #[test]
    fn test_completer_completes_command_only() {
        let mut completer = SlashCommandCompleter;
        let completion = completer
            .get_completion("/his", Some("/history  Show the stored conversation turns".into()))
            .unwrap();
        assert_eq!(completion, Some("/history".to_string()));
    }
}
