//! Chat mode UI components.

use crate::history::Turn;
use crate::ui::Style;

use super::command::SLASH_COMMANDS;
use super::session::SessionConfig;

const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn print_header(config: &SessionConfig) {
    println!(
        "{} {} - Console Relay ({} ⇄ {})",
        Style::header("pivot-relay"),
        Style::version(format!("v{VERSION}")),
        Style::code(&config.local_language),
        Style::code(&config.pivot_language),
    );
    println!();
}

pub fn print_goodbye() {
    println!("{}", Style::success("Nagaatti!"));
}

pub fn print_config(config: &SessionConfig) {
    println!("{}", Style::header("Configuration"));
    println!(
        "  {}        {}",
        Style::label("user"),
        Style::value(config.user_id)
    );
    println!(
        "  {}       {}",
        Style::label("local"),
        Style::value(&config.local_language)
    );
    println!(
        "  {}       {}",
        Style::label("pivot"),
        Style::value(&config.pivot_language)
    );
    println!(
        "  {}  {}",
        Style::label("generation"),
        Style::secondary(&config.generation_url)
    );
    println!(
        "  {} {}",
        Style::label("translation"),
        Style::secondary(&config.translation_endpoint)
    );
    println!(
        "  {}       {}",
        Style::label("cache"),
        Style::value(if config.cache { "on" } else { "off" })
    );
    println!();
}

pub fn print_help(relay_help: &str) {
    println!("{relay_help}");
    println!();
    println!("{}", Style::header("Available commands"));
    for (command, description) in SLASH_COMMANDS {
        println!(
            "  {}  {}",
            Style::command(format!("{command:10}")),
            Style::secondary(description)
        );
    }
    println!();
}

pub fn print_history(turns: &[Turn]) {
    if turns.is_empty() {
        println!("{}", Style::secondary("No conversation history yet."));
        println!();
        return;
    }

    println!("{}", Style::header("Conversation history"));
    for (index, turn) in turns.iter().enumerate() {
        println!("  {} {}", Style::label(format!("{}.", index + 1)), turn.user());
        println!("     {}", Style::reply(turn.assistant()));
    }
    println!();
}

pub fn print_error(message: &str) {
    eprintln!("{} {message}", Style::error("Error:"));
    eprintln!();
}
