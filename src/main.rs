use anyhow::Result;
use clap::Parser;

use pivot_relay::cli::commands::{chat, init, serve};
use pivot_relay::cli::{Args, Command, load_config};
use pivot_relay::config::ConfigError;
use pivot_relay::history::UserId;
use pivot_relay::translation::print_languages;
use pivot_relay::ui::Style;

#[tokio::main]
async fn main() {
    // A missing .env file is normal outside development.
    let _ = dotenvy::dotenv();

    let args = Args::parse();

    if let Err(e) = run(args).await {
        eprintln!("{} {e:#}", Style::error("Error:"));
        let code = if e.chain().any(|cause| cause.is::<ConfigError>()) {
            exitcode::CONFIG
        } else {
            exitcode::SOFTWARE
        };
        std::process::exit(code);
    }
}

async fn run(args: Args) -> Result<()> {
    match args.command.clone().unwrap_or(Command::Serve) {
        Command::Languages => {
            print_languages();
        }
        Command::Init { force } => {
            init::run_init(&args.config_manager(), force)?;
        }
        Command::Chat { user_id } => {
            let config = load_config(&args, true)?;
            chat::run_chat(&config, UserId(user_id)).await?;
        }
        Command::Serve => {
            let config = load_config(&args, false)?;
            serve::run_serve(&config).await?;
        }
    }

    Ok(())
}
