use anyhow::{Result, bail};
use inquire::{Confirm, InquireError};
use std::io::IsTerminal;

use crate::config::{ConfigFile, ConfigManager};
use crate::ui::Style;

/// Writes the default configuration to the manager's path.
///
/// An existing file is only replaced with `force`, or after confirmation when
/// running interactively.
pub fn run_init(manager: &ConfigManager, force: bool) -> Result<()> {
    if manager.exists() && !force && !confirm_overwrite(manager)? {
        println!(
            "{} Config file left unchanged: {}",
            Style::secondary("-"),
            Style::value(manager.config_path().display())
        );
        return Ok(());
    }

    manager.save(&ConfigFile::default())?;
    println!(
        "{} Wrote default configuration to {}",
        Style::success("✓"),
        Style::value(manager.config_path().display())
    );
    println!(
        "  {}",
        Style::secondary("Secrets are read from TELEGRAM_BOT_TOKEN, HF_AI_MODEL_API_URL and HF_AI_MODEL_API_TOKEN.")
    );
    Ok(())
}

fn confirm_overwrite(manager: &ConfigManager) -> Result<bool> {
    let path = manager.config_path().display();

    if !std::io::stdin().is_terminal() {
        bail!("Config file already exists: {path}\n\nUse --force to overwrite it.");
    }

    let answer = Confirm::new(&format!("{path} already exists. Overwrite?"))
        .with_default(false)
        .prompt();
    overwrite_confirmed(answer)
}

/// Escape or Ctrl+C at the overwrite prompt keeps the existing file.
fn overwrite_confirmed(answer: Result<bool, InquireError>) -> Result<bool> {
    match answer {
        Ok(overwrite) => Ok(overwrite),
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => {
            println!();
            Ok(false)
        }
        Err(e) => Err(e.into()),
    }
}
