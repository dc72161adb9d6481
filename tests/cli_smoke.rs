#![allow(clippy::unwrap_used)]
//! CLI smoke tests to verify basic command functionality.
//!
//! Every command runs with a cleared environment inside a temporary
//! directory, so neither the developer's config nor a local `.env` leaks in.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

#[allow(deprecated)]
fn relay(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("pivot-relay").unwrap();
    cmd.env_clear()
        .env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join("config"))
        .env("XDG_CACHE_HOME", home.path().join("cache"))
        .current_dir(home.path());
    cmd
}

#[test]
fn test_help_displays_usage() {
    let home = TempDir::new().unwrap();
    relay(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("pivot language"))
        .stdout(predicate::str::contains("--local"))
        .stdout(predicate::str::contains("--pivot"))
        .stdout(predicate::str::contains("chat"));
}

#[test]
fn test_version_displays_version() {
    let home = TempDir::new().unwrap();
    relay(&home)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_languages_list_includes_oromo() {
    let home = TempDir::new().unwrap();
    relay(&home)
        .arg("languages")
        .assert()
        .success()
        .stdout(predicate::str::contains("om"))
        .stdout(predicate::str::contains("Afaan Oromo"))
        .stdout(predicate::str::contains("en"));
}

#[test]
fn test_invalid_language_is_rejected() {
    let home = TempDir::new().unwrap();
    relay(&home)
        .args(["--local", "xx", "chat"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported language code"));
}

#[test]
fn test_missing_secrets_exit_with_config_code() {
    let home = TempDir::new().unwrap();
    relay(&home)
        .arg("serve")
        .assert()
        .code(exitcode::CONFIG)
        .stderr(predicate::str::contains("HF_AI_MODEL_API_URL"));
}

#[test]
fn test_missing_bot_token_exits_with_config_code() {
    let home = TempDir::new().unwrap();
    relay(&home)
        .env("HF_AI_MODEL_API_URL", "http://127.0.0.1:9/model")
        .env("HF_AI_MODEL_API_TOKEN", "hf_test")
        .arg("--no-cache")
        .assert()
        .code(exitcode::CONFIG)
        .stderr(predicate::str::contains("TELEGRAM_BOT_TOKEN"));
}

#[test]
fn test_missing_explicit_config_file_is_config_error() {
    let home = TempDir::new().unwrap();
    relay(&home)
        .args(["--config", "does-not-exist.toml", "serve"])
        .assert()
        .code(exitcode::CONFIG)
        .stderr(predicate::str::contains("does-not-exist.toml"));
}

#[test]
fn test_init_writes_config_and_refuses_overwrite() {
    let home = TempDir::new().unwrap();
    let config_path = home.path().join("config").join("pivot-relay").join("config.toml");

    relay(&home)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote default configuration"));

    let written = std::fs::read_to_string(&config_path).unwrap();
    assert!(written.contains("local_language = \"om\""));
    assert!(written.contains("[messages]"));

    relay(&home)
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));

    relay(&home).args(["init", "--force"]).assert().success();
}
