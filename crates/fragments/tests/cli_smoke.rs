use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;

fn fragments(home: &tempfile::TempDir) -> Command {
    let mut cmd = Command::cargo_bin("fragments").expect("binary exists");
    cmd.env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join(".config"))
        .env_remove("FRAGMENTS_PREVIEW_CHARS")
        .env_remove("FRAGMENTS_LOG");
    cmd
}

#[test]
fn help_displays_usage() {
    let home = tempfile::tempdir().unwrap();
    fragments(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage"));
}

#[test]
fn config_prints_effective_settings() {
    let home = tempfile::tempdir().unwrap();
    let extra = home.path().join("extra.toml");
    fs::write(&extra, "[display]\npreview_chars = 42\n").unwrap();

    fragments(&home)
        .args(["config", "--config"])
        .arg(&extra)
        .assert()
        .success()
        .stdout(predicate::str::contains("[display]"))
        .stdout(predicate::str::contains("preview_chars = 42"))
        .stdout(predicate::str::contains("[keybindings]"));
}

#[test]
fn env_override_is_applied() {
    let home = tempfile::tempdir().unwrap();
    fragments(&home)
        .arg("config")
        .env("FRAGMENTS_PREVIEW_CHARS", "7")
        .assert()
        .success()
        .stdout(predicate::str::contains("preview_chars = 7"));
}

#[test]
fn missing_config_file_fails() {
    let home = tempfile::tempdir().unwrap();
    fragments(&home)
        .args(["config", "--config", "does-not-exist.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("config file not found"));
}

#[test]
fn completions_are_generated() {
    let home = tempfile::tempdir().unwrap();
    fragments(&home)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("fragments"));
}
