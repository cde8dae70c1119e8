//! Clipboard integration for copying fragment text.

use std::io::Write;
use std::process::{Command, Stdio};

use anyhow::{Context, Result, anyhow};
use tracing::{debug, warn};

/// Destination for copied fragment text.
pub trait CopySink {
    fn copy_text(&mut self, text: &str) -> Result<()>;
}

/// System clipboard with fallbacks to platform utilities for headless sessions.
///
/// The native backend is only opened on first use so that starting the UI never touches the
/// display server.
#[derive(Default)]
pub struct Clipboard {
    native: Option<arboard::Clipboard>,
    native_failed: bool,
}

impl Clipboard {
    pub fn new() -> Self {
        Self::default()
    }

    fn native(&mut self) -> Option<&mut arboard::Clipboard> {
        if self.native.is_none() && !self.native_failed {
            match arboard::Clipboard::new() {
                Ok(clipboard) => self.native = Some(clipboard),
                Err(err) => {
                    debug!(%err, "native clipboard unavailable");
                    self.native_failed = true;
                }
            }
        }
        self.native.as_mut()
    }
}

impl CopySink for Clipboard {
    fn copy_text(&mut self, text: &str) -> Result<()> {
        if let Some(native) = self.native() {
            match native.set_text(text.to_owned()) {
                Ok(()) => return Ok(()),
                Err(err) => {
                    warn!(%err, "native clipboard rejected text; trying fallbacks");
                    self.native = None;
                    self.native_failed = true;
                }
            }
        }
        fallback_copy(text)
    }
}

fn fallback_copy(text: &str) -> Result<()> {
    for command in fallback_commands() {
        match pipe_to_command(command, text) {
            Ok(()) => return Ok(()),
            Err(err) => debug!(?command, %err, "clipboard fallback failed"),
        }
    }

    Err(anyhow!("no clipboard backend available"))
}

fn pipe_to_command(command: &[&str], text: &str) -> Result<()> {
    let (program, args) = command
        .split_first()
        .context("clipboard command missing program")?;

    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .with_context(|| format!("failed to spawn clipboard command: {program}"))?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin
            .write_all(text.as_bytes())
            .context("failed to write clipboard contents")?;
    }

    let status = child
        .wait()
        .with_context(|| format!("clipboard command did not exit cleanly: {program}"))?;
    if status.success() {
        Ok(())
    } else {
        Err(anyhow!("clipboard command exited with status {status}"))
    }
}

#[cfg(target_os = "macos")]
fn fallback_commands() -> Vec<&'static [&'static str]> {
    vec![&["pbcopy"]]
}

#[cfg(all(unix, not(target_os = "macos")))]
fn fallback_commands() -> Vec<&'static [&'static str]> {
    vec![&["wl-copy"], &["xclip", "-selection", "clipboard"], &["xsel", "--clipboard", "--input"]]
}

#[cfg(target_os = "windows")]
fn fallback_commands() -> Vec<&'static [&'static str]> {
    vec![&["powershell.exe", "-NoProfile", "-Command", "Set-Clipboard"]]
}

#[cfg(not(any(unix, target_os = "windows")))]
fn fallback_commands() -> Vec<&'static [&'static str]> {
    Vec::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_program_is_an_error() {
        let result = pipe_to_command(&["fragments-no-such-clipboard-tool"], "text");
        assert!(result.is_err());
    }

    #[test]
    fn empty_command_is_an_error() {
        assert!(pipe_to_command(&[], "text").is_err());
    }
}
