//! Key binding parsing and lookup.

use std::fmt;
use std::str::FromStr;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use thiserror::Error;

use crate::infra::config::Keybindings;

/// Error returned when a key binding string cannot be parsed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum KeyBindingParseError {
    #[error("empty key binding")]
    Empty,
    #[error("unknown modifier '{0}'")]
    UnknownModifier(String),
    #[error("unknown key '{0}'")]
    UnknownKey(String),
}

/// A single key plus the ctrl/alt modifiers that must accompany it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyBinding {
    code: KeyCode,
    modifiers: KeyModifiers,
}

impl KeyBinding {
    pub const fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    /// Whether `event` triggers this binding.
    ///
    /// Shift is ignored for character keys because terminals already fold it into the
    /// character itself.
    pub fn matches(&self, event: &KeyEvent) -> bool {
        if event.kind == KeyEventKind::Release {
            return false;
        }
        let significant = KeyModifiers::CONTROL | KeyModifiers::ALT;
        let code_matches = match (self.code, event.code) {
            (KeyCode::Char(expected), KeyCode::Char(actual)) => {
                if self.modifiers.contains(KeyModifiers::CONTROL) {
                    expected.eq_ignore_ascii_case(&actual)
                } else {
                    expected == actual
                }
            }
            (expected, actual) => expected == actual,
        };
        code_matches && (event.modifiers & significant) == (self.modifiers & significant)
    }
}

impl FromStr for KeyBinding {
    type Err = KeyBindingParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();
        if value.is_empty() {
            return Err(KeyBindingParseError::Empty);
        }

        // "+" on its own (or as the final segment of "ctrl++") names the plus key.
        let (prefix, key) = match value.strip_suffix("++") {
            Some(prefix) => (prefix, "+"),
            None if value == "+" => ("", "+"),
            None => match value.rsplit_once('+') {
                Some((prefix, key)) => (prefix, key),
                None => ("", value),
            },
        };

        let mut modifiers = KeyModifiers::NONE;
        for part in prefix.split('+').filter(|part| !part.is_empty()) {
            modifiers |= match part.trim().to_ascii_lowercase().as_str() {
                "ctrl" | "control" => KeyModifiers::CONTROL,
                "alt" | "meta" | "option" => KeyModifiers::ALT,
                "shift" => KeyModifiers::SHIFT,
                other => return Err(KeyBindingParseError::UnknownModifier(other.to_string())),
            };
        }

        Ok(Self::new(parse_key(key.trim())?, modifiers))
    }
}

fn parse_key(key: &str) -> Result<KeyCode, KeyBindingParseError> {
    let mut chars = key.chars();
    if let (Some(ch), None) = (chars.next(), chars.next()) {
        return Ok(KeyCode::Char(ch));
    }

    let code = match key.to_ascii_lowercase().as_str() {
        "enter" | "return" => KeyCode::Enter,
        "esc" | "escape" => KeyCode::Esc,
        "tab" => KeyCode::Tab,
        "backtab" => KeyCode::BackTab,
        "space" => KeyCode::Char(' '),
        "backspace" => KeyCode::Backspace,
        "delete" | "del" => KeyCode::Delete,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "pageup" => KeyCode::PageUp,
        "pagedown" => KeyCode::PageDown,
        other => {
            let number = other
                .strip_prefix('f')
                .and_then(|rest| rest.parse::<u8>().ok())
                .filter(|n| (1..=12).contains(n));
            match number {
                Some(n) => KeyCode::F(n),
                None => return Err(KeyBindingParseError::UnknownKey(key.to_string())),
            }
        }
    };
    Ok(code)
}

impl fmt::Display for KeyBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.modifiers.contains(KeyModifiers::CONTROL) {
            f.write_str("ctrl+")?;
        }
        if self.modifiers.contains(KeyModifiers::ALT) {
            f.write_str("alt+")?;
        }
        if self.modifiers.contains(KeyModifiers::SHIFT) {
            f.write_str("shift+")?;
        }
        match self.code {
            KeyCode::Char(' ') => f.write_str("space"),
            KeyCode::Char(ch) => write!(f, "{ch}"),
            KeyCode::Enter => f.write_str("↵"),
            KeyCode::Esc => f.write_str("esc"),
            KeyCode::Tab => f.write_str("tab"),
            KeyCode::Backspace => f.write_str("backspace"),
            KeyCode::Up => f.write_str("↑"),
            KeyCode::Down => f.write_str("↓"),
            KeyCode::Left => f.write_str("←"),
            KeyCode::Right => f.write_str("→"),
            KeyCode::F(n) => write!(f, "f{n}"),
            other => write!(f, "{other:?}"),
        }
    }
}

/// Resolved bindings used by the event loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keymap {
    pub up: KeyBinding,
    pub down: KeyBinding,
    pub select: KeyBinding,
    pub back: KeyBinding,
    pub submit: KeyBinding,
    pub newline: KeyBinding,
    pub copy: KeyBinding,
    pub toggle_focus: KeyBinding,
    pub quit: KeyBinding,
}

impl Keymap {
    /// Parse every configured binding, naming the offending entry on failure.
    pub fn from_config(bindings: &Keybindings) -> anyhow::Result<Self> {
        let parse = |name: &str, value: &str| -> anyhow::Result<KeyBinding> {
            value
                .parse::<KeyBinding>()
                .map_err(|err| anyhow::anyhow!("keybindings.{name} = '{value}': {err}"))
        };
        Ok(Self {
            up: parse("up", bindings.up())?,
            down: parse("down", bindings.down())?,
            select: parse("select", bindings.select())?,
            back: parse("back", bindings.back())?,
            submit: parse("submit", bindings.submit())?,
            newline: parse("newline", bindings.newline())?,
            copy: parse("copy", bindings.copy())?,
            toggle_focus: parse("toggle_focus", bindings.toggle_focus())?,
            quit: parse("quit", bindings.quit())?,
        })
    }
}

impl Default for Keymap {
    fn default() -> Self {
        Self {
            up: KeyBinding::new(KeyCode::Char('k'), KeyModifiers::NONE),
            down: KeyBinding::new(KeyCode::Char('j'), KeyModifiers::NONE),
            select: KeyBinding::new(KeyCode::Enter, KeyModifiers::NONE),
            back: KeyBinding::new(KeyCode::Esc, KeyModifiers::NONE),
            submit: KeyBinding::new(KeyCode::Enter, KeyModifiers::NONE),
            newline: KeyBinding::new(KeyCode::Enter, KeyModifiers::ALT),
            copy: KeyBinding::new(KeyCode::Char('y'), KeyModifiers::NONE),
            toggle_focus: KeyBinding::new(KeyCode::Tab, KeyModifiers::NONE),
            quit: KeyBinding::new(KeyCode::Char('q'), KeyModifiers::NONE),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn parses_plain_and_modified_keys() {
        assert_eq!(
            "j".parse::<KeyBinding>().unwrap(),
            KeyBinding::new(KeyCode::Char('j'), KeyModifiers::NONE)
        );
        assert_eq!(
            "Ctrl+S".parse::<KeyBinding>().unwrap(),
            KeyBinding::new(KeyCode::Char('S'), KeyModifiers::CONTROL)
        );
        assert_eq!(
            "alt+enter".parse::<KeyBinding>().unwrap(),
            KeyBinding::new(KeyCode::Enter, KeyModifiers::ALT)
        );
        assert_eq!(
            "ctrl++".parse::<KeyBinding>().unwrap(),
            KeyBinding::new(KeyCode::Char('+'), KeyModifiers::CONTROL)
        );
        assert_eq!(
            "f5".parse::<KeyBinding>().unwrap(),
            KeyBinding::new(KeyCode::F(5), KeyModifiers::NONE)
        );
    }

    #[test]
    fn rejects_unknown_names() {
        assert_eq!(
            "hyper+x".parse::<KeyBinding>(),
            Err(KeyBindingParseError::UnknownModifier("hyper".into()))
        );
        assert_eq!(
            "ctrl+banana".parse::<KeyBinding>(),
            Err(KeyBindingParseError::UnknownKey("banana".into()))
        );
        assert_eq!("  ".parse::<KeyBinding>(), Err(KeyBindingParseError::Empty));
    }

    #[test]
    fn matching_respects_modifiers() {
        let submit: KeyBinding = "enter".parse().unwrap();
        let newline: KeyBinding = "alt+enter".parse().unwrap();

        let plain = key(KeyCode::Enter, KeyModifiers::NONE);
        let alt = key(KeyCode::Enter, KeyModifiers::ALT);
        assert!(submit.matches(&plain));
        assert!(!submit.matches(&alt));
        assert!(newline.matches(&alt));
        assert!(!newline.matches(&plain));
    }

    #[test]
    fn control_bindings_ignore_case_and_shift() {
        let binding: KeyBinding = "ctrl+s".parse().unwrap();
        assert!(binding.matches(&key(KeyCode::Char('s'), KeyModifiers::CONTROL)));
        assert!(binding.matches(&key(
            KeyCode::Char('S'),
            KeyModifiers::CONTROL | KeyModifiers::SHIFT
        )));
        assert!(!binding.matches(&key(KeyCode::Char('s'), KeyModifiers::NONE)));
    }

    #[test]
    fn default_keymap_matches_default_config() {
        let keymap = Keymap::from_config(&Keybindings::default()).unwrap();
        assert_eq!(keymap, Keymap::default());
    }

    #[test]
    fn config_errors_name_the_binding() {
        let bindings = Keybindings {
            copy: Some("ctrl+nope".into()),
            ..Keybindings::default()
        };
        let err = Keymap::from_config(&bindings).unwrap_err();
        assert!(err.to_string().contains("keybindings.copy"));
    }

    #[test]
    fn displays_compact_hints() {
        let binding: KeyBinding = "alt+enter".parse().unwrap();
        assert_eq!(binding.to_string(), "alt+↵");
        let binding: KeyBinding = "space".parse().unwrap();
        assert_eq!(binding.to_string(), "space");
    }
}
