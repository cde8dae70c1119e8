//! Configuration management utilities.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use dirs_next::config_dir;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::app::display::{DEFAULT_ELLIPSIS, DEFAULT_PREVIEW_CHARS};

static DEFAULT_CONFIG: Lazy<&'static str> =
    Lazy::new(|| include_str!("../../assets/default-config.toml"));

/// Layered configuration loaded from defaults, user config, an explicit file, and env.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub display: Display,
    #[serde(default)]
    pub keybindings: Keybindings,
    #[serde(default)]
    pub logging: Logging,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Display {
    #[serde(default)]
    preview_chars: Option<usize>,
    #[serde(default)]
    ellipsis: Option<String>,
    #[serde(default)]
    empty_message: Option<String>,
    #[serde(default)]
    show_timestamps: Option<bool>,
}

impl Display {
    fn default_empty_message() -> &'static str {
        "No text fragments yet. Add one above!"
    }

    /// Characters of each fragment shown in the list before truncation.
    pub fn preview_chars(&self) -> usize {
        self.preview_chars.unwrap_or(DEFAULT_PREVIEW_CHARS)
    }

    pub fn ellipsis(&self) -> String {
        self.ellipsis
            .clone()
            .unwrap_or_else(|| DEFAULT_ELLIPSIS.to_owned())
    }

    pub fn empty_message(&self) -> String {
        self.empty_message
            .clone()
            .unwrap_or_else(|| Self::default_empty_message().to_owned())
    }

    pub fn show_timestamps(&self) -> bool {
        self.show_timestamps.unwrap_or(true)
    }
}

impl Default for Display {
    fn default() -> Self {
        Self {
            preview_chars: Some(DEFAULT_PREVIEW_CHARS),
            ellipsis: Some(DEFAULT_ELLIPSIS.to_owned()),
            empty_message: Some(Self::default_empty_message().to_owned()),
            show_timestamps: Some(true),
        }
    }
}

/// Key binding strings, parsed later by `ui::keymap`. Unset entries fall back to defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Keybindings {
    #[serde(default)]
    pub up: Option<String>,
    #[serde(default)]
    pub down: Option<String>,
    #[serde(default)]
    pub select: Option<String>,
    #[serde(default)]
    pub back: Option<String>,
    #[serde(default)]
    pub submit: Option<String>,
    #[serde(default)]
    pub newline: Option<String>,
    #[serde(default)]
    pub copy: Option<String>,
    #[serde(default)]
    pub toggle_focus: Option<String>,
    #[serde(default)]
    pub quit: Option<String>,
}

impl Keybindings {
    const DEFAULT_UP: &'static str = "k";
    const DEFAULT_DOWN: &'static str = "j";
    const DEFAULT_SELECT: &'static str = "enter";
    const DEFAULT_BACK: &'static str = "esc";
    const DEFAULT_SUBMIT: &'static str = "enter";
    const DEFAULT_NEWLINE: &'static str = "alt+enter";
    const DEFAULT_COPY: &'static str = "y";
    const DEFAULT_TOGGLE_FOCUS: &'static str = "tab";
    const DEFAULT_QUIT: &'static str = "q";

    pub fn up(&self) -> &str {
        self.up.as_deref().unwrap_or(Self::DEFAULT_UP)
    }

    pub fn down(&self) -> &str {
        self.down.as_deref().unwrap_or(Self::DEFAULT_DOWN)
    }

    pub fn select(&self) -> &str {
        self.select.as_deref().unwrap_or(Self::DEFAULT_SELECT)
    }

    pub fn back(&self) -> &str {
        self.back.as_deref().unwrap_or(Self::DEFAULT_BACK)
    }

    pub fn submit(&self) -> &str {
        self.submit.as_deref().unwrap_or(Self::DEFAULT_SUBMIT)
    }

    pub fn newline(&self) -> &str {
        self.newline.as_deref().unwrap_or(Self::DEFAULT_NEWLINE)
    }

    pub fn copy(&self) -> &str {
        self.copy.as_deref().unwrap_or(Self::DEFAULT_COPY)
    }

    pub fn toggle_focus(&self) -> &str {
        self.toggle_focus
            .as_deref()
            .unwrap_or(Self::DEFAULT_TOGGLE_FOCUS)
    }

    pub fn quit(&self) -> &str {
        self.quit.as_deref().unwrap_or(Self::DEFAULT_QUIT)
    }
}

impl Default for Keybindings {
    fn default() -> Self {
        Self {
            up: Some(Self::DEFAULT_UP.into()),
            down: Some(Self::DEFAULT_DOWN.into()),
            select: Some(Self::DEFAULT_SELECT.into()),
            back: Some(Self::DEFAULT_BACK.into()),
            submit: Some(Self::DEFAULT_SUBMIT.into()),
            newline: Some(Self::DEFAULT_NEWLINE.into()),
            copy: Some(Self::DEFAULT_COPY.into()),
            toggle_focus: Some(Self::DEFAULT_TOGGLE_FOCUS.into()),
            quit: Some(Self::DEFAULT_QUIT.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Logging {
    #[serde(default)]
    pub level: Option<String>,
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl Logging {
    const DEFAULT_LEVEL: &'static str = "warn";

    /// Filter directive, `off` to disable.
    pub fn level(&self) -> &str {
        self.level.as_deref().unwrap_or(Self::DEFAULT_LEVEL)
    }
}

impl Default for Logging {
    fn default() -> Self {
        Self {
            level: Some(Self::DEFAULT_LEVEL.into()),
            file: None,
        }
    }
}

/// Environment overrides for critical settings.
#[derive(Debug, Default, Clone)]
pub struct EnvOverrides {
    preview_chars: Option<String>,
    log_level: Option<String>,
}

impl EnvOverrides {
    fn from_env() -> Self {
        Self {
            preview_chars: env::var("FRAGMENTS_PREVIEW_CHARS").ok(),
            log_level: env::var("FRAGMENTS_LOG").ok(),
        }
    }

    #[cfg(test)]
    fn for_tests(preview_chars: &str, log_level: &str) -> Self {
        Self {
            preview_chars: Some(preview_chars.to_owned()),
            log_level: Some(log_level.to_owned()),
        }
    }
}

impl Config {
    /// Load configuration from defaults, the user config, an optional explicit file, and env
    /// overrides.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit
            && !path.exists()
        {
            anyhow::bail!("config file not found: {}", path.display());
        }
        let env = EnvOverrides::from_env();
        Self::load_with_layers(global_config_path(), explicit.map(Path::to_path_buf), env)
    }

    fn load_with_layers(
        global: Option<PathBuf>,
        explicit: Option<PathBuf>,
        env_overrides: EnvOverrides,
    ) -> Result<Self> {
        let mut layers: Vec<Config> = Vec::new();

        layers.push(Self::from_str(&DEFAULT_CONFIG)?);

        if let Some(global_path) = global.filter(|path| path.exists()) {
            layers.push(Self::from_file(&global_path)?);
        }

        if let Some(explicit_path) = explicit {
            layers.push(Self::from_file(&explicit_path)?);
        }

        let merged = layers.into_iter().reduce(Config::merge).unwrap_or_default();
        apply_env_overrides(merged, env_overrides)
    }

    fn from_file(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        Self::from_str(&data)
            .with_context(|| format!("invalid config file: {}", path.display()))
    }

    fn from_str(contents: &str) -> Result<Self> {
        let config: Config =
            toml::from_str(contents).with_context(|| "failed to parse TOML config".to_string())?;
        Ok(config)
    }

    /// Render the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("failed to serialize configuration")
    }

    fn merge(self, other: Self) -> Self {
        Self {
            display: merge_display(self.display, other.display),
            keybindings: merge_keybindings(self.keybindings, other.keybindings),
            logging: merge_logging(self.logging, other.logging),
        }
    }
}

fn merge_display(mut base: Display, overlay: Display) -> Display {
    if let Some(value) = overlay.preview_chars {
        base.preview_chars = Some(value);
    }
    if let Some(value) = overlay.ellipsis {
        base.ellipsis = Some(value);
    }
    if let Some(value) = overlay.empty_message {
        base.empty_message = Some(value);
    }
    if let Some(value) = overlay.show_timestamps {
        base.show_timestamps = Some(value);
    }
    base
}

fn merge_keybindings(base: Keybindings, overlay: Keybindings) -> Keybindings {
    Keybindings {
        up: overlay.up.or(base.up),
        down: overlay.down.or(base.down),
        select: overlay.select.or(base.select),
        back: overlay.back.or(base.back),
        submit: overlay.submit.or(base.submit),
        newline: overlay.newline.or(base.newline),
        copy: overlay.copy.or(base.copy),
        toggle_focus: overlay.toggle_focus.or(base.toggle_focus),
        quit: overlay.quit.or(base.quit),
    }
}

fn merge_logging(base: Logging, overlay: Logging) -> Logging {
    Logging {
        level: overlay.level.or(base.level),
        file: overlay.file.or(base.file),
    }
}

fn global_config_path() -> Option<PathBuf> {
    config_dir().map(|base| base.join("fragments/config.toml"))
}

fn apply_env_overrides(mut config: Config, env: EnvOverrides) -> Result<Config> {
    if let Some(raw) = env.preview_chars {
        let chars = raw
            .trim()
            .parse::<usize>()
            .with_context(|| format!("FRAGMENTS_PREVIEW_CHARS must be a number, got '{raw}'"))?;
        config.display.preview_chars = Some(chars);
    }
    if let Some(level) = env.log_level {
        config.logging.level = Some(level);
    }
    Ok(config)
}
