//! File-backed tracing setup.
//!
//! The TUI owns stdout, so log output always goes to a file.

use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result, anyhow};
use dirs_next::data_local_dir;
use tracing_subscriber::EnvFilter;

use crate::infra::config::Logging;

const LOG_FILE: &str = "fragments.log";

/// Install the global subscriber. Returns the log file path, or `None` when logging is off.
pub fn init(config: &Logging) -> Result<Option<PathBuf>> {
    if is_disabled(config.level()) {
        return Ok(None);
    }

    let filter = build_filter(config.level())?;
    let path = log_path(config);
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)
            .with_context(|| format!("failed to create log directory {}", dir.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|err| anyhow!("failed to install tracing subscriber: {err}"))?;

    Ok(Some(path))
}

fn is_disabled(level: &str) -> bool {
    level.trim().eq_ignore_ascii_case("off")
}

fn build_filter(level: &str) -> Result<EnvFilter> {
    EnvFilter::try_new(level.trim()).with_context(|| format!("invalid log level '{level}'"))
}

fn log_path(config: &Logging) -> PathBuf {
    if let Some(file) = &config.file {
        return file.clone();
    }
    data_local_dir()
        .map(|dir| dir.join("fragments"))
        .unwrap_or_else(std::env::temp_dir)
        .join(LOG_FILE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_file_wins() {
        let config = Logging {
            level: Some("info".into()),
            file: Some("/tmp/custom.log".into()),
        };
        assert_eq!(log_path(&config), PathBuf::from("/tmp/custom.log"));
    }

    #[test]
    fn default_path_ends_with_log_file() {
        let path = log_path(&Logging::default());
        assert!(path.ends_with(LOG_FILE));
    }

    #[test]
    fn off_disables_logging() -> Result<()> {
        let config = Logging {
            level: Some(" OFF ".into()),
            file: None,
        };
        assert!(init(&config)?.is_none());
        Ok(())
    }

    #[test]
    fn filter_accepts_directives() {
        assert!(build_filter("debug").is_ok());
        assert!(build_filter("fragments=trace,warn").is_ok());
        assert!(build_filter("fragments=loud").is_err());
    }
}
