pub mod app;
pub mod cli;
pub mod domain;
pub mod infra;
pub mod ui;

use std::path::PathBuf;

use anyhow::Result;

use crate::infra::config::Config;

/// Install logging for an interactive session. Returns the log file in use, if any.
pub fn init(config: &Config) -> Result<Option<PathBuf>> {
    infra::logging::init(&config.logging)
}
