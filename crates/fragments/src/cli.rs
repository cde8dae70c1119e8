//! Command line interface.

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use tracing::info;

use crate::infra::config::Config;
use crate::ui::app::UiApp;

#[derive(Debug, Parser)]
#[command(author, version, about = "Jot down text fragments and read them back", long_about = None)]
pub struct Cli {
    /// Extra configuration file layered over the user config
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Log filter written to the log file (e.g. "debug", "off")
    #[arg(long, value_name = "LEVEL", global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print the effective configuration as TOML
    Config,
    /// Print shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

impl Cli {
    /// Execute the parsed command line.
    pub fn run(self) -> Result<()> {
        if let Some(Commands::Completions { shell }) = self.command {
            let mut command = Cli::command();
            let name = command.get_name().to_string();
            clap_complete::generate(shell, &mut command, name, &mut io::stdout());
            return Ok(());
        }

        let mut config = Config::load(self.config.as_deref())?;
        if let Some(level) = self.log_level {
            config.logging.level = Some(level);
        }

        match self.command {
            Some(Commands::Config) => {
                let rendered = config.to_toml()?;
                io::stdout()
                    .write_all(rendered.as_bytes())
                    .context("failed to write configuration")?;
                Ok(())
            }
            Some(Commands::Completions { .. }) => Ok(()),
            None => {
                let log_file = crate::init(&config)?;
                info!(log_file = ?log_file, "starting fragments");
                let mut app = UiApp::new(&config)?;
                app.run()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_global_options_after_subcommand() {
        let cli = Cli::parse_from(["fragments", "config", "--config", "extra.toml"]);
        assert_eq!(cli.config, Some(PathBuf::from("extra.toml")));
        assert!(matches!(cli.command, Some(Commands::Config)));
    }

    #[test]
    fn parses_completion_shell() {
        let cli = Cli::parse_from(["fragments", "completions", "zsh"]);
        assert!(matches!(
            cli.command,
            Some(Commands::Completions { shell: Shell::Zsh })
        ));
    }
}
