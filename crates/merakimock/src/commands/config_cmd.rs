//! Config subcommand handlers.

use std::path::PathBuf;

use tracing::info;

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config::{self, Config};
use crate::error::CliError;
use crate::output;

/// `--config` if given, else the resolved default location.
fn target_path(global: &GlobalOpts) -> Result<PathBuf, CliError> {
    match &global.config {
        Some(path) => Ok(path.clone()),
        None => Ok(config::config_path()?),
    }
}

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Show => {
            let settings = config::load(global)?;
            let body = toml::to_string_pretty(&settings.config)
                .map_err(|e| CliError::serialization("config", e))?;
            output::print_output(&body, global.quiet);
            Ok(())
        }

        ConfigCommand::Init { force } => {
            let path = target_path(global)?;
            if path.exists() && !force {
                return Err(CliError::ConfigExists {
                    path: path.display().to_string(),
                });
            }
            config::save_config_to(&Config::default(), &path)?;
            info!(path = %path.display(), "configuration written");
            output::print_output(
                &format!("Wrote default configuration to {}", path.display()),
                global.quiet,
            );
            Ok(())
        }

        ConfigCommand::Path => {
            let path = target_path(global)?;
            output::print_output(&path.display().to_string(), global.quiet);
            Ok(())
        }
    }
}
