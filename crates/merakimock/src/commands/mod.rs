//! Command dispatch: bridges CLI args -> core generation -> output formatting.

pub mod config_cmd;
pub mod generate;
pub mod query;
pub mod stats;
pub mod topologies;
pub mod util;
pub mod validate;

use crate::cli::Command;
use crate::config::Settings;
use crate::error::CliError;

/// Dispatch a command that needs the loaded configuration.
pub fn dispatch(cmd: Command, settings: &Settings) -> Result<(), CliError> {
    match cmd {
        Command::Generate(args) => generate::handle(args, settings),
        Command::Validate(args) => validate::handle(args, settings),
        Command::Stats(args) => stats::handle(args, settings),
        Command::Topologies => topologies::handle(settings),
        Command::Query(args) => query::handle(args, settings),
        Command::Config(_) | Command::Completions(_) => Err(CliError::Validation {
            field: "command".into(),
            reason: "handled before configuration is loaded".into(),
        }),
    }
}
