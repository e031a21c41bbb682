//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with
//! actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use merakimock_config::ConfigError;
use merakimock_core::{CoreError, EntityKind, TopologyKind};

/// Process exit codes.
pub mod exit_code {
    /// Also used when validation finds issues.
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const CONFIG: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const INVALID_INPUT: i32 = 5;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Topologies ───────────────────────────────────────────────────
    #[error("Unknown topology '{name}'")]
    #[diagnostic(
        code(merakimock::unknown_topology),
        help(
            "Built-in topologies: {available}\n\
             Run: merakimock topologies"
        )
    )]
    UnknownTopology { name: String, available: String },

    #[error("Invalid custom topology: {message}")]
    #[diagnostic(
        code(merakimock::invalid_topology),
        help("Fix the document and run: merakimock validate <PATH>")
    )]
    InvalidTopology { message: String },

    #[error("Could not parse {format} document: {message}")]
    #[diagnostic(
        code(merakimock::parse),
        help("Custom topologies may be written as .toml, .yaml/.yml or .json")
    )]
    Parse { format: String, message: String },

    #[error("Validation found {issues} issue(s) across {topologies} topology(ies)")]
    #[diagnostic(code(merakimock::validation_failed))]
    ValidationFailed { issues: usize, topologies: usize },

    // ── Store ────────────────────────────────────────────────────────
    #[error("{entity_type} '{identifier}' not found")]
    #[diagnostic(
        code(merakimock::not_found),
        help("Run: merakimock query <TOPOLOGY> {entity_type} to list the available ids")
    )]
    NotFound {
        entity_type: String,
        identifier: String,
    },

    #[error("Unknown entity kind '{name}'")]
    #[diagnostic(code(merakimock::unknown_entity), help("Entity kinds: {available}"))]
    UnknownEntityType { name: String, available: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(merakimock::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Configuration file already exists at {path}")]
    #[diagnostic(
        code(merakimock::config_exists),
        help("Use --force to overwrite it, or edit it directly.")
    )]
    ConfigExists { path: String },

    #[error("No configuration directory could be determined")]
    #[diagnostic(
        code(merakimock::no_config_dir),
        help("Set MERAKIMOCK_CONFIG or pass --config <PATH>.")
    )]
    NoConfigDir,

    #[error(transparent)]
    #[diagnostic(code(merakimock::config))]
    Config(Box<figment::Error>),

    // ── IO / Serialization ────────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize {what}: {message}")]
    #[diagnostic(code(merakimock::serialize))]
    Serialization { what: String, message: String },
}

impl From<figment::Error> for CliError {
    fn from(err: figment::Error) -> Self {
        Self::Config(Box::new(err))
    }
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::UnknownTopology { .. }
            | Self::UnknownEntityType { .. }
            | Self::Validation { .. } => exit_code::USAGE,
            Self::InvalidTopology { .. } | Self::Parse { .. } => exit_code::INVALID_INPUT,
            Self::ConfigExists { .. } | Self::NoConfigDir | Self::Config(_) => exit_code::CONFIG,
            _ => exit_code::GENERAL,
        }
    }

    pub fn serialization(what: &str, err: impl std::fmt::Display) -> Self {
        Self::Serialization {
            what: what.into(),
            message: err.to_string(),
        }
    }
}

fn available_topologies() -> String {
    TopologyKind::all()
        .map(|k| k.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn available_kinds() -> String {
    EntityKind::all()
        .map(|k| k.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::UnknownTopology { name } => CliError::UnknownTopology {
                name,
                available: available_topologies(),
            },
            CoreError::InvalidTopology { message } => CliError::InvalidTopology { message },
            CoreError::NotFound {
                entity_type,
                identifier,
            } => CliError::NotFound {
                entity_type,
                identifier,
            },
            CoreError::UnknownEntityType { name } => CliError::UnknownEntityType {
                name,
                available: available_kinds(),
            },
            CoreError::Serialization {
                entity_type,
                source,
            } => CliError::serialization(&entity_type, source),
            CoreError::Parse { format, message } => CliError::Parse { format, message },
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            ConfigError::NoConfigDir => CliError::NoConfigDir,
            ConfigError::Serialization(e) => CliError::serialization("config", e),
            ConfigError::Figment(e) => CliError::Config(e),
            ConfigError::Io(e) => CliError::Io(e),
        }
    }
}
