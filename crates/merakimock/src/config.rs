//! CLI-side configuration: the shared config crate plus `GlobalOpts`
//! overrides.

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use tracing::debug;

pub use merakimock_config::{Config, config_path, load_config_from, save_config_to};

use merakimock_core::{GenerationOptions, TopologyKind};

use crate::cli::{ColorMode, GlobalOpts, OutputFormat};
use crate::error::CliError;

/// Everything a command needs after flags and config are merged.
#[derive(Debug, Clone)]
pub struct Settings {
    pub config: Config,
    pub output: OutputFormat,
    pub color: ColorMode,
    pub quiet: bool,
    seed: Option<u64>,
    reference_time: Option<DateTime<Utc>>,
}

impl Settings {
    /// Generation options for a built-in topology: `--seed`, then the
    /// config seeds.
    pub fn options_for(&self, kind: TopologyKind) -> GenerationOptions {
        let mut options = self.config.generation_options(kind);
        if self.seed.is_some() {
            options.seed = self.seed;
        }
        if let Some(at) = self.reference_time {
            options.reference_time = at;
        }
        options
    }

    /// Generation options for custom documents, which fall back to their
    /// own seed when neither flag nor config sets one.
    pub fn custom_options(&self) -> GenerationOptions {
        let mut options = self.config.base_options();
        if self.seed.is_some() {
            options.seed = self.seed;
        }
        if let Some(at) = self.reference_time {
            options.reference_time = at;
        }
        options
    }

    /// Options with a fixed fallback seed, used by `validate`.
    pub fn options_with_default_seed(&self, fallback: u64) -> GenerationOptions {
        let mut options = self.custom_options();
        options.seed = options.seed.or(Some(fallback));
        options
    }

    /// The built-in topology to use when a command names none.
    pub fn default_topology(&self) -> &str {
        &self.config.default_topology
    }

    pub fn use_color(&self) -> bool {
        crate::output::should_color(self.color)
    }
}

/// Load the config (from `--config` if given) and apply flag overrides.
pub fn load(global: &GlobalOpts) -> Result<Settings, CliError> {
    let path = match &global.config {
        Some(path) => path.clone(),
        None => config_path()?,
    };
    debug!(path = %path.display(), "loading configuration");
    let config = load_config_from(&path)?;
    settings(config, global)
}

fn settings(config: Config, global: &GlobalOpts) -> Result<Settings, CliError> {
    let output = match global.output {
        Some(format) => format,
        None => parse_enum(&config.defaults.output, "defaults.output")?,
    };
    let color = match global.color {
        Some(mode) => mode,
        None => parse_enum(&config.defaults.color, "defaults.color")?,
    };
    let reference_time = if global.now {
        Some(Utc::now())
    } else {
        global
            .reference_time
            .as_deref()
            .map(parse_reference_time)
            .transpose()?
    };

    Ok(Settings {
        config,
        output,
        color,
        quiet: global.quiet,
        seed: global.seed,
        reference_time,
    })
}

fn parse_enum<T: ValueEnum>(value: &str, field: &str) -> Result<T, CliError> {
    T::from_str(value, true).map_err(|reason| CliError::Validation {
        field: field.into(),
        reason,
    })
}

fn parse_reference_time(value: &str) -> Result<DateTime<Utc>, CliError> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| CliError::Validation {
            field: "reference-time".into(),
            reason: format!("'{value}' is not an RFC 3339 timestamp ({e})"),
        })
}
