//! Configuration for the merakimock CLI.
//!
//! A TOML file in the platform config directory, layered under
//! `MERAKIMOCK_*` environment overrides, and translated into
//! `merakimock_core::GenerationOptions` for each topology.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use merakimock_core::generate::DEFAULT_DASHBOARD_URL;
use merakimock_core::rng::default_reference_time;
use merakimock_core::{GenerationOptions, TopologyKind};

/// Overrides the config file location.
pub const CONFIG_PATH_ENV: &str = "MERAKIMOCK_CONFIG";

const ENV_PREFIX: &str = "MERAKIMOCK_";

const OUTPUT_FORMATS: &[&str] = &["table", "json", "json-compact", "yaml", "plain"];
const COLOR_MODES: &[&str] = &["auto", "always", "never"];

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no config directory could be determined; set {CONFIG_PATH_ENV}")]
    NoConfigDir,

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    /// Topology used when a command does not name one.
    #[serde(default = "default_topology")]
    pub default_topology: String,

    /// Output defaults.
    #[serde(default)]
    pub defaults: Defaults,

    #[serde(default)]
    pub generation: Generation,

    /// Per-topology seeds used when no explicit seed is given.
    #[serde(default)]
    pub seeds: Seeds,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_topology: default_topology(),
            defaults: Defaults::default(),
            generation: Generation::default(),
            seeds: Seeds::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Generation {
    /// Seed applied to every topology; wins over `[seeds]`.
    pub seed: Option<u64>,

    /// Instant relative timestamps are measured from.
    pub reference_time: Option<DateTime<Utc>>,

    #[serde(default = "default_dashboard_url")]
    pub dashboard_url: String,
}

impl Default for Generation {
    fn default() -> Self {
        Self {
            seed: None,
            reference_time: None,
            dashboard_url: default_dashboard_url(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct Seeds {
    #[serde(default = "hub_spoke_seed")]
    pub hub_spoke: u64,
    #[serde(default = "mesh_seed")]
    pub mesh: u64,
    #[serde(default = "multi_org_seed")]
    pub multi_org: u64,
}

impl Default for Seeds {
    fn default() -> Self {
        Self {
            hub_spoke: hub_spoke_seed(),
            mesh: mesh_seed(),
            multi_org: multi_org_seed(),
        }
    }
}

impl Seeds {
    pub fn for_kind(&self, kind: TopologyKind) -> u64 {
        match kind {
            TopologyKind::HubSpoke => self.hub_spoke,
            TopologyKind::Mesh => self.mesh,
            TopologyKind::MultiOrg => self.multi_org,
        }
    }
}

fn default_topology() -> String {
    TopologyKind::HubSpoke.to_string()
}
fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}
fn default_dashboard_url() -> String {
    DEFAULT_DASHBOARD_URL.into()
}
fn hub_spoke_seed() -> u64 {
    TopologyKind::HubSpoke.default_seed()
}
fn mesh_seed() -> u64 {
    TopologyKind::Mesh.default_seed()
}
fn multi_org_seed() -> u64 {
    TopologyKind::MultiOrg.default_seed()
}

impl Config {
    /// Rejects values the CLI could not act on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !OUTPUT_FORMATS.contains(&self.defaults.output.as_str()) {
            return Err(invalid(
                "defaults.output",
                format!(
                    "expected one of {}, got '{}'",
                    OUTPUT_FORMATS.join(", "),
                    self.defaults.output
                ),
            ));
        }
        if !COLOR_MODES.contains(&self.defaults.color.as_str()) {
            return Err(invalid(
                "defaults.color",
                format!("expected auto, always or never, got '{}'", self.defaults.color),
            ));
        }
        let url = self.generation.dashboard_url.as_str();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(invalid(
                "generation.dashboard_url",
                format!("expected an http(s) URL, got '{url}'"),
            ));
        }
        if self.default_topology.trim().is_empty() {
            return Err(invalid("default_topology", "must not be empty".into()));
        }
        Ok(())
    }

    /// The built-in topology named by `default_topology`, if it is one.
    pub fn default_kind(&self) -> Option<TopologyKind> {
        self.default_topology.parse().ok()
    }

    /// Generation options for `kind`: the global seed if set, else the
    /// per-topology seed.
    pub fn generation_options(&self, kind: TopologyKind) -> GenerationOptions {
        GenerationOptions {
            seed: Some(self.generation.seed.unwrap_or_else(|| self.seeds.for_kind(kind))),
            ..self.base_options()
        }
    }

    /// Generation options without a seed decision, for custom documents
    /// that carry their own.
    pub fn base_options(&self) -> GenerationOptions {
        GenerationOptions {
            seed: self.generation.seed,
            reference_time: self
                .generation
                .reference_time
                .unwrap_or_else(default_reference_time),
            dashboard_url: self.generation.dashboard_url.clone(),
        }
    }
}

fn invalid(field: &str, reason: String) -> ConfigError {
    ConfigError::Validation {
        field: field.into(),
        reason,
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path: `MERAKIMOCK_CONFIG`, else the platform
/// config directory.
pub fn config_path() -> Result<PathBuf, ConfigError> {
    if let Some(path) = std::env::var_os(CONFIG_PATH_ENV).filter(|p| !p.is_empty()) {
        return Ok(PathBuf::from(path));
    }
    ProjectDirs::from("com", "merakimock", "merakimock")
        .map(|dirs| dirs.config_dir().join("config.toml"))
        .ok_or(ConfigError::NoConfigDir)
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path()?)
}

/// Load from an explicit file, still honouring environment overrides.
/// A missing file reads as defaults.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let config: Config = figment(path).extract()?;
    config.validate()?;
    Ok(config)
}

/// Load config, falling back to defaults on any error.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

fn figment(path: &Path) -> Figment {
    Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed(ENV_PREFIX).ignore(&["config"]).split("__"))
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<PathBuf, ConfigError> {
    let path = config_path()?;
    save_config_to(cfg, &path)?;
    Ok(path)
}

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    use super::*;

    fn write(dir: &tempfile::TempDir, body: &str) -> PathBuf {
        let path = dir.path().join("config.toml");
        std::fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.default_kind(), Some(TopologyKind::HubSpoke));
    }

    #[test]
    fn file_values_are_layered_over_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            &dir,
            r#"
default_topology = "mesh"

[defaults]
output = "json"

[generation]
reference_time = "2025-03-01T12:00:00Z"

[seeds]
mesh = 7
"#,
        );
        let config = load_config_from(&path).unwrap();
        assert_eq!(config.default_kind(), Some(TopologyKind::Mesh));
        assert_eq!(config.defaults.output, "json");
        assert_eq!(config.defaults.color, "auto");
        assert_eq!(config.seeds.mesh, 7);
        assert_eq!(config.seeds.hub_spoke, 42);

        let options = config.generation_options(TopologyKind::Mesh);
        assert_eq!(options.seed, Some(7));
        assert_eq!(
            options.reference_time,
            Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap()
        );
        assert_eq!(options.dashboard_url, DEFAULT_DASHBOARD_URL);
    }

    #[test]
    fn global_seed_wins_over_per_topology_seed() {
        let mut config = Config::default();
        config.generation.seed = Some(1);
        assert_eq!(config.generation_options(TopologyKind::MultiOrg).seed, Some(1));
        assert_eq!(config.base_options().seed, Some(1));

        config.generation.seed = None;
        assert_eq!(config.generation_options(TopologyKind::MultiOrg).seed, Some(44));
        assert_eq!(config.base_options().seed, None);
    }

    #[test]
    fn invalid_values_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "[defaults]\noutput = \"xml\"\n");
        let err = load_config_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Validation { ref field, .. } if field == "defaults.output"));

        let path = write(&dir, "[generation]\ndashboard_url = \"mock.meraki\"\n");
        assert!(load_config_from(&path).is_err());

        let path = write(&dir, "default_topology = [1]\n");
        assert!(matches!(
            load_config_from(&path).unwrap_err(),
            ConfigError::Figment(_)
        ));
    }

    #[test]
    fn saved_config_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let mut config = Config::default();
        config.default_topology = "multi_org".into();
        config.generation.seed = Some(9);

        save_config_to(&config, &path).unwrap();
        assert_eq!(load_config_from(&path).unwrap(), config);
    }
}
