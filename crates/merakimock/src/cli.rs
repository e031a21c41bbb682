//! Clap derive structures for the `merakimock` CLI.
//!
//! Kept free of workspace crates so `build.rs` can include it for man
//! page generation.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// merakimock -- deterministic mock Meraki Dashboard topologies
#[derive(Debug, Parser)]
#[command(
    name = "merakimock",
    version,
    about = "Generate deterministic mock Meraki Dashboard topologies",
    long_about = "Generates complete synthetic Meraki fleets (organizations, networks,\n\
        devices, VLANs, clients, VPN and cellular settings) shaped like\n\
        Dashboard API responses. The same seed always reproduces the same output.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Output format [default: from config, else table]
    #[arg(long, short = 'o', env = "MERAKIMOCK_OUTPUT", global = true)]
    pub output: Option<OutputFormat>,

    /// When to use color output [default: from config, else auto]
    #[arg(long, global = true)]
    pub color: Option<ColorMode>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Seed for every generated topology (overrides config)
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// Instant relative timestamps are measured from (RFC 3339)
    #[arg(long, value_name = "RFC3339", global = true, conflicts_with = "now")]
    pub reference_time: Option<String>,

    /// Measure timestamps from the current wall clock
    #[arg(long, global = true)]
    pub now: bool,

    /// Config file to read instead of the default location
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate a topology and print or write it
    #[command(alias = "gen", alias = "g")]
    Generate(GenerateArgs),

    /// Generate and validate topologies, failing on any issue
    Validate(ValidateArgs),

    /// Show entity counts per topology
    Stats(StatsArgs),

    /// List the built-in topologies
    #[command(alias = "ls")]
    Topologies,

    /// Seed an in-memory store and read entities back
    #[command(alias = "q")]
    Query(QueryArgs),

    /// Manage CLI configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Generate ─────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Built-in topology (hub_spoke, mesh, multi_org) [default: from config]
    #[arg(value_name = "TOPOLOGY", conflicts_with = "from_file")]
    pub topology: Option<String>,

    /// Custom topology document (.toml, .yaml, .json)
    #[arg(long, short = 'f', value_name = "PATH")]
    pub from_file: Option<PathBuf>,

    /// Write the topology to a file instead of stdout (format from extension)
    #[arg(long, value_name = "PATH")]
    pub out: Option<PathBuf>,
}

// ── Validate ─────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Custom topology documents to validate as well
    #[arg(value_name = "PATH")]
    pub files: Vec<PathBuf>,
}

// ── Stats ────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct StatsArgs {
    /// Topologies to count [default: all built-in]
    #[arg(value_name = "TOPOLOGY")]
    pub topologies: Vec<String>,
}

// ── Query ────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct QueryArgs {
    /// Built-in topology to generate and read from
    #[arg(value_name = "TOPOLOGY")]
    pub topology: String,

    /// Entity kind (organization, network, device, vlan, network_client, ...)
    #[arg(value_name = "ENTITY")]
    pub entity: String,

    /// Read a single entity by id
    #[arg(long, conflicts_with = "parent")]
    pub id: Option<String>,

    /// Only entities under this parent, as KIND:ID (e.g. network:N_HQ001)
    #[arg(long, value_name = "KIND:ID")]
    pub parent: Option<String>,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the effective configuration
    Show,

    /// Write a default config file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print the config file path
    Path,
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}
