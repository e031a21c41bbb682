// ── Topology assemblers ──
//
// Each built-in topology is a fixed script over the shared builder. A
// custom topology document goes through the same builder.

pub mod builder;
pub mod custom;
pub mod hub_spoke;
pub mod mesh;
pub mod multi_org;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

use crate::error::CoreError;
use crate::generate::DEFAULT_DASHBOARD_URL;
use crate::model::Topology;
use crate::rng::{GenerationRng, default_reference_time};

pub use builder::{SiteSpec, TopologyBuilder};
pub use custom::{CustomTopology, DocumentFormat};

/// The built-in topologies.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(ascii_case_insensitive)]
pub enum TopologyKind {
    #[strum(to_string = "hub_spoke", serialize = "hub-spoke")]
    HubSpoke,
    #[strum(to_string = "mesh")]
    Mesh,
    #[strum(to_string = "multi_org", serialize = "multi-org")]
    MultiOrg,
}

impl TopologyKind {
    /// Seed used when the caller does not pick one.
    pub fn default_seed(self) -> u64 {
        match self {
            Self::HubSpoke => 42,
            Self::Mesh => 43,
            Self::MultiOrg => 44,
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::HubSpoke => hub_spoke::DESCRIPTION,
            Self::Mesh => mesh::DESCRIPTION,
            Self::MultiOrg => multi_org::DESCRIPTION,
        }
    }

    pub fn all() -> impl Iterator<Item = Self> {
        Self::iter()
    }

    pub fn generate(self, options: &GenerationOptions) -> Topology {
        let seed = options.seed.unwrap_or_else(|| self.default_seed());
        let rng = GenerationRng::seeded(seed).with_reference_time(options.reference_time);
        let url = options.dashboard_url.as_str();
        match self {
            Self::HubSpoke => hub_spoke::generate(rng, url),
            Self::Mesh => mesh::generate(rng, url),
            Self::MultiOrg => multi_org::generate(rng, url),
        }
    }
}

/// Knobs shared by every generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationOptions {
    /// Overrides the topology's own default seed.
    pub seed: Option<u64>,
    /// Instant every relative timestamp is measured from.
    pub reference_time: DateTime<Utc>,
    pub dashboard_url: String,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            seed: None,
            reference_time: default_reference_time(),
            dashboard_url: DEFAULT_DASHBOARD_URL.to_owned(),
        }
    }
}

impl GenerationOptions {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// Generates a built-in topology.
pub fn generate(kind: TopologyKind, options: &GenerationOptions) -> Topology {
    kind.generate(options)
}

/// Generates a built-in topology by name (`hub_spoke`, `mesh`, `multi_org`).
pub fn generate_by_name(name: &str, options: &GenerationOptions) -> Result<Topology, CoreError> {
    let kind: TopologyKind = name.parse().map_err(|_| CoreError::UnknownTopology {
        name: name.to_owned(),
    })?;
    Ok(kind.generate(options))
}
