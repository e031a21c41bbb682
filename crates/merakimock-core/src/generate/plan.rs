// ── Declarative device plans ──
//
// What a site should contain, per product family. Default device names,
// name prefixes and counts live on the typed accessors below.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use super::network::VlanType;
use crate::model::ProductType;

/// A device that appears once per site (security appliance, cellular gateway).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SingleDevice {
    pub model: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl SingleDevice {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            name: None,
            tags: Vec::new(),
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn tagged(mut self, tags: &[&str]) -> Self {
        self.tags = tags.iter().map(|&t| t.to_owned()).collect();
        self
    }

    /// Explicit name, or `{network_id}-{suffix}`.
    pub fn name_or(&self, network_id: &str, suffix: &str) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| format!("{network_id}-{suffix}"))
    }
}

/// `count` identical devices named `{prefix}-01`, `{prefix}-02`, ...
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceGroup {
    pub model: String,
    #[serde(default = "default_count")]
    pub count: u32,
    #[serde(default)]
    pub name_prefix: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

fn default_count() -> u32 {
    1
}

impl DeviceGroup {
    pub fn new(model: impl Into<String>, count: u32) -> Self {
        Self {
            model: model.into(),
            count,
            name_prefix: None,
            tags: Vec::new(),
        }
    }

    pub fn prefixed(mut self, prefix: impl Into<String>) -> Self {
        self.name_prefix = Some(prefix.into());
        self
    }

    pub fn tagged(mut self, tags: &[&str]) -> Self {
        self.tags = tags.iter().map(|&t| t.to_owned()).collect();
        self
    }

    /// Name of the `index`-th (zero-based) device in the group.
    pub fn device_name(&self, default_prefix: &str, index: u32) -> String {
        let prefix = self.name_prefix.as_deref().unwrap_or(default_prefix);
        format!("{prefix}-{:02}", index + 1)
    }
}

/// Every device a network should get, in expansion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DevicePlan {
    pub appliances: Vec<SingleDevice>,
    pub switches: Vec<DeviceGroup>,
    pub wireless: Vec<DeviceGroup>,
    pub cellular: Vec<SingleDevice>,
    pub cameras: Vec<DeviceGroup>,
    pub sensors: Vec<DeviceGroup>,
}

impl DevicePlan {
    /// Product types the network advertises, in Dashboard order.
    /// Networks always carry `appliance`.
    pub fn product_types(&self) -> Vec<ProductType> {
        let mut types = vec![ProductType::Appliance];
        let families = [
            (ProductType::Switch, !self.switches.is_empty()),
            (ProductType::Wireless, !self.wireless.is_empty()),
            (ProductType::CellularGateway, !self.cellular.is_empty()),
            (ProductType::Camera, !self.cameras.is_empty()),
            (ProductType::Sensor, !self.sensors.is_empty()),
        ];
        types.extend(
            families
                .into_iter()
                .filter_map(|(product, present)| present.then_some(product)),
        );
        types
    }

    pub fn device_count(&self) -> usize {
        let groups = |list: &[DeviceGroup]| list.iter().map(|g| g.count as usize).sum::<usize>();
        self.appliances.len()
            + self.cellular.len()
            + groups(&self.switches)
            + groups(&self.wireless)
            + groups(&self.cameras)
            + groups(&self.sensors)
    }

    pub fn has_cellular(&self) -> bool {
        !self.cellular.is_empty()
    }
}

// ── Site templates ──────────────────────────────────────────────────

/// Canonical network types, each with a fixed device plan, client count
/// and VLAN set.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum SiteKind {
    Headquarters,
    Office,
    Branch,
    Retail,
    Warehouse,
    Residential,
    Datacenter,
}

impl SiteKind {
    /// Device plan for a network called `network_name`; devices are named
    /// `{network_name}-MX`, `{network_name}-SW-01`, ...
    pub fn plan(self, network_name: &str) -> DevicePlan {
        let switch = |model: &str, count| DeviceGroup::new(model, count).prefixed(format!("{network_name}-SW"));
        let ap = |model: &str, count| DeviceGroup::new(model, count).prefixed(format!("{network_name}-AP"));
        let appliance = |model: &str| vec![SingleDevice::new(model).named(format!("{network_name}-MX"))];
        let gateway = || vec![SingleDevice::new("MG41").named(format!("{network_name}-MG"))];

        let (appliances, switches, wireless, cellular) = match self {
            Self::Headquarters => (
                appliance("MX85"),
                vec![switch("MS350-48", 2), switch("MS225-48", 4)],
                vec![ap("MR56", 12)],
                Vec::new(),
            ),
            Self::Office => (
                appliance("MX68"),
                vec![switch("MS225-48", 2)],
                vec![ap("MR46", 6)],
                Vec::new(),
            ),
            Self::Branch => (
                appliance("MX67"),
                vec![switch("MS120-24", 1)],
                vec![ap("MR36", 3)],
                Vec::new(),
            ),
            Self::Retail => (
                appliance("MX68W"),
                vec![switch("MS120-8", 1)],
                vec![ap("MR33", 4)],
                Vec::new(),
            ),
            Self::Warehouse => (
                appliance("MX75"),
                vec![switch("MS225-48", 3)],
                vec![ap("MR57", 15)],
                gateway(),
            ),
            Self::Residential => (
                appliance("MX68W"),
                vec![switch("MS225-48", 2)],
                vec![ap("MR46", 20)],
                Vec::new(),
            ),
            Self::Datacenter => (
                appliance("MX450"),
                vec![switch("MS425-32", 2), switch("MS350-48", 4)],
                vec![ap("MR57", 4)],
                gateway(),
            ),
        };

        DevicePlan {
            appliances,
            switches,
            wireless,
            cellular,
            ..DevicePlan::default()
        }
    }

    pub fn client_count(self) -> u32 {
        match self {
            Self::Headquarters => 150,
            Self::Office => 60,
            Self::Branch => 30,
            Self::Retail => 40,
            Self::Warehouse => 80,
            Self::Residential => 200,
            Self::Datacenter => 50,
        }
    }

    pub fn vlan_types(self) -> Vec<VlanType> {
        use VlanType::{Corporate, Guest, Iot, Management, Server, Voice};
        match self {
            Self::Headquarters | Self::Datacenter => {
                vec![Corporate, Guest, Voice, Server, Management]
            }
            Self::Residential | Self::Retail => vec![Corporate, Guest, Iot],
            Self::Office | Self::Branch | Self::Warehouse => vec![Corporate, Guest],
        }
    }
}
