// ── Site-to-site VPN and cellular pool types ──

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use super::vlan::Toggle;

/// Site-to-site VPN role of a network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum VpnMode {
    None,
    Hub,
    Spoke,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VpnHub {
    pub hub_id: String,
    pub use_default_route: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VpnSubnet {
    pub local_subnet: String,
    pub use_vpn: bool,
    pub nat: Toggle,
}

/// Site-to-site VPN settings of one network. Identity is `network_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VpnConfig {
    pub network_id: String,
    pub mode: VpnMode,
    pub hubs: Vec<VpnHub>,
    pub subnets: Vec<VpnSubnet>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_status_pages: Option<Toggle>,
}

impl VpnConfig {
    pub fn hub_ids(&self) -> impl Iterator<Item = &str> {
        self.hubs.iter().map(|h| h.hub_id.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CellularSubnet {
    pub serial: Option<String>,
    pub name: String,
    pub appliance_ip: String,
    pub subnet: String,
}

/// Cellular gateway subnet pool. Identity is `network_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CellularSubnetPool {
    pub network_id: String,
    pub deployment_mode: String,
    pub cidr: String,
    pub mask: u8,
    pub subnets: Vec<CellularSubnet>,
}
