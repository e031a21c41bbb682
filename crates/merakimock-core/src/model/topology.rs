// ── Topology aggregate ──

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::{
    CellularSubnetPool, Device, DeviceAvailability, DeviceClient, DeviceStatus, Network,
    NetworkClient, Organization, Vlan, VlanProfile, VpnConfig,
};

/// One complete synthetic fleet.
///
/// Top-level keys stay snake_case; the entity records inside use the
/// Dashboard's camelCase names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Topology {
    pub topology_name: String,
    pub description: String,
    pub organizations: Vec<Organization>,
    pub networks: Vec<Network>,
    pub devices: Vec<Device>,
    pub device_availabilities: Vec<DeviceAvailability>,
    pub device_statuses: Vec<DeviceStatus>,
    pub vlans: Vec<Vlan>,
    pub vlan_profiles: Vec<VlanProfile>,
    pub network_clients: Vec<NetworkClient>,
    /// Device serial to the clients currently attached to it.
    pub device_clients: IndexMap<String, Vec<DeviceClient>>,
    pub vpn_configs: Vec<VpnConfig>,
    pub cellular_subnet_pools: Vec<CellularSubnetPool>,
    pub stats: TopologyStats,
}

/// Entity counts, consumed by CI validation and operators sizing a topology.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopologyStats {
    pub organizations: usize,
    pub networks: usize,
    pub devices: usize,
    pub vlans: usize,
    pub vlan_profiles: usize,
    pub clients: usize,
    pub device_clients: usize,
    pub vpn_configs: usize,
    pub cellular_subnet_pools: usize,
}

impl Topology {
    /// A topology with no entities yet.
    pub fn empty(topology_name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            topology_name: topology_name.into(),
            description: description.into(),
            organizations: Vec::new(),
            networks: Vec::new(),
            devices: Vec::new(),
            device_availabilities: Vec::new(),
            device_statuses: Vec::new(),
            vlans: Vec::new(),
            vlan_profiles: Vec::new(),
            network_clients: Vec::new(),
            device_clients: IndexMap::new(),
            vpn_configs: Vec::new(),
            cellular_subnet_pools: Vec::new(),
            stats: TopologyStats::default(),
        }
    }

    /// Recount every entity list.
    pub fn compute_stats(&self) -> TopologyStats {
        TopologyStats {
            organizations: self.organizations.len(),
            networks: self.networks.len(),
            devices: self.devices.len(),
            vlans: self.vlans.len(),
            vlan_profiles: self.vlan_profiles.len(),
            clients: self.network_clients.len(),
            device_clients: self.device_clients.values().map(Vec::len).sum(),
            vpn_configs: self.vpn_configs.len(),
            cellular_subnet_pools: self.cellular_subnet_pools.len(),
        }
    }

    pub fn network(&self, id: &str) -> Option<&Network> {
        self.networks.iter().find(|n| n.id == id)
    }

    pub fn device(&self, serial: &str) -> Option<&Device> {
        self.devices.iter().find(|d| d.serial == serial)
    }

    pub fn vpn_config(&self, network_id: &str) -> Option<&VpnConfig> {
        self.vpn_configs.iter().find(|v| v.network_id == network_id)
    }

    pub fn vlans_for<'a>(&'a self, network_id: &'a str) -> impl Iterator<Item = &'a Vlan> + 'a {
        self.vlans.iter().filter(move |v| v.network_id == network_id)
    }

    pub fn devices_for<'a>(&'a self, network_id: &'a str) -> impl Iterator<Item = &'a Device> + 'a {
        self.devices.iter().filter(move |d| d.network_id == network_id)
    }

    pub fn clients_for<'a>(
        &'a self,
        network_id: &'a str,
    ) -> impl Iterator<Item = &'a NetworkClient> + 'a {
        self.network_clients
            .iter()
            .filter(move |c| c.network_id == network_id)
    }
}
