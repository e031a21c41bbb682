// ── TopologyBuilder ──
//
// Shared assembly path for every topology. One builder owns the single
// `GenerationRng` of a run and feeds it to all three generators, so
// draw order depends only on the order sites are added.

use tracing::{debug, info};

use crate::generate::catalog::Location;
use crate::generate::{
    ClientGenerator, DeviceGenerator, DevicePlacement, DevicePlan, NetworkGenerator, VlanType,
};
use crate::model::{Topology, VpnHub, VpnMode};
use crate::rng::GenerationRng;

/// Everything needed to lay down one network.
#[derive(Debug, Clone)]
pub struct SiteSpec {
    pub network_id: String,
    pub organization_id: String,
    pub name: String,
    pub location: &'static Location,
    pub tags: Vec<String>,
    pub notes: String,
    pub plan: DevicePlan,
    /// Second octet of device LAN addresses; unique per topology.
    pub network_octet: u8,
    pub vlan_types: Vec<VlanType>,
    /// Third octet of the first VLAN subnet; each further VLAN takes the next.
    pub vlan_base_octet: u32,
    pub client_count: u32,
    pub required_clients: Vec<String>,
    /// Base address of a `/16` cellular pool, e.g. `10.200.0.0`.
    pub cellular_pool: Option<String>,
}

impl SiteSpec {
    pub fn new(
        network_id: impl Into<String>,
        organization_id: impl Into<String>,
        name: impl Into<String>,
        location: &'static Location,
    ) -> Self {
        Self {
            network_id: network_id.into(),
            organization_id: organization_id.into(),
            name: name.into(),
            location,
            tags: Vec::new(),
            notes: String::new(),
            plan: DevicePlan::default(),
            network_octet: 0,
            vlan_types: Vec::new(),
            vlan_base_octet: 0,
            client_count: 0,
            required_clients: Vec::new(),
            cellular_pool: None,
        }
    }

    pub fn tags(mut self, tags: &[&str]) -> Self {
        self.tags = tags.iter().map(|&t| t.to_owned()).collect();
        self
    }

    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    pub fn plan(mut self, plan: DevicePlan) -> Self {
        self.plan = plan;
        self
    }

    pub fn addressing(mut self, network_octet: u8, vlan_base_octet: u32) -> Self {
        self.network_octet = network_octet;
        self.vlan_base_octet = vlan_base_octet;
        self
    }

    pub fn vlans(mut self, vlan_types: &[VlanType]) -> Self {
        self.vlan_types = vlan_types.to_vec();
        self
    }

    pub fn clients(mut self, count: u32, required: &[&str]) -> Self {
        self.client_count = count;
        self.required_clients = required.iter().map(|&r| r.to_owned()).collect();
        self
    }

    pub fn cellular_pool(mut self, cidr: impl Into<String>) -> Self {
        self.cellular_pool = Some(cidr.into());
        self
    }
}

/// Accumulates a [`Topology`] site by site.
#[derive(Debug)]
pub struct TopologyBuilder {
    rng: GenerationRng,
    networks: NetworkGenerator,
    devices: DeviceGenerator,
    clients: ClientGenerator,
    topology: Topology,
}

impl TopologyBuilder {
    pub fn new(
        topology_name: impl Into<String>,
        description: impl Into<String>,
        rng: GenerationRng,
        dashboard_url: &str,
    ) -> Self {
        Self {
            rng,
            networks: NetworkGenerator::new(dashboard_url),
            devices: DeviceGenerator::new(dashboard_url),
            clients: ClientGenerator::new(),
            topology: Topology::empty(topology_name, description),
        }
    }

    pub fn add_organization(&mut self, id: &str, name: &str, region: &str) -> &mut Self {
        let org = self
            .networks
            .generate_organization(&mut self.rng, id, name, region);
        self.topology.organizations.push(org);
        self
    }

    /// Network, devices, VLANs, optional cellular pool and clients, in that order.
    pub fn add_site(&mut self, site: SiteSpec) -> &mut Self {
        let network = self.networks.generate_network(
            &site.network_id,
            &site.organization_id,
            &site.name,
            site.plan.product_types(),
            site.location.timezone,
            site.tags.clone(),
            &site.notes,
        );
        self.topology.networks.push(network);

        let placement = DevicePlacement {
            network_id: &site.network_id,
            organization_id: &site.organization_id,
            location: site.location,
            network_octet: site.network_octet,
        };
        let generated = self
            .devices
            .generate_devices_for_network(&mut self.rng, &placement, &site.plan);

        let vlans = self.networks.generate_vlans_for_network(
            &mut self.rng,
            &site.network_id,
            &site.vlan_types,
            site.vlan_base_octet,
        );

        if let Some(cidr) = &site.cellular_pool {
            let pool = self
                .networks
                .generate_cellular_subnet_pool(&site.network_id, cidr, 16);
            self.topology.cellular_subnet_pools.push(pool);
        }

        let clients = self.clients.generate_clients_for_network(
            &mut self.rng,
            &site.network_id,
            &vlans,
            site.client_count,
            &generated.devices,
            &site.required_clients,
        );

        debug!(
            network_id = %site.network_id,
            name = %site.name,
            devices = generated.devices.len(),
            vlans = vlans.len(),
            clients = clients.network_clients.len(),
            "assembled site"
        );

        self.topology.devices.extend(generated.devices);
        self.topology
            .device_availabilities
            .extend(generated.availabilities);
        self.topology.device_statuses.extend(generated.statuses);
        self.topology.vlans.extend(vlans);
        self.topology.network_clients.extend(clients.network_clients);
        self.topology.device_clients.extend(clients.device_clients);
        self
    }

    /// VPN settings for an already-added network. Every VLAN of the network
    /// is advertised over the VPN without NAT.
    pub fn add_vpn(&mut self, network_id: &str, mode: VpnMode, hubs: Vec<VpnHub>) -> &mut Self {
        let subnets = self
            .topology
            .vlans_for(network_id)
            .map(|vlan| self.networks.generate_vpn_subnet(&vlan.subnet, true, false))
            .collect();
        let config = self
            .networks
            .generate_vpn_config(network_id, mode, subnets, hubs);
        self.topology.vpn_configs.push(config);
        self
    }

    pub fn add_vlan_profile(
        &mut self,
        network_id: &str,
        iname: &str,
        name: &str,
        vlan_names: &[&str],
    ) -> &mut Self {
        let profile = self
            .networks
            .generate_vlan_profile(network_id, iname, name, vlan_names, true);
        self.topology.vlan_profiles.push(profile);
        self
    }

    /// Recounts stats and hands the topology over.
    pub fn finish(self) -> Topology {
        let mut topology = self.topology;
        topology.stats = topology.compute_stats();
        info!(
            topology = %topology.topology_name,
            organizations = topology.stats.organizations,
            networks = topology.stats.networks,
            devices = topology.stats.devices,
            clients = topology.stats.clients,
            "generated topology"
        );
        topology
    }
}

/// Hub reference as spokes carry it.
pub fn hub(network_id: &str, use_default_route: bool) -> VpnHub {
    VpnHub {
        hub_id: network_id.to_owned(),
        use_default_route,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::generate::catalog::location_at;
    use crate::generate::{DeviceGroup, SingleDevice};
    use crate::model::ProductType;

    fn site() -> SiteSpec {
        SiteSpec::new("N_1", "1", "Lab", location_at(6))
            .tags(&["lab"])
            .notes("Test lab")
            .plan(DevicePlan {
                appliances: vec![SingleDevice::new("MX68")],
                switches: vec![DeviceGroup::new("MS120-8", 1)],
                cellular: vec![SingleDevice::new("MG21")],
                ..DevicePlan::default()
            })
            .addressing(30, 40)
            .vlans(&[VlanType::Corporate, VlanType::Voice])
            .clients(12, &["Dell"])
            .cellular_pool("10.201.0.0")
    }

    #[test]
    fn site_lays_down_every_layer() {
        let mut builder =
            TopologyBuilder::new("lab", "Lab topology", GenerationRng::seeded(1), "https://x");
        builder.add_organization("1", "Lab Org", "Europe").add_site(site());
        builder.add_vpn("N_1", VpnMode::Hub, Vec::new());
        let topology = builder.finish();

        assert_eq!(topology.networks[0].time_zone, "America/Denver");
        assert_eq!(
            topology.networks[0].product_types,
            vec![
                ProductType::Appliance,
                ProductType::Switch,
                ProductType::CellularGateway
            ]
        );
        assert_eq!(topology.vlans[1].subnet, "192.168.41.0/24");
        assert_eq!(topology.cellular_subnet_pools[0].cidr, "10.201.0.0/16");
        assert_eq!(topology.devices[0].lan_ip, "10.30.0.1");
        assert_eq!(topology.vpn_configs[0].subnets.len(), 2);
        assert!(topology.vpn_configs[0].subnets.iter().all(|s| s.use_vpn));
        assert_eq!(topology.stats.clients, 12);
        assert_eq!(topology.stats.devices, 3);
        assert_eq!(topology.stats.device_clients, 12);
        assert_eq!(topology.organizations[0].cloud.region.host.name, "Europe");
    }

    #[test]
    fn hub_helper() {
        let h = hub("N_HQ001", true);
        assert_eq!(h.hub_id, "N_HQ001");
        assert!(h.use_default_route);
    }
}
