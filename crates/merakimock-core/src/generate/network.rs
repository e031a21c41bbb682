// ── NetworkGenerator ──
//
// Organizations, networks, VLANs, VLAN profiles, VPN settings and cellular
// pools. Everything except the customer number and VLAN interface ids is a
// pure function of its inputs.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::model::organization::{
    ApiSettings, Cloud, CloudHost, CloudRegion, Licensing, Management, ManagementDetail,
};
use crate::model::vlan::{subnet_base, subnet_mask};
use crate::model::{
    CellularSubnet, CellularSubnetPool, DhcpHandling, Network, Organization, ProductType, Toggle,
    Vlan, VlanNameEntry, VlanProfile, VpnConfig, VpnHub, VpnMode, VpnSubnet,
};
use crate::rng::GenerationRng;

/// Dashboard host used in generated URLs unless configured otherwise.
pub const DEFAULT_DASHBOARD_URL: &str = "https://mock.meraki.com";

/// Upstream resolver setting applied to generated VLANs.
pub const UPSTREAM_DNS: &str = "upstream_dns";

// ── VLAN templates ──────────────────────────────────────────────────

/// Semantic VLAN role, each mapped to a fixed VLAN id and DHCP policy.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum VlanType {
    Corporate,
    Guest,
    Voice,
    Iot,
    Management,
    Server,
}

impl VlanType {
    pub fn vlan_id(self) -> u16 {
        match self {
            Self::Corporate => 10,
            Self::Guest => 20,
            Self::Voice => 30,
            Self::Iot => 40,
            Self::Server => 50,
            Self::Management => 99,
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::Corporate => "Corporate",
            Self::Guest => "Guest",
            Self::Voice => "Voice",
            Self::Iot => "IoT",
            Self::Management => "Management",
            Self::Server => "Servers",
        }
    }

    pub fn dhcp_handling(self) -> DhcpHandling {
        match self {
            Self::Management | Self::Server => DhcpHandling::DoNotRespond,
            _ => DhcpHandling::RunServer,
        }
    }

    /// Unknown names fall back to `Corporate`.
    pub fn parse_lenient(name: &str) -> Self {
        name.parse().unwrap_or(Self::Corporate)
    }
}

// ── Generator ───────────────────────────────────────────────────────

/// Builds the network-layer records of a topology.
#[derive(Debug, Clone)]
pub struct NetworkGenerator {
    dashboard_url: String,
}

impl Default for NetworkGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_DASHBOARD_URL)
    }
}

impl NetworkGenerator {
    pub fn new(dashboard_url: impl Into<String>) -> Self {
        Self {
            dashboard_url: dashboard_url.into().trim_end_matches('/').to_owned(),
        }
    }

    pub fn generate_organization(
        &self,
        rng: &mut GenerationRng,
        id: &str,
        name: &str,
        region: &str,
    ) -> Organization {
        let slug = name.to_lowercase().replace(' ', "-");
        let host = if region == "North America" {
            "United States"
        } else {
            region
        };
        let customer_number = rng.range(10_000_000_u32..=99_999_999);

        Organization {
            id: id.to_owned(),
            name: name.to_owned(),
            url: format!(
                "{}/o/{slug}/manage/organization/overview",
                self.dashboard_url
            ),
            api: ApiSettings { enabled: true },
            licensing: Licensing {
                model: "co-term".into(),
            },
            cloud: Cloud {
                region: CloudRegion {
                    name: region.to_owned(),
                    host: CloudHost {
                        name: host.to_owned(),
                    },
                },
            },
            management: Management {
                details: vec![ManagementDetail {
                    name: "customer number".into(),
                    value: customer_number.to_string(),
                }],
            },
        }
    }

    #[allow(clippy::too_many_arguments)]
    pub fn generate_network(
        &self,
        id: &str,
        organization_id: &str,
        name: &str,
        product_types: Vec<ProductType>,
        time_zone: &str,
        tags: Vec<String>,
        notes: &str,
    ) -> Network {
        Network {
            id: id.to_owned(),
            organization_id: organization_id.to_owned(),
            name: name.to_owned(),
            product_types,
            time_zone: time_zone.to_owned(),
            tags,
            enrollment_string: None,
            url: format!(
                "{}/{}/manage/clients",
                self.dashboard_url,
                name.replace(' ', "-")
            ),
            notes: (!notes.is_empty()).then(|| notes.to_owned()),
            details: None,
            is_bound_to_config_template: false,
            is_virtual: false,
        }
    }

    #[allow(clippy::too_many_arguments)]
    pub fn generate_vlan(
        &self,
        rng: &mut GenerationRng,
        network_id: &str,
        vlan_id: u16,
        name: &str,
        subnet: &str,
        appliance_ip: &str,
        dhcp_handling: DhcpHandling,
        dns_nameservers: &str,
    ) -> Vlan {
        Vlan {
            id: vlan_id.to_string(),
            interface_id: rng.digits(13),
            network_id: network_id.to_owned(),
            name: name.to_owned(),
            appliance_ip: appliance_ip.to_owned(),
            subnet: subnet.to_owned(),
            fixed_ip_assignments: BTreeMap::new(),
            reserved_ip_ranges: Vec::new(),
            dns_nameservers: dns_nameservers.to_owned(),
            dhcp_handling,
            dhcp_lease_time: "1 day".into(),
            dhcp_boot_options_enabled: false,
            dhcp_options: Vec::new(),
            vpn_nat_subnet: subnet.to_owned(),
            mandatory_dhcp: Toggle::OFF,
            ipv6: Toggle::OFF,
            dhcp_boot_filename: None,
            dhcp_boot_next_server: None,
            dhcp_relay_server_ips: Vec::new(),
            group_policy_id: None,
            template_vlan_type: "same".into(),
            cidr: subnet.to_owned(),
            mask: subnet_mask(subnet),
        }
    }

    /// One `/24` per requested type, third octet advancing from
    /// `base_third_octet` in list order.
    pub fn generate_vlans_for_network(
        &self,
        rng: &mut GenerationRng,
        network_id: &str,
        vlan_types: &[VlanType],
        base_third_octet: u32,
    ) -> Vec<Vlan> {
        vlan_types
            .iter()
            .zip(base_third_octet..)
            .map(|(&vlan_type, octet)| {
                self.generate_vlan(
                    rng,
                    network_id,
                    vlan_type.vlan_id(),
                    vlan_type.display_name(),
                    &format!("192.168.{octet}.0/24"),
                    &format!("192.168.{octet}.1"),
                    vlan_type.dhcp_handling(),
                    UPSTREAM_DNS,
                )
            })
            .collect()
    }

    pub fn generate_vlan_profile(
        &self,
        network_id: &str,
        iname: &str,
        name: &str,
        vlan_names: &[&str],
        is_default: bool,
    ) -> VlanProfile {
        VlanProfile {
            network_id: network_id.to_owned(),
            iname: iname.to_owned(),
            name: name.to_owned(),
            is_default,
            vlan_names: vlan_names
                .iter()
                .map(|&name| VlanNameEntry {
                    name: name.to_owned(),
                    adaptive_policy_group: None,
                })
                .collect(),
            vlan_groups: Vec::new(),
        }
    }

    /// Hubs are not checked against `mode`; a hub with hub references or a
    /// spoke without any is accepted as given.
    pub fn generate_vpn_config(
        &self,
        network_id: &str,
        mode: VpnMode,
        subnets: Vec<VpnSubnet>,
        hubs: Vec<VpnHub>,
    ) -> VpnConfig {
        VpnConfig {
            network_id: network_id.to_owned(),
            mode,
            hubs,
            subnets,
            local_status_pages: (mode == VpnMode::Hub).then_some(Toggle::ON),
        }
    }

    pub fn generate_vpn_subnet(&self, local_subnet: &str, use_vpn: bool, nat_enabled: bool) -> VpnSubnet {
        VpnSubnet {
            local_subnet: local_subnet.to_owned(),
            use_vpn,
            nat: Toggle {
                enabled: nat_enabled,
            },
        }
    }

    /// One pool with a single `/24` carved from the first two octets of `cidr`.
    pub fn generate_cellular_subnet_pool(
        &self,
        network_id: &str,
        cidr: &str,
        mask: u8,
    ) -> CellularSubnetPool {
        let prefix = subnet_base(subnet_base(cidr));
        CellularSubnetPool {
            network_id: network_id.to_owned(),
            deployment_mode: "routed".into(),
            cidr: format!("{cidr}/{mask}"),
            mask,
            subnets: vec![CellularSubnet {
                serial: None,
                name: "Subnet 1".into(),
                appliance_ip: format!("{prefix}.1.1"),
                subnet: format!("{prefix}.1.0/24"),
            }],
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn rng() -> GenerationRng {
        GenerationRng::seeded(42)
    }

    #[test]
    fn vlans_get_sequential_subnets() {
        let generator = NetworkGenerator::default();
        let vlans = generator.generate_vlans_for_network(
            &mut rng(),
            "N_1",
            &[VlanType::Corporate, VlanType::Guest],
            10,
        );
        assert_eq!(vlans.len(), 2);
        assert_eq!(vlans[0].subnet, "192.168.10.0/24");
        assert_eq!(vlans[1].subnet, "192.168.11.0/24");
        assert_eq!(vlans[0].appliance_ip, "192.168.10.1");
        assert_eq!(vlans[0].id, "10");
        assert_eq!(vlans[1].id, "20");
    }

    #[test]
    fn vlan_type_order_drives_subnet_order() {
        let generator = NetworkGenerator::default();
        let vlans = generator.generate_vlans_for_network(
            &mut rng(),
            "N_1",
            &[VlanType::Server, VlanType::Corporate],
            40,
        );
        assert_eq!(vlans[0].name, "Servers");
        assert_eq!(vlans[0].subnet, "192.168.40.0/24");
        assert_eq!(vlans[0].dhcp_handling, DhcpHandling::DoNotRespond);
        assert_eq!(vlans[1].subnet, "192.168.41.0/24");
    }

    #[test]
    fn vlan_fields_and_dhcp_pool() {
        let generator = NetworkGenerator::default();
        let vlan = generator.generate_vlan(
            &mut rng(),
            "N_1",
            30,
            "Voice",
            "192.168.30.0/24",
            "192.168.30.1",
            DhcpHandling::RunServer,
            UPSTREAM_DNS,
        );
        assert_eq!(vlan.interface_id.len(), 13);
        assert!(vlan.interface_id.chars().all(|c| c.is_ascii_digit()));
        assert_eq!(vlan.mask, 24);
        assert_eq!(vlan.cidr, "192.168.30.0/24");
        assert_eq!(
            vlan.dhcp_pool(),
            ("192.168.30.100".to_owned(), "192.168.30.250".to_owned())
        );
    }

    #[test]
    fn vlan_without_prefix_length_falls_back_to_24() {
        let generator = NetworkGenerator::default();
        let vlan = generator.generate_vlan(
            &mut rng(),
            "N_1",
            1,
            "Default",
            "192.168.1.0",
            "192.168.1.1",
            DhcpHandling::RunServer,
            UPSTREAM_DNS,
        );
        assert_eq!(vlan.mask, 24);
        assert!(vlan.contains("192.168.1.77".parse().unwrap()));
    }

    #[test]
    fn unknown_vlan_type_is_corporate() {
        assert_eq!(VlanType::parse_lenient("Guest"), VlanType::Guest);
        assert_eq!(VlanType::parse_lenient("lab"), VlanType::Corporate);
    }

    #[test]
    fn organization_shape() {
        let generator = NetworkGenerator::default();
        let org = generator.generate_organization(&mut rng(), "883652", "Acme Corporation", "North America");
        assert_eq!(
            org.url,
            "https://mock.meraki.com/o/acme-corporation/manage/organization/overview"
        );
        assert_eq!(org.cloud.region.host.name, "United States");
        assert_eq!(org.management.details[0].value.len(), 8);
    }

    #[test]
    fn network_notes_are_null_when_empty() {
        let generator = NetworkGenerator::new("https://example.test/");
        let network = generator.generate_network(
            "N_1",
            "1",
            "HQ Campus",
            vec![ProductType::Appliance],
            "America/Los_Angeles",
            vec![],
            "",
        );
        assert_eq!(network.notes, None);
        assert_eq!(network.url, "https://example.test/HQ-Campus/manage/clients");
    }

    #[test]
    fn vpn_config_is_permissive() {
        let generator = NetworkGenerator::default();
        let hub = generator.generate_vpn_config(
            "N_1",
            VpnMode::Hub,
            vec![],
            vec![VpnHub {
                hub_id: "N_2".into(),
                use_default_route: false,
            }],
        );
        assert_eq!(hub.local_status_pages, Some(Toggle::ON));
        assert_eq!(hub.hubs.len(), 1);

        let spoke = generator.generate_vpn_config("N_3", VpnMode::Spoke, vec![], vec![]);
        assert!(spoke.hubs.is_empty());
        assert_eq!(spoke.local_status_pages, None);
    }

    #[test]
    fn cellular_pool_derives_subnet() {
        let generator = NetworkGenerator::default();
        let pool = generator.generate_cellular_subnet_pool("N_1", "10.200.0.0", 16);
        assert_eq!(pool.cidr, "10.200.0.0/16");
        assert_eq!(pool.subnets[0].subnet, "10.200.1.0/24");
        assert_eq!(pool.subnets[0].appliance_ip, "10.200.1.1");
    }
}
