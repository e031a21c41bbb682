// ── VLAN domain types ──

use std::collections::BTreeMap;
use std::net::Ipv4Addr;

use ipnetwork::Ipv4Network;
use serde::{Deserialize, Serialize};

/// How the appliance treats DHCP on a VLAN.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DhcpHandling {
    #[serde(rename = "Run a DHCP server")]
    RunServer,
    #[serde(rename = "Relay DHCP to another server")]
    Relay,
    #[serde(rename = "Do not respond to DHCP requests")]
    DoNotRespond,
}

/// `{ "enabled": bool }`, a shape the API uses all over the place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Toggle {
    pub enabled: bool,
}

impl Toggle {
    pub const ON: Self = Self { enabled: true };
    pub const OFF: Self = Self { enabled: false };
}

/// Appliance VLAN. Identity is `(network_id, id)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vlan {
    pub id: String,
    pub interface_id: String,
    pub network_id: String,
    pub name: String,
    pub appliance_ip: String,
    pub subnet: String,
    pub fixed_ip_assignments: BTreeMap<String, serde_json::Value>,
    pub reserved_ip_ranges: Vec<serde_json::Value>,
    pub dns_nameservers: String,
    pub dhcp_handling: DhcpHandling,
    pub dhcp_lease_time: String,
    pub dhcp_boot_options_enabled: bool,
    pub dhcp_options: Vec<serde_json::Value>,
    pub vpn_nat_subnet: String,
    pub mandatory_dhcp: Toggle,
    pub ipv6: Toggle,
    pub dhcp_boot_filename: Option<String>,
    pub dhcp_boot_next_server: Option<String>,
    pub dhcp_relay_server_ips: Vec<String>,
    pub group_policy_id: Option<String>,
    pub template_vlan_type: String,
    pub cidr: String,
    pub mask: u8,
}

impl Vlan {
    /// First three dotted components of the subnet (`192.168.10`).
    pub fn base_address(&self) -> &str {
        subnet_base(&self.subnet)
    }

    /// DHCP pool handed out by the appliance: `.100` through `.250`.
    pub fn dhcp_pool(&self) -> (String, String) {
        let base = self.base_address();
        (format!("{base}.100"), format!("{base}.250"))
    }

    /// Parsed subnet, `None` when the stored CIDR is malformed.
    pub fn network(&self) -> Option<Ipv4Network> {
        parse_subnet(&self.subnet)
    }

    pub fn contains(&self, ip: Ipv4Addr) -> bool {
        self.network().is_some_and(|net| net.contains(ip))
    }
}

/// Everything before the last `.` of a subnet string, or the whole string.
pub fn subnet_base(subnet: &str) -> &str {
    subnet.rsplit_once('.').map_or(subnet, |(base, _)| base)
}

/// Prefix length of a CIDR string, assuming `/24` when it is missing or garbled.
pub fn subnet_mask(subnet: &str) -> u8 {
    subnet
        .split_once('/')
        .and_then(|(_, mask)| mask.parse().ok())
        .unwrap_or(24)
}

/// Parses a CIDR leniently: a bare address is read as a `/24`.
pub fn parse_subnet(subnet: &str) -> Option<Ipv4Network> {
    let address = subnet.split_once('/').map_or(subnet, |(addr, _)| addr);
    let ip: Ipv4Addr = address.parse().ok()?;
    Ipv4Network::new(ip, subnet_mask(subnet)).ok()
}

/// VLAN profile entry pointing at a VLAN by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VlanNameEntry {
    pub name: String,
    pub adaptive_policy_group: Option<String>,
}

/// Named VLAN profile. Identity is `(network_id, iname)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VlanProfile {
    pub network_id: String,
    pub iname: String,
    pub name: String,
    pub is_default: bool,
    pub vlan_names: Vec<VlanNameEntry>,
    pub vlan_groups: Vec<serde_json::Value>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn mask_defaults_to_24() {
        assert_eq!(subnet_mask("192.168.10.0/25"), 25);
        assert_eq!(subnet_mask("192.168.10.0"), 24);
        assert_eq!(subnet_mask("192.168.10.0/xx"), 24);
    }

    #[test]
    fn bare_address_parses_as_slash_24() {
        let net = parse_subnet("10.1.2.0").unwrap();
        assert_eq!(net.prefix(), 24);
        assert!(net.contains("10.1.2.200".parse().unwrap()));
    }

    #[test]
    fn subnet_base_strips_last_octet() {
        assert_eq!(subnet_base("192.168.100.0/24"), "192.168.100");
        assert_eq!(subnet_base("nonsense"), "nonsense");
    }

    #[test]
    fn dhcp_handling_wire_strings() {
        assert_eq!(
            serde_json::to_string(&DhcpHandling::DoNotRespond).unwrap(),
            "\"Do not respond to DHCP requests\""
        );
    }
}
