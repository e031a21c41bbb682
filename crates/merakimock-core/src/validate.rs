// ── Topology validation ──
//
// Checks a generated topology for the required top-level lists, required
// entity fields and every cross-entity invariant. All issues are collected;
// nothing here stops at the first one.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::net::Ipv4Addr;

use ipnetwork::Ipv4Network;
use serde::Serialize;
use tracing::warn;

use crate::generate::client_catalog::BARE_PREDICTIONS;
use crate::model::{ConnectionType, ProductType, Topology, TopologyStats, VpnMode};
use crate::topology::{GenerationOptions, TopologyKind};

/// One violated rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    pub topology: String,
    /// Entity family the issue was found on (`device`, `client`, ...).
    pub entity: String,
    /// Identifier of the offending entity; empty for topology-level issues.
    pub id: String,
    pub message: String,
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.id.is_empty() {
            write!(f, "[{}] {}: {}", self.topology, self.entity, self.message)
        } else {
            write!(
                f,
                "[{}] {} {}: {}",
                self.topology, self.entity, self.id, self.message
            )
        }
    }
}

/// Validation outcome of one topology.
#[derive(Debug, Clone, Serialize)]
pub struct TopologyValidation {
    pub topology: String,
    pub stats: TopologyStats,
    pub issues: Vec<ValidationIssue>,
}

/// Aggregated outcome across topologies.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationReport {
    pub topologies: Vec<TopologyValidation>,
}

impl ValidationReport {
    pub fn is_ok(&self) -> bool {
        self.topologies.iter().all(|t| t.issues.is_empty())
    }

    pub fn issue_count(&self) -> usize {
        self.topologies.iter().map(|t| t.issues.len()).sum()
    }

    pub fn issues(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.topologies.iter().flat_map(|t| t.issues.iter())
    }
}

/// Generates every built-in topology and validates each one.
pub fn validate_builtin(options: &GenerationOptions) -> ValidationReport {
    let topologies = TopologyKind::all()
        .map(|kind| {
            let topology = kind.generate(options);
            TopologyValidation {
                topology: topology.topology_name.clone(),
                stats: topology.stats,
                issues: validate_topology(&topology),
            }
        })
        .collect();
    ValidationReport { topologies }
}

/// Every issue found in `topology`.
pub fn validate_topology(topology: &Topology) -> Vec<ValidationIssue> {
    let mut checker = Checker {
        topology,
        issues: Vec::new(),
    };
    checker.required_lists();
    checker.organizations();
    checker.networks();
    checker.devices();
    checker.vlans();
    checker.clients();
    checker.device_clients();
    checker.vpn();
    checker.issues
}

struct Checker<'a> {
    topology: &'a Topology,
    issues: Vec<ValidationIssue>,
}

impl<'a> Checker<'a> {
    fn report(&mut self, entity: &str, id: &str, message: impl Into<String>) {
        self.issues.push(ValidationIssue {
            topology: self.topology.topology_name.clone(),
            entity: entity.to_owned(),
            id: id.to_owned(),
            message: message.into(),
        });
    }

    fn require(&mut self, entity: &str, id: &str, field: &str, value: &str) {
        if value.trim().is_empty() {
            self.report(entity, id, format!("missing required field {field}"));
        }
    }

    // ── Top level ────────────────────────────────────────────────────

    fn required_lists(&mut self) {
        let t = self.topology;
        if t.topology_name.trim().is_empty() {
            self.report("topology", "", "missing required field topology_name");
        }
        let lists = [
            ("organizations", t.organizations.is_empty()),
            ("networks", t.networks.is_empty()),
            ("devices", t.devices.is_empty()),
            ("vlans", t.vlans.is_empty()),
        ];
        for (field, empty) in lists {
            if empty {
                self.report("topology", "", format!("required field {field} is empty"));
            }
        }
        if t.stats != t.compute_stats() {
            self.report("topology", "", "stats do not match entity counts");
        }
    }

    // ── Organizations and networks ───────────────────────────────────

    fn organizations(&mut self) {
        let mut seen = HashSet::new();
        for org in &self.topology.organizations {
            self.require("organization", &org.id, "id", &org.id);
            self.require("organization", &org.id, "name", &org.name);
            if !seen.insert(org.id.as_str()) {
                self.report("organization", &org.id, "duplicate organization id");
            }
        }
    }

    fn networks(&mut self) {
        let t = self.topology;
        let mut seen = HashSet::new();
        for network in &t.networks {
            self.require("network", &network.id, "id", &network.id);
            self.require("network", &network.id, "name", &network.name);
            if !seen.insert(network.id.as_str()) {
                self.report("network", &network.id, "duplicate network id");
            }
            if !t
                .organizations
                .iter()
                .any(|o| o.id == network.organization_id)
            {
                self.report(
                    "network",
                    &network.id,
                    format!("unknown organization {}", network.organization_id),
                );
            }
            if !network.has_product(ProductType::Appliance) {
                self.report("network", &network.id, "productTypes lacks appliance");
            }
        }
    }

    // ── Devices ──────────────────────────────────────────────────────

    fn devices(&mut self) {
        let t = self.topology;
        let mut serials = HashSet::new();
        let mut lan_ips: HashMap<(&str, &str), &str> = HashMap::new();

        for device in &t.devices {
            let serial = device.serial.as_str();
            self.require("device", serial, "serial", serial);
            self.require("device", serial, "name", &device.name);
            self.require("device", serial, "model", &device.model);
            if !serials.insert(serial) {
                self.report("device", serial, "duplicate serial");
            }
            match t.network(&device.network_id) {
                None => self.report(
                    "device",
                    serial,
                    format!("unknown network {}", device.network_id),
                ),
                Some(network) if network.organization_id != device.organization_id => self.report(
                    "device",
                    serial,
                    format!(
                        "organization {} differs from network organization {}",
                        device.organization_id, network.organization_id
                    ),
                ),
                Some(network) if !network.has_product(device.product_type) => self.report(
                    "device",
                    serial,
                    format!("network {} does not list {}", network.id, device.product_type),
                ),
                Some(_) => {}
            }
            if let Some(other) = lan_ips.insert((&device.network_id, &device.lan_ip), serial) {
                self.report(
                    "device",
                    serial,
                    format!("LAN IP {} already used by {other}", device.lan_ip),
                );
            }
        }

        for availability in &t.device_availabilities {
            if !serials.contains(availability.serial.as_str()) {
                self.report("device_availability", &availability.serial, "unknown device");
            }
        }
        for status in &t.device_statuses {
            if !serials.contains(status.serial.as_str()) {
                self.report("device_status", &status.serial, "unknown device");
            }
        }
    }

    // ── VLANs ────────────────────────────────────────────────────────

    fn vlans(&mut self) {
        let t = self.topology;
        let mut ids = HashSet::new();
        let mut blocks: Vec<(&str, &str, Ipv4Network)> = Vec::new();

        for vlan in &t.vlans {
            let key = format!("{}#{}", vlan.network_id, vlan.id);
            self.require("vlan", &key, "id", &vlan.id);
            self.require("vlan", &key, "name", &vlan.name);
            self.require("vlan", &key, "subnet", &vlan.subnet);
            if !ids.insert((vlan.network_id.as_str(), vlan.id.as_str())) {
                self.report("vlan", &key, "duplicate VLAN id in network");
            }
            if t.network(&vlan.network_id).is_none() {
                self.report("vlan", &key, format!("unknown network {}", vlan.network_id));
            }
            let Some(block) = vlan.network() else {
                self.report("vlan", &key, format!("unparseable subnet {}", vlan.subnet));
                continue;
            };
            if let Ok(appliance_ip) = vlan.appliance_ip.parse::<Ipv4Addr>() {
                if !block.contains(appliance_ip) {
                    self.report("vlan", &key, "applianceIp outside subnet");
                }
            }
            blocks.push((&vlan.network_id, &vlan.id, block));
        }

        for (i, &(network_a, vlan_a, a)) in blocks.iter().enumerate() {
            for &(network_b, vlan_b, b) in &blocks[i + 1..] {
                if network_a != network_b && (a.contains(b.network()) || b.contains(a.network())) {
                    self.report(
                        "vlan",
                        &format!("{network_a}#{vlan_a}"),
                        format!("subnet {a} overlaps {network_b}#{vlan_b} ({b})"),
                    );
                }
            }
        }
    }

    // ── Clients ──────────────────────────────────────────────────────

    fn clients(&mut self) {
        let t = self.topology;
        let mut ids = HashSet::new();

        for client in &t.network_clients {
            let id = client.id.as_str();
            self.require("client", id, "id", id);
            self.require("client", id, "mac", client.mac.as_str());
            if !ids.insert(id) {
                self.report("client", id, "duplicate client id");
            }
            if t.network(&client.network_id).is_none() {
                self.report("client", id, format!("unknown network {}", client.network_id));
                continue;
            }

            match t
                .vlans_for(&client.network_id)
                .find(|v| v.id == client.vlan)
            {
                None => self.report(
                    "client",
                    id,
                    format!("VLAN {} not in network {}", client.vlan, client.network_id),
                ),
                Some(vlan) => {
                    let inside = client
                        .ip
                        .parse::<Ipv4Addr>()
                        .is_ok_and(|ip| vlan.contains(ip));
                    if !inside {
                        self.report(
                            "client",
                            id,
                            format!("ip {} outside VLAN subnet {}", client.ip, vlan.subnet),
                        );
                    }
                }
            }

            if client.switchport.is_some() && client.ssid.is_some() {
                self.report("client", id, "both switchport and ssid are set");
            }

            let Some(serial) = client.recent_device_serial.as_deref() else {
                continue;
            };
            let Some(device) = t.device(serial) else {
                self.report("client", id, format!("unknown device {serial}"));
                continue;
            };
            if device.network_id != client.network_id {
                self.report(
                    "client",
                    id,
                    format!("device {serial} belongs to another network"),
                );
            }
            let expected = match client.recent_device_connection {
                ConnectionType::Wired => ProductType::Switch,
                ConnectionType::Wireless => ProductType::Wireless,
            };
            if device.product_type != expected {
                self.report(
                    "client",
                    id,
                    format!(
                        "{} client attached to {} {serial}",
                        client.recent_device_connection, device.product_type
                    ),
                );
            }
            let has_fields = match client.recent_device_connection {
                ConnectionType::Wired => client.switchport.is_some(),
                ConnectionType::Wireless => client.ssid.is_some(),
            };
            if !has_fields {
                self.report("client", id, "connection fields missing");
            }

            check_prediction(&client.device_type_prediction);
        }
    }

    fn device_clients(&mut self) {
        let t = self.topology;
        let by_id: HashMap<&str, _> = t
            .network_clients
            .iter()
            .map(|c| (c.id.as_str(), c))
            .collect();

        for (serial, list) in &t.device_clients {
            if t.device(serial).is_none() {
                self.report("device_client", serial, "unknown device");
            }
            for dc in list {
                match by_id.get(dc.id.as_str()) {
                    None => self.report("device_client", &dc.id, "no matching network client"),
                    Some(nc) if nc.recent_device_serial.as_deref() != Some(serial.as_str()) => {
                        self.report(
                            "device_client",
                            &dc.id,
                            format!("listed under {serial} but attached elsewhere"),
                        );
                    }
                    Some(_) => {}
                }
            }
        }
    }

    // ── VPN ──────────────────────────────────────────────────────────

    fn vpn(&mut self) {
        let t = self.topology;
        for config in &t.vpn_configs {
            let network_id = config.network_id.as_str();
            let Some(network) = t.network(network_id) else {
                self.report("vpn_config", network_id, "unknown network");
                continue;
            };
            if config.mode != VpnMode::Spoke {
                continue;
            }
            if config.hubs.is_empty() {
                self.report("vpn_config", network_id, "spoke without hubs");
            }
            for hub_id in config.hub_ids() {
                match (t.network(hub_id), t.vpn_config(hub_id)) {
                    (Some(hub), Some(hub_config)) if hub_config.mode == VpnMode::Hub => {
                        if hub.organization_id != network.organization_id {
                            self.report(
                                "vpn_config",
                                network_id,
                                format!(
                                    "hub {hub_id} belongs to organization {}",
                                    hub.organization_id
                                ),
                            );
                        }
                    }
                    _ => self.report(
                        "vpn_config",
                        network_id,
                        format!("hub {hub_id} is not a hub network in this topology"),
                    ),
                }
            }
        }
    }
}

/// Predictions usually read `"<model>, <os>"`; a handful of device types
/// legitimately report a bare label.
fn check_prediction(prediction: &str) {
    if !prediction.contains(',') && !BARE_PREDICTIONS.contains(&prediction) {
        warn!(prediction, "device type prediction without OS suffix");
    }
}
