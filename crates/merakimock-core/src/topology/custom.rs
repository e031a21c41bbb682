// ── Custom topologies ──
//
// A declarative document (TOML, YAML or JSON) describing organizations and
// their networks. Address blocks are allocated in document order so the
// result satisfies the same invariants as the built-in topologies.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use super::GenerationOptions;
use super::builder::{SiteSpec, TopologyBuilder, hub};
use crate::error::CoreError;
use crate::generate::catalog::{self, Location, location_at};
use crate::generate::{DevicePlan, MAX_DEVICES_PER_NETWORK, SiteKind, VlanType};
use crate::model::{Topology, VpnMode};
use crate::rng::GenerationRng;

const FIRST_NETWORK_OCTET: usize = 10;
const FIRST_VLAN_OCTET: usize = 10;
const FIRST_CELLULAR_OCTET: usize = 200;

/// Serialization format of a custom topology document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum DocumentFormat {
    Toml,
    #[strum(to_string = "yaml", serialize = "yml")]
    Yaml,
    Json,
}

impl DocumentFormat {
    /// Guesses the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()?.to_str()?.parse().ok()
    }
}

/// VPN role of a custom network.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VpnRole {
    Hub,
    Spoke,
    #[default]
    None,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CustomTopology {
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Used when the caller does not pass a seed; entropy when neither does.
    #[serde(default)]
    pub seed: Option<u64>,
    pub organizations: Vec<CustomOrganization>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CustomOrganization {
    pub id: String,
    pub name: String,
    #[serde(default = "default_region")]
    pub region: String,
    #[serde(default)]
    pub networks: Vec<CustomNetwork>,
}

fn default_region() -> String {
    "North America".to_owned()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CustomNetwork {
    /// Defaults to `N_{org}_{nnn}`, numbered across the document.
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub city: Option<String>,
    /// Template supplying devices, VLANs and client count.
    #[serde(default)]
    pub kind: Option<SiteKind>,
    /// Explicit devices; wins over `kind`.
    #[serde(default)]
    pub devices: Option<DevicePlan>,
    /// VLAN type names; unknown names become corporate.
    #[serde(default)]
    pub vlans: Option<Vec<String>>,
    #[serde(default)]
    pub clients: Option<u32>,
    #[serde(default)]
    pub required_clients: Vec<String>,
    #[serde(default)]
    pub vpn: VpnRole,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// A network with every default resolved.
struct ResolvedSite {
    organization_id: String,
    role: VpnRole,
    spec: SiteSpec,
}

impl CustomTopology {
    pub fn parse(text: &str, format: DocumentFormat) -> Result<Self, CoreError> {
        let parsed = match format {
            DocumentFormat::Toml => toml::from_str(text).map_err(|e| e.to_string()),
            DocumentFormat::Yaml => serde_yaml::from_str(text).map_err(|e| e.to_string()),
            DocumentFormat::Json => serde_json::from_str(text).map_err(|e| e.to_string()),
        };
        parsed.map_err(|message| CoreError::Parse {
            format: format.to_string(),
            message,
        })
    }

    /// Resolves and checks the document, then assembles it.
    pub fn generate(&self, options: &GenerationOptions) -> Result<Topology, CoreError> {
        let sites = self.resolve()?;
        let rng = GenerationRng::new(options.seed.or(self.seed))
            .with_reference_time(options.reference_time);
        let description = if self.description.is_empty() {
            format!("Custom topology {}", self.name)
        } else {
            self.description.clone()
        };
        let mut builder =
            TopologyBuilder::new(&self.name, description, rng, &options.dashboard_url);

        for org in &self.organizations {
            builder.add_organization(&org.id, &org.name, &org.region);
            let org_sites: Vec<&ResolvedSite> = sites
                .iter()
                .filter(|s| s.organization_id == org.id)
                .collect();
            for site in &org_sites {
                builder.add_site(site.spec.clone());
            }

            // Spokes peer with every hub of their own organization.
            let hubs: Vec<&str> = org_sites
                .iter()
                .filter(|s| s.role == VpnRole::Hub)
                .map(|s| s.spec.network_id.as_str())
                .collect();
            let single_hub = hubs.len() == 1;
            for site in &org_sites {
                let network_id = &site.spec.network_id;
                match site.role {
                    VpnRole::Hub => {
                        builder.add_vpn(network_id, VpnMode::Hub, Vec::new());
                    }
                    VpnRole::Spoke => {
                        let refs = hubs.iter().map(|h| hub(h, single_hub)).collect();
                        builder.add_vpn(network_id, VpnMode::Spoke, refs);
                    }
                    VpnRole::None => {}
                }
            }
        }

        Ok(builder.finish())
    }

    fn resolve(&self) -> Result<Vec<ResolvedSite>, CoreError> {
        if self.name.trim().is_empty() {
            return Err(invalid("topology name is empty"));
        }
        if self.organizations.is_empty() {
            return Err(invalid("at least one organization is required"));
        }

        let mut org_ids = HashSet::new();
        let mut network_ids = HashSet::new();
        let mut sites = Vec::new();
        let mut vlan_octet = FIRST_VLAN_OCTET;

        for org in &self.organizations {
            if !org_ids.insert(org.id.as_str()) {
                return Err(invalid(format!("duplicate organization id {}", org.id)));
            }
            for network in &org.networks {
                let ordinal = sites.len();
                let id = network
                    .id
                    .clone()
                    .unwrap_or_else(|| format!("N_{}_{:03}", org.id, ordinal + 1));
                if !network_ids.insert(id.clone()) {
                    return Err(invalid(format!("duplicate network id {id}")));
                }

                let plan = match (&network.devices, network.kind) {
                    (Some(plan), _) => plan.clone(),
                    (None, Some(kind)) => kind.plan(&network.name),
                    (None, None) => {
                        return Err(invalid(format!(
                            "network {} needs either a kind or a device list",
                            network.name
                        )));
                    }
                };
                if plan.appliances.is_empty() {
                    return Err(invalid(format!(
                        "network {} has no security appliance",
                        network.name
                    )));
                }
                if plan.device_count() > MAX_DEVICES_PER_NETWORK {
                    return Err(invalid(format!(
                        "network {} plans {} devices, at most {MAX_DEVICES_PER_NETWORK} fit its LAN block",
                        network.name,
                        plan.device_count()
                    )));
                }

                let vlan_types = network.vlan_types();
                if vlan_types.is_empty() {
                    return Err(invalid(format!("network {} has no VLANs", network.name)));
                }
                let vlan_base = octet(vlan_octet, "VLAN", &id)?;
                vlan_octet += vlan_types.len();
                octet(vlan_octet.saturating_sub(1), "VLAN", &id)?;
                let network_octet = octet(FIRST_NETWORK_OCTET + ordinal, "device LAN", &id)?;

                let location = network.location(ordinal)?;
                let notes = network.notes.clone().unwrap_or_else(|| {
                    format!("{} in {}, {}", network.name, location.city, location.state)
                });
                let mut spec = SiteSpec::new(&id, &org.id, &network.name, location)
                    .notes(notes)
                    .addressing(network_octet, u32::from(vlan_base))
                    .vlans(&vlan_types)
                    .plan(plan);
                spec.tags.clone_from(&network.tags);
                spec.client_count = network
                    .clients
                    .or_else(|| network.kind.map(SiteKind::client_count))
                    .unwrap_or(0);
                spec.required_clients.clone_from(&network.required_clients);
                if spec.plan.has_cellular() {
                    let pool = octet(FIRST_CELLULAR_OCTET + ordinal, "cellular pool", &id)?;
                    spec = spec.cellular_pool(format!("10.{pool}.0.0"));
                }

                sites.push(ResolvedSite {
                    organization_id: org.id.clone(),
                    role: network.vpn,
                    spec,
                });
            }

            let has_hub = sites
                .iter()
                .any(|s| s.organization_id == org.id && s.role == VpnRole::Hub);
            let orphan = sites
                .iter()
                .find(|s| s.organization_id == org.id && s.role == VpnRole::Spoke && !has_hub);
            if let Some(site) = orphan {
                return Err(invalid(format!(
                    "spoke {} has no hub in organization {}",
                    site.spec.network_id, org.id
                )));
            }
        }

        Ok(sites)
    }
}

impl CustomNetwork {
    /// Explicit list, else the kind's set, else corporate and guest. Duplicates dropped.
    fn vlan_types(&self) -> Vec<VlanType> {
        let requested = match (&self.vlans, self.kind) {
            (Some(names), _) => names.iter().map(|n| VlanType::parse_lenient(n)).collect(),
            (None, Some(kind)) => kind.vlan_types(),
            (None, None) => vec![VlanType::Corporate, VlanType::Guest],
        };
        let mut seen = HashSet::new();
        requested.into_iter().filter(|t| seen.insert(*t)).collect()
    }

    fn location(&self, ordinal: usize) -> Result<&'static Location, CoreError> {
        match &self.city {
            Some(city) => catalog::find_location(city)
                .ok_or_else(|| invalid(format!("unknown city {city} for network {}", self.name))),
            None => Ok(location_at(ordinal)),
        }
    }
}

fn invalid(message: impl Into<String>) -> CoreError {
    CoreError::InvalidTopology {
        message: message.into(),
    }
}

/// Fails once the document has more networks than an address octet can hold.
fn octet(value: usize, what: &str, network_id: &str) -> Result<u8, CoreError> {
    u8::try_from(value).map_err(|_| {
        invalid(format!(
            "{what} addresses exhausted at network {network_id}"
        ))
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::generate::{DeviceGroup, SingleDevice};

    const LAB: &str = r#"
name = "lab"
seed = 7

[[organizations]]
id = "500001"
name = "Lab Org"

[[organizations.networks]]
name = "Lab-HQ"
city = "Denver"
kind = "headquarters"
vpn = "hub"
required_clients = ["HP Printer"]

[[organizations.networks]]
name = "Lab-Edge"
vpn = "spoke"
vlans = ["corporate", "iot", "bogus", "iot"]
clients = 12

[organizations.networks.devices]
appliances = [{ model = "MX67C" }]
wireless = [{ model = "MR30H", count = 2, name_prefix = "EDGE-AP" }]
cellular = [{ model = "MG41" }]
"#;

    fn lab() -> CustomTopology {
        CustomTopology::parse(LAB, DocumentFormat::Toml).unwrap()
    }

    #[test]
    fn format_from_extension() {
        assert_eq!(
            DocumentFormat::from_path(Path::new("site.yml")),
            Some(DocumentFormat::Yaml)
        );
        assert_eq!(
            DocumentFormat::from_path(Path::new("site.JSON")),
            Some(DocumentFormat::Json)
        );
        assert_eq!(DocumentFormat::from_path(Path::new("site.txt")), None);
    }

    #[test]
    fn toml_document_generates() {
        let topology = lab().generate(&GenerationOptions::default()).unwrap();
        assert_eq!(topology.topology_name, "lab");
        assert_eq!(topology.networks[0].id, "N_500001_001");
        assert_eq!(topology.networks[0].time_zone, "America/Denver");

        let edge_vlans: Vec<_> = topology.vlans_for("N_500001_002").map(|v| v.name.as_str()).collect();
        assert_eq!(edge_vlans, vec!["Corporate", "IoT"]);
        assert_eq!(topology.clients_for("N_500001_002").count(), 12);
        assert_eq!(topology.clients_for("N_500001_001").count(), 150);
        assert_eq!(topology.cellular_subnet_pools[0].cidr, "10.201.0.0/16");

        let spoke = topology.vpn_config("N_500001_002").unwrap();
        assert_eq!(spoke.hub_ids().collect::<Vec<_>>(), vec!["N_500001_001"]);
        assert!(spoke.hubs[0].use_default_route);
    }

    #[test]
    fn document_seed_is_deterministic() {
        let options = GenerationOptions::default();
        let a = lab().generate(&options).unwrap();
        let b = lab().generate(&options).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn json_and_yaml_parse() {
        let json = r#"{"name":"j","organizations":[{"id":"1","name":"One","networks":[{"name":"A","kind":"retail"}]}]}"#;
        let parsed = CustomTopology::parse(json, DocumentFormat::Json).unwrap();
        assert_eq!(parsed.organizations[0].region, "North America");

        let yaml = "name: y\norganizations:\n  - id: '2'\n    name: Two\n    networks:\n      - name: B\n        kind: branch\n";
        let parsed = CustomTopology::parse(yaml, DocumentFormat::Yaml).unwrap();
        assert_eq!(parsed.organizations[0].networks[0].kind, Some(SiteKind::Branch));
    }

    #[test]
    fn malformed_document_reports_format() {
        let err = CustomTopology::parse("name = ", DocumentFormat::Toml).unwrap_err();
        assert!(matches!(err, CoreError::Parse { format, .. } if format == "toml"));
    }

    #[test]
    fn spoke_without_hub_is_rejected() {
        let mut doc = lab();
        doc.organizations[0].networks[0].vpn = VpnRole::None;
        let err = doc.generate(&GenerationOptions::default()).unwrap_err();
        assert!(err.to_string().contains("has no hub"));
    }

    #[test]
    fn network_without_devices_is_rejected() {
        let mut doc = lab();
        doc.organizations[0].networks[0].kind = None;
        let err = doc.generate(&GenerationOptions::default()).unwrap_err();
        assert!(matches!(err, CoreError::InvalidTopology { .. }));
    }

    #[test]
    fn network_without_vlans_is_rejected() {
        let mut doc = lab();
        let network = &mut doc.organizations[0].networks[0];
        network.vlans = Some(Vec::new());
        network.clients = Some(5);
        let err = doc.generate(&GenerationOptions::default()).unwrap_err();
        assert!(matches!(err, CoreError::InvalidTopology { ref message } if message.contains("no VLANs")));
    }

    #[test]
    fn oversized_device_plan_is_rejected() {
        let mut doc = lab();
        let network = &mut doc.organizations[0].networks[0];
        let mut plan = DevicePlan::default();
        plan.appliances.push(SingleDevice::new("MX68"));
        plan.sensors.push(DeviceGroup::new("MT10", 65_024));
        network.devices = Some(plan);
        let err = doc.generate(&GenerationOptions::default()).unwrap_err();
        assert!(matches!(err, CoreError::InvalidTopology { ref message } if message.contains("65025 devices")));
    }

    #[test]
    fn unknown_city_is_rejected() {
        let mut doc = lab();
        doc.organizations[0].networks[0].city = Some("Atlantis".into());
        let err = doc.generate(&GenerationOptions::default()).unwrap_err();
        assert!(err.to_string().contains("Atlantis"));
    }
}
