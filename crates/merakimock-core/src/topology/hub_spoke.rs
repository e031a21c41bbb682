// ── Hub-spoke topology ──
//
// Acme Corporation: an HQ campus acting as the single VPN hub and twenty
// branch and remote sites tunnelling back to it.

use super::builder::{SiteSpec, TopologyBuilder, hub};
use crate::generate::catalog::location_at;
use crate::generate::{DeviceGroup, DevicePlan, SingleDevice, VlanType};
use crate::model::{Topology, VpnMode};
use crate::rng::GenerationRng;

pub const DESCRIPTION: &str =
    "Enterprise hub-spoke VPN topology with HQ campus and 20 branch offices";

const ORG_ID: &str = "883652";
const HQ_NETWORK_ID: &str = "N_HQ001";

/// One spoke site.
struct Branch {
    name: &'static str,
    appliance: &'static str,
    switches: &'static [(&'static str, u32)],
    aps: &'static [(&'static str, u32)],
    cellular: Option<&'static str>,
    cameras: &'static [(&'static str, u32)],
    sensors: &'static [(&'static str, u32)],
    clients: u32,
    required_clients: &'static [&'static str],
}

const fn branch(
    name: &'static str,
    appliance: &'static str,
    switches: &'static [(&'static str, u32)],
    aps: &'static [(&'static str, u32)],
    clients: u32,
) -> Branch {
    Branch {
        name,
        appliance,
        switches,
        aps,
        cellular: None,
        cameras: &[],
        sensors: &[],
        clients,
        required_clients: &[],
    }
}

impl Branch {
    const fn cameras(mut self, cameras: &'static [(&'static str, u32)]) -> Self {
        self.cameras = cameras;
        self
    }

    const fn sensors(mut self, sensors: &'static [(&'static str, u32)]) -> Self {
        self.sensors = sensors;
        self
    }

    const fn cellular(mut self, model: &'static str) -> Self {
        self.cellular = Some(model);
        self
    }

    const fn requires(mut self, required: &'static [&'static str]) -> Self {
        self.required_clients = required;
        self
    }

    fn plan(&self) -> DevicePlan {
        let groups = |list: &[(&str, u32)], suffix: &str, tags: &[&str]| {
            list.iter()
                .map(|&(model, count)| {
                    DeviceGroup::new(model, count)
                        .prefixed(format!("{}-{suffix}", self.name))
                        .tagged(tags)
                })
                .collect::<Vec<_>>()
        };
        DevicePlan {
            appliances: vec![
                SingleDevice::new(self.appliance)
                    .named(format!("{}-MX", self.name))
                    .tagged(&["spoke", "security-appliance"]),
            ],
            switches: groups(self.switches, "SW", &["switch", "network-infrastructure"]),
            wireless: groups(self.aps, "AP", &["wireless-ap", "network-infrastructure"]),
            cellular: self
                .cellular
                .map(|model| {
                    SingleDevice::new(model)
                        .named(format!("{}-MG", self.name))
                        .tagged(&["cellular-gateway", "wan-backup"])
                })
                .into_iter()
                .collect(),
            cameras: groups(self.cameras, "CAM", &["camera", "security"]),
            sensors: groups(self.sensors, "SENSOR", &["sensor", "iot"]),
        }
    }

    fn vlan_types(&self) -> &'static [VlanType] {
        if self.clients > 20 {
            &[VlanType::Corporate, VlanType::Guest, VlanType::Voice]
        } else {
            &[VlanType::Corporate, VlanType::Guest]
        }
    }
}

static BRANCHES: [Branch; 20] = [
    // Large branches with conference-room TVs, printers and cameras
    branch("Branch-NYC", "MX85", &[("MS250-48", 2)], &[("MR56", 8)], 60)
        .cameras(&[("MV33", 4), ("MV63", 2)])
        .requires(&["Samsung TV", "Samsung TV", "LG TV", "HP Printer", "HP Printer", "Canon"]),
    branch("Branch-Chicago", "MX85", &[("MS250-48", 2)], &[("MR56", 6)], 55)
        .cameras(&[("MV23", 3), ("MV63X", 2)])
        .requires(&["Samsung TV", "LG TV", "HP Printer", "HP Printer", "Epson"]),
    branch("Branch-LA", "MX75", &[("MS225-48", 2)], &[("MR46", 6)], 50)
        .cameras(&[("MV13", 4)])
        .requires(&["Samsung TV", "LG TV", "HP Printer", "Canon"]),
    branch("Branch-Seattle", "MX75", &[("MS225-48", 2)], &[("MR46", 5)], 45)
        .cameras(&[("MV23X", 3)])
        .requires(&["Samsung TV", "HP Printer", "Epson"]),
    branch("Branch-Austin", "MX75", &[("MS225-48", 1)], &[("MR46", 5)], 40)
        .cameras(&[("MV13M", 2)])
        .requires(&["LG TV", "HP Printer"]),
    // Medium branches
    branch("Branch-Denver", "MX68", &[("MS225-48", 1)], &[("MR46", 4)], 35)
        .cameras(&[("MV13", 2)])
        .requires(&["HP Printer", "Canon"]),
    branch("Branch-Boston-Medical", "MX68", &[("MS225-48", 1)], &[("MR46", 4)], 40)
        .cameras(&[("MV33M", 2)])
        .requires(&[
            "GE Healthcare",
            "GE Healthcare",
            "Philips Medical",
            "Philips Medical",
            "HP Printer",
            "Epson",
        ]),
    branch("Branch-Atlanta", "MX68", &[("MS120-24", 1)], &[("MR36", 3)], 30).requires(&["HP Printer"]),
    branch("Branch-Miami", "MX68", &[("MS120-24", 1)], &[("MR36", 3)], 30)
        .requires(&["HP Printer", "Samsung TV"]),
    branch("Branch-Dallas", "MX68W", &[("MS120-24", 1)], &[("MR36", 3)], 30)
        .sensors(&[("MT10", 2)])
        .requires(&["HP Printer"]),
    // Small branches, wireless only
    branch("Branch-Phoenix", "MX68W", &[], &[("MR33", 2)], 20),
    branch("Branch-Portland", "MX68W", &[], &[("MR33", 2)], 20),
    branch("Branch-Minneapolis", "MX67", &[], &[("MR33", 2)], 18),
    branch("Branch-Detroit", "MX67", &[], &[("MR33", 2)], 18),
    branch("Branch-Philly", "MX67", &[], &[("MR33", 2)], 18),
    // Remote sites on cellular backhaul
    branch("Remote-SanDiego", "MX67C", &[], &[("MR30H", 1)], 10).cellular("MG41"),
    branch("Remote-Houston", "MX67C", &[], &[("MR30H", 1)], 10).cellular("MG41"),
    branch("Remote-Charlotte", "MX67C", &[], &[("MR30H", 1)], 8).cellular("MG41"),
    branch("Remote-SaltLake", "MX67C", &[], &[], 5).cellular("MG41"),
    branch("Remote-Warehouse", "MX67C", &[], &[], 3)
        .cellular("MG21")
        .cameras(&[("MV72", 6), ("MV63", 4)])
        .sensors(&[("MT14", 8), ("MT12", 4)]),
];

const HQ_REQUIRED_CLIENTS: &[&str] = &[
    "Samsung TV",
    "Samsung TV",
    "Samsung TV",
    "LG TV",
    "LG TV",
    "HP Printer",
    "HP Printer",
    "HP Printer",
    "Canon",
    "Epson",
];

fn hq_plan() -> DevicePlan {
    let group = |model: &str, count, prefix: &str, tags: &[&str]| {
        DeviceGroup::new(model, count).prefixed(prefix).tagged(tags)
    };
    DevicePlan {
        appliances: vec![
            SingleDevice::new("MX450")
                .named("HQ-MX-01")
                .tagged(&["hub", "security-appliance", "datacenter"]),
        ],
        switches: vec![
            group("MS425-32", 2, "HQ-CORE-SW", &["switch", "core-layer", "datacenter"]),
            group("MS350-48", 4, "HQ-DIST-SW", &["switch", "distribution-layer"]),
            group("MS225-48", 8, "HQ-ACC-SW", &["switch", "access-layer"]),
        ],
        wireless: vec![group("MR57", 20, "HQ-AP", &["wireless-ap", "indoor", "wifi6e"])],
        cellular: Vec::new(),
        cameras: vec![
            group("MV33", 8, "HQ-CAM-INDOOR", &["camera", "indoor", "4k"]),
            group("MV63", 4, "HQ-CAM-OUTDOOR", &["camera", "outdoor", "4k"]),
            group("MV13", 6, "HQ-CAM-MINI", &["camera", "indoor", "mini-dome"]),
        ],
        sensors: vec![
            group("MT14", 10, "HQ-DOOR", &["sensor", "door"]),
            group("MT10", 8, "HQ-TEMP", &["sensor", "temperature"]),
        ],
    }
}

pub fn generate(rng: GenerationRng, dashboard_url: &str) -> Topology {
    let mut builder = TopologyBuilder::new("hub_spoke", DESCRIPTION, rng, dashboard_url);
    builder.add_organization(ORG_ID, "Acme Corporation", "North America");

    // ── HQ (hub) ──
    let hq = SiteSpec::new(HQ_NETWORK_ID, ORG_ID, "HQ-Campus", location_at(0))
        .tags(&["hub", "headquarters", "campus"])
        .notes("Corporate headquarters - Hub site for all VPN connections")
        .plan(hq_plan())
        .addressing(10, 10)
        .vlans(&[
            VlanType::Corporate,
            VlanType::Guest,
            VlanType::Voice,
            VlanType::Iot,
            VlanType::Management,
            VlanType::Server,
        ])
        .clients(200, HQ_REQUIRED_CLIENTS);
    builder
        .add_site(hq)
        .add_vlan_profile(
            HQ_NETWORK_ID,
            "hq-standard",
            "HQ Standard",
            &["Corporate", "Guest", "Voice"],
        )
        .add_vpn(HQ_NETWORK_ID, VpnMode::Hub, Vec::new());

    // ── Branches (spokes) ──
    for (i, (branch, offset)) in BRANCHES.iter().zip(0_u8..).enumerate() {
        let location = location_at(i + 1);
        let network_id = format!("N_BR{:03}", i + 1);
        let mut site = SiteSpec::new(&network_id, ORG_ID, branch.name, location)
            .tags(&["spoke", "branch"])
            .notes(format!(
                "Branch office in {}, {}",
                location.city, location.state
            ))
            .plan(branch.plan())
            .addressing(20 + offset, 20 + u32::from(offset) * 5)
            .vlans(branch.vlan_types())
            .clients(branch.clients, branch.required_clients);
        if branch.cellular.is_some() {
            site = site.cellular_pool(format!("10.{}.0.0", 200 + u32::from(offset)));
        }
        builder
            .add_site(site)
            .add_vpn(&network_id, VpnMode::Spoke, vec![hub(HQ_NETWORK_ID, true)]);
    }

    builder.finish()
}
