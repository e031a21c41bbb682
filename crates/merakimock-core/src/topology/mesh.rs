// ── Mesh topology ──
//
// Global DataCorp: eight data centres in three tiers. Primary sites are
// hubs; every other site is a spoke of all primaries at once.

use strum::{Display, IntoStaticStr};

use super::builder::{SiteSpec, TopologyBuilder, hub};
use crate::generate::catalog::location_at;
use crate::generate::{DeviceGroup, DevicePlan, SingleDevice, VlanType};
use crate::model::{Topology, VpnMode};
use crate::rng::GenerationRng;

pub const DESCRIPTION: &str =
    "Regional data center mesh VPN topology with primary/secondary/edge tiers";

const ORG_ID: &str = "994763";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
enum Tier {
    Primary,
    Secondary,
    Edge,
}

/// Device and client counts per tier.
struct TierSizing {
    appliances: u32,
    core_switches: u32,
    distribution_switches: u32,
    access_switches: u32,
    access_points: u32,
    gateways: u32,
    clients: u32,
}

impl Tier {
    fn sizing(self) -> TierSizing {
        match self {
            Self::Primary => TierSizing {
                appliances: 2,
                core_switches: 4,
                distribution_switches: 8,
                access_switches: 16,
                access_points: 30,
                gateways: 2,
                clients: 300,
            },
            Self::Secondary => TierSizing {
                appliances: 2,
                core_switches: 2,
                distribution_switches: 4,
                access_switches: 8,
                access_points: 15,
                gateways: 1,
                clients: 180,
            },
            Self::Edge => TierSizing {
                appliances: 1,
                core_switches: 1,
                distribution_switches: 2,
                access_switches: 4,
                access_points: 8,
                gateways: 1,
                clients: 100,
            },
        }
    }

    fn title(self) -> &'static str {
        match self {
            Self::Primary => "Primary",
            Self::Secondary => "Secondary",
            Self::Edge => "Edge",
        }
    }
}

const DATA_CENTERS: [(&str, usize, Tier); 8] = [
    ("DC-Primary-East", 1, Tier::Primary),
    ("DC-Primary-West", 0, Tier::Primary),
    ("DC-Secondary-Central", 2, Tier::Secondary),
    ("DC-Secondary-South", 5, Tier::Secondary),
    ("DC-Edge-Northwest", 4, Tier::Edge),
    ("DC-Edge-Southwest", 3, Tier::Edge),
    ("DC-Edge-Northeast", 7, Tier::Edge),
    ("DC-Edge-Southeast", 9, Tier::Edge),
];

const DC_VLANS: [VlanType; 6] = [
    VlanType::Corporate,
    VlanType::Server,
    VlanType::Management,
    VlanType::Voice,
    VlanType::Iot,
    VlanType::Guest,
];

fn dc_plan(name: &str, sizing: &TierSizing) -> DevicePlan {
    let numbered = |model: &str, suffix: &str, count: u32| {
        (1..=count)
            .map(|j| SingleDevice::new(model).named(format!("{name}-{suffix}-{j:02}")))
            .collect::<Vec<_>>()
    };
    let group = |model: &str, count, suffix: &str, tag: &str| {
        DeviceGroup::new(model, count)
            .prefixed(format!("{name}-{suffix}"))
            .tagged(&[tag])
    };
    DevicePlan {
        appliances: numbered("MX450", "MX", sizing.appliances),
        switches: vec![
            group("MS425-32", sizing.core_switches, "CORE", "core"),
            group("MS350-48", sizing.distribution_switches, "DIST", "distribution"),
            group("MS250-48", sizing.access_switches, "ACC", "access"),
        ],
        wireless: vec![group("MR57", sizing.access_points, "AP", "datacenter")],
        cellular: numbered("MG41", "MG", sizing.gateways),
        ..DevicePlan::default()
    }
}

fn network_id(index: usize) -> String {
    format!("N_DC{:03}", index + 1)
}

pub fn generate(rng: GenerationRng, dashboard_url: &str) -> Topology {
    let mut builder = TopologyBuilder::new("mesh", DESCRIPTION, rng, dashboard_url);
    builder.add_organization(ORG_ID, "Global DataCorp", "North America");

    for (i, &(name, location_idx, tier)) in DATA_CENTERS.iter().enumerate() {
        let location = location_at(location_idx);
        let sizing = tier.sizing();
        let tier_name: &'static str = tier.into();
        let offset = u8::try_from(i).unwrap_or(u8::MAX);
        let id = network_id(i);

        let site = SiteSpec::new(&id, ORG_ID, name, location)
            .tags(&["datacenter", tier_name, &format!("region-{}", location.state)])
            .notes(format!(
                "{} data center in {}, {}",
                tier.title(),
                location.city,
                location.state
            ))
            .plan(dc_plan(name, &sizing))
            .addressing(10 + offset * 10, u32::from(offset) * 20)
            .vlans(&DC_VLANS)
            .clients(sizing.clients, &[])
            .cellular_pool(format!("10.{}.0.0", 220 + u32::from(offset)));
        builder.add_site(site).add_vlan_profile(
            &id,
            &format!("dc-{tier}"),
            &format!("DC {} Profile", tier.title()),
            &["Servers", "Management", "Corporate"],
        );
    }

    // Full mesh: spokes peer with every primary, not just one.
    let primaries: Vec<String> = DATA_CENTERS
        .iter()
        .enumerate()
        .filter(|(_, (_, _, tier))| *tier == Tier::Primary)
        .map(|(i, _)| network_id(i))
        .collect();
    for (i, &(_, _, tier)) in DATA_CENTERS.iter().enumerate() {
        let id = network_id(i);
        if tier == Tier::Primary {
            builder.add_vpn(&id, VpnMode::Hub, Vec::new());
        } else {
            let hubs = primaries.iter().map(|p| hub(p, false)).collect();
            builder.add_vpn(&id, VpnMode::Spoke, hubs);
        }
    }

    builder.finish()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn topology() -> Topology {
        generate(GenerationRng::seeded(43), "https://mock.meraki.com")
    }

    #[test]
    fn spokes_reference_every_primary() {
        let topology = topology();
        assert_eq!(topology.stats.networks, 8);
        for config in &topology.vpn_configs {
            match config.mode {
                VpnMode::Hub => assert!(config.hubs.is_empty()),
                VpnMode::Spoke => {
                    assert_eq!(
                        config.hub_ids().collect::<Vec<_>>(),
                        vec!["N_DC001", "N_DC002"]
                    );
                    assert!(config.hubs.iter().all(|h| !h.use_default_route));
                }
                VpnMode::None => panic!("mesh sites always join the VPN"),
            }
        }
    }

    #[test]
    fn tiers_size_sites() {
        let topology = topology();
        let primary = topology.devices_for("N_DC001").count();
        let edge = topology.devices_for("N_DC008").count();
        assert_eq!(primary, 2 + 4 + 8 + 16 + 30 + 2);
        assert_eq!(edge, 1 + 1 + 2 + 4 + 8 + 1);
        assert_eq!(topology.stats.clients, 300 * 2 + 180 * 2 + 100 * 4);
        assert_eq!(topology.vlan_profiles[2].iname, "dc-secondary");
        assert_eq!(topology.networks[0].tags, vec!["datacenter", "primary", "region-NY"]);
        assert_eq!(topology.devices[1].name, "DC-Primary-East-MX-02");
    }

    #[test]
    fn vlan_blocks_do_not_overlap() {
        let topology = topology();
        let mut subnets: Vec<_> = topology.vlans.iter().map(|v| v.subnet.as_str()).collect();
        let total = subnets.len();
        subnets.sort_unstable();
        subnets.dedup();
        assert_eq!(subnets.len(), total);
    }
}
