// ── Multi-org topology ──
//
// A managed service provider with five customer organizations. VPN
// relationships never cross an organization boundary.

use super::builder::{SiteSpec, TopologyBuilder, hub};
use crate::generate::SiteKind;
use crate::generate::catalog::location_at;
use crate::model::{Topology, VpnMode};
use crate::rng::GenerationRng;

pub const DESCRIPTION: &str =
    "Multi-organization MSP topology with 5 customer orgs and 20 total networks";

struct Customer {
    id: &'static str,
    name: &'static str,
    industry: &'static str,
    networks: [(&'static str, SiteKind, usize); 4],
}

static CUSTOMERS: [Customer; 5] = [
    Customer {
        id: "100001",
        name: "TechStart Inc",
        industry: "Technology Startup",
        networks: [
            ("TechStart-HQ", SiteKind::Headquarters, 0),
            ("TechStart-Dev", SiteKind::Office, 4),
            ("TechStart-Sales-East", SiteKind::Branch, 1),
            ("TechStart-Sales-West", SiteKind::Branch, 3),
        ],
    },
    Customer {
        id: "100002",
        name: "HealthPlus Medical",
        industry: "Healthcare",
        networks: [
            ("HealthPlus-Hospital", SiteKind::Headquarters, 2),
            ("HealthPlus-Clinic-A", SiteKind::Branch, 8),
            ("HealthPlus-Clinic-B", SiteKind::Branch, 9),
            ("HealthPlus-Admin", SiteKind::Office, 10),
        ],
    },
    Customer {
        id: "100003",
        name: "RetailMax Stores",
        industry: "Retail",
        networks: [
            ("RetailMax-Corporate", SiteKind::Headquarters, 5),
            ("RetailMax-Store-101", SiteKind::Retail, 11),
            ("RetailMax-Store-102", SiteKind::Retail, 12),
            ("RetailMax-Warehouse", SiteKind::Warehouse, 6),
        ],
    },
    Customer {
        id: "100004",
        name: "EduLearn Academy",
        industry: "Education",
        networks: [
            ("EduLearn-Main-Campus", SiteKind::Headquarters, 7),
            ("EduLearn-Library", SiteKind::Office, 7),
            ("EduLearn-Dorms", SiteKind::Residential, 7),
            ("EduLearn-Athletics", SiteKind::Branch, 7),
        ],
    },
    Customer {
        id: "100005",
        name: "FinanceFirst Bank",
        industry: "Financial Services",
        networks: [
            ("FinanceFirst-HQ", SiteKind::Headquarters, 1),
            ("FinanceFirst-Branch-1", SiteKind::Branch, 13),
            ("FinanceFirst-Branch-2", SiteKind::Branch, 14),
            ("FinanceFirst-DC", SiteKind::Datacenter, 15),
        ],
    },
];

pub fn generate(rng: GenerationRng, dashboard_url: &str) -> Topology {
    let mut builder = TopologyBuilder::new("multi_org", DESCRIPTION, rng, dashboard_url);
    // Numbers networks across the whole topology; drives every address block.
    let mut counter: u8 = 0;

    for customer in &CUSTOMERS {
        builder.add_organization(customer.id, customer.name, "North America");
        let industry_tag = customer.industry.to_lowercase().replace(' ', "-");
        let mut sites = Vec::with_capacity(customer.networks.len());

        for &(name, kind, location_idx) in &customer.networks {
            counter += 1;
            let location = location_at(location_idx);
            let network_id = format!("N_{}_{counter:03}", customer.id);
            let kind_name = kind.to_string();

            let mut site = SiteSpec::new(&network_id, customer.id, name, location)
                .tags(&[industry_tag.as_str(), kind_name.as_str()])
                .notes(format!("{} - {kind_name} in {}", customer.name, location.city))
                .plan(kind.plan(name))
                .addressing(counter, u32::from(counter) * 5)
                .vlans(&kind.vlan_types())
                .clients(kind.client_count(), &[]);
            if site.plan.has_cellular() {
                site = site.cellular_pool(format!("10.{}.0.0", 230 + u32::from(counter)));
            }
            builder.add_site(site);
            sites.push((network_id, kind));
        }

        // Headquarters is the organization's only hub.
        let hq = sites
            .iter()
            .find(|(_, kind)| *kind == SiteKind::Headquarters)
            .map(|(id, _)| id.clone());
        for (network_id, _) in &sites {
            match &hq {
                Some(hq_id) if hq_id == network_id => {
                    builder.add_vpn(network_id, VpnMode::Hub, Vec::new());
                }
                Some(hq_id) => {
                    builder.add_vpn(network_id, VpnMode::Spoke, vec![hub(hq_id, true)]);
                }
                None => {
                    builder.add_vpn(network_id, VpnMode::Spoke, Vec::new());
                }
            }
        }

        let profile_id = format!("standard-{}", customer.id);
        let profile_name = format!("{} Standard", customer.name);
        for (network_id, _) in &sites {
            builder.add_vlan_profile(network_id, &profile_id, &profile_name, &["Corporate", "Guest"]);
        }
    }

    builder.finish()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn topology() -> Topology {
        generate(GenerationRng::seeded(44), "https://mock.meraki.com")
    }

    #[test]
    fn five_orgs_four_networks_each() {
        let topology = topology();
        assert_eq!(topology.stats.organizations, 5);
        assert_eq!(topology.stats.networks, 20);
        assert_eq!(topology.networks[4].id, "N_100002_005");
        assert_eq!(topology.vlan_profiles.len(), 20);
        assert_eq!(topology.cellular_subnet_pools.len(), 2);
    }

    #[test]
    fn vpn_stays_inside_each_org() {
        let topology = topology();
        for config in &topology.vpn_configs {
            let own_org = &topology.network(&config.network_id).unwrap().organization_id;
            for hub_id in config.hub_ids() {
                let hub_network = topology.network(hub_id).unwrap();
                assert_eq!(&hub_network.organization_id, own_org);
                assert_eq!(topology.vpn_config(hub_id).unwrap().mode, VpnMode::Hub);
            }
        }
        let hubs = topology
            .vpn_configs
            .iter()
            .filter(|c| c.mode == VpnMode::Hub)
            .count();
        assert_eq!(hubs, 5);
    }

    #[test]
    fn site_kinds_shape_networks() {
        let topology = topology();
        let dorms = topology
            .networks
            .iter()
            .find(|n| n.name == "EduLearn-Dorms")
            .unwrap();
        assert_eq!(dorms.tags, vec!["education", "residential"]);
        assert_eq!(topology.clients_for(&dorms.id).count(), 200);
        assert_eq!(topology.vlans_for(&dorms.id).count(), 3);
        assert_eq!(
            dorms.notes.as_deref(),
            Some("EduLearn Academy - residential in Boston")
        );
    }
}
