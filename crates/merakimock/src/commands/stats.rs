//! Entity counts per topology.

use serde::Serialize;
use tabled::Tabled;

use merakimock_core::{TopologyKind, TopologyStats};

use crate::cli::StatsArgs;
use crate::config::Settings;
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Debug, Serialize)]
pub struct StatsEntry {
    pub topology: String,
    pub seed: Option<u64>,
    pub stats: TopologyStats,
}

#[derive(Tabled)]
pub struct StatsRow {
    #[tabled(rename = "Topology")]
    topology: String,
    #[tabled(rename = "Orgs")]
    organizations: usize,
    #[tabled(rename = "Networks")]
    networks: usize,
    #[tabled(rename = "Devices")]
    devices: usize,
    #[tabled(rename = "VLANs")]
    vlans: usize,
    #[tabled(rename = "Profiles")]
    vlan_profiles: usize,
    #[tabled(rename = "Clients")]
    clients: usize,
    #[tabled(rename = "Attached")]
    device_clients: usize,
    #[tabled(rename = "VPN")]
    vpn_configs: usize,
    #[tabled(rename = "Cell Pools")]
    cellular_subnet_pools: usize,
}

impl StatsRow {
    pub fn new(topology: &str, s: &TopologyStats) -> Self {
        Self {
            topology: topology.to_owned(),
            organizations: s.organizations,
            networks: s.networks,
            devices: s.devices,
            vlans: s.vlans,
            vlan_profiles: s.vlan_profiles,
            clients: s.clients,
            device_clients: s.device_clients,
            vpn_configs: s.vpn_configs,
            cellular_subnet_pools: s.cellular_subnet_pools,
        }
    }
}

pub fn handle(args: StatsArgs, settings: &Settings) -> Result<(), CliError> {
    let names: Vec<String> = if args.topologies.is_empty() {
        TopologyKind::all().map(|k| k.to_string()).collect()
    } else {
        args.topologies
    };

    let entries = names
        .iter()
        .map(|name| {
            let kind = util::resolve_kind(name)?;
            let topology = util::generate_builtin(name, settings)?;
            Ok(StatsEntry {
                topology: topology.topology_name,
                seed: settings.options_for(kind).seed,
                stats: topology.stats,
            })
        })
        .collect::<Result<Vec<_>, CliError>>()?;

    let out = output::render_list(
        settings.output,
        &entries,
        |e| StatsRow::new(&e.topology, &e.stats),
        |e| format!("{}\t{}", e.topology, e.stats.devices),
    )?;
    output::print_output(&out, settings.quiet);
    Ok(())
}
