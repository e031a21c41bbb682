// ── Seeding a store from a generated topology ──

use std::collections::HashMap;

use serde::Serialize;
use tracing::{debug, info};

use super::{EntityKind, StoreItem, TopologyStore};
use crate::error::CoreError;
use crate::model::Topology;

/// Writes every entity of `topology` into `store` under its topology name
/// and registers the topology. Returns the number of records written.
///
/// Availabilities and statuses of a serial that is not among the devices
/// are left out, since their organization cannot be derived.
pub fn seed_topology(store: &TopologyStore, topology: &Topology) -> Result<usize, CoreError> {
    use EntityKind as K;

    let name = topology.topology_name.as_str();
    store.register_topology(name, &topology.description);

    let org_of: HashMap<&str, &str> = topology
        .devices
        .iter()
        .map(|d| (d.serial.as_str(), d.organization_id.as_str()))
        .collect();

    let batches: Vec<(EntityKind, Vec<StoreItem>)> = vec![
        (
            K::Organization,
            collect(topology.organizations.iter().map(|org| {
                item(K::Organization, org, org.id.clone(), None)
            }))?,
        ),
        (
            K::Network,
            collect(topology.networks.iter().map(|n| {
                item(K::Network, n, n.id.clone(), Some((K::Organization, n.organization_id.as_str())))
            }))?,
        ),
        (
            K::Device,
            collect(topology.devices.iter().map(|d| {
                item(K::Device, d, d.serial.clone(), Some((K::Organization, d.organization_id.as_str())))
            }))?,
        ),
        (
            K::DeviceAvailability,
            collect(topology.device_availabilities.iter().filter_map(|a| {
                let org = org_of.get(a.serial.as_str())?;
                Some(item(K::DeviceAvailability, a, a.serial.clone(), Some((K::Organization, *org))))
            }))?,
        ),
        (
            K::DeviceStatus,
            collect(topology.device_statuses.iter().filter_map(|s| {
                let org = org_of.get(s.serial.as_str())?;
                Some(item(K::DeviceStatus, s, s.serial.clone(), Some((K::Organization, *org))))
            }))?,
        ),
        (
            K::Vlan,
            collect(topology.vlans.iter().map(|v| {
                let id = format!("{}#{}", v.network_id, v.id);
                item(K::Vlan, v, id, Some((K::Network, v.network_id.as_str())))
            }))?,
        ),
        (
            K::VlanProfile,
            collect(topology.vlan_profiles.iter().map(|p| {
                let id = format!("{}#{}", p.network_id, p.iname);
                item(K::VlanProfile, p, id, Some((K::Network, p.network_id.as_str())))
            }))?,
        ),
        (
            K::NetworkClient,
            collect(topology.network_clients.iter().map(|c| {
                item(K::NetworkClient, c, c.id.clone(), Some((K::Network, c.network_id.as_str())))
            }))?,
        ),
        (
            K::Client,
            collect(topology.device_clients.iter().flat_map(|(serial, clients)| {
                clients.iter().map(move |c| {
                    let id = format!("{serial}#{}", c.id);
                    item(K::Client, c, id, Some((K::Device, serial.as_str())))
                })
            }))?,
        ),
        (
            K::VpnConfig,
            collect(topology.vpn_configs.iter().map(|c| {
                item(K::VpnConfig, c, c.network_id.clone(), Some((K::Network, c.network_id.as_str())))
            }))?,
        ),
        (
            K::CellularSubnetPool,
            collect(topology.cellular_subnet_pools.iter().map(|p| {
                let id = p.network_id.clone();
                item(K::CellularSubnetPool, p, id, Some((K::Network, p.network_id.as_str())))
            }))?,
        ),
    ];

    let mut written = 0;
    for (kind, batch) in batches {
        let count = store.batch_put_entities(name, kind, batch);
        debug!(topology = name, %kind, count, "seeded entities");
        written += count;
    }

    info!(topology = name, items = written, "topology seeded");
    Ok(written)
}

fn item<T: Serialize>(
    kind: EntityKind,
    entity: &T,
    id: String,
    parent: Option<(EntityKind, &str)>,
) -> Result<StoreItem, CoreError> {
    let value = serde_json::to_value(entity).map_err(|source| CoreError::Serialization {
        entity_type: kind.to_string(),
        source,
    })?;
    let item = StoreItem::new(id, value);
    Ok(match parent {
        Some((parent_kind, parent_id)) => item.with_parent(parent_kind, parent_id),
        None => item,
    })
}

fn collect(
    items: impl Iterator<Item = Result<StoreItem, CoreError>>,
) -> Result<Vec<StoreItem>, CoreError> {
    items.collect()
}
