#![allow(clippy::unwrap_used)]

// Seeding every built-in topology into one shared store.

use std::sync::Arc;
use std::thread;

use merakimock_core::{
    EntityKind, GenerationOptions, TopologyKind, TopologyStore, seed_topology,
};

fn seeded_store() -> TopologyStore {
    let store = TopologyStore::new("hub_spoke");
    let options = GenerationOptions::default();
    for kind in TopologyKind::all() {
        seed_topology(&store, &kind.generate(&options)).unwrap();
    }
    store
}

#[test]
fn topologies_are_isolated() {
    let store = seeded_store();
    let names: Vec<_> = store.list_topologies().into_iter().map(|t| t.name).collect();
    assert_eq!(names, vec!["hub_spoke", "mesh", "multi_org"]);

    assert_eq!(store.get_entities("hub_spoke", EntityKind::Organization).len(), 1);
    assert_eq!(store.get_entities("mesh", EntityKind::Network).len(), 8);
    assert_eq!(store.get_entities("multi_org", EntityKind::Organization).len(), 5);
    assert!(
        store
            .get_entity("mesh", EntityKind::Network, "N_HQ001")
            .is_err()
    );
}

#[test]
fn request_routing_reads_the_selected_topology() {
    let store = seeded_store();
    let header = store.resolve_topology(Some("mesh"), None);
    assert_eq!(store.get_entities(&header, EntityKind::Network)[0]["id"], "N_DC001");

    let fallback = store.resolve_topology(None, None);
    assert_eq!(fallback, "hub_spoke");

    store.set_active_topology("multi_org").unwrap();
    let active = store.resolve_topology(None, None);
    let orgs = store.get_entities(&active, EntityKind::Organization);
    assert_eq!(orgs[0]["id"], "100001");
}

#[test]
fn parent_index_follows_embedded_references() {
    let store = seeded_store();
    let networks =
        store.get_entities_by_parent("multi_org", EntityKind::Organization, "100003", EntityKind::Network);
    assert_eq!(networks.len(), 4);
    for network in &networks {
        assert_eq!(network["organizationId"], "100003");
        let id = network["id"].as_str().unwrap();
        let clients =
            store.get_entities_by_parent("multi_org", EntityKind::Network, id, EntityKind::NetworkClient);
        assert!(!clients.is_empty());
        assert!(clients.iter().all(|c| c["networkId"] == id));
    }
}

#[test]
fn reseeding_replaces_in_place() {
    let store = seeded_store();
    let before = store.list_topologies()[1].items;
    let options = GenerationOptions::default();
    seed_topology(&store, &TopologyKind::Mesh.generate(&options)).unwrap();
    assert_eq!(store.list_topologies()[1].items, before);
}

#[test]
fn concurrent_reads_while_switching() {
    let store = Arc::new(seeded_store());
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                let name = if i % 2 == 0 { "mesh" } else { "hub_spoke" };
                store.set_active_topology(name).unwrap();
                store.get_entities(name, EntityKind::Device).len()
            })
        })
        .collect();
    for handle in handles {
        assert!(handle.join().unwrap() > 0);
    }
    assert!(["mesh", "hub_spoke"].contains(&store.active_topology().as_str()));
}
