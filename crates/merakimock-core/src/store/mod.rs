// ── In-memory entity store ──
//
// The read contract a mock Dashboard API serves from: records addressed
// by (topology, kind, id), with an optional parent index. Safe to share
// across threads; the active topology is swapped atomically.

mod collection;
mod seed;

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use arc_swap::{ArcSwap, ArcSwapOption};
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};
use tracing::debug;

use crate::error::CoreError;
use collection::EntityCollection;

pub use seed::seed_topology;

/// Kinds of record the store holds.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum EntityKind {
    Organization,
    Network,
    Device,
    DeviceAvailability,
    DeviceStatus,
    Vlan,
    VlanProfile,
    /// Device-level client, keyed `{serial}#{clientId}`.
    Client,
    NetworkClient,
    VpnConfig,
    CellularSubnetPool,
}

impl EntityKind {
    pub fn all() -> impl Iterator<Item = Self> {
        Self::iter()
    }

    /// Parses a kind name, accepting dashes in place of underscores.
    pub fn from_name(name: &str) -> Result<Self, CoreError> {
        name.replace('-', "_")
            .parse()
            .map_err(|_| CoreError::UnknownEntityType {
                name: name.to_owned(),
            })
    }
}

/// A parent reference used by the secondary index.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ParentRef {
    pub kind: EntityKind,
    pub id: String,
}

impl ParentRef {
    pub fn new(kind: EntityKind, id: impl Into<String>) -> Self {
        Self {
            kind,
            id: id.into(),
        }
    }
}

/// One record for `batch_put_entities`.
#[derive(Debug, Clone)]
pub struct StoreItem {
    /// Records without an id are skipped.
    pub id: Option<String>,
    pub parent: Option<ParentRef>,
    pub value: Value,
}

impl StoreItem {
    pub fn new(id: impl Into<String>, value: Value) -> Self {
        Self {
            id: Some(id.into()),
            parent: None,
            value,
        }
    }

    pub fn with_parent(mut self, kind: EntityKind, id: impl Into<String>) -> Self {
        self.parent = Some(ParentRef::new(kind, id));
        self
    }
}

/// Registration record of a topology.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopologyInfo {
    pub name: String,
    pub description: String,
    pub registered_at: DateTime<Utc>,
    /// Total records across every kind.
    pub items: usize,
}

struct TopologySlot {
    order: u64,
    description: ArcSwap<String>,
    registered_at: DateTime<Utc>,
    collections: DashMap<EntityKind, Arc<EntityCollection>>,
}

impl TopologySlot {
    fn collection(&self, kind: EntityKind) -> Arc<EntityCollection> {
        Arc::clone(
            self.collections
                .entry(kind)
                .or_insert_with(|| Arc::new(EntityCollection::new()))
                .value(),
        )
    }

    fn existing(&self, kind: EntityKind) -> Option<Arc<EntityCollection>> {
        self.collections.get(&kind).map(|r| Arc::clone(r.value()))
    }

    fn items(&self) -> usize {
        self.collections.iter().map(|r| r.value().len()).sum()
    }
}

/// Thread-safe store of every seeded topology.
pub struct TopologyStore {
    topologies: DashMap<String, Arc<TopologySlot>>,
    active: ArcSwapOption<String>,
    default_topology: String,
    next_order: AtomicU64,
}

impl TopologyStore {
    /// An empty store falling back to `default_topology` when nothing is active.
    pub fn new(default_topology: impl Into<String>) -> Self {
        Self {
            topologies: DashMap::new(),
            active: ArcSwapOption::empty(),
            default_topology: default_topology.into(),
            next_order: AtomicU64::new(0),
        }
    }

    // ── Topology registry ────────────────────────────────────────────

    /// Registers a topology, updating the description if it already exists.
    /// Returns `true` if the name was new.
    pub fn register_topology(&self, name: &str, description: &str) -> bool {
        if let Some(slot) = self.topologies.get(name) {
            slot.description.store(Arc::new(description.to_owned()));
            return false;
        }
        self.slot(name, description);
        debug!(topology = name, "registered topology");
        true
    }

    /// Registered topologies in registration order.
    pub fn list_topologies(&self) -> Vec<TopologyInfo> {
        let mut slots: Vec<(u64, TopologyInfo)> = self
            .topologies
            .iter()
            .map(|r| {
                let slot = r.value();
                (
                    slot.order,
                    TopologyInfo {
                        name: r.key().clone(),
                        description: slot.description.load().as_ref().clone(),
                        registered_at: slot.registered_at,
                        items: slot.items(),
                    },
                )
            })
            .collect();
        slots.sort_unstable_by_key(|(order, _)| *order);
        slots.into_iter().map(|(_, info)| info).collect()
    }

    pub fn set_active_topology(&self, name: &str) -> Result<(), CoreError> {
        if !self.topologies.contains_key(name) {
            return Err(not_found("topology", name));
        }
        self.active.store(Some(Arc::new(name.to_owned())));
        debug!(topology = name, "active topology changed");
        Ok(())
    }

    /// The active topology, or the configured default when none was set.
    pub fn active_topology(&self) -> String {
        self.active
            .load_full()
            .map_or_else(|| self.default_topology.clone(), |name| (*name).clone())
    }

    /// Picks the topology a request reads from: header, then query
    /// parameter, then the active topology. Blank values are ignored.
    pub fn resolve_topology(&self, header: Option<&str>, query: Option<&str>) -> String {
        [header, query]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|name| !name.is_empty())
            .map_or_else(|| self.active_topology(), str::to_owned)
    }

    /// Drops a topology and all its records. Returns `true` if it existed.
    pub fn delete_topology(&self, name: &str) -> bool {
        let removed = self.topologies.remove(name).is_some();
        if removed {
            let was_active = self
                .active
                .load()
                .as_deref()
                .is_some_and(|active| active == name);
            if was_active {
                self.active.store(None);
            }
            debug!(topology = name, "deleted topology");
        }
        removed
    }

    // ── Reads ────────────────────────────────────────────────────────

    /// Every record of `kind`, in insertion order. Unknown topologies
    /// read as empty.
    pub fn get_entities(&self, topology: &str, kind: EntityKind) -> Vec<Arc<Value>> {
        self.existing(topology, kind)
            .map(|col| col.values())
            .unwrap_or_default()
    }

    pub fn get_entity(
        &self,
        topology: &str,
        kind: EntityKind,
        id: &str,
    ) -> Result<Arc<Value>, CoreError> {
        self.existing(topology, kind)
            .and_then(|col| col.get(id))
            .ok_or_else(|| not_found(&kind.to_string(), id))
    }

    /// Records of `child_kind` whose parent is `(parent_kind, parent_id)`.
    pub fn get_entities_by_parent(
        &self,
        topology: &str,
        parent_kind: EntityKind,
        parent_id: &str,
        child_kind: EntityKind,
    ) -> Vec<Arc<Value>> {
        let parent = ParentRef::new(parent_kind, parent_id);
        self.existing(topology, child_kind)
            .map(|col| col.children(&parent))
            .unwrap_or_default()
    }

    // ── Writes ───────────────────────────────────────────────────────

    /// Inserts or replaces one record, registering the topology on first
    /// write. Returns `true` if the id was new.
    pub fn put_entity(
        &self,
        topology: &str,
        kind: EntityKind,
        id: &str,
        value: Value,
        parent: Option<ParentRef>,
    ) -> bool {
        self.slot(topology, "")
            .collection(kind)
            .upsert(id.to_owned(), parent, value)
    }

    /// Writes many records of one kind. Items without an id are skipped;
    /// when an id repeats within the batch the first record wins. Returns
    /// the number of records written.
    pub fn batch_put_entities<I>(&self, topology: &str, kind: EntityKind, items: I) -> usize
    where
        I: IntoIterator<Item = StoreItem>,
    {
        let collection = self.slot(topology, "").collection(kind);
        let mut seen = std::collections::HashSet::new();
        let mut written = 0;
        let mut skipped = 0;

        for item in items {
            let Some(id) = item.id.filter(|id| !id.is_empty()) else {
                skipped += 1;
                continue;
            };
            if !seen.insert(id.clone()) {
                skipped += 1;
                continue;
            }
            collection.upsert(id, item.parent, item.value);
            written += 1;
        }

        if skipped > 0 {
            debug!(topology, %kind, skipped, "skipped records without a unique id");
        }
        written
    }

    // ── Private helpers ──────────────────────────────────────────────

    fn slot(&self, name: &str, description: &str) -> Arc<TopologySlot> {
        Arc::clone(
            self.topologies
                .entry(name.to_owned())
                .or_insert_with(|| {
                    Arc::new(TopologySlot {
                        order: self.next_order.fetch_add(1, Ordering::Relaxed),
                        description: ArcSwap::from_pointee(description.to_owned()),
                        registered_at: Utc::now(),
                        collections: DashMap::new(),
                    })
                })
                .value(),
        )
    }

    fn existing(&self, topology: &str, kind: EntityKind) -> Option<Arc<EntityCollection>> {
        let slot = self.topologies.get(topology).map(|r| Arc::clone(r.value()))?;
        slot.existing(kind)
    }
}

impl Default for TopologyStore {
    fn default() -> Self {
        Self::new(crate::topology::TopologyKind::HubSpoke.to_string())
    }
}

fn not_found(entity_type: &str, identifier: &str) -> CoreError {
    CoreError::NotFound {
        entity_type: entity_type.to_owned(),
        identifier: identifier.to_owned(),
    }
}
