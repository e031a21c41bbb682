// ── Keyed entity collection ──
//
// Concurrent storage for the records of one entity kind within one
// topology. Lookups are O(1); listing preserves first-insertion order.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;
use serde_json::Value;

use super::ParentRef;

struct Stored {
    /// Insertion sequence; kept across updates of the same key.
    seq: u64,
    parent: Option<ParentRef>,
    value: Arc<Value>,
}

/// All records of a single entity kind.
///
/// Records are stored as JSON documents so every kind shares one
/// collection type. A secondary index maps parent references to child
/// keys for `get_entities_by_parent`.
pub(crate) struct EntityCollection {
    /// Primary storage: entity id -> record.
    by_key: DashMap<String, Stored>,

    /// Secondary index: parent -> child keys.
    by_parent: DashMap<ParentRef, Vec<String>>,

    next_seq: AtomicU64,
}

impl EntityCollection {
    pub(crate) fn new() -> Self {
        Self {
            by_key: DashMap::new(),
            by_parent: DashMap::new(),
            next_seq: AtomicU64::new(0),
        }
    }

    /// Insert or update a record. Returns `true` if the key was new.
    pub(crate) fn upsert(&self, key: String, parent: Option<ParentRef>, value: Value) -> bool {
        let previous = self
            .by_key
            .get(&key)
            .map(|r| (r.seq, r.parent.clone()));

        let (seq, is_new) = match previous {
            Some((seq, old_parent)) => {
                if old_parent != parent {
                    if let Some(old) = old_parent {
                        self.unlink(&old, &key);
                    }
                    if let Some(new) = &parent {
                        self.link(new, &key);
                    }
                }
                (seq, false)
            }
            None => {
                if let Some(new) = &parent {
                    self.link(new, &key);
                }
                (self.next_seq.fetch_add(1, Ordering::Relaxed), true)
            }
        };

        self.by_key.insert(
            key,
            Stored {
                seq,
                parent,
                value: Arc::new(value),
            },
        );
        is_new
    }

    pub(crate) fn get(&self, key: &str) -> Option<Arc<Value>> {
        self.by_key.get(key).map(|r| Arc::clone(&r.value))
    }

    /// Every record, oldest first.
    pub(crate) fn values(&self) -> Vec<Arc<Value>> {
        let mut entries: Vec<(u64, Arc<Value>)> = self
            .by_key
            .iter()
            .map(|r| (r.seq, Arc::clone(&r.value)))
            .collect();
        entries.sort_unstable_by_key(|(seq, _)| *seq);
        entries.into_iter().map(|(_, value)| value).collect()
    }

    /// Records whose parent is `parent`, oldest first.
    pub(crate) fn children(&self, parent: &ParentRef) -> Vec<Arc<Value>> {
        let keys = self
            .by_parent
            .get(parent)
            .map(|r| r.value().clone())
            .unwrap_or_default();
        let mut entries: Vec<(u64, Arc<Value>)> = keys
            .iter()
            .filter_map(|key| self.by_key.get(key).map(|r| (r.seq, Arc::clone(&r.value))))
            .collect();
        entries.sort_unstable_by_key(|(seq, _)| *seq);
        entries.into_iter().map(|(_, value)| value).collect()
    }

    pub(crate) fn len(&self) -> usize {
        self.by_key.len()
    }

    // ── Private helpers ──────────────────────────────────────────────

    fn link(&self, parent: &ParentRef, key: &str) {
        let mut keys = self.by_parent.entry(parent.clone()).or_default();
        if !keys.iter().any(|k| k == key) {
            keys.push(key.to_owned());
        }
    }

    fn unlink(&self, parent: &ParentRef, key: &str) {
        if let Some(mut keys) = self.by_parent.get_mut(parent) {
            keys.retain(|k| k != key);
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::store::EntityKind;

    fn network(id: &str) -> Option<ParentRef> {
        Some(ParentRef::new(EntityKind::Network, id))
    }

    #[test]
    fn upsert_reports_new_keys() {
        let col = EntityCollection::new();
        assert!(col.upsert("a".into(), None, json!({"id": "a"})));
        assert!(!col.upsert("a".into(), None, json!({"id": "a", "v": 2})));
        assert_eq!(col.len(), 1);
        assert_eq!(col.get("a").unwrap()["v"], 2);
    }

    #[test]
    fn values_keep_first_insertion_order() {
        let col = EntityCollection::new();
        for key in ["c", "a", "b"] {
            col.upsert(key.into(), None, json!(key));
        }
        col.upsert("c".into(), None, json!("c2"));
        let values: Vec<Value> = col.values().iter().map(|v| (**v).clone()).collect();
        assert_eq!(values, vec![json!("c2"), json!("a"), json!("b")]);
    }

    #[test]
    fn reparenting_moves_the_index_entry() {
        let col = EntityCollection::new();
        col.upsert("v1".into(), network("N_1"), json!(1));
        col.upsert("v2".into(), network("N_1"), json!(2));
        assert_eq!(col.children(&network("N_1").unwrap()).len(), 2);

        col.upsert("v1".into(), network("N_2"), json!(1));
        assert_eq!(col.children(&network("N_1").unwrap()).len(), 1);
        assert_eq!(col.children(&network("N_2").unwrap()).len(), 1);
    }
}
