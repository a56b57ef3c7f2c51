//! Immutable capability catalog.
//!
//! The catalog is built once from the administered grant tables (at startup
//! or on an explicit reload) and is never mutated in place. Readers clone
//! an `Arc` out of the [`CatalogHandle`] and keep using that snapshot for
//! the rest of the request; a reload builds a fresh catalog and swaps the
//! `Arc`, so concurrent checks see either the old table or the new one,
//! never a half-written mix.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};

use uuid::Uuid;

use crate::capability::CapabilityKey;

/// One declared capability, as administered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapabilityEntry {
    pub id: Uuid,
    pub name: String,
    pub module: String,
    pub action: String,
    /// Marks capabilities that require an area context when checked for an
    /// operator, e.g. `Projects.CompleteArea`.
    pub area_scoped: bool,
}

/// Immutable lookup over declared capabilities and role grants.
#[derive(Debug, Default)]
pub struct PermissionCatalog {
    entries: Vec<CapabilityEntry>,
    by_key: HashMap<CapabilityKey, usize>,
    grants: HashMap<Uuid, HashSet<CapabilityKey>>,
}

impl PermissionCatalog {
    /// Build a catalog from declared capabilities and (role, permission)
    /// grant rows.
    ///
    /// Entries whose module or action normalizes to empty are dropped, and
    /// when two rows collide on the normalized key the first one wins.
    /// Grant rows that reference an unknown permission id are ignored; a
    /// dangling grant must not widen anyone's access.
    pub fn build(declared: Vec<CapabilityEntry>, grant_rows: Vec<(Uuid, Uuid)>) -> Self {
        let mut entries: Vec<CapabilityEntry> = Vec::with_capacity(declared.len());
        let mut by_key: HashMap<CapabilityKey, usize> = HashMap::with_capacity(declared.len());
        let mut key_by_id: HashMap<Uuid, CapabilityKey> = HashMap::with_capacity(declared.len());

        for entry in declared {
            let Some(key) = CapabilityKey::new(&entry.module, &entry.action) else {
                continue;
            };
            if by_key.contains_key(&key) {
                continue;
            }
            key_by_id.insert(entry.id, key.clone());
            by_key.insert(key, entries.len());
            entries.push(entry);
        }

        let mut grants: HashMap<Uuid, HashSet<CapabilityKey>> = HashMap::new();
        for (role_id, permission_id) in grant_rows {
            if let Some(key) = key_by_id.get(&permission_id) {
                grants.entry(role_id).or_default().insert(key.clone());
            }
        }

        Self {
            entries,
            by_key,
            grants,
        }
    }

    pub fn lookup(&self, key: &CapabilityKey) -> Option<&CapabilityEntry> {
        self.by_key.get(key).map(|&idx| &self.entries[idx])
    }

    pub fn is_granted(&self, role_id: Uuid, key: &CapabilityKey) -> bool {
        self.grants
            .get(&role_id)
            .is_some_and(|keys| keys.contains(key))
    }

    /// All declared capabilities, ordered by (module, action) for display.
    pub fn entries(&self) -> Vec<&CapabilityEntry> {
        let mut all: Vec<&CapabilityEntry> = self.entries.iter().collect();
        all.sort_by(|a, b| (&a.module, &a.action).cmp(&(&b.module, &b.action)));
        all
    }

    /// The capabilities granted to one role, ordered by (module, action).
    pub fn role_entries(&self, role_id: Uuid) -> Vec<&CapabilityEntry> {
        let mut held: Vec<&CapabilityEntry> = self
            .grants
            .get(&role_id)
            .into_iter()
            .flatten()
            .filter_map(|key| self.lookup(key))
            .collect();
        held.sort_by(|a, b| (&a.module, &a.action).cmp(&(&b.module, &b.action)));
        held
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Shared handle to the current catalog.
///
/// `current()` is cheap (one short read-lock, one `Arc` clone) and the lock
/// is never held across IO. `replace()` is the only writer and runs rarely.
#[derive(Debug)]
pub struct CatalogHandle {
    inner: RwLock<Arc<PermissionCatalog>>,
}

impl CatalogHandle {
    pub fn new(catalog: PermissionCatalog) -> Self {
        Self {
            inner: RwLock::new(Arc::new(catalog)),
        }
    }

    pub fn current(&self) -> Arc<PermissionCatalog> {
        match self.inner.read() {
            Ok(guard) => Arc::clone(&guard),
            Err(poisoned) => Arc::clone(&poisoned.into_inner()),
        }
    }

    pub fn replace(&self, catalog: PermissionCatalog) {
        let next = Arc::new(catalog);
        match self.inner.write() {
            Ok(mut guard) => *guard = next,
            Err(poisoned) => *poisoned.into_inner() = next,
        }
    }
}
