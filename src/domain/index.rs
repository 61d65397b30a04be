//! Concurrency-safe in-memory index of links.
//!
//! The index is a cache that can always be rebuilt from a backend
//! [`Snapshot`]. It keeps two maps, both guarded by a single mutex so a
//! soft-delete (remove from active, insert into deleted) is never observed
//! half-applied:
//!
//! - active: `person -> short_id -> long_url`
//! - deleted: `short_id -> Link`
//!
//! Lookups without a person filter scan every person's active map, which is
//! O(persons). That is a known scalability ceiling, as is the global lock.

use std::collections::{BTreeMap, HashMap};

use parking_lot::Mutex;

use crate::domain::entities::{Link, Snapshot};

/// Result of an index lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    /// The id maps to this long URL.
    Active(String),
    /// The id was soft-deleted; the long URL is retained.
    Deleted(String),
    Absent,
}

#[derive(Debug, Default)]
struct IndexMaps {
    active: HashMap<String, HashMap<String, String>>,
    deleted: HashMap<String, Link>,
}

/// In-memory index owned by [`crate::application::services::LinkService`].
#[derive(Debug, Default)]
pub struct LinkIndex {
    maps: Mutex<IndexMaps>,
}

impl LinkIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an index from a backend snapshot.
    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        let mut maps = IndexMaps::default();

        for link in snapshot.active {
            maps.active
                .entry(link.owner)
                .or_default()
                .insert(link.short_id, link.long_url);
        }

        for link in snapshot.deleted {
            maps.deleted.insert(link.short_id.clone(), link);
        }

        Self {
            maps: Mutex::new(maps),
        }
    }

    /// Looks up a short id, optionally scoped to one person.
    ///
    /// Active entries win over deleted ones.
    pub fn read(&self, person: Option<&str>, short_id: &str) -> Lookup {
        let maps = self.maps.lock();

        let active = match person {
            Some(person) => maps
                .active
                .get(person)
                .and_then(|links| links.get(short_id)),
            None => maps
                .active
                .values()
                .find_map(|links| links.get(short_id)),
        };

        if let Some(long_url) = active {
            return Lookup::Active(long_url.clone());
        }

        match maps.deleted.get(short_id) {
            Some(link) if person.is_none_or(|p| link.is_owned_by(p)) => {
                Lookup::Deleted(link.long_url.clone())
            }
            _ => Lookup::Absent,
        }
    }

    /// Inserts or overwrites an active entry.
    pub fn write(&self, person: &str, short_id: &str, long_url: &str) {
        let mut maps = self.maps.lock();
        maps.active
            .entry(person.to_string())
            .or_default()
            .insert(short_id.to_string(), long_url.to_string());
    }

    /// Moves an entry owned by `person` from active to deleted.
    ///
    /// Returns `false` if `person` has no active entry with this id.
    pub fn soft_delete(&self, person: &str, short_id: &str) -> bool {
        let mut maps = self.maps.lock();

        let Some(links) = maps.active.get_mut(person) else {
            return false;
        };
        let Some(long_url) = links.remove(short_id) else {
            return false;
        };
        if links.is_empty() {
            maps.active.remove(person);
        }

        maps.deleted.insert(
            short_id.to_string(),
            Link::new(short_id, long_url, person),
        );
        true
    }

    /// Returns the active links of `person`, sorted by short id.
    pub fn list(&self, person: &str) -> BTreeMap<String, String> {
        let maps = self.maps.lock();
        maps.active
            .get(person)
            .map(|links| {
                links
                    .iter()
                    .map(|(id, url)| (id.clone(), url.clone()))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn active_len(&self) -> usize {
        self.maps.lock().active.values().map(HashMap::len).sum()
    }

    pub fn deleted_len(&self) -> usize {
        self.maps.lock().deleted.len()
    }
}
