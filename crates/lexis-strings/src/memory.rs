use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use lexis_types::StringId;
use tracing::debug;

use crate::error::{StringError, StringResult};
use crate::hasher::StringHasher;
use crate::traits::StringStore;

/// In-memory, HashMap-based string store.
///
/// Strings are held as `Arc<str>` behind a `RwLock`: lookups of strings that
/// are already interned take the shared lock, only growth takes the
/// exclusive one. Resolving hands out a cheap `Arc` clone.
pub struct InMemoryStringStore {
    hasher: StringHasher,
    strings: RwLock<HashMap<StringId, Arc<str>>>,
}

impl InMemoryStringStore {
    /// Create a new empty store using the default vocabulary hasher.
    pub fn new() -> Self {
        Self::with_hasher(StringHasher::STRINGS)
    }

    /// Create a new empty store with a specific hasher.
    pub fn with_hasher(hasher: StringHasher) -> Self {
        Self {
            hasher,
            strings: RwLock::new(HashMap::new()),
        }
    }

    /// The hasher ids are derived with.
    pub fn hasher(&self) -> StringHasher {
        self.hasher
    }

    /// Compute the id a string would receive, without interning it.
    pub fn id_of(&self, s: &str) -> StringId {
        self.hasher.hash(s)
    }

    /// Return a sorted list of all interned ids.
    pub fn ids(&self) -> Vec<StringId> {
        let map = self.strings.read().expect("lock poisoned");
        let mut ids: Vec<StringId> = map.keys().copied().collect();
        ids.sort();
        ids
    }

    /// Total bytes across all interned strings.
    pub fn total_bytes(&self) -> usize {
        self.strings
            .read()
            .expect("lock poisoned")
            .values()
            .map(|s| s.len())
            .sum()
    }
}

impl Default for InMemoryStringStore {
    fn default() -> Self {
        Self::new()
    }
}

impl StringStore for InMemoryStringStore {
    fn intern(&self, s: &str) -> StringResult<StringId> {
        let id = self.hasher.hash(s);
        if id.is_empty() {
            return Ok(id);
        }

        // Fast path: already interned.
        {
            let map = self.strings.read().expect("lock poisoned");
            if let Some(existing) = map.get(&id) {
                return check_same(id, existing, s);
            }
        }

        let mut map = self.strings.write().expect("lock poisoned");
        // Another writer may have won the race between the two locks.
        if let Some(existing) = map.get(&id) {
            return check_same(id, existing, s);
        }
        map.insert(id, Arc::from(s));
        debug!(id = %id.short_hex(), bytes = s.len(), "interned string");
        Ok(id)
    }

    fn resolve(&self, id: StringId) -> StringResult<Arc<str>> {
        if id.is_empty() {
            return Ok(Arc::from(""));
        }
        let map = self.strings.read().expect("lock poisoned");
        map.get(&id).cloned().ok_or(StringError::NotFound(id))
    }

    fn lookup(&self, s: &str) -> Option<StringId> {
        let id = self.hasher.hash(s);
        if id.is_empty() {
            return Some(id);
        }
        let map = self.strings.read().expect("lock poisoned");
        match map.get(&id) {
            Some(existing) if existing.as_ref() == s => Some(id),
            _ => None,
        }
    }

    fn contains(&self, id: StringId) -> bool {
        id.is_empty() || self.strings.read().expect("lock poisoned").contains_key(&id)
    }

    fn len(&self) -> usize {
        self.strings.read().expect("lock poisoned").len()
    }
}

fn check_same(id: StringId, existing: &str, incoming: &str) -> StringResult<StringId> {
    if existing == incoming {
        Ok(id)
    } else {
        Err(StringError::HashCollision {
            id,
            existing: existing.to_string(),
            incoming: incoming.to_string(),
        })
    }
}

impl std::fmt::Debug for InMemoryStringStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let count = self.len();
        f.debug_struct("InMemoryStringStore")
            .field("domain", &self.hasher.domain())
            .field("string_count", &count)
            .finish()
    }
}
