use std::sync::Arc;

use lexis_types::StringId;

use crate::error::StringResult;

/// Bidirectional string ↔ id store.
///
/// All implementations must satisfy these invariants:
/// - Interning is idempotent: the same string always yields the same id,
///   regardless of insertion order.
/// - An id resolves to exactly one string for the lifetime of the store.
/// - The store only grows; nothing is ever evicted.
/// - [`StringId::EMPTY`] always resolves to the empty string.
pub trait StringStore: Send + Sync {
    /// Intern a string and return its id.
    ///
    /// If the string is already present, this is a no-op returning the
    /// existing id.
    fn intern(&self, s: &str) -> StringResult<StringId>;

    /// Resolve an id back to its string.
    ///
    /// Returns `Err(StringError::NotFound)` if the id was never interned in
    /// this store.
    fn resolve(&self, id: StringId) -> StringResult<Arc<str>>;

    /// The id of `s` if it has already been interned, without interning it.
    fn lookup(&self, s: &str) -> Option<StringId>;

    /// Check whether an id has been interned.
    fn contains(&self, id: StringId) -> bool;

    /// Number of interned strings (the empty string is not counted).
    fn len(&self) -> usize;

    /// Returns `true` if nothing has been interned yet.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Intern several strings and return their ids in order.
    ///
    /// Default implementation calls `intern()` for each string.
    fn intern_batch(&self, strings: &[&str]) -> StringResult<Vec<StringId>> {
        strings.iter().map(|s| self.intern(s)).collect()
    }

    /// Resolve several ids in order.
    ///
    /// Default implementation calls `resolve()` for each id.
    fn resolve_batch(&self, ids: &[StringId]) -> StringResult<Vec<Arc<str>>> {
        ids.iter().map(|id| self.resolve(*id)).collect()
    }
}
