//! Content-addressed string interning for Lexis.
//!
//! Every string that enters a vocabulary -- token text, lowercase forms,
//! shapes, labels -- is stored once and referenced by a [`StringId`] derived
//! from its BLAKE3 hash. Because the id is a pure function of the content,
//! two independent stores assign the same id to the same string, and ids can
//! be computed without touching a store at all.
//!
//! # Storage Backends
//!
//! All backends implement the [`StringStore`] trait:
//!
//! - [`InMemoryStringStore`] -- `HashMap`-based store behind a `RwLock`
//!
//! # Design Rules
//!
//! 1. Interning is idempotent: the same string always yields the same id.
//! 2. An id is never reused for a different string; a hash collision is an error.
//! 3. Stores only grow. There is no eviction or deletion.
//! 4. Concurrent reads are always safe; growth takes the exclusive lock.
//!
//! [`StringId`]: lexis_types::StringId

pub mod error;
pub mod hasher;
pub mod memory;
pub mod traits;

// Re-export primary types at crate root for ergonomic imports.
pub use error::{StringError, StringResult};
pub use hasher::StringHasher;
pub use memory::InMemoryStringStore;
pub use traits::StringStore;
