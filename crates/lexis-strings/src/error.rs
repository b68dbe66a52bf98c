use lexis_types::{ErrorKind, StringId};

/// Errors from string store operations.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum StringError {
    /// The id was never interned in this store.
    #[error("string not found: {0}")]
    NotFound(StringId),

    /// Two different strings hashed to the same id.
    #[error("hash collision for {id:?}: {existing:?} vs {incoming:?}")]
    HashCollision {
        id: StringId,
        existing: String,
        incoming: String,
    },
}

impl StringError {
    /// Coarse classification of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound(_) => ErrorKind::Lookup,
            Self::HashCollision { .. } => ErrorKind::Value,
        }
    }
}

/// Result alias for string store operations.
pub type StringResult<T> = Result<T, StringError>;
