use lexis_strings::StringError;
use lexis_types::ErrorKind;

/// Errors from vocabulary operations.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum VocabError {
    /// Failure in the underlying string store.
    #[error(transparent)]
    Strings(#[from] StringError),

    /// Similarity was requested for a word that has no vector.
    #[error("no vector for {0:?}; similarity is undefined")]
    MissingVector(String),

    /// A vector does not have the vocabulary's vector width.
    #[error("vector width mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// A zero-length vector was supplied.
    #[error("vectors must have at least one dimension")]
    EmptyVector,
}

impl VocabError {
    /// Coarse classification of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Strings(e) => e.kind(),
            Self::MissingVector(_) => ErrorKind::Usage,
            Self::DimensionMismatch { .. } | Self::EmptyVector => ErrorKind::Value,
        }
    }
}

/// Result alias for vocabulary operations.
pub type VocabResult<T> = Result<T, VocabError>;
