use lexis_doc::DocError;
use lexis_pipeline::PipelineError;
use lexis_types::{ErrorKind, LexAttr, TypeError};
use lexis_vocab::VocabError;

/// Errors from pattern parsing and matcher management.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum MatcherError {
    /// A pattern is not in the expected shape.
    #[error("invalid pattern: {0}")]
    InvalidPattern(String),

    /// A key was added without any pattern, or with an empty one.
    #[error("empty pattern for key {key:?}")]
    EmptyPattern { key: String },

    /// No patterns are registered under this key.
    #[error("no patterns registered for key {0:?}")]
    UnknownKey(String),

    /// The attribute cannot be used for phrase matching.
    #[error("phrase matching on {0} is not supported; use ORTH or LOWER")]
    UnsupportedAttr(LexAttr),

    /// A malformed attribute name or value inside a pattern.
    #[error(transparent)]
    Type(#[from] TypeError),

    #[error(transparent)]
    Doc(#[from] DocError),

    #[error(transparent)]
    Vocab(#[from] VocabError),

    #[error(transparent)]
    Pipeline(#[from] PipelineError),
}

impl MatcherError {
    /// Coarse classification of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidPattern(_) | Self::EmptyPattern { .. } | Self::UnsupportedAttr(_) => {
                ErrorKind::Value
            }
            Self::UnknownKey(_) => ErrorKind::Lookup,
            Self::Type(e) => e.kind(),
            Self::Doc(e) => e.kind(),
            Self::Vocab(e) => e.kind(),
            Self::Pipeline(e) => e.kind(),
        }
    }
}

/// Result alias for matcher operations.
pub type MatcherResult<T> = Result<T, MatcherError>;
