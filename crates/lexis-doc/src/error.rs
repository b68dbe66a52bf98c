use lexis_types::{ErrorKind, ViewKind};
use lexis_vocab::VocabError;

/// Errors from document, view and extension operations.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DocError {
    /// `words` and `spaces` differ in length.
    #[error("got {words} words but {spaces} space flags")]
    LengthMismatch { words: usize, spaces: usize },

    /// A word is the empty string.
    #[error("word {index} is empty")]
    EmptyWord { index: usize },

    /// A token index outside the document.
    #[error("token index {index} out of range for document of length {len}")]
    IndexOutOfRange { index: isize, len: usize },

    /// Span bounds outside the document.
    #[error("span [{start}, {end}) out of range for document of length {len}")]
    SpanOutOfRange { start: usize, end: usize, len: usize },

    /// Span start after its end.
    #[error("invalid span [{start}, {end}): start is after end")]
    InvalidSpan { start: usize, end: usize },

    /// Two entity spans share a token.
    #[error("entity [{second_start}, {second_end}) overlaps [{first_start}, {first_end})")]
    OverlappingEntities {
        first_start: usize,
        first_end: usize,
        second_start: usize,
        second_end: usize,
    },

    /// A syntactic head outside the document.
    #[error("head {head} of token {token} out of range for document of length {len}")]
    InvalidHead { token: usize, head: usize, len: usize },

    /// Two vectors of different widths were compared.
    #[error("vector width mismatch: {left} vs {right}")]
    VectorWidthMismatch { left: usize, right: usize },

    /// Access to an extension attribute that was never registered.
    #[error("{kind} has no extension attribute {name:?}")]
    UnknownExtension { kind: ViewKind, name: String },

    /// Write to a getter-only or method extension.
    #[error("{kind} extension {name:?} is read-only")]
    ReadOnlyExtension { kind: ViewKind, name: String },

    /// Call of an extension that is not a method.
    #[error("{kind} extension {name:?} is not a method")]
    NotCallable { kind: ViewKind, name: String },

    /// Read of a method extension as a value.
    #[error("{kind} extension {name:?} is a method; call it instead")]
    NotAValue { kind: ViewKind, name: String },

    /// Registration of a name that already exists, without `force`.
    #[error("{kind} extension {name:?} already exists; use force to overwrite")]
    ExtensionExists { kind: ViewKind, name: String },

    /// Malformed extension registration.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A getter, setter or method reported a failure.
    #[error("extension {name:?} failed: {message}")]
    Extension { name: String, message: String },

    /// Failure in the vocabulary.
    #[error(transparent)]
    Vocab(#[from] VocabError),
}

impl DocError {
    /// Create an extension failure with a name and message.
    pub fn extension(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Extension {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Coarse classification of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::LengthMismatch { .. }
            | Self::EmptyWord { .. }
            | Self::InvalidSpan { .. }
            | Self::OverlappingEntities { .. }
            | Self::InvalidHead { .. }
            | Self::VectorWidthMismatch { .. } => ErrorKind::Value,
            Self::IndexOutOfRange { .. } | Self::SpanOutOfRange { .. } => ErrorKind::Index,
            Self::UnknownExtension { .. }
            | Self::ReadOnlyExtension { .. }
            | Self::NotCallable { .. }
            | Self::NotAValue { .. } => ErrorKind::Attribute,
            Self::ExtensionExists { .. } | Self::Configuration(_) => ErrorKind::Configuration,
            Self::Extension { .. } => ErrorKind::Usage,
            Self::Vocab(e) => e.kind(),
        }
    }
}

impl From<lexis_strings::StringError> for DocError {
    fn from(e: lexis_strings::StringError) -> Self {
        Self::Vocab(VocabError::Strings(e))
    }
}

/// Result alias for document operations.
pub type DocResult<T> = Result<T, DocError>;
