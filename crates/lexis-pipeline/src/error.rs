use lexis_doc::DocError;
use lexis_types::ErrorKind;
use lexis_vocab::VocabError;

/// Errors from pipeline construction and document processing.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PipelineError {
    /// A component with this name is already in the pipeline.
    #[error("component {0:?} already exists in the pipeline")]
    DuplicateComponent(String),

    /// No component with this name is in the pipeline.
    #[error("no component named {0:?} in the pipeline")]
    UnknownComponent(String),

    /// A component failed while processing a document.
    #[error("component {name:?} failed: {source}")]
    Component {
        name: String,
        #[source]
        source: Box<PipelineError>,
    },

    /// Configuration is invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// Failure building or annotating a document.
    #[error(transparent)]
    Doc(#[from] DocError),

    /// Failure in the vocabulary.
    #[error(transparent)]
    Vocab(#[from] VocabError),
}

impl PipelineError {
    /// Wrap an error raised by the component `name`.
    pub fn component(name: impl Into<String>, source: PipelineError) -> Self {
        Self::Component {
            name: name.into(),
            source: Box::new(source),
        }
    }

    /// Coarse classification of this error.
    ///
    /// Component failures report the kind of the underlying error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::DuplicateComponent(_) | Self::Config(_) => ErrorKind::Configuration,
            Self::UnknownComponent(_) => ErrorKind::Lookup,
            Self::Component { source, .. } => source.kind(),
            Self::Doc(e) => e.kind(),
            Self::Vocab(e) => e.kind(),
        }
    }
}

/// Result alias for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;
