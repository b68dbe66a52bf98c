use lexis_doc::Doc;

use crate::error::PipelineResult;

/// A processing step applied to every document after tokenization.
///
/// Components take the document by value and hand it back, so they can
/// annotate tokens and set entities without interior mutability. The trait
/// is object-safe and `Send + Sync` so components can be stored in a
/// `Vec<Box<dyn Component>>`.
pub trait Component: Send + Sync {
    /// Unique name of the component within a pipeline.
    fn name(&self) -> &str;

    /// Process one document.
    fn process(&self, doc: Doc) -> PipelineResult<Doc>;
}

type ProcessFn = dyn Fn(Doc) -> PipelineResult<Doc> + Send + Sync;

/// A component backed by a closure.
pub struct FnComponent {
    name: String,
    f: Box<ProcessFn>,
}

impl FnComponent {
    pub fn new<F>(name: impl Into<String>, f: F) -> Self
    where
        F: Fn(Doc) -> PipelineResult<Doc> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            f: Box::new(f),
        }
    }

    /// A component that inspects the document without changing it.
    pub fn inspect<F>(name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&Doc) + Send + Sync + 'static,
    {
        Self::new(name, move |doc| {
            f(&doc);
            Ok(doc)
        })
    }
}

impl Component for FnComponent {
    fn name(&self) -> &str {
        &self.name
    }

    fn process(&self, doc: Doc) -> PipelineResult<Doc> {
        (self.f)(doc)
    }
}

impl std::fmt::Debug for FnComponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnComponent").field("name", &self.name).finish()
    }
}

/// Where [`Language::add_pipe`](crate::Language::add_pipe) inserts a
/// component.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum PipePosition {
    First,
    #[default]
    Last,
    Before(String),
    After(String),
}

impl PipePosition {
    pub fn before(name: impl Into<String>) -> Self {
        Self::Before(name.into())
    }

    pub fn after(name: impl Into<String>) -> Self {
        Self::After(name.into())
    }
}
