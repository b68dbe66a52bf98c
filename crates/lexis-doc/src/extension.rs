//! Registry of user-defined extension attributes.
//!
//! An extension is a named attribute attached to every view of one kind
//! ([`Doc`], [`Token`] or [`Span`]). It is one of:
//!
//! - a **default**: a per-instance value, initialised with a copy of the
//!   default on first read and writable afterwards;
//! - a **getter**: computed on every read, read-only;
//! - an **accessor**: a getter plus a setter, so writes go through user code;
//! - a **method**: a callable taking the view plus positional and keyword
//!   arguments.
//!
//! The registry is shared between documents as `Arc<ExtensionRegistry>`.
//! Registration is checked once in [`ExtensionSpec::into_extension`];
//! reading and writing values goes through [`Ext`](crate::Ext).

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use lexis_types::ViewKind;
use serde_json::{Map, Value};
use tracing::debug;

use crate::doc::Doc;
use crate::error::{DocError, DocResult};
use crate::span::Span;
use crate::token::Token;

/// Keyword arguments passed to a method extension.
pub type Kwargs = Map<String, Value>;

pub type DocGetter = Arc<dyn Fn(&Doc) -> DocResult<Value> + Send + Sync>;
pub type DocSetter = Arc<dyn Fn(&Doc, Value) -> DocResult<()> + Send + Sync>;
pub type DocMethod = Arc<dyn Fn(&Doc, &[Value], &Kwargs) -> DocResult<Value> + Send + Sync>;

pub type TokenGetter = Arc<dyn Fn(&Token<'_>) -> DocResult<Value> + Send + Sync>;
pub type TokenSetter = Arc<dyn Fn(&Token<'_>, Value) -> DocResult<()> + Send + Sync>;
pub type TokenMethod = Arc<dyn Fn(&Token<'_>, &[Value], &Kwargs) -> DocResult<Value> + Send + Sync>;

pub type SpanGetter = Arc<dyn Fn(&Span<'_>) -> DocResult<Value> + Send + Sync>;
pub type SpanSetter = Arc<dyn Fn(&Span<'_>, Value) -> DocResult<()> + Send + Sync>;
pub type SpanMethod = Arc<dyn Fn(&Span<'_>, &[Value], &Kwargs) -> DocResult<Value> + Send + Sync>;

/// A validated extension definition.
#[derive(Clone)]
pub enum Extension<G, S, M> {
    Default(Value),
    Getter(G),
    Accessor { getter: G, setter: S },
    Method(M),
}

impl<G, S, M> Extension<G, S, M> {
    /// Short name of the variant, for logs and debug output.
    pub fn variant(&self) -> &'static str {
        match self {
            Self::Default(_) => "default",
            Self::Getter(_) => "getter",
            Self::Accessor { .. } => "accessor",
            Self::Method(_) => "method",
        }
    }
}

impl<G, S, M> std::fmt::Debug for Extension<G, S, M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Default(v) => f.debug_tuple("Default").field(v).finish(),
            other => f.write_str(other.variant()),
        }
    }
}

pub type DocExtension = Extension<DocGetter, DocSetter, DocMethod>;
pub type TokenExtension = Extension<TokenGetter, TokenSetter, TokenMethod>;
pub type SpanExtension = Extension<SpanGetter, SpanSetter, SpanMethod>;

/// Builder for an extension registration.
///
/// Exactly one of these shapes is accepted: a default alone, a getter alone,
/// a getter with a setter, or a method alone.
pub struct ExtensionSpec<G, S, M> {
    default: Option<Value>,
    getter: Option<G>,
    setter: Option<S>,
    method: Option<M>,
}

pub type DocExtensionSpec = ExtensionSpec<DocGetter, DocSetter, DocMethod>;
pub type TokenExtensionSpec = ExtensionSpec<TokenGetter, TokenSetter, TokenMethod>;
pub type SpanExtensionSpec = ExtensionSpec<SpanGetter, SpanSetter, SpanMethod>;

impl<G, S, M> ExtensionSpec<G, S, M> {
    /// An empty spec; it must be given a default, getter or method before
    /// registration.
    pub fn new() -> Self {
        Self {
            default: None,
            getter: None,
            setter: None,
            method: None,
        }
    }

    /// Set the default value.
    pub fn default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Validate the combination of fields.
    pub fn into_extension(self) -> DocResult<Extension<G, S, M>> {
        match (self.default, self.getter, self.setter, self.method) {
            (Some(value), None, None, None) => Ok(Extension::Default(value)),
            (None, Some(getter), None, None) => Ok(Extension::Getter(getter)),
            (None, Some(getter), Some(setter), None) => Ok(Extension::Accessor { getter, setter }),
            (None, None, None, Some(method)) => Ok(Extension::Method(method)),
            (None, None, Some(_), None) => Err(DocError::Configuration(
                "a setter needs a getter".to_string(),
            )),
            (None, None, None, None) => Err(DocError::Configuration(
                "an extension needs a default, a getter or a method".to_string(),
            )),
            _ => Err(DocError::Configuration(
                "an extension is either a default, a getter (with optional setter) or a method"
                    .to_string(),
            )),
        }
    }
}

impl DocExtensionSpec {
    pub fn getter<F>(mut self, f: F) -> Self
    where
        F: Fn(&Doc) -> DocResult<Value> + Send + Sync + 'static,
    {
        self.getter = Some(Arc::new(f));
        self
    }

    pub fn setter<F>(mut self, f: F) -> Self
    where
        F: Fn(&Doc, Value) -> DocResult<()> + Send + Sync + 'static,
    {
        self.setter = Some(Arc::new(f));
        self
    }

    pub fn method<F>(mut self, f: F) -> Self
    where
        F: Fn(&Doc, &[Value], &Kwargs) -> DocResult<Value> + Send + Sync + 'static,
    {
        self.method = Some(Arc::new(f));
        self
    }
}

impl TokenExtensionSpec {
    pub fn getter<F>(mut self, f: F) -> Self
    where
        F: Fn(&Token<'_>) -> DocResult<Value> + Send + Sync + 'static,
    {
        self.getter = Some(Arc::new(f));
        self
    }

    pub fn setter<F>(mut self, f: F) -> Self
    where
        F: Fn(&Token<'_>, Value) -> DocResult<()> + Send + Sync + 'static,
    {
        self.setter = Some(Arc::new(f));
        self
    }

    pub fn method<F>(mut self, f: F) -> Self
    where
        F: Fn(&Token<'_>, &[Value], &Kwargs) -> DocResult<Value> + Send + Sync + 'static,
    {
        self.method = Some(Arc::new(f));
        self
    }
}

impl SpanExtensionSpec {
    pub fn getter<F>(mut self, f: F) -> Self
    where
        F: Fn(&Span<'_>) -> DocResult<Value> + Send + Sync + 'static,
    {
        self.getter = Some(Arc::new(f));
        self
    }

    pub fn setter<F>(mut self, f: F) -> Self
    where
        F: Fn(&Span<'_>, Value) -> DocResult<()> + Send + Sync + 'static,
    {
        self.setter = Some(Arc::new(f));
        self
    }

    pub fn method<F>(mut self, f: F) -> Self
    where
        F: Fn(&Span<'_>, &[Value], &Kwargs) -> DocResult<Value> + Send + Sync + 'static,
    {
        self.method = Some(Arc::new(f));
        self
    }
}

/// Named extensions per view kind.
#[derive(Default)]
pub struct ExtensionRegistry {
    doc: RwLock<HashMap<String, DocExtension>>,
    token: RwLock<HashMap<String, TokenExtension>>,
    span: RwLock<HashMap<String, SpanExtension>>,
}

impl ExtensionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a document extension.
    ///
    /// Fails if `name` exists and `force` is false.
    pub fn register_doc(&self, name: &str, spec: DocExtensionSpec, force: bool) -> DocResult<()> {
        insert(&self.doc, ViewKind::Doc, name, spec.into_extension()?, force)
    }

    /// Register a token extension.
    pub fn register_token(
        &self,
        name: &str,
        spec: TokenExtensionSpec,
        force: bool,
    ) -> DocResult<()> {
        insert(&self.token, ViewKind::Token, name, spec.into_extension()?, force)
    }

    /// Register a span extension.
    pub fn register_span(&self, name: &str, spec: SpanExtensionSpec, force: bool) -> DocResult<()> {
        insert(&self.span, ViewKind::Span, name, spec.into_extension()?, force)
    }

    pub fn is_registered(&self, kind: ViewKind, name: &str) -> bool {
        match kind {
            ViewKind::Doc => read(&self.doc).contains_key(name),
            ViewKind::Token => read(&self.token).contains_key(name),
            ViewKind::Span => read(&self.span).contains_key(name),
        }
    }

    /// Registered names for `kind`, sorted.
    pub fn names(&self, kind: ViewKind) -> Vec<String> {
        let mut names: Vec<String> = match kind {
            ViewKind::Doc => read(&self.doc).keys().cloned().collect(),
            ViewKind::Token => read(&self.token).keys().cloned().collect(),
            ViewKind::Span => read(&self.span).keys().cloned().collect(),
        };
        names.sort();
        names
    }

    /// Remove an extension. Returns `true` if it was registered.
    pub fn unregister(&self, kind: ViewKind, name: &str) -> bool {
        let removed = match kind {
            ViewKind::Doc => write(&self.doc).remove(name).is_some(),
            ViewKind::Token => write(&self.token).remove(name).is_some(),
            ViewKind::Span => write(&self.span).remove(name).is_some(),
        };
        if removed {
            debug!(%kind, name, "unregistered extension");
        }
        removed
    }

    // Lookups clone the definition out so no lock is held while user
    // callbacks run.

    pub(crate) fn doc_extension(&self, name: &str) -> Option<DocExtension> {
        read(&self.doc).get(name).cloned()
    }

    pub(crate) fn token_extension(&self, name: &str) -> Option<TokenExtension> {
        read(&self.token).get(name).cloned()
    }

    pub(crate) fn span_extension(&self, name: &str) -> Option<SpanExtension> {
        read(&self.span).get(name).cloned()
    }
}

impl std::fmt::Debug for ExtensionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExtensionRegistry")
            .field("doc", &self.names(ViewKind::Doc))
            .field("token", &self.names(ViewKind::Token))
            .field("span", &self.names(ViewKind::Span))
            .finish()
    }
}

fn read<T>(lock: &RwLock<T>) -> std::sync::RwLockReadGuard<'_, T> {
    lock.read().expect("lock poisoned")
}

fn write<T>(lock: &RwLock<T>) -> std::sync::RwLockWriteGuard<'_, T> {
    lock.write().expect("lock poisoned")
}

fn insert<G, S, M>(
    map: &RwLock<HashMap<String, Extension<G, S, M>>>,
    kind: ViewKind,
    name: &str,
    extension: Extension<G, S, M>,
    force: bool,
) -> DocResult<()> {
    if name.is_empty() {
        return Err(DocError::Configuration(
            "extension name must not be empty".to_string(),
        ));
    }
    let mut map = write(map);
    if !force && map.contains_key(name) {
        return Err(DocError::ExtensionExists {
            kind,
            name: name.to_string(),
        });
    }
    debug!(%kind, name, variant = extension.variant(), "registered extension");
    map.insert(name.to_string(), extension);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use lexis_types::ErrorKind;
    use serde_json::json;

    #[test]
    fn register_and_list() {
        let registry = ExtensionRegistry::new();
        registry
            .register_token("is_color", TokenExtensionSpec::new().default(false), false)
            .unwrap();
        registry
            .register_token("animal", TokenExtensionSpec::new().getter(|_| Ok(json!(1))), false)
            .unwrap();
        assert!(registry.is_registered(ViewKind::Token, "is_color"));
        assert!(!registry.is_registered(ViewKind::Doc, "is_color"));
        assert_eq!(registry.names(ViewKind::Token), vec!["animal", "is_color"]);
        assert!(registry.names(ViewKind::Span).is_empty());
    }

    #[test]
    fn duplicate_needs_force() {
        let registry = ExtensionRegistry::new();
        registry
            .register_doc("title", DocExtensionSpec::new().default(""), false)
            .unwrap();
        let err = registry
            .register_doc("title", DocExtensionSpec::new().default("x"), false)
            .unwrap_err();
        assert_eq!(
            err,
            DocError::ExtensionExists {
                kind: ViewKind::Doc,
                name: "title".into()
            }
        );
        assert_eq!(err.kind(), ErrorKind::Configuration);
        registry
            .register_doc("title", DocExtensionSpec::new().default("x"), true)
            .unwrap();
        assert!(matches!(
            registry.doc_extension("title"),
            Some(Extension::Default(v)) if v == json!("x")
        ));
    }

    #[test]
    fn malformed_specs_rejected() {
        let registry = ExtensionRegistry::new();
        let empty = registry.register_span("x", SpanExtensionSpec::new(), false);
        assert_eq!(empty.unwrap_err().kind(), ErrorKind::Configuration);

        let both = SpanExtensionSpec::new()
            .default(1)
            .getter(|_| Ok(json!(2)));
        assert!(registry.register_span("x", both, false).is_err());

        let setter_only = SpanExtensionSpec::new().setter(|_, _| Ok(()));
        assert!(registry.register_span("x", setter_only, false).is_err());

        let method_and_getter = SpanExtensionSpec::new()
            .getter(|_| Ok(json!(2)))
            .method(|_, _, _| Ok(json!(3)));
        assert!(registry.register_span("x", method_and_getter, false).is_err());

        let unnamed = registry.register_span("", SpanExtensionSpec::new().default(1), false);
        assert!(matches!(unnamed, Err(DocError::Configuration(_))));
        assert!(registry.names(ViewKind::Span).is_empty());
    }

    #[test]
    fn accessor_shape_accepted() {
        let spec = DocExtensionSpec::new()
            .getter(|_| Ok(json!(null)))
            .setter(|_, _| Ok(()));
        assert_eq!(spec.into_extension().unwrap().variant(), "accessor");
    }

    #[test]
    fn unregister() {
        let registry = ExtensionRegistry::new();
        registry
            .register_span("flag", SpanExtensionSpec::new().default(true), false)
            .unwrap();
        assert!(registry.unregister(ViewKind::Span, "flag"));
        assert!(!registry.unregister(ViewKind::Span, "flag"));
        assert!(!registry.is_registered(ViewKind::Span, "flag"));
    }
}
