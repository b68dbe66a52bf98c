use lexis_types::ViewKind;
use serde_json::Value;

use crate::doc::Doc;
use crate::error::{DocError, DocResult};
use crate::extension::{Extension, Kwargs};
use crate::span::Span;
use crate::token::Token;

/// Where an extension value is stored inside its document.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) enum ExtSlot {
    Doc,
    Token(usize),
    Span(usize, usize),
}

#[derive(Clone, Copy)]
enum Target<'d> {
    Doc(&'d Doc),
    Token(Token<'d>),
    Span(Span<'d>),
}

/// Extension attribute accessor of one view.
///
/// Obtained from [`Doc::ext`], [`Token::ext`] or [`Span::ext`]. Names are
/// resolved against the document's [`ExtensionRegistry`](crate::ExtensionRegistry)
/// on every access. Span values are keyed by token range, so two span
/// views over the same tokens share their values.
#[derive(Clone, Copy)]
pub struct Ext<'d> {
    target: Target<'d>,
}

impl<'d> Ext<'d> {
    pub(crate) fn for_doc(doc: &'d Doc) -> Self {
        Self {
            target: Target::Doc(doc),
        }
    }

    pub(crate) fn for_token(token: Token<'d>) -> Self {
        Self {
            target: Target::Token(token),
        }
    }

    pub(crate) fn for_span(span: Span<'d>) -> Self {
        Self {
            target: Target::Span(span),
        }
    }

    /// The kind of view this accessor belongs to.
    pub fn kind(&self) -> ViewKind {
        match self.target {
            Target::Doc(_) => ViewKind::Doc,
            Target::Token(_) => ViewKind::Token,
            Target::Span(_) => ViewKind::Span,
        }
    }

    /// Returns `true` if `name` is registered for this view kind.
    pub fn has(&self, name: &str) -> bool {
        self.doc().extensions().is_registered(self.kind(), name)
    }

    /// Read an extension value.
    ///
    /// Defaults are copied into this instance on first read; getters run on
    /// every read.
    pub fn get(&self, name: &str) -> DocResult<Value> {
        let registry = self.doc().extensions();
        match self.target {
            Target::Doc(doc) => self.get_with(name, registry.doc_extension(name), |g| g(doc)),
            Target::Token(token) => {
                self.get_with(name, registry.token_extension(name), |g| g(&token))
            }
            Target::Span(span) => self.get_with(name, registry.span_extension(name), |g| g(&span)),
        }
    }

    /// Write an extension value.
    ///
    /// Only defaults and getter/setter pairs are writable.
    pub fn set(&self, name: &str, value: impl Into<Value>) -> DocResult<()> {
        let value = value.into();
        let registry = self.doc().extensions();
        match self.target {
            Target::Doc(doc) => {
                self.set_with(name, registry.doc_extension(name), value, |s, v| s(doc, v))
            }
            Target::Token(token) => {
                self.set_with(name, registry.token_extension(name), value, |s, v| s(&token, v))
            }
            Target::Span(span) => {
                self.set_with(name, registry.span_extension(name), value, |s, v| s(&span, v))
            }
        }
    }

    /// Call a method extension with positional arguments.
    pub fn call(&self, name: &str, args: &[Value]) -> DocResult<Value> {
        self.call_with_kwargs(name, args, &Kwargs::new())
    }

    /// Call a method extension with positional and keyword arguments.
    pub fn call_with_kwargs(&self, name: &str, args: &[Value], kwargs: &Kwargs) -> DocResult<Value> {
        let registry = self.doc().extensions();
        match self.target {
            Target::Doc(doc) => {
                self.invoke(name, registry.doc_extension(name), |m| m(doc, args, kwargs))
            }
            Target::Token(token) => {
                self.invoke(name, registry.token_extension(name), |m| m(&token, args, kwargs))
            }
            Target::Span(span) => {
                self.invoke(name, registry.span_extension(name), |m| m(&span, args, kwargs))
            }
        }
    }

    fn doc(&self) -> &'d Doc {
        match self.target {
            Target::Doc(doc) => doc,
            Target::Token(token) => token.doc(),
            Target::Span(span) => span.doc(),
        }
    }

    fn slot(&self) -> ExtSlot {
        match self.target {
            Target::Doc(_) => ExtSlot::Doc,
            Target::Token(token) => ExtSlot::Token(token.i()),
            Target::Span(span) => ExtSlot::Span(span.start(), span.end()),
        }
    }

    fn get_with<G, S, M>(
        &self,
        name: &str,
        extension: Option<Extension<G, S, M>>,
        getter: impl FnOnce(G) -> DocResult<Value>,
    ) -> DocResult<Value> {
        match extension.ok_or_else(|| self.unknown(name))? {
            Extension::Default(default) => {
                Ok(self.doc().ext_value_or_default(self.slot(), name, &default))
            }
            Extension::Getter(g) | Extension::Accessor { getter: g, .. } => getter(g),
            Extension::Method(_) => Err(DocError::NotAValue {
                kind: self.kind(),
                name: name.to_string(),
            }),
        }
    }

    fn set_with<G, S, M>(
        &self,
        name: &str,
        extension: Option<Extension<G, S, M>>,
        value: Value,
        setter: impl FnOnce(S, Value) -> DocResult<()>,
    ) -> DocResult<()> {
        match extension.ok_or_else(|| self.unknown(name))? {
            Extension::Default(_) => {
                self.doc().set_ext_value(self.slot(), name, value);
                Ok(())
            }
            Extension::Accessor { setter: s, .. } => setter(s, value),
            Extension::Getter(_) | Extension::Method(_) => Err(DocError::ReadOnlyExtension {
                kind: self.kind(),
                name: name.to_string(),
            }),
        }
    }

    fn invoke<G, S, M>(
        &self,
        name: &str,
        extension: Option<Extension<G, S, M>>,
        invoke: impl FnOnce(M) -> DocResult<Value>,
    ) -> DocResult<Value> {
        match extension.ok_or_else(|| self.unknown(name))? {
            Extension::Method(m) => invoke(m),
            _ => Err(DocError::NotCallable {
                kind: self.kind(),
                name: name.to_string(),
            }),
        }
    }

    fn unknown(&self, name: &str) -> DocError {
        DocError::UnknownExtension {
            kind: self.kind(),
            name: name.to_string(),
        }
    }
}

impl std::fmt::Debug for Ext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ext")
            .field("kind", &self.kind())
            .field("slot", &self.slot())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use lexis_types::ErrorKind;
    use lexis_vocab::Vocab;
    use serde_json::json;

    use super::*;
    use crate::extension::{
        DocExtensionSpec, ExtensionRegistry, SpanExtensionSpec, TokenExtensionSpec,
    };

    const COLORS: &[&str] = &["red", "yellow", "blue"];

    fn sky(registry: &Arc<ExtensionRegistry>) -> Doc {
        Doc::with_extensions(
            Arc::new(Vocab::new()),
            Arc::clone(registry),
            &["The", "sky", "is", "blue", "."],
            &[true, true, true, false, false],
        )
        .unwrap()
    }

    // -----------------------------------------------------------------------
    // Defaults
    // -----------------------------------------------------------------------

    #[test]
    fn default_then_set() {
        let registry = Arc::new(ExtensionRegistry::new());
        registry
            .register_token("is_color", TokenExtensionSpec::new().default(false), false)
            .unwrap();
        let doc = sky(&registry);

        let blue = doc.token(3).unwrap();
        assert_eq!(blue.ext().get("is_color").unwrap(), json!(false));
        blue.ext().set("is_color", true).unwrap();

        let flags: Vec<Value> = doc
            .iter()
            .map(|t| t.ext().get("is_color").unwrap())
            .collect();
        assert_eq!(
            flags,
            vec![json!(false), json!(false), json!(false), json!(true), json!(false)]
        );
    }

    #[test]
    fn mutable_defaults_are_per_instance() {
        let registry = Arc::new(ExtensionRegistry::new());
        registry
            .register_token("notes", TokenExtensionSpec::new().default(json!([])), false)
            .unwrap();
        let doc = sky(&registry);

        let t0 = doc.token(0).unwrap();
        let mut notes = t0.ext().get("notes").unwrap();
        notes.as_array_mut().unwrap().push(json!("first"));
        t0.ext().set("notes", notes).unwrap();

        assert_eq!(t0.ext().get("notes").unwrap(), json!(["first"]));
        assert_eq!(doc.token(1).unwrap().ext().get("notes").unwrap(), json!([]));
    }

    #[test]
    fn values_are_per_document() {
        let registry = Arc::new(ExtensionRegistry::new());
        registry
            .register_doc("title", DocExtensionSpec::new().default(Value::Null), false)
            .unwrap();
        let a = sky(&registry);
        let b = sky(&registry);
        a.ext().set("title", "A").unwrap();
        assert_eq!(a.ext().get("title").unwrap(), json!("A"));
        assert_eq!(b.ext().get("title").unwrap(), Value::Null);
    }

    // -----------------------------------------------------------------------
    // Getters and accessors
    // -----------------------------------------------------------------------

    #[test]
    fn getters_compute_on_read() {
        let registry = Arc::new(ExtensionRegistry::new());
        registry
            .register_token(
                "is_color",
                TokenExtensionSpec::new().getter(|t| Ok(json!(COLORS.contains(&t.text())))),
                false,
            )
            .unwrap();
        registry
            .register_span(
                "has_color",
                SpanExtensionSpec::new().getter(|span| {
                    for t in span.iter() {
                        if t.ext().get("is_color")? == json!(true) {
                            return Ok(json!(true));
                        }
                    }
                    Ok(json!(false))
                }),
                false,
            )
            .unwrap();
        let doc = sky(&registry);

        assert_eq!(doc.token(3).unwrap().ext().get("is_color").unwrap(), json!(true));
        assert_eq!(doc.span(1, 4).unwrap().ext().get("has_color").unwrap(), json!(true));
        assert_eq!(doc.span(0, 2).unwrap().ext().get("has_color").unwrap(), json!(false));

        let err = doc.token(3).unwrap().ext().set("is_color", false).unwrap_err();
        assert_eq!(
            err,
            DocError::ReadOnlyExtension {
                kind: ViewKind::Token,
                name: "is_color".into()
            }
        );
        assert_eq!(err.kind(), ErrorKind::Attribute);
    }

    #[test]
    fn accessor_routes_writes_through_setter() {
        let registry = Arc::new(ExtensionRegistry::new());
        registry
            .register_doc("raw_title", DocExtensionSpec::new().default(""), false)
            .unwrap();
        registry
            .register_doc(
                "title",
                DocExtensionSpec::new()
                    .getter(|doc| doc.ext().get("raw_title"))
                    .setter(|doc, value| {
                        let upper = value.as_str().unwrap_or_default().to_uppercase();
                        doc.ext().set("raw_title", upper)
                    }),
                false,
            )
            .unwrap();
        let doc = sky(&registry);
        doc.ext().set("title", "weather").unwrap();
        assert_eq!(doc.ext().get("title").unwrap(), json!("WEATHER"));
    }

    // -----------------------------------------------------------------------
    // Methods
    // -----------------------------------------------------------------------

    #[test]
    fn methods_take_arguments() {
        let registry = Arc::new(ExtensionRegistry::new());
        registry
            .register_doc(
                "has_token",
                DocExtensionSpec::new().method(|doc, args, kwargs| {
                    let wanted = args
                        .first()
                        .and_then(Value::as_str)
                        .ok_or_else(|| DocError::extension("has_token", "expected a string"))?;
                    let ignore_case = kwargs
                        .get("ignore_case")
                        .and_then(Value::as_bool)
                        .unwrap_or(false);
                    Ok(json!(doc.iter().any(|t| if ignore_case {
                        t.lower() == wanted.to_lowercase()
                    } else {
                        t.text() == wanted
                    })))
                }),
                false,
            )
            .unwrap();
        let doc = sky(&registry);

        assert_eq!(doc.ext().call("has_token", &[json!("blue")]).unwrap(), json!(true));
        assert_eq!(doc.ext().call("has_token", &[json!("cloud")]).unwrap(), json!(false));
        let err = doc.ext().call("has_token", &[]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Usage);

        let mut kwargs = Kwargs::new();
        assert_eq!(
            doc.ext().call_with_kwargs("has_token", &[json!("SKY")], &kwargs).unwrap(),
            json!(false)
        );
        kwargs.insert("ignore_case".to_string(), json!(true));
        assert_eq!(
            doc.ext().call_with_kwargs("has_token", &[json!("SKY")], &kwargs).unwrap(),
            json!(true)
        );

        let err = doc.ext().get("has_token").unwrap_err();
        assert!(matches!(err, DocError::NotAValue { .. }));
        assert!(matches!(
            doc.ext().set("has_token", true).unwrap_err(),
            DocError::ReadOnlyExtension { .. }
        ));
    }

    #[test]
    fn calling_a_value_fails() {
        let registry = Arc::new(ExtensionRegistry::new());
        registry
            .register_doc("flag", DocExtensionSpec::new().default(true), false)
            .unwrap();
        let doc = sky(&registry);
        assert_eq!(
            doc.ext().call("flag", &[]).unwrap_err(),
            DocError::NotCallable {
                kind: ViewKind::Doc,
                name: "flag".into()
            }
        );
    }

    // -----------------------------------------------------------------------
    // Unknown names
    // -----------------------------------------------------------------------

    #[test]
    fn unknown_extension() {
        let registry = Arc::new(ExtensionRegistry::new());
        registry
            .register_token("is_color", TokenExtensionSpec::new().default(false), false)
            .unwrap();
        let doc = sky(&registry);

        let err = doc.ext().get("is_color").unwrap_err();
        assert_eq!(
            err,
            DocError::UnknownExtension {
                kind: ViewKind::Doc,
                name: "is_color".into()
            }
        );
        assert_eq!(err.kind(), ErrorKind::Attribute);
        assert!(doc.token(0).unwrap().ext().has("is_color"));
        assert!(!doc.ext().has("is_color"));
        assert!(doc.span(0, 1).unwrap().ext().set("x", 1).is_err());
    }

    #[test]
    fn span_values_keyed_by_range() {
        let registry = Arc::new(ExtensionRegistry::new());
        registry
            .register_span("checked", SpanExtensionSpec::new().default(false), false)
            .unwrap();
        let doc = sky(&registry);
        doc.span(1, 3).unwrap().ext().set("checked", true).unwrap();
        assert_eq!(doc.span(1, 3).unwrap().ext().get("checked").unwrap(), json!(true));
        assert_eq!(doc.span(1, 4).unwrap().ext().get("checked").unwrap(), json!(false));
    }
}
