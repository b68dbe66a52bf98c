//! Documents and views for Lexis.
//!
//! A [`Doc`] is built from words and trailing-space flags against a shared
//! [`Vocab`](lexis_vocab::Vocab). It owns the text and one record per token;
//! [`Token`] and [`Span`] are borrowed views into it, so they are cheap to
//! create and can never outlive the document.
//!
//! # Key Types
//!
//! - [`Doc`] -- Text, tokens, entity spans and per-instance extension values
//! - [`Token`] -- View of one token: text, lexical flags, annotations
//! - [`Span`] -- View of a token range, optionally labelled
//! - [`SpanRange`] -- Owned token range, used to set entities
//! - [`ExtensionRegistry`] -- User-defined attributes for each view kind
//! - [`Ext`] -- Accessor for reading, writing and calling extensions
//!
//! # Design Rules
//!
//! 1. Concatenating `text_with_ws` over all tokens reproduces the text exactly.
//! 2. Entity spans are within bounds and never overlap.
//! 3. Extension defaults are copied per instance; no two views share storage.
//! 4. Views with no vector fail similarity instead of returning a number.

pub mod annotation;
pub mod doc;
pub mod error;
pub mod ext;
pub mod extension;
pub mod similarity;
pub mod span;
pub mod token;

pub use annotation::TokenAnnotation;
pub use doc::Doc;
pub use error::{DocError, DocResult};
pub use ext::Ext;
pub use extension::{
    DocExtension, DocExtensionSpec, Extension, ExtensionRegistry, ExtensionSpec, Kwargs,
    SpanExtension, SpanExtensionSpec, TokenExtension, TokenExtensionSpec,
};
pub use similarity::{similarity, HasVector};
pub use span::{Span, SpanRange};
pub use token::{Token, Tokens};
