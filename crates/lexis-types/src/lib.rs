//! Foundation types for Lexis.
//!
//! This crate provides the identifier, attribute and classification types
//! shared by every other Lexis crate. It has no notion of storage; the
//! string store, vocabulary and documents live in their own crates.
//!
//! # Key Types
//!
//! - [`StringId`] -- Content-derived 64-bit identifier of an interned string
//! - [`ViewKind`] -- The three view kinds extension attributes attach to
//! - [`LexAttr`] -- Named token attributes (`ORTH`, `LOWER`, `IS_PUNCT`, ...)
//! - [`AttrValue`] -- The value of a token attribute
//! - [`ErrorKind`] -- Coarse classification shared by all error enums

pub mod attr;
pub mod error;
pub mod id;
pub mod view;

pub use attr::{AttrValue, LexAttr};
pub use error::{ErrorKind, TypeError};
pub use id::StringId;
pub use view::ViewKind;
