//! Rule-based matching for Lexis.
//!
//! Three tools find token sequences in a [`Doc`](lexis_doc::Doc):
//!
//! - [`Matcher`] -- Token patterns with attribute predicates and quantifiers
//! - [`PhraseMatcher`] -- Exact phrase lists, compared on text or lowercase
//! - [`EntityRuler`] -- A pipeline component that turns matches into entities
//!
//! Match keys are interned into the shared vocabulary, so a [`Match`] id
//! resolves to the same key string through any document's vocabulary.
//!
//! # Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use lexis_doc::Doc;
//! use lexis_matcher::Matcher;
//! use lexis_vocab::Vocab;
//! use serde_json::json;
//!
//! let vocab = Arc::new(Vocab::new());
//! let mut matcher = Matcher::new(Arc::clone(&vocab));
//! matcher
//!     .add_json("IPHONE_X", &json!([[{"TEXT": "iPhone"}, {"TEXT": "X"}]]))
//!     .unwrap();
//!
//! let doc = Doc::from_words(vocab, &["Upcoming", "iPhone", "X", "release"]).unwrap();
//! let found = matcher.matches(&doc);
//! assert_eq!(found[0].span(&doc).unwrap().text(), "iPhone X");
//! ```

pub mod error;
pub mod matcher;
pub mod pattern;
pub mod phrase;
pub mod ruler;

pub use error::{MatcherError, MatcherResult};
pub use matcher::{Match, Matcher};
pub use pattern::{Pattern, Predicate, Quantifier, TokenSpec};
pub use phrase::PhraseMatcher;
pub use ruler::{EntityPattern, EntityRuler, PatternBody};
