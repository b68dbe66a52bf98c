//! Processing pipeline for Lexis.
//!
//! A [`Language`] turns raw text into [`Doc`](lexis_doc::Doc)s: its
//! [`Tokenizer`] produces words and trailing-space flags, then each enabled
//! [`Component`] runs over the document in order. All documents produced by
//! one `Language` share its vocabulary and extension registry.
//!
//! # Quick Start
//!
//! ```rust
//! use lexis_pipeline::{FnComponent, Language, PipePosition};
//!
//! let mut nlp = Language::blank("en");
//! nlp.add_pipe(FnComponent::inspect("length", |doc| assert!(!doc.is_empty())), PipePosition::Last)
//!     .unwrap();
//!
//! let doc = nlp.process("Hello world!").unwrap();
//! assert_eq!(doc.len(), 3);
//! assert_eq!(nlp.pipe_names(), vec!["length"]);
//!
//! let texts = ["First text", "Second text"];
//! let lengths: Vec<usize> = nlp.pipe(texts).map(|doc| doc.unwrap().len()).collect();
//! assert_eq!(lengths, vec![2, 2]);
//! ```

pub mod component;
pub mod config;
pub mod error;
pub mod language;
pub mod stream;
pub mod tokenizer;

pub use component::{Component, FnComponent, PipePosition};
pub use config::{PipelineConfig, TokenizerConfig};
pub use error::{PipelineError, PipelineResult};
pub use language::{DisabledPipes, Language};
pub use stream::{ContextStream, DocStream};
pub use tokenizer::{RuleTokenizer, TokenizedText, Tokenizer, WhitespaceTokenizer};
