//! Shared vocabulary for Lexis.
//!
//! A [`Vocab`] owns the string store every document interns into, a cache of
//! [`Lexeme`]s (context-independent lexical data for each distinct string)
//! and an optional table of word [`Vectors`]. Documents hold an
//! `Arc<Vocab>`, so the lexical data of a word is computed once and is
//! identical across every document sharing the vocabulary.
//!
//! # Key Types
//!
//! - [`Vocab`] -- String store + lexeme cache + vectors
//! - [`Lexeme`] -- Orthographic forms and [`LexFlags`] of a string
//! - [`Vectors`] -- Fixed-width dense vectors keyed by string id
//! - [`VocabConfig`] -- Construction options

pub mod config;
pub mod error;
pub mod lexeme;
pub mod vectors;
pub mod vocab;

pub use config::VocabConfig;
pub use error::{VocabError, VocabResult};
pub use lexeme::{LexFlags, Lexeme};
pub use vectors::{cosine, mean_vector, Vectors};
pub use vocab::{LexemeKey, Vocab};
