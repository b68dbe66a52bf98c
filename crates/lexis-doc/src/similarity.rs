//! Vector similarity across views.
//!
//! A token's vector is its lexeme's vector; a span's or document's vector is
//! the mean of its token vectors. Any view can be compared with any other.

use lexis_vocab::{cosine, mean_vector, VocabError};
use tracing::warn;

use crate::doc::Doc;
use crate::error::{DocError, DocResult};
use crate::span::Span;
use crate::token::{Token, Tokens};

/// A view with a dense vector.
pub trait HasVector {
    /// The view's vector.
    fn vector(&self) -> DocResult<Vec<f32>>;

    /// Returns `true` if a vector is available.
    fn has_vector(&self) -> bool;
}

impl HasVector for Doc {
    fn vector(&self) -> DocResult<Vec<f32>> {
        Doc::vector(self)
    }

    fn has_vector(&self) -> bool {
        Doc::has_vector(self)
    }
}

impl HasVector for Token<'_> {
    fn vector(&self) -> DocResult<Vec<f32>> {
        Token::vector(self)
    }

    fn has_vector(&self) -> bool {
        Token::has_vector(self)
    }
}

impl HasVector for Span<'_> {
    fn vector(&self) -> DocResult<Vec<f32>> {
        Span::vector(self)
    }

    fn has_vector(&self) -> bool {
        Span::has_vector(self)
    }
}

/// Cosine similarity of two views.
///
/// Fails if either side has no vector or the widths differ. Zero-norm
/// vectors yield `0.0`.
pub fn similarity(a: &impl HasVector, b: &impl HasVector) -> DocResult<f32> {
    let va = a.vector()?;
    let vb = b.vector()?;
    if va.len() != vb.len() {
        return Err(DocError::VectorWidthMismatch {
            left: va.len(),
            right: vb.len(),
        });
    }
    match cosine(&va, &vb) {
        Some(sim) => Ok(sim),
        None => {
            warn!("similarity with a zero-norm vector; returning 0.0");
            Ok(0.0)
        }
    }
}

/// Mean of the vectors of `tokens`; `label` names the view in errors.
pub(crate) fn mean_of(tokens: Tokens<'_>, label: &str) -> DocResult<Vec<f32>> {
    let vectors = tokens.map(|t| t.vector()).collect::<DocResult<Vec<_>>>()?;
    mean_vector(vectors.iter().map(Vec::as_slice))
        .ok_or_else(|| DocError::Vocab(VocabError::MissingVector(label.to_string())))
}
