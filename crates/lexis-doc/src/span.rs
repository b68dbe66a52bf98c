use std::fmt;
use std::sync::Arc;

use lexis_types::StringId;
use serde::{Deserialize, Serialize};

use crate::doc::Doc;
use crate::error::{DocError, DocResult};
use crate::ext::Ext;
use crate::similarity::{self, HasVector};
use crate::token::{Token, Tokens};

/// A view of tokens `start..end` of a [`Doc`], with an optional label.
#[derive(Clone, Copy)]
pub struct Span<'d> {
    doc: &'d Doc,
    start: usize,
    end: usize,
    label: Option<StringId>,
}

impl<'d> Span<'d> {
    pub(crate) fn new(doc: &'d Doc, start: usize, end: usize, label: Option<StringId>) -> Self {
        debug_assert!(start <= end && end <= doc.len());
        Self {
            doc,
            start,
            end,
            label,
        }
    }

    pub fn doc(&self) -> &'d Doc {
        self.doc
    }

    /// Index of the first token.
    pub fn start(&self) -> usize {
        self.start
    }

    /// Index one past the last token.
    pub fn end(&self) -> usize {
        self.end
    }

    /// Number of tokens.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Byte offset of the span's first character.
    pub fn start_char(&self) -> usize {
        match self.doc.tokens.get(self.start) {
            Some(t) if !self.is_empty() => t.idx,
            _ => self.fallback_offset(),
        }
    }

    /// Byte offset one past the span's last character, excluding trailing
    /// whitespace.
    pub fn end_char(&self) -> usize {
        if self.is_empty() {
            return self.fallback_offset();
        }
        self.doc.tokens[self.end - 1].end()
    }

    /// Offset for empty spans: the start of the next token, or the end of
    /// the text.
    fn fallback_offset(&self) -> usize {
        self.doc
            .tokens
            .get(self.start)
            .map(|t| t.idx)
            .unwrap_or(self.doc.text().len())
    }

    /// The covered text, without the trailing space of the last token.
    pub fn text(&self) -> &'d str {
        &self.doc.text()[self.start_char()..self.end_char()]
    }

    /// The covered text including the trailing space of the last token.
    pub fn text_with_ws(&self) -> &'d str {
        if self.is_empty() {
            return "";
        }
        let last = &self.doc.tokens[self.end - 1];
        let end = last.end() + usize::from(last.spacy);
        &self.doc.text()[self.start_char()..end]
    }

    /// The label, if any.
    pub fn label(&self) -> Option<Arc<str>> {
        self.label.and_then(|id| self.doc.vocab().resolve(id).ok())
    }

    pub fn label_id(&self) -> Option<StringId> {
        self.label
    }

    /// Token `i` of the span, counted from the span start.
    pub fn token(&self, i: usize) -> DocResult<Token<'d>> {
        if i >= self.len() {
            return Err(DocError::IndexOutOfRange {
                index: i as isize,
                len: self.len(),
            });
        }
        Ok(Token::new(self.doc, self.start + i))
    }

    /// Iterate over the span's tokens in order.
    pub fn iter(&self) -> Tokens<'d> {
        Tokens::new(self.doc, self.start, self.end)
    }

    /// A sub-span, with bounds relative to this span.
    pub fn subspan(&self, start: usize, end: usize) -> DocResult<Span<'d>> {
        if start > self.len() || end > self.len() {
            return Err(DocError::SpanOutOfRange {
                start,
                end,
                len: self.len(),
            });
        }
        if start > end {
            return Err(DocError::InvalidSpan { start, end });
        }
        Ok(Span::new(self.doc, self.start + start, self.start + end, None))
    }

    /// The owned description of this span, for passing to
    /// [`Doc::set_ents`].
    pub fn range(&self) -> SpanRange {
        SpanRange {
            start: self.start,
            end: self.end,
            label: self.label().map(|l| l.to_string()),
        }
    }

    /// Mean of the token vectors.
    pub fn vector(&self) -> DocResult<Vec<f32>> {
        similarity::mean_of(self.iter(), self.text())
    }

    /// Returns `true` if every token has a vector.
    pub fn has_vector(&self) -> bool {
        !self.is_empty() && self.iter().all(|t| t.has_vector())
    }

    /// Cosine similarity with any other view.
    pub fn similarity(&self, other: &impl HasVector) -> DocResult<f32> {
        similarity::similarity(self, other)
    }

    /// Accessor for this span's extension attributes.
    pub fn ext(&self) -> Ext<'d> {
        Ext::for_span(*self)
    }
}

impl<'d> IntoIterator for Span<'d> {
    type Item = Token<'d>;
    type IntoIter = Tokens<'d>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl PartialEq for Span<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.doc, other.doc)
            && self.start == other.start
            && self.end == other.end
            && self.label == other.label
    }
}

impl Eq for Span<'_> {}

impl fmt::Display for Span<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

impl fmt::Debug for Span<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Span")
            .field("start", &self.start)
            .field("end", &self.end)
            .field("text", &self.text())
            .field("label", &self.label())
            .finish()
    }
}

/// An owned token range with an optional label.
///
/// This is what matchers produce and what [`Doc::set_ents`] consumes; it
/// carries no borrow of the document.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SpanRange {
    pub start: usize,
    pub end: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl SpanRange {
    pub fn new(start: usize, end: usize) -> Self {
        Self {
            start,
            end,
            label: None,
        }
    }

    pub fn labeled(start: usize, end: usize, label: impl Into<String>) -> Self {
        Self {
            start,
            end,
            label: Some(label.into()),
        }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` if the two ranges share at least one token.
    pub fn overlaps(&self, other: &SpanRange) -> bool {
        self.start < other.end && other.start < self.end
    }
}
