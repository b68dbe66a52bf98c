//! The document: a token arena over one text buffer.
//!
//! [`Doc`] owns the text, one [`TokenData`] record per token and the
//! annotation layers. [`Token`] and [`Span`] are `Copy` views holding a
//! `&Doc` plus an index or range, so they can never outlive the document
//! and never copy token data.
//!
//! # Invariants
//!
//! - Tokens partition the text: token `i + 1` starts where token `i` ends,
//!   plus one byte if token `i` has its trailing-space flag set.
//! - Every token, including the last, carries a trailing-space flag.
//! - Entity spans are sorted, within bounds and pairwise non-overlapping.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, RwLock};

use lexis_types::StringId;
use lexis_vocab::{Lexeme, Vocab};
use serde_json::Value;
use tracing::debug;

use crate::annotation::TokenAnnotation;
use crate::error::{DocError, DocResult};
use crate::ext::{Ext, ExtSlot};
use crate::extension::ExtensionRegistry;
use crate::similarity::{self, HasVector};
use crate::span::{Span, SpanRange};
use crate::token::{Token, Tokens};

/// Per-token record stored in the document's arena.
#[derive(Clone, Debug)]
pub(crate) struct TokenData {
    pub(crate) lex: Arc<Lexeme>,
    /// Byte offset of the token in the document text.
    pub(crate) idx: usize,
    /// Whether a single space follows the token.
    pub(crate) spacy: bool,
    pub(crate) lemma: Option<StringId>,
    pub(crate) pos: Option<StringId>,
    pub(crate) tag: Option<StringId>,
    pub(crate) dep: Option<StringId>,
    pub(crate) head: Option<usize>,
}

impl TokenData {
    fn new(lex: Arc<Lexeme>, idx: usize, spacy: bool) -> Self {
        Self {
            lex,
            idx,
            spacy,
            lemma: None,
            pos: None,
            tag: None,
            dep: None,
            head: None,
        }
    }

    /// Byte offset one past the token's last byte.
    pub(crate) fn end(&self) -> usize {
        self.idx + self.lex.text().len()
    }
}

/// Stored entity: a token range with an interned label.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct EntData {
    pub(crate) start: usize,
    pub(crate) end: usize,
    pub(crate) label: Option<StringId>,
}

/// A document: text, tokens and annotation layers.
pub struct Doc {
    vocab: Arc<Vocab>,
    extensions: Arc<ExtensionRegistry>,
    text: String,
    pub(crate) tokens: Vec<TokenData>,
    ents: Vec<EntData>,
    ext_values: RwLock<HashMap<ExtSlot, HashMap<String, Value>>>,
}

impl Doc {
    // ---------------------------------------------------------------
    // Construction
    // ---------------------------------------------------------------

    /// Build a document from words and trailing-space flags, with an empty
    /// extension registry.
    pub fn new<S: AsRef<str>>(vocab: Arc<Vocab>, words: &[S], spaces: &[bool]) -> DocResult<Self> {
        Self::with_extensions(vocab, Arc::new(ExtensionRegistry::new()), words, spaces)
    }

    /// Build a document in which every word is followed by a space.
    pub fn from_words<S: AsRef<str>>(vocab: Arc<Vocab>, words: &[S]) -> DocResult<Self> {
        Self::new(vocab, words, &vec![true; words.len()])
    }

    /// Build a document from words and trailing-space flags.
    ///
    /// Every word is interned into `vocab`. The text is the concatenation
    /// of the words with one space after word `i` iff `spaces[i]`, the last
    /// word included. Construction is all-or-nothing: inputs are validated
    /// before anything is interned, and no document is returned on error.
    pub fn with_extensions<S: AsRef<str>>(
        vocab: Arc<Vocab>,
        extensions: Arc<ExtensionRegistry>,
        words: &[S],
        spaces: &[bool],
    ) -> DocResult<Self> {
        if words.len() != spaces.len() {
            return Err(DocError::LengthMismatch {
                words: words.len(),
                spaces: spaces.len(),
            });
        }
        if let Some(index) = words.iter().position(|w| w.as_ref().is_empty()) {
            return Err(DocError::EmptyWord { index });
        }

        let capacity = words.iter().map(|w| w.as_ref().len() + 1).sum();
        let mut text = String::with_capacity(capacity);
        let mut tokens = Vec::with_capacity(words.len());
        for (word, &space) in words.iter().zip(spaces) {
            let word = word.as_ref();
            let lex = vocab.lexeme(word)?;
            tokens.push(TokenData::new(lex, text.len(), space));
            text.push_str(word);
            if space {
                text.push(' ');
            }
        }

        debug!(tokens = tokens.len(), bytes = text.len(), "built doc");
        Ok(Self {
            vocab,
            extensions,
            text,
            tokens,
            ents: Vec::new(),
            ext_values: RwLock::new(HashMap::new()),
        })
    }

    // ---------------------------------------------------------------
    // Accessors
    // ---------------------------------------------------------------

    /// The shared vocabulary.
    pub fn vocab(&self) -> &Arc<Vocab> {
        &self.vocab
    }

    /// The extension registry this document resolves `ext()` names against.
    pub fn extensions(&self) -> &Arc<ExtensionRegistry> {
        &self.extensions
    }

    /// The full text, including any trailing space of the last token.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Number of tokens.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Returns `true` if the document has no tokens.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// The token at `i`.
    pub fn token(&self, i: usize) -> DocResult<Token<'_>> {
        self.get(i).ok_or(DocError::IndexOutOfRange {
            index: i as isize,
            len: self.len(),
        })
    }

    /// The token at `i`, or `None` if out of range.
    pub fn get(&self, i: usize) -> Option<Token<'_>> {
        (i < self.len()).then(|| Token::new(self, i))
    }

    /// Iterate over the tokens in order.
    pub fn iter(&self) -> Tokens<'_> {
        Tokens::new(self, 0, self.len())
    }

    /// The words, in order.
    pub fn words(&self) -> Vec<&str> {
        self.tokens.iter().map(|t| t.lex.text()).collect()
    }

    /// The trailing-space flags, in order.
    pub fn spaces(&self) -> Vec<bool> {
        self.tokens.iter().map(|t| t.spacy).collect()
    }

    // ---------------------------------------------------------------
    // Spans
    // ---------------------------------------------------------------

    /// The span of tokens `start..end`.
    ///
    /// Out-of-range bounds are rejected rather than clamped.
    pub fn span(&self, start: usize, end: usize) -> DocResult<Span<'_>> {
        self.check_span(start, end)?;
        Ok(Span::new(self, start, end, None))
    }

    /// The span of tokens `start..end` with a label.
    pub fn span_labeled(&self, start: usize, end: usize, label: &str) -> DocResult<Span<'_>> {
        self.check_span(start, end)?;
        let label = self.vocab.intern(label)?;
        Ok(Span::new(self, start, end, Some(label)))
    }

    pub(crate) fn check_span(&self, start: usize, end: usize) -> DocResult<()> {
        let len = self.len();
        if start > len || end > len {
            return Err(DocError::SpanOutOfRange { start, end, len });
        }
        if start > end {
            return Err(DocError::InvalidSpan { start, end });
        }
        Ok(())
    }

    // ---------------------------------------------------------------
    // Entities
    // ---------------------------------------------------------------

    /// The entity spans, sorted by position.
    pub fn ents(&self) -> Vec<Span<'_>> {
        self.ents
            .iter()
            .map(|e| Span::new(self, e.start, e.end, e.label))
            .collect()
    }

    /// Set the entity spans.
    ///
    /// The new spans must lie within the document, must not overlap each
    /// other, and must not overlap a current entity unless they cover
    /// exactly the same tokens. On success the new spans replace the current
    /// ones; on error the current entities are left unchanged. Use
    /// [`Doc::replace_ents`] to discard the current entities regardless.
    pub fn set_ents<I>(&mut self, ents: I) -> DocResult<()>
    where
        I: IntoIterator<Item = SpanRange>,
    {
        let ranges = self.check_ents(ents)?;
        for range in &ranges {
            let conflict = self.ents.iter().find(|e| {
                let same = (e.start, e.end) == (range.start, range.end);
                !same && range.start < e.end && e.start < range.end
            });
            if let Some(existing) = conflict {
                return Err(DocError::OverlappingEntities {
                    first_start: existing.start,
                    first_end: existing.end,
                    second_start: range.start,
                    second_end: range.end,
                });
            }
        }
        self.store_ents(ranges)
    }

    /// Replace the entity spans without regard to the current ones.
    ///
    /// The new spans are validated as in [`Doc::set_ents`] except for the
    /// check against current entities.
    pub fn replace_ents<I>(&mut self, ents: I) -> DocResult<()>
    where
        I: IntoIterator<Item = SpanRange>,
    {
        let ranges = self.check_ents(ents)?;
        self.store_ents(ranges)
    }

    /// Remove every entity span.
    pub fn clear_ents(&mut self) {
        self.ents.clear();
    }

    /// Bounds and pairwise overlap checks; returns the ranges sorted.
    fn check_ents<I>(&self, ents: I) -> DocResult<Vec<SpanRange>>
    where
        I: IntoIterator<Item = SpanRange>,
    {
        let mut ranges: Vec<SpanRange> = ents.into_iter().collect();
        for range in &ranges {
            self.check_span(range.start, range.end)?;
        }
        ranges.sort_by_key(|r| (r.start, r.end));
        for pair in ranges.windows(2) {
            if pair[1].start < pair[0].end {
                return Err(DocError::OverlappingEntities {
                    first_start: pair[0].start,
                    first_end: pair[0].end,
                    second_start: pair[1].start,
                    second_end: pair[1].end,
                });
            }
        }
        Ok(ranges)
    }

    fn store_ents(&mut self, ranges: Vec<SpanRange>) -> DocResult<()> {
        let mut ents = Vec::with_capacity(ranges.len());
        for range in ranges {
            let label = match &range.label {
                Some(label) => Some(self.vocab.intern(label)?),
                None => None,
            };
            ents.push(EntData {
                start: range.start,
                end: range.end,
                label,
            });
        }
        debug!(count = ents.len(), "set entities");
        self.ents = ents;
        Ok(())
    }

    /// The entity covering token `i`, if any.
    pub(crate) fn ent_at(&self, i: usize) -> Option<EntData> {
        let pos = self.ents.partition_point(|e| e.end <= i);
        self.ents
            .get(pos)
            .copied()
            .filter(|e| e.start <= i && i < e.end)
    }

    // ---------------------------------------------------------------
    // Token annotations
    // ---------------------------------------------------------------

    /// Set context-dependent annotations on token `i`.
    ///
    /// Only the fields that are `Some` in `annotation` are written; the
    /// others keep their current value.
    pub fn annotate(&mut self, i: usize, annotation: TokenAnnotation) -> DocResult<()> {
        let len = self.len();
        if i >= len {
            return Err(DocError::IndexOutOfRange {
                index: i as isize,
                len,
            });
        }
        if let Some(head) = annotation.head {
            if head >= len {
                return Err(DocError::InvalidHead { token: i, head, len });
            }
        }

        let intern = |s: &Option<String>| -> DocResult<Option<StringId>> {
            s.as_deref()
                .map(|s| self.vocab.intern(s))
                .transpose()
                .map_err(DocError::from)
        };
        let lemma = intern(&annotation.lemma)?;
        let pos = intern(&annotation.pos)?;
        let tag = intern(&annotation.tag)?;
        let dep = intern(&annotation.dep)?;

        let token = &mut self.tokens[i];
        token.lemma = lemma.or(token.lemma);
        token.pos = pos.or(token.pos);
        token.tag = tag.or(token.tag);
        token.dep = dep.or(token.dep);
        token.head = annotation.head.or(token.head);
        Ok(())
    }

    // ---------------------------------------------------------------
    // Vectors
    // ---------------------------------------------------------------

    /// Mean of the token vectors.
    pub fn vector(&self) -> DocResult<Vec<f32>> {
        similarity::mean_of(self.iter(), self.text())
    }

    /// Returns `true` if every token has a vector.
    pub fn has_vector(&self) -> bool {
        !self.is_empty() && self.iter().all(|t| t.has_vector())
    }

    /// Cosine similarity with any other view, using mean vectors.
    pub fn similarity(&self, other: &impl HasVector) -> DocResult<f32> {
        similarity::similarity(self, other)
    }

    // ---------------------------------------------------------------
    // Extension attributes
    // ---------------------------------------------------------------

    /// Accessor for the document's extension attributes.
    pub fn ext(&self) -> Ext<'_> {
        Ext::for_doc(self)
    }

    /// The stored value of an extension on `slot`, initialising it with a
    /// copy of `default` on first read.
    pub(crate) fn ext_value_or_default(&self, slot: ExtSlot, name: &str, default: &Value) -> Value {
        {
            let values = self.ext_values.read().expect("lock poisoned");
            if let Some(value) = values.get(&slot).and_then(|m| m.get(name)) {
                return value.clone();
            }
        }
        let mut values = self.ext_values.write().expect("lock poisoned");
        values
            .entry(slot)
            .or_default()
            .entry(name.to_string())
            .or_insert_with(|| default.clone())
            .clone()
    }

    /// Store a value for an extension on `slot`.
    pub(crate) fn set_ext_value(&self, slot: ExtSlot, name: &str, value: Value) {
        let mut values = self.ext_values.write().expect("lock poisoned");
        values
            .entry(slot)
            .or_default()
            .insert(name.to_string(), value);
    }
}

impl<'d> IntoIterator for &'d Doc {
    type Item = Token<'d>;
    type IntoIter = Tokens<'d>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for Doc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl fmt::Debug for Doc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Doc")
            .field("text", &self.text)
            .field("tokens", &self.len())
            .field("ents", &self.ents.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lexis_strings::StringStore;
    use lexis_types::ErrorKind;
    use proptest::prelude::*;

    fn vocab() -> Arc<Vocab> {
        Arc::new(Vocab::new())
    }

    fn sky() -> Doc {
        Doc::new(
            vocab(),
            &["The", "sky", "is", "blue", "."],
            &[true, true, true, false, false],
        )
        .unwrap()
    }

    // -----------------------------------------------------------------------
    // Construction
    // -----------------------------------------------------------------------

    #[test]
    fn build_reconstructs_text() {
        let doc = Doc::new(vocab(), &["Hello", "world", "!"], &[true, false, false]).unwrap();
        assert_eq!(doc.text(), "Hello world!");
        assert_eq!(doc.len(), 3);
        assert_eq!(doc.to_string(), "Hello world!");
    }

    #[test]
    fn trailing_space_is_kept() {
        let doc = Doc::new(vocab(), &["Hi"], &[true]).unwrap();
        assert_eq!(doc.text(), "Hi ");
        assert!(doc.token(0).unwrap().has_space_after());
    }

    #[test]
    fn from_words_adds_spaces() {
        let doc = Doc::from_words(vocab(), &["a", "b"]).unwrap();
        assert_eq!(doc.text(), "a b ");
    }

    #[test]
    fn length_mismatch_fails() {
        let err = Doc::new(vocab(), &["a", "b"], &[true]).unwrap_err();
        assert_eq!(err, DocError::LengthMismatch { words: 2, spaces: 1 });
        assert_eq!(err.kind(), ErrorKind::Value);
    }

    #[test]
    fn empty_word_fails_before_interning() {
        let vocab = vocab();
        let err = Doc::new(Arc::clone(&vocab), &["fresh", ""], &[true, false]).unwrap_err();
        assert_eq!(err, DocError::EmptyWord { index: 1 });
        assert!(vocab.strings().lookup("fresh").is_none());
    }

    #[test]
    fn words_are_interned() {
        let vocab = vocab();
        let doc = Doc::new(Arc::clone(&vocab), &["I", "love", "coffee"], &[true, true, false])
            .unwrap();
        let id = vocab.strings().lookup("coffee").unwrap();
        assert_eq!(doc.token(2).unwrap().orth(), id);
        assert_eq!(&*vocab.resolve(id).unwrap(), "coffee");
    }

    #[test]
    fn empty_doc() {
        let doc = Doc::new::<&str>(vocab(), &[], &[]).unwrap();
        assert!(doc.is_empty());
        assert_eq!(doc.text(), "");
        assert_eq!(doc.iter().count(), 0);
        assert!(doc.span(0, 0).unwrap().is_empty());
    }

    // -----------------------------------------------------------------------
    // Indexing
    // -----------------------------------------------------------------------

    #[test]
    fn token_out_of_range() {
        let doc = sky();
        let err = doc.token(5).unwrap_err();
        assert_eq!(err, DocError::IndexOutOfRange { index: 5, len: 5 });
        assert_eq!(err.kind(), ErrorKind::Index);
        assert!(doc.get(5).is_none());
    }

    #[test]
    fn iteration_is_restartable() {
        let doc = sky();
        let first: Vec<&str> = doc.iter().map(|t| t.text()).collect();
        let second: Vec<&str> = (&doc).into_iter().map(|t| t.text()).collect();
        assert_eq!(first, second);
        assert_eq!(first, vec!["The", "sky", "is", "blue", "."]);
    }

    #[test]
    fn span_bounds() {
        let doc = sky();
        assert_eq!(doc.span(1, 4).unwrap().text(), "sky is blue");
        assert_eq!(
            doc.span(3, 6).unwrap_err(),
            DocError::SpanOutOfRange {
                start: 3,
                end: 6,
                len: 5
            }
        );
        assert_eq!(
            doc.span(3, 2).unwrap_err(),
            DocError::InvalidSpan { start: 3, end: 2 }
        );
    }

    // -----------------------------------------------------------------------
    // Entities
    // -----------------------------------------------------------------------

    #[test]
    fn set_and_read_ents() {
        let mut doc = Doc::new(vocab(), &["Hello", "world", "!"], &[true, false, false]).unwrap();
        doc.set_ents([SpanRange::labeled(0, 2, "GREETING")]).unwrap();
        let ents = doc.ents();
        assert_eq!(ents.len(), 1);
        assert_eq!(ents[0].text(), "Hello world");
        assert_eq!(ents[0].label().as_deref(), Some("GREETING"));
    }

    #[test]
    fn overlapping_ents_leave_previous_unchanged() {
        let mut doc = sky();
        doc.set_ents([SpanRange::new(0, 2)]).unwrap();
        let err = doc.set_ents([SpanRange::new(1, 3)]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Value);
        assert_eq!(
            err,
            DocError::OverlappingEntities {
                first_start: 0,
                first_end: 2,
                second_start: 1,
                second_end: 3
            }
        );
        let err = doc
            .set_ents([SpanRange::new(0, 2), SpanRange::new(1, 3)])
            .unwrap_err();
        assert_eq!(
            err,
            DocError::OverlappingEntities {
                first_start: 0,
                first_end: 2,
                second_start: 1,
                second_end: 3
            }
        );
        let ents = doc.ents();
        assert_eq!(ents.len(), 1);
        assert_eq!((ents[0].start(), ents[0].end()), (0, 2));
    }

    #[test]
    fn out_of_bounds_ents_rejected() {
        let mut doc = sky();
        let err = doc.set_ents([SpanRange::new(4, 9)]).unwrap_err();
        assert_eq!(
            err,
            DocError::SpanOutOfRange {
                start: 4,
                end: 9,
                len: 5
            }
        );
        assert_eq!(err.kind(), ErrorKind::Index);
        let err = doc.set_ents([SpanRange::new(3, 2)]).unwrap_err();
        assert_eq!(err, DocError::InvalidSpan { start: 3, end: 2 });
        assert!(doc.ents().is_empty());
    }

    #[test]
    fn set_ents_replaces_compatible_entities() {
        let mut doc = sky();
        doc.set_ents([SpanRange::labeled(0, 2, "A")]).unwrap();
        doc.set_ents([SpanRange::labeled(0, 2, "B"), SpanRange::new(3, 4)])
            .unwrap();
        let ents: Vec<(usize, usize, Option<String>)> = doc
            .ents()
            .iter()
            .map(|e| (e.start(), e.end(), e.label().map(|l| l.to_string())))
            .collect();
        assert_eq!(ents, vec![(0, 2, Some("B".to_string())), (3, 4, None)]);
    }

    #[test]
    fn replace_and_clear_ignore_current_entities() {
        let mut doc = sky();
        doc.set_ents([SpanRange::new(0, 2)]).unwrap();
        doc.replace_ents([SpanRange::new(1, 3)]).unwrap();
        let ents: Vec<(usize, usize)> = doc.ents().iter().map(|e| (e.start(), e.end())).collect();
        assert_eq!(ents, vec![(1, 3)]);
        assert!(doc
            .replace_ents([SpanRange::new(0, 2), SpanRange::new(1, 3)])
            .is_err());
        assert_eq!(doc.ents().len(), 1);
        doc.clear_ents();
        assert!(doc.ents().is_empty());
        doc.set_ents([SpanRange::new(0, 2)]).unwrap();
    }

    #[test]
    fn ents_are_sorted_and_adjacent_allowed() {
        let mut doc = sky();
        doc.set_ents([SpanRange::new(3, 4), SpanRange::new(1, 3)]).unwrap();
        let ents: Vec<(usize, usize)> = doc.ents().iter().map(|e| (e.start(), e.end())).collect();
        assert_eq!(ents, vec![(1, 3), (3, 4)]);
        assert_eq!(doc.ent_at(2).map(|e| e.start), Some(1));
        assert_eq!(doc.ent_at(3).map(|e| e.start), Some(3));
        assert!(doc.ent_at(0).is_none());
    }

    // -----------------------------------------------------------------------
    // Annotations
    // -----------------------------------------------------------------------

    #[test]
    fn annotate_merges_fields() {
        let mut doc = Doc::new(
            vocab(),
            &["She", "ate", "the", "pizza", "."],
            &[true, true, true, false, false],
        )
        .unwrap();
        doc.annotate(1, TokenAnnotation::new().pos("VERB").lemma("eat"))
            .unwrap();
        doc.annotate(1, TokenAnnotation::new().dep("ROOT").head(1))
            .unwrap();
        let ate = doc.token(1).unwrap();
        assert_eq!(ate.pos().as_deref(), Some("VERB"));
        assert_eq!(ate.lemma().as_deref(), Some("eat"));
        assert_eq!(ate.dep().as_deref(), Some("ROOT"));
        assert_eq!(ate.head().map(|h| h.i()), Some(1));
    }

    #[test]
    fn annotate_rejects_bad_head() {
        let mut doc = sky();
        let err = doc
            .annotate(0, TokenAnnotation::new().head(10))
            .unwrap_err();
        assert_eq!(
            err,
            DocError::InvalidHead {
                token: 0,
                head: 10,
                len: 5
            }
        );
        assert!(doc.annotate(7, TokenAnnotation::new()).is_err());
    }

    proptest! {
        #[test]
        fn words_and_spaces_roundtrip(
            pairs in proptest::collection::vec(("[a-zA-Z0-9.,!?]{1,8}", any::<bool>()), 0..20)
        ) {
            let words: Vec<String> = pairs.iter().map(|(w, _)| w.clone()).collect();
            let spaces: Vec<bool> = pairs.iter().map(|(_, s)| *s).collect();
            let doc = Doc::new(vocab(), &words, &spaces).unwrap();

            let rebuilt: String = doc
                .iter()
                .map(|t| format!("{}{}", t.text(), if t.has_space_after() { " " } else { "" }))
                .collect();
            prop_assert_eq!(&rebuilt, doc.text());
            prop_assert_eq!(doc.words(), words.iter().map(String::as_str).collect::<Vec<_>>());
            prop_assert_eq!(doc.spaces(), spaces);
        }

        #[test]
        fn spans_have_requested_length(n in 0usize..12, a in 0usize..12, b in 0usize..12) {
            let words: Vec<String> = (0..n).map(|i| format!("w{i}")).collect();
            let doc = Doc::from_words(vocab(), &words).unwrap();
            let (a, b) = (a.min(b), a.max(b));
            if b <= n {
                let span = doc.span(a, b).unwrap();
                prop_assert_eq!(span.len(), b - a);
                let idx: Vec<usize> = span.iter().map(|t| t.i()).collect();
                prop_assert_eq!(idx, (a..b).collect::<Vec<_>>());
            } else {
                prop_assert!(doc.span(a, b).is_err());
            }
        }
    }
}
