use std::fmt;
use std::iter::FusedIterator;
use std::sync::Arc;

use lexis_types::{AttrValue, LexAttr, StringId};
use lexis_vocab::{LexFlags, Lexeme, VocabError};

use crate::doc::{Doc, TokenData};
use crate::error::{DocError, DocResult};
use crate::ext::Ext;
use crate::similarity::{self, HasVector};

/// A view of one token in a [`Doc`].
///
/// Cheap to copy. Lexical attributes come from the shared [`Lexeme`];
/// annotations, offsets and the trailing-space flag come from the
/// document.
#[derive(Clone, Copy)]
pub struct Token<'d> {
    doc: &'d Doc,
    i: usize,
}

impl<'d> Token<'d> {
    pub(crate) fn new(doc: &'d Doc, i: usize) -> Self {
        debug_assert!(i < doc.len());
        Self { doc, i }
    }

    fn data(&self) -> &'d TokenData {
        &self.doc.tokens[self.i]
    }

    /// The document this token belongs to.
    pub fn doc(&self) -> &'d Doc {
        self.doc
    }

    /// Index of the token in the document.
    pub fn i(&self) -> usize {
        self.i
    }

    /// Byte offset of the token in the document text.
    pub fn idx(&self) -> usize {
        self.data().idx
    }

    /// The verbatim text.
    pub fn text(&self) -> &'d str {
        let data = self.data();
        &self.doc.text()[data.idx..data.end()]
    }

    /// The text plus its trailing space, if any.
    pub fn text_with_ws(&self) -> &'d str {
        let data = self.data();
        let end = data.end() + usize::from(data.spacy);
        &self.doc.text()[data.idx..end]
    }

    /// `" "` if a space follows the token, `""` otherwise.
    pub fn whitespace(&self) -> &'static str {
        if self.data().spacy {
            " "
        } else {
            ""
        }
    }

    pub fn has_space_after(&self) -> bool {
        self.data().spacy
    }

    // ---------------------------------------------------------------
    // Lexical attributes
    // ---------------------------------------------------------------

    /// Id of the token text.
    pub fn orth(&self) -> StringId {
        self.data().lex.orth()
    }

    /// The shared lexeme.
    pub fn lexeme(&self) -> &'d Arc<Lexeme> {
        &self.data().lex
    }

    pub fn lower(&self) -> &'d str {
        self.data().lex.lower()
    }

    pub fn norm(&self) -> &'d str {
        self.data().lex.norm()
    }

    pub fn shape(&self) -> &'d str {
        self.data().lex.shape()
    }

    pub fn prefix(&self) -> &'d str {
        self.data().lex.prefix()
    }

    pub fn suffix(&self) -> &'d str {
        self.data().lex.suffix()
    }

    pub fn flags(&self) -> LexFlags {
        self.data().lex.flags()
    }

    pub fn is_alpha(&self) -> bool {
        self.flags().is_alpha
    }

    pub fn is_digit(&self) -> bool {
        self.flags().is_digit
    }

    pub fn is_punct(&self) -> bool {
        self.flags().is_punct
    }

    pub fn is_space(&self) -> bool {
        self.flags().is_space
    }

    pub fn is_currency(&self) -> bool {
        self.flags().is_currency
    }

    pub fn like_num(&self) -> bool {
        self.flags().like_num
    }

    // ---------------------------------------------------------------
    // Annotations
    // ---------------------------------------------------------------

    pub fn lemma(&self) -> Option<Arc<str>> {
        self.resolve(self.data().lemma)
    }

    /// Coarse part-of-speech tag.
    pub fn pos(&self) -> Option<Arc<str>> {
        self.resolve(self.data().pos)
    }

    /// Fine-grained tag.
    pub fn tag(&self) -> Option<Arc<str>> {
        self.resolve(self.data().tag)
    }

    /// Dependency label.
    pub fn dep(&self) -> Option<Arc<str>> {
        self.resolve(self.data().dep)
    }

    /// The syntactic head, if annotated.
    pub fn head(&self) -> Option<Token<'d>> {
        self.data().head.map(|h| Token::new(self.doc, h))
    }

    /// Label of the entity covering this token.
    pub fn ent_type(&self) -> Option<Arc<str>> {
        self.resolve(self.doc.ent_at(self.i).and_then(|e| e.label))
    }

    /// Returns `true` if the token is inside an entity span.
    pub fn in_entity(&self) -> bool {
        self.doc.ent_at(self.i).is_some()
    }

    fn resolve(&self, id: Option<StringId>) -> Option<Arc<str>> {
        id.and_then(|id| self.doc.vocab().resolve(id).ok())
    }

    /// The token `offset` positions away.
    pub fn nbor(&self, offset: isize) -> DocResult<Token<'d>> {
        let target = self.i as isize + offset;
        if target < 0 || target as usize >= self.doc.len() {
            return Err(DocError::IndexOutOfRange {
                index: target,
                len: self.doc.len(),
            });
        }
        Ok(Token::new(self.doc, target as usize))
    }

    /// Look up an attribute by name.
    ///
    /// Returns `None` for annotation attributes that are unset.
    pub fn attr(&self, attr: LexAttr) -> Option<AttrValue> {
        let flags = self.flags();
        let value = match attr {
            LexAttr::Orth => AttrValue::from(self.text()),
            LexAttr::Lower => AttrValue::from(self.lower()),
            LexAttr::Norm => AttrValue::from(self.norm()),
            LexAttr::Shape => AttrValue::from(self.shape()),
            LexAttr::Prefix => AttrValue::from(self.prefix()),
            LexAttr::Suffix => AttrValue::from(self.suffix()),
            LexAttr::Length => AttrValue::Int(self.data().lex.len() as i64),
            LexAttr::IsAlpha => flags.is_alpha.into(),
            LexAttr::IsAscii => flags.is_ascii.into(),
            LexAttr::IsDigit => flags.is_digit.into(),
            LexAttr::IsLower => flags.is_lower.into(),
            LexAttr::IsUpper => flags.is_upper.into(),
            LexAttr::IsTitle => flags.is_title.into(),
            LexAttr::IsPunct => flags.is_punct.into(),
            LexAttr::IsLeftPunct => flags.is_left_punct.into(),
            LexAttr::IsRightPunct => flags.is_right_punct.into(),
            LexAttr::IsSpace => flags.is_space.into(),
            LexAttr::IsBracket => flags.is_bracket.into(),
            LexAttr::IsQuote => flags.is_quote.into(),
            LexAttr::IsCurrency => flags.is_currency.into(),
            LexAttr::LikeNum => flags.like_num.into(),
            LexAttr::LikeUrl => flags.like_url.into(),
            LexAttr::LikeEmail => flags.like_email.into(),
            LexAttr::Lemma => return self.lemma().map(|s| AttrValue::from(&*s)),
            LexAttr::Pos => return self.pos().map(|s| AttrValue::from(&*s)),
            LexAttr::Tag => return self.tag().map(|s| AttrValue::from(&*s)),
            LexAttr::Dep => return self.dep().map(|s| AttrValue::from(&*s)),
            LexAttr::EntType => return self.ent_type().map(|s| AttrValue::from(&*s)),
        };
        Some(value)
    }

    // ---------------------------------------------------------------
    // Vectors
    // ---------------------------------------------------------------

    /// The vector of the token's lexeme.
    pub fn vector(&self) -> DocResult<Vec<f32>> {
        self.doc
            .vocab()
            .vector(self.orth())
            .map(|v| v.to_vec())
            .ok_or_else(|| DocError::Vocab(VocabError::MissingVector(self.text().to_string())))
    }

    pub fn has_vector(&self) -> bool {
        self.doc.vocab().has_vector(self.orth())
    }

    /// Cosine similarity with any other view.
    pub fn similarity(&self, other: &impl HasVector) -> DocResult<f32> {
        similarity::similarity(self, other)
    }

    // ---------------------------------------------------------------
    // Extension attributes
    // ---------------------------------------------------------------

    /// Accessor for this token's extension attributes.
    pub fn ext(&self) -> Ext<'d> {
        Ext::for_token(*self)
    }
}

impl PartialEq for Token<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.doc, other.doc) && self.i == other.i
    }
}

impl Eq for Token<'_> {}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

impl fmt::Debug for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Token")
            .field("i", &self.i)
            .field("text", &self.text())
            .finish()
    }
}

/// Iterator over a contiguous run of tokens.
#[derive(Clone)]
pub struct Tokens<'d> {
    doc: &'d Doc,
    front: usize,
    back: usize,
}

impl<'d> Tokens<'d> {
    pub(crate) fn new(doc: &'d Doc, start: usize, end: usize) -> Self {
        Self {
            doc,
            front: start,
            back: end,
        }
    }
}

impl<'d> Iterator for Tokens<'d> {
    type Item = Token<'d>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        let token = Token::new(self.doc, self.front);
        self.front += 1;
        Some(token)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.back.saturating_sub(self.front);
        (n, Some(n))
    }
}

impl DoubleEndedIterator for Tokens<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        self.back -= 1;
        Some(Token::new(self.doc, self.back))
    }
}

impl ExactSizeIterator for Tokens<'_> {}

impl FusedIterator for Tokens<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotation::TokenAnnotation;
    use crate::span::SpanRange;
    use lexis_types::ErrorKind;
    use lexis_vocab::Vocab;

    fn doc(words: &[&str], spaces: &[bool]) -> Doc {
        Doc::new(Arc::new(Vocab::new()), words, spaces).unwrap()
    }

    // -----------------------------------------------------------------------
    // Text and offsets
    // -----------------------------------------------------------------------

    #[test]
    fn text_and_offsets() {
        let doc = doc(&["Hello", "world", "!"], &[true, false, false]);
        let world = doc.token(1).unwrap();
        assert_eq!(world.text(), "world");
        assert_eq!(world.idx(), 6);
        assert_eq!(world.text_with_ws(), "world");
        assert_eq!(doc.token(0).unwrap().text_with_ws(), "Hello ");
        assert_eq!(doc.token(0).unwrap().whitespace(), " ");
        assert_eq!(world.to_string(), "world");
    }

    #[test]
    fn lexical_attributes() {
        let doc = doc(
            &["It", "costs", "$", "5", "."],
            &[true, true, false, false, false],
        );
        let texts: Vec<&str> = doc.iter().map(|t| t.text()).collect();
        assert_eq!(texts, vec!["It", "costs", "$", "5", "."]);
        let five = doc.token(3).unwrap();
        assert!(five.like_num());
        assert!(five.is_digit());
        assert!(doc.token(2).unwrap().is_currency());
        assert!(doc.token(4).unwrap().is_punct());
        assert!(doc.token(0).unwrap().is_alpha());
        assert_eq!(doc.token(0).unwrap().lower(), "it");
        assert_eq!(doc.token(1).unwrap().shape(), "xxxx");
    }

    #[test]
    fn tokens_share_lexemes() {
        let doc = doc(&["coffee", "and", "coffee"], &[true, true, false]);
        let a = doc.token(0).unwrap();
        let b = doc.token(2).unwrap();
        assert!(Arc::ptr_eq(a.lexeme(), b.lexeme()));
        assert_ne!(a, b);
        assert_eq!(a, doc.token(0).unwrap());
    }

    // -----------------------------------------------------------------------
    // Attributes by name
    // -----------------------------------------------------------------------

    #[test]
    fn attr_lookup() {
        let mut doc = doc(&["FIFA", "won"], &[true, false]);
        let fifa = doc.token(0).unwrap();
        assert_eq!(fifa.attr(LexAttr::Lower), Some(AttrValue::from("fifa")));
        assert_eq!(fifa.attr(LexAttr::IsUpper), Some(AttrValue::Bool(true)));
        assert_eq!(fifa.attr(LexAttr::Length), Some(AttrValue::Int(4)));
        assert_eq!(fifa.attr(LexAttr::Pos), None);

        doc.annotate(0, TokenAnnotation::new().pos("PROPN")).unwrap();
        doc.set_ents([SpanRange::labeled(0, 1, "ORG")]).unwrap();
        let fifa = doc.token(0).unwrap();
        assert_eq!(fifa.attr(LexAttr::Pos), Some(AttrValue::from("PROPN")));
        assert_eq!(fifa.attr(LexAttr::EntType), Some(AttrValue::from("ORG")));
        assert!(fifa.in_entity());
        assert!(!doc.token(1).unwrap().in_entity());
    }

    // -----------------------------------------------------------------------
    // Neighbours
    // -----------------------------------------------------------------------

    #[test]
    fn nbor_within_and_outside() {
        let doc = doc(&["a", "b", "c"], &[true, true, false]);
        let b = doc.token(1).unwrap();
        assert_eq!(b.nbor(1).unwrap().text(), "c");
        assert_eq!(b.nbor(-1).unwrap().text(), "a");
        let err = b.nbor(-2).unwrap_err();
        assert_eq!(err, DocError::IndexOutOfRange { index: -1, len: 3 });
        assert_eq!(err.kind(), ErrorKind::Index);
        assert!(b.nbor(2).is_err());
    }

    // -----------------------------------------------------------------------
    // Iterator
    // -----------------------------------------------------------------------

    #[test]
    fn iterator_is_double_ended_and_exact() {
        let doc = doc(&["a", "b", "c"], &[true, true, false]);
        let mut it = doc.iter();
        assert_eq!(it.len(), 3);
        assert_eq!(it.next_back().map(|t| t.text()), Some("c"));
        assert_eq!(it.next().map(|t| t.text()), Some("a"));
        assert_eq!(it.len(), 1);
        assert_eq!(it.next().map(|t| t.text()), Some("b"));
        assert!(it.next().is_none());
        assert!(it.next_back().is_none());
    }
}
