use std::collections::HashSet;
use std::sync::Arc;

use lexis_doc::{Doc, Token};
use lexis_types::{LexAttr, StringId};
use lexis_vocab::Vocab;
use tracing::debug;

use crate::error::{MatcherError, MatcherResult};
use crate::matcher::{Entry, Match};

/// Matches exact token sequences taken from example documents.
///
/// Phrases are compared token by token on their exact text (`ORTH`) or on
/// their lowercase form (`LOWER`). This is much faster to set up than
/// writing one token pattern per phrase when the phrase list is long.
pub struct PhraseMatcher {
    vocab: Arc<Vocab>,
    attr: LexAttr,
    entries: Vec<Entry<Vec<String>>>,
}

impl PhraseMatcher {
    /// A matcher comparing exact token text.
    pub fn new(vocab: Arc<Vocab>) -> Self {
        Self {
            vocab,
            attr: LexAttr::Orth,
            entries: Vec::new(),
        }
    }

    /// A matcher comparing `attr`, which must be `ORTH` or `LOWER`.
    pub fn with_attr(vocab: Arc<Vocab>, attr: LexAttr) -> MatcherResult<Self> {
        match attr {
            LexAttr::Orth | LexAttr::Lower => Ok(Self {
                vocab,
                attr,
                entries: Vec::new(),
            }),
            other => Err(MatcherError::UnsupportedAttr(other)),
        }
    }

    pub fn attr(&self) -> LexAttr {
        self.attr
    }

    fn key_of(&self, token: &Token<'_>) -> String {
        match self.attr {
            LexAttr::Lower => token.lower().to_string(),
            _ => token.text().to_string(),
        }
    }

    /// Add phrases under `key`, appending to any already there.
    pub fn add(&mut self, key: &str, phrases: &[Doc]) -> MatcherResult<StringId> {
        if phrases.is_empty() || phrases.iter().any(Doc::is_empty) {
            return Err(MatcherError::EmptyPattern {
                key: key.to_string(),
            });
        }
        let id = self.vocab.intern(key)?;
        let phrases: Vec<Vec<String>> = phrases
            .iter()
            .map(|doc| doc.iter().map(|t| self.key_of(&t)).collect())
            .collect();
        debug!(key, phrases = phrases.len(), "added phrase patterns");
        match self.entries.iter_mut().find(|e| e.key == key) {
            Some(entry) => entry.patterns.extend(phrases),
            None => self.entries.push(Entry {
                key: key.to_string(),
                id,
                patterns: phrases,
            }),
        }
        Ok(id)
    }

    pub fn remove(&mut self, key: &str) -> MatcherResult<()> {
        let index = self
            .entries
            .iter()
            .position(|e| e.key == key)
            .ok_or_else(|| MatcherError::UnknownKey(key.to_string()))?;
        self.entries.remove(index);
        Ok(())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.iter().any(|e| e.key == key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn key(&self, id: StringId) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.id == id)
            .map(|e| e.key.as_str())
    }

    /// Find every occurrence of every phrase, sorted by position.
    pub fn matches(&self, doc: &Doc) -> Vec<Match> {
        let keys: Vec<String> = doc.iter().map(|t| self.key_of(&t)).collect();
        let mut found = Vec::new();
        for (rank, entry) in self.entries.iter().enumerate() {
            let mut seen = HashSet::new();
            for phrase in &entry.patterns {
                for (start, window) in keys.windows(phrase.len()).enumerate() {
                    if window == phrase.as_slice() && seen.insert((start, phrase.len())) {
                        found.push((start, start + phrase.len(), rank));
                    }
                }
            }
        }
        found.sort_unstable();
        found
            .into_iter()
            .map(|(start, end, rank)| Match {
                id: self.entries[rank].id,
                start,
                end,
            })
            .collect()
    }
}

impl std::fmt::Debug for PhraseMatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let keys: Vec<&str> = self.entries.iter().map(|e| e.key.as_str()).collect();
        f.debug_struct("PhraseMatcher")
            .field("attr", &self.attr)
            .field("keys", &keys)
            .finish()
    }
}
