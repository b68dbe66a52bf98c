use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;

use lexis_doc::{Doc, DocResult, Span, SpanRange, Token};
use lexis_types::StringId;
use lexis_vocab::Vocab;
use serde_json::Value;
use tracing::debug;

use crate::error::{MatcherError, MatcherResult};
use crate::pattern::{Pattern, Quantifier, TokenSpec};

/// One match: the id of the key that matched and a token range.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Match {
    pub id: StringId,
    pub start: usize,
    pub end: usize,
}

impl Match {
    /// The matched tokens.
    pub fn span<'d>(&self, doc: &'d Doc) -> DocResult<Span<'d>> {
        doc.span(self.start, self.end)
    }

    /// The matched tokens, labelled with the key that matched.
    pub fn labeled_span<'d>(&self, doc: &'d Doc) -> DocResult<Span<'d>> {
        let label = doc.vocab().resolve(self.id)?;
        doc.span_labeled(self.start, self.end, &label)
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

pub(crate) struct Entry<P> {
    pub(crate) key: String,
    pub(crate) id: StringId,
    pub(crate) patterns: Vec<P>,
}

/// Rule-based matcher over token patterns.
///
/// Patterns are grouped under string keys. A key is interned into the
/// vocabulary and reported as [`Match::id`]. Matching returns every
/// distinct `(key, start, end)` for which some pattern of the key matches
/// the tokens `start..end`, sorted by position.
pub struct Matcher {
    vocab: Arc<Vocab>,
    entries: Vec<Entry<Pattern>>,
}

impl Matcher {
    pub fn new(vocab: Arc<Vocab>) -> Self {
        Self {
            vocab,
            entries: Vec::new(),
        }
    }

    pub fn vocab(&self) -> &Arc<Vocab> {
        &self.vocab
    }

    /// Add patterns under `key`, appending to any already there.
    pub fn add(&mut self, key: &str, patterns: Vec<Pattern>) -> MatcherResult<StringId> {
        if patterns.is_empty() {
            return Err(MatcherError::EmptyPattern {
                key: key.to_string(),
            });
        }
        let id = self.vocab.intern(key)?;
        debug!(key, patterns = patterns.len(), "added match patterns");
        match self.entries.iter_mut().find(|e| e.key == key) {
            Some(entry) => entry.patterns.extend(patterns),
            None => self.entries.push(Entry {
                key: key.to_string(),
                id,
                patterns,
            }),
        }
        Ok(id)
    }

    /// Add patterns written as a JSON list of lists of token specs.
    pub fn add_json(&mut self, key: &str, patterns: &Value) -> MatcherResult<StringId> {
        let list = patterns.as_array().ok_or_else(|| {
            MatcherError::InvalidPattern(format!("expected a list of patterns, got {patterns}"))
        })?;
        let patterns = list
            .iter()
            .map(Pattern::from_json)
            .collect::<MatcherResult<Vec<_>>>()?;
        self.add(key, patterns)
    }

    /// Remove every pattern under `key`.
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

    /// Number of keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The patterns under `key`.
    pub fn get(&self, key: &str) -> Option<&[Pattern]> {
        self.entries
            .iter()
            .find(|e| e.key == key)
            .map(|e| e.patterns.as_slice())
    }

    /// The key a match id belongs to.
    pub fn key(&self, id: StringId) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.id == id)
            .map(|e| e.key.as_str())
    }

    /// Find all matches in `doc`, sorted by `(start, end)` and then by the
    /// order keys were added.
    pub fn matches(&self, doc: &Doc) -> Vec<Match> {
        let tokens: Vec<Token<'_>> = doc.iter().collect();
        let mut found = Vec::new();
        for (rank, entry) in self.entries.iter().enumerate() {
            let mut seen = HashSet::new();
            for pattern in &entry.patterns {
                for start in 0..tokens.len() {
                    for end in match_ends(pattern.specs(), &tokens, start) {
                        if end > start && seen.insert((start, end)) {
                            found.push((start, end, rank));
                        }
                    }
                }
            }
        }
        found.sort_unstable();
        debug!(matches = found.len(), "matched token patterns");
        found
            .into_iter()
            .map(|(start, end, rank)| Match {
                id: self.entries[rank].id,
                start,
                end,
            })
            .collect()
    }

    /// Matches as labelled ranges, with the key as label.
    pub fn match_ranges(&self, doc: &Doc) -> Vec<SpanRange> {
        self.matches(doc)
            .into_iter()
            .filter_map(|m| {
                self.key(m.id)
                    .map(|key| SpanRange::labeled(m.start, m.end, key))
            })
            .collect()
    }
}

impl std::fmt::Debug for Matcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let keys: Vec<&str> = self.entries.iter().map(|e| e.key.as_str()).collect();
        f.debug_struct("Matcher").field("keys", &keys).finish()
    }
}

/// Every end position at which `specs` matches tokens starting at `start`.
fn match_ends(specs: &[TokenSpec], tokens: &[Token<'_>], start: usize) -> BTreeSet<usize> {
    let mut ends = BTreeSet::new();
    let mut visited = HashSet::new();
    walk(specs, 0, tokens, start, &mut visited, &mut ends);
    ends
}

fn walk(
    specs: &[TokenSpec],
    index: usize,
    tokens: &[Token<'_>],
    pos: usize,
    visited: &mut HashSet<(usize, usize)>,
    ends: &mut BTreeSet<usize>,
) {
    // The set of ends reachable from a state does not depend on how the
    // state was reached.
    if !visited.insert((index, pos)) {
        return;
    }
    let Some(spec) = specs.get(index) else {
        ends.insert(pos);
        return;
    };
    let hit = |p: usize| tokens.get(p).is_some_and(|t| spec.matches(t));
    match spec.op {
        Quantifier::One => {
            if hit(pos) {
                walk(specs, index + 1, tokens, pos + 1, visited, ends);
            }
        }
        Quantifier::Not => {
            if pos < tokens.len() && !hit(pos) {
                walk(specs, index + 1, tokens, pos + 1, visited, ends);
            }
        }
        Quantifier::Optional => {
            walk(specs, index + 1, tokens, pos, visited, ends);
            if hit(pos) {
                walk(specs, index + 1, tokens, pos + 1, visited, ends);
            }
        }
        Quantifier::ZeroOrMore => {
            let mut p = pos;
            loop {
                walk(specs, index + 1, tokens, p, visited, ends);
                if !hit(p) {
                    break;
                }
                p += 1;
            }
        }
        Quantifier::OneOrMore => {
            let mut p = pos;
            while hit(p) {
                p += 1;
                walk(specs, index + 1, tokens, p, visited, ends);
            }
        }
    }
}
