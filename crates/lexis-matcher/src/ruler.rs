//! Pattern-based entity recognition as a pipeline component.

use std::sync::Arc;

use lexis_doc::{Doc, SpanRange};
use lexis_pipeline::{Component, Language, PipelineResult};
use lexis_types::LexAttr;
use lexis_vocab::Vocab;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::{MatcherError, MatcherResult};
use crate::matcher::{Match, Matcher};
use crate::pattern::Pattern;
use crate::phrase::PhraseMatcher;

/// The body of an [`EntityPattern`]: a literal phrase or a token pattern.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PatternBody {
    Phrase(String),
    Tokens(Vec<Value>),
}

/// One entity rule, e.g. `{"label": "GPE", "pattern": "Czech Republic"}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EntityPattern {
    pub label: String,
    pub pattern: PatternBody,
}

impl EntityPattern {
    pub fn phrase(label: impl Into<String>, phrase: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            pattern: PatternBody::Phrase(phrase.into()),
        }
    }

    pub fn tokens(label: impl Into<String>, specs: Vec<Value>) -> Self {
        Self {
            label: label.into(),
            pattern: PatternBody::Tokens(specs),
        }
    }
}

/// Adds entities found by token and phrase patterns.
///
/// Candidate matches from both matchers are resolved greedily: longer
/// matches win over shorter ones, and earlier matches over later ones of
/// the same length. Existing entities are kept and candidates overlapping
/// them are dropped, unless `overwrite_ents` is set, in which case the
/// existing entities that overlap a new one are removed instead.
pub struct EntityRuler {
    name: String,
    vocab: Arc<Vocab>,
    matcher: Matcher,
    phrases: PhraseMatcher,
    overwrite_ents: bool,
    patterns: Vec<EntityPattern>,
}

impl EntityRuler {
    pub const DEFAULT_NAME: &'static str = "entity_ruler";

    pub fn new(vocab: Arc<Vocab>) -> Self {
        Self {
            name: Self::DEFAULT_NAME.to_string(),
            matcher: Matcher::new(Arc::clone(&vocab)),
            phrases: PhraseMatcher::new(Arc::clone(&vocab)),
            vocab,
            overwrite_ents: false,
            patterns: Vec::new(),
        }
    }

    /// A ruler sharing `nlp`'s vocabulary, with `patterns` already added.
    pub fn from_patterns(nlp: &Language, patterns: &[EntityPattern]) -> MatcherResult<Self> {
        let mut ruler = Self::new(Arc::clone(nlp.vocab()));
        ruler.add_patterns(nlp, patterns)?;
        Ok(ruler)
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Let new entities replace overlapping existing ones.
    pub fn with_overwrite_ents(mut self, overwrite: bool) -> Self {
        self.overwrite_ents = overwrite;
        self
    }

    /// Compare phrases on `attr` (`ORTH` or `LOWER`).
    ///
    /// Must be called before any phrase is added.
    pub fn with_phrase_attr(mut self, attr: LexAttr) -> MatcherResult<Self> {
        if !self.phrases.is_empty() {
            return Err(MatcherError::InvalidPattern(
                "set the phrase attribute before adding patterns".to_string(),
            ));
        }
        self.phrases = PhraseMatcher::with_attr(Arc::clone(&self.vocab), attr)?;
        Ok(self)
    }

    /// Add rules. Phrases are tokenized with `nlp`'s tokenizer.
    pub fn add_patterns(&mut self, nlp: &Language, patterns: &[EntityPattern]) -> MatcherResult<()> {
        for rule in patterns {
            match &rule.pattern {
                PatternBody::Phrase(text) => {
                    let doc = nlp.make_doc(text)?;
                    self.phrases.add(&rule.label, &[doc])?;
                }
                PatternBody::Tokens(specs) => {
                    let pattern = Pattern::from_json(&Value::Array(specs.clone()))?;
                    self.matcher.add(&rule.label, vec![pattern])?;
                }
            }
            self.patterns.push(rule.clone());
        }
        debug!(rules = patterns.len(), total = self.patterns.len(), "added entity rules");
        Ok(())
    }

    /// Every rule added so far.
    pub fn patterns(&self) -> &[EntityPattern] {
        &self.patterns
    }

    /// Distinct labels, in the order first added.
    pub fn labels(&self) -> Vec<&str> {
        let mut labels: Vec<&str> = Vec::new();
        for rule in &self.patterns {
            if !labels.contains(&rule.label.as_str()) {
                labels.push(&rule.label);
            }
        }
        labels
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    fn label_of(&self, m: &Match) -> Option<&str> {
        self.matcher.key(m.id).or_else(|| self.phrases.key(m.id))
    }

    /// The entities this ruler would set on `doc`, existing ones included.
    pub fn resolve(&self, doc: &Doc) -> Vec<SpanRange> {
        let mut candidates: Vec<Match> = self.matcher.matches(doc);
        candidates.extend(self.phrases.matches(doc));
        candidates.sort_by(|a, b| b.len().cmp(&a.len()).then(a.start.cmp(&b.start)));

        let existing: Vec<SpanRange> = doc.ents().iter().map(|e| e.range()).collect();
        let mut chosen: Vec<SpanRange> = Vec::new();
        for m in &candidates {
            let Some(label) = self.label_of(m) else {
                continue;
            };
            let range = SpanRange::labeled(m.start, m.end, label);
            if chosen.iter().any(|c| c.overlaps(&range)) {
                continue;
            }
            if !self.overwrite_ents && existing.iter().any(|e| e.overlaps(&range)) {
                continue;
            }
            chosen.push(range);
        }

        let mut ents: Vec<SpanRange> = existing
            .into_iter()
            .filter(|e| !chosen.iter().any(|c| c.overlaps(e)))
            .collect();
        ents.extend(chosen);
        ents.sort_by_key(|e| (e.start, e.end));
        ents
    }
}

impl Component for EntityRuler {
    fn name(&self) -> &str {
        &self.name
    }

    fn process(&self, mut doc: Doc) -> PipelineResult<Doc> {
        // The resolved set already accounts for the current entities.
        let ents = self.resolve(&doc);
        doc.replace_ents(ents)?;
        Ok(doc)
    }
}

impl std::fmt::Debug for EntityRuler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntityRuler")
            .field("name", &self.name)
            .field("rules", &self.patterns.len())
            .field("overwrite_ents", &self.overwrite_ents)
            .finish()
    }
}
