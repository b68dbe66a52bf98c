use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use lexis_strings::{InMemoryStringStore, StringStore};
use lexis_types::StringId;
use tracing::{debug, warn};

use crate::config::VocabConfig;
use crate::error::{VocabError, VocabResult};
use crate::lexeme::Lexeme;
use crate::vectors::{cosine, Vectors};

/// Key for addressing a lexeme: either its text or its id.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LexemeKey<'a> {
    /// Interned on demand.
    Text(&'a str),
    /// Must already be interned in the vocabulary.
    Id(StringId),
}

impl<'a> From<&'a str> for LexemeKey<'a> {
    fn from(text: &'a str) -> Self {
        Self::Text(text)
    }
}

impl<'a> From<&'a String> for LexemeKey<'a> {
    fn from(text: &'a String) -> Self {
        Self::Text(text)
    }
}

impl From<StringId> for LexemeKey<'_> {
    fn from(id: StringId) -> Self {
        Self::Id(id)
    }
}

/// The shared vocabulary.
///
/// Owns the string store, the lexeme cache and the vectors table. A `Vocab`
/// is shared between documents as `Arc<Vocab>`; all growth (new strings, new
/// lexemes, new vectors) is append-only behind `RwLock`s, so an
/// `Arc<Vocab>` can be used from several threads.
pub struct Vocab {
    strings: InMemoryStringStore,
    lexemes: RwLock<HashMap<StringId, Arc<Lexeme>>>,
    vectors: RwLock<Vectors>,
}

impl Vocab {
    /// Create an empty vocabulary.
    pub fn new() -> Self {
        Self {
            strings: InMemoryStringStore::new(),
            lexemes: RwLock::new(HashMap::new()),
            vectors: RwLock::new(Vectors::new()),
        }
    }

    /// Create an empty vocabulary from configuration.
    pub fn with_config(config: &VocabConfig) -> VocabResult<Self> {
        let vectors = match config.vector_width {
            Some(width) => Vectors::with_width(width)?,
            None => Vectors::new(),
        };
        Ok(Self {
            vectors: RwLock::new(vectors),
            ..Self::new()
        })
    }

    /// The underlying string store.
    pub fn strings(&self) -> &InMemoryStringStore {
        &self.strings
    }

    /// Intern a string into the vocabulary's string store.
    pub fn intern(&self, s: &str) -> VocabResult<StringId> {
        Ok(self.strings.intern(s)?)
    }

    /// Resolve an id through the vocabulary's string store.
    pub fn resolve(&self, id: StringId) -> VocabResult<Arc<str>> {
        Ok(self.strings.resolve(id)?)
    }

    // ---------------------------------------------------------------
    // Lexemes
    // ---------------------------------------------------------------

    /// The lexeme for a string or id, created and cached on first access.
    ///
    /// Text keys are interned on demand. Id keys must already be interned,
    /// otherwise `VocabError::Strings(StringError::NotFound)` is returned.
    pub fn lexeme<'a>(&self, key: impl Into<LexemeKey<'a>>) -> VocabResult<Arc<Lexeme>> {
        let id = match key.into() {
            LexemeKey::Text(text) => self.strings.intern(text)?,
            LexemeKey::Id(id) => id,
        };

        if let Some(lexeme) = self.get_lexeme(id) {
            return Ok(lexeme);
        }

        let lexeme = Lexeme::new(id, self.strings.resolve(id)?);
        for form in lexeme.forms() {
            self.strings.intern(form)?;
        }

        let mut cache = self.lexemes.write().expect("lock poisoned");
        let entry = cache.entry(id).or_insert_with(|| {
            debug!(orth = %id.short_hex(), text = lexeme.text(), "cached lexeme");
            Arc::new(lexeme)
        });
        Ok(Arc::clone(entry))
    }

    /// The cached lexeme of `id`, without creating it.
    pub fn get_lexeme(&self, id: StringId) -> Option<Arc<Lexeme>> {
        self.lexemes.read().expect("lock poisoned").get(&id).cloned()
    }

    /// Returns `true` if a lexeme has been created for `text`.
    pub fn contains(&self, text: &str) -> bool {
        match self.strings.lookup(text) {
            Some(id) => self.lexemes.read().expect("lock poisoned").contains_key(&id),
            None => false,
        }
    }

    /// Number of cached lexemes.
    pub fn len(&self) -> usize {
        self.lexemes.read().expect("lock poisoned").len()
    }

    /// Returns `true` if no lexeme has been created yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // ---------------------------------------------------------------
    // Vectors
    // ---------------------------------------------------------------

    /// Attach a vector to a string, creating its lexeme if needed.
    pub fn set_vector<'a>(
        &self,
        key: impl Into<LexemeKey<'a>>,
        vector: Vec<f32>,
    ) -> VocabResult<StringId> {
        let id = self.lexeme(key)?.orth();
        self.vectors
            .write()
            .expect("lock poisoned")
            .add(id, vector)?;
        Ok(id)
    }

    /// The vector of `id`, if one was set.
    pub fn vector(&self, id: StringId) -> Option<Arc<[f32]>> {
        self.vectors.read().expect("lock poisoned").get(id)
    }

    pub fn has_vector(&self, id: StringId) -> bool {
        self.vectors.read().expect("lock poisoned").contains(id)
    }

    /// The vector width, once known.
    pub fn vector_width(&self) -> Option<usize> {
        self.vectors.read().expect("lock poisoned").width()
    }

    /// Number of strings with a vector.
    pub fn vectors_len(&self) -> usize {
        self.vectors.read().expect("lock poisoned").len()
    }

    /// Cosine similarity between the vectors of two strings.
    ///
    /// Fails with [`VocabError::MissingVector`] when either side has no
    /// vector: "no similarity data" is never reported as a number. A
    /// zero-norm vector yields `0.0`.
    pub fn similarity<'a, 'b>(
        &self,
        a: impl Into<LexemeKey<'a>>,
        b: impl Into<LexemeKey<'b>>,
    ) -> VocabResult<f32> {
        let va = self.required_vector(a.into())?;
        let vb = self.required_vector(b.into())?;
        Ok(cosine_or_zero(&va, &vb))
    }

    fn required_vector(&self, key: LexemeKey<'_>) -> VocabResult<Arc<[f32]>> {
        let (id, label) = match key {
            LexemeKey::Text(text) => (self.strings.id_of(text), text.to_string()),
            LexemeKey::Id(id) => (
                id,
                self.strings
                    .resolve(id)
                    .map(|s| s.to_string())
                    .unwrap_or_else(|_| id.to_string()),
            ),
        };
        self.vector(id).ok_or(VocabError::MissingVector(label))
    }
}

/// Cosine similarity, mapping the undefined zero-norm case to `0.0`.
pub(crate) fn cosine_or_zero(a: &[f32], b: &[f32]) -> f32 {
    match cosine(a, b) {
        Some(sim) => sim,
        None => {
            warn!("similarity with a zero-norm vector; returning 0.0");
            0.0
        }
    }
}

impl Default for Vocab {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Vocab {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Vocab")
            .field("strings", &self.strings.len())
            .field("lexemes", &self.len())
            .field("vectors", &self.vectors_len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lexis_strings::StringError;

    // -----------------------------------------------------------------------
    // Lexeme cache
    // -----------------------------------------------------------------------

    #[test]
    fn lexeme_by_text() {
        let vocab = Vocab::new();
        let lexeme = vocab.lexeme("coffee").unwrap();
        assert_eq!(lexeme.text(), "coffee");
        assert!(lexeme.is_alpha());
        assert_eq!(lexeme.orth(), vocab.strings().id_of("coffee"));
    }

    #[test]
    fn lexeme_is_cached_and_shared() {
        let vocab = Vocab::new();
        let a = vocab.lexeme("coffee").unwrap();
        let b = vocab.lexeme("coffee").unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(vocab.len(), 1);
    }

    #[test]
    fn lexeme_by_id() {
        let vocab = Vocab::new();
        let id = vocab.intern("tea").unwrap();
        assert!(vocab.get_lexeme(id).is_none());
        let lexeme = vocab.lexeme(id).unwrap();
        assert_eq!(lexeme.text(), "tea");
        assert!(vocab.contains("tea"));
    }

    #[test]
    fn lexeme_by_unknown_id_fails() {
        let vocab = Vocab::new();
        let id = StringId::from_raw(12345);
        let err = vocab.lexeme(id).unwrap_err();
        assert_eq!(err, VocabError::Strings(StringError::NotFound(id)));
        assert_eq!(err.kind(), lexis_types::ErrorKind::Lookup);
    }

    #[test]
    fn lexeme_forms_are_interned() {
        let vocab = Vocab::new();
        let lexeme = vocab.lexeme("Coffee").unwrap();
        let lower = vocab.strings().lookup("coffee").unwrap();
        assert_eq!(&*vocab.resolve(lower).unwrap(), lexeme.lower());
        assert!(vocab.strings().lookup("Xxxxx").is_some());
    }

    // -----------------------------------------------------------------------
    // Vectors / similarity
    // -----------------------------------------------------------------------

    #[test]
    fn similarity_without_vectors_fails() {
        let vocab = Vocab::new();
        vocab.lexeme("cat").unwrap();
        vocab.lexeme("dog").unwrap();
        let err = vocab.similarity("cat", "dog").unwrap_err();
        assert_eq!(err, VocabError::MissingVector("cat".into()));
        assert_eq!(err.kind(), lexis_types::ErrorKind::Usage);
    }

    #[test]
    fn similarity_with_one_vector_fails() {
        let vocab = Vocab::new();
        vocab.set_vector("cat", vec![1.0, 0.0]).unwrap();
        let err = vocab.similarity("cat", "dog").unwrap_err();
        assert_eq!(err, VocabError::MissingVector("dog".into()));
    }

    #[test]
    fn similarity_is_cosine() {
        let vocab = Vocab::new();
        let cat = vocab.set_vector("cat", vec![1.0, 1.0]).unwrap();
        vocab.set_vector("kitten", vec![1.0, 1.0]).unwrap();
        vocab.set_vector("car", vec![-1.0, -1.0]).unwrap();
        assert!((vocab.similarity("cat", "kitten").unwrap() - 1.0).abs() < 1e-6);
        assert!((vocab.similarity(cat, "car").unwrap() + 1.0).abs() < 1e-6);
    }

    #[test]
    fn zero_vector_similarity_is_zero() {
        let vocab = Vocab::new();
        vocab.set_vector("void", vec![0.0, 0.0]).unwrap();
        vocab.set_vector("cat", vec![1.0, 0.0]).unwrap();
        assert_eq!(vocab.similarity("void", "cat").unwrap(), 0.0);
    }

    #[test]
    fn configured_width_is_enforced() {
        let vocab = Vocab::with_config(&VocabConfig::with_vector_width(3)).unwrap();
        assert_eq!(vocab.vector_width(), Some(3));
        let err = vocab.set_vector("cat", vec![1.0]).unwrap_err();
        assert_eq!(
            err,
            VocabError::DimensionMismatch {
                expected: 3,
                actual: 1
            }
        );
        assert_eq!(vocab.vectors_len(), 0);
    }

    #[test]
    fn vectors_are_visible_through_ids() {
        let vocab = Vocab::new();
        let id = vocab.set_vector("banana", vec![0.5, 0.25]).unwrap();
        assert!(vocab.has_vector(id));
        assert_eq!(vocab.vector(id).unwrap().len(), 2);
    }

    // -----------------------------------------------------------------------
    // Concurrency
    // -----------------------------------------------------------------------

    #[test]
    fn shared_vocab_across_threads() {
        use std::thread;

        let vocab = Arc::new(Vocab::new());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let vocab = Arc::clone(&vocab);
                thread::spawn(move || vocab.lexeme("shared").unwrap())
            })
            .collect();
        let lexemes: Vec<Arc<Lexeme>> = handles
            .into_iter()
            .map(|h| h.join().expect("thread should not panic"))
            .collect();
        for lexeme in &lexemes[1..] {
            assert!(Arc::ptr_eq(lexeme, &lexemes[0]));
        }
    }

    #[test]
    fn debug_format() {
        let vocab = Vocab::new();
        vocab.lexeme("x").unwrap();
        let debug = format!("{vocab:?}");
        assert!(debug.contains("Vocab"));
        assert!(debug.contains("lexemes"));
    }
}
