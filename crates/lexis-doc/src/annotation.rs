use serde::{Deserialize, Serialize};

/// Context-dependent annotations for one token.
///
/// Used with [`Doc::annotate`](crate::Doc::annotate). Fields left as `None`
/// are not touched.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenAnnotation {
    pub lemma: Option<String>,
    pub pos: Option<String>,
    pub tag: Option<String>,
    pub dep: Option<String>,
    /// Index of the syntactic head within the same document.
    pub head: Option<usize>,
}

impl TokenAnnotation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lemma(mut self, lemma: impl Into<String>) -> Self {
        self.lemma = Some(lemma.into());
        self
    }

    pub fn pos(mut self, pos: impl Into<String>) -> Self {
        self.pos = Some(pos.into());
        self
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    pub fn dep(mut self, dep: impl Into<String>) -> Self {
        self.dep = Some(dep.into());
        self
    }

    pub fn head(mut self, head: usize) -> Self {
        self.head = Some(head);
        self
    }

    /// Returns `true` if no field is set.
    pub fn is_empty(&self) -> bool {
        self.lemma.is_none()
            && self.pos.is_none()
            && self.tag.is_none()
            && self.dep.is_none()
            && self.head.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_sets_fields() {
        let ann = TokenAnnotation::new().pos("NOUN").head(3);
        assert_eq!(ann.pos.as_deref(), Some("NOUN"));
        assert_eq!(ann.head, Some(3));
        assert!(ann.lemma.is_none());
        assert!(!ann.is_empty());
        assert!(TokenAnnotation::new().is_empty());
    }

    #[test]
    fn deserializes_partial_json() {
        let ann: TokenAnnotation =
            serde_json::from_str(r#"{"pos": "VERB", "lemma": "buy"}"#).unwrap();
        assert_eq!(ann, TokenAnnotation::new().pos("VERB").lemma("buy"));
    }
}
