use serde::{Deserialize, Serialize};

/// Configuration for a [`Vocab`](crate::Vocab).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VocabConfig {
    /// Fixed width of word vectors. When `None`, the width is taken from the
    /// first vector added.
    pub vector_width: Option<usize>,
}

impl VocabConfig {
    /// A configuration with a fixed vector width.
    pub fn with_vector_width(width: usize) -> Self {
        Self {
            vector_width: Some(width),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_use_defaults() {
        let config: VocabConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, VocabConfig::default());
        let config: VocabConfig = serde_json::from_str(r#"{"vector_width": 3}"#).unwrap();
        assert_eq!(config, VocabConfig::with_vector_width(3));
    }
}
