use std::collections::BTreeMap;

use lexis_vocab::VocabConfig;
use serde::{Deserialize, Serialize};

use crate::error::{PipelineError, PipelineResult};

const DEFAULT_PREFIXES: &[&str] = &[
    "(", "[", "{", "\"", "'", "`", "$", "£", "€", "¥", "¿", "¡", "«", "“", "‘",
];

const DEFAULT_SUFFIXES: &[&str] = &[
    ")", "]", "}", "\"", "'", ".", ",", "!", "?", ":", ";", "%", "»", "”", "’", "...", "…",
    "'s", "'S", "’s",
];

const DEFAULT_SPECIAL_CASES: &[(&str, &[&str])] = &[
    ("don't", &["do", "n't"]),
    ("doesn't", &["does", "n't"]),
    ("didn't", &["did", "n't"]),
    ("isn't", &["is", "n't"]),
    ("aren't", &["are", "n't"]),
    ("wasn't", &["was", "n't"]),
    ("weren't", &["were", "n't"]),
    ("haven't", &["have", "n't"]),
    ("hasn't", &["has", "n't"]),
    ("couldn't", &["could", "n't"]),
    ("wouldn't", &["would", "n't"]),
    ("shouldn't", &["should", "n't"]),
    ("can't", &["ca", "n't"]),
    ("won't", &["wo", "n't"]),
    ("i'm", &["i", "'m"]),
    ("i've", &["i", "'ve"]),
    ("i'll", &["i", "'ll"]),
    ("i'd", &["i", "'d"]),
    ("you're", &["you", "'re"]),
    ("we're", &["we", "'re"]),
    ("they're", &["they", "'re"]),
    ("it's", &["it", "'s"]),
    ("let's", &["let", "'s"]),
    ("mr.", &["mr."]),
    ("mrs.", &["mrs."]),
    ("dr.", &["dr."]),
    ("st.", &["st."]),
    ("etc.", &["etc."]),
    ("vs.", &["vs."]),
];

/// Rules for the [`RuleTokenizer`](crate::RuleTokenizer).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenizerConfig {
    /// Strings split off the start of a whitespace-delimited chunk.
    pub prefixes: Vec<String>,
    /// Strings split off the end of a chunk. The longest match wins.
    pub suffixes: Vec<String>,
    /// Chunks that are tokenized by table lookup. The pieces of each entry
    /// must concatenate to its key. Lower-case keys also match their
    /// capitalised form.
    pub special_cases: BTreeMap<String, Vec<String>>,
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        Self {
            prefixes: DEFAULT_PREFIXES.iter().map(|s| s.to_string()).collect(),
            suffixes: DEFAULT_SUFFIXES.iter().map(|s| s.to_string()).collect(),
            special_cases: DEFAULT_SPECIAL_CASES
                .iter()
                .map(|(k, v)| (k.to_string(), v.iter().map(|s| s.to_string()).collect()))
                .collect(),
        }
    }
}

impl TokenizerConfig {
    /// No prefixes, suffixes or special cases: split on whitespace only.
    pub fn whitespace_only() -> Self {
        Self {
            prefixes: Vec::new(),
            suffixes: Vec::new(),
            special_cases: BTreeMap::new(),
        }
    }

    /// Check that every rule preserves the input text.
    pub fn validate(&self) -> PipelineResult<()> {
        for affix in self.prefixes.iter().chain(&self.suffixes) {
            if affix.is_empty() || affix.chars().any(char::is_whitespace) {
                return Err(PipelineError::Config(format!(
                    "affix {affix:?} must be non-empty and contain no whitespace"
                )));
            }
        }
        for (key, pieces) in &self.special_cases {
            if key.is_empty() || key.chars().any(char::is_whitespace) {
                return Err(PipelineError::Config(format!(
                    "special case {key:?} must be non-empty and contain no whitespace"
                )));
            }
            if pieces.iter().any(String::is_empty) || pieces.concat() != *key {
                return Err(PipelineError::Config(format!(
                    "special case {key:?}: pieces {pieces:?} must be non-empty and join to the key"
                )));
            }
        }
        Ok(())
    }
}

/// Configuration for a [`Language`](crate::Language).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Language code, informational.
    pub lang: String,
    /// Number of texts a [`DocStream`](crate::DocStream) pulls per refill.
    pub batch_size: usize,
    pub tokenizer: TokenizerConfig,
    pub vocab: VocabConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            lang: "en".to_string(),
            batch_size: 1000,
            tokenizer: TokenizerConfig::default(),
            vocab: VocabConfig::default(),
        }
    }
}

impl PipelineConfig {
    /// The default configuration for `lang`.
    pub fn new(lang: impl Into<String>) -> Self {
        Self {
            lang: lang.into(),
            ..Default::default()
        }
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    pub fn validate(&self) -> PipelineResult<()> {
        if self.lang.is_empty() {
            return Err(PipelineError::Config("lang must not be empty".to_string()));
        }
        if self.batch_size == 0 {
            return Err(PipelineError::Config("batch_size must be at least 1".to_string()));
        }
        self.tokenizer.validate()
    }
}
