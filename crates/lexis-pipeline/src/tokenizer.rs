//! Turning raw text into words and trailing-space flags.
//!
//! The [`RuleTokenizer`] first splits on whitespace. A single space after a
//! chunk becomes that chunk's trailing-space flag; any other whitespace is
//! kept as a token of its own, so the output always reconstructs the input
//! exactly. Each chunk is then split by peeling prefixes and suffixes until
//! a special case matches or nothing more can be removed.

use std::collections::HashMap;

use crate::config::TokenizerConfig;
use crate::error::PipelineResult;

/// Words and trailing-space flags covering a whole input text.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TokenizedText {
    pub words: Vec<String>,
    pub spaces: Vec<bool>,
}

impl TokenizedText {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, word: impl Into<String>, space: bool) {
        self.words.push(word.into());
        self.spaces.push(space);
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Rebuild the text the tokens came from.
    pub fn text(&self) -> String {
        let mut text = String::new();
        for (word, &space) in self.words.iter().zip(&self.spaces) {
            text.push_str(word);
            if space {
                text.push(' ');
            }
        }
        text
    }

    fn set_last_space(&mut self) {
        if let Some(last) = self.spaces.last_mut() {
            *last = true;
        }
    }
}

/// Splits text into tokens.
///
/// Implementations must produce non-empty words whose concatenation, with
/// a single space after each word flagged as spaced, equals the input.
pub trait Tokenizer: Send + Sync {
    fn tokenize(&self, text: &str) -> TokenizedText;
}

/// Whitespace, prefix, suffix and special-case tokenizer.
#[derive(Clone, Debug)]
pub struct RuleTokenizer {
    prefixes: Vec<String>,
    suffixes: Vec<String>,
    special_cases: HashMap<String, Vec<String>>,
}

impl RuleTokenizer {
    /// Build a tokenizer from validated rules.
    pub fn new(config: TokenizerConfig) -> PipelineResult<Self> {
        config.validate()?;
        Ok(Self::from_valid(config))
    }

    fn from_valid(config: TokenizerConfig) -> Self {
        let mut special_cases: HashMap<String, Vec<String>> = HashMap::new();
        for (key, pieces) in config.special_cases {
            let capitalized = capitalize(&key);
            if capitalized != key {
                let mut cap_pieces = pieces.clone();
                cap_pieces[0] = capitalize(&cap_pieces[0]);
                special_cases.entry(capitalized).or_insert(cap_pieces);
            }
            // Explicit keys win over derived capitalised ones.
            special_cases.insert(key, pieces);
        }

        let mut prefixes = config.prefixes;
        let mut suffixes = config.suffixes;
        // Longest first, so the first hit is the longest match.
        prefixes.sort_by_key(|p| std::cmp::Reverse(p.len()));
        suffixes.sort_by_key(|s| std::cmp::Reverse(s.len()));

        Self {
            prefixes,
            suffixes,
            special_cases,
        }
    }

    fn split_chunk(&self, chunk: &str, out: &mut Vec<String>) {
        let mut rest = chunk;
        let mut tail: Vec<&str> = Vec::new();
        let mut middle: Option<&[String]> = None;

        while !rest.is_empty() {
            if let Some(pieces) = self.special_cases.get(rest) {
                middle = Some(pieces.as_slice());
                break;
            }
            if let Some(prefix) = self.prefixes.iter().find(|p| rest.starts_with(p.as_str())) {
                out.push(prefix.clone());
                rest = &rest[prefix.len()..];
                continue;
            }
            let suffix = self
                .suffixes
                .iter()
                .find(|s| rest.ends_with(s.as_str()) && !(s.as_str() == "." && is_abbreviation(rest)));
            match suffix {
                Some(suffix) => {
                    let cut = rest.len() - suffix.len();
                    tail.push(&rest[cut..]);
                    rest = &rest[..cut];
                }
                None => break,
            }
        }

        match middle {
            Some(pieces) => out.extend(pieces.iter().cloned()),
            None if !rest.is_empty() => out.push(rest.to_string()),
            None => {}
        }
        out.extend(tail.into_iter().rev().map(str::to_string));
    }
}

impl Default for RuleTokenizer {
    fn default() -> Self {
        Self::from_valid(TokenizerConfig::default())
    }
}

impl Tokenizer for RuleTokenizer {
    fn tokenize(&self, text: &str) -> TokenizedText {
        let mut result = TokenizedText::new();
        let mut words = Vec::new();
        for piece in split_whitespace_runs(text) {
            match piece {
                Piece::Chunk(chunk) => {
                    words.clear();
                    self.split_chunk(chunk, &mut words);
                    for word in words.drain(..) {
                        result.push(word, false);
                    }
                }
                Piece::Space(run) => {
                    // A single leading space after a word is that word's
                    // trailing-space flag.
                    match run.strip_prefix(' ') {
                        Some(remainder) if !result.is_empty() => {
                            result.set_last_space();
                            if !remainder.is_empty() {
                                result.push(remainder, false);
                            }
                        }
                        _ => result.push(run, false),
                    }
                }
            }
        }
        result
    }
}

/// Tokenizer that splits on whitespace only.
#[derive(Clone, Copy, Debug, Default)]
pub struct WhitespaceTokenizer;

impl Tokenizer for WhitespaceTokenizer {
    fn tokenize(&self, text: &str) -> TokenizedText {
        let mut result = TokenizedText::new();
        for piece in split_whitespace_runs(text) {
            match piece {
                Piece::Chunk(chunk) => result.push(chunk, false),
                Piece::Space(run) => match run.strip_prefix(' ') {
                    Some(remainder) if !result.is_empty() => {
                        result.set_last_space();
                        if !remainder.is_empty() {
                            result.push(remainder, false);
                        }
                    }
                    _ => result.push(run, false),
                },
            }
        }
        result
    }
}

enum Piece<'a> {
    Chunk(&'a str),
    Space(&'a str),
}

/// Split `text` into alternating maximal runs of non-whitespace and
/// whitespace.
fn split_whitespace_runs(text: &str) -> Vec<Piece<'_>> {
    let mut pieces = Vec::new();
    let mut start = 0;
    let mut in_space: Option<bool> = None;
    for (i, c) in text.char_indices() {
        let space = c.is_whitespace();
        match in_space {
            Some(prev) if prev != space => {
                pieces.push(piece(&text[start..i], prev));
                start = i;
            }
            _ => {}
        }
        in_space = Some(space);
    }
    if let Some(prev) = in_space {
        pieces.push(piece(&text[start..], prev));
    }
    pieces
}

fn piece(s: &str, space: bool) -> Piece<'_> {
    if space {
        Piece::Space(s)
    } else {
        Piece::Chunk(s)
    }
}

/// Dotted abbreviations such as "U.K." or "e.g." keep their final period.
fn is_abbreviation(s: &str) -> bool {
    let Some(body) = s.strip_suffix('.') else {
        return false;
    };
    body.contains('.')
        && body
            .split('.')
            .all(|part| !part.is_empty() && part.chars().all(char::is_alphabetic))
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
