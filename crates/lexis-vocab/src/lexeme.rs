//! Context-independent lexical data.
//!
//! Everything in a [`Lexeme`] is a pure function of the string's characters,
//! which is what makes it safe to compute once per vocabulary and share
//! across documents.

use std::sync::Arc;

use lexis_types::StringId;
use serde::{Deserialize, Serialize};

const NUM_WORDS: &[&str] = &[
    "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten",
    "eleven", "twelve", "thirteen", "fourteen", "fifteen", "sixteen", "seventeen", "eighteen",
    "nineteen", "twenty", "thirty", "forty", "fifty", "sixty", "seventy", "eighty", "ninety",
    "hundred", "thousand", "million", "billion", "trillion", "quadrillion", "gajillion",
    "bazillion",
];

const ORDINAL_WORDS: &[&str] = &[
    "first", "second", "third", "fourth", "fifth", "sixth", "seventh", "eighth", "ninth", "tenth",
    "eleventh", "twelfth", "thirteenth", "fourteenth", "fifteenth", "sixteenth", "seventeenth",
    "eighteenth", "nineteenth", "twentieth", "thirtieth", "fortieth", "fiftieth", "sixtieth",
    "seventieth", "eightieth", "ninetieth", "hundredth", "thousandth", "millionth", "billionth",
    "trillionth",
];

const URL_TLDS: &[&str] = &[
    "com", "org", "net", "edu", "gov", "mil", "int", "io", "co", "ai", "dev", "app", "info",
    "biz", "uk", "us", "de", "fr", "es", "it", "nl", "eu", "jp", "cn", "ru", "ca", "au", "in",
];

const LEFT_PUNCT: &[&str] = &[
    "(", "[", "{", "<", "\"", "'", "«", "‘", "‚", "‛", "“", "„", "‟", "‹", "❮", "''", "``",
];

const RIGHT_PUNCT: &[&str] = &[
    ")", "]", "}", ">", "\"", "'", "»", "’", "”", "›", "❯", "''",
];

const QUOTES: &[&str] = &[
    "\"", "'", "`", "«", "»", "‘", "’", "‚", "‛", "“", "”", "„", "‟", "‹", "›", "❮", "❯", "''",
    "``",
];

const BRACKETS: &[&str] = &["(", ")", "[", "]", "{", "}", "<", ">"];

/// Non-ASCII characters in the Unicode punctuation categories that show up
/// in ordinary text.
const UNICODE_PUNCT: &[char] = &[
    '¡', '¿', '«', '»', '‘', '’', '‚', '‛', '“', '”', '„', '‟', '‹', '›', '–', '—', '―', '…',
    '·', '•', '§', '¶', '†', '‡', '‰', '′', '″', '※', '、', '。', '「', '」', '『', '』', '《',
    '》', '【', '】', '❮', '❯',
];

const CURRENCY: &[char] = &[
    '$', '¢', '£', '¤', '¥', '֏', '؋', '৳', '฿', '₡', '₦', '₩', '₪', '₫', '€', '₭', '₮', '₱',
    '₲', '₴', '₵', '₸', '₹', '₺', '₼', '₽', '₾', '₿',
];

/// Boolean lexical flags of a string.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LexFlags {
    pub is_alpha: bool,
    pub is_ascii: bool,
    pub is_digit: bool,
    pub is_lower: bool,
    pub is_upper: bool,
    pub is_title: bool,
    pub is_punct: bool,
    pub is_left_punct: bool,
    pub is_right_punct: bool,
    pub is_space: bool,
    pub is_bracket: bool,
    pub is_quote: bool,
    pub is_currency: bool,
    pub like_num: bool,
    pub like_url: bool,
    pub like_email: bool,
}

impl LexFlags {
    /// Compute every flag for `text`.
    pub fn compute(text: &str) -> Self {
        let non_empty = !text.is_empty();
        Self {
            is_alpha: non_empty && text.chars().all(char::is_alphabetic),
            is_ascii: text.is_ascii(),
            is_digit: non_empty && text.chars().all(char::is_numeric),
            is_lower: is_lower(text),
            is_upper: is_upper(text),
            is_title: is_title(text),
            is_punct: non_empty && text.chars().all(is_punct_char),
            is_left_punct: LEFT_PUNCT.contains(&text),
            is_right_punct: RIGHT_PUNCT.contains(&text),
            is_space: non_empty && text.chars().all(char::is_whitespace),
            is_bracket: BRACKETS.contains(&text),
            is_quote: QUOTES.contains(&text),
            is_currency: non_empty && text.chars().all(|c| CURRENCY.contains(&c)),
            like_num: like_num(text),
            like_url: like_url(text),
            like_email: like_email(text),
        }
    }
}

/// Vocabulary-level record of a string.
///
/// A lexeme carries the string itself, its derived orthographic forms and
/// its [`LexFlags`]. It knows nothing about context: part-of-speech, lemma
/// and entity information live on tokens, and vectors live in the
/// vocabulary's vector table keyed by [`Lexeme::orth`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Lexeme {
    orth: StringId,
    text: Arc<str>,
    lower: Arc<str>,
    norm: Arc<str>,
    shape: Arc<str>,
    prefix: Arc<str>,
    suffix: Arc<str>,
    flags: LexFlags,
}

impl Lexeme {
    /// Derive a lexeme from its id and text.
    pub fn new(orth: StringId, text: Arc<str>) -> Self {
        let lower = text.to_lowercase();
        let norm = normalize(&lower);
        Self {
            orth,
            shape: Arc::from(word_shape(&text)),
            prefix: Arc::from(text.chars().take(1).collect::<String>()),
            suffix: Arc::from(last_chars(&text, 3)),
            flags: LexFlags::compute(&text),
            lower: Arc::from(lower),
            norm: Arc::from(norm),
            text,
        }
    }

    /// The id of the verbatim text.
    pub fn orth(&self) -> StringId {
        self.orth
    }

    /// The verbatim text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Shared handle to the verbatim text.
    pub fn text_arc(&self) -> Arc<str> {
        Arc::clone(&self.text)
    }

    /// Lowercase form.
    pub fn lower(&self) -> &str {
        &self.lower
    }

    /// Normalised form: lowercase with typographic quotes folded.
    pub fn norm(&self) -> &str {
        &self.norm
    }

    /// Orthographic shape, e.g. `"Xxxxx"` for "Apple", `"dddd"` for "2018".
    pub fn shape(&self) -> &str {
        &self.shape
    }

    /// First character.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Last three characters.
    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    /// Length in characters.
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    /// Returns `true` for the empty lexeme.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn flags(&self) -> LexFlags {
        self.flags
    }

    pub fn is_alpha(&self) -> bool {
        self.flags.is_alpha
    }

    pub fn is_digit(&self) -> bool {
        self.flags.is_digit
    }

    pub fn is_punct(&self) -> bool {
        self.flags.is_punct
    }

    pub fn is_space(&self) -> bool {
        self.flags.is_space
    }

    pub fn like_num(&self) -> bool {
        self.flags.like_num
    }

    /// The orthographic forms derived from the text, in the order lower,
    /// norm, shape, prefix, suffix. Used to intern them alongside the text.
    pub fn forms(&self) -> [&str; 5] {
        [
            self.lower(),
            self.norm(),
            self.shape(),
            self.prefix(),
            self.suffix(),
        ]
    }
}

// ---------------------------------------------------------------------------
// Forms
// ---------------------------------------------------------------------------

/// Map each character to its shape class, capping runs at four.
pub fn word_shape(text: &str) -> String {
    let mut shape = String::with_capacity(text.len());
    let mut last: Option<char> = None;
    let mut run = 0;
    for c in text.chars() {
        let class = if c.is_alphabetic() {
            if c.is_uppercase() {
                'X'
            } else {
                'x'
            }
        } else if c.is_numeric() {
            'd'
        } else {
            c
        };
        if Some(class) == last {
            run += 1;
        } else {
            run = 0;
            last = Some(class);
        }
        if run < 4 {
            shape.push(class);
        }
    }
    shape
}

fn normalize(lower: &str) -> String {
    lower
        .chars()
        .map(|c| match c {
            '‘' | '’' | '‚' | '‛' | '`' | '´' => '\'',
            '“' | '”' | '„' | '‟' => '"',
            other => other,
        })
        .collect()
}

fn last_chars(text: &str, n: usize) -> String {
    let count = text.chars().count();
    text.chars().skip(count.saturating_sub(n)).collect()
}

// ---------------------------------------------------------------------------
// Flag predicates
// ---------------------------------------------------------------------------

fn is_cased(c: char) -> bool {
    c.is_lowercase() || c.is_uppercase()
}

fn is_lower(text: &str) -> bool {
    text.chars().any(is_cased) && !text.chars().any(char::is_uppercase)
}

fn is_upper(text: &str) -> bool {
    text.chars().any(is_cased) && !text.chars().any(char::is_lowercase)
}

/// Title case: every cased run starts with an uppercase character followed
/// only by lowercase ones.
fn is_title(text: &str) -> bool {
    let mut cased_seen = false;
    let mut prev_cased = false;
    for c in text.chars() {
        if c.is_uppercase() {
            if prev_cased {
                return false;
            }
            prev_cased = true;
            cased_seen = true;
        } else if c.is_lowercase() {
            if !prev_cased {
                return false;
            }
            prev_cased = true;
            cased_seen = true;
        } else {
            prev_cased = false;
        }
    }
    cased_seen
}

fn is_punct_char(c: char) -> bool {
    if c.is_ascii() {
        // ASCII punctuation minus the symbol categories ($ + < = > ^ ` | ~).
        c.is_ascii_punctuation() && !matches!(c, '$' | '+' | '<' | '=' | '>' | '^' | '`' | '|' | '~')
    } else {
        UNICODE_PUNCT.contains(&c)
    }
}

fn all_digits(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_digit())
}

fn like_num(text: &str) -> bool {
    let text = text.trim_start_matches(['+', '-', '±', '~']);
    if text.is_empty() {
        return false;
    }
    let stripped: String = text.chars().filter(|c| *c != ',' && *c != '.').collect();
    if all_digits(&stripped) {
        return true;
    }
    if text.matches('/').count() == 1 {
        if let Some((num, denom)) = text.split_once('/') {
            if all_digits(num) && all_digits(denom) {
                return true;
            }
        }
    }
    let lower = text.to_lowercase();
    if NUM_WORDS.contains(&lower.as_str()) || ORDINAL_WORDS.contains(&lower.as_str()) {
        return true;
    }
    ["st", "nd", "rd", "th"]
        .iter()
        .any(|suffix| lower.strip_suffix(suffix).is_some_and(all_digits))
}

fn like_url(text: &str) -> bool {
    if text.is_empty() {
        return false;
    }
    let lower = text.to_lowercase();
    if ["http://", "https://", "www.", "ftp://"]
        .iter()
        .any(|p| lower.starts_with(p))
    {
        return true;
    }
    if text.starts_with('.') || text.ends_with('.') || text.contains('@') {
        return false;
    }
    let Some((_, last)) = lower.rsplit_once('.') else {
        return false;
    };
    let tld = last.split(':').next().unwrap_or(last);
    if tld.ends_with('/') {
        return true;
    }
    let tld = tld.split('/').next().unwrap_or(tld);
    URL_TLDS.contains(&tld)
}

fn like_email(text: &str) -> bool {
    let Some((local, domain)) = text.split_once('@') else {
        return false;
    };
    if local.is_empty()
        || !local
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '.' | '_' | '%' | '+' | '-'))
    {
        return false;
    }
    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };
    !host.is_empty()
        && host
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '.' | '-'))
        && tld.chars().count() >= 2
        && tld.chars().all(char::is_alphabetic)
}
