//! Token patterns.
//!
//! A [`Pattern`] is a sequence of [`TokenSpec`]s. Each spec describes one
//! token by attribute predicates and says how often it may occur. Patterns
//! are usually written in JSON:
//!
//! ```json
//! [{"IS_DIGIT": true}, {"LOWER": "fifa"}, {"LOWER": "world"},
//!  {"LOWER": "cup"}, {"IS_PUNCT": true}]
//! ```
//!
//! Keys are attribute names (case-insensitive, `TEXT` is `ORTH`) plus the
//! special key `OP`, one of `!`, `?`, `*` or `+`. A value is either a plain
//! string, integer or boolean, or an object `{"IN": [...]}` /
//! `{"NOT_IN": [...]}`.

use lexis_doc::Token;
use lexis_types::{AttrValue, LexAttr};
use serde_json::{Map, Value};

use crate::error::{MatcherError, MatcherResult};

/// A test on one attribute value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Predicate {
    Equals(AttrValue),
    In(Vec<AttrValue>),
    NotIn(Vec<AttrValue>),
}

impl Predicate {
    /// Check `value`, which is `None` for an unset annotation.
    pub fn matches(&self, value: Option<&AttrValue>) -> bool {
        match self {
            Self::Equals(expected) => value == Some(expected),
            Self::In(options) => value.is_some_and(|v| options.contains(v)),
            Self::NotIn(options) => value.map_or(true, |v| !options.contains(v)),
        }
    }
}

/// How many tokens a spec consumes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Quantifier {
    /// Exactly one matching token.
    #[default]
    One,
    /// Zero or one matching token (`?`).
    Optional,
    /// Any number of matching tokens (`*`).
    ZeroOrMore,
    /// At least one matching token (`+`).
    OneOrMore,
    /// Exactly one token that does not match (`!`).
    Not,
}

impl Quantifier {
    pub fn from_op(op: &str) -> MatcherResult<Self> {
        match op {
            "1" => Ok(Self::One),
            "?" => Ok(Self::Optional),
            "*" => Ok(Self::ZeroOrMore),
            "+" => Ok(Self::OneOrMore),
            "!" => Ok(Self::Not),
            other => Err(MatcherError::InvalidPattern(format!(
                "unknown operator {other:?}; expected one of ! ? * +"
            ))),
        }
    }
}

/// Description of one token in a pattern.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TokenSpec {
    pub predicates: Vec<(LexAttr, Predicate)>,
    pub op: Quantifier,
}

impl TokenSpec {
    /// A spec matching any single token.
    pub fn any() -> Self {
        Self::default()
    }

    /// Require `attr` to equal `value`.
    pub fn attr(mut self, attr: LexAttr, value: impl Into<AttrValue>) -> Self {
        self.predicates.push((attr, Predicate::Equals(value.into())));
        self
    }

    /// Require `attr` to be one of `values`.
    pub fn attr_in<V: Into<AttrValue>>(
        mut self,
        attr: LexAttr,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        let values = values.into_iter().map(Into::into).collect();
        self.predicates.push((attr, Predicate::In(values)));
        self
    }

    pub fn op(mut self, op: Quantifier) -> Self {
        self.op = op;
        self
    }

    /// Returns `true` if every predicate holds for `token`.
    pub fn matches(&self, token: &Token<'_>) -> bool {
        self.predicates
            .iter()
            .all(|(attr, predicate)| predicate.matches(token.attr(*attr).as_ref()))
    }

    /// Parse one JSON object such as `{"LOWER": "fifa", "OP": "?"}`.
    pub fn from_json(value: &Value) -> MatcherResult<Self> {
        let object = value.as_object().ok_or_else(|| {
            MatcherError::InvalidPattern(format!("token spec must be an object, got {value}"))
        })?;
        let mut spec = TokenSpec::any();
        for (key, value) in object {
            if key == "OP" {
                let op = value.as_str().ok_or_else(|| {
                    MatcherError::InvalidPattern(format!("OP must be a string, got {value}"))
                })?;
                spec.op = Quantifier::from_op(op)?;
                continue;
            }
            let attr = LexAttr::from_name(key)?;
            let predicate = match value {
                Value::Object(map) => parse_set_predicate(map)?,
                plain => Predicate::Equals(AttrValue::try_from(plain)?),
            };
            spec.predicates.push((attr, predicate));
        }
        Ok(spec)
    }
}

fn parse_set_predicate(map: &Map<String, Value>) -> MatcherResult<Predicate> {
    if map.len() != 1 {
        return Err(MatcherError::InvalidPattern(
            "a set predicate has exactly one key, IN or NOT_IN".to_string(),
        ));
    }
    let (key, values) = map.iter().next().ok_or_else(|| {
        MatcherError::InvalidPattern("empty set predicate".to_string())
    })?;
    let values = values
        .as_array()
        .ok_or_else(|| MatcherError::InvalidPattern(format!("{key} expects a list")))?
        .iter()
        .map(AttrValue::try_from)
        .collect::<Result<Vec<_>, _>>()?;
    match key.as_str() {
        "IN" => Ok(Predicate::In(values)),
        "NOT_IN" => Ok(Predicate::NotIn(values)),
        other => Err(MatcherError::InvalidPattern(format!(
            "unknown set predicate {other:?}"
        ))),
    }
}

/// A non-empty sequence of token specs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pattern {
    specs: Vec<TokenSpec>,
}

impl Pattern {
    pub fn new(specs: Vec<TokenSpec>) -> MatcherResult<Self> {
        if specs.is_empty() {
            return Err(MatcherError::InvalidPattern(
                "a pattern needs at least one token spec".to_string(),
            ));
        }
        Ok(Self { specs })
    }

    /// Parse a JSON list of token specs.
    pub fn from_json(value: &Value) -> MatcherResult<Self> {
        let list = value.as_array().ok_or_else(|| {
            MatcherError::InvalidPattern(format!("a pattern must be a list, got {value}"))
        })?;
        let specs = list
            .iter()
            .map(TokenSpec::from_json)
            .collect::<MatcherResult<Vec<_>>>()?;
        Self::new(specs)
    }

    pub fn specs(&self) -> &[TokenSpec] {
        &self.specs
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}

impl TryFrom<&Value> for Pattern {
    type Error = MatcherError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        Self::from_json(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lexis_types::ErrorKind;
    use serde_json::json;

    #[test]
    fn parses_plain_values() {
        let spec = TokenSpec::from_json(&json!({"LOWER": "fifa"})).unwrap();
        assert_eq!(spec, TokenSpec::any().attr(LexAttr::Lower, "fifa"));

        let spec = TokenSpec::from_json(&json!({"IS_DIGIT": true})).unwrap();
        assert_eq!(spec.predicates, vec![(LexAttr::IsDigit, Predicate::Equals(true.into()))]);

        let spec = TokenSpec::from_json(&json!({"LENGTH": 4})).unwrap();
        assert_eq!(spec.predicates[0].1, Predicate::Equals(AttrValue::Int(4)));
    }

    #[test]
    fn parses_operators() {
        let spec = TokenSpec::from_json(&json!({"POS": "DET", "OP": "?"})).unwrap();
        assert_eq!(spec.op, Quantifier::Optional);
        assert_eq!(spec.predicates.len(), 1);
        assert_eq!(
            TokenSpec::from_json(&json!({"OP": "+"})).unwrap().op,
            Quantifier::OneOrMore
        );
        assert!(TokenSpec::from_json(&json!({"OP": "~"})).is_err());
    }

    #[test]
    fn parses_set_predicates() {
        let spec = TokenSpec::from_json(&json!({"LOWER": {"IN": ["cat", "dog"]}})).unwrap();
        assert_eq!(
            spec.predicates[0].1,
            Predicate::In(vec!["cat".into(), "dog".into()])
        );
        let spec = TokenSpec::from_json(&json!({"POS": {"NOT_IN": ["VERB"]}})).unwrap();
        assert!(matches!(spec.predicates[0].1, Predicate::NotIn(_)));
        assert!(TokenSpec::from_json(&json!({"POS": {"REGEX": "x"}})).is_err());
    }

    #[test]
    fn text_is_orth() {
        let spec = TokenSpec::from_json(&json!({"TEXT": "iPhone"})).unwrap();
        assert_eq!(spec.predicates[0].0, LexAttr::Orth);
    }

    #[test]
    fn rejects_bad_shapes() {
        let err = TokenSpec::from_json(&json!({"COLOUR": "red"})).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Attribute);
        assert!(TokenSpec::from_json(&json!(["LOWER"])).is_err());
        assert!(TokenSpec::from_json(&json!({"LOWER": [1, 2]})).is_err());
        assert!(Pattern::from_json(&json!([])).is_err());
        assert!(Pattern::from_json(&json!({"LOWER": "x"})).is_err());
    }

    #[test]
    fn predicate_semantics() {
        let unset = None;
        assert!(!Predicate::Equals("NOUN".into()).matches(unset));
        assert!(!Predicate::In(vec!["NOUN".into()]).matches(unset));
        assert!(Predicate::NotIn(vec!["NOUN".into()]).matches(unset));
        let noun = AttrValue::from("NOUN");
        assert!(Predicate::In(vec!["NOUN".into(), "VERB".into()]).matches(Some(&noun)));
        assert!(!Predicate::NotIn(vec!["NOUN".into()]).matches(Some(&noun)));
    }
}
