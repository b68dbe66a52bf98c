use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::TypeError;

/// A named token attribute.
///
/// These are the attributes a token exposes to rule-based matchers and to
/// any other consumer that wants to address token properties by name. The
/// names follow the upper-case convention of the pattern format (`"LOWER"`,
/// `"IS_PUNCT"`, ...). `TEXT` is accepted as an alias for `ORTH`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LexAttr {
    #[serde(alias = "TEXT")]
    Orth,
    Lower,
    Norm,
    Shape,
    Prefix,
    Suffix,
    Length,
    IsAlpha,
    IsAscii,
    IsDigit,
    IsLower,
    IsUpper,
    IsTitle,
    IsPunct,
    IsLeftPunct,
    IsRightPunct,
    IsSpace,
    IsBracket,
    IsQuote,
    IsCurrency,
    LikeNum,
    LikeUrl,
    LikeEmail,
    Lemma,
    Pos,
    Tag,
    Dep,
    EntType,
}

impl LexAttr {
    /// Every attribute, in declaration order.
    pub const ALL: [LexAttr; 28] = [
        Self::Orth,
        Self::Lower,
        Self::Norm,
        Self::Shape,
        Self::Prefix,
        Self::Suffix,
        Self::Length,
        Self::IsAlpha,
        Self::IsAscii,
        Self::IsDigit,
        Self::IsLower,
        Self::IsUpper,
        Self::IsTitle,
        Self::IsPunct,
        Self::IsLeftPunct,
        Self::IsRightPunct,
        Self::IsSpace,
        Self::IsBracket,
        Self::IsQuote,
        Self::IsCurrency,
        Self::LikeNum,
        Self::LikeUrl,
        Self::LikeEmail,
        Self::Lemma,
        Self::Pos,
        Self::Tag,
        Self::Dep,
        Self::EntType,
    ];

    /// Canonical upper-case name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Orth => "ORTH",
            Self::Lower => "LOWER",
            Self::Norm => "NORM",
            Self::Shape => "SHAPE",
            Self::Prefix => "PREFIX",
            Self::Suffix => "SUFFIX",
            Self::Length => "LENGTH",
            Self::IsAlpha => "IS_ALPHA",
            Self::IsAscii => "IS_ASCII",
            Self::IsDigit => "IS_DIGIT",
            Self::IsLower => "IS_LOWER",
            Self::IsUpper => "IS_UPPER",
            Self::IsTitle => "IS_TITLE",
            Self::IsPunct => "IS_PUNCT",
            Self::IsLeftPunct => "IS_LEFT_PUNCT",
            Self::IsRightPunct => "IS_RIGHT_PUNCT",
            Self::IsSpace => "IS_SPACE",
            Self::IsBracket => "IS_BRACKET",
            Self::IsQuote => "IS_QUOTE",
            Self::IsCurrency => "IS_CURRENCY",
            Self::LikeNum => "LIKE_NUM",
            Self::LikeUrl => "LIKE_URL",
            Self::LikeEmail => "LIKE_EMAIL",
            Self::Lemma => "LEMMA",
            Self::Pos => "POS",
            Self::Tag => "TAG",
            Self::Dep => "DEP",
            Self::EntType => "ENT_TYPE",
        }
    }

    /// Parse an attribute name, case-insensitively. `TEXT` maps to `ORTH`.
    pub fn from_name(name: &str) -> Result<Self, TypeError> {
        let upper = name.to_ascii_uppercase();
        if upper == "TEXT" {
            return Ok(Self::Orth);
        }
        Self::ALL
            .iter()
            .copied()
            .find(|attr| attr.name() == upper)
            .ok_or_else(|| TypeError::UnknownAttribute(name.to_string()))
    }

    /// Returns `true` for the boolean flag attributes (`IS_*`, `LIKE_*`).
    pub fn is_flag(&self) -> bool {
        let name = self.name();
        name.starts_with("IS_") || name.starts_with("LIKE_")
    }
}

impl fmt::Display for LexAttr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The value of a token attribute.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    Bool(bool),
    Int(i64),
    Str(String),
}

impl AttrValue {
    /// The string payload, if this is a string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// The boolean payload, if this is a boolean value.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(n) => write!(f, "{n}"),
            Self::Str(s) => write!(f, "{s}"),
        }
    }
}

impl From<bool> for AttrValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for AttrValue {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<&str> for AttrValue {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl TryFrom<&Value> for AttrValue {
    type Error = TypeError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::Bool(b) => Ok(Self::Bool(*b)),
            Value::String(s) => Ok(Self::Str(s.clone())),
            Value::Number(n) => n
                .as_i64()
                .map(Self::Int)
                .ok_or_else(|| TypeError::UnsupportedValue(n.to_string())),
            other => Err(TypeError::UnsupportedValue(other.to_string())),
        }
    }
}

impl From<AttrValue> for Value {
    fn from(value: AttrValue) -> Self {
        match value {
            AttrValue::Bool(b) => Value::Bool(b),
            AttrValue::Int(n) => Value::from(n),
            AttrValue::Str(s) => Value::String(s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn names_roundtrip() {
        for attr in LexAttr::ALL {
            assert_eq!(LexAttr::from_name(attr.name()).unwrap(), attr);
        }
    }

    #[test]
    fn text_is_orth_alias() {
        assert_eq!(LexAttr::from_name("TEXT").unwrap(), LexAttr::Orth);
        assert_eq!(LexAttr::from_name("text").unwrap(), LexAttr::Orth);
        let parsed: LexAttr = serde_json::from_str("\"TEXT\"").unwrap();
        assert_eq!(parsed, LexAttr::Orth);
    }

    #[test]
    fn unknown_attribute_rejected() {
        assert_eq!(
            LexAttr::from_name("COLOUR"),
            Err(TypeError::UnknownAttribute("COLOUR".into()))
        );
    }

    #[test]
    fn flags_are_detected() {
        assert!(LexAttr::IsPunct.is_flag());
        assert!(LexAttr::LikeNum.is_flag());
        assert!(!LexAttr::Lower.is_flag());
        assert!(!LexAttr::Length.is_flag());
    }

    #[test]
    fn serde_uses_upper_snake_case() {
        assert_eq!(
            serde_json::to_string(&LexAttr::IsLeftPunct).unwrap(),
            "\"IS_LEFT_PUNCT\""
        );
    }

    #[test]
    fn attr_value_from_json() {
        assert_eq!(AttrValue::try_from(&json!(true)).unwrap(), AttrValue::Bool(true));
        assert_eq!(AttrValue::try_from(&json!("fifa")).unwrap(), AttrValue::from("fifa"));
        assert_eq!(AttrValue::try_from(&json!(4)).unwrap(), AttrValue::Int(4));
        assert!(AttrValue::try_from(&json!(1.5)).is_err());
        assert!(AttrValue::try_from(&json!([1])).is_err());
    }

    #[test]
    fn attr_value_into_json() {
        let value: Value = AttrValue::from("x").into();
        assert_eq!(value, json!("x"));
    }
}
