use std::fmt;

use thiserror::Error;

/// Errors produced by type operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid hex string: {0}")]
    InvalidHex(String),

    #[error("invalid byte length: expected {expected}, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("unknown token attribute: {0}")]
    UnknownAttribute(String),

    #[error("unsupported attribute value: {0}")]
    UnsupportedValue(String),
}

impl TypeError {
    /// Coarse classification of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidHex(_) | Self::InvalidLength { .. } | Self::UnsupportedValue(_) => {
                ErrorKind::Value
            }
            Self::UnknownAttribute(_) => ErrorKind::Attribute,
        }
    }
}

/// Coarse error classification shared by every Lexis error enum.
///
/// Each crate has its own error type; `kind()` on any of them maps the
/// concrete variant onto one of these categories so callers can react to
/// the category without matching on every variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// An identifier that was never interned.
    Lookup,
    /// Malformed construction input: lengths, bounds, overlaps.
    Value,
    /// An index outside the document.
    Index,
    /// An unregistered or misused extension attribute.
    Attribute,
    /// A malformed registration or pipeline configuration.
    Configuration,
    /// An operation that is undefined for its operands (e.g. similarity
    /// without vectors).
    Usage,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lookup => write!(f, "lookup"),
            Self::Value => write!(f, "value"),
            Self::Index => write!(f, "index"),
            Self::Attribute => write!(f, "attribute"),
            Self::Configuration => write!(f, "configuration"),
            Self::Usage => write!(f, "usage"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_are_assigned() {
        assert_eq!(TypeError::InvalidHex("zz".into()).kind(), ErrorKind::Value);
        assert_eq!(
            TypeError::UnknownAttribute("FOO".into()).kind(),
            ErrorKind::Attribute
        );
    }

    #[test]
    fn error_kind_display() {
        assert_eq!(ErrorKind::Lookup.to_string(), "lookup");
        assert_eq!(ErrorKind::Configuration.to_string(), "configuration");
    }
}
