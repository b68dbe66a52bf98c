use std::fmt;

use serde::{Deserialize, Serialize};

/// The three view kinds that extension attributes can be attached to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ViewKind {
    Doc,
    Token,
    Span,
}

impl ViewKind {
    /// All view kinds, in declaration order.
    pub const ALL: [ViewKind; 3] = [Self::Doc, Self::Token, Self::Span];
}

impl fmt::Display for ViewKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Doc => write!(f, "Doc"),
            Self::Token => write!(f, "Token"),
            Self::Span => write!(f, "Span"),
        }
    }
}
