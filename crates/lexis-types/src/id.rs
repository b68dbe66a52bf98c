use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Identifier of an interned string.
///
/// A `StringId` is derived from the string's content (see
/// `lexis_strings::StringHasher`), so identical text always yields the same
/// id, independent of insertion order or of which store it was interned
/// into. The empty string is pinned to [`StringId::EMPTY`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StringId(u64);

impl StringId {
    /// The id of the empty string.
    pub const EMPTY: Self = Self(0);

    /// Create from a raw 64-bit value. Use the hasher for production code.
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw 64-bit value.
    pub const fn as_u64(&self) -> u64 {
        self.0
    }

    /// Returns `true` for the id of the empty string.
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Hex-encoded big-endian representation (16 characters).
    pub fn to_hex(&self) -> String {
        hex::encode(self.0.to_be_bytes())
    }

    /// Short hex representation (first 8 characters).
    pub fn short_hex(&self) -> String {
        hex::encode(&self.0.to_be_bytes()[..4])
    }

    /// Parse from a 16-character hex string.
    pub fn from_hex(s: &str) -> Result<Self, TypeError> {
        let bytes = hex::decode(s).map_err(|e| TypeError::InvalidHex(e.to_string()))?;
        if bytes.len() != 8 {
            return Err(TypeError::InvalidLength {
                expected: 8,
                actual: bytes.len(),
            });
        }
        let mut arr = [0u8; 8];
        arr.copy_from_slice(&bytes);
        Ok(Self(u64::from_be_bytes(arr)))
    }
}

impl fmt::Debug for StringId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StringId({})", self.short_hex())
    }
}

impl fmt::Display for StringId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for StringId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl From<StringId> for u64 {
    fn from(id: StringId) -> Self {
        id.0
    }
}
