use lexis_types::StringId;

/// Domain-separated BLAKE3 string hasher.
///
/// Each hasher carries a domain tag that is prepended to every hash
/// computation, so ids produced for different purposes never collide by
/// construction. The id is the first eight bytes of the digest read as a
/// little-endian `u64`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StringHasher {
    domain: &'static str,
}

impl StringHasher {
    /// Hasher for vocabulary strings.
    pub const STRINGS: Self = Self {
        domain: "lexis-string-v1",
    };

    /// Create a hasher with a custom domain tag.
    pub const fn new(domain: &'static str) -> Self {
        Self { domain }
    }

    /// Hash a string into its id.
    ///
    /// The empty string always maps to [`StringId::EMPTY`], and no other
    /// string ever does.
    pub fn hash(&self, s: &str) -> StringId {
        if s.is_empty() {
            return StringId::EMPTY;
        }
        let mut hasher = blake3::Hasher::new();
        hasher.update(self.domain.as_bytes());
        hasher.update(b":");
        hasher.update(s.as_bytes());
        let digest = hasher.finalize();
        let mut head = [0u8; 8];
        head.copy_from_slice(&digest.as_bytes()[..8]);
        match u64::from_le_bytes(head) {
            0 => StringId::from_raw(1),
            raw => StringId::from_raw(raw),
        }
    }

    /// Verify that a string produces the expected id.
    pub fn verify(&self, s: &str, expected: StringId) -> bool {
        self.hash(s) == expected
    }

    /// The domain tag used by this hasher.
    pub fn domain(&self) -> &str {
        self.domain
    }
}

impl Default for StringHasher {
    fn default() -> Self {
        Self::STRINGS
    }
}
