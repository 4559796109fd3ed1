//! Cache key derivation.

use std::fmt;

/// Longest encoded key used verbatim as a file stem.
///
/// Leaves room for the extension within the common 255-byte file name limit.
pub const MAX_ENCODED_KEY_LEN: usize = 200;

/// Leading character of digest keys. Never produced by hex encoding.
const DIGEST_PREFIX: char = 'h';

/// File-name-safe identifier derived from equation text.
///
/// Short equations are encoded as lowercase hex of their UTF-8 bytes, which
/// is reversible and survives case-insensitive filesystems. Equations whose
/// encoding would be empty or longer than [`MAX_ENCODED_KEY_LEN`] use `h`
/// followed by the hex BLAKE3 digest of the text. The `h` keeps the two kinds
/// of key disjoint.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    value: String,
    digest: bool,
}

impl CacheKey {
    /// Derives the key for an equation.
    pub fn new(equation: &str) -> Self {
        let encoded = hex::encode(equation.as_bytes());
        if encoded.is_empty() || encoded.len() > MAX_ENCODED_KEY_LEN {
            let digest = blake3::hash(equation.as_bytes()).to_hex();
            Self {
                value: format!("{DIGEST_PREFIX}{digest}"),
                digest: true,
            }
        } else {
            Self {
                value: encoded,
                digest: false,
            }
        }
    }

    /// Returns the key as a file stem.
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Returns true if the key is a digest rather than an encoding.
    pub fn is_digest(&self) -> bool {
        self.digest
    }

    /// Recovers the equation text from an encoded key.
    ///
    /// Returns `None` for digest keys.
    pub fn decode(&self) -> Option<String> {
        if self.digest {
            return None;
        }
        let bytes = hex::decode(&self.value).ok()?;
        String::from_utf8(bytes).ok()
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl AsRef<str> for CacheKey {
    fn as_ref(&self) -> &str {
        &self.value
    }
}
