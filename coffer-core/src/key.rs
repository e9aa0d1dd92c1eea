use crate::errors::KeyError;
use std::fmt;

/// Root prefix under which every secret key is stored.
pub const KEY_PREFIX: &str = "keys";

/// A `/`-joined storage key rooted at [`KEY_PREFIX`].
///
/// A key whose final segment is empty is a container marker: it proves the
/// corresponding path level was explicitly created and never carries a value.
/// Segments are validated at construction so the trail and the encoded key
/// round-trip without ambiguity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Key(String);

impl Key {
    /// Encode a trail of path segments as a storage key.
    ///
    /// Rejects an empty trail, any segment containing the `/` separator, and
    /// any empty segment other than a single trailing one (the container
    /// marker position).
    pub fn from_trail<S: AsRef<str>>(trail: &[S]) -> Result<Self, KeyError> {
        if trail.is_empty() {
            return Err(KeyError::EmptyTrail);
        }
        let last = trail.len() - 1;
        for (index, segment) in trail.iter().enumerate() {
            let segment = segment.as_ref();
            if segment.contains('/') {
                return Err(KeyError::SeparatorInSegment {
                    segment: segment.to_string(),
                });
            }
            if segment.is_empty() && index != last {
                return Err(KeyError::EmptySegment);
            }
        }
        let mut key = String::from(KEY_PREFIX);
        for segment in trail {
            key.push('/');
            key.push_str(segment.as_ref());
        }
        Ok(Self(key))
    }

    /// Decode the key back into its trail segments.
    pub fn trail(&self) -> Vec<&str> {
        self.0[KEY_PREFIX.len() + 1..].split('/').collect()
    }

    /// True when this key is a container marker (trailing empty segment).
    pub fn is_container(&self) -> bool {
        self.0.ends_with('/')
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
