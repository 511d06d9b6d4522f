//! Keys used both as mapping keys and as key path segments.
//!
//! A key is either a name (string) or an integer index. On a mapping both
//! variants are ordinary hashable keys; on a sequence only `Index` applies.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single key: a mapping key or a sequence index.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Key {
    /// Integer key. Indexes sequences (negative counts from the end) and is a
    /// plain integer key on mappings.
    Index(i64),
    /// String key.
    Name(String),
}

impl Key {
    /// Create a name key.
    #[inline]
    pub fn name(k: impl Into<String>) -> Self {
        Key::Name(k.into())
    }

    /// Create an index key.
    #[inline]
    pub fn index(i: i64) -> Self {
        Key::Index(i)
    }

    /// Returns true if this is a name key.
    #[inline]
    pub fn is_name(&self) -> bool {
        matches!(self, Key::Name(_))
    }

    /// Returns true if this is an index key.
    #[inline]
    pub fn is_index(&self) -> bool {
        matches!(self, Key::Index(_))
    }

    /// Get the name if this is a name key.
    #[inline]
    pub fn as_name(&self) -> Option<&str> {
        match self {
            Key::Name(k) => Some(k),
            Key::Index(_) => None,
        }
    }

    /// Get the index if this is an index key.
    #[inline]
    pub fn as_index(&self) -> Option<i64> {
        match self {
            Key::Name(_) => None,
            Key::Index(i) => Some(*i),
        }
    }

    /// Resolve this key against a sequence of `len` elements.
    ///
    /// Negative indices count from the end. Returns `None` for name keys and
    /// for indices outside `-len..len`.
    pub fn position(&self, len: usize) -> Option<usize> {
        let i = self.as_index()?;
        let pos = if i < 0 {
            i.checked_add(i64::try_from(len).ok()?)?
        } else {
            i
        };
        usize::try_from(pos).ok().filter(|p| *p < len)
    }

    /// Write the key without path punctuation: `name` or `3`.
    pub(crate) fn fmt_bare(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Name(k) => write!(f, "{:?}", k),
            Key::Index(i) => write!(f, "{}", i),
        }
    }
}

/// Path-style rendering: `.name` for names, `[3]` for indices.
impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Name(k) => write!(f, ".{}", k),
            Key::Index(i) => write!(f, "[{}]", i),
        }
    }
}

impl From<String> for Key {
    fn from(s: String) -> Self {
        Key::Name(s)
    }
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        Key::Name(s.to_owned())
    }
}

impl From<&String> for Key {
    fn from(s: &String) -> Self {
        Key::Name(s.clone())
    }
}

impl From<i64> for Key {
    fn from(i: i64) -> Self {
        Key::Index(i)
    }
}

impl From<i32> for Key {
    fn from(i: i32) -> Self {
        Key::Index(i64::from(i))
    }
}

impl From<usize> for Key {
    fn from(i: usize) -> Self {
        Key::Index(i64::try_from(i).unwrap_or(i64::MAX))
    }
}

impl From<&Key> for Key {
    fn from(k: &Key) -> Self {
        k.clone()
    }
}
