//! Key paths: routes from a root container to a nested element.
//!
//! A key path is a sequence of [`Key`]s. Applied to a root, each key selects a
//! child of the current container until the target is reached.

use crate::parse::{parse_key_path, ParseOptions};
use crate::{Key, NestResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// An ordered sequence of keys naming a location in a nested structure.
///
/// # Examples
///
/// ```
/// use nestdict::KeyPath;
///
/// let path = KeyPath::root().key("users").index(0).key("name");
/// assert_eq!(path.len(), 3);
/// assert_eq!(path.to_string(), "$.users[0].name");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyPath(Vec<Key>);

impl KeyPath {
    /// Create an empty path (root).
    #[inline]
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Create an empty path (alias for `new`).
    #[inline]
    pub fn root() -> Self {
        Self::new()
    }

    /// Parse a separator-joined string path with default options otherwise.
    ///
    /// ```
    /// use nestdict::{keypath, KeyPath};
    ///
    /// assert_eq!(KeyPath::parse("a/0/b", "/").unwrap(), keypath!("a", 0, "b"));
    /// ```
    pub fn parse(text: &str, separator: &str) -> NestResult<Self> {
        parse_key_path(text, &ParseOptions::with_separator(separator))
    }

    /// Append a name key and return self (builder pattern).
    #[inline]
    pub fn key(mut self, k: impl Into<String>) -> Self {
        self.0.push(Key::Name(k.into()));
        self
    }

    /// Append an index key and return self (builder pattern).
    #[inline]
    pub fn index(mut self, i: i64) -> Self {
        self.0.push(Key::Index(i));
        self
    }

    /// Push a key onto the path (mutating).
    #[inline]
    pub fn push(&mut self, key: impl Into<Key>) {
        self.0.push(key.into());
    }

    /// Pop the last key from the path.
    #[inline]
    pub fn pop(&mut self) -> Option<Key> {
        self.0.pop()
    }

    /// Get the keys of this path.
    #[inline]
    pub fn keys(&self) -> &[Key] {
        &self.0
    }

    /// Check if this path is empty (root).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Get the number of keys in this path.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Split into the parent keys and the destination key.
    #[inline]
    pub fn split_last(&self) -> Option<(&Key, &[Key])> {
        self.0.split_last()
    }

    /// Get the parent path (path without the last key).
    #[inline]
    pub fn parent(&self) -> Option<KeyPath> {
        self.split_last().map(|(_, parent)| KeyPath(parent.to_vec()))
    }

    /// Iterate over the keys.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &Key> {
        self.0.iter()
    }
}

/// Renders `$` for the root, then each key: `$.users[0].name`.
impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "$")?;
        for key in &self.0 {
            write!(f, "{}", key)?;
        }
        Ok(())
    }
}

impl From<Vec<Key>> for KeyPath {
    fn from(keys: Vec<Key>) -> Self {
        KeyPath(keys)
    }
}

impl From<&[Key]> for KeyPath {
    fn from(keys: &[Key]) -> Self {
        KeyPath(keys.to_vec())
    }
}

impl From<Key> for KeyPath {
    fn from(key: Key) -> Self {
        KeyPath(vec![key])
    }
}

impl FromIterator<Key> for KeyPath {
    fn from_iter<I: IntoIterator<Item = Key>>(iter: I) -> Self {
        KeyPath(iter.into_iter().collect())
    }
}

impl IntoIterator for KeyPath {
    type Item = Key;
    type IntoIter = std::vec::IntoIter<Key>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a KeyPath {
    type Item = &'a Key;
    type IntoIter = std::slice::Iter<'a, Key>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl std::ops::Index<usize> for KeyPath {
    type Output = Key;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

/// Construct a [`KeyPath`] from a sequence of keys.
///
/// # Examples
///
/// ```
/// use nestdict::keypath;
///
/// // String literals become name keys
/// let p = keypath!("users", "alice", "email");
///
/// // Integers become index keys
/// let p = keypath!("items", 0, "name");
/// let p = keypath!("items", -1);
/// ```
#[macro_export]
macro_rules! keypath {
    () => {
        $crate::KeyPath::root()
    };
    ($($key:expr),+ $(,)?) => {{
        let mut p = $crate::KeyPath::root();
        $(
            p.push($crate::Key::from($key));
        )+
        p
    }};
}
