//! String key paths.
//!
//! A string path such as `"users.0.name"` is split on a separator and each
//! segment is typed: quoted segments are names, integer-like segments are
//! indices, everything else is a name.

use crate::{Key, KeyPath, NestError, NestResult};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Default key path separator.
pub const DEFAULT_SEPARATOR: &str = ".";

/// How string key paths are split and typed.
///
/// Missing fields take their defaults when deserialized, so partial
/// configuration documents are accepted:
///
/// ```
/// use nestdict::ParseOptions;
///
/// let opts: ParseOptions = serde_json::from_str(r#"{"separator": "/"}"#).unwrap();
/// assert_eq!(opts.separator, "/");
/// assert!(opts.parse_indices);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    /// Separator between segments. Must not be empty.
    pub separator: String,
    /// Type integer-like segments as [`Key::Index`]. A segment qualifies when
    /// `str::parse::<i64>` accepts it, so `" 3"`, `"1_000"` and values outside
    /// the `i64` range stay names.
    pub parse_indices: bool,
    /// Treat segments wrapped in matching `'` or `"` as names, quotes removed.
    pub unquote: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR.to_string(),
            parse_indices: true,
            unquote: true,
        }
    }
}

impl ParseOptions {
    /// Default options with a different separator.
    pub fn with_separator(separator: impl Into<String>) -> Self {
        Self {
            separator: separator.into(),
            ..Self::default()
        }
    }

    /// Type a single segment.
    pub fn parse_segment(&self, segment: &str) -> Key {
        if self.unquote {
            if let Some(inner) = strip_quotes(segment) {
                return Key::name(inner);
            }
        }
        if self.parse_indices {
            if let Ok(i) = segment.parse::<i64>() {
                return Key::Index(i);
            }
        }
        Key::name(segment)
    }
}

fn strip_quotes(segment: &str) -> Option<&str> {
    ['"', '\''].into_iter().find_map(|q| {
        segment.strip_prefix(q).and_then(|rest| rest.strip_suffix(q))
    })
}

/// Parse a separator-joined key path.
///
/// Every segment is kept, including empty ones: `"a..b"` has three keys and
/// `""` is the single key `Name("")`. Use [`KeyPath::root`] for the root.
///
/// # Examples
///
/// ```
/// use nestdict::{keypath, parse_key_path, ParseOptions};
///
/// let opts = ParseOptions::default();
/// assert_eq!(parse_key_path("users.0.name", &opts).unwrap(), keypath!("users", 0, "name"));
/// assert_eq!(parse_key_path("ids.'42'", &opts).unwrap(), keypath!("ids", "42"));
/// ```
pub fn parse_key_path(text: &str, options: &ParseOptions) -> NestResult<KeyPath> {
    if options.separator.is_empty() {
        return Err(NestError::InvalidSeparator);
    }
    Ok(text
        .split(options.separator.as_str())
        .map(|segment| options.parse_segment(segment))
        .collect())
}

/// A key path given either as typed keys or as a string still to be parsed.
///
/// Lets `get`-style entry points accept `"a.b.0"`, a [`KeyPath`], or a
/// single [`Key`] interchangeably.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PathSpec<'a> {
    /// Already-typed keys.
    Keys(Cow<'a, KeyPath>),
    /// Separator-joined text.
    Text(Cow<'a, str>),
}

impl PathSpec<'_> {
    /// Typed form of this path, parsing text with `options`.
    pub fn to_key_path(&self, options: &ParseOptions) -> NestResult<Cow<'_, KeyPath>> {
        match self {
            PathSpec::Keys(path) => Ok(Cow::Borrowed(path.as_ref())),
            PathSpec::Text(text) => parse_key_path(text, options).map(Cow::Owned),
        }
    }
}

impl From<KeyPath> for PathSpec<'_> {
    fn from(path: KeyPath) -> Self {
        PathSpec::Keys(Cow::Owned(path))
    }
}

impl<'a> From<&'a KeyPath> for PathSpec<'a> {
    fn from(path: &'a KeyPath) -> Self {
        PathSpec::Keys(Cow::Borrowed(path))
    }
}

impl From<Vec<Key>> for PathSpec<'_> {
    fn from(keys: Vec<Key>) -> Self {
        PathSpec::Keys(Cow::Owned(KeyPath::from(keys)))
    }
}

impl From<Key> for PathSpec<'_> {
    fn from(key: Key) -> Self {
        PathSpec::Keys(Cow::Owned(KeyPath::from(key)))
    }
}

impl<'a> From<&'a str> for PathSpec<'a> {
    fn from(text: &'a str) -> Self {
        PathSpec::Text(Cow::Borrowed(text))
    }
}

impl<'a> From<&'a String> for PathSpec<'a> {
    fn from(text: &'a String) -> Self {
        PathSpec::Text(Cow::Borrowed(text.as_str()))
    }
}

impl From<String> for PathSpec<'_> {
    fn from(text: String) -> Self {
        PathSpec::Text(Cow::Owned(text))
    }
}
