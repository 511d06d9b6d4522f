//! Error types for nestdict operations.

use crate::{KeyPath, Value};
use thiserror::Error;

/// Result type alias for nestdict operations.
pub type NestResult<T> = Result<T, NestError>;

/// Errors that can occur while resolving or writing key paths.
///
/// Traversal errors carry the path up to and including the step that failed,
/// and the depth of that step (the number of keys consumed).
#[derive(Debug, Error)]
pub enum NestError {
    /// A mapping key is absent, or a name key was applied to a sequence.
    #[error("key not found at depth {depth}: {path}")]
    KeyNotFound {
        /// The path up to and including the missing key.
        path: KeyPath,
        /// Number of keys consumed when the lookup failed.
        depth: usize,
    },

    /// A sequence index is outside the sequence bounds.
    #[error("index {index} out of range (len: {len}) at depth {depth}: {path}")]
    IndexOutOfRange {
        /// The path up to and including the index.
        path: KeyPath,
        /// Number of keys consumed when the lookup failed.
        depth: usize,
        /// The index that was accessed.
        index: i64,
        /// The actual length of the sequence.
        len: usize,
    },

    /// A step needed to descend into a container but found a scalar.
    #[error("cannot descend into {found} at depth {depth}: {path}")]
    InvalidParent {
        /// The path of the non-container value.
        path: KeyPath,
        /// Depth of the non-container value.
        depth: usize,
        /// Type name of the value found there.
        found: &'static str,
    },

    /// A write was requested with an empty key path.
    #[error("key path is empty; there is no destination key to write")]
    EmptyPath,

    /// Only mappings and sequences can be wrapped.
    #[error("only a mapping or a sequence can be wrapped, found {found}")]
    NotAContainer {
        /// Type name of the rejected value.
        found: &'static str,
    },

    /// The key path separator was empty.
    #[error("key path separator must not be empty")]
    InvalidSeparator,

    /// JSON serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl NestError {
    /// Create a key not found error for the given failing path.
    #[inline]
    pub fn key_not_found(path: KeyPath) -> Self {
        let depth = path.len();
        NestError::KeyNotFound { path, depth }
    }

    /// Create an index out of range error for the given failing path.
    #[inline]
    pub fn index_out_of_range(path: KeyPath, index: i64, len: usize) -> Self {
        let depth = path.len();
        NestError::IndexOutOfRange {
            path,
            depth,
            index,
            len,
        }
    }

    /// Create an invalid parent error for the non-container at `path`.
    #[inline]
    pub fn invalid_parent(path: KeyPath, found: &'static str) -> Self {
        let depth = path.len();
        NestError::InvalidParent { path, depth, found }
    }

    /// Create a not-a-container error for a rejected wrap.
    #[inline]
    pub fn not_a_container(value: &Value) -> Self {
        NestError::NotAContainer {
            found: value_type_name(value),
        }
    }

    /// The path at which traversal stopped, if this is a traversal error.
    pub fn path(&self) -> Option<&KeyPath> {
        match self {
            NestError::KeyNotFound { path, .. }
            | NestError::IndexOutOfRange { path, .. }
            | NestError::InvalidParent { path, .. } => Some(path),
            _ => None,
        }
    }
}

/// Get the type name of a value.
#[inline]
pub fn value_type_name(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Int(_) => "integer",
        Value::Float(_) => "float",
        Value::Str(_) => "string",
        Value::Seq(_) => "sequence",
        Value::Map(_) => "mapping",
    }
}
