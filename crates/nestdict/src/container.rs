//! The container capability shared by mappings and sequences.
//!
//! Traversal code is written once against `&dyn Container` and never matches
//! on the concrete container type.

use crate::{value_type_name, Key, KeyPath, Map, NestError, Value};
use indexmap::IndexMap;

/// Why a single-step lookup failed.
///
/// Carries no borrow of the container, so callers can turn it into a
/// [`NestError`] after the lookup has released the container.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Miss {
    /// The key is absent (mapping), or is a name applied to a sequence.
    Absent,
    /// The index is outside the sequence bounds.
    OutOfRange {
        /// Requested index.
        index: i64,
        /// Sequence length.
        len: usize,
    },
}

impl Miss {
    /// Build the error for a lookup that failed at `path`.
    pub fn at(self, path: KeyPath) -> NestError {
        match self {
            Miss::Absent => NestError::key_not_found(path),
            Miss::OutOfRange { index, len } => NestError::index_out_of_range(path, index, len),
        }
    }
}

/// A mapping or a sequence.
pub trait Container {
    /// Human-readable container kind.
    fn kind(&self) -> &'static str;

    /// True when entries are stored under keys, false when keys are positions.
    fn keyed(&self) -> bool;

    /// Number of entries.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Child stored under `key`.
    fn child(&self, key: &Key) -> Result<&Value, Miss>;

    /// Mutable child stored under `key`.
    fn child_mut(&mut self, key: &Key) -> Result<&mut Value, Miss>;

    fn contains_key(&self, key: &Key) -> bool {
        self.child(key).is_ok()
    }

    /// Write `value` under `key`, returning the previous value if any.
    ///
    /// Mappings accept new keys. Sequences only overwrite existing positions.
    fn assign(&mut self, key: &Key, value: Value) -> Result<Option<Value>, Miss>;

    /// Existing child under `key`, or `vacant` stored there first.
    ///
    /// Mappings add the key. Sequences append when `key` equals the length and
    /// reject any other missing position.
    fn entry_or(&mut self, key: &Key, vacant: Value) -> Result<&mut Value, Miss>;

    /// Entries with their keys, in container order.
    fn entries(&self) -> Box<dyn Iterator<Item = (Key, &Value)> + '_>;

    /// Keys in container order. For a sequence these are `0..len`.
    fn keys(&self) -> Vec<Key> {
        self.entries().map(|(k, _)| k).collect()
    }

    /// Remove every entry.
    fn clear(&mut self);
}

impl Container for Map {
    fn kind(&self) -> &'static str {
        "mapping"
    }

    fn keyed(&self) -> bool {
        true
    }

    fn len(&self) -> usize {
        IndexMap::len(self)
    }

    fn child(&self, key: &Key) -> Result<&Value, Miss> {
        self.get(key).ok_or(Miss::Absent)
    }

    fn child_mut(&mut self, key: &Key) -> Result<&mut Value, Miss> {
        self.get_mut(key).ok_or(Miss::Absent)
    }

    fn assign(&mut self, key: &Key, value: Value) -> Result<Option<Value>, Miss> {
        Ok(self.insert(key.clone(), value))
    }

    fn entry_or(&mut self, key: &Key, vacant: Value) -> Result<&mut Value, Miss> {
        Ok(self.entry(key.clone()).or_insert(vacant))
    }

    fn entries(&self) -> Box<dyn Iterator<Item = (Key, &Value)> + '_> {
        Box::new(self.iter().map(|(k, v)| (k.clone(), v)))
    }

    fn clear(&mut self) {
        IndexMap::clear(self)
    }
}

impl Container for Vec<Value> {
    fn kind(&self) -> &'static str {
        "sequence"
    }

    fn keyed(&self) -> bool {
        false
    }

    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn child(&self, key: &Key) -> Result<&Value, Miss> {
        let pos = seq_position(key, Vec::len(self))?;
        Ok(&self[pos])
    }

    fn child_mut(&mut self, key: &Key) -> Result<&mut Value, Miss> {
        let pos = seq_position(key, Vec::len(self))?;
        Ok(&mut self[pos])
    }

    fn assign(&mut self, key: &Key, value: Value) -> Result<Option<Value>, Miss> {
        let slot = self.child_mut(key)?;
        Ok(Some(std::mem::replace(slot, value)))
    }

    fn entry_or(&mut self, key: &Key, vacant: Value) -> Result<&mut Value, Miss> {
        let len = Vec::len(self);
        if key.as_index().and_then(|i| usize::try_from(i).ok()) == Some(len) {
            self.push(vacant);
            return Ok(&mut self[len]);
        }
        self.child_mut(key)
    }

    fn entries(&self) -> Box<dyn Iterator<Item = (Key, &Value)> + '_> {
        Box::new(self.iter().enumerate().map(|(i, v)| (Key::from(i), v)))
    }

    fn clear(&mut self) {
        Vec::clear(self)
    }
}

fn seq_position(key: &Key, len: usize) -> Result<usize, Miss> {
    match key {
        Key::Index(index) => key.position(len).ok_or(Miss::OutOfRange {
            index: *index,
            len,
        }),
        Key::Name(_) => Err(Miss::Absent),
    }
}

impl Value {
    /// View this value as a container, or report its type name.
    pub fn as_container(&self) -> Result<&dyn Container, &'static str> {
        match self {
            Value::Map(m) => Ok(m),
            Value::Seq(s) => Ok(s),
            other => Err(value_type_name(other)),
        }
    }

    /// Mutable view of this value as a container, or report its type name.
    pub fn as_container_mut(&mut self) -> Result<&mut dyn Container, &'static str> {
        match self {
            Value::Map(m) => Ok(m),
            Value::Seq(s) => Ok(s),
            other => Err(value_type_name(other)),
        }
    }
}
