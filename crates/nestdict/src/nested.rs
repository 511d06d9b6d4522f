//! `NestedDict`: key path navigation over a wrapped mapping or sequence.
//!
//! The wrapper is generic over how it holds the data. `NestedDict<Value>`
//! owns it, `NestedDict<&Value>` reads a borrowed structure, and
//! `NestedDict<&mut Value>` reads and writes the caller's structure in place.

use crate::resolve::{self, Found};
use crate::{value_type_name, Key, KeyPath, NestError, NestResult, ParseOptions, PathSpec, Value};
use serde::Serialize;
use std::borrow::{Borrow, BorrowMut};
use std::fmt;

/// A mapping or sequence addressed by key paths.
///
/// Paths may be typed ([`KeyPath`], [`Key`]) or strings split on the
/// configured separator.
///
/// # Examples
///
/// ```
/// use nestdict::{keypath, NestedDict, Value};
/// use serde_json::json;
///
/// let mut data = Value::from(json!({"path": {"to": {"key": "val"}}}));
/// let mut nd = NestedDict::new(&mut data).unwrap();
///
/// assert_eq!(nd.get("path.to.key").unwrap(), &Value::from("val"));
/// nd.insert(keypath!("newpath", "to", "key"), "newval").unwrap();
///
/// // The caller's structure was modified in place.
/// assert_eq!(
///     data,
///     Value::from(json!({
///         "path": {"to": {"key": "val"}},
///         "newpath": {"to": {"key": "newval"}}
///     }))
/// );
/// ```
#[derive(Clone)]
pub struct NestedDict<D = Value> {
    data: D,
    options: ParseOptions,
}

impl<D: Borrow<Value>> NestedDict<D> {
    /// Wrap `data` with default parse options.
    ///
    /// Fails with [`NestError::NotAContainer`] unless `data` is a mapping or
    /// a sequence.
    pub fn new(data: D) -> NestResult<Self> {
        Self::with_options(data, ParseOptions::default())
    }

    /// Wrap `data` with the given parse options.
    pub fn with_options(data: D, options: ParseOptions) -> NestResult<Self> {
        let value: &Value = data.borrow();
        if !value.is_container() {
            return Err(NestError::not_a_container(value));
        }
        Ok(Self { data, options })
    }

    /// Parse options used for string paths.
    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// The wrapped value.
    #[inline]
    pub fn as_value(&self) -> &Value {
        self.data.borrow()
    }

    /// Unwrap, returning the data as it was passed in.
    pub fn into_inner(self) -> D {
        self.data
    }

    /// Element at `path`.
    pub fn get<'p>(&self, path: impl Into<PathSpec<'p>>) -> NestResult<&Value> {
        let spec = path.into();
        let path = spec.to_key_path(&self.options)?;
        resolve::resolve(self.as_value(), &path)
    }

    /// Element at `path`, or `default` when it does not resolve.
    pub fn get_or<'s, 'p>(
        &'s self,
        path: impl Into<PathSpec<'p>>,
        default: &'s Value,
    ) -> &'s Value {
        self.get(path).unwrap_or(default)
    }

    /// Element at `path` wrapped again when it is a container.
    ///
    /// Returns `Ok(None)` when the element exists but is a scalar.
    pub fn get_nested<'p>(
        &self,
        path: impl Into<PathSpec<'p>>,
    ) -> NestResult<Option<NestedDict<&Value>>> {
        let value = self.get(path)?;
        if !value.is_container() {
            return Ok(None);
        }
        Ok(Some(NestedDict {
            data: value,
            options: self.options.clone(),
        }))
    }

    /// Whether `path` resolves.
    pub fn contains<'p>(&self, path: impl Into<PathSpec<'p>>) -> bool {
        self.get(path).is_ok()
    }

    /// Every path at which `key` is used as a mapping key.
    pub fn find_all(&self, key: impl Into<Key>) -> Vec<KeyPath> {
        resolve::find_all(self.as_value(), &key.into())
    }

    /// Every occurrence of `key` with the value stored under it.
    pub fn find_all_with_values(&self, key: impl Into<Key>) -> Vec<Found<'_>> {
        resolve::find_all_with_values(self.as_value(), &key.into())
    }

    /// Top-level keys: mapping keys in order, or `0..len` for a sequence.
    pub fn keys(&self) -> Vec<Key> {
        self.as_value()
            .as_container()
            .map(|c| c.keys())
            .unwrap_or_default()
    }

    /// Number of top-level entries.
    pub fn len(&self) -> usize {
        self.as_value().as_container().map(|c| c.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Compact JSON. Integer mapping keys are written as strings.
    pub fn to_json(&self) -> NestResult<String> {
        Ok(serde_json::to_string(self.as_value())?)
    }

    /// Pretty JSON indented by `indent` spaces.
    pub fn to_json_pretty(&self, indent: usize) -> NestResult<String> {
        let indent = " ".repeat(indent);
        let formatter = serde_json::ser::PrettyFormatter::with_indent(indent.as_bytes());
        let mut out = Vec::new();
        let mut ser = serde_json::Serializer::with_formatter(&mut out, formatter);
        self.as_value().serialize(&mut ser)?;
        Ok(String::from_utf8_lossy(&out).into_owned())
    }
}

impl<D: BorrowMut<Value>> NestedDict<D> {
    /// Mutable element at `path`.
    pub fn get_mut<'p>(&mut self, path: impl Into<PathSpec<'p>>) -> NestResult<&mut Value> {
        let spec = path.into();
        let path = spec.to_key_path(&self.options)?;
        resolve::resolve_mut(self.data.borrow_mut(), &path)
    }

    /// Write `value` at `path` under an existing parent.
    pub fn set<'p>(
        &mut self,
        path: impl Into<PathSpec<'p>>,
        value: impl Into<Value>,
    ) -> NestResult<()> {
        let spec = path.into();
        let path = spec.to_key_path(&self.options)?;
        resolve::set(self.data.borrow_mut(), &path, value.into())
    }

    /// Write `value` at `path`, creating missing mapping levels.
    pub fn insert<'p>(
        &mut self,
        path: impl Into<PathSpec<'p>>,
        value: impl Into<Value>,
    ) -> NestResult<()> {
        let spec = path.into();
        let path = spec.to_key_path(&self.options)?;
        resolve::insert(self.data.borrow_mut(), &path, value.into())
    }

    /// Remove every top-level entry. The container kind is kept.
    pub fn clear(&mut self) {
        if let Ok(container) = self.data.borrow_mut().as_container_mut() {
            container.clear();
        }
    }
}

impl Default for NestedDict<Value> {
    fn default() -> Self {
        Self {
            data: Value::empty_map(),
            options: ParseOptions::default(),
        }
    }
}

impl TryFrom<Value> for NestedDict<Value> {
    type Error = NestError;

    fn try_from(value: Value) -> NestResult<Self> {
        Self::new(value)
    }
}

impl TryFrom<serde_json::Value> for NestedDict<Value> {
    type Error = NestError;

    fn try_from(value: serde_json::Value) -> NestResult<Self> {
        Self::new(Value::from(value))
    }
}

impl<D: Borrow<Value>> fmt::Display for NestedDict<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NestedDict({})", self.as_value())
    }
}

impl<D: Borrow<Value>> fmt::Debug for NestedDict<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NestedDict")
            .field("kind", &value_type_name(self.as_value()))
            .field("data", self.as_value())
            .field("separator", &self.options.separator)
            .finish()
    }
}

impl<D: Borrow<Value>, E: Borrow<Value>> PartialEq<NestedDict<E>> for NestedDict<D> {
    fn eq(&self, other: &NestedDict<E>) -> bool {
        self.as_value() == other.as_value()
    }
}

impl<D: Borrow<Value>> PartialEq<Value> for NestedDict<D> {
    fn eq(&self, other: &Value) -> bool {
        self.as_value() == other
    }
}

impl<D: Borrow<Value>> PartialEq<NestedDict<D>> for Value {
    fn eq(&self, other: &NestedDict<D>) -> bool {
        self == other.as_value()
    }
}

impl<D: Borrow<Value>> Serialize for NestedDict<D> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.as_value().serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keypath;
    use serde_json::json;

    fn owned(v: serde_json::Value) -> NestedDict {
        NestedDict::try_from(v).unwrap()
    }

    #[test]
    fn test_new_rejects_scalars() {
        let err = NestedDict::new(Value::from(5)).unwrap_err();
        assert!(matches!(err, NestError::NotAContainer { found: "integer" }));
        assert!(NestedDict::new(Value::empty_seq()).is_ok());
    }

    #[test]
    fn test_default_is_empty_mapping() {
        let nd: NestedDict = NestedDict::default();
        assert!(nd.is_empty());
        assert_eq!(nd, Value::empty_map());
    }

    #[test]
    fn test_get_with_string_and_typed_paths() {
        let nd = owned(json!({"a": {"b": [{"c": 1}]}}));
        assert_eq!(nd.get("a.b.0.c").unwrap(), &Value::from(1));
        assert_eq!(nd.get(keypath!("a", "b", -1, "c")).unwrap(), &Value::from(1));
        assert_eq!(nd.get(Key::from("a")).unwrap().as_map().unwrap().len(), 1);
        assert!(nd.contains("a.b"));
        assert!(!nd.contains("a.z"));
    }

    #[test]
    fn test_custom_separator_from_options() {
        let nd = NestedDict::with_options(
            Value::from(json!({"a.b": {"c": 2}})),
            ParseOptions::with_separator("/"),
        )
        .unwrap();
        assert_eq!(nd.get("a.b/c").unwrap(), &Value::from(2));
    }

    #[test]
    fn test_get_or_default() {
        let nd = owned(json!({"a": 1}));
        let fallback = Value::from("none");
        assert_eq!(nd.get_or("b.c", &fallback), &fallback);
        assert_eq!(nd.get_or("a", &fallback), &Value::from(1));
    }

    #[test]
    fn test_get_nested_wraps_containers_only() {
        let nd = owned(json!({"a": {"b": 1}, "s": "x"}));
        let inner = nd.get_nested("a").unwrap().unwrap();
        assert_eq!(inner.get("b").unwrap(), &Value::from(1));
        assert!(nd.get_nested("s").unwrap().is_none());
        assert!(nd.get_nested("missing").is_err());
    }

    #[test]
    fn test_borrowed_wrapper_mutates_original() {
        let mut data = Value::from(json!({"a": {"b": 1}}));
        {
            let mut nd = NestedDict::new(&mut data).unwrap();
            nd.set("a.b", 2).unwrap();
            nd.insert("x.y", true).unwrap();
        }
        assert_eq!(data, Value::from(json!({"a": {"b": 2}, "x": {"y": true}})));
    }

    #[test]
    fn test_read_only_wrapper() {
        let data = Value::from(json!({"k": [1, 2]}));
        let nd = NestedDict::new(&data).unwrap();
        assert_eq!(nd.len(), 1);
        assert_eq!(nd.find_all("k"), vec![keypath!("k")]);
    }

    #[test]
    fn test_keys_for_mapping_and_sequence() {
        let nd = owned(json!({"b": 1, "a": 2}));
        assert_eq!(nd.keys(), vec![Key::from("b"), Key::from("a")]);
        let nd = owned(json!(["x", "y", "z"]));
        assert_eq!(nd.keys(), vec![Key::from(0), Key::from(1), Key::from(2)]);
    }

    #[test]
    fn test_clear_keeps_kind() {
        let mut nd = owned(json!([1, 2]));
        nd.clear();
        assert_eq!(nd, Value::empty_seq());
        let mut nd = owned(json!({"a": 1}));
        nd.clear();
        assert_eq!(nd, Value::empty_map());
    }

    #[test]
    fn test_display_delegates_to_value() {
        let nd = owned(json!({"a": [1, "x"]}));
        assert_eq!(nd.to_string(), r#"NestedDict({"a": [1, "x"]})"#);
    }

    #[test]
    fn test_equality_with_value_and_wrapper() {
        let data = Value::from(json!({"a": 1}));
        let owned_nd = NestedDict::new(data.clone()).unwrap();
        let borrowed_nd = NestedDict::new(&data).unwrap();
        assert_eq!(owned_nd, data);
        assert_eq!(data, borrowed_nd);
        assert!(owned_nd == borrowed_nd);
        assert!(owned_nd != Value::from(json!({"a": 2})));
    }

    #[test]
    fn test_json_dumps() {
        let mut nd = owned(json!([{"key0": {"key1": "value1"}}]));
        nd.set(keypath!(0, "key0", 3), 5).unwrap();
        assert_eq!(nd.to_json().unwrap(), r#"[{"key0":{"key1":"value1","3":5}}]"#);
        let pretty = nd.to_json_pretty(2).unwrap();
        assert!(pretty.starts_with("[\n  {\n    \"key0\""));
    }

    #[test]
    fn test_into_inner_returns_data() {
        let nd = owned(json!({"a": 1}));
        assert_eq!(nd.into_inner(), Value::from(json!({"a": 1})));
    }
}
