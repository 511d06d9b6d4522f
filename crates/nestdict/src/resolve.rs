//! Key path traversal.
//!
//! Every operation here is a single pass over the caller's structure:
//! `resolve` reads, `set` overwrites under an existing parent, `insert`
//! autocreates missing mapping levels, and `find_all` searches the whole tree.
//! None of them keep state between calls.

use crate::{Key, KeyPath, NestError, NestResult, ParseOptions, PathSpec, Value};
use serde::Serialize;

/// One occurrence reported by [`find_all_with_values`].
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Found<'a> {
    /// Path to the occurrence, ending with the searched key.
    #[serde(rename = "keypath")]
    pub path: KeyPath,
    /// Value stored under the searched key.
    pub value: &'a Value,
}

/// Resolve a key path to a reference into `root`.
///
/// The empty path resolves to `root` itself. Resolution stops at the first
/// step that cannot be taken.
///
/// # Examples
///
/// ```
/// use nestdict::{keypath, resolve, Value};
/// use serde_json::json;
///
/// let doc = Value::from(json!({"a": {"b": [10, 20]}}));
/// assert_eq!(resolve(&doc, &keypath!("a", "b", -1)).unwrap(), &Value::from(20));
/// assert!(resolve(&doc, &keypath!("a", "x")).is_err());
/// ```
pub fn resolve<'a>(root: &'a Value, path: &KeyPath) -> NestResult<&'a Value> {
    walk(root, path.keys(), path)
}

/// Resolve a key path to a mutable reference into `root`.
pub fn resolve_mut<'a>(root: &'a mut Value, path: &KeyPath) -> NestResult<&'a mut Value> {
    walk_mut(root, path.keys(), path)
}

fn walk<'a>(root: &'a Value, keys: &[Key], full_path: &KeyPath) -> NestResult<&'a Value> {
    let mut current = root;
    for (depth, key) in keys.iter().enumerate() {
        let container = current
            .as_container()
            .map_err(|found| stopped(NestError::invalid_parent(prefix(full_path, depth), found)))?;
        current = container
            .child(key)
            .map_err(|miss| stopped(miss.at(prefix(full_path, depth + 1))))?;
    }
    Ok(current)
}

fn walk_mut<'a>(
    root: &'a mut Value,
    keys: &[Key],
    full_path: &KeyPath,
) -> NestResult<&'a mut Value> {
    let mut current = root;
    for (depth, key) in keys.iter().enumerate() {
        let container = current
            .as_container_mut()
            .map_err(|found| stopped(NestError::invalid_parent(prefix(full_path, depth), found)))?;
        current = container
            .child_mut(key)
            .map_err(|miss| stopped(miss.at(prefix(full_path, depth + 1))))?;
    }
    Ok(current)
}

/// First `len` keys of `path`.
fn prefix(path: &KeyPath, len: usize) -> KeyPath {
    KeyPath::from(&path.keys()[..len])
}

fn stopped(err: NestError) -> NestError {
    tracing::trace!(error = %err, "key path resolution stopped");
    err
}

/// Write `value` at `path`, whose parent must already exist.
///
/// Mappings accept a new destination key; sequences only overwrite an
/// existing index. Intermediate levels are never created.
///
/// # Errors
///
/// - [`NestError::EmptyPath`] for an empty path
/// - [`NestError::KeyNotFound`] / [`NestError::IndexOutOfRange`] when the
///   parent path or the destination index does not exist
/// - [`NestError::InvalidParent`] when the parent is not a container
pub fn set(root: &mut Value, path: &KeyPath, value: Value) -> NestResult<()> {
    let (last, parents) = path.split_last().ok_or(NestError::EmptyPath)?;
    let parent = walk_mut(root, parents, path)?;
    let container = parent
        .as_container_mut()
        .map_err(|found| NestError::invalid_parent(prefix(path, parents.len()), found))?;
    container
        .assign(last, value)
        .map_err(|miss| miss.at(path.clone()))?;
    Ok(())
}

/// Write `value` at `path`, creating missing intermediate mapping levels.
///
/// An absent mapping key gets a new empty mapping; a sequence index equal to
/// the sequence length appends one. Only the destination key is ever
/// overwritten: an existing non-container on the way fails with
/// [`NestError::InvalidParent`] and is left in place.
///
/// Errors can only occur before the first level is created, so a failed
/// insert leaves `root` untouched.
///
/// # Examples
///
/// ```
/// use nestdict::{insert, keypath, Value};
/// use serde_json::json;
///
/// let mut doc = Value::from(json!({"path": {"to": {"key": "val"}}}));
/// insert(&mut doc, &keypath!("newpath", "to", "key"), Value::from("newval")).unwrap();
/// assert_eq!(
///     doc,
///     Value::from(json!({
///         "path": {"to": {"key": "val"}},
///         "newpath": {"to": {"key": "newval"}}
///     }))
/// );
/// ```
pub fn insert(root: &mut Value, path: &KeyPath, value: Value) -> NestResult<()> {
    let (last, parents) = path.split_last().ok_or(NestError::EmptyPath)?;

    let mut current = root;
    for (depth, key) in parents.iter().enumerate() {
        let container = current
            .as_container_mut()
            .map_err(|found| NestError::invalid_parent(prefix(path, depth), found))?;
        if !container.contains_key(key) {
            tracing::debug!(path = %prefix(path, depth + 1), "autocreating mapping level");
        }
        current = container
            .entry_or(key, Value::empty_map())
            .map_err(|miss| miss.at(prefix(path, depth + 1)))?;
    }

    let container = current
        .as_container_mut()
        .map_err(|found| NestError::invalid_parent(prefix(path, parents.len()), found))?;
    let slot = container
        .entry_or(last, Value::Null)
        .map_err(|miss| miss.at(path.clone()))?;
    *slot = value;
    Ok(())
}

/// Find every path at which `key` is used as a mapping key.
///
/// The whole structure is searched depth-first, pre-order, left to right.
/// At each mapping the match (if any) is reported before the mapping's
/// children are visited. Sequence positions never match, even for an
/// index key. An absent key yields an empty list.
///
/// # Examples
///
/// ```
/// use nestdict::{find_all, keypath, Key, Value};
/// use serde_json::json;
///
/// let doc = Value::from(json!({"k": 1, "sub": {"k": 2}, "list": [{"k": 3}]}));
/// assert_eq!(
///     find_all(&doc, &Key::from("k")),
///     vec![keypath!("k"), keypath!("sub", "k"), keypath!("list", 0, "k")]
/// );
/// ```
pub fn find_all(root: &Value, key: &Key) -> Vec<KeyPath> {
    find_all_with_values(root, key)
        .into_iter()
        .map(|found| found.path)
        .collect()
}

/// Like [`find_all`], also returning the value stored under each match.
pub fn find_all_with_values<'a>(root: &'a Value, key: &Key) -> Vec<Found<'a>> {
    let mut hits = Vec::new();
    let mut trail = KeyPath::root();
    search(root, key, &mut trail, &mut hits);
    tracing::trace!(key = ?key, hits = hits.len(), "key search finished");
    hits
}

fn search<'a>(node: &'a Value, target: &Key, trail: &mut KeyPath, hits: &mut Vec<Found<'a>>) {
    let Ok(container) = node.as_container() else {
        return;
    };

    if container.keyed() {
        if let Ok(value) = container.child(target) {
            let mut path = trail.clone();
            path.push(target.clone());
            hits.push(Found { path, value });
        }
    }

    for (key, child) in container.entries() {
        trail.push(key);
        search(child, target, trail, hits);
        trail.pop();
    }
}

/// Resolve a typed or string key path, splitting strings on `separator`.
///
/// # Examples
///
/// ```
/// use nestdict::{get, keypath, Value};
/// use serde_json::json;
///
/// let doc = Value::from(json!({"a": {"b": {"c": 1}}}));
/// assert_eq!(get(&doc, "a.b.c", ".").unwrap(), &Value::from(1));
/// assert_eq!(get(&doc, "a/b/c", "/").unwrap(), &Value::from(1));
/// assert_eq!(get(&doc, keypath!("a", "b"), ".").unwrap(), &Value::from(json!({"c": 1})));
/// ```
pub fn get<'a, 'p>(
    root: &'a Value,
    path: impl Into<PathSpec<'p>>,
    separator: &str,
) -> NestResult<&'a Value> {
    get_with(root, path, &ParseOptions::with_separator(separator))
}

/// [`get`] with full parse options.
pub fn get_with<'a, 'p>(
    root: &'a Value,
    path: impl Into<PathSpec<'p>>,
    options: &ParseOptions,
) -> NestResult<&'a Value> {
    let spec = path.into();
    let path = spec.to_key_path(options)?;
    resolve(root, &path)
}

/// [`get`], returning `default` instead of failing.
pub fn get_or<'a, 'p>(
    root: &'a Value,
    path: impl Into<PathSpec<'p>>,
    separator: &str,
    default: &'a Value,
) -> &'a Value {
    get(root, path, separator).unwrap_or(default)
}
