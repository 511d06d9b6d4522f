//! Behavioural guarantees of the traversal engine.
//!
//! Each test pins one property over a handful of representative documents
//! instead of a single example.

use nestdict::{
    find_all, get, get_or, insert, keypath, resolve, set, Key, KeyPath, NestError, Value,
};
use serde_json::json;

fn doc(v: serde_json::Value) -> Value {
    Value::from(v)
}

fn fixtures() -> Vec<Value> {
    vec![
        doc(json!({"a": {"b": {"c": 1}}, "list": [10, {"x": [true, null]}]})),
        doc(json!([{"key0": {"key1": "value1", "key12": {"key3": "value"}}}])),
        doc(json!({"users": [{"name": "alice", "tags": ["a", "b"]}, {"name": "bob"}]})),
    ]
}

/// Every path that exists in `v`, pre-order.
fn all_paths(v: &Value) -> Vec<KeyPath> {
    fn walk(v: &Value, trail: &mut KeyPath, out: &mut Vec<KeyPath>) {
        out.push(trail.clone());
        if let Ok(container) = v.as_container() {
            for (k, child) in container.entries() {
                trail.push(k);
                walk(child, trail, out);
                trail.pop();
            }
        }
    }
    let mut out = Vec::new();
    walk(v, &mut KeyPath::root(), &mut out);
    out
}

/// Step-by-step subscripting without the engine.
fn manual(v: &Value, path: &KeyPath) -> Option<Value> {
    let mut current = v.clone();
    for key in path {
        current = match (&current, key) {
            (Value::Map(m), k) => m.get(k)?.clone(),
            (Value::Seq(s), Key::Index(i)) => {
                let len = s.len() as i64;
                let pos = if *i < 0 { len + i } else { *i };
                if pos < 0 || pos >= len {
                    return None;
                }
                s[pos as usize].clone()
            }
            _ => return None,
        };
    }
    Some(current)
}

// ============================================================================
// resolve
// ============================================================================

#[test]
fn resolve_matches_manual_subscripting() {
    for root in fixtures() {
        for path in all_paths(&root) {
            let expected = manual(&root, &path).expect("path taken from the document");
            assert_eq!(resolve(&root, &path).unwrap(), &expected, "path {path}");
        }
    }
}

#[test]
fn resolve_negative_indices_match_manual_subscripting() {
    let root = doc(json!({"list": [1, [2, 3], {"k": 4}]}));
    for path in [
        keypath!("list", -1, "k"),
        keypath!("list", -2, -1),
        keypath!("list", -3),
    ] {
        assert_eq!(
            resolve(&root, &path).unwrap(),
            &manual(&root, &path).unwrap()
        );
    }
}

#[test]
fn invalid_paths_fail_and_leave_root_unmodified() {
    let cases = [
        (keypath!("a", "missing"), "key"),
        (keypath!("a", "b", "c", "d"), "parent"),
        (keypath!("list", 5), "index"),
        (keypath!("list", 0, "x"), "parent"),
        (keypath!("list", "first"), "key"),
    ];
    for root in fixtures().into_iter().take(1) {
        let before = root.clone();
        for (path, kind) in &cases {
            let err = resolve(&root, path).unwrap_err();
            let ok = match (kind, &err) {
                (&"key", NestError::KeyNotFound { .. }) => true,
                (&"index", NestError::IndexOutOfRange { .. }) => true,
                (&"parent", NestError::InvalidParent { .. }) => true,
                _ => false,
            };
            assert!(ok, "{path}: expected {kind} error, got {err:?}");
        }
        assert_eq!(root, before);
    }
}

// ============================================================================
// set
// ============================================================================

#[test]
fn set_then_resolve_round_trips() {
    for pristine in fixtures() {
        for path in all_paths(&pristine).into_iter().filter(|p| !p.is_empty()) {
            let mut root = pristine.clone();
            let marker = Value::from(format!("set:{path}"));
            set(&mut root, &path, marker.clone()).unwrap();
            assert_eq!(resolve(&root, &path).unwrap(), &marker);
        }
    }
}

#[test]
fn set_new_mapping_key_round_trips() {
    let mut root = doc(json!({"a": {}}));
    set(&mut root, &keypath!("a", "fresh"), Value::from(1)).unwrap();
    assert_eq!(resolve(&root, &keypath!("a", "fresh")).unwrap(), &Value::from(1));
}

// ============================================================================
// insert
// ============================================================================

#[test]
fn insert_is_idempotent() {
    let paths = [
        keypath!("a", "b", "c"),
        keypath!("new", 0, "deep"),
        keypath!("list", 2, "k"),
        keypath!("list", 1, "x", 0),
    ];
    for path in paths {
        let mut once = fixtures().remove(0);
        insert(&mut once, &path, Value::from("v")).unwrap();

        let mut twice = fixtures().remove(0);
        insert(&mut twice, &path, Value::from("v")).unwrap();
        insert(&mut twice, &path, Value::from("v")).unwrap();

        assert_eq!(once, twice, "path {path}");
    }
}

#[test]
fn insert_autocreates_mapping_levels() {
    let mut root = Value::empty_map();
    insert(&mut root, &keypath!("a", "b", "c"), Value::from("x")).unwrap();
    assert_eq!(root, doc(json!({"a": {"b": {"c": "x"}}})));
}

#[test]
fn insert_extends_existing_document() {
    let mut root = doc(json!({"path": {"to": {"key": "val"}}}));
    insert(
        &mut root,
        &keypath!("newpath", "to", "key"),
        Value::from("newval"),
    )
    .unwrap();
    assert_eq!(
        root,
        doc(json!({
            "path": {"to": {"key": "val"}},
            "newpath": {"to": {"key": "newval"}}
        }))
    );
}

#[test]
fn insert_never_overwrites_scalars_above_destination() {
    let pristine = doc(json!({"a": 1, "b": {"c": "s"}, "l": [0, null]}));
    for path in [
        keypath!("a", "x"),
        keypath!("b", "c", "d", "e"),
        keypath!("l", 0, "k"),
        keypath!("l", 1, "k"),
    ] {
        let mut root = pristine.clone();
        let err = insert(&mut root, &path, Value::from("v")).unwrap_err();
        assert!(
            matches!(err, NestError::InvalidParent { .. }),
            "{path}: {err:?}"
        );
        assert_eq!(root, pristine, "{path} must not modify the document");
    }
}

#[test]
fn insert_overwrites_destination_only() {
    let mut root = doc(json!({"a": {"b": 1, "c": 2}}));
    insert(&mut root, &keypath!("a", "b"), Value::from(5)).unwrap();
    assert_eq!(root, doc(json!({"a": {"b": 5, "c": 2}})));
}

// ============================================================================
// find_all
// ============================================================================

#[test]
fn find_all_reports_every_mapping_occurrence_in_order() {
    let root = doc(json!({"k": 1, "sub": {"k": 2}, "list": [{"k": 3}]}));
    let paths = find_all(&root, &Key::from("k"));
    assert_eq!(
        paths,
        vec![keypath!("k"), keypath!("sub", "k"), keypath!("list", 0, "k")]
    );
    let values: Vec<_> = paths
        .iter()
        .map(|p| resolve(&root, p).unwrap().clone())
        .collect();
    assert_eq!(values, vec![Value::from(1), Value::from(2), Value::from(3)]);
}

#[test]
fn find_all_results_are_fresh_each_call() {
    let root = doc(json!({"k": {"k": {"k": 0}}}));
    let mut first = find_all(&root, &Key::from("k"));
    let second = find_all(&root, &Key::from("k"));
    assert_eq!(first, second);
    first[0].push("mutated");
    assert_eq!(find_all(&root, &Key::from("k")), second);
    assert_eq!(
        second,
        vec![keypath!("k"), keypath!("k", "k"), keypath!("k", "k", "k")]
    );
}

// ============================================================================
// get
// ============================================================================

#[test]
fn string_path_equals_typed_path() {
    let root = doc(json!({"a": {"b": {"c": "deep"}}}));
    assert_eq!(
        get(&root, "a.b.c", ".").unwrap(),
        resolve(&root, &keypath!("a", "b", "c")).unwrap()
    );
}

#[test]
fn get_or_never_fails() {
    let root = fixtures().remove(0);
    let fallback = Value::Null;
    for path in ["missing", "a.b.c.d", "list.99", "list.x", "a..b", ""] {
        assert_eq!(get_or(&root, path, ".", &fallback), &fallback, "path {path:?}");
    }
}
