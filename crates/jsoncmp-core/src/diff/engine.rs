//! Structural diff computation.
//!
//! The core entry point is [`diff_values`]. Objects and arrays are both
//! treated as keyed containers: object members by name, array elements by
//! decimal index. Two containers are always recursed into, whichever
//! combination of object/array they are; anything else is compared with
//! strict `==` on `serde_json::Value`.

use crate::diff::model::Difference;
use serde_json::Value;
use std::borrow::Cow;

/// Diff two JSON values.
///
/// Returns every divergence in deterministic order: for each nesting level,
/// keys of `a` in their original order (recursing depth-first into nested
/// containers), then keys present only in `b` in their original order.
///
/// When `a` and `b` are not both containers the result is either empty or a
/// single root-level `value_mismatch` with an empty path.
pub fn diff_values(a: &Value, b: &Value) -> Vec<Difference> {
    let mut out = Vec::new();
    if is_container(a) && is_container(b) {
        diff_containers(a, b, "", &mut out);
    } else if a != b {
        out.push(Difference::value_mismatch("", a.clone(), b.clone()));
    }
    out
}

fn diff_containers(a: &Value, b: &Value, path: &str, out: &mut Vec<Difference>) {
    for (key, v1) in entries(a) {
        match lookup(b, &key) {
            None => out.push(Difference::missing_in_second(
                extend(path, &key),
                v1.clone(),
            )),
            Some(v2) if is_container(v1) && is_container(v2) => {
                diff_containers(v1, v2, &extend(path, &key), out);
            }
            Some(v2) if v1 != v2 => out.push(Difference::value_mismatch(
                extend(path, &key),
                v1.clone(),
                v2.clone(),
            )),
            Some(_) => {}
        }
    }

    for (key, v2) in entries(b) {
        if lookup(a, &key).is_none() {
            out.push(Difference::missing_in_first(extend(path, &key), v2.clone()));
        }
    }
}

fn is_container(v: &Value) -> bool {
    matches!(v, Value::Object(_) | Value::Array(_))
}

/// Keys and values of a container in original order; empty for scalars.
fn entries(v: &Value) -> Vec<(Cow<'_, str>, &Value)> {
    match v {
        Value::Object(map) => map
            .iter()
            .map(|(k, v)| (Cow::Borrowed(k.as_str()), v))
            .collect(),
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(i, v)| (Cow::Owned(i.to_string()), v))
            .collect(),
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => Vec::new(),
    }
}

fn lookup<'a>(container: &'a Value, key: &str) -> Option<&'a Value> {
    match container {
        Value::Object(map) => map.get(key),
        Value::Array(items) => array_index(key).and_then(|i| items.get(i)),
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => None,
    }
}

/// Index named by `key`, only when `key` is its canonical decimal form
/// (`"1"` matches, `"01"` and `"+1"` do not).
fn array_index(key: &str) -> Option<usize> {
    let idx: usize = key.parse().ok()?;
    (idx.to_string() == key).then_some(idx)
}

fn extend(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", path, key)
    }
}
