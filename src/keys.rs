//! Key normalization: snake_case input keys → camelCase, applied once before
//! member resolution for types that opt in.
//!
//! Scope rule, preserved exactly: recursion descends into mapping values
//! only. Sequence elements are left alone even when they contain mappings.

use crate::value::{Value, ValueMap};

/// snake_case → camelCase. First segment keeps its case apart from a
/// lowercased first letter; later segments get their first letter upcased.
/// Underscore-free input comes back unchanged, so the rewrite is idempotent.
pub fn to_camel_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for segment in s.split('_').filter(|seg| !seg.is_empty()) {
        let mut chars = segment.chars();
        let first = match chars.next() {
            Some(c) => c,
            None => continue,
        };
        if out.is_empty() {
            out.extend(first.to_lowercase());
        } else {
            out.extend(first.to_uppercase());
        }
        out.push_str(chars.as_str());
    }
    out
}

/// Rewrite every underscore-bearing key of `data` to camelCase, recursing
/// into nested maps. Pure; the input map is not touched.
pub fn normalize_keys(data: &ValueMap) -> ValueMap {
    let mut out = ValueMap::with_capacity(data.len());
    for (key, value) in data {
        let key = if key.contains('_') { to_camel_case(key) } else { key.clone() };
        let value = match value {
            Value::Map(m) => Value::Map(normalize_keys(m)),
            other => other.clone(),
        };
        out.insert(key, value);
    }
    out
}
