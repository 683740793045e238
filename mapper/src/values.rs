//! Turning claim values into attribute values

use serde_json::Value;
use std::collections::HashMap;
use std::hash::Hash;

/// Normalize a claim value to a list and prefix every non-null entry.
///
/// A list is taken as it is, anything else is a single entry. Order is preserved.
pub fn to_prefixed_list(value: Option<&Value>, prefix: &str) -> Vec<String> {
    let items: &[Value] = match value {
        Some(Value::Array(items)) => items.as_slice(),
        Some(value) => std::slice::from_ref(value),
        None => &[],
    };

    items
        .iter()
        .filter(|item| !item.is_null())
        .map(|item| format!("{prefix}{}", stringify(item)))
        .collect()
}

/// The text of a claim value. Strings are taken verbatim, everything else as compact JSON.
pub fn stringify(value: &Value) -> String {
    match value {
        Value::String(value) => value.clone(),
        value => value.to_string(),
    }
}

/// Compare two collections, ignoring order but not multiplicity.
pub fn collection_equals<T: Eq + Hash>(a: &[T], b: &[T]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut counts: HashMap<&T, isize> = HashMap::new();
    for item in a {
        *counts.entry(item).or_default() += 1;
    }
    for item in b {
        *counts.entry(item).or_default() -= 1;
    }

    counts.values().all(|count| *count == 0)
}
