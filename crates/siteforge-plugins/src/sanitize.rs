//! Template sanitizer.
//!
//! Reduces an example document to its structural skeleton: every leaf is
//! reset to the zero value of its type, objects keep the union of observed
//! keys, and arrays collapse to at most one merged representative element.
//! Sanitization is total over any JSON tree and raises no errors.

use serde_json::Value;
use siteforge_core::models::document::JsonObject;

/// Sanitize a whole document into its template skeleton.
pub fn sanitize_document(doc: &JsonObject) -> JsonObject {
    let mut result = JsonObject::new();
    for (key, raw) in doc {
        let existing = result.remove(key);
        if let Some(value) = merge_skeletons(existing, Some(build_skeleton(raw))) {
            result.insert(key.clone(), value);
        }
    }
    result
}

/// Zero-value skeleton of a single JSON value.
///
/// Strings and nulls become `""`, booleans `false`, numbers `0`. Objects
/// recurse. Arrays fold every sanitized element into one representative
/// via [`merge_skeletons`]; an empty source array stays empty.
fn build_skeleton(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut result = JsonObject::new();
            for (key, raw) in map {
                let existing = result.remove(key);
                if let Some(merged) = merge_skeletons(existing, Some(build_skeleton(raw))) {
                    result.insert(key.clone(), merged);
                }
            }
            Value::Object(result)
        }
        Value::Array(items) => {
            let mut element: Option<Value> = None;
            for item in items {
                element = merge_skeletons(element, Some(build_skeleton(item)));
            }
            match element {
                Some(representative) => Value::Array(vec![representative]),
                None => Value::Array(Vec::new()),
            }
        }
        Value::String(_) | Value::Null => Value::String(String::new()),
        Value::Bool(_) => Value::Bool(false),
        Value::Number(_) => Value::Number(0.into()),
    }
}

/// Combine two sanitized skeletons.
///
/// Object against object recurses key-by-key; array against array folds
/// the first elements of each side. Anything else keeps the existing
/// value: the first-seen scalar shape is authoritative and is never
/// widened by a later, structurally different value.
fn merge_skeletons(base: Option<Value>, incoming: Option<Value>) -> Option<Value> {
    let base = match base {
        Some(base) => base,
        None => return incoming,
    };
    let incoming = match incoming {
        Some(incoming) => incoming,
        None => return Some(base),
    };

    match base {
        Value::Object(mut map) => {
            for (key, value) in coerce_object(incoming) {
                let existing = map.remove(&key);
                if let Some(merged) = merge_skeletons(existing, Some(value)) {
                    map.insert(key, merged);
                }
            }
            Some(Value::Object(map))
        }
        Value::Array(items) => {
            let incoming_items = coerce_array(incoming);
            if items.is_empty() && incoming_items.is_empty() {
                return Some(Value::Array(Vec::new()));
            }
            let base_element = items.into_iter().next();
            let incoming_element = incoming_items.into_iter().next();
            match merge_skeletons(base_element, incoming_element) {
                Some(merged) => Some(Value::Array(vec![merged])),
                None => Some(Value::Array(Vec::new())),
            }
        }
        scalar => Some(scalar),
    }
}

/// View a skeleton as an object: arrays contribute their first element
/// when it is an object, everything else contributes nothing.
fn coerce_object(value: Value) -> JsonObject {
    match value {
        Value::Object(map) => map,
        Value::Array(items) => match items.into_iter().next() {
            Some(Value::Object(map)) => map,
            _ => JsonObject::new(),
        },
        _ => JsonObject::new(),
    }
}

/// View a skeleton as an array: objects and scalars become singleton
/// arrays, null contributes nothing.
fn coerce_array(value: Value) -> Vec<Value> {
    match value {
        Value::Array(items) => items,
        Value::Object(map) => vec![Value::Object(map)],
        Value::Null => Vec::new(),
        other => vec![other],
    }
}
