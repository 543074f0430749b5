//! Partial-payload merge for document replacement.
//!
//! This is a different contract from the skeleton merge inside the
//! sanitizer: here the incoming value wins. Objects merge recursively;
//! every other incoming value (arrays included) replaces the existing one
//! outright. The identity key is never merged, so the stored document
//! keeps its identity no matter what the payload carries.

use serde_json::Value;
use siteforge_core::models::document::{ID_FIELD, JsonObject};

/// Deep-merge `updates` into `base`.
pub fn merge_payload(base: &mut JsonObject, updates: &JsonObject) {
    for (key, value) in updates {
        if key == ID_FIELD {
            continue;
        }

        if let Value::Object(update_map) = value {
            let mut nested = match base.remove(key) {
                Some(Value::Object(map)) => map,
                _ => JsonObject::new(),
            };
            merge_payload(&mut nested, update_map);
            base.insert(key.clone(), Value::Object(nested));
            continue;
        }

        base.insert(key.clone(), value.clone());
    }
}
