//! Dynamic document model.
//!
//! Documents are open-shaped JSON trees; the platform never constrains
//! their field layout beyond the identity key.

use serde_json::Value;

use crate::id::DocumentId;

/// JSON object used for dynamic document trees.
pub type JsonObject = serde_json::Map<String, Value>;

/// Key carrying the document identity in the JSON boundary form.
pub const ID_FIELD: &str = "_id";

/// A tenant-owned record in a named collection.
///
/// The identity is resolved once at the boundary; `fields` never contains
/// the `_id` key, so internal logic never branches on its representation.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: DocumentId,
    pub fields: JsonObject,
}

impl Document {
    pub fn new(id: DocumentId, mut fields: JsonObject) -> Self {
        fields.remove(ID_FIELD);
        Self { id, fields }
    }

    /// JSON form with the identity rendered under `_id`.
    pub fn into_json(self) -> JsonObject {
        let mut object = self.fields;
        object.insert(ID_FIELD.to_string(), Value::String(self.id.to_string()));
        object
    }

    pub fn to_json(&self) -> JsonObject {
        self.clone().into_json()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn new_strips_identity_key_from_fields() {
        let id = DocumentId::generate();
        let mut fields = JsonObject::new();
        fields.insert("_id".into(), json!("stale"));
        fields.insert("slug".into(), json!("homepage"));

        let doc = Document::new(id, fields);
        assert!(!doc.fields.contains_key(ID_FIELD));
        assert_eq!(doc.fields["slug"], json!("homepage"));
    }

    #[test]
    fn json_form_carries_identity() {
        let id = DocumentId::parse("652f1a2b3c4d5e6f70819111").unwrap();
        let doc = Document::new(id, JsonObject::new());
        let object = doc.into_json();
        assert_eq!(object[ID_FIELD], json!("652f1a2b3c4d5e6f70819111"));
    }
}
