//! Google reviews plugin — read side of the `google_reviews` collection.

use serde_json::Value;
use siteforge_core::error::SiteforgeResult;
use siteforge_core::models::document::JsonObject;
use siteforge_core::repository::DocumentStore;
use tracing::info;

/// Collection holding per-tenant review documents.
pub const COLLECTION: &str = "google_reviews";

const REVIEWS_FIELD: &str = "reviews";

pub struct ReviewsService<D> {
    store: D,
}

impl<D: DocumentStore> ReviewsService<D> {
    pub fn new(store: D) -> Self {
        Self { store }
    }

    /// All review documents, with each document's `reviews` array filtered
    /// down to published entries (status `true` and non-empty text).
    pub async fn list(&self, tenant: &str) -> SiteforgeResult<Vec<JsonObject>> {
        let documents = self.store.list(tenant, COLLECTION).await?;
        info!(tenant, count = documents.len(), "Loaded review documents");

        let mut result = Vec::with_capacity(documents.len());
        for document in documents {
            let mut object = document.into_json();
            if let Some(Value::Array(entries)) = object.get_mut(REVIEWS_FIELD) {
                entries.retain(is_published);
            }
            result.push(object);
        }
        Ok(result)
    }
}

fn is_published(entry: &Value) -> bool {
    let Value::Object(review) = entry else {
        return false;
    };
    let approved = matches!(review.get("status"), Some(Value::Bool(true)));
    let has_text = matches!(review.get("text"), Some(Value::String(text)) if !text.is_empty());
    approved && has_text
}
