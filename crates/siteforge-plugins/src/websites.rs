//! Websites plugin — CRUD over the `structure_websites` working
//! collection, the collection the template fan-out reconciles.

use siteforge_core::error::SiteforgeResult;
use siteforge_core::id::DocumentId;
use siteforge_core::models::document::{Document, JsonObject};
use siteforge_core::repository::DocumentStore;
use tracing::info;

use crate::config::RuntimeConfig;
use crate::error::PluginError;
use crate::merge::merge_payload;

/// Working collection holding a tenant's website structure documents.
pub const COLLECTION: &str = "structure_websites";

pub struct WebsitesService<D> {
    store: D,
    runtime: RuntimeConfig,
}

impl<D: DocumentStore> WebsitesService<D> {
    pub fn new(store: D, runtime: RuntimeConfig) -> Self {
        Self { store, runtime }
    }

    /// All website documents of the tenant, as JSON objects.
    pub async fn list(&self, tenant: &str) -> SiteforgeResult<Vec<JsonObject>> {
        let documents = self.store.list(tenant, COLLECTION).await?;
        info!(tenant, count = documents.len(), "Loaded website documents");
        Ok(documents.into_iter().map(Document::into_json).collect())
    }

    /// Replace a website document with the payload merged over the stored
    /// one, creating the document when absent. The stored identity always
    /// survives the merge. Local development only.
    pub async fn replace(
        &self,
        tenant: &str,
        id: &str,
        payload: &JsonObject,
    ) -> SiteforgeResult<JsonObject> {
        if !self.runtime.local_development {
            return Err(PluginError::LocalDevelopmentOnly.into());
        }
        if id.is_empty() {
            return Err(PluginError::MissingId.into());
        }
        if payload.is_empty() {
            return Err(PluginError::EmptyPayload.into());
        }

        let id = DocumentId::parse(id).map_err(|err| PluginError::InvalidId(err.to_string()))?;

        let mut fields = self
            .store
            .get(tenant, COLLECTION, &id)
            .await?
            .map(|document| document.fields)
            .unwrap_or_default();
        merge_payload(&mut fields, payload);

        let document = Document::new(id, fields);
        self.store.replace(tenant, COLLECTION, &document).await?;
        info!(tenant, id = %document.id, "Replaced website document");

        Ok(document.into_json())
    }
}
