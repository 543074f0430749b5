//! SEO plugin — per-page SEO documents and the plugin configuration.
//!
//! Documents are returned as raw JSON; shaping them into typed metadata
//! models is the transport layer's concern.

use serde_json::Value;
use siteforge_core::error::{SiteforgeError, SiteforgeResult};
use siteforge_core::id::DocumentId;
use siteforge_core::models::document::{Document, JsonObject};
use siteforge_core::repository::DocumentStore;
use tracing::info;

use crate::config::RuntimeConfig;
use crate::error::PluginError;

/// Collection holding per-page SEO documents.
pub const COLLECTION: &str = "structure_seo";

/// Collection holding per-plugin configuration documents.
pub const PLUGINS_COLLECTION: &str = "plugins";

/// `short_name` of this plugin's configuration document.
pub const PLUGIN_SHORT_NAME: &str = "structure_seo";

const PAGE_KEY_FIELD: &str = "page_key";
const SHORT_NAME_FIELD: &str = "short_name";
const CONFIG_FIELD: &str = "config";

pub struct SeoService<D> {
    store: D,
    runtime: RuntimeConfig,
}

impl<D: DocumentStore> SeoService<D> {
    pub fn new(store: D, runtime: RuntimeConfig) -> Self {
        Self { store, runtime }
    }

    /// SEO document for a page key, if any.
    pub async fn page(&self, tenant: &str, page_key: &str) -> SiteforgeResult<Option<JsonObject>> {
        let document = self
            .store
            .find_by_field(tenant, COLLECTION, PAGE_KEY_FIELD, page_key)
            .await?;
        Ok(document.map(Document::into_json))
    }

    /// The raw plugin-configuration document. Local development only.
    pub async fn config_full(&self, tenant: &str) -> SiteforgeResult<JsonObject> {
        if !self.runtime.local_development {
            return Err(PluginError::LocalDevelopmentOnly.into());
        }

        let document = self
            .find_config(tenant)
            .await?
            .ok_or_else(|| SiteforgeError::NotFound {
                entity: "plugin configuration".into(),
                id: PLUGIN_SHORT_NAME.into(),
            })?;
        Ok(document.into_json())
    }

    /// Set the configuration document's `config` field to the payload,
    /// creating the document when absent. Local development only.
    pub async fn update_config(
        &self,
        tenant: &str,
        payload: &JsonObject,
    ) -> SiteforgeResult<JsonObject> {
        if !self.runtime.local_development {
            return Err(PluginError::LocalDevelopmentOnly.into());
        }

        let mut document = match self.find_config(tenant).await? {
            Some(document) => document,
            None => {
                let mut fields = JsonObject::new();
                fields.insert(
                    SHORT_NAME_FIELD.to_string(),
                    Value::String(PLUGIN_SHORT_NAME.to_string()),
                );
                Document::new(DocumentId::generate(), fields)
            }
        };
        document
            .fields
            .insert(CONFIG_FIELD.to_string(), Value::Object(payload.clone()));

        self.store
            .replace(tenant, PLUGINS_COLLECTION, &document)
            .await?;
        info!(tenant, "Updated SEO plugin configuration");

        Ok(document.into_json())
    }

    async fn find_config(&self, tenant: &str) -> SiteforgeResult<Option<Document>> {
        self.store
            .find_by_field(tenant, PLUGINS_COLLECTION, SHORT_NAME_FIELD, PLUGIN_SHORT_NAME)
            .await
    }
}
