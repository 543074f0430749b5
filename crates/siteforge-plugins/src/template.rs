//! Structure-template application — sanitize, store, locate, fan out.

use std::collections::BTreeSet;

use serde_json::Value;
use siteforge_core::error::{SiteforgeError, SiteforgeResult};
use siteforge_core::id::DocumentId;
use siteforge_core::models::document::{Document, ID_FIELD, JsonObject};
use siteforge_core::models::template::TemplateApplySummary;
use siteforge_core::repository::{ClientRegistry, DocumentStore, TemplateRegistry};
use tracing::info;

use crate::error::PluginError;
use crate::sanitize::sanitize_document;
use crate::websites;

/// Default client flag field selecting template subscribers.
pub const DEFAULT_TARGET_FIELD: &str = "structure_template";

/// Legacy flag field, consulted only when the default matches no client.
pub const LEGACY_TARGET_FIELD: &str = "template";

/// Applies a structure template across every subscribed client database.
///
/// Generic over the storage ports so the fan-out logic has no dependency
/// on the database crate.
pub struct TemplateService<D, T, C> {
    documents: D,
    templates: T,
    clients: C,
}

impl<D, T, C> TemplateService<D, T, C>
where
    D: DocumentStore,
    T: TemplateRegistry,
    C: ClientRegistry,
{
    pub fn new(documents: D, templates: T, clients: C) -> Self {
        Self {
            documents,
            templates,
            clients,
        }
    }

    /// Sanitize the example documents, persist them as the named template,
    /// and reconcile every subscribed client's working collection to
    /// exactly that document set.
    ///
    /// Clients are processed sequentially; a failure aborts the fan-out
    /// with an error naming the client, and clients already processed keep
    /// their applied changes. Re-applying the same input is safe: a second
    /// run converges to the same state and deletes nothing.
    pub async fn apply(
        &self,
        template_key: &str,
        documents: Vec<Value>,
        target_field: Option<&str>,
    ) -> SiteforgeResult<TemplateApplySummary> {
        // 1. Validate input.
        if template_key.is_empty() {
            return Err(PluginError::MissingTemplateKey.into());
        }
        if documents.is_empty() {
            return Err(PluginError::EmptyDocuments.into());
        }

        // 2. Resolve identities and sanitize. Null entries are discarded.
        let mut prepared = Vec::with_capacity(documents.len());
        for (index, raw) in documents.into_iter().enumerate() {
            match raw {
                Value::Null => continue,
                Value::Object(object) => prepared.push(prepare_template_document(index, &object)?),
                other => {
                    return Err(PluginError::Document {
                        index,
                        reason: format!("expected an object, got {}", kind(&other)),
                    }
                    .into());
                }
            }
        }
        if prepared.is_empty() {
            return Err(PluginError::NoUsableDocuments.into());
        }

        // 3. Persist the template definition for reuse.
        let stored: Vec<JsonObject> = prepared.iter().map(Document::to_json).collect();
        self.templates.upsert(template_key, &stored).await?;

        // 4. Locate subscribed clients. The legacy field is consulted only
        //    when the default field matches nothing; an explicit non-default
        //    field is final even when it matches no client.
        let requested = target_field
            .map(str::trim)
            .filter(|field| !field.is_empty())
            .unwrap_or(DEFAULT_TARGET_FIELD);
        let mut effective = requested;
        if requested == DEFAULT_TARGET_FIELD {
            let count = self
                .clients
                .count_matching(DEFAULT_TARGET_FIELD, template_key)
                .await?;
            if count == 0 {
                effective = LEGACY_TARGET_FIELD;
            }
        }

        let names = self.clients.names_matching(effective, template_key).await?;
        let clients: BTreeSet<String> = names
            .into_iter()
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .collect();

        // 5. Reconcile each client database: upsert every template
        //    document, then delete everything outside the template's
        //    identity set. The delete pass never runs before the upserts.
        let keep: Vec<DocumentId> = prepared.iter().map(|document| document.id).collect();
        let mut updated = 0u64;
        let mut deleted = 0u64;
        for client in &clients {
            for document in &prepared {
                self.documents
                    .replace(client, websites::COLLECTION, document)
                    .await
                    .map_err(|err| SiteforgeError::fan_out(client, err))?;
                updated += 1;
            }
            deleted += self
                .documents
                .delete_all_except(client, websites::COLLECTION, &keep)
                .await
                .map_err(|err| SiteforgeError::fan_out(client, err))?;
        }

        let client_names: Vec<String> = clients.into_iter().collect();
        let message = format!(
            "Template {template_key} applied via field {effective} to {} client(s); \
             updated {updated} document(s), deleted {deleted} document(s)",
            client_names.len(),
        );
        info!(
            template_key,
            target_field = effective,
            clients = client_names.len(),
            updated,
            deleted,
            "Structure template applied"
        );

        Ok(TemplateApplySummary {
            template_key: template_key.to_string(),
            target_field: effective.to_string(),
            client_names,
            updated_documents: updated,
            deleted_documents: deleted,
            message,
        })
    }
}

/// Resolve the document identity and reduce the document to its skeleton.
///
/// An absent or blank `_id` generates a fresh identity; a non-empty string
/// must parse as a document id; any other type is rejected. Callers keep
/// identities stable across re-applications by passing explicit ids.
fn prepare_template_document(index: usize, object: &JsonObject) -> SiteforgeResult<Document> {
    let id = match object.get(ID_FIELD) {
        None => DocumentId::generate(),
        Some(Value::String(raw)) => {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                DocumentId::generate()
            } else {
                DocumentId::parse(trimmed).map_err(|err| PluginError::Document {
                    index,
                    reason: format!("invalid _id value {trimmed:?}: {err}"),
                })?
            }
        }
        Some(other) => {
            return Err(PluginError::Document {
                index,
                reason: format!("_id must be a hex string, got {}", kind(other)),
            }
            .into());
        }
    };

    Ok(Document::new(id, sanitize_document(object)))
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
