//! Structure template models.
//!
//! A structure template is a named canonical document set stored in the
//! shared registry and propagated to every subscribed client database.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::document::JsonObject;

/// A stored template: the sanitized document set under a unique key.
///
/// Overwritten (not versioned) on every application of the same key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructureTemplate {
    pub template_key: String,
    /// Sanitized documents in application order, each carrying its `_id`.
    pub documents: Vec<JsonObject>,
    pub updated_at: DateTime<Utc>,
}

/// Outcome of applying a structure template across subscribed clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateApplySummary {
    pub template_key: String,
    /// Flag field that actually selected the clients (the requested field,
    /// or the legacy fallback when the default matched nothing).
    pub target_field: String,
    /// Sorted, deduplicated names of the clients that were reconciled.
    pub client_names: Vec<String>,
    pub updated_documents: u64,
    pub deleted_documents: u64,
    pub message: String,
}
