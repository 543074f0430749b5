//! Storage port traits implemented by the database adapter.
//!
//! All operations are async. Document storage is tenant-scoped: every
//! method takes the tenant database name resolved by the caller, which is
//! how data isolation between client databases is enforced. The template
//! and client registries live in the shared core database.

use crate::error::SiteforgeResult;
use crate::id::DocumentId;
use crate::models::document::{Document, JsonObject};
use crate::models::template::StructureTemplate;

/// Per-tenant document storage, one collection per logical document type.
pub trait DocumentStore: Send + Sync {
    /// All documents of a collection, ordered by identity.
    fn list(
        &self,
        tenant: &str,
        collection: &str,
    ) -> impl Future<Output = SiteforgeResult<Vec<Document>>> + Send;

    fn get(
        &self,
        tenant: &str,
        collection: &str,
        id: &DocumentId,
    ) -> impl Future<Output = SiteforgeResult<Option<Document>>> + Send;

    /// First document whose top-level `field` equals `value`.
    fn find_by_field(
        &self,
        tenant: &str,
        collection: &str,
        field: &str,
        value: &str,
    ) -> impl Future<Output = SiteforgeResult<Option<Document>>> + Send;

    /// Upsert by identity: create if absent, fully replace if present.
    /// Fields missing from `document` do not survive.
    fn replace(
        &self,
        tenant: &str,
        collection: &str,
        document: &Document,
    ) -> impl Future<Output = SiteforgeResult<()>> + Send;

    /// Delete every document whose identity is not in `keep`; returns the
    /// number of deleted documents.
    fn delete_all_except(
        &self,
        tenant: &str,
        collection: &str,
        keep: &[DocumentId],
    ) -> impl Future<Output = SiteforgeResult<u64>> + Send;
}

/// Shared registry of structure templates, keyed by template key.
pub trait TemplateRegistry: Send + Sync {
    /// Write or overwrite the template record for `template_key`, storing
    /// the full document list and a fresh `updated_at`.
    fn upsert(
        &self,
        template_key: &str,
        documents: &[JsonObject],
    ) -> impl Future<Output = SiteforgeResult<()>> + Send;

    fn get(
        &self,
        template_key: &str,
    ) -> impl Future<Output = SiteforgeResult<Option<StructureTemplate>>> + Send;
}

/// Shared registry of client registrations and their template flag fields.
pub trait ClientRegistry: Send + Sync {
    /// Number of clients whose `field` equals `value`.
    fn count_matching(
        &self,
        field: &str,
        value: &str,
    ) -> impl Future<Output = SiteforgeResult<u64>> + Send;

    /// Names of the clients whose `field` equals `value`, in registry
    /// order. Callers normalize (trim, dedup, sort) the result.
    fn names_matching(
        &self,
        field: &str,
        value: &str,
    ) -> impl Future<Output = SiteforgeResult<Vec<String>>> + Send;
}
