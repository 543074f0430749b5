//! SurrealDB implementation of [`DocumentStore`].
//!
//! Each client's documents live in that client's own database; the store
//! selects the database per call (the driver keeps one shared session, so
//! operations are sequential per request). Records are keyed by the
//! document identity, which doubles as the record id, and carry the field
//! map under `body`.

use std::collections::HashSet;

use serde_json::{Value, json};
use siteforge_core::error::SiteforgeResult;
use siteforge_core::id::DocumentId;
use siteforge_core::models::document::Document;
use siteforge_core::repository::DocumentStore;
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;

use crate::error::DbError;
use crate::repository::ensure_identifier;

/// DB-side row struct for document reads.
#[derive(Debug, SurrealValue)]
struct DocumentRow {
    identity: String,
    body: serde_json::Value,
}

impl DocumentRow {
    fn into_document(self) -> Result<Document, DbError> {
        let id = DocumentId::parse(&self.identity)
            .map_err(|e| DbError::Decode(format!("invalid document identity: {e}")))?;
        match self.body {
            Value::Object(fields) => Ok(Document::new(id, fields)),
            _ => Err(DbError::Decode(format!(
                "document {id} body is not an object"
            ))),
        }
    }
}

/// Row struct for identity-only projections.
#[derive(Debug, SurrealValue)]
struct IdentityRow {
    identity: String,
}

/// SurrealDB implementation of the per-client document store.
#[derive(Clone)]
pub struct SurrealDocumentStore<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealDocumentStore<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }

    async fn select_database(&self, tenant: &str) -> Result<(), DbError> {
        self.db.use_db(tenant).await.map(|_| ()).map_err(DbError::from)
    }
}

impl<C: Connection> DocumentStore for SurrealDocumentStore<C> {
    async fn list(&self, tenant: &str, collection: &str) -> SiteforgeResult<Vec<Document>> {
        self.select_database(tenant).await?;

        let mut result = self
            .db
            .query("SELECT identity, body FROM type::table($tb) ORDER BY identity ASC")
            .bind(("tb", collection.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<DocumentRow> = result.take(0).map_err(DbError::from)?;
        let documents = rows
            .into_iter()
            .map(DocumentRow::into_document)
            .collect::<Result<Vec<_>, DbError>>()?;

        Ok(documents)
    }

    async fn get(
        &self,
        tenant: &str,
        collection: &str,
        id: &DocumentId,
    ) -> SiteforgeResult<Option<Document>> {
        self.select_database(tenant).await?;

        let mut result = self
            .db
            .query("SELECT identity, body FROM type::record($tb, $id)")
            .bind(("tb", collection.to_string()))
            .bind(("id", id.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<DocumentRow> = result.take(0).map_err(DbError::from)?;
        match rows.into_iter().next() {
            Some(row) => Ok(Some(row.into_document()?)),
            None => Ok(None),
        }
    }

    async fn find_by_field(
        &self,
        tenant: &str,
        collection: &str,
        field: &str,
        value: &str,
    ) -> SiteforgeResult<Option<Document>> {
        ensure_identifier(field)?;
        self.select_database(tenant).await?;

        // Field names cannot be bound, so the validated identifier is
        // embedded directly (identifier characters only — safe).
        let query = format!(
            "SELECT identity, body FROM type::table($tb) \
             WHERE body.{field} = $value LIMIT 1"
        );
        let mut result = self
            .db
            .query(query)
            .bind(("tb", collection.to_string()))
            .bind(("value", value.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<DocumentRow> = result.take(0).map_err(DbError::from)?;
        match rows.into_iter().next() {
            Some(row) => Ok(Some(row.into_document()?)),
            None => Ok(None),
        }
    }

    async fn replace(
        &self,
        tenant: &str,
        collection: &str,
        document: &Document,
    ) -> SiteforgeResult<()> {
        self.select_database(tenant).await?;

        let content = json!({
            "identity": document.id.to_string(),
            "body": Value::Object(document.fields.clone()),
        });

        self.db
            .query("UPSERT type::record($tb, $id) CONTENT $content")
            .bind(("tb", collection.to_string()))
            .bind(("id", document.id.to_string()))
            .bind(("content", content))
            .await
            .map_err(DbError::from)?
            .check()
            .map_err(DbError::from)?;

        Ok(())
    }

    async fn delete_all_except(
        &self,
        tenant: &str,
        collection: &str,
        keep: &[DocumentId],
    ) -> SiteforgeResult<u64> {
        self.select_database(tenant).await?;

        let mut result = self
            .db
            .query("SELECT identity FROM type::table($tb)")
            .bind(("tb", collection.to_string()))
            .await
            .map_err(DbError::from)?;
        let rows: Vec<IdentityRow> = result.take(0).map_err(DbError::from)?;

        let keep: HashSet<String> = keep.iter().map(DocumentId::to_string).collect();

        let mut deleted = 0u64;
        for row in rows {
            if keep.contains(&row.identity) {
                continue;
            }
            self.db
                .query("DELETE type::record($tb, $id)")
                .bind(("tb", collection.to_string()))
                .bind(("id", row.identity))
                .await
                .map_err(DbError::from)?
                .check()
                .map_err(DbError::from)?;
            deleted += 1;
        }

        Ok(deleted)
    }
}
