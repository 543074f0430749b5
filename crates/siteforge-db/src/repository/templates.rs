//! SurrealDB implementation of [`TemplateRegistry`].

use chrono::{DateTime, Utc};
use serde_json::Value;
use siteforge_core::error::SiteforgeResult;
use siteforge_core::models::document::JsonObject;
use siteforge_core::models::template::StructureTemplate;
use siteforge_core::repository::TemplateRegistry;
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;

use crate::error::DbError;

/// DB-side row struct for template reads.
#[derive(Debug, SurrealValue)]
struct TemplateRow {
    template_key: String,
    documents: serde_json::Value,
    updated_at: DateTime<Utc>,
}

impl TemplateRow {
    fn into_template(self) -> Result<StructureTemplate, DbError> {
        let documents = match self.documents {
            Value::Array(items) => items
                .into_iter()
                .map(|item| match item {
                    Value::Object(map) => Ok(map),
                    _ => Err(DbError::Decode(
                        "stored template documents must be objects".into(),
                    )),
                })
                .collect::<Result<Vec<JsonObject>, DbError>>()?,
            _ => {
                return Err(DbError::Decode(
                    "stored template documents must be an array".into(),
                ));
            }
        };

        Ok(StructureTemplate {
            template_key: self.template_key,
            documents,
            updated_at: self.updated_at,
        })
    }
}

/// SurrealDB implementation of the template registry, bound to the shared
/// core database.
#[derive(Clone)]
pub struct SurrealTemplateRegistry<C: Connection> {
    db: Surreal<C>,
    database: String,
}

impl<C: Connection> SurrealTemplateRegistry<C> {
    pub fn new(db: Surreal<C>, database: impl Into<String>) -> Self {
        Self {
            db,
            database: database.into(),
        }
    }

    async fn select_database(&self) -> Result<(), DbError> {
        self.db
            .use_db(self.database.clone())
            .await
            .map(|_| ())
            .map_err(DbError::from)
    }
}

impl<C: Connection> TemplateRegistry for SurrealTemplateRegistry<C> {
    async fn upsert(&self, template_key: &str, documents: &[JsonObject]) -> SiteforgeResult<()> {
        self.select_database().await?;

        let documents = Value::Array(documents.iter().cloned().map(Value::Object).collect());

        // The record id doubles as the unique template key, so re-applying
        // a key overwrites the single existing record.
        self.db
            .query(
                "UPSERT type::record('structure_template', $key) SET \
                 template_key = $key, \
                 documents = $documents, \
                 updated_at = time::now()",
            )
            .bind(("key", template_key.to_string()))
            .bind(("documents", documents))
            .await
            .map_err(DbError::from)?
            .check()
            .map_err(DbError::from)?;

        Ok(())
    }

    async fn get(&self, template_key: &str) -> SiteforgeResult<Option<StructureTemplate>> {
        self.select_database().await?;

        let mut result = self
            .db
            .query(
                "SELECT template_key, documents, updated_at \
                 FROM type::record('structure_template', $key)",
            )
            .bind(("key", template_key.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<TemplateRow> = result.take(0).map_err(DbError::from)?;
        match rows.into_iter().next() {
            Some(row) => Ok(Some(row.into_template()?)),
            None => Ok(None),
        }
    }
}
