//! SurrealDB implementation of [`ClientRegistry`].

use siteforge_core::error::SiteforgeResult;
use siteforge_core::models::client::ClientRegistration;
use siteforge_core::repository::ClientRegistry;
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;

use crate::error::DbError;
use crate::repository::ensure_identifier;

/// Row struct for count queries.
#[derive(Debug, SurrealValue)]
struct CountRow {
    total: u64,
}

/// Row struct for client name projections. Registrations without a name
/// are tolerated and skipped.
#[derive(Debug, SurrealValue)]
struct ClientNameRow {
    client_name: Option<String>,
}

/// SurrealDB implementation of the client registry, bound to the shared
/// core database.
#[derive(Clone)]
pub struct SurrealClientRegistry<C: Connection> {
    db: Surreal<C>,
    database: String,
}

impl<C: Connection> SurrealClientRegistry<C> {
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

    /// Insert a client registration. Used by provisioning and tests; the
    /// template locator itself only reads.
    pub async fn register(&self, registration: &ClientRegistration) -> SiteforgeResult<()> {
        self.select_database().await?;

        let content =
            serde_json::to_value(registration).map_err(|e| DbError::Decode(e.to_string()))?;

        self.db
            .query("CREATE client CONTENT $content")
            .bind(("content", content))
            .await
            .map_err(DbError::from)?
            .check()
            .map_err(DbError::from)?;

        Ok(())
    }
}

impl<C: Connection> ClientRegistry for SurrealClientRegistry<C> {
    async fn count_matching(&self, field: &str, value: &str) -> SiteforgeResult<u64> {
        ensure_identifier(field)?;
        self.select_database().await?;

        // Field names cannot be bound, so the validated identifier is
        // embedded directly (identifier characters only — safe).
        let query = format!("SELECT count() AS total FROM client WHERE {field} = $value GROUP ALL");
        let mut result = self
            .db
            .query(query)
            .bind(("value", value.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<CountRow> = result.take(0).map_err(DbError::from)?;
        Ok(rows.first().map(|row| row.total).unwrap_or(0))
    }

    async fn names_matching(&self, field: &str, value: &str) -> SiteforgeResult<Vec<String>> {
        ensure_identifier(field)?;
        self.select_database().await?;

        let query = format!("SELECT client_name FROM client WHERE {field} = $value");
        let mut result = self
            .db
            .query(query)
            .bind(("value", value.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<ClientNameRow> = result.take(0).map_err(DbError::from)?;
        Ok(rows.into_iter().filter_map(|row| row.client_name).collect())
    }
}
