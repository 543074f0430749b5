//! Error types for the Siteforge system.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SiteforgeError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },

    #[error("Authorization denied: {reason}")]
    AuthorizationDenied { reason: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Database error: {0}")]
    Database(String),

    /// A per-tenant failure that aborted a template fan-out. Clients
    /// processed before `tenant` keep their already-applied changes.
    #[error("Fan-out aborted at client {tenant}: {source}")]
    FanOut {
        tenant: String,
        #[source]
        source: Box<SiteforgeError>,
    },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl SiteforgeError {
    /// Wrap an error with the client (tenant) whose write failed.
    pub fn fan_out(tenant: impl Into<String>, source: SiteforgeError) -> Self {
        SiteforgeError::FanOut {
            tenant: tenant.into(),
            source: Box::new(source),
        }
    }
}

pub type SiteforgeResult<T> = Result<T, SiteforgeError>;
