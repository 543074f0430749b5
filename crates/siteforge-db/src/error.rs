//! Database-specific error types and conversions.

use siteforge_core::error::SiteforgeError;

/// Database-layer error type.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("SurrealDB error: {0}")]
    Surreal(#[from] surrealdb::Error),

    #[error("Migration failed: {0}")]
    Migration(String),

    #[error("Invalid identifier {0:?}: only ASCII letters, digits and underscores are allowed")]
    InvalidIdentifier(String),

    #[error("Stored record could not be decoded: {0}")]
    Decode(String),
}

impl From<DbError> for SiteforgeError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::InvalidIdentifier(_) => SiteforgeError::Validation {
                message: err.to_string(),
            },
            other => SiteforgeError::Database(other.to_string()),
        }
    }
}
