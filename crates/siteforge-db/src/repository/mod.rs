//! SurrealDB implementations of the core storage ports.

mod clients;
mod documents;
mod templates;

pub use clients::SurrealClientRegistry;
pub use documents::SurrealDocumentStore;
pub use templates::SurrealTemplateRegistry;

use crate::error::DbError;

/// Validate a name that gets embedded into a query string. Field names
/// cannot be bound as parameters, so only identifier characters pass.
pub(crate) fn ensure_identifier(name: &str) -> Result<(), DbError> {
    let valid = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_');
    if valid {
        Ok(())
    } else {
        Err(DbError::InvalidIdentifier(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_identifiers() {
        assert!(ensure_identifier("structure_template").is_ok());
        assert!(ensure_identifier("template").is_ok());
        assert!(ensure_identifier("field2").is_ok());
    }

    #[test]
    fn rejects_query_syntax() {
        assert!(ensure_identifier("").is_err());
        assert!(ensure_identifier("a b").is_err());
        assert!(ensure_identifier("name = $x; DELETE client").is_err());
        assert!(ensure_identifier("body.page_key").is_err());
    }
}
