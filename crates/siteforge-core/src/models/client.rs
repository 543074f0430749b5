//! Client registry model.

use serde::{Deserialize, Serialize};

use super::document::JsonObject;

/// A client (tenant) registration in the shared registry.
///
/// `fields` holds the flag fields that subscribe the client to structure
/// templates, e.g. `structure_template = "template-1"`. The client's own
/// database is named after `client_name`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientRegistration {
    pub client_name: String,
    #[serde(flatten)]
    pub fields: JsonObject,
}
