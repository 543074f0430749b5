//! Plugin error types.

use siteforge_core::error::SiteforgeError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PluginError {
    #[error("operation is available only in local development mode")]
    LocalDevelopmentOnly,

    #[error("document id is required")]
    MissingId,

    #[error("invalid document id: {0}")]
    InvalidId(String),

    #[error("payload cannot be empty")]
    EmptyPayload,

    #[error("template key is required")]
    MissingTemplateKey,

    #[error("documents payload cannot be empty")]
    EmptyDocuments,

    #[error("no usable documents after sanitizing input")]
    NoUsableDocuments,

    #[error("document {index}: {reason}")]
    Document { index: usize, reason: String },
}

impl From<PluginError> for SiteforgeError {
    fn from(err: PluginError) -> Self {
        match err {
            PluginError::LocalDevelopmentOnly => SiteforgeError::AuthorizationDenied {
                reason: err.to_string(),
            },
            PluginError::MissingId
            | PluginError::InvalidId(_)
            | PluginError::EmptyPayload
            | PluginError::MissingTemplateKey
            | PluginError::EmptyDocuments
            | PluginError::NoUsableDocuments
            | PluginError::Document { .. } => SiteforgeError::Validation {
                message: err.to_string(),
            },
        }
    }
}
