//! Siteforge Plugins — domain services for the multi-tenant content
//! platform: per-tenant document plugins (websites, SEO, reviews) and the
//! cross-tenant structure-template fan-out.
//!
//! Services are generic over the `siteforge-core` port traits, so this
//! crate has no dependency on the database adapter.

pub mod config;
pub mod error;
pub mod merge;
pub mod reviews;
pub mod sanitize;
pub mod seo;
pub mod template;
pub mod websites;

pub use config::RuntimeConfig;
pub use error::PluginError;
pub use reviews::ReviewsService;
pub use seo::SeoService;
pub use template::TemplateService;
pub use websites::WebsitesService;
