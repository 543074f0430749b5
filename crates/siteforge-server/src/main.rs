//! Siteforge Server — application entry point.

use siteforge_db::repository::{
    SurrealClientRegistry, SurrealDocumentStore, SurrealTemplateRegistry,
};
use siteforge_db::{DbConfig, DbManager};
use siteforge_plugins::{
    ReviewsService, RuntimeConfig, SeoService, TemplateService, WebsitesService,
};
use tracing_subscriber::EnvFilter;

fn db_config_from_env() -> DbConfig {
    let defaults = DbConfig::default();
    DbConfig {
        url: std::env::var("SITEFORGE_DB_URL").unwrap_or(defaults.url),
        namespace: std::env::var("SITEFORGE_DB_NAMESPACE").unwrap_or(defaults.namespace),
        core_database: std::env::var("SITEFORGE_CORE_DB").unwrap_or(defaults.core_database),
        username: std::env::var("SITEFORGE_DB_USER").unwrap_or(defaults.username),
        password: std::env::var("SITEFORGE_DB_PASSWORD").unwrap_or(defaults.password),
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("siteforge=info".parse().unwrap()),
        )
        .json()
        .init();

    tracing::info!("Starting Siteforge server...");

    let db_config = db_config_from_env();
    let runtime = RuntimeConfig::from_env();

    let manager = match DbManager::connect(&db_config).await {
        Ok(manager) => manager,
        Err(err) => {
            tracing::error!(error = %err, "Failed to connect to SurrealDB");
            std::process::exit(1);
        }
    };

    if let Err(err) = siteforge_db::run_migrations(manager.client()).await {
        tracing::error!(error = %err, "Registry migrations failed");
        std::process::exit(1);
    }

    let db = manager.client().clone();
    let _websites = WebsitesService::new(SurrealDocumentStore::new(db.clone()), runtime);
    let _seo = SeoService::new(SurrealDocumentStore::new(db.clone()), runtime);
    let _reviews = ReviewsService::new(SurrealDocumentStore::new(db.clone()));
    let _templates = TemplateService::new(
        SurrealDocumentStore::new(db.clone()),
        SurrealTemplateRegistry::new(db.clone(), manager.core_database()),
        SurrealClientRegistry::new(db, manager.core_database()),
    );

    // TODO: mount the GraphQL transport over the plugin services.

    tracing::info!("Siteforge server stopped.");
}
