//! SurrealDB connection management.

use surrealdb::Surreal;
use surrealdb::engine::remote::ws::{Client, Ws};
use surrealdb::opt::auth::Root;
use tracing::info;

/// Configuration for connecting to SurrealDB.
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// WebSocket URL (e.g., `127.0.0.1:8000`).
    pub url: String,
    /// Namespace holding the core database and every client database.
    pub namespace: String,
    /// Shared core database with the template and client registries.
    pub core_database: String,
    /// Root username for authentication.
    pub username: String,
    /// Root password for authentication.
    pub password: String,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            url: "127.0.0.1:8000".into(),
            namespace: "siteforge".into(),
            core_database: "core".into(),
            username: "root".into(),
            password: "root".into(),
        }
    }
}

/// Manages a connection to SurrealDB.
///
/// One connection serves the core database and every client database;
/// repositories select the database they operate on per call. This is
/// safe under the platform's sequential, request-scoped operation model;
/// callers needing concurrent fan-outs must serialize externally.
#[derive(Clone)]
pub struct DbManager {
    db: Surreal<Client>,
    core_database: String,
}

impl DbManager {
    /// Connect to SurrealDB using the provided configuration.
    ///
    /// Authenticates as root, selects the configured namespace and core
    /// database, and returns a ready-to-use manager.
    pub async fn connect(config: &DbConfig) -> Result<Self, surrealdb::Error> {
        info!(
            url = %config.url,
            namespace = %config.namespace,
            database = %config.core_database,
            "Connecting to SurrealDB"
        );

        let db = Surreal::new::<Ws>(&config.url).await?;

        db.signin(Root {
            username: config.username.clone(),
            password: config.password.clone(),
        })
        .await?;

        db.use_ns(&config.namespace)
            .use_db(&config.core_database)
            .await?;

        info!("Successfully connected to SurrealDB");

        Ok(Self {
            db,
            core_database: config.core_database.clone(),
        })
    }

    /// Returns a reference to the underlying SurrealDB client.
    pub fn client(&self) -> &Surreal<Client> {
        &self.db
    }

    /// Name of the shared core database.
    pub fn core_database(&self) -> &str {
        &self.core_database
    }
}
