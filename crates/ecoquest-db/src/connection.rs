//! Embedded SurrealDB connection management.
//!
//! The system of record is a local store: in-memory by default, RocksDB
//! when a data directory is configured. There is no remote database.

use std::path::PathBuf;

use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem, RocksDb};
use tracing::info;

/// Configuration for opening the embedded database.
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// Data directory for durable storage. `None` opens an in-memory
    /// instance (state is lost on shutdown).
    pub path: Option<PathBuf>,
    /// SurrealDB namespace.
    pub namespace: String,
    /// SurrealDB database name.
    pub database: String,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            path: None,
            namespace: "ecoquest".into(),
            database: "main".into(),
        }
    }
}

/// Manages the embedded SurrealDB instance.
#[derive(Clone)]
pub struct DbManager {
    db: Surreal<Db>,
}

impl DbManager {
    /// Open the embedded database described by the configuration and
    /// select the configured namespace and database.
    pub async fn open(config: &DbConfig) -> Result<Self, surrealdb::Error> {
        let db = match &config.path {
            Some(path) => {
                info!(path = %path.display(), "Opening RocksDB-backed store");
                Surreal::new::<RocksDb>(path.as_path()).await?
            }
            None => {
                info!("Opening in-memory store");
                Surreal::new::<Mem>(()).await?
            }
        };

        db.use_ns(&config.namespace)
            .use_db(&config.database)
            .await?;

        info!(
            namespace = %config.namespace,
            database = %config.database,
            "Store ready"
        );

        Ok(Self { db })
    }

    /// Returns a reference to the underlying SurrealDB client.
    pub fn client(&self) -> &Surreal<Db> {
        &self.db
    }
}
