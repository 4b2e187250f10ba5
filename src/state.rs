use std::{path::PathBuf, sync::Arc};

use crate::config::AppConfig;
use crate::metrics::Metrics;
use crate::store::{ProductoStore, SqliteProductoStore};

/// The shared application state.
///
/// Assembled once at startup and cloned into every handler. Nothing in here is
/// mutated per request apart from the atomic metrics counters.
#[derive(Clone)]
pub struct AppState {
    /// The database connection pool, used directly by the readiness probe.
    pub db: sqlx::SqlitePool,
    /// Product persistence.
    pub productos: Arc<dyn ProductoStore>,
    /// The application configuration.
    pub config: Arc<AppConfig>,
    pub metrics: Metrics,
}

impl AppState {
    /// Creates the state with the SQLite-backed product store.
    pub fn new(db: sqlx::SqlitePool, config: AppConfig) -> Self {
        let store = Arc::new(SqliteProductoStore::new(db.clone()));
        Self::with_store(db, store, config)
    }

    pub fn with_store(db: sqlx::SqlitePool, productos: Arc<dyn ProductoStore>, config: AppConfig) -> Self {
        Self { db, productos, config: Arc::new(config), metrics: Metrics::new() }
    }

    pub fn upload_dir(&self) -> PathBuf {
        PathBuf::from(&self.config.uploads.path)
    }
}
