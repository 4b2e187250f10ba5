//! In-process tests for the product API.
//!
//! - **api_tests**: the HTTP surface driven through the router with `oneshot`
//! - **store_tests**: SQLite persistence behind `ProductoStore`
//! - **config_tests**: configuration defaults, files and validation
//! - **error_tests**: status codes and bodies produced by `AppError`
//!
//! Run a single module with `cargo test api_tests`.

mod config_tests;
mod store_tests;

use std::path::Path;

use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

use crate::config::AppConfig;

/// Single-connection in-memory database; the schema lives as long as the pool.
pub(crate) async fn memory_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    crate::db::init_db(&pool).await.unwrap();
    pool
}

pub(crate) fn test_config(upload_dir: &Path) -> AppConfig {
    let mut config = AppConfig::default();
    config.uploads.path = upload_dir.display().to_string();
    config
}
