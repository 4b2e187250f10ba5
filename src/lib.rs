//! # Productos API
//!
//! REST backend for a product catalogue: create, read, update and delete
//! products, and attach photos to them through multipart uploads.
//!
//! ## Architecture
//!
//! - **Axum**: HTTP server, routing and multipart extraction
//! - **SQLx**: product documents persisted in SQLite
//! - **Tokio**: async runtime; every request is one chain of awaited steps
//! - **Validator**: field rules checked on product creation
//!
//! ## Core Components
//!
//! - [`config`]: layered configuration (defaults, file, environment)
//! - [`db`]: schema initialization
//! - [`error`]: error type and its HTTP mapping
//! - [`metrics`]: request outcome counters
//! - [`middleware`]: response security headers
//! - [`routes`]: router and handlers
//! - [`state`]: shared application state
//! - [`store`]: persistence trait and SQLite implementation
//! - [`types`]: `Producto` / `Categoria` documents and validation
//! - [`uploads`]: multipart form parsing and photo storage

pub mod config;
pub mod db;
pub mod error;
pub mod metrics;
pub mod middleware;
pub mod routes;
pub mod state;
pub mod store;
pub mod types;
pub mod uploads;

#[cfg(test)]
mod tests;
