//! HTTP routing for the product API.
//!
//! - `productos`: catalogue CRUD and photo uploads under `/api/v2`
//! - `health`: liveness, readiness, metrics and version endpoints

pub mod health;
pub mod productos;

use axum::extract::DefaultBodyLimit;
use axum::middleware::from_fn_with_state;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

use crate::middleware::security_headers::security_headers_middleware;
use crate::state::AppState;

/// Builds the full application router with its middleware stack.
pub fn router(state: AppState) -> Router {
    let max_body = state.config.server.max_body_bytes;
    // Clone config Arc for stateful middleware
    let cfg_arc = state.config.clone();

    let app = Router::new()
        .route("/healthz", get(health::healthz))
        .route("/readyz", get(health::readyz))
        .route("/metrics", get(health::metrics))
        .route("/metrics/prometheus", get(health::metrics_prometheus))
        .route("/version", get(health::version))
        .route("/api/v2/productoshandler", get(productos::list_productos))
        .route("/api/v2/productos", post(productos::create_producto))
        .route(
            "/api/v2/productos/{id}",
            get(productos::get_producto)
                .put(productos::update_producto)
                .delete(productos::delete_producto),
        )
        .route("/api/v2/productos/upload/{id}", post(productos::upload_foto))
        .route("/api/v2/productos/crearconfoto", post(productos::create_producto_con_foto))
        .with_state(state)
        .layer(DefaultBodyLimit::max(max_body))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(from_fn_with_state(cfg_arc, security_headers_middleware));

    // CORS: permissive in debug builds for local front-end development
    if cfg!(debug_assertions) {
        app.layer(CorsLayer::permissive())
    } else {
        app
    }
}
