use crate::state::AppState;
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};

// Liveness probe - no dependencies touched
pub async fn healthz() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

// Readiness probe: checks DB connectivity with timeout protection
pub async fn readyz(State(state): State<AppState>) -> impl IntoResponse {
    let query = sqlx::query("SELECT 1").fetch_one(&state.db);
    match tokio::time::timeout(std::time::Duration::from_secs(5), query).await {
        Ok(Ok(_)) => (StatusCode::OK, "ready").into_response(),
        Ok(Err(e)) => (StatusCode::SERVICE_UNAVAILABLE, format!("not ready: {}", e)).into_response(),
        Err(_) => (StatusCode::SERVICE_UNAVAILABLE, "not ready: timeout").into_response(),
    }
}

// Metrics endpoint: returns JSON snapshot
pub async fn metrics(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.metrics.get_snapshot())
}

// Prometheus-compatible text exposition format
pub async fn metrics_prometheus(State(state): State<AppState>) -> impl IntoResponse {
    let m = state.metrics.get_snapshot();
    let body = format!(
        "# HELP productos_created Total products created\n# TYPE productos_created counter\nproductos_created {}\n\
# HELP productos_updated Total products updated\n# TYPE productos_updated counter\nproductos_updated {}\n\
# HELP productos_deleted Total products deleted\n# TYPE productos_deleted counter\nproductos_deleted {}\n\
# HELP productos_fotos_uploaded Photos stored\n# TYPE productos_fotos_uploaded counter\nproductos_fotos_uploaded {}\n\
# HELP productos_upload_bytes Bytes of photos stored\n# TYPE productos_upload_bytes counter\nproductos_upload_bytes {}\n\
# HELP productos_validation_failures Create requests rejected by validation\n# TYPE productos_validation_failures counter\nproductos_validation_failures {}\n\
# HELP productos_uptime_seconds Uptime seconds\n# TYPE productos_uptime_seconds gauge\nproductos_uptime_seconds {}\n",
        m.productos_created,
        m.productos_updated,
        m.productos_deleted,
        m.fotos_uploaded,
        m.upload_bytes,
        m.validation_failures,
        m.uptime_seconds,
    );
    ([(header::CONTENT_TYPE, "text/plain; version=0.0.4")], body)
}

// Version/Build info endpoint (JSON)
pub async fn version() -> impl IntoResponse {
    let body = serde_json::json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "package": {
            "description": env!("CARGO_PKG_DESCRIPTION"),
            "authors": env!("CARGO_PKG_AUTHORS"),
            "license": env!("CARGO_PKG_LICENSE"),
        },
        "build": {
            "profile": if cfg!(debug_assertions) { "debug" } else { "release" },
            "os": std::env::consts::OS,
            "arch": std::env::consts::ARCH,
        }
    });
    (StatusCode::OK, Json(body))
}
