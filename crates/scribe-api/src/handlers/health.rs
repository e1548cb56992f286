//! Liveness endpoint.

use axum::response::IntoResponse;
use axum::Json;

/// `GET /health`. Does not touch the note store.
pub async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
