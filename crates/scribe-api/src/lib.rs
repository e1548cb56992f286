//! scribe-api - HTTP API server for scribe
//!
//! Maps the note REST resource onto the note repository and serves the
//! static client from the public directory.

pub mod config;
pub mod error;
pub mod handlers;
pub mod telemetry;

use axum::http::Request;
use axum::routing::get;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::{
    limit::RequestBodyLimitLayer,
    request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer},
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};
use uuid::Uuid;

use scribe_core::{defaults, logging};
use scribe_db::Database;

pub use config::ApiConfig;
pub use error::ApiError;

use handlers::health::health_check;
use handlers::notes::{create_note, delete_note, get_note, list_notes, patch_note, update_note};

// =============================================================================
// REQUEST ID (UUIDv7)
// =============================================================================

/// Generates time-ordered UUIDv7 request correlation IDs.
#[derive(Clone, Default)]
pub struct MakeRequestUuidV7;

impl MakeRequestId for MakeRequestUuidV7 {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        let id = Uuid::now_v7().to_string().parse().ok()?;
        Some(RequestId::new(id))
    }
}

// =============================================================================
// ROUTER
// =============================================================================

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
}

impl AppState {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

/// Build the application router.
pub fn create_router(state: AppState, config: &ApiConfig) -> Router {
    let index = config.public_dir.join("index.html");
    let notes_item = format!("{}/:id", defaults::NOTES_PATH);

    Router::new()
        // Health check
        .route("/health", get(health_check))
        // Notes CRUD
        .route(defaults::NOTES_PATH, get(list_notes).post(create_note))
        .route(
            &notes_item,
            get(get_note)
                .put(update_note)
                .patch(patch_note)
                .delete(delete_note),
        )
        // Static client
        .route_service("/", ServeFile::new(index))
        .fallback_service(ServeDir::new(&config.public_dir))
        // Middleware, outermost first
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(TraceLayer::new_for_http().make_span_with(
                    |request: &Request<axum::body::Body>| {
                        let request_id = request
                            .headers()
                            .get("x-request-id")
                            .and_then(|v| v.to_str().ok())
                            .unwrap_or("-");
                        tracing::info_span!(
                            "http_request",
                            method = %request.method(),
                            uri = %request.uri(),
                            { logging::REQUEST_ID } = request_id
                        )
                    },
                ))
                .layer(RequestBodyLimitLayer::new(config.max_body_bytes)),
        )
        .with_state(state)
}
