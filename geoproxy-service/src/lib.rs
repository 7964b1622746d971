//! geoproxy service library
//!
//! HTTP handlers, router and shared state for the proxy service.
//! This library is used by both the geoproxy-service binary and integration tests.

pub mod handlers;

use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use geoproxy::MapsClient;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Application state shared across handlers.
pub struct AppState {
    /// Client for the upstream mapping provider. Holds the credential.
    pub maps: MapsClient,
    /// Directory containing the landing page.
    pub template_dir: PathBuf,
}

impl AppState {
    /// Create state serving the landing page from the bundled template directory.
    pub fn new(maps: MapsClient) -> Self {
        Self {
            maps,
            template_dir: default_template_dir(),
        }
    }

    /// Serve the landing page from `dir` instead.
    pub fn with_template_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.template_dir = dir.into();
        self
    }
}

/// The `templates` directory shipped next to this crate's manifest.
pub fn default_template_dir() -> PathBuf {
    PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/templates"))
}

/// Build the application router with tracing and permissive CORS.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/get_distance", post(handlers::get_distance))
        .route("/get-location", post(handlers::get_location))
        .route("/get-api-key", get(handlers::get_api_key))
        .route("/health", get(handlers::health_check))
        .layer(
            ServiceBuilder::new().layer(TraceLayer::new_for_http()).layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any),
            ),
        )
        .with_state(state)
}

// Re-export commonly used types for convenience
pub use handlers::{
    ApiKeyResponse, DistanceRequest, DistanceResponse, ErrorResponse, HealthResponse,
};
