//! geoproxy service - HTTP proxy for distance and geolocation lookups.
//!
//! Forwards requests to a mapping provider so the provider credential never
//! has to ship in client-side code.
//!
//! ## Environment Variables
//!
//! Variables may also be set in a `.env` file in the working directory.
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `GOOGLE_MAPS_API_KEY` | Provider credential | None (endpoints answer 500) |
//! | `GEOPROXY_PORT` | HTTP server port | 8080 |
//! | `GEOPROXY_TEMPLATE_DIR` | Directory containing `index.html` | bundled `templates/` |
//! | `GEOPROXY_DISTANCE_MATRIX_URL` | Distance Matrix endpoint | Google |
//! | `GEOPROXY_GEOLOCATION_URL` | Geolocation endpoint | Google |
//! | `GEOPROXY_TIMEOUT_SECS` | Outbound request timeout | 10 |
//! | `RUST_LOG` | Log level (e.g., "info", "debug") | "info" |
//!
//! ## Endpoints
//!
//! - `GET /` - Landing page
//! - `POST /get_distance` - Distance from `{user_lat, user_lng}` to `destination`
//! - `POST /get-location` - Geolocate the caller
//! - `GET /get-api-key` - Provider credential
//! - `GET /health` - Health check
//! - `GET /docs` - OpenAPI documentation (Swagger UI)

use std::net::SocketAddr;
use std::sync::Arc;

use geoproxy::{MapsClient, MapsConfigBuilder};
use geoproxy_service::{handlers, router, AppState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// OpenAPI documentation for the geoproxy service.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "geoproxy",
        version = "0.1.0",
        description = "Proxy for distance and geolocation lookups that keeps the provider credential server-side.",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    paths(
        handlers::index,
        handlers::get_distance,
        handlers::get_location,
        handlers::get_api_key,
        handlers::health_check,
    ),
    components(
        schemas(
            handlers::DistanceRequest,
            handlers::DistanceResponse,
            handlers::ApiKeyResponse,
            handlers::ErrorResponse,
            handlers::HealthResponse,
        )
    ),
    tags(
        (name = "maps", description = "Distance and geolocation endpoints"),
        (name = "page", description = "Landing page"),
        (name = "system", description = "System and health endpoints")
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // A missing .env file is fine; the environment may be set another way.
    let dotenv = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "geoproxy_service=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Ok(path) = dotenv {
        tracing::debug!(path = %path.display(), "Loaded .env file");
    }

    let port: u16 = std::env::var("GEOPROXY_PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(8080);

    let config = MapsConfigBuilder::from_env().build();
    if !config.has_api_key() {
        tracing::warn!(
            "GOOGLE_MAPS_API_KEY not set, credential-dependent endpoints will return errors"
        );
    }

    let maps = MapsClient::new(config)?;
    let mut state = AppState::new(maps);
    if let Ok(dir) = std::env::var("GEOPROXY_TEMPLATE_DIR") {
        state = state.with_template_dir(dir);
    }

    tracing::info!(
        template_dir = %state.template_dir.display(),
        distance_matrix_url = %state.maps.config().distance_matrix_url,
        geolocation_url = %state.maps.config().geolocation_url,
        timeout_secs = state.maps.config().timeout.as_secs_f64(),
        port = port,
        "Starting geoproxy service"
    );

    let app = router(Arc::new(state))
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("Listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
