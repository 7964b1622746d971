//! HTTP request handlers for the proxy service.

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use geoproxy::{DistanceQuery, ProxyError, UpstreamApi};
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

use crate::AppState;

/// File name of the landing page inside the template directory.
pub const INDEX_TEMPLATE: &str = "index.html";

/// Body of a distance request, for the OpenAPI document.
///
/// The handler validates the raw JSON itself so that every failure yields an
/// [`ErrorResponse`]. Fields only need to be present and truthy: coordinates
/// may be numbers or numeric strings, and are forwarded without range checks.
#[derive(Debug, ToSchema)]
pub struct DistanceRequest {
    /// Caller latitude in decimal degrees, as a number or a string. Must be non-zero.
    #[schema(value_type = Object)]
    pub user_lat: serde_json::Value,
    /// Caller longitude in decimal degrees, as a number or a string. Must be non-zero.
    #[schema(value_type = Object)]
    pub user_lng: serde_json::Value,
    /// Destination as an address, place name or `lat,lng` pair.
    pub destination: String,
}

/// Successful distance response.
#[derive(Debug, Serialize, ToSchema)]
pub struct DistanceResponse {
    /// Distance text exactly as reported by the provider, e.g. `"5.2 km"`.
    pub distance: String,
}

/// Credential response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiKeyResponse {
    /// Provider credential.
    #[serde(rename = "apiKey")]
    pub api_key: String,
}

/// Error envelope used by every failure response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message.
    pub error: String,
    /// Underlying cause, when there is one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    /// Status reported by the upstream provider.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl ErrorResponse {
    fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
            status: None,
        }
    }

    fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

impl From<&ProxyError> for ErrorResponse {
    fn from(e: &ProxyError) -> Self {
        match e {
            ProxyError::MissingApiKey => ErrorResponse::new("API key not configured"),
            ProxyError::BadRequest { message, details } => ErrorResponse {
                details: details.clone(),
                ..ErrorResponse::new(*message)
            },
            ProxyError::Upstream { api, source } => {
                let error = match api {
                    UpstreamApi::DistanceMatrix => "Failed to contact Google Maps API",
                    UpstreamApi::Geolocation => "Failed to contact Google Geolocation API",
                };
                ErrorResponse::new(error).with_details(source.to_string())
            }
            ProxyError::UpstreamRejected { status } => ErrorResponse {
                status: Some(status.clone()),
                ..ErrorResponse::new("Could not calculate distance")
            },
            ProxyError::Template { source, .. } => {
                ErrorResponse::new("Failed to load template").with_details(source.to_string())
            }
            ProxyError::UnexpectedResponse { .. } | ProxyError::Client(_) => {
                ErrorResponse::new("Internal server error").with_details(e.to_string())
            }
        }
    }
}

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Service version.
    pub version: String,
}

/// Serve the landing page.
///
/// The page is read from disk on every request, so it can be edited without
/// restarting the service.
#[utoipa::path(
    get,
    path = "/",
    tag = "page",
    responses(
        (status = 200, description = "Landing page", content_type = "text/html", body = String),
        (status = 500, description = "Page could not be loaded", body = ErrorResponse)
    )
)]
pub async fn index(State(state): State<Arc<AppState>>) -> Response {
    let path = state.template_dir.join(INDEX_TEMPLATE);

    match tokio::fs::read_to_string(&path).await {
        Ok(page) => Html(page).into_response(),
        Err(source) => error_response("index", ProxyError::Template { path, source }),
    }
}

/// Get the distance from the caller to a destination.
///
/// # Returns
///
/// - `200 OK` with `{distance}` on success
/// - `400 Bad Request` if the body is empty, unreadable (e.g. over the size
///   limit), not JSON, or lacks a field
/// - `500 Internal Server Error` if the credential is missing, the provider
///   rejected the request, or its answer had an unexpected shape
/// - `503 Service Unavailable` if the provider could not be reached
#[utoipa::path(
    post,
    path = "/get_distance",
    tag = "maps",
    request_body = DistanceRequest,
    responses(
        (status = 200, description = "Distance found", body = DistanceResponse),
        (status = 400, description = "Missing or invalid parameters", body = ErrorResponse),
        (status = 500, description = "Missing credential, upstream rejection or internal error", body = ErrorResponse),
        (status = 503, description = "Upstream provider unreachable", body = ErrorResponse)
    )
)]
#[axum::debug_handler]
pub async fn get_distance(
    State(state): State<Arc<AppState>>,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    match lookup_distance(&state, &body).await {
        Ok(distance) => {
            tracing::info!(distance = %distance, "Distance found");
            (StatusCode::OK, Json(DistanceResponse { distance })).into_response()
        }
        Err(e) => error_response("get_distance", e),
    }
}

async fn lookup_distance(
    state: &AppState,
    body: &Result<Bytes, BytesRejection>,
) -> geoproxy::Result<String> {
    // Credential first, so an unconfigured service answers the same regardless of body.
    state.maps.api_key()?;

    let body = body.as_ref().map_err(|rejection| ProxyError::BadRequest {
        message: "Invalid request body",
        details: Some(rejection.body_text()),
    })?;
    let query = DistanceQuery::parse(body)?;
    tracing::debug!(
        origins = %query.origins(),
        destination = %query.destination,
        "Distance query"
    );

    state.maps.distance(&query).await
}

/// Locate the caller through the provider's Geolocation API.
///
/// Any request body is ignored. The provider's JSON answer is returned as is.
#[utoipa::path(
    post,
    path = "/get-location",
    tag = "maps",
    responses(
        (status = 200, description = "Provider geolocation response, passed through unchanged"),
        (status = 500, description = "Missing credential or internal error", body = ErrorResponse),
        (status = 503, description = "Upstream provider unreachable", body = ErrorResponse)
    )
)]
pub async fn get_location(State(state): State<Arc<AppState>>) -> Response {
    tracing::debug!("Geolocation query");

    match state.maps.geolocate().await {
        Ok(location) => {
            tracing::info!("Location found");
            (StatusCode::OK, Json(location)).into_response()
        }
        Err(e) => error_response("get_location", e),
    }
}

/// Return the provider credential to the caller.
///
/// This hands out the very credential the proxy otherwise keeps server-side.
#[utoipa::path(
    get,
    path = "/get-api-key",
    tag = "maps",
    responses(
        (status = 200, description = "Credential", body = ApiKeyResponse),
        (status = 500, description = "Credential not configured", body = ErrorResponse)
    )
)]
pub async fn get_api_key(State(state): State<Arc<AppState>>) -> Response {
    match state.maps.api_key() {
        Ok(key) => (
            StatusCode::OK,
            Json(ApiKeyResponse {
                api_key: key.to_string(),
            }),
        )
            .into_response(),
        Err(e) => error_response("get_api_key", e),
    }
}

/// Health check endpoint.
///
/// Returns service status and version.
#[utoipa::path(
    get,
    path = "/health",
    tag = "system",
    responses((status = 200, description = "Service is up", body = HealthResponse))
)]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Convert a [`ProxyError`] into its JSON envelope and status code.
fn error_response(endpoint: &'static str, e: ProxyError) -> Response {
    let kind = e.kind();
    let status =
        StatusCode::from_u16(kind.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    if status.is_server_error() {
        tracing::warn!(endpoint, kind = ?kind, error = %e, "Request failed");
    } else {
        tracing::debug!(endpoint, kind = ?kind, error = %e, "Request rejected");
    }

    (status, Json(ErrorResponse::from(&e))).into_response()
}
