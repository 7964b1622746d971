//! Error types for the geoproxy library.

use std::path::PathBuf;
use thiserror::Error;

/// Which upstream API a request was addressed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpstreamApi {
    /// Distance Matrix API.
    DistanceMatrix,
    /// Geolocation API.
    Geolocation,
}

impl std::fmt::Display for UpstreamApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UpstreamApi::DistanceMatrix => write!(f, "Distance Matrix API"),
            UpstreamApi::Geolocation => write!(f, "Geolocation API"),
        }
    }
}

/// Errors that can occur while proxying a request.
#[derive(Error, Debug)]
pub enum ProxyError {
    /// No credential was configured at startup.
    #[error("API key not configured")]
    MissingApiKey,

    /// The caller sent a body that failed validation.
    #[error("{message}")]
    BadRequest {
        message: &'static str,
        details: Option<String>,
    },

    /// The upstream provider could not be reached, timed out, or answered
    /// with a non-success HTTP status.
    #[error("Failed to contact {api}: {source}")]
    Upstream {
        api: UpstreamApi,
        #[source]
        source: reqwest::Error,
    },

    /// The provider answered but reported a non-`OK` status in its payload.
    #[error("Upstream rejected the request with status {status}")]
    UpstreamRejected { status: String },

    /// The provider payload did not have the expected shape.
    #[error("Unexpected upstream response: {reason}")]
    UnexpectedResponse { reason: String },

    /// The landing page could not be read.
    #[error("Failed to load template {path}: {source}")]
    Template {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The HTTP client could not be constructed.
    #[error("Failed to create HTTP client: {0}")]
    Client(reqwest::Error),
}

/// Coarse classification of [`ProxyError`], one per HTTP outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Credential missing.
    Config,
    /// Missing or invalid caller input.
    BadRequest,
    /// Transport-level failure reaching the provider.
    UpstreamUnavailable,
    /// Provider responded with a non-success status.
    UpstreamRejected,
    /// Landing page asset unavailable.
    Template,
    /// Anything else, including unexpected response shapes.
    Internal,
}

impl ErrorKind {
    /// HTTP status code returned to the caller for this kind.
    pub fn status_code(self) -> u16 {
        match self {
            ErrorKind::BadRequest => 400,
            ErrorKind::UpstreamUnavailable => 503,
            ErrorKind::Config
            | ErrorKind::UpstreamRejected
            | ErrorKind::Template
            | ErrorKind::Internal => 500,
        }
    }
}

impl ProxyError {
    pub(crate) fn bad_request(message: &'static str) -> Self {
        ProxyError::BadRequest {
            message,
            details: None,
        }
    }

    pub(crate) fn unexpected(reason: impl Into<String>) -> Self {
        ProxyError::UnexpectedResponse {
            reason: reason.into(),
        }
    }

    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ProxyError::MissingApiKey => ErrorKind::Config,
            ProxyError::BadRequest { .. } => ErrorKind::BadRequest,
            ProxyError::Upstream { .. } => ErrorKind::UpstreamUnavailable,
            ProxyError::UpstreamRejected { .. } => ErrorKind::UpstreamRejected,
            ProxyError::Template { .. } => ErrorKind::Template,
            ProxyError::UnexpectedResponse { .. } | ProxyError::Client(_) => ErrorKind::Internal,
        }
    }
}

/// Result type alias using [`ProxyError`].
pub type Result<T> = std::result::Result<T, ProxyError>;
