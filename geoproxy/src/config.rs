//! Upstream endpoint and credential configuration.
//!
//! The configuration is assembled once at startup, usually from environment
//! variables, and is read-only afterwards.
//!
//! ```ignore
//! use geoproxy::MapsConfigBuilder;
//!
//! let config = MapsConfigBuilder::from_env()
//!     .timeout(std::time::Duration::from_secs(5))
//!     .build();
//! ```

use std::time::Duration;

/// Production Distance Matrix endpoint.
pub const DEFAULT_DISTANCE_MATRIX_URL: &str =
    "https://maps.googleapis.com/maps/api/distancematrix/json";

/// Production Geolocation endpoint.
pub const DEFAULT_GEOLOCATION_URL: &str = "https://www.googleapis.com/geolocation/v1/geolocate";

/// Default timeout for outbound requests in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Resolved configuration for [`MapsClient`](crate::MapsClient).
#[derive(Clone)]
pub struct MapsConfig {
    /// Provider credential. `None` keeps the service running but makes every
    /// credential-dependent operation fail with
    /// [`ProxyError::MissingApiKey`](crate::ProxyError::MissingApiKey).
    pub api_key: Option<String>,
    /// Distance Matrix endpoint.
    pub distance_matrix_url: String,
    /// Geolocation endpoint.
    pub geolocation_url: String,
    /// Timeout applied to each outbound request.
    pub timeout: Duration,
}

// Hand-written so the credential never ends up in logs.
impl std::fmt::Debug for MapsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MapsConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("distance_matrix_url", &self.distance_matrix_url)
            .field("geolocation_url", &self.geolocation_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl Default for MapsConfig {
    fn default() -> Self {
        MapsConfigBuilder::new().build()
    }
}

impl MapsConfig {
    /// Whether a credential is available.
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}

/// Builder for [`MapsConfig`].
#[derive(Debug, Clone)]
pub struct MapsConfigBuilder {
    api_key: Option<String>,
    distance_matrix_url: String,
    geolocation_url: String,
    timeout: Duration,
}

impl Default for MapsConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl MapsConfigBuilder {
    /// Create a builder pointing at the production endpoints, without a credential.
    pub fn new() -> Self {
        Self {
            api_key: None,
            distance_matrix_url: DEFAULT_DISTANCE_MATRIX_URL.to_string(),
            geolocation_url: DEFAULT_GEOLOCATION_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Create a builder configured from environment variables.
    ///
    /// # Environment Variables
    ///
    /// | Variable | Description | Default |
    /// |----------|-------------|---------|
    /// | `GOOGLE_MAPS_API_KEY` | Provider credential | None |
    /// | `GEOPROXY_DISTANCE_MATRIX_URL` | Distance Matrix endpoint | Google |
    /// | `GEOPROXY_GEOLOCATION_URL` | Geolocation endpoint | Google |
    /// | `GEOPROXY_TIMEOUT_SECS` | Outbound request timeout | 10 |
    ///
    /// A missing credential is not an error here.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`from_env`](Self::from_env) but reads values through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut builder = Self::new();

        builder.api_key = lookup("GOOGLE_MAPS_API_KEY").and_then(non_blank);

        if let Some(url) = lookup("GEOPROXY_DISTANCE_MATRIX_URL").and_then(non_blank) {
            builder.distance_matrix_url = url;
        }
        if let Some(url) = lookup("GEOPROXY_GEOLOCATION_URL").and_then(non_blank) {
            builder.geolocation_url = url;
        }
        if let Some(secs) = lookup("GEOPROXY_TIMEOUT_SECS").and_then(|s| s.trim().parse().ok()) {
            builder.timeout = Duration::from_secs(secs);
        }

        builder
    }

    /// Set the credential. Blank values count as unset.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = non_blank(key.into());
        self
    }

    /// Remove any credential.
    pub fn without_api_key(mut self) -> Self {
        self.api_key = None;
        self
    }

    /// Set the Distance Matrix endpoint.
    pub fn distance_matrix_url(mut self, url: impl Into<String>) -> Self {
        self.distance_matrix_url = url.into();
        self
    }

    /// Set the Geolocation endpoint.
    pub fn geolocation_url(mut self, url: impl Into<String>) -> Self {
        self.geolocation_url = url.into();
        self
    }

    /// Set the outbound request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build the [`MapsConfig`].
    pub fn build(self) -> MapsConfig {
        MapsConfig {
            api_key: self.api_key,
            distance_matrix_url: self.distance_matrix_url,
            geolocation_url: self.geolocation_url,
            timeout: self.timeout,
        }
    }
}

fn non_blank(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}
