//! Async client for the upstream Distance Matrix and Geolocation APIs.
//!
//! A single [`MapsClient`] is built at startup and shared by every request;
//! it holds no mutable state, so concurrent calls never interfere.

use reqwest::{Client, RequestBuilder};
use serde_json::Value;

use crate::config::MapsConfig;
use crate::error::{ProxyError, Result, UpstreamApi};
use crate::request::DistanceQuery;
use crate::response::DistanceMatrixResponse;

/// Credential-holding client for the mapping provider.
pub struct MapsClient {
    client: Client,
    config: MapsConfig,
}

impl MapsClient {
    /// Create a new client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ProxyError::Client`] if the HTTP client cannot be built
    /// (e.g. TLS backend initialisation failure).
    pub fn new(config: MapsConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(ProxyError::Client)?;

        Ok(Self { client, config })
    }

    /// The configuration this client was built with.
    pub fn config(&self) -> &MapsConfig {
        &self.config
    }

    /// The configured credential.
    ///
    /// # Errors
    ///
    /// Returns [`ProxyError::MissingApiKey`] if none was configured.
    pub fn api_key(&self) -> Result<&str> {
        self.config
            .api_key
            .as_deref()
            .ok_or(ProxyError::MissingApiKey)
    }

    /// Look up the distance text between the caller and a destination.
    ///
    /// # Errors
    ///
    /// - [`ProxyError::MissingApiKey`] without a credential
    /// - [`ProxyError::Upstream`] on transport failure, timeout, non-2xx HTTP
    ///   status, or a body that is not JSON
    /// - [`ProxyError::UpstreamRejected`] if the payload status is not `OK`
    /// - [`ProxyError::UnexpectedResponse`] if the payload has no string `status`
    ///   or carries no distance
    pub async fn distance(&self, query: &DistanceQuery) -> Result<String> {
        let key = self.api_key()?;
        let body = send(self.distance_request(key, query), UpstreamApi::DistanceMatrix).await?;

        let response = DistanceMatrixResponse::from_json(body)?;
        response.first_distance_text().map(str::to_owned)
    }

    /// Ask the provider to locate the caller and return its answer untouched.
    ///
    /// # Errors
    ///
    /// - [`ProxyError::MissingApiKey`] without a credential
    /// - [`ProxyError::Upstream`] on transport failure, timeout, non-2xx HTTP
    ///   status, or a body that is not JSON
    pub async fn geolocate(&self) -> Result<Value> {
        let key = self.api_key()?;
        send(self.geolocation_request(key), UpstreamApi::Geolocation).await
    }

    fn distance_request(&self, key: &str, query: &DistanceQuery) -> RequestBuilder {
        self.client.get(&self.config.distance_matrix_url).query(&[
            ("origins", query.origins().as_str()),
            ("destinations", query.destination.as_str()),
            ("key", key),
        ])
    }

    fn geolocation_request(&self, key: &str) -> RequestBuilder {
        self.client
            .post(&self.config.geolocation_url)
            .query(&[("key", key)])
    }
}

/// Send a request and decode the JSON body of a successful response.
async fn send(request: RequestBuilder, api: UpstreamApi) -> Result<Value> {
    // The URL carries the credential; keep it out of error messages.
    let upstream = |source: reqwest::Error| ProxyError::Upstream {
        api,
        source: source.without_url(),
    };

    let response = request
        .send()
        .await
        .and_then(|r| r.error_for_status())
        .map_err(upstream)?;

    response.json().await.map_err(upstream)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MapsConfigBuilder;

    fn client_with_key(key: &str) -> MapsClient {
        let config = MapsConfigBuilder::new()
            .api_key(key)
            .distance_matrix_url("http://upstream.test/maps/api/distancematrix/json")
            .geolocation_url("http://upstream.test/geolocation/v1/geolocate")
            .build();
        MapsClient::new(config).unwrap()
    }

    #[test]
    fn test_api_key() {
        let client = client_with_key("abc123");
        assert_eq!(client.api_key().unwrap(), "abc123");

        let client = MapsClient::new(MapsConfigBuilder::new().build()).unwrap();
        assert!(matches!(
            client.api_key().unwrap_err(),
            ProxyError::MissingApiKey
        ));
    }

    #[test]
    fn test_distance_request_encodes_params() {
        let client = client_with_key("k&y=1");
        let query = DistanceQuery {
            user_lat: "40.0".to_string(),
            user_lng: "-73.0".to_string(),
            destination: "New York, NY & more".to_string(),
        };

        let request = client.distance_request("k&y=1", &query).build().unwrap();
        assert_eq!(request.method(), reqwest::Method::GET);
        assert_eq!(request.url().path(), "/maps/api/distancematrix/json");

        let pairs: Vec<(String, String)> = request
            .url()
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("origins".to_string(), "40.0,-73.0".to_string()),
                ("destinations".to_string(), "New York, NY & more".to_string()),
                ("key".to_string(), "k&y=1".to_string()),
            ]
        );

        let raw = request.url().query().unwrap();
        assert!(!raw.contains(' '));
        assert!(!raw.contains("& more"));
    }

    #[test]
    fn test_geolocation_request() {
        let client = client_with_key("abc123");
        let request = client.geolocation_request("abc123").build().unwrap();

        assert_eq!(request.method(), reqwest::Method::POST);
        assert_eq!(request.url().path(), "/geolocation/v1/geolocate");
        assert_eq!(request.url().query(), Some("key=abc123"));
        assert!(request.body().is_none());
    }
}
