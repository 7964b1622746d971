//! Distance Matrix response payloads.

use serde::Deserialize;
use serde_json::Value;

use crate::error::{ProxyError, Result};

/// Top-level status reported by the provider on success.
pub const STATUS_OK: &str = "OK";

/// Distance Matrix response body.
///
/// Only `status` is typed. Everything under `rows` is kept as raw JSON and
/// only `rows[0].elements[0].distance.text` is ever looked at, so the rest of
/// the payload may have any shape.
#[derive(Debug, Clone, Deserialize)]
pub struct DistanceMatrixResponse {
    /// `OK`, `ZERO_RESULTS`, `REQUEST_DENIED`, ...
    pub status: String,
    #[serde(default)]
    pub rows: Value,
}

impl DistanceMatrixResponse {
    /// Read the typed parts out of a decoded payload.
    ///
    /// # Errors
    ///
    /// Returns [`ProxyError::UnexpectedResponse`] if `status` is missing or not a string.
    pub fn from_json(value: Value) -> Result<Self> {
        serde_json::from_value(value)
            .map_err(|e| ProxyError::unexpected(format!("invalid Distance Matrix payload: {e}")))
    }

    /// Distance text of the first origin/destination pair, e.g. `"5.2 km"`.
    ///
    /// # Errors
    ///
    /// - [`ProxyError::UpstreamRejected`] if `status` is not `OK`
    /// - [`ProxyError::UnexpectedResponse`] if the first element carries no distance text
    pub fn first_distance_text(&self) -> Result<&str> {
        if self.status != STATUS_OK {
            return Err(ProxyError::UpstreamRejected {
                status: self.status.clone(),
            });
        }

        let row = self
            .rows
            .get(0)
            .ok_or_else(|| ProxyError::unexpected("response contains no rows"))?;
        let element = row
            .get("elements")
            .and_then(|elements| elements.get(0))
            .ok_or_else(|| ProxyError::unexpected("first row contains no elements"))?;

        element
            .pointer("/distance/text")
            .and_then(Value::as_str)
            .ok_or_else(|| match element.get("status").and_then(Value::as_str) {
                Some(status) => ProxyError::unexpected(format!(
                    "first element has no distance (element status {status})"
                )),
                None => ProxyError::unexpected("first element has no distance"),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> DistanceMatrixResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_ok_response() {
        let response = parse(
            r#"{"status":"OK","rows":[{"elements":[{"distance":{"text":"5.2 km"}}]}]}"#,
        );
        assert_eq!(response.first_distance_text().unwrap(), "5.2 km");
    }

    #[test]
    fn test_full_google_payload() {
        let response = parse(
            r#"{
                "destination_addresses": ["New York, NY, USA"],
                "origin_addresses": ["Somewhere"],
                "rows": [{
                    "elements": [{
                        "distance": {"text": "12.3 mi", "value": 19795},
                        "duration": {"text": "25 mins", "value": 1500},
                        "status": "OK"
                    }]
                }],
                "status": "OK"
            }"#,
        );
        assert_eq!(response.first_distance_text().unwrap(), "12.3 mi");
    }

    #[test]
    fn test_unread_fields_may_have_any_shape() {
        let payloads = [
            r#"{"status":"OK","rows":[{"elements":[{"distance":{"text":"5.2 km","value":"5200"}}]}]}"#,
            r#"{"status":"OK","rows":[{"elements":[{"distance":{"text":"5.2 km"},"duration":{"value":60}}]}]}"#,
            r#"{"status":"OK","rows":[{"elements":[{"distance":{"text":"5.2 km"}}]},{"elements":null}]}"#,
            r#"{"status":"OK","rows":[{"elements":[{"distance":{"text":"5.2 km"}},{"distance":{}}]}]}"#,
            r#"{"status":"OK","error_message":42,"rows":[{"elements":[{"distance":{"text":"5.2 km"}}]}]}"#,
        ];
        for json in payloads {
            let response = parse(json);
            assert_eq!(response.first_distance_text().unwrap(), "5.2 km", "payload: {json}");
        }
    }

    #[test]
    fn test_non_string_distance_text() {
        let response = parse(r#"{"status":"OK","rows":[{"elements":[{"distance":{"text":5}}]}]}"#);
        let err = response.first_distance_text().unwrap_err();
        assert!(matches!(err, ProxyError::UnexpectedResponse { .. }));
    }

    #[test]
    fn test_rows_not_an_array() {
        let response = parse(r#"{"status":"OK","rows":"nope"}"#);
        assert!(response.first_distance_text().is_err());
    }

    #[test]
    fn test_rejected_status() {
        let response = parse(r#"{"status":"ZERO_RESULTS","rows":[]}"#);
        match response.first_distance_text().unwrap_err() {
            ProxyError::UpstreamRejected { status } => assert_eq!(status, "ZERO_RESULTS"),
            other => panic!("Expected UpstreamRejected, got {other:?}"),
        }
    }

    #[test]
    fn test_ok_without_rows() {
        let response = parse(r#"{"status":"OK"}"#);
        let err = response.first_distance_text().unwrap_err();
        assert!(matches!(err, ProxyError::UnexpectedResponse { .. }));
        assert!(err.to_string().contains("no rows"));
    }

    #[test]
    fn test_ok_without_elements() {
        let response = parse(r#"{"status":"OK","rows":[{}]}"#);
        let err = response.first_distance_text().unwrap_err();
        assert!(err.to_string().contains("no elements"));
    }

    #[test]
    fn test_element_not_found() {
        let response = parse(r#"{"status":"OK","rows":[{"elements":[{"status":"NOT_FOUND"}]}]}"#);
        let err = response.first_distance_text().unwrap_err();
        assert!(matches!(err, ProxyError::UnexpectedResponse { .. }));
        assert!(err.to_string().contains("NOT_FOUND"));
    }

    #[test]
    fn test_missing_status_is_unexpected() {
        let err = DistanceMatrixResponse::from_json(serde_json::json!({"rows": []})).unwrap_err();
        assert!(matches!(err, ProxyError::UnexpectedResponse { .. }));
    }
}
