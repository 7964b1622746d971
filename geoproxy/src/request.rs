//! Validation of caller-supplied distance requests.
//!
//! Bodies are checked loosely: each field only has to be present and truthy.
//! Values are not range-checked or geocoded, and strings are accepted where
//! numbers are expected. A coordinate of exactly `0` is falsy and therefore
//! rejected.

use serde_json::Value;

use crate::error::{ProxyError, Result};

/// A validated `/get_distance` request, with each field already rendered
/// for use in a query string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistanceQuery {
    /// Caller latitude.
    pub user_lat: String,
    /// Caller longitude.
    pub user_lng: String,
    /// Free-form destination (address, place name, or `lat,lng`).
    pub destination: String,
}

impl DistanceQuery {
    /// Parse and validate a raw request body.
    ///
    /// # Errors
    ///
    /// - [`ProxyError::BadRequest`] with "No JSON data provided" for an empty body
    /// - [`ProxyError::BadRequest`] with "Invalid JSON data" if the body is not JSON
    /// - anything [`from_json`](Self::from_json) rejects
    pub fn parse(body: &[u8]) -> Result<Self> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Err(ProxyError::bad_request("No JSON data provided"));
        }

        let value: Value = serde_json::from_slice(body).map_err(|e| ProxyError::BadRequest {
            message: "Invalid JSON data",
            details: Some(e.to_string()),
        })?;

        Self::from_json(&value)
    }

    /// Validate an already decoded body.
    pub fn from_json(value: &Value) -> Result<Self> {
        if !is_truthy(value) {
            return Err(ProxyError::bad_request("No JSON data provided"));
        }

        let field = |name: &str| {
            value
                .get(name)
                .filter(|v| is_truthy(v))
                .map(render_param)
                .ok_or_else(|| ProxyError::bad_request("Missing required parameters"))
        };

        Ok(Self {
            user_lat: field("user_lat")?,
            user_lng: field("user_lng")?,
            destination: field("destination")?,
        })
    }

    /// The `origins` parameter: `"{lat},{lng}"`.
    pub fn origins(&self) -> String {
        format!("{},{}", self.user_lat, self.user_lng)
    }
}

/// JSON truthiness: `null`, `false`, zero, and empty strings, arrays and
/// objects are falsy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// Render a field for a query string. Strings go in verbatim, everything
/// else in its JSON form.
fn render_param(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn message(err: ProxyError) -> &'static str {
        match err {
            ProxyError::BadRequest { message, .. } => message,
            other => panic!("Expected BadRequest, got {other:?}"),
        }
    }

    #[test]
    fn test_valid_request() {
        let query = DistanceQuery::from_json(&json!({
            "user_lat": 40.0,
            "user_lng": -73.0,
            "destination": "New York, NY"
        }))
        .unwrap();

        assert_eq!(query.user_lat, "40.0");
        assert_eq!(query.user_lng, "-73.0");
        assert_eq!(query.destination, "New York, NY");
        assert_eq!(query.origins(), "40.0,-73.0");
    }

    #[test]
    fn test_string_coordinates_pass_through() {
        let query = DistanceQuery::from_json(&json!({
            "user_lat": "51.5",
            "user_lng": "-0.12",
            "destination": "Paris"
        }))
        .unwrap();
        assert_eq!(query.origins(), "51.5,-0.12");
    }

    #[test]
    fn test_integer_coordinates() {
        let query = DistanceQuery::from_json(&json!({
            "user_lat": 40,
            "user_lng": 3,
            "destination": "Madrid"
        }))
        .unwrap();
        assert_eq!(query.origins(), "40,3");
    }

    #[test]
    fn test_empty_body() {
        assert_eq!(message(DistanceQuery::parse(b"").unwrap_err()), "No JSON data provided");
        assert_eq!(message(DistanceQuery::parse(b"  \n").unwrap_err()), "No JSON data provided");
    }

    #[test]
    fn test_falsy_bodies() {
        for body in [json!({}), json!(null), json!([]), json!(0), json!(""), json!(false)] {
            let err = DistanceQuery::from_json(&body).unwrap_err();
            assert_eq!(message(err), "No JSON data provided", "body: {body}");
        }
    }

    #[test]
    fn test_invalid_json() {
        let err = DistanceQuery::parse(b"{not json").unwrap_err();
        match err {
            ProxyError::BadRequest { message, details } => {
                assert_eq!(message, "Invalid JSON data");
                assert!(details.is_some());
            }
            other => panic!("Expected BadRequest, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_fields() {
        let bodies = [
            json!({"user_lng": -73.0, "destination": "NYC"}),
            json!({"user_lat": 40.0, "destination": "NYC"}),
            json!({"user_lat": 40.0, "user_lng": -73.0}),
            json!({"unrelated": true}),
        ];
        for body in bodies {
            let err = DistanceQuery::from_json(&body).unwrap_err();
            assert_eq!(message(err), "Missing required parameters", "body: {body}");
        }
    }

    #[test]
    fn test_falsy_fields_rejected() {
        let bodies = [
            json!({"user_lat": 0, "user_lng": -73.0, "destination": "NYC"}),
            json!({"user_lat": 40.0, "user_lng": 0.0, "destination": "NYC"}),
            json!({"user_lat": 40.0, "user_lng": -73.0, "destination": ""}),
            json!({"user_lat": null, "user_lng": -73.0, "destination": "NYC"}),
        ];
        for body in bodies {
            let err = DistanceQuery::from_json(&body).unwrap_err();
            assert_eq!(message(err), "Missing required parameters", "body: {body}");
        }
    }

    #[test]
    fn test_non_object_body() {
        let err = DistanceQuery::from_json(&json!([1, 2, 3])).unwrap_err();
        assert_eq!(message(err), "Missing required parameters");
    }

    #[test]
    fn test_truthiness() {
        assert!(!is_truthy(&json!(0.0)));
        assert!(!is_truthy(&json!(-0.0)));
        assert!(is_truthy(&json!(0.0001)));
        assert!(is_truthy(&json!(true)));
        assert!(is_truthy(&json!("0")));
        assert!(is_truthy(&json!([0])));
    }
}
