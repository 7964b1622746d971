//! # geoproxy - credential-hiding mapping client
//!
//! Thin client for a Distance Matrix API and a Geolocation API that keeps the
//! provider credential on the server. The HTTP surface lives in the
//! `geoproxy-service` crate; this crate holds everything that does not depend
//! on a web framework.
//!
//! ## Quick Start
//!
//! ```ignore
//! use geoproxy::{DistanceQuery, MapsClient, MapsConfigBuilder};
//!
//! let client = MapsClient::new(MapsConfigBuilder::from_env().build())?;
//!
//! let query = DistanceQuery::parse(br#"{"user_lat": 40.0, "user_lng": -73.0, "destination": "New York, NY"}"#)?;
//! let distance = client.distance(&query).await?;
//! println!("Distance: {}", distance); // e.g. "5.2 km"
//! ```
//!
//! ## Errors
//!
//! Every failure is a [`ProxyError`]. [`ProxyError::kind`] folds it into one
//! of six [`ErrorKind`]s, each with a fixed HTTP status code.

pub mod client;
pub mod config;
pub mod error;
pub mod request;
pub mod response;

// Re-export main types at crate root for convenience
pub use client::MapsClient;
pub use config::{MapsConfig, MapsConfigBuilder};
pub use error::{ErrorKind, ProxyError, Result, UpstreamApi};
pub use request::DistanceQuery;
pub use response::DistanceMatrixResponse;
