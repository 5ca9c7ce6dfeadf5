//! Transport-level provider failures.

use std::time::Duration;

use reqwest::StatusCode;
use thiserror::Error;

use nav_core::NavError;

/// Service label carried by [`NavError::Timeout`] for map-data fetches.
pub const MAP_DATA_SERVICE: &str = "map-data";

/// Service label carried by [`NavError::Timeout`] for geocoding calls.
pub const GEOCODER_SERVICE: &str = "geocoder";

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("request failed: {0}")]
    Request(#[source] reqwest::Error),

    #[error("server answered {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("no answer within {0:?}")]
    Timeout(Duration),

    #[error("unreadable response: {0}")]
    Decode(String),
}

impl ProviderError {
    /// Classify a `reqwest` failure; elapsed deadlines become [`Timeout`](Self::Timeout).
    pub(crate) fn from_reqwest(err: reqwest::Error, timeout: Duration) -> Self {
        if err.is_timeout() {
            ProviderError::Timeout(timeout)
        } else {
            ProviderError::Request(err)
        }
    }

    /// Map-data contract: a timeout stays a timeout, anything else means the
    /// graph could not be obtained.
    pub fn into_map_data_error(self) -> NavError {
        match self {
            ProviderError::Timeout(after) => NavError::Timeout { service: MAP_DATA_SERVICE, after },
            other => NavError::graph_unavailable(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for ProviderError {
    fn from(err: serde_json::Error) -> Self {
        ProviderError::Decode(err.to_string())
    }
}
