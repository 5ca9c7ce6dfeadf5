//! Request-level error taxonomy.
//!
//! Every public operation of the route finder fails with one of these.  Sub-
//! crates keep their own error enums for construction and transport details
//! and convert into `NavError` at the operation boundary, so callers only
//! ever match on this one type.  None of the variants is fatal: each is
//! scoped to the request that produced it.

use std::time::Duration;

use thiserror::Error;

use crate::NodeId;

#[derive(Debug, Error)]
pub enum NavError {
    /// The address could not be turned into a coordinate (no match, or the
    /// geocoder failed).
    #[error("unable to find location for {address:?}")]
    NotFound { address: String },

    /// No routable network could be obtained for the requested region/mode.
    #[error("street graph unavailable: {reason}")]
    GraphUnavailable { reason: String },

    /// The snapped destination is not reachable from the snapped origin.
    #[error("no route from {from} to {to}")]
    NoRouteFound { from: NodeId, to: NodeId },

    /// An external call exceeded its time bound.
    #[error("{service} did not answer within {after:?}")]
    Timeout { service: &'static str, after: Duration },

    #[error("invalid coordinate ({lat}, {lon})")]
    InvalidCoordinate { lat: f64, lon: f64 },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("parse error: {0}")]
    Parse(String),
}

impl NavError {
    pub fn not_found(address: impl Into<String>) -> Self {
        NavError::NotFound { address: address.into() }
    }

    pub fn graph_unavailable(reason: impl Into<String>) -> Self {
        NavError::GraphUnavailable { reason: reason.into() }
    }
}

/// Shorthand result type for all `nav-*` crates.
pub type NavResult<T> = Result<T, NavError>;
