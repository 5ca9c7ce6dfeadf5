//! Spatial-subsystem error type.

use thiserror::Error;

use nav_core::{NavError, NodeId};

/// Errors produced by `nav-spatial`.
#[derive(Debug, Error)]
pub enum SpatialError {
    #[error("no route from {from} to {to}")]
    NoRoute { from: NodeId, to: NodeId },

    #[error("node {0} not found in graph")]
    NodeNotFound(NodeId),

    #[error("edge {from} -> {to} has invalid weights (length {length_m} m, time {travel_secs} s)")]
    InvalidWeight {
        from:        NodeId,
        to:          NodeId,
        length_m:    f64,
        travel_secs: f64,
    },

    #[error("malformed map data: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "osm")]
    #[error("OSM parse error: {0}")]
    Osm(String),
}

pub type SpatialResult<T> = Result<T, SpatialError>;

impl From<SpatialError> for NavError {
    /// A missing path is the caller's `NoRouteFound`; everything else means
    /// no usable graph could be produced.
    fn from(err: SpatialError) -> Self {
        match err {
            SpatialError::NoRoute { from, to } => NavError::NoRouteFound { from, to },
            other => NavError::graph_unavailable(other.to_string()),
        }
    }
}
