//! Source of street graphs for a region.

use nav_core::{BoundingBox, NavResult, TravelMode};

use crate::graph::RouteGraph;

/// Produces a routable graph for a region and travel mode.
///
/// Implementations fetch or read map data on every call; nothing is cached
/// between requests.  Failures are reported as
/// [`NavError::GraphUnavailable`](nav_core::NavError::GraphUnavailable) or
/// [`NavError::Timeout`](nav_core::NavError::Timeout).
pub trait MapDataProvider: Send + Sync {
    fn fetch_graph(&self, region: &BoundingBox, mode: TravelMode) -> NavResult<RouteGraph>;
}

impl<P: MapDataProvider + ?Sized> MapDataProvider for Box<P> {
    fn fetch_graph(&self, region: &BoundingBox, mode: TravelMode) -> NavResult<RouteGraph> {
        (**self).fetch_graph(region, mode)
    }
}

impl<P: MapDataProvider + ?Sized> MapDataProvider for &P {
    fn fetch_graph(&self, region: &BoundingBox, mode: TravelMode) -> NavResult<RouteGraph> {
        (**self).fetch_graph(region, mode)
    }
}
