//! Coordinate-to-coordinate route search: snap both ends, then search.

use tracing::debug;

use nav_core::{Coordinate, NavError, NavResult, OptimizationCriterion};

use crate::graph::RouteGraph;
use crate::router::{DijkstraRouter, Route, Router};

/// Snaps origin and destination to their nearest graph nodes and asks the
/// wrapped [`Router`] for a minimum-cost path between them.
#[derive(Debug, Clone, Default)]
pub struct RouteFinder<R: Router = DijkstraRouter> {
    router: R,
}

impl RouteFinder<DijkstraRouter> {
    pub fn new() -> Self {
        Self { router: DijkstraRouter }
    }
}

impl<R: Router> RouteFinder<R> {
    pub fn with_router(router: R) -> Self {
        Self { router }
    }

    /// # Errors
    ///
    /// - [`NavError::GraphUnavailable`] if `graph` has no nodes to snap to.
    /// - [`NavError::NoRouteFound`] if the snapped destination is
    ///   unreachable from the snapped origin.
    ///
    /// When both ends snap to the same node the result is a single-node
    /// route with zero cost.
    pub fn find(
        &self,
        graph: &RouteGraph,
        origin: Coordinate,
        destination: Coordinate,
        criterion: OptimizationCriterion,
    ) -> NavResult<Route> {
        let (Some(from), Some(to)) = (graph.snap_to_node(origin), graph.snap_to_node(destination))
        else {
            return Err(NavError::graph_unavailable("graph has no nodes to snap to"));
        };
        debug!(%origin, %from, %destination, %to, %criterion, "snapped route endpoints");

        Ok(self.router.route(graph, from, to, criterion)?)
    }
}

/// [`RouteFinder::find`] with the default Dijkstra search.
pub fn find_route(
    graph: &RouteGraph,
    origin: Coordinate,
    destination: Coordinate,
    criterion: OptimizationCriterion,
) -> NavResult<Route> {
    RouteFinder::new().find(graph, origin, destination, criterion)
}
