//! Routing trait and default Dijkstra implementation.
//!
//! # Pluggability
//!
//! [`RouteFinder`](crate::RouteFinder) calls the search through the
//! [`Router`] trait, so a caller can swap in A*, bidirectional search or a
//! contraction hierarchy without touching snapping or the pipeline.
//!
//! # Cost units
//!
//! Costs are `f64` in the unit of the selected criterion: metres for
//! `Length`, seconds for `Time`.  Weights are non-negative by construction
//! (see [`RouteGraphBuilder::build`](crate::RouteGraphBuilder::build)).

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use ordered_float::OrderedFloat;

use nav_core::{Coordinate, EdgeId, NodeId, OptimizationCriterion};

use crate::graph::RouteGraph;
use crate::{SpatialError, SpatialResult};

// ── Route ─────────────────────────────────────────────────────────────────────

/// A path through a [`RouteGraph`]: the visited nodes in order, the edges
/// between them, and the total cost under the criterion it was searched
/// with.
///
/// `nodes.len() == edges.len() + 1` for every route this crate produces.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    pub nodes:      Vec<NodeId>,
    pub edges:      Vec<EdgeId>,
    pub criterion:  OptimizationCriterion,
    pub total_cost: f64,
}

impl Route {
    /// A zero-length route that starts and ends at `node`.
    pub fn single(node: NodeId, criterion: OptimizationCriterion) -> Self {
        Self { nodes: vec![node], edges: vec![], criterion, total_cost: 0.0 }
    }

    /// `true` if the source and destination are the same node.
    pub fn is_trivial(&self) -> bool {
        self.edges.is_empty()
    }

    /// Node positions along the route, origin first.
    pub fn coordinates(&self, graph: &RouteGraph) -> Vec<Coordinate> {
        self.nodes.iter().map(|n| graph.node_pos[n.index()]).collect()
    }

    pub fn total_length_m(&self, graph: &RouteGraph) -> f64 {
        self.edges.iter().map(|e| graph.edge_length_m[e.index()]).sum()
    }

    pub fn total_travel_secs(&self, graph: &RouteGraph) -> f64 {
        self.edges.iter().map(|e| graph.edge_travel_secs[e.index()]).sum()
    }
}

// ── Router trait ──────────────────────────────────────────────────────────────

/// Pluggable shortest-path search.
///
/// Implementations must return a minimum-cost path under `criterion` and
/// must be deterministic: the same graph and endpoints always give the same
/// route, including among equal-cost alternatives.
pub trait Router: Send + Sync {
    /// Compute a route from `from` to `to`.
    ///
    /// `from == to` is a single-node route, not an error.  Returns
    /// [`SpatialError::NoRoute`] when `to` is unreachable.
    fn route(
        &self,
        graph: &RouteGraph,
        from: NodeId,
        to: NodeId,
        criterion: OptimizationCriterion,
    ) -> SpatialResult<Route>;
}

impl<R: Router + ?Sized> Router for &R {
    fn route(
        &self,
        graph: &RouteGraph,
        from: NodeId,
        to: NodeId,
        criterion: OptimizationCriterion,
    ) -> SpatialResult<Route> {
        (**self).route(graph, from, to, criterion)
    }
}

impl<R: Router + ?Sized> Router for Box<R> {
    fn route(
        &self,
        graph: &RouteGraph,
        from: NodeId,
        to: NodeId,
        criterion: OptimizationCriterion,
    ) -> SpatialResult<Route> {
        (**self).route(graph, from, to, criterion)
    }
}

// ── DijkstraRouter ────────────────────────────────────────────────────────────

/// Standard Dijkstra over the CSR graph with a binary heap.
///
/// Ties: the heap is keyed by `(cost, NodeId)`, and a node's predecessor is
/// only replaced by a strictly cheaper one, so among equal-cost paths the
/// one discovered first (lowest node ids popped first, CSR edge order within
/// a node) wins.
#[derive(Debug, Clone, Copy, Default)]
pub struct DijkstraRouter;

impl Router for DijkstraRouter {
    fn route(
        &self,
        graph: &RouteGraph,
        from: NodeId,
        to: NodeId,
        criterion: OptimizationCriterion,
    ) -> SpatialResult<Route> {
        dijkstra(graph, from, to, criterion)
    }
}

// ── Dijkstra internals ────────────────────────────────────────────────────────

fn dijkstra(
    graph: &RouteGraph,
    from: NodeId,
    to: NodeId,
    criterion: OptimizationCriterion,
) -> SpatialResult<Route> {
    for node in [from, to] {
        if !graph.contains_node(node) {
            return Err(SpatialError::NodeNotFound(node));
        }
    }
    if from == to {
        return Ok(Route::single(from, criterion));
    }

    let n = graph.node_count();
    let mut dist      = vec![f64::INFINITY; n];
    let mut prev_edge = vec![EdgeId::INVALID; n];

    dist[from.index()] = 0.0;

    // Reverse turns the max-heap into a min-heap; NodeId is the tie-breaker.
    let mut heap: BinaryHeap<Reverse<(OrderedFloat<f64>, NodeId)>> = BinaryHeap::new();
    heap.push(Reverse((OrderedFloat(0.0), from)));

    while let Some(Reverse((OrderedFloat(cost), node))) = heap.pop() {
        if node == to {
            return Ok(reconstruct(graph, &prev_edge, from, to, cost, criterion));
        }

        // Stale entry.
        if cost > dist[node.index()] {
            continue;
        }

        for edge in graph.out_edges(node) {
            let neighbor = graph.edge_to[edge.index()];
            let new_cost = cost + graph.edge_weight(edge, criterion);

            if new_cost < dist[neighbor.index()] {
                dist[neighbor.index()] = new_cost;
                prev_edge[neighbor.index()] = edge;
                heap.push(Reverse((OrderedFloat(new_cost), neighbor)));
            }
        }
    }

    Err(SpatialError::NoRoute { from, to })
}

fn reconstruct(
    graph: &RouteGraph,
    prev_edge: &[EdgeId],
    from: NodeId,
    to: NodeId,
    total_cost: f64,
    criterion: OptimizationCriterion,
) -> Route {
    let mut edges = Vec::new();
    let mut nodes = vec![to];
    let mut cur = to;
    while cur != from {
        let e = prev_edge[cur.index()];
        edges.push(e);
        cur = graph.edge_from[e.index()];
        nodes.push(cur);
    }
    edges.reverse();
    nodes.reverse();
    Route { nodes, edges, criterion, total_cost }
}
