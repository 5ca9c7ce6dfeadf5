//! Unit tests for nav-spatial.
//!
//! All tests use hand-crafted graphs or canned Overpass bodies, so they run
//! without network access or an OSM file.

#[cfg(test)]
mod helpers {
    use nav_core::{Coordinate, NodeId};
    use crate::{RouteGraph, RouteGraphBuilder};

    pub fn c(lat: f64, lon: f64) -> Coordinate {
        Coordinate::new(lat, lon).unwrap()
    }

    /// The three-node triangle:
    ///
    /// ```text
    ///   A(0,0) ── B(0,1) ── C(1,1)     A–B: 1 m, 2 s
    ///     └──────────────────┘         B–C: 1 m, 1 s
    ///                                  A–C: 3 m, 1 s
    /// ```
    ///
    /// By length A→B→C (2) beats A→C (3); by time A→C (1) beats A→B→C (3).
    pub fn triangle() -> (RouteGraph, [NodeId; 3]) {
        let mut b = RouteGraphBuilder::new();
        let a = b.add_node(c(0.0, 0.0));
        let bb = b.add_node(c(0.0, 1.0));
        let cc = b.add_node(c(1.0, 1.0));
        b.add_road(a, bb, 1.0, 2.0);
        b.add_road(bb, cc, 1.0, 1.0);
        b.add_road(a, cc, 3.0, 1.0);
        (b.build().unwrap(), [a, bb, cc])
    }

    /// Five nodes, two routes from n0 to n4:
    ///
    /// ```text
    ///   n0 ── n1 ── n2
    ///   │            │
    ///   n3 ───────── n4
    /// ```
    ///
    /// Via n1/n2: 300 m, 30 s.  Via n3: 600 m, 60 s.
    pub fn grid() -> (RouteGraph, [NodeId; 5]) {
        let mut b = RouteGraphBuilder::new();
        let n0 = b.add_node(c(0.0, 0.0));
        let n1 = b.add_node(c(0.0, 1.0));
        let n2 = b.add_node(c(0.0, 2.0));
        let n3 = b.add_node(c(1.0, 0.0));
        let n4 = b.add_node(c(1.0, 2.0));
        b.add_road(n0, n1, 100.0, 10.0);
        b.add_road(n1, n2, 100.0, 10.0);
        b.add_road(n2, n4, 100.0, 10.0);
        b.add_road(n0, n3, 500.0, 50.0);
        b.add_road(n3, n4, 100.0, 10.0);
        (b.build().unwrap(), [n0, n1, n2, n3, n4])
    }

    /// Every simple path from `from` to `to`, with its cost.
    pub fn all_simple_paths(
        graph: &RouteGraph,
        from: NodeId,
        to: NodeId,
        criterion: nav_core::OptimizationCriterion,
    ) -> Vec<(Vec<NodeId>, f64)> {
        fn walk(
            graph: &RouteGraph,
            at: NodeId,
            to: NodeId,
            criterion: nav_core::OptimizationCriterion,
            path: &mut Vec<NodeId>,
            cost: f64,
            out: &mut Vec<(Vec<NodeId>, f64)>,
        ) {
            if at == to {
                out.push((path.clone(), cost));
                return;
            }
            for e in graph.out_edges(at) {
                let next = graph.edge_to[e.index()];
                if path.contains(&next) {
                    continue;
                }
                path.push(next);
                walk(graph, next, to, criterion, path, cost + graph.edge_weight(e, criterion), out);
                path.pop();
            }
        }
        let mut out = Vec::new();
        walk(graph, from, to, criterion, &mut vec![from], 0.0, &mut out);
        out
    }
}

// ── Builder & graph structure ─────────────────────────────────────────────────

#[cfg(test)]
mod builder {
    use nav_core::{NodeId, OptimizationCriterion};
    use crate::{DijkstraRouter, RouteGraph, RouteGraphBuilder, Router, SpatialError};
    use super::helpers::c;

    #[test]
    fn empty_build() {
        let graph = RouteGraphBuilder::new().build().unwrap();
        assert_eq!(graph.node_count(), 0);
        assert_eq!(graph.edge_count(), 0);
        assert!(graph.is_empty());
        assert!(RouteGraph::empty().is_empty());
    }

    #[test]
    fn single_road_is_bidirectional() {
        let mut b = RouteGraphBuilder::new();
        let a = b.add_node(c(13.93, 75.56));
        let z = b.add_node(c(13.94, 75.56));
        b.add_road(a, z, 1_100.0, 88.0);
        let graph = b.build().unwrap();
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 2);
    }

    #[test]
    fn csr_out_edges() {
        let (graph, [n0, n1, n2, n3, n4]) = super::helpers::grid();
        assert_eq!(graph.out_degree(n0), 2);
        assert_eq!(graph.out_degree(n1), 2);
        assert_eq!(graph.out_degree(n2), 2);
        assert_eq!(graph.out_degree(n3), 2);
        assert_eq!(graph.out_degree(n4), 2);
        for e in graph.out_edges(n0) {
            assert_eq!(graph.edge_from[e.index()], n0);
        }
    }

    #[test]
    fn insertion_order_kept_within_node() {
        let (graph, [n0, n1, _, n3, _]) = super::helpers::grid();
        let targets: Vec<_> = graph.out_edges(n0).map(|e| graph.edge_to[e.index()]).collect();
        assert_eq!(targets, vec![n1, n3]);
    }

    #[test]
    fn directed_only_edge() {
        let mut b = RouteGraphBuilder::new();
        let a = b.add_node(c(0.0, 0.0));
        let z = b.add_node(c(0.0, 1.0));
        b.add_directed_edge(a, z, 100.0, 10.0);
        let graph = b.build().unwrap();
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.out_degree(a), 1);
        assert_eq!(graph.out_degree(z), 0);
    }

    #[test]
    fn rejects_negative_and_nan_weights() {
        let mut b = RouteGraphBuilder::new();
        let a = b.add_node(c(0.0, 0.0));
        let z = b.add_node(c(0.0, 1.0));
        b.add_directed_edge(a, z, -1.0, 10.0);
        assert!(matches!(b.build(), Err(SpatialError::InvalidWeight { .. })));

        let mut b = RouteGraphBuilder::new();
        let a = b.add_node(c(0.0, 0.0));
        let z = b.add_node(c(0.0, 1.0));
        b.add_directed_edge(a, z, 1.0, f64::NAN);
        assert!(matches!(b.build(), Err(SpatialError::InvalidWeight { .. })));
    }

    #[test]
    fn rejects_unknown_endpoint() {
        let mut b = RouteGraphBuilder::new();
        let a = b.add_node(c(0.0, 0.0));
        b.add_directed_edge(a, NodeId(9), 1.0, 1.0);
        assert!(matches!(b.build(), Err(SpatialError::NodeNotFound(NodeId(9)))));
    }

    #[test]
    fn parallel_edges_route_over_the_cheaper_one() {
        let mut b = RouteGraphBuilder::new();
        let a = b.add_node(c(0.0, 0.0));
        let z = b.add_node(c(0.0, 1.0));
        b.add_directed_edge(a, z, 10.0, 1.0);
        b.add_directed_edge(a, z, 5.0, 9.0);
        let graph = b.build().unwrap();

        let by_len = DijkstraRouter.route(&graph, a, z, OptimizationCriterion::Length).unwrap();
        let by_time = DijkstraRouter.route(&graph, a, z, OptimizationCriterion::Time).unwrap();
        assert_eq!(by_len.total_length_m(&graph), 5.0);
        assert_eq!(by_time.total_travel_secs(&graph), 1.0);
        assert_ne!(by_len.edges, by_time.edges);
    }

    #[test]
    fn osm_ids_are_tracked() {
        let mut b = RouteGraphBuilder::new();
        let plain = b.add_node(c(0.0, 0.0));
        let tagged = b.add_osm_node(4_242, c(0.0, 1.0));
        let graph = b.build().unwrap();
        assert_eq!(graph.osm_id(plain), None);
        assert_eq!(graph.osm_id(tagged), Some(4_242));
    }
}

// ── Spatial snap ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod snap {
    use crate::{RouteGraph, RouteGraphBuilder};
    use super::helpers::c;

    #[test]
    fn snap_exact_position() {
        let (graph, [n0, ..]) = super::helpers::grid();
        assert_eq!(graph.snap_to_node(c(0.0, 0.0)), Some(n0));
    }

    #[test]
    fn snap_nearest() {
        let (graph, [n0, n1, ..]) = super::helpers::grid();
        assert_eq!(graph.snap_to_node(c(0.0, 0.4)), Some(n0));
        assert_eq!(graph.snap_to_node(c(0.0, 0.6)), Some(n1));
    }

    #[test]
    fn equidistant_snaps_to_lowest_id() {
        let mut b = RouteGraphBuilder::new();
        let east = b.add_node(c(0.0, 1.0));
        let _west = b.add_node(c(0.0, -1.0));
        let graph = b.build().unwrap();
        assert_eq!(graph.snap_to_node(c(0.0, 0.0)), Some(east));
    }

    #[test]
    fn longitude_is_scaled_by_latitude() {
        // At 60°N a degree of longitude is half a degree of latitude on the
        // ground, so the node 0.15° east is closer than the one 0.1° north.
        let mut b = RouteGraphBuilder::new();
        let north = b.add_node(c(60.1, 10.0));
        let east = b.add_node(c(60.0, 10.15));
        let graph = b.build().unwrap();
        assert_eq!(graph.snap_to_node(c(60.0, 10.0)), Some(east));
        assert_ne!(graph.snap_to_node(c(60.0, 10.0)), Some(north));
    }

    #[test]
    fn empty_graph_returns_none() {
        assert!(RouteGraph::empty().snap_to_node(c(0.0, 0.0)).is_none());
    }
}

// ── Dijkstra routing ──────────────────────────────────────────────────────────

#[cfg(test)]
mod routing {
    use nav_core::{NodeId, OptimizationCriterion};
    use crate::{DijkstraRouter, RouteGraphBuilder, Router, SpatialError};
    use super::helpers::c;

    #[test]
    fn same_node_is_single_node_route() {
        let (graph, [n0, ..]) = super::helpers::grid();
        let r = DijkstraRouter.route(&graph, n0, n0, OptimizationCriterion::Length).unwrap();
        assert!(r.is_trivial());
        assert_eq!(r.nodes, vec![n0]);
        assert_eq!(r.total_cost, 0.0);
    }

    #[test]
    fn shortest_path_correct() {
        let (graph, [n0, n1, n2, _, n4]) = super::helpers::grid();
        let route = DijkstraRouter.route(&graph, n0, n4, OptimizationCriterion::Time).unwrap();

        assert_eq!(route.nodes, vec![n0, n1, n2, n4]);
        assert_eq!(route.edges.len(), 3);
        assert_eq!(route.total_cost, 30.0);
        assert_eq!(route.total_length_m(&graph), 300.0);
        assert_eq!(route.total_travel_secs(&graph), 30.0);
        assert_eq!(graph.edge_from[route.edges[0].index()], n0);
        assert_eq!(graph.edge_to[route.edges[2].index()], n4);
    }

    #[test]
    fn consecutive_nodes_are_joined_by_route_edges() {
        let (graph, [n0, .., n4]) = super::helpers::grid();
        let route = DijkstraRouter.route(&graph, n0, n4, OptimizationCriterion::Length).unwrap();
        assert_eq!(route.nodes.len(), route.edges.len() + 1);
        for (i, e) in route.edges.iter().enumerate() {
            assert_eq!(graph.edge_from[e.index()], route.nodes[i]);
            assert_eq!(graph.edge_to[e.index()], route.nodes[i + 1]);
        }
    }

    #[test]
    fn no_route_disconnected() {
        let mut b = RouteGraphBuilder::new();
        let a = b.add_node(c(0.0, 0.0));
        let z = b.add_node(c(1.0, 0.0));
        let graph = b.build().unwrap();
        let result = DijkstraRouter.route(&graph, a, z, OptimizationCriterion::Length);
        assert!(matches!(result, Err(SpatialError::NoRoute { .. })));
    }

    #[test]
    fn directed_one_way_blocks_return() {
        let mut b = RouteGraphBuilder::new();
        let a = b.add_node(c(0.0, 0.0));
        let z = b.add_node(c(0.0, 1.0));
        b.add_directed_edge(a, z, 100.0, 10.0);
        let graph = b.build().unwrap();

        assert!(DijkstraRouter.route(&graph, a, z, OptimizationCriterion::Length).is_ok());
        assert!(DijkstraRouter.route(&graph, z, a, OptimizationCriterion::Length).is_err());
    }

    #[test]
    fn unknown_node_is_rejected() {
        let (graph, [n0, ..]) = super::helpers::grid();
        let result = DijkstraRouter.route(&graph, n0, NodeId(99), OptimizationCriterion::Length);
        assert!(matches!(result, Err(SpatialError::NodeNotFound(NodeId(99)))));
    }

    #[test]
    fn equal_cost_tie_resolves_to_lower_node_first() {
        // Square with two equal 2 m routes 0→1→3 and 0→2→3.
        let mut b = RouteGraphBuilder::new();
        let n0 = b.add_node(c(0.0, 0.0));
        let n1 = b.add_node(c(0.0, 1.0));
        let n2 = b.add_node(c(1.0, 0.0));
        let n3 = b.add_node(c(1.0, 1.0));
        b.add_road(n0, n2, 1.0, 1.0);
        b.add_road(n0, n1, 1.0, 1.0);
        b.add_road(n1, n3, 1.0, 1.0);
        b.add_road(n2, n3, 1.0, 1.0);
        let graph = b.build().unwrap();

        let first = DijkstraRouter.route(&graph, n0, n3, OptimizationCriterion::Length).unwrap();
        let second = DijkstraRouter.route(&graph, n0, n3, OptimizationCriterion::Length).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.nodes, vec![n0, n1, n3]);
    }

    #[test]
    fn matches_brute_force_optimum() {
        // Small dense graph with one-ways and uneven weights.
        let mut b = RouteGraphBuilder::new();
        let n: Vec<NodeId> = (0..6).map(|i| b.add_node(c(0.0, i as f64 * 0.01))).collect();
        let edges = [
            (0, 1, 7.0, 3.0), (0, 2, 9.0, 2.0), (0, 5, 14.0, 4.0),
            (1, 2, 10.0, 1.0), (1, 3, 15.0, 6.0), (2, 3, 11.0, 5.0),
            (2, 5, 2.0, 9.0), (3, 4, 6.0, 2.0), (5, 4, 9.0, 1.0),
        ];
        for (a, z, len, secs) in edges {
            b.add_road(n[a], n[z], len, secs);
        }
        b.add_directed_edge(n[4], n[0], 1.0, 1.0);
        let graph = b.build().unwrap();

        for criterion in OptimizationCriterion::ALL {
            for &from in &n {
                for &to in &n {
                    let paths = super::helpers::all_simple_paths(&graph, from, to, criterion);
                    let best = paths.iter().map(|(_, cost)| *cost).fold(f64::INFINITY, f64::min);
                    let route = DijkstraRouter.route(&graph, from, to, criterion).unwrap();
                    assert!(
                        (route.total_cost - best).abs() < 1e-9,
                        "{criterion} {from}->{to}: dijkstra {} vs brute force {best}",
                        route.total_cost
                    );
                    assert!(paths.iter().any(|(p, _)| *p == route.nodes));
                }
            }
        }
    }
}

// ── RouteFinder ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod finder {
    use nav_core::{NavError, OptimizationCriterion};
    use crate::{RouteFinder, RouteGraph, RouteGraphBuilder, find_route};
    use super::helpers::c;

    #[test]
    fn length_prefers_two_short_hops() {
        let (graph, [a, b, cc]) = super::helpers::triangle();
        let route = find_route(&graph, c(0.0, 0.0), c(1.0, 1.0), OptimizationCriterion::Length).unwrap();
        assert_eq!(route.nodes, vec![a, b, cc]);
        assert_eq!(route.total_cost, 2.0);
    }

    #[test]
    fn time_prefers_direct_edge() {
        let (graph, [a, _, cc]) = super::helpers::triangle();
        let route = find_route(&graph, c(0.0, 0.0), c(1.0, 1.0), OptimizationCriterion::Time).unwrap();
        assert_eq!(route.nodes, vec![a, cc]);
        assert_eq!(route.total_cost, 1.0);
        assert_eq!(route.total_length_m(&graph), 3.0);
    }

    #[test]
    fn endpoints_snap_before_search() {
        let (graph, [a, b, cc]) = super::helpers::triangle();
        let route = find_route(&graph, c(0.05, -0.02), c(0.97, 1.01), OptimizationCriterion::Length).unwrap();
        assert_eq!(route.nodes, vec![a, b, cc]);
    }

    #[test]
    fn both_ends_on_one_node_gives_single_node_route() {
        let (graph, [a, ..]) = super::helpers::triangle();
        let route = find_route(&graph, c(0.01, 0.0), c(0.0, 0.02), OptimizationCriterion::Time).unwrap();
        assert!(route.is_trivial());
        assert_eq!(route.nodes, vec![a]);
    }

    #[test]
    fn repeated_calls_agree() {
        let (graph, _) = super::helpers::grid();
        let finder = RouteFinder::new();
        let first = finder.find(&graph, c(0.0, 0.0), c(1.0, 2.0), OptimizationCriterion::Length).unwrap();
        let again = finder.find(&graph, c(0.0, 0.0), c(1.0, 2.0), OptimizationCriterion::Length).unwrap();
        assert_eq!(first, again);
    }

    #[test]
    fn disconnected_components_give_no_route_found() {
        let mut b = RouteGraphBuilder::new();
        let a = b.add_node(c(0.0, 0.0));
        let a2 = b.add_node(c(0.0, 0.1));
        let z = b.add_node(c(1.0, 1.0));
        let z2 = b.add_node(c(1.0, 1.1));
        b.add_road(a, a2, 10.0, 1.0);
        b.add_road(z, z2, 10.0, 1.0);
        let graph = b.build().unwrap();

        let err = find_route(&graph, c(0.0, 0.0), c(1.0, 1.0), OptimizationCriterion::Length).unwrap_err();
        assert!(matches!(err, NavError::NoRouteFound { from, to } if from == a && to == z));
    }

    #[test]
    fn empty_graph_is_unavailable() {
        let err = find_route(&RouteGraph::empty(), c(0.0, 0.0), c(1.0, 1.0), OptimizationCriterion::Length)
            .unwrap_err();
        assert!(matches!(err, NavError::GraphUnavailable { .. }));
    }
}

// ── OSM tag rules ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod tags {
    use nav_core::TravelMode;
    use crate::tags::{Direction, parse_maxspeed_kmh, way_access};

    #[test]
    fn drive_skips_footways_and_private_roads() {
        assert!(way_access(TravelMode::Drive, &[("highway", "footway")]).is_none());
        assert!(way_access(TravelMode::Drive, &[("highway", "residential"), ("access", "private")]).is_none());
        assert!(way_access(TravelMode::Drive, &[("highway", "service"), ("service", "driveway")]).is_none());
        assert!(way_access(TravelMode::Drive, &[("highway", "service")]).is_some());
        assert!(way_access(TravelMode::Drive, &[("building", "yes")]).is_none());
    }

    #[test]
    fn mode_tag_overrides_general_access() {
        let path = [("highway", "path"), ("access", "no"), ("foot", "designated")];
        assert!(way_access(TravelMode::Walk, &path).is_some());
        assert!(way_access(TravelMode::Bike, &path).is_none());

        let estate = [("highway", "residential"), ("access", "private"), ("motor_vehicle", "yes")];
        assert!(way_access(TravelMode::Drive, &estate).is_some());
        assert!(way_access(TravelMode::Walk, &estate).is_none());

        let cycle_only = [("highway", "track"), ("access", "no"), ("bicycle", "yes")];
        assert!(way_access(TravelMode::Bike, &cycle_only).is_some());

        // motorcar is more specific than motor_vehicle.
        let no_cars = [("highway", "residential"), ("motor_vehicle", "yes"), ("motorcar", "no")];
        assert!(way_access(TravelMode::Drive, &no_cars).is_none());

        let closed = [("highway", "footway"), ("access", "yes"), ("foot", "private")];
        assert!(way_access(TravelMode::Walk, &closed).is_none());
    }

    #[test]
    fn drive_uses_maxspeed_then_class_default() {
        let plain = way_access(TravelMode::Drive, &[("highway", "residential")]).unwrap();
        assert_eq!(plain.speed_kmh, 30.0);
        let signed = way_access(TravelMode::Drive, &[("highway", "residential"), ("maxspeed", "40")]).unwrap();
        assert_eq!(signed.speed_kmh, 40.0);
    }

    #[test]
    fn drive_one_way_rules() {
        let fwd = way_access(TravelMode::Drive, &[("highway", "primary"), ("oneway", "yes")]).unwrap();
        assert_eq!(fwd.direction, Direction::Forward);
        let back = way_access(TravelMode::Drive, &[("highway", "primary"), ("oneway", "-1")]).unwrap();
        assert_eq!(back.direction, Direction::Backward);
        let ring = way_access(TravelMode::Drive, &[("highway", "tertiary"), ("junction", "roundabout")]).unwrap();
        assert_eq!(ring.direction, Direction::Forward);
        let motorway = way_access(TravelMode::Drive, &[("highway", "motorway")]).unwrap();
        assert_eq!(motorway.direction, Direction::Forward);
        let two_way = way_access(TravelMode::Drive, &[("highway", "motorway"), ("oneway", "no")]).unwrap();
        assert_eq!(two_way.direction, Direction::Both);
    }

    #[test]
    fn walk_ignores_one_way_and_avoids_motorways() {
        let w = way_access(TravelMode::Walk, &[("highway", "primary"), ("oneway", "yes")]).unwrap();
        assert_eq!(w.direction, Direction::Both);
        assert_eq!(w.speed_kmh, 5.0);
        assert!(way_access(TravelMode::Walk, &[("highway", "motorway")]).is_none());
        assert!(way_access(TravelMode::Walk, &[("highway", "trunk")]).is_none());
        assert!(way_access(TravelMode::Walk, &[("highway", "trunk"), ("foot", "yes")]).is_some());
        assert!(way_access(TravelMode::Walk, &[("highway", "footway")]).is_some());
        assert!(way_access(TravelMode::Walk, &[("highway", "path"), ("foot", "no")]).is_none());
    }

    #[test]
    fn bike_contraflow_and_footways() {
        let contra = way_access(
            TravelMode::Bike,
            &[("highway", "residential"), ("oneway", "yes"), ("oneway:bicycle", "no")],
        )
        .unwrap();
        assert_eq!(contra.direction, Direction::Both);
        assert!(way_access(TravelMode::Bike, &[("highway", "footway")]).is_none());
        assert!(way_access(TravelMode::Bike, &[("highway", "pedestrian")]).is_none());
        assert!(way_access(TravelMode::Bike, &[("highway", "footway"), ("bicycle", "designated")]).is_some());
        assert!(way_access(TravelMode::Bike, &[("highway", "cycleway")]).is_some());
        assert!(way_access(TravelMode::Bike, &[("highway", "trunk")]).is_some());
    }

    #[test]
    fn bike_speed_capped_by_road() {
        let cruise = way_access(TravelMode::Bike, &[("highway", "primary")]).unwrap();
        assert_eq!(cruise.speed_kmh, 15.0);
        let slow = way_access(TravelMode::Bike, &[("highway", "living_street")]).unwrap();
        assert_eq!(slow.speed_kmh, 10.0);
    }

    #[test]
    fn maxspeed_forms() {
        assert_eq!(parse_maxspeed_kmh("50"), Some(50.0));
        assert_eq!(parse_maxspeed_kmh("50 km/h"), Some(50.0));
        assert_eq!(parse_maxspeed_kmh("60;40"), Some(60.0));
        let mph = parse_maxspeed_kmh("30 mph").unwrap();
        assert!((mph - 48.280_32).abs() < 1e-6);
        assert_eq!(parse_maxspeed_kmh("none"), None);
        assert_eq!(parse_maxspeed_kmh("RU:urban"), None);
        assert_eq!(parse_maxspeed_kmh("0"), None);
    }
}

// ── Overpass response handling ────────────────────────────────────────────────

#[cfg(test)]
mod overpass {
    use std::time::Duration;

    use nav_core::{BoundingBox, NavError, NodeId, OptimizationCriterion, TravelMode};
    use crate::find_route;
    use crate::overpass::{build_query, graph_from_response, parse_response};
    use super::helpers::c;

    const BODY: &str = r#"{
        "version": 0.6,
        "elements": [
            {"type": "node", "id": 1, "lat": 13.930, "lon": 75.560},
            {"type": "node", "id": 2, "lat": 13.931, "lon": 75.560},
            {"type": "node", "id": 3, "lat": 13.932, "lon": 75.560},
            {"type": "node", "id": 4, "lat": 13.932, "lon": 75.561, "tags": {"highway": "crossing"}},
            {"type": "way", "id": 10, "nodes": [1, 2, 3], "tags": {"highway": "residential"}},
            {"type": "way", "id": 11, "nodes": [3, 4], "tags": {"highway": "primary", "oneway": "yes"}},
            {"type": "way", "id": 12, "nodes": [2, 4], "tags": {"highway": "footway"}},
            {"type": "way", "id": 13, "nodes": [4, 99], "tags": {"highway": "residential"}},
            {"type": "relation", "id": 77, "members": []}
        ]
    }"#;

    #[test]
    fn parses_and_ignores_relations() {
        let response = parse_response(BODY).unwrap();
        assert_eq!(response.elements.len(), 9);
        assert!(response.remark.is_none());
    }

    #[test]
    fn malformed_body_is_an_error() {
        assert!(parse_response("<html>rate limited</html>").is_err());
    }

    #[test]
    fn drive_graph_respects_filters_and_one_ways() {
        let graph = graph_from_response(&parse_response(BODY).unwrap(), TravelMode::Drive).unwrap();
        // Way 10 both ways (4), way 11 forward only (1), footway skipped,
        // way 13 references a node that is not in the response.
        assert_eq!(graph.node_count(), 4);
        assert_eq!(graph.edge_count(), 5);
        assert_eq!(graph.osm_id(NodeId(0)), Some(1));
        assert_eq!(graph.osm_id(NodeId(3)), Some(4));

        let length = graph.edge_length_m[0];
        assert!((length - 111.2).abs() < 1.0, "got {length}");
    }

    #[test]
    fn walk_graph_includes_footway_in_both_directions() {
        let graph = graph_from_response(&parse_response(BODY).unwrap(), TravelMode::Walk).unwrap();
        assert_eq!(graph.edge_count(), 8);
        let walk_secs = graph.edge_travel_secs[0];
        let expected = graph.edge_length_m[0] / (5.0 / 3.6);
        assert!((walk_secs - expected).abs() < 1e-9);
    }

    #[test]
    fn one_way_exit_has_no_return_by_car() {
        let graph = graph_from_response(&parse_response(BODY).unwrap(), TravelMode::Drive).unwrap();
        let out = find_route(&graph, c(13.930, 75.560), c(13.932, 75.561), OptimizationCriterion::Time);
        assert_eq!(out.unwrap().nodes.len(), 4);
        let back = find_route(&graph, c(13.932, 75.561), c(13.930, 75.560), OptimizationCriterion::Time);
        assert!(matches!(back, Err(NavError::NoRouteFound { .. })));

        let walk = graph_from_response(&parse_response(BODY).unwrap(), TravelMode::Walk).unwrap();
        let back = find_route(&walk, c(13.932, 75.561), c(13.930, 75.560), OptimizationCriterion::Length);
        assert!(back.is_ok());
    }

    #[test]
    fn query_mentions_region_and_mode_filter() {
        let region = BoundingBox::covering(c(13.90, 75.50), c(13.95, 75.60));
        let drive = build_query(&region, TravelMode::Drive, Duration::from_secs(90));
        assert!(drive.starts_with("[out:json][timeout:90];"));
        assert!(drive.contains("13.9000000,75.5000000,13.9500000,75.6000000"));
        assert!(drive.contains("residential"));
        assert!(!drive.contains("footway"));
        assert!(drive.contains("(._;>;);"));

        let bike = build_query(&region, TravelMode::Bike, Duration::from_secs(90));
        assert!(bike.contains(r#"["highway"!~"#));
        assert!(bike.contains("motorway"));
    }
}
