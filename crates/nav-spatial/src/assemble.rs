//! Shared OSM → graph assembly for the Overpass and PBF loaders.

use rustc_hash::FxHashMap;
use tracing::debug;

use nav_core::{BoundingBox, Coordinate, NodeId};

use crate::graph::{RouteGraph, RouteGraphBuilder};
use crate::tags::WayAccess;
use crate::SpatialResult;

/// A way that passed the mode filter: its node sequence and access rules.
pub(crate) struct OsmWay {
    pub refs:   Vec<i64>,
    pub access: WayAccess,
}

/// Build a graph from OSM node positions and filtered ways.
///
/// - Graph nodes are created only for way-referenced OSM nodes that have a
///   known position (and lie inside `clip`, if given), numbered in order of
///   first appearance so identical input always yields identical `NodeId`s.
/// - Each consecutive pair of way nodes becomes one edge per permitted
///   direction; pairs with a missing endpoint are skipped.
pub(crate) fn assemble(
    positions: &FxHashMap<i64, Coordinate>,
    ways: &[OsmWay],
    clip: Option<&BoundingBox>,
) -> SpatialResult<RouteGraph> {
    let estimate = ways.iter().map(|w| w.refs.len()).sum::<usize>();
    let mut builder = RouteGraphBuilder::with_capacity(estimate, estimate * 2);
    let mut osm_to_graph: FxHashMap<i64, NodeId> = FxHashMap::default();

    for way in ways {
        for osm_id in &way.refs {
            if osm_to_graph.contains_key(osm_id) {
                continue;
            }
            let Some(&pos) = positions.get(osm_id) else {
                continue;
            };
            if clip.is_some_and(|bbox| !bbox.contains(pos)) {
                continue;
            }
            osm_to_graph.insert(*osm_id, builder.add_osm_node(*osm_id, pos));
        }
    }

    for way in ways {
        let speed_mps = way.access.speed_mps();
        for window in way.refs.windows(2) {
            let (Some(&a), Some(&b)) = (osm_to_graph.get(&window[0]), osm_to_graph.get(&window[1]))
            else {
                continue;
            };
            let length_m = builder.node_pos(a).distance_m(builder.node_pos(b));
            let travel_secs = length_m / speed_mps;

            if way.access.direction.allows_forward() {
                builder.add_directed_edge(a, b, length_m, travel_secs);
            }
            if way.access.direction.allows_backward() {
                builder.add_directed_edge(b, a, length_m, travel_secs);
            }
        }
    }

    debug!(
        ways = ways.len(),
        nodes = builder.node_count(),
        edges = builder.edge_count(),
        "assembled street graph"
    );
    builder.build()
}
