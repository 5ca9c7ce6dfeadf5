//! Route graph representation and builder.
//!
//! # Data layout
//!
//! The graph uses **Compressed Sparse Row (CSR)** format for outgoing edges.
//! Given a `NodeId n`, its outgoing edges occupy the slice:
//!
//! ```text
//! edge_to[ node_out_start[n] .. node_out_start[n+1] ]
//! ```
//!
//! All edge arrays (`edge_from`, `edge_to`, `edge_length_m`,
//! `edge_travel_secs`) are sorted by source node and indexed by `EdgeId`.
//! Within one source node, edges keep the order they were added in, which
//! the path search relies on for reproducible tie-breaking.
//!
//! # Spatial index
//!
//! An R-tree (via `rstar`) maps a coordinate to the nearest `NodeId`.  Points
//! are stored in a local equirectangular projection (longitude scaled by the
//! cosine of the graph's mean latitude) so that plain Euclidean distance in
//! the tree tracks ground distance at city scale.

use rstar::{AABB, PointDistance, RTree, RTreeObject};

use nav_core::{Coordinate, EdgeId, NodeId, OptimizationCriterion};

use crate::{SpatialError, SpatialResult};

// ── R-tree node entry ─────────────────────────────────────────────────────────

/// Entry stored in the R-tree: a projected `[x, y]` point and its node.
#[derive(Clone)]
struct NodeEntry {
    point: [f64; 2],
    id:    NodeId,
}

impl RTreeObject for NodeEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for NodeEntry {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        dx * dx + dy * dy
    }
}

// ── RouteGraph ────────────────────────────────────────────────────────────────

/// Directed street graph in CSR format plus a spatial index for snapping.
///
/// Column fields are `pub` for direct indexed access in the search loop.  Do
/// not construct directly; use [`RouteGraphBuilder`].
pub struct RouteGraph {
    // ── Node data ─────────────────────────────────────────────────────────
    /// Position of each node.  Indexed by `NodeId`.
    pub node_pos: Vec<Coordinate>,

    /// OpenStreetMap node id, when the graph was built from OSM data.
    pub node_osm_id: Vec<Option<i64>>,

    // ── CSR edge adjacency ────────────────────────────────────────────────
    /// CSR row pointer.  Length = `node_count + 1`.
    pub node_out_start: Vec<u32>,

    // ── Edge data (indexed by EdgeId = position in sorted order) ──────────
    /// Source node of each edge; needed to walk a route back from its end.
    pub edge_from: Vec<NodeId>,

    pub edge_to: Vec<NodeId>,

    /// Length of each edge in metres.
    pub edge_length_m: Vec<f64>,

    /// Estimated traversal time of each edge in seconds.
    pub edge_travel_secs: Vec<f64>,

    // ── Spatial index ─────────────────────────────────────────────────────
    cos_ref_lat: f64,
    spatial_idx: RTree<NodeEntry>,
}

impl RouteGraph {
    /// A graph with no nodes or edges.  Snapping against it yields `None`.
    pub fn empty() -> Self {
        Self {
            node_pos:         Vec::new(),
            node_osm_id:      Vec::new(),
            node_out_start:   vec![0],
            edge_from:        Vec::new(),
            edge_to:          Vec::new(),
            edge_length_m:    Vec::new(),
            edge_travel_secs: Vec::new(),
            cos_ref_lat:      1.0,
            spatial_idx:      RTree::new(),
        }
    }

    // ── Graph dimensions ──────────────────────────────────────────────────

    pub fn node_count(&self) -> usize {
        self.node_pos.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_to.len()
    }

    pub fn is_empty(&self) -> bool {
        self.node_pos.is_empty()
    }

    #[inline]
    pub fn contains_node(&self, node: NodeId) -> bool {
        node.index() < self.node_count()
    }

    // ── Graph traversal ───────────────────────────────────────────────────

    /// Iterator over the `EdgeId`s of all outgoing edges from `node`.
    #[inline]
    pub fn out_edges(&self, node: NodeId) -> impl Iterator<Item = EdgeId> + '_ {
        let start = self.node_out_start[node.index()] as usize;
        let end   = self.node_out_start[node.index() + 1] as usize;
        (start..end).map(|i| EdgeId(i as u32))
    }

    #[inline]
    pub fn out_degree(&self, node: NodeId) -> usize {
        let start = self.node_out_start[node.index()] as usize;
        let end   = self.node_out_start[node.index() + 1] as usize;
        end - start
    }

    /// Weight of `edge` under `criterion`.
    #[inline]
    pub fn edge_weight(&self, edge: EdgeId, criterion: OptimizationCriterion) -> f64 {
        match criterion {
            OptimizationCriterion::Length => self.edge_length_m[edge.index()],
            OptimizationCriterion::Time   => self.edge_travel_secs[edge.index()],
        }
    }

    pub fn osm_id(&self, node: NodeId) -> Option<i64> {
        self.node_osm_id.get(node.index()).copied().flatten()
    }

    // ── Spatial queries ───────────────────────────────────────────────────

    #[inline]
    fn project(&self, pos: Coordinate) -> [f64; 2] {
        [pos.lon() * self.cos_ref_lat, pos.lat()]
    }

    /// Return the `NodeId` of the node nearest to `pos`.
    ///
    /// Nodes at exactly the same distance resolve to the lowest `NodeId`.
    /// Returns `None` only if the graph has no nodes.
    pub fn snap_to_node(&self, pos: Coordinate) -> Option<NodeId> {
        let query = self.project(pos);
        let mut hits = self.spatial_idx.nearest_neighbor_iter_with_distance_2(&query);
        let (first, best) = hits.next()?;

        let mut id = first.id;
        for (entry, d2) in hits {
            if d2 > best {
                break;
            }
            id = id.min(entry.id);
        }
        Some(id)
    }
}

impl std::fmt::Debug for RouteGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouteGraph")
            .field("nodes", &self.node_count())
            .field("edges", &self.edge_count())
            .finish()
    }
}

// ── RouteGraphBuilder ─────────────────────────────────────────────────────────

/// Construct a [`RouteGraph`] incrementally, then call [`build`](Self::build).
///
/// # Example
///
/// ```
/// use nav_core::Coordinate;
/// use nav_spatial::RouteGraphBuilder;
///
/// let mut b = RouteGraphBuilder::new();
/// let a = b.add_node(Coordinate::new(13.93, 75.56).unwrap());
/// let c = b.add_node(Coordinate::new(13.94, 75.57).unwrap());
/// b.add_road(a, c, 1_200.0, 96.0); // 1.2 km at 45 km/h
/// let graph = b.build().unwrap();
/// assert_eq!(graph.node_count(), 2);
/// assert_eq!(graph.edge_count(), 2); // bidirectional
/// ```
pub struct RouteGraphBuilder {
    nodes:     Vec<Coordinate>,
    osm_ids:   Vec<Option<i64>>,
    raw_edges: Vec<RawEdge>,
}

struct RawEdge {
    from:        NodeId,
    to:          NodeId,
    length_m:    f64,
    travel_secs: f64,
}

impl RouteGraphBuilder {
    pub fn new() -> Self {
        Self { nodes: Vec::new(), osm_ids: Vec::new(), raw_edges: Vec::new() }
    }

    /// Pre-allocate for the expected number of nodes and edges.
    pub fn with_capacity(nodes: usize, edges: usize) -> Self {
        Self {
            nodes:     Vec::with_capacity(nodes),
            osm_ids:   Vec::with_capacity(nodes),
            raw_edges: Vec::with_capacity(edges),
        }
    }

    /// Add a node and return its `NodeId` (sequential from 0).
    pub fn add_node(&mut self, pos: Coordinate) -> NodeId {
        self.push_node(pos, None)
    }

    /// Add a node that originates from OSM node `osm_id`.
    pub fn add_osm_node(&mut self, osm_id: i64, pos: Coordinate) -> NodeId {
        self.push_node(pos, Some(osm_id))
    }

    fn push_node(&mut self, pos: Coordinate, osm_id: Option<i64>) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(pos);
        self.osm_ids.push(osm_id);
        id
    }

    /// Add a **directed** edge from `from` to `to`.
    ///
    /// Weights are checked in [`build`](Self::build): both must be finite
    /// and non-negative.
    pub fn add_directed_edge(&mut self, from: NodeId, to: NodeId, length_m: f64, travel_secs: f64) {
        self.raw_edges.push(RawEdge { from, to, length_m, travel_secs });
    }

    /// Add edges in **both directions** for a two-way road segment.
    pub fn add_road(&mut self, a: NodeId, b: NodeId, length_m: f64, travel_secs: f64) {
        self.add_directed_edge(a, b, length_m, travel_secs);
        self.add_directed_edge(b, a, length_m, travel_secs);
    }

    /// Position of a node added earlier.
    pub fn node_pos(&self, id: NodeId) -> Coordinate {
        self.nodes[id.index()]
    }

    pub fn node_count(&self) -> usize { self.nodes.len() }
    pub fn edge_count(&self) -> usize { self.raw_edges.len() }

    /// Consume the builder and produce a [`RouteGraph`].
    ///
    /// # Errors
    ///
    /// [`SpatialError::NodeNotFound`] if an edge references a node that was
    /// never added; [`SpatialError::InvalidWeight`] for a negative or
    /// non-finite weight.
    pub fn build(self) -> SpatialResult<RouteGraph> {
        let node_count = self.nodes.len();
        let edge_count = self.raw_edges.len();

        for e in &self.raw_edges {
            for end in [e.from, e.to] {
                if end.index() >= node_count {
                    return Err(SpatialError::NodeNotFound(end));
                }
            }
            let valid = |w: f64| w.is_finite() && w >= 0.0;
            if !valid(e.length_m) || !valid(e.travel_secs) {
                return Err(SpatialError::InvalidWeight {
                    from:        e.from,
                    to:          e.to,
                    length_m:    e.length_m,
                    travel_secs: e.travel_secs,
                });
            }
        }

        // Stable sort: edges of one source node keep their insertion order.
        let mut raw = self.raw_edges;
        raw.sort_by_key(|e| e.from.0);

        let edge_from:        Vec<NodeId> = raw.iter().map(|e| e.from).collect();
        let edge_to:          Vec<NodeId> = raw.iter().map(|e| e.to).collect();
        let edge_length_m:    Vec<f64>    = raw.iter().map(|e| e.length_m).collect();
        let edge_travel_secs: Vec<f64>    = raw.iter().map(|e| e.travel_secs).collect();

        let mut node_out_start = vec![0u32; node_count + 1];
        for e in &raw {
            node_out_start[e.from.index() + 1] += 1;
        }
        for i in 1..=node_count {
            node_out_start[i] += node_out_start[i - 1];
        }
        debug_assert_eq!(node_out_start[node_count] as usize, edge_count);

        let cos_ref_lat = if node_count == 0 {
            1.0
        } else {
            let mean_lat = self.nodes.iter().map(|p| p.lat()).sum::<f64>() / node_count as f64;
            mean_lat.to_radians().cos().max(0.01)
        };

        let entries: Vec<NodeEntry> = self
            .nodes
            .iter()
            .enumerate()
            .map(|(i, pos)| NodeEntry {
                point: [pos.lon() * cos_ref_lat, pos.lat()],
                id:    NodeId(i as u32),
            })
            .collect();
        let spatial_idx = RTree::bulk_load(entries);

        Ok(RouteGraph {
            node_pos: self.nodes,
            node_osm_id: self.osm_ids,
            node_out_start,
            edge_from,
            edge_to,
            edge_length_m,
            edge_travel_secs,
            cos_ref_lat,
            spatial_idx,
        })
    }
}

impl Default for RouteGraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}
