//! OSM PBF loader — enabled with the `osm` Cargo feature.
//!
//! # Usage
//!
//! ```ignore
//! use nav_spatial::osm::PbfProvider;
//!
//! let provider = PbfProvider::new("karnataka-latest.osm.pbf");
//! let graph = provider.fetch_graph(&region, TravelMode::Walk)?;
//! ```
//!
//! # What is loaded
//!
//! Ways accepted by [`way_access`] for the requested mode, clipped to the
//! requested region: a segment is kept only when both of its nodes lie
//! inside the box.
//!
//! # Memory note
//!
//! The loader buffers every node position of the file in one pass before it
//! knows which ones the ways reference.  For a state-sized extract that is
//! tens of millions of entries; use a city extract where possible.

use std::path::{Path, PathBuf};

use osmpbf::{Element, ElementReader};
use rustc_hash::FxHashMap;
use tracing::{info, instrument};

use nav_core::{BoundingBox, Coordinate, NavResult, TravelMode};

use crate::assemble::{OsmWay, assemble};
use crate::graph::RouteGraph;
use crate::provider::MapDataProvider;
use crate::tags::way_access;
use crate::{SpatialError, SpatialResult};

// ── Public entry points ───────────────────────────────────────────────────────

/// Load the street graph for `mode` from an OSM PBF file, optionally
/// clipped to `clip`.
///
/// # Errors
///
/// [`SpatialError::Osm`] on read or parse errors.
pub fn load_from_pbf(
    path: &Path,
    mode: TravelMode,
    clip: Option<&BoundingBox>,
) -> SpatialResult<RouteGraph> {
    let reader = ElementReader::from_path(path).map_err(|e| SpatialError::Osm(e.to_string()))?;

    let mut positions: FxHashMap<i64, Coordinate> = FxHashMap::default();
    let mut ways: Vec<OsmWay> = Vec::new();

    reader
        .for_each(|elem| match elem {
            Element::Node(n) => {
                if let Ok(pos) = Coordinate::new(n.lat(), n.lon()) {
                    positions.insert(n.id(), pos);
                }
            }
            Element::DenseNode(n) => {
                if let Ok(pos) = Coordinate::new(n.lat(), n.lon()) {
                    positions.insert(n.id(), pos);
                }
            }
            Element::Way(w) => {
                // Collect tags eagerly so &str lifetimes don't escape the closure.
                let tags: Vec<(&str, &str)> = w.tags().collect();
                if let Some(access) = way_access(mode, &tags) {
                    ways.push(OsmWay { refs: w.refs().collect(), access });
                }
            }
            Element::Relation(_) => {}
        })
        .map_err(|e| SpatialError::Osm(e.to_string()))?;

    info!(
        path = %path.display(),
        nodes = positions.len(),
        ways = ways.len(),
        %mode,
        "read PBF extract"
    );
    assemble(&positions, &ways, clip)
}

/// [`MapDataProvider`] backed by a local PBF extract.
///
/// The file is re-read on every request.
#[derive(Debug, Clone)]
pub struct PbfProvider {
    path: PathBuf,
}

impl PbfProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl MapDataProvider for PbfProvider {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    fn fetch_graph(&self, region: &BoundingBox, mode: TravelMode) -> NavResult<RouteGraph> {
        Ok(load_from_pbf(&self.path, mode, Some(region))?)
    }
}
