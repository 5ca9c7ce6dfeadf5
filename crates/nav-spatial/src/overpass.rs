//! Overpass API query text and response → [`RouteGraph`].
//!
//! The HTTP round-trip lives in `nav-providers`; this module only knows the
//! query language and the `[out:json]` response shape, so it can be
//! exercised on canned responses.

use std::collections::BTreeMap;
use std::time::Duration;

use rustc_hash::FxHashMap;
use serde::Deserialize;
use tracing::{debug, info};

use nav_core::{BoundingBox, Coordinate, TravelMode};

use crate::assemble::{OsmWay, assemble};
use crate::graph::RouteGraph;
use crate::tags::{DRIVE_SPEEDS_KMH, excluded_highways, way_access};
use crate::SpatialResult;

// ── Response model ────────────────────────────────────────────────────────────

/// Body of an Overpass `[out:json]` answer.
#[derive(Debug, Deserialize)]
pub struct OverpassResponse {
    #[serde(default)]
    pub elements: Vec<OverpassElement>,

    /// Set when the server gave up part-way (timeout, memory limit).
    #[serde(default)]
    pub remark: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum OverpassElement {
    Node {
        id:  i64,
        lat: f64,
        lon: f64,
    },
    Way {
        id: i64,
        #[serde(default)]
        nodes: Vec<i64>,
        #[serde(default)]
        tags: BTreeMap<String, String>,
    },
    #[serde(other)]
    Other,
}

pub fn parse_response(body: &str) -> SpatialResult<OverpassResponse> {
    Ok(serde_json::from_str(body)?)
}

// ── Query ─────────────────────────────────────────────────────────────────────

/// Overpass QL selecting the ways `mode` may use inside `region`, plus all
/// of their nodes.
///
/// `server_timeout` becomes the `[timeout:N]` setting so the server stops at
/// roughly the same point the client would.
pub fn build_query(region: &BoundingBox, mode: TravelMode, server_timeout: Duration) -> String {
    let highway_filter = match mode {
        TravelMode::Drive => {
            let classes: Vec<&str> = DRIVE_SPEEDS_KMH.iter().map(|(c, _)| *c).collect();
            format!(r#"["highway"~"^({})$"]"#, classes.join("|"))
        }
        TravelMode::Walk | TravelMode::Bike => {
            format!(r#"["highway"]["highway"!~"^({})$"]"#, excluded_highways(mode).join("|"))
        }
    };

    format!(
        "[out:json][timeout:{timeout}];\n\
         (\n  way{highway_filter}[\"area\"!~\"yes\"]({region});\n);\n\
         (._;>;);\n\
         out body;",
        timeout = server_timeout.as_secs().max(1),
    )
}

// ── Graph construction ────────────────────────────────────────────────────────

/// Build a graph for `mode` from a parsed Overpass response.
///
/// Ways are re-checked against [`way_access`]; the server-side filter is
/// only a bandwidth optimisation.  Nodes with out-of-range coordinates are
/// treated as missing.
pub fn graph_from_response(response: &OverpassResponse, mode: TravelMode) -> SpatialResult<RouteGraph> {
    let mut positions: FxHashMap<i64, Coordinate> = FxHashMap::default();
    let mut ways: Vec<OsmWay> = Vec::new();

    for element in &response.elements {
        match element {
            OverpassElement::Node { id, lat, lon } => {
                if let Ok(pos) = Coordinate::new(*lat, *lon) {
                    positions.insert(*id, pos);
                }
            }
            OverpassElement::Way { id, nodes, tags } => {
                let pairs: Vec<(&str, &str)> =
                    tags.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
                match way_access(mode, &pairs) {
                    Some(access) => ways.push(OsmWay { refs: nodes.clone(), access }),
                    None => debug!(way = id, %mode, "way excluded for mode"),
                }
            }
            OverpassElement::Other => {}
        }
    }

    info!(
        elements = response.elements.len(),
        nodes = positions.len(),
        ways = ways.len(),
        %mode,
        "parsed Overpass response"
    );
    assemble(&positions, &ways, None)
}
