//! GeoJSON overlays for map renderers.
//!
//! Positions are `[lon, lat]` as GeoJSON requires.  Every collection also
//! carries a non-standard top-level `basemap` member with the XYZ tile
//! template a renderer should draw underneath.

use serde_json::{Value, json};

use nav_core::{Basemap, Coordinate};

use crate::navigator::RoutePlan;

fn position(c: Coordinate) -> [f64; 2] {
    [c.lon(), c.lat()]
}

fn basemap_member(basemap: Basemap) -> Value {
    json!({
        "name":        basemap.as_str(),
        "tiles":       basemap.tile_url(),
        "attribution": basemap.attribution(),
    })
}

fn marker(role: &str, at: Coordinate, address: Option<&str>) -> Value {
    json!({
        "type": "Feature",
        "geometry": { "type": "Point", "coordinates": position(at) },
        "properties": { "role": role, "address": address },
    })
}

impl RoutePlan {
    /// Origin and destination markers plus the route as a `LineString`.
    ///
    /// A single-node route is written as that position twice so the
    /// geometry is always a valid line.
    pub fn to_geojson(&self, basemap: Basemap) -> Value {
        let mut line: Vec<[f64; 2]> = self.path().into_iter().map(position).collect();
        if line.len() == 1 {
            line.push(line[0]);
        }

        json!({
            "type": "FeatureCollection",
            "basemap": basemap_member(basemap),
            "features": [
                marker("origin", self.origin, Some(self.request.from.as_str())),
                marker("destination", self.destination, Some(self.request.to.as_str())),
                {
                    "type": "Feature",
                    "geometry": { "type": "LineString", "coordinates": line },
                    "properties": {
                        "role":        "route",
                        "mode":        self.request.mode.as_str(),
                        "criterion":   self.route.criterion.as_str(),
                        "length_m":    self.length_m(),
                        "travel_secs": self.travel_secs(),
                        "nodes":       self.route.nodes.len(),
                    },
                },
            ],
        })
    }
}

/// A single location marker, for showing a place when no route is asked for.
pub fn locate_geojson(at: Coordinate, basemap: Basemap) -> Value {
    json!({
        "type": "FeatureCollection",
        "basemap": basemap_member(basemap),
        "features": [marker("location", at, None)],
    })
}
