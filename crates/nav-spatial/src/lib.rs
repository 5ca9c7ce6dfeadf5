//! `nav-spatial` — street graph, snapping, and shortest paths.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                    |
//! |--------------|-------------------------------------------------------------|
//! | [`graph`]    | `RouteGraph` (CSR + R-tree), `RouteGraphBuilder`            |
//! | [`router`]   | `Router` trait, `Route`, `DijkstraRouter`                   |
//! | [`finder`]   | `RouteFinder` — snap both ends, then search                 |
//! | [`provider`] | `MapDataProvider` trait (region + mode → graph)             |
//! | [`tags`]     | Per-mode OSM way rules: inclusion, direction, speed         |
//! | [`overpass`] | Overpass QL query text and JSON → `RouteGraph`              |
//! | [`osm`]      | `PbfProvider`, `load_from_pbf` (feature = `"osm"` only)     |
//! | [`error`]    | `SpatialError`, `SpatialResult<T>`                          |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `osm`   | Enables OSM PBF loading via the `osmpbf` crate.              |
//! | `serde` | Derives `Serialize`/`Deserialize` on `nav-core` value types. |

mod assemble;
pub mod error;
pub mod finder;
pub mod graph;
pub mod overpass;
pub mod provider;
pub mod router;
pub mod tags;

#[cfg(feature = "osm")]
pub mod osm;

#[cfg(test)]
mod tests;

pub use error::{SpatialError, SpatialResult};
pub use finder::{RouteFinder, find_route};
pub use graph::{RouteGraph, RouteGraphBuilder};
pub use provider::MapDataProvider;
pub use router::{DijkstraRouter, Route, Router};
