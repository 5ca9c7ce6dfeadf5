//! `nav-core` — foundational types for the `rust_nav` route finder.
//!
//! This crate is a dependency of every other `nav-*` crate.  It has no
//! `nav-*` dependencies and only `thiserror` (plus optional `serde`) from
//! outside the standard library.
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `NodeId`, `EdgeId`                                    |
//! | [`geo`]         | `Coordinate`, `BoundingBox`, haversine distance       |
//! | [`transport`]   | `TravelMode`, `OptimizationCriterion`                 |
//! | [`basemap`]     | `Basemap` tile styles for the overlay boundary        |
//! | [`config`]      | `NavConfig` (provider endpoints, timeouts, margins)   |
//! | [`error`]       | `NavError`, `NavResult`                               |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to the public value types.  |

pub mod basemap;
pub mod config;
pub mod error;
pub mod geo;
pub mod ids;
pub mod transport;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use basemap::Basemap;
pub use config::NavConfig;
pub use error::{NavError, NavResult};
pub use geo::{BoundingBox, Coordinate};
pub use ids::{EdgeId, NodeId};
pub use transport::{OptimizationCriterion, TravelMode};
