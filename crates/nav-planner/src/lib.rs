//! `nav-planner` — composes geocoding, region loading and route search.
//!
//! | Module        | Contents                                                      |
//! |---------------|---------------------------------------------------------------|
//! | [`loader`]    | `RegionGraphLoader`, `RegionConfig`                           |
//! | [`navigator`] | `Navigator`, `NavigatorBuilder`, `RouteRequest`, `RoutePlan`  |
//! | [`geojson`]   | Route and marker overlays as GeoJSON `FeatureCollection`s     |
//!
//! # Example
//!
//! ```rust,ignore
//! let navigator = Navigator::from_config(&NavConfig::from_env()?)?;
//! let request = RouteRequest::new("Gopi Circle, Shivamogga", "Shivamogga Railway Station")
//!     .mode(TravelMode::Walk)
//!     .criterion(OptimizationCriterion::Time);
//! let plan = navigator.plan(&request)?;
//! println!("{}", plan.to_geojson(Basemap::OpenStreetMap));
//! ```

pub mod geojson;
pub mod loader;
pub mod navigator;


pub use geojson::locate_geojson;
pub use loader::{RegionConfig, RegionGraphLoader};
pub use navigator::{Navigator, NavigatorBuilder, RoutePlan, RouteRequest};
