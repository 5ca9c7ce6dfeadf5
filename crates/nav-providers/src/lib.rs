//! `nav-providers` — network-backed implementations of the provider traits.
//!
//! | Module       | Contents                                                   |
//! |--------------|------------------------------------------------------------|
//! | [`geocode`]  | `Geocoder` trait, `NominatimGeocoder`, `AddressResolver`   |
//! | [`overpass`] | `OverpassProvider` (implements `MapDataProvider`)          |
//! | [`error`]    | `ProviderError` (transport-level failures)                 |
//!
//! All calls are blocking and bounded by the timeouts in
//! [`NavConfig`](nav_core::NavConfig).  Nothing is cached between calls.

pub mod error;
pub mod geocode;
mod http;
pub mod overpass;


pub use error::ProviderError;
pub use geocode::{AddressResolver, GeocodeHit, Geocoder, NominatimGeocoder};
pub use overpass::OverpassProvider;
