//! Address → coordinate resolution.
//!
//! [`AddressResolver`] owns the request-level contract (blank input, error
//! folding, range checks); a [`Geocoder`] only talks to a backend.
//! [`NominatimGeocoder`] is the HTTP backend against any
//! Nominatim-compatible `/search` endpoint.

use std::time::Duration;

use reqwest::blocking::Client;
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use nav_core::{Coordinate, NavConfig, NavError, NavResult};

use crate::error::GEOCODER_SERVICE;
use crate::{ProviderError, http};

// ── Geocoder trait ────────────────────────────────────────────────────────────

/// Best match returned by a geocoding backend.  Values are unvalidated.
#[derive(Debug, Clone, PartialEq)]
pub struct GeocodeHit {
    pub lat: f64,
    pub lon: f64,
    pub display_name: Option<String>,
}

/// A geocoding backend: free-text address → best single match, if any.
pub trait Geocoder: Send + Sync {
    fn geocode(&self, address: &str) -> Result<Option<GeocodeHit>, ProviderError>;
}

impl<G: Geocoder + ?Sized> Geocoder for Box<G> {
    fn geocode(&self, address: &str) -> Result<Option<GeocodeHit>, ProviderError> {
        (**self).geocode(address)
    }
}

impl<G: Geocoder + ?Sized> Geocoder for &G {
    fn geocode(&self, address: &str) -> Result<Option<GeocodeHit>, ProviderError> {
        (**self).geocode(address)
    }
}

// ── AddressResolver ───────────────────────────────────────────────────────────

/// Resolves free-text addresses to validated [`Coordinate`]s.
#[derive(Debug, Clone)]
pub struct AddressResolver<G: Geocoder = NominatimGeocoder> {
    geocoder: G,
}

impl AddressResolver<NominatimGeocoder> {
    pub fn from_config(config: &NavConfig) -> NavResult<Self> {
        Ok(Self::new(NominatimGeocoder::from_config(config)?))
    }
}

impl<G: Geocoder> AddressResolver<G> {
    pub fn new(geocoder: G) -> Self {
        Self { geocoder }
    }

    pub fn geocoder(&self) -> &G {
        &self.geocoder
    }

    /// # Errors
    ///
    /// - [`NavError::NotFound`] for blank input, no match, an out-of-range
    ///   match, or any non-timeout backend failure.
    /// - [`NavError::Timeout`] if the backend did not answer in time.
    #[instrument(skip(self))]
    pub fn resolve(&self, address: &str) -> NavResult<Coordinate> {
        let query = address.trim();
        if query.is_empty() {
            return Err(NavError::not_found(address));
        }

        let hit = match self.geocoder.geocode(query) {
            Ok(Some(hit)) => hit,
            Ok(None) => {
                debug!("geocoder returned no match");
                return Err(NavError::not_found(address));
            }
            Err(ProviderError::Timeout(after)) => {
                return Err(NavError::Timeout { service: GEOCODER_SERVICE, after });
            }
            Err(err) => {
                warn!(error = %err, "geocoding failed");
                return Err(NavError::not_found(address));
            }
        };

        match Coordinate::new(hit.lat, hit.lon) {
            Ok(coordinate) => {
                debug!(%coordinate, name = hit.display_name.as_deref(), "address resolved");
                Ok(coordinate)
            }
            Err(err) => {
                warn!(error = %err, "geocoder returned an invalid coordinate");
                Err(NavError::not_found(address))
            }
        }
    }
}

// ── Nominatim ─────────────────────────────────────────────────────────────────

/// One `format=jsonv2` search result.  Nominatim sends coordinates as strings.
#[derive(Debug, Deserialize)]
struct NominatimPlace {
    lat: String,
    lon: String,
    #[serde(default)]
    display_name: Option<String>,
}

/// Parse a Nominatim `/search?format=jsonv2` body; the first entry wins.
pub fn parse_search_response(body: &str) -> Result<Option<GeocodeHit>, ProviderError> {
    let places: Vec<NominatimPlace> = serde_json::from_str(body)?;
    let Some(place) = places.into_iter().next() else {
        return Ok(None);
    };

    let parse = |field: &str, raw: &str| {
        raw.trim()
            .parse::<f64>()
            .map_err(|e| ProviderError::Decode(format!("{field}={raw:?}: {e}")))
    };
    Ok(Some(GeocodeHit {
        lat: parse("lat", &place.lat)?,
        lon: parse("lon", &place.lon)?,
        display_name: place.display_name,
    }))
}

/// Blocking client for a Nominatim `/search` endpoint.
#[derive(Debug, Clone)]
pub struct NominatimGeocoder {
    client:     Client,
    search_url: String,
    timeout:    Duration,
}

impl NominatimGeocoder {
    /// `base_url` is the server root, e.g. `https://nominatim.openstreetmap.org`.
    pub fn new(base_url: &str, user_agent: &str, timeout: Duration) -> NavResult<Self> {
        Ok(Self {
            client:     http::build_client(user_agent, timeout)?,
            search_url: format!("{}/search", base_url.trim_end_matches('/')),
            timeout,
        })
    }

    pub fn from_config(config: &NavConfig) -> NavResult<Self> {
        Self::new(&config.nominatim_url, &config.user_agent, config.geocode_timeout)
    }

    pub fn search_url(&self) -> &str {
        &self.search_url
    }
}

impl Geocoder for NominatimGeocoder {
    #[instrument(skip(self), fields(url = %self.search_url))]
    fn geocode(&self, address: &str) -> Result<Option<GeocodeHit>, ProviderError> {
        let request = self
            .client
            .get(&self.search_url)
            .query(&[("q", address), ("format", "jsonv2"), ("limit", "1")]);
        let body = http::send_text(request, self.timeout)?;
        parse_search_response(&body)
    }
}
