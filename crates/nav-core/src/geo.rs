//! Geographic coordinate and bounding-box types.
//!
//! `Coordinate` stores WGS-84 degrees as `f64`.  Geocoders and OSM both hand
//! out double-precision values, and the snapping step compares distances of
//! a few metres, so single precision is not enough here.

use std::fmt;

use crate::{NavError, NavResult};

/// Mean Earth radius in metres.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Metres per degree of latitude (and of longitude at the equator).
pub const METRES_PER_DEGREE: f64 = 111_320.0;

// ── Coordinate ────────────────────────────────────────────────────────────────

/// A validated (latitude, longitude) pair.
///
/// Fields are private: every `Coordinate` in the system has passed the range
/// check in [`Coordinate::new`].
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawCoordinate"))]
pub struct Coordinate {
    lat: f64,
    lon: f64,
}

impl Coordinate {
    /// Build a coordinate, rejecting non-finite values and anything outside
    /// `[-90, 90]` × `[-180, 180]`.
    pub fn new(lat: f64, lon: f64) -> NavResult<Self> {
        let lat_ok = lat.is_finite() && (-90.0..=90.0).contains(&lat);
        let lon_ok = lon.is_finite() && (-180.0..=180.0).contains(&lon);
        if lat_ok && lon_ok {
            Ok(Self { lat, lon })
        } else {
            Err(NavError::InvalidCoordinate { lat, lon })
        }
    }

    #[inline]
    pub fn lat(self) -> f64 {
        self.lat
    }

    #[inline]
    pub fn lon(self) -> f64 {
        self.lon
    }

    /// Haversine great-circle distance in metres.
    pub fn distance_m(self, other: Coordinate) -> f64 {
        let d_lat = (other.lat - self.lat).to_radians();
        let d_lon = (other.lon - self.lon).to_radians();

        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();

        let a = (d_lat * 0.5).sin().powi(2)
            + lat1.cos() * lat2.cos() * (d_lon * 0.5).sin().powi(2);

        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
        EARTH_RADIUS_M * c
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lon)
    }
}

impl TryFrom<(f64, f64)> for Coordinate {
    type Error = NavError;

    fn try_from((lat, lon): (f64, f64)) -> NavResult<Self> {
        Coordinate::new(lat, lon)
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawCoordinate {
    lat: f64,
    lon: f64,
}

#[cfg(feature = "serde")]
impl TryFrom<RawCoordinate> for Coordinate {
    type Error = NavError;

    fn try_from(raw: RawCoordinate) -> NavResult<Self> {
        Coordinate::new(raw.lat, raw.lon)
    }
}

// ── BoundingBox ───────────────────────────────────────────────────────────────

/// An axis-aligned lat/lon rectangle, always clamped to valid ranges.
///
/// Boxes that would cross the antimeridian are clamped at ±180° instead of
/// wrapping.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct BoundingBox {
    pub south: f64,
    pub west:  f64,
    pub north: f64,
    pub east:  f64,
}

impl BoundingBox {
    /// Smallest box containing both points.
    pub fn covering(a: Coordinate, b: Coordinate) -> Self {
        Self {
            south: a.lat.min(b.lat),
            west:  a.lon.min(b.lon),
            north: a.lat.max(b.lat),
            east:  a.lon.max(b.lon),
        }
    }

    /// Grow the box by `margin_m` metres on every side.
    ///
    /// The longitude pad uses the cosine of the box's central latitude,
    /// floored so boxes near the poles stay finite.
    pub fn expand_m(self, margin_m: f64) -> Self {
        let margin_m = margin_m.max(0.0);
        let d_lat = margin_m / METRES_PER_DEGREE;
        let cos_lat = self.center().lat.to_radians().cos().max(0.01);
        let d_lon = margin_m / (METRES_PER_DEGREE * cos_lat);

        Self {
            south: (self.south - d_lat).max(-90.0),
            west:  (self.west - d_lon).max(-180.0),
            north: (self.north + d_lat).min(90.0),
            east:  (self.east + d_lon).min(180.0),
        }
    }

    pub fn center(&self) -> Coordinate {
        Coordinate {
            lat: (self.south + self.north) * 0.5,
            lon: (self.west + self.east) * 0.5,
        }
    }

    /// South-west to north-east great-circle distance in metres.
    pub fn diagonal_m(&self) -> f64 {
        let sw = Coordinate { lat: self.south, lon: self.west };
        let ne = Coordinate { lat: self.north, lon: self.east };
        sw.distance_m(ne)
    }

    #[inline]
    pub fn contains(&self, c: Coordinate) -> bool {
        (self.south..=self.north).contains(&c.lat) && (self.west..=self.east).contains(&c.lon)
    }
}

impl fmt::Display for BoundingBox {
    /// `south,west,north,east` — the order Overpass QL expects.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.7},{:.7},{:.7},{:.7}",
            self.south, self.west, self.north, self.east
        )
    }
}
