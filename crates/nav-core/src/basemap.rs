//! Basemap tile styles offered to the rendering layer.
//!
//! The route finder never draws anything itself; it only names the tile
//! layer a renderer should put under the route overlay.

use std::fmt;
use std::str::FromStr;

use crate::NavError;

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Basemap {
    Satellite,
    Roadmap,
    Terrain,
    Hybrid,
    #[default]
    OpenStreetMap,
}

impl Basemap {
    pub const ALL: [Basemap; 5] = [
        Basemap::Satellite,
        Basemap::Roadmap,
        Basemap::Terrain,
        Basemap::Hybrid,
        Basemap::OpenStreetMap,
    ];

    /// Display name, as offered in a basemap picker.
    pub fn as_str(self) -> &'static str {
        match self {
            Basemap::Satellite     => "Satellite",
            Basemap::Roadmap       => "Roadmap",
            Basemap::Terrain       => "Terrain",
            Basemap::Hybrid        => "Hybrid",
            Basemap::OpenStreetMap => "OpenStreetMap",
        }
    }

    /// XYZ tile URL template (`{x}`, `{y}`, `{z}` placeholders).
    pub fn tile_url(self) -> &'static str {
        match self {
            Basemap::Satellite     => "https://mt1.google.com/vt/lyrs=s&x={x}&y={y}&z={z}",
            Basemap::Roadmap       => "https://mt1.google.com/vt/lyrs=m&x={x}&y={y}&z={z}",
            Basemap::Terrain       => "https://mt1.google.com/vt/lyrs=p&x={x}&y={y}&z={z}",
            Basemap::Hybrid        => "https://mt1.google.com/vt/lyrs=y&x={x}&y={y}&z={z}",
            Basemap::OpenStreetMap => "https://tile.openstreetmap.org/{z}/{x}/{y}.png",
        }
    }

    pub fn attribution(self) -> &'static str {
        match self {
            Basemap::OpenStreetMap => "© OpenStreetMap contributors",
            _                      => "Google",
        }
    }
}

impl fmt::Display for Basemap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Basemap {
    type Err = NavError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Basemap::ALL
            .into_iter()
            .find(|b| b.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| NavError::Parse(format!("unknown basemap {s:?}")))
    }
}
