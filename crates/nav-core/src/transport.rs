//! Travel mode and path-cost selection.
//!
//! Both enums are closed: every consumer matches them exhaustively, so adding
//! a variant is a compile error everywhere it needs handling.

use std::fmt;
use std::str::FromStr;

use crate::NavError;

// ── TravelMode ────────────────────────────────────────────────────────────────

/// Which slice of the street network a request may use.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum TravelMode {
    /// Private car: drivable roads only, one-way restrictions apply.
    #[default]
    Drive,
    /// On foot: pedestrian-accessible ways, every way is two-way.
    Walk,
    /// Bicycle: cycle-accessible ways, one-ways apply unless exempted.
    Bike,
}

impl TravelMode {
    pub const ALL: [TravelMode; 3] = [TravelMode::Drive, TravelMode::Walk, TravelMode::Bike];

    /// Fixed cruising speed for non-motorised modes, km/h.
    ///
    /// `None` for `Drive`: car speed depends on the road (class or
    /// `maxspeed`).
    pub fn nominal_speed_kmh(self) -> Option<f64> {
        match self {
            TravelMode::Drive => None,
            TravelMode::Walk  => Some(5.0),
            TravelMode::Bike  => Some(15.0),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TravelMode::Drive => "drive",
            TravelMode::Walk  => "walk",
            TravelMode::Bike  => "bike",
        }
    }
}

impl fmt::Display for TravelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TravelMode {
    type Err = NavError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "drive" => Ok(TravelMode::Drive),
            "walk"  => Ok(TravelMode::Walk),
            "bike"  => Ok(TravelMode::Bike),
            other   => Err(NavError::Parse(format!("unknown travel mode {other:?}"))),
        }
    }
}

// ── OptimizationCriterion ─────────────────────────────────────────────────────

/// Which edge attribute the path search minimises.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum OptimizationCriterion {
    /// Physical length in metres.
    #[default]
    Length,
    /// Estimated traversal time in seconds.
    Time,
}

impl OptimizationCriterion {
    pub const ALL: [OptimizationCriterion; 2] =
        [OptimizationCriterion::Length, OptimizationCriterion::Time];

    pub fn as_str(self) -> &'static str {
        match self {
            OptimizationCriterion::Length => "length",
            OptimizationCriterion::Time   => "time",
        }
    }
}

impl fmt::Display for OptimizationCriterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OptimizationCriterion {
    type Err = NavError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "length" => Ok(OptimizationCriterion::Length),
            "time"   => Ok(OptimizationCriterion::Time),
            other    => Err(NavError::Parse(format!("unknown optimizer {other:?}"))),
        }
    }
}
