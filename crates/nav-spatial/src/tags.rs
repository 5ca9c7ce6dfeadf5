//! Per-mode rules for turning OSM ways into graph edges.
//!
//! Given a way's tags and a [`TravelMode`], [`way_access`] decides whether
//! the way belongs in the graph, which direction(s) it may be travelled in,
//! and at what speed.  The Overpass and PBF loaders share these rules.

use nav_core::TravelMode;

/// Tags of one way as `(key, value)` pairs.
pub type Tags<'a> = [(&'a str, &'a str)];

/// Permitted direction of travel along a way's node sequence.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Both,
    /// Only in node order.
    Forward,
    /// Only against node order (`oneway=-1`).
    Backward,
}

impl Direction {
    pub fn allows_forward(self) -> bool {
        matches!(self, Direction::Both | Direction::Forward)
    }

    pub fn allows_backward(self) -> bool {
        matches!(self, Direction::Both | Direction::Backward)
    }
}

/// How a way may be used by one travel mode.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct WayAccess {
    pub direction: Direction,
    pub speed_kmh: f64,
}

impl WayAccess {
    #[inline]
    pub fn speed_mps(self) -> f64 {
        self.speed_kmh / 3.6
    }
}

// ── Road classes ──────────────────────────────────────────────────────────────

/// Drivable `highway` values with their default car speed (km/h).
pub const DRIVE_SPEEDS_KMH: &[(&str, f64)] = &[
    ("motorway",       100.0),
    ("motorway_link",   60.0),
    ("trunk",           80.0),
    ("trunk_link",      50.0),
    ("primary",         65.0),
    ("primary_link",    40.0),
    ("secondary",       55.0),
    ("secondary_link",  35.0),
    ("tertiary",        45.0),
    ("tertiary_link",   30.0),
    ("unclassified",    35.0),
    ("residential",     30.0),
    ("living_street",   10.0),
    ("service",         20.0),
    ("road",            30.0),
];

/// `highway` values no mode routes over.
const NEVER_ROUTABLE: &[&str] = &[
    "abandoned", "bus_guideway", "construction", "corridor", "elevator",
    "escalator", "planned", "platform", "proposed", "raceway", "razed", "no",
];

/// Service roads a car should not be sent through.
const PRIVATE_SERVICE: &[&str] = &[
    "alley", "driveway", "emergency_access", "parking", "parking_aisle", "private",
];

/// `highway` values that should be excluded server-side for `mode`.
///
/// Used to build the Overpass filter; the authoritative check is still
/// [`way_access`].
pub fn excluded_highways(mode: TravelMode) -> Vec<&'static str> {
    let mut out = NEVER_ROUTABLE.to_vec();
    match mode {
        // `foot=yes` can open a motorway to walkers, so nothing more is
        // excluded up front for walking.
        TravelMode::Drive | TravelMode::Walk => {}
        TravelMode::Bike => out.extend(["motorway", "motorway_link"]),
    }
    out
}

fn tag<'a>(tags: &Tags<'a>, key: &str) -> Option<&'a str> {
    tags.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
}

fn tag_is(tags: &Tags<'_>, key: &str, values: &[&str]) -> bool {
    tag(tags, key).is_some_and(|v| values.contains(&v))
}

pub fn drive_default_speed_kmh(highway: &str) -> Option<f64> {
    DRIVE_SPEEDS_KMH
        .iter()
        .find(|(class, _)| *class == highway)
        .map(|(_, kmh)| *kmh)
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Decide how `mode` may use a way with these tags, or `None` to leave it
/// out of the graph.
pub fn way_access(mode: TravelMode, tags: &Tags<'_>) -> Option<WayAccess> {
    let highway = tag(tags, "highway")?;

    if NEVER_ROUTABLE.contains(&highway) || tag_is(tags, "area", &["yes"]) {
        return None;
    }

    let maxspeed = tag(tags, "maxspeed").and_then(parse_maxspeed_kmh);

    match mode {
        TravelMode::Drive => {
            let class_speed = drive_default_speed_kmh(highway)?;
            if !permitted(tags, &["motorcar", "motor_vehicle", "vehicle"])
                || (highway == "service" && tag_is(tags, "service", PRIVATE_SERVICE))
            {
                return None;
            }
            Some(WayAccess {
                direction: vehicle_direction(highway, tags),
                speed_kmh: maxspeed.unwrap_or(class_speed),
            })
        }

        TravelMode::Walk => {
            let foot_explicit = tag_is(tags, "foot", &["yes", "designated", "permissive"]);
            if !permitted(tags, &["foot"]) {
                return None;
            }
            let restricted =
                matches!(highway, "motorway" | "motorway_link" | "trunk" | "trunk_link");
            if restricted && !foot_explicit {
                return None;
            }
            Some(WayAccess {
                direction: Direction::Both,
                speed_kmh: TravelMode::Walk.nominal_speed_kmh().unwrap_or(5.0),
            })
        }

        TravelMode::Bike => {
            let bike_explicit = tag_is(tags, "bicycle", &["yes", "designated"]);
            if !permitted(tags, &["bicycle", "vehicle"]) {
                return None;
            }
            if matches!(highway, "motorway" | "motorway_link") {
                return None;
            }
            if matches!(highway, "footway" | "steps" | "pedestrian") && !bike_explicit {
                return None;
            }
            let direction = if tag_is(tags, "oneway:bicycle", &["no"]) {
                Direction::Both
            } else {
                vehicle_direction(highway, tags)
            };
            let cruise = TravelMode::Bike.nominal_speed_kmh().unwrap_or(15.0);
            let road_cap = maxspeed.or_else(|| drive_default_speed_kmh(highway));
            Some(WayAccess {
                direction,
                speed_kmh: road_cap.map_or(cruise, |cap| cruise.min(cap)),
            })
        }
    }
}

// ── Tag helpers ───────────────────────────────────────────────────────────────

const CLOSED: &[&str] = &["no", "private"];
const OPEN: &[&str] = &["yes", "designated", "permissive", "destination"];

/// Access check with OSM's specificity order: the first of `mode_keys`
/// (most specific first) that carries an open or closed value decides;
/// otherwise the general `access` tag does.
fn permitted(tags: &Tags<'_>, mode_keys: &[&str]) -> bool {
    for key in mode_keys {
        match tag(tags, key) {
            Some(v) if CLOSED.contains(&v) => return false,
            Some(v) if OPEN.contains(&v) => return true,
            _ => {}
        }
    }
    !tag_is(tags, "access", CLOSED)
}

/// One-way handling for cars and bicycles.
///
/// An explicit `oneway` tag wins; otherwise motorways and roundabouts are
/// implicitly one-way.
fn vehicle_direction(highway: &str, tags: &Tags<'_>) -> Direction {
    match tag(tags, "oneway") {
        Some("yes" | "1" | "true") => Direction::Forward,
        Some("-1" | "reverse") => Direction::Backward,
        Some("no" | "0" | "false") => Direction::Both,
        _ => {
            let implicit = matches!(highway, "motorway" | "motorway_link")
                || tag_is(tags, "junction", &["roundabout", "circular"]);
            if implicit { Direction::Forward } else { Direction::Both }
        }
    }
}

/// Parse an OSM `maxspeed` value into km/h.
///
/// Accepts `"50"`, `"50 km/h"`, `"30 mph"` and multi-valued `"50;30"`
/// (first value).  Symbolic values (`"none"`, `"walk"`, `"RU:urban"`) and
/// non-positive numbers give `None`.
pub fn parse_maxspeed_kmh(raw: &str) -> Option<f64> {
    let first = raw.split(';').next()?.trim();
    let (number, factor) = if let Some(n) = first.strip_suffix("mph") {
        (n.trim(), 1.609_344)
    } else if let Some(n) = first.strip_suffix("km/h") {
        (n.trim(), 1.0)
    } else if let Some(n) = first.strip_suffix("kmh") {
        (n.trim(), 1.0)
    } else {
        (first, 1.0)
    };
    let value: f64 = number.parse().ok()?;
    (value.is_finite() && value > 0.0).then_some(value * factor)
}
