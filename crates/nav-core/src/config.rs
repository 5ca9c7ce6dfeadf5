//! Run configuration for the route finder.

use std::time::Duration;

use crate::{NavError, NavResult};

// ── NavConfig ─────────────────────────────────────────────────────────────────

/// Provider endpoints, per-call time bounds, and region sizing.
///
/// Construct with `NavConfig::default()` and override fields, or call
/// [`NavConfig::from_env`] to overlay `NAV_*` environment variables on the
/// defaults.
#[derive(Clone, Debug, PartialEq)]
pub struct NavConfig {
    /// Base URL of a Nominatim-compatible geocoder (no trailing `/search`).
    pub nominatim_url: String,

    /// Overpass API interpreter endpoint.
    pub overpass_url: String,

    /// `User-Agent` sent with every request.  The public OSM services reject
    /// anonymous clients.
    pub user_agent: String,

    /// Upper bound on one geocoding call.  Default: 30 s.
    pub geocode_timeout: Duration,

    /// Upper bound on one map-data fetch.  Overpass extracts for a city-sized
    /// box routinely take tens of seconds.  Default: 180 s.
    pub map_data_timeout: Duration,

    /// Minimum margin added around the origin/destination box, metres.
    pub region_margin_m: f64,

    /// Margin as a fraction of the box diagonal; the larger of the two
    /// margins wins.
    pub region_margin_fraction: f64,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            nominatim_url:          "https://nominatim.openstreetmap.org".to_string(),
            overpass_url:           "https://overpass-api.de/api/interpreter".to_string(),
            user_agent:             concat!("rust_nav/", env!("CARGO_PKG_VERSION")).to_string(),
            geocode_timeout:        Duration::from_secs(30),
            map_data_timeout:       Duration::from_secs(180),
            region_margin_m:        500.0,
            region_margin_fraction: 0.25,
        }
    }
}

impl NavConfig {
    /// Defaults overlaid with `NAV_*` process environment variables.
    pub fn from_env() -> NavResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overlaid with values from `lookup`.
    ///
    /// Tests pass a map-backed closure here instead of mutating the process
    /// environment.
    pub fn from_lookup<F>(lookup: F) -> NavResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();

        if let Some(v) = lookup("NAV_NOMINATIM_URL") {
            cfg.nominatim_url = v.trim_end_matches('/').to_string();
        }
        if let Some(v) = lookup("NAV_OVERPASS_URL") {
            cfg.overpass_url = v;
        }
        if let Some(v) = lookup("NAV_USER_AGENT") {
            cfg.user_agent = v;
        }
        if let Some(v) = lookup("NAV_GEOCODE_TIMEOUT_SECS") {
            cfg.geocode_timeout = parse_secs("NAV_GEOCODE_TIMEOUT_SECS", &v)?;
        }
        if let Some(v) = lookup("NAV_MAP_DATA_TIMEOUT_SECS") {
            cfg.map_data_timeout = parse_secs("NAV_MAP_DATA_TIMEOUT_SECS", &v)?;
        }
        if let Some(v) = lookup("NAV_REGION_MARGIN_M") {
            cfg.region_margin_m = parse_non_negative("NAV_REGION_MARGIN_M", &v)?;
        }
        if let Some(v) = lookup("NAV_REGION_MARGIN_FRACTION") {
            cfg.region_margin_fraction = parse_non_negative("NAV_REGION_MARGIN_FRACTION", &v)?;
        }

        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject configurations no request could succeed with.
    pub fn validate(&self) -> NavResult<()> {
        if self.nominatim_url.is_empty() || self.overpass_url.is_empty() {
            return Err(NavError::Config("provider URLs must not be empty".into()));
        }
        if self.user_agent.trim().is_empty() {
            return Err(NavError::Config("user agent must not be empty".into()));
        }
        if self.geocode_timeout.is_zero() || self.map_data_timeout.is_zero() {
            return Err(NavError::Config("timeouts must be greater than zero".into()));
        }
        Ok(())
    }
}

fn parse_secs(key: &str, raw: &str) -> NavResult<Duration> {
    raw.trim()
        .parse::<u64>()
        .map(Duration::from_secs)
        .map_err(|e| NavError::Config(format!("{key}={raw:?}: {e}")))
}

fn parse_non_negative(key: &str, raw: &str) -> NavResult<f64> {
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 => Ok(v),
        Ok(v) => Err(NavError::Config(format!("{key}={v}: must be a finite value >= 0"))),
        Err(e) => Err(NavError::Config(format!("{key}={raw:?}: {e}"))),
    }
}
