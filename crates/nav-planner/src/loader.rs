//! Region sizing and per-request graph loading.

use tracing::{info, instrument};

use nav_core::{BoundingBox, Coordinate, NavConfig, NavError, NavResult, TravelMode};
use nav_spatial::{MapDataProvider, RouteGraph};

/// How far the loaded region extends past the two endpoints.
///
/// The margin on every side is `max(margin_m, margin_fraction × diagonal)`,
/// so short trips still get room for detours and long trips scale.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RegionConfig {
    pub margin_m:        f64,
    pub margin_fraction: f64,
}

impl Default for RegionConfig {
    fn default() -> Self {
        Self { margin_m: 500.0, margin_fraction: 0.25 }
    }
}

impl From<&NavConfig> for RegionConfig {
    fn from(config: &NavConfig) -> Self {
        Self {
            margin_m:        config.region_margin_m,
            margin_fraction: config.region_margin_fraction,
        }
    }
}

impl RegionConfig {
    pub fn validate(&self) -> NavResult<()> {
        let ok = |v: f64| v.is_finite() && v >= 0.0;
        if !ok(self.margin_m) || !ok(self.margin_fraction) {
            return Err(NavError::Config(format!(
                "region margins must be finite and >= 0 (got {} m, {})",
                self.margin_m, self.margin_fraction
            )));
        }
        Ok(())
    }

    /// Bounding box covering both points plus the margin.
    pub fn region_for(&self, origin: Coordinate, destination: Coordinate) -> BoundingBox {
        let tight = BoundingBox::covering(origin, destination);
        let margin = self.margin_m.max(self.margin_fraction * tight.diagonal_m());
        tight.expand_m(margin)
    }
}

/// Fetches a fresh street graph around an origin/destination pair.
#[derive(Debug, Clone)]
pub struct RegionGraphLoader<P: MapDataProvider> {
    provider: P,
    region:   RegionConfig,
}

impl<P: MapDataProvider> RegionGraphLoader<P> {
    pub fn new(provider: P) -> Self {
        Self { provider, region: RegionConfig::default() }
    }

    pub fn with_region(provider: P, region: RegionConfig) -> Self {
        Self { provider, region }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn region_config(&self) -> RegionConfig {
        self.region
    }

    /// # Errors
    ///
    /// [`NavError::GraphUnavailable`] if the provider fails or returns a
    /// graph without nodes; [`NavError::Timeout`] if it timed out.
    #[instrument(skip(self))]
    pub fn load(
        &self,
        origin: Coordinate,
        destination: Coordinate,
        mode: TravelMode,
    ) -> NavResult<RouteGraph> {
        let region = self.region.region_for(origin, destination);
        let graph = self.provider.fetch_graph(&region, mode)?;
        if graph.is_empty() {
            return Err(NavError::graph_unavailable(format!("no {mode} network inside {region}")));
        }
        info!(%region, nodes = graph.node_count(), edges = graph.edge_count(), "region graph loaded");
        Ok(graph)
    }
}
