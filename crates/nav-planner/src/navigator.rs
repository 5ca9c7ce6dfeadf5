//! The address → route pipeline.

use tracing::{info, instrument};

use nav_core::{Coordinate, NavConfig, NavResult, OptimizationCriterion, TravelMode};
use nav_providers::{AddressResolver, Geocoder, NominatimGeocoder, OverpassProvider};
use nav_spatial::{DijkstraRouter, MapDataProvider, Route, RouteFinder, RouteGraph, Router};

use crate::loader::{RegionConfig, RegionGraphLoader};

// ── RouteRequest ──────────────────────────────────────────────────────────────

/// Everything one route computation needs.  Mode and criterion default to
/// `Drive` / `Length`.
#[derive(Clone, Debug, PartialEq)]
pub struct RouteRequest {
    pub from:      String,
    pub to:        String,
    pub mode:      TravelMode,
    pub criterion: OptimizationCriterion,
}

impl RouteRequest {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from:      from.into(),
            to:        to.into(),
            mode:      TravelMode::default(),
            criterion: OptimizationCriterion::default(),
        }
    }

    pub fn mode(mut self, mode: TravelMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn criterion(mut self, criterion: OptimizationCriterion) -> Self {
        self.criterion = criterion;
        self
    }
}

// ── RoutePlan ─────────────────────────────────────────────────────────────────

/// A computed route together with the graph it is a path in.
#[derive(Debug)]
pub struct RoutePlan {
    pub request:     RouteRequest,
    /// Geocoded origin (before snapping).
    pub origin:      Coordinate,
    /// Geocoded destination (before snapping).
    pub destination: Coordinate,
    pub graph:       RouteGraph,
    pub route:       Route,
}

impl RoutePlan {
    pub fn length_m(&self) -> f64 {
        self.route.total_length_m(&self.graph)
    }

    pub fn travel_secs(&self) -> f64 {
        self.route.total_travel_secs(&self.graph)
    }

    /// Positions of the route's nodes, origin side first.
    pub fn path(&self) -> Vec<Coordinate> {
        self.route.coordinates(&self.graph)
    }
}

// ── Navigator ─────────────────────────────────────────────────────────────────

/// Resolve both addresses, load the surrounding street graph, search.
///
/// Holds no per-request state; one instance can serve any number of
/// requests, from several threads if its providers allow it.
#[derive(Debug)]
pub struct Navigator<G = NominatimGeocoder, P = OverpassProvider, R = DijkstraRouter>
where
    G: Geocoder,
    P: MapDataProvider,
    R: Router,
{
    resolver: AddressResolver<G>,
    loader:   RegionGraphLoader<P>,
    finder:   RouteFinder<R>,
}

impl Navigator {
    /// Nominatim + Overpass over HTTP, Dijkstra search, margins from `config`.
    pub fn from_config(config: &NavConfig) -> NavResult<Self> {
        config.validate()?;
        NavigatorBuilder::new(
            AddressResolver::from_config(config)?,
            OverpassProvider::from_config(config)?,
        )
        .region(RegionConfig::from(config))
        .build()
    }
}

impl<G: Geocoder, P: MapDataProvider, R: Router> Navigator<G, P, R> {
    /// # Errors
    ///
    /// The first failure of the pipeline, unchanged: `NotFound` (naming the
    /// address that failed), `Timeout`, `GraphUnavailable` or `NoRouteFound`.
    #[instrument(skip_all, fields(mode = %request.mode, criterion = %request.criterion))]
    pub fn plan(&self, request: &RouteRequest) -> NavResult<RoutePlan> {
        let origin      = self.resolver.resolve(&request.from)?;
        let destination = self.resolver.resolve(&request.to)?;
        let graph       = self.loader.load(origin, destination, request.mode)?;
        let route       = self.finder.find(&graph, origin, destination, request.criterion)?;

        let plan = RoutePlan { request: request.clone(), origin, destination, graph, route };
        info!(
            %origin,
            %destination,
            nodes = plan.route.nodes.len(),
            length_m = plan.length_m(),
            travel_secs = plan.travel_secs(),
            "route planned"
        );
        Ok(plan)
    }

    /// Resolve a single address, e.g. to centre a map with no route.
    pub fn locate(&self, address: &str) -> NavResult<Coordinate> {
        self.resolver.resolve(address)
    }

    pub fn resolver(&self) -> &AddressResolver<G> {
        &self.resolver
    }

    pub fn loader(&self) -> &RegionGraphLoader<P> {
        &self.loader
    }
}

// ── NavigatorBuilder ──────────────────────────────────────────────────────────

/// Fluent builder for [`Navigator`].
///
/// | Method        | Default                    |
/// |---------------|----------------------------|
/// | `.router(r)`  | `DijkstraRouter`           |
/// | `.region(c)`  | `RegionConfig::default()`  |
pub struct NavigatorBuilder<G: Geocoder, P: MapDataProvider, R: Router = DijkstraRouter> {
    resolver: AddressResolver<G>,
    provider: P,
    router:   R,
    region:   RegionConfig,
}

impl<G: Geocoder, P: MapDataProvider> NavigatorBuilder<G, P, DijkstraRouter> {
    pub fn new(resolver: AddressResolver<G>, provider: P) -> Self {
        Self { resolver, provider, router: DijkstraRouter, region: RegionConfig::default() }
    }
}

impl<G: Geocoder, P: MapDataProvider, R: Router> NavigatorBuilder<G, P, R> {
    /// Replace the search algorithm.
    pub fn router<R2: Router>(self, router: R2) -> NavigatorBuilder<G, P, R2> {
        NavigatorBuilder {
            resolver: self.resolver,
            provider: self.provider,
            router,
            region:   self.region,
        }
    }

    pub fn region(mut self, region: RegionConfig) -> Self {
        self.region = region;
        self
    }

    /// # Errors
    ///
    /// [`NavError::Config`](nav_core::NavError::Config) for negative or
    /// non-finite region margins.
    pub fn build(self) -> NavResult<Navigator<G, P, R>> {
        self.region.validate()?;
        Ok(Navigator {
            resolver: self.resolver,
            loader:   RegionGraphLoader::with_region(self.provider, self.region),
            finder:   RouteFinder::with_router(self.router),
        })
    }
}
