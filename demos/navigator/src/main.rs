//! navigator — turn two addresses into a route overlay.
//!
//! With `--from` and `--to`, geocodes both, loads the surrounding street
//! network (Overpass, or a local `.osm.pbf` with `--pbf`), finds the
//! cheapest path and writes a GeoJSON `FeatureCollection` for a map
//! renderer.  Without addresses it locates the default place and writes a
//! single marker.
//!
//! ```text
//! navigator --from "Gopi Circle, Shivamogga" --to "Shivamogga Railway Station" \
//!           --mode walk --optimizer time --output route.geojson
//! ```
//!
//! Endpoints and timeouts come from `NAV_*` variables (a `.env` file is read
//! first); logging follows `RUST_LOG`.

mod output;

use std::path::PathBuf;

use anyhow::{Result, anyhow};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use nav_core::{Basemap, NavConfig, NavError, OptimizationCriterion, TravelMode};
use nav_planner::{NavigatorBuilder, RegionConfig, RouteRequest, locate_geojson};
use nav_providers::{AddressResolver, OverpassProvider};
use nav_spatial::MapDataProvider;

// ── Constants ─────────────────────────────────────────────────────────────────

const DEFAULT_ADDRESS: &str = "Shivamogga, Karnataka, India 577204";

// ── CLI ───────────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Start address.
    #[arg(long, requires = "to")]
    from: Option<String>,

    /// Destination address.
    #[arg(long, requires = "from")]
    to: Option<String>,

    /// drive | walk | bike
    #[arg(long, default_value_t = TravelMode::Drive)]
    mode: TravelMode,

    /// length | time
    #[arg(long, default_value_t = OptimizationCriterion::Length)]
    optimizer: OptimizationCriterion,

    /// satellite | roadmap | terrain | hybrid | openstreetmap
    #[arg(long, default_value_t = Basemap::OpenStreetMap)]
    basemap: Basemap,

    /// Read the street network from a local OSM PBF extract.
    #[arg(long)]
    pbf: Option<PathBuf>,

    /// Write the GeoJSON here instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    #[arg(short, long)]
    debug: bool,
}

// ── Main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if cli.debug { "debug" } else { "info" }));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = NavConfig::from_env()?;
    let resolver = AddressResolver::from_config(&config)?;

    let document = match (cli.from.as_deref(), cli.to.as_deref()) {
        (Some(from), Some(to)) => {
            let request = RouteRequest::new(from, to).mode(cli.mode).criterion(cli.optimizer);
            let navigator = NavigatorBuilder::new(resolver, map_data_provider(&cli, &config)?)
                .region(RegionConfig::from(&config))
                .build()?;

            let plan = navigator.plan(&request).map_err(describe)?;
            eprintln!(
                "{} -> {} ({}, by {}): {:.0} m, {:.0} s, {} nodes",
                request.from,
                request.to,
                request.mode,
                request.criterion,
                plan.length_m(),
                plan.travel_secs(),
                plan.route.nodes.len(),
            );
            plan.to_geojson(cli.basemap)
        }
        _ => {
            let at = resolver.resolve(DEFAULT_ADDRESS).map_err(describe)?;
            eprintln!("Lat, Lon: {}, {}", at.lat(), at.lon());
            locate_geojson(at, cli.basemap)
        }
    };

    output::write_document(&document, cli.output.as_deref())?;
    if let Some(path) = &cli.output {
        info!(path = %path.display(), basemap = %cli.basemap, "overlay written");
    }
    Ok(())
}

fn map_data_provider(cli: &Cli, config: &NavConfig) -> Result<Box<dyn MapDataProvider>> {
    match &cli.pbf {
        #[cfg(feature = "osm")]
        Some(path) => Ok(Box::new(nav_spatial::osm::PbfProvider::new(path))),
        #[cfg(not(feature = "osm"))]
        Some(_) => Err(anyhow!("--pbf needs the `osm` feature (cargo run -p navigator --features osm)")),
        None => Ok(Box::new(OverpassProvider::from_config(config)?)),
    }
}

/// User-facing wording for pipeline failures.
fn describe(err: NavError) -> anyhow::Error {
    match err {
        NavError::NotFound { address } => anyhow!("Unable to find location for {address}"),
        NavError::NoRouteFound { .. } => {
            anyhow!("No route found between the two locations for this travel mode")
        }
        other => anyhow!(other),
    }
}
