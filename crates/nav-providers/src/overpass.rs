//! Street graphs from the Overpass API.

use std::time::Duration;

use reqwest::blocking::Client;
use tracing::{debug, instrument, warn};

use nav_core::{BoundingBox, NavConfig, NavError, NavResult, TravelMode};
use nav_spatial::overpass::{build_query, graph_from_response, parse_response};
use nav_spatial::{MapDataProvider, RouteGraph};

use crate::error::MAP_DATA_SERVICE;
use crate::{ProviderError, http};

/// [`MapDataProvider`] that downloads the ways of one region per call from an
/// Overpass interpreter endpoint.
#[derive(Debug, Clone)]
pub struct OverpassProvider {
    client:  Client,
    url:     String,
    timeout: Duration,
}

impl OverpassProvider {
    pub fn new(url: impl Into<String>, user_agent: &str, timeout: Duration) -> NavResult<Self> {
        Ok(Self { client: http::build_client(user_agent, timeout)?, url: url.into(), timeout })
    }

    pub fn from_config(config: &NavConfig) -> NavResult<Self> {
        Self::new(config.overpass_url.clone(), &config.user_agent, config.map_data_timeout)
    }

    fn fetch_body(&self, query: &str) -> Result<String, ProviderError> {
        let request = self.client.post(&self.url).form(&[("data", query)]);
        http::send_text(request, self.timeout)
    }
}

impl MapDataProvider for OverpassProvider {
    #[instrument(skip(self), fields(url = %self.url))]
    fn fetch_graph(&self, region: &BoundingBox, mode: TravelMode) -> NavResult<RouteGraph> {
        let query = build_query(region, mode, self.timeout);
        debug!(%region, %mode, "querying Overpass");

        let body = self.fetch_body(&query).map_err(ProviderError::into_map_data_error)?;
        graph_from_body(&body, region, mode, self.timeout)
    }
}

/// Turn a 2xx Overpass body into a graph.
///
/// Overpass reports server-side failures in `remark` with a 200 status and
/// whatever elements it had collected so far; such a body is never built
/// into a graph.
pub(crate) fn graph_from_body(
    body: &str,
    region: &BoundingBox,
    mode: TravelMode,
    timeout: Duration,
) -> NavResult<RouteGraph> {
    let response = parse_response(body)?;
    if let Some(remark) = &response.remark {
        check_remark(remark, timeout)?;
    }

    let graph = graph_from_response(&response, mode)?;
    if graph.is_empty() {
        return Err(NavError::graph_unavailable(format!("no {mode} ways inside {region}")));
    }
    Ok(graph)
}

/// `runtime error: Query timed out …` is a timeout, any other
/// `runtime error` means the result is incomplete.  Plain `runtime remark`
/// lines are informational.
fn check_remark(remark: &str, timeout: Duration) -> NavResult<()> {
    let lower = remark.to_ascii_lowercase();
    if lower.contains("timed out") {
        warn!(remark, "Overpass gave up on the query");
        return Err(NavError::Timeout { service: MAP_DATA_SERVICE, after: timeout });
    }
    if lower.contains("error") {
        warn!(remark, "Overpass returned an incomplete result");
        return Err(NavError::graph_unavailable(format!("Overpass: {}", remark.trim())));
    }
    debug!(remark, "Overpass remark");
    Ok(())
}
