//! Shared blocking HTTP plumbing.

use std::time::Duration;

use reqwest::blocking::{Client, RequestBuilder};
use tracing::debug;

use nav_core::NavError;

use crate::ProviderError;

/// Longest error body kept in [`ProviderError::Status`].
const MAX_ERROR_BODY: usize = 200;

pub(crate) fn build_client(user_agent: &str, timeout: Duration) -> Result<Client, NavError> {
    Client::builder()
        .timeout(timeout)
        .user_agent(user_agent)
        .build()
        .map_err(|e| NavError::Config(format!("cannot build HTTP client: {e}")))
}

/// Send `request` and return the body of a 2xx answer.
pub(crate) fn send_text(request: RequestBuilder, timeout: Duration) -> Result<String, ProviderError> {
    let response = request.send().map_err(|e| ProviderError::from_reqwest(e, timeout))?;
    let status = response.status();
    debug!(%status, url = %response.url(), "provider answered");

    let body = response.text().map_err(|e| ProviderError::from_reqwest(e, timeout))?;
    if !status.is_success() {
        return Err(ProviderError::Status { status, body: truncate(&body, MAX_ERROR_BODY) });
    }
    Ok(body)
}

pub(crate) fn truncate(body: &str, max_chars: usize) -> String {
    let trimmed = body.trim();
    match trimmed.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}…", &trimmed[..cut]),
        None => trimmed.to_string(),
    }
}
