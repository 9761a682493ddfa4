//! Shared request plumbing: client construction and response classification

use std::time::Duration;

use reqwest::{Client, Response};
use serde::de::DeserializeOwned;

use subhub_core::error::UpstreamError;
use subhub_core::traits::UpstreamResult;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub(crate) fn build_client() -> UpstreamResult<Client> {
    Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .map_err(|e| UpstreamError::Network(e.to_string()))
}

/// Map a transport failure
pub(crate) fn transport_error(err: reqwest::Error) -> UpstreamError {
    if err.is_decode() {
        UpstreamError::Decode(err.to_string())
    } else {
        UpstreamError::Network(err.to_string())
    }
}

/// Decode a successful JSON body, or classify the failure status
pub(crate) async fn read_json<T: DeserializeOwned>(response: Response, endpoint: &str) -> UpstreamResult<T> {
    let status = response.status();

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        tracing::warn!(endpoint, status = status.as_u16(), body = %body, "Google API request failed");
        return Err(UpstreamError::from_status(status.as_u16(), body));
    }

    response
        .json::<T>()
        .await
        .map_err(|e| UpstreamError::Decode(format!("{endpoint}: {e}")))
}

/// Join a base URL and a path without doubling the slash
pub(crate) fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), path.trim_start_matches('/'))
}
