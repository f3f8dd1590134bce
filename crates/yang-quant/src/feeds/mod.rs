//! Market Data Feeds
//!
//! Thin `reqwest` clients for the public APIs the tools read from.

mod clank;
mod coingecko;

pub use clank::ClankClient;
pub use coingecko::CoinGeckoClient;

use std::time::Duration;

use serde::de::DeserializeOwned;

use crate::error::{QuantError, Result};

/// Build the HTTP client shared by a feed
pub(crate) fn http_client(timeout: Duration) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(concat!("yang-quant/", env!("CARGO_PKG_VERSION")))
        .timeout(timeout)
        .build()
        .map_err(|e| QuantError::Config(format!("failed to build HTTP client: {e}")))
}

/// GET `url` and decode the JSON body. Non-2xx statuses are errors.
pub(crate) async fn get_json<T: DeserializeOwned>(
    client: &reqwest::Client,
    service: &'static str,
    url: &str,
    query: &[(&str, &str)],
) -> Result<T> {
    tracing::debug!(service, url, "GET");

    client
        .get(url)
        .query(query)
        .send()
        .await
        .and_then(reqwest::Response::error_for_status)
        .map_err(QuantError::request(service))?
        .json::<T>()
        .await
        .map_err(QuantError::request(service))
}
