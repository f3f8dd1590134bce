//! CoinGecko price API

use std::collections::HashMap;
use std::time::Duration;

use rust_decimal::Decimal;

use super::{get_json, http_client};
use crate::error::{QuantError, Result};
use crate::model::{CoinListing, UsdQuote};

const SERVICE: &str = "CoinGecko";

/// Client for the CoinGecko v3 API
#[derive(Clone, Debug)]
pub struct CoinGeckoClient {
    client: reqwest::Client,
    base_url: String,
}

impl CoinGeckoClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: http_client(timeout)?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Every coin CoinGecko knows about
    pub async fn list_coins(&self) -> Result<Vec<CoinListing>> {
        let url = format!("{}/coins/list", self.base_url);
        get_json(&self.client, SERVICE, &url, &[]).await
    }

    /// Id of the first coin whose name matches, ignoring case
    pub async fn find_coin_id(&self, coin_name: &str) -> Result<Option<String>> {
        let wanted = coin_name.to_lowercase();
        let coins = self.list_coins().await?;

        Ok(coins
            .into_iter()
            .find(|coin| coin.name.to_lowercase() == wanted)
            .map(|coin| coin.id))
    }

    /// Current USD price for a coin id
    pub async fn usd_price(&self, coin_id: &str) -> Result<Decimal> {
        let url = format!("{}/simple/price", self.base_url);
        let mut quotes: HashMap<String, UsdQuote> = get_json(
            &self.client,
            SERVICE,
            &url,
            &[("ids", coin_id), ("vs_currencies", "usd")],
        )
        .await?;

        quotes
            .remove(coin_id)
            .map(|quote| quote.usd)
            .ok_or_else(|| QuantError::unexpected(SERVICE, format!("no USD quote for '{coin_id}'")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(server: &MockServer) -> CoinGeckoClient {
        CoinGeckoClient::new(server.uri(), Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_find_coin_id_ignores_case() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/coins/list"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"id": "bitcoin", "symbol": "btc", "name": "Bitcoin"},
                {"id": "ethereum", "symbol": "eth", "name": "Ethereum"}
            ])))
            .mount(&server)
            .await;

        let gecko = client(&server);
        assert_eq!(gecko.find_coin_id("ETHEREUM").await.unwrap().as_deref(), Some("ethereum"));
        assert_eq!(gecko.find_coin_id("Dogecoin").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_usd_price() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/simple/price"))
            .and(query_param("ids", "bitcoin"))
            .and(query_param("vs_currencies", "usd"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "bitcoin": {"usd": 97500.25}
            })))
            .mount(&server)
            .await;

        assert_eq!(client(&server).usd_price("bitcoin").await.unwrap(), dec!(97500.25));
    }

    #[tokio::test]
    async fn test_missing_quote_is_unexpected_response() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/simple/price"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .mount(&server)
            .await;

        let err = client(&server).usd_price("bitcoin").await.unwrap_err();
        assert!(matches!(err, QuantError::UnexpectedResponse { .. }));
    }

    #[tokio::test]
    async fn test_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(429))
            .mount(&server)
            .await;

        let err = client(&server).list_coins().await.unwrap_err();
        assert!(matches!(err, QuantError::Request { service: "CoinGecko", .. }));
    }
}
