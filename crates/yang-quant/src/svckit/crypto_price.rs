//! Crypto Price Tool
//!
//! Resolves a coin's display name to its CoinGecko id, then quotes it in USD.

use std::sync::Arc;
use async_trait::async_trait;

use agent_core::{
    Tool, ToolSchema, ToolCall, ToolResult,
    tool::{ParamType, ParameterSchema},
    Result as CoreResult,
};

use crate::error::Result;
use crate::feeds::CoinGeckoClient;

/// Tool for spot USD prices
pub struct CryptoPriceTool {
    prices: Arc<CoinGeckoClient>,
}

impl CryptoPriceTool {
    pub fn new(prices: Arc<CoinGeckoClient>) -> Self {
        Self { prices }
    }

    async fn quote(&self, coin_name: &str) -> Result<String> {
        let Some(coin_id) = self.prices.find_coin_id(coin_name).await? else {
            return Ok(format!("Could not find a coin with the name {coin_name}"));
        };

        let price = self.prices.usd_price(&coin_id).await?;
        tracing::debug!(%coin_name, %coin_id, %price, "Fetched price");

        Ok(format!("The current price of {coin_name} is ${price}"))
    }
}

#[async_trait]
impl Tool for CryptoPriceTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "GetCryptoPrice".into(),
            display_name: Some("Crypto Price".into()),
            description: "Get the current price of a cryptocurrency".into(),
            icon: Some("dollarsign.square.fill".into()),
            parameters: vec![
                ParameterSchema::required(
                    "coin_name",
                    ParamType::String,
                    "The full name of the coin to get the price for, for example: Bitcoin",
                ),
            ],
            category: Some("market_data".into()),
            has_side_effects: false,
        }
    }

    async fn execute(&self, call: &ToolCall) -> CoreResult<ToolResult> {
        let coin_name = call.str_arg("coin_name")?;

        match self.quote(coin_name).await {
            Ok(text) => Ok(ToolResult::success("GetCryptoPrice", text)),
            Err(e) => Ok(ToolResult::report("GetCryptoPrice", &e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn listing(server: &MockServer) {
        Mock::given(method("GET"))
            .and(path("/coins/list"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"id": "bitcoin", "symbol": "btc", "name": "Bitcoin"},
                {"id": "ethereum", "symbol": "eth", "name": "Ethereum"}
            ])))
            .mount(server)
            .await;
    }

    fn tool(server: &MockServer) -> CryptoPriceTool {
        let client = CoinGeckoClient::new(server.uri(), Duration::from_secs(5)).unwrap();
        CryptoPriceTool::new(Arc::new(client))
    }

    #[tokio::test]
    async fn test_price_is_looked_up_by_id() {
        let server = MockServer::start().await;
        listing(&server).await;
        Mock::given(method("GET"))
            .and(path("/simple/price"))
            .and(query_param("ids", "ethereum"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "ethereum": {"usd": 2650.5}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let call = ToolCall::new("GetCryptoPrice").arg("coin_name", "ethereum");
        let result = tool(&server).execute(&call).await.unwrap();

        assert_eq!(result.text(), Some("The current price of ethereum is $2650.5"));
    }

    #[tokio::test]
    async fn test_unknown_coin_skips_price_request() {
        let server = MockServer::start().await;
        listing(&server).await;
        Mock::given(method("GET"))
            .and(path("/simple/price"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let call = ToolCall::new("GetCryptoPrice").arg("coin_name", "Dogecoin");
        let result = tool(&server).execute(&call).await.unwrap();

        assert!(result.is_success());
        assert_eq!(result.text(), Some("Could not find a coin with the name Dogecoin"));
    }

    #[tokio::test]
    async fn test_listing_failure_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let call = ToolCall::new("GetCryptoPrice").arg("coin_name", "Bitcoin");
        let result = tool(&server).execute(&call).await.unwrap();

        assert_eq!(result.error().unwrap().message, "CoinGecko request failed");
    }
}
