//! # yang-quant
//!
//! Tools for "His Name Is Yang", a crypto research agent that reads the market
//! through public APIs and a couple of hosted models.
//!
//! ## Tools
//!
//! ```text
//! ┌────────────────────────────────────┬──────────────────────────────────────┐
//! │ GatherInverseCramerMarketSentiment │ search + inference, inverted stance  │
//! │ PerplexitySearch                   │ web-grounded search answer           │
//! │ ETHCashFlowData                    │ screenshot + vision transcription    │
//! │ AnalyzeCSV                         │ local CSV shape and column types     │
//! │ BuildReport                        │ markdown report file                 │
//! │ GetTradingStrategy                 │ inference                            │
//! │ GetCryptoPrice                     │ CoinGecko                            │
//! │ GetETHWhales                       │ ClankApp                             │
//! │ OpenPosition                       │ acknowledgement only, no trade       │
//! └────────────────────────────────────┴──────────────────────────────────────┘
//! ```
//!
//! Most tools turn their own failures into an error report the host can show.
//! `GatherInverseCramerMarketSentiment` and `GetTradingStrategy` do not: their
//! faults come back as `Err`.

pub mod capture;
pub mod config;
pub mod error;
pub mod feeds;
pub mod model;
pub mod search;
pub mod svckit;

#[cfg(test)]
mod testing;

use std::sync::Arc;

use agent_core::{LlmProvider, ToolRegistry};

pub use capture::{PageCapture, WebDriverCapture};
pub use config::{AppConfig, InstanceState};
pub use error::{QuantError, Result};
pub use feeds::{ClankClient, CoinGeckoClient};
pub use model::AppMetadata;
pub use search::PerplexityClient;

/// Re-export tools for easy registration
pub mod tools {
    pub use crate::svckit::{
        AnalyzeCsvTool,
        BuildReportTool,
        CryptoPriceTool,
        EthCashFlowTool,
        EthWhalesTool,
        InverseCramerSentimentTool,
        OpenPositionTool,
        PerplexitySearchTool,
        TradingStrategyTool,
    };
}

/// Shared clients the tools are built from
#[derive(Clone)]
pub struct Services {
    pub config: Arc<AppConfig>,
    pub provider: Arc<dyn LlmProvider>,
    pub search: Arc<PerplexityClient>,
    pub prices: Arc<CoinGeckoClient>,
    pub whales: Arc<ClankClient>,
    pub capture: Arc<dyn PageCapture>,
}

impl Services {
    /// Build the HTTP clients described by `config`. Nothing is contacted yet.
    pub fn new(config: Arc<AppConfig>, provider: Arc<dyn LlmProvider>) -> Result<Self> {
        let timeout = config.request_timeout;
        let endpoints = &config.endpoints;

        let search = PerplexityClient::new(
            endpoints.perplexity.clone(),
            config.perplexity_model.clone(),
            config.perplexity_api_key.clone(),
            timeout,
        )?;
        let prices = CoinGeckoClient::new(endpoints.coingecko.clone(), timeout)?;
        let whales = ClankClient::new(endpoints.clank.clone(), timeout)?;
        let capture = WebDriverCapture::new(endpoints.webdriver.clone(), timeout)?;

        Ok(Self {
            search: Arc::new(search),
            prices: Arc::new(prices),
            whales: Arc::new(whales),
            capture: Arc::new(capture),
            config,
            provider,
        })
    }
}

/// Registry holding all nine tools
pub fn build_registry(services: &Services) -> ToolRegistry {
    use tools::*;

    let config = &services.config;
    let mut registry = ToolRegistry::new();

    registry.register(InverseCramerSentimentTool::new(
        services.search.clone(),
        services.provider.clone(),
        config.inference_model.clone(),
    ));
    registry.register(PerplexitySearchTool::new(services.search.clone()));
    registry.register(EthCashFlowTool::new(
        services.capture.clone(),
        services.provider.clone(),
        config.endpoints.cash_flow_page.clone(),
        config.vision_model.clone(),
        config.page_load_timeout,
    ));
    registry.register(AnalyzeCsvTool);
    registry.register(BuildReportTool);
    registry.register(TradingStrategyTool::new(
        services.provider.clone(),
        config.inference_model.clone(),
    ));
    registry.register(CryptoPriceTool::new(services.prices.clone()));
    registry.register(EthWhalesTool::new(services.whales.clone()));
    registry.register(OpenPositionTool);

    tracing::debug!(tools = registry.len(), "Registered Yang tools");
    registry
}
