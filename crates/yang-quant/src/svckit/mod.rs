//! Service Kit - Agent Tools
//!
//! Domain-specific tools that implement `agent_core::Tool` for Yang.

mod cramer_sentiment;
mod crypto_price;
mod csv_analyzer;
mod eth_cash_flow;
mod eth_whales;
mod open_position;
mod perplexity_search;
mod report_builder;
mod trading_strategy;

pub use cramer_sentiment::{sentiment_schema, InverseCramerSentimentTool};
pub use crypto_price::CryptoPriceTool;
pub use csv_analyzer::{analyze_csv, AnalyzeCsvTool};
pub use eth_cash_flow::EthCashFlowTool;
pub use eth_whales::{EthWhalesTool, MAX_WHALE_RESULTS};
pub use open_position::OpenPositionTool;
pub use perplexity_search::PerplexitySearchTool;
pub use report_builder::{render_report, BuildReportTool, REPORT_FILENAME};
pub use trading_strategy::{strategy_schema, TradingStrategyTool};
