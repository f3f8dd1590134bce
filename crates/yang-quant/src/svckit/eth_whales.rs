//! ETH Whales Tool

use std::sync::Arc;
use async_trait::async_trait;

use agent_core::{
    Tool, ToolSchema, ToolCall, ToolResult,
    tool::{ParamType, ParameterSchema},
    Result as CoreResult,
};

use crate::error::Result;
use crate::feeds::ClankClient;
use crate::model::display_value;

/// Upper bound on transactions listed per call
pub const MAX_WHALE_RESULTS: u64 = 5;

/// Tool for recent large Ethereum transfers
pub struct EthWhalesTool {
    whales: Arc<ClankClient>,
}

impl EthWhalesTool {
    pub fn new(whales: Arc<ClankClient>) -> Self {
        Self { whales }
    }

    async fn summarize(&self, max_results: u64) -> Result<String> {
        let average = self.whales.ethereum_whale_average().await?;

        let n = max_results.min(MAX_WHALE_RESULTS);
        let transactions = self.whales.latest_ethereum_transactions(n as usize).await?;

        let mut out = format!(
            "The average value of the latest Ethereum whale transactions is ${} ETH\nThe latest {} 'whale' transactions are: \n",
            display_value(&average.avg_amount.value),
            n
        );

        for tx in &transactions {
            out.push_str(&format!(
                "- Transaction from {} to {} for {} ETH / {} \n",
                display_value(&tx.from_owner),
                display_value(&tx.to_owner),
                display_value(&tx.format_amount),
                display_value(&tx.amount_usd),
            ));
        }

        Ok(out)
    }
}

#[async_trait]
impl Tool for EthWhalesTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "GetETHWhales".into(),
            display_name: Some("ETH Whales".into()),
            description: "Find recent ETH whale transactions".into(),
            icon: None,
            parameters: vec![
                ParameterSchema::required(
                    "max_results",
                    ParamType::Integer,
                    "The maximum number of latest transactions to return, limit is 5",
                ),
            ],
            category: Some("market_data".into()),
            has_side_effects: false,
        }
    }

    async fn execute(&self, call: &ToolCall) -> CoreResult<ToolResult> {
        let max_results = call.u64_arg("max_results")?;

        match self.summarize(max_results).await {
            Ok(text) => Ok(ToolResult::success("GetETHWhales", text)),
            Err(e) => Ok(ToolResult::report("GetETHWhales", &e)),
        }
    }
}
