//! ETH Cash Flow Tool
//!
//! Screenshots the Farside ETH ETF flow table and has a vision model
//! transcribe it.

use std::sync::Arc;
use std::time::Duration;
use async_trait::async_trait;

use agent_core::{
    GenerationOptions, LlmProvider, Message,
    Tool, ToolSchema, ToolCall, ToolResult,
    tool::{ParamType, ParameterSchema},
    Result as CoreResult,
};

use crate::capture::PageCapture;
use crate::error::{QuantError, Result};

/// Tool for ETH fund flow tables
pub struct EthCashFlowTool {
    capture: Arc<dyn PageCapture>,
    provider: Arc<dyn LlmProvider>,
    page_url: String,
    vision_model: String,
    page_load_timeout: Duration,
}

impl EthCashFlowTool {
    pub fn new(
        capture: Arc<dyn PageCapture>,
        provider: Arc<dyn LlmProvider>,
        page_url: impl Into<String>,
        vision_model: impl Into<String>,
        page_load_timeout: Duration,
    ) -> Self {
        Self {
            capture,
            provider,
            page_url: page_url.into(),
            vision_model: vision_model.into(),
            page_load_timeout,
        }
    }

    async fn transcribe(&self, as_markdown: bool) -> Result<String> {
        let screenshot = self
            .capture
            .screenshot(&self.page_url, self.page_load_timeout)
            .await?;

        let conversion_format = if as_markdown { "Markdown" } else { "CSV" };
        let instruction = format!(
            "Convert this data to a {conversion_format} table, ensure you preserve units and values"
        );

        let options = GenerationOptions {
            model: self.vision_model.clone(),
            ..Default::default()
        };

        let completion = self
            .provider
            .complete(&[Message::user(instruction).with_image(screenshot)], &options)
            .await
            .map_err(QuantError::Inference)?;

        Ok(completion.content)
    }
}

#[async_trait]
impl Tool for EthCashFlowTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "ETHCashFlowData".into(),
            display_name: Some("ETH Cash Flows".into()),
            description: "Gather current data on ETH flows as a CSV or Markdown table".into(),
            icon: None,
            parameters: vec![
                ParameterSchema::required(
                    "as_markdown",
                    ParamType::Boolean,
                    "Return the data as a markdown table instead of a CSV",
                ),
            ],
            category: Some("market_data".into()),
            has_side_effects: false,
        }
    }

    async fn execute(&self, call: &ToolCall) -> CoreResult<ToolResult> {
        let as_markdown = call.bool_arg("as_markdown")?;

        match self.transcribe(as_markdown).await {
            Ok(table) => Ok(ToolResult::success("ETHCashFlowData", table)),
            Err(e) => Ok(ToolResult::report("ETHCashFlowData", &e)),
        }
    }
}
