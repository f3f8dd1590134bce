//! Trading Strategy Tool
//!
//! Asks the model for a strategy for a coin. Like the sentiment tool, model
//! output that does not match the schema is returned as `Err` to the host.

use std::sync::Arc;
use async_trait::async_trait;
use serde_json::json;

use agent_core::{
    Conversation, GenerationOptions, LlmProvider, ResponseFormat,
    Tool, ToolSchema, ToolCall, ToolResult,
    provider::complete_json,
    tool::{ParamType, ParameterSchema},
    Result as CoreResult,
};

use crate::model::StrategyReading;

const SYSTEM_PROMPT: &str = "Generate a trading strategy based on the current market conditions described in the context for the given cryptocurrency. ";

pub fn strategy_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "strategy": {
                "type": "string",
                "description": "The trading strategy to follow, for example: 'Buy high, sell low!'"
            }
        },
        "required": ["strategy"]
    })
}

/// Tool for model-generated trading strategies
pub struct TradingStrategyTool {
    provider: Arc<dyn LlmProvider>,
    model: String,
}

impl TradingStrategyTool {
    pub fn new(provider: Arc<dyn LlmProvider>, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
        }
    }
}

#[async_trait]
impl Tool for TradingStrategyTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "GetTradingStrategy".into(),
            display_name: Some("Trading Strategy".into()),
            description: "Suggests a trading strategy for a cryptocurrency".into(),
            icon: None,
            parameters: vec![
                ParameterSchema::required("coin_name", ParamType::String, "The coin to build a strategy for"),
            ],
            category: Some("trading".into()),
            has_side_effects: false,
        }
    }

    async fn execute(&self, call: &ToolCall) -> CoreResult<ToolResult> {
        let coin_name = call.str_arg("coin_name")?;

        let prompt = Conversation::with_system_prompt(SYSTEM_PROMPT)
            .add(coin_name)
            .add("What is the best trading strategy for this coin?");

        let options = GenerationOptions {
            model: self.model.clone(),
            temperature: 0.75,
            max_tokens: 100,
            response_format: Some(ResponseFormat::json_schema(strategy_schema())),
            ..Default::default()
        };

        let reading: StrategyReading = complete_json(self.provider.as_ref(), prompt.messages(), &options).await?;

        Ok(ToolResult::success(
            "GetTradingStrategy",
            format!("The best trading strategy for {} is: {}", coin_name, reading.strategy),
        ))
    }
}
