//! Open Position Tool
//!
//! Acknowledges a long or short position. No order is sent to any exchange.

use async_trait::async_trait;

use agent_core::{
    Tool, ToolSchema, ToolCall, ToolResult,
    tool::{ParamType, ParameterSchema},
    Result as CoreResult,
};

use crate::model::PositionSide;

pub struct OpenPositionTool;

#[async_trait]
impl Tool for OpenPositionTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "OpenPosition".into(),
            display_name: Some("Open Position".into()),
            description: "Open a long or short position on a cryptocurrency".into(),
            icon: Some("banknote".into()),
            parameters: vec![
                ParameterSchema::required(
                    "ticker",
                    ParamType::String,
                    "The ticker of the coin to open a position for, for example: BTC",
                ),
                ParameterSchema {
                    enum_values: Some(vec!["long".into(), "short".into()]),
                    ..ParameterSchema::required(
                        "position",
                        ParamType::String,
                        "The position to take, either 'long' or 'short'",
                    )
                },
            ],
            category: Some("trading".into()),
            has_side_effects: true,
        }
    }

    async fn execute(&self, call: &ToolCall) -> CoreResult<ToolResult> {
        let ticker = call.str_arg("ticker")?;
        let position = call.str_arg("position")?;

        let Some(side) = PositionSide::parse(position) else {
            return Ok(ToolResult::success(
                "OpenPosition",
                "Invalid position, must be either 'long' or 'short'",
            ));
        };

        tracing::info!(%ticker, %side, "Position acknowledged");

        Ok(ToolResult::success(
            "OpenPosition",
            format!("Opened a {side} position on {ticker}!"),
        ))
    }
}
