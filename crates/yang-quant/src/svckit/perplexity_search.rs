//! Perplexity Search Tool

use std::sync::Arc;
use async_trait::async_trait;

use agent_core::{
    Tool, ToolSchema, ToolCall, ToolResult,
    tool::{ParamType, ParameterSchema},
    Result as CoreResult,
};

use crate::search::PerplexityClient;

/// Tool for web-grounded search answers
pub struct PerplexitySearchTool {
    search: Arc<PerplexityClient>,
}

impl PerplexitySearchTool {
    pub fn new(search: Arc<PerplexityClient>) -> Self {
        Self { search }
    }
}

#[async_trait]
impl Tool for PerplexitySearchTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "PerplexitySearch".into(),
            display_name: Some("Perplexity Search".into()),
            description: "Uses the Perplexity AI search API to find relevant information".into(),
            icon: Some("magnifyingglass.circle.fill".into()),
            parameters: vec![
                ParameterSchema::required("search_query", ParamType::String, "What to search for"),
            ],
            category: Some("research".into()),
            has_side_effects: false,
        }
    }

    async fn execute(&self, call: &ToolCall) -> CoreResult<ToolResult> {
        let query = call.str_arg("search_query")?;

        match self.search.search(query).await {
            Ok(answer) => Ok(ToolResult::success("PerplexitySearch", answer)),
            Err(e) => Ok(ToolResult::report("PerplexitySearch", &e)),
        }
    }
}
