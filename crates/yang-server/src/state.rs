//! Application State

use std::sync::Arc;

use agent_core::{LlmProvider, ToolRegistry};
use yang_quant::AppMetadata;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// LLM provider (Ollama, etc.)
    pub provider: Arc<dyn LlmProvider>,

    /// Tool registry with all Yang tools
    pub tools: Arc<ToolRegistry>,

    /// Identity published to the host
    pub metadata: Arc<AppMetadata>,
}
