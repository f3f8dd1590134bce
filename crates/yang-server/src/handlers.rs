//! HTTP Handlers

use std::collections::HashMap;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use agent_core::{AgentError, ToolCall, ToolResult, ToolSchema};
use yang_quant::AppMetadata;

use crate::state::AppState;

// ============================================================================
// Request / Response Types
// ============================================================================

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub provider_connected: bool,
    pub tools: usize,
}

#[derive(Debug, Deserialize)]
pub struct InvokeRequest {
    #[serde(default)]
    pub arguments: HashMap<String, serde_json::Value>,
    #[serde(default)]
    pub id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

/// An `AgentError` that escaped the registry, rendered as JSON
pub struct ApiError(AgentError);

impl From<AgentError> for ApiError {
    fn from(err: AgentError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = match &self.0 {
            AgentError::ToolNotFound(_) => (StatusCode::NOT_FOUND, "TOOL_NOT_FOUND"),
            AgentError::ToolValidation(_) => (StatusCode::BAD_REQUEST, "INVALID_ARGUMENTS"),
            AgentError::Provider(_) | AgentError::ProviderUnavailable(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "PROVIDER_ERROR")
            }
            _ => (StatusCode::INTERNAL_SERVER_ERROR, "TOOL_FAILED"),
        };

        if status.is_server_error() {
            tracing::error!(error = %self.0, "Tool invocation failed");
        }

        let body = ErrorResponse {
            error: self.0.user_message(),
            code: code.into(),
        };

        (status, Json(body)).into_response()
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let provider_connected = state.provider.health_check().await.unwrap_or(false);

    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        provider_connected,
        tools: state.tools.len(),
    })
}

/// App identity for the host launcher
pub async fn app_metadata(State(state): State<AppState>) -> Json<AppMetadata> {
    Json(state.metadata.as_ref().clone())
}

/// Tool manifest, sorted by name
pub async fn list_tools(State(state): State<AppState>) -> Json<Vec<ToolSchema>> {
    Json(state.tools.schemas())
}

/// Invoke one tool by name
pub async fn invoke_tool(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(payload): Json<InvokeRequest>,
) -> Result<Json<ToolResult>, ApiError> {
    let call = ToolCall {
        name,
        arguments: payload.arguments,
        id: Some(payload.id.unwrap_or_else(|| uuid::Uuid::new_v4().to_string())),
    };

    let result = state.tools.execute(&call).await?;
    Ok(Json(result))
}
