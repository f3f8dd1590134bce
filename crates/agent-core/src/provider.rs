//! LLM Provider Strategy Pattern
//!
//! Defines a common interface for all LLM providers (Ollama, OpenAI, Anthropic, etc.)
//! so tools can run inference without knowing the backend.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use agent_core::provider::{complete_json, GenerationOptions, ResponseFormat};
//!
//! let options = GenerationOptions {
//!     response_format: Some(ResponseFormat::json_schema(schema)),
//!     ..Default::default()
//! };
//! let reading: Reading = complete_json(provider.as_ref(), &messages, &options).await?;
//! ```

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{AgentError, Result};
use crate::message::Message;

/// Requested shape of the model output
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ResponseFormat {
    /// JSON constrained to the given JSON Schema
    JsonSchema { schema: serde_json::Value },
}

impl ResponseFormat {
    pub fn json_schema(schema: serde_json::Value) -> Self {
        ResponseFormat::JsonSchema { schema }
    }
}

/// Configuration for LLM generation
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GenerationOptions {
    /// Model identifier (e.g., "llama3.2", "gpt-4", "claude-3-sonnet")
    pub model: String,

    /// Temperature for sampling (0.0 = deterministic, 1.0 = creative)
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Maximum tokens to generate
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Top-p nucleus sampling
    #[serde(default = "default_top_p")]
    pub top_p: f32,

    /// Output constraint (None = free text)
    #[serde(default)]
    pub response_format: Option<ResponseFormat>,
}

fn default_temperature() -> f32 { 0.7 }
fn default_max_tokens() -> u32 { 2048 }
fn default_top_p() -> f32 { 0.9 }

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            model: "llama3.2".into(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            top_p: default_top_p(),
            response_format: None,
        }
    }
}

/// Response from an LLM completion
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Completion {
    /// The generated text
    pub content: String,

    /// Model that generated this response
    pub model: String,
}

/// Information about a model
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ModelInfo {
    pub id: String,
    pub name: String,
    pub supports_vision: bool,
}

/// Strategy trait for LLM providers
///
/// Implement this trait to add support for new LLM backends.
/// Tools work exclusively through this interface.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Provider name (e.g., "Ollama")
    fn name(&self) -> &str;

    /// Check if the provider is available and configured correctly
    async fn health_check(&self) -> Result<bool>;

    /// Generate a completion from messages
    async fn complete(
        &self,
        messages: &[Message],
        options: &GenerationOptions,
    ) -> Result<Completion>;

    /// List available models
    async fn list_models(&self) -> Result<Vec<ModelInfo>>;
}

/// Generate a completion and decode its content as JSON.
///
/// A completion that does not decode into `T` is an `AgentError::Parse`.
pub async fn complete_json<T: DeserializeOwned>(
    provider: &dyn LlmProvider,
    messages: &[Message],
    options: &GenerationOptions,
) -> Result<T> {
    let completion = provider.complete(messages, options).await?;
    decode_json(&completion.content)
}

/// Decode model output as JSON
pub fn decode_json<T: DeserializeOwned>(content: &str) -> Result<T> {
    serde_json::from_str(content.trim())
        .map_err(|e| AgentError::Parse(format!("{}: {}", e, content.trim())))
}
