//! # agent-core
//!
//! Core tool framework with provider-agnostic LLM abstraction.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      Host runtime                            │
//! │  ┌─────────────┐  ┌─────────────┐  ┌─────────────────────┐  │
//! │  │  ToolCall   │──│    Tools    │──│   LlmProvider       │  │
//! │  │  (by name)  │  │   Registry  │  │   (Strategy)        │  │
//! │  └─────────────┘  └─────────────┘  └─────────────────────┘  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! The host picks a tool by name; the registry validates the arguments and
//! dispatches. Tools that need inference go through `LlmProvider`, so Ollama,
//! OpenAI, Anthropic, or any other backend can be swapped in.

pub mod provider;
pub mod tool;
pub mod message;
pub mod error;

pub use error::{AgentError, Result};
pub use message::{Conversation, Message, Role};
pub use provider::{GenerationOptions, LlmProvider, ResponseFormat};
pub use tool::{
    ErrorReport, ParamType, ParameterSchema, Tool, ToolCall, ToolFile, ToolOutput, ToolRegistry,
    ToolResult, ToolSchema,
};
