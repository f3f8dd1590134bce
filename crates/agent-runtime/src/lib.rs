//! # agent-runtime
//!
//! Runtime providers for agent-core tools.
//!
//! ## Providers
//!
//! - **Ollama** (default): Local LLM inference via Ollama, including vision
//!   models and JSON-constrained output
//!
//! ## Usage
//!
//! ```rust,ignore
//! use agent_runtime::ollama::OllamaProvider;
//!
//! let provider: Arc<dyn LlmProvider> = Arc::new(OllamaProvider::from_env());
//! let completion = provider.complete(&messages, &options).await?;
//! ```

#[cfg(feature = "ollama")]
pub mod ollama;

#[cfg(feature = "ollama")]
pub use ollama::{OllamaConfig, OllamaProvider};

// Re-export core types for convenience
pub use agent_core::{AgentError, LlmProvider, Message, Result, Role};
