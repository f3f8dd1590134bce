//! Configuration
//!
//! `AppConfig` is read once at startup (environment + persisted state) and
//! shared read-only by every tool. `InstanceState` is the part the host
//! persists across restarts.

use std::path::Path;
use std::time::Duration;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::Result;

pub const PERPLEXITY_URL: &str = "https://api.perplexity.ai/chat/completions";
pub const PERPLEXITY_MODEL: &str = "llama-3.1-sonar-large-128k-online";
pub const COINGECKO_URL: &str = "https://api.coingecko.com/api/v3";
pub const CLANK_URL: &str = "https://api.clankapp.com/v2";
pub const CASH_FLOW_URL: &str = "https://farside.co.uk/eth/";
pub const WEBDRIVER_URL: &str = "http://localhost:9515";

/// Where the host keeps `InstanceState` unless `YANG_STATE_PATH` says otherwise
pub const DEFAULT_STATE_PATH: &str = "yang_state.json";

/// State that survives restarts
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InstanceState {
    /// Maximum tolerated loss in USD
    pub max_losses: Decimal,
}

impl Default for InstanceState {
    fn default() -> Self {
        Self {
            max_losses: dec!(300000.0),
        }
    }
}

impl InstanceState {
    /// Load from `path`, falling back to defaults when the file does not exist
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::info!(path = %path.display(), "No saved state, using defaults");
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(path)?;
        let state = serde_json::from_str(&raw)?;
        tracing::info!(path = %path.display(), "Loaded saved state");
        Ok(state)
    }

    /// Write to `path` as pretty JSON, creating parent directories
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        tracing::info!(path = %path.display(), "Saved state");
        Ok(())
    }
}

/// Base URLs of the services the tools talk to
#[derive(Clone, Debug)]
pub struct Endpoints {
    pub perplexity: String,
    pub coingecko: String,
    pub clank: String,
    pub webdriver: String,
    pub cash_flow_page: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            perplexity: PERPLEXITY_URL.into(),
            coingecko: COINGECKO_URL.into(),
            clank: CLANK_URL.into(),
            webdriver: WEBDRIVER_URL.into(),
            cash_flow_page: CASH_FLOW_URL.into(),
        }
    }
}

/// Application configuration
#[derive(Clone)]
pub struct AppConfig {
    /// Maximum tolerated loss in USD (read-only for tools)
    pub max_losses: Decimal,

    /// Search API key; a missing key fails at call time, not at startup
    pub perplexity_api_key: Option<String>,

    /// Search model identifier
    pub perplexity_model: String,

    /// Model for schema-constrained inference
    pub inference_model: String,

    /// Model for screenshot transcription
    pub vision_model: String,

    /// Upper bound on the browser page-load wait
    pub page_load_timeout: Duration,

    /// Upper bound on each outbound HTTP request
    pub request_timeout: Duration,

    pub endpoints: Endpoints,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            max_losses: InstanceState::default().max_losses,
            perplexity_api_key: None,
            perplexity_model: PERPLEXITY_MODEL.into(),
            inference_model: "llama3.2".into(),
            vision_model: "llama3.2-vision".into(),
            page_load_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            endpoints: Endpoints::default(),
        }
    }
}

impl AppConfig {
    /// Build from environment variables on top of persisted state
    pub fn from_env(state: &InstanceState) -> Self {
        let defaults = Self::default();

        Self {
            max_losses: state.max_losses,
            perplexity_api_key: std::env::var("PERPLEXITY_API_KEY").ok().filter(|k| !k.is_empty()),
            inference_model: std::env::var("YANG_MODEL").unwrap_or(defaults.inference_model),
            vision_model: std::env::var("YANG_VISION_MODEL").unwrap_or(defaults.vision_model),
            endpoints: Endpoints {
                webdriver: std::env::var("WEBDRIVER_URL").unwrap_or(defaults.endpoints.webdriver),
                ..defaults.endpoints
            },
            ..defaults
        }
    }

    /// The persistable part of this configuration
    pub fn state(&self) -> InstanceState {
        InstanceState {
            max_losses: self.max_losses,
        }
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("max_losses", &self.max_losses)
            .field("perplexity_api_key", &self.perplexity_api_key.as_ref().map(|_| "<redacted>"))
            .field("perplexity_model", &self.perplexity_model)
            .field("inference_model", &self.inference_model)
            .field("vision_model", &self.vision_model)
            .field("page_load_timeout", &self.page_load_timeout)
            .field("request_timeout", &self.request_timeout)
            .field("endpoints", &self.endpoints)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.max_losses, dec!(300000));
        assert_eq!(config.page_load_timeout, Duration::from_secs(10));
        assert_eq!(config.endpoints.coingecko, COINGECKO_URL);
    }

    #[test]
    fn test_debug_redacts_key() {
        let config = AppConfig {
            perplexity_api_key: Some("pplx-secret".into()),
            ..Default::default()
        };
        let debug = format!("{:?}", config);
        assert!(!debug.contains("pplx-secret"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_state_survives_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("state.json");

        let state = InstanceState { max_losses: dec!(1250.50) };
        state.save(&path).unwrap();

        let loaded = InstanceState::load_or_default(&path).unwrap();
        assert_eq!(loaded, state);
    }

    #[test]
    fn test_missing_state_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = InstanceState::load_or_default(&dir.path().join("absent.json")).unwrap();
        assert_eq!(loaded, InstanceState::default());
    }
}
