//! Test doubles for the inference and capture seams

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use agent_core::provider::{Completion, GenerationOptions, LlmProvider, ModelInfo};
use agent_core::{AgentError, Message};
use async_trait::async_trait;

use crate::capture::PageCapture;
use crate::error::{QuantError, Result};

/// Provider that answers from a queue and records every request
#[derive(Default)]
pub(crate) struct ScriptedProvider {
    replies: Mutex<VecDeque<agent_core::Result<String>>>,
    calls: Mutex<Vec<(Vec<Message>, GenerationOptions)>>,
}

impl ScriptedProvider {
    pub(crate) fn replying(contents: &[&str]) -> Arc<Self> {
        let provider = Self::default();
        provider
            .replies
            .lock()
            .unwrap()
            .extend(contents.iter().map(|c| Ok(c.to_string())));
        Arc::new(provider)
    }

    pub(crate) fn failing(message: &str) -> Arc<Self> {
        let provider = Self::default();
        provider
            .replies
            .lock()
            .unwrap()
            .push_back(Err(AgentError::Provider(message.to_string())));
        Arc::new(provider)
    }

    pub(crate) fn calls(&self) -> Vec<(Vec<Message>, GenerationOptions)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmProvider for ScriptedProvider {
    fn name(&self) -> &str {
        "Scripted"
    }

    async fn health_check(&self) -> agent_core::Result<bool> {
        Ok(true)
    }

    async fn complete(
        &self,
        messages: &[Message],
        options: &GenerationOptions,
    ) -> agent_core::Result<Completion> {
        self.calls
            .lock()
            .unwrap()
            .push((messages.to_vec(), options.clone()));

        let content = self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(AgentError::Provider("no scripted reply left".into())))?;

        Ok(Completion {
            content,
            model: options.model.clone(),
        })
    }

    async fn list_models(&self) -> agent_core::Result<Vec<ModelInfo>> {
        Ok(Vec::new())
    }
}

/// Capture that returns a fixed screenshot (or failure) and records URLs
pub(crate) struct StaticCapture {
    outcome: std::result::Result<String, String>,
    urls: Mutex<Vec<(String, Duration)>>,
}

impl StaticCapture {
    pub(crate) fn ok(png_base64: &str) -> Arc<Self> {
        Arc::new(Self {
            outcome: Ok(png_base64.to_string()),
            urls: Mutex::new(Vec::new()),
        })
    }

    pub(crate) fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            outcome: Err(message.to_string()),
            urls: Mutex::new(Vec::new()),
        })
    }

    pub(crate) fn requests(&self) -> Vec<(String, Duration)> {
        self.urls.lock().unwrap().clone()
    }
}

#[async_trait]
impl PageCapture for StaticCapture {
    async fn screenshot(&self, url: &str, timeout: Duration) -> Result<String> {
        self.urls.lock().unwrap().push((url.to_string(), timeout));
        self.outcome.clone().map_err(QuantError::WebDriver)
    }
}
