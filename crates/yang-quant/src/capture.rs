//! Page Capture
//!
//! Headless-browser screenshots. `WebDriverCapture` speaks the W3C WebDriver
//! protocol to a running driver (e.g. `chromedriver --port=9515`).

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use crate::error::{QuantError, Result};
use crate::feeds::http_client;

/// Something that can load a page and screenshot it (Strategy pattern)
#[async_trait]
pub trait PageCapture: Send + Sync {
    /// Load `url`, wait up to `timeout` for the document to finish loading,
    /// and return a base64-encoded PNG screenshot.
    async fn screenshot(&self, url: &str, timeout: Duration) -> Result<String>;
}

/// Every WebDriver response wraps its payload in `value`
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    value: T,
}

#[derive(Debug, Deserialize)]
struct NewSession {
    #[serde(rename = "sessionId")]
    session_id: String,
}

#[derive(Debug, Deserialize)]
struct DriverError {
    error: String,
    #[serde(default)]
    message: String,
}

const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Headless Chrome through a WebDriver endpoint
#[derive(Clone, Debug)]
pub struct WebDriverCapture {
    client: reqwest::Client,
    base_url: String,
}

impl WebDriverCapture {
    pub fn new(base_url: impl Into<String>, request_timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: http_client(request_timeout)?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    async fn command<T: serde::de::DeserializeOwned>(
        &self,
        method: reqwest::Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.client.request(method, &url);
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request
            .send()
            .await
            .map_err(QuantError::request("WebDriver"))?;

        if !response.status().is_success() {
            let status = response.status();
            let detail = response
                .json::<Envelope<DriverError>>()
                .await
                .map(|e| format!("{}: {}", e.value.error, e.value.message))
                .unwrap_or_else(|_| status.to_string());
            return Err(QuantError::WebDriver(detail));
        }

        response
            .json::<Envelope<T>>()
            .await
            .map(|e| e.value)
            .map_err(QuantError::request("WebDriver"))
    }

    async fn open_session(&self) -> Result<String> {
        let capabilities = json!({
            "capabilities": {
                "alwaysMatch": {
                    "browserName": "chrome",
                    "goog:chromeOptions": {"args": ["--headless", "--disable-gpu"]}
                }
            }
        });

        let session: NewSession = self
            .command(reqwest::Method::POST, "/session", Some(capabilities))
            .await?;
        Ok(session.session_id)
    }

    async fn wait_until_loaded(&self, session: &str, timeout: Duration) -> Result<()> {
        let script = json!({"script": "return document.readyState", "args": []});
        let path = format!("/session/{session}/execute/sync");

        let poll = async {
            loop {
                let state: String = self
                    .command(reqwest::Method::POST, &path, Some(script.clone()))
                    .await?;
                if state == "complete" {
                    break;
                }
                tokio::time::sleep(POLL_INTERVAL).await;
            }
            Ok::<(), QuantError>(())
        };

        tokio::time::timeout(timeout, poll)
            .await
            .map_err(|_| QuantError::PageLoadTimeout(timeout))?
    }

    async fn capture_in_session(&self, session: &str, url: &str, timeout: Duration) -> Result<String> {
        self.command::<serde_json::Value>(
            reqwest::Method::POST,
            &format!("/session/{session}/url"),
            Some(json!({"url": url})),
        )
        .await?;

        self.wait_until_loaded(session, timeout).await?;

        self.command(reqwest::Method::GET, &format!("/session/{session}/screenshot"), None)
            .await
    }
}

#[async_trait]
impl PageCapture for WebDriverCapture {
    async fn screenshot(&self, url: &str, timeout: Duration) -> Result<String> {
        let session = self.open_session().await?;
        tracing::debug!(%session, url, "WebDriver session opened");

        let result = self.capture_in_session(&session, url, timeout).await;

        // Always release the browser, even when the capture failed
        if let Err(e) = self
            .command::<serde_json::Value>(reqwest::Method::DELETE, &format!("/session/{session}"), None)
            .await
        {
            tracing::warn!(%session, error = %e, "Failed to close WebDriver session");
        }

        result
    }
}
