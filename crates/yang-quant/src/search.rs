//! Perplexity search
//!
//! Search-augmented chat completions. The answer text of the first choice is
//! the search result.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{QuantError, Result};
use crate::feeds::http_client;

const SERVICE: &str = "Perplexity";

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: String,
}

/// Client for the Perplexity chat-completions endpoint
#[derive(Clone)]
pub struct PerplexityClient {
    client: reqwest::Client,
    url: String,
    model: String,
    api_key: Option<String>,
}

impl PerplexityClient {
    pub fn new(
        url: impl Into<String>,
        model: impl Into<String>,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self> {
        Ok(Self {
            client: http_client(timeout)?,
            url: url.into(),
            model: model.into(),
            api_key,
        })
    }

    /// Ask the search model and return its answer.
    ///
    /// A missing API key is sent as an empty bearer token; the API rejects it.
    pub async fn search(&self, query: &str) -> Result<String> {
        let request = ChatRequest {
            model: &self.model,
            messages: [
                ChatMessage { role: "system", content: "" },
                ChatMessage { role: "user", content: query },
            ],
        };

        tracing::debug!(model = %self.model, "Perplexity search");

        let response: ChatResponse = self
            .client
            .post(&self.url)
            .header(reqwest::header::ACCEPT, "application/json")
            .bearer_auth(self.api_key.as_deref().unwrap_or_default())
            .json(&request)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(QuantError::request(SERVICE))?
            .json()
            .await
            .map_err(QuantError::request(SERVICE))?;

        response
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| QuantError::unexpected(SERVICE, "response contained no choices"))
    }
}

impl std::fmt::Debug for PerplexityClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PerplexityClient")
            .field("url", &self.url)
            .field("model", &self.model)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(server: &MockServer, key: Option<&str>) -> PerplexityClient {
        PerplexityClient::new(
            format!("{}/chat/completions", server.uri()),
            "llama-3.1-sonar-large-128k-online",
            key.map(String::from),
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_search_sends_fixed_model_and_empty_system_prompt() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("authorization", "Bearer pplx-test"))
            .and(body_json(serde_json::json!({
                "model": "llama-3.1-sonar-large-128k-online",
                "messages": [
                    {"role": "system", "content": ""},
                    {"role": "user", "content": "ETH outlook"}
                ]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": [{"message": {"role": "assistant", "content": "Mostly sideways."}}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let answer = client(&server, Some("pplx-test")).search("ETH outlook").await.unwrap();
        assert_eq!(answer, "Mostly sideways.");
    }

    #[tokio::test]
    async fn test_rejected_key_is_request_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
                "error": {"message": "Invalid API key"}
            })))
            .mount(&server)
            .await;

        let err = client(&server, None).search("anything").await.unwrap_err();
        assert!(matches!(err, QuantError::Request { service: "Perplexity", .. }));
    }

    #[tokio::test]
    async fn test_empty_choices() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"choices": []})))
            .mount(&server)
            .await;

        let err = client(&server, Some("k")).search("anything").await.unwrap_err();
        assert!(matches!(err, QuantError::UnexpectedResponse { .. }));
    }
}
