//! Inverse Cramer Sentiment Tool
//!
//! Searches for Jim Cramer's latest take on a subject, has the model classify
//! it, and recommends the opposite stance.
//!
//! Failures are not caught here: a failed search, a failed inference call,
//! or model output outside the schema is returned as `Err` to the host.

use std::sync::Arc;
use async_trait::async_trait;
use serde_json::json;

use agent_core::{
    Conversation, GenerationOptions, LlmProvider, ResponseFormat,
    Tool, ToolSchema, ToolCall, ToolResult,
    provider::complete_json,
    tool::{ParamType, ParameterSchema},
    Result as CoreResult,
};

use crate::model::{display_value, SentimentReading};
use crate::search::PerplexityClient;

const SYSTEM_PROMPT: &str = "Analyze the sentiment and opinion of the following information, and return your insights in the given format. ";

/// JSON Schema the model must answer with
pub fn sentiment_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "sentiment": {
                "type": "string",
                "enum": ["Bullish", "Bearish", "Neutral"],
                "description": "The overall sentiment of the prediction, with Bullish being generally positive, and Bearish being generally negative, avoid using neutral if possible"
            },
            "confidence": {
                "type": "number",
                "description": "The confidence of the sentiment prediction, 0-100%"
            }
        },
        "required": ["sentiment", "confidence"]
    })
}

/// Tool for contrarian sentiment
pub struct InverseCramerSentimentTool {
    search: Arc<PerplexityClient>,
    provider: Arc<dyn LlmProvider>,
    model: String,
}

impl InverseCramerSentimentTool {
    pub fn new(search: Arc<PerplexityClient>, provider: Arc<dyn LlmProvider>, model: impl Into<String>) -> Self {
        Self {
            search,
            provider,
            model: model.into(),
        }
    }

    /// Classify `opinion` with the model
    async fn classify(&self, opinion: &str) -> CoreResult<SentimentReading> {
        let prompt = Conversation::with_system_prompt(SYSTEM_PROMPT)
            .add(opinion)
            .add(format!("What is the sentiment here? {opinion}"));

        let options = GenerationOptions {
            model: self.model.clone(),
            temperature: 0.75,
            max_tokens: 100,
            response_format: Some(ResponseFormat::json_schema(sentiment_schema())),
            ..Default::default()
        };

        complete_json(self.provider.as_ref(), prompt.messages(), &options).await
    }
}

#[async_trait]
impl Tool for InverseCramerSentimentTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "GatherInverseCramerMarketSentiment".into(),
            display_name: Some("Inverse Cramer".into()),
            description: "Gathers the stance to take based on the inverse market sentiment from Cramer's Mad Money".into(),
            icon: Some("dollarsign.square.fill".into()),
            parameters: vec![
                ParameterSchema::required(
                    "subject",
                    ParamType::String,
                    "The subject of interest to gather sentiment for example: Ethereum",
                ),
            ],
            category: Some("research".into()),
            has_side_effects: false,
        }
    }

    async fn execute(&self, call: &ToolCall) -> CoreResult<ToolResult> {
        let subject = call.str_arg("subject")?;

        let opinion = self
            .search
            .search(&format!("Jim Cramer's most recent opinion on {subject}"))
            .await?;

        let reading = self.classify(&opinion).await?;
        let stance = reading.inverted();

        tracing::info!(%subject, cramer = %reading.sentiment, %stance, "Inverted Cramer sentiment");

        Ok(ToolResult::success(
            "GatherInverseCramerMarketSentiment",
            format!(
                "Based on the inverse of Cramer's sentiment, it is {}% probable that you should take a {} stance on {}.",
                display_value(&reading.confidence), stance, subject
            ),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedProvider;
    use agent_core::AgentError;
    use std::time::Duration;
    use wiremock::matchers::{body_string_contains, method};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn search_answering(answer: &str) -> (MockServer, Arc<PerplexityClient>) {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_string_contains("Jim Cramer's most recent opinion on Ethereum"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{"message": {"content": answer}}]
            })))
            .mount(&server)
            .await;

        let client = PerplexityClient::new(server.uri(), "m", Some("k".into()), Duration::from_secs(5)).unwrap();
        (server, Arc::new(client))
    }

    async fn run(model_reply: &str) -> (CoreResult<ToolResult>, Arc<ScriptedProvider>) {
        let (_server, search) = search_answering("Cramer loves ETH right now.").await;
        let provider = ScriptedProvider::replying(&[model_reply]);
        let tool = InverseCramerSentimentTool::new(search, provider.clone(), "yang");

        let call = ToolCall::new("GatherInverseCramerMarketSentiment").arg("subject", "Ethereum");
        (tool.execute(&call).await, provider)
    }

    #[tokio::test]
    async fn test_bullish_becomes_bearish() {
        let (result, provider) = run(r#"{"sentiment": "Bullish", "confidence": 85}"#).await;

        assert_eq!(
            result.unwrap().text(),
            Some("Based on the inverse of Cramer's sentiment, it is 85% probable that you should take a Bearish stance on Ethereum.")
        );

        let calls = provider.calls();
        let (messages, options) = &calls[0];
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[1].content, "Cramer loves ETH right now.");
        assert_eq!(messages[2].content, "What is the sentiment here? Cramer loves ETH right now.");
        assert_eq!(options.max_tokens, 100);
        assert_eq!(options.model, "yang");
        assert!(matches!(options.response_format, Some(ResponseFormat::JsonSchema { .. })));
    }

    #[tokio::test]
    async fn test_bearish_becomes_bullish() {
        let (result, _) = run(r#"{"sentiment": "Bearish", "confidence": 60.5}"#).await;
        let output = result.unwrap();
        assert!(output.text().unwrap().contains("60.5% probable"));
        assert!(output.text().unwrap().contains("take a Bullish stance"));
    }

    #[tokio::test]
    async fn test_neutral_falls_through_to_bullish() {
        let (result, _) = run(r#"{"sentiment": "Neutral", "confidence": 50}"#).await;
        assert!(result.unwrap().text().unwrap().contains("take a Bullish stance"));
    }

    #[tokio::test]
    async fn test_lowercase_label_falls_through_to_bullish() {
        let (result, _) = run(r#"{"sentiment": "bullish", "confidence": 70}"#).await;
        assert_eq!(
            result.unwrap().text(),
            Some("Based on the inverse of Cramer's sentiment, it is 70% probable that you should take a Bullish stance on Ethereum.")
        );
    }

    #[tokio::test]
    async fn test_unknown_label_falls_through_to_bullish() {
        let (result, _) = run(r#"{"sentiment": "Mixed", "confidence": 40}"#).await;
        assert!(result.unwrap().text().unwrap().contains("take a Bullish stance"));
    }

    #[tokio::test]
    async fn test_string_confidence_is_echoed() {
        let (result, _) = run(r#"{"sentiment": "Bearish", "confidence": "70"}"#).await;
        let output = result.unwrap();
        assert!(output.text().unwrap().contains("it is 70% probable"));
        assert!(output.text().unwrap().contains("take a Bullish stance"));
    }

    #[tokio::test]
    async fn test_malformed_model_output_propagates() {
        let (result, _) = run(r#"{"mood": "meh"}"#).await;
        assert!(matches!(result, Err(AgentError::Parse(_))));
    }

    #[tokio::test]
    async fn test_search_failure_propagates() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;
        let search = Arc::new(PerplexityClient::new(server.uri(), "m", None, Duration::from_secs(5)).unwrap());
        let provider = ScriptedProvider::replying(&[]);
        let tool = InverseCramerSentimentTool::new(search, provider.clone(), "yang");

        let call = ToolCall::new("GatherInverseCramerMarketSentiment").arg("subject", "Ethereum");
        match tool.execute(&call).await {
            Err(AgentError::ToolExecution(msg)) => {
                assert!(msg.starts_with("Perplexity request failed: "));
                assert!(msg.contains("401"));
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
        assert!(provider.calls().is_empty());
    }
}
