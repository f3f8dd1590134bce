//! Error Types for the Yang tools

use thiserror::Error;

pub type Result<T> = std::result::Result<T, QuantError>;

#[derive(Error, Debug)]
pub enum QuantError {
    #[error("File '{0}' not found")]
    FileNotFound(String),

    #[error("Failed to read CSV '{path}'")]
    Csv {
        path: String,
        #[source]
        source: csv::Error,
    },

    #[error("Malformed CSV: {0}")]
    MalformedCsv(String),

    #[error("{service} request failed")]
    Request {
        service: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{service} returned an unexpected response: {message}")]
    UnexpectedResponse {
        service: &'static str,
        message: String,
    },

    #[error("WebDriver error: {0}")]
    WebDriver(String),

    #[error("Timed out after {0:?} waiting for the page to load")]
    PageLoadTimeout(std::time::Duration),

    #[error("Inference failed")]
    Inference(#[source] agent_core::AgentError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl QuantError {
    pub(crate) fn request(service: &'static str) -> impl FnOnce(reqwest::Error) -> Self {
        move |source| QuantError::Request { service, source }
    }

    pub(crate) fn unexpected(service: &'static str, message: impl Into<String>) -> Self {
        QuantError::UnexpectedResponse {
            service,
            message: message.into(),
        }
    }
}

impl From<QuantError> for agent_core::AgentError {
    fn from(err: QuantError) -> Self {
        match err {
            QuantError::Inference(inner) => inner,
            other => {
                let report = agent_core::ErrorReport::from_error(&other);
                let chain: Vec<String> = std::iter::once(report.message).chain(report.detail).collect();
                agent_core::AgentError::ToolExecution(chain.join(": "))
            }
        }
    }
}
