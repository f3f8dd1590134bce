//! Tool System
//!
//! Extensible tool framework for agent capabilities.
//! Tools are registered once at startup and invoked by name on behalf of the host.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

use crate::error::{AgentError, Result};

/// Tool call request from the host
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ToolCall {
    /// Tool identifier
    pub name: String,

    /// Arguments as key-value pairs
    #[serde(default)]
    pub arguments: HashMap<String, serde_json::Value>,

    /// Optional call ID for tracking
    #[serde(default)]
    pub id: Option<String>,
}

impl ToolCall {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arguments: HashMap::new(),
            id: None,
        }
    }

    /// Add an argument (builder style)
    pub fn arg(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.arguments.insert(key.into(), value.into());
        self
    }

    /// Get a string argument or fail validation
    pub fn str_arg(&self, key: &str) -> Result<&str> {
        self.arguments
            .get(key)
            .and_then(|v| v.as_str())
            .ok_or_else(|| AgentError::ToolValidation(format!("Missing string argument: {}", key)))
    }

    /// Get a boolean argument or fail validation
    pub fn bool_arg(&self, key: &str) -> Result<bool> {
        self.arguments
            .get(key)
            .and_then(|v| v.as_bool())
            .ok_or_else(|| AgentError::ToolValidation(format!("Missing boolean argument: {}", key)))
    }

    /// Get a non-negative integer argument or fail validation
    pub fn u64_arg(&self, key: &str) -> Result<u64> {
        self.arguments
            .get(key)
            .and_then(|v| v.as_u64())
            .ok_or_else(|| {
                AgentError::ToolValidation(format!("Missing non-negative integer argument: {}", key))
            })
    }
}

/// Structured error payload handed back to the caller instead of a raw fault.
///
/// `detail` holds the chain of underlying causes, outermost first, so a model
/// can reason about what went wrong.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorReport {
    pub message: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub detail: Vec<String>,
}

impl ErrorReport {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            detail: Vec::new(),
        }
    }

    /// Build a report from an error and its `source()` chain
    pub fn from_error(err: &(dyn std::error::Error + 'static)) -> Self {
        let mut detail = Vec::new();
        let mut source = err.source();
        while let Some(cause) = source {
            detail.push(cause.to_string());
            source = cause.source();
        }

        Self {
            message: err.to_string(),
            detail,
        }
    }
}

impl std::fmt::Display for ErrorReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)?;
        for cause in &self.detail {
            write!(f, "\n  caused by: {}", cause)?;
        }
        Ok(())
    }
}

/// Named file artifact returned by a tool
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolFile {
    pub filename: String,
    pub content: String,
}

impl ToolFile {
    pub fn new(filename: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            content: content.into(),
        }
    }
}

/// What a tool hands back
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ToolOutput {
    /// Display string
    Text { text: String },

    /// Caught failure
    Error(ErrorReport),

    /// File for the host to persist or display
    File(ToolFile),
}

/// Result from tool execution
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ToolResult {
    /// Tool that was called
    pub name: String,

    /// Call ID (if provided in request)
    pub id: Option<String>,

    /// Output (text, error report, or file)
    pub output: ToolOutput,

    /// Structured data (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl ToolResult {
    pub fn success(name: impl Into<String>, output: impl Into<String>) -> Self {
        Self::with_output(name, ToolOutput::Text { text: output.into() })
    }

    pub fn failure(name: impl Into<String>, report: ErrorReport) -> Self {
        Self::with_output(name, ToolOutput::Error(report))
    }

    /// Convert a caught error into a failure result
    pub fn report(name: impl Into<String>, err: &(dyn std::error::Error + 'static)) -> Self {
        Self::failure(name, ErrorReport::from_error(err))
    }

    pub fn file(name: impl Into<String>, file: ToolFile) -> Self {
        Self::with_output(name, ToolOutput::File(file))
    }

    fn with_output(name: impl Into<String>, output: ToolOutput) -> Self {
        Self {
            name: name.into(),
            id: None,
            output,
            data: None,
        }
    }

    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = Some(data);
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Whether the tool produced something other than an error report
    pub fn is_success(&self) -> bool {
        !matches!(self.output, ToolOutput::Error(_))
    }

    /// Display text, if this is a text result
    pub fn text(&self) -> Option<&str> {
        match &self.output {
            ToolOutput::Text { text } => Some(text),
            _ => None,
        }
    }

    /// Error report, if this is a failure
    pub fn error(&self) -> Option<&ErrorReport> {
        match &self.output {
            ToolOutput::Error(report) => Some(report),
            _ => None,
        }
    }

    /// File artifact, if any
    pub fn as_file(&self) -> Option<&ToolFile> {
        match &self.output {
            ToolOutput::File(file) => Some(file),
            _ => None,
        }
    }
}

/// JSON types an argument can be declared with
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamType {
    String,
    Number,
    Integer,
    Boolean,
    Object,
    Array,
}

impl ParamType {
    /// Does the given JSON value satisfy this type?
    pub fn accepts(self, value: &serde_json::Value) -> bool {
        match self {
            ParamType::String => value.is_string(),
            ParamType::Number => value.is_number(),
            ParamType::Integer => value.is_i64() || value.is_u64(),
            ParamType::Boolean => value.is_boolean(),
            ParamType::Object => value.is_object(),
            ParamType::Array => value.is_array(),
        }
    }
}

impl std::fmt::Display for ParamType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ParamType::String => "string",
            ParamType::Number => "number",
            ParamType::Integer => "integer",
            ParamType::Boolean => "boolean",
            ParamType::Object => "object",
            ParamType::Array => "array",
        };
        write!(f, "{}", name)
    }
}

/// Parameter definition for tool schema
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ParameterSchema {
    /// Parameter name
    pub name: String,

    /// JSON type of the argument
    #[serde(rename = "type")]
    pub param_type: ParamType,

    /// Human-readable description
    pub description: String,

    /// Whether this parameter is required
    #[serde(default)]
    pub required: bool,

    /// Default value if not provided
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<serde_json::Value>,

    /// Enum of allowed values
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<serde_json::Value>>,
}

impl ParameterSchema {
    /// A required parameter with no default or enum
    pub fn required(name: impl Into<String>, param_type: ParamType, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            param_type,
            description: description.into(),
            required: true,
            default: None,
            enum_values: None,
        }
    }
}

/// Tool definition schema, published to the host
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ToolSchema {
    /// Unique tool identifier
    pub name: String,

    /// User-facing name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    /// Human-readable description (shown to the model)
    pub description: String,

    /// Icon hint for the host UI (SF Symbol name)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,

    /// Parameter definitions
    pub parameters: Vec<ParameterSchema>,

    /// Category for grouping
    #[serde(default)]
    pub category: Option<String>,

    /// Whether tool has side effects
    #[serde(default)]
    pub has_side_effects: bool,
}

/// Tool trait - implement to add new capabilities
#[async_trait]
pub trait Tool: Send + Sync {
    /// Get the tool's schema
    fn schema(&self) -> ToolSchema;

    /// Execute the tool with given arguments.
    ///
    /// Caught failures come back as `Ok` with an error report; `Err` means
    /// the fault escaped the tool and is the host's to handle.
    async fn execute(&self, call: &ToolCall) -> Result<ToolResult>;

    /// Validate arguments before execution
    fn validate(&self, call: &ToolCall) -> Result<()> {
        let schema = self.schema();

        for param in &schema.parameters {
            match call.arguments.get(&param.name) {
                None if param.required => {
                    return Err(AgentError::ToolValidation(format!(
                        "Missing required parameter: {}",
                        param.name
                    )));
                }
                Some(value) if !param.param_type.accepts(value) => {
                    return Err(AgentError::ToolValidation(format!(
                        "Parameter '{}' must be of type {}",
                        param.name, param.param_type
                    )));
                }
                _ => {}
            }
        }

        Ok(())
    }
}

/// Registry for available tools
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    /// Register a new tool
    pub fn register<T: Tool + 'static>(&mut self, tool: T) {
        let schema = tool.schema();
        self.tools.insert(schema.name.clone(), Arc::new(tool));
    }

    /// Get a tool by name
    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).cloned()
    }

    /// Execute a tool call
    pub async fn execute(&self, call: &ToolCall) -> Result<ToolResult> {
        let tool = self.get(&call.name).ok_or_else(|| {
            AgentError::ToolNotFound(call.name.clone())
        })?;

        // Validate first
        tool.validate(call)?;

        tracing::debug!(tool = %call.name, "Executing tool");

        let mut result = tool.execute(call).await?;
        if result.id.is_none() {
            result.id = call.id.clone();
        }

        match result.error() {
            Some(report) => tracing::warn!(tool = %call.name, error = %report.message, "Tool reported a failure"),
            None => tracing::info!(tool = %call.name, "Tool completed"),
        }

        Ok(result)
    }

    /// Get all tool schemas, sorted by name
    pub fn schemas(&self) -> Vec<ToolSchema> {
        let mut schemas: Vec<_> = self.tools.values().map(|t| t.schema()).collect();
        schemas.sort_by(|a, b| a.name.cmp(&b.name));
        schemas
    }

    /// Get tool names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.tools.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    /// Number of registered tools
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct EchoTool;

    #[async_trait]
    impl Tool for EchoTool {
        fn schema(&self) -> ToolSchema {
            ToolSchema {
                name: "Echo".into(),
                display_name: None,
                description: "Echo the message back".into(),
                icon: None,
                parameters: vec![
                    ParameterSchema::required("message", ParamType::String, "Text to echo"),
                    ParameterSchema {
                        name: "times".into(),
                        param_type: ParamType::Integer,
                        description: "Repeat count".into(),
                        required: false,
                        default: Some(serde_json::json!(1)),
                        enum_values: None,
                    },
                ],
                category: None,
                has_side_effects: false,
            }
        }

        async fn execute(&self, call: &ToolCall) -> Result<ToolResult> {
            let message = call.str_arg("message")?;
            let times = call.u64_arg("times").unwrap_or(1) as usize;
            Ok(ToolResult::success("Echo", message.repeat(times)))
        }
    }

    #[derive(Debug, thiserror::Error)]
    #[error("outer")]
    struct Outer(#[source] std::io::Error);

    #[test]
    fn test_tool_registry() {
        let mut registry = ToolRegistry::new();
        registry.register(EchoTool);

        assert_eq!(registry.len(), 1);
        assert!(registry.get("Echo").is_some());
        assert!(registry.get("unknown").is_none());
        assert_eq!(registry.names(), vec!["Echo"]);
    }

    #[tokio::test]
    async fn test_execute_dispatches_and_keeps_call_id() {
        let mut registry = ToolRegistry::new();
        registry.register(EchoTool);

        let mut call = ToolCall::new("Echo").arg("message", "hi").arg("times", 2);
        call.id = Some("call-1".into());

        let result = registry.execute(&call).await.unwrap();
        assert_eq!(result.text(), Some("hihi"));
        assert_eq!(result.id.as_deref(), Some("call-1"));
    }

    #[tokio::test]
    async fn test_unknown_tool() {
        let registry = ToolRegistry::new();
        let err = registry.execute(&ToolCall::new("Nope")).await.unwrap_err();
        assert!(matches!(err, AgentError::ToolNotFound(name) if name == "Nope"));
    }

    #[tokio::test]
    async fn test_validation_rejects_missing_and_mistyped() {
        let mut registry = ToolRegistry::new();
        registry.register(EchoTool);

        let missing = registry.execute(&ToolCall::new("Echo")).await.unwrap_err();
        assert!(matches!(missing, AgentError::ToolValidation(_)));

        let mistyped = ToolCall::new("Echo").arg("message", "hi").arg("times", "two");
        let err = registry.execute(&mistyped).await.unwrap_err();
        assert!(err.to_string().contains("times"));
    }

    #[test]
    fn test_error_report_walks_sources() {
        let err = Outer(std::io::Error::new(std::io::ErrorKind::NotFound, "inner"));
        let report = ErrorReport::from_error(&err);
        assert_eq!(report.message, "outer");
        assert_eq!(report.detail, vec!["inner".to_string()]);
        assert_eq!(report.to_string(), "outer\n  caused by: inner");
    }

    #[test]
    fn test_result_serialization() {
        let result = ToolResult::file("BuildReport", ToolFile::new("report.md", "# Hi"));
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["output"]["kind"], "file");
        assert_eq!(json["output"]["filename"], "report.md");
        assert!(result.is_success());

        let failed = ToolResult::failure("X", ErrorReport::new("boom"));
        let json = serde_json::to_value(&failed).unwrap();
        assert_eq!(json["output"]["kind"], "error");
        assert_eq!(json["output"]["message"], "boom");
        assert!(!failed.is_success());
    }
}
