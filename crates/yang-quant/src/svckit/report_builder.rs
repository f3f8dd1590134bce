//! Report Builder Tool
//!
//! Formats a markdown report and hands it back as a file.

use async_trait::async_trait;

use agent_core::{
    Tool, ToolSchema, ToolCall, ToolResult, ToolFile,
    tool::{ParamType, ParameterSchema},
    Result as CoreResult,
};

pub const REPORT_FILENAME: &str = "report.md";

/// Tool for building markdown reports
pub struct BuildReportTool;

#[async_trait]
impl Tool for BuildReportTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "BuildReport".into(),
            display_name: Some("Build Report".into()),
            description: "Builds a markdown report file from a title, an abstract, and supporting data".into(),
            icon: None,
            parameters: vec![
                ParameterSchema::required("title", ParamType::String, "Report title"),
                ParameterSchema::required("abstract", ParamType::String, "Short summary of the findings"),
                ParameterSchema::required("data", ParamType::Object, "Structured data backing the report"),
            ],
            category: Some("data".into()),
            has_side_effects: false,
        }
    }

    async fn execute(&self, call: &ToolCall) -> CoreResult<ToolResult> {
        let title = call.str_arg("title")?;
        let summary = call.str_arg("abstract")?;
        let data = call.arguments.get("data").cloned().unwrap_or_default();

        let content = render_report(title, summary, &data)?;

        Ok(ToolResult::file("BuildReport", ToolFile::new(REPORT_FILENAME, content)))
    }
}

/// Markdown with the data as a pretty-printed JSON block
pub fn render_report(title: &str, summary: &str, data: &serde_json::Value) -> serde_json::Result<String> {
    let data = serde_json::to_string_pretty(data)?;

    Ok(format!(
        "# {title}\n\n### Abstract:\n{summary}\n\n### Data:\n```json\n{data}\n```\n"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_report_contains_title_abstract_and_data() {
        let data = serde_json::json!({"BTC": {"stance": "Bearish", "confidence": 80}});
        let call = ToolCall::new("BuildReport")
            .arg("title", "Weekly Outlook")
            .arg("abstract", "Fade the hype.")
            .arg("data", data.clone());

        let result = BuildReportTool.execute(&call).await.unwrap();
        let file = result.as_file().expect("file artifact");

        assert_eq!(file.filename, "report.md");
        assert!(file.content.starts_with("# Weekly Outlook\n"));
        assert!(file.content.contains("Fade the hype."));
        assert!(file.content.contains(&serde_json::to_string_pretty(&data).unwrap()));
    }

    #[test]
    fn test_render_layout() {
        let report = render_report("T", "A", &serde_json::json!({})).unwrap();
        assert_eq!(report, "# T\n\n### Abstract:\nA\n\n### Data:\n```json\n{}\n```\n");
    }
}
