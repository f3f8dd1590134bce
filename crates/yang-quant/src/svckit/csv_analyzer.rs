//! CSV Analyzer Tool
//!
//! Reports column names, shape, and inferred column types of a CSV file.

use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;

use agent_core::{
    Tool, ToolSchema, ToolCall, ToolResult,
    tool::{ParamType, ParameterSchema},
    Result as CoreResult,
};

use crate::error::{QuantError, Result};
use crate::model::{ColumnType, ColumnTypes, CsvSummary};

/// Tool for inspecting CSV files
pub struct AnalyzeCsvTool;

#[async_trait]
impl Tool for AnalyzeCsvTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "AnalyzeCSV".into(),
            display_name: Some("Analyze CSV".into()),
            description: "Returns metadata given a path to a CSV file, such as column names, data types, and shape".into(),
            icon: Some("tablecells.badge.ellipsis".into()),
            parameters: vec![
                ParameterSchema::required("path", ParamType::String, "The path to the CSV file to analyze"),
            ],
            category: Some("data".into()),
            has_side_effects: false,
        }
    }

    async fn execute(&self, call: &ToolCall) -> CoreResult<ToolResult> {
        let path = call.str_arg("path")?;

        let summary = match analyze_csv(Path::new(path)) {
            Ok(summary) => summary,
            Err(e) => return Ok(ToolResult::report("AnalyzeCSV", &e)),
        };

        let output = serde_json::to_string_pretty(&summary)?;
        let data = serde_json::to_value(&summary)?;

        Ok(ToolResult::success("AnalyzeCSV", output).with_data(data))
    }
}

/// Read a CSV file with a header row and summarize it
pub fn analyze_csv(path: &Path) -> Result<CsvSummary> {
    let path_str = path.display().to_string();
    if !path.exists() {
        return Err(QuantError::FileNotFound(path_str));
    }

    let csv_error = |source| QuantError::Csv {
        path: path_str.clone(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(csv_error)?;

    let columns = dedupe_columns(reader.headers().map_err(csv_error)?.iter());
    if columns.is_empty() {
        return Err(QuantError::MalformedCsv("No columns to parse from file".into()));
    }

    let mut profiles = vec![ColumnProfile::new(); columns.len()];
    let mut rows = 0;

    for record in reader.records() {
        let record = record.map_err(csv_error)?;

        if record.len() > columns.len() {
            let line = record.position().map_or(rows + 2, |p| p.line() as usize);
            return Err(QuantError::MalformedCsv(format!(
                "Expected {} fields in line {}, saw {}",
                columns.len(),
                line,
                record.len()
            )));
        }

        for (i, profile) in profiles.iter_mut().enumerate() {
            profile.observe(record.get(i).unwrap_or(""));
        }
        rows += 1;
    }

    let dtypes: ColumnTypes = columns
        .iter()
        .cloned()
        .zip(profiles.iter().map(ColumnProfile::column_type))
        .collect();

    tracing::debug!(path = %path_str, rows, columns = columns.len(), "Analyzed CSV");

    Ok(CsvSummary {
        path: path_str,
        shape: (rows, columns.len()),
        columns,
        dtypes,
    })
}

/// Repeated header names get a `.N` suffix so every column keeps its own type
fn dedupe_columns<'a>(headers: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();

    headers
        .map(|name| {
            let count = seen.entry(name.to_string()).or_insert(0);
            let unique = if *count == 0 {
                name.to_string()
            } else {
                format!("{}.{}", name, count)
            };
            *count += 1;
            unique
        })
        .collect()
}

/// Cell values read as missing, matching the dataframe-library defaults
const MISSING_MARKERS: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Running type evidence for one column
#[derive(Clone, Debug)]
struct ColumnProfile {
    seen_value: bool,
    seen_missing: bool,
    all_int: bool,
    all_float: bool,
    all_bool: bool,
}

impl ColumnProfile {
    fn new() -> Self {
        Self {
            seen_value: false,
            seen_missing: false,
            all_int: true,
            all_float: true,
            all_bool: true,
        }
    }

    fn observe(&mut self, raw: &str) {
        let value = raw.trim();
        if value.is_empty() || MISSING_MARKERS.contains(&value) {
            self.seen_missing = true;
            return;
        }

        self.seen_value = true;
        self.all_int &= value.parse::<i64>().is_ok();
        self.all_float &= value.parse::<f64>().is_ok();
        self.all_bool &= matches!(value, "True" | "False" | "true" | "false" | "TRUE" | "FALSE");
    }

    /// Missing cells force integer columns to float and boolean columns to object
    fn column_type(&self) -> ColumnType {
        if !self.seen_value {
            return ColumnType::Float64;
        }
        if self.all_bool {
            return if self.seen_missing { ColumnType::Object } else { ColumnType::Bool };
        }
        if self.all_int {
            return if self.seen_missing { ColumnType::Float64 } else { ColumnType::Int64 };
        }
        if self.all_float {
            return ColumnType::Float64;
        }
        ColumnType::Object
    }
}
