//! Data models for the Rate My OpenAPI report service
//!
//! These mirror the JSON contract of the `sync-report` endpoint. Everything
//! here is produced by the remote service and is read-only to the pipeline.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Issue severity as reported by the service.
///
/// The service encodes severity as an integer: `0` is an error, every
/// other value is treated as a warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

impl Severity {
    pub fn from_code(code: i64) -> Self {
        if code == 0 {
            Severity::Error
        } else {
            Severity::Warning
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub line: u32,
    pub character: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

/// One diagnostic finding against the submitted document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Issue {
    #[serde(default)]
    pub code: String,
    pub message: String,
    #[serde(default)]
    pub path: Vec<String>,
    /// Raw severity code (0 = error)
    pub severity: i64,
    #[serde(default)]
    pub source: String,
    pub range: Range,
}

impl Issue {
    pub fn level(&self) -> Severity {
        Severity::from_code(self.severity)
    }
}

/// Headline scores and prose produced by the service
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimpleReport {
    pub score: f64,
    #[serde(default)]
    pub docs_score: f64,
    #[serde(default)]
    pub completeness_score: f64,
    #[serde(default)]
    pub sdk_generation_score: f64,
    #[serde(default)]
    pub security_score: f64,
    #[serde(default)]
    pub short_summary: String,
    #[serde(default)]
    pub long_summary: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub file_extension: String,
    #[serde(default)]
    pub version: String,
}

/// Issue lists, one overall and one per category.
///
/// Every list stays as raw JSON. The classifier checks the shape of the
/// overall list and decodes its entries one at a time, so a missing or
/// malformed list cannot discard the scores that arrived alongside it.
/// Category lists are independent views and may overlap with `issues`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FullReport {
    #[serde(default)]
    pub issues: Value,
    #[serde(default)]
    pub docs_issues: Value,
    #[serde(default)]
    pub completeness_issues: Value,
    #[serde(default)]
    pub sdk_generation_issues: Value,
    #[serde(default)]
    pub security_issues: Value,
}

static NO_ISSUES: Value = Value::Null;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportResults {
    pub simple_report: SimpleReport,
    #[serde(default)]
    pub full_report: Option<FullReport>,
}

impl ReportResults {
    /// The overall issue list as sent, `Value::Null` when absent
    pub fn issues(&self) -> &Value {
        self.full_report.as_ref().map_or(&NO_ISSUES, |f| &f.issues)
    }
}

/// Successful response body of the report endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub results: ReportResults,
    #[serde(default)]
    pub report_id: String,
    #[serde(default)]
    pub report_url: String,
}

impl Report {
    pub fn score(&self) -> f64 {
        self.results.simple_report.score
    }
}

/// Error envelope returned on non-2xx responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorBody {
    pub message: String,
    #[serde(default)]
    pub detail: Option<String>,
}

impl ApiErrorBody {
    /// `detail` when the service sent one, otherwise `message`
    pub fn reason(&self) -> &str {
        self.detail
            .as_deref()
            .filter(|d| !d.is_empty())
            .unwrap_or(self.message.as_str())
    }
}
