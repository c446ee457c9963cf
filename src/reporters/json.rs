//! JSON reporter for machine-readable run results

use crate::pipeline::RunResult;
use anyhow::Result;
use chrono::Utc;
use serde_json::json;

/// Render the run result as pretty-printed JSON
pub fn render(result: &RunResult) -> Result<String> {
    let report = result.report.as_ref();
    let doc = json!({
        "file": result.file,
        "passed": result.passed(),
        "score": report.map(|r| r.score),
        "errors": result.total_errors,
        "warnings": result.total_warnings,
        "reportId": report.map(|r| r.report_id.as_str()),
        "reportUrl": report.map(|r| r.report_url.as_str()),
        "violations": result.violations,
        "failures": result.failures,
        "generatedAt": Utc::now().to_rfc3339(),
    });
    Ok(serde_json::to_string_pretty(&doc)?)
}
