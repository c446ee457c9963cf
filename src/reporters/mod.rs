//! Output reporters for a lint run
//!
//! - `markdown` - job summary (GitHub-flavored Markdown with inline HTML)
//! - `json` - machine-readable run result for `--output`

pub mod json;
pub mod markdown;

pub use markdown::SummaryStyle;

#[cfg(test)]
pub(crate) mod tests {
    use crate::models::{FullReport, Report, ReportResults, SimpleReport};
    use serde_json::json;

    /// A minimal report: score 85, one error and one warning
    pub(crate) fn test_report() -> Report {
        let error = json!({
            "code": "operation-description",
            "message": "Operation must have a description",
            "path": ["paths", "/pets", "get"],
            "severity": 0,
            "source": "api.json",
            "range": {"start": {"line": 12, "character": 8}, "end": {"line": 12, "character": 15}}
        });
        let warning = json!({
            "code": "security-defined",
            "message": "No security scheme defined",
            "path": [],
            "severity": 1,
            "source": "api.json",
            "range": {"start": {"line": 0, "character": 0}, "end": {"line": 0, "character": 1}}
        });

        Report {
            results: ReportResults {
                simple_report: SimpleReport {
                    score: 85.0,
                    docs_score: 90.0,
                    completeness_score: 80.0,
                    sdk_generation_score: 60.0,
                    security_score: 100.0,
                    short_summary: "Solid API".into(),
                    long_summary: "Add operation descriptions.\n".into(),
                    title: "Pet Store".into(),
                    file_extension: "json".into(),
                    version: "3.1.0".into(),
                },
                full_report: Some(FullReport {
                    issues: json!([error, warning]),
                    docs_issues: json!([error]),
                    security_issues: json!([warning]),
                    ..Default::default()
                }),
            },
            report_id: "r-123".into(),
            report_url: "https://ratemyopenapi.com/report/r-123".into(),
        }
    }
}
