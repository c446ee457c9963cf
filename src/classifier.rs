//! Issue classification
//!
//! Walks the overall issue list once, emitting one annotation per issue and
//! counting errors (severity 0) and warnings (everything else).

use crate::models::{Issue, Severity};
use crate::workflow::{Annotation, Workflow};
use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

/// Counts accumulated over the issue list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    pub total_errors: usize,
    pub total_warnings: usize,
    /// Set when an entry did not have the issue shape. Counting stops at
    /// that entry; everything before it is kept.
    pub parse_error: Option<String>,
}

pub fn annotation_for(issue: &Issue, file: &str) -> Annotation {
    Annotation {
        level: issue.level().into(),
        message: issue.message.clone(),
        file: file.to_string(),
        title: Some(issue.code.clone()).filter(|c| !c.is_empty()),
        start_line: issue.range.start.line,
        start_column: issue.range.start.character,
        end_line: issue.range.end.line,
        end_column: issue.range.end.character,
    }
}

/// Annotate and count the raw issue list against `file`.
///
/// A missing list, a list that is not an array, or a malformed entry is
/// reported through `parse_error` instead of aborting, so the caller can
/// still publish the score and run the gate.
pub fn classify(issues: &Value, file: &str, workflow: &mut dyn Workflow) -> Classification {
    let mut result = Classification::default();

    let Some(issues) = issues.as_array() else {
        let reason = match issues {
            Value::Null => "issue list is missing".to_string(),
            other => format!("expected an array of issues, found {}", kind(other)),
        };
        warn!("Report has no usable issue list: {}", reason);
        result.parse_error = Some(format!(
            "Failed to parse OpenAPI lint results. Error: {}",
            reason
        ));
        return result;
    };

    for (index, raw) in issues.iter().enumerate() {
        workflow.debug(file);

        let issue = match Issue::deserialize(raw) {
            Ok(issue) => issue,
            Err(e) => {
                warn!("Issue #{} has an unexpected shape: {}", index, e);
                result.parse_error = Some(format!(
                    "Failed to parse OpenAPI lint results. Error: issue #{}: {}",
                    index, e
                ));
                break;
            }
        };

        match issue.level() {
            Severity::Error => result.total_errors += 1,
            Severity::Warning => result.total_warnings += 1,
        }
        workflow.annotate(&annotation_for(&issue, file));
    }

    result
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflow::tests::Recorder;
    use crate::workflow::AnnotationLevel;
    use serde_json::json;

    fn issue(severity: i64, message: &str) -> Value {
        json!({
            "code": "rule",
            "message": message,
            "path": ["paths", "/pets"],
            "severity": severity,
            "source": "api.json",
            "range": {"start": {"line": 1, "character": 2}, "end": {"line": 1, "character": 5}}
        })
    }

    #[test]
    fn test_single_error_issue() {
        let mut rec = Recorder::default();
        let result = classify(&json!([issue(0, "M")]), "api.json", &mut rec);

        assert_eq!(result.total_errors, 1);
        assert_eq!(result.total_warnings, 0);
        assert_eq!(rec.annotations.len(), 1);
        let a = &rec.annotations[0];
        assert_eq!(a.level, AnnotationLevel::Error);
        assert_eq!(a.message, "M");
        assert_eq!(a.file, "api.json");
        assert_eq!((a.start_line, a.start_column), (1, 2));
        assert_eq!((a.end_line, a.end_column), (1, 5));
    }

    #[test]
    fn test_counts_partition_the_list() {
        let issues: Vec<Value> = [0, 1, 2, 0, 3, 1, 0]
            .iter()
            .map(|s| issue(*s, "x"))
            .collect();
        let mut rec = Recorder::default();
        let result = classify(&Value::from(issues.clone()), "api.yaml", &mut rec);

        assert_eq!(result.total_errors + result.total_warnings, issues.len());
        assert_eq!(result.total_errors, 3);
        assert_eq!(result.total_warnings, 4);
        assert_eq!(rec.annotations.len(), issues.len());
        assert!(result.parse_error.is_none());
    }

    #[test]
    fn test_empty_list() {
        let mut rec = Recorder::default();
        let result = classify(&json!([]), "api.json", &mut rec);
        assert_eq!(result, Classification::default());
        assert!(rec.annotations.is_empty());
    }

    #[test]
    fn test_malformed_issue_keeps_prior_counts() {
        let issues = json!([
            issue(0, "first"),
            issue(1, "second"),
            {"message": "no range", "severity": 0},
            issue(0, "never reached"),
        ]);
        let mut rec = Recorder::default();
        let result = classify(&issues, "api.json", &mut rec);

        assert_eq!(result.total_errors, 1);
        assert_eq!(result.total_warnings, 1);
        assert_eq!(rec.annotations.len(), 2);
        let err = result.parse_error.unwrap();
        assert!(err.starts_with("Failed to parse OpenAPI lint results"));
        assert!(err.contains("#2"));
    }

    #[test]
    fn test_code_becomes_title() {
        let mut raw = issue(1, "x");
        raw["code"] = json!("");
        let mut rec = Recorder::default();
        classify(&json!([raw, issue(1, "y")]), "a.json", &mut rec);
        assert_eq!(rec.annotations[0].title, None);
        assert_eq!(rec.annotations[1].title.as_deref(), Some("rule"));
        assert_eq!(rec.debugs, vec!["a.json", "a.json"]);
    }

    #[test]
    fn test_missing_list_is_a_parse_error() {
        let mut rec = Recorder::default();
        let result = classify(&Value::Null, "api.json", &mut rec);
        assert_eq!(result.total_errors + result.total_warnings, 0);
        assert_eq!(
            result.parse_error.as_deref(),
            Some("Failed to parse OpenAPI lint results. Error: issue list is missing")
        );
        assert!(rec.annotations.is_empty());
    }

    #[test]
    fn test_non_array_list_is_a_parse_error() {
        let mut rec = Recorder::default();
        let result = classify(&json!({"issues": []}), "api.json", &mut rec);
        let err = result.parse_error.unwrap();
        assert!(err.starts_with("Failed to parse OpenAPI lint results"));
        assert!(err.ends_with("found an object"));
    }
}
