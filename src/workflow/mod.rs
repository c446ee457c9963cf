//! CI output sinks
//!
//! The pipeline reports everything it produces through [`Workflow`]:
//! - `github` - GitHub Actions workflow commands, job summary, step outputs
//! - `console` - plain terminal output for local runs

mod github;
mod terminal;

pub use self::github::GithubActions;
pub use self::terminal::Console;

use crate::models::Severity;
use anyhow::{anyhow, Result};
use std::io;
use std::str::FromStr;

/// Annotation level understood by the CI host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnnotationLevel {
    Error,
    Warning,
}

impl From<Severity> for AnnotationLevel {
    fn from(severity: Severity) -> Self {
        match severity {
            Severity::Error => AnnotationLevel::Error,
            Severity::Warning => AnnotationLevel::Warning,
        }
    }
}

impl AnnotationLevel {
    pub fn command(&self) -> &'static str {
        match self {
            AnnotationLevel::Error => "error",
            AnnotationLevel::Warning => "warning",
        }
    }
}

/// A diagnostic pinned to a range of the submitted file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    pub level: AnnotationLevel,
    pub message: String,
    pub file: String,
    pub title: Option<String>,
    pub start_line: u32,
    pub start_column: u32,
    pub end_line: u32,
    pub end_column: u32,
}

/// Output sink for one run
pub trait Workflow {
    fn debug(&mut self, message: &str);

    fn annotate(&mut self, annotation: &Annotation);

    /// Publish the rendered job summary
    fn publish_summary(&mut self, markdown: &str) -> io::Result<()>;

    fn set_output(&mut self, name: &str, value: &str) -> io::Result<()>;

    /// Keep a secret out of the job log
    fn mask(&mut self, secret: &str);

    /// Record a failure reason; the run exits non-zero
    fn fail(&mut self, reason: &str);
}

/// Which sink to drive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowKind {
    Github,
    Console,
}

impl WorkflowKind {
    /// GitHub when running inside Actions, console otherwise
    pub fn detect() -> Self {
        match std::env::var("GITHUB_ACTIONS") {
            Ok(v) if v == "true" => WorkflowKind::Github,
            _ => WorkflowKind::Console,
        }
    }

    pub fn create(self) -> Box<dyn Workflow> {
        match self {
            WorkflowKind::Github => Box::new(GithubActions::from_env()),
            WorkflowKind::Console => Box::new(Console::stdout()),
        }
    }
}

impl FromStr for WorkflowKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "github" | "github-actions" => Ok(WorkflowKind::Github),
            "console" | "text" => Ok(WorkflowKind::Console),
            _ => Err(anyhow!(
                "Unknown reporter '{}'. Valid reporters: github, console",
                s
            )),
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// In-memory sink that records everything the pipeline emits
    #[derive(Debug, Default)]
    pub(crate) struct Recorder {
        pub debugs: Vec<String>,
        pub annotations: Vec<Annotation>,
        pub summary: Option<String>,
        pub outputs: Vec<(String, String)>,
        pub masked: Vec<String>,
        pub failures: Vec<String>,
        pub fail_summary: bool,
    }

    impl Workflow for Recorder {
        fn debug(&mut self, message: &str) {
            self.debugs.push(message.to_string());
        }

        fn annotate(&mut self, annotation: &Annotation) {
            self.annotations.push(annotation.clone());
        }

        fn publish_summary(&mut self, markdown: &str) -> io::Result<()> {
            if self.fail_summary {
                return Err(io::Error::new(io::ErrorKind::PermissionDenied, "summary is read-only"));
            }
            self.summary = Some(markdown.to_string());
            Ok(())
        }

        fn set_output(&mut self, name: &str, value: &str) -> io::Result<()> {
            self.outputs.push((name.to_string(), value.to_string()));
            Ok(())
        }

        fn mask(&mut self, secret: &str) {
            self.masked.push(secret.to_string());
        }

        fn fail(&mut self, reason: &str) {
            self.failures.push(reason.to_string());
        }
    }

    #[test]
    fn test_kind_parsing() {
        assert_eq!(WorkflowKind::from_str("github").unwrap(), WorkflowKind::Github);
        assert_eq!(WorkflowKind::from_str("CONSOLE").unwrap(), WorkflowKind::Console);
        assert!(WorkflowKind::from_str("sarif").is_err());
    }

    #[test]
    fn test_level_from_severity() {
        assert_eq!(AnnotationLevel::from(Severity::Error), AnnotationLevel::Error);
        assert_eq!(AnnotationLevel::from(Severity::Warning).command(), "warning");
    }
}
