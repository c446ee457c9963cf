//! GitHub Actions sink
//!
//! Writes workflow commands (`::error ...::message`) to stdout, appends the
//! job summary to `$GITHUB_STEP_SUMMARY` and step outputs to
//! `$GITHUB_OUTPUT`.

use super::{Annotation, Workflow};
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::warn;

/// Escape a command message
pub fn escape_data(s: &str) -> String {
    s.replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

/// Escape a command property value
pub fn escape_property(s: &str) -> String {
    escape_data(s).replace(':', "%3A").replace(',', "%2C")
}

pub struct GithubActions<W: Write> {
    out: W,
    summary_path: Option<PathBuf>,
    output_path: Option<PathBuf>,
}

impl GithubActions<io::Stdout> {
    pub fn from_env() -> Self {
        Self::new(
            io::stdout(),
            env_path("GITHUB_STEP_SUMMARY"),
            env_path("GITHUB_OUTPUT"),
        )
    }
}

fn env_path(name: &str) -> Option<PathBuf> {
    std::env::var_os(name)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

impl<W: Write> GithubActions<W> {
    pub fn new(out: W, summary_path: Option<PathBuf>, output_path: Option<PathBuf>) -> Self {
        Self {
            out,
            summary_path,
            output_path,
        }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }

    fn command(&mut self, line: String) {
        if let Err(e) = writeln!(self.out, "{}", line) {
            warn!("Failed to write workflow command: {}", e);
        }
    }
}

fn append(path: &Path, content: &str) -> io::Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    file.write_all(content.as_bytes())
}

impl<W: Write> Workflow for GithubActions<W> {
    fn debug(&mut self, message: &str) {
        self.command(format!("::debug::{}", escape_data(message)));
    }

    fn annotate(&mut self, a: &Annotation) {
        let mut props = vec![
            format!("file={}", escape_property(&a.file)),
            format!("line={}", a.start_line),
            format!("endLine={}", a.end_line),
            format!("col={}", a.start_column),
            format!("endColumn={}", a.end_column),
        ];
        if let Some(title) = a.title.as_deref().filter(|t| !t.is_empty()) {
            props.push(format!("title={}", escape_property(title)));
        }
        self.command(format!(
            "::{} {}::{}",
            a.level.command(),
            props.join(","),
            escape_data(&a.message)
        ));
    }

    fn publish_summary(&mut self, markdown: &str) -> io::Result<()> {
        match &self.summary_path {
            Some(path) => append(path, &format!("{}\n", markdown)),
            None => writeln!(self.out, "{}", markdown),
        }
    }

    fn set_output(&mut self, name: &str, value: &str) -> io::Result<()> {
        let Some(path) = &self.output_path else {
            // Outputs only exist inside a runner
            return Ok(());
        };
        let entry = if value.contains('\n') || value.contains('\r') {
            let delimiter = format!("ghadelimiter_{}", uuid::Uuid::new_v4());
            format!("{name}<<{delimiter}\n{value}\n{delimiter}\n")
        } else {
            format!("{name}={value}\n")
        };
        append(path, &entry)
    }

    fn mask(&mut self, secret: &str) {
        if !secret.is_empty() {
            self.command(format!("::add-mask::{}", escape_data(secret)));
        }
    }

    fn fail(&mut self, reason: &str) {
        self.command(format!("::error::{}", escape_data(reason)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflow::AnnotationLevel;

    fn sink() -> GithubActions<Vec<u8>> {
        GithubActions::new(Vec::new(), None, None)
    }

    fn written(gh: GithubActions<Vec<u8>>) -> String {
        String::from_utf8(gh.into_inner()).unwrap()
    }

    #[test]
    fn test_escaping() {
        assert_eq!(escape_data("100% done\r\nnext"), "100%25 done%0D%0Anext");
        assert_eq!(escape_property("a:b,c"), "a%3Ab%2Cc");
    }

    #[test]
    fn test_error_annotation_command() {
        let mut gh = sink();
        gh.annotate(&Annotation {
            level: AnnotationLevel::Error,
            message: "M".into(),
            file: "api.json".into(),
            title: None,
            start_line: 1,
            start_column: 2,
            end_line: 1,
            end_column: 5,
        });
        assert_eq!(
            written(gh),
            "::error file=api.json,line=1,endLine=1,col=2,endColumn=5::M\n"
        );
    }

    #[test]
    fn test_warning_annotation_with_title_escaped() {
        let mut gh = sink();
        gh.annotate(&Annotation {
            level: AnnotationLevel::Warning,
            message: "line one\nline two".into(),
            file: "specs/a,b.yaml".into(),
            title: Some("operation-description".into()),
            start_line: 10,
            start_column: 0,
            end_line: 12,
            end_column: 4,
        });
        let out = written(gh);
        assert!(out.starts_with("::warning file=specs/a%2Cb.yaml,line=10,"));
        assert!(out.contains(",title=operation-description::"));
        assert!(out.ends_with("::line one%0Aline two\n"));
    }

    #[test]
    fn test_fail_debug_and_mask() {
        let mut gh = sink();
        gh.debug("api.json");
        gh.mask("s3cret");
        gh.fail("fail: boom");
        assert_eq!(
            written(gh),
            "::debug::api.json\n::add-mask::s3cret\n::error::fail: boom\n"
        );
    }

    #[test]
    fn test_summary_and_outputs_go_to_files() {
        let dir = tempfile::tempdir().unwrap();
        let summary = dir.path().join("summary.md");
        let outputs = dir.path().join("outputs.txt");
        let mut gh = GithubActions::new(Vec::new(), Some(summary.clone()), Some(outputs.clone()));

        gh.publish_summary("# Title").unwrap();
        gh.set_output("score", "85").unwrap();
        gh.set_output("notes", "a\nb").unwrap();

        assert_eq!(std::fs::read_to_string(&summary).unwrap(), "# Title\n");
        let out = std::fs::read_to_string(&outputs).unwrap();
        assert!(out.starts_with("score=85\n"));
        assert!(out.contains("notes<<ghadelimiter_"));
        assert!(out.contains("\na\nb\nghadelimiter_"));
        assert!(written(gh).is_empty());
    }

    #[test]
    fn test_summary_falls_back_to_stdout() {
        let mut gh = sink();
        gh.publish_summary("# Title").unwrap();
        gh.set_output("score", "85").unwrap();
        assert_eq!(written(gh), "# Title\n");
    }
}
