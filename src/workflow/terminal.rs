//! Console sink for running outside of CI

use super::{Annotation, AnnotationLevel, Workflow};
use console::style;
use std::io::{self, Write};
use tracing::{debug, warn};

pub struct Console<W: Write> {
    out: W,
}

impl Console<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> Console<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, line: String) {
        if let Err(e) = writeln!(self.out, "{}", line) {
            warn!("Failed to write to terminal: {}", e);
        }
    }
}

impl<W: Write> Workflow for Console<W> {
    fn debug(&mut self, message: &str) {
        debug!("{}", message);
    }

    fn annotate(&mut self, a: &Annotation) {
        let label = match a.level {
            AnnotationLevel::Error => style("error").red().bold().to_string(),
            AnnotationLevel::Warning => style("warning").yellow().bold().to_string(),
        };
        let code = a
            .title
            .as_deref()
            .filter(|t| !t.is_empty())
            .map(|t| format!(" [{}]", t))
            .unwrap_or_default();
        self.line(format!(
            "{}:{}:{} {}{} {}",
            style(&a.file).bold(),
            a.start_line,
            a.start_column,
            label,
            code,
            a.message
        ));
    }

    fn publish_summary(&mut self, markdown: &str) -> io::Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "{}", markdown)
    }

    fn set_output(&mut self, name: &str, value: &str) -> io::Result<()> {
        debug!("output {}={}", name, value);
        Ok(())
    }

    fn mask(&mut self, _secret: &str) {}

    fn fail(&mut self, reason: &str) {
        self.line(format!("{} {}", style("✖").red().bold(), reason));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_console_annotation_line() {
        console::set_colors_enabled(false);
        let mut c = Console::new(Vec::new());
        c.annotate(&Annotation {
            level: AnnotationLevel::Warning,
            message: "Operation is missing a description".into(),
            file: "api.yaml".into(),
            title: Some("operation-description".into()),
            start_line: 4,
            start_column: 6,
            end_line: 4,
            end_column: 12,
        });
        c.fail("Total warnings 3 exceeds max-warnings 1");
        c.mask("secret");
        let out = String::from_utf8(c.into_inner()).unwrap();
        assert!(out.contains(
            "api.yaml:4:6 warning [operation-description] Operation is missing a description"
        ));
        assert!(out.contains("✖ Total warnings 3 exceeds max-warnings 1"));
        assert!(!out.contains("secret"));
    }
}
