//! Lint run pipeline
//!
//! package → upload → classify → summarize → gate, strictly in order.
//! Upload problems end the run early; everything after a report has arrived
//! is independent, so a failure in one step is recorded and the remaining
//! steps still run.

use crate::classifier::classify;
use crate::client::{ClientError, ReportService, UploadFile};
use crate::config::Config;
use crate::gate::{self, Violation};
use crate::models::Report;
use crate::reporters::{self, SummaryStyle};
use crate::workflow::Workflow;
use tracing::{info, warn};

/// Headline values of the fetched report
#[derive(Debug, Clone, Default)]
pub struct ReportSummary {
    pub score: f64,
    pub report_id: String,
    pub report_url: String,
}

impl From<&Report> for ReportSummary {
    fn from(report: &Report) -> Self {
        Self {
            score: report.score(),
            report_id: report.report_id.clone(),
            report_url: report.report_url.clone(),
        }
    }
}

/// Outcome of one run
#[derive(Debug, Clone, Default)]
pub struct RunResult {
    pub file: String,
    /// `None` when no report was obtained
    pub report: Option<ReportSummary>,
    pub total_errors: usize,
    pub total_warnings: usize,
    pub violations: Vec<Violation>,
    /// Every reason the run failed, in the order they were raised
    pub failures: Vec<String>,
}

impl RunResult {
    pub fn passed(&self) -> bool {
        self.failures.is_empty()
    }

    fn fail(&mut self, workflow: &mut dyn Workflow, reason: String) {
        warn!("{}", reason);
        workflow.fail(&reason);
        self.failures.push(reason);
    }
}

/// Map a client error to the reason shown on the run
fn failure_reason(err: &ClientError) -> String {
    match err {
        ClientError::Service { message, .. } => message.clone(),
        other => format!("fail: {}", other),
    }
}

/// Run every step after configuration against `service`
pub fn run(config: &Config, service: &dyn ReportService, workflow: &mut dyn Workflow) -> RunResult {
    let file_name = config.file_path.to_string_lossy().to_string();
    let mut result = RunResult {
        file: file_name.clone(),
        ..Default::default()
    };

    let report = match UploadFile::read(&config.file_path)
        .and_then(|upload| service.fetch_report(&upload))
    {
        Ok(report) => report,
        Err(e) => {
            result.fail(workflow, failure_reason(&e));
            write_output(config, &mut result, workflow);
            return result;
        }
    };
    result.report = Some(ReportSummary::from(&report));

    let classification = classify(report.results.issues(), &file_name, workflow);
    result.total_errors = classification.total_errors;
    result.total_warnings = classification.total_warnings;
    if let Some(reason) = classification.parse_error {
        result.fail(workflow, reason);
    }
    info!(
        "Score {} with {} errors and {} warnings",
        report.score(),
        result.total_errors,
        result.total_warnings
    );

    publish_summary(config, &report, &mut result, workflow);
    set_outputs(&result, workflow);

    result.violations = gate::evaluate(
        &config.thresholds,
        result.total_errors,
        result.total_warnings,
        report.score(),
    );
    for violation in result.violations.clone() {
        result.fail(workflow, violation.to_string());
    }

    write_output(config, &mut result, workflow);
    result
}

fn publish_summary(
    config: &Config,
    report: &Report,
    result: &mut RunResult,
    workflow: &mut dyn Workflow,
) {
    let style = SummaryStyle::with_pass_score(config.thresholds.minimum_score);
    let published = reporters::markdown::render(&result.file, report, &style)
        .and_then(|md| workflow.publish_summary(&md).map_err(anyhow::Error::from));
    if let Err(e) = published {
        result.fail(workflow, format!("fail: Failed to publish summary: {}", e));
    }
}

fn set_outputs(result: &RunResult, workflow: &mut dyn Workflow) {
    let Some(report) = &result.report else {
        return;
    };
    let outputs = [
        ("score", report.score.to_string()),
        ("errors", result.total_errors.to_string()),
        ("warnings", result.total_warnings.to_string()),
        ("report-url", report.report_url.clone()),
    ];
    for (name, value) in outputs {
        if let Err(e) = workflow.set_output(name, &value) {
            warn!("Failed to set output {}: {}", name, e);
        }
    }
}

fn write_output(config: &Config, result: &mut RunResult, workflow: &mut dyn Workflow) {
    let Some(path) = &config.output else {
        return;
    };
    let written = reporters::json::render(result)
        .and_then(|json| std::fs::write(path, json).map_err(anyhow::Error::from));
    match written {
        Ok(()) => info!("Run result written to {}", path.display()),
        Err(e) => result.fail(
            workflow,
            format!("fail: Failed to write {}: {}", path.display(), e),
        ),
    }
}
