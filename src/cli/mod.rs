//! CLI definition and top-level run

use crate::client::ReportClient;
use crate::config::{load_project_config, Config, Inputs};
use crate::pipeline;
use crate::workflow::{Workflow, WorkflowKind};
use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::debug;

/// rmoa-lint - Rate My OpenAPI lint step for CI
///
/// Uploads an OpenAPI document for rating, annotates every issue,
/// publishes a summary and fails when a threshold is exceeded.
#[derive(Parser, Debug)]
#[command(name = "rmoa-lint")]
#[command(
    version,
    about = "Rate an OpenAPI document with Rate My OpenAPI and gate CI on the result",
    after_help = "\
Every input can also be supplied the way GitHub Actions passes action inputs
(INPUT_FILEPATH, INPUT_APIKEY, INPUT_MAX-WARNINGS, ...).

Examples:
  rmoa-lint --filepath openapi.yaml --apikey $RMOA_KEY
  rmoa-lint --filepath api.json --apikey $RMOA_KEY --max-errors 0 --minimum-score 90
  rmoa-lint --filepath api.json --apikey $RMOA_KEY --output rmoa-result.json"
)]
pub struct Cli {
    /// Path to the OpenAPI document
    #[arg(long, env = "INPUT_FILEPATH")]
    pub filepath: Option<String>,

    /// Rate My OpenAPI API key
    #[arg(long, env = "INPUT_APIKEY", hide_env_values = true)]
    pub apikey: Option<String>,

    /// Fail when there are more warnings than this (default: no limit)
    #[arg(long, env = "INPUT_MAX-WARNINGS")]
    pub max_warnings: Option<String>,

    /// Fail when there are more errors than this (default: no limit)
    #[arg(long, env = "INPUT_MAX-ERRORS")]
    pub max_errors: Option<String>,

    /// Fail when the overall score is below this (default: 80)
    #[arg(long, env = "INPUT_MINIMUM-SCORE")]
    pub minimum_score: Option<String>,

    /// Report endpoint
    #[arg(long, env = "INPUT_ENDPOINT")]
    pub endpoint: Option<String>,

    /// Upload timeout in seconds (default: 60)
    #[arg(long, env = "INPUT_TIMEOUT-SECS")]
    pub timeout_secs: Option<String>,

    /// Write the run result as JSON to this file
    #[arg(long, short = 'o', env = "INPUT_OUTPUT")]
    pub output: Option<PathBuf>,

    /// Project config file (default: ./rmoa.toml when present)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Output style: github, console (default: github inside GitHub Actions)
    #[arg(long, value_parser = ["github", "console"])]
    pub reporter: Option<String>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "warn", value_parser = ["error", "warn", "info", "debug", "trace"])]
    pub log_level: String,
}

impl Cli {
    fn inputs(&self) -> Inputs {
        Inputs {
            filepath: self.filepath.clone(),
            apikey: self.apikey.clone(),
            max_warnings: self.max_warnings.clone(),
            max_errors: self.max_errors.clone(),
            minimum_score: self.minimum_score.clone(),
            endpoint: self.endpoint.clone(),
            timeout_secs: self.timeout_secs.clone(),
            output: self
                .output
                .clone()
                .filter(|p| !p.as_os_str().is_empty()),
        }
    }
}

/// Run the CLI. Returns whether the run passed.
///
/// Errors that escape the pipeline are reported as `fail: <message>` so the
/// run always ends in a defined state.
pub fn run(cli: Cli) -> Result<bool> {
    let kind = match cli.reporter.as_deref() {
        Some(r) => r.parse()?,
        None => WorkflowKind::detect(),
    };
    let mut workflow = kind.create();

    match execute(&cli, workflow.as_mut()) {
        Ok(passed) => Ok(passed),
        Err(e) => {
            workflow.fail(&format!("fail: {:#}", e));
            Ok(false)
        }
    }
}

fn execute(cli: &Cli, workflow: &mut dyn Workflow) -> Result<bool> {
    let cwd = std::env::current_dir()?;

    // Configuration problems stop the run before any network traffic
    let config = match load_project_config(cli.config.as_deref(), &cwd)
        .and_then(|project| Config::resolve(cli.inputs(), &project))
    {
        Ok(config) => config,
        Err(e) => {
            workflow.fail(&e.to_string());
            return Ok(false);
        }
    };
    workflow.mask(config.api_key.expose());
    debug!("Resolved config: {:?}", config);

    let client = ReportClient::new(config.endpoint.clone(), config.api_key.clone(), config.timeout);
    debug!("Using report endpoint {}", client.endpoint());
    let result = pipeline::run(&config, &client, workflow);
    Ok(result.passed())
}
