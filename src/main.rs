//! rmoa-lint - Rate My OpenAPI lint step for CI
//!
//! Uploads an OpenAPI document to the Rate My OpenAPI service, annotates the
//! run with every reported issue, publishes a summary, and fails the step
//! when warnings, errors or the score cross the configured thresholds.

mod classifier;
mod cli;
mod client;
mod config;
mod gate;
mod models;
mod pipeline;
mod reporters;
mod workflow;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    // Logs go to stderr; stdout carries workflow commands
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    if !cli::run(cli)? {
        std::process::exit(1);
    }
    Ok(())
}
