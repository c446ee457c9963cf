//! Run configuration
//!
//! Values come from three layers, highest priority first:
//! 1. Command-line flags / GitHub Actions inputs (`INPUT_*` environment)
//! 2. Project file (`rmoa.toml`)
//! 3. Built-in defaults
//!
//! Absent `max-warnings` and `max-errors` mean "no limit". `minimum-score`
//! defaults to [`DEFAULT_MINIMUM_SCORE`].

mod project_config;

pub use project_config::{load_project_config, ProjectConfig};

use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_ENDPOINT: &str = "https://api.ratemyopenapi.com/sync-report";
pub const DEFAULT_MINIMUM_SCORE: u32 = 80;
/// Upper bound for the whole upload round trip
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Input required and not supplied: {0}")]
    MissingInput(&'static str),

    #[error("Input '{input}' must be a non-negative integer, got '{value}'")]
    InvalidNumber { input: &'static str, value: String },

    #[error("The OpenAPI file path provided does not exist: {}. Please specify an existing OpenAPI file and try again.", .0.display())]
    FileNotFound(PathBuf),

    #[error("Failed to load project config {}: {message}", .path.display())]
    ProjectFile { path: PathBuf, message: String },
}

/// Raw, unvalidated inputs as bound from flags and environment.
///
/// GitHub passes inputs that were not set as empty strings, so empty values
/// are treated the same as missing ones.
#[derive(Debug, Clone, Default)]
pub struct Inputs {
    pub filepath: Option<String>,
    pub apikey: Option<String>,
    pub max_warnings: Option<String>,
    pub max_errors: Option<String>,
    pub minimum_score: Option<String>,
    pub endpoint: Option<String>,
    pub timeout_secs: Option<String>,
    pub output: Option<PathBuf>,
}

/// API key that never shows up in `Debug` output
#[derive(Clone)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

/// Pass/fail limits evaluated by the threshold gate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Thresholds {
    /// `None` = no limit
    pub max_warnings: Option<u32>,
    /// `None` = no limit
    pub max_errors: Option<u32>,
    pub minimum_score: u32,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            max_warnings: None,
            max_errors: None,
            minimum_score: DEFAULT_MINIMUM_SCORE,
        }
    }
}

/// Fully resolved configuration for one run
#[derive(Debug, Clone)]
pub struct Config {
    pub file_path: PathBuf,
    pub api_key: ApiKey,
    pub thresholds: Thresholds,
    pub endpoint: String,
    pub timeout: Duration,
    pub output: Option<PathBuf>,
}

impl Config {
    /// Merge inputs over the project file and validate the result.
    ///
    /// Fails before anything touches the network: missing required inputs,
    /// malformed numbers and a nonexistent file all return early.
    pub fn resolve(inputs: Inputs, project: &ProjectConfig) -> Result<Self, ConfigError> {
        let filepath = non_empty(inputs.filepath).ok_or(ConfigError::MissingInput("filepath"))?;
        let apikey = non_empty(inputs.apikey).ok_or(ConfigError::MissingInput("apikey"))?;

        let defaults = Thresholds::default();
        let thresholds = Thresholds {
            max_warnings: parse_number("max-warnings", inputs.max_warnings)?
                .or(project.thresholds.max_warnings),
            max_errors: parse_number("max-errors", inputs.max_errors)?
                .or(project.thresholds.max_errors),
            minimum_score: parse_number("minimum-score", inputs.minimum_score)?
                .or(project.thresholds.minimum_score)
                .unwrap_or(defaults.minimum_score),
        };

        let endpoint = non_empty(inputs.endpoint)
            .or_else(|| project.service.endpoint.clone())
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());

        let timeout_secs = parse_number::<u64>("timeout-secs", inputs.timeout_secs)?
            .or(project.service.timeout_secs)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        let file_path = PathBuf::from(filepath);
        validate_file(&file_path)?;

        Ok(Self {
            file_path,
            api_key: ApiKey::new(apikey),
            thresholds,
            endpoint,
            timeout: Duration::from_secs(timeout_secs),
            output: inputs.output,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_number<T: std::str::FromStr>(
    input: &'static str,
    value: Option<String>,
) -> Result<Option<T>, ConfigError> {
    match non_empty(value) {
        None => Ok(None),
        Some(v) => v
            .parse::<T>()
            .map(Some)
            .map_err(|_| ConfigError::InvalidNumber { input, value: v }),
    }
}

fn validate_file(path: &Path) -> Result<(), ConfigError> {
    if path.is_file() {
        Ok(())
    } else {
        Err(ConfigError::FileNotFound(path.to_path_buf()))
    }
}
