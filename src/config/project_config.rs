//! Project-level configuration support
//!
//! Loads optional defaults from `rmoa.toml` in the working directory, or
//! from an explicit `--config` path.
//!
//! # Configuration Format
//!
//! ```toml
//! # rmoa.toml
//!
//! [thresholds]
//! max_warnings = 10
//! max_errors = 0
//! minimum_score = 80
//!
//! [service]
//! endpoint = "https://api.ratemyopenapi.com/sync-report"
//! timeout_secs = 60
//! ```

use super::ConfigError;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const PROJECT_CONFIG_FILE: &str = "rmoa.toml";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectConfig {
    #[serde(default)]
    pub thresholds: ThresholdDefaults,
    #[serde(default)]
    pub service: ServiceConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ThresholdDefaults {
    pub max_warnings: Option<u32>,
    pub max_errors: Option<u32>,
    pub minimum_score: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceConfig {
    pub endpoint: Option<String>,
    pub timeout_secs: Option<u64>,
}

/// Load the project file.
///
/// An explicit path must exist. Without one, `rmoa.toml` in `dir` is used
/// when present and defaults otherwise. A file that exists but does not
/// parse is always an error.
pub fn load_project_config(
    explicit: Option<&Path>,
    dir: &Path,
) -> Result<ProjectConfig, ConfigError> {
    let path: PathBuf = match explicit {
        Some(p) => p.to_path_buf(),
        None => {
            let candidate = dir.join(PROJECT_CONFIG_FILE);
            if !candidate.is_file() {
                debug!("No project config found, using defaults");
                return Ok(ProjectConfig::default());
            }
            candidate
        }
    };

    let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::ProjectFile {
        path: path.clone(),
        message: e.to_string(),
    })?;
    let config: ProjectConfig = toml::from_str(&content).map_err(|e| ConfigError::ProjectFile {
        path: path.clone(),
        message: e.to_string(),
    })?;
    debug!("Loaded project config from {}", path.display());
    Ok(config)
}
