//! Client for the Rate My OpenAPI report service
//!
//! One synchronous multipart upload per run via ureq (no async runtime).
//! The response body is read once and decoded as either the report or the
//! service's error envelope, depending on the status code.

mod upload;

pub use upload::UploadFile;

use crate::config::ApiKey;
use crate::models::{ApiErrorBody, Report};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Failed to read {}: {source}", .path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Request to {endpoint} failed: {message}")]
    Transport { endpoint: String, message: String },

    #[error("{message}")]
    Service { status: u16, message: String },

    #[error("Failed to decode report response: {0}")]
    Decode(String),
}

pub type ClientResult<T> = Result<T, ClientError>;

/// Anything that can turn an uploaded document into a report
pub trait ReportService {
    fn fetch_report(&self, file: &UploadFile) -> ClientResult<Report>;
}

/// HTTP client for the `sync-report` endpoint
pub struct ReportClient {
    endpoint: String,
    api_key: ApiKey,
    agent: ureq::Agent,
}

fn make_agent(timeout: Duration) -> ureq::Agent {
    ureq::config::Config::builder()
        .http_status_as_error(false) // error bodies carry the service message
        .timeout_global(Some(timeout))
        .build()
        .new_agent()
}

impl ReportClient {
    pub fn new(endpoint: impl Into<String>, api_key: ApiKey, timeout: Duration) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key,
            agent: make_agent(timeout),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl ReportService for ReportClient {
    fn fetch_report(&self, file: &UploadFile) -> ClientResult<Report> {
        let multipart = file.to_multipart();
        info!(
            "Uploading {} ({} bytes) to {}",
            file.file_name,
            multipart.body.len(),
            self.endpoint
        );

        let response = self
            .agent
            .post(&self.endpoint)
            .header("Authorization", &format!("Bearer {}", self.api_key.expose()))
            .header("Content-Type", &multipart.content_type())
            .header("User-Agent", &format!("rmoa-lint/{}", env!("CARGO_PKG_VERSION")))
            .send(&multipart.body[..])
            .map_err(|e| ClientError::Transport {
                endpoint: self.endpoint.clone(),
                message: e.to_string(),
            })?;

        let status = response.status().as_u16();
        let body = response
            .into_body()
            .read_to_string()
            .map_err(|e| ClientError::Transport {
                endpoint: self.endpoint.clone(),
                message: e.to_string(),
            })?;
        debug!("Report service answered HTTP {} ({} bytes)", status, body.len());

        decode_response(status, &body)
    }
}

/// Decode a response body exactly once, branching on status.
///
/// 2xx bodies must be a [`Report`]. Anything else is a service error whose
/// message is `detail`, then `message` from the error envelope, then the
/// raw body, then the bare status.
pub fn decode_response(status: u16, body: &str) -> ClientResult<Report> {
    if (200..300).contains(&status) {
        return serde_json::from_str(body).map_err(|e| ClientError::Decode(e.to_string()));
    }

    let message = match serde_json::from_str::<ApiErrorBody>(body) {
        Ok(envelope) => envelope.reason().to_string(),
        Err(_) if !body.trim().is_empty() => body.trim().to_string(),
        Err(_) => format!("Report service returned HTTP {status}"),
    };
    Err(ClientError::Service { status, message })
}
