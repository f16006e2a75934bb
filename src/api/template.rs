//! Client for the template completion service.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

pub const COMPLETE_TEMPLATE_PATH: &str = "/api/complete-template";

#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("Template request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Template completion failed: HTTP {status} {reason}")]
    Status { status: u16, reason: String },
    #[error("{0}")]
    Server(String),
    #[error("The server response did not include a result")]
    MissingResult,
}

#[derive(Debug, Serialize)]
struct CompleteRequest<'a> {
    prompt: &'a str,
}

#[derive(Debug, Deserialize)]
struct CompleteResponse {
    #[serde(default)]
    result: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Seam between the widget and the completion service.
#[async_trait]
pub trait TemplateBackend: Send + Sync {
    /// Post the composed prompt and return the completed template text.
    async fn complete(&self, prompt: &str) -> Result<String, TemplateError>;
}

/// HTTP client for the completion endpoint.
#[derive(Debug, Clone)]
pub struct TemplateClient {
    base_url: String,
    http: reqwest::Client,
}

impl TemplateClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl TemplateBackend for TemplateClient {
    async fn complete(&self, prompt: &str) -> Result<String, TemplateError> {
        info!("Requesting template completion ({} prompt chars)", prompt.chars().count());

        let url = format!("{}{}", self.base_url, COMPLETE_TEMPLATE_PATH);
        let response = self
            .http
            .post(&url)
            .json(&CompleteRequest { prompt })
            .send()
            .await?;

        let status = response.status();
        debug!("Template response: HTTP {}", status.as_u16());
        if !status.is_success() {
            return Err(TemplateError::Status {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("unknown").to_string(),
            });
        }

        let body: CompleteResponse = response.json().await?;
        if let Some(message) = body.error {
            return Err(TemplateError::Server(message));
        }

        body.result.ok_or(TemplateError::MissingResult)
    }
}
