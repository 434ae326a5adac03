//! Outbound client for the counting service.
//!
//! The form talks to the counting API over HTTP even when both run in the
//! same process, so the web and API roles can be deployed separately.

use std::time::Duration;

use async_trait::async_trait;

use crate::count::{CountRequest, CountResult};

/// Error type for calls to the counting service
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Request to counting service failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Backend error: {0}")]
    Status(u16),

    #[error("Invalid backend URL '{url}': {message}")]
    InvalidUrl { url: String, message: String },
}

/// Something that can count a name.
///
/// Implemented over HTTP by [`HttpCountClient`]; tests substitute their own.
#[async_trait]
pub trait CountBackend: Send + Sync {
    async fn count(&self, name: &str) -> Result<CountResult, ClientError>;
}

/// HTTP client for `POST {backend_url}/count`.
#[derive(Clone, Debug)]
pub struct HttpCountClient {
    endpoint: reqwest::Url,
    http_client: reqwest::Client,
}

impl HttpCountClient {
    /// Build a client for `endpoint` with a per-request timeout.
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self, ClientError> {
        let endpoint = reqwest::Url::parse(endpoint).map_err(|e| ClientError::InvalidUrl {
            url: endpoint.to_string(),
            message: e.to_string(),
        })?;

        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()?;

        Ok(Self {
            endpoint,
            http_client,
        })
    }

    pub fn endpoint(&self) -> &str {
        self.endpoint.as_str()
    }
}

#[async_trait]
impl CountBackend for HttpCountClient {
    async fn count(&self, name: &str) -> Result<CountResult, ClientError> {
        let request = CountRequest {
            name: name.to_string(),
        };

        let response = self
            .http_client
            .post(self.endpoint.clone())
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status(status.as_u16()));
        }

        Ok(response.json::<CountResult>().await?)
    }
}
